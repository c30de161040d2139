use crate::id::NodeId;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed tree at node {node} ({kind}): {message}")]
    Malformed {
        node: NodeId,
        kind: &'static str,
        message: String,
    },
    #[error("Node {0} is not part of this tree")]
    Detached(NodeId),
    #[error("Pass `{pass}` failed: {source}")]
    Pass {
        pass: &'static str,
        #[source]
        source: Box<Error>,
    },
    #[error("Generic error: {0}")]
    Generic(String),
}

impl Error {
    pub fn malformed(node: NodeId, kind: &'static str, message: impl Into<String>) -> Self {
        Error::Malformed {
            node,
            kind,
            message: message.into(),
        }
    }

    pub fn in_pass(self, pass: &'static str) -> Self {
        match self {
            // keep the innermost pass name
            err @ Error::Pass { .. } => err,
            err => Error::Pass {
                pass,
                source: Box::new(err),
            },
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(format!("{err:#}"))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
