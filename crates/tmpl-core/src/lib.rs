//! Tree model, traversal and shared infrastructure for the template render
//! optimizer.

#[macro_use]
pub mod macros;

pub mod ast;
pub mod config;
pub mod error;
pub mod id;
pub mod walk;

// Re-export commonly used items for convenience
pub use tracing;

pub use ast::{Node, NodeKind};
pub use id::{NodeId, NodeIdGen};
pub use walk::{walk, walk_nodes, EnterFn, VisitControl, Visitor, WalkContext, WalkOutcome};

// Alias for error types
pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
