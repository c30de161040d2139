//! The constrained ESTree subset produced by the template compiler.
//!
//! AST are trees: every node is owned by exactly one parent slot. Nodes carry a
//! [`NodeId`] so passes can refer to a node across a read-only scan and a
//! later mutation without holding a borrow.

use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

use crate::id::NodeId;

mod build;
mod json;
mod ops;
mod pretty;
mod tree;
mod validate;

pub use build::*;
pub use json::*;
pub use ops::*;
pub use validate::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl LiteralValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type")]
pub enum NodeKind {
    Program {
        body: Vec<Node>,
    },
    BlockStatement {
        body: Vec<Node>,
    },
    EmptyStatement,
    ExpressionStatement {
        expression: Box<Node>,
    },
    VariableDeclaration {
        kind: VarKind,
        declarations: Vec<Node>,
    },
    VariableDeclarator {
        id: Box<Node>,
        #[serde(default)]
        init: Option<Box<Node>>,
    },
    FunctionDeclaration {
        #[serde(default)]
        id: Option<Box<Node>>,
        params: Vec<Node>,
        body: Box<Node>,
    },
    FunctionExpression {
        #[serde(default)]
        id: Option<Box<Node>>,
        params: Vec<Node>,
        body: Box<Node>,
    },
    ReturnStatement {
        #[serde(default)]
        argument: Option<Box<Node>>,
    },
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        #[serde(default)]
        alternate: Option<Box<Node>>,
    },
    ForStatement {
        #[serde(default)]
        init: Option<Box<Node>>,
        #[serde(default)]
        test: Option<Box<Node>>,
        #[serde(default)]
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    ForInStatement {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
    },
    WhileStatement {
        test: Box<Node>,
        body: Box<Node>,
    },
    AssignmentExpression {
        operator: AssignmentOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    LogicalExpression {
        operator: LogicalOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryExpression {
        operator: UnaryOperator,
        #[serde(default = "default_prefix")]
        prefix: bool,
        argument: Box<Node>,
    },
    UpdateExpression {
        operator: UpdateOperator,
        #[serde(default)]
        prefix: bool,
        argument: Box<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        #[serde(default)]
        computed: bool,
    },
    ArrayExpression {
        elements: Vec<Node>,
    },
    ObjectExpression {
        properties: Vec<Node>,
    },
    Property {
        key: Box<Node>,
        value: Box<Node>,
        #[serde(default)]
        computed: bool,
    },
    ThisExpression,
    Identifier {
        name: String,
    },
    Literal {
        value: LiteralValue,
    },
}

fn default_prefix() -> bool {
    true
}

/// A tree node. Equality is structural: ids are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(skip)]
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self { id, kind }
    }

    pub fn kind_name(&self) -> &'static str {
        (&self.kind).into()
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::BlockStatement { .. }
                | NodeKind::EmptyStatement
                | NodeKind::ExpressionStatement { .. }
                | NodeKind::VariableDeclaration { .. }
                | NodeKind::FunctionDeclaration { .. }
                | NodeKind::ReturnStatement { .. }
                | NodeKind::IfStatement { .. }
                | NodeKind::ForStatement { .. }
                | NodeKind::ForInStatement { .. }
                | NodeKind::WhileStatement { .. }
        )
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::FunctionExpression { .. }
                | NodeKind::AssignmentExpression { .. }
                | NodeKind::BinaryExpression { .. }
                | NodeKind::LogicalExpression { .. }
                | NodeKind::UnaryExpression { .. }
                | NodeKind::UpdateExpression { .. }
                | NodeKind::ConditionalExpression { .. }
                | NodeKind::CallExpression { .. }
                | NodeKind::MemberExpression { .. }
                | NodeKind::ArrayExpression { .. }
                | NodeKind::ObjectExpression { .. }
                | NodeKind::ThisExpression
                | NodeKind::Identifier { .. }
                | NodeKind::Literal { .. }
        )
    }

    /// FunctionDeclaration or FunctionExpression: the nodes that open a scope.
    pub fn is_function(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::FunctionDeclaration { .. } | NodeKind::FunctionExpression { .. }
        )
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, NodeKind::BlockStatement { .. })
    }

    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_identifier(&self, expected: &str) -> bool {
        self.identifier_name() == Some(expected)
    }

    /// Name of a function node, if it has one.
    pub fn function_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::FunctionDeclaration { id, .. } | NodeKind::FunctionExpression { id, .. } => {
                id.as_deref().and_then(Node::identifier_name)
            }
            _ => None,
        }
    }

    /// Statement list of a Program or BlockStatement.
    pub fn statements(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => Some(body),
            _ => None,
        }
    }

    pub fn statements_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.kind {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => Some(body),
            _ => None,
        }
    }

    /// Statements of a function's body block.
    pub fn function_body(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::FunctionDeclaration { body, .. }
            | NodeKind::FunctionExpression { body, .. } => body.statements(),
            _ => None,
        }
    }

    /// `target op value` when this is an ExpressionStatement wrapping an assignment
    /// to a plain identifier.
    pub fn as_identifier_assignment(&self) -> Option<(&Node, AssignmentOperator, &Node)> {
        let NodeKind::ExpressionStatement { expression } = &self.kind else {
            return None;
        };
        match &expression.kind {
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } if left.identifier_name().is_some() => Some((left, *operator, right)),
            _ => None,
        }
    }
}
