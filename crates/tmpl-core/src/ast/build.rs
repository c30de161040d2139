use std::cell::RefCell;

use super::{
    AssignmentOperator, BinaryOperator, LiteralValue, LogicalOperator, Node, NodeKind,
    UnaryOperator, VarKind,
};
use crate::id::{NodeId, NodeIdGen};

/// Constructs nodes with fresh ids.
///
/// Ids come from a shared counter behind a `RefCell`, so nested calls such as
/// `b.program(vec![b.expr_stmt(b.ident("x"))])` work through `&self`.
#[derive(Debug, Default)]
pub struct AstBuilder {
    ids: RefCell<NodeIdGen>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: NodeIdGen) -> Self {
        Self {
            ids: RefCell::new(ids),
        }
    }

    /// Builder whose ids never collide with the ones already in `root`.
    pub fn after(root: &Node) -> Self {
        Self::with_ids(NodeIdGen::after(root))
    }

    pub fn fresh_id(&self) -> NodeId {
        self.ids.borrow_mut().new_id()
    }

    pub fn node(&self, kind: NodeKind) -> Node {
        Node::new(self.fresh_id(), kind)
    }

    pub fn program(&self, body: Vec<Node>) -> Node {
        self.node(NodeKind::Program { body })
    }

    pub fn block(&self, body: Vec<Node>) -> Node {
        self.node(NodeKind::BlockStatement { body })
    }

    pub fn empty(&self) -> Node {
        self.node(NodeKind::EmptyStatement)
    }

    pub fn expr_stmt(&self, expression: Node) -> Node {
        self.node(NodeKind::ExpressionStatement {
            expression: Box::new(expression),
        })
    }

    /// `var name = init;` with a single declarator.
    pub fn var(&self, name: &str, init: Option<Node>) -> Node {
        let declarator = self.declarator(name, init);
        self.var_decl(VarKind::Var, vec![declarator])
    }

    pub fn var_decl(&self, kind: VarKind, declarations: Vec<Node>) -> Node {
        self.node(NodeKind::VariableDeclaration { kind, declarations })
    }

    pub fn declarator(&self, name: &str, init: Option<Node>) -> Node {
        let id = self.ident(name);
        self.node(NodeKind::VariableDeclarator {
            id: Box::new(id),
            init: init.map(Box::new),
        })
    }

    pub fn func_decl(&self, name: &str, params: &[&str], body: Vec<Node>) -> Node {
        let id = self.ident(name);
        let params = params.iter().map(|p| self.ident(p)).collect();
        let body = self.block(body);
        self.node(NodeKind::FunctionDeclaration {
            id: Some(Box::new(id)),
            params,
            body: Box::new(body),
        })
    }

    pub fn func_expr(&self, params: &[&str], body: Vec<Node>) -> Node {
        let params = params.iter().map(|p| self.ident(p)).collect();
        let body = self.block(body);
        self.node(NodeKind::FunctionExpression {
            id: None,
            params,
            body: Box::new(body),
        })
    }

    pub fn ret(&self, argument: Option<Node>) -> Node {
        self.node(NodeKind::ReturnStatement {
            argument: argument.map(Box::new),
        })
    }

    pub fn if_stmt(&self, test: Node, consequent: Node, alternate: Option<Node>) -> Node {
        self.node(NodeKind::IfStatement {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: alternate.map(Box::new),
        })
    }

    pub fn for_stmt(
        &self,
        init: Option<Node>,
        test: Option<Node>,
        update: Option<Node>,
        body: Node,
    ) -> Node {
        self.node(NodeKind::ForStatement {
            init: init.map(Box::new),
            test: test.map(Box::new),
            update: update.map(Box::new),
            body: Box::new(body),
        })
    }

    pub fn for_in(&self, left: Node, right: Node, body: Node) -> Node {
        self.node(NodeKind::ForInStatement {
            left: Box::new(left),
            right: Box::new(right),
            body: Box::new(body),
        })
    }

    pub fn while_stmt(&self, test: Node, body: Node) -> Node {
        self.node(NodeKind::WhileStatement {
            test: Box::new(test),
            body: Box::new(body),
        })
    }

    pub fn assign(&self, operator: AssignmentOperator, left: Node, right: Node) -> Node {
        self.node(NodeKind::AssignmentExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `name = value;` as a statement.
    pub fn assign_stmt(&self, name: &str, value: Node) -> Node {
        let target = self.ident(name);
        let assign = self.assign(AssignmentOperator::Assign, target, value);
        self.expr_stmt(assign)
    }

    /// `name += value;` as a statement.
    pub fn append_stmt(&self, name: &str, value: Node) -> Node {
        let target = self.ident(name);
        let assign = self.assign(AssignmentOperator::AddAssign, target, value);
        self.expr_stmt(assign)
    }

    pub fn binary(&self, operator: BinaryOperator, left: Node, right: Node) -> Node {
        self.node(NodeKind::BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn logical(&self, operator: LogicalOperator, left: Node, right: Node) -> Node {
        self.node(NodeKind::LogicalExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(&self, operator: UnaryOperator, argument: Node) -> Node {
        self.node(NodeKind::UnaryExpression {
            operator,
            prefix: true,
            argument: Box::new(argument),
        })
    }

    pub fn call(&self, callee: Node, arguments: Vec<Node>) -> Node {
        self.node(NodeKind::CallExpression {
            callee: Box::new(callee),
            arguments,
        })
    }

    /// Non-computed `object.property`.
    pub fn member(&self, object: Node, property: &str) -> Node {
        let property = self.ident(property);
        self.node(NodeKind::MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed: false,
        })
    }

    pub fn index(&self, object: Node, property: Node) -> Node {
        self.node(NodeKind::MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed: true,
        })
    }

    pub fn array(&self, elements: Vec<Node>) -> Node {
        self.node(NodeKind::ArrayExpression { elements })
    }

    pub fn object(&self, properties: Vec<(&str, Node)>) -> Node {
        let properties = properties
            .into_iter()
            .map(|(key, value)| {
                let key = self.ident(key);
                self.node(NodeKind::Property {
                    key: Box::new(key),
                    value: Box::new(value),
                    computed: false,
                })
            })
            .collect();
        self.node(NodeKind::ObjectExpression { properties })
    }

    pub fn this(&self) -> Node {
        self.node(NodeKind::ThisExpression)
    }

    pub fn ident(&self, name: &str) -> Node {
        self.node(NodeKind::Identifier {
            name: name.to_string(),
        })
    }

    pub fn string(&self, value: &str) -> Node {
        self.literal(LiteralValue::String(value.to_string()))
    }

    pub fn number(&self, value: f64) -> Node {
        self.literal(LiteralValue::Number(value))
    }

    pub fn literal(&self, value: LiteralValue) -> Node {
        self.node(NodeKind::Literal { value })
    }
}
