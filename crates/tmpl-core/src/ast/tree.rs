//! Navigation and in-place editing by [`NodeId`].

use super::{Node, NodeKind};
use crate::error::{Error, Result};
use crate::id::NodeId;

impl Node {
    /// Direct children in ESTree visitor-key order.
    pub fn children(&self) -> Vec<&Node> {
        let mut out: Vec<&Node> = Vec::new();
        match &self.kind {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => out.extend(body),
            NodeKind::ExpressionStatement { expression } => out.push(expression),
            NodeKind::VariableDeclaration { declarations, .. } => out.extend(declarations),
            NodeKind::VariableDeclarator { id, init } => {
                out.push(id);
                out.extend(init.as_deref());
            }
            NodeKind::FunctionDeclaration { id, params, body }
            | NodeKind::FunctionExpression { id, params, body } => {
                out.extend(id.as_deref());
                out.extend(params);
                out.push(body);
            }
            NodeKind::ReturnStatement { argument } => out.extend(argument.as_deref()),
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                out.push(test);
                out.push(consequent);
                out.extend(alternate.as_deref());
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                out.extend(init.as_deref());
                out.extend(test.as_deref());
                out.extend(update.as_deref());
                out.push(body);
            }
            NodeKind::ForInStatement { left, right, body } => {
                out.push(left);
                out.push(right);
                out.push(body);
            }
            NodeKind::WhileStatement { test, body } => {
                out.push(test);
                out.push(body);
            }
            NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. } => out.push(argument),
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                out.push(test);
                out.push(consequent);
                out.push(alternate);
            }
            NodeKind::CallExpression { callee, arguments } => {
                out.push(callee);
                out.extend(arguments);
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => {
                out.push(object);
                out.push(property);
            }
            NodeKind::ArrayExpression { elements } => out.extend(elements),
            NodeKind::ObjectExpression { properties } => out.extend(properties),
            NodeKind::Property { key, value, .. } => {
                out.push(key);
                out.push(value);
            }
            NodeKind::EmptyStatement
            | NodeKind::ThisExpression
            | NodeKind::Identifier { .. }
            | NodeKind::Literal { .. } => {}
        }
        out
    }

    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        let mut out: Vec<&mut Node> = Vec::new();
        match &mut self.kind {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => out.extend(body),
            NodeKind::ExpressionStatement { expression } => out.push(expression),
            NodeKind::VariableDeclaration { declarations, .. } => out.extend(declarations),
            NodeKind::VariableDeclarator { id, init } => {
                out.push(id);
                out.extend(init.as_deref_mut());
            }
            NodeKind::FunctionDeclaration { id, params, body }
            | NodeKind::FunctionExpression { id, params, body } => {
                out.extend(id.as_deref_mut());
                out.extend(params);
                out.push(body);
            }
            NodeKind::ReturnStatement { argument } => out.extend(argument.as_deref_mut()),
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                out.push(test);
                out.push(consequent);
                out.extend(alternate.as_deref_mut());
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                out.extend(init.as_deref_mut());
                out.extend(test.as_deref_mut());
                out.extend(update.as_deref_mut());
                out.push(body);
            }
            NodeKind::ForInStatement { left, right, body } => {
                out.push(left);
                out.push(right);
                out.push(body);
            }
            NodeKind::WhileStatement { test, body } => {
                out.push(test);
                out.push(body);
            }
            NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. } => out.push(argument),
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                out.push(test);
                out.push(consequent);
                out.push(alternate);
            }
            NodeKind::CallExpression { callee, arguments } => {
                out.push(callee);
                out.extend(arguments);
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => {
                out.push(object);
                out.push(property);
            }
            NodeKind::ArrayExpression { elements } => out.extend(elements),
            NodeKind::ObjectExpression { properties } => out.extend(properties),
            NodeKind::Property { key, value, .. } => {
                out.push(key);
                out.push(value);
            }
            NodeKind::EmptyStatement
            | NodeKind::ThisExpression
            | NodeKind::Identifier { .. }
            | NodeKind::Literal { .. } => {}
        }
        out
    }

    /// Ordered child sequences that passes may splice.
    pub fn sequences_mut(&mut self) -> Vec<&mut Vec<Node>> {
        match &mut self.kind {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => vec![body],
            NodeKind::VariableDeclaration { declarations, .. } => vec![declarations],
            NodeKind::FunctionDeclaration { params, .. }
            | NodeKind::FunctionExpression { params, .. } => vec![params],
            NodeKind::CallExpression { arguments, .. } => vec![arguments],
            NodeKind::ArrayExpression { elements } => vec![elements],
            NodeKind::ObjectExpression { properties } => vec![properties],
            _ => Vec::new(),
        }
    }

    /// Pre-order visit of this node and every descendant.
    pub fn for_each<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.for_each(f);
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        for child in self.children_mut() {
            if let Some(found) = child.find_mut(id) {
                return Some(found);
            }
        }
        None
    }

    pub fn parent_of(&self, id: NodeId) -> Option<&Node> {
        if self.children().iter().any(|child| child.id == id) {
            return Some(self);
        }
        self.children()
            .into_iter()
            .find_map(|child| child.parent_of(id))
    }

    pub fn parent_of_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.children().iter().any(|child| child.id == id) {
            return Some(self);
        }
        for child in self.children_mut() {
            if let Some(parent) = child.parent_of_mut(id) {
                return Some(parent);
            }
        }
        None
    }

    /// Remove the node `id` from the sequence that holds it and return it.
    pub fn detach(&mut self, id: NodeId) -> Result<Node> {
        let parent = self.parent_of_mut(id).ok_or(Error::Detached(id))?;
        let parent_id = parent.id;
        let parent_kind = parent.kind_name();
        for seq in parent.sequences_mut() {
            if let Some(pos) = seq.iter().position(|child| child.id == id) {
                return Ok(seq.remove(pos));
            }
        }
        Err(Error::malformed(
            parent_id,
            parent_kind,
            format!("child {id} is held in a single slot, not a sequence"),
        ))
    }

    /// Swap the node `id` for `replacement`, returning the old node.
    pub fn replace(&mut self, id: NodeId, replacement: Node) -> Result<Node> {
        let target = self.find_mut(id).ok_or(Error::Detached(id))?;
        Ok(std::mem::replace(target, replacement))
    }

    /// Remove a statement. Statements held in a single slot (an `if` branch,
    /// a loop body) become an EmptyStatement with id `empty_id`.
    pub fn remove_statement(&mut self, id: NodeId, empty_id: NodeId) -> Result<Node> {
        let parent = self.parent_of_mut(id).ok_or(Error::Detached(id))?;
        for seq in parent.sequences_mut() {
            if let Some(pos) = seq.iter().position(|child| child.id == id) {
                return Ok(seq.remove(pos));
            }
        }
        self.replace(id, Node::new(empty_id, NodeKind::EmptyStatement))
    }

    /// Replace the BlockStatement `id` with its own statements inside the
    /// parent block. Returns false when the parent is not a BlockStatement.
    pub fn splice_block(&mut self, id: NodeId) -> Result<bool> {
        let parent = self.parent_of_mut(id).ok_or(Error::Detached(id))?;
        let NodeKind::BlockStatement { body } = &mut parent.kind else {
            return Ok(false);
        };
        let Some(pos) = body.iter().position(|child| child.id == id) else {
            return Ok(false);
        };
        let inner = match body.remove(pos).kind {
            NodeKind::BlockStatement { body } => body,
            other => {
                let kind: &'static str = (&other).into();
                return Err(Error::malformed(id, kind, "expected a BlockStatement"));
            }
        };
        body.splice(pos..pos, inner);
        Ok(true)
    }
}
