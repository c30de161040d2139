//! Structural checks for the constrained tree shape.
//!
//! A tree that fails these checks is a contract violation by the producer (or
//! a bug in a pass); the first offending node is reported.

use std::collections::HashSet;

use super::{Node, NodeKind};
use crate::error::Result;
use crate::id::NodeId;

/// Check that `program` is a well-formed instance of the constrained shape.
pub fn validate_program(program: &Node) -> Result<()> {
    shape_ensure!(
        matches!(program.kind, NodeKind::Program { .. }),
        program,
        "the root must be a Program"
    );
    let mut seen = HashSet::new();
    validate_node(program, &mut seen)
}

fn validate_node(node: &Node, seen: &mut HashSet<NodeId>) -> Result<()> {
    shape_ensure!(node.id.is_assigned(), node, "node has no id");
    shape_ensure!(seen.insert(node.id), node, "id {} appears twice", node.id);

    match &node.kind {
        NodeKind::Program { body } => {
            for stmt in body {
                expect_statement(stmt)?;
            }
        }
        NodeKind::BlockStatement { body } => {
            for stmt in body {
                expect_statement(stmt)?;
            }
        }
        NodeKind::ExpressionStatement { expression } => expect_expression(expression)?,
        NodeKind::VariableDeclaration { declarations, .. } => {
            for declarator in declarations {
                shape_ensure!(
                    matches!(declarator.kind, NodeKind::VariableDeclarator { .. }),
                    declarator,
                    "a VariableDeclaration may only hold VariableDeclarators"
                );
            }
        }
        NodeKind::VariableDeclarator { id, init } => {
            expect_identifier(id)?;
            if let Some(init) = init {
                expect_expression(init)?;
            }
        }
        NodeKind::FunctionDeclaration { id, params, body }
        | NodeKind::FunctionExpression { id, params, body } => {
            if let Some(id) = id {
                expect_identifier(id)?;
            }
            shape_ensure!(
                id.is_some() || matches!(node.kind, NodeKind::FunctionExpression { .. }),
                node,
                "a FunctionDeclaration needs a name"
            );
            for param in params {
                expect_identifier(param)?;
            }
            shape_ensure!(body.is_block(), body, "a function body must be a BlockStatement");
        }
        NodeKind::ReturnStatement { argument } => {
            if let Some(argument) = argument {
                expect_expression(argument)?;
            }
        }
        NodeKind::IfStatement {
            test,
            consequent,
            alternate,
        } => {
            expect_expression(test)?;
            expect_nested_statement(consequent)?;
            if let Some(alternate) = alternate {
                expect_nested_statement(alternate)?;
            }
        }
        NodeKind::ForStatement {
            init,
            test,
            update,
            body,
        } => {
            if let Some(init) = init {
                shape_ensure!(
                    init.is_expression()
                        || matches!(init.kind, NodeKind::VariableDeclaration { .. }),
                    init,
                    "a for-loop head must be a declaration or an expression"
                );
            }
            for part in [test, update].into_iter().flatten() {
                expect_expression(part)?;
            }
            expect_nested_statement(body)?;
        }
        NodeKind::ForInStatement { left, right, body } => {
            shape_ensure!(
                left.is_expression() || matches!(left.kind, NodeKind::VariableDeclaration { .. }),
                left,
                "a for-in head must be a declaration or an expression"
            );
            expect_expression(right)?;
            expect_nested_statement(body)?;
        }
        NodeKind::WhileStatement { test, body } => {
            expect_expression(test)?;
            expect_nested_statement(body)?;
        }
        NodeKind::AssignmentExpression { left, right, .. } => {
            shape_ensure!(
                matches!(
                    left.kind,
                    NodeKind::Identifier { .. } | NodeKind::MemberExpression { .. }
                ),
                left,
                "assignment target must be an Identifier or MemberExpression"
            );
            expect_expression(right)?;
        }
        NodeKind::BinaryExpression { left, right, .. }
        | NodeKind::LogicalExpression { left, right, .. } => {
            expect_expression(left)?;
            expect_expression(right)?;
        }
        NodeKind::UnaryExpression { argument, .. }
        | NodeKind::UpdateExpression { argument, .. } => expect_expression(argument)?,
        NodeKind::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => {
            for part in [test, consequent, alternate] {
                expect_expression(part)?;
            }
        }
        NodeKind::CallExpression { callee, arguments } => {
            expect_expression(callee)?;
            for argument in arguments {
                expect_expression(argument)?;
            }
        }
        NodeKind::MemberExpression {
            object,
            property,
            computed,
        } => {
            expect_expression(object)?;
            if *computed {
                expect_expression(property)?;
            } else {
                expect_identifier(property)?;
            }
        }
        NodeKind::ArrayExpression { elements } => {
            for element in elements {
                expect_expression(element)?;
            }
        }
        NodeKind::ObjectExpression { properties } => {
            for property in properties {
                shape_ensure!(
                    matches!(property.kind, NodeKind::Property { .. }),
                    property,
                    "an ObjectExpression may only hold Properties"
                );
            }
        }
        NodeKind::Property { key, value, .. } => {
            expect_expression(key)?;
            expect_expression(value)?;
        }
        NodeKind::Identifier { name } => {
            shape_ensure!(!name.is_empty(), node, "identifier has no name");
        }
        NodeKind::EmptyStatement | NodeKind::ThisExpression | NodeKind::Literal { .. } => {}
    }

    for child in node.children() {
        validate_node(child, seen)?;
    }
    Ok(())
}

fn expect_statement(node: &Node) -> Result<()> {
    shape_ensure!(node.is_statement(), node, "expected a statement");
    Ok(())
}

/// Statements in a single slot (branches, loop bodies) may not be declarations
/// of functions: hoisting and removal only work on statement lists.
fn expect_nested_statement(node: &Node) -> Result<()> {
    expect_statement(node)?;
    shape_ensure!(
        !matches!(node.kind, NodeKind::FunctionDeclaration { .. }),
        node,
        "a FunctionDeclaration must sit directly in a statement list"
    );
    Ok(())
}

fn expect_expression(node: &Node) -> Result<()> {
    shape_ensure!(node.is_expression(), node, "expected an expression");
    Ok(())
}

fn expect_identifier(node: &Node) -> Result<()> {
    shape_ensure!(
        matches!(node.kind, NodeKind::Identifier { .. }),
        node,
        "expected an Identifier"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstBuilder;
    use crate::error::Error;

    #[test]
    fn accepts_builder_trees() {
        let b = AstBuilder::new();
        let program = b.program(vec![
            b.var("html", None),
            b.expr_stmt(b.call(b.ident("f"), vec![b.ident("html")])),
        ]);
        assert!(validate_program(&program).is_ok());
    }

    #[test]
    fn rejects_nameless_identifier() {
        let b = AstBuilder::new();
        let bad = b.ident("");
        let bad_id = bad.id;
        let program = b.program(vec![b.expr_stmt(bad)]);
        match validate_program(&program) {
            Err(Error::Malformed { node, kind, .. }) => {
                assert_eq!(node, bad_id);
                assert_eq!(kind, "Identifier");
            }
            other => panic!("expected a malformed-tree error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let b = AstBuilder::new();
        let stmt = b.expr_stmt(b.ident("a"));
        let program = b.program(vec![stmt.clone(), stmt]);
        assert!(validate_program(&program).is_err());
    }

    #[test]
    fn rejects_non_program_root() {
        let b = AstBuilder::new();
        assert!(validate_program(&b.block(vec![])).is_err());
    }
}
