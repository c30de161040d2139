//! Compact JavaScript-like rendering, used for logging and tests.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use super::{LiteralValue, Node, NodeKind};

const PREC_LOWEST: u8 = 0;
const PREC_ASSIGN: u8 = 2;
const PREC_CONDITIONAL: u8 = 3;
const PREC_UNARY: u8 = 14;
const PREC_UPDATE: u8 = 15;
const PREC_CALL: u8 = 18;
const PREC_PRIMARY: u8 = 20;

fn precedence(node: &Node) -> u8 {
    match &node.kind {
        NodeKind::AssignmentExpression { .. } => PREC_ASSIGN,
        NodeKind::ConditionalExpression { .. } => PREC_CONDITIONAL,
        NodeKind::LogicalExpression { operator, .. } => operator.precedence(),
        NodeKind::BinaryExpression { operator, .. } => operator.precedence(),
        NodeKind::UnaryExpression { .. } => PREC_UNARY,
        NodeKind::UpdateExpression { .. } => PREC_UPDATE,
        NodeKind::CallExpression { .. } | NodeKind::MemberExpression { .. } => PREC_CALL,
        _ => PREC_PRIMARY,
    }
}

/// An expression rendered with enough parentheses to bind at least `min`.
#[derive(Clone, Copy)]
struct Expr<'a>(&'a Node, u8);

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Expr(node, min) = *self;
        if precedence(node) < min {
            write!(f, "(")?;
            write_expr(f, node)?;
            write!(f, ")")
        } else {
            write_expr(f, node)
        }
    }
}

/// A declaration rendered without its trailing semicolon (`for` heads).
struct Head<'a>(&'a Node);

impl Display for Head<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            NodeKind::VariableDeclaration { kind, declarations } => {
                write!(f, "{kind} {}", declarations.iter().join(", "))
            }
            _ => write!(f, "{}", Expr(self.0, PREC_LOWEST)),
        }
    }
}

fn write_literal(f: &mut Formatter<'_>, value: &LiteralValue) -> fmt::Result {
    match value {
        LiteralValue::Null => write!(f, "null"),
        LiteralValue::Bool(b) => write!(f, "{b}"),
        LiteralValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
            write!(f, "{}", *n as i64)
        }
        LiteralValue::Number(n) => write!(f, "{n}"),
        LiteralValue::String(s) => {
            let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
            f.write_str(&quoted)
        }
    }
}

fn write_function(
    f: &mut Formatter<'_>,
    id: Option<&Node>,
    params: &[Node],
    body: &Node,
) -> fmt::Result {
    write!(f, "function")?;
    if let Some(id) = id {
        write!(f, " {id}")?;
    }
    write!(f, "({}) {body}", params.iter().join(", "))
}

fn write_expr(f: &mut Formatter<'_>, node: &Node) -> fmt::Result {
    match &node.kind {
        NodeKind::Identifier { name } => f.write_str(name),
        NodeKind::Literal { value } => write_literal(f, value),
        NodeKind::ThisExpression => write!(f, "this"),
        NodeKind::AssignmentExpression {
            operator,
            left,
            right,
        } => write!(
            f,
            "{} {operator} {}",
            Expr(left, PREC_CONDITIONAL),
            Expr(right, PREC_ASSIGN)
        ),
        NodeKind::BinaryExpression {
            operator,
            left,
            right,
        } => {
            let prec = operator.precedence();
            write!(f, "{} {operator} {}", Expr(left, prec), Expr(right, prec + 1))
        }
        NodeKind::LogicalExpression {
            operator,
            left,
            right,
        } => {
            let prec = operator.precedence();
            write!(f, "{} {operator} {}", Expr(left, prec), Expr(right, prec + 1))
        }
        NodeKind::UnaryExpression {
            operator, argument, ..
        } => {
            if operator.is_keyword() {
                write!(f, "{operator} {}", Expr(argument, PREC_UNARY))
            } else {
                write!(f, "{operator}{}", Expr(argument, PREC_UNARY))
            }
        }
        NodeKind::UpdateExpression {
            operator,
            prefix,
            argument,
        } => {
            if *prefix {
                write!(f, "{operator}{}", Expr(argument, PREC_UPDATE))
            } else {
                write!(f, "{}{operator}", Expr(argument, PREC_UPDATE))
            }
        }
        NodeKind::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => write!(
            f,
            "{} ? {} : {}",
            Expr(test, PREC_CONDITIONAL + 1),
            Expr(consequent, PREC_ASSIGN),
            Expr(alternate, PREC_ASSIGN)
        ),
        NodeKind::CallExpression { callee, arguments } => write!(
            f,
            "{}({})",
            Expr(callee, PREC_CALL),
            arguments.iter().map(|a| Expr(a, PREC_ASSIGN)).join(", ")
        ),
        NodeKind::MemberExpression {
            object,
            property,
            computed,
        } => {
            if *computed {
                write!(f, "{}[{}]", Expr(object, PREC_CALL), Expr(property, PREC_LOWEST))
            } else {
                write!(f, "{}.{property}", Expr(object, PREC_CALL))
            }
        }
        NodeKind::ArrayExpression { elements } => write!(
            f,
            "[{}]",
            elements.iter().map(|e| Expr(e, PREC_ASSIGN)).join(", ")
        ),
        NodeKind::ObjectExpression { properties } if properties.is_empty() => write!(f, "{{}}"),
        NodeKind::ObjectExpression { properties } => {
            write!(f, "{{ {} }}", properties.iter().join(", "))
        }
        NodeKind::Property {
            key,
            value,
            computed,
        } => {
            if *computed {
                write!(f, "[{}]: {}", Expr(key, PREC_LOWEST), Expr(value, PREC_ASSIGN))
            } else {
                write!(f, "{key}: {}", Expr(value, PREC_ASSIGN))
            }
        }
        NodeKind::FunctionExpression { id, params, body } => {
            write_function(f, id.as_deref(), params, body)
        }
        _ => write_stmt(f, node),
    }
}

/// A statement opening with `function` or `{` would not parse as an expression.
fn starts_ambiguously(node: &Node) -> bool {
    match &node.kind {
        NodeKind::FunctionExpression { .. } | NodeKind::ObjectExpression { .. } => true,
        NodeKind::AssignmentExpression { left, .. }
        | NodeKind::BinaryExpression { left, .. }
        | NodeKind::LogicalExpression { left, .. } => starts_ambiguously(left),
        NodeKind::ConditionalExpression { test, .. } => starts_ambiguously(test),
        NodeKind::CallExpression { callee, .. } => starts_ambiguously(callee),
        NodeKind::MemberExpression { object, .. } => starts_ambiguously(object),
        NodeKind::UpdateExpression {
            prefix: false,
            argument,
            ..
        } => starts_ambiguously(argument),
        _ => false,
    }
}

fn write_stmt(f: &mut Formatter<'_>, node: &Node) -> fmt::Result {
    match &node.kind {
        NodeKind::Program { body } => write!(f, "{}", body.iter().join("\n")),
        NodeKind::BlockStatement { body } if body.is_empty() => write!(f, "{{}}"),
        NodeKind::BlockStatement { body } => write!(f, "{{ {} }}", body.iter().join(" ")),
        NodeKind::EmptyStatement => write!(f, ";"),
        NodeKind::ExpressionStatement { expression } if starts_ambiguously(expression) => {
            write!(f, "({});", Expr(expression, PREC_LOWEST))
        }
        NodeKind::ExpressionStatement { expression } => {
            write!(f, "{};", Expr(expression, PREC_LOWEST))
        }
        NodeKind::VariableDeclaration { .. } => write!(f, "{};", Head(node)),
        NodeKind::VariableDeclarator { id, init } => match init {
            Some(init) => write!(f, "{id} = {}", Expr(init, PREC_ASSIGN)),
            None => write!(f, "{id}"),
        },
        NodeKind::FunctionDeclaration { id, params, body } => {
            write_function(f, id.as_deref(), params, body)
        }
        NodeKind::ReturnStatement { argument: None } => write!(f, "return;"),
        NodeKind::ReturnStatement {
            argument: Some(argument),
        } => write!(f, "return {};", Expr(argument, PREC_LOWEST)),
        NodeKind::IfStatement {
            test,
            consequent,
            alternate,
        } => {
            write!(f, "if ({}) {consequent}", Expr(test, PREC_LOWEST))?;
            if let Some(alternate) = alternate {
                write!(f, " else {alternate}")?;
            }
            Ok(())
        }
        NodeKind::ForStatement {
            init,
            test,
            update,
            body,
        } => write!(
            f,
            "for ({}; {}; {}) {body}",
            init.as_deref().map(|n| Head(n).to_string()).unwrap_or_default(),
            test.as_deref().map(|n| n.to_string()).unwrap_or_default(),
            update.as_deref().map(|n| n.to_string()).unwrap_or_default(),
        ),
        NodeKind::ForInStatement { left, right, body } => {
            write!(f, "for ({} in {}) {body}", Head(left), Expr(right, PREC_LOWEST))
        }
        NodeKind::WhileStatement { test, body } => {
            write!(f, "while ({}) {body}", Expr(test, PREC_LOWEST))
        }
        _ => write_expr(f, node),
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_expression() {
            write_expr(f, self)
        } else {
            write_stmt(f, self)
        }
    }
}
