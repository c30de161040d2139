use tmpl_core::ast::AssignmentOperator;
use tmpl_core::Node;

/// `var += <expr>;` as a statement, with `var` a plain identifier.
pub fn is_output_append(stmt: &Node, var: &str) -> bool {
    matches!(
        stmt.as_identifier_assignment(),
        Some((target, AssignmentOperator::AddAssign, _)) if target.is_identifier(var)
    )
}

/// Right-hand side of an output append, if `stmt` is one.
pub fn output_append_value<'a>(stmt: &'a Node, var: &str) -> Option<&'a Node> {
    match stmt.as_identifier_assignment() {
        Some((target, AssignmentOperator::AddAssign, value)) if target.is_identifier(var) => {
            Some(value)
        }
        _ => None,
    }
}
