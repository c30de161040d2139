use tmpl_core::ast::AssignmentOperator;
use tmpl_core::{walk, Error, Node, NodeId, Result, VisitControl, Visitor, WalkContext};
use tmpl_core::tracing::debug;

use crate::queries::{find_scope, is_referenced};
use crate::utils::{PassContext, RewritePass};

/// Dead-store elimination for `name = value;` statements whose target is
/// never read anywhere in its enclosing scope.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveUnusedAssignmentsPass;

impl RemoveUnusedAssignmentsPass {
    pub const NAME: &'static str = "remove-unused-assignments";
}

struct Candidate<'a> {
    stmt: NodeId,
    target: &'a Node,
}

#[derive(Default)]
struct AssignmentCollector<'a> {
    found: Vec<Candidate<'a>>,
}

impl<'a> Visitor<'a> for AssignmentCollector<'a> {
    fn enter(&mut self, node: &'a Node, _ctx: &WalkContext<'a>) -> VisitControl {
        if let Some((target, AssignmentOperator::Assign, _)) = node.as_identifier_assignment() {
            self.found.push(Candidate {
                stmt: node.id,
                target,
            });
        }
        VisitControl::Continue
    }
}

fn dead_assignments(program: &Node) -> Result<Vec<NodeId>> {
    let mut dead = Vec::new();
    let mut collector = AssignmentCollector::default();
    walk(program, &mut collector);
    for candidate in collector.found {
        let scope = find_scope(program, candidate.stmt).ok_or(Error::Detached(candidate.stmt))?;
        let name = candidate.target.identifier_name().unwrap_or_default();
        if !is_referenced(scope.body, name, Some(candidate.target.id)) {
            debug!(%name, stmt = %candidate.stmt, "dropping dead store");
            dead.push(candidate.stmt);
        }
    }
    Ok(dead)
}

impl RewritePass for RemoveUnusedAssignmentsPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rewrite(&self, program: &mut Node, ctx: &PassContext) -> Result<usize> {
        let dead = dead_assignments(program)?;
        // innermost first, so nested removals still find their parents
        for id in dead.iter().rev() {
            program.remove_statement(*id, ctx.builder.fresh_id())?;
        }
        Ok(dead.len())
    }
}
