use std::collections::HashSet;

use tmpl_core::ast::AssignmentOperator;
use tmpl_core::{
    walk, walk_nodes, Error, Node, NodeId, NodeKind, Result, VisitControl, Visitor, WalkContext,
};
use tmpl_core::tracing::{debug, trace};

use crate::queries::{find_scope, is_member_property, is_output_append};
use crate::utils::{PassContext, RewritePass};

/// Turns the first unconditional `html += x;` after the declaration of the
/// output variable into `html = x;` and drops the declaration's initializer.
///
/// Only declarations initialized with nothing or `""` qualify. The forward scan
/// starts at the declaring statement and gives up at the first loop, branch or
/// function, or at any other use of the output variable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizeFirstOutputPass;

impl NormalizeFirstOutputPass {
    pub const NAME: &'static str = "normalize-first-output";
}

fn is_boundary(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::ForStatement { .. }
            | NodeKind::ForInStatement { .. }
            | NodeKind::WhileStatement { .. }
            | NodeKind::IfStatement { .. }
            | NodeKind::FunctionDeclaration { .. }
            | NodeKind::FunctionExpression { .. }
    )
}

fn has_empty_seed(init: Option<&Node>) -> bool {
    match init.map(|init| &init.kind) {
        None => true,
        Some(NodeKind::Literal { value }) => value.as_str() == Some(""),
        Some(_) => false,
    }
}

struct Seed<'a> {
    declarator: NodeId,
    name: &'a Node,
}

struct SeedCollector<'a, 'n> {
    var: &'n str,
    found: Vec<Seed<'a>>,
}

impl<'a> Visitor<'a> for SeedCollector<'a, '_> {
    fn enter(&mut self, node: &'a Node, _ctx: &WalkContext<'a>) -> VisitControl {
        if let NodeKind::VariableDeclarator { id, init } = &node.kind {
            if id.is_identifier(self.var) && has_empty_seed(init.as_deref()) {
                self.found.push(Seed {
                    declarator: node.id,
                    name: id,
                });
            }
        }
        VisitControl::Continue
    }
}

/// Forward scan for the first output write; stops at whichever comes first.
struct FirstWrite<'n> {
    var: &'n str,
    found: Option<NodeId>,
}

impl<'a> Visitor<'a> for FirstWrite<'_> {
    fn enter(&mut self, node: &'a Node, ctx: &WalkContext<'a>) -> VisitControl {
        if is_boundary(node) {
            trace!(boundary = node.kind_name(), "first output write is conditional");
            return VisitControl::StopAll;
        }
        if is_output_append(node, self.var) {
            self.found = Some(node.id);
            return VisitControl::StopAll;
        }
        if node.is_identifier(self.var) && !is_member_property(node, ctx.parent()) {
            return VisitControl::StopAll;
        }
        VisitControl::Continue
    }
}

/// `(declarator, statement)` pairs to rewrite.
fn first_writes(program: &Node, var: &str) -> Result<Vec<(NodeId, NodeId)>> {
    let mut seeds = SeedCollector {
        var,
        found: Vec::new(),
    };
    walk(program, &mut seeds);

    let mut writes = Vec::new();
    let mut claimed = HashSet::new();
    for seed in seeds.found {
        let scope = find_scope(program, seed.declarator).ok_or(Error::Detached(seed.declarator))?;
        let Some(start) = scope
            .body
            .iter()
            .position(|stmt| stmt.contains(seed.declarator))
        else {
            continue;
        };
        let mut scan = FirstWrite { var, found: None };
        walk_nodes(&scope.body[start..], Some(seed.name.id), &mut scan);
        if let Some(stmt) = scan.found {
            if claimed.insert(stmt) {
                writes.push((seed.declarator, stmt));
            }
        }
    }
    Ok(writes)
}

fn set_assign(stmt: &mut Node) -> Result<()> {
    let (id, kind) = (stmt.id, stmt.kind_name());
    if let NodeKind::ExpressionStatement { expression } = &mut stmt.kind {
        if let NodeKind::AssignmentExpression { operator, .. } = &mut expression.kind {
            *operator = AssignmentOperator::Assign;
            return Ok(());
        }
    }
    Err(Error::malformed(id, kind, "expected an output append"))
}

impl RewritePass for NormalizeFirstOutputPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rewrite(&self, program: &mut Node, ctx: &PassContext) -> Result<usize> {
        let writes = first_writes(program, &ctx.options.output_variable)?;
        for (declarator, stmt) in &writes {
            let target = program.find_mut(*stmt).ok_or(Error::Detached(*stmt))?;
            set_assign(target)?;
            let decl = program
                .find_mut(*declarator)
                .ok_or(Error::Detached(*declarator))?;
            if let NodeKind::VariableDeclarator { init, .. } = &mut decl.kind {
                *init = None;
            }
            debug!(declarator = %declarator, stmt = %stmt, "first output write is now an assignment");
        }
        Ok(writes.len())
    }
}
