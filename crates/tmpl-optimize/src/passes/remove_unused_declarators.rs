use tmpl_core::{walk, Error, Node, NodeId, NodeKind, Result, VisitControl, Visitor, WalkContext};
use tmpl_core::tracing::debug;

use crate::queries::{find_scope, is_referenced};
use crate::utils::{PassContext, RewritePass};

/// Drops declarators whose name is never referenced in their scope.
///
/// The owning VariableDeclaration is kept even when it ends up empty. The
/// loop variable of a `for (var k in obj)` head is always kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveUnusedDeclaratorsPass;

impl RemoveUnusedDeclaratorsPass {
    pub const NAME: &'static str = "remove-unused-declarators";
}

struct Declared<'a> {
    declarator: NodeId,
    name: &'a Node,
}

#[derive(Default)]
struct DeclaratorCollector<'a> {
    found: Vec<Declared<'a>>,
}

fn is_for_in_head(ctx: &WalkContext<'_>) -> bool {
    match (ctx.parent(), ctx.ancestor(1).map(|n| &n.kind)) {
        (Some(decl), Some(NodeKind::ForInStatement { left, .. })) => left.id == decl.id,
        _ => false,
    }
}

impl<'a> Visitor<'a> for DeclaratorCollector<'a> {
    fn enter(&mut self, node: &'a Node, ctx: &WalkContext<'a>) -> VisitControl {
        if let NodeKind::VariableDeclarator { id, .. } = &node.kind {
            if !is_for_in_head(ctx) {
                self.found.push(Declared {
                    declarator: node.id,
                    name: id,
                });
            }
        }
        VisitControl::Continue
    }
}

fn unused_declarators(program: &Node) -> Result<Vec<NodeId>> {
    let mut collector = DeclaratorCollector::default();
    walk(program, &mut collector);

    let mut unused = Vec::new();
    for declared in collector.found {
        let scope =
            find_scope(program, declared.declarator).ok_or(Error::Detached(declared.declarator))?;
        let name = declared.name.identifier_name().unwrap_or_default();
        if !is_referenced(scope.body, name, Some(declared.name.id)) {
            debug!(%name, declarator = %declared.declarator, "dropping unused declarator");
            unused.push(declared.declarator);
        }
    }
    Ok(unused)
}

impl RewritePass for RemoveUnusedDeclaratorsPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rewrite(&self, program: &mut Node, _ctx: &PassContext) -> Result<usize> {
        let unused = unused_declarators(program)?;
        for id in unused.iter().rev() {
            program.detach(*id)?;
        }
        Ok(unused.len())
    }
}
