use tmpl_core::tracing::debug;
use tmpl_core::{shape_bail, walk, EnterFn, Node, NodeId, NodeKind, Result, VisitControl, WalkContext};

use crate::utils::{PassContext, RewritePass};

/// Moves every partial function (a declaration whose name carries the
/// partial marker) to the top of the Program body.
///
/// Partials end up in document order ahead of all other top-level statements.
/// A partial nested inside another partial is lifted out as well; the bodies
/// are otherwise moved untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct HoistPartialsPass;

impl HoistPartialsPass {
    pub const NAME: &'static str = "hoist-partials";
}

fn is_partial(node: &Node, marker: char) -> bool {
    matches!(node.kind, NodeKind::FunctionDeclaration { .. })
        && node
            .function_name()
            .is_some_and(|name| name.contains(marker))
}

/// Every partial in pre-order.
fn partials(program: &Node, marker: char) -> Vec<NodeId> {
    let mut partials = Vec::new();
    walk(
        program,
        &mut EnterFn(|node: &Node, _: &WalkContext| {
            if is_partial(node, marker) {
                partials.push(node.id);
            }
            VisitControl::Continue
        }),
    );
    partials
}

impl RewritePass for HoistPartialsPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rewrite(&self, program: &mut Node, ctx: &PassContext) -> Result<usize> {
        let Some(top_level) = program.statements() else {
            shape_bail!(program, "partials can only be hoisted into a Program");
        };
        let partials = partials(program, ctx.options.partial_marker);
        if partials.is_empty() {
            return Ok(0);
        }
        // a partial only counts as moved when its final slot differs
        let moved = partials
            .iter()
            .enumerate()
            .filter(|(slot, id)| top_level.iter().position(|stmt| stmt.id == **id) != Some(*slot))
            .count();

        // innermost first, so a nested partial leaves its parent before the parent moves
        let mut hoisted = Vec::with_capacity(partials.len());
        for id in partials.iter().rev() {
            hoisted.push(program.detach(*id)?);
        }
        hoisted.reverse();
        for partial in &hoisted {
            debug!(name = ?partial.function_name(), "hoisting partial");
        }

        if let Some(body) = program.statements_mut() {
            body.splice(0..0, hoisted);
        }
        Ok(moved)
    }
}
