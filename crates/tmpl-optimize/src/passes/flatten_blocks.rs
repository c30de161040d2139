use tmpl_core::{walk, EnterFn, Node, NodeId, Result, VisitControl, WalkContext};
use tmpl_core::tracing::trace;

use crate::utils::{PassContext, RewritePass};

/// Splices a BlockStatement sitting directly in another BlockStatement into
/// its parent, repeated until no such nesting is left.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlattenBlocksPass;

impl FlattenBlocksPass {
    pub const NAME: &'static str = "flatten-blocks";
}

fn nested_blocks(program: &Node) -> Vec<NodeId> {
    let mut nested = Vec::new();
    walk(
        program,
        &mut EnterFn(|node: &Node, ctx: &WalkContext| {
            if node.is_block() && ctx.parent().is_some_and(Node::is_block) {
                nested.push(node.id);
            }
            VisitControl::Continue
        }),
    );
    nested
}

impl RewritePass for FlattenBlocksPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rewrite(&self, program: &mut Node, _ctx: &PassContext) -> Result<usize> {
        let mut spliced = 0;
        loop {
            let nested = nested_blocks(program);
            let mut round = 0;
            for id in nested {
                if program.splice_block(id)? {
                    round += 1;
                }
            }
            trace!(round, "flattened nested blocks");
            if round == 0 {
                break;
            }
            spliced += round;
        }
        Ok(spliced)
    }
}

/// Whether `node` still holds a block directly inside a block.
pub fn has_nested_blocks(node: &Node) -> bool {
    !nested_blocks(node).is_empty()
}
