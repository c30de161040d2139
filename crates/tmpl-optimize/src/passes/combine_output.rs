use itertools::Itertools;
use tmpl_core::ast::{AstBuilder, BinaryOperator};
use tmpl_core::{walk, EnterFn, Error, Node, NodeId, NodeKind, Result, VisitControl, WalkContext};
use tmpl_core::tracing::trace;

use crate::queries::is_output_append;
use crate::utils::{PassContext, RewritePass};

/// Folds runs of consecutive `html += x;` statements in a block into one
/// append of a left-associated `+` chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct CombineOutputPass;

impl CombineOutputPass {
    pub const NAME: &'static str = "combine-output";
}

fn blocks_with_runs(program: &Node, var: &str) -> Vec<NodeId> {
    let mut blocks = Vec::new();
    walk(
        program,
        &mut EnterFn(|node: &Node, _: &WalkContext| {
            if let NodeKind::BlockStatement { body } = &node.kind {
                let has_run = body
                    .iter()
                    .tuple_windows()
                    .any(|(a, b)| is_output_append(a, var) && is_output_append(b, var));
                if has_run {
                    blocks.push(node.id);
                }
            }
            VisitControl::Continue
        }),
    );
    blocks
}

fn append_value_mut(stmt: &mut Node) -> Result<&mut Node> {
    let (id, kind) = (stmt.id, stmt.kind_name());
    if let NodeKind::ExpressionStatement { expression } = &mut stmt.kind {
        if let NodeKind::AssignmentExpression { right, .. } = &mut expression.kind {
            return Ok(&mut **right);
        }
    }
    Err(Error::malformed(id, kind, "expected an output append"))
}

fn take_append_value(stmt: Node) -> Result<Node> {
    let (id, kind) = (stmt.id, stmt.kind_name());
    if let NodeKind::ExpressionStatement { expression } = stmt.kind {
        if let NodeKind::AssignmentExpression { right, .. } = expression.kind {
            return Ok(*right);
        }
    }
    Err(Error::malformed(id, kind, "expected an output append"))
}

/// Rebuild one statement list, returning how many appends were merged away.
fn fold_runs(body: &mut Vec<Node>, var: &str, builder: &AstBuilder) -> Result<usize> {
    let mut merged = 0;
    let mut folded: Vec<Node> = Vec::with_capacity(body.len());
    for stmt in std::mem::take(body) {
        let extends_run = is_output_append(&stmt, var)
            && folded.last().is_some_and(|prev| is_output_append(prev, var));
        if !extends_run {
            folded.push(stmt);
            continue;
        }
        let value = take_append_value(stmt)?;
        if let Some(prev) = folded.last_mut() {
            let slot = append_value_mut(prev)?;
            let placeholder = Node::new(NodeId::UNASSIGNED, NodeKind::EmptyStatement);
            let acc = std::mem::replace(slot, placeholder);
            *slot = builder.binary(BinaryOperator::Add, acc, value);
            merged += 1;
        }
    }
    *body = folded;
    Ok(merged)
}

impl RewritePass for CombineOutputPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rewrite(&self, program: &mut Node, ctx: &PassContext) -> Result<usize> {
        let var = ctx.options.output_variable.as_str();
        let mut merged = 0;
        for id in blocks_with_runs(program, var) {
            let block = program.find_mut(id).ok_or(Error::Detached(id))?;
            if let Some(body) = block.statements_mut() {
                let count = fold_runs(body, var, &ctx.builder)?;
                trace!(block = %id, count, "folded output appends");
                merged += count;
            }
        }
        Ok(merged)
    }
}
