use tmpl_core::{
    walk, walk_nodes, Error, Node, NodeId, NodeKind, Result, VisitControl, Visitor, WalkContext,
};
use tmpl_core::tracing::trace;

use crate::queries::{is_declarator_target, is_member_property, is_property_key};
use crate::utils::{PassContext, RewritePass};

/// Inside closures, rewrites the captured render context alias to the
/// receiver identifier.
///
/// Only the direct body of each FunctionExpression is rewritten: nested
/// functions and every FunctionDeclaration subtree keep their own binding.
/// A closure that takes the context alias as a parameter is left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplaceContextPass;

impl ReplaceContextPass {
    pub const NAME: &'static str = "replace-context";
}

/// Context identifiers directly inside one closure body.
struct ContextUses<'n> {
    name: &'n str,
    found: Vec<NodeId>,
}

impl<'a> Visitor<'a> for ContextUses<'_> {
    fn enter(&mut self, node: &'a Node, ctx: &WalkContext<'a>) -> VisitControl {
        if node.is_function() {
            return VisitControl::SkipChildren;
        }
        let parent = ctx.parent();
        if node.is_identifier(self.name)
            && !is_declarator_target(node, parent)
            && !is_member_property(node, parent)
            && !is_property_key(node, parent)
        {
            self.found.push(node.id);
        }
        VisitControl::Continue
    }
}

/// Finds the closures to rewrite and gathers their context uses.
struct ClosureScan<'n> {
    name: &'n str,
    found: Vec<NodeId>,
}

impl<'a> Visitor<'a> for ClosureScan<'_> {
    fn enter(&mut self, node: &'a Node, _ctx: &WalkContext<'a>) -> VisitControl {
        match &node.kind {
            NodeKind::FunctionDeclaration { .. } => VisitControl::SkipChildren,
            NodeKind::FunctionExpression { params, body, .. } => {
                if params.iter().any(|param| param.is_identifier(self.name)) {
                    trace!(closure = %node.id, "context is a parameter here");
                    return VisitControl::SkipChildren;
                }
                let mut uses = ContextUses {
                    name: self.name,
                    found: Vec::new(),
                };
                walk_nodes(body.statements().unwrap_or_default(), None, &mut uses);
                self.found.append(&mut uses.found);
                VisitControl::SkipChildren
            }
            _ => VisitControl::Continue,
        }
    }
}

impl RewritePass for ReplaceContextPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rewrite(&self, program: &mut Node, ctx: &PassContext) -> Result<usize> {
        let options = ctx.options;
        let mut scan = ClosureScan {
            name: &options.context_identifier,
            found: Vec::new(),
        };
        walk(program, &mut scan);

        for id in &scan.found {
            let ident = program.find_mut(*id).ok_or(Error::Detached(*id))?;
            ident.kind = NodeKind::Identifier {
                name: options.receiver_identifier.clone(),
            };
        }
        Ok(scan.found.len())
    }
}
