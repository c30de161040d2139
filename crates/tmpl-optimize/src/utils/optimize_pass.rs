// RewritePass trait - interface for the tree rewrites run by the pipeline

use tmpl_core::ast::AstBuilder;
use tmpl_core::{Node, Result};

use crate::config::OptimizeOptions;

/// Shared state for one pipeline run.
pub struct PassContext<'o> {
    pub options: &'o OptimizeOptions,
    /// Allocates ids for nodes a pass creates; never collides with the input.
    pub builder: AstBuilder,
}

impl<'o> PassContext<'o> {
    pub fn new(options: &'o OptimizeOptions, program: &Node) -> Self {
        Self {
            options,
            builder: AstBuilder::after(program),
        }
    }
}

pub trait RewritePass {
    fn name(&self) -> &'static str;

    /// Rewrite the whole program in place and return how many sites changed.
    ///
    /// A pass scans first and mutates after; an `Err` means the input broke
    /// the tree contract.
    fn rewrite(&self, program: &mut Node, ctx: &PassContext) -> Result<usize>;
}
