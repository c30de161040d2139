//! Shared fixtures for tmpl-optimize tests.
#![allow(dead_code)]

use tmpl_core::ast::AstBuilder;
use tmpl_core::{Node, Result};
use tmpl_optimize::{OptimizeOptions, PassContext, RewritePass};

pub fn run_pass(pass: &dyn RewritePass, program: &mut Node) -> Result<usize> {
    run_pass_with(pass, program, &OptimizeOptions::default())
}

pub fn run_pass_with(
    pass: &dyn RewritePass,
    program: &mut Node,
    options: &OptimizeOptions,
) -> Result<usize> {
    let ctx = PassContext::new(options, program);
    pass.rewrite(program, &ctx)
}

/// `function render(locals) { ...body }` as the only top-level statement.
pub fn render_program(b: &AstBuilder, body: Vec<Node>) -> Node {
    b.program(vec![b.func_decl("render", &["locals"], body)])
}

/// Statements of the `render` function in a program built by [`render_program`].
pub fn render_body(program: &Node) -> &[Node] {
    program
        .statements()
        .and_then(|body| body.iter().find(|stmt| stmt.function_name() == Some("render")))
        .and_then(Node::function_body)
        .unwrap_or_default()
}

pub fn printed(nodes: &[Node]) -> Vec<String> {
    nodes.iter().map(Node::to_string).collect()
}
