use serde::Serialize;
use tmpl_core::ast::validate_program;
use tmpl_core::{Node, Result};
use tmpl_core::tracing::{debug, info, info_span, trace, warn};

use crate::config::OptimizeOptions;
use crate::passes::{
    CombineOutputPass, FlattenBlocksPass, HoistPartialsPass, NormalizeFirstOutputPass,
    RemoveUnusedAssignmentsPass, RemoveUnusedDeclaratorsPass, ReplaceContextPass,
};
use crate::utils::{PassContext, RewritePass};

/// The rewrite passes in pipeline order. Later passes rely on the shapes the
/// earlier ones leave behind.
pub fn load_passes() -> Vec<Box<dyn RewritePass>> {
    vec![
        Box::new(FlattenBlocksPass),
        Box::new(HoistPartialsPass),
        Box::new(RemoveUnusedAssignmentsPass),
        Box::new(ReplaceContextPass),
        Box::new(RemoveUnusedDeclaratorsPass),
        Box::new(CombineOutputPass),
        Box::new(NormalizeFirstOutputPass),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub pass: &'static str,
    pub rewrites: usize,
    pub skipped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub passes: Vec<PassReport>,
}

impl PipelineReport {
    pub fn total_rewrites(&self) -> usize {
        self.passes.iter().map(|pass| pass.rewrites).sum()
    }

    pub fn rewrites_for(&self, pass: &str) -> Option<usize> {
        self.passes
            .iter()
            .find(|report| report.pass == pass && !report.skipped)
            .map(|report| report.rewrites)
    }
}

pub struct Optimizer {
    options: OptimizeOptions,
    passes: Vec<Box<dyn RewritePass>>,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(OptimizeOptions::default())
    }
}

impl Optimizer {
    pub fn new(options: OptimizeOptions) -> Self {
        Self::with_passes(options, load_passes())
    }

    /// Run a custom pass list instead of the standard pipeline.
    pub fn with_passes(options: OptimizeOptions, passes: Vec<Box<dyn RewritePass>>) -> Self {
        for disabled in &options.disabled_passes {
            if !passes.iter().any(|pass| pass.name() == disabled) {
                warn!(pass = %disabled, "disabled pass does not exist");
            }
        }
        Self { options, passes }
    }

    pub fn options(&self) -> &OptimizeOptions {
        &self.options
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn optimize(&self, program: Node) -> Result<Node> {
        self.optimize_with_report(program)
            .map(|(program, _report)| program)
    }

    /// Run every enabled pass in order. The tree is only handed back when all
    /// of them succeed.
    pub fn optimize_with_report(&self, mut program: Node) -> Result<(Node, PipelineReport)> {
        let span = info_span!("optimize", passes = self.passes.len());
        let _enter = span.enter();

        self.options.validate()?;
        validate_program(&program)?;

        let ctx = PassContext::new(&self.options, &program);
        let mut report = PipelineReport::default();
        for pass in &self.passes {
            let name = pass.name();
            if self.options.is_disabled(name) {
                debug!(pass = name, "pass disabled");
                report.passes.push(PassReport {
                    pass: name,
                    rewrites: 0,
                    skipped: true,
                });
                continue;
            }

            let rewrites = pass
                .rewrite(&mut program, &ctx)
                .map_err(|err| err.in_pass(name))?;
            if self.options.verify_each_pass {
                validate_program(&program).map_err(|err| err.in_pass(name))?;
            }
            debug!(pass = name, rewrites, "pass finished");
            trace!(pass = name, "after pass:\n{program}");
            report.passes.push(PassReport {
                pass: name,
                rewrites,
                skipped: false,
            });
        }

        info!(rewrites = report.total_rewrites(), "optimization finished");
        Ok((program, report))
    }
}

/// Run the standard pipeline with default options.
pub fn transform(program: Node) -> Result<Node> {
    Optimizer::default().optimize(program)
}
