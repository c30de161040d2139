// tmpl-optimize: rewrite passes over the AST of a compiled template render function
//
// Architecture:
// - queries: Stateless lookups (scope resolution, reference search)
// - passes: Focused rewrites that implement RewritePass
// - pipeline: Runs the passes in their fixed order
// - utils: The pass interface and its shared context

pub mod config;
pub mod passes;
pub mod pipeline;
pub mod queries;
pub mod utils;

// Re-export key types for convenience
pub use config::OptimizeOptions;
pub use passes::*;
pub use pipeline::{load_passes, transform, Optimizer, PassReport, PipelineReport};
pub use queries::*;
pub use utils::*;
