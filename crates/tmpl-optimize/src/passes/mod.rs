// Passes - focused rewrites that implement RewritePass, listed in pipeline order

pub mod flatten_blocks;
pub mod hoist_partials;
pub mod remove_unused_assignments;
pub mod replace_context;
pub mod remove_unused_declarators;
pub mod combine_output;
pub mod normalize_first_output;

pub use combine_output::*;
pub use flatten_blocks::*;
pub use hoist_partials::*;
pub use normalize_first_output::*;
pub use remove_unused_assignments::*;
pub use remove_unused_declarators::*;
pub use replace_context::*;
