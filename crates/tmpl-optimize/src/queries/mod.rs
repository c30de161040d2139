// Queries - stateless lookups over the tree, shared by the passes

pub mod output_queries;
pub mod reference_queries;
pub mod scope_queries;

pub use output_queries::*;
pub use reference_queries::*;
pub use scope_queries::*;
