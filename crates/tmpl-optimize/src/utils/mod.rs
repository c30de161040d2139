// Utils - shared pieces used by the pipeline and the passes

pub mod optimize_pass;

pub use optimize_pass::*;
