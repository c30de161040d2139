/// Return early with a malformed-tree error for `$node`.
#[macro_export]
macro_rules! shape_bail {
    ($node:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::malformed(
            $node.id,
            $node.kind_name(),
            format!($($arg)*),
        ))
    };
}

/// Ensure a structural condition holds for `$node`, or return a malformed-tree error.
#[macro_export]
macro_rules! shape_ensure {
    ($cond:expr, $node:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::shape_bail!($node, $($arg)*);
        }
    };
}
