//! ESTree JSON interchange with the template compiler.

use eyre::WrapErr;
use serde::Deserialize;
use serde_json::Value;

use super::Node;
use crate::error::{Error, Result};
use crate::id::{NodeId, NodeIdGen};

/// Deepest JSON nesting accepted on import. serde_json's own limit (128) is
/// lifted, since long generated `+` chains nest one level per operand.
pub const MAX_JSON_DEPTH: usize = 256;

/// Nesting depth of the arrays and objects in `source`, ignoring brackets
/// inside strings.
fn source_depth(source: &str) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for byte in source.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

fn value_depth(value: &Value) -> usize {
    let mut max = 0;
    let mut pending = vec![(value, 0usize)];
    while let Some((value, depth)) = pending.pop() {
        let children: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            Value::Object(fields) => fields.values().collect(),
            _ => continue,
        };
        max = max.max(depth + 1);
        pending.extend(children.into_iter().map(|child| (child, depth + 1)));
    }
    max
}

fn ensure_depth(depth: usize) -> Result<()> {
    if depth > MAX_JSON_DEPTH {
        return Err(Error::malformed(
            NodeId::UNASSIGNED,
            "Program",
            format!("ESTree input nests {depth} levels deep, the limit is {MAX_JSON_DEPTH}"),
        ));
    }
    Ok(())
}

/// Parse an ESTree `Program` and number its nodes in pre-order.
///
/// Position data (`loc`, `range`, `raw`, ...) is ignored.
pub fn parse_program_json(source: &str) -> Result<Node> {
    ensure_depth(source_depth(source))?;
    let mut de = serde_json::Deserializer::from_str(source);
    de.disable_recursion_limit();
    let mut program = Node::deserialize(&mut de).wrap_err("failed to parse ESTree program")?;
    de.end().wrap_err("trailing data after ESTree program")?;
    NodeIdGen::new().assign(&mut program);
    Ok(program)
}

pub fn program_from_value(value: Value) -> Result<Node> {
    ensure_depth(value_depth(&value))?;
    let mut program: Node = serde_json::from_value(value)?;
    NodeIdGen::new().assign(&mut program);
    Ok(program)
}

/// Serialize back to ESTree JSON. Ids are not part of the output.
pub fn program_to_json(program: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(program)?)
}
