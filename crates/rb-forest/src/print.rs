//! Debug printer for tree internals.

use std::fmt::Debug;

use crate::arena::NodeArena;
use crate::types::NIL;

/// Render the subtree under `node` with per-node index, color and payload.
pub fn print<V: Debug>(arena: &NodeArena<V>, node: u32, tab: &str) -> String {
    if node == NIL {
        return "∅".to_string();
    }
    let color = if arena.is_black(node) { "black" } else { "red" };
    let left = print(arena, arena.left(node), &format!("{tab}  "));
    let right = print(arena, arena.right(node), &format!("{tab}  "));
    format!(
        "Node[{node}] {color} {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
        arena.value(node)
    )
}
