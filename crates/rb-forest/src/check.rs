//! Structural validation of the balance and ordering rules.
//!
//! Violations are internal-consistency faults, not recoverable conditions:
//! the validator reports the first one found and test harnesses hard-stop
//! on it.

use std::cmp::Ordering;

use thiserror::Error;

use crate::arena::NodeArena;
use crate::tree::OrderedTree;
use crate::types::{Augment, NIL};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("sentinel slot was mutated")]
    SentinelCorrupted,
    #[error("root {0} is not black")]
    RootNotBlack(u32),
    #[error("root {0} has a parent link")]
    RootHasParent(u32),
    #[error("node {child}: parent link does not point back at {parent}")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("red node {parent} has red child {child}")]
    RedRedEdge { parent: u32, child: u32 },
    #[error("black-height mismatch under node {0}")]
    BlackHeightMismatch(u32),
    #[error("keys out of order between nodes {prev} and {curr}")]
    OrderViolation { prev: u32, curr: u32 },
    #[error("stored length {stored} != traversed node count {actual}")]
    LengthMismatch { stored: usize, actual: usize },
}

pub(crate) fn validate<V, C, A>(tree: &OrderedTree<V, C, A>) -> Result<(), InvariantError>
where
    C: Fn(&V, &V) -> Ordering,
    A: Augment<V>,
{
    let arena = tree.arena();

    if !arena.sentinel_intact() {
        return Err(InvariantError::SentinelCorrupted);
    }

    let root = tree.root();
    if root == NIL {
        if tree.len() != 0 {
            return Err(InvariantError::LengthMismatch {
                stored: tree.len(),
                actual: 0,
            });
        }
        return Ok(());
    }

    if arena.parent(root) != NIL {
        return Err(InvariantError::RootHasParent(root));
    }
    if arena.is_red(root) {
        return Err(InvariantError::RootNotBlack(root));
    }

    fn black_height<V>(arena: &NodeArena<V>, node: u32) -> Result<usize, InvariantError> {
        if node == NIL {
            return Ok(0);
        }

        let l = arena.left(node);
        let r = arena.right(node);

        if l != NIL && arena.parent(l) != node {
            return Err(InvariantError::BrokenParentLink {
                parent: node,
                child: l,
            });
        }
        if r != NIL && arena.parent(r) != node {
            return Err(InvariantError::BrokenParentLink {
                parent: node,
                child: r,
            });
        }

        if arena.is_red(node) {
            if l != NIL && arena.is_red(l) {
                return Err(InvariantError::RedRedEdge {
                    parent: node,
                    child: l,
                });
            }
            if r != NIL && arena.is_red(r) {
                return Err(InvariantError::RedRedEdge {
                    parent: node,
                    child: r,
                });
            }
        }

        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err(InvariantError::BlackHeightMismatch(node));
        }

        Ok(lh + usize::from(arena.is_black(node)))
    }

    black_height(arena, root)?;

    let comparator = tree.comparator();
    let mut count = 0usize;
    let mut prev = NIL;
    let mut curr = tree.first();
    while curr != NIL {
        count += 1;
        if prev != NIL
            && comparator(arena.value(prev), arena.value(curr)) != Ordering::Less
        {
            return Err(InvariantError::OrderViolation { prev, curr });
        }
        prev = curr;
        curr = tree.successor(curr);
    }

    if count != tree.len() {
        return Err(InvariantError::LengthMismatch {
            stored: tree.len(),
            actual: count,
        });
    }

    Ok(())
}
