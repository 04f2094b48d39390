//! Red-black balanced ordered set on top of the substrate.
//!
//! [`RbSet`] carries no state beyond the color tag on each node: both
//! fixups are per-call walks. A local defect (one red-red edge after an
//! insert, one black-height deficiency after a delete) is either resolved
//! in O(1) by a rotation, which ends the walk, or shifted one level toward
//! the root by pure recoloring, which keeps it going. Total work per
//! operation is O(log n).

use std::cmp::Ordering;

use crate::arena::NodeArena;
use crate::check::{self, InvariantError};
use crate::print;
use crate::tree::OrderedTree;
use crate::types::{Augment, Color, NIL};

pub type DefaultComparator<V> = fn(&V, &V) -> Ordering;

/// `Ord`-backed comparator used by [`RbSet::new`].
pub fn natural_order<V: Ord>(a: &V, b: &V) -> Ordering {
    a.cmp(b)
}

pub struct RbSet<V, C = DefaultComparator<V>, A = ()>
where
    C: Fn(&V, &V) -> Ordering,
    A: Augment<V>,
{
    tree: OrderedTree<V, C, A>,
}

impl<V: Ord> RbSet<V> {
    pub fn new() -> Self {
        Self::with_comparator(natural_order::<V>)
    }
}

impl<V: Ord> Default for RbSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C, A> RbSet<V, C, A>
where
    C: Fn(&V, &V) -> Ordering,
    A: Augment<V>,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: OrderedTree::with(comparator),
        }
    }

    /// Add a value. `false` when an equal key is already present; the tree
    /// is left untouched in that case.
    pub fn insert(&mut self, value: V) -> bool {
        let (n, inserted) = self.tree.insert_raw(value);
        if !inserted {
            return false;
        }
        self.tree.arena_mut().set_color(n, Color::Red);
        self.insert_fixup(n);
        self.debug_check();
        true
    }

    /// Remove a key. `false` when absent; the tree is left untouched.
    pub fn erase(&mut self, key: &V) -> bool {
        let z = self.tree.search(key);
        if z == NIL {
            return false;
        }

        // A two-child node is never unlinked itself: its successor's value
        // moves in and the successor (at most one real child) goes instead.
        let y = if self.left(z) != NIL && self.right(z) != NIL {
            let y = self.tree.successor(z);
            self.tree.arena_mut().swap_values(z, y);
            y
        } else {
            z
        };

        let removed_color = self.tree.arena().color(y);
        let (x, p) = self.tree.splice(y);
        self.tree.release(y);

        // Unlinking a red node leaves every black count intact; unlinking
        // a black one starts the deficiency repair at the replacement.
        if removed_color == Color::Black {
            self.delete_fixup(x, p);
        }
        self.debug_check();
        true
    }

    pub fn find(&self, key: &V) -> Option<u32> {
        index(self.tree.search(key))
    }

    pub fn contains(&self, key: &V) -> bool {
        self.tree.search(key) != NIL
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Payload of a node index obtained from `find`/`first`/`next`.
    /// Indices do not survive removals.
    pub fn value(&self, idx: u32) -> &V {
        self.tree.arena().value(idx)
    }

    pub fn first(&self) -> Option<u32> {
        index(self.tree.first())
    }

    pub fn last(&self) -> Option<u32> {
        index(self.tree.last())
    }

    pub fn next(&self, idx: u32) -> Option<u32> {
        index(self.tree.successor(idx))
    }

    pub fn prev(&self, idx: u32) -> Option<u32> {
        index(self.tree.predecessor(idx))
    }

    /// Ascending in-order traversal; a fresh walk on every call.
    pub fn iter(&self) -> Iter<'_, V, C, A> {
        Iter {
            set: self,
            curr: self.tree.first(),
        }
    }

    pub fn for_each<G: FnMut(&V)>(&self, mut f: G) {
        let mut curr = self.tree.first();
        while curr != NIL {
            f(self.tree.arena().value(curr));
            curr = self.tree.successor(curr);
        }
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Read-only view of the node storage, for traversal-level checks.
    pub fn arena(&self) -> &NodeArena<V> {
        self.tree.arena()
    }

    pub fn root_index(&self) -> Option<u32> {
        index(self.tree.root())
    }

    /// Full structural validation; `Ok` iff every balance and ordering
    /// rule holds.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        check::validate(&self.tree)
    }

    /// Longest root-to-sentinel path length; 0 for an empty set.
    pub fn height(&self) -> usize {
        self.height_of(self.tree.root())
    }

    fn height_of(&self, i: u32) -> usize {
        if i == NIL {
            return 0;
        }
        1 + self
            .height_of(self.tree.arena().left(i))
            .max(self.height_of(self.tree.arena().right(i)))
    }

    // ── insert repair ─────────────────────────────────────────────────────

    fn insert_fixup(&mut self, mut x: u32) {
        while x != self.tree.root() && self.is_red(self.parent(x)) {
            let p = self.parent(x);
            // A red parent is never the root, so the grandparent is real.
            let g = self.parent(p);
            if p == self.left(g) {
                let u = self.right(g);
                if self.is_red(u) {
                    // red uncle: push both blacks down from the grandparent
                    self.set_color(p, Color::Black);
                    self.set_color(u, Color::Black);
                    self.set_color(g, Color::Red);
                    x = g;
                } else {
                    if x == self.right(p) {
                        // inner grandchild: straighten into the outer case
                        x = p;
                        self.tree.rotate_left(x);
                    }
                    let p = self.parent(x);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.tree.rotate_right(g);
                }
            } else {
                let u = self.left(g);
                if self.is_red(u) {
                    self.set_color(p, Color::Black);
                    self.set_color(u, Color::Black);
                    self.set_color(g, Color::Red);
                    x = g;
                } else {
                    if x == self.left(p) {
                        x = p;
                        self.tree.rotate_right(x);
                    }
                    let p = self.parent(x);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.tree.rotate_left(g);
                }
            }
        }
        let root = self.tree.root();
        self.set_color(root, Color::Black);
    }

    // ── delete repair ─────────────────────────────────────────────────────

    /// `x` is the splice replacement (possibly the sentinel) and `p` its
    /// position's parent, carried explicitly so the sentinel never stores
    /// a resume pointer.
    fn delete_fixup(&mut self, mut x: u32, mut p: u32) {
        while x != self.tree.root() && self.is_black(x) {
            debug_assert_ne!(p, NIL, "non-root fixup position has a parent");
            if x == self.left(p) {
                let mut w = self.right(p);
                if self.is_red(w) {
                    // red sibling: rotate it up to expose a black one
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.tree.rotate_left(p);
                    w = self.right(p);
                }
                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    // both nephews black: recolor, deficiency moves up
                    self.set_color(w, Color::Red);
                    x = p;
                    p = self.parent(x);
                } else {
                    if self.is_black(self.right(w)) {
                        // near nephew red: straighten toward the far side
                        let wl = self.left(w);
                        self.set_color(wl, Color::Black);
                        self.set_color(w, Color::Red);
                        self.tree.rotate_right(w);
                        w = self.right(p);
                    }
                    // far nephew red: one rotation settles the count
                    let pc = self.tree.arena().color(p);
                    self.set_color(w, pc);
                    self.set_color(p, Color::Black);
                    let wr = self.right(w);
                    self.set_color(wr, Color::Black);
                    self.tree.rotate_left(p);
                    x = self.tree.root();
                    p = NIL;
                }
            } else {
                let mut w = self.left(p);
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.tree.rotate_right(p);
                    w = self.left(p);
                }
                if self.is_black(self.right(w)) && self.is_black(self.left(w)) {
                    self.set_color(w, Color::Red);
                    x = p;
                    p = self.parent(x);
                } else {
                    if self.is_black(self.left(w)) {
                        let wr = self.right(w);
                        self.set_color(wr, Color::Black);
                        self.set_color(w, Color::Red);
                        self.tree.rotate_left(w);
                        w = self.left(p);
                    }
                    let pc = self.tree.arena().color(p);
                    self.set_color(w, pc);
                    self.set_color(p, Color::Black);
                    let wl = self.left(w);
                    self.set_color(wl, Color::Black);
                    self.tree.rotate_right(p);
                    x = self.tree.root();
                    p = NIL;
                }
            }
        }
        if x != NIL {
            self.set_color(x, Color::Black);
        }
    }

    // ── arena shorthands ──────────────────────────────────────────────────

    #[inline]
    fn parent(&self, i: u32) -> u32 {
        self.tree.arena().parent(i)
    }

    #[inline]
    fn left(&self, i: u32) -> u32 {
        self.tree.arena().left(i)
    }

    #[inline]
    fn right(&self, i: u32) -> u32 {
        self.tree.arena().right(i)
    }

    #[inline]
    fn is_red(&self, i: u32) -> bool {
        self.tree.arena().is_red(i)
    }

    #[inline]
    fn is_black(&self, i: u32) -> bool {
        self.tree.arena().is_black(i)
    }

    #[inline]
    fn set_color(&mut self, i: u32, color: Color) {
        self.tree.arena_mut().set_color(i, color);
    }

    /// Cheap post-mutation checks; compiled out of release builds.
    #[inline]
    fn debug_check(&self) {
        debug_assert!(self.tree.root() == NIL || self.tree.arena().is_black(self.tree.root()));
        debug_assert!(self.tree.arena().sentinel_intact());
    }

    /// Render the tree shape with per-node index, color and payload.
    pub fn print(&self) -> String
    where
        V: std::fmt::Debug,
    {
        print::print(self.tree.arena(), self.tree.root(), "")
    }
}

impl<V, C, A> Clone for RbSet<V, C, A>
where
    V: Clone,
    C: Fn(&V, &V) -> Ordering + Clone,
    A: Augment<V>,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<'a, V, C, A> IntoIterator for &'a RbSet<V, C, A>
where
    C: Fn(&V, &V) -> Ordering,
    A: Augment<V>,
{
    type Item = &'a V;
    type IntoIter = Iter<'a, V, C, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[inline]
fn index(i: u32) -> Option<u32> {
    if i == NIL {
        None
    } else {
        Some(i)
    }
}

pub struct Iter<'a, V, C = DefaultComparator<V>, A = ()>
where
    C: Fn(&V, &V) -> Ordering,
    A: Augment<V>,
{
    set: &'a RbSet<V, C, A>,
    curr: u32,
}

impl<'a, V, C, A> Iterator for Iter<'a, V, C, A>
where
    C: Fn(&V, &V) -> Ordering,
    A: Augment<V>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr == NIL {
            return None;
        }
        let idx = self.curr;
        self.curr = self.set.tree.successor(idx);
        Some(self.set.tree.arena().value(idx))
    }
}
