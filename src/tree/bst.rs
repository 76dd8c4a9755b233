//! An unbalanced, arena-backed binary search tree.
//!
//! Grounded in `src/trees/bst.c` of the original source tree: insertion
//! walks down comparing against each node exactly as `bst_add` does, and
//! removal's two-children case finds the in-order successor and calls the
//! substrate's `swap` before splicing the (now successor-occupied, at-most
//! one child) node out, exactly as `bst_remove` does. The original's
//! generic `bintree_replace` relocation primitive has no arena analogue —
//! an arena key never needs to "move", so it is not ported; the splice
//! below rewrites the vacated node's parent link directly instead.

use crate::status::DuplicateKeyError;
use crate::storage::{DefaultStorage, MoveFix, Storage};
use crate::tree::substrate::{self, InsertSlot, Key, Linked, Side};
use core::cmp::Ordering;
use core::num::NonZeroIsize;

struct BstNode<T> {
    value: T,
    parent: Option<Key>,
    left: Option<Key>,
    right: Option<Key>,
}
impl<T> Linked for BstNode<T> {
    #[inline]
    fn parent(&self) -> Option<Key> {
        self.parent
    }
    #[inline]
    fn set_parent(&mut self, value: Option<Key>) {
        self.parent = value;
    }
    #[inline]
    fn left(&self) -> Option<Key> {
        self.left
    }
    #[inline]
    fn set_left(&mut self, value: Option<Key>) {
        self.left = value;
    }
    #[inline]
    fn right(&self) -> Option<Key> {
        self.right
    }
    #[inline]
    fn set_right(&mut self, value: Option<Key>) {
        self.right = value;
    }
}
// SparseVec's `Storage` impl is only available for elements that implement
// `MoveFix`, but `SparseStorage::add`/`remove_and_shiftfix` never actually
// invoke either hook (they reuse holes from an internal free list instead
// of shifting live elements); these bodies are unreachable.
impl<T> MoveFix for BstNode<T> {
    unsafe fn fix_shift<S>(_storage: &mut S, _shifted_from: usize, _shifted_by: NonZeroIsize)
    where
        S: crate::storage::ListStorage<Element = Self>,
    {
        unreachable!("SparseStorage never shifts elements in place")
    }
    unsafe fn fix_move<S>(_storage: &mut S, _previous_index: usize, _current_index: usize)
    where
        S: crate::storage::ListStorage<Element = Self>,
    {
        unreachable!("SparseStorage never moves elements in place")
    }
}

/// An unbalanced ordered map, keyed by whatever ordering `C` imposes on
/// `T`.
///
/// Every operation is worst-case O(n) on an adversarially-ordered input
/// sequence; reach for [`Avl`](crate::tree::Avl) if that bound matters to
/// you. Kept mainly as the textbook baseline the balanced variant is
/// tested against.
pub struct Bst<T, C> {
    arena: DefaultStorage<BstNode<T>>,
    root: Option<Key>,
    len: usize,
    cmp: C,
}
impl<T, C> Bst<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty tree ordered by `cmp`.
    #[inline]
    pub fn new(cmp: C) -> Self {
        Self {
            arena: DefaultStorage::new(),
            root: None,
            len: 0,
            cmp,
        }
    }

    /// The number of values currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
    /// `true` if the tree holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value`, rejecting it if an equal value (under this tree's
    /// comparator) is already present.
    pub fn insert(&mut self, value: T) -> Result<(), DuplicateKeyError<T>> {
        match substrate::search_with_parent(&self.arena, self.root, |n: &BstNode<T>| {
            (self.cmp)(&value, &n.value)
        }) {
            InsertSlot::Occupied(_) => Err(DuplicateKeyError { rejected: value }),
            InsertSlot::Vacant { parent, side } => {
                let key = self.arena.add(BstNode {
                    value,
                    parent: None,
                    left: None,
                    right: None,
                });
                match parent {
                    Some(_) => substrate::link_child(&mut self.arena, parent, side, key),
                    None => self.root = Some(key),
                }
                self.len += 1;
                Ok(())
            }
        }
    }

    /// Looks up the value comparing equal to `key` under `cmp`.
    pub fn get<K>(&self, key: &K, cmp: impl Fn(&K, &T) -> Ordering) -> Option<&T> {
        let node = substrate::search(&self.arena, self.root, key, |k, n: &BstNode<T>| {
            cmp(k, &n.value)
        })?;
        Some(&self.arena.get(&node).expect("dangling tree node").value)
    }
    /// Looks up the value comparing equal to `key` under `cmp`, mutably.
    pub fn get_mut<K>(&mut self, key: &K, cmp: impl Fn(&K, &T) -> Ordering) -> Option<&mut T> {
        let node = substrate::search(&self.arena, self.root, key, |k, n: &BstNode<T>| {
            cmp(k, &n.value)
        })?;
        Some(
            &mut self
                .arena
                .get_mut(&node)
                .expect("dangling tree node")
                .value,
        )
    }

    /// Removes and returns the value comparing equal to `key` under `cmp`,
    /// or `None` if no such value is present.
    pub fn remove<K>(&mut self, key: &K, cmp: impl Fn(&K, &T) -> Ordering) -> Option<T> {
        let node = substrate::search(&self.arena, self.root, key, |k, n: &BstNode<T>| {
            cmp(k, &n.value)
        })?;
        Some(self.remove_node(node))
    }

    /// Removes the node at `node`, rewiring the tree around it, and
    /// returns its value. `node` is guaranteed dead on return.
    fn remove_node(&mut self, node: Key) -> T {
        let has_two_children = {
            let n = self.arena.get(&node).expect("dangling tree node");
            n.left.is_some() && n.right.is_some()
        };
        if has_two_children {
            let right = self.arena.get(&node).unwrap().right.unwrap();
            let successor = substrate::first_inorder(&self.arena, right);
            substrate::swap(&mut self.arena, node, successor);
            if self.root == Some(node) {
                self.root = Some(successor);
            }
            // `node`'s payload now lives at the arena slot still named
            // `node`, but that slot sits where `successor` used to be in
            // the tree shape (at most one, right, child). Proceed to
            // splice it out as a plain <=1-child case.
        }
        // At this point `node` has at most one child.
        let child = {
            let n = self.arena.get(&node).expect("dangling tree node");
            n.left.or(n.right)
        };
        let parent = self.arena.get(&node).unwrap().parent;
        if let Some(child) = child {
            self.arena.get_mut(&child).unwrap().parent = parent;
        }
        match parent {
            Some(parent) => {
                let side = if self.arena.get(&parent).unwrap().left == Some(node) {
                    Side::Left
                } else {
                    Side::Right
                };
                match side {
                    Side::Left => self.arena.get_mut(&parent).unwrap().left = child,
                    Side::Right => self.arena.get_mut(&parent).unwrap().right = child,
                }
            }
            None => self.root = child,
        }
        self.len -= 1;
        self.arena.remove(&node).value
    }

    /// Visits every value in ascending order.
    pub fn for_each_inorder(&self, mut visit: impl FnMut(&T)) {
        let Some(root) = self.root else { return };
        let mut curr = Some(substrate::first_inorder(&self.arena, root));
        while let Some(node) = curr {
            visit(&self.arena.get(&node).unwrap().value);
            curr = substrate::inorder_next(&self.arena, node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Bst;

    fn tree() -> Bst<i32, fn(&i32, &i32) -> core::cmp::Ordering> {
        Bst::new(i32::cmp)
    }

    #[test]
    fn insert_and_get() {
        let mut t = tree();
        for v in [5, 2, 8, 1, 3, 7, 9] {
            t.insert(v).unwrap();
        }
        assert_eq!(t.len(), 7);
        assert_eq!(t.get(&3, i32::cmp), Some(&3));
        assert_eq!(t.get(&42, i32::cmp), None);
    }

    #[test]
    fn rejects_duplicate() {
        let mut t = tree();
        t.insert(1).unwrap();
        assert_eq!(t.insert(1).unwrap_err().rejected, 1);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn inorder_is_sorted() {
        let mut t = tree();
        for v in [5, 2, 8, 1, 3, 7, 9, 0, 4, 6] {
            t.insert(v).unwrap();
        }
        let mut seen = alloc::vec::Vec::new();
        t.for_each_inorder(|v| seen.push(*v));
        let mut sorted = seen.clone();
        sorted.sort_unstable();
        assert_eq!(seen, sorted);
    }

    #[test]
    fn remove_leaf_one_child_and_two_children() {
        let mut t = tree();
        for v in [5, 2, 8, 1, 3, 7, 9] {
            t.insert(v).unwrap();
        }
        assert_eq!(t.remove(&1, i32::cmp), Some(1)); // leaf
        assert_eq!(t.remove(&2, i32::cmp), Some(2)); // one child (3)
        assert_eq!(t.remove(&5, i32::cmp), Some(5)); // two children, was root
        assert_eq!(t.len(), 4);
        let mut seen = alloc::vec::Vec::new();
        t.for_each_inorder(|v| seen.push(*v));
        assert_eq!(seen, alloc::vec![3, 7, 8, 9]);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut t = tree();
        t.insert(1).unwrap();
        assert_eq!(t.remove(&2, i32::cmp), None);
        assert_eq!(t.len(), 1);
    }
}
