//! The mechanical plumbing shared by the BST and AVL layers: an
//! arena-indexed parent/left/right node, detach, swap, search, and the
//! six traversal step functions, none of which know anything about
//! balancing or duplicate-key rejection.
//!
//! Grounded in `src/trees/bintree.c` of the original source tree this
//! crate's ordered-map engines are distilled from. The original expresses
//! nodes as structures linked by raw pointers with the caller managing
//! their own storage; here, [`Key`] (an arena index) stands in for the
//! pointer, and the arena (any [`Storage`](crate::storage::Storage) of
//! [`Linked`] nodes) stands in for the caller-managed memory.

use crate::storage::Storage;
use core::cmp::Ordering;

/// An index into the arena backing a tree. Stable for the lifetime of the
/// node it names — unlike a raw pointer, it is never invalidated by
/// insertions or removals of *other* nodes.
pub(crate) type Key = usize;

/// Exposes and mutates the three structural links every tree node carries,
/// independent of whatever payload or balance metadata the concrete node
/// type layers on top.
pub(crate) trait Linked {
    fn parent(&self) -> Option<Key>;
    fn set_parent(&mut self, value: Option<Key>);
    fn left(&self) -> Option<Key>;
    fn set_left(&mut self, value: Option<Key>);
    fn right(&self) -> Option<Key>;
    fn set_right(&mut self, value: Option<Key>);
}

#[inline]
fn get<'a, S, N>(arena: &'a S, key: Key) -> &'a N
where
    S: Storage<Key = Key, Element = N>,
{
    debug_assert!(arena.contains_key(&key), "dangling tree node key");
    unsafe {
        // SAFETY: the caller never hands out a `Key` that has been removed
        // from the arena; checked above in debug builds.
        arena.get_unchecked(&key)
    }
}
#[inline]
fn get_mut<'a, S, N>(arena: &'a mut S, key: Key) -> &'a mut N
where
    S: Storage<Key = Key, Element = N>,
{
    debug_assert!(arena.contains_key(&key), "dangling tree node key");
    unsafe {
        // SAFETY: as above.
        arena.get_unchecked_mut(&key)
    }
}

/// Detaches `node` from its parent, if any. Idempotent on a root.
pub(crate) fn detach<S, N>(arena: &mut S, node: Key)
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    if let Some(parent) = get::<S, N>(arena, node).parent() {
        if get::<S, N>(arena, parent).left() == Some(node) {
            get_mut::<S, N>(arena, parent).set_left(None);
        } else {
            get_mut::<S, N>(arena, parent).set_right(None);
        }
        get_mut::<S, N>(arena, node).set_parent(None);
    }
}

/// Exchanges the tree positions of `n1` and `n2`, preserving everything
/// each node owns (payload, balance tag, children) except the slot it
/// occupies in the tree.
///
/// Handles the case where one is the direct parent of the other: after
/// the mechanical triple-swap of link words, the self-referential
/// `parent == self` cycle that produces is repaired before children are
/// re-parented.
pub(crate) fn swap<S, N>(arena: &mut S, n1: Key, n2: Key)
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    if n1 == n2 {
        return;
    }
    let p1 = get::<S, N>(arena, n1).parent();
    let p2 = get::<S, N>(arena, n2).parent();
    if let Some(p1) = p1 {
        if get::<S, N>(arena, p1).left() == Some(n1) {
            get_mut::<S, N>(arena, p1).set_left(Some(n2));
        } else {
            get_mut::<S, N>(arena, p1).set_right(Some(n2));
        }
    }
    if let Some(p2) = p2 {
        if get::<S, N>(arena, p2).left() == Some(n2) {
            get_mut::<S, N>(arena, p2).set_left(Some(n1));
        } else {
            get_mut::<S, N>(arena, p2).set_right(Some(n1));
        }
    }
    let l1 = get::<S, N>(arena, n1).left();
    let r1 = get::<S, N>(arena, n1).right();
    let l2 = get::<S, N>(arena, n2).left();
    let r2 = get::<S, N>(arena, n2).right();
    {
        let node1 = get_mut::<S, N>(arena, n1);
        node1.set_parent(p2);
        node1.set_left(l2);
        node1.set_right(r2);
    }
    {
        let node2 = get_mut::<S, N>(arena, n2);
        node2.set_parent(p1);
        node2.set_left(l1);
        node2.set_right(r1);
    }
    // Fix adjacency: if n2 was n1's parent, n1's new parent field (copied
    // from n2's old parent, which was n1 before the swap) now points to
    // itself, and n2's new child slot that used to hold n1 still holds n1
    // rather than the former occupant. Likewise for the mirror case.
    if get::<S, N>(arena, n1).parent() == Some(n1) {
        get_mut::<S, N>(arena, n1).set_parent(Some(n2));
        if get::<S, N>(arena, n2).left() == Some(n2) {
            get_mut::<S, N>(arena, n2).set_left(Some(n1));
        } else {
            get_mut::<S, N>(arena, n2).set_right(Some(n1));
        }
    } else if get::<S, N>(arena, n2).parent() == Some(n2) {
        get_mut::<S, N>(arena, n2).set_parent(Some(n1));
        if get::<S, N>(arena, n1).left() == Some(n1) {
            get_mut::<S, N>(arena, n1).set_left(Some(n2));
        } else {
            get_mut::<S, N>(arena, n1).set_right(Some(n2));
        }
    }
    set_parent_of(arena, get::<S, N>(arena, n1).left(), n1);
    set_parent_of(arena, get::<S, N>(arena, n1).right(), n1);
    set_parent_of(arena, get::<S, N>(arena, n2).left(), n2);
    set_parent_of(arena, get::<S, N>(arena, n2).right(), n2);
}

#[inline]
fn set_parent_of<S, N>(arena: &mut S, child: Option<Key>, parent: Key)
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    if let Some(child) = child {
        get_mut::<S, N>(arena, child).set_parent(Some(parent));
    }
}

/// Descends from `root` comparing at each node; returns the matching node
/// or `None` on a miss.
pub(crate) fn search<S, N, K>(
    arena: &S,
    root: Option<Key>,
    key: &K,
    cmp: impl Fn(&K, &N) -> Ordering,
) -> Option<Key>
where
    S: Storage<Key = Key, Element = N>,
{
    let mut curr = root;
    while let Some(node) = curr {
        match cmp(key, get::<S, N>(arena, node)) {
            Ordering::Less => curr = get::<S, N>(arena, node).left(),
            Ordering::Greater => curr = get::<S, N>(arena, node).right(),
            Ordering::Equal => return Some(node),
        }
    }
    None
}

/// Returns the node that compares equal to `value` under `cmp`, or, if
/// none exists, the would-be parent it should be linked under and on
/// which side. Shared by BST and AVL insertion.
pub(crate) enum InsertSlot {
    /// A node comparing equal to the value already exists.
    Occupied(Key),
    /// The value belongs under `parent` (`None` only for an empty tree),
    /// on the given side.
    Vacant {
        parent: Option<Key>,
        side: Side,
    },
}
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

pub(crate) fn search_with_parent<S, N>(
    arena: &S,
    root: Option<Key>,
    cmp: impl Fn(&N) -> Ordering,
) -> InsertSlot
where
    S: Storage<Key = Key, Element = N>,
{
    let mut parent = None;
    let mut curr = root;
    let mut side = Side::Left;
    while let Some(node) = curr {
        match cmp(get::<S, N>(arena, node)) {
            Ordering::Less => {
                parent = Some(node);
                side = Side::Left;
                curr = get::<S, N>(arena, node).left();
            }
            Ordering::Greater => {
                parent = Some(node);
                side = Side::Right;
                curr = get::<S, N>(arena, node).right();
            }
            Ordering::Equal => return InsertSlot::Occupied(node),
        }
    }
    InsertSlot::Vacant { parent, side }
}

/// Links `child` as `parent`'s left or right child (or, if `parent` is
/// `None`, does nothing — the caller is expected to make `child` the
/// tree's root instead).
pub(crate) fn link_child<S, N>(arena: &mut S, parent: Option<Key>, side: Side, child: Key)
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    get_mut::<S, N>(arena, child).set_parent(parent);
    if let Some(parent) = parent {
        match side {
            Side::Left => get_mut::<S, N>(arena, parent).set_left(Some(child)),
            Side::Right => get_mut::<S, N>(arena, parent).set_right(Some(child)),
        }
    }
}

pub(crate) fn first_inorder<S, N>(arena: &S, mut node: Key) -> Key
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    while let Some(left) = get::<S, N>(arena, node).left() {
        node = left;
    }
    node
}

/// The root is always the first node visited in pre-order.
pub(crate) const fn first_preorder(node: Key) -> Key {
    node
}

pub(crate) fn first_postorder<S, N>(arena: &S, mut node: Key) -> Key
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    loop {
        let n = get::<S, N>(arena, node);
        match n.left().or_else(|| n.right()) {
            Some(next) => node = next,
            None => return node,
        }
    }
}

pub(crate) fn inorder_next<S, N>(arena: &S, mut node: Key) -> Option<Key>
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    if let Some(mut curr) = get::<S, N>(arena, node).right() {
        while let Some(left) = get::<S, N>(arena, curr).left() {
            curr = left;
        }
        return Some(curr);
    }
    while let Some(parent) = get::<S, N>(arena, node).parent() {
        if get::<S, N>(arena, parent).right() == Some(node) {
            node = parent;
        } else {
            return Some(parent);
        }
    }
    None
}

pub(crate) fn inorder_prev<S, N>(arena: &S, mut node: Key) -> Option<Key>
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    if let Some(mut curr) = get::<S, N>(arena, node).left() {
        while let Some(right) = get::<S, N>(arena, curr).right() {
            curr = right;
        }
        return Some(curr);
    }
    while let Some(parent) = get::<S, N>(arena, node).parent() {
        if get::<S, N>(arena, parent).left() == Some(node) {
            node = parent;
        } else {
            return Some(parent);
        }
    }
    None
}

pub(crate) fn preorder_next<S, N>(arena: &S, node: Key) -> Option<Key>
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    let n = get::<S, N>(arena, node);
    if let Some(left) = n.left() {
        return Some(left);
    }
    if let Some(right) = n.right() {
        return Some(right);
    }
    let mut curr = node;
    let mut parent = get::<S, N>(arena, node).parent();
    while let Some(p) = parent {
        let pn = get::<S, N>(arena, p);
        if pn.right() == Some(curr) || pn.right().is_none() {
            curr = p;
            parent = pn.parent();
        } else {
            break;
        }
    }
    parent.and_then(|p| get::<S, N>(arena, p).right())
}

pub(crate) fn preorder_prev<S, N>(arena: &S, node: Key) -> Option<Key>
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    let parent = get::<S, N>(arena, node).parent()?;
    let pn = get::<S, N>(arena, parent);
    if pn.left() == Some(node) || pn.left().is_none() {
        return Some(parent);
    }
    let mut curr = pn.left().unwrap();
    loop {
        let cn = get::<S, N>(arena, curr);
        match cn.right().or_else(|| cn.left()) {
            Some(next) => curr = next,
            None => return Some(curr),
        }
    }
}

pub(crate) fn postorder_next<S, N>(arena: &S, node: Key) -> Option<Key>
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    let parent = get::<S, N>(arena, node).parent()?;
    let pn = get::<S, N>(arena, parent);
    if pn.left() == Some(node) {
        if let Some(right) = pn.right() {
            let mut curr = right;
            loop {
                let cn = get::<S, N>(arena, curr);
                match cn.left().or_else(|| cn.right()) {
                    Some(next) => curr = next,
                    None => return Some(curr),
                }
            }
        }
    }
    Some(parent)
}

pub(crate) fn postorder_prev<S, N>(arena: &S, node: Key) -> Option<Key>
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    let n = get::<S, N>(arena, node);
    if let Some(right) = n.right() {
        return Some(right);
    }
    if let Some(left) = n.left() {
        return Some(left);
    }
    let mut curr = node;
    let mut parent = get::<S, N>(arena, node).parent();
    while let Some(p) = parent {
        let pn = get::<S, N>(arena, p);
        if pn.left() == Some(curr) || pn.left().is_none() {
            curr = p;
            parent = pn.parent();
        } else {
            break;
        }
    }
    parent.and_then(|p| get::<S, N>(arena, p).left())
}

/// Breadth-first traversal from `root`, visiting every node once.
pub(crate) fn bfs<S, N>(arena: &S, root: Key, mut visit: impl FnMut(Key))
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    let mut queue = alloc::collections::VecDeque::new();
    queue.push_back(root);
    while let Some(curr) = queue.pop_front() {
        visit(curr);
        let n = get::<S, N>(arena, curr);
        if let Some(left) = n.left() {
            queue.push_back(left);
        }
        if let Some(right) = n.right() {
            queue.push_back(right);
        }
    }
}

/// Depth-first traversal from `root` (pre-order via an explicit stack,
/// standing in for the original's allocator-backed `lstack` collaborator).
pub(crate) fn dfs<S, N>(arena: &S, root: Key, mut visit: impl FnMut(Key))
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    let mut stack = alloc::vec![root];
    while let Some(curr) = stack.pop() {
        visit(curr);
        let n = get::<S, N>(arena, curr);
        if let Some(right) = n.right() {
            stack.push(right);
        }
        if let Some(left) = n.left() {
            stack.push(left);
        }
    }
}

/// Height of the subtree rooted at `node` (a leaf has height 0, matching
/// the convention `bintree_height(NULL) == -1`).
pub(crate) fn height<S, N>(arena: &S, node: Option<Key>) -> isize
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    match node {
        None => -1,
        Some(node) => {
            let n = get::<S, N>(arena, node);
            1 + core::cmp::max(height(arena, n.left()), height(arena, n.right()))
        }
    }
}

/// `height(left) - height(right)` for `node`.
pub(crate) fn balance_factor<S, N>(arena: &S, node: Key) -> isize
where
    S: Storage<Key = Key, Element = N>,
    N: Linked,
{
    let n = get::<S, N>(arena, node);
    height(arena, n.left()) - height(arena, n.right())
}
