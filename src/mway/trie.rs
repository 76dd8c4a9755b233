//! An alphabet-indexed trie, keyed by strings over a caller-chosen
//! character set.
//!
//! Grounded in `src/trees/trie.c`: each node is an array of `alphabet_size`
//! entries (one per character of the alphabet), lazily created on `put`
//! exactly as `trie_put` allocates a fresh `mway_create` node only when a
//! path doesn't exist yet. The root is special-cased as a bare entry held
//! directly by the trie (not a node of its own) so that the empty string
//! can carry a value, matching the original's `tr->root` field.
//!
//! Unlike the B-tree, entries here are addressed by alphabet position
//! (via the caller-supplied `map`/`unmap` pair) rather than compared
//! against a key, so this does not reuse [`crate::mway::node::MwayNode`];
//! see that module's doc comment.

use crate::mway::node::Key;
use crate::status::Status;
use crate::storage::{DefaultStorage, MoveFix, Storage};
use alloc::string::String;
use alloc::vec::Vec;
use arrayvec::ArrayVec;
use core::num::NonZeroIsize;

/// The deepest prefix [`Trie::prefix_iterate`] will reconstruct into a
/// `String` while walking down from the iteration root. Mirrors the
/// original's fixed `TRIE_STACK_DEPTH` traversal buffer; prefixes at or
/// beyond this depth are silently skipped rather than causing a panic or
/// an allocation, exactly as the original's bounded stack walk does.
const MAX_PREFIX_LEN: usize = 32;

struct TrieEntry<V> {
    child: Option<Key>,
    data: Option<V>,
}
impl<V> TrieEntry<V> {
    const fn empty() -> Self {
        Self {
            child: None,
            data: None,
        }
    }
}

struct TrieNode<V> {
    entries: Vec<TrieEntry<V>>,
}
impl<V> TrieNode<V> {
    fn new(alphabet_size: usize) -> Self {
        let mut entries = Vec::with_capacity(alphabet_size);
        entries.resize_with(alphabet_size, TrieEntry::empty);
        Self { entries }
    }
}
impl<V> MoveFix for TrieNode<V> {
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

/// One step of a walk through the trie: either the root entry (held
/// outside the arena) or a specific entry of an arena-resident node.
#[derive(Copy, Clone)]
enum Loc {
    Root,
    Node(Key, usize),
}

/// A map from strings over some alphabet to values `V`.
///
/// `map` turns a `char` into an entry index (`None` rejects it with
/// [`Status::UnknownInput`]); `unmap` is its inverse, used to reconstruct
/// keys during [`prefix_iterate`](Trie::prefix_iterate). Two convenience
/// constructors, [`Trie::ascii_lowercase`] and [`Trie::ascii_alphanumeric`],
/// cover the common cases without requiring the caller to write their own
/// mapper.
pub struct Trie<V, M, U> {
    arena: DefaultStorage<TrieNode<V>>,
    root: TrieEntry<V>,
    alphabet_size: usize,
    map: M,
    unmap: U,
    len: usize,
}
impl<V, M, U> Trie<V, M, U>
where
    M: Fn(char) -> Option<usize>,
    U: Fn(usize) -> char,
{
    /// Creates an empty trie over an alphabet of `alphabet_size`
    /// characters, using `map`/`unmap` to convert between characters and
    /// entry indices.
    pub fn new(alphabet_size: usize, map: M, unmap: U) -> Self {
        Self {
            arena: DefaultStorage::new(),
            root: TrieEntry::empty(),
            alphabet_size,
            map,
            unmap,
            len: 0,
        }
    }

    /// The number of keys currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
    /// `true` if the trie holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn entry(&self, loc: Loc) -> &TrieEntry<V> {
        match loc {
            Loc::Root => &self.root,
            Loc::Node(node, i) => &self.arena.get(&node).expect("dangling trie node").entries[i],
        }
    }
    fn entry_mut(&mut self, loc: Loc) -> &mut TrieEntry<V> {
        match loc {
            Loc::Root => &mut self.root,
            Loc::Node(node, i) => {
                &mut self
                    .arena
                    .get_mut(&node)
                    .expect("dangling trie node")
                    .entries[i]
            }
        }
    }
    fn child_of(&self, loc: Loc) -> Option<Key> {
        self.entry(loc).child
    }

    /// Walks to the entry named by `key`, failing with
    /// [`Status::UnknownInput`] if a character isn't in the alphabet or
    /// [`Status::NotFound`] if the path doesn't exist.
    fn walk(&self, key: &str) -> Result<Loc, Status> {
        let mut loc = Loc::Root;
        for c in key.chars() {
            let index = (self.map)(c).ok_or(Status::UnknownInput)?;
            if index >= self.alphabet_size {
                return Err(Status::UnknownInput);
            }
            let child = self.child_of(loc).ok_or(Status::NotFound)?;
            loc = Loc::Node(child, index);
        }
        Ok(loc)
    }

    /// Looks up the value stored at `key`.
    pub fn get(&self, key: &str) -> Result<&V, Status> {
        let loc = self.walk(key)?;
        self.entry(loc).data.as_ref().ok_or(Status::NotFound)
    }
    /// Looks up the value stored at `key`, mutably.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut V, Status> {
        let loc = self.walk(key)?;
        self.entry_mut(loc).data.as_mut().ok_or(Status::NotFound)
    }
    /// `true` if `key` has a value stored (as opposed to merely being a
    /// prefix of some longer stored key).
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Inserts `value` at `key`, creating any intermediate nodes that
    /// don't exist yet, and returns the value previously stored there, if
    /// any.
    pub fn put(&mut self, key: &str, value: V) -> Result<Option<V>, Status> {
        let mut loc = Loc::Root;
        for c in key.chars() {
            let index = (self.map)(c).ok_or(Status::UnknownInput)?;
            if index >= self.alphabet_size {
                return Err(Status::UnknownInput);
            }
            let child = match self.child_of(loc) {
                Some(child) => child,
                None => {
                    let child = self.arena.add(TrieNode::new(self.alphabet_size));
                    self.entry_mut(loc).child = Some(child);
                    child
                }
            };
            loc = Loc::Node(child, index);
        }
        let slot = &mut self.entry_mut(loc).data;
        let old = slot.take();
        *slot = Some(value);
        if old.is_none() {
            self.len += 1;
        }
        Ok(old)
    }

    /// Removes and returns the value stored at `key`, if any. Matches the
    /// original's documented limitation of not compacting now-empty
    /// nodes back out of the arena; a trie that sees many removals will
    /// retain the shape of its deepest insertions.
    pub fn remove(&mut self, key: &str) -> Result<V, Status> {
        let loc = self.walk(key)?;
        let value = self.entry_mut(loc).data.take().ok_or(Status::NotFound)?;
        self.len -= 1;
        Ok(value)
    }

    /// Visits every `(key, value)` pair whose key starts with `prefix`,
    /// stopping early if `visit` returns `false`. If `prefix` is at or
    /// beyond [`MAX_PREFIX_LEN`] characters, or names a path that doesn't
    /// exist, this silently visits nothing.
    pub fn prefix_iterate(&self, prefix: &str, mut visit: impl FnMut(&str, &V) -> bool) {
        if prefix.chars().count() >= MAX_PREFIX_LEN - 1 {
            return;
        }
        let loc = match self.walk(prefix) {
            Ok(loc) => loc,
            Err(_) => return,
        };
        let mut buffer: ArrayVec<[char; MAX_PREFIX_LEN]> = ArrayVec::new();
        for c in prefix.chars() {
            buffer.push(c);
        }
        let entry = self.entry(loc);
        if let Some(data) = &entry.data {
            let reconstructed: String = buffer.iter().collect();
            if !visit(&reconstructed, data) {
                return;
            }
        }
        if let Some(child) = entry.child {
            self.prefix_iterate_from(child, &mut buffer, &mut visit);
        }
    }
    fn prefix_iterate_from(
        &self,
        node: Key,
        buffer: &mut ArrayVec<[char; MAX_PREFIX_LEN]>,
        visit: &mut impl FnMut(&str, &V) -> bool,
    ) -> bool {
        let node = self.arena.get(&node).expect("dangling trie node");
        for (i, entry) in node.entries.iter().enumerate() {
            if buffer.try_push((self.unmap)(i)).is_err() {
                continue; // past the reconstruction buffer's depth; skip this branch
            }
            if let Some(data) = &entry.data {
                let reconstructed: String = buffer.iter().collect();
                if !visit(&reconstructed, data) {
                    buffer.pop();
                    return false;
                }
            }
            if let Some(child) = entry.child {
                if !self.prefix_iterate_from(child, buffer, visit) {
                    buffer.pop();
                    return false;
                }
            }
            buffer.pop();
        }
        true
    }

    /// The length of the longest prefix of `key` that is itself a stored
    /// key (which may be `key` in full, or 0 if not even the empty string
    /// is stored).
    pub fn longest_prefix(&self, key: &str) -> usize {
        // The empty prefix (depth 0) counts as a match whenever the root
        // itself carries a value.
        let mut longest = 0usize;
        let mut loc = Loc::Root;
        let mut depth = 0usize;
        for c in key.chars() {
            let child = match self.child_of(loc) {
                Some(child) => child,
                None => break,
            };
            let index = match (self.map)(c) {
                Some(i) if i < self.alphabet_size => i,
                _ => break,
            };
            loc = Loc::Node(child, index);
            depth += 1;
            if self.entry(loc).data.is_some() {
                longest = depth;
            }
        }
        longest
    }
}
impl<V> Trie<V, fn(char) -> Option<usize>, fn(usize) -> char> {
    /// A trie over the 26 lowercase ASCII letters.
    pub fn ascii_lowercase() -> Self {
        Self::new(
            26,
            |c| {
                if c.is_ascii_lowercase() {
                    Some(c as usize - 'a' as usize)
                } else {
                    None
                }
            },
            |i| (b'a' + i as u8) as char,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Trie;

    #[test]
    fn put_get_and_overwrite() {
        let mut t = Trie::ascii_lowercase();
        assert_eq!(t.put("cat", 1).unwrap(), None);
        assert_eq!(t.put("car", 2).unwrap(), None);
        assert_eq!(t.put("cat", 10).unwrap(), Some(1));
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("cat"), Ok(&10));
        assert_eq!(t.get("car"), Ok(&2));
        assert_eq!(t.get("ca"), Err(super::Status::NotFound));
    }

    #[test]
    fn rejects_out_of_alphabet_input() {
        let mut t = Trie::ascii_lowercase();
        assert_eq!(t.put("Cat", 1), Err(super::Status::UnknownInput));
        assert_eq!(t.get("5"), Err(super::Status::UnknownInput));
    }

    #[test]
    fn empty_string_key_is_storable() {
        let mut t = Trie::ascii_lowercase();
        assert_eq!(t.put("", 42).unwrap(), None);
        assert_eq!(t.get(""), Ok(&42));
    }

    #[test]
    fn remove_then_not_found_but_prefix_survives() {
        let mut t = Trie::ascii_lowercase();
        t.put("cat", 1).unwrap();
        t.put("cats", 2).unwrap();
        assert_eq!(t.remove("cat"), Ok(1));
        assert_eq!(t.get("cat"), Err(super::Status::NotFound));
        assert_eq!(t.get("cats"), Ok(&2));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn prefix_iterate_visits_every_matching_key() {
        let mut t = Trie::ascii_lowercase();
        for (k, v) in [("cat", 1), ("car", 2), ("cart", 3), ("dog", 4)] {
            t.put(k, v).unwrap();
        }
        let mut seen = alloc::vec::Vec::new();
        t.prefix_iterate("ca", |k, v| {
            seen.push((alloc::string::String::from(k), *v));
            true
        });
        seen.sort();
        assert_eq!(
            seen,
            alloc::vec![
                (alloc::string::String::from("car"), 2),
                (alloc::string::String::from("cart"), 3),
                (alloc::string::String::from("cat"), 1),
            ]
        );
    }

    #[test]
    fn prefix_iterate_can_stop_early() {
        let mut t = Trie::ascii_lowercase();
        for (k, v) in [("cat", 1), ("car", 2), ("cart", 3)] {
            t.put(k, v).unwrap();
        }
        let mut visits = 0;
        t.prefix_iterate("ca", |_, _| {
            visits += 1;
            false
        });
        assert_eq!(visits, 1);
    }

    #[test]
    fn longest_prefix_finds_deepest_stored_ancestor() {
        let mut t = Trie::ascii_lowercase();
        t.put("car", 1).unwrap();
        t.put("cart", 2).unwrap();
        assert_eq!(t.longest_prefix("cartoon"), 4);
        assert_eq!(t.longest_prefix("ca"), 0);
        assert_eq!(t.longest_prefix("cars"), 3);
    }
}
