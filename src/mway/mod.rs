//! The generic M-way node substrate and its two consumers: the [`Btree`]
//! ordered map and the alphabet-indexed [`Trie`].
//!
//! Both are grounded in `include/ds/trees/mwaytree.h`'s shared node shape
//! (see [`node`]), but diverge enough in how entries are addressed —
//! comparison-driven for the B-tree, position-driven for the trie — that
//! they get their own files rather than sharing traversal code.

pub(crate) mod node;

pub mod btree;
pub use btree::Btree;

#[cfg(feature = "trie")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "trie")))]
pub mod trie;
#[cfg(feature = "trie")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "trie")))]
pub use trie::Trie;
