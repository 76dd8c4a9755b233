//! A generic in-memory container library built on an arena-allocated
//! node substrate: self-balancing ordered maps (an unbalanced [`tree::Bst`]
//! and a self-balancing [`tree::Avl`]), an order-`m` [`mway::Btree`] and
//! the [`mway::Trie`] built atop the same M-way node shape, an
//! open-addressed [`hash_table::HashTable`], an array-backed [`heap::Heap`],
//! and intrusive-style [`linked_list`] variants.
//!
//! # Storage
//! Every tree-shaped container here is arena-backed rather than
//! pointer-linked: nodes live in a [`storage::Storage`] (by default a
//! sparse, hole-reusing vector, [`storage::DefaultStorage`]) and link to
//! each other by [`storage`]-assigned key rather than by address. This is
//! the same technique Ben Lovy's ["arena-allocated trees"][arena tree
//! blog post] describes; see `DESIGN.md` for how each container's
//! original pointer-based design maps onto it.
//!
//! # Feature flags
//! - `std` (**enabled by default**) — enables the full standard library;
//!   disabling it makes the crate `no_std` (still requires `alloc`).
//!   Currently this only adds [`std::error::Error`] implementations for
//!   the crate's error types.
//! - `alloc` (**enabled by default**) — required by every container in
//!   this crate, since the arena and several containers' backing storage
//!   (`Vec`) both need a global allocator.
//! - `binary_tree` (**enabled by default**) — the [`tree`] module (`Bst`,
//!   `Avl`).
//! - `btree` (**enabled by default**) — the [`mway`] module's [`mway::Btree`].
//! - `trie` (**enabled by default**, implies `btree`) — [`mway::Trie`].
//! - `hash_table` (**enabled by default**) — [`hash_table::HashTable`].
//! - `heap` (**enabled by default**) — [`heap::Heap`].
//! - `linked_list` (**enabled by default**) — [`linked_list`].
//! - `logging` — routes internal diagnostics (resize/rebalance events)
//!   through the `log` crate.
//!
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::pedantic,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::unwrap_used, // Only .expect() allowed
)]
#![deny(anonymous_parameters, bare_trait_objects)]
#![allow(
    clippy::use_self, // FIXME reenable when it gets fixed
    clippy::clippy::wildcard_imports, // Worst lint ever
    clippy::clippy::module_name_repetitions, // Annoying and stupid
    clippy::shadow_unrelated, // Countless false positives, very annoying
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod storage;

pub mod status;
pub mod object;
pub mod alloc_iface;

#[cfg(feature = "binary_tree")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "binary_tree")))]
pub mod tree;

#[cfg(feature = "btree")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "btree")))]
pub mod mway;

#[cfg(feature = "hash_table")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "hash_table")))]
pub mod hash_table;
#[cfg(feature = "hash_table")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "hash_table")))]
pub use hash_table::HashTable;

#[cfg(feature = "heap")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "heap")))]
pub mod heap;
#[cfg(feature = "heap")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "heap")))]
pub use heap::Heap;

#[cfg(feature = "linked_list")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "linked_list")))]
pub mod linked_list;

/// A prelude bringing the most commonly used types into scope.
pub mod prelude {
    #[cfg(feature = "binary_tree")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "binary_tree")))]
    #[doc(no_inline)]
    pub use crate::tree::{Avl, Bst};
    #[cfg(feature = "btree")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "btree")))]
    #[doc(no_inline)]
    pub use crate::mway::Btree;
    #[cfg(feature = "trie")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "trie")))]
    #[doc(no_inline)]
    pub use crate::mway::Trie;
    #[cfg(feature = "hash_table")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "hash_table")))]
    #[doc(no_inline)]
    pub use crate::HashTable;
    #[cfg(feature = "heap")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "heap")))]
    #[doc(no_inline)]
    pub use crate::Heap;
    #[cfg(feature = "linked_list")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "linked_list")))]
    #[doc(no_inline)]
    pub use crate::linked_list::{DoublyLinkedList, SinglyLinkedList};
    #[doc(no_inline)]
    pub use crate::status::Status;
}
