//! Ordered-map engines built on a shared intrusive binary-tree substrate:
//! an unbalanced [`Bst`](bst::Bst) and a self-balancing [`Avl`](avl::Avl).
//!
//! Both layer their own node type over [`substrate`]'s [`substrate::Linked`]
//! trait and arena (see [`crate::storage`]); the substrate itself never
//! knows about balancing or duplicate-key semantics, matching the
//! original's split between `bintree.c` (mechanical plumbing) and
//! `bst.c`/`avl.c` (policy layered on top of it).

pub(crate) mod substrate;

pub mod bst;
pub use bst::Bst;

pub mod avl;
pub use avl::Avl;
