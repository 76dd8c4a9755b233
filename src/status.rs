//! The stable status-code contract shared by every container in this crate.
//!
//! Mutating operations that can fail for reasons other than "value not
//! found" return a [`Status`] (or a richer `Result` wrapping one) rather
//! than panicking, matching the error taxonomy every component in this
//! crate documents in its own module.

use core::fmt::{self, Display, Formatter};

/// Outcome of a container operation.
///
/// This mirrors the status tag shared by every component: `ok`,
/// `not-found`, `duplicate-key`, `system-error`, and the trie-only
/// `unknown-input`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The operation completed as requested.
    Ok,
    /// The requested key was not present.
    NotFound,
    /// Insertion was attempted for a key that already exists.
    DuplicateKey,
    /// The allocator backing the operation returned failure.
    SystemError,
    /// A trie mapper rejected a character in the input.
    UnknownInput,
}
impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Ok => "ok",
            Self::NotFound => "key not found",
            Self::DuplicateKey => "duplicate key",
            Self::SystemError => "allocator returned failure",
            Self::UnknownInput => "input rejected by the alphabet mapper",
        })
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for Status {}

/// The error type returned by ordered-map `add` operations when the key is
/// already present.
///
/// Carries the value the caller tried to insert back out, so that it is
/// not silently dropped on a failed insertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DuplicateKeyError<T> {
    /// The value that could not be inserted because its key already exists.
    pub rejected: T,
}
impl<T> Display for DuplicateKeyError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad("key already present in the container")
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl<T: fmt::Debug> std::error::Error for DuplicateKeyError<T> {}

/// The error type returned when a runtime-sized allocation (the M-way
/// node layout's raw node buffer) fails.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SystemError;
impl Display for SystemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad("allocator returned failure")
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for SystemError {}
