//! The allocator interface: `{context, allocate -> slot, free(slot)}`.
//!
//! Almost every container in this crate gets its storage from the arena
//! (`storage` module) or from `alloc::vec::Vec` directly, and so never
//! touches this trait — the backing collection already is the allocator.
//! The one place a raw, runtime-sized allocation is still needed is the
//! M-way node layout (`mway::node`), whose node size is a function of a
//! branching factor chosen at construction time and therefore cannot be
//! expressed as a single monomorphic Rust type's `Box<T>`.

use crate::status::SystemError;
use alloc::boxed::Box;

/// Abstract allocation of fixed-size, runtime-determined buffers.
///
/// The default implementation, [`SystemAllocator`], is backed by the
/// process heap via `Box`'s own allocator.
pub trait Allocator<T> {
    /// Allocates a boxed slice of `len` default-initialized elements.
    ///
    /// Returns [`SystemError`] if the allocation could not be satisfied.
    fn allocate(&self, len: usize, init: impl FnMut(usize) -> T) -> Result<Box<[T]>, SystemError>;
}

/// The default allocator, backed by the process heap.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemAllocator;
impl<T> Allocator<T> for SystemAllocator {
    #[inline]
    fn allocate(
        &self,
        len: usize,
        mut init: impl FnMut(usize) -> T,
    ) -> Result<Box<[T]>, SystemError> {
        let mut v = alloc::vec::Vec::with_capacity(len);
        for i in 0..len {
            v.push(init(i));
        }
        Ok(v.into_boxed_slice())
    }
}
