use std::alloc::{self, Layout};
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use super::OomError;

const MAX_SIZE: usize = isize::MAX as usize;

/// An owned allocation holding `cap` slots of `MaybeUninit<T>`.
///
/// This type does no element bookkeeping at all: it doesn't know which slots are
/// initialized and never drops contents, only the memory itself. Tracking liveness is
/// the job of [`DynArray`](super::DynArray). Every allocating operation is fallible and
/// reports [`OomError`] instead of aborting, which is the whole reason this exists
/// rather than reusing a std container.
pub(crate) struct RawBuf<T> {
    pub(crate) ptr: NonNull<MaybeUninit<T>>,
    cap: usize,
}

impl<T> RawBuf<T> {
    /// A buffer with no allocation behind it. The pointer dangles but is well aligned.
    pub const fn empty() -> RawBuf<T> {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
        }
    }

    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Builds the allocation layout for `cap` slots, treating overflow as allocation
    /// failure rather than a panic.
    fn make_layout(cap: usize) -> Result<Layout, OomError> {
        match Layout::array::<MaybeUninit<T>>(cap) {
            Ok(layout) if layout.size() <= MAX_SIZE => Ok(layout),
            _ => Err(OomError),
        }
    }

    pub fn try_with_cap(cap: usize) -> Result<RawBuf<T>, OomError> {
        if size_of::<T>() == 0 || cap == 0 {
            // ZSTs and empty buffers never allocate; a dangling pointer serves both.
            return Ok(RawBuf {
                ptr: NonNull::dangling(),
                cap,
            });
        }

        let layout = Self::make_layout(cap)?;
        // SAFETY: zero-sized layouts are guarded against above.
        let raw: *mut MaybeUninit<T> = unsafe { alloc::alloc(layout).cast() };

        match NonNull::new(raw) {
            Some(ptr) => Ok(RawBuf { ptr, cap }),
            None => Err(OomError),
        }
    }

    /// Resizes the allocation to exactly `new_cap` slots, preserving the contents of
    /// the leading `min(cap, new_cap)` slots bit-for-bit. On failure the existing
    /// allocation and contents remain valid and untouched.
    pub fn try_realloc(&mut self, new_cap: usize) -> Result<(), OomError> {
        match (self.cap, new_cap) {
            (_, _) if size_of::<T>() == 0 => {
                // No allocation exists or ever will; only the recorded capacity moves.
                self.cap = new_cap;
            }
            (old, new) if old == new => {}
            (0, _) => {
                *self = Self::try_with_cap(new_cap)?;
            }
            (_, 0) => {
                // SAFETY: a non-zero capacity of a non-ZST was allocated with this
                // same layout in the global allocator.
                unsafe {
                    alloc::dealloc(self.ptr.as_ptr().cast(), Self::make_layout(self.cap)?);
                }
                self.ptr = NonNull::dangling();
                self.cap = 0;
            }
            (old, new) => {
                let old_layout = Self::make_layout(old)?;
                let new_layout = Self::make_layout(new)?;

                // SAFETY: the pointer was allocated in the global allocator with
                // old_layout, and the new size is non-zero and fits an isize.
                let raw: *mut MaybeUninit<T> = unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()).cast()
                };

                self.ptr = NonNull::new(raw).ok_or(OomError)?;
                self.cap = new;
            }
        }
        Ok(())
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if size_of::<T>() == 0 || self.cap == 0 {
            return;
        }
        if let Ok(layout) = Self::make_layout(self.cap) {
            // SAFETY: a live RawBuf with non-zero capacity always holds an allocation
            // made in the global allocator with exactly this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}
