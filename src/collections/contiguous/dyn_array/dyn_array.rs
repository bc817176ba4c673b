use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::collections::contiguous::{OomError, RawBuf};
use crate::util::error::IndexOutOfBounds;
use crate::util::result::ResultExtension;

/// First non-zero capacity taken by an owned array, so a handful of pushes doesn't
/// trigger a handful of reallocations.
const MIN_CAP: usize = 8;

const GROWTH_FACTOR: usize = 2;

/// Where a [`DynArray`]'s slots live. Borrowed storage is promoted to owned the first
/// time growth outruns it, and the variant never changes back.
pub(crate) enum Store<'a, T> {
    Owned(RawBuf<T>),
    Borrowed(&'a mut [MaybeUninit<T>]),
}

/// A growable contiguous collection with explicit control over its backing storage and
/// recoverable allocation failure.
///
/// # Differences from [`Vec`]
/// - The array can start out on caller-provided storage (for example a stack buffer)
///   via [`with_external`](DynArray::with_external) and only touches the allocator once
///   it outgrows it.
/// - Allocation failure doesn't abort. Growing operations return
///   [`Result<_, OomError>`](OomError) and a failure marks the handle with a sticky
///   out-of-memory flag: further growth keeps failing cheaply while the stored elements
///   stay intact and readable. [`reset`](DynArray::reset) clears the flag.
/// - Capacity is exact: growth requests produce precisely the computed capacity, which
///   makes the growth policy (factor 2, minimum 8) observable and testable.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the array.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being added or removed.
///
/// | Method | Complexity |
/// |-|-|
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `swap_remove` | `O(1)` |
/// | `swap_remove_n` | `O(m)` |
/// | `replace` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
///
/// \* Amortized; an individual push that has to grow takes `O(n)`.
///
/// \** If the array already has enough capacity, `reserve` is `O(1)`.
///
/// # Concurrency
/// A `DynArray` is a plain single-threaded data structure with no internal locking;
/// share it across threads only behind external synchronization, which the borrow
/// checker enforces anyway.
pub struct DynArray<'a, T> {
    pub(crate) store: Store<'a, T>,
    pub(crate) len: usize,
    oom: bool,
}

impl<'a, T> DynArray<'a, T> {
    /// Creates a new array with length and capacity 0. No memory is allocated until the
    /// first growth.
    ///
    /// # Examples
    /// ```
    /// # use dropkit::collections::contiguous::DynArray;
    /// let arr: DynArray<u8> = DynArray::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.cap(), 0);
    /// assert!(!arr.is_oom());
    /// ```
    pub const fn new() -> DynArray<'a, T> {
        DynArray {
            store: Store::Owned(RawBuf::empty()),
            len: 0,
            oom: false,
        }
    }

    /// Creates an array backed by caller-provided storage. The array starts empty with
    /// capacity `buf.len()` and performs no allocation until it outgrows `buf`, at
    /// which point the live elements move into a fresh owned allocation and `buf` is
    /// never touched again.
    ///
    /// # Examples
    /// ```
    /// # use std::mem::MaybeUninit;
    /// # use dropkit::collections::contiguous::DynArray;
    /// let mut buf = [MaybeUninit::<u32>::uninit(); 4];
    /// let mut arr = DynArray::with_external(&mut buf);
    /// assert_eq!(arr.cap(), 4);
    /// arr.push(7)?;
    /// assert!(arr.is_borrowed());
    /// # Ok::<(), dropkit::collections::contiguous::OomError>(())
    /// ```
    pub fn with_external(buf: &'a mut [MaybeUninit<T>]) -> DynArray<'a, T> {
        DynArray {
            store: Store::Borrowed(buf),
            len: 0,
            oom: false,
        }
    }

    /// Returns the length of the array.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the array contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity, whether owned or borrowed.
    pub const fn cap(&self) -> usize {
        match &self.store {
            Store::Owned(buf) => buf.cap(),
            Store::Borrowed(slice) => slice.len(),
        }
    }

    /// Returns true while the array still sits on the storage passed to
    /// [`with_external`](DynArray::with_external).
    pub const fn is_borrowed(&self) -> bool {
        matches!(self.store, Store::Borrowed(_))
    }

    /// Returns true once an allocation has failed. The flag is sticky: every growing
    /// operation fails until [`reset`](DynArray::reset) is called. Non-growing access
    /// keeps working against the intact contents.
    pub const fn is_oom(&self) -> bool {
        self.oom
    }

    pub(crate) fn base(&self) -> *const MaybeUninit<T> {
        match &self.store {
            Store::Owned(buf) => buf.ptr.as_ptr(),
            Store::Borrowed(slice) => slice.as_ptr(),
        }
    }

    pub(crate) fn base_mut(&mut self) -> *mut MaybeUninit<T> {
        match &mut self.store {
            Store::Owned(buf) => buf.ptr.as_ptr(),
            Store::Borrowed(slice) => slice.as_mut_ptr(),
        }
    }

    /// Ensures capacity for at least `min_cap` elements, applying the growth policy
    /// (`max(min_cap, cap * 2, 8)`) when an actual grow is needed. Growing off borrowed
    /// storage moves the live elements into an owned allocation.
    ///
    /// # Errors
    /// Fails if the handle is already flagged out-of-memory, or if the allocation
    /// itself fails (which sets the flag).
    pub fn reserve(&mut self, min_cap: usize) -> Result<(), OomError> {
        if self.oom {
            return Err(OomError);
        }
        if min_cap <= self.cap() {
            return Ok(());
        }

        let new_cap = cmp::max(
            cmp::max(min_cap, self.cap().saturating_mul(GROWTH_FACTOR)),
            MIN_CAP,
        );

        let outcome = if let Store::Owned(buf) = &mut self.store {
            buf.try_realloc(new_cap)
        } else {
            self.switch_to_owned(new_cap)
        };

        if outcome.is_err() {
            self.oom = true;
        }
        outcome
    }

    /// Replaces borrowed storage with an owned allocation of `new_cap` slots, moving
    /// the `len` live elements across. Must only be called in the borrowed state.
    fn switch_to_owned(&mut self, new_cap: usize) -> Result<(), OomError> {
        debug_assert!(self.is_borrowed());
        debug_assert!(new_cap >= self.len);

        let buf = RawBuf::try_with_cap(new_cap)?;
        let dst = buf.ptr.as_ptr();
        let old = mem::replace(&mut self.store, Store::Owned(buf));

        if let Store::Borrowed(slice) = old {
            // SAFETY: the borrowed slice holds the first len initialized slots, the new
            // allocation has room for at least len, and a fresh allocation cannot
            // overlap a caller-owned slice. MaybeUninit has no drop, so the stale
            // copies left behind in the slice are inert.
            unsafe { ptr::copy_nonoverlapping(slice.as_ptr(), dst, self.len) };
        }
        Ok(())
    }

    /// Capacity for `extra` more elements, with overflow reported as [`OomError`].
    fn grow_for(&mut self, extra: usize) -> Result<(), OomError> {
        match self.len.checked_add(extra) {
            Some(needed) => self.reserve(needed),
            None => {
                self.oom = true;
                Err(OomError)
            }
        }
    }

    fn check_index(&self, index: usize) {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
            .throw()
        }
    }

    fn check_insert_index(&self, index: usize) {
        if index > self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
            .throw()
        }
    }

    fn check_range(&self, index: usize, n: usize) {
        match index.checked_add(n) {
            Some(end) if end <= self.len => (),
            _ => Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
            .throw(),
        }
    }

    /// Appends a value to the end of the array.
    ///
    /// # Errors
    /// On allocation failure the length and contents are unchanged and the handle is
    /// flagged out-of-memory.
    ///
    /// # Examples
    /// ```
    /// # use dropkit::collections::contiguous::DynArray;
    /// let mut arr = DynArray::new();
    /// for i in 0..=5 {
    ///     arr.push(i)?;
    /// }
    /// assert_eq!(&*arr, &[0, 1, 2, 3, 4, 5]);
    /// # Ok::<(), dropkit::collections::contiguous::OomError>(())
    /// ```
    pub fn push(&mut self, value: T) -> Result<(), OomError> {
        self.grow_for(1)?;
        // SAFETY: capacity now covers len + 1, so the write lands inside the
        // allocation at an unoccupied slot.
        unsafe {
            self.base_mut().add(self.len).write(MaybeUninit::new(value));
        }
        self.len += 1;
        Ok(())
    }

    /// Appends `n` uninitialized slots and returns them for the caller to fill. The
    /// length is advanced immediately.
    ///
    /// # Safety
    /// Every returned slot must be initialized before the array is next read, iterated
    /// or dropped. Leaving a slot uninitialized is undefined behavior.
    ///
    /// # Errors
    /// On allocation failure the length and contents are unchanged.
    pub unsafe fn add_uninit(&mut self, n: usize) -> Result<&mut [MaybeUninit<T>], OomError> {
        self.grow_for(n)?;
        let start = self.len;
        self.len += n;
        // SAFETY: capacity covers start + n, so the region is inside the allocation.
        Ok(unsafe { slice::from_raw_parts_mut(self.base_mut().add(start), n) })
    }

    /// Appends `n` default-valued elements and returns them. This is the safe sibling
    /// of [`add_uninit`](DynArray::add_uninit) for element types with a cheap default
    /// (for the integer types this means zero-filling).
    ///
    /// # Errors
    /// On allocation failure the length and contents are unchanged.
    pub fn add_defaulted(&mut self, n: usize) -> Result<&mut [T], OomError>
    where
        T: Default,
    {
        self.grow_for(n)?;
        let start = self.len;
        for i in 0..n {
            // SAFETY: capacity covers start + n; len tracks each write so a panicking
            // Default leaves only initialized slots below len.
            unsafe {
                self.base_mut()
                    .add(start + i)
                    .write(MaybeUninit::new(T::default()));
            }
            self.len += 1;
        }
        // SAFETY: the n slots from start were all just initialized.
        Ok(unsafe { slice::from_raw_parts_mut(self.base_mut().add(start).cast(), n) })
    }

    /// Appends clones of every element in `src`.
    ///
    /// # Errors
    /// On allocation failure the length and contents are unchanged.
    ///
    /// # Examples
    /// ```
    /// # use dropkit::collections::contiguous::DynArray;
    /// let mut arr = DynArray::new();
    /// arr.extend_from_slice(&[1, 2, 3])?;
    /// assert_eq!(&*arr, &[1, 2, 3]);
    /// # Ok::<(), dropkit::collections::contiguous::OomError>(())
    /// ```
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<(), OomError>
    where
        T: Clone,
    {
        self.grow_for(src.len())?;
        for value in src {
            // SAFETY: capacity was reserved for all of src up front; len tracks each
            // write so a panicking Clone leaves the array consistent.
            unsafe {
                self.base_mut()
                    .add(self.len)
                    .write(MaybeUninit::new(value.clone()));
            }
            self.len += 1;
        }
        Ok(())
    }

    /// Inserts a value at `index`, shifting everything at and after it one slot to the
    /// right.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Errors
    /// On allocation failure the length and contents are unchanged.
    ///
    /// # Examples
    /// ```
    /// # use dropkit::collections::contiguous::DynArray;
    /// let mut arr = DynArray::new();
    /// arr.extend_from_slice(&[0, 1, 2])?;
    /// arr.insert(1, 100)?;
    /// assert_eq!(&*arr, &[0, 100, 1, 2]);
    /// # Ok::<(), dropkit::collections::contiguous::OomError>(())
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), OomError> {
        self.check_insert_index(index);
        self.grow_for(1)?;
        // SAFETY: index <= len and capacity covers len + 1, so both the shifted range
        // and the written slot are inside the allocation.
        unsafe {
            let base = self.base_mut();
            ptr::copy(base.add(index), base.add(index + 1), self.len - index);
            base.add(index).write(MaybeUninit::new(value));
        }
        self.len += 1;
        Ok(())
    }

    /// Opens a gap of `n` uninitialized slots at `index`, shifting the tail right, and
    /// returns the gap for the caller to fill. The length is advanced immediately.
    ///
    /// # Safety
    /// Every returned slot must be initialized before the array is next read, iterated
    /// or dropped.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Errors
    /// On allocation failure the length and contents are unchanged.
    pub unsafe fn insert_uninit(
        &mut self,
        index: usize,
        n: usize,
    ) -> Result<&mut [MaybeUninit<T>], OomError> {
        self.check_insert_index(index);
        self.grow_for(n)?;
        // SAFETY: index <= len and capacity covers len + n, so the shifted tail stays
        // inside the allocation.
        unsafe {
            let base = self.base_mut();
            ptr::copy(base.add(index), base.add(index + n), self.len - index);
        }
        self.len += n;
        // SAFETY: the gap lies inside the allocation.
        Ok(unsafe { slice::from_raw_parts_mut(self.base_mut().add(index), n) })
    }

    /// Inserts `n` default-valued elements at `index`, shifting the tail right.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Errors
    /// On allocation failure the length and contents are unchanged.
    pub fn insert_defaulted(&mut self, index: usize, n: usize) -> Result<&mut [T], OomError>
    where
        T: Default,
    {
        self.check_insert_index(index);
        self.grow_for(n)?;
        let old_len = self.len;
        // Hide the gap and the shifted tail; a panicking Default then leaks the tail
        // instead of letting Drop walk uninitialized slots.
        self.len = index;
        // SAFETY: index <= old_len and capacity covers old_len + n.
        unsafe {
            let base = self.base_mut();
            ptr::copy(base.add(index), base.add(index + n), old_len - index);
            for i in 0..n {
                base.add(index + i).write(MaybeUninit::new(T::default()));
            }
        }
        self.len = old_len + n;
        // SAFETY: the gap was filled in the loop above.
        Ok(unsafe { slice::from_raw_parts_mut(self.base_mut().add(index).cast(), n) })
    }

    /// Inserts clones of every element in `src` at `index`, shifting the tail right.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Errors
    /// On allocation failure the length and contents are unchanged.
    pub fn insert_slice(&mut self, index: usize, src: &[T]) -> Result<(), OomError>
    where
        T: Clone,
    {
        self.check_insert_index(index);
        let n = src.len();
        self.grow_for(n)?;
        let old_len = self.len;
        // Same unwind strategy as insert_defaulted: better to leak than to drop
        // through an uninitialized gap.
        self.len = index;
        // SAFETY: index <= old_len and capacity covers old_len + n.
        unsafe {
            let base = self.base_mut();
            ptr::copy(base.add(index), base.add(index + n), old_len - index);
            for (i, value) in src.iter().enumerate() {
                base.add(index + i).write(MaybeUninit::new(value.clone()));
            }
        }
        self.len = old_len + n;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting everything after it one
    /// slot to the left. Preserves the relative order of the remaining elements; see
    /// [`swap_remove`](DynArray::swap_remove) when order doesn't matter.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index);
        // SAFETY: index < len, so the slot is initialized and the shifted source range
        // ends at the old len.
        unsafe {
            let base = self.base_mut();
            let value = base.add(index).read().assume_init();
            ptr::copy(base.add(index + 1), base.add(index), self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Removes `n` contiguous elements starting at `index`, dropping them and shifting
    /// the tail left. Preserves the relative order of the remaining elements.
    ///
    /// # Panics
    /// Panics if `index + n > len`.
    pub fn remove_n(&mut self, index: usize, n: usize) {
        self.check_range(index, n);
        let old_len = self.len;
        // Hide the affected region while dropping, in case an element Drop panics.
        self.len = index;
        // SAFETY: the n slots from index are initialized, and the shifted source range
        // ends at the old len.
        unsafe {
            let base = self.base_mut();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(index).cast::<T>(), n));
            ptr::copy(base.add(index + n), base.add(index), old_len - index - n);
        }
        self.len = old_len - n;
    }

    /// Removes and returns the element at `index` by moving the last element into its
    /// slot. `O(1)`, but the relative order of the remaining elements is not preserved.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.check_index(index);
        // SAFETY: index < len so the slot is initialized; after the decrement, len is
        // the old last slot, also initialized.
        unsafe {
            let base = self.base_mut();
            let value = base.add(index).read().assume_init();
            self.len -= 1;
            if index != self.len {
                base.add(index).write(base.add(self.len).read());
            }
            value
        }
    }

    /// Removes `n` contiguous elements starting at `index` by relocating elements from
    /// the tail of the array into the freed slots, instead of shifting the whole
    /// remainder left. When fewer than `n` elements follow the removed range, only the
    /// existing tail moves.
    ///
    /// The slots between the new length and the old one are left bitwise untouched
    /// rather than zeroed; they are unreachable through the safe API.
    ///
    /// # Panics
    /// Panics if `index + n > len`.
    pub fn swap_remove_n(&mut self, index: usize, n: usize) {
        self.check_range(index, n);
        let old_len = self.len;
        let end = index + n;
        self.len = index;
        // SAFETY: the removed slots are initialized; the relocation source starts at
        // or after end, so it never reads a dropped slot, and ptr::copy tolerates the
        // possible overlap with the destination.
        unsafe {
            let base = self.base_mut();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(index).cast::<T>(), n));
            let moved = cmp::min(n, old_len - end);
            ptr::copy(base.add(old_len - moved), base.add(index), moved);
        }
        self.len = old_len - n;
    }

    /// Replaces the element at `index`, returning the old value. Never grows the
    /// array.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.check_index(index);
        // SAFETY: index < len, so the slot holds an initialized value.
        unsafe { mem::replace(&mut *self.base_mut().add(index).cast::<T>(), new_value) }
    }

    /// Overwrites `src.len()` elements starting at `index` with clones from `src`.
    /// Never grows the array.
    ///
    /// # Panics
    /// Panics if `index + src.len() > len`.
    pub fn set_slice(&mut self, index: usize, src: &[T])
    where
        T: Clone,
    {
        self.check_range(index, src.len());
        let end = index + src.len();
        for (slot, value) in self[index..end].iter_mut().zip(src) {
            slot.clone_from(value);
        }
    }

    /// Removes and returns the last element, or [`None`] if the array is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: the slot at the new len was the initialized last element; the
            // bitwise read moves it out and the array forgets it.
            Some(unsafe { self.base().add(self.len).read().assume_init() })
        }
    }

    /// Drops every element. Capacity and backing storage are retained, which
    /// distinguishes this from [`reset`](DynArray::reset).
    pub fn clear(&mut self) {
        let len = self.len;
        // Zero the length first so a panicking element Drop can't expose
        // half-dropped contents.
        self.len = 0;
        // SAFETY: the first len slots were initialized.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.base_mut().cast::<T>(),
                len,
            ));
        }
    }

    /// Drops every element, releases an owned allocation (or detaches borrowed
    /// storage) and clears the out-of-memory flag, returning the handle to the state
    /// produced by [`new`](DynArray::new).
    ///
    /// # Examples
    /// ```
    /// # use dropkit::collections::contiguous::DynArray;
    /// let mut arr = DynArray::new();
    /// arr.extend_from_slice(&[1, 2, 3])?;
    /// arr.reset();
    /// assert_eq!((arr.len(), arr.cap(), arr.is_oom()), (0, 0, false));
    /// # Ok::<(), dropkit::collections::contiguous::OomError>(())
    /// ```
    pub fn reset(&mut self) {
        self.clear();
        self.store = Store::Owned(RawBuf::empty());
        self.oom = false;
    }

    /// Shortens the array to `new_len` elements, dropping the tail. Does nothing when
    /// `new_len >= len`. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = self.len - new_len;
        self.len = new_len;
        // SAFETY: the tail slots sat below the old len and were initialized.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.base_mut().add(new_len).cast::<T>(),
                tail,
            ));
        }
    }

    /// Sets the length directly, growing capacity as required. New slots are not
    /// initialized. Shrinking this way forgets elements without dropping them; use
    /// [`truncate`](DynArray::truncate) to drop.
    ///
    /// # Safety
    /// Any slot between the old and new length must be initialized before the array is
    /// next read, iterated or dropped. Slots that were initialized at some earlier
    /// point and never invalidated still count.
    ///
    /// # Errors
    /// On allocation failure the length and contents are unchanged.
    pub unsafe fn set_len(&mut self, new_len: usize) -> Result<(), OomError> {
        self.reserve(new_len)?;
        self.len = new_len;
        Ok(())
    }

    /// Reallocates so that capacity exactly equals length (freeing the allocation
    /// entirely when empty). An array still on borrowed storage moves to an owned
    /// allocation of exactly the right size.
    ///
    /// # Errors
    /// On allocation failure the capacity and contents are unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<(), OomError> {
        if self.oom {
            return Err(OomError);
        }
        if self.cap() == self.len {
            return Ok(());
        }

        let len = self.len;
        let outcome = if let Store::Owned(buf) = &mut self.store {
            buf.try_realloc(len)
        } else {
            self.switch_to_owned(len)
        };

        if outcome.is_err() {
            self.oom = true;
        }
        outcome
    }
}

impl<T> Default for DynArray<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynArray<'_, T> {
    fn drop(&mut self) {
        self.clear();
        // The store releases owned memory itself; borrowed storage is just a borrow.
    }
}

impl<T> Deref for DynArray<'_, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: the first len slots are initialized, contiguous and properly
        // aligned, and MaybeUninit<T> has the same layout as T. The borrow checker
        // prevents mutation for the lifetime of the slice.
        unsafe { slice::from_raw_parts(self.base().cast(), self.len) }
    }
}

impl<T> DerefMut for DynArray<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        let len = self.len;
        // SAFETY: as for Deref; the mutable borrow of self makes the slice unique.
        unsafe { slice::from_raw_parts_mut(self.base_mut().cast(), len) }
    }
}

impl<T> AsRef<[T]> for DynArray<'_, T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for DynArray<'_, T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for DynArray<'_, T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for DynArray<'_, T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

// SAFETY: the backing storage is uniquely owned or uniquely borrowed, so sending the
// handle sends the elements with it.
unsafe impl<T: Send> Send for DynArray<'_, T> {}
// SAFETY: the safe API obeys the borrow checker and performs no interior mutability.
unsafe impl<T: Sync> Sync for DynArray<'_, T> {}

impl<T> Extend<T> for DynArray<'_, T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            // Consistent with the sticky flag: once growth has failed, the rest of
            // the items are discarded rather than partially applied.
            if self.push(item).is_err() {
                break;
            }
        }
    }
}

impl<T> FromIterator<T> for DynArray<'_, T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let mut arr = DynArray::new();
        arr.extend(value);
        arr
    }
}

impl<T: Clone> Clone for DynArray<'_, T> {
    /// Clones into an owned array, regardless of how self is backed.
    fn clone(&self) -> Self {
        let mut arr = DynArray::new();
        // Consistent with the sticky flag: an allocation failure leaves the clone
        // truncated and flagged out-of-memory rather than aborting.
        let _ = arr.extend_from_slice(self);
        arr
    }
}

impl<T: PartialEq> PartialEq for DynArray<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for DynArray<'_, T> {}

impl<T: Hash> Hash for DynArray<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for DynArray<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .field("oom", &self.oom)
            .finish()
    }
}

impl<T: Debug> Display for DynArray<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
