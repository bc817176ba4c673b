use std::ptr;
use std::slice;

use super::DynArray;

/// An owned iterator over the elements of a [`DynArray`]. Elements are moved out one
/// at a time; whatever is left when the iterator is dropped gets dropped in place.
pub struct IntoIter<'a, T> {
    arr: DynArray<'a, T>,
    front: usize,
}

impl<T> Iterator for IntoIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.arr.len {
            // SAFETY: front is below len, so the slot is initialized. Advancing front
            // marks the value as moved out so no other path drops it.
            let value = unsafe { self.arr.base().add(self.front).read().assume_init() };
            self.front += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.arr.len - self.front;
        (left, Some(left))
    }
}

impl<T> DoubleEndedIterator for IntoIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.arr.len {
            self.arr.len -= 1;
            // SAFETY: the slot at the decremented len was the initialized last
            // remaining element; shrinking len marks it as moved out.
            Some(unsafe { self.arr.base().add(self.arr.len).read().assume_init() })
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<'_, T> {}

impl<T> Drop for IntoIter<'_, T> {
    fn drop(&mut self) {
        let front = self.front;
        let left = self.arr.len - front;
        // The array's own Drop would walk from 0 and double-drop the consumed front.
        self.arr.len = 0;
        // SAFETY: the slots from front to the old len still hold the unconsumed
        // elements.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.arr.base_mut().add(front).cast::<T>(),
                left,
            ));
        }
    }
}

impl<'a, T> IntoIterator for DynArray<'a, T> {
    type Item = T;

    type IntoIter = IntoIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            arr: self,
            front: 0,
        }
    }
}

impl<'b, T> IntoIterator for &'b DynArray<'_, T> {
    type Item = &'b T;

    type IntoIter = slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'b, T> IntoIterator for &'b mut DynArray<'_, T> {
    type Item = &'b mut T;

    type IntoIter = slice::IterMut<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
