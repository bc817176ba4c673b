#![cfg(test)]

use std::mem::MaybeUninit;

use super::*;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_new_is_zero() {
    let arr: DynArray<u64> = DynArray::new();
    assert_eq!(arr.len(), 0, "A new array should be empty.");
    assert_eq!(arr.cap(), 0, "A new array shouldn't have allocated.");
    assert!(arr.is_empty());
    assert!(!arr.is_borrowed());
    assert!(!arr.is_oom());
    assert_eq!(&*arr, &[] as &[u64], "Should deref to an empty slice.");
}

#[test]
fn test_push_growth_policy() {
    let mut arr = DynArray::new();
    for i in 0..8 {
        arr.push(i).unwrap();
    }
    assert_eq!(
        arr.cap(),
        8,
        "First allocation should be the minimum capacity."
    );

    arr.push(8).unwrap();
    assert_eq!(arr.cap(), 16, "Growth should double the capacity.");
    assert_eq!(arr.len(), 9);
    assert_eq!(&*arr, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_reserve_exact() {
    let mut arr: DynArray<i32> = DynArray::new();
    arr.reserve(51).unwrap();
    assert_eq!(
        arr.cap(),
        51,
        "An explicit reservation above the policy minimum should be taken exactly."
    );
    assert_eq!(arr.len(), 0, "Reserving shouldn't change the length.");

    arr.reserve(10).unwrap();
    assert_eq!(arr.cap(), 51, "Reserving less than cap should be a no-op.");
}

#[test]
fn test_add_uninit_then_insert() {
    let mut arr = DynArray::new();
    arr.push(42).unwrap();

    let slots = unsafe { arr.add_uninit(3) }.unwrap();
    for (i, slot) in slots.iter_mut().enumerate() {
        slot.write(5 + i as i32);
    }
    assert_eq!(arr.len(), 4);
    assert_eq!(&*arr, &[42, 5, 6, 7]);

    arr.insert(1, 5).unwrap();
    assert_eq!(&*arr, &[42, 5, 5, 6, 7]);
}

#[test]
fn test_add_defaulted() {
    let mut arr = DynArray::new();
    arr.push(9).unwrap();
    let added = arr.add_defaulted(3).unwrap();
    assert_eq!(added, &[0, 0, 0], "New elements should be default-valued.");
    assert_eq!(&*arr, &[9, 0, 0, 0]);
}

#[test]
fn test_external_buffer_switchover() {
    let mut buf = [MaybeUninit::<i32>::uninit(); 5];
    let mut arr = DynArray::with_external(&mut buf);
    assert_eq!(arr.cap(), 5);
    assert!(arr.is_borrowed());

    for i in 0..5 {
        arr.push(i).unwrap();
    }
    assert!(
        arr.is_borrowed(),
        "Shouldn't allocate while the borrowed buffer still fits."
    );

    arr.push(5).unwrap();
    assert!(!arr.is_borrowed(), "Outgrowing the buffer should move to the heap.");
    assert_eq!(
        arr.cap(),
        10,
        "The switchover should follow the doubling policy."
    );
    assert_eq!(
        &*arr,
        &[0, 1, 2, 3, 4, 5],
        "Element order should survive the switchover."
    );
}

#[test]
fn test_insert_variants() {
    let mut arr: DynArray<i32> = (0..5).collect();

    arr.insert_slice(2, &[100, 101]).unwrap();
    assert_eq!(&*arr, &[0, 1, 100, 101, 2, 3, 4]);

    let gap = arr.insert_defaulted(0, 2).unwrap();
    assert_eq!(gap, &[0, 0]);
    assert_eq!(&*arr, &[0, 0, 0, 1, 100, 101, 2, 3, 4]);

    let slots = unsafe { arr.insert_uninit(9, 1) }.unwrap();
    slots[0].write(7);
    assert_eq!(&*arr, &[0, 0, 0, 1, 100, 101, 2, 3, 4, 7]);
}

#[test]
fn test_remove_preserves_order() {
    let mut arr: DynArray<i32> = (0..6).collect();
    assert_eq!(arr.remove(2), 2);
    assert_eq!(&*arr, &[0, 1, 3, 4, 5]);

    arr.remove_n(1, 2);
    assert_eq!(&*arr, &[0, 4, 5]);
}

#[test]
fn test_swap_remove() {
    let mut arr: DynArray<i32> = (0..6).collect();
    assert_eq!(arr.swap_remove(1), 1);
    assert_eq!(
        &*arr,
        &[0, 5, 2, 3, 4],
        "The last element should be moved into the hole."
    );

    assert_eq!(arr.swap_remove(4), 4, "Removing the last element is a plain pop.");
    assert_eq!(arr.len(), 4);
}

#[test]
fn test_swap_remove_n_multiset() {
    let mut arr: DynArray<i32> = (0..6).collect();
    arr.swap_remove_n(1, 2);
    assert_eq!(arr.len(), 4);

    let mut remaining: Vec<i32> = arr.iter().copied().collect();
    remaining.sort_unstable();
    assert_eq!(
        remaining,
        vec![0, 3, 4, 5],
        "The elements outside the removed range should all survive."
    );
}

#[test]
fn test_swap_remove_n_short_tail() {
    let mut arr: DynArray<i32> = (0..8).collect();
    // Only one element follows the removed range, so only one moves.
    arr.swap_remove_n(4, 3);
    assert_eq!(&*arr, &[0, 1, 2, 3, 7]);
}

#[test]
fn test_replace_and_set_slice() {
    let mut arr: DynArray<i32> = (0..5).collect();
    assert_eq!(arr.replace(2, 100), 2);
    assert_eq!(&*arr, &[0, 1, 100, 3, 4]);

    arr.set_slice(3, &[8, 9]);
    assert_eq!(&*arr, &[0, 1, 100, 8, 9]);
    assert_eq!(arr.len(), 5, "Overwriting shouldn't change the length.");
}

#[test]
fn test_pop() {
    let mut arr: DynArray<i32> = (0..3).collect();
    assert_eq!(arr.pop(), Some(2));
    assert_eq!(arr.pop(), Some(1));
    assert_eq!(arr.pop(), Some(0));
    assert_eq!(arr.pop(), None, "Popping an empty array should yield None.");
}

#[test]
fn test_clear_keeps_capacity() {
    let mut arr: DynArray<i32> = (0..10).collect();
    let cap = arr.cap();
    arr.clear();
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.cap(), cap, "Clearing should retain the allocation.");
}

#[test]
fn test_reset() {
    let mut buf = [MaybeUninit::<i32>::uninit(); 2];
    let mut arr = DynArray::with_external(&mut buf);
    arr.extend_from_slice(&[1, 2, 3]).unwrap();
    assert!(!arr.is_borrowed());

    arr.reset();
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.cap(), 0, "Resetting should release the allocation.");
    assert!(!arr.is_oom());
    assert!(!arr.is_borrowed());
}

#[test]
fn test_truncate() {
    let counter = CountedDrop::new();
    let mut arr: DynArray<CountedDrop> = (0..5).map(|_| counter.clone()).collect();

    arr.truncate(7);
    assert_eq!(arr.len(), 5, "Truncating above the length should do nothing.");

    arr.truncate(2);
    assert_eq!(arr.len(), 2);
    assert_eq!(counter.count(), 3, "The truncated tail should be dropped.");
}

#[test]
fn test_set_len_revives_old_contents() {
    let mut arr: DynArray<i32> = (0..3).collect();
    unsafe {
        arr.set_len(1).unwrap();
        assert_eq!(&*arr, &[0]);
        // The forgotten slots were never invalidated, so growing back is sound.
        arr.set_len(3).unwrap();
    }
    assert_eq!(&*arr, &[0, 1, 2]);
}

#[test]
fn test_shrink_to_fit() {
    let mut arr: DynArray<i32> = (0..3).collect();
    assert_eq!(arr.cap(), 8);
    arr.shrink_to_fit().unwrap();
    assert_eq!(arr.cap(), 3, "Shrinking should make capacity exactly the length.");
    assert_eq!(&*arr, &[0, 1, 2]);

    arr.clear();
    arr.shrink_to_fit().unwrap();
    assert_eq!(arr.cap(), 0, "Shrinking an empty array should free entirely.");
}

#[test]
fn test_oom_is_sticky_and_recoverable() {
    let mut arr: DynArray<i32> = (0..3).collect();
    assert!(
        arr.reserve(usize::MAX / 4).is_err(),
        "An impossibly large reservation should fail rather than abort."
    );
    assert!(arr.is_oom());
    assert_eq!(&*arr, &[0, 1, 2], "A failed grow should leave the contents alone.");

    assert!(
        arr.push(3).is_err(),
        "Growth should keep failing while the flag is set."
    );
    assert_eq!(arr.pop(), Some(2), "Non-growing operations should still work.");
    assert_eq!(arr.replace(0, 10), 0);

    arr.reset();
    assert!(!arr.is_oom());
    arr.push(1).unwrap();
    assert_eq!(&*arr, &[1]);
}

#[test]
fn test_drop_counting() {
    let counter = CountedDrop::new();
    let mut arr: DynArray<CountedDrop> = (0..4).map(|_| counter.clone()).collect();

    drop(arr.remove(0));
    assert_eq!(counter.count(), 1);

    arr.clear();
    assert_eq!(counter.count(), 4, "Clearing should drop every element once.");
}

#[test]
fn test_into_iter() {
    let arr: DynArray<i32> = (0..5).collect();
    let collected: Vec<i32> = arr.into_iter().collect();
    assert_eq!(collected, vec![0, 1, 2, 3, 4]);

    let arr: DynArray<i32> = (0..5).collect();
    let reversed: Vec<i32> = arr.into_iter().rev().collect();
    assert_eq!(reversed, vec![4, 3, 2, 1, 0]);
}

#[test]
fn test_into_iter_partial_drop() {
    let counter = CountedDrop::new();
    let arr: DynArray<CountedDrop> = (0..4).map(|_| counter.clone()).collect();

    let mut iter = arr.into_iter();
    iter.next();
    iter.next_back();
    assert_eq!(counter.count(), 2, "Consumed elements drop as they're discarded.");

    drop(iter);
    assert_eq!(
        counter.count(),
        4,
        "Dropping the iterator should drop exactly the unconsumed elements."
    );
}

#[test]
fn test_zst_support() {
    let mut arr = DynArray::new();
    for _ in 0..100 {
        arr.push(ZeroSizedType).unwrap();
    }
    assert_eq!(arr.len(), 100);
    assert_eq!(arr[99], ZeroSizedType);
    assert_eq!(arr.pop(), Some(ZeroSizedType));
    arr.shrink_to_fit().unwrap();
    assert_eq!(arr.cap(), 99);
}

#[test]
fn test_slice_access() {
    let mut arr: DynArray<i32> = [3, 1, 4, 1, 5, 9, 2, 6].into_iter().collect();
    assert_eq!(arr[2], 4, "Indexing should work through the slice deref.");
    assert_eq!(arr.first(), Some(&3));
    assert_eq!(arr.last(), Some(&6));

    arr.sort_unstable();
    assert_eq!(&*arr, &[1, 1, 2, 3, 4, 5, 6, 9]);
    assert_eq!(arr.binary_search(&5), Ok(5));

    for value in &mut arr {
        *value += 1;
    }
    assert_eq!(arr.iter().sum::<i32>(), 39);
}

#[test]
fn test_clone_and_eq() {
    let mut buf = [MaybeUninit::<i32>::uninit(); 4];
    let mut arr = DynArray::with_external(&mut buf);
    arr.extend_from_slice(&[1, 2, 3]).unwrap();

    let cloned = arr.clone();
    assert_eq!(arr, cloned);
    assert!(
        !cloned.is_borrowed(),
        "A clone should own its storage regardless of the source."
    );
}

#[test]
fn test_display() {
    let arr: DynArray<i32> = (0..3).collect();
    assert_eq!(arr.to_string(), "[0, 1, 2]");
}

#[test]
fn test_out_of_bounds_panics() {
    assert_panics!(
        {
            let arr: DynArray<i32> = (0..3).collect();
            arr[10]
        },
        "Indexing past the length should panic."
    );

    assert_panics!(
        {
            let mut arr: DynArray<i32> = (0..3).collect();
            arr.replace(3, 0)
        },
        "Replacing at the length should panic."
    );

    assert_panics!(
        {
            let mut arr: DynArray<i32> = (0..3).collect();
            let _ = arr.insert(4, 0);
        },
        "Inserting past the length should panic."
    );

    assert_panics!(
        {
            let mut arr: DynArray<i32> = (0..3).collect();
            arr.remove_n(2, 2)
        },
        "Removing a range past the length should panic."
    );

    assert_panics!(
        {
            let mut arr: DynArray<i32> = (0..3).collect();
            arr.swap_remove_n(1, usize::MAX)
        },
        "A range whose end overflows should panic."
    );
}
