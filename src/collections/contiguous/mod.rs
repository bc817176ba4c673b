//! Contiguous collections, currently just [`DynArray`] and its associated types.
//!
//! [`IterMut`](std::slice::IterMut) and [`Iter`](std::slice::Iter) from [`std::slice`] are used
//! for borrowed iteration.

mod error;
mod raw_buf;

pub mod dyn_array;

pub use dyn_array::*;
pub use error::*;
pub(crate) use raw_buf::*;
