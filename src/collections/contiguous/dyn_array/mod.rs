//! A module containing [`DynArray`] and associated types.
//!
//! [`DynArray`] is also re-exported under the parent module.

mod dyn_array;
mod iter;
mod tests;

pub use dyn_array::*;
pub use iter::*;
