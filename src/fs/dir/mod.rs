//! Typed directory iteration, primarily the [`Directory`] and [`DirEntry`] types.
//!
//! # Opening
//! With few options relevant while opening, [`Directory::open`] takes the path and the
//! [`EntryType`](super::EntryType) filter directly rather than going through a builder.

mod dir;
mod dir_entry;
mod tests;

pub use dir::*;
pub use dir_entry::*;
