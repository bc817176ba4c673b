//! Collection types with explicit storage and failure semantics.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! provides the whole read-only slice API (indexing, iteration, sorting, searching) without
//! repeating it on each type.

pub mod contiguous;
