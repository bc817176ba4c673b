//! A small grab-bag of drop-in utilities: a growable array with explicit control over
//! its backing storage, and a directory iterator that hides the platform's enumeration
//! API behind a single cursor type.
//!
//! # Purpose
//! These two pieces started life as standalone snippets that kept getting copied
//! between projects, so they now live together in one crate. They don't share any
//! runtime or data model - each module stands on its own and can be compiled out via
//! cargo features.
//!
//! # Out-of-Memory Handling
//! Unlike [`Vec`], [`DynArray`](collections::contiguous::DynArray) never aborts on
//! allocation failure. A failed growth sets a sticky out-of-memory flag on the handle
//! and surfaces as an [`OomError`](collections::contiguous::OomError); the elements
//! that were already stored stay intact and readable. This makes the container usable
//! in code that has to degrade gracefully rather than die.
//!
//! # Error Handling
//! When this crate employs errors via [`Result`]s, it does so in a method that is
//! strongly typed, using enums for static dispatch rather than dynamic, with structs
//! (often ZSTs) that implement [`Error`](std::error::Error). OS error codes that can
//! only indicate corruption or misuse of the library panic instead of returning.
//!
//! # Dependencies
//! The [`fs`] module relies on `libc` for its thin syscall wrappers and `bitflags` for
//! the entry-type filter mask. Error types lean on a couple of derive macros because
//! they remove the need for some very repetitive programming. Nothing here uses [`Vec`]
//! for its own storage.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;
#[cfg(feature = "fs")]
pub mod fs;

pub(crate) mod util;
