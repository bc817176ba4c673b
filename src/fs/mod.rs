#![cfg(target_os = "linux")]

//! Thin ownership-based wrappers over the POSIX file system calls, centered on typed
//! directory iteration.
//!
//! The main entry point is [`Directory`], which walks the entries of a directory while
//! classifying and filtering them by [`EntryType`]. [`File`] and [`set_current_dir`]
//! cover the neighbouring `open(2)`/`close(2)`/`chdir(2)` calls with the same error
//! treatment.
//!
//! # Errors and panics
//! Every fallible operation returns an enum over zero-sized cause structs, one variant
//! per errno the call can legitimately produce. Errnos that indicate corruption on our
//! side of the syscall boundary (a bad descriptor, a wild pointer) panic instead of
//! returning, since no caller can meaningfully handle them.

pub mod dir;

mod cwd;
mod entry_type;
mod error;
mod fd;
mod file;
mod panic;
mod syscall;

pub use cwd::*;
pub use dir::*;
pub use entry_type::*;
pub use error::*;
pub use file::*;
pub(crate) use fd::*;
pub(crate) use syscall::*;

/// Maximum accepted path length in bytes, including the nul terminator.
pub const PATH_MAX: usize = 4096;
