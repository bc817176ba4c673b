use derive_more::{Display, Error};

/// Reported when a collection needs to grow its backing storage and the allocator
/// cannot provide the memory (or the requested layout is impossibly large).
///
/// Unlike [`Vec`], which aborts the process, this error is recoverable: the collection
/// that produced it is still valid and readable, it just refuses further growth. See
/// [`DynArray::is_oom`](super::DynArray::is_oom).
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("out of memory")]
pub struct OomError;
