use crate::fs::EntryType;

/// A single entry yielded by [`Directory`](super::Directory). Owns its name, so it
/// outlives the iteration that produced it.
///
/// Names that aren't valid UTF-8 (possible but rare on POSIX systems) come through
/// lossily, with invalid sequences replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub entry_type: EntryType,
}
