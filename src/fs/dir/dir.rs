use std::ffi::{CStr, CString};
use std::fmt::{self, Debug, Formatter};
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;
use std::thread;

use libc::{DIR, DT_UNKNOWN, EBADF, EINTR, EIO, c_int, stat as Stat};

use crate::fs::dir::DirEntry;
use crate::fs::error::{CloseError, IOError, InterruptError, OpenDirError};
use crate::fs::panic::{BadFdPanic, Panic, UnexpectedErrorPanic};
use crate::fs::syscall::err_no;
use crate::fs::{EntryType, PATH_MAX};

/// An open directory stream yielding its entries filtered by [`EntryType`].
///
/// `.` and `..` are never yielded. Entry kinds come from the `d_type` the file system
/// reports; where that is unavailable the entry is `stat`ed instead, and entries whose
/// kind can't be determined at all are treated as [`EntryType::UNKNOWN`] and filtered
/// out.
///
/// The stream is closed on drop; [`close`](Directory::close) does the same but
/// surfaces the error.
///
/// # Examples
/// ```no_run
/// # use dropkit::fs::{Directory, EntryType};
/// for entry in Directory::open("/etc", EntryType::REGULAR_FILE)? {
///     println!("{}", entry.name);
/// }
/// # Ok::<(), dropkit::fs::OpenDirError>(())
/// ```
pub struct Directory {
    dirp: NonNull<DIR>,
    /// Descriptor backing the stream, borrowed from it for `fstatat`. Owned and closed
    /// by `dirp`, never separately.
    dir_fd: c_int,
    base: CString,
    accepted: EntryType,
}

impl Directory {
    /// Opens the directory at `dir_path` for iteration, yielding only entries whose
    /// kind intersects `accepted`. An empty filter means no entry could ever match, so
    /// it is taken as [`EntryType::ALL`].
    ///
    /// # Errors
    /// Fails for over-long or nul-containing paths and for anything `opendir(3)`
    /// rejects, all as the uniform [`OpenDirError`].
    pub fn open(dir_path: &str, accepted: EntryType) -> Result<Directory, OpenDirError> {
        if dir_path.len() > PATH_MAX - 2 {
            return Err(OpenDirError);
        }
        let base = CString::new(dir_path).map_err(|_| OpenDirError)?;

        // SAFETY: base is nul-terminated for the lifetime of the call.
        let dirp = NonNull::new(unsafe { libc::opendir(base.as_ptr()) }).ok_or(OpenDirError)?;

        // SAFETY: dirp is a live stream from opendir.
        let dir_fd = unsafe { libc::dirfd(dirp.as_ptr()) };
        if dir_fd == -1 {
            UnexpectedErrorPanic(err_no()).panic()
        }

        Ok(Directory {
            dirp,
            dir_fd,
            base,
            accepted: if accepted.is_empty() {
                EntryType::ALL
            } else {
                accepted
            },
        })
    }

    /// Returns the next entry passing the filter, or [`None`] once the directory is
    /// exhausted. Entries added or removed while iterating may or may not be seen,
    /// which is `readdir(3)`'s contract.
    pub fn next_entry(&mut self) -> Option<DirEntry> {
        loop {
            // SAFETY: the stream is live until drop, and &mut self serializes access
            // to readdir's stream-local state.
            let raw = unsafe { libc::readdir(self.dirp.as_ptr()) };
            // Exhaustion and stream failure both end iteration; per-entry trouble
            // shouldn't abort a listing that is otherwise fine.
            let raw = NonNull::new(raw)?;

            // SAFETY: a non-null readdir result points at a valid dirent whose d_name
            // is nul-terminated. The referenced memory is only valid until the next
            // readdir call, so everything is copied out below.
            let (d_type, name) = unsafe {
                let ent = raw.as_ref();
                (ent.d_type, CStr::from_ptr(ent.d_name.as_ptr()))
            };

            if name.to_bytes() == b"." || name.to_bytes() == b".." {
                continue;
            }

            let entry_type = if d_type == DT_UNKNOWN {
                self.stat_entry(name)
            } else {
                EntryType::from_dirent_type(d_type)
            };

            if self.accepted.intersects(entry_type) {
                return Some(DirEntry {
                    name: String::from_utf8_lossy(name.to_bytes()).into_owned(),
                    entry_type,
                });
            }
        }
    }

    /// Determines an entry's kind the slow way, for file systems that don't fill in
    /// `d_type`. Tries `fstatat` relative to the stream's own descriptor first, then a
    /// full-path `stat`.
    fn stat_entry(&self, name: &CStr) -> EntryType {
        let mut raw_stat: MaybeUninit<Stat> = MaybeUninit::uninit();

        // SAFETY: name is nul-terminated and raw_stat provides the output space.
        if unsafe { libc::fstatat(self.dir_fd, name.as_ptr(), raw_stat.as_mut_ptr(), 0) } == 0 {
            // SAFETY: fstatat succeeded, so raw_stat is initialized.
            return EntryType::from_mode(unsafe { raw_stat.assume_init() }.st_mode);
        }

        let base = self.base.to_bytes();
        if base.len() + 1 + name.to_bytes().len() + 1 > PATH_MAX {
            return EntryType::UNKNOWN;
        }
        let mut joined = Vec::with_capacity(base.len() + 1 + name.to_bytes().len());
        joined.extend_from_slice(base);
        joined.push(b'/');
        joined.extend_from_slice(name.to_bytes());
        // Neither half contains a nul byte, so the conversion can't fail.
        let Ok(path) = CString::new(joined) else {
            return EntryType::UNKNOWN;
        };

        // SAFETY: path is nul-terminated and raw_stat provides the output space.
        if unsafe { libc::stat(path.as_ptr(), raw_stat.as_mut_ptr()) } == 0 {
            // SAFETY: stat succeeded, so raw_stat is initialized.
            EntryType::from_mode(unsafe { raw_stat.assume_init() }.st_mode)
        } else {
            EntryType::UNKNOWN
        }
    }

    /// Closes the stream. Taking ownership makes closing twice unrepresentable;
    /// dropping without calling this closes too, but loses the error.
    pub fn close(self) -> Result<(), CloseError> {
        let dirp = self.dirp;
        // closedir invalidates the stream regardless of the outcome, so Drop must not
        // run and close it a second time.
        mem::forget(self);
        // SAFETY: the stream was live until this call.
        if unsafe { libc::closedir(dirp.as_ptr()) } == -1 {
            match err_no() {
                EBADF => BadFdPanic.panic(),
                EINTR => Err(InterruptError)?,
                EIO => Err(IOError)?,
                e => UnexpectedErrorPanic(e).panic(),
            }
        }
        Ok(())
    }
}

impl Iterator for Directory {
    type Item = DirEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }
}

impl Drop for Directory {
    fn drop(&mut self) {
        // SAFETY: the stream is still owned here and is invalidated with self.
        if unsafe { libc::closedir(self.dirp.as_ptr()) } == -1
            // Panic only if we aren't already, to prevent aborting an existing unwind.
            && !thread::panicking()
        {
            panic!("error while dropping directory stream: {}", match err_no() {
                EBADF => BadFdPanic.to_string(),
                EINTR => InterruptError.to_string(),
                EIO => IOError.to_string(),
                e => UnexpectedErrorPanic(e).to_string(),
            });
        }
    }
}

impl Debug for Directory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directory")
            .field("path", &self.base)
            .field("fd", &self.dir_fd)
            .field("accepted", &self.accepted)
            .finish()
    }
}
