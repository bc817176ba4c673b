use std::ffi::CString;

use libc::{
    EACCES, EFAULT, EINTR, ELOOP, EMFILE, ENAMETOOLONG, ENFILE, ENOENT, ENOMEM, ENOTDIR,
    O_CLOEXEC, O_RDONLY,
};

use crate::fs::error::{
    AccessError, CloseError, ExcessiveLinksError, FileCountError, InterruptError,
    InvalidPathError, MissingComponentError, NonDirComponentError, OomError, OpenFileError,
    PathLengthError,
};
use crate::fs::panic::{BadAddrPanic, Panic, UnexpectedErrorPanic};
use crate::fs::{Fd, PATH_MAX};

/// An open file, held only for the descriptor itself. This crate does no content I/O;
/// the type exists to pair `open(2)` with a close that can't be called twice.
#[derive(Debug)]
pub struct File {
    fd: Fd,
}

impl File {
    /// Opens the file at `file_path` read-only.
    ///
    /// # Errors
    /// Fails for paths that are over-long, contain a nul byte, or can't be resolved,
    /// and for the process-level descriptor and memory limits.
    pub fn open(file_path: &str) -> Result<File, OpenFileError> {
        if file_path.len() > PATH_MAX - 2 {
            Err(PathLengthError)?;
        }
        let pathname = CString::new(file_path).map_err(|_| InvalidPathError)?;

        match Fd::open(&pathname, O_RDONLY | O_CLOEXEC) {
            Ok(fd) => Ok(File { fd }),
            Err(e) => match e {
                EACCES => Err(AccessError)?,
                EINTR => Err(InterruptError)?,
                ELOOP => Err(ExcessiveLinksError)?,
                EMFILE | ENFILE => Err(FileCountError)?,
                ENAMETOOLONG => Err(PathLengthError)?,
                ENOENT => Err(MissingComponentError)?,
                ENOTDIR => Err(NonDirComponentError)?,
                ENOMEM => Err(OomError)?,
                EFAULT => BadAddrPanic.panic(),
                e => UnexpectedErrorPanic(e).panic(),
            },
        }
    }

    /// Closes the file. Taking ownership makes closing twice unrepresentable; dropping
    /// without calling this closes too, but loses the error.
    pub fn close(self) -> Result<(), CloseError> {
        self.fd.close()
    }
}
