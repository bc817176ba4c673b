use std::ffi::CString;

use libc::{EACCES, EFAULT, ELOOP, ENAMETOOLONG, ENOENT, ENOMEM, ENOTDIR};

use crate::fs::error::{
    ChdirError, ExcessiveLinksError, InvalidPathError, MissingComponentError, NoSearchError,
    NonDirComponentError, OomError, PathLengthError,
};
use crate::fs::panic::{BadAddrPanic, Panic, UnexpectedErrorPanic};
use crate::fs::syscall::err_no;
use crate::fs::PATH_MAX;

/// Changes the process working directory via `chdir(2)`. Process-global, like the
/// syscall itself.
pub fn set_current_dir(dir_path: &str) -> Result<(), ChdirError> {
    if dir_path.len() > PATH_MAX - 2 {
        Err(PathLengthError)?;
    }
    let pathname = CString::new(dir_path).map_err(|_| InvalidPathError)?;

    // SAFETY: pathname is nul-terminated for the lifetime of the call.
    if unsafe { libc::chdir(pathname.as_ptr()) } == -1 {
        match err_no() {
            EACCES => Err(NoSearchError)?,
            ELOOP => Err(ExcessiveLinksError)?,
            ENAMETOOLONG => Err(PathLengthError)?,
            ENOENT => Err(MissingComponentError)?,
            ENOTDIR => Err(NonDirComponentError)?,
            ENOMEM => Err(OomError)?,
            EFAULT => BadAddrPanic.panic(),
            e => UnexpectedErrorPanic(e).panic(),
        }
    }
    Ok(())
}
