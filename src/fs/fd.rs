use std::ffi::CStr;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ops::Deref;
use std::thread;

use libc::{EBADF, EDQUOT, EINTR, EIO, ENOSPC, c_int};

use crate::fs::error::{CloseError, IOError, InterruptError, StorageExhaustedError};
use crate::fs::panic::{BadFdPanic, Panic, UnexpectedErrorPanic};
use crate::fs::syscall::err_no;

/// An owned file descriptor. Closed on drop; errno interpretation is left to the
/// caller, which knows which syscall produced it.
pub(crate) struct Fd(pub c_int);

impl Fd {
    pub fn open(pathname: &CStr, flags: c_int) -> Result<Fd, c_int> {
        // SAFETY: pathname is nul-terminated for the lifetime of the call.
        match unsafe { libc::open(pathname.as_ptr(), flags) } {
            -1 => Err(err_no()),
            fd => Ok(Fd(fd)),
        }
    }

    pub fn close(self) -> Result<(), CloseError> {
        let fd = self.0;
        // close invalidates the descriptor regardless of the outcome, so Drop must not
        // run and close it a second time.
        mem::forget(self);
        // SAFETY: fd came from a successful open and hasn't been closed.
        if unsafe { libc::close(fd) } == -1 {
            match err_no() {
                EBADF => BadFdPanic.panic(),
                EINTR => Err(InterruptError)?,
                EIO => Err(IOError)?,
                ENOSPC | EDQUOT => Err(StorageExhaustedError)?,
                e => UnexpectedErrorPanic(e).panic(),
            }
        }
        Ok(())
    }
}

impl Deref for Fd {
    type Target = c_int;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for Fd {
    fn drop(&mut self) {
        // SAFETY: the descriptor is still owned here and is invalidated with self.
        if unsafe { libc::close(self.0) } == -1
            // Panic only if we aren't already, to prevent aborting an existing unwind.
            && !thread::panicking()
        {
            panic!("error while dropping file descriptor: {}", match err_no() {
                EBADF => BadFdPanic.to_string(),
                EINTR => InterruptError.to_string(),
                EIO => IOError.to_string(),
                ENOSPC | EDQUOT => StorageExhaustedError.to_string(),
                e => UnexpectedErrorPanic(e).to_string(),
            });
        }
    }
}

impl Debug for Fd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fd({})", self.0)
    }
}
