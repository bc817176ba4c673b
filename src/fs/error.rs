use derive_more::{Display, Error, From, IsVariant};

#[derive(Debug, Display, Clone, Error)]
#[display("interrupted by signal")]
pub struct InterruptError;

#[derive(Debug, Display, Clone, Error)]
#[display("error during I/O")]
pub struct IOError;

#[derive(Debug, Display, Clone, Error)]
#[display("available storage space exhausted")]
pub struct StorageExhaustedError;

#[derive(Debug, Display, Clone, Error)]
#[display("access to the file is denied")]
pub struct AccessError;

#[derive(Debug, Display, Clone, Error)]
#[display("out of memory")]
pub struct OomError;

#[derive(Debug, Display, Clone, Error)]
#[display("exceeded open file limit")]
pub struct FileCountError;

#[derive(Debug, Display, Clone, Error)]
#[display("search permission is denied for one of the directories in the provided path")]
pub struct NoSearchError;

#[derive(Debug, Display, Clone, Error)]
#[display("path contains too many symlinks")]
pub struct ExcessiveLinksError;

#[derive(Debug, Display, Clone, Error)]
#[display("path is too long")]
pub struct PathLengthError;

#[derive(Debug, Display, Clone, Error)]
#[display("a component of the provided path does not exist")]
pub struct MissingComponentError;

#[derive(Debug, Display, Clone, Error)]
#[display("a component of the provided path is not a directory")]
pub struct NonDirComponentError;

#[derive(Debug, Display, Clone, Error)]
#[display("path contains an interior nul byte")]
pub struct InvalidPathError;

/// The single error produced by [`Directory::open`](super::Directory::open). Opening a
/// directory for iteration either works or it doesn't; the distinct causes (missing,
/// not a directory, unsearchable, descriptor limit) all leave the caller with the same
/// options, so they are deliberately not distinguished.
#[derive(Debug, Display, Clone, Error)]
#[display("unable to open directory for iteration")]
pub struct OpenDirError;

#[derive(Debug, Display, Clone, From, Error, IsVariant)]
pub enum OpenFileError {
    Access(AccessError),
    Interrupt(InterruptError),
    ExcessiveLinks(ExcessiveLinksError),
    FileCount(FileCountError),
    PathLength(PathLengthError),
    MissingComponent(MissingComponentError),
    NonDirComponent(NonDirComponentError),
    Oom(OomError),
    InvalidPath(InvalidPathError),
}

#[derive(Debug, Display, Clone, From, Error, IsVariant)]
pub enum CloseError {
    Interrupt(InterruptError),
    IO(IOError),
    StorageExhausted(StorageExhaustedError),
}

#[derive(Debug, Display, Clone, From, Error, IsVariant)]
pub enum ChdirError {
    NoSearch(NoSearchError),
    ExcessiveLinks(ExcessiveLinksError),
    PathLength(PathLengthError),
    MissingComponent(MissingComponentError),
    NonDirComponent(NonDirComponentError),
    Oom(OomError),
    InvalidPath(InvalidPathError),
}
