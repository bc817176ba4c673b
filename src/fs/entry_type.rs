use bitflags::bitflags;
use libc::{
    DT_BLK, DT_CHR, DT_DIR, DT_FIFO, DT_LNK, DT_REG, DT_SOCK, S_IFBLK, S_IFCHR, S_IFDIR, S_IFIFO,
    S_IFLNK, S_IFMT, S_IFREG, S_IFSOCK, mode_t,
};

bitflags! {
    /// The kind of a directory entry, as a bitmask so that a single value doubles as a
    /// filter over several kinds.
    ///
    /// # Examples
    /// ```no_run
    /// # use dropkit::fs::{Directory, EntryType};
    /// let dirs_and_links = Directory::open("/tmp", EntryType::DIRECTORY | EntryType::SYMLINK)?;
    /// # Ok::<(), dropkit::fs::OpenDirError>(())
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct EntryType: u32 {
        const REGULAR_FILE = 1;
        const DIRECTORY = 2;
        const SYMLINK = 4;
        const SOCKET = 8;
        const FIFO = 16;
        const CHAR_DEVICE = 32;
        const BLOCK_DEVICE = 64;
        const ALL = Self::REGULAR_FILE.bits()
            | Self::DIRECTORY.bits()
            | Self::SYMLINK.bits()
            | Self::SOCKET.bits()
            | Self::FIFO.bits()
            | Self::CHAR_DEVICE.bits()
            | Self::BLOCK_DEVICE.bits();
    }
}

impl EntryType {
    /// The zero-bit value given to entries whose kind couldn't be determined. It
    /// intersects no filter, so unknown entries never pass one.
    pub const UNKNOWN: EntryType = EntryType::empty();

    /// Classifies from the `d_type` field of a `dirent`. `DT_UNKNOWN` (and anything
    /// unrecognized) maps to [`UNKNOWN`](EntryType::UNKNOWN); some file systems report
    /// it for every entry, in which case the caller falls back to `stat`.
    pub(crate) const fn from_dirent_type(d_type: u8) -> EntryType {
        match d_type {
            DT_REG => EntryType::REGULAR_FILE,
            DT_DIR => EntryType::DIRECTORY,
            DT_LNK => EntryType::SYMLINK,
            DT_SOCK => EntryType::SOCKET,
            DT_FIFO => EntryType::FIFO,
            DT_CHR => EntryType::CHAR_DEVICE,
            DT_BLK => EntryType::BLOCK_DEVICE,
            _ => EntryType::UNKNOWN,
        }
    }

    /// Classifies from the `st_mode` field of a `stat` result.
    pub(crate) const fn from_mode(mode: mode_t) -> EntryType {
        match mode & S_IFMT {
            S_IFREG => EntryType::REGULAR_FILE,
            S_IFDIR => EntryType::DIRECTORY,
            S_IFLNK => EntryType::SYMLINK,
            S_IFSOCK => EntryType::SOCKET,
            S_IFIFO => EntryType::FIFO,
            S_IFCHR => EntryType::CHAR_DEVICE,
            S_IFBLK => EntryType::BLOCK_DEVICE,
            _ => EntryType::UNKNOWN,
        }
    }
}
