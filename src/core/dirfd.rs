//! Directory handles that resolve child paths relative to an open
//! descriptor instead of re-joining the parent path on every access.

use nix::errno::Errno;
use nix::fcntl::{self, AtFlags, OFlag};
use nix::sys::stat::Mode;
use nix::unistd::{self, AccessFlags};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::OwnedFd;
use std::path::{Path, PathBuf};

const DIR_FLAGS: OFlag = OFlag::O_RDONLY
    .union(OFlag::O_DIRECTORY)
    .union(OFlag::O_CLOEXEC);

/// An open directory. The descriptor is closed when the handle drops.
#[derive(Debug)]
pub struct DirHandle {
    fd: OwnedFd,
    path: PathBuf,
}

impl DirHandle {
    /// Opens `path`, which must be a directory.
    pub fn open(path: &Path) -> io::Result<Self> {
        let fd = fcntl::open(path, DIR_FLAGS, Mode::empty())?;
        Ok(Self {
            fd,
            path: path.to_path_buf(),
        })
    }

    /// Opens the child directory `name` relative to this handle.
    pub fn open_dir(&self, name: &OsStr) -> io::Result<DirHandle> {
        let fd = fcntl::openat(&self.fd, name, DIR_FLAGS, Mode::empty())?;
        Ok(DirHandle {
            fd,
            path: self.path.join(name),
        })
    }

    /// Opens the file `rel` relative to this handle, read-only.
    pub fn open_file(&self, rel: &str) -> io::Result<File> {
        let fd = fcntl::openat(
            &self.fd,
            rel,
            OFlag::O_RDONLY | OFlag::O_CLOEXEC,
            Mode::empty(),
        )?;
        Ok(File::from(fd))
    }

    /// Reads at most `limit` bytes from the start of `rel`.
    pub fn read_prefix(&self, rel: &str, limit: usize) -> io::Result<Vec<u8>> {
        let file = self.open_file(rel)?;
        let mut buf = Vec::with_capacity(limit);
        file.take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// `Ok(false)` when `rel` does not exist; any other failure is an error.
    pub fn exists(&self, rel: &str) -> io::Result<bool> {
        match unistd::faccessat(&self.fd, rel, AccessFlags::F_OK, AtFlags::empty()) {
            Ok(()) => Ok(true),
            Err(Errno::ENOENT) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
