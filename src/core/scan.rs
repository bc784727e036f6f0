//! Directory listing for service roots.

use crate::core::array::HandleArray;
use crate::core::error::{ErrorContext, SvcError};
use std::ffi::OsString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Lists the immediate children of `path`, skipping names that start with
/// `.`, sorted by raw byte value.
///
/// Names are kept as the raw bytes the kernel returned so that entries
/// which are not valid UTF-8 can still be opened.
pub fn list_entries(path: &Path) -> Result<HandleArray<OsString>, SvcError> {
    let dir = fs::read_dir(path).map_err(|e| SvcError::io("open dir", path, e))?;

    let mut names = HandleArray::allocate(8)?;
    for entry in dir {
        let entry = entry.map_err(|e| SvcError::io("read dir", path, e))?;
        let name = entry.file_name();
        if name.as_bytes().first() == Some(&b'.') {
            continue;
        }
        names
            .append(name)
            .with_context(|| format!("failed to list '{}'", path.display()))?;
    }
    names.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
    Ok(names)
}
