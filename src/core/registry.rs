//! Service listing and cheap single-service probes.
//!
//! [`list_services`] is all or nothing: if any service directory cannot be
//! read the whole listing fails, so callers never render a table that
//! silently lacks rows.

use crate::core::array::HandleArray;
use crate::core::config::Config;
use crate::core::dirfd::DirHandle;
use crate::core::error::{ErrorContext, SvcError};
use crate::core::scan;
use crate::core::service::{ServiceList, validate_name};
use crate::core::snapshot::{self, STAT_FILE};
use std::ffi::OsString;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn list_services(config: &Config) -> Result<ServiceList, SvcError> {
    let root = &config.service_root;
    let names = scan::list_entries(root)
        .with_context(|| format!("failed to list dirs in '{}'", root.display()))?;
    snapshot_all(root, &names)
}

/// Builds one snapshot per name, in order, against a single root handle.
pub fn snapshot_all(
    root: &Path,
    names: &HandleArray<OsString>,
) -> Result<ServiceList, SvcError> {
    let handle = DirHandle::open(root).map_err(|e| SvcError::io("open dir", root, e))?;

    let mut list = ServiceList::allocate(names.len().max(8))?;
    for name in names {
        let snap = snapshot::build_snapshot(&handle, name)
            .with_context(|| format!("failed to create svc '{}'", name.to_string_lossy()))?;
        list.append(snap)?;
    }
    Ok(list)
}

/// Names of the service definitions under the available-services root.
pub fn list_available(config: &Config) -> Result<HandleArray<OsString>, SvcError> {
    let root = &config.available_root;
    scan::list_entries(root)
        .with_context(|| format!("failed to list dirs in '{}'", root.display()))
}

/// `<svdir>/<name>` exists, whatever its supervision state.
pub fn is_linked(config: &Config, name: &str) -> Result<bool, SvcError> {
    validate_name(name)?;
    exists(&config.service_path(name))
}

/// The first three bytes of `supervise/stat` are exactly `run`.
pub fn is_running(config: &Config, name: &str) -> Result<bool, SvcError> {
    validate_name(name)?;
    let path = config.service_path(name).join(STAT_FILE);
    let mut buf = Vec::with_capacity(3);
    File::open(&path)
        .and_then(|f| f.take(3).read_to_end(&mut buf))
        .map_err(|e| SvcError::io("read", &path, e))
        .with_context(|| format!("failed to read supervise/stat of {}", name))?;
    Ok(buf == b"run")
}

/// A `down` sentinel sits directly inside the service directory.
pub fn is_marked_down(config: &Config, name: &str) -> Result<bool, SvcError> {
    validate_name(name)?;
    exists(&config.down_path(name))
}

/// A definition of this name exists under the available-services root.
pub fn exists_available(config: &Config, name: &str) -> Result<bool, SvcError> {
    validate_name(name)?;
    exists(&config.available_path(name))
}

fn exists(path: &Path) -> Result<bool, SvcError> {
    path.try_exists().map_err(|e| SvcError::io("access", path, e))
}
