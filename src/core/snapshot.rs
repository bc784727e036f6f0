//! Builds a [`ServiceSnapshot`] from a service's supervision files.

use crate::core::dirfd::DirHandle;
use crate::core::error::{ErrorContext, SvcError};
use crate::core::service::{Elapsed, ServiceSnapshot, ServiceStatus, parse_pid};
use std::ffi::OsStr;
use std::time::SystemTime;

pub const STAT_FILE: &str = "supervise/stat";
pub const PID_FILE: &str = "supervise/pid";
pub const CONTROL_FILE: &str = "supervise/control";
pub const DOWN_FILE: &str = "down";

/// Longest recognised status prefix (`finish`).
const STAT_READ_LEN: usize = 6;
/// Comfortably wider than any pid, even with a raised `pid_max`.
const PID_READ_LEN: usize = 16;

/// Reads the service `name` relative to the open supervision root.
///
/// Either every sub-step succeeds or an error naming the failed step is
/// returned; a partially filled snapshot is never produced. The raw name
/// is used for every lookup; the snapshot carries its lossy UTF-8 form.
pub fn build_snapshot(
    root: &DirHandle,
    name: impl AsRef<OsStr>,
) -> Result<ServiceSnapshot, SvcError> {
    let raw_name = name.as_ref();
    let name = raw_name.to_string_lossy();
    let dir = root
        .open_dir(raw_name)
        .map_err(|e| SvcError::io("open", root.path().join(raw_name), e))
        .with_context(|| format!("failed to open {}", name))?;

    let status = read_status(&dir).with_context(|| format!("failed to get status of {}", name))?;
    let pid = read_pid(&dir).with_context(|| format!("failed to get pid of {}", name))?;
    let is_down = dir
        .exists(DOWN_FILE)
        .map_err(|e| SvcError::io("access", dir.path().join(DOWN_FILE), e))
        .with_context(|| format!("failed to check if {} is down", name))?;
    let elapsed =
        read_elapsed(&dir).with_context(|| format!("failed to get uptime of {}", name))?;

    Ok(ServiceSnapshot::new(name, status, is_down, pid, elapsed))
}

fn read_status(dir: &DirHandle) -> Result<ServiceStatus, SvcError> {
    let raw = dir
        .read_prefix(STAT_FILE, STAT_READ_LEN)
        .map_err(|e| SvcError::io("read", dir.path().join(STAT_FILE), e))?;
    Ok(ServiceStatus::from_stat(&raw))
}

fn read_pid(dir: &DirHandle) -> Result<u32, SvcError> {
    // The supervisor may write the pid file a moment after the service
    // starts, so an empty file is `0` rather than an error.
    let raw = dir
        .read_prefix(PID_FILE, PID_READ_LEN)
        .map_err(|e| SvcError::io("read", dir.path().join(PID_FILE), e))?;
    Ok(parse_pid(&raw))
}

fn read_elapsed(dir: &DirHandle) -> Result<Elapsed, SvcError> {
    let path = dir.path().join(STAT_FILE);
    let modified = dir
        .open_file(STAT_FILE)
        .and_then(|f| f.metadata())
        .and_then(|m| m.modified())
        .map_err(|e| SvcError::io("stat", &path, e))?;
    let since = SystemTime::now()
        .duration_since(modified)
        .unwrap_or_default();
    Ok(Elapsed::from(since))
}
