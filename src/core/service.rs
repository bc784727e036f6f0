//! Service state model: status vocabulary and immutable snapshots.

use crate::core::array::HandleArray;
use crate::core::error::SvcError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Supervisor-reported state of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
    Finishing,
    Unknown,
}

impl ServiceStatus {
    /// Classifies the leading bytes of a `supervise/stat` file.
    pub fn from_stat(stat: &[u8]) -> Self {
        if stat.starts_with(b"finish") {
            ServiceStatus::Finishing
        } else if stat.starts_with(b"down") {
            ServiceStatus::Stopped
        } else if stat.starts_with(b"run") {
            ServiceStatus::Running
        } else {
            ServiceStatus::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Running => "running",
            ServiceStatus::Stopped => "stopped",
            ServiceStatus::Finishing => "finishing",
            ServiceStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole seconds since the last status change, shown as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Elapsed(u64);

impl Elapsed {
    pub fn from_secs(secs: u64) -> Self {
        Elapsed(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl From<Duration> for Elapsed {
    fn from(d: Duration) -> Self {
        Elapsed(d.as_secs())
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        let s = self.0 % 60;
        write!(f, "{:02}:{:02}:{:02}", h, m, s)
    }
}

impl Serialize for Elapsed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Point-in-time read of one service directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSnapshot {
    name: String,
    status: ServiceStatus,
    #[serde(rename = "down")]
    is_down: bool,
    pid: u32,
    elapsed: Elapsed,
}

impl ServiceSnapshot {
    pub fn new(
        name: impl Into<String>,
        status: ServiceStatus,
        is_down: bool,
        pid: u32,
        elapsed: Elapsed,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            is_down,
            pid,
            elapsed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    /// A `down` sentinel is present; independent of [`Self::status`].
    pub fn is_down(&self) -> bool {
        self.is_down
    }

    /// `0` when the supervisor has not published a pid.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }
}

/// Snapshots sorted by name.
pub type ServiceList = HandleArray<ServiceSnapshot>;

/// Parses the leading decimal digits of a `supervise/pid` file. Anything
/// unparseable, including an empty file, is `0`.
pub fn parse_pid(raw: &[u8]) -> u32 {
    let trimmed = raw
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|start| &raw[start..])
        .unwrap_or_default();
    let digits = trimmed
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map(|end| &trimmed[..end])
        .unwrap_or(trimmed);
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0)
}

/// Rejects names that would escape the service root or are not a single
/// path component.
pub fn validate_name(name: &str) -> Result<(), SvcError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') || name.contains('\0')
    {
        return Err(SvcError::InvalidName(name.to_string()));
    }
    Ok(())
}
