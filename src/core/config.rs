//! Supervision roots, resolved once per process.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

pub const SVDIR_ENV: &str = "SVDIR";
pub const AVDIR_ENV: &str = "AVDIR";
pub const SVDIR_DEFAULT: &str = "/var/service";
pub const AVDIR_DEFAULT: &str = "/etc/sv";

/// Running-services root and available-services root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the supervisor scans, usually holding symlinks (`SVDIR`).
    pub service_root: PathBuf,
    /// Directory holding service definitions (`AVDIR`).
    pub available_root: PathBuf,
}

impl Config {
    pub fn new(service_root: impl Into<PathBuf>, available_root: impl Into<PathBuf>) -> Self {
        Self {
            service_root: service_root.into(),
            available_root: available_root.into(),
        }
    }

    /// Explicit values win, then the environment, then the fixed defaults.
    /// Empty values count as unset.
    pub fn resolve(svdir: Option<PathBuf>, avdir: Option<PathBuf>) -> Self {
        Self::resolve_with(svdir, avdir, |var| env::var_os(var))
    }

    fn resolve_with<F>(svdir: Option<PathBuf>, avdir: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let pick = |explicit: Option<PathBuf>, var: &str, default: &str| {
            explicit
                .filter(|p| !p.as_os_str().is_empty())
                .or_else(|| lookup(var).filter(|v| !v.is_empty()).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(default))
        };
        Self {
            service_root: pick(svdir, SVDIR_ENV, SVDIR_DEFAULT),
            available_root: pick(avdir, AVDIR_ENV, AVDIR_DEFAULT),
        }
    }

    pub fn service_path(&self, name: &str) -> PathBuf {
        self.service_root.join(name)
    }

    pub fn available_path(&self, name: &str) -> PathBuf {
        self.available_root.join(name)
    }

    pub fn down_path(&self, name: &str) -> PathBuf {
        self.service_root.join(name).join("down")
    }
}
