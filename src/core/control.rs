//! Control channel writes and link/down state changes.
//!
//! None of these wait for the supervisor: a successful call means the
//! filesystem accepted the change, not that the service reacted to it.

use crate::core::config::Config;
use crate::core::error::{ErrorContext, SvcError};
use crate::core::service::validate_name;
use crate::core::snapshot::CONTROL_FILE;
use nix::fcntl::OFlag;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::os::unix::fs::{OpenOptionsExt, symlink};

/// Commands understood by the supervisor's `supervise/control` channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Start,
    Stop,
    StartOnce,
    SignalStop,
    SignalCont,
    SignalHup,
    SignalAlrm,
    SignalInt,
    SignalQuit,
    SignalUsr1,
    SignalUsr2,
    SignalTerm,
    SignalKill,
}

impl ControlCommand {
    pub const ALL: [ControlCommand; 13] = [
        ControlCommand::Start,
        ControlCommand::Stop,
        ControlCommand::StartOnce,
        ControlCommand::SignalStop,
        ControlCommand::SignalCont,
        ControlCommand::SignalHup,
        ControlCommand::SignalAlrm,
        ControlCommand::SignalInt,
        ControlCommand::SignalQuit,
        ControlCommand::SignalUsr1,
        ControlCommand::SignalUsr2,
        ControlCommand::SignalTerm,
        ControlCommand::SignalKill,
    ];

    fn byte(self) -> u8 {
        match self {
            ControlCommand::Start => b'u',
            ControlCommand::Stop => b'd',
            ControlCommand::StartOnce => b'o',
            ControlCommand::SignalStop => b'p',
            ControlCommand::SignalCont => b'c',
            ControlCommand::SignalHup => b'h',
            ControlCommand::SignalAlrm => b'a',
            ControlCommand::SignalInt => b'i',
            ControlCommand::SignalQuit => b'q',
            ControlCommand::SignalUsr1 => b'1',
            ControlCommand::SignalUsr2 => b'2',
            ControlCommand::SignalTerm => b't',
            ControlCommand::SignalKill => b'k',
        }
    }

    /// Signal name for signal deliveries, `None` for state changes.
    pub fn signal_name(self) -> Option<&'static str> {
        match self {
            ControlCommand::SignalStop => Some("STOP"),
            ControlCommand::SignalCont => Some("CONT"),
            ControlCommand::SignalHup => Some("HUP"),
            ControlCommand::SignalAlrm => Some("ALRM"),
            ControlCommand::SignalInt => Some("INT"),
            ControlCommand::SignalQuit => Some("QUIT"),
            ControlCommand::SignalUsr1 => Some("USR1"),
            ControlCommand::SignalUsr2 => Some("USR2"),
            ControlCommand::SignalTerm => Some("TERM"),
            ControlCommand::SignalKill => Some("KILL"),
            ControlCommand::Start | ControlCommand::Stop | ControlCommand::StartOnce => None,
        }
    }
}

/// Symlinks `<svdir>/<name>` to `<avdir>/<name>`.
pub fn link(config: &Config, name: &str) -> Result<(), SvcError> {
    validate_name(name)?;
    let target = config.available_path(name);
    let link_path = config.service_path(name);
    symlink(&target, &link_path).map_err(|e| SvcError::io("symlink", &link_path, e))
}

/// Removes `<svdir>/<name>`.
pub fn unlink(config: &Config, name: &str) -> Result<(), SvcError> {
    validate_name(name)?;
    let path = config.service_path(name);
    fs::remove_file(&path).map_err(|e| SvcError::io("unlink", &path, e))
}

/// Writes the command's byte to `supervise/control`.
///
/// The channel is opened non-blocking so a supervisor that is not reading
/// its fifo yields an error instead of a hang.
pub fn send_control(config: &Config, name: &str, command: ControlCommand) -> Result<(), SvcError> {
    validate_name(name)?;
    let path = config.service_path(name).join(CONTROL_FILE);
    OpenOptions::new()
        .write(true)
        .custom_flags(OFlag::O_NONBLOCK.bits())
        .open(&path)
        .and_then(|mut channel| channel.write_all(&[command.byte()]))
        .map_err(|e| SvcError::io("write", &path, e))
        .with_context(|| format!("failed to write supervise/control of {}", name))
}

/// Creates the `down` sentinel so the supervisor keeps the service stopped.
pub fn mark_down(config: &Config, name: &str) -> Result<(), SvcError> {
    validate_name(name)?;
    let path = config.down_path(name);
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(&path)
        .map(drop)
        .map_err(|e| SvcError::io("create", &path, e))
}

/// Removes the `down` sentinel.
pub fn mark_up(config: &Config, name: &str) -> Result<(), SvcError> {
    validate_name(name)?;
    let path = config.down_path(name);
    fs::remove_file(&path).map_err(|e| SvcError::io("unlink", &path, e))
}
