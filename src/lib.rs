//! svc: a small front end for runit-style supervised services.
//!
//! A service is a directory under the running-services root (`SVDIR`,
//! default `/var/service`), usually a symlink to a definition under the
//! available-services root (`AVDIR`, default `/etc/sv`). The supervisor
//! publishes state in `<service>/supervise/{stat,pid}` and reads one-byte
//! commands from `<service>/supervise/control`; a `<service>/down` file
//! keeps the service stopped.
//!
//! This crate never supervises anything itself. It reads that state into
//! immutable snapshots and writes commands for the supervisor to pick up.
//!
//! # Examples
//!
//! ```bash
//! # Show every service, its pid, state and uptime
//! svc view
//!
//! # Link a definition from /etc/sv and start it
//! svc link sshd
//! svc start sshd
//!
//! # Ask the service to reload
//! svc sig-hup sshd
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: service model, directory scanning, snapshots, control channel

pub mod core;

mod cli;
mod dispatch;

use crate::cli::{Cli, Command, ViewCli};
use crate::core::config::Config;
use crate::core::error::SvcError;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SVC_LOG";

pub fn run() -> Result<(), SvcError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::resolve(cli.svdir, cli.avdir);
    debug!(
        service_root = %config.service_root.display(),
        available_root = %config.available_root.display(),
        "resolved configuration"
    );

    let command = cli.command.unwrap_or(Command::View(ViewCli::default()));
    debug!(?command, "dispatching");
    dispatch::dispatch(&config, command)
}

/// Diagnostics go to stderr so they never mix with table output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
