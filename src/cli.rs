//! CLI struct definitions for the svc command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `dispatch`.

use crate::core::config::{AVDIR_ENV, SVDIR_ENV};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "svc",
    version = env!("CARGO_PKG_VERSION"),
    about = "SVC is a small and simple wrapper around sv.",
    after_help = "The default command is view."
)]
pub(crate) struct Cli {
    /// Running services directory (default: /var/service).
    #[clap(long, env = SVDIR_ENV, value_name = "DIR")]
    pub svdir: Option<PathBuf>,
    /// Available services directory (default: /etc/sv).
    #[clap(long, env = AVDIR_ENV, value_name = "DIR")]
    pub avdir: Option<PathBuf>,
    /// Log debug diagnostics to stderr.
    #[clap(long, short = 'v')]
    pub verbose: bool,
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Args, Debug, Default)]
pub(crate) struct ViewCli {
    /// Output format: 'text' or 'json'.
    #[clap(long, value_enum, default_value_t = ViewFormat::Text)]
    pub format: ViewFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ViewFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ServiceArg {
    /// Service name, as found under the services directory.
    pub service: String,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// List the available services
    #[clap(name = "list-availables", visible_alias = "L")]
    ListAvailables,
    /// Start a service
    #[clap(visible_alias = "s")]
    Start(ServiceArg),
    /// Stop a service
    #[clap(visible_alias = "S")]
    Stop(ServiceArg),
    /// Start a service once
    #[clap(visible_alias = "o")]
    Once(ServiceArg),
    /// Down a service
    #[clap(visible_alias = "d")]
    Down(ServiceArg),
    /// Up a service
    #[clap(visible_alias = "u")]
    Up(ServiceArg),
    /// Link a service
    #[clap(visible_alias = "l")]
    Link(ServiceArg),
    /// Unlink a service
    #[clap(visible_alias = "r")]
    Unlink(ServiceArg),
    /// Show the services' statuses
    #[clap(visible_alias = "v")]
    View(ViewCli),
    /// Send a STOP signal to a service
    #[clap(name = "sig-stop")]
    SigStop(ServiceArg),
    /// Send a CONT signal to a service
    #[clap(name = "sig-cont")]
    SigCont(ServiceArg),
    /// Send a HUP signal to a service
    #[clap(name = "sig-hup")]
    SigHup(ServiceArg),
    /// Send a ALRM signal to a service
    #[clap(name = "sig-alrm")]
    SigAlrm(ServiceArg),
    /// Send a INT signal to a service
    #[clap(name = "sig-int")]
    SigInt(ServiceArg),
    /// Send a QUIT signal to a service
    #[clap(name = "sig-quit")]
    SigQuit(ServiceArg),
    /// Send a USR1 signal to a service
    #[clap(name = "sig-usr1")]
    SigUsr1(ServiceArg),
    /// Send a USR2 signal to a service
    #[clap(name = "sig-usr2")]
    SigUsr2(ServiceArg),
    /// Send a TERM signal to a service
    #[clap(name = "sig-term")]
    SigTerm(ServiceArg),
    /// Send a KILL signal to a service
    #[clap(name = "sig-kill")]
    SigKill(ServiceArg),
}
