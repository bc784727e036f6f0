//! Command dispatch: precondition checks, then the core operation, then one
//! line of output.

use crate::cli::{Command, ServiceArg, ViewCli, ViewFormat};
use crate::core::config::Config;
use crate::core::control::{self, ControlCommand};
use crate::core::error::{ErrorContext, SvcError};
use crate::core::{output, registry};
use colored::Colorize;
use tracing::debug;

/// State a service must be in before a command touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Requirement {
    Linked,
    NotLinked,
    Running,
    NotRunning,
    AvailableExists,
    Down,
    NotDown,
}

enum Action {
    Control(ControlCommand),
    MarkDown,
    MarkUp,
    Link,
    Unlink,
}

impl Action {
    fn requirements(&self) -> &'static [Requirement] {
        use Requirement::*;
        match self {
            Action::Control(ControlCommand::Start | ControlCommand::StartOnce) => {
                &[Linked, NotRunning]
            }
            Action::Control(_) => &[Linked, Running],
            Action::MarkDown => &[Linked, NotDown],
            Action::MarkUp => &[Linked, Down],
            Action::Link => &[NotLinked, AvailableExists],
            Action::Unlink => &[Linked],
        }
    }

    fn describe_failure(&self, name: &str) -> String {
        match self {
            Action::Control(ControlCommand::Start) => format!("failed to start {}", name),
            Action::Control(ControlCommand::Stop) => format!("failed to stop {}", name),
            Action::Control(ControlCommand::StartOnce) => format!("failed to start once {}", name),
            Action::Control(cmd) => format!(
                "failed to send {} signal to {}",
                cmd.signal_name().unwrap_or_default(),
                name
            ),
            Action::MarkDown => format!("failed to down {}", name),
            Action::MarkUp => format!("failed to up {}", name),
            Action::Link => format!("failed to link {}", name),
            Action::Unlink => format!("failed to unlink {}", name),
        }
    }

    fn describe_success(&self, name: &str) -> String {
        match self {
            Action::Control(ControlCommand::Start) => format!("started {}", name),
            Action::Control(ControlCommand::Stop) => format!("stopped {}", name),
            Action::Control(ControlCommand::StartOnce) => format!("started once {}", name),
            Action::Control(cmd) => format!(
                "sent {} signal to {}",
                cmd.signal_name().unwrap_or_default(),
                name
            ),
            Action::MarkDown => format!("downed {}", name),
            Action::MarkUp => format!("upped {}", name),
            Action::Link => format!("linked {}", name),
            Action::Unlink => format!("unlinked {}", name),
        }
    }

    fn perform(&self, config: &Config, name: &str) -> Result<(), SvcError> {
        match self {
            Action::Control(cmd) => control::send_control(config, name, *cmd),
            Action::MarkDown => control::mark_down(config, name),
            Action::MarkUp => control::mark_up(config, name),
            Action::Link => control::link(config, name),
            Action::Unlink => control::unlink(config, name),
        }
    }
}

pub(crate) fn dispatch(config: &Config, command: Command) -> Result<(), SvcError> {
    let (action, ServiceArg { service }) = match command {
        Command::View(view) => return run_view(config, &view),
        Command::ListAvailables => return run_list_availables(config),
        Command::Start(arg) => (Action::Control(ControlCommand::Start), arg),
        Command::Stop(arg) => (Action::Control(ControlCommand::Stop), arg),
        Command::Once(arg) => (Action::Control(ControlCommand::StartOnce), arg),
        Command::Down(arg) => (Action::MarkDown, arg),
        Command::Up(arg) => (Action::MarkUp, arg),
        Command::Link(arg) => (Action::Link, arg),
        Command::Unlink(arg) => (Action::Unlink, arg),
        Command::SigStop(arg) => (Action::Control(ControlCommand::SignalStop), arg),
        Command::SigCont(arg) => (Action::Control(ControlCommand::SignalCont), arg),
        Command::SigHup(arg) => (Action::Control(ControlCommand::SignalHup), arg),
        Command::SigAlrm(arg) => (Action::Control(ControlCommand::SignalAlrm), arg),
        Command::SigInt(arg) => (Action::Control(ControlCommand::SignalInt), arg),
        Command::SigQuit(arg) => (Action::Control(ControlCommand::SignalQuit), arg),
        Command::SigUsr1(arg) => (Action::Control(ControlCommand::SignalUsr1), arg),
        Command::SigUsr2(arg) => (Action::Control(ControlCommand::SignalUsr2), arg),
        Command::SigTerm(arg) => (Action::Control(ControlCommand::SignalTerm), arg),
        Command::SigKill(arg) => (Action::Control(ControlCommand::SignalKill), arg),
    };

    check_requirements(config, &service, action.requirements())?;
    action
        .perform(config, &service)
        .with_context(|| action.describe_failure(&service))?;
    println!("{} {}", "✓".bright_green(), action.describe_success(&service));
    Ok(())
}

pub(crate) fn check_requirements(
    config: &Config,
    name: &str,
    requirements: &[Requirement],
) -> Result<(), SvcError> {
    for req in requirements {
        debug!(service = name, requirement = ?req, "checking precondition");
        match req {
            Requirement::Linked | Requirement::NotLinked => {
                let linked = registry::is_linked(config, name)
                    .with_context(|| format!("failed to check service {}", name))?;
                if *req == Requirement::Linked && !linked {
                    return precondition(format!("service {} is already not linked", name));
                }
                if *req == Requirement::NotLinked && linked {
                    return precondition(format!("service {} is already linked", name));
                }
            }
            Requirement::Running | Requirement::NotRunning => {
                let running = registry::is_running(config, name)
                    .with_context(|| format!("failed to get service {} status", name))?;
                if *req == Requirement::Running && !running {
                    return precondition(format!("service {} is already not running", name));
                }
                if *req == Requirement::NotRunning && running {
                    return precondition(format!("service {} is already running", name));
                }
            }
            Requirement::AvailableExists => {
                let exists = registry::exists_available(config, name)
                    .with_context(|| format!("cannot check if service {} exists", name))?;
                if !exists {
                    return precondition(format!("service {} doesn't exist", name));
                }
            }
            Requirement::Down | Requirement::NotDown => {
                let down = registry::is_marked_down(config, name)
                    .with_context(|| format!("failed to get service {} downess", name))?;
                if *req == Requirement::Down && !down {
                    return precondition(format!("service {} is already up", name));
                }
                if *req == Requirement::NotDown && down {
                    return precondition(format!("service {} is already down", name));
                }
            }
        }
    }
    Ok(())
}

fn precondition(message: String) -> Result<(), SvcError> {
    Err(SvcError::Precondition(message))
}

fn run_view(config: &Config, view: &ViewCli) -> Result<(), SvcError> {
    let list = registry::list_services(config).context("failed to get services list")?;
    debug!(count = list.len(), "collected service snapshots");
    let rendered = match view.format {
        ViewFormat::Text => output::render_table(&list),
        ViewFormat::Json => output::render_json(&list)? + "\n",
    };
    print!("{}", rendered);
    Ok(())
}

fn run_list_availables(config: &Config) -> Result<(), SvcError> {
    let names = registry::list_available(config).context("failed to get availables list")?;
    print!("{}", output::render_available(&config.available_root, &names));
    Ok(())
}
