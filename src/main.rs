use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match svc::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "✗".bright_red(), e.chain());
            ExitCode::FAILURE
        }
    }
}
