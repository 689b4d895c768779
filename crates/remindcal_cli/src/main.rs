//! Interactive reminder calendar.
//!
//! # Responsibility
//! - Resolve configuration and start logging.
//! - Run the menu shell on stdin/stdout and map failures to an exit code.

mod config;
mod error;
mod shell;

use chrono::Local;
use config::AppConfig;
use log::{error, info};
use remindcal_core::{core_version, init_logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match AppConfig::from_current_dir() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Logging is diagnostic only; the calendar works without it.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    info!(
        "event=shell_start module=cli status=start version={} data_file={}",
        core_version(),
        config.data_file.display()
    );

    let today = Local::now().date_naive();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match shell::run(&config, today, stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
