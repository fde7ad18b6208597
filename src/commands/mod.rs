// Command handlers module
pub mod check;

// Re-exports for cleaner imports
pub use check::execute as check;

use crate::error::HostAlertError;
use clap::{crate_version, value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Message and process exit code for a failed run
///
/// Error messages already embed their causes, so only the top level is printed.
pub fn describe_failure(err: &anyhow::Error) -> (String, u8) {
    let code = err
        .downcast_ref::<HostAlertError>()
        .map(HostAlertError::exit_code)
        .unwrap_or(1);
    (err.to_string(), code as u8)
}

/// Command-line interface definition
pub fn build_cli() -> Command {
    Command::new("hostalert")
        .version(crate_version!())
        .about("Checks free disk space and a monitored process, and posts alerts to a webhook")
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .help("Force send notification")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Config file to use instead of searching ~/.hostAlert and the current directory")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("DIR")
                .help("Directory whose filesystem is checked (default: current directory)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECS")
                .help("Timeout for each webhook request")
                .default_value("30")
                .value_parser(value_parser!(u64).range(1..)),
        )
}
