use colored::*;
use std::process::ExitCode;

// Use modules from the library
use hostalert::commands;

fn main() -> ExitCode {
    let matches = commands::build_cli().get_matches();

    hostalert::init_logging();

    match commands::check(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let (message, code) = commands::describe_failure(&e);
            eprintln!("{} {}", "Error:".red().bold(), message);
            ExitCode::from(code)
        }
    }
}
