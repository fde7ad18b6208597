use crate::core::notifier::{WebhookNotifier, DEFAULT_TIMEOUT};
use crate::core::{LocalProbe, Monitor, RunOptions};
use anyhow::Result;
use clap::ArgMatches;
use std::path::PathBuf;
use std::time::Duration;

/// Build run options from parsed arguments
pub fn options_from(matches: &ArgMatches) -> RunOptions {
    RunOptions {
        force: matches.get_flag("force"),
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        path: matches.get_one::<PathBuf>("path").cloned(),
    }
}

pub fn timeout_from(matches: &ArgMatches) -> Duration {
    matches
        .get_one::<u64>("timeout")
        .map(|secs| Duration::from_secs(*secs))
        .unwrap_or(DEFAULT_TIMEOUT)
}

/// Run one check against the local host and post any resulting messages
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let options = options_from(matches);
    let notifier = WebhookNotifier::new(timeout_from(matches))
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

    let report = Monitor::new(LocalProbe, notifier)
        .run(&options)?
        .into_result()?;

    log::info!(
        "Run complete: {} of {} messages delivered",
        report.delivered,
        report.messages
    );
    Ok(())
}
