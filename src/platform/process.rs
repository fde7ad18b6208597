// Platform-specific process table listing
use std::process::{Command, Stdio};

/// Raw output of one process-list helper invocation
#[derive(Debug, Clone)]
pub struct ProcessListing {
    /// PID of the helper itself, so its own line can be told apart
    pub helper_pid: u32,
    pub output: String,
}

#[cfg(not(windows))]
fn list_command() -> Command {
    let mut cmd = Command::new("ps");
    cmd.arg("aux");
    cmd
}

#[cfg(windows)]
fn list_command() -> Command {
    let mut cmd = Command::new("tasklist");
    cmd.args(["/FO", "TABLE", "/NH"]);
    cmd
}

/// Run the process-list helper and capture its output
///
/// Returns the helper's stderr (or the spawn error) when it cannot produce a
/// listing.
pub fn list_processes() -> Result<ProcessListing, String> {
    let child = list_command()
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to run process list: {}", e))?;

    let helper_pid = child.id();
    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to read process list: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        return Err(if stderr.trim().is_empty() {
            format!("Process list exited with {}", output.status)
        } else {
            stderr
        });
    }

    Ok(ProcessListing {
        helper_pid,
        output: String::from_utf8_lossy(&output.stdout).into_owned(),
    })
}

/// PID column of a listing line (second whitespace-separated field on every
/// supported platform)
fn pid_of(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}

/// Lines containing `needle` anywhere, minus the helper's own line
///
/// Matching is a plain substring test: no anchoring and no word boundaries.
/// Each kept line is newline-terminated.
pub fn matching_lines(listing: &ProcessListing, needle: &str) -> String {
    listing
        .output
        .lines()
        .filter(|line| line.contains(needle))
        .filter(|line| pid_of(line) != Some(listing.helper_pid))
        .fold(String::new(), |mut acc, line| {
            acc.push_str(line);
            acc.push('\n');
            acc
        })
}
