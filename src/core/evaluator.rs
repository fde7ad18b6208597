//! Alert evaluation.
//!
//! Compares a sampled snapshot against the configured thresholds and produces
//! the messages to send, in dispatch order.

use super::config::MonitorConfig;
use super::sampler::SystemSnapshot;
use serde::Serialize;

/// One notification to deliver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
    pub text: String,
}

impl AlertMessage {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

/// Evaluate a snapshot and generate messages
///
/// Rules fire independently, in this order:
/// 1. configured process not running: the listing detail
/// 2. free space strictly below the limit
/// 3. forced: unconditional space report
/// 4. forced with a configured process: `"{running}: {detail}"`, even when
///    rule 1 already reported it
pub fn evaluate(
    cfg: &MonitorConfig,
    snapshot: &SystemSnapshot,
    hostname: &str,
    force: bool,
) -> Vec<AlertMessage> {
    let mut messages = Vec::new();
    let free = snapshot.free_space_mb;

    // Process check
    let process = snapshot.process.as_ref().filter(|_| cfg.monitors_process());
    if let Some(status) = process {
        if !status.running {
            messages.push(AlertMessage::new(status.detail.clone()));
        }
    }

    if free < cfg.space_limit_mb {
        messages.push(AlertMessage::new(format!(
            "Not enough space on {}: {} MB free",
            hostname, free
        )));
    }

    if force {
        messages.push(AlertMessage::new(format!(
            "Space on {}: {} MB free",
            hostname, free
        )));
        if let Some(status) = process {
            messages.push(AlertMessage::new(format!(
                "{}: {}",
                status.running, status.detail
            )));
        }
    }

    messages
}
