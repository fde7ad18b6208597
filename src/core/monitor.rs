//! One monitoring run: load config, sample, evaluate, notify.

use super::config::{MonitorConfig, Target};
use super::evaluator::{evaluate, AlertMessage};
use super::notifier::Dispatch;
use super::sampler::{resolve_path, SystemProbe};
use crate::error::{HostAlertError, NotifyError, Result};
use std::path::PathBuf;

/// Options for a single run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Send a status report even when nothing is wrong
    pub force: bool,
    /// Explicit config file; discovered when `None`
    pub config_path: Option<PathBuf>,
    /// Directory whose filesystem is checked; working directory when `None`
    pub path: Option<PathBuf>,
}

/// Progress of a run, traced at debug level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ConfigLoaded,
    Sampled,
    Evaluated,
    Notifying(usize),
    Done,
}

/// Outcome of a run that got as far as notifying
#[derive(Debug, Default)]
pub struct RunReport {
    pub messages: usize,
    pub delivered: usize,
    /// Index of the message and why it was not delivered
    pub failures: Vec<(usize, NotifyError)>,
}

impl RunReport {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Turn a degraded report into a `Delivery` error
    pub fn into_result(self) -> Result<Self> {
        if self.is_degraded() {
            Err(HostAlertError::Delivery {
                failed: self.failures.len(),
                total: self.messages,
            })
        } else {
            Ok(self)
        }
    }
}

pub struct Monitor<P, D> {
    probe: P,
    dispatcher: D,
}

impl<P: SystemProbe, D: Dispatch> Monitor<P, D> {
    pub fn new(probe: P, dispatcher: D) -> Self {
        Self { probe, dispatcher }
    }

    pub fn run(&self, options: &RunOptions) -> Result<RunReport> {
        log::debug!("Stage: {:?}", Stage::Start);
        let cfg = MonitorConfig::load(options.config_path.as_deref())?;
        self.run_with_config(&cfg, options)
    }

    /// Run against an already loaded config
    pub fn run_with_config(&self, cfg: &MonitorConfig, options: &RunOptions) -> Result<RunReport> {
        log::debug!("Stage: {:?}", Stage::ConfigLoaded);

        let path = resolve_path(options.path.as_deref())?;
        let snapshot = self.probe.sample(cfg, &path)?;
        log::debug!("Stage: {:?} ({:?})", Stage::Sampled, snapshot);

        let hostname = self.probe.hostname()?;
        let messages = evaluate(cfg, &snapshot, &hostname, options.force);
        log::debug!("Stage: {:?} ({} messages)", Stage::Evaluated, messages.len());

        let report = self.notify_all(&cfg.target, &messages)?;
        log::debug!("Stage: {:?}", Stage::Done);
        Ok(report)
    }

    /// Send every message in order; only a serialization failure stops the loop
    fn notify_all(&self, target: &Target, messages: &[AlertMessage]) -> Result<RunReport> {
        let mut report = RunReport {
            messages: messages.len(),
            ..Default::default()
        };

        for (i, message) in messages.iter().enumerate() {
            log::debug!("Stage: {:?}", Stage::Notifying(i));
            match self.dispatcher.send(target, message) {
                Ok(()) => report.delivered += 1,
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    log::error!("Message {} of {} not delivered: {}", i + 1, messages.len(), e);
                    report.failures.push((i, e));
                }
            }
        }

        Ok(report)
    }
}
