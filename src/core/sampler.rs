//! System sampling: free disk space, process presence and hostname.

use crate::core::config::MonitorConfig;
use crate::error::{HostnameError, StatError};
use crate::platform;
use std::path::{Path, PathBuf};
use sysinfo::System;

/// Whether a monitored process was seen, with the listing lines backing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStatus {
    pub running: bool,
    pub detail: String,
}

/// Instantaneous state sampled for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSnapshot {
    pub free_space_mb: u64,
    /// Present only when a process name is configured
    pub process: Option<ProcessStatus>,
}

/// Convert a byte count to MB the way the alert thresholds expect it
///
/// Two truncating divisions (bytes -> KB -> MB).
pub fn bytes_to_mb(bytes: u64) -> u64 {
    bytes / 1024 / 1024
}

/// Directory to stat: the supplied one, or the current working directory
pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf, StatError> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => std::env::current_dir().map_err(StatError::CurrentDir),
    }
}

/// Source of system state for a monitoring run
pub trait SystemProbe {
    fn free_space_mb(&self, path: &Path) -> Result<u64, StatError>;

    /// Never fails: a broken process listing counts as "not running"
    fn process_status(&self, name: &str) -> ProcessStatus;

    fn hostname(&self) -> Result<String, HostnameError>;

    fn sample(&self, cfg: &MonitorConfig, path: &Path) -> Result<SystemSnapshot, StatError> {
        let free_space_mb = self.free_space_mb(path)?;
        let process = cfg
            .monitors_process()
            .then(|| self.process_status(&cfg.process_to_monitor));

        Ok(SystemSnapshot {
            free_space_mb,
            process,
        })
    }
}

/// Probe backed by the local host
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalProbe;

impl SystemProbe for LocalProbe {
    fn free_space_mb(&self, path: &Path) -> Result<u64, StatError> {
        let free = bytes_to_mb(platform::available_bytes(path)?);
        log::info!("Free: {} MB", free);
        Ok(free)
    }

    fn process_status(&self, name: &str) -> ProcessStatus {
        match platform::list_processes() {
            Ok(listing) => {
                let detail = platform::matching_lines(&listing, name);
                ProcessStatus {
                    running: !detail.is_empty(),
                    detail,
                }
            }
            Err(detail) => {
                log::warn!("Process list unavailable, treating '{}' as not running: {}", name, detail);
                ProcessStatus {
                    running: false,
                    detail,
                }
            }
        }
    }

    fn hostname(&self) -> Result<String, HostnameError> {
        System::host_name()
            .filter(|name| !name.is_empty())
            .ok_or(HostnameError)
    }
}
