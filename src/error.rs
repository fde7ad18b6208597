use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to locate or parse the monitoring configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found (searched: {searched})")]
    NotFound { searched: String },

    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported config format: {path:?}")]
    UnsupportedFormat { path: PathBuf },
}

/// Failure to query filesystem statistics
#[derive(Error, Debug)]
pub enum StatError {
    #[error("Could not resolve current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("Failed to stat filesystem at {path:?}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No mounted disk contains {0:?}")]
    NoMatchingDisk(PathBuf),
}

#[derive(Error, Debug)]
#[error("Failed to get hostname")]
pub struct HostnameError;

/// Failure to deliver a single message
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Fail to marshal json: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Fail to post to {target}: {source}")]
    Transport {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fail to read response from {target}: {source}")]
    ResponseRead {
        target: String,
        #[source]
        source: reqwest::Error,
    },
}

impl NotifyError {
    /// Whether the failure must abort the whole run rather than just this message
    pub fn is_fatal(&self) -> bool {
        matches!(self, NotifyError::Serialization(_))
    }
}

/// Top-level error for a monitoring run
#[derive(Error, Debug)]
pub enum HostAlertError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Disk space check failed: {0}")]
    Stat(#[from] StatError),

    #[error(transparent)]
    Hostname(#[from] HostnameError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("{failed} of {total} notifications could not be delivered")]
    Delivery { failed: usize, total: usize },
}

/// Result type alias for hostalert
pub type Result<T> = std::result::Result<T, HostAlertError>;

impl HostAlertError {
    /// Process exit code for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            HostAlertError::Config(_) => 2,
            HostAlertError::Stat(_) => 3,
            HostAlertError::Hostname(_) => 4,
            HostAlertError::Notify(NotifyError::Serialization(_)) => 5,
            // Per-message failures never abort a run, so they only surface as Delivery
            HostAlertError::Notify(_) | HostAlertError::Delivery { .. } => 6,
        }
    }
}
