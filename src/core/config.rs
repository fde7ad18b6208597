use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Base name of the config file, without extension
pub const CONFIG_NAME: &str = "config";
/// Directory under `$HOME` searched before the working directory
pub const CONFIG_DIR: &str = ".hostAlert";
pub const DEFAULT_SPACE_LIMIT_MB: u64 = 5 * 1024;

/// Notification destination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// E.g. slack
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Keys are matched case-insensitively: files are lower-cased by
/// [`MonitorConfig::parse`] before reaching these field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub target: Target,
    #[serde(
        rename = "spacelimitmb",
        alias = "space_limit_mb",
        default = "default_space_limit_mb"
    )]
    pub space_limit_mb: u64,
    /// Empty means no process check
    #[serde(rename = "processtomonitor", alias = "process_to_monitor", default)]
    pub process_to_monitor: String,
}

fn default_space_limit_mb() -> u64 {
    DEFAULT_SPACE_LIMIT_MB
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            target: Target::default(),
            space_limit_mb: DEFAULT_SPACE_LIMIT_MB,
            process_to_monitor: String::new(),
        }
    }
}

/// Supported config file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Extensions tried during discovery, in priority order
    pub const EXTENSIONS: [&'static str; 4] = ["json", "toml", "yaml", "yml"];

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

impl MonitorConfig {
    /// Load the config from an explicit file, or discover it in the standard locations
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                return Err(ConfigError::NotFound {
                    searched: path.display().to_string(),
                })
            }
            None => Self::discover(&Self::search_dirs())?,
        };

        log::debug!("Using config file {:?}", path);
        Self::from_file(&path)
    }

    /// `$HOME/.hostAlert` first, then the working directory
    pub fn search_dirs() -> Vec<PathBuf> {
        let mut search = Vec::with_capacity(2);
        if let Some(home) = dirs::home_dir() {
            search.push(home.join(CONFIG_DIR));
        }
        search.push(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        search
    }

    /// Find the first `config.<ext>` file across `dirs`
    pub fn discover(dirs: &[PathBuf]) -> Result<PathBuf, ConfigError> {
        dirs.iter()
            .flat_map(|dir| {
                ConfigFormat::EXTENSIONS
                    .into_iter()
                    .map(move |ext| dir.join(format!("{}.{}", CONFIG_NAME, ext)))
            })
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ConfigError::NotFound {
                searched: dirs
                    .iter()
                    .map(|d| d.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents, format).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(contents: &str, format: ConfigFormat) -> std::result::Result<Self, String> {
        let raw: Value = match format {
            ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string())?,
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string())?,
            ConfigFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string())?,
        };

        serde_json::from_value(lowercase_keys(raw)).map_err(|e| e.to_string())
    }

    pub fn monitors_process(&self) -> bool {
        !self.process_to_monitor.is_empty()
    }
}

/// Lower-case every object key, recursively
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
