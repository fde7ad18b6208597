pub mod config;
pub mod evaluator;
pub mod monitor;
pub mod notifier;
pub mod sampler;

pub use config::{MonitorConfig, Target};
pub use evaluator::{evaluate, AlertMessage};
pub use monitor::{Monitor, RunOptions, RunReport};
pub use notifier::{Dispatch, WebhookNotifier};
pub use sampler::{LocalProbe, ProcessStatus, SystemProbe, SystemSnapshot};
