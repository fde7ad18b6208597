// Platform-specific code module

pub mod fs;
pub mod process;

// Re-exports for clean imports
pub use fs::available_bytes;
pub use process::{list_processes, matching_lines, ProcessListing};
