//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components and own the `anyhow` context.

pub mod models;
pub mod spans;
pub mod summary;
pub mod utils;

// Re-export main command functions
pub use models::{SortKey, SpansArgs, SummaryArgs};
pub use spans::{execute_spans, list_spans};
pub use summary::{execute_summary, resolve_config};
pub use utils::{display_version, validate_summary_file};
