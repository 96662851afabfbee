//! Configuration and constants for the library and CLI.

use super::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Identifier of the synthetic tree root.
///
/// Jaeger span ids are hex strings, so this can never collide with a real span.
pub const TREE_ROOT_ID: &str = "__root__";

/// Returned by `tree_size_for_span` when the span is not part of the tree
pub const SPAN_NOT_IN_TREE: isize = -1;

/// Default number of intervals between timeline ticks
pub const DEFAULT_TICK_INTERVAL: usize = 4;

/// Default pixel width attached to every tick
pub const DEFAULT_TICK_WIDTH: f64 = 3.0;

// Traces shorter than one second are displayed in milliseconds
pub const SECONDS_UNIT_THRESHOLD_US: u64 = 1_000_000;

pub const MICROS_PER_MILLI: u64 = 1_000;
pub const MICROS_PER_SECOND: u64 = 1_000_000;

/// Current summary schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Field names under which the Jaeger query API wraps traces
pub const TRACE_ENVELOPE_FIELDS: &[&str] = &["data", "traces", "result"];

/// Display options for the CLI, loadable from TOML
///
/// Every field is optional in the file; missing ones fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Number of tick intervals on the timeline
    pub tick_interval: usize,

    /// Pixel width attached to each tick
    pub tick_width: f64,

    /// Colorize terminal output
    pub color: bool,

    /// Maximum number of spans printed in the text summary
    pub max_spans: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            tick_width: DEFAULT_TICK_WIDTH,
            color: true,
            max_spans: 50,
        }
    }
}

impl ViewConfig {
    /// Check the values that the derivation functions would reject later
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval must be a positive integer".to_string(),
            ));
        }

        if !self.tick_width.is_finite() || self.tick_width < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tick_width must be a non-negative number, got {}",
                self.tick_width
            )));
        }

        Ok(())
    }
}

/// Load a view configuration from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
pub fn load_view_config(path: impl AsRef<Path>) -> Result<ViewConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading view config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: ViewConfig = toml::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}
