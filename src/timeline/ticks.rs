//! Evenly spaced timeline markers.

use crate::parser::schema::Trace;
use crate::selectors::parent_span;
use crate::utils::config::{DEFAULT_TICK_INTERVAL, DEFAULT_TICK_WIDTH};
use crate::utils::error::TraceError;
use serde::{Deserialize, Serialize};

/// A marker on the time axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Microseconds since epoch
    pub timestamp: u64,

    /// Pixel width, identical for every tick of a timeline
    pub width: f64,
}

/// Tick layout parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickConfig {
    /// Number of intervals; produces `interval + 1` ticks
    pub interval: usize,
    pub width: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_TICK_INTERVAL,
            width: DEFAULT_TICK_WIDTH,
        }
    }
}

impl TickConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    fn validate(&self) -> Result<(), TraceError> {
        if self.interval == 0 {
            return Err(TraceError::InvalidArgument(
                "tick interval must be a positive integer".to_string(),
            ));
        }

        if !self.width.is_finite() || self.width < 0.0 {
            return Err(TraceError::InvalidArgument(format!(
                "tick width must be a non-negative number, got {}",
                self.width
            )));
        }

        Ok(())
    }
}

/// Ticks spanning the root span of the trace
///
/// Tick `i` sits at `start + round(i * duration / interval)`. An empty trace
/// has no ticks.
///
/// # Errors
/// * `TraceError::InvalidArgument` - `interval` is zero or `width` is negative
///   or not finite
pub fn ticks_for_trace(trace: &Trace, interval: usize, width: f64) -> Result<Vec<Tick>, TraceError> {
    let config = TickConfig { interval, width };
    config.validate()?;

    Ok(parent_span(trace)
        .map(|root| ticks_for_range(root.start_time, root.duration, &config))
        .unwrap_or_default())
}

/// Ticks with the library defaults (4 intervals, default width)
pub fn default_ticks_for_trace(trace: &Trace) -> Result<Vec<Tick>, TraceError> {
    ticks_for_trace(trace, DEFAULT_TICK_INTERVAL, DEFAULT_TICK_WIDTH)
}

/// Ticks for an explicit time range, config assumed valid
fn ticks_for_range(start: u64, duration: u64, config: &TickConfig) -> Vec<Tick> {
    let interval = config.interval as u128;

    (0..=config.interval)
        .map(|i| {
            // round(i * duration / interval), halves up, without overflow
            let scaled = i as u128 * duration as u128;
            let offset = (scaled * 2 + interval) / (interval * 2);

            Tick {
                timestamp: start.saturating_add(offset as u64),
                width: config.width,
            }
        })
        .collect()
}
