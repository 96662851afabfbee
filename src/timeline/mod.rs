//! Timeline helpers: duration labels and tick marks.

pub mod duration;
pub mod ticks;

// Re-export main types and functions
pub use duration::{format_duration_for_trace, format_duration_for_unit, DurationUnit};
pub use ticks::{default_ticks_for_trace, ticks_for_trace, Tick, TickConfig};
