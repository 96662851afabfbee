//! Human-readable duration strings.
//!
//! Durations are microseconds. The unit is picked per trace, not per
//! value, so every label on one timeline uses the same unit.

use crate::parser::schema::Trace;
use crate::selectors::trace_duration;
use crate::utils::config::{MICROS_PER_MILLI, MICROS_PER_SECOND, SECONDS_UNIT_THRESHOLD_US};
use crate::utils::error::TraceError;
use std::fmt;
use std::str::FromStr;

const MILLIS_PER_SECOND: u64 = MICROS_PER_SECOND / MICROS_PER_MILLI;

/// Display unit for durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Milliseconds,
    Seconds,
}

impl DurationUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
        }
    }

    /// Unit used for all durations of a trace lasting `trace_duration` µs
    pub fn for_trace_duration(trace_duration: u64) -> Self {
        if trace_duration < SECONDS_UNIT_THRESHOLD_US {
            Self::Milliseconds
        } else {
            Self::Seconds
        }
    }
}

impl FromStr for DurationUnit {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ms" => Ok(Self::Milliseconds),
            "s" => Ok(Self::Seconds),
            other => Err(TraceError::InvalidArgument(format!(
                "unsupported duration unit '{}', expected 'ms' or 's'",
                other
            ))),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Format a duration in the given unit
///
/// * `ms`: rounded to whole milliseconds, halves round up (`302000` -> `302ms`)
/// * `s`: three decimals with trailing zeros dropped (`1302000` -> `1.302s`,
///   `90000` -> `0.09s`, `2000000` -> `2s`)
pub fn format_duration_for_unit(duration: u64, unit: DurationUnit) -> String {
    match unit {
        DurationUnit::Milliseconds => format!("{}{}", round_div(duration, MICROS_PER_MILLI), unit),
        DurationUnit::Seconds => {
            let millis = round_div(duration, MICROS_PER_MILLI);
            let whole = millis / MILLIS_PER_SECOND;
            let frac = millis % MILLIS_PER_SECOND;

            if frac == 0 {
                format!("{}{}", whole, unit)
            } else {
                let digits = format!("{:03}", frac);
                format!("{}.{}{}", whole, digits.trim_end_matches('0'), unit)
            }
        }
    }
}

/// Format a duration in the unit chosen by the trace's own duration
///
/// Traces shorter than one second use `ms`, longer ones `s`. An empty trace
/// counts as zero-length.
pub fn format_duration_for_trace(trace: &Trace, duration: u64) -> String {
    let unit = DurationUnit::for_trace_duration(trace_duration(trace).unwrap_or(0));
    format_duration_for_unit(duration, unit)
}

/// Integer division rounding halves up
fn round_div(value: u64, divisor: u64) -> u64 {
    let quotient = value / divisor;
    if (value % divisor) * 2 >= divisor {
        quotient + 1
    } else {
        quotient
    }
}
