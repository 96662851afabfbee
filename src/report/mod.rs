//! Trace summaries for files and terminals.

pub mod summary;
pub mod text;

// Re-export main types and functions
pub use summary::{summarize_trace, SpanRow, TraceSummary};
pub use text::{render_row, render_text_summary};
