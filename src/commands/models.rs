use clap::ValueEnum;
use std::path::PathBuf;

/// Arguments for the summary command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct SummaryArgs {
    /// Path to the Jaeger trace JSON
    pub input: PathBuf,

    /// Output path for the JSON summary (optional)
    pub output: Option<PathBuf>,

    /// View configuration file (TOML)
    pub config: Option<PathBuf>,

    /// Overrides `tick_interval` from the config
    pub tick_interval: Option<usize>,

    /// Overrides `tick_width` from the config
    pub tick_width: Option<f64>,

    /// Overrides `max_spans` from the config
    pub max_spans: Option<usize>,

    /// Disable terminal colors
    pub no_color: bool,
}

/// Key used to order the span listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    /// Tree pre-order, parents before children
    #[default]
    Tree,
    /// Start time
    Start,
    Duration,
    /// Operation name
    Operation,
    /// Service name
    Service,
}

/// Arguments for the spans command
#[derive(Debug, Clone, Default)]
pub struct SpansArgs {
    /// Path to the Jaeger trace JSON
    pub input: PathBuf,

    pub sort: SortKey,

    /// Reverse the sort order
    pub descending: bool,

    /// Span ids whose descendants are hidden
    pub collapse: Vec<String>,

    /// Fuzzy filter on "service operation"
    pub filter: Option<String>,
}
