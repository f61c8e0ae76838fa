//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - colored text and key/value tables
    #[default]
    Pretty,
    /// JSON format - structured for scripts
    Json,
}
