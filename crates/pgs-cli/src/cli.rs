//! CLI argument definitions for Polygon Studio.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "polygon-studio",
    version,
    about = "Polygon Studio - Inspect and synchronize editable map features",
    long_about = "Inspect the polygon backend's layer catalog, editable features\n\
                  and read-only display dataset through the same synchronization\n\
                  engine a map host embeds."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Backend base URL (default: POLYGON_STUDIO_URL or http://localhost:8000).
    #[arg(long = "url", value_name = "URL", global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the layer catalog.
    Layers,

    /// List editable features, optionally restricted to one layer.
    Features(FeaturesArgs),

    /// Summarize the read-only display dataset.
    Dataset,
}

#[derive(Parser)]
pub struct FeaturesArgs {
    /// Restrict the listing to a single layer id.
    #[arg(long = "layer", value_name = "ID")]
    pub layer: Option<u64>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn features_accepts_a_layer_filter() {
        let cli = Cli::try_parse_from(["polygon-studio", "features", "--layer", "3"])
            .expect("parse");
        match cli.command {
            Command::Features(args) => assert_eq!(args.layer, Some(3)),
            _ => panic!("expected features subcommand"),
        }
    }
}
