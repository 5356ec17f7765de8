//! Command-line argument definitions for the CodeCity CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, what part of a
//! snapshot history to lay out, the layout mode, the output format,
//! configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

use codecity::config::LayoutMode;

/// Output written by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Top-down SVG plan
    #[default]
    Svg,
    /// Primitive list as JSON
    Json,
}

/// Layout mode override, mirroring [`LayoutMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Treemap,
    Street,
}

impl From<ModeArg> for LayoutMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Treemap => LayoutMode::Treemap,
            ModeArg::Street => LayoutMode::Street,
        }
    }
}

/// Command-line arguments for the CodeCity layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON file (element tree or snapshot list)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "city.svg")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Layout mode, overriding the configuration file
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Snapshot index to lay out (defaults to the latest)
    #[arg(long = "snapshot")]
    pub snapshot: Option<usize>,

    /// Full path of the element to use as the city root
    #[arg(long)]
    pub root: Option<String>,

    /// Only show these elements in the SVG plan (repeatable)
    #[arg(long = "only")]
    pub only: Vec<String>,

    /// Disable container labels
    #[arg(long)]
    pub no_labels: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
