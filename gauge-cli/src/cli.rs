//! Command line definition

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use gauge_units::Preset;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "gauge", version)]
#[command(about = "Show, parse and convert rocket design values")]
pub struct Cli {
    /// JSON file holding saved default units
    #[arg(long, global = true, env = "GAUGE_PREFS", default_value = "gauge-prefs.json")]
    pub prefs: PathBuf,

    /// Maximum level written to stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "GAUGE_LOG", default_value = "warn", value_parser = Level::from_str)]
    pub log: Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List every group as JSON
    Groups,

    /// List the units of a group, marking the default
    Units { group: String },

    /// Show an SI value in the default unit, or in UNIT
    Format {
        group: String,
        #[arg(allow_negative_numbers = true, value_parser = clap::value_parser!(f64))]
        si: f64,
        unit: Option<String>,
    },

    /// Read "<number> [unit]" and print the SI value
    Parse {
        group: String,
        #[arg(required = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show a stability margin for a body diameter in meters
    Stability {
        #[arg(allow_negative_numbers = true, value_parser = clap::value_parser!(f64))]
        diameter: f64,
        #[arg(allow_negative_numbers = true, value_parser = clap::value_parser!(f64))]
        si: f64,
    },

    /// Change a group's default unit and save it
    Default { group: String, unit: String },

    /// Apply the metric or imperial preset and save the defaults
    Preset {
        #[arg(value_parser = Preset::from_str)]
        preset: Preset,
    },
}

impl Command {
    /// Whether the command changes defaults that should be saved
    pub fn changes_defaults(&self) -> bool {
        matches!(self, Command::Default { .. } | Command::Preset { .. })
    }
}
