//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::Config;

/// Turn a typed schedule into calendar events.
///
/// Each event is a `grade | title | artist | description` line followed by
/// a line with either a date/time (`Oct 30 05:00am`, `2024-10-30 05:00`) or
/// a duration (`30m`, `1h30m`). Events without a date are placed one after
/// another, starting from now.
#[derive(Debug, Parser)]
#[command(name = "evgen", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Default event duration in minutes.
    #[arg(long, global = true, value_name = "MINUTES")]
    pub duration: Option<u32>,

    /// Gap between auto-placed events in minutes.
    #[arg(long, global = true, value_name = "MINUTES")]
    pub gap: Option<u32>,

    /// Timezone label shown in the preview (e.g., Europe/Berlin).
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// Report malformed headers and unrecognized detail lines.
    #[arg(long, global = true)]
    pub warnings: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Applies command-line overrides on top of loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(duration) = self.duration {
            config.default_duration_minutes = duration;
        }
        if let Some(gap) = self.gap {
            config.gap_minutes = gap;
        }
        if let Some(timezone) = &self.timezone {
            config.timezone.clone_from(timezone);
        }
        if self.warnings {
            config.emit_warnings = true;
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the parsed events.
    Preview {
        /// Schedule file (reads stdin if omitted).
        file: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write the events as an iCalendar file.
    Export {
        /// Schedule file (reads stdin if omitted).
        file: Option<PathBuf>,

        /// Output path (writes to stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Move an event to another position.
    Move {
        /// Schedule file (reads stdin if omitted).
        file: Option<PathBuf>,

        /// Position of the event to move (1-based, as in the preview).
        #[arg(long)]
        from: usize,

        /// Position to move it to (1-based).
        #[arg(long)]
        to: usize,

        /// Rewrite the file instead of printing the result.
        #[arg(long, requires = "file")]
        in_place: bool,
    },
}
