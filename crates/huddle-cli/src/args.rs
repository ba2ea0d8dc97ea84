//! Command-line argument definitions for the Huddle CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the room file, the output path, the
//! configuration, and how long and how reproducibly to simulate.

use clap::Parser;

use huddle::config::Preset;

/// Command-line arguments for the Huddle room simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the room file (TOML)
    #[arg(help = "Path to the room file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of 60 Hz frames to simulate before taking the snapshot
    #[arg(long, default_value_t = 300)]
    pub ticks: u64,

    /// Seed for spawn positions; omit for a random layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Layout preset (cozy, compact, dynamic), overriding the configuration
    #[arg(long)]
    pub preset: Option<Preset>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
