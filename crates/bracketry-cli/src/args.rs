//! Command-line argument definitions for the Bracketry CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every subcommand works on a canvas state file, which holds
//! the drawn grid between runs.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Bracketry bracket tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the canvas state file (TOML)
    #[arg(short, long, default_value = "bracket.toml", global = true)]
    pub state: String,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Operations on the bracket stored in the state file.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw a bracket, replacing any bracket already in the state file
    Build(BuildArgs),
    /// Remove the bracket from the state file
    Remove,
    /// List the matches read back from the state file
    Inspect,
}

/// Arguments of the `build` subcommand.
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// File with one participant per line, in seed order
    #[arg(help = "Path to the participant list")]
    pub participants: String,

    /// First grid row used by the bracket
    #[arg(long, default_value_t = 1)]
    pub start_row: u32,

    /// Stop once this many participants have qualified
    #[arg(short, long)]
    pub qualified: Option<u32>,

    /// Also render the bracket to this SVG file
    #[arg(short, long)]
    pub output: Option<String>,
}
