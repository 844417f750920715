//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// Grasshopper - SSH connection shortcuts, connectivity probes and update checks
#[derive(Parser, Debug)]
#[command(name = "grasshopper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human, json, plain)
    #[arg(long, short = 'O', global = true, value_enum, default_value_t)]
    pub output_format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/grasshopper/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether a newer release is available
    Check(commands::check::CheckArgs),

    /// Compare two MAJOR.MINOR.PATCH versions
    Compare(commands::compare::CompareArgs),

    /// Probe whether a host accepts TCP connections
    Probe(commands::probe::ProbeArgs),

    /// Print the ssh command line for a connection
    Ssh(commands::ssh::SshArgs),
}
