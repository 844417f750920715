//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod check;
pub mod compare;
pub mod probe;
pub mod ssh;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Check(args) => check::run(ctx, args),
        Commands::Compare(args) => compare::run(ctx, args),
        Commands::Probe(args) => probe::run(ctx, args),
        Commands::Ssh(args) => ssh::run(ctx, args),
    }
}
