//! Command-line interface for Packmule.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`resolve`] - The `resolve` command implementation

pub mod args;
pub mod resolve;

pub use args::{Cli, Commands, ResolveArgs};
pub use resolve::{CommandResult, ResolveCommand};

use crate::error::Result;

/// Dispatch and execute a CLI command.
pub fn dispatch(cli: &Cli) -> Result<CommandResult> {
    match &cli.command {
        Commands::Resolve(args) => ResolveCommand::new(args.clone()).execute(),
    }
}
