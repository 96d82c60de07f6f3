//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::workflow::DEFAULT_HOST_PACKAGE;

/// Packmule - Custom-node dependency resolver for shared workflow files.
#[derive(Debug, Parser)]
#[command(name = "packmule")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a workflow's custom-node dependencies against a local install
    Resolve(ResolveArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Path to the workflow metadata JSON file
    pub workflow: PathBuf,

    /// Root directory of the installed host package (omit to list sections
    /// without installation status)
    #[arg(short, long)]
    pub package_dir: Option<PathBuf>,

    /// Manifest catalog source, a JSON file path or HTTP(S) URL (repeatable;
    /// only consulted together with --package-dir)
    #[arg(short, long)]
    pub manifest: Vec<String>,

    /// Host package name filtered from the section list
    #[arg(long, default_value = DEFAULT_HOST_PACKAGE)]
    pub host_name: String,

    /// Emit the resolution as JSON instead of human-readable output
    #[arg(long)]
    pub json: bool,
}
