//! Resolve command implementation.
//!
//! Loads the workflow metadata file, wires up the filesystem-backed extension
//! manager when a package directory is given, runs the resolver, and prints
//! the outcome.

use console::style;
use serde::Serialize;

use crate::cli::args::ResolveArgs;
use crate::error::Result;
use crate::extensions::{
    InstalledPackage, LocalExtensionManager, ManifestSource, PackageContext,
};
use crate::workflow::{WorkflowFile, WorkflowResolution, WorkflowResolver};

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// The resolve command implementation.
pub struct ResolveCommand {
    args: ResolveArgs,
}

/// JSON report shape for `--json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    workflow: &'a str,
    description: String,
    #[serde(flatten)]
    resolution: &'a WorkflowResolution,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(args: ResolveArgs) -> Self {
        Self { args }
    }

    /// Execute the command.
    ///
    /// Exit code is 1 when a package directory was supplied and the workflow
    /// still has unresolved sections, so scripts can gate installs on it.
    pub fn execute(&self) -> Result<CommandResult> {
        let workflow = WorkflowFile::load(&self.args.workflow)?;
        tracing::debug!(
            tokens = workflow.nodes_index.len(),
            "Loaded workflow '{}'",
            workflow.name
        );

        let resolver = WorkflowResolver::new().with_host_package(&self.args.host_name);

        let resolution = match &self.args.package_dir {
            Some(dir) => {
                let sources = self
                    .args
                    .manifest
                    .iter()
                    .map(|raw| parse_manifest_source(raw))
                    .collect();
                let manager = LocalExtensionManager::new(sources);
                let package = InstalledPackage::new(&self.args.host_name, dir);
                let context = PackageContext::new(&manager, &package);
                resolver.resolve(&workflow.nodes_index, Some(&context))?
            }
            None => {
                if !self.args.manifest.is_empty() {
                    tracing::warn!("--manifest is ignored without --package-dir");
                }
                resolver.resolve(&workflow.nodes_index, None)?
            }
        };

        if self.args.json {
            let report = JsonReport {
                workflow: &workflow.name,
                description: workflow.pruned_description(),
                resolution: &resolution,
            };
            let rendered =
                serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{rendered}");
        } else {
            print_resolution(&workflow, &resolution, self.args.package_dir.is_some());
        }

        let gate_on_missing = self.args.package_dir.is_some();
        if gate_on_missing && resolution.unresolved_count() > 0 {
            return Ok(CommandResult::failure(1));
        }
        Ok(CommandResult::success())
    }
}

/// Classify a raw `--manifest` value as a URL or a file path.
fn parse_manifest_source(raw: &str) -> ManifestSource {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        ManifestSource::Http(raw.to_string())
    } else {
        ManifestSource::File(raw.into())
    }
}

fn print_resolution(workflow: &WorkflowFile, resolution: &WorkflowResolution, has_context: bool) {
    if !workflow.name.is_empty() {
        println!("{}", style(&workflow.name).bold());
    }
    let description = workflow.pruned_description();
    if !description.is_empty() {
        println!("{}", style(description).dim());
    }

    if resolution.sections.is_empty() {
        println!("No custom-node dependencies.");
        return;
    }

    println!();
    for section in &resolution.sections {
        let marker = if section.is_installed {
            style("✓").green()
        } else if has_context {
            style("✗").red()
        } else {
            style("?").yellow()
        };
        println!("  {} {}", marker, style(&section.title).bold());
        for child in &section.children {
            println!("      {}", style(child).dim());
        }
    }

    if !resolution.missing.is_empty() {
        println!();
        println!(
            "{}",
            style(format!("{} missing, installable from:", resolution.missing.len())).yellow()
        );
        for entry in &resolution.missing {
            println!("  {}  {}", entry.title, style(&entry.reference).dim());
        }
    }
}
