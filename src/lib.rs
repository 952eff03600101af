// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod preflight;
pub mod report;
pub mod resources;
pub mod task;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::config::model::Manifest;
use crate::preflight::Preflight;
use crate::report::{ResultReporter, SpinnerIndicator, TracingLogger};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - manifest loading
/// - the `tracing`-backed reporter and (optional) spinner
/// - the preflight loop over the manifest's tasks
///
/// Returns the process exit code: 0 if every checked task passed.
pub fn run(args: CliArgs) -> Result<i32> {
    let manifest = load_and_validate(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;

    if args.dry_run {
        print_dry_run(&manifest);
        return Ok(0);
    }

    let stop_on_fail = args.stop_on_fail || manifest.config_section().stop_on_fail;

    let mut reporter = ResultReporter::new(Arc::new(TracingLogger));
    let spinner = if args.no_progress {
        None
    } else {
        let spinner = Arc::new(SpinnerIndicator::new());
        reporter = reporter.with_progress_indicator(spinner.clone());
        Some(spinner)
    };

    let mut preflight = Preflight::new(&reporter).stop_on_fail(stop_on_fail);
    if let Some(spinner) = spinner {
        preflight = preflight.with_spinner(spinner);
    }

    let outcome = preflight.run(&manifest, args.task.as_deref())?;
    Ok(outcome.exit_code())
}

/// Simple dry-run output: print tasks and what they check.
fn print_dry_run(manifest: &Manifest) {
    println!("taskguard dry-run");
    println!(
        "  config.stop_on_fail = {}",
        manifest.config_section().stop_on_fail
    );
    println!();

    println!("tasks ({}):", manifest.tasks().len());
    for (name, check) in manifest.tasks() {
        println!("  - {name}");
        println!("      kind: {}", check.kind);
        if !check.inputs.is_empty() {
            println!("      inputs: {:?}", check.inputs);
        }
        for (source, target) in &check.copy {
            println!("      copy: {source} -> {target}");
        }
    }

    debug!("dry-run complete (no checks)");
}
