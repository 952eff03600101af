// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_manifest_path;

/// Command-line arguments for `taskguard`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskguard",
    version,
    about = "Check that the files and directories tasks depend on exist before running them.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the manifest (TOML).
    ///
    /// Default: `Taskguard.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_manifest_path())]
    pub manifest: PathBuf,

    /// Check only this task.
    #[arg(long, value_name = "NAME")]
    pub task: Option<String>,

    /// Stop after the first failing task, overriding `[config].stop_on_fail`.
    #[arg(long)]
    pub stop_on_fail: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKGUARD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Do not draw the progress spinner.
    #[arg(long)]
    pub no_progress: bool,

    /// Parse + validate the manifest, print it, but don't check anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::parse_from(["taskguard"]);
        assert_eq!(args.manifest, PathBuf::from("Taskguard.toml"));
        assert!(args.task.is_none());
        assert!(!args.stop_on_fail);
        assert!(!args.dry_run);
    }

    #[test]
    fn flags() {
        let args = CliArgs::parse_from([
            "taskguard",
            "--manifest",
            "ci/Taskguard.toml",
            "--task",
            "build",
            "--stop-on-fail",
            "--log-level",
            "debug",
            "--no-progress",
        ]);
        assert_eq!(args.manifest, PathBuf::from("ci/Taskguard.toml"));
        assert_eq!(args.task.as_deref(), Some("build"));
        assert!(args.stop_on_fail);
        assert!(args.no_progress);
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
