//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use auto_node::logging;
use auto_node::output::OutputConfig;

use crate::commands;
use crate::commands::completions::CompletionShell;

/// auto-node - Batch install ComfyUI custom nodes from a list of GitHub repositories
#[derive(Parser, Debug)]
#[command(name = "auto-node")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    install: commands::install::InstallArgs,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    completions: Option<CompletionShell>,

    /// Directory for the per-run log file
    #[arg(
        long,
        value_name = "DIR",
        env = "AUTO_NODE_LOG_DIR",
        default_value = "."
    )]
    log_dir: PathBuf,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        if let Some(shell) = self.completions {
            return commands::completions::execute(shell);
        }

        let out = OutputConfig::from_env_and_flag(&self.color);
        let level = logging::parse_level(&self.log_level)?;
        let run = logging::init_run_logger(&self.log_dir, level)?;

        commands::install::execute(self.install, &out, run.logger, &run.path)
    }
}
