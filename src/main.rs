//! # auto-node CLI
//!
//! This is the binary entry point for the `auto-node` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Running the install flow or generating shell completions.
//! - Handling top-level application errors and translating them into a
//!   non-zero exit code.
//!
//! The core logic lives in the `lib.rs` library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
