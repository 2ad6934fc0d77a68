//! # Install Command Implementation
//!
//! The default flow of `auto-node`: read the repository list, validate it and
//! the target directory, stage the installer files, ask for confirmation and
//! run the clone script.
//!
//! ## Exit Codes
//!
//! - `0`: installation succeeded, `--validate` passed, or the user declined
//!   the confirmation prompt.
//! - `1`: any validation, staging or install failure, including a clone
//!   script that exits non-zero.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use log::Log;

use auto_node::defaults::{self, TARGET_DIR_NAME};
use auto_node::error::Error;
use auto_node::installer::{InstallOutcome, Installer};
use auto_node::output::{OutputConfig, Status};
use auto_node::repos;
use auto_node::suggestions;

/// Install custom nodes listed in a file
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Path to text file containing GitHub URLs (one per line)
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "completions"
    )]
    pub file: Option<PathBuf>,

    /// Path to ComfyUI custom_nodes directory
    /// (if not specified, will prompt for input)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Validate inputs without performing installation
    #[arg(short, long)]
    pub validate: bool,

    /// Install without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Directory containing the bundled installer files.
    ///
    /// Defaults to the `utils` directory next to the auto-node executable.
    #[arg(long, value_name = "DIR", env = "AUTO_NODE_RESOURCES")]
    pub resources: Option<PathBuf>,

    /// Interpreter used to run the clone script (defaults to python3, or
    /// python on Windows)
    #[arg(long, value_name = "PROGRAM", env = "AUTO_NODE_PYTHON")]
    pub python: Option<String>,
}

/// Execute the install flow.
///
/// `logger` receives the installer's log records and writes them to
/// `log_path`; the CLI writes its own progress to stdout.
pub fn execute(
    args: InstallArgs,
    out: &OutputConfig,
    logger: Arc<dyn Log>,
    log_path: &Path,
) -> Result<()> {
    let Some(file) = args.file else {
        anyhow::bail!("A repository list is required\n\nhint: Pass -f/--file <FILE>");
    };

    let resource_dir = args.resources.unwrap_or_else(defaults::default_resource_dir);
    let mut installer = Installer::new(resource_dir).with_logger(logger);
    if let Some(python) = args.python {
        installer = installer.with_interpreter(python);
    }

    println!(
        "{} Reading URLs from file: {}",
        out.tag(Status::Scan),
        file.display()
    );
    let urls = repos::read_url_list(&file).map_err(with_hints)?;
    println!("{} Found {} GitHub URLs", out.tag(Status::Info), urls.len());

    let urls = repos::validate_urls(&urls).map_err(with_hints)?;

    let dir = match args.dir {
        Some(dir) => dir,
        None => prompt_for_dir()?,
    };

    installer.validate_path(&dir).map_err(with_hints)?;
    println!("{} Path validation: Path is valid", out.tag(Status::Ok));

    if args.validate {
        println!("{} Validation successful!", out.tag(Status::Ok));
        return Ok(());
    }

    installer
        .persist_and_stage(&urls, &dir)
        .map_err(with_hints)?;
    println!(
        "{} Repository list and required files saved successfully!",
        out.tag(Status::Ok)
    );

    if !args.yes && !confirm_install()? {
        println!("{} Installation cancelled", out.tag(Status::Cancelled));
        return Ok(());
    }

    let outcome = run_with_spinner(out, || installer.run_install(&dir)).map_err(with_hints)?;
    println!("{}", outcome.report);

    if !outcome.success {
        println!(
            "{} Installation completed with errors. Check the log for details: {}",
            out.tag(Status::Warning),
            log_path.display()
        );
        anyhow::bail!(
            "Clone script exited with {}",
            outcome
                .exit_code
                .map(|code| format!("status {code}"))
                .unwrap_or_else(|| "a signal".to_string())
        );
    }

    println!(
        "{} Installation completed successfully!",
        out.tag(Status::Ok)
    );
    Ok(())
}

/// Attach suggestion hints to a library error.
fn with_hints(err: Error) -> anyhow::Error {
    let hints = suggestions::for_error(&err);
    if hints.is_empty() {
        return err.into();
    }

    let hints: Vec<String> = hints.iter().map(|hint| format!("hint: {hint}")).collect();
    anyhow::anyhow!("{err}\n\n{}", hints.join("\n"))
}

/// Ask for the target directory.
fn prompt_for_dir() -> Result<String> {
    let prompt = format!("Enter the path to your ComfyUI {TARGET_DIR_NAME} directory");
    let input = if is_interactive() {
        let theme = ColorfulTheme::default();
        Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?
    } else {
        read_answer(&prompt)?
    };

    Ok(clean_dir_input(&input))
}

/// Strip whitespace and the quotes a file manager adds when copying a path.
fn clean_dir_input(input: &str) -> String {
    let trimmed = input.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

/// Ask before running the clone script. Only "y" or "Y" confirms.
fn confirm_install() -> Result<bool> {
    const PROMPT: &str = "Ready to install nodes. Continue?";

    if is_interactive() {
        let theme = ColorfulTheme::default();
        let confirmed = Confirm::with_theme(&theme)
            .with_prompt(PROMPT)
            .default(false)
            .interact()?;
        return Ok(confirmed);
    }

    let answer = read_answer(&format!("{PROMPT} (y/n)"))?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

/// dialoguer needs a terminal on both ends; piped input falls back to
/// plain line reads.
fn is_interactive() -> bool {
    io::stdin().is_terminal() && console::user_attended_stderr()
}

fn read_answer(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// Run the clone script while a spinner is shown on an interactive stderr.
fn run_with_spinner<F>(out: &OutputConfig, run: F) -> Result<InstallOutcome, Error>
where
    F: FnOnce() -> Result<InstallOutcome, Error>,
{
    if !out.spinner_enabled() {
        println!("{} Installing nodes...", out.tag(Status::Info));
        return run();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("Installing nodes...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = run();
    spinner.finish_and_clear();
    result
}
