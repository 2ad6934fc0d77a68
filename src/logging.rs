//! # Run Logging
//!
//! Every run writes its own log file, `installer_<YYYYmmdd_HHMMSS>.log`, and
//! mirrors each record to stderr. The logger is built with `env_logger` but
//! never installed globally: [`init_run_logger`] hands it back so the caller
//! can inject it into the [`crate::installer::Installer`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Local};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

/// A logger for one run, plus the file it writes to.
pub struct RunLogger {
    pub logger: Arc<env_logger::Logger>,
    pub path: PathBuf,
}

/// Writes everything to both stderr and a file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        // The console copy is best effort; a closed stderr must not lose the file log.
        let _ = io::stderr().write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = io::stderr().flush();
        self.file.flush()
    }
}

/// File name of the log for a run started at `started`.
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("installer_{}.log", started.format("%Y%m%d_%H%M%S"))
}

/// Parse a `--log-level` value (error, warn, info, debug, trace, off).
pub fn parse_level(level: &str) -> anyhow::Result<LevelFilter> {
    LevelFilter::from_str(level).map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level '{level}'\n\n\
             hint: Use one of: off, error, warn, info, debug, trace"
        )
    })
}

/// Create the log file for this run in `log_dir` and build a logger that
/// writes `<timestamp> - <LEVEL> - <message>` lines to it and to stderr.
pub fn init_run_logger(log_dir: &Path, level: LevelFilter) -> anyhow::Result<RunLogger> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file_name(Local::now()));

    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let logger = Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(TeeWriter { file })))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .build();

    Ok(RunLogger {
        logger: Arc::new(logger),
        path,
    })
}
