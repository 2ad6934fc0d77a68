//! # Custom Node Installer
//!
//! The [`Installer`] validates a ComfyUI `custom_nodes` directory, stages the
//! clone script and its helpers into it, persists the repository list, and
//! runs the clone script.
//!
//! ## Lifecycle of one install
//!
//! 1. [`Installer::validate_path`] checks the directory layout.
//! 2. [`Installer::persist_and_stage`] copies the staged files from the
//!    resource directory and writes [`REPO_LIST_FILE`].
//! 3. [`Installer::run_install`] runs [`CLONE_SCRIPT`] inside the target
//!    directory and reports its output.
//!
//! Every operation re-validates what it depends on, so each one can be
//! called on its own.
//!
//! ## Logging
//!
//! The installer writes to whatever [`log::Log`] it was given with
//! [`Installer::with_logger`]. Without one it forwards to the global `log`
//! facade.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use log::{Level, Log, Metadata, Record};

use crate::defaults::{
    default_interpreter, CLONE_SCRIPT, MARKER_FILE, REPO_LIST_FILE, STAGED_FILES,
    TARGET_DIR_NAME,
};
use crate::error::{Error, Result};
use crate::repos::validate_urls;

/// Banner appended to every install report.
pub const COMPLETION_BANNER: &str = "Installation process completed!";

const SEPARATOR_WIDTH: usize = 50;

const LOG_TARGET: &str = "auto_node::installer";

/// Result of running the clone script.
///
/// A script that exits non-zero still produces an outcome, with `success`
/// set to false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// True when the script exited with status zero.
    pub success: bool,
    /// Exit code, if the script was not terminated by a signal.
    pub exit_code: Option<i32>,
    /// Script stdout, then an `Errors:` section with stderr, then the
    /// completion banner.
    pub report: String,
}

/// Forwards records to whatever logger is installed globally.
struct FacadeLogger;

impl Log for FacadeLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// Installs ComfyUI custom nodes into a `custom_nodes` directory.
#[derive(Clone)]
pub struct Installer {
    resource_dir: PathBuf,
    interpreter: OsString,
    logger: Arc<dyn Log>,
}

impl fmt::Debug for Installer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Installer")
            .field("resource_dir", &self.resource_dir)
            .field("interpreter", &self.interpreter)
            .finish_non_exhaustive()
    }
}

impl Installer {
    /// Create an installer that stages files from `resource_dir`.
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            interpreter: OsString::from(default_interpreter()),
            logger: Arc::new(FacadeLogger),
        }
    }

    /// Use `program` to run the clone script instead of the default Python.
    pub fn with_interpreter(mut self, program: impl Into<OsString>) -> Self {
        self.interpreter = program.into();
        self
    }

    /// Send log records to `logger` instead of the global facade.
    pub fn with_logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = logger;
        self
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let record = Record::builder()
            .level(level)
            .target(LOG_TARGET)
            .module_path_static(Some(module_path!()))
            .args(args)
            .build();
        if self.logger.enabled(record.metadata()) {
            self.logger.log(&record);
        }
    }

    fn log_failure(&self, context: &str, error: &Error) {
        self.emit(
            Level::Error,
            format_args!("{context} [{}]: {error}", error.category()),
        );
    }

    /// Check that `path` is a ComfyUI `custom_nodes` directory.
    ///
    /// Checks run in order and the first failure is returned: empty input,
    /// missing path, not a directory, wrong base name, no [`MARKER_FILE`] in
    /// the parent. Filesystem errors are reported as [`Error::PathAccess`];
    /// this never panics.
    pub fn validate_path(&self, path: &str) -> Result<PathBuf> {
        let result = check_target_dir(path);
        if let Err(err) = &result {
            if matches!(err, Error::PathAccess { .. }) {
                self.log_failure("Path validation error", err);
            }
        }
        result
    }

    /// Copy the staged files from the resource directory into `target_dir`.
    ///
    /// Existing files with the same names are overwritten. Files are copied
    /// one at a time; if a later file is missing or fails to copy, the files
    /// copied before it stay in `target_dir`.
    pub fn stage_files(&self, target_dir: &Path) -> Result<()> {
        let result = self.copy_staged_files(target_dir);
        if let Err(err) = &result {
            self.log_failure("Error copying files", err);
        }
        result
    }

    fn copy_staged_files(&self, target_dir: &Path) -> Result<()> {
        if !self.resource_dir.is_dir() {
            return Err(Error::ResourceDirNotFound {
                path: self.resource_dir.clone(),
            });
        }

        for file in STAGED_FILES {
            let source = self.resource_dir.join(file);
            if !source.is_file() {
                return Err(Error::MissingResource { file });
            }
            fs::copy(&source, target_dir.join(file))
                .map_err(|source| Error::Copy { file, source })?;
            self.emit(Level::Debug, format_args!("Staged {file}"));
        }

        Ok(())
    }

    /// Validate inputs, stage the installer files and save the repository list.
    ///
    /// Both the directory and the URLs are validated again here. On success
    /// the URLs are written one per line to [`REPO_LIST_FILE`] inside the
    /// target directory, replacing any previous list, and the path of that
    /// file is returned.
    pub fn persist_and_stage<S: AsRef<str>>(&self, urls: &[S], target_dir: &str) -> Result<PathBuf> {
        self.emit(
            Level::Info,
            format_args!("Attempting to save repositories to {target_dir}"),
        );

        let target = self.validate_path(target_dir)?;
        let urls = validate_urls(urls)?;

        self.stage_files(&target)?;

        let list_path = target.join(REPO_LIST_FILE);
        if let Err(source) = fs::write(&list_path, urls.join("\n")) {
            let err = Error::SaveList {
                path: list_path,
                source,
            };
            self.log_failure("Error saving repositories", &err);
            return Err(err);
        }

        self.emit(Level::Info, format_args!("Repository list saved successfully"));
        Ok(list_path)
    }

    /// Run the staged clone script inside `target_dir`.
    ///
    /// The script is started as `<interpreter> clone-custom-nodes.py` with
    /// `target_dir` as its working directory; the working directory of this
    /// process is not changed. A non-zero exit is returned as an outcome
    /// with `success == false`. Only a failure to start the script is an
    /// [`Error::Spawn`].
    pub fn run_install(&self, target_dir: &str) -> Result<InstallOutcome> {
        self.emit(
            Level::Info,
            format_args!("Starting node installation in {target_dir}"),
        );

        let target = self.validate_path(target_dir)?;

        if !target.join(CLONE_SCRIPT).is_file() {
            return Err(Error::CloneScriptMissing {
                script: CLONE_SCRIPT,
            });
        }

        let program = resolve_program(&self.interpreter);
        let output = Command::new(&program)
            .arg(CLONE_SCRIPT)
            .current_dir(&target)
            .output()
            .map_err(|source| Error::Spawn {
                program: program.to_string_lossy().into_owned(),
                source,
            });
        let output = match output {
            Ok(output) => output,
            Err(err) => {
                self.log_failure("Installation error", &err);
                return Err(err);
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !stdout.is_empty() {
            self.emit(Level::Info, format_args!("Installation output: {stdout}"));
        }
        if !stderr.is_empty() {
            self.emit(Level::Error, format_args!("Installation errors: {stderr}"));
        }

        let report = format_report(&stdout, &stderr);
        self.emit(Level::Info, format_args!("{COMPLETION_BANNER}"));

        Ok(InstallOutcome {
            success: output.status.success(),
            exit_code: output.status.code(),
            report,
        })
    }
}

/// Anchor a relative program path like `venv/bin/python` to the current
/// directory, since the child starts in the target directory. Bare names are
/// left for the `PATH` lookup.
fn resolve_program(program: &OsStr) -> PathBuf {
    let path = Path::new(program);
    if path.is_absolute() || path.components().count() < 2 {
        return path.to_path_buf();
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn check_target_dir(path: &str) -> Result<PathBuf> {
    if path.trim().is_empty() {
        return Err(Error::EmptyPath);
    }

    let target = PathBuf::from(path);
    let metadata = match fs::metadata(&target) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::PathNotFound { path: target });
        }
        Err(source) => {
            return Err(Error::PathAccess {
                path: target,
                source,
            })
        }
    };

    if !metadata.is_dir() {
        return Err(Error::NotADirectory { path: target });
    }

    if target.file_name().and_then(|name| name.to_str()) != Some(TARGET_DIR_NAME) {
        return Err(Error::WrongDirectoryName {
            path: target,
            expected: TARGET_DIR_NAME,
        });
    }

    let parent = target.parent().unwrap_or_else(|| Path::new(""));
    let marker = parent.join(MARKER_FILE);
    match marker.try_exists() {
        Ok(true) => Ok(target),
        Ok(false) => Err(Error::MissingMarker {
            parent: parent.to_path_buf(),
            marker: MARKER_FILE,
        }),
        Err(source) => Err(Error::PathAccess { path: marker, source }),
    }
}

fn format_report(stdout: &str, stderr: &str) -> String {
    let mut report = String::new();
    if !stdout.is_empty() {
        report.push_str(stdout);
        report.push('\n');
    }
    if !stderr.is_empty() {
        report.push_str("\nErrors:\n");
        report.push_str(stderr);
    }
    report.push('\n');
    report.push_str(&"=".repeat(SEPARATOR_WIDTH));
    report.push('\n');
    report.push_str(COMPLETION_BANNER);

    report.trim().to_string()
}
