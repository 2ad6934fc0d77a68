//! # Error Handling
//!
//! This module defines the centralized error type for `auto-node`. It uses
//! the `thiserror` library to create an `Error` enum covering every failure
//! the installer can detect, with messages written for the person running
//! the tool.
//!
//! ## Key Components
//!
//! - **`Error`**: every failure mode of the library. Variants carry the
//!   offending path, URL or file name so the message is actionable.
//! - **`ErrorCategory`**: the coarse taxonomy the variants fall into
//!   (input, path, resource, subprocess). Used for logging and by callers
//!   that only care about the kind of failure.
//! - **`Result<T>`**: a type alias for `std::result::Result<T, Error>`.
//!
//! A clone script that runs but exits non-zero is *not* an error: it is
//! reported through [`crate::installer::InstallOutcome`]. Only the inability
//! to start the script at all becomes [`Error::Spawn`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for auto-node operations
#[derive(Error, Debug)]
pub enum Error {
    /// The URL list handed to validation was empty.
    #[error("No repository URLs provided")]
    NoUrls,

    /// One or more URLs failed the GitHub repository pattern.
    ///
    /// `valid` holds the URLs that did match, in input order. It is kept for
    /// inspection only; a caller must not proceed with a partial list.
    #[error("Invalid GitHub URLs found:\n{}", invalid.join("\n"))]
    InvalidUrls {
        invalid: Vec<String>,
        valid: Vec<String>,
    },

    /// The URL list file does not exist.
    #[error("File not found: {}", path.display())]
    UrlFileNotFound { path: PathBuf },

    /// The URL list file exists but has no non-empty lines.
    #[error("No URLs found in the file")]
    EmptyUrlFile { path: PathBuf },

    /// The URL list file could not be read.
    #[error("Error reading URLs from file: {source}")]
    UrlFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target directory argument was empty or whitespace.
    #[error("Path cannot be empty!")]
    EmptyPath,

    #[error("Path does not exist: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// The target directory has the wrong base name.
    #[error("Directory must be named '{expected}'")]
    WrongDirectoryName { path: PathBuf, expected: &'static str },

    /// The parent of the target directory lacks the marker file.
    #[error("Directory does not appear to be a ComfyUI installation ({marker} not found in parent directory)")]
    MissingMarker { parent: PathBuf, marker: &'static str },

    /// The filesystem refused to answer a question about the target path.
    #[error("Error validating path: {source}")]
    PathAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bundled resource directory is missing.
    #[error("Utils directory not found: {}", path.display())]
    ResourceDirNotFound { path: PathBuf },

    /// A staged file is missing from the bundled resource directory.
    #[error("Required file not found: {file}")]
    MissingResource { file: &'static str },

    /// Copying a staged file into the target directory failed.
    #[error("Error copying required files: {file}: {source}")]
    Copy {
        file: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Writing the persisted repository list failed.
    #[error("Error saving repositories: {source}")]
    SaveList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The clone script has not been staged into the target directory.
    #[error("{script} not found! Please save repository list first.")]
    CloneScriptMissing { script: &'static str },

    /// The clone script could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad or missing URL input.
    Input,
    /// The target directory does not follow the ComfyUI layout.
    Path,
    /// Bundled files or target-side writes are unavailable.
    Resource,
    /// The external clone script could not be invoked.
    Subprocess,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Path => "path",
            ErrorCategory::Resource => "resource",
            ErrorCategory::Subprocess => "subprocess",
        };
        f.write_str(name)
    }
}

impl Error {
    /// The taxonomy bucket this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NoUrls
            | Error::InvalidUrls { .. }
            | Error::UrlFileNotFound { .. }
            | Error::EmptyUrlFile { .. }
            | Error::UrlFileRead { .. } => ErrorCategory::Input,
            Error::EmptyPath
            | Error::PathNotFound { .. }
            | Error::NotADirectory { .. }
            | Error::WrongDirectoryName { .. }
            | Error::MissingMarker { .. }
            | Error::PathAccess { .. } => ErrorCategory::Path,
            Error::ResourceDirNotFound { .. }
            | Error::MissingResource { .. }
            | Error::Copy { .. }
            | Error::SaveList { .. }
            | Error::CloneScriptMissing { .. } => ErrorCategory::Resource,
            Error::Spawn { .. } => ErrorCategory::Subprocess,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
