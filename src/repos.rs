//! # Repository URL Lists
//!
//! Reading and validating the list of GitHub repositories to install.
//!
//! The two steps are deliberately separate: [`read_url_list`] only loads and
//! cleans lines from a file, and [`validate_urls`] decides whether every
//! entry is an acceptable repository URL. Callers run both.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Pattern a repository URL must match in full.
pub const REPO_URL_PATTERN: &str = r"^https://github\.com/[a-zA-Z0-9-]+/[a-zA-Z0-9-._]+/?$";

static REPO_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REPO_URL_PATTERN).expect("repository URL pattern compiles"));

/// Returns true if `url` is an installable GitHub repository URL.
pub fn is_repo_url(url: &str) -> bool {
    REPO_URL.is_match(url)
}

/// Validate a list of repository URLs.
///
/// Order is preserved and duplicates are kept. The operation is
/// all-or-nothing: if any URL is rejected the result is
/// [`Error::InvalidUrls`], which lists the rejected entries and still carries
/// the accepted ones for inspection.
///
/// # Errors
///
/// - [`Error::NoUrls`] if `urls` is empty.
/// - [`Error::InvalidUrls`] if at least one entry does not match
///   [`REPO_URL_PATTERN`].
pub fn validate_urls<S: AsRef<str>>(urls: &[S]) -> Result<Vec<String>> {
    if urls.is_empty() {
        return Err(Error::NoUrls);
    }

    let (valid, invalid): (Vec<String>, Vec<String>) = urls
        .iter()
        .map(|url| url.as_ref().to_string())
        .partition(|url| is_repo_url(url));

    if !invalid.is_empty() {
        return Err(Error::InvalidUrls { invalid, valid });
    }

    Ok(valid)
}

/// Read repository URLs from a text file, one per line.
///
/// Lines are trimmed and blank lines are dropped. The URLs are returned in
/// file order and are not checked against the repository pattern.
///
/// # Errors
///
/// - [`Error::UrlFileNotFound`] if the file does not exist.
/// - [`Error::UrlFileRead`] if it cannot be read as UTF-8 text.
/// - [`Error::EmptyUrlFile`] if no non-blank line remains.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::UrlFileNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::UrlFileRead {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if urls.is_empty() {
        return Err(Error::EmptyUrlFile {
            path: path.to_path_buf(),
        });
    }

    Ok(urls)
}
