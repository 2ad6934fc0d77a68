//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful hints to
//! print alongside an error. Errors should tell users what went wrong AND
//! how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auto_node::suggestions;
//!
//! if let Err(err) = installer.validate_path(dir) {
//!     for hint in suggestions::for_error(&err) {
//!         println!("hint: {hint}");
//!     }
//! }
//! ```

use std::path::Path;

use crate::defaults::{CLONE_SCRIPT, TARGET_DIR_NAME};
use crate::error::Error;

/// Collect hints for an error returned by the library.
pub fn for_error(error: &Error) -> Vec<String> {
    match error {
        Error::InvalidUrls { invalid, .. } => invalid
            .iter()
            .filter_map(|url| invalid_url(url).map(|hint| format!("{url}: {hint}")))
            .collect(),
        Error::EmptyUrlFile { .. } | Error::NoUrls => {
            vec!["Put one repository URL per line, e.g. https://github.com/owner/repo".to_string()]
        }
        Error::WrongDirectoryName { path, .. } => wrong_directory_name(path),
        Error::MissingMarker { .. } => vec![format!(
            "Point --dir at the '{TARGET_DIR_NAME}' folder inside your ComfyUI installation"
        )],
        Error::CloneScriptMissing { .. } => vec![format!(
            "Run without --validate first so {CLONE_SCRIPT} is copied into the target directory"
        )],
        Error::ResourceDirNotFound { .. } | Error::MissingResource { .. } => vec![
            "Use --resources or AUTO_NODE_RESOURCES to point at the installer 'utils' directory"
                .to_string(),
        ],
        Error::Spawn { program, .. } => vec![format!(
            "Make sure '{program}' is installed and on PATH, or pass --python <PROGRAM>"
        )],
        _ => Vec::new(),
    }
}

/// Explain why a URL was rejected, when the mistake is a common one.
pub fn invalid_url(url: &str) -> Option<String> {
    if let Some(rest) = url.strip_prefix("git@github.com:") {
        let repo = rest.trim_end_matches(".git");
        return Some(format!(
            "SSH URLs are not supported, use https://github.com/{repo}"
        ));
    }

    if let Some(rest) = url.strip_prefix("http://github.com/") {
        return Some(format!("Use https, e.g. https://github.com/{rest}"));
    }

    if let Some(rest) = url.strip_prefix("https://github.com/") {
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() > 2 {
            return Some(format!(
                "Link to the repository root, e.g. https://github.com/{}/{}",
                segments[0], segments[1]
            ));
        }
        if segments.len() < 2 {
            return Some("URL must name both an owner and a repository".to_string());
        }
        return None;
    }

    if url.starts_with("https://") || url.starts_with("http://") {
        return Some("Only repositories hosted on github.com are supported".to_string());
    }

    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() == 2 && parts.iter().all(|p| !p.is_empty() && !p.contains(':')) {
        return Some(format!("Use the full URL: https://github.com/{url}"));
    }

    None
}

/// Hints for a target directory with the wrong base name.
fn wrong_directory_name(path: &Path) -> Vec<String> {
    let mut hints = Vec::new();

    if path.join(TARGET_DIR_NAME).is_dir() {
        hints.push(format!(
            "Did you mean {}?",
            path.join(TARGET_DIR_NAME).display()
        ));
    } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if find_similar(name, &[TARGET_DIR_NAME]).is_some() {
            hints.push(format!(
                "Did you mean '{TARGET_DIR_NAME}'? The directory is named '{name}'"
            ));
        }
    }

    hints
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.to_lowercase().chars().collect();
    let b_chars: Vec<char> = b.to_lowercase().chars().collect();

    // Single-row variant; `prev[j]` is the distance between a[..i] and b[..j].
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a_chars.iter().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (prev[j + 1] + 1)
                .min(current[j] + 1)
                .min(prev[j] + cost);
        }
        prev = current;
    }

    prev[b_chars.len()]
}
