//! Shared test utilities for E2E tests.
//!
//! This module provides a ComfyUI-shaped fixture and helpers to run the
//! `auto-node` binary against it.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_repo_list(urls::VALID);
//!     fixture.command().arg("-v").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
#[allow(unused_imports)]
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::urls;
    pub use super::TestFixture;
}

/// Repository lists used across tests.
#[allow(dead_code)]
pub mod urls {
    /// Two valid repositories.
    pub const VALID: &str = "https://github.com/ltdrdata/ComfyUI-Manager\n\
                             https://github.com/cubiq/ComfyUI_essentials/\n";

    /// One valid and one invalid entry.
    pub const MIXED: &str = "https://github.com/foo/bar\nnot-a-url\n";

    /// Only blank lines.
    pub const BLANK: &str = "\n   \n\t\n";
}

/// Files the installer copies into `custom_nodes`.
#[allow(dead_code)]
pub const STAGED_FILES: [&str; 3] = [
    "clone-custom-nodes.py",
    "package-preparation.py",
    "start-prep.bat",
];

/// A temporary ComfyUI installation with a resource directory.
///
/// Layout:
///
/// ```text
/// <tmp>/ComfyUI/main.py
/// <tmp>/ComfyUI/custom_nodes/
/// <tmp>/utils/{clone-custom-nodes.py,package-preparation.py,start-prep.bat}
/// <tmp>/logs/
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a complete fixture.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("ComfyUI/main.py")
            .write_str("# ComfyUI entry point\n")
            .expect("Failed to write main.py");
        temp_dir
            .child("ComfyUI/custom_nodes")
            .create_dir_all()
            .expect("Failed to create custom_nodes");
        for file in STAGED_FILES {
            temp_dir
                .child("utils")
                .child(file)
                .write_str(&format!("# {file}\n"))
                .expect("Failed to write staged file");
        }
        Self { temp_dir }
    }

    /// Write the repository list file.
    pub fn with_repo_list(self, content: &str) -> Self {
        self.temp_dir
            .child("repos.txt")
            .write_str(content)
            .expect("Failed to write repos.txt");
        self
    }

    /// Replace the bundled clone script with `body`.
    pub fn with_clone_script(self, body: &str) -> Self {
        self.temp_dir
            .child("utils/clone-custom-nodes.py")
            .write_str(body)
            .expect("Failed to write clone script");
        self
    }

    /// Remove one of the bundled files.
    pub fn without_resource(self, file: &str) -> Self {
        std::fs::remove_file(self.temp_dir.child("utils").child(file).path())
            .expect("Failed to remove resource");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn custom_nodes(&self) -> PathBuf {
        self.path().join("ComfyUI").join("custom_nodes")
    }

    pub fn repo_list(&self) -> PathBuf {
        self.path().join("repos.txt")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.path().join("logs")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Log files written by runs against this fixture.
    pub fn log_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.log_dir())
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a command that runs in the fixture, logs into `logs/`, and
    /// stages from `utils/`.
    ///
    /// Ambient `AUTO_NODE_*` variables are cleared so the host environment
    /// cannot leak into the test.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("auto-node");
        cmd.current_dir(self.path())
            .env_remove("AUTO_NODE_RESOURCES")
            .env_remove("AUTO_NODE_PYTHON")
            .env_remove("AUTO_NODE_LOG_DIR")
            .arg("--color")
            .arg("never")
            .arg("--log-dir")
            .arg(self.log_dir())
            .arg("--resources")
            .arg(self.path().join("utils"));
        cmd
    }

    /// Like [`TestFixture::command`] with `--file` and `--dir` filled in.
    #[allow(dead_code)]
    pub fn install_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--file")
            .arg(self.repo_list())
            .arg("--dir")
            .arg(self.custom_nodes());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_has_comfyui_layout() {
        let fixture = TestFixture::new();
        assert!(fixture.path().join("ComfyUI/main.py").is_file());
        assert!(fixture.custom_nodes().is_dir());
        for file in STAGED_FILES {
            assert!(fixture.path().join("utils").join(file).is_file());
        }
    }

    #[test]
    fn test_fixture_with_repo_list() {
        let fixture = TestFixture::new().with_repo_list(urls::VALID);
        assert!(fixture.repo_list().exists());
    }
}
