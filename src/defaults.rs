//! Fixed names and default locations for auto-node.
//!
//! The file names here are an integration contract with the clone script
//! and with the ComfyUI directory layout. They are not configurable.

use std::env;
use std::path::PathBuf;

/// Required base name of the target directory.
pub const TARGET_DIR_NAME: &str = "custom_nodes";

/// File that must exist in the target directory's parent.
pub const MARKER_FILE: &str = "main.py";

/// Script staged into the target directory and run to clone repositories.
pub const CLONE_SCRIPT: &str = "clone-custom-nodes.py";

/// Files copied from the resource directory into the target directory.
pub const STAGED_FILES: [&str; 3] = [CLONE_SCRIPT, "package-preparation.py", "start-prep.bat"];

/// Name of the repository list written into the target directory.
pub const REPO_LIST_FILE: &str = "comfy-repos.txt";

/// Name of the resource directory shipped next to the executable.
pub const RESOURCE_DIR_NAME: &str = "utils";

/// Returns the default bundled resource directory.
///
/// This is `utils/` next to the running executable. Falls back to `utils`
/// relative to the current directory when the executable path cannot be
/// determined.
///
/// This can be overridden by the `--resources` CLI flag or the
/// `AUTO_NODE_RESOURCES` environment variable.
pub fn default_resource_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(RESOURCE_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(RESOURCE_DIR_NAME))
}

/// Returns the interpreter used to run the clone script.
pub fn default_interpreter() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}
