//! # auto-node Library
//!
//! This library installs ComfyUI custom nodes in bulk. It is used by the
//! `auto-node` command-line tool but can be driven directly.
//!
//! ## Quick Example
//!
//! ```no_run
//! use auto_node::installer::Installer;
//! use auto_node::repos;
//! use std::path::Path;
//!
//! let urls = repos::read_url_list(Path::new("repos.txt"))?;
//! let installer = Installer::new("utils");
//! installer.persist_and_stage(&urls, "/opt/ComfyUI/custom_nodes")?;
//!
//! let outcome = installer.run_install("/opt/ComfyUI/custom_nodes")?;
//! println!("{}", outcome.report);
//! # Ok::<(), auto_node::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Repository lists (`repos`)**: reading URL files and checking each entry
//!   against the GitHub repository pattern.
//! - **Installer (`installer`)**: validating the `custom_nodes` directory,
//!   staging the clone script and its helpers, saving the repository list and
//!   running the clone script.
//! - **Defaults (`defaults`)**: the fixed file and directory names shared with
//!   ComfyUI and the clone script.
//! - **Logging (`logging`)**: a per-run log file mirrored to the console.
//!
//! The network work of cloning is done by the external clone script; this
//! crate only prepares its inputs and reports its result.

pub mod defaults;
pub mod error;
pub mod installer;
pub mod logging;
pub mod output;
pub mod repos;
pub mod suggestions;
