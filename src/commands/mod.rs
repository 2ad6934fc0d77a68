//! # CLI Command Implementations
//!
//! Each mode of the `auto-node` binary lives in its own file:
//!
//! - `install`: the default flow that reads, validates, stages and installs.
//! - `completions`: shell completion script generation.
//!
//! Each module exposes an `execute` function that performs the work by
//! calling into the `auto_node` library.

pub mod completions;
pub mod install;
