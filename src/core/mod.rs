//! Core plumbing shared by every command
//!
//! - **config**: train.toml parsing and validation
//! - **context**: configuration loaded once per run
//! - **error**: error types with contextual help messages
//! - **vcs**: access to the page repository (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
