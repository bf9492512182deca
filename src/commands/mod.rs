//! CLI commands for release-train-page
//!
//! - **update**: rewrite, commit and push the page for the given versions
//! - **plan**: show what `update` would do, without committing
//! - **parse**: print the components table of a local page

pub mod parse;
pub mod plan;
pub mod update;

pub use parse::run_parse;
pub use plan::run_plan;
pub use update::run_update;

use crate::core::error::{TrainError, TrainResult};
use crate::project::Projects;
use std::path::Path;
use tracing::debug;

/// Versions from the projects file, overridden by `name=version` pairs
pub fn load_projects(file: Option<&Path>, pairs: &[String]) -> TrainResult<Projects> {
  let projects = match file {
    Some(path) => Projects::load(path)?,
    None => Projects::default(),
  }
  .with_overrides(pairs)?;

  if projects.is_empty() {
    return Err(TrainError::with_help(
      "No project versions given",
      "Pass --projects <file> or --project name=version",
    ));
  }
  for project in projects.iter() {
    debug!("Project [{}] at version [{}]", project.name, project.version);
  }
  Ok(projects)
}
