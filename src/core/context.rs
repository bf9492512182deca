//! Command context - configuration and collaborators built once in main.rs
//!
//! ```text
//! main.rs:
//!   TrainContext::build() -> &TrainContext
//!   |
//!   v
//! commands/update.rs, plan.rs:
//!   fn run_*(ctx: &TrainContext, ...)
//! ```

use crate::core::config::TrainConfig;
use crate::core::error::TrainResult;
use crate::core::vcs::GitDocsRepository;
use crate::page::PageUpdater;
use crate::page::render::{JinjaTemplates, PageRenderer};
use std::path::Path;

/// Loaded configuration for commands that touch the page repository
pub struct TrainContext {
  /// Release train page configuration (train.toml)
  pub config: TrainConfig,
}

impl TrainContext {
  /// Load configuration from `config_path`, or search for it under `root`
  pub fn build(root: &Path, config_path: Option<&Path>) -> TrainResult<Self> {
    let config = match config_path {
      Some(path) => TrainConfig::load_file(path)?,
      None => TrainConfig::load(root)?,
    };

    Ok(Self { config })
  }

  /// Page updater wired to system git and the configured templates
  pub fn updater(&self) -> TrainResult<PageUpdater<GitDocsRepository, JinjaTemplates>> {
    let repo = GitDocsRepository::new(self.config.git.clone());
    let renderer = PageRenderer::from_config(&self.config.template)?;
    Ok(PageUpdater::new(self.config.clone(), repo, renderer))
  }
}
