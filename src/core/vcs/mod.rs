//! Access to the repository holding the release train page

pub mod system_git;
mod system_git_ops;

pub use system_git::{Identity, SystemGit};

use crate::core::config::GitConfig;
use crate::core::error::TrainResult;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

/// Working copies of the page repository
pub trait DocsRepository {
  /// Fresh working copy of the page's branch
  fn clone_docs_repo(&self) -> TrainResult<PathBuf>;

  /// Commit every change in `workdir`
  fn commit(&self, workdir: &Path, message: &str) -> TrainResult<()>;

  /// Push the checked out branch of `workdir`
  fn push(&self, workdir: &Path) -> TrainResult<()>;
}

/// Page repository reached through system git
pub struct GitDocsRepository {
  config: GitConfig,
}

impl GitDocsRepository {
  pub fn new(config: GitConfig) -> Self {
    Self { config }
  }

  fn identity(&self) -> Option<Identity> {
    match (&self.config.author_name, &self.config.author_email) {
      (Some(name), Some(email)) => Some(Identity {
        name: name.clone(),
        email: email.clone(),
      }),
      _ => None,
    }
  }

  fn open(&self, workdir: &Path) -> TrainResult<SystemGit> {
    Ok(SystemGit::open(workdir)?.with_identity(self.identity()))
  }

  /// `<clone_root>/<repo-name>-<timestamp>`
  fn clone_destination(&self) -> PathBuf {
    let url = self.config.docs_repo_url.trim_end_matches('/');
    let name = url
      .rsplit(['/', ':', '\\'])
      .next()
      .unwrap_or("docs")
      .trim_end_matches(".git");
    let name = if name.is_empty() { "docs" } else { name };
    let stamp = Utc::now().format("%Y%m%d%H%M%S%f");
    self.config.clone_root.join(format!("{}-{}", name, stamp))
  }
}

impl DocsRepository for GitDocsRepository {
  fn clone_docs_repo(&self) -> TrainResult<PathBuf> {
    let dest = self.clone_destination();
    info!(
      "Cloning [{}] branch [{}] to {}",
      self.config.docs_repo_url,
      self.config.docs_branch,
      dest.display()
    );
    let git = SystemGit::clone_branch(&self.config.docs_repo_url, &self.config.docs_branch, &dest)?;
    Ok(git.work_tree().to_path_buf())
  }

  fn commit(&self, workdir: &Path, message: &str) -> TrainResult<()> {
    self.open(workdir)?.commit_all(message)?;
    Ok(())
  }

  fn push(&self, workdir: &Path) -> TrainResult<()> {
    self.open(workdir)?.push_current_branch()
  }
}
