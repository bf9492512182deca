//! Commit and push operations for SystemGit

use super::system_git::SystemGit;
use crate::core::error::{GitError, ResultExt, TrainError, TrainResult};
use tracing::{debug, info};

impl SystemGit {
  /// Stage every change in the working tree
  pub fn stage_all(&self) -> TrainResult<()> {
    let output = self
      .git_cmd()
      .args(["add", "--all"])
      .output()
      .context("Failed to stage changes")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(TrainError::Git(GitError::CommandFailed {
        command: "git add --all".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Whether the index differs from HEAD
  pub fn has_staged_changes(&self) -> TrainResult<bool> {
    let output = self
      .git_cmd()
      .args(["diff", "--cached", "--quiet"])
      .output()
      .context("Failed to inspect staged changes")?;

    // --quiet exits 1 when there are differences
    match output.status.code() {
      Some(0) => Ok(false),
      Some(1) => Ok(true),
      _ => {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(TrainError::Git(GitError::CommandFailed {
          command: "git diff --cached --quiet".to_string(),
          stderr: stderr.to_string(),
        }))
      }
    }
  }

  /// Stage everything and commit it
  pub fn commit_all(&self, message: &str) -> TrainResult<String> {
    self.stage_all()?;
    if !self.has_staged_changes()? {
      return Err(TrainError::Git(GitError::NothingToCommit {
        path: self.work_tree.clone(),
      }));
    }

    let output = self
      .git_cmd()
      .args(["commit", "-m", message])
      .output()
      .context("Failed to commit")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(TrainError::Git(GitError::CommandFailed {
        command: "git commit".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    let sha = self.head_commit()?;
    debug!("Committed {} in {}", sha, self.work_tree.display());
    Ok(sha)
  }

  /// Push the checked out branch to origin
  pub fn push_current_branch(&self) -> TrainResult<()> {
    let branch = self.current_branch()?;
    debug!("Pushing branch [{}] to origin", branch);

    let output = self
      .git_cmd()
      .args(["push", "origin", &branch])
      .output()
      .context("Failed to push")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(TrainError::Git(GitError::PushFailed {
        remote: "origin".to_string(),
        branch,
        reason: stderr.to_string(),
      }));
    }

    info!("Pushed to origin/{}", branch);
    Ok(())
  }
}
