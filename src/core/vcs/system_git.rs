//! System git backend
//!
//! Every operation shells out to `git` with an isolated environment, so the
//! user's global configuration cannot change what gets committed or pushed.

use crate::core::error::{GitError, ResultExt, TrainError, TrainResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Name and email recorded on commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub name: String,
  pub email: String,
}

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Working tree root
  pub(crate) work_tree: PathBuf,

  /// Identity for commits; git's own configuration is used when unset
  pub(crate) identity: Option<Identity>,
}

impl SystemGit {
  /// Open a git repository
  pub fn open(path: &Path) -> TrainResult<Self> {
    let output = base_cmd()
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(TrainError::Git(GitError::CommandFailed {
        command: "git rev-parse --show-toplevel".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(Self {
      work_tree: PathBuf::from(stdout.trim()),
      identity: None,
    })
  }

  /// Clone a single branch of `url` into `dest`
  pub fn clone_branch(url: &str, branch: &str, dest: &Path) -> TrainResult<Self> {
    if let Some(parent) = dest.parent() {
      std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let output = base_cmd()
      .args(["clone", "--single-branch", "--branch", branch, url])
      .arg(dest)
      .output()
      .context("Failed to execute git clone")?;

    if !output.status.success() {
      return Err(TrainError::Git(GitError::CloneFailed {
        url: url.to_string(),
        reason: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }

    Ok(Self {
      work_tree: dest.to_path_buf(),
      identity: None,
    })
  }

  /// Record commits under `identity`
  pub fn with_identity(mut self, identity: Option<Identity>) -> Self {
    self.identity = identity;
    self
  }

  /// Working tree root
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Get HEAD commit SHA
  pub fn head_commit(&self) -> TrainResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "HEAD"])
      .output()
      .context("Failed to get HEAD commit")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(TrainError::Git(GitError::CommandFailed {
        command: "git rev-parse HEAD".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Get current branch name
  pub fn current_branch(&self) -> TrainResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--abbrev-ref", "HEAD"])
      .output()
      .context("Failed to get current branch")?;

    if !output.status.success() {
      return Ok("HEAD".to_string()); // Detached HEAD
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Git command bound to the working tree, with the commit identity applied
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = base_cmd();
    cmd.arg("-C").arg(&self.work_tree);

    if let Some(identity) = &self.identity {
      cmd.arg("-c").arg(format!("user.name={}", identity.name));
      cmd.arg("-c").arg(format!("user.email={}", identity.email));
    }

    cmd
  }
}

/// Variables kept in git's environment; the SSH ones let pushes reach an agent
const PASSTHROUGH_ENV: &[&str] = &["PATH", "HOME", "SSH_AUTH_SOCK", "GIT_SSH_COMMAND"];

/// Create a safe git command with isolated environment
///
/// - Clears environment variables
/// - Whitelists only `PASSTHROUGH_ENV`
/// - Adds safe configuration overrides
fn base_cmd() -> Command {
  let mut cmd = Command::new("git");

  // Isolated environment (don't trust global config)
  isolate_env(&mut cmd, |name| std::env::var(name).ok());

  // Force safe behavior (override user config)
  cmd.arg("-c").arg("advice.detachedHead=false");
  cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
  cmd.arg("-c").arg("commit.gpgSign=false");

  cmd
}

fn isolate_env(cmd: &mut Command, lookup: impl Fn(&str) -> Option<String>) {
  cmd.env_clear();
  for &name in PASSTHROUGH_ENV {
    if let Some(value) = lookup(name) {
      cmd.env(name, value);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn git(cwd: &Path, args: &[&str]) {
    let status = Command::new("git").current_dir(cwd).args(args).status().unwrap();
    assert!(status.success(), "git {:?}", args);
  }

  fn repo_with_commit() -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "--initial-branch=main"]);
    std::fs::write(dir.path().join("index.html"), "page").unwrap();
    git(dir.path(), &["add", "."]);
    git(
      dir.path(),
      &["-c", "user.name=Test", "-c", "user.email=test@example.com", "commit", "-m", "init"],
    );
    dir
  }

  #[test]
  fn test_isolated_env_keeps_ssh_agent() {
    let mut cmd = Command::new("git");
    isolate_env(&mut cmd, |name| match name {
      "PATH" => Some("/usr/bin".to_string()),
      "SSH_AUTH_SOCK" => Some("/tmp/agent.sock".to_string()),
      "GIT_SSH_COMMAND" => Some("ssh -i key".to_string()),
      _ => None,
    });

    let envs: Vec<(String, Option<String>)> = cmd
      .get_envs()
      .map(|(k, v)| {
        (
          k.to_string_lossy().to_string(),
          v.map(|v| v.to_string_lossy().to_string()),
        )
      })
      .collect();
    assert!(envs.contains(&("SSH_AUTH_SOCK".to_string(), Some("/tmp/agent.sock".to_string()))));
    assert!(envs.contains(&("GIT_SSH_COMMAND".to_string(), Some("ssh -i key".to_string()))));
    assert!(envs.contains(&("PATH".to_string(), Some("/usr/bin".to_string()))));
    assert!(!envs.iter().any(|(k, _)| k == "HOME"));
  }

  #[test]
  fn test_open_and_branch() {
    let repo = repo_with_commit();
    let git = SystemGit::open(repo.path()).unwrap();
    assert_eq!(git.current_branch().unwrap(), "main");
    assert_eq!(git.head_commit().unwrap().len(), 40);
  }

  #[test]
  fn test_open_outside_repo_fails() {
    let dir = TempDir::new().unwrap();
    assert!(SystemGit::open(dir.path()).is_err());
  }

  #[test]
  fn test_clone_branch() {
    let origin = repo_with_commit();
    let target = TempDir::new().unwrap();
    let dest = target.path().join("nested").join("page");

    let git = SystemGit::clone_branch(&origin.path().to_string_lossy(), "main", &dest).unwrap();
    assert!(dest.join("index.html").exists());
    assert_eq!(git.current_branch().unwrap(), "main");
  }

  #[test]
  fn test_clone_missing_branch_fails() {
    let origin = repo_with_commit();
    let target = TempDir::new().unwrap();
    let err = SystemGit::clone_branch(&origin.path().to_string_lossy(), "gh-pages", &target.path().join("page"))
      .err()
      .unwrap();
    assert!(matches!(err, TrainError::Git(GitError::CloneFailed { .. })));
  }
}
