//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const PAGE: &str = r#"<html>
<body>
<h1>Release train</h1>
<!-- BEGIN COMPONENTS -->
Finchley.SR2|Greenwich.RELEASE|Hoxton.BUILD-SNAPSHOT
Component|Last GA|Current GA|Current Snapshot
spring-cloud-build|2.0.4.RELEASE|2.1.0.RELEASE|2.2.0.BUILD-SNAPSHOT
spring-cloud-sleuth|2.0.2.RELEASE|2.1.0.RELEASE|2.2.0.BUILD-SNAPSHOT
<!-- END COMPONENTS -->
</body>
</html>
"#;

/// A bare page repository plus a workspace holding train.toml
pub struct TestSite {
  _root: TempDir,
  pub origin: PathBuf,
  pub workspace: PathBuf,
}

impl TestSite {
  /// Create a site whose origin serves `page` as index.html on main
  pub fn new(page: &str) -> Result<Self> {
    Self::with_config(page, "")
  }

  /// Same as `new`, with extra lines appended to the [git] table
  pub fn with_config(page: &str, extra_git: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let origin = root.path().join("origin.git");
    let seed = root.path().join("seed");
    let workspace = root.path().join("workspace");

    git(root.path(), &["init", "--bare", "--initial-branch=main", "origin.git"])?;

    std::fs::create_dir_all(&seed)?;
    git(&seed, &["init", "--initial-branch=main"])?;
    git(&seed, &["config", "user.name", "Test User"])?;
    git(&seed, &["config", "user.email", "test@example.com"])?;
    std::fs::write(seed.join("index.html"), page)?;
    git(&seed, &["add", "."])?;
    git(&seed, &["commit", "-m", "Initial page"])?;
    git(&seed, &["remote", "add", "origin", &origin.to_string_lossy()])?;
    git(&seed, &["push", "origin", "main"])?;

    std::fs::create_dir_all(&workspace)?;
    std::fs::write(
      workspace.join("train.toml"),
      format!(
        r#"[git]
docs_repo_url = "{}"
author_name = "Release Bot"
author_email = "release-bot@example.com"
{}

[meta_release]
release_train_project_name = "spring-cloud-release"
"#,
        origin.to_string_lossy().replace('\\', "/"),
        extra_git
      ),
    )?;

    Ok(Self {
      _root: root,
      origin,
      workspace,
    })
  }

  /// index.html as it is on origin's main branch
  pub fn origin_page(&self) -> Result<String> {
    let output = git_dir(&self.origin, &["show", "main:index.html"])?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }

  /// Subjects of origin's main branch, newest first
  pub fn origin_log(&self) -> Result<Vec<String>> {
    let output = git_dir(&self.origin, &["log", "--format=%s", "main"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Read a file under the workspace
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.workspace.join(path))?)
  }

  /// Check if a file exists under the workspace
  pub fn file_exists(&self, path: &str) -> bool {
    self.workspace.join(path).exists()
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run git against a bare repository
fn git_dir(repo: &Path, args: &[&str]) -> Result<Output> {
  let mut full = vec!["--git-dir", repo.to_str().context("non UTF-8 path")?];
  full.extend_from_slice(args);
  git(repo, &full)
}

/// Run the CLI, failing on a non-zero exit
pub fn run_release_train_page(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_release_train_page_unchecked(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "release-train-page command failed: release-train-page {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the CLI and return its output whatever the exit status
pub fn run_release_train_page_unchecked(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-train-page");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run release-train-page")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}
