use crate::core::error::{ConfigError, ResultExt, TrainError, TrainResult};
use crate::page::render::DEFAULT_TEMPLATE_NAME;
use crate::utils::is_local_path;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for release-train-page
/// Searched in order: train.toml, .train.toml, .config/train.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
  pub git: GitConfig,
  pub meta_release: MetaReleaseConfig,
  #[serde(default)]
  pub template: TemplateConfig,
  #[serde(default)]
  pub output: OutputConfig,
}

/// Where the page lives and how it gets updated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
  /// Clone URL or local path of the page repository
  pub docs_repo_url: String,

  /// Branch holding the page (default: "main")
  #[serde(default = "default_docs_branch")]
  pub docs_branch: String,

  /// Directory receiving working copies (default: "target/docs-repo")
  #[serde(default = "default_clone_root")]
  pub clone_root: PathBuf,

  /// Switch for the whole update (default: true)
  #[serde(default = "default_true")]
  pub update_release_train_page: bool,

  /// Commit author name, passed as `-c user.name`
  #[serde(default)]
  pub author_name: Option<String>,

  /// Commit author email, passed as `-c user.email`
  #[serde(default)]
  pub author_email: Option<String>,
}

fn default_docs_branch() -> String {
  "main".to_string()
}

fn default_clone_root() -> PathBuf {
  PathBuf::from("target").join("docs-repo")
}

fn default_true() -> bool {
  true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaReleaseConfig {
  /// Name of the project whose version is the release train version
  pub release_train_project_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
  /// Folder with page templates; the built-in page is used when unset
  #[serde(default)]
  pub template_folder: Option<PathBuf>,

  /// Template file inside `template_folder`
  #[serde(default = "default_page_template")]
  pub page_template: String,
}

fn default_page_template() -> String {
  DEFAULT_TEMPLATE_NAME.to_string()
}

impl Default for TemplateConfig {
  fn default() -> Self {
    Self {
      template_folder: None,
      page_template: default_page_template(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
  /// Copy of every rendered page, kept for inspection
  #[serde(default = "default_local_copy")]
  pub local_copy: PathBuf,
}

fn default_local_copy() -> PathBuf {
  PathBuf::from("target").join("index.html")
}

impl Default for OutputConfig {
  fn default() -> Self {
    Self {
      local_copy: default_local_copy(),
    }
  }
}

impl TrainConfig {
  /// Find config file in search order: train.toml, .train.toml, .config/train.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("train.toml"),
      path.join(".train.toml"),
      path.join(".config").join("train.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, searching the usual locations under `path`
  pub fn load(path: &Path) -> TrainResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      TrainError::Config(ConfigError::NotFound {
        search_root: path.to_path_buf(),
      })
    })?;
    Self::load_file(&config_path)
  }

  /// Load config from an explicit file
  ///
  /// Relative paths in the file are resolved against the file's directory.
  pub fn load_file(config_path: &Path) -> TrainResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: TrainConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base))
  }

  /// Validate required fields
  pub fn validate(&self) -> TrainResult<()> {
    if self.git.docs_repo_url.trim().is_empty() {
      return Err(TrainError::Config(ConfigError::MissingField {
        field: "git.docs_repo_url".to_string(),
      }));
    }
    if self.git.docs_branch.trim().is_empty() {
      return Err(TrainError::Config(ConfigError::MissingField {
        field: "git.docs_branch".to_string(),
      }));
    }
    if self.meta_release.release_train_project_name.trim().is_empty() {
      return Err(TrainError::Config(ConfigError::MissingField {
        field: "meta_release.release_train_project_name".to_string(),
      }));
    }
    if self.template.page_template.trim().is_empty() {
      return Err(TrainError::with_help(
        "Empty template.page_template",
        "Remove the key to use the default page template",
      ));
    }
    Ok(())
  }

  fn resolve_paths(mut self, base: &Path) -> Self {
    let resolve = |p: &Path| if p.is_relative() { base.join(p) } else { p.to_path_buf() };

    if is_local_path(&self.git.docs_repo_url) && Path::new(&self.git.docs_repo_url).is_relative() {
      self.git.docs_repo_url = base.join(&self.git.docs_repo_url).to_string_lossy().to_string();
    }
    self.git.clone_root = resolve(&self.git.clone_root);
    self.template.template_folder = self.template.template_folder.as_deref().map(resolve);
    self.output.local_copy = resolve(&self.output.local_copy);
    self
  }

  /// Name of the release train component
  pub fn release_train_project(&self) -> &str {
    &self.meta_release.release_train_project_name
  }
}
