//! Error types for release-train-page with contextual messages and exit codes
//!
//! Every error belongs to a category (page structure, projects, config, git,
//! persistence) and may carry a help message pointing the user at a fix.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-train-page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, malformed page)
  User = 1,
  /// System error (git, I/O, persistence)
  System = 2,
  /// Validation failure (unknown components)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-train-page
#[derive(Debug)]
pub enum TrainError {
  /// Page structure errors
  Page(PageError),

  /// Projects catalog errors
  Project(ProjectError),

  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Writing the rendered page failed
  Persistence { path: PathBuf, source: io::Error },

  /// Template loading or rendering failed
  Template(String),

  /// I/O errors
  Io(io::Error),

  /// A typed error with added context; keeps the category of `source`
  Context { context: String, source: Box<TrainError> },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl TrainError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    TrainError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    TrainError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Wrap a failed write of `path`
  pub fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
    TrainError::Persistence {
      path: path.into(),
      source,
    }
  }

  /// Add context to an existing error
  ///
  /// `Message` errors accumulate context in place. Every other error is
  /// wrapped, so its exit code and help message still apply.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      TrainError::Message { message, context, help } => TrainError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      TrainError::Context { context, source } => TrainError::Context {
        context: format!("{}\n{}", ctx_str, context),
        source,
      },
      other => TrainError::Context {
        context: ctx_str,
        source: Box::new(other),
      },
    }
  }

  /// The error underneath any added context
  pub fn root_cause(&self) -> &TrainError {
    match self {
      TrainError::Context { source, .. } => source.root_cause(),
      other => other,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      TrainError::Page(_) => ExitCode::User,
      TrainError::Project(_) => ExitCode::Validation,
      TrainError::Config(_) => ExitCode::User,
      TrainError::Git(_) => ExitCode::System,
      TrainError::Persistence { .. } => ExitCode::System,
      TrainError::Template(_) => ExitCode::User,
      TrainError::Io(_) => ExitCode::System,
      TrainError::Context { .. } => self.root_cause().exit_code(),
      TrainError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      TrainError::Page(e) => e.help_message(),
      TrainError::Project(e) => e.help_message(),
      TrainError::Config(e) => e.help_message(),
      TrainError::Git(e) => e.help_message(),
      TrainError::Template(_) => {
        Some("Check [template] in train.toml or drop template_folder to use the built-in page.".to_string())
      }
      TrainError::Context { .. } => self.root_cause().help_message(),
      TrainError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for TrainError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TrainError::Page(e) => write!(f, "{}", e),
      TrainError::Project(e) => write!(f, "{}", e),
      TrainError::Config(e) => write!(f, "{}", e),
      TrainError::Git(e) => write!(f, "{}", e),
      TrainError::Persistence { path, source } => {
        write!(f, "Failed to write {}: {}", path.display(), source)
      }
      TrainError::Template(msg) => write!(f, "Template error: {}", msg),
      TrainError::Io(e) => write!(f, "I/O error: {}", e),
      TrainError::Context { context, source } => write!(f, "{}\n{}", context, source),
      TrainError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for TrainError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      TrainError::Io(e) => Some(e),
      TrainError::Persistence { source, .. } => Some(source),
      TrainError::Context { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for TrainError {
  fn from(err: io::Error) -> Self {
    TrainError::Io(err)
  }
}

impl From<String> for TrainError {
  fn from(msg: String) -> Self {
    TrainError::message(msg)
  }
}

impl From<&str> for TrainError {
  fn from(msg: &str) -> Self {
    TrainError::message(msg)
  }
}

impl From<PageError> for TrainError {
  fn from(err: PageError) -> Self {
    TrainError::Page(err)
  }
}

impl From<ProjectError> for TrainError {
  fn from(err: ProjectError) -> Self {
    TrainError::Project(err)
  }
}

impl From<toml_edit::de::Error> for TrainError {
  fn from(err: toml_edit::de::Error) -> Self {
    TrainError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for TrainError {
  fn from(err: serde_json::Error) -> Self {
    TrainError::message(format!("JSON error: {}", err))
  }
}

impl From<minijinja::Error> for TrainError {
  fn from(err: minijinja::Error) -> Self {
    TrainError::Template(err.to_string())
  }
}

/// Structural problems in the release train page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
  /// The page does not contain exactly one BEGIN/END COMPONENTS pair
  MissingMarkers { segments: usize },

  /// The title row does not have three fields
  MalformedTitle { line: String, fields: usize },

  /// A component row does not have four fields
  MalformedRow {
    line_number: usize,
    line: String,
    fields: usize,
  },
}

impl PageError {
  fn help_message(&self) -> Option<String> {
    match self {
      PageError::MissingMarkers { .. } => Some(
        "Add [<!-- BEGIN COMPONENTS -->] and [<!-- END COMPONENTS -->] around the components table.".to_string(),
      ),
      PageError::MalformedTitle { .. } => {
        Some("The first table line must be `lastGa|currentGa|currentSnapshot`.".to_string())
      }
      PageError::MalformedRow { .. } => {
        Some("Component lines must be `name|lastGa|currentGa|currentSnapshot`.".to_string())
      }
    }
  }
}

impl fmt::Display for PageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PageError::MissingMarkers { segments } => write!(
        f,
        "The page is missing the components table markers (expected 3 segments, found {})",
        segments
      ),
      PageError::MalformedTitle { line, fields } => {
        write!(f, "Malformed title row '{}': expected 3 fields, found {}", line, fields)
      }
      PageError::MalformedRow {
        line_number,
        line,
        fields,
      } => write!(
        f,
        "Malformed component row {} '{}': expected 4 fields, found {}",
        line_number, line, fields
      ),
    }
  }
}

/// Projects catalog errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
  /// No project with this name in the catalog
  UnknownComponent { name: String },

  /// A `name=version` pair could not be split
  InvalidPair { input: String },
}

impl ProjectError {
  fn help_message(&self) -> Option<String> {
    match self {
      ProjectError::UnknownComponent { name } => Some(format!(
        "Add '{}' to the projects file or pass it with --project {}=<version>.",
        name, name
      )),
      ProjectError::InvalidPair { .. } => Some("Use the form --project name=version.".to_string()),
    }
  }
}

impl fmt::Display for ProjectError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProjectError::UnknownComponent { name } => write!(f, "Project '{}' not found", name),
      ProjectError::InvalidPair { input } => write!(f, "Invalid project version '{}'", input),
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// train.toml not found
  NotFound { search_root: PathBuf },

  /// Missing required field
  MissingField { field: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Create a train.toml or pass --config <path>.".to_string()),
      ConfigError::MissingField { field } => Some(format!("Set '{}' in train.toml.", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No release-train-page configuration found.\nExpected file: {}/train.toml",
          search_root.display()
        )
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Clone failed
  CloneFailed { url: String, reason: String },

  /// Nothing staged when a commit was requested
  NothingToCommit { path: PathBuf },

  /// Push failed
  PushFailed {
    remote: String,
    branch: String,
    reason: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") || reason.contains("fetch first") {
          Some("The page repository moved while updating. Run the update again.".to_string())
        } else if reason.contains("permission denied") || reason.contains("403") {
          Some("Check your SSH key permissions and access to the page repository.".to_string())
        } else {
          None
        }
      }
      GitError::CloneFailed { url, .. } => Some(format!("Check git.docs_repo_url ({}) and git.docs_branch.", url)),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::CloneFailed { url, reason } => {
        write!(f, "Failed to clone {}: {}", url, reason)
      }
      GitError::NothingToCommit { path } => {
        write!(f, "Nothing to commit in {}", path.display())
      }
      GitError::PushFailed { remote, branch, reason } => {
        write!(f, "Push to {}/{} failed: {}", remote, branch, reason)
      }
    }
  }
}

/// Result type alias for release-train-page
pub type TrainResult<T> = Result<T, TrainError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> TrainResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> TrainResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<TrainError>,
{
  fn context(self, ctx: impl Into<String>) -> TrainResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> TrainResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &TrainError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
