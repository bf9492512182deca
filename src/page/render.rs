//! Render the release train page from its structured contents
//!
//! Rendering produces text only. Writing the local inspection copy is a
//! separate step (`persist_local_copy`) so callers decide when it happens.

use super::contents::{ReleaseTrainContents, Row};
use crate::core::config::TemplateConfig;
use crate::core::error::{TrainError, TrainResult};
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the built-in page template
pub const DEFAULT_TEMPLATE_NAME: &str = "release-train-page.html";

const DEFAULT_TEMPLATE: &str = include_str!("../../templates/release-train-page.html");

/// Values handed to the page template
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageModel<'a> {
  pub last_ga_train_name: &'a str,
  pub current_ga_train_name: &'a str,
  pub current_snapshot_train_name: &'a str,
  pub projects: &'a [Row],
}

impl<'a> PageModel<'a> {
  pub fn from_contents(contents: &'a ReleaseTrainContents) -> Self {
    Self {
      last_ga_train_name: &contents.title.last_ga_train_name,
      current_ga_train_name: &contents.title.current_ga_train_name,
      current_snapshot_train_name: &contents.title.current_snapshot_train_name,
      projects: &contents.rows,
    }
  }
}

/// Turns a named template and a page model into markup
pub trait TemplateEngine {
  fn render(&self, template_name: &str, model: &PageModel<'_>) -> TrainResult<String>;
}

/// minijinja templates, loaded from a folder or the built-in page
///
/// Auto-escaping is off for every template: table fields are written verbatim
/// so they parse back unchanged, markup included.
pub struct JinjaTemplates {
  env: Environment<'static>,
}

impl JinjaTemplates {
  /// Templates loaded on demand from `folder`
  pub fn from_folder(folder: &Path) -> Self {
    let mut env = verbatim_env();
    env.set_loader(minijinja::path_loader(folder.to_path_buf()));
    Self { env }
  }

  /// Only the built-in page template
  pub fn builtin() -> TrainResult<Self> {
    let mut env = verbatim_env();
    env.add_template(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE)?;
    Ok(Self { env })
  }
}

fn verbatim_env() -> Environment<'static> {
  let mut env = Environment::new();
  env.set_auto_escape_callback(|_| AutoEscape::None);
  env
}

impl TemplateEngine for JinjaTemplates {
  fn render(&self, template_name: &str, model: &PageModel<'_>) -> TrainResult<String> {
    let template = self.env.get_template(template_name)?;
    Ok(template.render(model)?)
  }
}

/// Renders contents with a fixed template
pub struct PageRenderer<E> {
  engine: E,
  template_name: String,
}

impl<E: TemplateEngine> PageRenderer<E> {
  pub fn new(engine: E, template_name: impl Into<String>) -> Self {
    Self {
      engine,
      template_name: template_name.into(),
    }
  }

  pub fn render(&self, contents: &ReleaseTrainContents) -> TrainResult<String> {
    debug!("Rendering page with template [{}]", self.template_name);
    self.engine.render(&self.template_name, &PageModel::from_contents(contents))
  }
}

impl PageRenderer<JinjaTemplates> {
  /// Use the configured template folder, or the built-in page when none is set
  pub fn from_config(config: &TemplateConfig) -> TrainResult<Self> {
    match &config.template_folder {
      Some(folder) => Ok(Self::new(JinjaTemplates::from_folder(folder), config.page_template.as_str())),
      None => Ok(Self::new(JinjaTemplates::builtin()?, DEFAULT_TEMPLATE_NAME)),
    }
  }
}

/// Write rendered text to `path`, creating parent directories
pub fn persist_local_copy(path: &Path, text: &str) -> TrainResult<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(|e| TrainError::persistence(parent, e))?;
  }
  fs::write(path, text).map_err(|e| TrainError::persistence(path, e))?;
  debug!("Stored rendered page at {}", path.display());
  Ok(())
}
