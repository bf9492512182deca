//! Structured form of the components table

use serde::Serialize;

/// The three train names printed in the table header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
  pub last_ga_train_name: String,
  pub current_ga_train_name: String,
  pub current_snapshot_train_name: String,
}

impl Title {
  pub fn new(
    last_ga_train_name: impl Into<String>,
    current_ga_train_name: impl Into<String>,
    current_snapshot_train_name: impl Into<String>,
  ) -> Self {
    Self {
      last_ga_train_name: last_ga_train_name.into(),
      current_ga_train_name: current_ga_train_name.into(),
      current_snapshot_train_name: current_snapshot_train_name.into(),
    }
  }
}

/// One component's versions; `component_name` is unique within a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
  pub component_name: String,
  pub last_ga_version: String,
  pub current_ga_version: String,
  pub current_snapshot_version: String,
}

impl Row {
  pub fn new(
    component_name: impl Into<String>,
    last_ga_version: impl Into<String>,
    current_ga_version: impl Into<String>,
    current_snapshot_version: impl Into<String>,
  ) -> Self {
    Self {
      component_name: component_name.into(),
      last_ga_version: last_ga_version.into(),
      current_ga_version: current_ga_version.into(),
      current_snapshot_version: current_snapshot_version.into(),
    }
  }
}

/// Title plus rows in page order.
///
/// Equality is structural (row order included) and is what decides whether an
/// update changed anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseTrainContents {
  pub title: Title,
  pub rows: Vec<Row>,
}

impl ReleaseTrainContents {
  pub fn new(title: Title, rows: Vec<Row>) -> Self {
    Self { title, rows }
  }

  pub fn row(&self, component_name: &str) -> Option<&Row> {
    self.rows.iter().find(|r| r.component_name == component_name)
  }
}
