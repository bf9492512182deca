//! Catalog of project versions known for the current release train

use super::version::ProjectVersion;
use crate::core::error::{ProjectError, ResultExt, TrainResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Versions of every project taking part in a release train, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projects {
  versions: BTreeMap<String, ProjectVersion>,
}

/// On-disk form of a projects file
///
/// ```toml
/// [projects]
/// release-train = "2.1.0.RELEASE"
/// component-a = "1.1.0.RELEASE"
/// ```
#[derive(Debug, Deserialize)]
struct ProjectsFile {
  #[serde(default)]
  projects: BTreeMap<String, String>,
}

impl Projects {
  pub fn new(versions: impl IntoIterator<Item = ProjectVersion>) -> Self {
    Self {
      versions: versions.into_iter().map(|pv| (pv.name.clone(), pv)).collect(),
    }
  }

  /// Load projects from a TOML file
  pub fn load(path: &Path) -> TrainResult<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read projects from {}", path.display()))?;
    let file: ProjectsFile = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse projects from {}", path.display()))?;
    Ok(Self::new(
      file
        .projects
        .into_iter()
        .map(|(name, version)| ProjectVersion::new(name, version)),
    ))
  }

  /// Add or replace a project
  pub fn insert(&mut self, version: ProjectVersion) {
    self.versions.insert(version.name.clone(), version);
  }

  /// Apply `name=version` overrides
  pub fn with_overrides(mut self, pairs: &[String]) -> TrainResult<Self> {
    for pair in pairs {
      self.insert(parse_pair(pair)?);
    }
    Ok(self)
  }

  /// Look up a project, failing when it is not part of the train
  pub fn for_name(&self, name: &str) -> Result<&ProjectVersion, ProjectError> {
    self.find(name).ok_or_else(|| ProjectError::UnknownComponent {
      name: name.to_string(),
    })
  }

  pub fn find(&self, name: &str) -> Option<&ProjectVersion> {
    self.versions.get(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &ProjectVersion> {
    self.versions.values()
  }

  pub fn len(&self) -> usize {
    self.versions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.versions.is_empty()
  }
}

fn parse_pair(pair: &str) -> Result<ProjectVersion, ProjectError> {
  match pair.split_once('=') {
    Some((name, version)) if !name.trim().is_empty() && !version.trim().is_empty() => {
      Ok(ProjectVersion::new(name.trim(), version.trim()))
    }
    _ => Err(ProjectError::InvalidPair {
      input: pair.to_string(),
    }),
  }
}
