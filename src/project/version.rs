//! Project versions and release train naming
//!
//! A version string is read as `<train>.<ordinal...>.<qualifier>`:
//!
//! ```text
//! Finchley.SR2            train "Finchley", ordinal [],     qualifier SR2
//! 1.1.0.RELEASE           train "1",        ordinal [1, 0], qualifier RELEASE
//! 2.2.0-SNAPSHOT          train "2",        ordinal [2, 0], qualifier SNAPSHOT
//! 2020.0.1                train "2020",     ordinal [0, 1], qualifier none (release)
//! ```

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Classification of the trailing part of a version
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Qualifier {
  /// Anything we don't recognise; ranks below every known qualifier
  Other(String),
  Snapshot,
  Milestone(u32),
  ReleaseCandidate(u32),
  Release,
  ServiceRelease(u32),
}

impl Qualifier {
  fn parse(raw: &str) -> Self {
    let upper = raw.trim().to_ascii_uppercase();
    if upper.contains("SNAPSHOT") {
      return Qualifier::Snapshot;
    }
    match upper.as_str() {
      "" | "RELEASE" | "GA" | "FINAL" => return Qualifier::Release,
      _ => {}
    }
    if let Some(n) = numbered(&upper, "SR") {
      Qualifier::ServiceRelease(n)
    } else if let Some(n) = numbered(&upper, "RC") {
      Qualifier::ReleaseCandidate(n)
    } else if let Some(n) = numbered(&upper, "M") {
      Qualifier::Milestone(n)
    } else {
      Qualifier::Other(raw.to_string())
    }
  }
}

/// `SR3` -> 3 for prefix `SR`
fn numbered(s: &str, prefix: &str) -> Option<u32> {
  let digits = s.strip_prefix(prefix)?;
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  digits.parse().ok()
}

/// Parsed form of a version string
#[derive(Debug, Clone, PartialEq, Eq)]
struct TrainVersion {
  train: String,
  ordinal: Vec<u64>,
  qualifier: Qualifier,
}

impl TrainVersion {
  fn parse(version: &str) -> Self {
    let version = version.trim();
    let mut segments = version.split('.');
    let first = segments.next().unwrap_or_default();

    // `1-SNAPSHOT`: the dash ends the train name
    let (train, mut qualifier) = match first.split_once('-') {
      Some((name, rest)) => (name.to_string(), Some(rest.to_string())),
      None => (first.to_string(), None),
    };

    let mut ordinal = Vec::new();
    let mut rest: Vec<&str> = Vec::new();
    if qualifier.is_none() {
      for segment in segments.by_ref() {
        if let Ok(n) = segment.parse::<u64>() {
          ordinal.push(n);
          continue;
        }
        match segment.split_once('-') {
          Some((num, tail)) if num.parse::<u64>().is_ok() => {
            ordinal.push(num.parse().unwrap_or_default());
            rest.push(tail);
          }
          _ => rest.push(segment),
        }
        break;
      }
      rest.extend(segments);
      qualifier = Some(rest.join("."));
    }

    Self {
      train,
      ordinal,
      qualifier: Qualifier::parse(qualifier.as_deref().unwrap_or_default()),
    }
  }

  fn compare_ordinal(&self, other: &Self) -> Ordering {
    let len = self.ordinal.len().max(other.ordinal.len());
    for i in 0..len {
      let a = self.ordinal.get(i).copied().unwrap_or(0);
      let b = other.ordinal.get(i).copied().unwrap_or(0);
      match a.cmp(&b) {
        Ordering::Equal => continue,
        ord => return ord,
      }
    }
    self.qualifier.cmp(&other.qualifier)
  }
}

/// A project name together with its version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectVersion {
  pub name: String,
  pub version: String,
}

impl ProjectVersion {
  pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      version: version.into(),
    }
  }

  fn parsed(&self) -> TrainVersion {
    TrainVersion::parse(&self.version)
  }

  /// Classification of the version's qualifier
  pub fn qualifier(&self) -> Qualifier {
    self.parsed().qualifier
  }

  /// Name of the release train the version belongs to
  pub fn release_train_name(&self) -> String {
    self.parsed().train
  }

  /// Build still in progress
  pub fn is_snapshot(&self) -> bool {
    self.qualifier() == Qualifier::Snapshot
  }

  /// GA or a service release of a GA
  pub fn is_release_or_service_release(&self) -> bool {
    matches!(self.qualifier(), Qualifier::Release | Qualifier::ServiceRelease(_))
  }

  /// Both versions belong to the same release train (`1.0.0.RELEASE` and `1.1.0.RELEASE`)
  pub fn is_same_release_train_name(&self, version: &str) -> bool {
    if version.trim().is_empty() || self.version.trim().is_empty() {
      return false;
    }
    self.parsed().train == TrainVersion::parse(version).train
  }

  /// Position of this version relative to `version` within a train.
  ///
  /// Only the ordinal and qualifier take part; train names are ignored, so the
  /// result is only meaningful when `is_same_release_train_name` holds.
  pub fn compare_to_release_train_name(&self, version: &str) -> Ordering {
    self.parsed().compare_ordinal(&TrainVersion::parse(version))
  }
}

impl fmt::Display for ProjectVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.version)
  }
}
