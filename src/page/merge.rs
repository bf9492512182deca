//! Decide how the page advances for an incoming release train version
//!
//! The page tracks three windows: the last GA train, the current GA train and
//! the current snapshot. An incoming train version either
//!
//! 1. retires the last GA (same train, release, later ordinal),
//! 2. updates the current train (same train as current GA), or
//! 3. matches neither, leaving the page untouched.
//!
//! Only the first matching rule applies. Rows are merged field by field: a
//! non-blank value from the catalog wins, anything else keeps the page's value.
//! Rows are never added or removed.

use super::contents::{ReleaseTrainContents, Row, Title};
use crate::project::{ProjectVersion, Projects};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// Which window of the page an incoming version advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
  /// A later GA of the last GA train: it becomes the new last GA
  AdvanceLastGa,
  /// A release or snapshot of the current GA train
  UpdateCurrentTrain,
  /// Neither train matches
  NoMatch,
}

/// Classify `incoming` against the page's title.
///
/// `train_project` is the display name of the release train component; it
/// only names the versions built from the title.
pub fn classify(current: &ReleaseTrainContents, incoming: &ProjectVersion, train_project: &str) -> Decision {
  let last_ga = ProjectVersion::new(train_project, current.title.last_ga_train_name.as_str());
  let current_ga = ProjectVersion::new(train_project, current.title.current_ga_train_name.as_str());

  if later_ga_of_last_ga_train(incoming, &last_ga) {
    Decision::AdvanceLastGa
  } else if incoming.is_same_release_train_name(&current_ga.version) {
    Decision::UpdateCurrentTrain
  } else {
    Decision::NoMatch
  }
}

fn later_ga_of_last_ga_train(incoming: &ProjectVersion, last_ga: &ProjectVersion) -> bool {
  incoming.is_same_release_train_name(&last_ga.version)
    && incoming.is_release_or_service_release()
    && incoming.compare_to_release_train_name(&last_ga.version) == Ordering::Greater
}

/// Compute the page contents after `incoming` is taken into account
pub fn decide(
  current: &ReleaseTrainContents,
  incoming: &ProjectVersion,
  projects: &Projects,
  train_project: &str,
) -> ReleaseTrainContents {
  apply(current, classify(current, incoming, train_project), incoming, projects)
}

fn apply(
  current: &ReleaseTrainContents,
  decision: Decision,
  incoming: &ProjectVersion,
  projects: &Projects,
) -> ReleaseTrainContents {
  let title = &current.title;
  match decision {
    Decision::AdvanceLastGa => {
      // The current GA and snapshot slots stay put even if the new last GA
      // overtakes them.
      let title = Title::new(
        incoming.version.as_str(),
        title.current_ga_train_name.as_str(),
        title.current_snapshot_train_name.as_str(),
      );
      merge_rows(current, title, projects, true)
    }
    Decision::UpdateCurrentTrain => {
      let current_ga = if incoming.is_release_or_service_release() {
        &incoming.version
      } else {
        &title.current_ga_train_name
      };
      let current_snapshot = if incoming.is_snapshot() {
        &incoming.version
      } else {
        &title.current_snapshot_train_name
      };
      let title = Title::new(title.last_ga_train_name.as_str(), current_ga.as_str(), current_snapshot.as_str());
      merge_rows(current, title, projects, false)
    }
    Decision::NoMatch => current.clone(),
  }
}

/// Candidate row for a catalog entry.
///
/// With `promote_last_ga` the version fills the last GA slot; otherwise it is
/// routed to current GA or snapshot by its qualifier. Other slots stay blank.
pub fn candidate_row(project: &ProjectVersion, promote_last_ga: bool) -> Row {
  let pick = |take: bool| if take { project.version.clone() } else { String::new() };
  Row::new(
    project.name.as_str(),
    pick(promote_last_ga),
    pick(!promote_last_ga && project.is_release_or_service_release()),
    pick(!promote_last_ga && project.is_snapshot()),
  )
}

fn merge_rows(current: &ReleaseTrainContents, title: Title, projects: &Projects, promote_last_ga: bool) -> ReleaseTrainContents {
  let rows = current
    .rows
    .iter()
    .map(|row| match projects.find(&row.component_name) {
      Some(project) => merge_row(row, &candidate_row(project, promote_last_ga)),
      None => {
        debug!("No version for [{}] in the projects, keeping its row", row.component_name);
        row.clone()
      }
    })
    .collect();
  ReleaseTrainContents::new(title, rows)
}

/// Field-wise merge: non-blank candidate values win
pub fn merge_row(existing: &Row, candidate: &Row) -> Row {
  let pick = |new: &String, old: &String| {
    if new.trim().is_empty() {
      old.clone()
    } else {
      new.clone()
    }
  };
  Row::new(
    existing.component_name.as_str(),
    pick(&candidate.last_ga_version, &existing.last_ga_version),
    pick(&candidate.current_ga_version, &existing.current_ga_version),
    pick(&candidate.current_snapshot_version, &existing.current_snapshot_version),
  )
}
