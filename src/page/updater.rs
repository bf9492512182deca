//! Update the release train page in its repository
//!
//! ```text
//! clone -> parse index.html -> decide -> (unchanged: stop)
//!                                     -> render -> local copy -> index.html -> commit -> push
//! ```
//!
//! Every run starts from a fresh clone; nothing is remembered between runs.

use super::contents::ReleaseTrainContents;
use super::merge::{self, Decision};
use super::parse;
use super::render::{PageRenderer, TemplateEngine, persist_local_copy};
use crate::core::config::TrainConfig;
use crate::core::error::{PageError, ResultExt, TrainError, TrainResult};
use crate::core::vcs::DocsRepository;
use crate::project::{ProjectVersion, Projects};
use similar::TextDiff;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File holding the page inside the repository
pub const INDEX_FILE: &str = "index.html";

/// Result of an update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
  /// The update switch is off; nothing was cloned
  Disabled,
  /// The page has no components table; nothing was written
  MissingMarkers { workdir: PathBuf },
  /// The page already reflects the given versions
  Unchanged { workdir: PathBuf },
  /// The page was rewritten, committed and pushed
  Updated { workdir: PathBuf, commit_message: String },
}

impl UpdateOutcome {
  /// Working copy of an update that got past parsing
  pub fn workdir(&self) -> Option<&Path> {
    match self {
      UpdateOutcome::Unchanged { workdir } | UpdateOutcome::Updated { workdir, .. } => Some(workdir),
      UpdateOutcome::Disabled | UpdateOutcome::MissingMarkers { .. } => None,
    }
  }
}

/// Result of a dry run
#[derive(Debug)]
pub enum PlanOutcome {
  Disabled,
  MissingMarkers { workdir: PathBuf },
  Planned(Box<PagePlan>),
}

/// Everything an update would do, computed without touching the repository
#[derive(Debug)]
pub struct PagePlan {
  pub workdir: PathBuf,
  pub incoming: ProjectVersion,
  pub decision: Decision,
  pub current: ReleaseTrainContents,
  pub proposed: ReleaseTrainContents,
  pub current_text: String,
  /// Rendered page, only when it differs from `current_text`
  pub rendered: Option<String>,
}

impl PagePlan {
  /// Whether the page text changes; contents may differ while the text does not
  pub fn is_changed(&self) -> bool {
    self.rendered.is_some()
  }

  pub fn index_path(&self) -> PathBuf {
    self.workdir.join(INDEX_FILE)
  }

  pub fn commit_message(&self) -> String {
    commit_message(&self.incoming)
  }

  /// Unified diff of the page; empty when nothing changes
  pub fn diff(&self) -> String {
    match &self.rendered {
      Some(rendered) => TextDiff::from_lines(self.current_text.as_str(), rendered.as_str())
        .unified_diff()
        .context_radius(3)
        .header("index.html (current)", "index.html (proposed)")
        .to_string(),
      None => String::new(),
    }
  }
}

fn commit_message(release_train: &ProjectVersion) -> String {
  format!("Updating project page to release train [{}]", release_train.version)
}

/// Ties the page repository, the decision engine and the renderer together
pub struct PageUpdater<R, E> {
  config: TrainConfig,
  repo: R,
  renderer: PageRenderer<E>,
}

impl<R: DocsRepository, E: TemplateEngine> PageUpdater<R, E> {
  pub fn new(config: TrainConfig, repo: R, renderer: PageRenderer<E>) -> Self {
    Self { config, repo, renderer }
  }

  /// Compute the update without writing to the working copy
  pub fn plan(&self, projects: &Projects) -> TrainResult<PlanOutcome> {
    if !self.config.git.update_release_train_page {
      info!(
        "Will not update the release train page cause the switch is turned off. Set [git.update_release_train_page = true]."
      );
      return Ok(PlanOutcome::Disabled);
    }

    let workdir = self.repo.clone_docs_repo()?;
    let index = workdir.join(INDEX_FILE);
    let current_text =
      fs::read_to_string(&index).with_context(|| format!("Failed to read page {}", index.display()))?;

    let current = match parse::parse(&current_text) {
      Ok(contents) => contents,
      Err(err @ PageError::MissingMarkers { .. }) => {
        warn!(
          "{}. Please add [{}] and [{}] to the file.",
          err,
          parse::BEGIN_MARKER,
          parse::END_MARKER
        );
        return Ok(PlanOutcome::MissingMarkers { workdir });
      }
      Err(err) => return Err(TrainError::Page(err)),
    };

    let train_project = self.config.release_train_project();
    let incoming = projects.for_name(train_project)?.clone();
    let decision = merge::classify(&current, &incoming, train_project);
    let proposed = merge::decide(&current, &incoming, projects, train_project);
    debug!("Release train [{}] classified as {:?}", incoming.version, decision);

    let rendered = if proposed != current {
      let text = self.renderer.render(&proposed)?;
      if text == current_text {
        info!("Rendered page is identical to the current one, nothing to store");
        None
      } else {
        persist_local_copy(&self.config.output.local_copy, &text)?;
        Some(text)
      }
    } else {
      warn!(
        "Current release train [{}] is neither last [{}] or current [{}] or the projects haven't changed. Will not update the contents",
        incoming.version, current.title.last_ga_train_name, current.title.current_ga_train_name
      );
      None
    };

    Ok(PlanOutcome::Planned(Box::new(PagePlan {
      workdir,
      incoming,
      decision,
      current,
      proposed,
      current_text,
      rendered,
    })))
  }

  /// Rewrite, commit and push the page when the versions move it forward
  pub fn update(&self, projects: &Projects) -> TrainResult<UpdateOutcome> {
    let plan = match self.plan(projects)? {
      PlanOutcome::Disabled => return Ok(UpdateOutcome::Disabled),
      PlanOutcome::MissingMarkers { workdir } => return Ok(UpdateOutcome::MissingMarkers { workdir }),
      PlanOutcome::Planned(plan) => plan,
    };

    let Some(rendered) = plan.rendered.as_deref() else {
      info!("No changes to commit to the release train page.");
      return Ok(UpdateOutcome::Unchanged { workdir: plan.workdir });
    };

    let index = plan.index_path();
    debug!("Storing new contents to the page");
    fs::write(&index, rendered).map_err(|e| TrainError::persistence(&index, e))?;
    info!("Successfully stored new contents of the page");

    let message = plan.commit_message();
    debug!("Committing and pushing changes");
    self.repo.commit(&plan.workdir, &message)?;
    self.repo.push(&plan.workdir)?;

    Ok(UpdateOutcome::Updated {
      workdir: plan.workdir,
      commit_message: message,
    })
  }
}
