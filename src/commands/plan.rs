//! Plan command implementation
//!
//! Clones the page and shows what an update would change, without writing to
//! the working copy or committing.

use crate::core::context::TrainContext;
use crate::core::error::TrainResult;
use crate::page::PlanOutcome;
use crate::page::merge::Decision;
use crate::page::updater::PagePlan;
use crate::project::Projects;
use serde::Serialize;

#[derive(Serialize)]
struct PlanReport<'a> {
  release_train: &'a str,
  decision: Decision,
  changed: bool,
  current: &'a crate::page::ReleaseTrainContents,
  proposed: &'a crate::page::ReleaseTrainContents,
  commit_message: Option<String>,
}

/// Run the plan command
pub fn run_plan(ctx: &TrainContext, projects: &Projects, json: bool) -> TrainResult<()> {
  let updater = ctx.updater()?;

  let plan = match updater.plan(projects)? {
    PlanOutcome::Disabled => {
      println!("⚠️  Page updates are turned off");
      return Ok(());
    }
    PlanOutcome::MissingMarkers { workdir } => {
      println!("⚠️  The page in {} has no components table", workdir.display());
      return Ok(());
    }
    PlanOutcome::Planned(plan) => plan,
  };

  if json {
    let report = PlanReport {
      release_train: &plan.incoming.version,
      decision: plan.decision,
      changed: plan.is_changed(),
      current: &plan.current,
      proposed: &plan.proposed,
      commit_message: plan.is_changed().then(|| plan.commit_message()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_plan(&plan, projects);
  }

  Ok(())
}

fn print_plan(plan: &PagePlan, projects: &Projects) {
  println!(
    "📦 Release train {} (train {}, {} projects)",
    plan.incoming.version,
    plan.incoming.release_train_name(),
    projects.len()
  );
  println!();
  println!("  Decision: {}", describe(plan.decision));

  if !plan.is_changed() {
    println!("  No changes to the page");
    return;
  }

  let (old, new) = (&plan.current.title, &plan.proposed.title);
  for (label, before, after) in [
    ("Last GA", &old.last_ga_train_name, &new.last_ga_train_name),
    ("Current GA", &old.current_ga_train_name, &new.current_ga_train_name),
    ("Current snapshot", &old.current_snapshot_train_name, &new.current_snapshot_train_name),
  ] {
    if before != after {
      println!("  {}: {} -> {}", label, before, after);
    }
  }

  let changed_rows: Vec<_> = plan
    .proposed
    .rows
    .iter()
    .filter(|row| plan.current.row(&row.component_name) != Some(*row))
    .collect();
  if !changed_rows.is_empty() {
    println!();
    println!("  Changed components:");
    for row in changed_rows {
      println!(
        "    {} {}|{}|{}",
        row.component_name, row.last_ga_version, row.current_ga_version, row.current_snapshot_version
      );
    }
  }

  println!();
  println!("  Commit: {}", plan.commit_message());
  println!();
  print!("{}", plan.diff());
  println!();
  println!("🔍 Dry-run mode (no changes committed)");
}

fn describe(decision: Decision) -> &'static str {
  match decision {
    Decision::AdvanceLastGa => "advance the last GA train",
    Decision::UpdateCurrentTrain => "update the current train",
    Decision::NoMatch => "neither the last nor the current train",
  }
}
