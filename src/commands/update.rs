//! Update command implementation

use crate::core::context::TrainContext;
use crate::core::error::TrainResult;
use crate::page::UpdateOutcome;
use crate::project::Projects;

/// Run the update command
pub fn run_update(ctx: &TrainContext, projects: &Projects) -> TrainResult<()> {
  let updater = ctx.updater()?;
  let outcome = updater.update(projects)?;

  match &outcome {
    UpdateOutcome::Disabled => {
      println!("⚠️  Page updates are turned off");
      println!("   Set git.update_release_train_page = true in train.toml");
    }
    UpdateOutcome::MissingMarkers { workdir } => {
      println!("⚠️  The page in {} has no components table", workdir.display());
      println!("   Nothing was updated");
    }
    UpdateOutcome::Unchanged { .. } => {
      println!("✅ Release train page is up to date");
    }
    UpdateOutcome::Updated { commit_message, .. } => {
      println!("✅ Release train page updated");
      println!("   Commit: {}", commit_message);
      println!("   Local copy: {}", ctx.config.output.local_copy.display());
    }
  }

  if let Some(workdir) = outcome.workdir() {
    println!("   Working copy: {}", workdir.display());
  }

  Ok(())
}
