//! Tests for the `plan` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_plan_shows_diff_without_pushing() -> Result<()> {
  let site = TestSite::new(PAGE)?;

  let output = run_release_train_page(
    &site.workspace,
    &["plan", "-p", "spring-cloud-release=Finchley.SR3"],
  )?;
  let out = stdout(&output);

  assert!(out.contains("advance the last GA train"));
  assert!(out.contains("Last GA: Finchley.SR2 -> Finchley.SR3"));
  assert!(out.contains("-Finchley.SR2|Greenwich.RELEASE|Hoxton.BUILD-SNAPSHOT"));
  assert!(out.contains("+Finchley.SR3|Greenwich.RELEASE|Hoxton.BUILD-SNAPSHOT"));
  assert_eq!(site.origin_log()?.len(), 1);

  Ok(())
}

#[test]
fn test_plan_json() -> Result<()> {
  let site = TestSite::new(PAGE)?;

  let output = run_release_train_page(
    &site.workspace,
    &[
      "plan",
      "--json",
      "-p",
      "spring-cloud-release=Hoxton.BUILD-SNAPSHOT",
      "-p",
      "spring-cloud-sleuth=2.2.0.BUILD-SNAPSHOT",
    ],
  )?;
  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  // Hoxton is neither the last nor the current GA train
  assert_eq!(report["decision"], "no-match");
  assert_eq!(report["changed"], false);
  assert_eq!(report["commit_message"], serde_json::Value::Null);
  assert_eq!(report["current"], report["proposed"]);
  assert_eq!(report["current"]["title"]["lastGaTrainName"], "Finchley.SR2");

  Ok(())
}

#[test]
fn test_plan_json_for_current_train() -> Result<()> {
  let site = TestSite::new(PAGE)?;

  let output = run_release_train_page(
    &site.workspace,
    &["plan", "--json", "-p", "spring-cloud-release=Greenwich.SR1"],
  )?;
  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(report["decision"], "update-current-train");
  assert_eq!(report["changed"], true);
  assert_eq!(report["proposed"]["title"]["currentGaTrainName"], "Greenwich.SR1");
  assert_eq!(
    report["commit_message"],
    "Updating project page to release train [Greenwich.SR1]"
  );

  Ok(())
}
