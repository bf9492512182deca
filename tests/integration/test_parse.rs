//! Tests for the `parse` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_parse_prints_table() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  std::fs::write(temp.path().join("index.html"), PAGE)?;

  let output = run_release_train_page(temp.path(), &["parse", "index.html"])?;
  let out = stdout(&output);

  assert!(out.contains("Finchley.SR2"));
  assert!(out.contains("spring-cloud-sleuth"));

  Ok(())
}

#[test]
fn test_parse_json() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  std::fs::write(temp.path().join("index.html"), PAGE)?;

  let output = run_release_train_page(temp.path(), &["parse", "index.html", "--json"])?;
  let contents: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(contents["title"]["currentGaTrainName"], "Greenwich.RELEASE");
  assert_eq!(contents["rows"].as_array().map(Vec::len), Some(2));
  assert_eq!(contents["rows"][0]["componentName"], "spring-cloud-build");
  assert_eq!(contents["rows"][1]["lastGaVersion"], "2.0.2.RELEASE");

  Ok(())
}

#[test]
fn test_parse_rejects_malformed_row() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  std::fs::write(
    temp.path().join("index.html"),
    "<!-- BEGIN COMPONENTS -->\na|b|c\nheader\nbroken|row\n<!-- END COMPONENTS -->\n",
  )?;

  let output = run_release_train_page_unchecked(temp.path(), &["parse", "index.html"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}

#[test]
fn test_parse_missing_file_fails() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_release_train_page_unchecked(temp.path(), &["parse", "missing.html"])?;
  assert!(!output.status.success());

  Ok(())
}
