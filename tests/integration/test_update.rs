//! Tests for the `update` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_update_advances_last_ga_and_pushes() -> Result<()> {
  let site = TestSite::new(PAGE)?;

  let output = run_release_train_page(
    &site.workspace,
    &[
      "update",
      "-p",
      "spring-cloud-release=Finchley.SR3",
      "-p",
      "spring-cloud-build=2.0.5.RELEASE",
    ],
  )?;
  assert!(stdout(&output).contains("Release train page updated"));

  let log = site.origin_log()?;
  assert_eq!(log[0], "Updating project page to release train [Finchley.SR3]");
  assert_eq!(log.len(), 2);

  let page = site.origin_page()?;
  assert!(page.contains("Finchley.SR3|Greenwich.RELEASE|Hoxton.BUILD-SNAPSHOT"));
  assert!(page.contains("spring-cloud-build|2.0.5.RELEASE|2.1.0.RELEASE|2.2.0.BUILD-SNAPSHOT"));
  // No version given, row kept as is
  assert!(page.contains("spring-cloud-sleuth|2.0.2.RELEASE|2.1.0.RELEASE|2.2.0.BUILD-SNAPSHOT"));

  // Local copy is what got pushed
  assert_eq!(site.read_file("target/index.html")?, page);

  Ok(())
}

#[test]
fn test_update_current_train_from_projects_file() -> Result<()> {
  let site = TestSite::new(PAGE)?;
  std::fs::write(
    site.workspace.join("projects.toml"),
    r#"[projects]
spring-cloud-release = "Greenwich.SR1"
spring-cloud-build = "2.1.1.RELEASE"
spring-cloud-sleuth = "2.1.1.RELEASE"
"#,
  )?;

  run_release_train_page(&site.workspace, &["update", "--projects", "projects.toml"])?;

  let page = site.origin_page()?;
  assert!(page.contains("Finchley.SR2|Greenwich.SR1|Hoxton.BUILD-SNAPSHOT"));
  assert!(page.contains("spring-cloud-build|2.0.4.RELEASE|2.1.1.RELEASE|2.2.0.BUILD-SNAPSHOT"));
  assert!(page.contains("spring-cloud-sleuth|2.0.2.RELEASE|2.1.1.RELEASE|2.2.0.BUILD-SNAPSHOT"));

  Ok(())
}

#[test]
fn test_update_unrelated_train_is_a_no_op() -> Result<()> {
  let site = TestSite::new(PAGE)?;

  let output = run_release_train_page(
    &site.workspace,
    &["update", "-p", "spring-cloud-release=Edgware.SR5"],
  )?;
  assert!(stdout(&output).contains("up to date"));

  assert_eq!(site.origin_log()?, vec!["Initial page".to_string()]);
  assert_eq!(site.origin_page()?, PAGE);
  assert!(!site.file_exists("target/index.html"));

  Ok(())
}

#[test]
fn test_update_twice_commits_once() -> Result<()> {
  let site = TestSite::new(PAGE)?;
  let args = ["update", "-p", "spring-cloud-release=Greenwich.SR1"];

  run_release_train_page(&site.workspace, &args)?;
  let output = run_release_train_page(&site.workspace, &args)?;

  assert!(stdout(&output).contains("up to date"));
  assert_eq!(site.origin_log()?.len(), 2);

  Ok(())
}

#[test]
fn test_update_disabled_leaves_origin_alone() -> Result<()> {
  let site = TestSite::with_config(PAGE, "update_release_train_page = false")?;

  let output = run_release_train_page(
    &site.workspace,
    &["update", "-p", "spring-cloud-release=Finchley.SR3"],
  )?;
  assert!(stdout(&output).contains("turned off"));

  assert_eq!(site.origin_log()?.len(), 1);
  assert!(!site.file_exists("target/docs-repo"));

  Ok(())
}

#[test]
fn test_update_page_without_markers_succeeds() -> Result<()> {
  let site = TestSite::new("<html><body>No table here</body></html>\n")?;

  let output = run_release_train_page(
    &site.workspace,
    &["update", "-p", "spring-cloud-release=Finchley.SR3"],
  )?;
  assert!(stdout(&output).contains("no components table"));
  assert_eq!(site.origin_log()?.len(), 1);

  Ok(())
}

#[test]
fn test_update_without_train_project_fails() -> Result<()> {
  let site = TestSite::new(PAGE)?;

  let output = run_release_train_page_unchecked(
    &site.workspace,
    &["update", "-p", "spring-cloud-build=2.0.5.RELEASE"],
  )?;
  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("spring-cloud-release"));
  assert_eq!(site.origin_log()?.len(), 1);

  Ok(())
}

#[test]
fn test_update_without_versions_fails() -> Result<()> {
  let site = TestSite::new(PAGE)?;

  let output = run_release_train_page_unchecked(&site.workspace, &["update"])?;
  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("No project versions given"));

  Ok(())
}

#[test]
fn test_update_without_config_fails() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_release_train_page_unchecked(temp.path(), &["update", "-p", "spring-cloud-release=Finchley.SR3"])?;
  assert!(!output.status.success());

  Ok(())
}
