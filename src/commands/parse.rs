//! Parse command implementation

use crate::core::error::TrainResult;
use crate::page::ReleaseTrainContents;
use crate::page::parse::parse_file;
use std::path::Path;

/// Run the parse command
pub fn run_parse(page: &Path, json: bool) -> TrainResult<()> {
  let contents = parse_file(page)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&contents)?);
  } else {
    print_contents(&contents);
  }

  Ok(())
}

fn print_contents(contents: &ReleaseTrainContents) {
  println!("📄 Release train page");
  println!();
  println!("  Last GA:          {}", contents.title.last_ga_train_name);
  println!("  Current GA:       {}", contents.title.current_ga_train_name);
  println!("  Current snapshot: {}", contents.title.current_snapshot_train_name);
  println!();

  if contents.rows.is_empty() {
    println!("  (no components)");
    return;
  }

  let width = contents
    .rows
    .iter()
    .map(|r| r.component_name.len())
    .max()
    .unwrap_or(0)
    .max("Component".len());
  println!(
    "  {:width$}  {:<20} {:<20} {}",
    "Component", "Last GA", "Current GA", "Current snapshot"
  );
  for row in &contents.rows {
    println!(
      "  {:width$}  {:<20} {:<20} {}",
      row.component_name, row.last_ga_version, row.current_ga_version, row.current_snapshot_version
    );
  }
}
