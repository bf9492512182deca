//! Parse the components table out of the release train page

use super::contents::{ReleaseTrainContents, Row, Title};
use crate::core::error::{PageError, ResultExt, TrainResult};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Markers surrounding the components table
pub const BEGIN_MARKER: &str = "<!-- BEGIN COMPONENTS -->";
pub const END_MARKER: &str = "<!-- END COMPONENTS -->";

static MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!-- (BEGIN|END) COMPONENTS -->").expect("valid regex"));

const FIELD_SEPARATOR: char = '|';

/// Parse page text into title and rows
pub fn parse(raw: &str) -> Result<ReleaseTrainContents, PageError> {
  let segments: Vec<&str> = MARKERS.split(raw).collect();
  if segments.len() != 3 {
    return Err(PageError::MissingMarkers {
      segments: segments.len(),
    });
  }

  let mut lines = segments[1].trim().lines();
  let title = parse_title(lines.next().unwrap_or_default())?;

  // Header/separator line, never validated
  lines.next();

  let mut rows = Vec::new();
  // 1-based position inside the table: title is 1, header is 2
  for (idx, line) in lines.enumerate() {
    if line.trim().is_empty() {
      continue;
    }
    rows.push(parse_row(idx + 3, line)?);
  }

  Ok(ReleaseTrainContents::new(title, rows))
}

/// Read and parse a page from disk
pub fn parse_file(path: &Path) -> TrainResult<ReleaseTrainContents> {
  let raw = fs::read_to_string(path).with_context(|| format!("Failed to read page {}", path.display()))?;
  Ok(parse(&raw)?)
}

fn parse_title(line: &str) -> Result<Title, PageError> {
  let line = line.trim();
  match line.split(FIELD_SEPARATOR).collect::<Vec<_>>().as_slice() {
    [last_ga, current_ga, current_snapshot] => Ok(Title::new(*last_ga, *current_ga, *current_snapshot)),
    fields => Err(PageError::MalformedTitle {
      line: line.to_string(),
      fields: fields.len(),
    }),
  }
}

fn parse_row(line_number: usize, line: &str) -> Result<Row, PageError> {
  match line.split(FIELD_SEPARATOR).collect::<Vec<_>>().as_slice() {
    [name, last_ga, current_ga, current_snapshot] => Ok(Row::new(*name, *last_ga, *current_ga, *current_snapshot)),
    fields => Err(PageError::MalformedRow {
      line_number,
      line: line.to_string(),
      fields: fields.len(),
    }),
  }
}
