//! The release train page
//!
//! - **contents**: title and rows of the components table
//! - **parse**: page text into contents
//! - **merge**: which window of the page an incoming train version advances
//! - **render**: contents back into page text
//! - **updater**: clone, decide, render, commit and push

pub mod contents;
pub mod merge;
pub mod parse;
pub mod render;
pub mod updater;

pub use contents::{ReleaseTrainContents, Row, Title};
pub use updater::{PageUpdater, PlanOutcome, UpdateOutcome};
