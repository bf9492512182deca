//! Project versions and the catalog handed to the page updater

pub mod catalog;
pub mod version;

pub use catalog::Projects;
pub use version::ProjectVersion;
