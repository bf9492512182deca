//! Helpers for telling local page repositories from remote ones

use std::path::Path;

/// Check if a repository location is a local filesystem path (not a remote URL)
///
/// Returns true for:
/// - Absolute paths on Unix: /srv/git/page.git
/// - Absolute paths on Windows: C:\git\page.git or C:/git/page.git
/// - Relative paths: ./page.git or ../page.git
///
/// Returns false for:
/// - SSH URLs: git@github.com:org/page.git
/// - URLs with a scheme: <https://github.com/org/page.git>, file:///srv/page.git
/// - Bare names, which git would not resolve against our config directory
pub fn is_local_path(location: &str) -> bool {
  if location.starts_with("./") || location.starts_with("../") {
    return true;
  }

  // Windows drive letter, checked before the URL rules since it contains ':'
  let bytes = location.as_bytes();
  if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && (bytes[2] == b'\\' || bytes[2] == b'/')
  {
    return true;
  }

  if location.contains("://") || location.contains('@') {
    return false;
  }

  location.starts_with('/') || location.starts_with("\\\\") || Path::new(location).is_absolute()
}
