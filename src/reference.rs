// src/reference.rs
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use log::debug;

use crate::error::SeedError;

/// A classified template reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateReference {
  /// Refers to a directory on the local filesystem.
  Local(PathBuf),
  /// Anything else: an identifier for a remotely hosted repository, kept
  /// verbatim (branch suffix included).
  Remote(String),
}

/// Classifies a raw template string.
///
/// Path-shaped strings (leading `.`, `..` or a path separator) are local as
/// written. Bare names are local when they resolve to an existing directory
/// under the configured templates root; everything else is remote. The root
/// lookup is the only filesystem access.
pub fn classify(raw: &str, templates_root: Option<&Path>) -> TemplateReference {
  if raw.starts_with('.') || raw.starts_with('/') || raw.starts_with(MAIN_SEPARATOR) {
    return TemplateReference::Local(PathBuf::from(raw));
  }

  if let Some(root) = templates_root {
    let resolved = root.join(raw);
    if resolved.is_dir() {
      debug!(
        "\"{}\" resolved under templates root: {}",
        raw,
        resolved.display()
      );
      return TemplateReference::Local(resolved);
    }
  }

  TemplateReference::Remote(raw.to_string())
}

/// Resolves a local reference to an existing template directory. There is no
/// fallback for local templates; a miss is terminal.
pub fn locate(path: &Path, raw: &str) -> Result<PathBuf, SeedError> {
  if path.is_dir() {
    Ok(path.to_path_buf())
  } else {
    Err(SeedError::TemplateNotFound(raw.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn path_prefixes_classify_as_local_verbatim() {
    for raw in ["./tpl", "../shared/tpl", "/opt/templates/tpl", ".hidden"] {
      assert_eq!(
        classify(raw, None),
        TemplateReference::Local(PathBuf::from(raw)),
        "{raw} should classify as local"
      );
    }
  }

  #[test]
  fn bare_names_without_a_templates_root_are_remote() {
    assert_eq!(
      classify("owner/repo", None),
      TemplateReference::Remote("owner/repo".to_string())
    );
    assert_eq!(
      classify("owner/repo#next", None),
      TemplateReference::Remote("owner/repo#next".to_string())
    );
  }

  #[test]
  fn bare_name_resolving_under_templates_root_is_local() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("webapp")).unwrap();

    assert_eq!(
      classify("webapp", Some(root.path())),
      TemplateReference::Local(root.path().join("webapp"))
    );
    // A name that does not exist under the root falls through to remote.
    assert_eq!(
      classify("missing", Some(root.path())),
      TemplateReference::Remote("missing".to_string())
    );
  }

  #[test]
  fn locate_returns_existing_directory_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(locate(dir.path(), "./tpl").unwrap(), dir.path());
  }

  #[test]
  fn locate_reports_the_offending_reference_on_a_miss() {
    let err = locate(Path::new("/definitely/not/here"), "./gone").unwrap_err();
    match err {
      SeedError::TemplateNotFound(raw) => assert_eq!(raw, "./gone"),
      other => panic!("expected TemplateNotFound, got {other:?}"),
    }
  }
}
