// src/config.rs
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SeedError;

/// Runtime configuration handed to the acquisition flow explicitly, rather
/// than read from ambient globals at the point of use.
#[derive(Debug, Clone)]
pub struct Settings {
  /// Root directory that cached remote templates live under. One
  /// subdirectory per sanitized remote identifier.
  pub cache_root: PathBuf,
  /// Optional directory that short local template names resolve against.
  pub templates_root: Option<PathBuf>,
}

impl Settings {
  /// Builds settings from the CLI surface.
  ///
  /// The cache root is fixed per user; the templates root comes from
  /// `--templates-dir` / `SEEDKIT_TEMPLATES_DIR` and is dropped with a
  /// warning when it does not point at a directory.
  pub fn resolve(templates_dir: Option<PathBuf>) -> Result<Self, SeedError> {
    let dirs = ProjectDirs::from("", "", "seedkit").ok_or(SeedError::CannotDetermineCacheRoot)?;
    let cache_root = dirs.cache_dir().join("templates");

    let templates_root = templates_dir.filter(|path| {
      if path.is_dir() {
        true
      } else {
        log::warn!(
          "Provided templates directory does not exist or is not a directory: {}",
          path.display()
        );
        false
      }
    });

    Ok(Settings {
      cache_root,
      templates_root,
    })
  }
}
