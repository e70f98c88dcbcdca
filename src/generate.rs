// src/generate.rs
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::SeedError;

/// Renders `template_dir` into `target_dir`.
///
/// Templates following the `template/` subdirectory convention have only
/// that subtree copied; repository metadata (`.git`, a root `meta.js` or
/// `meta.json`) never lands in the generated project.
pub fn generate(name: &str, template_dir: &Path, target_dir: &Path) -> Result<(), SeedError> {
  info!(
    "Generating \"{}\" from {} into {}",
    name,
    template_dir.display(),
    target_dir.display()
  );

  let inner = template_dir.join("template");
  let source_root = if inner.is_dir() {
    inner
  } else {
    template_dir.to_path_buf()
  };

  fs::create_dir_all(target_dir)?;
  let walker = WalkDir::new(&source_root)
    .min_depth(1)
    .into_iter()
    .filter_entry(|entry| entry.file_name() != OsStr::new(".git"));

  for entry in walker {
    let entry = entry.map_err(|e| SeedError::Generation(e.to_string()))?;
    if entry.depth() == 1
      && (entry.file_name() == OsStr::new("meta.js") || entry.file_name() == OsStr::new("meta.json"))
    {
      continue;
    }

    let relative = entry
      .path()
      .strip_prefix(&source_root)
      .map_err(|e| SeedError::Generation(e.to_string()))?;
    let destination = target_dir.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&destination)?;
    } else {
      if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
      }
      fs::copy(entry.path(), &destination)?;
      debug!("Wrote {}", destination.display());
    }
  }

  Ok(())
}
