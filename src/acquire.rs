// src/acquire.rs
use std::env;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::cache;
use crate::config::Settings;
use crate::error::SeedError;
use crate::fetch::{self, FetchOptions};
use crate::gate::{self, Gate};
use crate::reference::{self, TemplateReference};

/// Everything the generation step needs, or a clean decline at the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
  Ready {
    name: String,
    source_dir: PathBuf,
    target_dir: PathBuf,
  },
  Declined,
}

/// End-to-end template acquisition: derive the project name and target
/// directory, run the confirmation gate, then resolve the template locally
/// or fetch it into the cache. Nothing is ever written to the target
/// directory here; that is the generation step's job.
pub fn acquire<F>(
  raw_template: &str,
  raw_name: Option<&str>,
  options: &FetchOptions,
  settings: &Settings,
  ask: F,
) -> Result<Acquisition, SeedError>
where
  F: FnMut(&str) -> Result<bool, SeedError>,
{
  let cwd = env::current_dir()?;
  acquire_from(raw_template, raw_name, options, settings, &cwd, ask)
}

/// [`acquire`] with an explicit working directory.
pub fn acquire_from<F>(
  raw_template: &str,
  raw_name: Option<&str>,
  options: &FetchOptions,
  settings: &Settings,
  cwd: &Path,
  mut ask: F,
) -> Result<Acquisition, SeedError>
where
  F: FnMut(&str) -> Result<bool, SeedError>,
{
  let in_place = matches!(raw_name, None | Some("."));
  let name = match raw_name {
    Some(raw) if raw != "." => raw.to_string(),
    _ => cwd
      .file_name()
      .map(|segment| segment.to_string_lossy().into_owned())
      .unwrap_or_else(|| "project".to_string()),
  };
  let target_dir = if in_place {
    cwd.to_path_buf()
  } else {
    cwd.join(&name)
  };
  debug!(
    "Project \"{}\", target {} (in place: {})",
    name,
    target_dir.display(),
    in_place
  );

  // The gate only depends on the target state, so it runs before any
  // template resolution; while it is waiting nothing is fetched or evicted.
  if confirm_target(in_place, &target_dir, &mut ask)? == Gate::Abort {
    info!("Declined, nothing to do.");
    return Ok(Acquisition::Declined);
  }

  let source_dir = match reference::classify(raw_template, settings.templates_root.as_deref()) {
    TemplateReference::Local(path) => {
      debug!("\"{}\" classified as a local template", raw_template);
      let resolved = if path.is_absolute() {
        path
      } else {
        cwd.join(path)
      };
      reference::locate(&resolved, raw_template)?
    }
    TemplateReference::Remote(id) => {
      let cache_dir = cache::cache_path_for(&settings.cache_root, &id);
      debug!(
        "\"{}\" classified as remote, cache entry {}",
        id,
        cache_dir.display()
      );
      fetch::fetch(&id, &cache_dir, options)?;
      cache_dir
    }
  };

  Ok(Acquisition::Ready {
    name,
    source_dir,
    target_dir,
  })
}

fn confirm_target<F>(in_place: bool, target_dir: &Path, ask: F) -> Result<Gate, SeedError>
where
  F: FnMut(&str) -> Result<bool, SeedError>,
{
  gate::confirm(in_place, target_dir.exists(), ask)
}
