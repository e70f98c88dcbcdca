// src/list.rs
use std::fs;
use std::path::Path;

use log::warn;

use crate::config::Settings;
use crate::error::SeedError;

/// Prints the templates under the local templates root and the cached
/// remote templates. Missing directories just print as empty.
pub fn run_list(settings: &Settings) -> Result<(), SeedError> {
  match &settings.templates_root {
    Some(root) => {
      println!("Local templates ({}):", root.display());
      print_entries(root)?;
    }
    None => println!("Local templates: no templates directory configured."),
  }

  println!();
  println!(
    "Cached remote templates ({}):",
    settings.cache_root.display()
  );
  print_entries(&settings.cache_root)?;

  Ok(())
}

fn print_entries(dir: &Path) -> Result<(), SeedError> {
  if !dir.is_dir() {
    println!("  (none)");
    return Ok(());
  }

  let mut names = Vec::new();
  for entry_result in fs::read_dir(dir)? {
    let entry = match entry_result {
      Ok(e) => e,
      Err(e) => {
        warn!("Failed to read entry in {}: {}", dir.display(), e);
        continue;
      }
    };
    if entry.path().is_dir() {
      names.push(entry.file_name().to_string_lossy().into_owned());
    }
  }

  if names.is_empty() {
    println!("  (none)");
  } else {
    names.sort();
    for name in names {
      println!("  {}", name);
    }
  }

  Ok(())
}
