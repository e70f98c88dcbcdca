// src/gate.rs
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::error::SeedError;

/// Outcome of the confirmation checkpoint guarding destructive targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
  Proceed,
  Abort,
}

/// Decides whether generating into the target needs a yes/no confirmation
/// and, when it does, blocks on `ask` until answered.
///
/// In-place generation always asks; a named target only asks when the
/// directory already exists. Declining is a clean abort, not an error.
pub fn confirm<F>(in_place: bool, target_exists: bool, mut ask: F) -> Result<Gate, SeedError>
where
  F: FnMut(&str) -> Result<bool, SeedError>,
{
  let message = if in_place {
    "Generate project in current directory?"
  } else if target_exists {
    "Target directory exists. Continue?"
  } else {
    return Ok(Gate::Proceed);
  };

  if ask(message)? {
    Ok(Gate::Proceed)
  } else {
    Ok(Gate::Abort)
  }
}

/// Interactive `ask` used outside of tests.
pub fn terminal_ask(message: &str) -> Result<bool, SeedError> {
  let answer = Confirm::with_theme(&ColorfulTheme::default())
    .with_prompt(message)
    .default(false)
    .interact()?;
  Ok(answer)
}
