// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
  #[error("IO Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Local template \"{0}\" not found")]
  TemplateNotFound(String),

  #[error("Failed to download template \"{template}\": {message}")]
  DownloadFailed { template: String, message: String },

  #[error("Error during project generation: {0}")]
  Generation(String),

  #[error("User interaction failed: {0}")]
  Dialoguer(#[from] dialoguer::Error),

  #[error("Could not determine the template cache directory")]
  CannotDetermineCacheRoot,
}

impl SeedError {
  pub fn download_failed(template: &str, message: impl Into<String>) -> Self {
    SeedError::DownloadFailed {
      template: template.to_string(),
      message: message.into(),
    }
  }
}
