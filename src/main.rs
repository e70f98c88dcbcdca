// src/main.rs
mod acquire;
mod cache;
mod cli;
mod config;
mod error;
mod fetch;
mod gate;
mod generate;
mod list;
mod reference;

use clap::Parser;
use cli::{Cli, Commands, InitArgs};
use error::SeedError;
use log::LevelFilter;

use crate::acquire::Acquisition;
use crate::config::Settings;
use crate::fetch::FetchOptions;

fn main() -> Result<(), SeedError> {
  let cli = Cli::parse();

  // Setup logging based on verbosity
  let log_level = match cli.verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  env_logger::Builder::new().filter_level(log_level).init();

  log::debug!("CLI args: {:?}", cli);

  let settings = Settings::resolve(cli.templates_dir)?;
  log::debug!("Cache root: {}", settings.cache_root.display());

  match cli.command {
    Commands::Init(args) => run_init(args, &settings),
    Commands::List => list::run_list(&settings),
  }
}

fn run_init(args: InitArgs, settings: &Settings) -> Result<(), SeedError> {
  let options = FetchOptions { clone: args.clone };

  let outcome = acquire::acquire(
    &args.template,
    args.name.as_deref(),
    &options,
    settings,
    gate::terminal_ask,
  )?;

  match outcome {
    // A decline at the gate is a clean no-op, not an error.
    Acquisition::Declined => Ok(()),
    Acquisition::Ready {
      name,
      source_dir,
      target_dir,
    } => {
      generate::generate(&name, &source_dir, &target_dir)?;
      println!();
      println!("\"{}\" created successfully.", name);
      Ok(())
    }
  }
}
