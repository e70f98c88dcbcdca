// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "seedkit",
    author,
    version,
    about = "Spawns new projects from local or remote templates.",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Increase verbosity level (e.g., -v, -vv)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Directory that short local template names resolve against
  #[arg(long)]
  #[clap(env = "SEEDKIT_TEMPLATES_DIR")]
  pub templates_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Create a new project from a template
  Init(InitArgs),
  /// List local templates and cached remote templates
  List,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
  /// Template to use: a path, a short local name, or `[host:]owner/repo[#ref]`
  pub template: String,

  /// Project name; omit it or pass "." to create in the current directory
  pub name: Option<String>,

  /// Fetch with `git clone` instead of an archive download
  #[arg(short, long)]
  pub clone: bool,
}
