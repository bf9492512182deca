mod commands;
mod core;
mod page;
mod project;
mod utils;

use clap::{Args, Parser, Subcommand};
use crate::core::error::{TrainError, TrainResult, print_error};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Keep a release train status page in sync with its components
#[derive(Parser)]
#[command(name = "release-train-page")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Path to train.toml (searched from the current directory by default)
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Show info-level logs
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Show debug-level logs
  #[arg(long, global = true)]
  debug: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Rewrite the page for a release train, then commit and push it
  Update {
    #[command(flatten)]
    projects: ProjectArgs,
  },

  /// Show what `update` would change, without committing
  Plan {
    #[command(flatten)]
    projects: ProjectArgs,
    /// Output the plan in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Print the components table of a local page
  Parse {
    /// Page to read (usually index.html)
    page: PathBuf,
    /// Output the table in JSON format
    #[arg(long)]
    json: bool,
  },
}

#[derive(Args)]
struct ProjectArgs {
  /// TOML file with a [projects] table of name = "version"
  #[arg(long, value_name = "FILE")]
  projects: Option<PathBuf>,

  /// Project version as name=version (repeatable, overrides --projects)
  #[arg(short = 'p', long = "project", value_name = "NAME=VERSION")]
  project: Vec<String>,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_tracing(verbose: bool, debug: bool) {
  let level = if debug {
    "debug"
  } else if verbose {
    "info"
  } else {
    "warn"
  };

  // RUST_LOG wins over the flags
  let filter = if std::env::var("RUST_LOG").is_ok() {
    EnvFilter::from_default_env()
  } else {
    EnvFilter::new(level)
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose, cli.debug);

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn run(cli: Cli) -> TrainResult<()> {
  match cli.command {
    Commands::Update { projects } => {
      let ctx = build_context(cli.config.as_deref())?;
      let projects = commands::load_projects(projects.projects.as_deref(), &projects.project)?;
      commands::run_update(&ctx, &projects)
    }
    Commands::Plan { projects, json } => {
      let ctx = build_context(cli.config.as_deref())?;
      let projects = commands::load_projects(projects.projects.as_deref(), &projects.project)?;
      commands::run_plan(&ctx, &projects, json)
    }
    Commands::Parse { page, json } => commands::run_parse(&page, json),
  }
}

fn build_context(config: Option<&Path>) -> TrainResult<crate::core::context::TrainContext> {
  let root = std::env::current_dir().map_err(|e| TrainError::message(format!("Failed to get current directory: {}", e)))?;
  crate::core::context::TrainContext::build(&root, config)
}

fn handle_error(err: TrainError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
