//! scratch CLI: numbered scratch files for quick notes
//!
//! Commands: new, next, completions

mod editor;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use scratch_core::allocator::{self, NextName};
use scratch_core::{config, Outcome, Settings};

use crate::editor::TerminalEditor;

/// Environment variable naming the settings file.
const SETTINGS_ENV: &str = "SCRATCH_SETTINGS";

/// Settings file name inside the per-user config directory.
const SETTINGS_FILE: &str = "scratch.toml";

#[derive(Parser)]
#[command(name = "scratch")]
#[command(version)]
#[command(about = "Numbered scratch files for quick, unfiled notes")]
struct Cli {
    /// Settings file (default: $SCRATCH_SETTINGS, then <config dir>/scratch/scratch.toml)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create the next scratch file and open it (default)
    #[command(alias = "n")]
    New(NewArgs),
    /// Print the path the next scratch file would get, creating nothing
    Next(NextArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args, Default)]
struct Target {
    /// Directory to create the file in, instead of `save_path`
    #[arg(long, value_name = "DIR")]
    save_path: Option<String>,

    /// Extension to use, instead of `extension`
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,
}

impl Target {
    fn overrides(&self) -> Settings {
        Settings {
            save_path: self.save_path.clone(),
            extension: self.extension.clone(),
        }
    }
}

#[derive(clap::Args, Default)]
struct NewArgs {
    /// Create immediately instead of prompting for an extension
    #[arg(short = 'x', long)]
    execute: bool,

    /// Do not launch $VISUAL / $EDITOR
    #[arg(long)]
    no_open: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    target: Target,
}

#[derive(clap::Args)]
struct NextArgs {
    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    target: Target,
}

#[derive(Serialize)]
struct Report<'a> {
    path: &'a str,
    index: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Commands::New(NewArgs::default())) {
        Commands::New(args) => {
            let settings = load_settings(cli.settings)?;
            let mut editor = TerminalEditor::new(!args.no_open);
            let outcome = scratch_core::run(
                args.execute,
                &args.target.overrides(),
                &settings,
                &mut editor,
            )?;
            match outcome {
                Outcome::Created(next) => print_next(&next, args.json)?,
                Outcome::Cancelled => {}
            }
        }
        Commands::Next(args) => {
            let settings = load_settings(cli.settings)?;
            let overrides = args.target.overrides();
            let config = config::resolve_without_create(&overrides.over(&settings))?;
            // A directory that does not exist yet would be created empty.
            let next = if config.save_path.exists() {
                allocator::next_file_path(&config.save_path, &config.extension)?
            } else {
                NextName {
                    index: 0,
                    path: config
                        .save_path
                        .join(allocator::file_name(0, &config.extension)),
                }
            };
            print_next(&next, args.json)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "scratch", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn settings_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .or_else(|| std::env::var_os(SETTINGS_ENV).map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|d| d.join("scratch").join(SETTINGS_FILE)))
}

fn load_settings(explicit: Option<PathBuf>) -> anyhow::Result<Settings> {
    match settings_path(explicit) {
        Some(path) => Settings::load(&path).context("failed to load settings"),
        None => Ok(Settings::default()),
    }
}

fn print_next(next: &NextName, json: bool) -> anyhow::Result<()> {
    if json {
        let path = next.path.to_string_lossy();
        let report = Report {
            path: &path,
            index: next.index,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", next.path.display());
    }
    Ok(())
}
