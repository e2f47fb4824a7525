//! search-controls: time-range and query-parameter state for session search
//!
//! Drives the search controls from the command line: resolve a query string,
//! replay scripted user interactions, and manage configuration.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use search_controls::{
    cli::{self, RunContext},
    config::{self, ConfigOverrides, ControlsConfig, Validatable},
    model::MAX_EPOCH_SECS,
    notify::{build_listeners, ListenerFormat},
    ControlsError,
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "search-controls")]
#[command(version)]
#[command(about = "Resolve and replay session search controls", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Resolve a shared link at a fixed time
    search-controls --now 1700000000 resolve '?startTime=1699996400&stopTime=1700000000'

    # Replay a script of interactions, streaming notifications as NDJSON
    search-controls --format json replay 'date=24' --script session.ndjson

    # List the time-range choices
    search-controls presets")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fixed current time in epoch seconds (wall clock when omitted)
    #[arg(
        long,
        global = true,
        value_name = "EPOCH_SECS",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(-MAX_EPOCH_SECS..=MAX_EPOCH_SECS)
    )]
    now: Option<i64>,

    /// Output format (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    format: Option<ListenerFormat>,

    /// Interpret and display picker dates in UTC
    #[arg(long, global = true)]
    utc: bool,

    /// Default relative time range in hours (overrides the config file)
    #[arg(long, global = true, value_name = "HOURS")]
    default_hours: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize from a query string and print the synchronized state
    Resolve {
        /// Query string, with or without the leading '?'
        query: String,
    },

    /// Initialize from a query string, then apply an NDJSON control script
    Replay {
        /// Query string, with or without the leading '?'
        #[arg(default_value = "")]
        query: String,

        /// Script file (stdin if not specified)
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// List the time-range selector choices
    Presets,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .search-controls.yaml in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let overrides = ConfigOverrides {
        format: cli.format,
        utc: cli.utc,
        default_hours: cli.default_hours,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Resolve { query } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            let format = config.output.format;
            let ctx = RunContext::new(config, cli.now);
            let listeners = build_listeners(format, Box::new(io::stdout()));
            let snapshot = cli::run_resolve(&query, &ctx, listeners);
            snapshot.write_to(format, &mut io::stdout())?;
            Ok(())
        }

        Commands::Replay { query, script } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            let format = config.output.format;
            let ctx = RunContext::new(config, cli.now);
            let listeners = build_listeners(format, Box::new(io::stdout()));
            let snapshot = match script {
                Some(path) => {
                    let file = File::open(&path)
                        .map_err(|e| ControlsError::io(&path, e))
                        .context("failed to open control script")?;
                    cli::run_replay(&query, BufReader::new(file), &ctx, listeners)?
                }
                None => cli::run_replay(&query, io::stdin().lock(), &ctx, listeners)?,
            };
            snapshot.write_to(format, &mut io::stdout())?;
            Ok(())
        }

        Commands::Presets => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            cli::run_presets(&config, config.output.format, &mut io::stdout())?;
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "search-controls",
                &mut io::stdout(),
            );
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    ControlsConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for path in config::search_paths() {
                    eprintln!("  {}", path.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".search-controls.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}

/// Load the effective config and reject it if it does not validate.
fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ControlsConfig> {
    let (config, loaded_from) = ControlsConfig::from_file_with_overrides(path, overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(ControlsError::config(details.join("; ")).into());
    }
    Ok(config)
}
