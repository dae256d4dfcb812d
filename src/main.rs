//! cfgload CLI - load a JSON configuration file and report its contents.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cfgload::config::{self, ConfigDefaults, DEFAULT_MAX_SIZE, exit_code};

#[derive(Parser)]
#[command(name = "cfgload")]
#[command(about = "Load and inspect a JSON configuration file", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "cfgload.json", global = true)]
    config: PathBuf,

    /// Maximum configuration file size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE, global = true)]
    max_size: u64,

    /// Root used when the file does not set one
    #[arg(long, global = true, conflicts_with = "no_defaults")]
    default_root: Option<String>,

    /// Require every field to be present in the file
    #[arg(long, global = true)]
    no_defaults: bool,

    /// Verbose output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configured root
    Show {
        /// Print the whole record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate,

    /// Initialize a new configuration file
    Init {
        /// Root path to write into the file
        #[arg(short, long, default_value = config::DEFAULT_ROOT)]
        root: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = expand_path(&cli.config);
    let defaults = build_defaults(cli.default_root.clone(), cli.no_defaults);

    match cli.command {
        Commands::Show { json } => show_config(&config_path, cli.max_size, &defaults, json),
        Commands::Validate => validate_config(&config_path, cli.max_size, &defaults),
        Commands::Init { root, force } => init_config(&config_path, &root, force),
    }
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn build_defaults(default_root: Option<String>, no_defaults: bool) -> ConfigDefaults {
    if no_defaults {
        return ConfigDefaults::required();
    }
    match default_root {
        Some(root) => ConfigDefaults::required().with_root(root),
        None => ConfigDefaults::default(),
    }
}

/// Loads the configuration, exiting with the error's category code on failure.
fn load_or_exit(config_path: &Path, max_size: u64, defaults: &ConfigDefaults) -> config::Config {
    match config::load(config_path, max_size, defaults) {
        Ok(config) => {
            info!("Loaded configuration from {}", config_path.display());
            config
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(exit_code(e.category()));
        }
    }
}

fn show_config(
    config_path: &Path,
    max_size: u64,
    defaults: &ConfigDefaults,
    json: bool,
) -> Result<()> {
    let config = load_or_exit(config_path, max_size, defaults);

    if json {
        let encoded = config.to_json().context("Failed to encode configuration")?;
        println!("{}", encoded);
    } else {
        println!("{}", config.root());
    }

    Ok(())
}

fn validate_config(config_path: &Path, max_size: u64, defaults: &ConfigDefaults) -> Result<()> {
    let config = load_or_exit(config_path, max_size, defaults);

    println!("Configuration is valid!");
    println!();
    println!("Settings:");
    println!("  Root: {} ({})", config.root(), config.root_origin());
    println!("  Size limit: {} bytes", max_size);

    Ok(())
}

fn init_config(config_path: &Path, root: &str, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        eprintln!(
            "{} already exists. Remove it first or pass --force.",
            config_path.display()
        );
        std::process::exit(1);
    }

    let contents = serde_json::to_string_pretty(&serde_json::json!({ "root": root }))
        .context("Failed to encode configuration")?;

    std::fs::write(config_path, format!("{}\n", contents))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {}", config_path.display());
    println!();
    println!("Edit the configuration as needed, then run:");
    println!("  cfgload --config {} show", config_path.display());

    Ok(())
}
