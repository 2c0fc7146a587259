//! Careboard - employee review explorer for healthcare facilities
//!
//! A CLI tool that loads a facility/review dataset snapshot and renders
//! rating, salary, and recommendation reports.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, dataset, invalid input)
//!   2 - Lookup target not found
//!
//! Logs and error messages go to stderr; stdout carries only the rendered
//! report.

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod store;

use anyhow::{Context, Result};
use cli::{Args, Command, OutputFormat};
use config::Config;
use error::EngineError;
use store::MemoryStore;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Careboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the requested report
    match run(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .careboard.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".careboard.toml");

    if path.exists() {
        eprintln!("⚠️  .careboard.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .careboard.toml")?;

    println!("✅ Created .careboard.toml with default settings.");
    println!("   Edit it to point at your dataset snapshot.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        // Stdout carries the rendered report; logs go to stderr
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the requested report. Returns exit code (0 or 2).
fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let command = args.command.clone().expect("subcommand checked in Args::validate");

    // One snapshot per invocation; dropped when the report is done
    let store = MemoryStore::load(&config.store.data)?;
    info!("Using dataset {}", config.store.data.display());

    let output = match command {
        Command::Facility { id, name } => {
            match report::facility_detail(&store, id, name.as_deref()) {
                Ok(detail) => match args.format {
                    OutputFormat::Json => report::to_json(&detail)?,
                    OutputFormat::Text => report::render_facility_detail(&detail, &config.render),
                },
                Err(EngineError::FacilityNotFound(key)) => {
                    eprintln!("Facility not found: {key}");
                    return Ok(2);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Search { title } => {
            let search = report::search_by_title(&store, &title)?;
            match args.format {
                OutputFormat::Json => report::to_json(&search)?,
                OutputFormat::Text => report::render_title_search(&search, &config.render),
            }
        }
        Command::Compare => {
            let comparison = report::compare_facilities(&store)?;
            match args.format {
                OutputFormat::Json => report::to_json(&comparison)?,
                OutputFormat::Text => report::render_comparison(&comparison),
            }
        }
        Command::Salary { title } => {
            let insight = report::salary_insight(&store, &title)?;
            match args.format {
                OutputFormat::Json => report::to_json(&insight)?,
                OutputFormat::Text => report::render_salary_insight(&insight, &config.render),
            }
        }
        Command::Facilities { city } => {
            let roster = report::facility_roster(&store, city.as_deref())?;
            match args.format {
                OutputFormat::Json => report::to_json(&roster)?,
                OutputFormat::Text => report::render_roster(&roster),
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .careboard.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
