use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use lot_core::ParkingLot;
use tracing_subscriber::EnvFilter;

use lot_cli::commands::{contend, demo, fee, layout};
use lot_cli::{Cli, Commands, Config};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Load config and build the one lot this process serves.
fn open_lot(config_path: Option<&Path>) -> Result<ParkingLot> {
    load_config(config_path)?
        .build_lot()
        .context("invalid lot layout")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Commands::Layout { json }) => {
            let lot = open_lot(cli.config.as_deref())?;
            layout::run(&mut stdout, &lot, *json)?;
        }
        Some(Commands::Fee { class, minutes }) => {
            let config = load_config(cli.config.as_deref())?;
            fee::run(&mut stdout, &config.rates, *class, *minutes)?;
        }
        Some(Commands::Demo { stay_minutes }) => {
            let lot = open_lot(cli.config.as_deref())?;
            demo::run(&mut stdout, &lot, *stay_minutes)?;
        }
        Some(Commands::Contend {
            class,
            callers,
            floor,
        }) => {
            let lot = open_lot(cli.config.as_deref())?;
            contend::run(&mut stdout, &lot, *floor, *class, *callers)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
