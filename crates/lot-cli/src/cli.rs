//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lot_core::VehicleClass;

/// Single-facility parking lot.
///
/// Allocates vehicles to spots of their class and bills stays by the hour.
#[derive(Debug, Parser)]
#[command(name = "lot", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List configured levels and spots.
    Layout {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Quote the fee for a stay.
    Fee {
        /// Vehicle class (bike, car, truck).
        #[arg(long)]
        class: VehicleClass,

        /// Length of the stay in minutes.
        #[arg(long)]
        minutes: i64,
    },

    /// Walk through parking, exiting and re-parking on the first level.
    Demo {
        /// How long the first bike stays before exiting.
        #[arg(long, default_value_t = 30)]
        stay_minutes: i64,
    },

    /// Race concurrent park requests for one vehicle class.
    Contend {
        /// Vehicle class (bike, car, truck).
        #[arg(long)]
        class: VehicleClass,

        /// Number of concurrent callers.
        #[arg(long, default_value_t = 16)]
        callers: usize,

        /// Level to park on (defaults to the first configured level).
        #[arg(long)]
        floor: Option<u32>,
    },
}
