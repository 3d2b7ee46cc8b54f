//! Parking lot CLI library.
//!
//! This crate provides the CLI interface for the parking lot.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::{Config, LevelConfig, SpotConfig};
