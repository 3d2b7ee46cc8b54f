//! CLI subcommand implementations.

pub mod contend;
pub mod demo;
pub mod fee;
pub mod layout;
