//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for figsync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// figsync - Figma asset sync tool
#[derive(Parser, Debug)]
#[command(name = "figsync")]
#[command(version, about, long_about = None)]
#[command(author = "Figsync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "figsync.toml", env = "FIGSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FIGSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sync rendered Figma nodes into the configured export directories
    Sync(commands::sync::SyncArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show exported files per job without touching the network
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
