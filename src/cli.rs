use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "paddysense",
    version,
    about = "Paddy farm management TUI",
    long_about = "Terminal dashboard for a Sri Lankan paddy farm: field plots, \
sensor readings, weather lookups and a cultivation advisor backed by a local \
SQLite store."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the YAML config file (falls back to $PADDYSENSE_CONFIG,
    /// ./paddysense.yaml, then the XDG config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the SQLite database and log file (falls back to
    /// $PADDYSENSE_DATA_DIR, then the XDG data dir)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through interactive setup and write the config file
    Init,
    /// Validate the config and probe the geocoding and forecast services
    Check,
}
