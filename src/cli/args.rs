//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// backspin - record a take, play it forwards or backwards
#[derive(Parser, Debug)]
#[command(name = "backspin")]
#[command(version)]
#[command(about = "Record microphone audio and play it back forwards or in reverse")]
#[command(long_about = None)]
pub struct Cli {
    /// Input device name (substring match); defaults to the system default
    #[arg(short, long, value_name = "NAME")]
    pub device: Option<String>,

    /// Capture sample rate in Hz; defaults to the device native rate
    #[arg(short = 'r', long, value_name = "HZ")]
    pub sample_rate: Option<u32>,

    /// Run without an audio output device (recording and reversal still work)
    #[arg(long)]
    pub mute: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List audio input devices
    Devices,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed deck options
#[derive(Debug, Clone)]
pub struct DeckOptions {
    pub device: Option<String>,
    pub sample_rate: Option<u32>,
    pub mute: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["device", "sample_rate"];
