use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_SERVER_URL;

pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Parser)]
#[command(name = "rideterm", about = "Terminal dashboard client for an Edu-Ride booking server")]
pub struct Cli {
    /// Server base URL (overrides saved configuration)
    #[arg(long)]
    pub server: Option<String>,
    /// Ride list refresh interval in seconds
    #[arg(long)]
    pub refresh: Option<u64>,
    /// Fetch the ride list once and print it as JSON
    #[arg(long)]
    pub json: bool,
    /// Reset saved configuration
    #[arg(long)]
    pub reset: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedConfig {
    pub server_url: String,
    pub refresh_secs: u64,
    pub currency: String,
}

impl Default for SavedConfig {
    fn default() -> Self {
        SavedConfig {
            server_url: DEFAULT_SERVER_URL.to_string(),
            refresh_secs: DEFAULT_REFRESH_SECS,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rideterm").join("config.json"))
}

pub fn load_config() -> Option<SavedConfig> {
    let path = config_path()?;
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

pub fn save_config(config: &SavedConfig) -> Result<(), io::Error> {
    let path = config_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, contents)
}

/// Returns true if a saved configuration existed and was removed.
pub fn reset_config() -> Result<bool, io::Error> {
    let Some(path) = config_path() else {
        return Ok(false);
    };
    if path.exists() {
        fs::remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}
