use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// How many processes the census keeps after ranking.
    pub top_processes: usize,
    /// Session log path; logging stays off when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            top_processes: 5,
            log_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub refresh_rate_ms: u64,
    pub theme: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            refresh_rate_ms: 2000,
            theme: "dark".to_string(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysmon").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
