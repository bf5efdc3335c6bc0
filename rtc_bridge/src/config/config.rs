// rtc_bridge/src/config/config.rs
use crate::dispatch::policy::QueuePolicy;
use crate::error::{BridgeError, BridgeResult};
use ron::ser::{PrettyConfig, to_string_pretty};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use once_cell::sync::Lazy;
use std::fs;

/// Configuration installed by the binary at startup.
pub static BRIDGE_CONFIG: Lazy<RwLock<BridgeConfig>> =
    Lazy::new(|| RwLock::new(BridgeConfig::default()));

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    pub queue: QueuePolicy,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `log` filter string, e.g. `"info"` or `"rtc_bridge=debug"`.
    pub level: String,
    /// Where rotated log files go. Logs go to stderr when unset.
    pub directory: Option<PathBuf>,
    pub basename: String,
    /// Also echo warnings and errors to stderr when logging to files.
    pub to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            basename: "rtc_bridge".to_string(),
            to_stderr: true,
        }
    }
}

/// Parses a config from RON text. Missing fields take their defaults.
pub fn parse_config(text: &str) -> BridgeResult<BridgeConfig> {
    ron::from_str(text).map_err(|e| BridgeError::Config(e.to_string()))
}

/// Loads the config at `path`. A missing file yields the default config.
pub fn load_config(path: &Path) -> BridgeResult<BridgeConfig> {
    match fs::read_to_string(path) {
        Ok(text) => parse_config(&text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            crate::bridge_info!("No config at {}, using defaults.", path.display());
            Ok(BridgeConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes `config` to `path` as pretty RON, creating parent directories.
pub fn save_config(path: &Path, config: &BridgeConfig) -> BridgeResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let ron = to_string_pretty(config, PrettyConfig::default())
        .map_err(|e| BridgeError::Config(e.to_string()))?;
    fs::write(path, ron)?;
    Ok(())
}

/// Replaces the process-wide config.
pub fn install_config(config: BridgeConfig) {
    match BRIDGE_CONFIG.write() {
        Ok(mut current) => *current = config,
        Err(e) => *e.into_inner() = config,
    }
}

/// Returns a copy of the process-wide config.
pub fn current_config() -> BridgeConfig {
    BRIDGE_CONFIG
        .read()
        .map(|config| config.clone())
        .unwrap_or_else(|e| e.into_inner().clone())
}
