use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SealnoteError, SealnoteResult};

/// Top-level deployment configuration (loaded from sealnote.toml).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SealnoteConfig {
    pub server: ServerConfig,
}

impl SealnoteConfig {
    /// Load configuration from a TOML file; missing file means defaults.
    pub fn load(path: &Path) -> SealnoteResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SealnoteError::Config(format!("{}: {e}", path.display())))
    }
}

/// Note lifecycle configuration, threaded explicitly into the lifecycle
/// service constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Maximum accepted ciphertext size in bytes (default: 5 MiB)
    pub max_payload_bytes: usize,
    /// Allow notes without an expiration date (default: false)
    pub allow_unlimited_lifetime: bool,
    /// Whether this deployment requires authentication to create notes.
    /// Private (`is_public = false`) notes are only accepted when true.
    pub requires_authentication: bool,
    /// Seconds between sweeper passes (default: 300)
    pub sweep_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: 5 * 1024 * 1024,
            allow_unlimited_lifetime: false,
            requires_authentication: false,
            sweep_interval_secs: 300,
        }
    }
}
