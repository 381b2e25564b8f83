//! Tunnel client configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::Domain;

/// Configuration for the query name encoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunnelConfig {
    /// Carrier domain under which payload labels are packed
    pub carrier: String,

    /// Base64-encode messages before packaging
    #[serde(default = "default_encode_base64")]
    pub encode_base64: bool,
}

fn default_encode_base64() -> bool {
    true
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            carrier: "tunnel.example.com".to_string(),
            encode_base64: true,
        }
    }
}

impl TunnelConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let carrier = Domain::parse(&self.carrier)
            .map_err(|e| format!("Invalid carrier domain {:?}: {}", self.carrier, e))?;

        if carrier.max_next_label_length() == 0 {
            return Err(format!(
                "Carrier domain {:?} leaves no room for payload labels",
                self.carrier
            ));
        }

        Ok(())
    }
}
