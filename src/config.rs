//! Configuration loaded from risk_cascade.toml and environment variables

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskCascadeError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub propagation: PropagationConfig,
}

/// Tunables for cascading risk propagation
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Critical-path multiplier applied to each node's local failure probability
    pub multiplier: f32,
    /// Bound on ancestor-chain traversal depth
    pub max_depth: usize,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            multiplier: 1.2,
            max_depth: 10,
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses the RISK_CASCADE_CONFIG environment variable or defaults to
    /// "risk_cascade.toml"; env overrides win over file values.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let config_path =
            std::env::var("RISK_CASCADE_CONFIG").unwrap_or_else(|_| "risk_cascade.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            toml::from_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        if let Some(multiplier) = std::env::var("RISK_MULTIPLIER")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
        {
            config.propagation.multiplier = multiplier;
            tracing::debug!("RISK_MULTIPLIER env override applied");
        }
        if let Some(max_depth) = std::env::var("RISK_MAX_DEPTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config.propagation.max_depth = max_depth;
            tracing::debug!("RISK_MAX_DEPTH env override applied");
        }

        if config.propagation.multiplier < 0.0 {
            return Err(RiskCascadeError::Config {
                message: format!(
                    "propagation.multiplier must be non-negative, got {}",
                    config.propagation.multiplier
                ),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.propagation.multiplier, 1.2);
        assert_eq!(config.propagation.max_depth, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[propagation]\nmultiplier = 1.5\n").unwrap();
        assert_eq!(config.propagation.multiplier, 1.5);
        assert_eq!(config.propagation.max_depth, 10);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.propagation.multiplier, 1.2);
    }
}
