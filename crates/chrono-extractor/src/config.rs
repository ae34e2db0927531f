//! Configuration for the schedule extractor

use crate::prompt::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the schedule extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Model identifier sent to the provider
    pub model: String,

    /// Sampling temperature (kept low for repeatable output)
    pub temperature: f64,

    /// Maximum input text length (characters)
    pub max_input_length: usize,

    /// Maximum time for the provider call (seconds)
    pub request_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature {} out of range [0.0, 2.0]",
                self.temperature
            ));
        }
        if self.max_input_length == 0 {
            return Err("max_input_length must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_input_length: 10_000,
            request_timeout_secs: 60,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: short inputs, fail fast
    pub fn aggressive() -> Self {
        Self {
            max_input_length: 2_000,
            request_timeout_secs: 15,
            ..Self::default()
        }
    }

    /// Lenient preset: long inputs, patient timeout
    pub fn lenient() -> Self {
        Self {
            max_input_length: 50_000,
            request_timeout_secs: 180,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
