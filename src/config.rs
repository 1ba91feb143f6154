//! Configuration management for Ampora
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files.

use crate::error::{AmporaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Routing and backend API endpoints
    pub api: ApiConfig,

    /// Charging telemetry stream endpoint
    pub stream: StreamConfig,

    /// Payment gateway configuration
    pub payment: PaymentConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Service endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the routing/trip service
    pub routing_base_url: String,

    /// Base URL of the Ampora backend REST API
    pub backend_base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Charging feed endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Base URL of the streaming endpoint
    pub base_url: String,

    /// Path of the charging feed
    pub path: String,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Payment gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Gateway checkout URL the redirect form is submitted to
    pub checkout_url: String,

    /// ISO 4217 currency code
    pub currency: String,

    /// URL the gateway sends the customer back to on success
    pub return_url: String,

    /// URL the gateway sends the customer back to on cancel
    pub cancel_url: String,

    /// Backend callback URL the gateway notifies (server-to-server)
    pub notify_url: String,

    /// Item label shown on the gateway checkout page
    pub item_label: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Path to log file (or directory for rotated files)
    pub file: String,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,

    /// Number of rotated files to keep
    pub backup_count: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            routing_base_url: "http://127.0.0.1:8000".to_string(),
            backend_base_url: "http://127.0.0.1:8083".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ampora.dev".to_string(),
            path: "/ws/charging".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            checkout_url: "https://sandbox.payhere.lk/pay/checkout".to_string(),
            currency: "LKR".to_string(),
            return_url: "https://ampora.dev/payment-success".to_string(),
            cancel_url: "https://ampora.dev/payment-cancel".to_string(),
            notify_url: "http://127.0.0.1:8083/api/payment/payhere/charging-notify".to_string(),
            item_label: "EV Charging Session Payment".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: "/tmp/ampora.log".to_string(),
            console_output: true,
            json_format: false,
            backup_count: 5,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        let default_paths = ["ampora_config.yaml", "/etc/ampora/config.yaml"];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        // Fall back to default configuration
        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.routing_base_url.is_empty() {
            return Err(AmporaError::validation(
                "api.routing_base_url",
                "Routing base URL cannot be empty",
            ));
        }

        if self.api.backend_base_url.is_empty() {
            return Err(AmporaError::validation(
                "api.backend_base_url",
                "Backend base URL cannot be empty",
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(AmporaError::validation(
                "api.timeout_secs",
                "Timeout must be greater than 0",
            ));
        }

        if self.stream.base_url.is_empty() {
            return Err(AmporaError::validation(
                "stream.base_url",
                "Stream base URL cannot be empty",
            ));
        }

        if self.stream.connect_timeout_secs == 0 {
            return Err(AmporaError::validation(
                "stream.connect_timeout_secs",
                "Timeout must be greater than 0",
            ));
        }

        if self.payment.checkout_url.is_empty() {
            return Err(AmporaError::validation(
                "payment.checkout_url",
                "Checkout URL cannot be empty",
            ));
        }

        if self.payment.currency.len() != 3 {
            return Err(AmporaError::validation(
                "payment.currency",
                "Currency must be a 3-letter ISO code",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.payment.currency, "LKR");
        assert_eq!(config.stream.path, "/ws/charging");
        assert_eq!(config.stream.connect_timeout_secs, 10);
        assert!(config.logging.console_output);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        // Test empty routing URL
        config.api.routing_base_url = String::new();
        assert!(config.validate().is_err());

        // Reset and test invalid currency
        config = Config::default();
        config.payment.currency = "RUPEES".to_string();
        assert!(config.validate().is_err());

        // Reset and test zero stream timeout
        config = Config::default();
        config.stream.connect_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let deserialized: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            config.api.backend_base_url,
            deserialized.api.backend_base_url
        );
    }
}
