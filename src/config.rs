//! Configuration management.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Inventory engine configuration
    pub inventory: InventoryConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Inventory engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Checkout window: how long a hold stays valid, in seconds
    pub hold_ttl_secs: u64,
    /// How often the expiry sweeper runs, in seconds
    pub sweep_interval_secs: u64,
    /// Maximum tickets per single hold
    pub max_hold_quantity: u32,
}

impl InventoryConfig {
    /// Hold time-to-live as a chrono duration.
    #[must_use]
    pub fn hold_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.hold_ttl_secs).unwrap_or(i64::MAX))
    }

    /// Sweep interval as a std duration.
    #[must_use]
    pub const fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
                log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
                shutdown_timeout: env::var("SHUTDOWN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },
            inventory: InventoryConfig {
                hold_ttl_secs: env::var("HOLD_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600), // 10 minute checkout window
                sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
                max_hold_quantity: env::var("MAX_HOLD_QUANTITY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_level: "info".to_string(),
                shutdown_timeout: 30,
            },
            inventory: InventoryConfig {
                hold_ttl_secs: 600,
                sweep_interval_secs: 30,
                max_hold_quantity: 8,
            },
        }
    }
}
