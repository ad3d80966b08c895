// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Kernel configuration loading
//!
//! Two-tier loading: a TOML document provides the base values, environment
//! variables override them at runtime. The kernel itself never reads
//! configuration implicitly; callers load a [`KernelConfig`] and hand the
//! relevant pieces to the components that need them.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Environment variable overriding the partition count
pub const PARTITIONS_ENV: &str = "NERVA_PARTITIONS";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Kernel build-time configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Number of worker partitions the network is sharded over
    pub partitions: usize,

    /// Synapse models registered up front (tables still grow as more are added)
    #[serde(default)]
    pub initial_synapse_models: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            partitions: 1,
            initial_synapse_models: 0,
        }
    }
}

impl KernelConfig {
    /// Parse a configuration from a TOML document and apply environment
    /// overrides, then validate.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let mut config: KernelConfig = toml::from_str(content)?;
        config.apply_environment_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply runtime overrides from the environment.
    ///
    /// `NERVA_PARTITIONS` replaces the partition count when set.
    pub fn apply_environment_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(value) = env::var(PARTITIONS_ENV) {
            self.partitions = value.parse().map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "{} must be a positive integer, got '{}'",
                    PARTITIONS_ENV, value
                ))
            })?;
        }
        Ok(())
    }

    /// Check structural constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.partitions == 0 {
            return Err(ConfigError::InvalidValue(
                "partitions must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
