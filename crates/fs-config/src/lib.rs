// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for the fs-common
//! libraries.
//!
//! [`CommonConfig`] carries the few runtime settings the classifier and the
//! timestamp handler need. Load it from TOML with [`load_config`], check it
//! with [`validate_config`], and layer overrides with [`merge_configs`].
#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use fs_error::DEFAULT_APP_NAMESPACE;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file could not be read.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The namespace does not look like a module or package path.
    SuspiciousNamespace {
        /// Configured namespace.
        namespace: String,
    },
    /// The database offset is not a whole number of quarter hours.
    UnusualOffset {
        /// Offset in minutes.
        minutes: i32,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::SuspiciousNamespace { namespace } => write!(
                f,
                "app_namespace '{namespace}' has no '.' or '::' separator; frames may match too broadly"
            ),
            ConfigWarning::UnusualOffset { minutes } => {
                write!(f, "db_utc_offset_minutes {minutes} is not a multiple of 15")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Runtime settings shared by the fs-common libraries.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct CommonConfig {
    /// Module/package prefix identifying the application's own stack frames.
    pub app_namespace: String,

    /// Log level (`"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Offset, in minutes east of UTC, that database timestamps are stored in.
    pub db_utc_offset_minutes: i32,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            app_namespace: DEFAULT_APP_NAMESPACE.into(),
            log_level: Some("info".into()),
            db_utc_offset_minutes: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest accepted offset magnitude (18 hours).
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a [`CommonConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`CommonConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<CommonConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => CommonConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML string into a [`CommonConfig`]. Missing keys take defaults.
pub fn parse_toml(content: &str) -> Result<CommonConfig, ConfigError> {
    toml::from_str::<CommonConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `FS_APP_NAMESPACE`
/// - `FS_LOG_LEVEL`
/// - `FS_DB_UTC_OFFSET_MINUTES` (must be an integer)
pub fn apply_env_overrides(config: &mut CommonConfig) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var("FS_APP_NAMESPACE") {
        config.app_namespace = val;
    }
    if let Ok(val) = std::env::var("FS_LOG_LEVEL") {
        config.log_level = Some(val);
    }
    if let Ok(val) = std::env::var("FS_DB_UTC_OFFSET_MINUTES") {
        config.db_utc_offset_minutes =
            val.trim().parse().map_err(|_| ConfigError::ParseError {
                reason: format!("FS_DB_UTC_OFFSET_MINUTES is not an integer: '{val}'"),
            })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors (empty namespace, unknown log level, out-of-range offset) are
/// returned as a [`ConfigError::ValidationError`]; soft issues come back as
/// warnings.
pub fn validate_config(config: &CommonConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    let namespace = config.app_namespace.trim();
    if namespace.is_empty() {
        errors.push("app_namespace must not be empty".into());
    } else if !namespace.contains('.') && !namespace.contains("::") {
        warnings.push(ConfigWarning::SuspiciousNamespace {
            namespace: namespace.to_string(),
        });
    }

    if let Some(ref level) = config.log_level
        && !VALID_LOG_LEVELS.contains(&level.as_str())
    {
        errors.push(format!("invalid log_level '{level}'"));
    }

    let offset = config.db_utc_offset_minutes;
    if offset.abs() > MAX_OFFSET_MINUTES {
        errors.push(format!(
            "db_utc_offset_minutes {offset} out of range (-{MAX_OFFSET_MINUTES}..={MAX_OFFSET_MINUTES})"
        ));
    } else if offset % 15 != 0 {
        warnings.push(ConfigWarning::UnusualOffset { minutes: offset });
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations. Values in `overlay` take precedence over `base`
/// wherever the overlay differs from the default. An overlay still at the
/// default log level (or without one) keeps the base's level.
pub fn merge_configs(base: CommonConfig, overlay: CommonConfig) -> CommonConfig {
    let defaults = CommonConfig::default();
    CommonConfig {
        app_namespace: if overlay.app_namespace != defaults.app_namespace {
            overlay.app_namespace
        } else {
            base.app_namespace
        },
        log_level: match overlay.log_level {
            Some(level) if defaults.log_level.as_deref() != Some(level.as_str()) => Some(level),
            other => base.log_level.or(other),
        },
        db_utc_offset_minutes: if overlay.db_utc_offset_minutes != defaults.db_utc_offset_minutes
        {
            overlay.db_utc_offset_minutes
        } else {
            base.db_utc_offset_minutes
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
