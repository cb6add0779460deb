//! Configuration model for deslang.
//!
//! This module defines the Config struct that represents `deslang.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.
//!
//! Everything here can also be supplied on the command line; flags win over
//! the file, and the file wins over built-in defaults.

use crate::error::{DeslangError, Result};
use serde::Deserialize;
use std::path::Path;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "deslang.yaml";

/// Configuration for the review session.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Service settings
    // =========================================================================
    /// Base URL for the accounts API, without a trailing account segment.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Cloudflare account id. May be left empty and passed via --account-id.
    #[serde(default)]
    pub account_id: String,

    /// Model identifier appended to the run endpoint.
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable read for the API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Request timeout in seconds. Unset means wait indefinitely; model
    /// inference can be slow and the operator can always interrupt.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    // =========================================================================
    // Retry settings
    // =========================================================================
    /// Fixed delay between retry attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Optional cap on retry attempts per prompt. Unset retries forever,
    /// which is the intended mode for attended sessions.
    #[serde(default)]
    pub max_retries: Option<u32>,
}

// Default value functions for serde
fn default_api_base() -> String {
    "https://api.cloudflare.com/client/v4/accounts".to_string()
}
fn default_model() -> String {
    "@cf/meta/llama-3-8b-instruct".to_string()
}
fn default_token_env() -> String {
    "CLOUDFLARE_API_TOKEN".to_string()
}
fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            account_id: String::new(),
            model: default_model(),
            token_env: default_token_env(),
            request_timeout_secs: None,
            retry_delay_ms: default_retry_delay_ms(),
            max_retries: None,
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DeslangError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| DeslangError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist and parse. With no explicit path,
    /// `deslang.yaml` in the working directory is used if present,
    /// otherwise the built-in defaults apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `api_base`, `model`, and `token_env` must be non-empty
    /// - `max_retries`, when set, must be greater than 0
    ///
    /// `account_id` may be empty here; the review command requires it from
    /// either the file or the --account-id flag.
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(DeslangError::UserError(
                "config validation failed: api_base must be non-empty".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(DeslangError::UserError(
                "config validation failed: model must be non-empty".to_string(),
            ));
        }

        if self.token_env.trim().is_empty() {
            return Err(DeslangError::UserError(
                "config validation failed: token_env must be non-empty".to_string(),
            ));
        }

        if self.max_retries == Some(0) {
            return Err(DeslangError::UserError(
                "config validation failed: max_retries must be greater than 0 when set; omit it to retry forever".to_string(),
            ));
        }

        Ok(())
    }
}
