// src/config.rs

//! Settings for the buffer kernels.
//!
//! A [`Config`] can be built in code, parsed from JSON, or read from the
//! environment. Missing fields fall back to [`Config::default`].

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Environment variable that forces the scalar path when set to `1`/`true`.
pub const ENV_FORCE_SCALAR: &str = "AVX256_FORCE_SCALAR";
/// Environment variable overriding [`Config::min_vector_len`].
pub const ENV_MIN_VECTOR_LEN: &str = "AVX256_MIN_VECTOR_LEN";

/// How the kernels choose between the vector and scalar paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Never use the vector path, even when the CPU supports it.
    pub force_scalar: bool,
    /// Buffers shorter than this many elements go straight to the scalar
    /// path. Zero vectorizes everything that holds a full lane.
    pub min_vector_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            force_scalar: false,
            min_vector_len: 64,
        }
    }
}

impl Config {
    /// Parses a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(text).context("Failed to parse kernel configuration JSON")?;
        debug!("Loaded kernel config: {:?}", config);
        Ok(config)
    }

    /// Defaults, overridden by the `AVX256_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by `lookup`, in the format of the
    /// environment variables.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup(ENV_FORCE_SCALAR) {
            self.force_scalar = parse_flag(&value)
                .with_context(|| format!("Invalid value for {}: {:?}", ENV_FORCE_SCALAR, value))?;
        }
        if let Some(value) = lookup(ENV_MIN_VECTOR_LEN) {
            self.min_vector_len = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid value for {}: {:?}", ENV_MIN_VECTOR_LEN, value))?;
        }
        if self.force_scalar {
            warn!("Vector kernels disabled by configuration");
        }
        Ok(self)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {:?}", other),
    }
}
