//! Configuration schema definitions

use crate::error::{Error, Result};
use crate::validation::Validator;
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Reject values that parse but cannot drive a resolution
    pub fn validate(&self) -> Result<()> {
        let result = Validator::new()
            .required("general.descriptor", &self.general.descriptor)
            .required("general.default_variant", &self.general.default_variant)
            .range("policy.min_desugar_level", self.policy.min_desugar_level, 1, u8::MAX)
            .validate();

        if result.is_valid() {
            Ok(())
        } else {
            Err(Error::invalid_config_value(result.summary()))
        }
    }
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Build descriptor used when none is given on the command line
    #[serde(default = "default_descriptor")]
    pub descriptor: String,

    /// Variant resolved when `--variant` is omitted
    #[serde(default = "default_variant")]
    pub default_variant: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            descriptor: default_descriptor(),
            default_variant: default_variant(),
        }
    }
}

fn default_descriptor() -> String {
    "android/app/variants.toml".to_string()
}

fn default_variant() -> String {
    "default".to_string()
}

/// Resolution policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Language level below which disabled desugaring is flagged
    #[serde(default = "default_min_desugar_level")]
    pub min_desugar_level: u8,

    /// Warning prefixes that fail `check`
    #[serde(default)]
    pub deny: Vec<String>,

    /// Warning prefixes that are dropped from output
    #[serde(default)]
    pub allow: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_desugar_level: default_min_desugar_level(),
            deny: Vec::new(),
            allow: Vec::new(),
        }
    }
}

fn default_min_desugar_level() -> u8 {
    11
}

impl PolicyConfig {
    /// Whether a rendered warning matches one of the `deny` prefixes
    pub fn is_denied(&self, warning: &str) -> bool {
        matches_prefix(&self.deny, warning)
    }

    /// Whether a rendered warning matches one of the `allow` prefixes
    pub fn is_allowed(&self, warning: &str) -> bool {
        matches_prefix(&self.allow, warning)
    }
}

fn matches_prefix(prefixes: &[String], warning: &str) -> bool {
    prefixes
        .iter()
        .any(|p| warning.starts_with(p.trim_end_matches(':')))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
