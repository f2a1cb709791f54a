//! Fatal resolution errors
//!
//! Every variant aborts resolution of one build variant; no partial
//! [`EffectiveConfig`](crate::model::EffectiveConfig) is ever returned
//! alongside them.

use std::fmt;
use thiserror::Error;
use variantctl_core::error::{Error as CoreError, ErrorCode};

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Where in the resolution a check failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The base configuration, before any overlay is applied
    Base,
    /// A variant after its overlay was applied
    Variant(String),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Base => write!(f, "base configuration"),
            Stage::Variant(name) => write!(f, "variant '{}'", name),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown variant '{name}' (declared: {declared})")]
    UnknownVariant { name: String, declared: String },

    #[error(
        "SDK ordering violated in {stage}: expected min_sdk ({min}) <= target_sdk ({target}) <= compile_sdk ({compile})"
    )]
    SdkOrdering {
        stage: Stage,
        min: u32,
        target: u32,
        compile: u32,
    },

    #[error("{stage} references signing config '{reference}', which is not declared")]
    UnresolvedSigning { stage: Stage, reference: String },

    #[error("signing configs must declare a 'debug' entry")]
    MissingDebugSigning,

    #[error("invalid {stage}: {reason}")]
    InvalidConfig { stage: Stage, reason: String },

    #[error("overlay '{variant}' sets unknown setting '{key}'")]
    UnknownSetting { variant: String, key: String },

    #[error("overlay '{variant}' sets '{key}' to {value}; expected {expected}")]
    InvalidOverride {
        variant: String,
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("overlay '{variant}' sets {setting} twice, as '{first}' and '{second}'")]
    ConflictingOverride {
        variant: String,
        setting: &'static str,
        first: String,
        second: String,
    },

    #[error("variant '{variant}' enables shrink_resources without minify_enabled")]
    ShrinkWithoutMinify { variant: String },

    #[error("variant '{name}' is declared more than once")]
    DuplicateVariant { name: String },

    #[error("'{name}' is reserved for the base configuration and cannot be declared as an overlay")]
    ReservedVariantName { name: String },
}

impl ResolveError {
    /// Stable error code, distinct per failure class
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::UnknownVariant { .. } => ErrorCode::UnknownVariant,
            ResolveError::SdkOrdering { .. } => ErrorCode::SdkOrderingViolation,
            ResolveError::UnresolvedSigning { .. } => ErrorCode::UnresolvedSigningConfig,
            ResolveError::MissingDebugSigning => ErrorCode::MissingDebugSigning,
            ResolveError::InvalidConfig { .. } => ErrorCode::InvalidBaseConfig,
            ResolveError::UnknownSetting { .. } | ResolveError::InvalidOverride { .. } => {
                ErrorCode::InvalidOverride
            }
            ResolveError::ConflictingOverride { .. } => ErrorCode::ConflictingOverride,
            ResolveError::ShrinkWithoutMinify { .. } => ErrorCode::ShrinkWithoutMinify,
            ResolveError::DuplicateVariant { .. } => ErrorCode::DuplicateVariant,
            ResolveError::ReservedVariantName { .. } => ErrorCode::ReservedVariantName,
        }
    }

    /// Recovery hint shown by the CLI
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ResolveError::UnknownVariant { .. } => {
                Some("Request 'default' or one of the declared build types")
            }
            ResolveError::SdkOrdering { .. } => {
                Some("Adjust min_sdk/target_sdk/compile_sdk so each is <= the next")
            }
            ResolveError::UnresolvedSigning { .. } => {
                Some("Declare the signing config under [signing_configs] or reference an existing one")
            }
            ResolveError::MissingDebugSigning => {
                Some("Add a 'debug' entry under [signing_configs]")
            }
            ResolveError::ShrinkWithoutMinify { .. } => {
                Some("Enable minify_enabled or disable shrink_resources")
            }
            ResolveError::UnknownSetting { .. } | ResolveError::InvalidOverride { .. } => {
                Some("Check the build type against the supported setting names and types")
            }
            ResolveError::ConflictingOverride { .. } => {
                Some("Keep one spelling of the setting in the build type")
            }
            _ => None,
        }
    }
}

impl From<ResolveError> for CoreError {
    fn from(err: ResolveError) -> Self {
        let core = CoreError::new(err.code(), err.to_string());
        match err.suggestion() {
            Some(suggestion) => core.with_suggestion(suggestion),
            None => core,
        }
    }
}

/// Error parsing a Java language level such as `VERSION_17` or `1.8`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid language level '{0}'")]
pub struct ParseLanguageLevelError(pub String);
