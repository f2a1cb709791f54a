//! Android build-variant resolution for variantctl
//!
//! This crate provides the Gradle-side configuration logic:
//! - Build descriptor model (SDK bounds, language level, signing, shrinking)
//! - Variant overlays with atomic per-setting replacement
//! - The resolver: base + overlay -> effective config, fatal errors and warnings
//! - TOML descriptor loading
//! - Drift reports between two resolved configurations

pub mod descriptor;
pub mod drift;
pub mod error;
pub mod model;
pub mod overlay;
pub mod resolver;
pub mod warning;

pub use error::{ResolveError, Stage};
pub use model::{BaseConfig, EffectiveConfig, JavaVersion, SigningConfigSet, DEFAULT_VARIANT};
pub use overlay::{OverlaySet, OverrideValue, VariantOverlay};
pub use resolver::{resolve, Resolution, Resolver, ResolverPolicy};
pub use warning::{ConfigWarning, WarningKind};
