//! Build descriptor loading
//!
//! Reads the TOML form of a Gradle module's variant settings:
//!
//! ```toml
//! [base]
//! application_id = "com.example.client_mobile"
//! min_sdk = 24
//! target_sdk = 34
//! compile_sdk = 36
//!
//! [signing_configs]
//! debug = "~/.android/debug.keystore"
//!
//! [build_types.release]
//! signing_config = "debug"
//! minify_enabled = false
//! ```

use crate::model::{BaseConfig, SigningConfigSet};
use crate::overlay::{OverlaySet, OverrideValue, VariantOverlay};
use crate::resolver::{Resolver, ResolverPolicy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use variantctl_core::error::{Error, Result, ResultExt};

/// Deserialized build descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct Descriptor {
    pub base: BaseConfig,

    #[serde(default)]
    pub signing_configs: SigningConfigSet,

    #[serde(default)]
    pub build_types: BTreeMap<String, BTreeMap<String, OverrideValue>>,
}

impl Descriptor {
    /// Parse a descriptor from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a descriptor from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        let content = std::fs::read_to_string(path)?;
        let descriptor = Self::from_toml_str(&content)
            .context(format!("While loading descriptor {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            build_types = descriptor.build_types.len(),
            "Loaded build descriptor"
        );
        Ok(descriptor)
    }

    /// Declared build types as overlays
    pub fn overlays(&self) -> Result<OverlaySet> {
        let overlays = self
            .build_types
            .iter()
            .map(|(name, overrides)| VariantOverlay::with_overrides(name.clone(), overrides.clone()));
        Ok(OverlaySet::from_overlays(overlays)?)
    }

    /// Build a resolver over this descriptor's inputs
    pub fn into_resolver(self, policy: ResolverPolicy) -> Result<Resolver> {
        let overlays = self.overlays()?;
        Ok(Resolver::new(self.base, overlays, self.signing_configs).with_policy(policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JavaVersion;
    use crate::warning::WarningKind;
    use std::io::Write;
    use variantctl_core::ErrorCode;

    const CLIENT_MOBILE: &str = include_str!("../fixtures/client_mobile.toml");
    const CLIENT_MOBILE_NO_DESUGAR: &str = include_str!("../fixtures/client_mobile_no_desugar.toml");

    #[test]
    fn test_parse_client_mobile_descriptor() {
        let descriptor = Descriptor::from_toml_str(CLIENT_MOBILE).unwrap();

        assert_eq!(descriptor.base.application_id, "com.example.client_mobile");
        assert_eq!(descriptor.base.compile_sdk, 36);
        assert_eq!(descriptor.base.source_compatibility, JavaVersion::VERSION_17);
        assert!(descriptor.base.desugaring_enabled);
        assert!(descriptor.base.has_desugar_library());
        assert!(descriptor.signing_configs.has_debug());
        assert_eq!(descriptor.overlays().unwrap().names(), vec!["release"]);
    }

    #[test]
    fn test_client_mobile_release_is_flagged() {
        let resolver = Descriptor::from_toml_str(CLIENT_MOBILE)
            .unwrap()
            .into_resolver(ResolverPolicy::default())
            .unwrap();

        let release = resolver.resolve("release").unwrap();
        assert_eq!(release.config().signing_config(), Some("debug"));
        assert!(release.has_warning(WarningKind::ShrinkDisabled));
        assert!(release.has_warning(WarningKind::SigningDebugInRelease));
        assert!(!release.has_warning(WarningKind::DesugarLibraryMissing));

        let default = resolver.resolve("default").unwrap();
        assert!(default.warnings().is_empty());
    }

    #[test]
    fn test_copies_resolve_independently() {
        let with = Descriptor::from_toml_str(CLIENT_MOBILE).unwrap();
        let without = Descriptor::from_toml_str(CLIENT_MOBILE_NO_DESUGAR).unwrap();

        assert!(with.base.desugaring_enabled);
        assert!(!without.base.desugaring_enabled);

        let resolver = without.into_resolver(ResolverPolicy::default()).unwrap();
        assert!(resolver.resolve("release").is_ok());
    }

    #[test]
    fn test_reserved_build_type_name() {
        let content = format!("{}\n[build_types.default]\nminify_enabled = true\n", CLIENT_MOBILE);
        let descriptor = Descriptor::from_toml_str(&content).unwrap();

        let err = descriptor.overlays().unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservedVariantName);
    }

    #[test]
    fn test_build_type_with_two_spellings_fails_to_resolve() {
        let signing = CLIENT_MOBILE.replace(
            "[signing_configs]\n",
            "[signing_configs]\nupload = \"vault://android/upload\"\n",
        );
        let content = format!(
            r#"{}
[build_types.hardened]
isMinifyEnabled = true
minify_enabled = false
signingConfig = "debug"
signing_config = "upload"
"#,
            signing
        );
        let resolver = Descriptor::from_toml_str(&content)
            .unwrap()
            .into_resolver(ResolverPolicy::default())
            .unwrap();

        let err = resolver.resolve("hardened").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConflictingOverride);
        assert!(resolver.resolve("release").is_ok());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CLIENT_MOBILE.as_bytes()).unwrap();

        let descriptor = Descriptor::load(file.path()).unwrap();
        assert_eq!(descriptor.base.min_sdk, 24);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Descriptor::load(Path::new("/nonexistent/variants.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[base]\napplication_id = ").unwrap();

        let err = Descriptor::load(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.is_some());
    }
}
