//! Variant overlays
//!
//! An overlay is a named, flat set of setting overrides. Applying one
//! replaces each named setting atomically; nested values are never merged.

use crate::error::{ResolveError, Result};
use crate::model::{BaseConfig, JavaVersion, DEFAULT_VARIANT};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single override value as written in the descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl fmt::Display for OverrideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideValue::Bool(b) => write!(f, "{}", b),
            OverrideValue::Integer(i) => write!(f, "{}", i),
            OverrideValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<bool> for OverrideValue {
    fn from(value: bool) -> Self {
        OverrideValue::Bool(value)
    }
}

impl From<i64> for OverrideValue {
    fn from(value: i64) -> Self {
        OverrideValue::Integer(value)
    }
}

impl From<i32> for OverrideValue {
    fn from(value: i32) -> Self {
        OverrideValue::Integer(i64::from(value))
    }
}

impl From<u32> for OverrideValue {
    fn from(value: u32) -> Self {
        OverrideValue::Integer(i64::from(value))
    }
}

impl From<&str> for OverrideValue {
    fn from(value: &str) -> Self {
        OverrideValue::Text(value.to_string())
    }
}

/// Settings an overlay may replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    ApplicationId,
    Namespace,
    MinSdk,
    TargetSdk,
    CompileSdk,
    NdkVersion,
    VersionCode,
    VersionName,
    SourceCompatibility,
    TargetCompatibility,
    JvmTarget,
    DesugaringEnabled,
    SigningConfig,
    MinifyEnabled,
    ShrinkResources,
    Debuggable,
}

/// Accepted spellings: descriptor snake_case first, then the Gradle DSL names
const KEYS: &[(&str, Setting)] = &[
    ("application_id", Setting::ApplicationId),
    ("applicationId", Setting::ApplicationId),
    ("namespace", Setting::Namespace),
    ("min_sdk", Setting::MinSdk),
    ("minSdk", Setting::MinSdk),
    ("target_sdk", Setting::TargetSdk),
    ("targetSdk", Setting::TargetSdk),
    ("compile_sdk", Setting::CompileSdk),
    ("compileSdk", Setting::CompileSdk),
    ("ndk_version", Setting::NdkVersion),
    ("ndkVersion", Setting::NdkVersion),
    ("version_code", Setting::VersionCode),
    ("versionCode", Setting::VersionCode),
    ("version_name", Setting::VersionName),
    ("versionName", Setting::VersionName),
    ("source_compatibility", Setting::SourceCompatibility),
    ("sourceCompatibility", Setting::SourceCompatibility),
    ("target_compatibility", Setting::TargetCompatibility),
    ("targetCompatibility", Setting::TargetCompatibility),
    ("jvm_target", Setting::JvmTarget),
    ("jvmTarget", Setting::JvmTarget),
    ("desugaring_enabled", Setting::DesugaringEnabled),
    ("isCoreLibraryDesugaringEnabled", Setting::DesugaringEnabled),
    ("signing_config", Setting::SigningConfig),
    ("signingConfig", Setting::SigningConfig),
    ("minify_enabled", Setting::MinifyEnabled),
    ("isMinifyEnabled", Setting::MinifyEnabled),
    ("minifyEnabled", Setting::MinifyEnabled),
    ("shrink_resources", Setting::ShrinkResources),
    ("isShrinkResources", Setting::ShrinkResources),
    ("shrinkResources", Setting::ShrinkResources),
    ("debuggable", Setting::Debuggable),
    ("isDebuggable", Setting::Debuggable),
];

impl Setting {
    /// Look up a setting by descriptor or Gradle key
    pub fn from_key(key: &str) -> Option<Self> {
        KEYS.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, setting)| *setting)
    }

    /// Canonical (snake_case) name
    pub fn name(self) -> &'static str {
        KEYS.iter()
            .find(|(_, setting)| *setting == self)
            .map_or("unknown", |(name, _)| *name)
    }

    /// Replace this setting on `settings`; `Err` carries the expected type
    fn apply(
        self,
        settings: &mut BaseConfig,
        value: &OverrideValue,
    ) -> std::result::Result<(), &'static str> {
        match self {
            Setting::ApplicationId => settings.application_id = text(value)?,
            Setting::Namespace => settings.namespace = Some(text(value)?),
            Setting::MinSdk => settings.min_sdk = unsigned(value)?,
            Setting::TargetSdk => settings.target_sdk = unsigned(value)?,
            Setting::CompileSdk => settings.compile_sdk = unsigned(value)?,
            Setting::NdkVersion => settings.ndk_version = Some(text(value)?),
            Setting::VersionCode => settings.version_code = Some(unsigned(value)?),
            Setting::VersionName => settings.version_name = Some(text(value)?),
            Setting::SourceCompatibility => settings.source_compatibility = language_level(value)?,
            Setting::TargetCompatibility => settings.target_compatibility = language_level(value)?,
            Setting::JvmTarget => settings.jvm_target = Some(language_level(value)?),
            Setting::DesugaringEnabled => settings.desugaring_enabled = boolean(value)?,
            Setting::SigningConfig => settings.signing_config = Some(text(value)?),
            Setting::MinifyEnabled => settings.minify_enabled = boolean(value)?,
            Setting::ShrinkResources => settings.shrink_resources = boolean(value)?,
            Setting::Debuggable => settings.debuggable = boolean(value)?,
        }
        Ok(())
    }
}

fn text(value: &OverrideValue) -> std::result::Result<String, &'static str> {
    match value {
        OverrideValue::Text(s) => Ok(s.clone()),
        _ => Err("a string"),
    }
}

fn boolean(value: &OverrideValue) -> std::result::Result<bool, &'static str> {
    match value {
        OverrideValue::Bool(b) => Ok(*b),
        _ => Err("a boolean"),
    }
}

fn unsigned(value: &OverrideValue) -> std::result::Result<u32, &'static str> {
    match value {
        OverrideValue::Integer(i) => u32::try_from(*i).map_err(|_| "a non-negative integer"),
        _ => Err("a non-negative integer"),
    }
}

fn language_level(value: &OverrideValue) -> std::result::Result<JavaVersion, &'static str> {
    const EXPECTED: &str = "a language level such as 17 or \"VERSION_17\"";
    match value {
        OverrideValue::Integer(i) => u8::try_from(*i)
            .ok()
            .and_then(JavaVersion::from_ordinal)
            .ok_or(EXPECTED),
        OverrideValue::Text(s) => s.parse().map_err(|_| EXPECTED),
        OverrideValue::Bool(_) => Err(EXPECTED),
    }
}

/// A named set of overrides (one Gradle build type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOverlay {
    name: String,
    #[serde(default)]
    overrides: BTreeMap<String, OverrideValue>,
}

impl VariantOverlay {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Overlay with a pre-built override map
    pub fn with_overrides(
        name: impl Into<String>,
        overrides: BTreeMap<String, OverrideValue>,
    ) -> Self {
        Self {
            name: name.into(),
            overrides,
        }
    }

    /// Add an override (builder style)
    pub fn set(mut self, key: impl Into<String>, value: impl Into<OverrideValue>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overrides(&self) -> &BTreeMap<String, OverrideValue> {
        &self.overrides
    }

    /// Replace every overridden setting on `settings`, in key order
    ///
    /// Keys are checked before anything is replaced: an unknown key, or two
    /// spellings of the same setting, leave `settings` untouched.
    pub fn apply_to(&self, settings: &mut BaseConfig) -> Result<()> {
        for (key, setting, value) in self.settings()? {
            setting
                .apply(settings, value)
                .map_err(|expected| ResolveError::InvalidOverride {
                    variant: self.name.clone(),
                    key: key.clone(),
                    value: value.to_string(),
                    expected,
                })?;

            tracing::debug!(
                variant = %self.name,
                setting = setting.name(),
                value = %value,
                "Applied override"
            );
        }
        Ok(())
    }

    fn settings(&self) -> Result<Vec<(&String, Setting, &OverrideValue)>> {
        let mut seen: HashMap<Setting, &String> = HashMap::new();
        let mut resolved = Vec::with_capacity(self.overrides.len());

        for (key, value) in &self.overrides {
            let setting = Setting::from_key(key).ok_or_else(|| ResolveError::UnknownSetting {
                variant: self.name.clone(),
                key: key.clone(),
            })?;

            if let Some(first) = seen.insert(setting, key) {
                return Err(ResolveError::ConflictingOverride {
                    variant: self.name.clone(),
                    setting: setting.name(),
                    first: first.clone(),
                    second: key.clone(),
                });
            }
            resolved.push((key, setting, value));
        }
        Ok(resolved)
    }
}

/// Declared overlays keyed by unique name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlaySet {
    overlays: BTreeMap<String, VariantOverlay>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, rejecting duplicates and the reserved `default` name
    pub fn from_overlays(overlays: impl IntoIterator<Item = VariantOverlay>) -> Result<Self> {
        let mut set = Self::new();
        for overlay in overlays {
            set.insert(overlay)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, overlay: VariantOverlay) -> Result<()> {
        if overlay.name == DEFAULT_VARIANT {
            return Err(ResolveError::ReservedVariantName { name: overlay.name });
        }
        if self.overlays.contains_key(&overlay.name) {
            return Err(ResolveError::DuplicateVariant { name: overlay.name });
        }
        self.overlays.insert(overlay.name.clone(), overlay);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&VariantOverlay> {
        self.overlays.get(name)
    }

    /// Overlay names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.overlays.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariantOverlay> {
        self.overlays.values()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseConfig {
        BaseConfig::new("com.example.client_mobile", 24, 34, 36)
    }

    #[test]
    fn test_setting_keys_accept_gradle_spelling() {
        assert_eq!(Setting::from_key("isMinifyEnabled"), Some(Setting::MinifyEnabled));
        assert_eq!(Setting::from_key("minify_enabled"), Some(Setting::MinifyEnabled));
        assert_eq!(Setting::from_key("signingConfig"), Some(Setting::SigningConfig));
        assert_eq!(Setting::from_key("dependencies"), None);
        assert_eq!(Setting::MinSdk.name(), "min_sdk");
    }

    #[test]
    fn test_apply_replaces_values() {
        let overlay = VariantOverlay::new("release")
            .set("signing_config", "upload")
            .set("isMinifyEnabled", true)
            .set("targetSdk", 35)
            .set("jvm_target", "VERSION_17");

        let mut settings = base();
        overlay.apply_to(&mut settings).unwrap();

        assert_eq!(settings.signing_config.as_deref(), Some("upload"));
        assert!(settings.minify_enabled);
        assert_eq!(settings.target_sdk, 35);
        assert_eq!(settings.jvm_target, Some(JavaVersion::VERSION_17));
        assert_eq!(settings.min_sdk, 24);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let overlay = VariantOverlay::new("release")
            .set("minify_enabled", false)
            .set("version_name", "2.0.0");

        let mut once = base();
        overlay.apply_to(&mut once).unwrap();

        let mut twice = base();
        overlay.apply_to(&mut twice).unwrap();
        overlay.apply_to(&mut twice).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_setting_is_fatal() {
        let overlay = VariantOverlay::new("release").set("proguardFiles", "rules.pro");
        let err = overlay.apply_to(&mut base()).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownSetting { ref key, .. } if key == "proguardFiles"));
    }

    #[test]
    fn test_two_spellings_of_one_setting_are_fatal() {
        let overlay = VariantOverlay::new("hardened")
            .set("isMinifyEnabled", true)
            .set("minify_enabled", false);

        let mut settings = base();
        let err = overlay.apply_to(&mut settings).unwrap_err();
        assert_eq!(
            err,
            ResolveError::ConflictingOverride {
                variant: "hardened".into(),
                setting: "minify_enabled",
                first: "isMinifyEnabled".into(),
                second: "minify_enabled".into(),
            }
        );
        assert_eq!(settings, base());

        let overlay = VariantOverlay::new("hardened")
            .set("signingConfig", "debug")
            .set("signing_config", "debug");
        assert!(matches!(
            overlay.apply_to(&mut base()),
            Err(ResolveError::ConflictingOverride { setting: "signing_config", .. })
        ));
    }

    #[test]
    fn test_mistyped_value_is_fatal() {
        let overlay = VariantOverlay::new("release").set("min_sdk", "twenty-four");
        let err = overlay.apply_to(&mut base()).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidOverride { expected: "a non-negative integer", .. }));

        let overlay = VariantOverlay::new("release").set("min_sdk", -1);
        assert!(overlay.apply_to(&mut base()).is_err());
    }

    #[test]
    fn test_overlay_set_rejects_duplicates_and_reserved() {
        let err = OverlaySet::from_overlays([
            VariantOverlay::new("release"),
            VariantOverlay::new("release"),
        ])
        .unwrap_err();
        assert_eq!(err, ResolveError::DuplicateVariant { name: "release".into() });

        let err = OverlaySet::from_overlays([VariantOverlay::new("default")]).unwrap_err();
        assert_eq!(err, ResolveError::ReservedVariantName { name: "default".into() });
    }

    #[test]
    fn test_overlay_set_names_sorted() {
        let set = OverlaySet::from_overlays([
            VariantOverlay::new("release"),
            VariantOverlay::new("debug"),
            VariantOverlay::new("benchmark"),
        ])
        .unwrap();
        assert_eq!(set.names(), vec!["benchmark", "debug", "release"]);
        assert_eq!(set.len(), 3);
    }
}
