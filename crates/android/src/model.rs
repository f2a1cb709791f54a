//! Build configuration data model
//!
//! The shapes the resolver consumes and produces. Inputs arrive already
//! deserialized (see [`crate::descriptor`]); nothing here performs I/O.

use crate::error::ParseLanguageLevelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Variant name that selects the base configuration with no overlay
pub const DEFAULT_VARIANT: &str = "default";

/// Name of the debug build type and of the debug signing config
pub const DEBUG_VARIANT: &str = "debug";

/// Dependency configuration that supplies the core library desugaring runtime
pub const DESUGARING_CONFIGURATION: &str = "coreLibraryDesugaring";

/// Whether a variant name denotes a production-bound build
///
/// Everything except `default` and `debug` is treated as release-type.
pub fn is_release_type(variant: &str) -> bool {
    variant != DEFAULT_VARIANT && variant != DEBUG_VARIANT
}

/// Java language level, ordered by feature release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "LanguageLevelRepr", into = "String")]
pub struct JavaVersion(u8);

impl JavaVersion {
    pub const VERSION_1_8: JavaVersion = JavaVersion(8);
    pub const VERSION_11: JavaVersion = JavaVersion(11);
    pub const VERSION_17: JavaVersion = JavaVersion(17);
    pub const VERSION_21: JavaVersion = JavaVersion(21);

    /// Build from a feature-release ordinal (8, 11, 17, ...)
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        (ordinal > 0).then_some(Self(ordinal))
    }

    /// Feature-release ordinal
    pub fn ordinal(self) -> u8 {
        self.0
    }
}

impl Default for JavaVersion {
    fn default() -> Self {
        Self::VERSION_1_8
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 9 {
            write!(f, "1.{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for JavaVersion {
    type Err = ParseLanguageLevelError;

    /// Accepts `17`, `VERSION_17`, `JavaVersion.VERSION_17`, `1.8` and `VERSION_1_8`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let level = trimmed.strip_prefix("JavaVersion.").unwrap_or(trimmed);
        let level = level.strip_prefix("VERSION_").unwrap_or(level).replace('_', ".");
        let feature = level.strip_prefix("1.").unwrap_or(level.as_str());

        feature
            .parse::<u8>()
            .ok()
            .and_then(JavaVersion::from_ordinal)
            .ok_or_else(|| ParseLanguageLevelError(s.to_string()))
    }
}

impl From<JavaVersion> for String {
    fn from(version: JavaVersion) -> Self {
        version.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LanguageLevelRepr {
    Number(i64),
    Text(String),
}

impl TryFrom<LanguageLevelRepr> for JavaVersion {
    type Error = ParseLanguageLevelError;

    fn try_from(repr: LanguageLevelRepr) -> Result<Self, Self::Error> {
        match repr {
            LanguageLevelRepr::Number(n) => u8::try_from(n)
                .ok()
                .and_then(JavaVersion::from_ordinal)
                .ok_or_else(|| ParseLanguageLevelError(n.to_string())),
            LanguageLevelRepr::Text(s) => s.parse(),
        }
    }
}

/// Declared dependency coordinate, opaque apart from its configuration name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Gradle configuration, e.g. `implementation` or `coreLibraryDesugaring`
    pub configuration: String,
    /// Maven coordinate, e.g. `com.android.tools:desugar_jdk_libs:2.1.4`
    pub coordinate: String,
}

/// Base build configuration before any variant overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseConfig {
    pub application_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub min_sdk: u32,
    pub target_sdk: u32,
    pub compile_sdk: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_code: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,

    #[serde(default)]
    pub source_compatibility: JavaVersion,
    #[serde(default)]
    pub target_compatibility: JavaVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_target: Option<JavaVersion>,
    #[serde(default)]
    pub desugaring_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_config: Option<String>,
    #[serde(default)]
    pub minify_enabled: bool,
    #[serde(default)]
    pub shrink_resources: bool,
    #[serde(default)]
    pub debuggable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

impl BaseConfig {
    /// Minimal configuration with AGP defaults for everything optional
    pub fn new(
        application_id: impl Into<String>,
        min_sdk: u32,
        target_sdk: u32,
        compile_sdk: u32,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            namespace: None,
            min_sdk,
            target_sdk,
            compile_sdk,
            ndk_version: None,
            version_code: None,
            version_name: None,
            source_compatibility: JavaVersion::default(),
            target_compatibility: JavaVersion::default(),
            jvm_target: None,
            desugaring_enabled: false,
            signing_config: None,
            minify_enabled: false,
            shrink_resources: false,
            debuggable: false,
            dependencies: Vec::new(),
        }
    }

    /// Whether `min_sdk <= target_sdk <= compile_sdk`
    pub fn sdk_ordering_holds(&self) -> bool {
        self.min_sdk <= self.target_sdk && self.target_sdk <= self.compile_sdk
    }

    /// Whether a `coreLibraryDesugaring` dependency is declared
    pub fn has_desugar_library(&self) -> bool {
        self.dependencies
            .iter()
            .any(|d| d.configuration == DESUGARING_CONFIGURATION)
    }
}

/// Opaque credential reference (keystore path, vault key, ...)
///
/// Never inspected; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialRef(String);

impl CredentialRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

impl fmt::Debug for CredentialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialRef(<redacted>)")
    }
}

/// Named signing configs available to build variants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SigningConfigSet {
    entries: BTreeMap<String, CredentialRef>,
}

impl SigningConfigSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set containing only the `debug` entry
    pub fn with_debug(reference: impl Into<String>) -> Self {
        Self::new().with_entry(DEBUG_VARIANT, reference)
    }

    /// Add or replace an entry (builder style)
    pub fn with_entry(mut self, name: impl Into<String>, reference: impl Into<String>) -> Self {
        self.insert(name, reference);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, reference: impl Into<String>) {
        self.entries.insert(name.into(), CredentialRef::new(reference));
    }

    pub fn get(&self, name: &str) -> Option<&CredentialRef> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn has_debug(&self) -> bool {
        self.contains(DEBUG_VARIANT)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Fully resolved configuration for one variant
///
/// Produced only by the resolver; there is no mutable access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    variant: String,
    #[serde(flatten)]
    settings: BaseConfig,
}

impl EffectiveConfig {
    pub(crate) fn new(variant: impl Into<String>, settings: BaseConfig) -> Self {
        Self {
            variant: variant.into(),
            settings,
        }
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// All resolved settings
    pub fn settings(&self) -> &BaseConfig {
        &self.settings
    }

    pub fn signing_config(&self) -> Option<&str> {
        self.settings.signing_config.as_deref()
    }

    pub fn minify_enabled(&self) -> bool {
        self.settings.minify_enabled
    }

    pub fn shrink_resources(&self) -> bool {
        self.settings.shrink_resources
    }
}
