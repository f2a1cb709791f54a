//! Build-variant configuration resolver
//!
//! Combines a [`BaseConfig`] with one named [`VariantOverlay`] into an
//! [`EffectiveConfig`], then runs a validation pass:
//!
//! 1. Fatal checks: identity, SDK ordering, signing resolution,
//!    shrink-requires-minify.
//! 2. Warnings, in a fixed order: SDK, signing, language level.
//!
//! Resolution is pure. [`Resolver`] adds a per-run cache and parallel
//! resolution of every declared variant.
//!
//! # Example
//!
//! ```rust
//! use variantctl_android::model::{BaseConfig, SigningConfigSet};
//! use variantctl_android::overlay::{OverlaySet, VariantOverlay};
//! use variantctl_android::resolver::{resolve, ResolverPolicy};
//!
//! let mut base = BaseConfig::new("com.example.client_mobile", 24, 34, 36);
//! base.signing_config = Some("debug".to_string());
//!
//! let overlays = OverlaySet::from_overlays([
//!     VariantOverlay::new("release").set("minify_enabled", false),
//! ])
//! .unwrap();
//! let signing = SigningConfigSet::with_debug("debug.keystore");
//!
//! let resolution = resolve(&base, &overlays, &signing, "release", &ResolverPolicy::default()).unwrap();
//! assert_eq!(resolution.config().signing_config(), Some("debug"));
//! assert!(!resolution.warnings().is_empty());
//! ```

use crate::error::{ResolveError, Result, Stage};
use crate::model::{
    is_release_type, BaseConfig, EffectiveConfig, JavaVersion, SigningConfigSet, DEBUG_VARIANT,
    DEFAULT_VARIANT,
};
use crate::overlay::OverlaySet;
use crate::warning::{ConfigWarning, WarningKind};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use variantctl_core::config::PolicyConfig;
use variantctl_core::error::Error as CoreError;
use variantctl_core::validation::Validator;

/// Tunables for the warning pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverPolicy {
    /// Disabled desugaring below this language level is flagged
    pub min_desugar_level: JavaVersion,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            min_desugar_level: JavaVersion::VERSION_11,
        }
    }
}

impl TryFrom<&PolicyConfig> for ResolverPolicy {
    type Error = CoreError;

    fn try_from(config: &PolicyConfig) -> std::result::Result<Self, CoreError> {
        let min_desugar_level =
            JavaVersion::from_ordinal(config.min_desugar_level).ok_or_else(|| {
                CoreError::invalid_config_value(format!(
                    "policy.min_desugar_level must name a Java release, got {}",
                    config.min_desugar_level
                ))
            })?;
        Ok(Self { min_desugar_level })
    }
}

/// Successful resolution of one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    config: EffectiveConfig,
    warnings: Vec<ConfigWarning>,
}

impl Resolution {
    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    /// Warnings in validation-pass order
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }

    pub fn into_parts(self) -> (EffectiveConfig, Vec<ConfigWarning>) {
        (self.config, self.warnings)
    }
}

/// Which credential a signing reference resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SigningKind {
    Debug,
    Production,
}

/// Resolve one variant
///
/// `variant` must be `"default"` (base only) or a declared overlay. Fatal
/// errors return no configuration; warnings never halt resolution.
pub fn resolve(
    base: &BaseConfig,
    overlays: &OverlaySet,
    signing: &SigningConfigSet,
    variant: &str,
    policy: &ResolverPolicy,
) -> Result<Resolution> {
    if !signing.has_debug() {
        return Err(ResolveError::MissingDebugSigning);
    }

    // The base is rejected as-is; it is never repaired.
    check_identity(base, &Stage::Base)?;
    check_sdk_ordering(base, &Stage::Base)?;

    let overlay = if variant == DEFAULT_VARIANT {
        None
    } else {
        let overlay = overlays
            .get(variant)
            .ok_or_else(|| ResolveError::UnknownVariant {
                name: variant.to_string(),
                declared: declared_variants(overlays),
            })?;
        Some(overlay)
    };

    let mut settings = base.clone();
    if let Some(overlay) = overlay {
        overlay.apply_to(&mut settings)?;
    }

    let stage = Stage::Variant(variant.to_string());
    check_identity(&settings, &stage)?;
    check_sdk_ordering(&settings, &stage)?;
    let signing_kind = check_signing(&settings, signing, &stage)?;
    if settings.shrink_resources && !settings.minify_enabled {
        return Err(ResolveError::ShrinkWithoutMinify {
            variant: variant.to_string(),
        });
    }

    let warnings = collect_warnings(base, &settings, variant, signing_kind, policy);

    tracing::info!(
        variant,
        warnings = warnings.len(),
        signing = settings.signing_config.as_deref().unwrap_or("none"),
        "Resolved build variant"
    );

    Ok(Resolution {
        config: EffectiveConfig::new(variant, settings),
        warnings,
    })
}

fn declared_variants(overlays: &OverlaySet) -> String {
    std::iter::once(DEFAULT_VARIANT)
        .chain(overlays.names())
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_identity(settings: &BaseConfig, stage: &Stage) -> Result<()> {
    let mut validator = Validator::new()
        .required("application_id", &settings.application_id)
        .application_id("application_id", &settings.application_id)
        .range("min_sdk", settings.min_sdk, 1, u32::MAX)
        .range("target_sdk", settings.target_sdk, 1, u32::MAX)
        .range("compile_sdk", settings.compile_sdk, 1, u32::MAX);

    if let Some(namespace) = &settings.namespace {
        validator = validator.application_id("namespace", namespace);
    }
    if let Some(code) = settings.version_code {
        validator = validator.range("version_code", code, 1, u32::MAX);
    }

    let result = validator.validate();
    if result.is_valid() {
        Ok(())
    } else {
        Err(ResolveError::InvalidConfig {
            stage: stage.clone(),
            reason: result.summary(),
        })
    }
}

fn check_sdk_ordering(settings: &BaseConfig, stage: &Stage) -> Result<()> {
    if settings.sdk_ordering_holds() {
        Ok(())
    } else {
        Err(ResolveError::SdkOrdering {
            stage: stage.clone(),
            min: settings.min_sdk,
            target: settings.target_sdk,
            compile: settings.compile_sdk,
        })
    }
}

fn check_signing(
    settings: &BaseConfig,
    signing: &SigningConfigSet,
    stage: &Stage,
) -> Result<Option<SigningKind>> {
    let Some(reference) = settings.signing_config.as_deref() else {
        return Ok(None);
    };

    if !signing.contains(reference) {
        return Err(ResolveError::UnresolvedSigning {
            stage: stage.clone(),
            reference: reference.to_string(),
        });
    }

    Ok(Some(if reference == DEBUG_VARIANT {
        SigningKind::Debug
    } else {
        SigningKind::Production
    }))
}

fn collect_warnings(
    base: &BaseConfig,
    settings: &BaseConfig,
    variant: &str,
    signing_kind: Option<SigningKind>,
    policy: &ResolverPolicy,
) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let release_type = is_release_type(variant);

    // SDK
    if settings.min_sdk > base.min_sdk {
        warnings.push(ConfigWarning::new(
            WarningKind::SdkMinRaised,
            format!(
                "variant '{}' raises min_sdk from {} to {}, dropping API levels {}-{}",
                variant,
                base.min_sdk,
                settings.min_sdk,
                base.min_sdk,
                settings.min_sdk - 1
            ),
        ));
    }

    // Signing
    if !settings.minify_enabled
        && (signing_kind == Some(SigningKind::Production) || release_type)
    {
        warnings.push(ConfigWarning::new(
            WarningKind::ShrinkDisabled,
            format!(
                "variant '{}' is production-bound but minify_enabled is false; code and resources ship unshrunk",
                variant
            ),
        ));
    }
    if signing_kind == Some(SigningKind::Debug) && release_type {
        warnings.push(ConfigWarning::new(
            WarningKind::SigningDebugInRelease,
            format!(
                "variant '{}' is signed with the '{}' credential; the artifact cannot be published",
                variant, DEBUG_VARIANT
            ),
        ));
    }

    // Language level
    if !settings.desugaring_enabled && settings.target_compatibility < policy.min_desugar_level {
        warnings.push(ConfigWarning::new(
            WarningKind::DesugarDisabled,
            format!(
                "desugaring is disabled while target_compatibility {} is below the threshold {}",
                settings.target_compatibility, policy.min_desugar_level
            ),
        ));
    }
    if settings.desugaring_enabled && !settings.has_desugar_library() {
        warnings.push(ConfigWarning::new(
            WarningKind::DesugarLibraryMissing,
            "desugaring is enabled but no coreLibraryDesugaring dependency is declared",
        ));
    }
    if let Some(jvm_target) = settings.jvm_target {
        if jvm_target != settings.target_compatibility {
            warnings.push(ConfigWarning::new(
                WarningKind::JvmTargetMismatch,
                format!(
                    "jvm_target {} differs from target_compatibility {}",
                    jvm_target, settings.target_compatibility
                ),
            ));
        }
    }

    warnings
}

/// Resolution handle for one run
///
/// Owns the read-only inputs and caches successful resolutions by variant
/// name. Safe to share across threads.
#[derive(Debug)]
pub struct Resolver {
    base: BaseConfig,
    overlays: OverlaySet,
    signing: SigningConfigSet,
    policy: ResolverPolicy,
    cache: RwLock<HashMap<String, Arc<Resolution>>>,
}

impl Resolver {
    pub fn new(base: BaseConfig, overlays: OverlaySet, signing: SigningConfigSet) -> Self {
        Self {
            base,
            overlays,
            signing,
            policy: ResolverPolicy::default(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the warning policy
    pub fn with_policy(mut self, policy: ResolverPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }

    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    pub fn policy(&self) -> &ResolverPolicy {
        &self.policy
    }

    /// `default` followed by every declared overlay, sorted
    pub fn variant_names(&self) -> Vec<String> {
        std::iter::once(DEFAULT_VARIANT)
            .chain(self.overlays.names())
            .map(String::from)
            .collect()
    }

    /// Resolve one variant, reusing a cached result when present
    pub fn resolve(&self, variant: &str) -> Result<Arc<Resolution>> {
        // A poisoned lock only disables memoization.
        if let Some(hit) = self
            .cache
            .read()
            .ok()
            .and_then(|cache| cache.get(variant).cloned())
        {
            tracing::debug!(variant, "Resolution cache hit");
            return Ok(hit);
        }

        let resolution = Arc::new(resolve(
            &self.base,
            &self.overlays,
            &self.signing,
            variant,
            &self.policy,
        )?);

        if let Ok(mut cache) = self.cache.write() {
            let cached = cache
                .entry(variant.to_string())
                .or_insert_with(|| Arc::clone(&resolution));
            return Ok(Arc::clone(cached));
        }
        Ok(resolution)
    }

    /// Resolve `default` and every declared overlay in parallel
    ///
    /// Results come back in [`Resolver::variant_names`] order; a fatal error
    /// in one variant does not affect the others.
    pub fn resolve_all(&self) -> Vec<(String, Result<Arc<Resolution>>)> {
        self.variant_names()
            .into_par_iter()
            .map(|name| {
                let result = self.resolve(&name);
                (name, result)
            })
            .collect()
    }

    /// Number of variants currently cached
    pub fn cached_len(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dependency, DESUGARING_CONFIGURATION};
    use crate::overlay::VariantOverlay;
    use proptest::prelude::*;

    /// Base mirroring the client_mobile Android module
    fn client_base() -> BaseConfig {
        let mut base = BaseConfig::new("com.example.client_mobile", 24, 34, 36);
        base.namespace = Some("com.example.client_mobile".to_string());
        base.source_compatibility = JavaVersion::VERSION_17;
        base.target_compatibility = JavaVersion::VERSION_17;
        base.jvm_target = Some(JavaVersion::VERSION_17);
        base.desugaring_enabled = true;
        base.signing_config = Some("debug".to_string());
        base.dependencies.push(Dependency {
            configuration: DESUGARING_CONFIGURATION.to_string(),
            coordinate: "com.android.tools:desugar_jdk_libs:2.1.4".to_string(),
        });
        base
    }

    fn debug_only() -> SigningConfigSet {
        SigningConfigSet::with_debug("~/.android/debug.keystore")
    }

    fn release_overlay() -> VariantOverlay {
        VariantOverlay::new("release")
            .set("minify_enabled", false)
            .set("shrink_resources", false)
    }

    fn overlays(list: impl IntoIterator<Item = VariantOverlay>) -> OverlaySet {
        OverlaySet::from_overlays(list).unwrap()
    }

    fn kinds(resolution: &Resolution) -> Vec<WarningKind> {
        resolution.warnings().iter().map(|w| w.kind).collect()
    }

    #[test]
    fn test_default_variant_is_base() {
        let base = client_base();
        let resolution = resolve(
            &base,
            &OverlaySet::new(),
            &debug_only(),
            DEFAULT_VARIANT,
            &ResolverPolicy::default(),
        )
        .unwrap();

        assert_eq!(resolution.config().settings(), &base);
        assert_eq!(resolution.config().variant(), "default");
        assert!(resolution.warnings().is_empty());
    }

    #[test]
    fn test_default_warnings_come_only_from_base_policy() {
        let policy = ResolverPolicy::default();

        // Java 1.8 with desugaring off is below the default threshold.
        let base = BaseConfig::new("com.example.client_mobile", 24, 34, 36);
        let resolution =
            resolve(&base, &OverlaySet::new(), &debug_only(), DEFAULT_VARIANT, &policy).unwrap();
        assert_eq!(resolution.config().settings(), &base);
        let kinds: Vec<WarningKind> = resolution.warnings().iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![WarningKind::DesugarDisabled]);

        let mut clean = base.clone();
        clean.target_compatibility = JavaVersion::VERSION_11;
        let resolution =
            resolve(&clean, &OverlaySet::new(), &debug_only(), DEFAULT_VARIANT, &policy).unwrap();
        assert_eq!(resolution.config().settings(), &clean);
        assert!(resolution.warnings().is_empty());
    }

    #[test]
    fn test_sdk_violation_in_base_is_fatal() {
        let mut base = client_base();
        base.min_sdk = 30;
        base.target_sdk = 24;
        base.compile_sdk = 34;

        let err = resolve(
            &base,
            &OverlaySet::new(),
            &debug_only(),
            DEFAULT_VARIANT,
            &ResolverPolicy::default(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ResolveError::SdkOrdering {
                stage: Stage::Base,
                min: 30,
                target: 24,
                compile: 34,
            }
        );
    }

    #[test]
    fn test_sdk_violation_after_overlay_is_fatal() {
        let set = overlays([VariantOverlay::new("legacy").set("target_sdk", 21)]);
        let err = resolve(&client_base(), &set, &debug_only(), "legacy", &ResolverPolicy::default())
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::SdkOrdering { stage: Stage::Variant(ref v), .. } if v == "legacy"
        ));
    }

    #[test]
    fn test_unresolved_signing_is_fatal() {
        let set = overlays([release_overlay().set("signing_config", "release-key")]);
        let err = resolve(&client_base(), &set, &debug_only(), "release", &ResolverPolicy::default())
            .unwrap_err();

        assert_eq!(
            err,
            ResolveError::UnresolvedSigning {
                stage: Stage::Variant("release".into()),
                reference: "release-key".into(),
            }
        );
    }

    #[test]
    fn test_missing_debug_signing_is_fatal() {
        let signing = SigningConfigSet::new().with_entry("upload", "vault://upload");
        let err = resolve(
            &client_base(),
            &OverlaySet::new(),
            &signing,
            DEFAULT_VARIANT,
            &ResolverPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, ResolveError::MissingDebugSigning);
    }

    #[test]
    fn test_debug_signing_in_release_is_warned_not_corrected() {
        let set = overlays([release_overlay()]);
        let resolution = resolve(&client_base(), &set, &debug_only(), "release", &ResolverPolicy::default())
            .unwrap();

        assert_eq!(resolution.config().signing_config(), Some("debug"));
        assert!(!resolution.config().minify_enabled());
        assert_eq!(
            kinds(&resolution),
            vec![WarningKind::ShrinkDisabled, WarningKind::SigningDebugInRelease]
        );
        assert!(resolution.warnings()[0].to_string().starts_with("SHRINK_DISABLED:"));
        assert!(resolution.warnings()[1]
            .to_string()
            .starts_with("SIGNING_DEBUG_IN_RELEASE:"));
    }

    #[test]
    fn test_unknown_variant_has_distinct_code() {
        let set = overlays([release_overlay()]);
        let err = resolve(&client_base(), &set, &debug_only(), "staging", &ResolverPolicy::default())
            .unwrap_err();

        assert!(matches!(err, ResolveError::UnknownVariant { ref name, .. } if name == "staging"));
        assert_ne!(
            err.code(),
            ResolveError::SdkOrdering {
                stage: Stage::Base,
                min: 0,
                target: 0,
                compile: 0
            }
            .code()
        );
        assert_ne!(err.code(), ResolveError::MissingDebugSigning.code());
        assert!(err.to_string().contains("default, release"));
    }

    #[test]
    fn test_production_signing_without_minify() {
        let signing = debug_only().with_entry("upload", "vault://upload");
        let set = overlays([
            release_overlay().set("signing_config", "upload"),
            VariantOverlay::new("release_minified")
                .set("signing_config", "upload")
                .set("minify_enabled", true)
                .set("shrink_resources", true),
        ]);
        let policy = ResolverPolicy::default();

        let plain = resolve(&client_base(), &set, &signing, "release", &policy).unwrap();
        assert_eq!(kinds(&plain), vec![WarningKind::ShrinkDisabled]);

        let minified = resolve(&client_base(), &set, &signing, "release_minified", &policy).unwrap();
        assert!(minified.warnings().is_empty());
    }

    #[test]
    fn test_debug_variant_with_debug_signing_is_quiet() {
        let set = overlays([VariantOverlay::new("debug").set("debuggable", true)]);
        let resolution = resolve(&client_base(), &set, &debug_only(), "debug", &ResolverPolicy::default())
            .unwrap();
        assert!(resolution.warnings().is_empty());
        assert!(resolution.config().settings().debuggable);
    }

    #[test]
    fn test_shrink_without_minify_is_fatal() {
        let set = overlays([VariantOverlay::new("release")
            .set("minify_enabled", false)
            .set("shrink_resources", true)]);
        let err = resolve(&client_base(), &set, &debug_only(), "release", &ResolverPolicy::default())
            .unwrap_err();
        assert_eq!(err, ResolveError::ShrinkWithoutMinify { variant: "release".into() });
    }

    #[test]
    fn test_invalid_application_id_is_fatal() {
        let mut base = client_base();
        base.application_id = "client_mobile".to_string();
        let err = resolve(
            &base,
            &OverlaySet::new(),
            &debug_only(),
            DEFAULT_VARIANT,
            &ResolverPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidConfig { stage: Stage::Base, .. }));
    }

    #[test]
    fn test_warning_order_sdk_signing_desugar() {
        let mut base = client_base();
        base.desugaring_enabled = false;
        base.target_compatibility = JavaVersion::VERSION_1_8;
        base.jvm_target = None;

        let set = overlays([release_overlay().set("min_sdk", 26)]);
        let resolution = resolve(&base, &set, &debug_only(), "release", &ResolverPolicy::default())
            .unwrap();

        assert_eq!(
            kinds(&resolution),
            vec![
                WarningKind::SdkMinRaised,
                WarningKind::ShrinkDisabled,
                WarningKind::SigningDebugInRelease,
                WarningKind::DesugarDisabled,
            ]
        );
        assert!(resolution.warnings()[0].message.contains("24-25"));
    }

    #[test]
    fn test_desugar_threshold_follows_policy() {
        let mut base = client_base();
        base.desugaring_enabled = false;
        base.jvm_target = None;

        let lenient = ResolverPolicy::default();
        let strict = ResolverPolicy {
            min_desugar_level: JavaVersion::VERSION_21,
        };

        let quiet = resolve(&base, &OverlaySet::new(), &debug_only(), DEFAULT_VARIANT, &lenient).unwrap();
        assert!(!quiet.has_warning(WarningKind::DesugarDisabled));

        let flagged = resolve(&base, &OverlaySet::new(), &debug_only(), DEFAULT_VARIANT, &strict).unwrap();
        assert!(flagged.has_warning(WarningKind::DesugarDisabled));
    }

    #[test]
    fn test_desugar_library_and_jvm_target_checks() {
        let mut base = client_base();
        base.dependencies.clear();
        base.jvm_target = Some(JavaVersion::VERSION_11);

        let resolution = resolve(
            &base,
            &OverlaySet::new(),
            &debug_only(),
            DEFAULT_VARIANT,
            &ResolverPolicy::default(),
        )
        .unwrap();
        assert_eq!(
            kinds(&resolution),
            vec![WarningKind::DesugarLibraryMissing, WarningKind::JvmTargetMismatch]
        );
    }

    #[test]
    fn test_policy_from_config() {
        let config = PolicyConfig {
            min_desugar_level: 17,
            ..PolicyConfig::default()
        };
        let policy = ResolverPolicy::try_from(&config).unwrap();
        assert_eq!(policy.min_desugar_level, JavaVersion::VERSION_17);

        let config = PolicyConfig {
            min_desugar_level: 0,
            ..PolicyConfig::default()
        };
        let err = ResolverPolicy::try_from(&config).unwrap_err();
        assert_eq!(err.code, variantctl_core::ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_resolver_caches_by_variant() {
        let resolver = Resolver::new(client_base(), overlays([release_overlay()]), debug_only());

        let first = resolver.resolve("release").unwrap();
        let second = resolver.resolve("release").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.cached_len(), 1);

        assert!(resolver.resolve("staging").is_err());
        assert_eq!(resolver.cached_len(), 1);
    }

    #[test]
    fn test_resolve_all_isolates_failures() {
        let set = overlays([
            release_overlay(),
            VariantOverlay::new("broken").set("signing_config", "missing"),
        ]);
        let resolver = Resolver::new(client_base(), set, debug_only());

        let results = resolver.resolve_all();
        let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["default", "broken", "release"]);

        assert!(results[0].1.is_ok());
        assert!(matches!(results[1].1, Err(ResolveError::UnresolvedSigning { .. })));
        assert!(results[2].1.is_ok());
    }

    proptest! {
        #[test]
        fn prop_default_is_identity(min in 1u32..30, spread_target in 0u32..10, spread_compile in 0u32..10) {
            let mut base = client_base();
            base.min_sdk = min;
            base.target_sdk = min + spread_target;
            base.compile_sdk = min + spread_target + spread_compile;

            let resolution = resolve(&base, &OverlaySet::new(), &debug_only(), DEFAULT_VARIANT, &ResolverPolicy::default()).unwrap();
            prop_assert_eq!(resolution.config().settings(), &base);
            prop_assert!(resolution.warnings().is_empty());
        }

        #[test]
        fn prop_resolution_is_deterministic(minify in any::<bool>(), min_sdk in 24u32..34, debug_signed in any::<bool>()) {
            let signing = debug_only().with_entry("upload", "vault://upload");
            let set = overlays([VariantOverlay::new("release")
                .set("minify_enabled", minify)
                .set("min_sdk", min_sdk)
                .set("signing_config", if debug_signed { "debug" } else { "upload" })]);
            let policy = ResolverPolicy::default();

            let first = resolve(&client_base(), &set, &signing, "release", &policy).unwrap();
            let second = resolve(&client_base(), &set, &signing, "release", &policy).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
