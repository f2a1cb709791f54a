//! Non-fatal configuration warnings
//!
//! Warnings are data: the resolver returns them in a fixed order and the
//! caller decides whether to print, escalate or drop them.

use serde::Serialize;
use std::fmt;

/// Warning class, in validation-pass order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    /// An overlay raised `min_sdk` above the base value
    SdkMinRaised,
    /// A production-bound artifact is built without code shrinking
    ShrinkDisabled,
    /// A release-type variant is signed with the debug credential
    SigningDebugInRelease,
    /// Desugaring is off below the configured language-level threshold
    DesugarDisabled,
    /// Desugaring is on but no desugaring runtime is declared
    DesugarLibraryMissing,
    /// Kotlin `jvmTarget` disagrees with Java `targetCompatibility`
    JvmTargetMismatch,
}

impl WarningKind {
    /// Stable, machine-matchable prefix (without the trailing colon)
    pub fn prefix(self) -> &'static str {
        match self {
            WarningKind::SdkMinRaised => "SDK_MIN_RAISED",
            WarningKind::ShrinkDisabled => "SHRINK_DISABLED",
            WarningKind::SigningDebugInRelease => "SIGNING_DEBUG_IN_RELEASE",
            WarningKind::DesugarDisabled => "DESUGAR_DISABLED",
            WarningKind::DesugarLibraryMissing => "DESUGAR_LIBRARY_MISSING",
            WarningKind::JvmTargetMismatch => "JVM_TARGET_MISMATCH",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A single warning produced while validating a resolved variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    #[serde(rename = "code")]
    pub kind: WarningKind,
    pub message: String,
}

impl ConfigWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.prefix(), self.message)
    }
}
