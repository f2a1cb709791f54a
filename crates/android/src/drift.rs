//! Drift between two resolved configurations
//!
//! Near-identical descriptors tend to diverge silently. This compares two
//! [`EffectiveConfig`]s setting by setting and reports every difference;
//! it never reconciles them.

use crate::model::EffectiveConfig;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use variantctl_core::error::Result;

/// One setting whose value differs between two configurations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingDrift {
    pub setting: String,
    pub left: Option<Value>,
    pub right: Option<Value>,
}

impl fmt::Display for SettingDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.setting,
            render(self.left.as_ref()),
            render(self.right.as_ref())
        )
    }
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "<unset>".to_string(), Value::to_string)
}

/// Settings that differ between `left` and `right`, sorted by name
///
/// The variant name itself is not compared.
pub fn drift(left: &EffectiveConfig, right: &EffectiveConfig) -> Result<Vec<SettingDrift>> {
    let left = settings_map(left)?;
    let right = settings_map(right)?;

    let keys: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
    Ok(keys
        .into_iter()
        .filter_map(|key| {
            let l = left.get(key);
            let r = right.get(key);
            (l != r).then(|| SettingDrift {
                setting: key.clone(),
                left: l.cloned(),
                right: r.cloned(),
            })
        })
        .collect())
}

fn settings_map(config: &EffectiveConfig) -> Result<Map<String, Value>> {
    match serde_json::to_value(config.settings())? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}
