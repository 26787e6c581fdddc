//! Rule set representation and the override merge used by both adapters.

use serde_json::{Map, Value};

/// Rule name to rule setting, in declaration order.
///
/// Settings are opaque engine values (`"error"`, `true`, `[true, {...}]`, `null`).
pub type RuleSet = Map<String, Value>;

/// Merge `overrides` on top of `defaults`.
///
/// Same-named entries are replaced wholesale (last write wins); nested values are
/// not merged. Keys only present in `defaults` keep their value and position,
/// new keys are appended in `overrides` order.
pub fn merge_rules(defaults: &RuleSet, overrides: &RuleSet) -> RuleSet {
    let mut merged = defaults.clone();
    for (name, setting) in overrides {
        merged.insert(name.clone(), setting.clone());
    }
    merged
}

/// Check whether a config key looks like a rule name rather than a nested option.
pub fn is_rule_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | '@' | '_'))
}
