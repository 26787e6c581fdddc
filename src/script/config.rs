//! Engine configuration handed to the script lint engine on every call.
//!
//! The shape mirrors a flat ESLint config: language options (parser settings and
//! globals) plus a rule table.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ScriptLintEngine;
use super::scope::Scope;
use crate::config::ScriptSettings;

/// ECMAScript version the parser accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEcmaVersion", into = "RawEcmaVersion")]
pub enum EcmaVersion {
    #[default]
    Latest,
    Edition(u16),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawEcmaVersion {
    Number(u16),
    Name(String),
}

impl TryFrom<RawEcmaVersion> for EcmaVersion {
    type Error = String;

    fn try_from(raw: RawEcmaVersion) -> Result<Self, Self::Error> {
        match raw {
            RawEcmaVersion::Number(n) => Ok(EcmaVersion::Edition(n)),
            RawEcmaVersion::Name(name) if name.eq_ignore_ascii_case("latest") => Ok(EcmaVersion::Latest),
            RawEcmaVersion::Name(name) => Err(format!(
                "invalid ecma version '{name}': expected \"latest\" or a number"
            )),
        }
    }
}

impl From<EcmaVersion> for RawEcmaVersion {
    fn from(version: EcmaVersion) -> Self {
        match version {
            EcmaVersion::Latest => RawEcmaVersion::Name("latest".to_string()),
            EcmaVersion::Edition(n) => RawEcmaVersion::Number(n),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

/// How a predeclared global may be used by linted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalAccess {
    Readonly,
    Writable,
    Off,
}

/// Rule level. Accepts both the named (`"warn"`) and numeric (`1`) forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleLevel", into = "RawRuleLevel")]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRuleLevel {
    Number(u8),
    Name(String),
}

impl TryFrom<RawRuleLevel> for RuleLevel {
    type Error = String;

    fn try_from(raw: RawRuleLevel) -> Result<Self, String> {
        match raw {
            RawRuleLevel::Number(0) => Ok(RuleLevel::Off),
            RawRuleLevel::Number(1) => Ok(RuleLevel::Warn),
            RawRuleLevel::Number(2) => Ok(RuleLevel::Error),
            RawRuleLevel::Name(name) => match name.to_ascii_lowercase().as_str() {
                "off" => Ok(RuleLevel::Off),
                "warn" | "warning" => Ok(RuleLevel::Warn),
                "error" => Ok(RuleLevel::Error),
                _ => Err(format!("invalid rule level '{name}'")),
            },
            RawRuleLevel::Number(n) => Err(format!("invalid rule level {n}")),
        }
    }
}

impl From<RuleLevel> for RawRuleLevel {
    fn from(level: RuleLevel) -> Self {
        RawRuleLevel::Name(level.to_string())
    }
}

impl fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuleLevel::Off => "off",
            RuleLevel::Warn => "warn",
            RuleLevel::Error => "error",
        })
    }
}

/// A rule entry: a level, optionally followed by rule options, as in
/// `"warn"` or `["error", {"allow": ["warn"]}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleSetting", into = "RawRuleSetting")]
pub struct RuleSetting {
    pub level: RuleLevel,
    pub options: Vec<Value>,
}

impl RuleSetting {
    pub fn with_options(level: RuleLevel, options: Vec<Value>) -> Self {
        Self { level, options }
    }
}

impl From<RuleLevel> for RuleSetting {
    fn from(level: RuleLevel) -> Self {
        Self {
            level,
            options: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRuleSetting {
    Level(RuleLevel),
    WithOptions(Vec<Value>),
}

impl TryFrom<RawRuleSetting> for RuleSetting {
    type Error = String;

    fn try_from(raw: RawRuleSetting) -> Result<Self, String> {
        match raw {
            RawRuleSetting::Level(level) => Ok(level.into()),
            RawRuleSetting::WithOptions(values) => {
                let mut values = values.into_iter();
                let first = values.next().ok_or("rule entry must start with a level")?;
                let level = serde_json::from_value(first).map_err(|e| e.to_string())?;
                Ok(Self {
                    level,
                    options: values.collect(),
                })
            }
        }
    }
}

impl From<RuleSetting> for RawRuleSetting {
    fn from(setting: RuleSetting) -> Self {
        if setting.options.is_empty() {
            return RawRuleSetting::Level(setting.level);
        }
        let mut values = Vec::with_capacity(setting.options.len() + 1);
        values.push(Value::String(setting.level.to_string()));
        values.extend(setting.options);
        RawRuleSetting::WithOptions(values)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOptions {
    pub ecma_version: EcmaVersion,
    pub source_type: SourceType,
    pub globals: BTreeMap<String, GlobalAccess>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptLintConfig {
    pub language_options: LanguageOptions,
    pub rules: BTreeMap<String, RuleSetting>,
}

impl ScriptLintConfig {
    /// Engine defaults: every recommended rule at `error`, every top-level
    /// scope name as a read-only global.
    pub fn recommended(engine: &dyn ScriptLintEngine, scope: &Scope) -> Self {
        let globals = scope
            .names()
            .map(|name| (name.to_string(), GlobalAccess::Readonly))
            .collect();
        let rules = engine
            .rules()
            .into_iter()
            .filter(|(_, meta)| meta.recommended)
            .map(|(name, _)| (name, RuleSetting::from(RuleLevel::Error)))
            .collect();
        Self {
            language_options: LanguageOptions {
                globals,
                ..LanguageOptions::default()
            },
            rules,
        }
    }

    /// Layer user settings over the recommended configuration.
    pub fn build(engine: &dyn ScriptLintEngine, scope: &Scope, settings: &ScriptSettings) -> Self {
        let mut config = Self::recommended(engine, scope);
        config.language_options.ecma_version = settings.ecma_version;
        config.language_options.source_type = settings.source_type;
        config
            .language_options
            .globals
            .extend(settings.globals.iter().map(|(k, v)| (k.clone(), *v)));
        config
            .rules
            .extend(settings.rules.iter().map(|(k, v)| (k.clone(), v.clone())));
        config
    }
}
