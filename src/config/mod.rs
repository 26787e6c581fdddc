//! This module defines the configuration file structures for lintbridge and their validation.
//! Configuration lives in `.lintbridge.toml` (kebab-case keys) with one section per adapter:
//!
//! ```toml
//! [script]
//! ecma-version = 2022
//! source-type = "module"
//! globals = { mw = "readonly" }
//! rules = { "no-console" = "warn", quotes = ["error", "single"] }
//!
//! [style]
//! rules = { "color-no-invalid-hex" = true }
//!
//! [worker]
//! queue-capacity = 16
//! ```

mod loading;

pub use loading::{CONFIG_FILES, find_config_file};

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};

use crate::rule_config::{RuleSet, is_rule_name};
use crate::script::{self, EcmaVersion, GlobalAccess, RuleSetting, SourceType};
use crate::style;
use crate::style::worker::DEFAULT_QUEUE_CAPACITY;

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    /// Parsed, but a value is out of range
    #[error("Invalid config {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Represents the complete configuration loaded from `.lintbridge.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    pub script: ScriptSettings,
    pub style: StyleSettings,
    pub worker: WorkerSettings,
}

/// `[script]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ScriptSettings {
    pub ecma_version: EcmaVersion,
    pub source_type: SourceType,
    /// Extra globals, on top of the injected scope's names
    pub globals: BTreeMap<String, GlobalAccess>,
    /// Rule entries layered over the engine's recommended set
    pub rules: BTreeMap<String, RuleSetting>,
    pub source_label: String,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            ecma_version: EcmaVersion::default(),
            source_type: SourceType::default(),
            globals: BTreeMap::new(),
            rules: BTreeMap::new(),
            source_label: script::DEFAULT_SOURCE_LABEL.to_string(),
        }
    }
}

/// `[style]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct StyleSettings {
    /// Initial custom rules, applied as if sent with `setConfig`
    pub rules: RuleSet,
    pub source_label: String,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            rules: RuleSet::new(),
            source_label: style::DEFAULT_SOURCE_LABEL.to_string(),
        }
    }
}

/// `[worker]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct WorkerSettings {
    pub queue_capacity: usize,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    /// Check values serde cannot express. `path` only labels the error.
    pub fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            path: path.to_string(),
            message,
        };

        if self.worker.queue_capacity == 0 {
            return Err(invalid("worker.queue-capacity must be at least 1".to_string()));
        }
        if let Some(name) = self.style.rules.keys().find(|name| !is_rule_name(name)) {
            return Err(invalid(format!("style.rules: '{name}' is not a valid rule name")));
        }
        if let Some(name) = self.script.rules.keys().find(|name| !is_rule_name(name)) {
            return Err(invalid(format!("script.rules: '{name}' is not a valid rule name")));
        }
        if self.script.globals.keys().any(|name| name.is_empty()) {
            return Err(invalid("script.globals: empty global name".to_string()));
        }
        for (section, label) in [
            ("script", &self.script.source_label),
            ("style", &self.style.source_label),
        ] {
            if label.trim().is_empty() {
                return Err(invalid(format!("{section}.source-label must not be empty")));
            }
        }
        Ok(())
    }
}
