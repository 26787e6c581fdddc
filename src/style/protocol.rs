//! Worker message protocol.
//!
//! Requests and responses are correlated by command name only; a `lint`
//! response echoes the submitted code so the caller can detect stale results.
//! The JSON forms match what a host would pass through `postMessage`:
//!
//! ```json
//! {"command": "setConfig", "payload": {"color-no-invalid-hex": true}}
//! {"command": "getConfig"}
//! {"command": "lint", "payload": "a { color: #ffg; }"}
//! ```
//!
//! A `lint` response carries either `diagnostics` or `error`:
//!
//! ```json
//! {"command": "lint", "code": "a { color: #ffg; }", "diagnostics": [...]}
//! {"command": "lint", "code": "a {", "error": {"kind": "engineFailure", ...}}
//! ```

use serde::{Deserialize, Serialize};

use super::StyleWarning;
use crate::error::{LintError, LintResult};
use crate::rule_config::RuleSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum WorkerMessage {
    /// Replace the custom rule overrides. No response.
    SetConfig { payload: RuleSet },
    /// Ask for the merged configuration.
    GetConfig,
    /// Lint the given source text.
    Lint { payload: String },
}

impl WorkerMessage {
    pub fn from_json(json: &str) -> LintResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> LintResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireResponse", try_from = "WireResponse")]
pub enum WorkerResponse {
    GetConfig {
        payload: RuleSet,
    },
    Lint {
        code: String,
        result: Result<Vec<StyleWarning>, LintError>,
    },
}

impl WorkerResponse {
    pub fn from_json(json: &str) -> LintResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> LintResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn command(&self) -> &'static str {
        match self {
            WorkerResponse::GetConfig { .. } => "getConfig",
            WorkerResponse::Lint { .. } => "lint",
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
enum WireResponse {
    GetConfig {
        payload: RuleSet,
    },
    Lint {
        code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diagnostics: Option<Vec<StyleWarning>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<LintError>,
    },
}

impl From<WorkerResponse> for WireResponse {
    fn from(response: WorkerResponse) -> Self {
        match response {
            WorkerResponse::GetConfig { payload } => WireResponse::GetConfig { payload },
            WorkerResponse::Lint { code, result } => match result {
                Ok(diagnostics) => WireResponse::Lint {
                    code,
                    diagnostics: Some(diagnostics),
                    error: None,
                },
                Err(error) => WireResponse::Lint {
                    code,
                    diagnostics: None,
                    error: Some(error),
                },
            },
        }
    }
}

impl TryFrom<WireResponse> for WorkerResponse {
    type Error = String;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        match wire {
            WireResponse::GetConfig { payload } => Ok(WorkerResponse::GetConfig { payload }),
            WireResponse::Lint {
                code,
                diagnostics,
                error,
            } => match (diagnostics, error) {
                (Some(diagnostics), None) => Ok(WorkerResponse::Lint {
                    code,
                    result: Ok(diagnostics),
                }),
                (None, Some(error)) => Ok(WorkerResponse::Lint {
                    code,
                    result: Err(error),
                }),
                (Some(_), Some(_)) => Err("lint response has both diagnostics and error".to_string()),
                (None, None) => Err("lint response has neither diagnostics nor error".to_string()),
            },
        }
    }
}
