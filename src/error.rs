//! Error types shared by the script and style adapters.
//!
//! `LintError` is cloneable and serializable because it travels back from the
//! style worker inside a `lint` response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LintError {
    /// The engine returned an error (or rejected) for this invocation.
    #[error("{engine} failed: {message}")]
    EngineFailure { engine: String, message: String },

    /// The engine panicked while linting.
    #[error("{engine} panicked: {message}")]
    EnginePanic { engine: String, message: String },

    /// The style worker task has exited and can no longer accept messages.
    #[error("lint worker is no longer running")]
    WorkerGone,

    /// A message on the worker channel could not be decoded or encoded.
    #[error("invalid worker message: {message}")]
    Protocol { message: String },
}

impl LintError {
    pub(crate) fn engine_failure(engine: &str, err: &anyhow::Error) -> Self {
        LintError::EngineFailure {
            engine: engine.to_string(),
            message: format!("{err:#}"),
        }
    }

    pub(crate) fn engine_panic(engine: &str, payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        LintError::EnginePanic {
            engine: engine.to_string(),
            message,
        }
    }
}

impl From<serde_json::Error> for LintError {
    fn from(err: serde_json::Error) -> Self {
        LintError::Protocol {
            message: err.to_string(),
        }
    }
}

pub type LintResult<T> = Result<T, LintError>;
