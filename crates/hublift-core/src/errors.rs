//! Structured error types shared across hublift crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`LiftError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (node ids, sizes, offending values).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the lifting pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LiftError {
    /// Unsupported or out-of-range configuration; raised before any graph processing.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// Structurally invalid graph description.
    #[error("input error: {0}")]
    Input(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl LiftError {
    /// Builds a configuration error with the given code and message.
    pub fn configuration(code: impl Into<String>, message: impl Into<String>) -> Self {
        LiftError::Configuration(ErrorInfo::new(code, message))
    }

    /// Builds an input error with the given code and message.
    pub fn input(code: impl Into<String>, message: impl Into<String>) -> Self {
        LiftError::Input(ErrorInfo::new(code, message))
    }

    /// Builds a serde error with the given code and message.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        LiftError::Serde(ErrorInfo::new(code, message))
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LiftError::Configuration(info) | LiftError::Input(info) | LiftError::Serde(info) => {
                info
            }
        }
    }

    /// Adds a context entry to the wrapped payload.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            LiftError::Configuration(info) => {
                LiftError::Configuration(info.with_context(key, value))
            }
            LiftError::Input(info) => LiftError::Input(info.with_context(key, value)),
            LiftError::Serde(info) => LiftError::Serde(info.with_context(key, value)),
        }
    }

    /// Attaches a remediation hint to the wrapped payload.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            LiftError::Configuration(info) => LiftError::Configuration(info.with_hint(hint)),
            LiftError::Input(info) => LiftError::Input(info.with_hint(hint)),
            LiftError::Serde(info) => LiftError::Serde(info.with_hint(hint)),
        }
    }
}
