//! Error types for the masking pipeline

use serde_json::{Value, json};
use thiserror::Error;

/// Lifecycle phase during which a plugin hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPhase {
    Install,
    Init,
}

impl std::fmt::Display for InitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitPhase::Install => write!(f, "install"),
            InitPhase::Init => write!(f, "init"),
        }
    }
}

/// Errors produced by the masking pipeline.
///
/// Every variant carries enough context to be logged structurally via
/// [`Error::code`] and [`Error::context`] without re-parsing message text.
/// The enum is `Clone` so a single initialization failure can be handed to
/// every caller awaiting the same in-flight `initialize()`.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("invalid value for masker `{mask_type}`")]
    InvalidValue { mask_type: String, value: Value },

    #[error("invalid strategy `{strategy}`")]
    InvalidStrategy { strategy: String },

    #[error("invalid format `{format}`")]
    InvalidFormat { format: String },

    #[error("no masker registered for type `{mask_type}`")]
    MaskerNotFound { mask_type: String },

    #[error("masker type must be a non-empty string")]
    InvalidMaskerType,

    #[error("plugin registration failed for `{plugin}`: {reason}")]
    PluginRegistration { plugin: String, reason: String },

    #[error("plugin `{plugin}` requires `{dependency}`, which is not registered")]
    PluginDependency { plugin: String, dependency: String },

    #[error("plugin `{plugin}` failed during {phase}: {cause}")]
    PluginInit {
        plugin: String,
        phase: InitPhase,
        cause: String,
    },

    #[error("invalid field path `{path}`: {reason}")]
    InvalidFieldPath { path: String, reason: String },
}

impl Error {
    /// Machine-readable error code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidValue { .. } => "invalid_value",
            Error::InvalidStrategy { .. } => "invalid_strategy",
            Error::InvalidFormat { .. } => "invalid_format",
            Error::MaskerNotFound { .. } => "masker_not_found",
            Error::InvalidMaskerType => "invalid_masker_type",
            Error::PluginRegistration { .. } => "plugin_registration",
            Error::PluginDependency { .. } => "plugin_dependency",
            Error::PluginInit { .. } => "plugin_init",
            Error::InvalidFieldPath { .. } => "invalid_field_path",
        }
    }

    /// Structured payload describing the failure, suitable for log fields.
    pub fn context(&self) -> Value {
        match self {
            Error::InvalidValue { mask_type, value } => {
                json!({ "mask_type": mask_type, "value": value })
            }
            Error::InvalidStrategy { strategy } => json!({ "strategy": strategy }),
            Error::InvalidFormat { format } => json!({ "format": format }),
            Error::MaskerNotFound { mask_type } => json!({ "mask_type": mask_type }),
            Error::InvalidMaskerType => json!({}),
            Error::PluginRegistration { plugin, reason } => {
                json!({ "plugin": plugin, "reason": reason })
            }
            Error::PluginDependency { plugin, dependency } => {
                json!({ "plugin": plugin, "dependency": dependency })
            }
            Error::PluginInit {
                plugin,
                phase,
                cause,
            } => json!({ "plugin": plugin, "phase": phase.to_string(), "cause": cause }),
            Error::InvalidFieldPath { path, reason } => {
                json!({ "path": path, "reason": reason })
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let err = Error::MaskerNotFound {
            mask_type: "email".to_string(),
        };
        assert_eq!(err.code(), "masker_not_found");
        assert_eq!(err.context()["mask_type"], "email");
    }

    #[test]
    fn context_carries_offending_value() {
        let err = Error::InvalidValue {
            mask_type: "card".to_string(),
            value: json!(42),
        };
        assert_eq!(err.context()["value"], json!(42));
        assert_eq!(err.code(), "invalid_value");
    }

    #[test]
    fn init_phase_renders_lowercase() {
        let err = Error::PluginInit {
            plugin: "p".to_string(),
            phase: InitPhase::Install,
            cause: "boom".to_string(),
        };
        assert!(err.to_string().contains("during install"));
    }
}
