//! Error types for the non-real-time plugin paths.
//!
//! Nothing on the audio path returns these: processing degrades to bypass
//! instead of failing.

use thiserror::Error;

/// Errors that can occur while configuring the plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    /// No parameter has this string id
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// No preset has this name or id
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// `prepare` was called with an unusable configuration
    #[error("invalid process spec: {reason}")]
    InvalidSpec {
        /// What was wrong with the spec.
        reason: &'static str,
    },

    /// A state blob could not be parsed
    #[error("invalid state blob: {0}")]
    InvalidState(#[from] serde_json::Error),

    /// A state blob parsed, but is not a JSON object
    #[error("state blob is not a JSON object")]
    NotAnObject,
}

impl PluginError {
    /// Create an unknown parameter error.
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        PluginError::UnknownParameter(name.into())
    }

    /// Create an unknown preset error.
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        PluginError::UnknownPreset(name.into())
    }

    /// Create an invalid spec error.
    pub fn invalid_spec(reason: &'static str) -> Self {
        PluginError::InvalidSpec { reason }
    }
}
