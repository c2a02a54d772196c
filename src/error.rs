//! Error types for quoteweave.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteweaveError {
    // Sequence model errors
    #[error("Sequence invariant violated: {message}")]
    SequenceInvariant { message: String },

    // Configuration / caller contract errors
    #[error("Invalid configuration value for {key}: {message}")]
    Configuration { key: String, message: String },

    #[error("Failed to parse component string '{input}': {message}")]
    ComponentParse { input: String, message: String },

    #[error("Component '{name}' not found. Available components: {available}")]
    UnknownComponent { name: String, available: String },

    #[error("Component {component} failed: {message}")]
    Component { component: String, message: String },

    // Alignment errors
    #[error("Alignment failed: {message}")]
    Alignment { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl QuoteweaveError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::SequenceInvariant {
            message: message.into(),
        }
    }

    pub(crate) fn configuration(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.into(),
            message: message.into(),
        }
    }

    pub(crate) fn alignment(message: impl Into<String>) -> Self {
        Self::Alignment {
            message: message.into(),
        }
    }

    pub(crate) fn component(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Component {
            component: component.into(),
            message: message.into(),
        }
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, QuoteweaveError>;
