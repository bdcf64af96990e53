//! Error types for ZQLZ

use thiserror::Error;

/// Errors raised by data sources and transfer targets
#[derive(Error, Debug)]
pub enum ZqlzError {
    /// A target object could not report or change one of its properties
    #[error("Target '{target}': {message}")]
    Target { target: String, message: String },

    /// The operation stopped because its progress monitor was cancelled
    #[error("Cancelled")]
    Cancelled,
}

impl ZqlzError {
    pub fn target(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Target {
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias for ZQLZ operations
pub type Result<T> = std::result::Result<T, ZqlzError>;
