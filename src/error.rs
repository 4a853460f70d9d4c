//! Unified error types for the display manager.

use thiserror::Error;

/// Unified error type for the display manager.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Mode table could not be built.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Mode change was rejected or failed.
    #[error("mode error: {0}")]
    Mode(#[from] ModeError),

    /// Template registration or rendering failed.
    #[error("view error: {0}")]
    View(#[from] ViewError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Startup errors while building the mode table and its register.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No modes were configured.
    #[error("mode registry is empty")]
    Empty,

    /// A mode was declared with a blank id.
    #[error("mode id must not be empty")]
    EmptyId,

    /// The same id was declared twice.
    #[error("duplicate mode id: {0}")]
    DuplicateId(String),

    /// The default mode is not one of the configured modes.
    #[error("default mode {0:?} is not a configured mode")]
    UnknownDefault(String),
}

/// Errors from a mode change request.
///
/// The `Display` text is what clients see in the `error` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// Request body absent or lacking the `mode` field.
    #[error("No mode specified")]
    Missing,

    /// Requested id is not a configured mode.
    #[error("Invalid mode: {0}")]
    Unknown(String),

    /// Unexpected fault while applying the change.
    #[error("{0}")]
    Internal(String),
}

impl ModeError {
    /// Whether the error was caused by client input.
    pub fn is_validation(&self) -> bool {
        matches!(self, ModeError::Missing | ModeError::Unknown(_))
    }

    /// Short label used for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ModeError::Missing => "missing",
            ModeError::Unknown(_) => "unknown",
            ModeError::Internal(_) => "internal",
        }
    }
}

/// Template errors from the view renderer.
#[derive(Error, Debug)]
pub enum ViewError {
    /// A template failed to compile.
    #[error("failed to register template {name}: {reason}")]
    Template {
        /// Template name.
        name: String,
        /// Compiler message.
        reason: String,
    },

    /// A template failed to render.
    #[error("failed to render {name}: {reason}")]
    Render {
        /// Template name.
        name: String,
        /// Renderer message.
        reason: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
