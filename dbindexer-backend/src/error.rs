//! Error types for backend composition.

use dbindexer_core::BehaviorLabel;
use smol_str::SmolStr;
use thiserror::Error;

/// Error type for backend composition and dispatch.
///
/// Every failure is immediate and fatal to the operation in progress. Use
/// [`BackendError::kind`] to classify errors without matching every variant.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The settings do not carry a string `TARGET` key.
    #[error("database settings do not name a TARGET backend")]
    MissingTarget,

    /// `TARGET` names an alias the backend registry does not know.
    #[error("TARGET backend `{0}` is not registered")]
    UnregisteredTarget(SmolStr),

    /// The target descriptor has no string `ENGINE` key.
    #[error("target backend `{alias}` does not declare an ENGINE")]
    MissingEngine {
        /// Alias of the target backend.
        alias: SmolStr,
    },

    /// The `ENGINE` locator cannot be resolved to an implementation.
    #[error("backend engine `{engine}` could not be resolved")]
    UnresolvedEngine {
        /// The unresolved locator.
        engine: SmolStr,
    },

    /// The extension does not provide a behavior for a logical name.
    #[error("extension does not provide a compiler named `{name}`")]
    ExtensionNotFound {
        /// Requested logical name.
        name: SmolStr,
    },

    /// The target backend does not provide a compiler for a logical name.
    #[error("backend `{backend}` does not provide a compiler named `{name}`")]
    CompilerNotFound {
        /// Label of the target operations.
        backend: BehaviorLabel,
        /// Requested logical name.
        name: SmolStr,
    },

    /// Neither side of a behavior chain defines the operation.
    #[error("`{behavior}` does not define operation `{operation}`")]
    UnknownOperation {
        /// Label of the behavior that was called.
        behavior: BehaviorLabel,
        /// Requested operation.
        operation: SmolStr,
    },

    /// An operation rejected its arguments.
    #[error("invalid arguments for `{operation}`: {reason}")]
    InvalidArguments {
        /// Operation that rejected the call.
        operation: SmolStr,
        /// Human readable reason.
        reason: String,
    },

    /// Internal backend error, state or computation error.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of [`BackendError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `TARGET` absent or unregistered.
    MissingTarget,
    /// `ENGINE` absent or unresolvable.
    BackendResolution,
    /// Extension registry has no behavior for a name.
    ExtensionLookup,
    /// Target backend has no behavior for a name.
    TargetLookup,
    /// Dispatch of a single operation failed.
    Operation,
    /// Anything raised by a backend implementation.
    Internal,
}

impl BackendError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingTarget | Self::UnregisteredTarget(_) => ErrorKind::MissingTarget,
            Self::MissingEngine { .. } | Self::UnresolvedEngine { .. } => {
                ErrorKind::BackendResolution
            }
            Self::ExtensionNotFound { .. } => ErrorKind::ExtensionLookup,
            Self::CompilerNotFound { .. } => ErrorKind::TargetLookup,
            Self::UnknownOperation { .. } | Self::InvalidArguments { .. } => ErrorKind::Operation,
            Self::InternalError(_) => ErrorKind::Internal,
        }
    }
}

/// Result alias used across the crate.
pub type BackendResult<T> = Result<T, BackendError>;
