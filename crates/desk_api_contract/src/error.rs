//! Tagged error type and the fixed validation messages of the desk API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation message used when a remove request carries no desk id.
pub const DESK_NOT_FOUND_MESSAGE: &str = "desk can not be found";

/// Validation message used when `allowUndo` and `combineDesks` are requested together.
pub const EXCLUSIVE_REMOVE_OPTIONS_MESSAGE: &str =
    "allowUndo and combineDesks can not be set at the same time";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors surfaced by desk API operations.
pub enum DeskApiError {
    /// Operands were missing or contradictory; raised before any host call.
    #[error("{0}")]
    Validation(String),
    /// The host does not provide the requested operation.
    #[error("{method} is not supported in this version")]
    Unsupported {
        /// Host method name, such as `removeDesk`.
        method: &'static str,
    },
    /// The host reported an error; the message is carried verbatim.
    #[error("{0}")]
    Host(String),
    /// The user declined or dismissed the removal confirmation.
    #[error("User cancelled desk removal operation")]
    UserCancelled,
    /// The caller sent a message this bridge does not understand.
    #[error("{0}")]
    Protocol(String),
}

/// Stable discriminant for [`DeskApiError`] so callers can branch without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeskApiErrorKind {
    /// See [`DeskApiError::Validation`].
    Validation,
    /// See [`DeskApiError::Unsupported`].
    Unsupported,
    /// See [`DeskApiError::Host`].
    HostError,
    /// See [`DeskApiError::UserCancelled`].
    UserCancelled,
    /// See [`DeskApiError::Protocol`].
    Protocol,
}

impl DeskApiError {
    /// Returns the error kind.
    pub const fn kind(&self) -> DeskApiErrorKind {
        match self {
            Self::Validation(_) => DeskApiErrorKind::Validation,
            Self::Unsupported { .. } => DeskApiErrorKind::Unsupported,
            Self::Host(_) => DeskApiErrorKind::HostError,
            Self::UserCancelled => DeskApiErrorKind::UserCancelled,
            Self::Protocol(_) => DeskApiErrorKind::Protocol,
        }
    }

    /// Returns whether the error indicates a caller/callee version mismatch that must not be
    /// translated into a failure response.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
