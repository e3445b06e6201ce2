//! # Mediator Errors
//!
//! Error types surfaced by the dispatcher and by the participants it invokes.
//!
//! The dispatcher itself raises only [`MediatorError::HandlerNotFound`] (on send),
//! [`MediatorError::DuplicateHandler`] (while wiring) and, when configured to,
//! [`MediatorError::BusNotConfigured`]. Every other variant is produced by a
//! handler, behavior or bus and travels back to the caller untouched.

use crate::config::ConfigurationError;
use thiserror::Error;

/// Result alias used by every mediator operation and participant.
pub type MediatorResult<T> = Result<T, MediatorError>;

/// A single rule violation reported by a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Field the failure refers to, if any.
    pub field: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl ValidationFailure {
    /// Failure attached to a named field.
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Failure not attached to any field.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Errors produced while dispatching requests and notifications.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MediatorError {
    /// No handler is registered for the request's (Request, Response) pair.
    #[error("Handler not found for request {request_type}")]
    HandlerNotFound { request_type: &'static str },

    /// A second handler was registered for the same (Request, Response) pair.
    #[error("Duplicate handler registered for request {request_type}")]
    DuplicateHandler { request_type: &'static str },

    /// Forwarding to the external bus was requested but no bus is configured
    /// and [`MissingBusPolicy::Reject`](crate::MissingBusPolicy::Reject) is active.
    #[error("No event bus configured to forward notification {notification_type}")]
    BusNotConfigured { notification_type: &'static str },

    /// One or more validators rejected the request.
    #[error("Validation failed for {request_type}: {}", join_failures(.failures))]
    Validation {
        request_type: &'static str,
        failures: Vec<ValidationFailure>,
    },

    /// A participant observed the cancel signal and gave up.
    #[error("Dispatch cancelled")]
    Cancelled,

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Application failure raised by a handler, behavior or bus.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl MediatorError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            MediatorError::HandlerNotFound { .. } => "handler_not_found",
            MediatorError::DuplicateHandler { .. } => "duplicate_handler",
            MediatorError::BusNotConfigured { .. } => "bus_not_configured",
            MediatorError::Validation { .. } => "validation_failed",
            MediatorError::Cancelled => "cancelled",
            MediatorError::Configuration(_) => "configuration_error",
            MediatorError::Handler(_) => "handler_failed",
        }
    }

    /// Wraps any application error as [`MediatorError::Handler`].
    pub fn handler<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        MediatorError::Handler(anyhow::Error::new(error))
    }
}

fn join_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
