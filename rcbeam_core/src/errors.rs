//! # Error Types
//!
//! Structured error types for rcbeam_core. There are two families:
//!
//! - [`FormError`] - a raw field edit could not be applied to the bundle
//! - [`ServiceError`] - a call to the calculation service failed
//!
//! `ServiceError` keeps the diagnostic detail (status, transport reason) for
//! logs, and [`ServiceError::user_message`] collapses it into the single
//! string shown in the result panel.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::errors::{Operation, ServiceError};
//!
//! let err = ServiceError::rejected(Operation::CalculateIs456, 400, Some("Invalid effective depth".into()));
//! assert_eq!(err.user_message(), "Invalid effective depth");
//!
//! let err = ServiceError::transport(Operation::PredictNn, "connection refused");
//! assert_eq!(err.user_message(), "Prediction failed");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

/// The remote operations the client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// POST /api/calculate-is456
    CalculateIs456,
    /// POST /api/predict-nn
    PredictNn,
    /// GET /health
    Health,
    /// GET /
    ServiceInfo,
}

impl Operation {
    /// Path appended to the base URL
    pub fn path(&self) -> &'static str {
        match self {
            Operation::CalculateIs456 => "/api/calculate-is456",
            Operation::PredictNn => "/api/predict-nn",
            Operation::Health => "/health",
            Operation::ServiceInfo => "/",
        }
    }

    /// Generic message used when the service gives no detail
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Operation::CalculateIs456 => "Calculation failed",
            Operation::PredictNn => "Prediction failed",
            Operation::Health | Operation::ServiceInfo => "Service unavailable",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CalculateIs456 => "calculate-is456",
            Operation::PredictNn => "predict-nn",
            Operation::Health => "health",
            Operation::ServiceInfo => "service-info",
        };
        f.write_str(name)
    }
}

/// Failure of a remote call.
///
/// Every failure mode (non-2xx status, network failure, malformed body)
/// collapses into one user-visible message via [`ServiceError::user_message`].
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ServiceError {
    /// The service answered with a non-success status
    #[error("{operation} rejected with HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        operation: Operation,
        status: u16,
        detail: Option<String>,
    },

    /// The request never produced a response (connect, DNS, timeout)
    #[error("{operation} transport error: {reason}")]
    Transport { operation: Operation, reason: String },

    /// A 2xx response whose body did not match the expected shape
    #[error("{operation} returned an invalid response: {reason}")]
    InvalidResponse { operation: Operation, reason: String },
}

impl ServiceError {
    /// Create a Rejected error
    pub fn rejected(operation: Operation, status: u16, detail: Option<String>) -> Self {
        ServiceError::Rejected {
            operation,
            status,
            detail,
        }
    }

    /// Create a Transport error
    pub fn transport(operation: Operation, reason: impl Into<String>) -> Self {
        ServiceError::Transport {
            operation,
            reason: reason.into(),
        }
    }

    /// Create an InvalidResponse error
    pub fn invalid_response(operation: Operation, reason: impl Into<String>) -> Self {
        ServiceError::InvalidResponse {
            operation,
            reason: reason.into(),
        }
    }

    /// The operation that failed
    pub fn operation(&self) -> Operation {
        match self {
            ServiceError::Rejected { operation, .. }
            | ServiceError::Transport { operation, .. }
            | ServiceError::InvalidResponse { operation, .. } => *operation,
        }
    }

    /// The message shown to the user: the server detail if there is one,
    /// otherwise the operation's generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Rejected {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            _ => self.operation().fallback_message().to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Rejected { .. } => "REJECTED",
            ServiceError::Transport { .. } => "TRANSPORT",
            ServiceError::InvalidResponse { .. } => "INVALID_RESPONSE",
        }
    }
}

/// A raw field edit that could not be applied.
///
/// The form keeps the raw text so the user sees what they typed, but the
/// parameter bundle keeps its last valid value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Text could not be read as a number
    #[error("'{value}' is not a number for {field}")]
    NotANumber { field: &'static str, value: String },

    /// Integer field received a fractional or non-numeric value
    #[error("'{value}' is not a whole number for {field}")]
    NotAnInteger { field: &'static str, value: String },

    /// Select field received a value outside its option list
    #[error("'{value}' is not a valid option for {field}")]
    UnknownOption { field: &'static str, value: String },
}

impl FormError {
    /// JSON key of the field that rejected the edit
    pub fn field(&self) -> &'static str {
        match self {
            FormError::NotANumber { field, .. }
            | FormError::NotAnInteger { field, .. }
            | FormError::UnknownOption { field, .. } => field,
        }
    }
}
