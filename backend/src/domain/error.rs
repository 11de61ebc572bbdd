//! Domain-level error taxonomy.
//!
//! Every failure raised by the guarded-mutation core is terminal and
//! non-retryable. Errors are transport agnostic; inbound adapters translate
//! them into HTTP statuses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::entity::EntityKind;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request payload is malformed or fails validation.
    InvalidRequest,
    /// The caller is not permitted to perform this action.
    Forbidden,
    /// The requested entity does not exist.
    NotFound,
    /// An update was attempted outside the allowed edit window.
    ModificationPeriodExpired,
    /// The request conflicts with existing state (e.g. duplicate username).
    Conflict,
    /// A driven port could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload carried back to the boundary layer.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::forbidden("caller does not own this store");
/// assert_eq!(err.code(), ErrorCode::Forbidden);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the fallible constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The error message was empty or whitespace-only.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::NotFound`] for a specific entity, recording the kind and
    /// id in the details payload.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{EntityKind, Error, ErrorCode};
    ///
    /// let err = Error::entity_not_found(EntityKind::Store, 9999);
    /// assert_eq!(err.code(), ErrorCode::NotFound);
    /// assert_eq!(err.details().and_then(|d| d["kind"].as_str()), Some("store"));
    /// ```
    pub fn entity_not_found(kind: EntityKind, id: i64) -> Self {
        Self::new(ErrorCode::NotFound, format!("{kind} {id} does not exist"))
            .with_details(json!({ "kind": kind, "id": id }))
    }

    /// Convenience constructor for [`ErrorCode::ModificationPeriodExpired`].
    pub fn modification_period_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModificationPeriodExpired, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
