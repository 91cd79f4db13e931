// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use serde::{Deserialize, Serialize};
use tradegate::CoreError;
use tradegate_domain::DomainError;
use tradegate_persistence::PersistenceError;

/// Machine-readable category of an [`ApiError`].
///
/// Callers branch on this to tell "not allowed" from "already processed"
/// from "not found" without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthenticationFailed,
    Unauthorized,
    InvalidTransition,
    NotFound,
    Conflict,
    ValidationError,
    AlreadyExpired,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::Unauthorized => "unauthorized",
            Self::InvalidTransition => "invalid_transition",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::ValidationError => "validation_error",
            Self::AlreadyExpired => "already_expired",
            Self::Internal => "internal",
        }
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No usable actor identity was supplied.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor does not hold the role the operation requires.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The resource's current status does not allow the transition.
    InvalidTransition {
        resource: String,
        from: String,
        transition: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The resource changed between load and save.
    Conflict {
        resource_type: String,
        message: String,
    },
    /// Invalid input was provided.
    ValidationError {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The transaction's payment window has elapsed.
    AlreadyExpired { message: String },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthenticationFailed { .. } => ErrorKind::AuthenticationFailed,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::ResourceNotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::ValidationError { .. } => ErrorKind::ValidationError,
            Self::AlreadyExpired { .. } => ErrorKind::AlreadyExpired,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::InvalidTransition {
                resource,
                from,
                transition,
            } => {
                write!(f, "Cannot {transition} {resource} in status '{from}'")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict {
                resource_type,
                message,
            } => write!(f, "Conflicting update on {resource_type}: {message}"),
            Self::ValidationError { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::AlreadyExpired { message } => write!(f, "Already expired: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// Every domain error is an input problem, so each maps to a
/// `ValidationError` naming the offending field.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::InvalidAmount { field, .. } | DomainError::EmptyField(field) => *field,
        DomainError::InvalidTransactionBounds { .. } => "min_amount_per_transaction",
        DomainError::NoSettlementMethods => "settlement_methods",
        DomainError::InvalidStatus { .. } => "status",
        DomainError::InvalidDirection(_) => "direction",
        DomainError::UnknownTransitionKind(_) => "op",
        DomainError::UnknownResourceKind(_) => "resource",
        DomainError::SameParty { .. } => "buyer",
        DomainError::CounterpartyMismatch { .. } => "counterparty",
        DomainError::AdNotOpenForTrading { .. } => "ad_id",
        DomainError::InvalidExpiryWindow { .. } => "expiry_minutes",
        DomainError::InvalidLimits(_) => "limits",
        DomainError::InvalidIdentifier(_) => "id",
    };
    ApiError::ValidationError {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Unauthorized {
            action, required, ..
        } => ApiError::Unauthorized {
            action,
            required_role: required,
        },
        CoreError::InvalidTransition {
            resource,
            from,
            transition,
        } => ApiError::InvalidTransition {
            resource: resource.to_string(),
            from,
            transition: transition.to_string(),
        },
        CoreError::AlreadyExpired { .. } => ApiError::AlreadyExpired {
            message: err.to_string(),
        },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a store error into an API error.
///
/// Anything that is not a lookup miss or a lost compare-and-set is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound { resource, id } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message: format!("{resource} {id} does not exist"),
        },
        PersistenceError::Conflict { resource, .. }
        | PersistenceError::AlreadyExists { resource, .. } => ApiError::Conflict {
            resource_type: resource.to_string(),
            message: err.to_string(),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
