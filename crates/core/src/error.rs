// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use tradegate_domain::{DomainError, ResourceKind, TransitionKind};

/// Errors that can occur while applying a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The actor lacks the role the operation requires.
    Unauthorized {
        actor_id: String,
        action: String,
        required: String,
    },
    /// The resource's current status has no edge for the transition.
    InvalidTransition {
        resource: ResourceKind,
        from: String,
        transition: TransitionKind,
    },
    /// The transaction's payment window has elapsed.
    AlreadyExpired {
        transaction_id: String,
        expired_at: OffsetDateTime,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                actor_id,
                action,
                required,
            } => write!(
                f,
                "Actor '{actor_id}' is not allowed to {action}: requires {required}"
            ),
            Self::InvalidTransition {
                resource,
                from,
                transition,
            } => write!(f, "Cannot {transition} {resource} in status '{from}'"),
            Self::AlreadyExpired {
                transaction_id,
                expired_at,
            } => write!(f, "Transaction {transaction_id} expired at {expired_at}"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
