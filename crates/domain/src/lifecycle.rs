// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle tables for ads and transactions.
//!
//! Each lifecycle is an explicit edge list keyed by
//! `(current status, transition kind)`. Every edge names the role an actor
//! must hold to take it. Both the mutating operations and the affordance
//! listing consult these tables, so legality is defined in exactly one place.
//!
//! Transitions that bypass the state guard entirely (administrative delete)
//! are listed separately as overrides.

use crate::ad::AdStatus;
use crate::error::DomainError;
use crate::roles::Role;
use crate::transaction::TransactionStatus;
use crate::types::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Every transition an actor can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Approve,
    Publish,
    Reject,
    Pause,
    Complete,
    Cancel,
    Delete,
    MarkPaid,
    ReleaseFunds,
}

impl TransitionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Publish => "publish",
            Self::Reject => "reject",
            Self::Pause => "pause",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
            Self::MarkPaid => "mark_paid",
            Self::ReleaseFunds => "release_funds",
        }
    }
}

impl FromStr for TransitionKind {
    type Err = DomainError;

    /// Accepts `snake_case`, `camelCase` and `kebab-case` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "approve" => Ok(Self::Approve),
            "publish" => Ok(Self::Publish),
            "reject" => Ok(Self::Reject),
            "pause" => Ok(Self::Pause),
            "complete" => Ok(Self::Complete),
            "cancel" => Ok(Self::Cancel),
            "delete" => Ok(Self::Delete),
            "markpaid" => Ok(Self::MarkPaid),
            "releasefunds" => Ok(Self::ReleaseFunds),
            _ => Err(DomainError::UnknownTransitionKind(s.to_string())),
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A legal move between two statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<S: 'static> {
    pub from: S,
    pub kind: TransitionKind,
    pub to: S,
    pub required: Role,
}

/// A transition with no state guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Override {
    pub kind: TransitionKind,
    pub required: Role,
}

/// A finite state machine over status values of one resource kind.
#[derive(Debug)]
pub struct StateMachine<S: 'static> {
    pub resource: ResourceKind,
    edges: &'static [Edge<S>],
    overrides: &'static [Override],
}

impl<S: Copy + Eq> StateMachine<S> {
    /// Looks up the edge for `(from, kind)`.
    #[must_use]
    pub fn edge(&self, from: S, kind: TransitionKind) -> Option<&'static Edge<S>> {
        self.edges.iter().find(|e| e.from == from && e.kind == kind)
    }

    /// The role required for `kind`, independent of the current status.
    ///
    /// Returns `None` if this lifecycle does not define `kind` at all.
    #[must_use]
    pub fn required_role(&self, kind: TransitionKind) -> Option<Role> {
        self.overrides
            .iter()
            .find(|o| o.kind == kind)
            .map(|o| o.required)
            .or_else(|| {
                self.edges
                    .iter()
                    .find(|e| e.kind == kind)
                    .map(|e| e.required)
            })
    }

    /// Whether this lifecycle defines `kind`.
    #[must_use]
    pub fn defines(&self, kind: TransitionKind) -> bool {
        self.required_role(kind).is_some()
    }

    /// Whether `kind` bypasses the state guard.
    #[must_use]
    pub fn is_override(&self, kind: TransitionKind) -> bool {
        self.overrides.iter().any(|o| o.kind == kind)
    }

    /// All transition kinds that are state-legal from `from`, with the role
    /// each one needs.
    pub fn available_from(&self, from: S) -> impl Iterator<Item = (TransitionKind, Role)> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.from == from)
            .map(|e| (e.kind, e.required))
            .chain(self.overrides.iter().map(|o| (o.kind, o.required)))
    }

    /// Transition kinds leaving `from` that an actor holding `has_role` may take.
    pub fn permitted_from<F>(&self, from: S, has_role: F) -> BTreeSet<TransitionKind>
    where
        F: Fn(Role) -> bool,
    {
        self.available_from(from)
            .filter(|(_, role)| has_role(*role))
            .map(|(kind, _)| kind)
            .collect()
    }

    /// Every kind this lifecycle defines.
    #[must_use]
    pub fn kinds(&self) -> BTreeSet<TransitionKind> {
        self.edges
            .iter()
            .map(|e| e.kind)
            .chain(self.overrides.iter().map(|o| o.kind))
            .collect()
    }
}

macro_rules! edge {
    ($from:expr, $kind:ident => $to:expr, $role:ident) => {
        Edge {
            from: $from,
            kind: TransitionKind::$kind,
            to: $to,
            required: Role::$role,
        }
    };
}

/// Ad moderation lifecycle. Every edge is admin-gated.
pub static AD_LIFECYCLE: StateMachine<AdStatus> = StateMachine {
    resource: ResourceKind::Ad,
    edges: &[
        edge!(AdStatus::Pending, Approve => AdStatus::Approved, Admin),
        edge!(AdStatus::Pending, Reject => AdStatus::Rejected, Admin),
        edge!(AdStatus::Approved, Publish => AdStatus::Published, Admin),
        edge!(AdStatus::Approved, Reject => AdStatus::Rejected, Admin),
        edge!(AdStatus::Published, Pause => AdStatus::Paused, Admin),
        edge!(AdStatus::Published, Reject => AdStatus::Rejected, Admin),
        edge!(AdStatus::Published, Complete => AdStatus::Completed, Admin),
        edge!(AdStatus::Published, Cancel => AdStatus::Cancelled, Admin),
        edge!(AdStatus::Paused, Publish => AdStatus::Published, Admin),
        edge!(AdStatus::Paused, Reject => AdStatus::Rejected, Admin),
    ],
    overrides: &[Override {
        kind: TransitionKind::Delete,
        required: Role::Admin,
    }],
};

/// Transaction settlement lifecycle.
///
/// `Disputed` is entered only by an external collaborator and has no
/// outgoing edge. No edge produces `Completed`.
pub static TRANSACTION_LIFECYCLE: StateMachine<TransactionStatus> = StateMachine {
    resource: ResourceKind::Transaction,
    edges: &[
        edge!(TransactionStatus::Pending, MarkPaid => TransactionStatus::Paid, Admin),
        edge!(TransactionStatus::Pending, Cancel => TransactionStatus::Cancelled, Admin),
        edge!(TransactionStatus::Paid, ReleaseFunds => TransactionStatus::Released, Admin),
        edge!(TransactionStatus::Paid, Cancel => TransactionStatus::Cancelled, Admin),
    ],
    overrides: &[],
};
