// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tradegate_domain::{Actor, ResourceKind};

/// The actor responsible for a change, as it looked when the change happened.
///
/// Role sets can change between sessions, so the tokens are copied rather
/// than referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// The actor's identifier.
    pub id: String,
    /// Canonical role tokens held at the time, sorted.
    pub roles: Vec<String>,
}

impl ActorSnapshot {
    #[must_use]
    pub const fn new(id: String, roles: Vec<String>) -> Self {
        Self { id, roles }
    }
}

impl From<&Actor> for ActorSnapshot {
    fn from(actor: &Actor) -> Self {
        Self::new(actor.id().value().to_string(), actor.roles().to_vec())
    }
}

/// The resource a change applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: String,
}

impl ResourceRef {
    #[must_use]
    pub const fn new(kind: ResourceKind, id: String) -> Self {
        Self { kind, id }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`Approve`", "`MarkPaid`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact rendering of resource state on one side of a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// A snapshot holding only a status value.
    #[must_use]
    pub fn status(status: &str) -> Self {
        Self::new(format!("status={status}"))
    }

    /// The snapshot on the missing side of a creation or removal.
    #[must_use]
    pub fn absent() -> Self {
        Self::new(String::from("absent"))
    }
}

/// An immutable audit event representing one lifecycle change.
///
/// Every successful state change produces exactly one audit event.
/// Audit events capture:
/// - Who performed the change (actor)
/// - Which resource changed (resource)
/// - What was done (action)
/// - The state before and after
/// - When it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Store-assigned identifier, present once persisted.
    pub event_id: Option<i64>,
    pub actor: ActorSnapshot,
    pub resource: ResourceRef,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new, not yet persisted, `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: ActorSnapshot,
        resource: ResourceRef,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            resource,
            action,
            before,
            after,
            recorded_at,
        }
    }

    /// Returns a copy carrying the identifier assigned by the store.
    #[must_use]
    pub fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}
