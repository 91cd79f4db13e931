// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use std::fmt::Display;
use tradegate_domain::{Actor, Edge, StateMachine, TransitionKind};

/// Checks the actor holds the role `kind` requires in `machine`.
///
/// Runs before any status check, so an actor without the role sees
/// `Unauthorized` regardless of the resource's status.
pub fn authorize<S: Copy + Eq>(
    machine: &StateMachine<S>,
    actor: &Actor,
    kind: TransitionKind,
    from: S,
) -> Result<(), CoreError>
where
    S: Display,
{
    let Some(required) = machine.required_role(kind) else {
        return Err(CoreError::InvalidTransition {
            resource: machine.resource,
            from: from.to_string(),
            transition: kind,
        });
    };

    if !actor.roles().has_role(required) {
        return Err(CoreError::Unauthorized {
            actor_id: actor.id().to_string(),
            action: format!("{kind} this {}", machine.resource),
            required: required.token().to_string(),
        });
    }
    Ok(())
}

/// Looks up the edge for `(from, kind)`.
pub fn edge_for<S: Copy + Eq + Display>(
    machine: &StateMachine<S>,
    from: S,
    kind: TransitionKind,
) -> Result<&'static Edge<S>, CoreError> {
    machine
        .edge(from, kind)
        .ok_or_else(|| CoreError::InvalidTransition {
            resource: machine.resource,
            from: from.to_string(),
            transition: kind,
        })
}

/// Checks the actor may create resources at all.
pub fn require_trader(actor: &Actor, action: &str) -> Result<(), CoreError> {
    if actor.is_authenticated_trader() {
        return Ok(());
    }
    Err(CoreError::Unauthorized {
        actor_id: actor.id().to_string(),
        action: action.to_string(),
        required: format!(
            "{} or {}",
            tradegate_domain::ROLE_USER,
            tradegate_domain::ROLE_ADMIN
        ),
    })
}
