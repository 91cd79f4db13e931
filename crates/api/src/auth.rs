// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor resolution at the API boundary.
//!
//! Session data arrives with roles in whatever shape the issuer produced.
//! It is converted to [`RawRoles`] exactly once here; nothing downstream
//! inspects the original JSON.

use crate::error::ApiError;
use serde_json::Value;
use tradegate_domain::{Actor, RawRoles, role_entries};

/// Classifies a JSON role payload.
///
/// - `null` or missing → `Absent`
/// - array → `Sequence`, nested arrays flattened, non-string items stringified
/// - string → `Text`
/// - anything else → `Scalar`
#[must_use]
pub fn raw_roles_from_json(value: &Value) -> RawRoles {
    match value {
        Value::Null => RawRoles::Absent,
        Value::Array(items) => RawRoles::Sequence(role_entries(items)),
        Value::String(text) => RawRoles::Text(text.clone()),
        other => RawRoles::Scalar(other.to_string()),
    }
}

/// Builds the actor for one request.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the actor id is blank.
pub fn resolve_actor(actor_id: &str, roles: &Value) -> Result<Actor, ApiError> {
    if actor_id.trim().is_empty() {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("actor_id is required"),
        });
    }
    Ok(Actor::from_raw(actor_id, &raw_roles_from_json(roles)))
}
