// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::AuditEventResponse;
use std::str::FromStr;
use tracing::debug;
use tradegate_domain::{Actor, ROLE_ADMIN, ResourceKind};
use tradegate_persistence::LifecycleStore;

/// Audit trail of one resource, oldest first. Admin only.
///
/// Events outlive the resource, so a deleted ad still has a trail.
///
/// # Errors
///
/// Returns `Unauthorized` for non-admin actors and `ValidationError` for an
/// unknown resource kind.
pub fn audit_trail<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    resource: &str,
    id: &str,
) -> Result<Vec<AuditEventResponse>, ApiError> {
    if !actor.is_admin() {
        return Err(ApiError::Unauthorized {
            action: String::from("view the audit trail"),
            required_role: ROLE_ADMIN.to_string(),
        });
    }

    let kind: ResourceKind = ResourceKind::from_str(resource).map_err(translate_domain_error)?;
    let events = store
        .audit_trail(kind, id)
        .map_err(translate_persistence_error)?;

    debug!(resource = %kind, id, count = events.len(), "Loaded audit trail");
    Ok(events.into_iter().map(AuditEventResponse::from).collect())
}
