// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;
use tradegate_audit::AuditEvent;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::format_timestamp;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&event.actor)?;
    let action_json: String = serde_json::to_string(&event.action)?;
    let before_json: String = serde_json::to_string(&event.before)?;
    let after_json: String = serde_json::to_string(&event.after)?;
    let recorded_at: String = format_timestamp(event.recorded_at)?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::resource_kind.eq(event.resource.kind.as_str()),
            audit_events::resource_id.eq(&event.resource.id),
            audit_events::actor_id.eq(&event.actor.id),
            audit_events::actor_json.eq(&actor_json),
            audit_events::action_json.eq(&action_json),
            audit_events::before_snapshot_json.eq(&before_json),
            audit_events::after_snapshot_json.eq(&after_json),
            audit_events::recorded_at.eq(&recorded_at),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, "Persisted audit event");
    Ok(event_id)
}
