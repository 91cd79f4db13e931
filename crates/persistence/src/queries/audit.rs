// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tradegate_audit::AuditEvent;
use tradegate_domain::ResourceKind;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Retrieves every audit event for one resource, ordered by event id.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn audit_trail(
    conn: &mut SqliteConnection,
    resource: ResourceKind,
    id: &str,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::resource_kind.eq(resource.as_str()))
        .filter(audit_events::resource_id.eq(id))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("Failed to load audit trail: {e}")))?;

    rows.into_iter().map(AuditEventRow::into_event).collect()
}
