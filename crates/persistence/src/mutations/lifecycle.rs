// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info};
use tradegate_domain::{Ad, AdId, AdStatus, ResourceKind, Transaction, TransactionStatus};

use crate::data_models::{AdRow, TransactionRow};
use crate::diesel_schema::{ads, transactions};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::{ad_status, transaction_status};
use crate::store::Change;
use tradegate_audit::AuditEvent;

fn insert_error(err: DieselError, resource: ResourceKind, id: &str) -> PersistenceError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::AlreadyExists {
                resource,
                id: id.to_string(),
            }
        }
        other => PersistenceError::from(other),
    }
}

/// Explains why a compare-and-set update touched no rows.
fn cas_failure(
    resource: ResourceKind,
    id: &str,
    expected: &str,
    actual: Option<String>,
) -> PersistenceError {
    match actual {
        None => PersistenceError::NotFound {
            resource,
            id: id.to_string(),
        },
        Some(actual) => PersistenceError::Conflict {
            resource,
            id: id.to_string(),
            expected: expected.to_string(),
            actual,
        },
    }
}

/// Inserts a new ad.
///
/// # Errors
///
/// Returns `AlreadyExists` on a duplicate id, or an error if the insert fails.
pub fn insert_ad(conn: &mut SqliteConnection, ad: &Ad) -> Result<(), PersistenceError> {
    let row: AdRow = AdRow::from_ad(ad)?;
    diesel::insert_into(ads::table)
        .values(&row)
        .execute(conn)
        .map_err(|e| insert_error(e, ResourceKind::Ad, &row.id))?;

    info!(ad_id = %row.id, owner = %row.owner, "Inserted ad");
    Ok(())
}

/// Writes the ad's lifecycle columns if its stored status is `expected`.
///
/// Commercial columns are never part of the update.
///
/// # Errors
///
/// Returns `Conflict` if the stored status differs, `NotFound` if the ad is gone.
pub fn save_ad(
    conn: &mut SqliteConnection,
    ad: &Ad,
    expected: AdStatus,
) -> Result<(), PersistenceError> {
    let row: AdRow = AdRow::from_ad(ad)?;

    let rows_affected: usize = diesel::update(ads::table)
        .filter(ads::id.eq(&row.id))
        .filter(ads::status.eq(expected.as_str()))
        .set((
            ads::status.eq(&row.status),
            ads::admin_note.eq(&row.admin_note),
            ads::approved_by.eq(&row.approved_by),
            ads::updated_at.eq(&row.updated_at),
            ads::approved_at.eq(&row.approved_at),
            ads::published_at.eq(&row.published_at),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        let actual: Option<String> = ad_status(conn, &row.id)?;
        return Err(cas_failure(
            ResourceKind::Ad,
            &row.id,
            expected.as_str(),
            actual,
        ));
    }

    debug!(ad_id = %row.id, from = %expected, to = %row.status, "Saved ad");
    Ok(())
}

/// Deletes an ad regardless of status.
///
/// # Errors
///
/// Returns `NotFound` if no ad has this id.
pub fn delete_ad(conn: &mut SqliteConnection, id: AdId) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(ads::table)
        .filter(ads::id.eq(id.to_string()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound {
            resource: ResourceKind::Ad,
            id: id.to_string(),
        });
    }

    info!(ad_id = %id, "Deleted ad");
    Ok(())
}

/// Inserts a new transaction.
///
/// # Errors
///
/// Returns `AlreadyExists` on a duplicate id, or an error if the insert fails.
pub fn insert_transaction(
    conn: &mut SqliteConnection,
    transaction: &Transaction,
) -> Result<(), PersistenceError> {
    let row: TransactionRow = TransactionRow::from_transaction(transaction)?;
    diesel::insert_into(transactions::table)
        .values(&row)
        .execute(conn)
        .map_err(|e| insert_error(e, ResourceKind::Transaction, &row.id))?;

    info!(transaction_id = %row.id, ad_id = %row.ad_id, "Inserted transaction");
    Ok(())
}

/// Writes the transaction's lifecycle columns if its stored status is `expected`.
///
/// Amount columns are never part of the update.
///
/// # Errors
///
/// Returns `Conflict` if the stored status differs, `NotFound` if the
/// transaction does not exist.
pub fn save_transaction(
    conn: &mut SqliteConnection,
    transaction: &Transaction,
    expected: TransactionStatus,
) -> Result<(), PersistenceError> {
    let row: TransactionRow = TransactionRow::from_transaction(transaction)?;

    let rows_affected: usize = diesel::update(transactions::table)
        .filter(transactions::id.eq(&row.id))
        .filter(transactions::status.eq(expected.as_str()))
        .set((
            transactions::status.eq(&row.status),
            transactions::payment_reference.eq(&row.payment_reference),
            transactions::paid_at.eq(&row.paid_at),
            transactions::updated_at.eq(&row.updated_at),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        let actual: Option<String> = transaction_status(conn, &row.id)?;
        return Err(cas_failure(
            ResourceKind::Transaction,
            &row.id,
            expected.as_str(),
            actual,
        ));
    }

    debug!(transaction_id = %row.id, from = %expected, to = %row.status, "Saved transaction");
    Ok(())
}

/// Applies a lifecycle change and appends its audit event.
///
/// Callers run this inside a database transaction so that a failed audit
/// append rolls the change back.
///
/// # Errors
///
/// Returns the first error from the change or the audit append.
pub fn persist_change(
    conn: &mut SqliteConnection,
    change: Change<'_>,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    match change {
        Change::InsertAd(ad) => insert_ad(conn, ad)?,
        Change::SaveAd { ad, expected } => save_ad(conn, ad, expected)?,
        Change::DeleteAd(id) => delete_ad(conn, id)?,
        Change::InsertTransaction(transaction) => insert_transaction(conn, transaction)?,
        Change::SaveTransaction {
            transaction,
            expected,
        } => save_transaction(conn, transaction, expected)?,
    }

    let event_id: i64 = persist_audit_event(conn, event)?;
    debug!(
        resource = %change.resource(),
        resource_id = %event.resource.id,
        event_id,
        "Persisted change"
    );
    Ok(event_id)
}
