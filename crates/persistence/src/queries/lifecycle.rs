// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tradegate_domain::{Ad, AdId, ResourceKind, Transaction, TransactionId};

use crate::data_models::{AdRow, TransactionRow};
use crate::diesel_schema::{ads, transactions};
use crate::error::PersistenceError;

/// Loads an ad by id.
///
/// # Errors
///
/// Returns `NotFound` if the ad does not exist, or an error if the row cannot
/// be decoded.
pub fn get_ad(conn: &mut SqliteConnection, id: AdId) -> Result<Ad, PersistenceError> {
    let row: Option<AdRow> = ads::table
        .filter(ads::id.eq(id.to_string()))
        .select(AdRow::as_select())
        .first::<AdRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("Failed to load ad {id}: {e}")))?;

    row.ok_or_else(|| PersistenceError::NotFound {
        resource: ResourceKind::Ad,
        id: id.to_string(),
    })?
    .into_ad()
}

/// The stored status of an ad, if the ad exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn ad_status(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<String>, PersistenceError> {
    ads::table
        .filter(ads::id.eq(id))
        .select(ads::status)
        .first::<String>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("Failed to read ad status: {e}")))
}

/// Loads a transaction by id.
///
/// # Errors
///
/// Returns `NotFound` if the transaction does not exist, or an error if the
/// row cannot be decoded.
pub fn get_transaction(
    conn: &mut SqliteConnection,
    id: TransactionId,
) -> Result<Transaction, PersistenceError> {
    let row: Option<TransactionRow> = transactions::table
        .filter(transactions::id.eq(id.to_string()))
        .select(TransactionRow::as_select())
        .first::<TransactionRow>(conn)
        .optional()
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("Failed to load transaction {id}: {e}"))
        })?;

    row.ok_or_else(|| PersistenceError::NotFound {
        resource: ResourceKind::Transaction,
        id: id.to_string(),
    })?
    .into_transaction()
}

/// The stored status of a transaction, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn transaction_status(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<String>, PersistenceError> {
    transactions::table
        .filter(transactions::id.eq(id))
        .select(transactions::status)
        .first::<String>(conn)
        .optional()
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("Failed to read transaction status: {e}"))
        })
}
