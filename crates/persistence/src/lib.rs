// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the lifecycle engine.
//!
//! Every lifecycle operation reaches storage through the [`LifecycleStore`]
//! trait. Two implementations ship here:
//!
//! - [`InMemoryStore`]: process-local maps, used in tests and ephemeral servers
//! - [`SqlitePersistence`]: `SQLite` via Diesel with embedded migrations
//!
//! Both implement saves as compare-and-set on the observed status. The
//! `SQLite` adapter issues `UPDATE ... WHERE id = ? AND status = ?` and treats
//! zero affected rows as a conflict (or not-found, if the row is gone).
//!
//! ## Testing
//!
//! In-memory `SQLite` databases are named from an atomic counter so every
//! test gets an isolated shared-cache database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tradegate_audit::AuditEvent;
use tradegate_domain::{
    Ad, AdId, AdStatus, ResourceKind, Transaction, TransactionId, TransactionStatus,
};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod memory;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use memory::InMemoryStore;
pub use store::{Change, LifecycleStore};

/// `SQLite`-backed lifecycle store.
pub struct SqlitePersistence {
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a store over a fresh in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Creates a store over a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }
}

impl LifecycleStore for SqlitePersistence {
    fn get_ad(&mut self, id: AdId) -> Result<Ad, PersistenceError> {
        queries::get_ad(&mut self.conn, id)
    }

    fn insert_ad(&mut self, ad: &Ad) -> Result<(), PersistenceError> {
        mutations::insert_ad(&mut self.conn, ad)
    }

    fn save_ad(&mut self, ad: &Ad, expected: AdStatus) -> Result<(), PersistenceError> {
        mutations::save_ad(&mut self.conn, ad, expected)
    }

    fn delete_ad(&mut self, id: AdId) -> Result<(), PersistenceError> {
        mutations::delete_ad(&mut self.conn, id)
    }

    fn get_transaction(&mut self, id: TransactionId) -> Result<Transaction, PersistenceError> {
        queries::get_transaction(&mut self.conn, id)
    }

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), PersistenceError> {
        mutations::insert_transaction(&mut self.conn, transaction)
    }

    fn save_transaction(
        &mut self,
        transaction: &Transaction,
        expected: TransactionStatus,
    ) -> Result<(), PersistenceError> {
        mutations::save_transaction(&mut self.conn, transaction, expected)
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::persist_audit_event(&mut self.conn, event)
    }

    fn persist_change(
        &mut self,
        change: Change<'_>,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        self.conn
            .immediate_transaction(|conn| mutations::persist_change(conn, change, event))
    }

    fn audit_trail(
        &mut self,
        resource: ResourceKind,
        id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit_trail(&mut self.conn, resource, id)
    }
}
