// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use tradegate_audit::AuditEvent;
use tradegate_domain::{
    Ad, AdId, AdStatus, ResourceKind, Transaction, TransactionId, TransactionStatus,
};

/// A lifecycle write that is persisted together with its audit event.
#[derive(Debug, Clone, Copy)]
pub enum Change<'a> {
    InsertAd(&'a Ad),
    SaveAd {
        ad: &'a Ad,
        expected: AdStatus,
    },
    DeleteAd(AdId),
    InsertTransaction(&'a Transaction),
    SaveTransaction {
        transaction: &'a Transaction,
        expected: TransactionStatus,
    },
}

impl Change<'_> {
    /// The kind of resource this change writes.
    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        match self {
            Self::InsertAd(_) | Self::SaveAd { .. } | Self::DeleteAd(_) => ResourceKind::Ad,
            Self::InsertTransaction(_) | Self::SaveTransaction { .. } => {
                ResourceKind::Transaction
            }
        }
    }
}

/// The store collaborator every lifecycle operation goes through.
///
/// Saves are compare-and-set on `(id, expected status)`: a save succeeds only
/// if the stored status still equals the status the caller observed when it
/// loaded the snapshot. Saves write lifecycle fields only; amounts, prices
/// and parties are fixed at insert time.
pub trait LifecycleStore {
    /// Loads an ad.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no ad has this id.
    fn get_ad(&mut self, id: AdId) -> Result<Ad, PersistenceError>;

    /// Stores a new ad.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AlreadyExists` if the id is taken.
    fn insert_ad(&mut self, ad: &Ad) -> Result<(), PersistenceError>;

    /// Writes the ad's lifecycle fields if its stored status is `expected`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the stored status differs, or
    /// `PersistenceError::NotFound` if the ad is gone.
    fn save_ad(&mut self, ad: &Ad, expected: AdStatus) -> Result<(), PersistenceError>;

    /// Removes an ad regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no ad has this id.
    fn delete_ad(&mut self, id: AdId) -> Result<(), PersistenceError>;

    /// Loads a transaction.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no transaction has this id.
    fn get_transaction(&mut self, id: TransactionId) -> Result<Transaction, PersistenceError>;

    /// Stores a new transaction.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AlreadyExists` if the id is taken.
    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), PersistenceError>;

    /// Writes the transaction's lifecycle fields if its stored status is `expected`.
    ///
    /// # Errors
    ///
    /// Same as [`LifecycleStore::save_ad`].
    fn save_transaction(
        &mut self,
        transaction: &Transaction,
        expected: TransactionStatus,
    ) -> Result<(), PersistenceError>;

    /// Appends an audit event and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be stored.
    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError>;

    /// Applies `change` and appends `event` as one unit, returning the event id.
    ///
    /// Either both are stored or neither is.
    ///
    /// # Errors
    ///
    /// Returns whatever the change or the audit append fails with; the store
    /// is left as it was.
    fn persist_change(
        &mut self,
        change: Change<'_>,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError>;

    /// All audit events for one resource, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the events cannot be read.
    fn audit_trail(
        &mut self,
        resource: ResourceKind,
        id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError>;
}

impl<S: LifecycleStore + ?Sized> LifecycleStore for Box<S> {
    fn get_ad(&mut self, id: AdId) -> Result<Ad, PersistenceError> {
        (**self).get_ad(id)
    }

    fn insert_ad(&mut self, ad: &Ad) -> Result<(), PersistenceError> {
        (**self).insert_ad(ad)
    }

    fn save_ad(&mut self, ad: &Ad, expected: AdStatus) -> Result<(), PersistenceError> {
        (**self).save_ad(ad, expected)
    }

    fn delete_ad(&mut self, id: AdId) -> Result<(), PersistenceError> {
        (**self).delete_ad(id)
    }

    fn get_transaction(&mut self, id: TransactionId) -> Result<Transaction, PersistenceError> {
        (**self).get_transaction(id)
    }

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), PersistenceError> {
        (**self).insert_transaction(transaction)
    }

    fn save_transaction(
        &mut self,
        transaction: &Transaction,
        expected: TransactionStatus,
    ) -> Result<(), PersistenceError> {
        (**self).save_transaction(transaction, expected)
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        (**self).record_audit_event(event)
    }

    fn persist_change(
        &mut self,
        change: Change<'_>,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        (**self).persist_change(change, event)
    }

    fn audit_trail(
        &mut self,
        resource: ResourceKind,
        id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        (**self).audit_trail(resource, id)
    }
}
