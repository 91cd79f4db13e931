// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use crate::store::{Change, LifecycleStore};
use std::collections::BTreeMap;
use tracing::debug;
use tradegate_audit::AuditEvent;
use tradegate_domain::{
    Ad, AdId, AdStatus, ResourceKind, Transaction, TransactionId, TransactionStatus,
};

/// A process-local store.
///
/// Used by tests and by the server when no database path is configured.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    ads: BTreeMap<AdId, Ad>,
    transactions: BTreeMap<TransactionId, Transaction>,
    audit_events: Vec<AuditEvent>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_event_id(&self) -> Result<i64, PersistenceError> {
        i64::try_from(self.audit_events.len())
            .ok()
            .and_then(|len| len.checked_add(1))
            .ok_or_else(|| PersistenceError::DatabaseError(String::from("audit log is full")))
    }
}

fn conflict(resource: ResourceKind, id: String, expected: &str, actual: &str) -> PersistenceError {
    PersistenceError::Conflict {
        resource,
        id,
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

impl LifecycleStore for InMemoryStore {
    fn get_ad(&mut self, id: AdId) -> Result<Ad, PersistenceError> {
        self.ads
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound {
                resource: ResourceKind::Ad,
                id: id.to_string(),
            })
    }

    fn insert_ad(&mut self, ad: &Ad) -> Result<(), PersistenceError> {
        if self.ads.contains_key(&ad.id) {
            return Err(PersistenceError::AlreadyExists {
                resource: ResourceKind::Ad,
                id: ad.id.to_string(),
            });
        }
        self.ads.insert(ad.id, ad.clone());
        Ok(())
    }

    fn save_ad(&mut self, ad: &Ad, expected: AdStatus) -> Result<(), PersistenceError> {
        let stored: &mut Ad = self
            .ads
            .get_mut(&ad.id)
            .ok_or_else(|| PersistenceError::NotFound {
                resource: ResourceKind::Ad,
                id: ad.id.to_string(),
            })?;
        if stored.status != expected {
            return Err(conflict(
                ResourceKind::Ad,
                ad.id.to_string(),
                expected.as_str(),
                stored.status.as_str(),
            ));
        }

        stored.status = ad.status;
        stored.admin_note.clone_from(&ad.admin_note);
        stored.approved_by.clone_from(&ad.approved_by);
        stored.updated_at = ad.updated_at;
        stored.approved_at = ad.approved_at;
        stored.published_at = ad.published_at;
        debug!(ad_id = %ad.id, status = %ad.status, "Saved ad");
        Ok(())
    }

    fn delete_ad(&mut self, id: AdId) -> Result<(), PersistenceError> {
        self.ads
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PersistenceError::NotFound {
                resource: ResourceKind::Ad,
                id: id.to_string(),
            })
    }

    fn get_transaction(&mut self, id: TransactionId) -> Result<Transaction, PersistenceError> {
        self.transactions
            .get(&id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound {
                resource: ResourceKind::Transaction,
                id: id.to_string(),
            })
    }

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), PersistenceError> {
        if self.transactions.contains_key(&transaction.id) {
            return Err(PersistenceError::AlreadyExists {
                resource: ResourceKind::Transaction,
                id: transaction.id.to_string(),
            });
        }
        self.transactions
            .insert(transaction.id, transaction.clone());
        Ok(())
    }

    fn save_transaction(
        &mut self,
        transaction: &Transaction,
        expected: TransactionStatus,
    ) -> Result<(), PersistenceError> {
        let stored: &mut Transaction = self
            .transactions
            .get_mut(&transaction.id)
            .ok_or_else(|| PersistenceError::NotFound {
                resource: ResourceKind::Transaction,
                id: transaction.id.to_string(),
            })?;
        if stored.status != expected {
            return Err(conflict(
                ResourceKind::Transaction,
                transaction.id.to_string(),
                expected.as_str(),
                stored.status.as_str(),
            ));
        }

        stored.status = transaction.status;
        stored
            .payment_reference
            .clone_from(&transaction.payment_reference);
        stored.paid_at = transaction.paid_at;
        stored.updated_at = transaction.updated_at;
        debug!(transaction_id = %transaction.id, status = %transaction.status, "Saved transaction");
        Ok(())
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        let event_id: i64 = self.next_event_id()?;
        self.audit_events
            .push(event.clone().with_event_id(event_id));
        Ok(event_id)
    }

    fn persist_change(
        &mut self,
        change: Change<'_>,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        // Every fallible step runs before the first write.
        let event_id: i64 = self.next_event_id()?;
        match change {
            Change::InsertAd(ad) => self.insert_ad(ad)?,
            Change::SaveAd { ad, expected } => self.save_ad(ad, expected)?,
            Change::DeleteAd(id) => self.delete_ad(id)?,
            Change::InsertTransaction(transaction) => self.insert_transaction(transaction)?,
            Change::SaveTransaction {
                transaction,
                expected,
            } => self.save_transaction(transaction, expected)?,
        }
        self.audit_events
            .push(event.clone().with_event_id(event_id));
        Ok(event_id)
    }

    fn audit_trail(
        &mut self,
        resource: ResourceKind,
        id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        Ok(self
            .audit_events
            .iter()
            .filter(|e| e.resource.kind == resource && e.resource.id == id)
            .cloned()
            .collect())
    }
}
