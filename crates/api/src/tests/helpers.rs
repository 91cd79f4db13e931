// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rust_decimal::Decimal;
use time::OffsetDateTime;
use tradegate_audit::AuditEvent;
use tradegate_domain::{
    Actor, ActorId, Ad, AdDirection, AdDraft, AdId, AdStatus, RawRoles, ResourceKind,
    Transaction, TransactionId, TransactionStatus,
};
use tradegate_persistence::{Change, InMemoryStore, LifecycleStore, PersistenceError};

use crate::{CreateAdRequest, OpenTransactionRequest};

pub fn create_test_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_767_225_600).unwrap()
}

pub fn create_test_admin() -> Actor {
    Actor::from_raw(
        "admin-123",
        &RawRoles::Sequence(vec![String::from("ROLE_ADMIN")]),
    )
}

pub fn create_test_user(id: &str) -> Actor {
    Actor::from_raw(id, &RawRoles::Text(String::from("ROLE_USER")))
}

pub fn create_test_ad_request() -> CreateAdRequest {
    CreateAdRequest {
        direction: String::from("sell"),
        amount: Decimal::from(100),
        price: Decimal::from(62_500),
        currency: String::from("NGN"),
        min_amount_per_transaction: Some(Decimal::from(10)),
        max_amount_per_transaction: Some(Decimal::from(50)),
        settlement_methods: vec![String::from("bank_transfer")],
        terms: String::from("Pay within the window"),
    }
}

/// Stores an ad owned by `seller-1` directly in `status`, bypassing the
/// lifecycle. No audit event is recorded.
pub fn seed_ad(store: &mut impl LifecycleStore, status: AdStatus) -> Ad {
    let draft = AdDraft {
        direction: AdDirection::Sell,
        amount: Decimal::from(100),
        price: Decimal::from(62_500),
        currency: String::from("NGN"),
        min_amount_per_transaction: Some(Decimal::from(10)),
        max_amount_per_transaction: Some(Decimal::from(50)),
        settlement_methods: vec![String::from("bank_transfer")],
        terms: String::new(),
    };
    let mut ad = Ad::from_draft(
        AdId::new_random(),
        ActorId::new("seller-1"),
        draft,
        create_test_now(),
    );
    ad.status = status;
    store.insert_ad(&ad).unwrap();
    ad
}

pub fn create_test_open_request(ad: &Ad) -> OpenTransactionRequest {
    OpenTransactionRequest {
        ad_id: ad.id.to_string(),
        buyer: String::from("buyer-1"),
        seller: String::from("seller-1"),
        crypto_amount: Decimal::from(20),
        fiat_amount: Decimal::from(1_250_000),
        expiry_minutes: None,
    }
}

/// A store whose `get_ad` hands out a stale snapshot, as if another writer
/// changed the ad between this request's load and save.
#[derive(Debug, Default)]
pub struct RacingStore {
    pub inner: InMemoryStore,
    pub stale: Option<Ad>,
}

impl LifecycleStore for RacingStore {
    fn get_ad(&mut self, id: AdId) -> Result<Ad, PersistenceError> {
        match &self.stale {
            Some(ad) if ad.id == id => Ok(ad.clone()),
            _ => self.inner.get_ad(id),
        }
    }

    fn insert_ad(&mut self, ad: &Ad) -> Result<(), PersistenceError> {
        self.inner.insert_ad(ad)
    }

    fn save_ad(&mut self, ad: &Ad, expected: AdStatus) -> Result<(), PersistenceError> {
        self.inner.save_ad(ad, expected)
    }

    fn delete_ad(&mut self, id: AdId) -> Result<(), PersistenceError> {
        self.inner.delete_ad(id)
    }

    fn get_transaction(&mut self, id: TransactionId) -> Result<Transaction, PersistenceError> {
        self.inner.get_transaction(id)
    }

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), PersistenceError> {
        self.inner.insert_transaction(transaction)
    }

    fn save_transaction(
        &mut self,
        transaction: &Transaction,
        expected: TransactionStatus,
    ) -> Result<(), PersistenceError> {
        self.inner.save_transaction(transaction, expected)
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        self.inner.record_audit_event(event)
    }

    fn persist_change(
        &mut self,
        change: Change<'_>,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        self.inner.persist_change(change, event)
    }

    fn audit_trail(
        &mut self,
        resource: ResourceKind,
        id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        self.inner.audit_trail(resource, id)
    }
}

fn audit_unavailable() -> PersistenceError {
    PersistenceError::DatabaseError(String::from("audit log unavailable"))
}

/// A store whose audit log rejects every append.
///
/// The plain writes still reach `inner`, so any write made outside
/// `persist_change` would show up in it.
#[derive(Debug, Default)]
pub struct AuditOutageStore {
    pub inner: InMemoryStore,
}

impl LifecycleStore for AuditOutageStore {
    fn get_ad(&mut self, id: AdId) -> Result<Ad, PersistenceError> {
        self.inner.get_ad(id)
    }

    fn insert_ad(&mut self, ad: &Ad) -> Result<(), PersistenceError> {
        self.inner.insert_ad(ad)
    }

    fn save_ad(&mut self, ad: &Ad, expected: AdStatus) -> Result<(), PersistenceError> {
        self.inner.save_ad(ad, expected)
    }

    fn delete_ad(&mut self, id: AdId) -> Result<(), PersistenceError> {
        self.inner.delete_ad(id)
    }

    fn get_transaction(&mut self, id: TransactionId) -> Result<Transaction, PersistenceError> {
        self.inner.get_transaction(id)
    }

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), PersistenceError> {
        self.inner.insert_transaction(transaction)
    }

    fn save_transaction(
        &mut self,
        transaction: &Transaction,
        expected: TransactionStatus,
    ) -> Result<(), PersistenceError> {
        self.inner.save_transaction(transaction, expected)
    }

    fn record_audit_event(&mut self, _event: &AuditEvent) -> Result<i64, PersistenceError> {
        Err(audit_unavailable())
    }

    fn persist_change(
        &mut self,
        _change: Change<'_>,
        _event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        Err(audit_unavailable())
    }

    fn audit_trail(
        &mut self,
        resource: ResourceKind,
        id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        self.inner.audit_trail(resource, id)
    }
}
