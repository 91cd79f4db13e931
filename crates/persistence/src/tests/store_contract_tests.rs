// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Behaviour every `LifecycleStore` must share, run against both adapters.

use super::{create_test_ad, create_test_event, create_test_now, create_test_transaction};
use crate::{Change, InMemoryStore, LifecycleStore, PersistenceError, SqlitePersistence};
use rust_decimal::Decimal;
use time::Duration;
use tradegate_audit::AuditEvent;
use tradegate_domain::{
    ActorId, Ad, AdId, AdStatus, ResourceKind, Transaction, TransactionId, TransactionStatus,
};

fn check_ad_round_trip<S: LifecycleStore>(store: &mut S) {
    let ad: Ad = create_test_ad();
    store.insert_ad(&ad).unwrap();
    assert_eq!(store.get_ad(ad.id).unwrap(), ad);
}

fn check_missing_ad<S: LifecycleStore>(store: &mut S) {
    let id: AdId = AdId::new_random();
    assert!(matches!(
        store.get_ad(id),
        Err(PersistenceError::NotFound {
            resource: ResourceKind::Ad,
            ..
        })
    ));
    assert!(matches!(
        store.delete_ad(id),
        Err(PersistenceError::NotFound { .. })
    ));
}

fn check_duplicate_insert<S: LifecycleStore>(store: &mut S) {
    let ad: Ad = create_test_ad();
    store.insert_ad(&ad).unwrap();
    assert!(matches!(
        store.insert_ad(&ad),
        Err(PersistenceError::AlreadyExists { .. })
    ));
}

fn check_ad_save_and_conflict<S: LifecycleStore>(store: &mut S) {
    let ad: Ad = create_test_ad();
    store.insert_ad(&ad).unwrap();

    let mut approved: Ad = ad.clone();
    approved.status = AdStatus::Approved;
    approved.approved_by = Some(ActorId::new("admin-1"));
    approved.approved_at = Some(create_test_now() + Duration::seconds(1));
    approved.admin_note = Some(String::from("Approved by admin-1"));
    approved.updated_at = create_test_now() + Duration::seconds(1);
    store.save_ad(&approved, AdStatus::Pending).unwrap();
    assert_eq!(store.get_ad(ad.id).unwrap(), approved);

    // A second writer that also observed `pending` loses.
    let mut rejected: Ad = ad.clone();
    rejected.status = AdStatus::Rejected;
    let err = store.save_ad(&rejected, AdStatus::Pending).unwrap_err();
    assert_eq!(
        err,
        PersistenceError::Conflict {
            resource: ResourceKind::Ad,
            id: ad.id.to_string(),
            expected: String::from("pending"),
            actual: String::from("approved"),
        }
    );
    assert_eq!(store.get_ad(ad.id).unwrap().status, AdStatus::Approved);
}

fn check_ad_save_keeps_commercial_fields<S: LifecycleStore>(store: &mut S) {
    let ad: Ad = create_test_ad();
    store.insert_ad(&ad).unwrap();

    let mut tampered: Ad = ad.clone();
    tampered.status = AdStatus::Approved;
    tampered.amount = Decimal::from(999);
    tampered.price = Decimal::ONE;
    store.save_ad(&tampered, AdStatus::Pending).unwrap();

    let stored: Ad = store.get_ad(ad.id).unwrap();
    assert_eq!(stored.status, AdStatus::Approved);
    assert_eq!(stored.amount, ad.amount);
    assert_eq!(stored.price, ad.price);
}

fn check_save_after_delete<S: LifecycleStore>(store: &mut S) {
    let ad: Ad = create_test_ad();
    store.insert_ad(&ad).unwrap();
    store.delete_ad(ad.id).unwrap();

    let mut approved: Ad = ad.clone();
    approved.status = AdStatus::Approved;
    assert!(matches!(
        store.save_ad(&approved, AdStatus::Pending),
        Err(PersistenceError::NotFound { .. })
    ));
}

fn check_transaction_save_and_conflict<S: LifecycleStore>(store: &mut S) {
    let tx: Transaction = create_test_transaction(AdId::new_random());
    store.insert_transaction(&tx).unwrap();
    assert_eq!(store.get_transaction(tx.id).unwrap(), tx);

    let mut paid: Transaction = tx.clone();
    paid.status = TransactionStatus::Paid;
    paid.payment_reference = Some(String::from("REF-1"));
    paid.paid_at = Some(create_test_now());
    paid.crypto_amount = Decimal::from(42);
    store
        .save_transaction(&paid, TransactionStatus::Pending)
        .unwrap();

    let stored: Transaction = store.get_transaction(tx.id).unwrap();
    assert_eq!(stored.status, TransactionStatus::Paid);
    assert_eq!(stored.payment_reference.as_deref(), Some("REF-1"));
    assert_eq!(stored.crypto_amount, tx.crypto_amount);

    let mut cancelled: Transaction = tx.clone();
    cancelled.status = TransactionStatus::Cancelled;
    assert!(matches!(
        store.save_transaction(&cancelled, TransactionStatus::Pending),
        Err(PersistenceError::Conflict { .. })
    ));

    assert!(matches!(
        store.get_transaction(TransactionId::new_random()),
        Err(PersistenceError::NotFound {
            resource: ResourceKind::Transaction,
            ..
        })
    ));
}

fn check_audit_trail<S: LifecycleStore>(store: &mut S) {
    let first: i64 = store
        .record_audit_event(&create_test_event(ResourceKind::Ad, "ad-1", "CreateAd"))
        .unwrap();
    let _other: i64 = store
        .record_audit_event(&create_test_event(
            ResourceKind::Transaction,
            "ad-1",
            "OpenTransaction",
        ))
        .unwrap();
    let second: i64 = store
        .record_audit_event(&create_test_event(ResourceKind::Ad, "ad-1", "ApproveAd"))
        .unwrap();
    assert!(second > first);

    let trail: Vec<AuditEvent> = store.audit_trail(ResourceKind::Ad, "ad-1").unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].event_id, Some(first));
    assert_eq!(trail[0].action.name, "CreateAd");
    assert_eq!(trail[1].event_id, Some(second));
    assert_eq!(trail[1].action.name, "ApproveAd");
    assert_eq!(trail[1].recorded_at, create_test_now());
    assert_eq!(trail[1].actor.roles, vec!["ROLE_ADMIN"]);

    assert!(store.audit_trail(ResourceKind::Ad, "ad-2").unwrap().is_empty());
}

fn check_persist_change_writes_change_and_event<S: LifecycleStore>(store: &mut S) {
    let ad: Ad = create_test_ad();
    let id: String = ad.id.to_string();

    let created: i64 = store
        .persist_change(
            Change::InsertAd(&ad),
            &create_test_event(ResourceKind::Ad, &id, "CreateAd"),
        )
        .unwrap();

    let mut approved: Ad = ad.clone();
    approved.status = AdStatus::Approved;
    let saved: i64 = store
        .persist_change(
            Change::SaveAd {
                ad: &approved,
                expected: AdStatus::Pending,
            },
            &create_test_event(ResourceKind::Ad, &id, "ApproveAd"),
        )
        .unwrap();
    assert!(saved > created);
    assert_eq!(store.get_ad(ad.id).unwrap().status, AdStatus::Approved);

    let trail: Vec<AuditEvent> = store.audit_trail(ResourceKind::Ad, &id).unwrap();
    let names: Vec<&str> = trail.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(names, vec!["CreateAd", "ApproveAd"]);
}

fn check_rejected_change_records_no_event<S: LifecycleStore>(store: &mut S) {
    let ad: Ad = create_test_ad();
    let id: String = ad.id.to_string();
    store.insert_ad(&ad).unwrap();

    let mut published: Ad = ad.clone();
    published.status = AdStatus::Published;
    let err = store
        .persist_change(
            Change::SaveAd {
                ad: &published,
                expected: AdStatus::Approved,
            },
            &create_test_event(ResourceKind::Ad, &id, "PublishAd"),
        )
        .unwrap_err();
    assert!(matches!(err, PersistenceError::Conflict { .. }));

    let missing: AdId = AdId::new_random();
    assert!(matches!(
        store.persist_change(
            Change::DeleteAd(missing),
            &create_test_event(ResourceKind::Ad, &missing.to_string(), "DeleteAd"),
        ),
        Err(PersistenceError::NotFound { .. })
    ));

    let tx: Transaction = create_test_transaction(ad.id);
    let tx_id: String = tx.id.to_string();
    store.insert_transaction(&tx).unwrap();
    let mut paid: Transaction = tx.clone();
    paid.status = TransactionStatus::Paid;
    assert!(
        store
            .persist_change(
                Change::SaveTransaction {
                    transaction: &paid,
                    expected: TransactionStatus::Paid,
                },
                &create_test_event(ResourceKind::Transaction, &tx_id, "MarkPaid"),
            )
            .is_err()
    );

    assert_eq!(store.get_ad(ad.id).unwrap().status, AdStatus::Pending);
    assert_eq!(
        store.get_transaction(tx.id).unwrap().status,
        TransactionStatus::Pending
    );
    assert!(store.audit_trail(ResourceKind::Ad, &id).unwrap().is_empty());
    assert!(
        store
            .audit_trail(ResourceKind::Ad, &missing.to_string())
            .unwrap()
            .is_empty()
    );
    assert!(
        store
            .audit_trail(ResourceKind::Transaction, &tx_id)
            .unwrap()
            .is_empty()
    );
}

macro_rules! store_contract {
    ($($check:ident),* $(,)?) => {
        mod in_memory {
            use super::*;
            $(
                #[test]
                fn $check() {
                    super::$check(&mut InMemoryStore::new());
                }
            )*
        }

        mod sqlite {
            use super::*;
            $(
                #[test]
                fn $check() {
                    super::$check(&mut SqlitePersistence::new_in_memory().unwrap());
                }
            )*
        }
    };
}

store_contract!(
    check_ad_round_trip,
    check_missing_ad,
    check_duplicate_insert,
    check_ad_save_and_conflict,
    check_ad_save_keeps_commercial_fields,
    check_save_after_delete,
    check_transaction_save_and_conflict,
    check_audit_trail,
    check_persist_change_writes_change_and_event,
    check_rejected_change_records_no_event,
);
