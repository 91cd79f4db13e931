// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    AuditOutageStore, create_test_admin, create_test_now, create_test_open_request,
    create_test_user, seed_ad,
};
use crate::{
    ErrorKind, audit_trail, get_transaction, open_transaction, transaction_draft_from_request,
    transition_transaction,
};
use time::Duration;
use tradegate::TransactionCommand;
use tradegate_domain::{AdStatus, TradeLimits, Transaction, TransactionStatus};
use tradegate_persistence::{InMemoryStore, SqlitePersistence};

fn open_pending(store: &mut InMemoryStore) -> Transaction {
    let ad = seed_ad(store, AdStatus::Published);
    let draft =
        transaction_draft_from_request(&create_test_open_request(&ad), &TradeLimits::default())
            .unwrap();
    open_transaction(
        store,
        &create_test_user("buyer-1"),
        draft,
        &TradeLimits::default(),
        create_test_now(),
    )
    .unwrap()
}

fn mark_paid() -> TransactionCommand {
    TransactionCommand::MarkPaid {
        payment_reference: Some(String::from("BANK-REF-001")),
    }
}

#[test]
fn test_open_transaction_sets_pending_and_default_expiry() {
    let mut store = InMemoryStore::new();
    let transaction = open_pending(&mut store);

    assert_eq!(transaction.status, TransactionStatus::Pending);
    assert_eq!(
        transaction.expires_at,
        Some(create_test_now() + Duration::minutes(30))
    );
    assert_eq!(
        get_transaction(&mut store, &transaction.id.to_string()).unwrap(),
        transaction
    );

    let trail = audit_trail(
        &mut store,
        &create_test_admin(),
        "transaction",
        &transaction.id.to_string(),
    )
    .unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, "OpenTransaction");
}

#[test]
fn test_open_transaction_against_unpublished_ad_fails() {
    let mut store = InMemoryStore::new();
    let ad = seed_ad(&mut store, AdStatus::Approved);
    let draft =
        transaction_draft_from_request(&create_test_open_request(&ad), &TradeLimits::default())
            .unwrap();

    let err = open_transaction(
        &mut store,
        &create_test_user("buyer-1"),
        draft,
        &TradeLimits::default(),
        create_test_now(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationError);
}

#[test]
fn test_open_transaction_by_outsider_is_unauthorized() {
    let mut store = InMemoryStore::new();
    let ad = seed_ad(&mut store, AdStatus::Published);
    let draft =
        transaction_draft_from_request(&create_test_open_request(&ad), &TradeLimits::default())
            .unwrap();

    let err = open_transaction(
        &mut store,
        &create_test_user("someone-else"),
        draft,
        &TradeLimits::default(),
        create_test_now(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[test]
fn test_open_transaction_with_unlisted_expiry_is_validation_error() {
    let mut store = InMemoryStore::new();
    let ad = seed_ad(&mut store, AdStatus::Published);
    let mut request = create_test_open_request(&ad);
    request.expiry_minutes = Some(45);
    let draft = transaction_draft_from_request(&request, &TradeLimits::default()).unwrap();

    let err = open_transaction(
        &mut store,
        &create_test_user("buyer-1"),
        draft,
        &TradeLimits::default(),
        create_test_now(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationError);
}

#[test]
fn test_overflowing_expiry_is_validation_error() {
    let ad = seed_ad(&mut InMemoryStore::new(), AdStatus::Published);
    for minutes in [i64::MAX, i64::MIN] {
        let mut request = create_test_open_request(&ad);
        request.expiry_minutes = Some(minutes);

        let err = transaction_draft_from_request(&request, &TradeLimits::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert!(err.to_string().contains("expiry"));
    }
}

#[test]
fn test_open_transaction_for_missing_ad_is_not_found() {
    let mut store = InMemoryStore::new();
    let ad = seed_ad(&mut InMemoryStore::new(), AdStatus::Published);
    let draft =
        transaction_draft_from_request(&create_test_open_request(&ad), &TradeLimits::default())
            .unwrap();

    let err = open_transaction(
        &mut store,
        &create_test_user("buyer-1"),
        draft,
        &TradeLimits::default(),
        create_test_now(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_audit_failure_leaves_transaction_untouched() {
    let mut store = AuditOutageStore::default();
    let transaction = open_pending(&mut store.inner);
    let id = transaction.id.to_string();

    let err = transition_transaction(
        &mut store,
        &create_test_admin(),
        &id,
        mark_paid(),
        create_test_now(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    let stored = get_transaction(&mut store.inner, &id).unwrap();
    assert_eq!(stored.status, TransactionStatus::Pending);
    assert_eq!(stored.payment_reference, None);

    let ad = seed_ad(&mut store.inner, AdStatus::Published);
    let draft =
        transaction_draft_from_request(&create_test_open_request(&ad), &TradeLimits::default())
            .unwrap();
    let err = open_transaction(
        &mut store,
        &create_test_user("buyer-1"),
        draft,
        &TradeLimits::default(),
        create_test_now(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[test]
fn test_expired_transaction_cannot_be_paid_but_can_be_cancelled() {
    let mut store = InMemoryStore::new();
    let admin = create_test_admin();
    let transaction = open_pending(&mut store);
    let id = transaction.id.to_string();
    let later = create_test_now() + Duration::minutes(31);

    let err = transition_transaction(&mut store, &admin, &id, mark_paid(), later).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExpired);
    assert_eq!(
        get_transaction(&mut store, &id).unwrap().status,
        TransactionStatus::Pending
    );

    let cancelled =
        transition_transaction(&mut store, &admin, &id, TransactionCommand::Cancel, later)
            .unwrap();
    assert_eq!(cancelled.status, TransactionStatus::Cancelled);
}

#[test]
fn test_release_then_cancel_is_invalid_transition() {
    let mut store = InMemoryStore::new();
    let admin = create_test_admin();
    let transaction = open_pending(&mut store);
    let id = transaction.id.to_string();
    let now = create_test_now();

    let paid = transition_transaction(&mut store, &admin, &id, mark_paid(), now).unwrap();
    assert_eq!(paid.status, TransactionStatus::Paid);
    assert_eq!(paid.payment_reference.as_deref(), Some("BANK-REF-001"));
    assert_eq!(paid.paid_at, Some(now));

    let released = transition_transaction(
        &mut store,
        &admin,
        &id,
        TransactionCommand::ReleaseFunds,
        now,
    )
    .unwrap();
    assert_eq!(released.status, TransactionStatus::Released);

    let err = transition_transaction(&mut store, &admin, &id, TransactionCommand::Cancel, now)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);

    let actions: Vec<String> = audit_trail(&mut store, &admin, "transaction", &id)
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(actions, vec!["OpenTransaction", "MarkPaid", "ReleaseFunds"]);
}

#[test]
fn test_party_cannot_settle_own_transaction() {
    let mut store = InMemoryStore::new();
    let transaction = open_pending(&mut store);

    for actor in [create_test_user("buyer-1"), create_test_user("seller-1")] {
        let err = transition_transaction(
            &mut store,
            &actor,
            &transaction.id.to_string(),
            mark_paid(),
            create_test_now(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}

#[test]
fn test_amounts_survive_transitions_in_sqlite() {
    let mut store = SqlitePersistence::new_in_memory().unwrap();
    let admin = create_test_admin();
    let ad = seed_ad(&mut store, AdStatus::Published);
    let draft =
        transaction_draft_from_request(&create_test_open_request(&ad), &TradeLimits::default())
            .unwrap();
    let opened = open_transaction(
        &mut store,
        &create_test_user("buyer-1"),
        draft,
        &TradeLimits::default(),
        create_test_now(),
    )
    .unwrap();
    let id = opened.id.to_string();

    transition_transaction(&mut store, &admin, &id, mark_paid(), create_test_now()).unwrap();
    let stored = get_transaction(&mut store, &id).unwrap();

    assert_eq!(stored.status, TransactionStatus::Paid);
    assert_eq!(stored.crypto_amount, opened.crypto_amount);
    assert_eq!(stored.fiat_amount, opened.fiat_amount);
    assert_eq!(stored.expires_at, opened.expires_at);
}
