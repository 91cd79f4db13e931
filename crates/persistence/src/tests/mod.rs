// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod store_contract_tests;

use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use tradegate_audit::{Action, ActorSnapshot, AuditEvent, ResourceRef, StateSnapshot};
use tradegate_domain::{
    ActorId, Ad, AdDirection, AdDraft, AdId, ResourceKind, Transaction, TransactionId,
    TransactionStatus,
};

/// A fixed instant with sub-second precision, to catch lossy timestamp encodings.
pub fn create_test_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(1_767_225_600_123_456_789).unwrap()
}

pub fn create_test_ad() -> Ad {
    Ad::from_draft(
        AdId::new_random(),
        ActorId::new("seller-1"),
        AdDraft {
            direction: AdDirection::Sell,
            amount: Decimal::new(15, 1),
            price: Decimal::new(6_250_012, 2),
            currency: String::from("USD"),
            min_amount_per_transaction: Some(Decimal::new(1, 1)),
            max_amount_per_transaction: None,
            settlement_methods: vec![String::from("bank-transfer"), String::from("cash")],
            terms: String::from("Meet in person"),
        },
        create_test_now(),
    )
}

pub fn create_test_transaction(ad_id: AdId) -> Transaction {
    Transaction {
        id: TransactionId::new_random(),
        ad_id,
        buyer: ActorId::new("buyer-1"),
        seller: ActorId::new("seller-1"),
        crypto_amount: Decimal::new(5, 1),
        fiat_amount: Decimal::new(3_125_006, 2),
        status: TransactionStatus::Pending,
        payment_reference: None,
        expires_at: Some(create_test_now() + Duration::minutes(30)),
        paid_at: None,
        created_at: create_test_now(),
        updated_at: create_test_now(),
    }
}

pub fn create_test_event(kind: ResourceKind, id: &str, name: &str) -> AuditEvent {
    AuditEvent::new(
        ActorSnapshot::new(String::from("admin-1"), vec![String::from("ROLE_ADMIN")]),
        ResourceRef::new(kind, id.to_string()),
        Action::new(name.to_string(), Some(String::from("details"))),
        StateSnapshot::status("pending"),
        StateSnapshot::status("approved"),
        create_test_now(),
    )
}
