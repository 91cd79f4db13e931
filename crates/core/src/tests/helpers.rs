// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use tradegate_domain::{
    Actor, ActorId, Ad, AdDirection, AdDraft, AdId, AdStatus, RawRoles, Transaction,
    TransactionDraft, TransactionId, TransactionStatus,
};

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

pub fn create_test_anonymous() -> Actor {
    Actor::from_raw("visitor", &RawRoles::Absent)
}

pub fn create_test_draft() -> AdDraft {
    AdDraft {
        direction: AdDirection::Sell,
        amount: Decimal::from(100),
        price: Decimal::new(6_250_000, 2),
        currency: String::from("USD"),
        min_amount_per_transaction: Some(Decimal::from(10)),
        max_amount_per_transaction: Some(Decimal::from(50)),
        settlement_methods: vec![String::from("bank-transfer")],
        terms: String::from("Payment within 15 minutes"),
    }
}

pub fn create_test_ad(status: AdStatus) -> Ad {
    let mut ad: Ad = Ad::from_draft(
        AdId::new_random(),
        ActorId::new("seller-1"),
        create_test_draft(),
        create_test_now() - Duration::hours(1),
    );
    ad.status = status;
    ad
}

pub fn create_test_transaction_draft(ad: &Ad) -> TransactionDraft {
    TransactionDraft {
        ad_id: ad.id,
        buyer: ActorId::new("buyer-1"),
        seller: ActorId::new("seller-1"),
        crypto_amount: Decimal::from(20),
        fiat_amount: Decimal::from(1_250_000),
        expiry_window: None,
    }
}

pub fn create_test_transaction(
    status: TransactionStatus,
    expires_at: Option<OffsetDateTime>,
) -> Transaction {
    let created: OffsetDateTime = create_test_now() - Duration::minutes(10);
    Transaction {
        id: TransactionId::new_random(),
        ad_id: AdId::new_random(),
        buyer: ActorId::new("buyer-1"),
        seller: ActorId::new("seller-1"),
        crypto_amount: Decimal::from(20),
        fiat_amount: Decimal::from(1_250_000),
        status,
        payment_reference: None,
        expires_at,
        paid_at: None,
        created_at: created,
        updated_at: created,
    }
}
