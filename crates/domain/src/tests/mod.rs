// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{Ad, AdDirection, AdDraft, AdId, AdStatus, ActorId};
use rust_decimal::Decimal;
use time::OffsetDateTime;

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
        OffsetDateTime::now_utc(),
    );
    ad.status = status;
    ad
}
