// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ad::{Ad, AdDirection, AdDraft, AdStatus};
use crate::error::DomainError;
use crate::limits::TradeLimits;
use crate::transaction::TransactionDraft;
use rust_decimal::Decimal;
use time::Duration;

/// Validates an ad draft before anything is stored.
///
/// This function is pure and has no side effects.
///
/// # Errors
///
/// Returns an error if:
/// - `amount` is not positive or lies outside `[min_amount, max_amount]`
/// - `price` is not positive or is below `min_price`
/// - a per-transaction bound is not positive
/// - the bounds violate `min <= max <= amount`
/// - no settlement method is selected
/// - the currency reference is empty
pub fn validate_ad_draft(draft: &AdDraft, limits: &TradeLimits) -> Result<(), DomainError> {
    require_positive("amount", draft.amount)?;
    if draft.amount < limits.min_amount || draft.amount > limits.max_amount {
        return Err(DomainError::InvalidAmount {
            field: "amount",
            value: draft.amount,
            reason: format!(
                "must be between {} and {}",
                limits.min_amount, limits.max_amount
            ),
        });
    }

    require_positive("price", draft.price)?;
    if draft.price < limits.min_price {
        return Err(DomainError::InvalidAmount {
            field: "price",
            value: draft.price,
            reason: format!("must be at least {}", limits.min_price),
        });
    }

    if let Some(min) = draft.min_amount_per_transaction {
        require_positive("min_amount_per_transaction", min)?;
    }
    if let Some(max) = draft.max_amount_per_transaction {
        require_positive("max_amount_per_transaction", max)?;
    }
    validate_transaction_bounds(
        draft.min_amount_per_transaction,
        draft.max_amount_per_transaction,
        draft.amount,
    )?;

    // Rule: at least one non-blank settlement method
    if !draft.settlement_methods.iter().any(|m| !m.trim().is_empty()) {
        return Err(DomainError::NoSettlementMethods);
    }

    if draft.currency.trim().is_empty() {
        return Err(DomainError::EmptyField("currency"));
    }

    Ok(())
}

/// Checks `min <= max <= amount`, treating an unset bound as unconstrained.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransactionBounds` if the ordering is violated.
pub fn validate_transaction_bounds(
    min: Option<Decimal>,
    max: Option<Decimal>,
    amount: Decimal,
) -> Result<(), DomainError> {
    let ordered: bool = match (min, max) {
        (Some(lo), Some(hi)) => lo <= hi && hi <= amount,
        (Some(lo), None) => lo <= amount,
        (None, Some(hi)) => hi <= amount,
        (None, None) => true,
    };

    if ordered {
        Ok(())
    } else {
        Err(DomainError::InvalidTransactionBounds { min, max, amount })
    }
}

/// Validates a transaction draft against the ad it targets.
///
/// Returns the expiry window to apply.
///
/// # Errors
///
/// Returns an error if:
/// - buyer and seller are the same actor
/// - the ad is not `published`
/// - the ad owner is not on the side the ad offers
/// - either amount is not positive
/// - the traded amount falls outside the ad's per-transaction bounds or
///   exceeds the ad's amount
/// - the requested expiry window is not allowed
pub fn validate_transaction_draft(
    draft: &TransactionDraft,
    ad: &Ad,
    limits: &TradeLimits,
) -> Result<Duration, DomainError> {
    if draft.buyer == draft.seller {
        return Err(DomainError::SameParty {
            actor_id: draft.buyer.value().to_string(),
        });
    }

    if ad.status != AdStatus::Published {
        return Err(DomainError::AdNotOpenForTrading {
            status: ad.status.as_str().to_string(),
        });
    }

    // Rule: the ad owner takes the side the ad advertises
    let (owner_side, owner_party) = match ad.direction {
        AdDirection::Sell => ("seller", &draft.seller),
        AdDirection::Buy => ("buyer", &draft.buyer),
    };
    if owner_party != &ad.owner {
        return Err(DomainError::CounterpartyMismatch {
            reason: format!(
                "ad {} is a {} ad, so its owner '{}' must be the {owner_side}",
                ad.id,
                ad.direction.as_str(),
                ad.owner
            ),
        });
    }

    require_positive("crypto_amount", draft.crypto_amount)?;
    require_positive("fiat_amount", draft.fiat_amount)?;

    let below_min: bool = ad
        .min_amount_per_transaction
        .is_some_and(|min| draft.crypto_amount < min);
    let above_max: bool = ad
        .max_amount_per_transaction
        .is_some_and(|max| draft.crypto_amount > max);
    if below_min || above_max || draft.crypto_amount > ad.amount {
        return Err(DomainError::InvalidAmount {
            field: "crypto_amount",
            value: draft.crypto_amount,
            reason: String::from("outside the ad's per-transaction bounds"),
        });
    }

    let window: Duration = draft.expiry_window.unwrap_or(limits.default_expiry);
    if !limits.allowed_expiries.contains(&window) {
        return Err(DomainError::InvalidExpiryWindow {
            minutes: window.whole_minutes(),
            allowed: limits.allowed_expiry_minutes(),
        });
    }

    Ok(window)
}

fn require_positive(field: &'static str, value: Decimal) -> Result<(), DomainError> {
    if value <= Decimal::ZERO {
        return Err(DomainError::InvalidAmount {
            field,
            value,
            reason: String::from("must be greater than zero"),
        });
    }
    Ok(())
}
