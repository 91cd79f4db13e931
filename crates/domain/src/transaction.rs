// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Escrow-style exchange between a buyer and a seller.

use crate::error::DomainError;
use crate::types::{ActorId, AdId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Waiting for the buyer's payment
    Pending,
    /// Payment confirmed, funds held
    Paid,
    /// Funds released to the buyer
    Released,
    /// Reporting status; no transition in this engine produces it
    Completed,
    /// Terminated before settlement
    Cancelled,
    /// Under dispute; resolved outside this engine
    Disputed,
}

impl TransactionStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Paid,
        Self::Released,
        Self::Completed,
        Self::Cancelled,
        Self::Disputed,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Released => "released",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Disputed => "disputed",
        }
    }

    /// Returns true if no transition in this engine leaves this status.
    ///
    /// `Disputed` counts as terminal until a resolution path exists.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Released | Self::Completed | Self::Cancelled | Self::Disputed
        )
    }
}

impl FromStr for TransactionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "released" => Ok(Self::Released),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "disputed" => Ok(Self::Disputed),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields supplied when a buyer and seller agree on an ad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub ad_id: AdId,
    pub buyer: ActorId,
    pub seller: ActorId,
    pub crypto_amount: Decimal,
    pub fiat_amount: Decimal,
    /// Requested expiry window; the configured default applies when absent.
    pub expiry_window: Option<Duration>,
}

/// One exchange instance against an ad.
///
/// Amounts are fixed at creation. Lifecycle transitions only touch
/// `status`, `payment_reference`, `paid_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub ad_id: AdId,
    pub buyer: ActorId,
    pub seller: ActorId,
    pub crypto_amount: Decimal,
    pub fiat_amount: Decimal,
    pub status: TransactionStatus,
    pub payment_reference: Option<String>,
    pub expires_at: Option<OffsetDateTime>,
    pub paid_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Returns true if the transaction has a deadline and it has passed.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }

    /// Whether the actor is the buyer or the seller.
    #[must_use]
    pub fn is_party(&self, actor: &ActorId) -> bool {
        &self.buyer == actor || &self.seller == actor
    }
}
