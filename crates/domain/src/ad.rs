// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Advertisement types and status values.
//!
//! An ad is created by its owner in `pending` and from then on only moves
//! through the transitions defined in [`crate::lifecycle::AD_LIFECYCLE`].

use crate::error::DomainError;
use crate::types::{ActorId, AdId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Moderation and publication status of an ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdStatus {
    /// Awaiting moderation
    Pending,
    /// Approved by a moderator, not yet visible
    Approved,
    /// Visible to counterparties
    Published,
    /// Temporarily hidden
    Paused,
    /// Refused by a moderator
    Rejected,
    /// Fully traded
    Completed,
    /// Withdrawn after publication
    Cancelled,
}

impl AdStatus {
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Approved,
        Self::Published,
        Self::Paused,
        Self::Rejected,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Published => "published",
            Self::Paused => "paused",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }
}

impl FromStr for AdStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "published" => Ok(Self::Published),
            "paused" => Ok(Self::Paused),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the owner wants to buy or sell the traded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdDirection {
    Buy,
    Sell,
}

impl AdDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl FromStr for AdDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(DomainError::InvalidDirection(s.to_string())),
        }
    }
}

/// Owner-supplied fields of an ad before it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdDraft {
    pub direction: AdDirection,
    pub amount: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub min_amount_per_transaction: Option<Decimal>,
    pub max_amount_per_transaction: Option<Decimal>,
    pub settlement_methods: Vec<String>,
    pub terms: String,
}

/// A buy or sell offer.
///
/// `status` and the fields that depend on it (`admin_note`, `approved_by`,
/// and the lifecycle timestamps) are written only by lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ad {
    pub id: AdId,
    pub direction: AdDirection,
    pub amount: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub min_amount_per_transaction: Option<Decimal>,
    pub max_amount_per_transaction: Option<Decimal>,
    pub settlement_methods: Vec<String>,
    pub terms: String,
    pub owner: ActorId,
    pub status: AdStatus,
    pub admin_note: Option<String>,
    pub approved_by: Option<ActorId>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub approved_at: Option<OffsetDateTime>,
    pub published_at: Option<OffsetDateTime>,
}

impl Ad {
    /// Materializes a validated draft as a new `pending` ad.
    #[must_use]
    pub fn from_draft(id: AdId, owner: ActorId, draft: AdDraft, now: OffsetDateTime) -> Self {
        Self {
            id,
            direction: draft.direction,
            amount: draft.amount,
            price: draft.price,
            currency: draft.currency,
            min_amount_per_transaction: draft.min_amount_per_transaction,
            max_amount_per_transaction: draft.max_amount_per_transaction,
            settlement_methods: draft.settlement_methods,
            terms: draft.terms,
            owner,
            status: AdStatus::Pending,
            admin_note: None,
            approved_by: None,
            created_at: now,
            updated_at: now,
            approved_at: None,
            published_at: None,
        }
    }
}
