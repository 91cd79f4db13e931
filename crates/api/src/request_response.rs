// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use time::OffsetDateTime;
use tradegate_audit::AuditEvent;
use tradegate_domain::{Ad, Transaction, TransitionKind};

/// Identity carried by every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorCredentials {
    pub actor_id: String,
    /// Role data in any shape: array, JSON-ish string, comma list, scalar or null.
    #[serde(default)]
    pub actor_roles: Value,
}

/// API request to post a new ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAdRequest {
    /// `buy` or `sell`.
    pub direction: String,
    pub amount: Decimal,
    pub price: Decimal,
    pub currency: String,
    #[serde(default)]
    pub min_amount_per_transaction: Option<Decimal>,
    #[serde(default)]
    pub max_amount_per_transaction: Option<Decimal>,
    pub settlement_methods: Vec<String>,
    #[serde(default)]
    pub terms: String,
}

/// Optional data accompanying an ad transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdTransitionRequest {
    /// Rejection reason; ignored by other transitions.
    #[serde(default)]
    pub reason: Option<String>,
}

/// API request to open a transaction against a published ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTransactionRequest {
    pub ad_id: String,
    pub buyer: String,
    pub seller: String,
    pub crypto_amount: Decimal,
    pub fiat_amount: Decimal,
    /// Requested payment window; the configured default applies when absent.
    #[serde(default)]
    pub expiry_minutes: Option<i64>,
}

/// Optional data accompanying a transaction transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTransitionRequest {
    /// Payment reference; ignored by transitions other than `mark_paid`.
    #[serde(default)]
    pub payment_reference: Option<String>,
}

/// API view of an ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdResponse {
    pub id: String,
    pub direction: String,
    pub amount: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub min_amount_per_transaction: Option<Decimal>,
    pub max_amount_per_transaction: Option<Decimal>,
    pub settlement_methods: Vec<String>,
    pub terms: String,
    pub owner: String,
    pub status: String,
    pub admin_note: Option<String>,
    pub approved_by: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
}

impl From<&Ad> for AdResponse {
    fn from(ad: &Ad) -> Self {
        Self {
            id: ad.id.to_string(),
            direction: ad.direction.as_str().to_string(),
            amount: ad.amount,
            price: ad.price,
            currency: ad.currency.clone(),
            min_amount_per_transaction: ad.min_amount_per_transaction,
            max_amount_per_transaction: ad.max_amount_per_transaction,
            settlement_methods: ad.settlement_methods.clone(),
            terms: ad.terms.clone(),
            owner: ad.owner.to_string(),
            status: ad.status.as_str().to_string(),
            admin_note: ad.admin_note.clone(),
            approved_by: ad.approved_by.as_ref().map(ToString::to_string),
            created_at: ad.created_at,
            updated_at: ad.updated_at,
            approved_at: ad.approved_at,
            published_at: ad.published_at,
        }
    }
}

/// API view of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: String,
    pub ad_id: String,
    pub buyer: String,
    pub seller: String,
    pub crypto_amount: Decimal,
    pub fiat_amount: Decimal,
    pub status: String,
    pub payment_reference: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub paid_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&Transaction> for TransactionResponse {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.to_string(),
            ad_id: transaction.ad_id.to_string(),
            buyer: transaction.buyer.to_string(),
            seller: transaction.seller.to_string(),
            crypto_amount: transaction.crypto_amount,
            fiat_amount: transaction.fiat_amount,
            status: transaction.status.as_str().to_string(),
            payment_reference: transaction.payment_reference.clone(),
            expires_at: transaction.expires_at,
            paid_at: transaction.paid_at,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

/// Transitions the requesting actor may take on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionsResponse {
    pub resource: String,
    pub id: String,
    pub status: String,
    /// Sorted, deterministic.
    pub transitions: Vec<String>,
}

impl TransitionsResponse {
    #[must_use]
    pub fn new(resource: &str, id: String, status: &str, kinds: &BTreeSet<TransitionKind>) -> Self {
        Self {
            resource: resource.to_string(),
            id,
            status: status.to_string(),
            transitions: kinds.iter().map(|k| k.as_str().to_string()).collect(),
        }
    }
}

/// API response for a successful administrative delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAdResponse {
    pub id: String,
    pub message: String,
}

/// One entry of a resource's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventResponse {
    pub event_id: Option<i64>,
    pub actor_id: String,
    pub actor_roles: Vec<String>,
    pub action: String,
    pub details: Option<String>,
    pub before: String,
    pub after: String,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl From<AuditEvent> for AuditEventResponse {
    fn from(event: AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id,
            actor_roles: event.actor.roles,
            action: event.action.name,
            details: event.action.details,
            before: event.before.data,
            after: event.after.data,
            recorded_at: event.recorded_at,
        }
    }
}
