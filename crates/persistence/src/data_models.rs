// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and the text encodings used for decimals and timestamps.

use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tradegate_audit::{Action, ActorSnapshot, AuditEvent, ResourceRef, StateSnapshot};
use tradegate_domain::{
    ActorId, Ad, AdDirection, AdId, AdStatus, ResourceKind, Transaction, TransactionId,
    TransactionStatus,
};

use crate::diesel_schema::{ads, audit_events, transactions};
use crate::error::PersistenceError;

pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid timestamp: {e}")))
}

fn format_optional_timestamp(
    value: Option<OffsetDateTime>,
) -> Result<Option<String>, PersistenceError> {
    value.map(format_timestamp).transpose()
}

fn parse_timestamp(field: &str, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid {field} '{value}': {e}"))
    })
}

fn parse_optional_timestamp(
    field: &str,
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(|v| parse_timestamp(field, v)).transpose()
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid {field} '{value}': {e}"))
    })
}

fn reconstruction<E: std::fmt::Display>(err: E) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}

/// One row of the `ads` table.
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = ads)]
pub struct AdRow {
    pub id: String,
    pub direction: String,
    pub amount: String,
    pub price: String,
    pub currency: String,
    pub min_amount_per_transaction: Option<String>,
    pub max_amount_per_transaction: Option<String>,
    pub settlement_methods_json: String,
    pub terms: String,
    pub owner: String,
    pub status: String,
    pub admin_note: Option<String>,
    pub approved_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub approved_at: Option<String>,
    pub published_at: Option<String>,
}

impl AdRow {
    pub fn from_ad(ad: &Ad) -> Result<Self, PersistenceError> {
        Ok(Self {
            id: ad.id.to_string(),
            direction: ad.direction.as_str().to_string(),
            amount: ad.amount.to_string(),
            price: ad.price.to_string(),
            currency: ad.currency.clone(),
            min_amount_per_transaction: ad.min_amount_per_transaction.map(|d| d.to_string()),
            max_amount_per_transaction: ad.max_amount_per_transaction.map(|d| d.to_string()),
            settlement_methods_json: serde_json::to_string(&ad.settlement_methods)?,
            terms: ad.terms.clone(),
            owner: ad.owner.value().to_string(),
            status: ad.status.as_str().to_string(),
            admin_note: ad.admin_note.clone(),
            approved_by: ad.approved_by.as_ref().map(|a| a.value().to_string()),
            created_at: format_timestamp(ad.created_at)?,
            updated_at: format_timestamp(ad.updated_at)?,
            approved_at: format_optional_timestamp(ad.approved_at)?,
            published_at: format_optional_timestamp(ad.published_at)?,
        })
    }

    pub fn into_ad(self) -> Result<Ad, PersistenceError> {
        Ok(Ad {
            id: AdId::from_str(&self.id).map_err(reconstruction)?,
            direction: AdDirection::from_str(&self.direction).map_err(reconstruction)?,
            amount: parse_decimal("amount", &self.amount)?,
            price: parse_decimal("price", &self.price)?,
            currency: self.currency,
            min_amount_per_transaction: self
                .min_amount_per_transaction
                .as_deref()
                .map(|v| parse_decimal("min_amount_per_transaction", v))
                .transpose()?,
            max_amount_per_transaction: self
                .max_amount_per_transaction
                .as_deref()
                .map(|v| parse_decimal("max_amount_per_transaction", v))
                .transpose()?,
            settlement_methods: serde_json::from_str(&self.settlement_methods_json)?,
            terms: self.terms,
            owner: ActorId::new(&self.owner),
            status: AdStatus::from_str(&self.status).map_err(reconstruction)?,
            admin_note: self.admin_note,
            approved_by: self.approved_by.as_deref().map(ActorId::new),
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            approved_at: parse_optional_timestamp("approved_at", self.approved_at.as_deref())?,
            published_at: parse_optional_timestamp("published_at", self.published_at.as_deref())?,
        })
    }
}

/// One row of the `transactions` table.
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = transactions)]
pub struct TransactionRow {
    pub id: String,
    pub ad_id: String,
    pub buyer: String,
    pub seller: String,
    pub crypto_amount: String,
    pub fiat_amount: String,
    pub status: String,
    pub payment_reference: Option<String>,
    pub expires_at: Option<String>,
    pub paid_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TransactionRow {
    pub fn from_transaction(transaction: &Transaction) -> Result<Self, PersistenceError> {
        Ok(Self {
            id: transaction.id.to_string(),
            ad_id: transaction.ad_id.to_string(),
            buyer: transaction.buyer.value().to_string(),
            seller: transaction.seller.value().to_string(),
            crypto_amount: transaction.crypto_amount.to_string(),
            fiat_amount: transaction.fiat_amount.to_string(),
            status: transaction.status.as_str().to_string(),
            payment_reference: transaction.payment_reference.clone(),
            expires_at: format_optional_timestamp(transaction.expires_at)?,
            paid_at: format_optional_timestamp(transaction.paid_at)?,
            created_at: format_timestamp(transaction.created_at)?,
            updated_at: format_timestamp(transaction.updated_at)?,
        })
    }

    pub fn into_transaction(self) -> Result<Transaction, PersistenceError> {
        Ok(Transaction {
            id: TransactionId::from_str(&self.id).map_err(reconstruction)?,
            ad_id: AdId::from_str(&self.ad_id).map_err(reconstruction)?,
            buyer: ActorId::new(&self.buyer),
            seller: ActorId::new(&self.seller),
            crypto_amount: parse_decimal("crypto_amount", &self.crypto_amount)?,
            fiat_amount: parse_decimal("fiat_amount", &self.fiat_amount)?,
            status: TransactionStatus::from_str(&self.status).map_err(reconstruction)?,
            payment_reference: self.payment_reference,
            expires_at: parse_optional_timestamp("expires_at", self.expires_at.as_deref())?,
            paid_at: parse_optional_timestamp("paid_at", self.paid_at.as_deref())?,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
        })
    }
}

/// One row of the `audit_events` table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub resource_kind: String,
    pub resource_id: String,
    #[allow(dead_code)]
    pub actor_id: String,
    pub actor_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub recorded_at: String,
}

impl AuditEventRow {
    pub fn into_event(self) -> Result<AuditEvent, PersistenceError> {
        let actor: ActorSnapshot = serde_json::from_str(&self.actor_json)?;
        let action: Action = serde_json::from_str(&self.action_json)?;
        let before: StateSnapshot = serde_json::from_str(&self.before_snapshot_json)?;
        let after: StateSnapshot = serde_json::from_str(&self.after_snapshot_json)?;
        let kind: ResourceKind =
            ResourceKind::from_str(&self.resource_kind).map_err(reconstruction)?;

        Ok(AuditEvent::new(
            actor,
            ResourceRef::new(kind, self.resource_id),
            action,
            before,
            after,
            parse_timestamp("recorded_at", &self.recorded_at)?,
        )
        .with_event_id(self.event_id))
    }
}
