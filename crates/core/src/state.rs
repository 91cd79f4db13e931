// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tradegate_audit::{AuditEvent, StateSnapshot};
use tradegate_domain::{Ad, Transaction};

fn push_field(data: &mut String, name: &str, value: &str) {
    data.push(',');
    data.push_str(name);
    data.push('=');
    data.push_str(value);
}

/// Renders the lifecycle-relevant fields of an ad for the audit log.
#[must_use]
pub fn ad_snapshot(ad: &Ad) -> StateSnapshot {
    let mut data: String = format!("status={}", ad.status);
    if let Some(approved_by) = &ad.approved_by {
        push_field(&mut data, "approved_by", approved_by.value());
    }
    if let Some(note) = &ad.admin_note {
        push_field(&mut data, "admin_note", note);
    }
    StateSnapshot::new(data)
}

/// Renders the lifecycle-relevant fields of a transaction for the audit log.
#[must_use]
pub fn transaction_snapshot(transaction: &Transaction) -> StateSnapshot {
    let mut data: String = format!("status={}", transaction.status);
    if let Some(reference) = &transaction.payment_reference {
        push_field(&mut data, "payment_reference", reference);
    }
    StateSnapshot::new(data)
}

/// The result of a successful ad transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdTransitionResult {
    /// The ad after the transition.
    pub new_ad: Ad,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful transaction transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionTransitionResult {
    pub new_transaction: Transaction,
    pub audit_event: AuditEvent,
}

/// A newly created `pending` ad and its audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdCreation {
    pub ad: Ad,
    pub audit_event: AuditEvent,
}

/// A newly opened `pending` transaction and its audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOpening {
    pub transaction: Transaction,
    pub audit_event: AuditEvent,
}
