// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transition listing for UI gating.
//!
//! A listed transition is one the actor could request successfully right now:
//! state-legal and authorized. Listing is read-only and advisory; the
//! mutating operations re-check everything.

use crate::ads::get_ad;
use crate::error::ApiError;
use crate::request_response::TransitionsResponse;
use crate::transactions::get_transaction;
use std::collections::BTreeSet;
use time::OffsetDateTime;
use tradegate::{list_ad_transitions, list_transaction_transitions};
use tradegate_domain::{Actor, Ad, ResourceKind, Transaction, TransitionKind};
use tradegate_persistence::LifecycleStore;

/// A loaded resource whose transitions are being listed.
#[derive(Debug, Clone, Copy)]
pub enum Snapshot<'a> {
    Ad(&'a Ad),
    Transaction(&'a Transaction),
}

/// Transitions the actor may take on `snapshot` at `now`, in a fixed order.
#[must_use]
pub fn list_transitions_for(
    actor: &Actor,
    snapshot: Snapshot<'_>,
    now: OffsetDateTime,
) -> BTreeSet<TransitionKind> {
    match snapshot {
        Snapshot::Ad(ad) => list_ad_transitions(ad, actor),
        Snapshot::Transaction(transaction) => {
            list_transaction_transitions(transaction, actor, now)
        }
    }
}

/// Loads an ad and lists the actor's transitions on it.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn ad_transitions<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    id: &str,
    now: OffsetDateTime,
) -> Result<TransitionsResponse, ApiError> {
    let ad: Ad = get_ad(store, id)?;
    let kinds = list_transitions_for(actor, Snapshot::Ad(&ad), now);
    Ok(TransitionsResponse::new(
        ResourceKind::Ad.as_str(),
        ad.id.to_string(),
        ad.status.as_str(),
        &kinds,
    ))
}

/// Loads a transaction and lists the actor's transitions on it.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn transaction_transitions<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    id: &str,
    now: OffsetDateTime,
) -> Result<TransitionsResponse, ApiError> {
    let transaction: Transaction = get_transaction(store, id)?;
    let kinds = list_transitions_for(actor, Snapshot::Transaction(&transaction), now);
    Ok(TransitionsResponse::new(
        ResourceKind::Transaction.as_str(),
        transaction.id.to_string(),
        transaction.status.as_str(),
        &kinds,
    ))
}
