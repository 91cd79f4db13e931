// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store-backed ad operations.
//!
//! Each mutating operation follows the same sequence:
//! load → apply (authorization, then state legality) → compare-and-set save
//! committed together with its audit event. A lookup miss surfaces before
//! authorization is checked.

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::CreateAdRequest;
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::info;
use tradegate::{AdCommand, AdCreation, AdTransitionResult, apply_ad_delete, apply_ad_transition};
use tradegate_audit::AuditEvent;
use tradegate_domain::{Actor, Ad, AdDirection, AdDraft, AdId, ResourceKind, TradeLimits};
use tradegate_persistence::{Change, LifecycleStore};

/// Parses an ad id. A malformed id cannot name a stored ad, so it is reported
/// as not found.
pub(crate) fn parse_ad_id(id: &str) -> Result<AdId, ApiError> {
    AdId::from_str(id).map_err(|_| ApiError::ResourceNotFound {
        resource_type: ResourceKind::Ad.to_string(),
        message: format!("ad {id} does not exist"),
    })
}

fn commit(
    store: &mut impl LifecycleStore,
    change: Change<'_>,
    event: &AuditEvent,
) -> Result<i64, ApiError> {
    store
        .persist_change(change, event)
        .map_err(translate_persistence_error)
}

/// Converts a create request into a domain draft.
///
/// # Errors
///
/// Returns `ValidationError` if the direction is not `buy` or `sell`.
pub fn ad_draft_from_request(request: CreateAdRequest) -> Result<AdDraft, ApiError> {
    let direction: AdDirection =
        AdDirection::from_str(&request.direction).map_err(translate_domain_error)?;
    Ok(AdDraft {
        direction,
        amount: request.amount,
        price: request.price,
        currency: request.currency,
        min_amount_per_transaction: request.min_amount_per_transaction,
        max_amount_per_transaction: request.max_amount_per_transaction,
        settlement_methods: request.settlement_methods,
        terms: request.terms,
    })
}

/// Posts a new ad in `pending`, owned by the actor.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a user or admin (`Unauthorized`)
/// - The draft fails validation (`ValidationError`), in which case nothing is stored
/// - The store fails
pub fn create_ad<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    draft: AdDraft,
    limits: &TradeLimits,
    now: OffsetDateTime,
) -> Result<Ad, ApiError> {
    let creation: AdCreation = tradegate::create_ad(actor, AdId::new_random(), draft, limits, now)
        .map_err(translate_core_error)?;

    let event_id: i64 = commit(
        store,
        Change::InsertAd(&creation.ad),
        &creation.audit_event,
    )?;

    info!(
        actor_id = %actor.id(),
        ad_id = %creation.ad.id,
        event_id,
        "Created ad"
    );
    Ok(creation.ad)
}

/// Loads an ad.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn get_ad<S: LifecycleStore>(store: &mut S, id: &str) -> Result<Ad, ApiError> {
    let ad_id: AdId = parse_ad_id(id)?;
    store.get_ad(ad_id).map_err(translate_persistence_error)
}

/// Applies a status change to a stored ad.
///
/// # Errors
///
/// In order of precedence: `ResourceNotFound`, `Unauthorized`,
/// `InvalidTransition`, `Conflict`.
pub fn transition_ad<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    id: &str,
    command: AdCommand,
    now: OffsetDateTime,
) -> Result<Ad, ApiError> {
    let ad: Ad = get_ad(store, id)?;
    let action: &'static str = command.action_name();

    let result: AdTransitionResult =
        apply_ad_transition(&ad, actor, command, now).map_err(translate_core_error)?;

    let change = Change::SaveAd {
        ad: &result.new_ad,
        expected: ad.status,
    };
    let event_id: i64 = commit(store, change, &result.audit_event)?;

    info!(
        actor_id = %actor.id(),
        ad_id = %ad.id,
        from = %ad.status,
        to = %result.new_ad.status,
        event_id,
        "{action}"
    );
    Ok(result.new_ad)
}

/// Removes an ad from any status.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id or `Unauthorized` for a
/// non-admin actor.
pub fn delete_ad<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    id: &str,
    now: OffsetDateTime,
) -> Result<AdId, ApiError> {
    let ad: Ad = get_ad(store, id)?;
    let event: AuditEvent = apply_ad_delete(&ad, actor, now).map_err(translate_core_error)?;

    let event_id: i64 = commit(store, Change::DeleteAd(ad.id), &event)?;

    info!(actor_id = %actor.id(), ad_id = %ad.id, status = %ad.status, event_id, "Deleted ad");
    Ok(ad.id)
}
