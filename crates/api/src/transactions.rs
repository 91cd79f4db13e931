// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store-backed transaction operations.

use crate::ads::parse_ad_id;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::OpenTransactionRequest;
use std::str::FromStr;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};
use tradegate::{
    CoreError, TransactionCommand, TransactionOpening, TransactionTransitionResult,
    apply_transaction_transition,
};
use tradegate_domain::{
    Actor, ActorId, Ad, ResourceKind, TradeLimits, Transaction, TransactionDraft, TransactionId,
};
use tradegate_persistence::{Change, LifecycleStore};

fn parse_transaction_id(id: &str) -> Result<TransactionId, ApiError> {
    TransactionId::from_str(id).map_err(|_| ApiError::ResourceNotFound {
        resource_type: ResourceKind::Transaction.to_string(),
        message: format!("transaction {id} does not exist"),
    })
}

/// Converts an open request into a domain draft.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the ad id is malformed, or `ValidationError`
/// if the requested expiry window is out of range.
pub fn transaction_draft_from_request(
    request: &OpenTransactionRequest,
    limits: &TradeLimits,
) -> Result<TransactionDraft, ApiError> {
    let expiry_window: Option<Duration> = request
        .expiry_minutes
        .map(|minutes| limits.requested_window(minutes))
        .transpose()
        .map_err(translate_domain_error)?;

    Ok(TransactionDraft {
        ad_id: parse_ad_id(&request.ad_id)?,
        buyer: ActorId::new(&request.buyer),
        seller: ActorId::new(&request.seller),
        crypto_amount: request.crypto_amount,
        fiat_amount: request.fiat_amount,
        expiry_window,
    })
}

/// Opens a `pending` transaction against a published ad.
///
/// # Errors
///
/// Returns an error if:
/// - The ad does not exist (`ResourceNotFound`)
/// - The actor is not a user or admin, or is not a party (`Unauthorized`)
/// - The draft fails validation (`ValidationError`)
pub fn open_transaction<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    draft: TransactionDraft,
    limits: &TradeLimits,
    now: OffsetDateTime,
) -> Result<Transaction, ApiError> {
    let ad: Ad = store
        .get_ad(draft.ad_id)
        .map_err(translate_persistence_error)?;

    let opening: TransactionOpening = tradegate::open_transaction(
        actor,
        TransactionId::new_random(),
        draft,
        &ad,
        limits,
        now,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = store
        .persist_change(
            Change::InsertTransaction(&opening.transaction),
            &opening.audit_event,
        )
        .map_err(translate_persistence_error)?;

    info!(
        actor_id = %actor.id(),
        transaction_id = %opening.transaction.id,
        ad_id = %ad.id,
        event_id,
        "Opened transaction"
    );
    Ok(opening.transaction)
}

/// Loads a transaction.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn get_transaction<S: LifecycleStore>(
    store: &mut S,
    id: &str,
) -> Result<Transaction, ApiError> {
    let transaction_id: TransactionId = parse_transaction_id(id)?;
    store
        .get_transaction(transaction_id)
        .map_err(translate_persistence_error)
}

/// Applies a settlement step to a stored transaction.
///
/// # Errors
///
/// In order of precedence: `ResourceNotFound`, `Unauthorized`,
/// `InvalidTransition`, `AlreadyExpired`, `Conflict`.
pub fn transition_transaction<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    id: &str,
    command: TransactionCommand,
    now: OffsetDateTime,
) -> Result<Transaction, ApiError> {
    let transaction: Transaction = get_transaction(store, id)?;
    let action: &'static str = command.action_name();

    let result: TransactionTransitionResult =
        match apply_transaction_transition(&transaction, actor, command, now) {
            Ok(result) => result,
            Err(err @ CoreError::AlreadyExpired { .. }) => {
                warn!(transaction_id = %transaction.id, "Payment attempted after expiry");
                return Err(translate_core_error(err));
            }
            Err(err) => return Err(translate_core_error(err)),
        };

    let change = Change::SaveTransaction {
        transaction: &result.new_transaction,
        expected: transaction.status,
    };
    let event_id: i64 = store
        .persist_change(change, &result.audit_event)
        .map_err(translate_persistence_error)?;

    info!(
        actor_id = %actor.id(),
        transaction_id = %transaction.id,
        from = %transaction.status,
        to = %result.new_transaction.status,
        event_id,
        "{action}"
    );
    Ok(result.new_transaction)
}
