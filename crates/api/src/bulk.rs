// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk operations over many resources of one kind.
//!
//! Items run one at a time through the single-item operation, so a later item
//! observes every earlier write. A failing item is recorded and the batch
//! carries on. Only a structurally invalid request fails as a whole.

use crate::ads::{delete_ad, transition_ad};
use crate::error::{ApiError, ErrorKind, translate_domain_error};
use crate::transactions::transition_transaction;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use tradegate::{AdCommand, TransactionCommand};
use tradegate_domain::{AD_LIFECYCLE, Actor, ResourceKind, TRANSACTION_LIFECYCLE, TransitionKind};
use tradegate_persistence::LifecycleStore;

/// One operation applied to a list of ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRequest {
    /// `ad`/`ads` or `transaction`/`transactions`.
    pub resource: String,
    /// Transition kind, e.g. `approve` or `mark_paid`.
    pub op: String,
    pub ids: Vec<String>,
    /// Rejection reason, applied to every item.
    #[serde(default)]
    pub reason: Option<String>,
    /// Payment reference, applied to every item.
    #[serde(default)]
    pub payment_reference: Option<String>,
}

/// A single item that did not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// Partition of the requested ids.
///
/// Every requested id appears in exactly one list, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
    /// Ids never attempted because the caller stopped the batch.
    pub abandoned: Vec<String>,
}

/// A validated bulk operation.
#[derive(Debug, Clone, Copy)]
struct BulkPlan {
    resource: ResourceKind,
    kind: TransitionKind,
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::ValidationError {
        field: field.to_string(),
        message,
    }
}

fn plan_bulk(request: &BulkRequest) -> Result<BulkPlan, ApiError> {
    if request.ids.is_empty() {
        return Err(invalid("ids", String::from("at least one id is required")));
    }

    let resource: ResourceKind =
        ResourceKind::from_str(&request.resource).map_err(translate_domain_error)?;
    let kind: TransitionKind =
        TransitionKind::from_str(&request.op).map_err(translate_domain_error)?;

    let defined: bool = match resource {
        ResourceKind::Ad => AD_LIFECYCLE.defines(kind),
        ResourceKind::Transaction => TRANSACTION_LIFECYCLE.defines(kind),
    };
    if !defined {
        return Err(invalid(
            "op",
            format!("operation '{kind}' is not defined for {resource}"),
        ));
    }

    Ok(BulkPlan { resource, kind })
}

fn apply_one<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    plan: BulkPlan,
    request: &BulkRequest,
    id: &str,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    match plan.resource {
        ResourceKind::Ad => {
            if plan.kind == TransitionKind::Delete {
                return delete_ad(store, actor, id, now).map(|_| ());
            }
            let command: AdCommand = AdCommand::for_kind(plan.kind, request.reason.clone())
                .ok_or_else(|| invalid("op", format!("'{}' is not an ad transition", plan.kind)))?;
            transition_ad(store, actor, id, command, now).map(|_| ())
        }
        ResourceKind::Transaction => {
            let command: TransactionCommand =
                TransactionCommand::for_kind(plan.kind, request.payment_reference.clone())
                    .ok_or_else(|| {
                        invalid(
                            "op",
                            format!("'{}' is not a transaction transition", plan.kind),
                        )
                    })?;
            transition_transaction(store, actor, id, command, now).map(|_| ())
        }
    }
}

/// Applies one operation to every id in the request.
///
/// # Errors
///
/// Returns `ValidationError` if the id list is empty, the resource or op is
/// unknown, or the op is not defined for the resource. Per-item errors are
/// reported in the outcome instead.
pub fn apply_bulk<S: LifecycleStore>(
    store: &mut S,
    actor: &Actor,
    request: &BulkRequest,
    now: OffsetDateTime,
) -> Result<BulkOutcome, ApiError> {
    apply_bulk_until(store, actor, request, now, || true)
}

/// Like [`apply_bulk`], but asks `keep_going` before each item.
///
/// Once `keep_going` returns false the remaining ids are reported as
/// abandoned. Items already applied stay applied.
///
/// # Errors
///
/// See [`apply_bulk`].
pub fn apply_bulk_until<S, F>(
    store: &mut S,
    actor: &Actor,
    request: &BulkRequest,
    now: OffsetDateTime,
    mut keep_going: F,
) -> Result<BulkOutcome, ApiError>
where
    S: LifecycleStore,
    F: FnMut() -> bool,
{
    let plan: BulkPlan = plan_bulk(request)?;
    let mut outcome = BulkOutcome::default();

    for (index, id) in request.ids.iter().enumerate() {
        if !keep_going() {
            warn!(
                remaining = request.ids.len() - index,
                "Bulk operation stopped by caller"
            );
            outcome.abandoned.extend(request.ids[index..].iter().cloned());
            break;
        }

        match apply_one(store, actor, plan, request, id, now) {
            Ok(()) => outcome.succeeded.push(id.clone()),
            Err(err) => {
                debug!(id = %id, kind = err.kind().as_str(), "Bulk item failed");
                outcome.failed.push(BulkFailure {
                    id: id.clone(),
                    kind: err.kind(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        actor_id = %actor.id(),
        resource = %plan.resource,
        op = %plan.kind,
        succeeded = outcome.succeeded.len(),
        failed = outcome.failed.len(),
        abandoned = outcome.abandoned.len(),
        "Bulk operation finished"
    );
    Ok(outcome)
}
