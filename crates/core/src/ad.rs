// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::AdCommand;
use crate::error::CoreError;
use crate::guard::{authorize, edge_for, require_trader};
use crate::state::{AdCreation, AdTransitionResult, ad_snapshot};
use time::OffsetDateTime;
use tradegate_audit::{Action, ActorSnapshot, AuditEvent, ResourceRef, StateSnapshot};
use tradegate_domain::{
    AD_LIFECYCLE, Actor, Ad, AdDraft, AdId, ResourceKind, TradeLimits, TransitionKind,
    validate_ad_draft,
};

const DEFAULT_REJECTION_NOTE: &str = "Rejected by administrator";

fn ad_ref(id: AdId) -> ResourceRef {
    ResourceRef::new(ResourceKind::Ad, id.to_string())
}

/// Applies a status change to an ad, producing the new ad and an audit event.
///
/// # Arguments
///
/// * `ad` - The current ad snapshot (immutable)
/// * `actor` - The actor requesting the change
/// * `command` - The requested change
/// * `now` - The time to stamp on the ad and the audit event
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks the role the transition requires (`Unauthorized`)
/// - The ad's status has no edge for the transition (`InvalidTransition`)
pub fn apply_ad_transition(
    ad: &Ad,
    actor: &Actor,
    command: AdCommand,
    now: OffsetDateTime,
) -> Result<AdTransitionResult, CoreError> {
    let kind: TransitionKind = command.kind();
    authorize(&AD_LIFECYCLE, actor, kind, ad.status)?;
    let edge = edge_for(&AD_LIFECYCLE, ad.status, kind)?;

    let mut new_ad: Ad = ad.clone();
    new_ad.status = edge.to;
    new_ad.updated_at = now;

    let details: Option<String> = match &command {
        AdCommand::Approve => {
            let note: String = format!("Approved by {}", actor.id());
            new_ad.approved_by = Some(actor.id().clone());
            new_ad.approved_at = Some(now);
            new_ad.admin_note = Some(note.clone());
            Some(note)
        }
        AdCommand::Publish => {
            new_ad.published_at = Some(now);
            None
        }
        AdCommand::Reject { reason } => {
            let note: String = reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_REJECTION_NOTE)
                .to_string();
            new_ad.admin_note = Some(note.clone());
            Some(note)
        }
        AdCommand::Pause | AdCommand::Complete | AdCommand::Cancel => None,
    };

    let audit_event: AuditEvent = AuditEvent::new(
        ActorSnapshot::from(actor),
        ad_ref(ad.id),
        Action::new(command.action_name().to_string(), details),
        ad_snapshot(ad),
        ad_snapshot(&new_ad),
        now,
    );

    Ok(AdTransitionResult {
        new_ad,
        audit_event,
    })
}

/// Authorizes an administrative delete and produces its audit event.
///
/// Delete has no state guard: any ad may be removed by an actor holding the
/// required role.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` if the actor lacks the required role.
pub fn apply_ad_delete(
    ad: &Ad,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<AuditEvent, CoreError> {
    authorize(&AD_LIFECYCLE, actor, TransitionKind::Delete, ad.status)?;

    Ok(AuditEvent::new(
        ActorSnapshot::from(actor),
        ad_ref(ad.id),
        Action::new(
            String::from("DeleteAd"),
            Some(format!("Deleted while {}", ad.status)),
        ),
        ad_snapshot(ad),
        StateSnapshot::absent(),
        now,
    ))
}

/// Validates a draft and materializes it as a `pending` ad owned by the actor.
///
/// # Errors
///
/// Returns an error if:
/// - The actor holds neither `ROLE_USER` nor `ROLE_ADMIN`
/// - The draft violates the configured trade limits or bound ordering
pub fn create_ad(
    actor: &Actor,
    id: AdId,
    draft: AdDraft,
    limits: &TradeLimits,
    now: OffsetDateTime,
) -> Result<AdCreation, CoreError> {
    require_trader(actor, "create an ad")?;
    validate_ad_draft(&draft, limits)?;

    let ad: Ad = Ad::from_draft(id, actor.id().clone(), draft, now);
    let audit_event: AuditEvent = AuditEvent::new(
        ActorSnapshot::from(actor),
        ad_ref(id),
        Action::new(
            String::from("CreateAd"),
            Some(format!(
                "{} {} {} at {}",
                ad.direction.as_str(),
                ad.amount,
                ad.currency,
                ad.price
            )),
        ),
        StateSnapshot::absent(),
        ad_snapshot(&ad),
        now,
    );

    Ok(AdCreation { ad, audit_event })
}
