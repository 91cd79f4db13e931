// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::TransactionCommand;
use crate::error::CoreError;
use crate::guard::{authorize, edge_for, require_trader};
use crate::state::{TransactionOpening, TransactionTransitionResult, transaction_snapshot};
use time::{Duration, OffsetDateTime};
use tradegate_audit::{Action, ActorSnapshot, AuditEvent, ResourceRef, StateSnapshot};
use tradegate_domain::{
    Actor, Ad, ResourceKind, TRANSACTION_LIFECYCLE, TradeLimits, Transaction, TransactionDraft,
    TransactionId, TransactionStatus, TransitionKind, validate_transaction_draft,
};

fn transaction_ref(id: TransactionId) -> ResourceRef {
    ResourceRef::new(ResourceKind::Transaction, id.to_string())
}

/// Applies a settlement step to a transaction.
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks the role the transition requires (`Unauthorized`)
/// - The transaction's status has no edge for the transition (`InvalidTransition`)
/// - `MarkPaid` is requested after the payment window elapsed (`AlreadyExpired`)
pub fn apply_transaction_transition(
    transaction: &Transaction,
    actor: &Actor,
    command: TransactionCommand,
    now: OffsetDateTime,
) -> Result<TransactionTransitionResult, CoreError> {
    let kind: TransitionKind = command.kind();
    authorize(&TRANSACTION_LIFECYCLE, actor, kind, transaction.status)?;
    let edge = edge_for(&TRANSACTION_LIFECYCLE, transaction.status, kind)?;

    // Expiry blocks payment only; cancelling an expired transaction is allowed.
    let expired_at: Option<OffsetDateTime> = transaction
        .expires_at
        .filter(|deadline| now >= *deadline);
    if let (TransitionKind::MarkPaid, Some(expired_at)) = (kind, expired_at) {
        return Err(CoreError::AlreadyExpired {
            transaction_id: transaction.id.to_string(),
            expired_at,
        });
    }

    let action_name: &'static str = command.action_name();
    let mut new_transaction: Transaction = transaction.clone();
    new_transaction.status = edge.to;
    new_transaction.updated_at = now;

    let details: Option<String> = match command {
        TransactionCommand::MarkPaid { payment_reference } => {
            let reference: Option<String> = payment_reference
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty());
            new_transaction.paid_at = Some(now);
            new_transaction.payment_reference.clone_from(&reference);
            reference.map(|r| format!("Payment reference {r}"))
        }
        TransactionCommand::ReleaseFunds => Some(format!(
            "Released {} to {}",
            transaction.crypto_amount, transaction.buyer
        )),
        TransactionCommand::Cancel => None,
    };

    let audit_event: AuditEvent = AuditEvent::new(
        ActorSnapshot::from(actor),
        transaction_ref(transaction.id),
        Action::new(action_name.to_string(), details),
        transaction_snapshot(transaction),
        transaction_snapshot(&new_transaction),
        now,
    );

    Ok(TransactionTransitionResult {
        new_transaction,
        audit_event,
    })
}

/// Opens a `pending` transaction against a published ad.
///
/// # Errors
///
/// Returns an error if:
/// - The actor holds neither `ROLE_USER` nor `ROLE_ADMIN`
/// - A non-admin actor is not one of the two parties
/// - The draft fails validation against the ad and the trade limits
pub fn open_transaction(
    actor: &Actor,
    id: TransactionId,
    draft: TransactionDraft,
    ad: &Ad,
    limits: &TradeLimits,
    now: OffsetDateTime,
) -> Result<TransactionOpening, CoreError> {
    require_trader(actor, "open a transaction")?;

    let is_party: bool = &draft.buyer == actor.id() || &draft.seller == actor.id();
    if !is_party && !actor.is_admin() {
        return Err(CoreError::Unauthorized {
            actor_id: actor.id().to_string(),
            action: String::from("open a transaction for other parties"),
            required: String::from(tradegate_domain::ROLE_ADMIN),
        });
    }

    let window: Duration = validate_transaction_draft(&draft, ad, limits)?;

    let transaction: Transaction = Transaction {
        id,
        ad_id: draft.ad_id,
        buyer: draft.buyer,
        seller: draft.seller,
        crypto_amount: draft.crypto_amount,
        fiat_amount: draft.fiat_amount,
        status: TransactionStatus::Pending,
        payment_reference: None,
        expires_at: Some(now + window),
        paid_at: None,
        created_at: now,
        updated_at: now,
    };

    let audit_event: AuditEvent = AuditEvent::new(
        ActorSnapshot::from(actor),
        transaction_ref(id),
        Action::new(
            String::from("OpenTransaction"),
            Some(format!(
                "ad {} buyer {} seller {} amount {} expires in {} minutes",
                transaction.ad_id,
                transaction.buyer,
                transaction.seller,
                transaction.crypto_amount,
                window.whole_minutes()
            )),
        ),
        StateSnapshot::absent(),
        transaction_snapshot(&transaction),
        now,
    );

    Ok(TransactionOpening {
        transaction,
        audit_event,
    })
}
