// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;
use time::OffsetDateTime;
use tradegate_domain::{AD_LIFECYCLE, Actor, Ad, TRANSACTION_LIFECYCLE, Transaction, TransitionKind};

/// Transitions the actor could successfully request on this ad right now.
///
/// Reads the same table the mutating operations use. Calling it never
/// changes anything, so repeated calls on the same snapshot agree.
#[must_use]
pub fn list_ad_transitions(ad: &Ad, actor: &Actor) -> BTreeSet<TransitionKind> {
    AD_LIFECYCLE.permitted_from(ad.status, |role| actor.roles().has_role(role))
}

/// Transitions the actor could successfully request on this transaction at `now`.
///
/// `mark_paid` is omitted once the payment window has elapsed.
#[must_use]
pub fn list_transaction_transitions(
    transaction: &Transaction,
    actor: &Actor,
    now: OffsetDateTime,
) -> BTreeSet<TransitionKind> {
    let mut kinds: BTreeSet<TransitionKind> = TRANSACTION_LIFECYCLE
        .permitted_from(transaction.status, |role| actor.roles().has_role(role));
    if transaction.is_expired(now) {
        kinds.remove(&TransitionKind::MarkPaid);
    }
    kinds
}
