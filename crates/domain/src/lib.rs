// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod ad;
mod error;
mod lifecycle;
mod limits;
mod roles;
mod transaction;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use ad::{Ad, AdDirection, AdDraft, AdStatus};
pub use error::DomainError;
pub use lifecycle::{
    AD_LIFECYCLE, Edge, Override, StateMachine, TRANSACTION_LIFECYCLE, TransitionKind,
};
pub use limits::{TradeLimits, window_from_minutes};
pub use roles::{
    ROLE_ADMIN, ROLE_USER, RawRoles, Role, RoleSet, RoleToken, resolve, role_entries,
};
pub use transaction::{Transaction, TransactionDraft, TransactionStatus};
pub use types::{Actor, ActorId, AdId, ResourceKind, TransactionId};
pub use validation::{validate_ad_draft, validate_transaction_bounds, validate_transaction_draft};
