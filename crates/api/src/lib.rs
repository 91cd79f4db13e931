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

//! API boundary for the lifecycle engine.
//!
//! Resolves actors, runs the pure core against a [`LifecycleStore`], and
//! translates every lower-layer error into an [`ApiError`] with a stable
//! [`ErrorKind`].
//!
//! [`LifecycleStore`]: tradegate_persistence::LifecycleStore

mod ads;
mod auth;
mod bulk;
mod capabilities;
mod error;
mod history;
mod request_response;
mod transactions;

#[cfg(test)]
mod tests;

pub use ads::{ad_draft_from_request, create_ad, delete_ad, get_ad, transition_ad};
pub use auth::{raw_roles_from_json, resolve_actor};
pub use bulk::{BulkFailure, BulkOutcome, BulkRequest, apply_bulk, apply_bulk_until};
pub use capabilities::{Snapshot, ad_transitions, list_transitions_for, transaction_transitions};
pub use error::{
    ApiError, ErrorKind, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use history::audit_trail;
pub use request_response::{
    ActorCredentials, AdResponse, AdTransitionRequest, AuditEventResponse, CreateAdRequest,
    DeleteAdResponse, OpenTransactionRequest, TransactionResponse, TransactionTransitionRequest,
    TransitionsResponse,
};
pub use transactions::{
    get_transaction, open_transaction, transaction_draft_from_request, transition_transaction,
};
