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

//! Pure lifecycle logic.
//!
//! Nothing here touches storage or the clock. Callers load a snapshot,
//! pass the current time, and persist whatever comes back.

mod ad;
mod affordances;
mod command;
mod error;
mod guard;
mod state;
mod transaction;

#[cfg(test)]
mod tests;

pub use ad::{apply_ad_delete, apply_ad_transition, create_ad};
pub use affordances::{list_ad_transitions, list_transaction_transitions};
pub use command::{AdCommand, TransactionCommand};
pub use error::CoreError;
pub use state::{
    AdCreation, AdTransitionResult, TransactionOpening, TransactionTransitionResult, ad_snapshot,
    transaction_snapshot,
};
pub use transaction::{apply_transaction_transition, open_transaction};
