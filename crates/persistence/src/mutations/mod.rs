// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `lifecycle`: Ad and transaction inserts, compare-and-set saves, delete,
//!   and the combined change-plus-audit write
//! - `audit`: Audit event persistence

pub mod audit;
pub mod lifecycle;

pub use audit::persist_audit_event;
pub use lifecycle::{
    delete_ad, insert_ad, insert_transaction, persist_change, save_ad, save_transaction,
};
