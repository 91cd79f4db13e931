// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `lifecycle`: Ad and transaction lookups
//! - `audit`: Audit trail queries

pub mod audit;
pub mod lifecycle;

pub use audit::audit_trail;
pub use lifecycle::{ad_status, get_ad, get_transaction, transaction_status};
