// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A monetary amount is zero, negative, or outside configured bounds.
    InvalidAmount {
        /// The field that was invalid.
        field: &'static str,
        /// The offending value.
        value: Decimal,
        /// Why the value was rejected.
        reason: String,
    },
    /// The per-transaction bounds of an ad are inconsistent.
    InvalidTransactionBounds {
        /// The minimum per-transaction amount, if set.
        min: Option<Decimal>,
        /// The maximum per-transaction amount, if set.
        max: Option<Decimal>,
        /// The total advertised amount.
        amount: Decimal,
    },
    /// An ad must accept at least one settlement method.
    NoSettlementMethods,
    /// A required text field is empty.
    EmptyField(&'static str),
    /// A status string could not be parsed.
    InvalidStatus {
        /// The unrecognized status.
        status: String,
    },
    /// An ad direction string could not be parsed.
    InvalidDirection(String),
    /// A transition kind string could not be parsed.
    UnknownTransitionKind(String),
    /// A resource kind string could not be parsed.
    UnknownResourceKind(String),
    /// Buyer and seller of a transaction are the same actor.
    SameParty {
        /// The actor on both sides.
        actor_id: String,
    },
    /// The transaction does not line up with the ad it is opened against.
    CounterpartyMismatch {
        /// Description of the mismatch.
        reason: String,
    },
    /// Transactions may only be opened against published ads.
    AdNotOpenForTrading {
        /// The ad's current status.
        status: String,
    },
    /// The requested expiry window is not one of the configured windows.
    InvalidExpiryWindow {
        /// The requested window, in minutes.
        minutes: i64,
        /// The allowed windows, in minutes.
        allowed: Vec<i64>,
    },
    /// Trade limit configuration is inconsistent.
    InvalidLimits(String),
    /// An identifier could not be parsed.
    InvalidIdentifier(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount {
                field,
                value,
                reason,
            } => write!(f, "Invalid {field} '{value}': {reason}"),
            Self::InvalidTransactionBounds { min, max, amount } => {
                let show = |v: &Option<Decimal>| {
                    v.map_or_else(|| String::from("unset"), |d| d.to_string())
                };
                write!(
                    f,
                    "Per-transaction bounds must satisfy min <= max <= amount (min={}, max={}, amount={amount})",
                    show(min),
                    show(max)
                )
            }
            Self::NoSettlementMethods => {
                write!(f, "At least one settlement method must be selected")
            }
            Self::EmptyField(field) => write!(f, "Field '{field}' cannot be empty"),
            Self::InvalidStatus { status } => write!(f, "Invalid status: {status}"),
            Self::InvalidDirection(value) => {
                write!(f, "Invalid ad direction '{value}'. Must be 'buy' or 'sell'")
            }
            Self::UnknownTransitionKind(value) => {
                write!(f, "Unknown transition kind: {value}")
            }
            Self::UnknownResourceKind(value) => write!(f, "Unknown resource kind: {value}"),
            Self::SameParty { actor_id } => {
                write!(f, "Buyer and seller cannot both be '{actor_id}'")
            }
            Self::CounterpartyMismatch { reason } => {
                write!(f, "Counterparty mismatch: {reason}")
            }
            Self::AdNotOpenForTrading { status } => {
                write!(f, "Ad is not open for trading (status: {status})")
            }
            Self::InvalidExpiryWindow { minutes, allowed } => {
                write!(
                    f,
                    "Expiry window of {minutes} minutes is not allowed. Allowed windows: {allowed:?}"
                )
            }
            Self::InvalidLimits(msg) => write!(f, "Invalid trade limits: {msg}"),
            Self::InvalidIdentifier(value) => write!(f, "Invalid identifier: {value}"),
        }
    }
}

impl std::error::Error for DomainError {}
