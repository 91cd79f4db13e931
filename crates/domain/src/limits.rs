// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use time::Duration;

/// Validation bounds supplied by the configuration collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeLimits {
    /// Smallest tradable amount of the asset.
    pub min_amount: Decimal,
    /// Largest tradable amount of the asset.
    pub max_amount: Decimal,
    /// Smallest acceptable unit price.
    pub min_price: Decimal,
    /// Expiry window applied when a transaction does not request one.
    pub default_expiry: Duration,
    /// Expiry windows a transaction may request.
    pub allowed_expiries: Vec<Duration>,
}

impl TradeLimits {
    /// Builds limits and checks they are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLimits` if:
    /// - any bound is not strictly positive
    /// - `min_amount > max_amount`
    /// - no expiry window is allowed, or the default is not among them
    pub fn new(
        min_amount: Decimal,
        max_amount: Decimal,
        min_price: Decimal,
        default_expiry: Duration,
        allowed_expiries: Vec<Duration>,
    ) -> Result<Self, DomainError> {
        let limits = Self {
            min_amount,
            max_amount,
            min_price,
            default_expiry,
            allowed_expiries,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// Checks the limits are internally consistent.
    ///
    /// # Errors
    ///
    /// See [`TradeLimits::new`].
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_amount <= Decimal::ZERO || self.min_price <= Decimal::ZERO {
            return Err(DomainError::InvalidLimits(String::from(
                "minimum amount and minimum price must be positive",
            )));
        }
        if self.min_amount > self.max_amount {
            return Err(DomainError::InvalidLimits(format!(
                "minimum amount {} exceeds maximum amount {}",
                self.min_amount, self.max_amount
            )));
        }
        if self.allowed_expiries.iter().any(|w| !w.is_positive()) {
            return Err(DomainError::InvalidLimits(String::from(
                "expiry windows must be positive",
            )));
        }
        if !self.allowed_expiries.contains(&self.default_expiry) {
            return Err(DomainError::InvalidLimits(format!(
                "default expiry of {} minutes is not an allowed window",
                self.default_expiry.whole_minutes()
            )));
        }
        Ok(())
    }

    /// Converts a window requested in minutes.
    ///
    /// The window is only range-checked here; whether it is allowed is
    /// decided by `validate_transaction_draft`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidExpiryWindow` if the window cannot be
    /// represented as a `Duration`.
    pub fn requested_window(&self, minutes: i64) -> Result<Duration, DomainError> {
        window_from_minutes(minutes).ok_or_else(|| DomainError::InvalidExpiryWindow {
            minutes,
            allowed: self.allowed_expiry_minutes(),
        })
    }

    /// Allowed windows in whole minutes, for error reporting.
    #[must_use]
    pub fn allowed_expiry_minutes(&self) -> Vec<i64> {
        self.allowed_expiries
            .iter()
            .map(|window| window.whole_minutes())
            .collect()
    }
}

/// A window of `minutes`, or `None` if it overflows a `Duration`.
#[must_use]
pub fn window_from_minutes(minutes: i64) -> Option<Duration> {
    minutes.checked_mul(60).map(Duration::seconds)
}

impl Default for TradeLimits {
    fn default() -> Self {
        Self {
            min_amount: Decimal::new(1, 4),
            max_amount: Decimal::new(1_000_000, 0),
            min_price: Decimal::new(1, 2),
            default_expiry: Duration::minutes(30),
            allowed_expiries: vec![
                Duration::minutes(15),
                Duration::minutes(30),
                Duration::minutes(60),
            ],
        }
    }
}
