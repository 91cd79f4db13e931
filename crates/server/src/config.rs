// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Trade limit flags.

use clap::Args;
use rust_decimal::Decimal;
use thiserror::Error;
use time::Duration;
use tradegate_domain::{DomainError, TradeLimits, window_from_minutes};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no allowed expiry windows were given")]
    NoExpiryWindows,
    #[error("expiry window of {0} minutes is out of range")]
    ExpiryOutOfRange(i64),
    #[error("invalid trade limits: {0}")]
    InvalidLimits(#[from] DomainError),
}

/// Validation bounds applied to new ads and transactions.
#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    /// Smallest tradable asset amount
    #[arg(long, default_value = "0.0001")]
    pub min_amount: Decimal,

    /// Largest tradable asset amount
    #[arg(long, default_value = "1000000")]
    pub max_amount: Decimal,

    /// Smallest acceptable unit price
    #[arg(long, default_value = "0.01")]
    pub min_price: Decimal,

    /// Payment window in minutes when a transaction does not request one
    #[arg(long, default_value_t = 30)]
    pub default_expiry_minutes: i64,

    /// Payment windows a transaction may request, in minutes
    #[arg(long, value_delimiter = ',', default_value = "15,30,60")]
    pub allowed_expiry_minutes: Vec<i64>,
}

impl LimitArgs {
    /// Builds validated limits from the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if no window is allowed, a window is out of range, or
    /// the limits are inconsistent.
    pub fn to_limits(&self) -> Result<TradeLimits, ConfigError> {
        if self.allowed_expiry_minutes.is_empty() {
            return Err(ConfigError::NoExpiryWindows);
        }

        let allowed: Vec<Duration> = self
            .allowed_expiry_minutes
            .iter()
            .copied()
            .map(window)
            .collect::<Result<_, _>>()?;

        let limits = TradeLimits::new(
            self.min_amount,
            self.max_amount,
            self.min_price,
            window(self.default_expiry_minutes)?,
            allowed,
        )?;
        Ok(limits)
    }
}

fn window(minutes: i64) -> Result<Duration, ConfigError> {
    window_from_minutes(minutes).ok_or(ConfigError::ExpiryOutOfRange(minutes))
}
