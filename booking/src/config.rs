//! Configuration for the booking flow.
//!
//! Loaded from environment variables with sensible defaults. The base
//! package price is configuration, not a business rule baked into the
//! pricing engine.

use crate::types::Money;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Booking flow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Fixed base package price charged for every booking
    pub base_price: Money,
    /// How long the simulated payment gateway takes to settle
    pub settle_delay: Duration,
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// - `EVENTURE_BASE_PRICE`: currency string, e.g. `$1,999.00`
    /// - `EVENTURE_PAYMENT_DELAY_MS`: settle delay in milliseconds
    ///
    /// Missing or unparsable values fall back to the defaults; an
    /// unparsable value is logged.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_price = match env::var("EVENTURE_BASE_PRICE") {
            Ok(raw) => Money::parse(&raw).unwrap_or_else(|err| {
                tracing::warn!(%err, raw, "invalid EVENTURE_BASE_PRICE, using default");
                defaults.base_price
            }),
            Err(_) => defaults.base_price,
        };

        let settle_delay = env::var("EVENTURE_PAYMENT_DELAY_MS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(defaults.settle_delay, Duration::from_millis);

        Self {
            base_price,
            settle_delay,
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            // $1,999.00
            base_price: Money::from_cents(199_900),
            settle_delay: Duration::from_millis(1500),
        }
    }
}
