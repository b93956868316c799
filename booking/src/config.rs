//! Configuration management for the booking service.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::availability::{AvailabilityResolver, DEFAULT_PARTICIPANT_CAP};
use crate::pricing::{BASIS_POINTS_PER_UNIT, FeeSchedule, PriceCalculator};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Service fee for INR bookings, in basis points
pub const FEE_INR_BPS_VAR: &str = "SUMMIT_FEE_INR_BPS";
/// Service fee for USD bookings, in basis points
pub const FEE_USD_BPS_VAR: &str = "SUMMIT_FEE_USD_BPS";
/// Participant bound offered before a slot is chosen
pub const DEFAULT_PARTICIPANT_CAP_VAR: &str = "SUMMIT_DEFAULT_PARTICIPANT_CAP";
/// Level for this crate's logs when `RUST_LOG` is unset
pub const LOG_LEVEL_VAR: &str = "SUMMIT_LOG_LEVEL";

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A fee rate above 100%
    #[error("{currency} service fee of {bps} bps exceeds 100%")]
    FeeTooHigh {
        /// Currency code
        currency: &'static str,
        /// Configured rate
        bps: u32,
    },
    /// Zero participants offered before slot selection
    #[error("default participant cap must be at least 1")]
    ZeroParticipantCap,
}

/// Booking service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfig {
    /// Service fee rates per currency
    pub fees: FeeSchedule,
    /// Participant bound when no slot is selected
    pub default_participant_cap: u32,
    /// Log level for this crate when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            fees: FeeSchedule::default(),
            default_participant_cap: DEFAULT_PARTICIPANT_CAP,
            log_level: "info".to_string(),
        }
    }
}

impl BookingConfig {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. Missing keys take their
    /// defaults; unparsable values are logged and take their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            fees: FeeSchedule::new(
                parsed(&lookup, FEE_INR_BPS_VAR, defaults.fees.inr_bps),
                parsed(&lookup, FEE_USD_BPS_VAR, defaults.fees.usd_bps),
            ),
            default_participant_cap: parsed(
                &lookup,
                DEFAULT_PARTICIPANT_CAP_VAR,
                defaults.default_participant_cap,
            ),
            log_level: lookup(LOG_LEVEL_VAR)
                .map(|level| level.trim().to_string())
                .filter(|level| !level.is_empty())
                .unwrap_or(defaults.log_level),
        }
    }

    /// Reject values the calculator and resolver cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a fee above 100% or a zero participant cap.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.fees.inr_bps > BASIS_POINTS_PER_UNIT {
            return Err(ConfigError::FeeTooHigh {
                currency: "INR",
                bps: self.fees.inr_bps,
            });
        }
        if self.fees.usd_bps > BASIS_POINTS_PER_UNIT {
            return Err(ConfigError::FeeTooHigh {
                currency: "USD",
                bps: self.fees.usd_bps,
            });
        }
        if self.default_participant_cap == 0 {
            return Err(ConfigError::ZeroParticipantCap);
        }
        Ok(())
    }

    /// Calculator using the configured fee schedule
    #[must_use]
    pub const fn calculator(&self) -> PriceCalculator {
        PriceCalculator::new(self.fees)
    }

    /// Resolver using the configured participant cap
    #[must_use]
    pub const fn resolver(&self) -> AvailabilityResolver {
        AvailabilityResolver::new(self.default_participant_cap)
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(key, value = %raw, "Ignoring unparsable setting; using default");
        default
    })
}
