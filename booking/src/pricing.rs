//! Currency-aware price calculation.
//!
//! `base = unit price × participants`, `fee = rate(currency) × base`,
//! `total = base + fee`. The unit price is whatever the product stores for the
//! chosen currency; switching currency switches the field that is read and never
//! converts one currency's price into the other.

use crate::error::PricingError;
use crate::types::{Bookable, Currency, Money};
use serde::{Deserialize, Serialize};

/// 100% expressed in basis points
pub const BASIS_POINTS_PER_UNIT: u32 = 10_000;

/// Service fee rate per currency, in basis points (500 = 5%).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    /// Fee rate applied to INR bookings
    pub inr_bps: u32,
    /// Fee rate applied to USD bookings
    pub usd_bps: u32,
}

impl FeeSchedule {
    /// Creates a new `FeeSchedule`
    #[must_use]
    pub const fn new(inr_bps: u32, usd_bps: u32) -> Self {
        Self { inr_bps, usd_bps }
    }

    /// Rate for `currency`
    #[must_use]
    pub const fn rate_bps(&self, currency: Currency) -> u32 {
        match currency {
            Currency::Inr => self.inr_bps,
            Currency::Usd => self.usd_bps,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(500, 300)
    }
}

/// Result of [`PriceCalculator::compute_total`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Currency every amount is expressed in
    pub currency: Currency,
    /// Stored price per participant
    pub unit_price: Money,
    /// Head count the quote was made for
    pub participant_count: u32,
    /// `unit_price × participant_count`
    pub base_price: Money,
    /// Currency-specific surcharge on the base price
    pub service_fee: Money,
    /// `base_price + service_fee`
    pub total: Money,
}

impl PriceBreakdown {
    /// Checks that this breakdown was computed from `product`'s stored price in
    /// its currency and that its amounts add up. The fee rate itself is not
    /// checked; it belongs to whichever [`FeeSchedule`] produced the quote.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InconsistentQuote`] naming the first amount that
    /// does not match.
    pub fn verify_for<P: Bookable + ?Sized>(&self, product: &P) -> Result<(), PricingError> {
        if self.unit_price != product.unit_price(self.currency) {
            return Err(PricingError::InconsistentQuote("unit price"));
        }
        if self.unit_price.checked_multiply(self.participant_count) != Some(self.base_price) {
            return Err(PricingError::InconsistentQuote("base price"));
        }
        if self.base_price.checked_add(self.service_fee) != Some(self.total) {
            return Err(PricingError::InconsistentQuote("total"));
        }
        Ok(())
    }
}

/// Computes service fees and totals from a [`FeeSchedule`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PriceCalculator {
    schedule: FeeSchedule,
}

impl PriceCalculator {
    /// Creates a new `PriceCalculator`
    #[must_use]
    pub const fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    /// The fee schedule in use
    #[must_use]
    pub const fn schedule(&self) -> FeeSchedule {
        self.schedule
    }

    /// Service fee for `base_price` in `currency`, rounded down to the minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the fee does not fit in [`Money`].
    pub fn compute_service_fee(
        &self,
        currency: Currency,
        base_price: Money,
    ) -> Result<Money, PricingError> {
        base_price
            .checked_rate(self.schedule.rate_bps(currency))
            .ok_or(PricingError::Overflow("service fee"))
    }

    /// Base price, service fee and total for `participant_count` people.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NoParticipants`] for a zero count and
    /// [`PricingError::Overflow`] if any amount leaves the money range.
    pub fn compute_total(
        &self,
        unit_price: Money,
        participant_count: u32,
        currency: Currency,
    ) -> Result<PriceBreakdown, PricingError> {
        if participant_count == 0 {
            return Err(PricingError::NoParticipants);
        }

        let base_price = unit_price
            .checked_multiply(participant_count)
            .ok_or(PricingError::Overflow("base price"))?;
        let service_fee = self.compute_service_fee(currency, base_price)?;
        let total = base_price
            .checked_add(service_fee)
            .ok_or(PricingError::Overflow("total"))?;

        Ok(PriceBreakdown {
            currency,
            unit_price,
            participant_count,
            base_price,
            service_fee,
            total,
        })
    }

    /// Quote a product in `currency`, reading that currency's stored price.
    ///
    /// # Errors
    ///
    /// Same as [`Self::compute_total`].
    pub fn quote<P: Bookable + ?Sized>(
        &self,
        product: &P,
        currency: Currency,
        participant_count: u32,
    ) -> Result<PriceBreakdown, PricingError> {
        self.compute_total(product.unit_price(currency), participant_count, currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Category, Listing};

    fn rupees(amount: u64) -> Money {
        Money::checked_from_major(amount).unwrap()
    }

    #[test]
    fn inr_quote_matches_checkout_example() {
        let calculator = PriceCalculator::default();
        let breakdown = calculator
            .compute_total(rupees(5_000), 2, Currency::Inr)
            .unwrap();

        assert_eq!(breakdown.base_price, rupees(10_000));
        assert_eq!(breakdown.service_fee, rupees(500));
        assert_eq!(breakdown.total, rupees(10_500));
    }

    #[test]
    fn usd_uses_its_own_rate() {
        let calculator = PriceCalculator::new(FeeSchedule::new(500, 300));
        let fee = calculator
            .compute_service_fee(Currency::Usd, Money::from_minor(14_000))
            .unwrap();
        assert_eq!(fee, Money::from_minor(420));
    }

    #[test]
    fn zero_rate_means_no_fee() {
        let calculator = PriceCalculator::new(FeeSchedule::new(0, 0));
        let breakdown = calculator
            .compute_total(Money::from_minor(7_000), 3, Currency::Usd)
            .unwrap();
        assert!(breakdown.service_fee.is_zero());
        assert_eq!(breakdown.total, breakdown.base_price);
    }

    #[test]
    fn zero_participants_is_rejected() {
        let calculator = PriceCalculator::default();
        assert_eq!(
            calculator.compute_total(rupees(5_000), 0, Currency::Inr),
            Err(PricingError::NoParticipants)
        );
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let calculator = PriceCalculator::default();
        assert_eq!(
            calculator.compute_total(Money::from_minor(u64::MAX), 2, Currency::Inr),
            Err(PricingError::Overflow("base price"))
        );
        assert_eq!(
            calculator.compute_total(Money::from_minor(u64::MAX), 1, Currency::Inr),
            Err(PricingError::Overflow("total"))
        );
    }

    #[test]
    fn breakdown_must_add_up_for_its_product() {
        let listing = Listing::new(
            "chadar",
            "Chadar Trek",
            Category::Domestic,
            rupees(5_000),
            Money::from_minor(7_000),
        );
        let quote = PriceCalculator::default()
            .quote(&listing, Currency::Inr, 2)
            .unwrap();
        assert_eq!(quote.verify_for(&listing), Ok(()));

        let cheap = PriceBreakdown {
            unit_price: Money::from_minor(1),
            base_price: Money::from_minor(1),
            service_fee: Money::ZERO,
            total: Money::ZERO,
            ..quote
        };
        assert_eq!(
            cheap.verify_for(&listing),
            Err(PricingError::InconsistentQuote("unit price"))
        );

        let short_total = PriceBreakdown {
            total: quote.base_price,
            ..quote
        };
        assert_eq!(
            short_total.verify_for(&listing),
            Err(PricingError::InconsistentQuote("total"))
        );

        let wrong_currency = PriceBreakdown {
            currency: Currency::Usd,
            ..quote
        };
        assert_eq!(
            wrong_currency.verify_for(&listing),
            Err(PricingError::InconsistentQuote("unit price"))
        );
    }

    #[test]
    fn quote_reads_the_selected_currency_field() {
        let listing = Listing::new(
            "chadar",
            "Chadar Trek",
            Category::Domestic,
            rupees(5_000),
            Money::from_minor(7_000),
        );
        let calculator = PriceCalculator::default();

        let inr = calculator.quote(&listing, Currency::Inr, 1).unwrap();
        let usd = calculator.quote(&listing, Currency::Usd, 1).unwrap();

        assert_eq!(inr.unit_price, rupees(5_000));
        assert_eq!(usd.unit_price, Money::from_minor(7_000));
        assert_eq!(usd.currency, Currency::Usd);
    }
}
