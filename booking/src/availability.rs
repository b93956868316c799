//! Selectable participant counts for a chosen slot.
//!
//! Flattens every slot of a product's calendar in date order, looks up the
//! selected slot and offers `1..=remaining` people. With nothing selected yet
//! (or a stale id) the checkout still needs a dropdown, so a permissive default
//! bound is used instead.

use crate::types::{Bookable, SlotId};
use serde::{Deserialize, Serialize};

/// Upper bound offered before a slot is selected
pub const DEFAULT_PARTICIPANT_CAP: u32 = 10;

/// One entry in the participant-count dropdown
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantOption {
    /// Number of people
    pub count: u32,
    /// Human label, e.g. "2 people"
    pub label: String,
}

impl ParticipantOption {
    /// Creates the option for `count` people
    #[must_use]
    pub fn new(count: u32) -> Self {
        Self {
            count,
            label: participant_label(count),
        }
    }
}

/// "1 person", "2 people", ...
#[must_use]
pub fn participant_label(count: u32) -> String {
    if count == 1 {
        "1 person".to_string()
    } else {
        format!("{count} people")
    }
}

/// Resolves remaining capacity and selectable counts for a slot selection.
#[derive(Clone, Copy, Debug)]
pub struct AvailabilityResolver {
    default_cap: u32,
}

impl AvailabilityResolver {
    /// Creates a resolver with a custom fallback bound
    #[must_use]
    pub const fn new(default_cap: u32) -> Self {
        Self { default_cap }
    }

    /// The fallback bound used when no slot is resolved
    #[must_use]
    pub const fn default_cap(&self) -> u32 {
        self.default_cap
    }

    /// Places left for the selection, or the fallback bound when there is no
    /// usable selection. Never fails: a malformed calendar degrades to the
    /// fallback bound.
    pub fn remaining_for<P: Bookable + ?Sized>(
        &self,
        product: &P,
        selected_slot_id: Option<&SlotId>,
    ) -> u32 {
        let Some(slot_id) = selected_slot_id.filter(|id| !id.is_blank()) else {
            return self.default_cap;
        };

        match product.find_slot(slot_id) {
            Ok(Some(selection)) => {
                if selection.slot.is_overbooked() {
                    tracing::warn!(
                        product_id = %product.id(),
                        slot_id = %slot_id,
                        max = selection.slot.max_participants,
                        booked = selection.slot.booked_participants,
                        "Slot is overbooked; treating as full"
                    );
                }
                selection.slot.remaining()
            },
            Ok(None) => {
                tracing::debug!(
                    product_id = %product.id(),
                    slot_id = %slot_id,
                    "Selected slot not in calendar; using default bound"
                );
                self.default_cap
            },
            Err(error) => {
                tracing::warn!(%error, "Unusable product calendar; using default bound");
                self.default_cap
            },
        }
    }

    /// Ordered participant counts `1..=remaining` with labels.
    ///
    /// Empty when the selected slot is fully booked; the caller must then
    /// disable booking.
    pub fn resolve_selectable_counts<P: Bookable + ?Sized>(
        &self,
        product: &P,
        selected_slot_id: Option<&SlotId>,
    ) -> Vec<ParticipantOption> {
        (1..=self.remaining_for(product, selected_slot_id))
            .map(ParticipantOption::new)
            .collect()
    }
}

impl Default for AvailabilityResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PARTICIPANT_CAP)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{AvailableDate, Category, Listing, Money, Slot};
    use chrono::NaiveDate;

    fn listing_with(slots: Vec<Slot>) -> Listing {
        Listing::new(
            "hampta",
            "Hampta Pass",
            Category::Domestic,
            Money::from_minor(500_000),
            Money::from_minor(7_000),
        )
        .with_dates(vec![AvailableDate::new(
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            slots,
        )])
    }

    fn labels(options: &[ParticipantOption]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn partially_booked_slot_offers_remaining_places() {
        let listing = listing_with(vec![Slot::new("am", "06:00", 10, 7)]);
        let options =
            AvailabilityResolver::default().resolve_selectable_counts(&listing, Some(&SlotId::new("am")));

        assert_eq!(labels(&options), ["1 person", "2 people", "3 people"]);
        assert_eq!(options.last().unwrap().count, 3);
    }

    #[test]
    fn fully_booked_slot_offers_nothing() {
        let listing = listing_with(vec![Slot::new("am", "06:00", 10, 10)]);
        let options =
            AvailabilityResolver::default().resolve_selectable_counts(&listing, Some(&SlotId::new("am")));
        assert!(options.is_empty());
    }

    #[test]
    fn overbooked_slot_is_clamped_to_empty() {
        let listing = listing_with(vec![Slot::new("am", "06:00", 8, 11)]);
        let resolver = AvailabilityResolver::default();
        assert_eq!(resolver.remaining_for(&listing, Some(&SlotId::new("am"))), 0);
    }

    #[test]
    fn no_selection_falls_back_to_default_bound() {
        let listing = listing_with(vec![Slot::new("am", "06:00", 4, 0)]);
        let resolver = AvailabilityResolver::default();

        assert_eq!(resolver.resolve_selectable_counts(&listing, None).len(), 10);
        assert_eq!(
            resolver
                .resolve_selectable_counts(&listing, Some(&SlotId::new("")))
                .len(),
            10
        );
        assert_eq!(
            resolver
                .resolve_selectable_counts(&listing, Some(&SlotId::new("stale")))
                .len(),
            10
        );
    }

    #[test]
    fn missing_calendar_degrades_to_default_bound() {
        let mut listing = listing_with(Vec::new());
        listing.available_dates = None;
        let resolver = AvailabilityResolver::new(6);

        assert_eq!(
            resolver
                .resolve_selectable_counts(&listing, Some(&SlotId::new("am")))
                .len(),
            6
        );
    }

    #[test]
    fn labels_pluralise() {
        assert_eq!(participant_label(1), "1 person");
        assert_eq!(participant_label(2), "2 people");
        assert_eq!(participant_label(10), "10 people");
    }
}
