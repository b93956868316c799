//! Domain types for expedition and tour bookings.
//!
//! Products come in two shapes, mountain expeditions and tourist packages, that
//! share one bookable core: an id, a category, a stored price per currency and a
//! calendar of dated slots. The shared part lives in [`Listing`] and is reached
//! through the [`Bookable`] trait so the resolver, calculator and builder never
//! need to know which shape they were handed.

use crate::error::{DataShapeError, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a product (expedition or package) as stored upstream
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new `ProductId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a bookable slot
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Creates a new `SlotId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id is how the checkout form represents "nothing selected yet"
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a booking. Minted upstream, never by this crate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a new `BookingId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Currency
// ============================================================================

/// Checkout currency. Selects which stored price field is read; never converts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US dollar
    #[serde(rename = "USD")]
    Usd,
    /// Indian rupee
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    /// Every supported currency
    pub const ALL: [Self; 2] = [Self::Usd, Self::Inr];

    /// ISO 4217 code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Inr => "INR",
        }
    }

    /// Display symbol
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Inr => "₹",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            code if code.eq_ignore_ascii_case("USD") => Ok(Self::Usd),
            code if code.eq_ignore_ascii_case("INR") => Ok(Self::Inr),
            _ => Err(ValidationError::InvalidCurrency(s.to_string())),
        }
    }
}

// ============================================================================
// Money Value Object (minor units: cents / paise)
// ============================================================================

/// An amount in the minor unit of whichever currency it was read for.
///
/// `Money` carries no currency of its own: prices are stored per currency on the
/// product and the currency travels alongside as a separate value.
///
/// Arithmetic happens on minor units; on the wire every amount is a major-unit
/// number (`5000`, `70.5`), the same unit product records use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from minor units
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Creates a `Money` value from whole major units with overflow checking
    #[must_use]
    pub const fn checked_from_major(major: u64) -> Option<Self> {
        match major.checked_mul(100) {
            Some(minor) => Some(Self(minor)),
            None => None,
        }
    }

    /// Parses a major-unit amount as stored upstream (e.g. `70.5`), rounding to
    /// the nearest minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`DataShapeError::InvalidAmount`] for negative, non-finite or
    /// out-of-range values.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn try_from_major(major: f64) -> Result<Self, DataShapeError> {
        let invalid = |reason: &'static str| DataShapeError::InvalidAmount {
            value: major.to_string(),
            reason,
        };

        if !major.is_finite() {
            return Err(invalid("amount is not a finite number"));
        }
        if major < 0.0 {
            return Err(invalid("amount is negative"));
        }

        let minor = (major * 100.0).round();
        if minor >= u64::MAX as f64 {
            return Err(invalid("amount is out of range"));
        }

        Ok(Self(minor as u64))
    }

    /// Returns the amount in minor units
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.0
    }

    /// Returns the whole major units (rounded down)
    #[must_use]
    pub const fn major(&self) -> u64 {
        self.0 / 100
    }

    /// Returns the amount as a major-unit float, for wire formats that store prices that way
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Multiplies by a quantity with overflow checking
    #[must_use]
    pub const fn checked_multiply(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Returns `basis_points / 10_000` of this amount, rounded down to the minor unit
    #[must_use]
    pub fn checked_rate(self, basis_points: u32) -> Option<Self> {
        let scaled = u128::from(self.0) * u128::from(basis_points) / 10_000;
        u64::try_from(scaled).ok().map(Self)
    }

    /// Formats the amount with the currency symbol, e.g. `₹10500.00`
    #[must_use]
    pub fn display_in(&self, currency: Currency) -> String {
        format!("{}{self}", currency.symbol())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major(), self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Self::try_from_major(major).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Product category. International trips require travel documents from every participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Trip within the home country
    Domestic,
    /// Cross-border trip
    International,
}

impl Category {
    /// Whether country and passport are mandatory for participants
    #[must_use]
    pub const fn requires_travel_documents(&self) -> bool {
        matches!(self, Self::International)
    }
}

/// Difficulty grade of a mountain expedition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Suitable for first-time trekkers
    Easy,
    /// Requires reasonable fitness
    Moderate,
    /// Requires prior high-altitude experience
    Challenging,
    /// Technical climbing
    Extreme,
}

// ============================================================================
// Calendar
// ============================================================================

/// The atomic bookable unit: one start time on one date with a fixed capacity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Slot identifier
    pub id: SlotId,
    /// Start time as shown to customers (e.g. "06:00")
    pub time: String,
    /// Maximum participants for this slot
    pub max_participants: u32,
    /// Participants already confirmed
    #[serde(default)]
    pub booked_participants: u32,
    /// Optional price multiplier, carried through for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_multiplier: Option<f64>,
}

impl Slot {
    /// Creates a new `Slot` without a price multiplier
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        time: impl Into<String>,
        max_participants: u32,
        booked_participants: u32,
    ) -> Self {
        Self {
            id: SlotId::new(id),
            time: time.into(),
            max_participants,
            booked_participants,
            price_multiplier: None,
        }
    }

    /// Remaining capacity, clamped at zero
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.max_participants.saturating_sub(self.booked_participants)
    }

    /// Checks if no places remain
    #[must_use]
    pub const fn is_fully_booked(&self) -> bool {
        self.remaining() == 0
    }

    /// Upstream data violates `booked <= max`
    #[must_use]
    pub const fn is_overbooked(&self) -> bool {
        self.booked_participants > self.max_participants
    }
}

/// A calendar date and its slots, in display order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvailableDate {
    /// ISO calendar date
    pub date: NaiveDate,
    /// Slots on this date
    #[serde(default)]
    pub slots: Vec<Slot>,
}

impl AvailableDate {
    /// Creates a new `AvailableDate`
    #[must_use]
    pub const fn new(date: NaiveDate, slots: Vec<Slot>) -> Self {
        Self { date, slots }
    }
}

/// A slot located in a product's calendar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotSelection<'a> {
    /// Date the slot belongs to
    pub date: NaiveDate,
    /// The slot itself
    pub slot: &'a Slot,
}

// ============================================================================
// Products
// ============================================================================

/// Fields every bookable product carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Product identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Domestic or international
    pub category: Category,
    /// Stored INR price per participant
    #[serde(rename = "priceINR")]
    pub price_inr: Money,
    /// Stored USD price per participant
    #[serde(rename = "priceUSD")]
    pub price_usd: Money,
    /// Calendar. `None` when the upstream record lacks `availableDates`.
    #[serde(default)]
    pub available_dates: Option<Vec<AvailableDate>>,
}

impl Listing {
    /// Creates a new `Listing` with an empty calendar
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        price_inr: Money,
        price_usd: Money,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            category,
            price_inr,
            price_usd,
            available_dates: Some(Vec::new()),
        }
    }

    /// Replaces the calendar
    #[must_use]
    pub fn with_dates(mut self, dates: Vec<AvailableDate>) -> Self {
        self.available_dates = Some(dates);
        self
    }
}

/// A guided mountain expedition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountainExpedition {
    /// Shared bookable fields
    #[serde(flatten)]
    pub listing: Listing,
    /// Difficulty grade
    pub difficulty: Difficulty,
    /// Summit altitude in metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<u32>,
}

/// A multi-day tourist package
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouristPackage {
    /// Shared bookable fields
    #[serde(flatten)]
    pub listing: Listing,
    /// Length of the package in days
    pub duration_days: u32,
    /// Places visited
    #[serde(default)]
    pub destinations: Vec<String>,
}

/// Any product the checkout can book
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Product {
    /// Mountain expedition
    Mountain(MountainExpedition),
    /// Tourist package
    TouristPackage(TouristPackage),
}

/// Capabilities shared by every product shape.
pub trait Bookable {
    /// The shared bookable fields
    fn listing(&self) -> &Listing;

    /// Product identifier
    fn id(&self) -> &ProductId {
        &self.listing().id
    }

    /// Display name
    fn name(&self) -> &str {
        &self.listing().name
    }

    /// Product category
    fn category(&self) -> Category {
        self.listing().category
    }

    /// Stored unit price for `currency`. Reads that currency's own field.
    fn unit_price(&self, currency: Currency) -> Money {
        let listing = self.listing();
        match currency {
            Currency::Inr => listing.price_inr,
            Currency::Usd => listing.price_usd,
        }
    }

    /// The product calendar.
    ///
    /// # Errors
    ///
    /// Returns [`DataShapeError::MissingCalendar`] if the record has no `availableDates`.
    fn calendar(&self) -> Result<&[AvailableDate], DataShapeError> {
        self.listing()
            .available_dates
            .as_deref()
            .ok_or_else(|| DataShapeError::MissingCalendar {
                product_id: self.id().clone(),
            })
    }

    /// Finds a slot by id, scanning dates in calendar order. First match wins.
    ///
    /// # Errors
    ///
    /// Returns [`DataShapeError::MissingCalendar`] if the record has no `availableDates`.
    fn find_slot(&self, slot_id: &SlotId) -> Result<Option<SlotSelection<'_>>, DataShapeError> {
        Ok(self.calendar()?.iter().find_map(|day| {
            day.slots
                .iter()
                .find(|slot| slot.id == *slot_id)
                .map(|slot| SlotSelection {
                    date: day.date,
                    slot,
                })
        }))
    }
}

impl Bookable for Listing {
    fn listing(&self) -> &Listing {
        self
    }
}

impl Bookable for MountainExpedition {
    fn listing(&self) -> &Listing {
        &self.listing
    }
}

impl Bookable for TouristPackage {
    fn listing(&self) -> &Listing {
        &self.listing
    }
}

impl Bookable for Product {
    fn listing(&self) -> &Listing {
        match self {
            Self::Mountain(expedition) => &expedition.listing,
            Self::TouristPackage(package) => &package.listing,
        }
    }
}
