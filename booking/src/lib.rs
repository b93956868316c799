//! Expedition and tour checkout.
//!
//! The checkout walks a customer through four steps, each backed by a module
//! here:
//!
//! - **Availability**: [`AvailabilityResolver`] turns the selected slot into the
//!   participant counts the customer may pick.
//! - **Pricing**: [`PriceCalculator`] multiplies the stored price for the chosen
//!   currency by the head count and adds that currency's service fee.
//! - **Participants**: [`ParticipantGroup`] holds organizer and member details and
//!   reports which required fields are still blank.
//! - **Payload**: [`build_booking_payload`] validates the whole checkout and
//!   packages it for payment verification.
//!
//! Once built, a payload enters the [`lifecycle`] reducer, which records it as
//! pending and confirms or cancels it according to the [`PaymentVerifier`].
//!
//! # Example
//!
//! ```ignore
//! let resolver = AvailabilityResolver::default();
//! let options = resolver.resolve_selectable_counts(&product, Some(&slot_id));
//!
//! let quote = PriceCalculator::default().quote(&product, Currency::Inr, 2)?;
//! let payload = build_booking_payload(booking_id, &product, Some(&slot_id), &group, &quote, &customer)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod availability;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod participants;
pub mod payload;
pub mod pricing;
pub mod types;
pub mod verifier;

pub use availability::{AvailabilityResolver, DEFAULT_PARTICIPANT_CAP, ParticipantOption};
pub use config::{BookingConfig, ConfigError};
pub use error::{BookingError, DataShapeError, PricingError, ValidationError};
pub use lifecycle::{
    Booking, BookingAction, BookingEnvironment, BookingReducer, BookingState, BookingStatus,
};
pub use participants::{MissingField, Participant, ParticipantField, ParticipantGroup, ParticipantRole};
pub use payload::{BookingPayload, Customer, SlotSnapshot, build_booking_payload};
pub use pricing::{FeeSchedule, PriceBreakdown, PriceCalculator};
pub use types::{
    AvailableDate, Bookable, BookingId, Category, Currency, Difficulty, Listing, Money,
    MountainExpedition, Product, ProductId, Slot, SlotId, SlotSelection, TouristPackage,
};
pub use verifier::{
    MockPaymentVerifier, PaymentAttempt, PaymentGateway, PaymentMethod, PaymentVerifier,
    VerificationError, VerifiedPayment,
};
