//! Error taxonomy for the booking core.
//!
//! - [`ValidationError`]: user-correctable input problems, rendered by the checkout UI.
//! - [`DataShapeError`]: the upstream record is malformed.
//! - [`PricingError`]: arithmetic left the representable range, or a quote does not add up.
//!
//! [`BookingError`] wraps all three for operations that can hit more than one.

use crate::participants::MissingField;
use crate::types::{ProductId, SlotId};
use thiserror::Error;

/// Input the customer can fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required participant fields are empty
    #[error("{} required participant field(s) missing", .0.len())]
    MissingFields(Vec<MissingField>),

    /// No slot has been chosen
    #[error("no slot selected")]
    NoSlotSelected,

    /// Currency code is not USD or INR
    #[error("unsupported currency '{0}' (expected USD or INR)")]
    InvalidCurrency(String),

    /// The quote and the participant group disagree on head count
    #[error("price was quoted for {quoted} participant(s) but the group has {group}")]
    ParticipantCountMismatch {
        /// Count used for the quote
        quoted: u32,
        /// Count in the participant group
        group: u32,
    },

    /// More participants than places left in the slot
    #[error("requested {requested} participant(s) but only {remaining} place(s) remain")]
    CapacityExceeded {
        /// Requested participants
        requested: u32,
        /// Places left
        remaining: u32,
    },
}

/// The upstream product record is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataShapeError {
    /// Product has no `availableDates`
    #[error("product {product_id} has no availableDates")]
    MissingCalendar {
        /// Offending product
        product_id: ProductId,
    },

    /// Selected slot id does not exist in the calendar
    #[error("slot {slot_id} not found in product {product_id}")]
    SlotNotFound {
        /// Product searched
        product_id: ProductId,
        /// Missing slot
        slot_id: SlotId,
    },

    /// A stored price is not a usable amount
    #[error("invalid amount {value}: {reason}")]
    InvalidAmount {
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Price computation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A quote needs at least one participant
    #[error("participant count must be at least 1")]
    NoParticipants,

    /// Result does not fit in the money range
    #[error("amount overflow while computing {0}")]
    Overflow(&'static str),

    /// A price breakdown that does not add up for the product it is applied to
    #[error("quote is inconsistent: {0} does not match")]
    InconsistentQuote(&'static str),
}

/// Any failure of the booking pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// See [`ValidationError`]
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// See [`DataShapeError`]
    #[error(transparent)]
    DataShape(#[from] DataShapeError),

    /// See [`PricingError`]
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl BookingError {
    /// Whether the customer can resolve this by editing the checkout form
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Pricing(PricingError::NoParticipants))
    }
}
