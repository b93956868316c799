//! Booking payload assembly.
//!
//! Packages a validated checkout (slot, participants, quote, customer) into the
//! JSON-ready payload handed to the payment-verification collaborator. Nothing
//! here talks to the network or mints ids.

use crate::error::{BookingError, DataShapeError, PricingError, ValidationError};
use crate::participants::{Participant, ParticipantGroup};
use crate::pricing::PriceBreakdown;
use crate::types::{Bookable, BookingId, Category, Currency, ProductId, SlotId, SlotSelection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Signed-in account placing the booking
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Auth provider user id, if signed in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Account display name
    pub name: String,
    /// Account email, used for the confirmation mail
    pub email: String,
}

/// Slot as it looked when the booking was built
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSnapshot {
    /// Slot identifier
    pub slot_id: SlotId,
    /// Calendar date
    pub date: NaiveDate,
    /// Start time
    pub time: String,
    /// Capacity of the slot
    pub max_participants: u32,
    /// Participants already booked at snapshot time
    pub booked_participants: u32,
    /// Places left at snapshot time
    pub remaining: u32,
}

impl From<SlotSelection<'_>> for SlotSnapshot {
    fn from(selection: SlotSelection<'_>) -> Self {
        Self {
            slot_id: selection.slot.id.clone(),
            date: selection.date,
            time: selection.slot.time.clone(),
            max_participants: selection.slot.max_participants,
            booked_participants: selection.slot.booked_participants,
            remaining: selection.slot.remaining(),
        }
    }
}

/// Everything the payment-verification collaborator needs to record a booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    /// Caller-supplied booking id
    pub booking_id: BookingId,
    /// Product booked
    pub product_id: ProductId,
    /// Product name at booking time
    pub product_name: String,
    /// Product category
    pub category: Category,
    /// Slot snapshot
    pub slot: SlotSnapshot,
    /// Lead participant
    pub organizer: Participant,
    /// Remaining participants
    pub members: Vec<Participant>,
    /// Head count, organizer included
    pub participant_count: u32,
    /// Account placing the booking
    pub customer: Customer,
    /// Checkout currency
    pub currency: Currency,
    /// Base price, service fee and total
    pub totals: PriceBreakdown,
}

/// Validate a checkout and assemble its [`BookingPayload`].
///
/// Checks run in form order: participant details, slot selection, slot
/// lookup, head count against the quote, the quote against the product's
/// stored price, then head count against the places left in the slot.
///
/// # Errors
///
/// - [`ValidationError::MissingFields`] if any required participant field is blank
/// - [`ValidationError::NoSlotSelected`] if no slot id (or a blank one) is given
/// - [`DataShapeError::MissingCalendar`] / [`DataShapeError::SlotNotFound`] if the
///   slot cannot be located in the product
/// - [`ValidationError::ParticipantCountMismatch`] if `totals` was quoted for a
///   different head count than the group
/// - [`PricingError::InconsistentQuote`] if `totals` was not computed from the
///   product's stored price for its currency, or its amounts do not add up
/// - [`ValidationError::CapacityExceeded`] if the group is larger than the slot's
///   remaining capacity
pub fn build_booking_payload<P: Bookable + ?Sized>(
    booking_id: BookingId,
    product: &P,
    selected_slot_id: Option<&SlotId>,
    group: &ParticipantGroup,
    totals: &PriceBreakdown,
    customer: &Customer,
) -> Result<BookingPayload, BookingError> {
    let result = assemble(booking_id, product, selected_slot_id, group, totals, customer);

    if let Err(error) = &result {
        if error.is_user_correctable() {
            tracing::debug!(product_id = %product.id(), %error, "Checkout not ready");
        } else {
            tracing::warn!(product_id = %product.id(), %error, "Booking payload rejected");
        }
    }

    result
}

fn assemble<P: Bookable + ?Sized>(
    booking_id: BookingId,
    product: &P,
    selected_slot_id: Option<&SlotId>,
    group: &ParticipantGroup,
    totals: &PriceBreakdown,
    customer: &Customer,
) -> Result<BookingPayload, BookingError> {
    let category = product.category();

    let missing = group.missing_fields(category);
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing).into());
    }

    let Some(slot_id) = selected_slot_id.filter(|id| !id.is_blank()) else {
        return Err(ValidationError::NoSlotSelected.into());
    };

    let selection = product
        .find_slot(slot_id)?
        .ok_or_else(|| DataShapeError::SlotNotFound {
            product_id: product.id().clone(),
            slot_id: slot_id.clone(),
        })?;

    let participant_count = group.participant_count();
    if totals.participant_count != participant_count {
        return Err(ValidationError::ParticipantCountMismatch {
            quoted: totals.participant_count,
            group: participant_count,
        }
        .into());
    }

    totals.verify_for(product)?;

    let remaining = selection.slot.remaining();
    if participant_count > remaining {
        return Err(ValidationError::CapacityExceeded {
            requested: participant_count,
            remaining,
        }
        .into());
    }

    Ok(BookingPayload {
        booking_id,
        product_id: product.id().clone(),
        product_name: product.name().to_string(),
        category,
        slot: SlotSnapshot::from(selection),
        organizer: group.organizer.clone(),
        members: group.members.clone(),
        participant_count,
        customer: customer.clone(),
        currency: totals.currency,
        totals: *totals,
    })
}
