//! Booking lifecycle after the payload is built.
//!
//! A submitted booking starts `Pending` and waits for the payment verifier.
//! Verification confirms it; rejection or an explicit cancellation cancels it.
//! Statuses only move forward: `Pending → Confirmed`, `Pending → Cancelled`
//! and `Confirmed → Cancelled`. Only an explicit cancellation can cancel a
//! confirmed booking. Gateways retry their callbacks, so a verification or
//! rejection that arrives after the booking left `Pending` is ignored.

use crate::payload::BookingPayload;
use crate::types::BookingId;
use crate::verifier::{PaymentAttempt, PaymentVerifier, VerifiedPayment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use summit_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};

// ============================================================================
// State
// ============================================================================

/// Where a booking is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Submitted, waiting for payment verification
    Pending,
    /// Payment verified
    Confirmed,
    /// Payment rejected or cancelled by the customer
    Cancelled,
}

impl BookingStatus {
    /// Whether moving to `next` is allowed
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled) | (Self::Confirmed, Self::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        })
    }
}

/// A submitted booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking id
    pub id: BookingId,
    /// What was booked and for whom
    pub payload: BookingPayload,
    /// Current status
    pub status: BookingStatus,
    /// Verified payment, once confirmed
    pub payment: Option<VerifiedPayment>,
    /// When the booking was submitted
    pub created_at: DateTime<Utc>,
    /// Last status change
    pub updated_at: DateTime<Utc>,
    /// Why it was cancelled, if it was
    pub cancellation_reason: Option<String>,
}

/// All bookings known to the reducer
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingState {
    /// Bookings by id
    pub bookings: HashMap<BookingId, Booking>,
    /// Last rejected command, for the UI to display
    pub last_error: Option<String>,
}

impl BookingState {
    /// Creates an empty `BookingState`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a booking
    #[must_use]
    pub fn get(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.get(id)
    }

    /// Whether a booking exists
    #[must_use]
    pub fn exists(&self, id: &BookingId) -> bool {
        self.bookings.contains_key(id)
    }

    /// Number of bookings
    #[must_use]
    pub fn count(&self) -> usize {
        self.bookings.len()
    }
}

// ============================================================================
// Actions (Commands + Events)
// ============================================================================

/// Actions for the booking lifecycle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingAction {
    // Commands
    /// Record a booking and hand its payment to the verifier
    SubmitBooking {
        /// Validated booking payload
        payload: BookingPayload,
        /// Payment reported by the client
        attempt: PaymentAttempt,
    },

    /// Cancel a pending or confirmed booking
    CancelBooking {
        /// Booking to cancel
        booking_id: BookingId,
        /// Why
        reason: String,
    },

    // Events
    /// Booking was recorded as pending
    BookingSubmitted {
        /// Booking payload
        payload: BookingPayload,
        /// When submitted
        submitted_at: DateTime<Utc>,
    },

    /// Verifier confirmed the payment
    PaymentVerified {
        /// Booking id
        booking_id: BookingId,
        /// Gateway confirmation
        payment: VerifiedPayment,
    },

    /// Verifier rejected the payment
    PaymentRejected {
        /// Booking id
        booking_id: BookingId,
        /// Verifier's reason
        reason: String,
    },

    /// Booking was cancelled
    BookingCancelled {
        /// Booking id
        booking_id: BookingId,
        /// Why
        reason: String,
        /// When cancelled
        cancelled_at: DateTime<Utc>,
    },

    /// A command was rejected
    ValidationFailed {
        /// Error message
        error: String,
    },
}

// ============================================================================
// Environment
// ============================================================================

/// Environment dependencies for the booking lifecycle
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for timestamps
    pub clock: Arc<dyn Clock>,
    /// Trusted payment verifier
    pub verifier: Arc<dyn PaymentVerifier>,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, verifier: Arc<dyn PaymentVerifier>) -> Self {
        Self { clock, verifier }
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the booking lifecycle
#[derive(Clone, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate_submission(
        state: &BookingState,
        payload: &BookingPayload,
        attempt: &PaymentAttempt,
    ) -> Result<(), String> {
        if state.exists(&payload.booking_id) {
            return Err(format!("Booking {} already submitted", payload.booking_id));
        }
        if attempt.booking_id != payload.booking_id {
            return Err(format!(
                "Payment is for booking {}, not {}",
                attempt.booking_id, payload.booking_id
            ));
        }
        if attempt.currency != payload.currency {
            return Err(format!(
                "Payment currency {} does not match booking currency {}",
                attempt.currency, payload.currency
            ));
        }
        if attempt.amount != payload.totals.total {
            return Err(format!(
                "Payment amount {} does not match booking total {}",
                attempt.amount.display_in(attempt.currency),
                payload.totals.total.display_in(payload.currency)
            ));
        }
        Ok(())
    }

    fn validate_cancellation(state: &BookingState, booking_id: &BookingId) -> Result<(), String> {
        let booking = state
            .get(booking_id)
            .ok_or_else(|| format!("Booking {booking_id} not found"))?;

        if booking.status.can_transition_to(BookingStatus::Cancelled) {
            Ok(())
        } else {
            Err(format!("Booking {booking_id} is already {}", booking.status))
        }
    }

    /// Moves a booking to `next` if the transition is allowed.
    fn transition<'a>(
        state: &'a mut BookingState,
        booking_id: &BookingId,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> Option<&'a mut Booking> {
        let booking = state.bookings.get_mut(booking_id)?;
        if !booking.status.can_transition_to(next) {
            return None;
        }

        tracing::info!(
            booking_id = %booking_id,
            from = %booking.status,
            to = %next,
            "Booking status changed"
        );
        booking.status = next;
        booking.updated_at = at;
        Some(booking)
    }

    /// Applies an event to state
    fn apply_event(state: &mut BookingState, action: &BookingAction, now: DateTime<Utc>) {
        match action {
            BookingAction::BookingSubmitted {
                payload,
                submitted_at,
            } => {
                state.bookings.insert(
                    payload.booking_id.clone(),
                    Booking {
                        id: payload.booking_id.clone(),
                        payload: payload.clone(),
                        status: BookingStatus::Pending,
                        payment: None,
                        created_at: *submitted_at,
                        updated_at: *submitted_at,
                        cancellation_reason: None,
                    },
                );
                state.last_error = None;
                tracing::info!(booking_id = %payload.booking_id, "Booking submitted");
            },

            BookingAction::PaymentVerified {
                booking_id,
                payment,
            } => {
                let current = state.get(booking_id).map(|booking| booking.status);
                match current {
                    Some(BookingStatus::Pending) => {
                        if let Some(booking) =
                            Self::transition(state, booking_id, BookingStatus::Confirmed, now)
                        {
                            booking.payment = Some(payment.clone());
                        }
                        state.last_error = None;
                    },
                    Some(BookingStatus::Confirmed) => {
                        tracing::debug!(booking_id = %booking_id, "Duplicate payment verification ignored");
                    },
                    Some(BookingStatus::Cancelled) => {
                        tracing::warn!(
                            booking_id = %booking_id,
                            transaction_id = %payment.transaction_id,
                            "Payment verified for a cancelled booking"
                        );
                    },
                    None => {
                        tracing::warn!(booking_id = %booking_id, "Payment verified for unknown booking");
                    },
                }
            },

            BookingAction::PaymentRejected { booking_id, reason } => {
                let current = state.get(booking_id).map(|booking| booking.status);
                match current {
                    Some(BookingStatus::Pending) => {
                        if let Some(booking) =
                            Self::transition(state, booking_id, BookingStatus::Cancelled, now)
                        {
                            booking.cancellation_reason = Some(reason.clone());
                        }
                        state.last_error = Some(reason.clone());
                    },
                    Some(BookingStatus::Confirmed) => {
                        tracing::warn!(
                            booking_id = %booking_id,
                            %reason,
                            "Payment rejection after confirmation ignored"
                        );
                    },
                    Some(BookingStatus::Cancelled) => {
                        tracing::debug!(booking_id = %booking_id, "Duplicate payment rejection ignored");
                    },
                    None => {
                        tracing::warn!(booking_id = %booking_id, "Payment rejected for unknown booking");
                    },
                }
            },

            BookingAction::BookingCancelled {
                booking_id,
                reason,
                cancelled_at,
            } => {
                if let Some(booking) =
                    Self::transition(state, booking_id, BookingStatus::Cancelled, *cancelled_at)
                {
                    booking.cancellation_reason = Some(reason.clone());
                }
                state.last_error = None;
            },

            BookingAction::ValidationFailed { error } => {
                tracing::debug!(%error, "Booking command rejected");
                state.last_error = Some(error.clone());
            },

            // Commands don't modify state
            BookingAction::SubmitBooking { .. } | BookingAction::CancelBooking { .. } => {},
        }
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let now = env.clock.now();

        match action {
            // ========== Submit ==========
            BookingAction::SubmitBooking { payload, attempt } => {
                if let Err(error) = Self::validate_submission(state, &payload, &attempt) {
                    Self::apply_event(state, &BookingAction::ValidationFailed { error }, now);
                    return SmallVec::new();
                }

                let booking_id = payload.booking_id.clone();
                Self::apply_event(
                    state,
                    &BookingAction::BookingSubmitted {
                        payload,
                        submitted_at: now,
                    },
                    now,
                );

                let verifier = Arc::clone(&env.verifier);
                smallvec![Effect::Future(Box::pin(async move {
                    let action = match verifier.verify(attempt).await {
                        Ok(payment) => BookingAction::PaymentVerified {
                            booking_id,
                            payment,
                        },
                        Err(error) => BookingAction::PaymentRejected {
                            booking_id,
                            reason: error.to_string(),
                        },
                    };
                    Some(action)
                }))]
            },

            // ========== Cancel ==========
            BookingAction::CancelBooking { booking_id, reason } => {
                let event = match Self::validate_cancellation(state, &booking_id) {
                    Ok(()) => BookingAction::BookingCancelled {
                        booking_id,
                        reason,
                        cancelled_at: now,
                    },
                    Err(error) => BookingAction::ValidationFailed { error },
                };
                Self::apply_event(state, &event, now);
                SmallVec::new()
            },

            // ========== Events ==========
            event => {
                Self::apply_event(state, &event, now);
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::participants::Participant;
    use crate::payload::{Customer, SlotSnapshot};
    use crate::pricing::PriceCalculator;
    use crate::types::{Category, Currency, Money, ProductId, SlotId};
    use crate::verifier::{MockPaymentVerifier, PaymentGateway, PaymentMethod, VerificationError};
    use chrono::NaiveDate;
    use summit_core::dispatch::dispatch;
    use summit_testing::{ReducerTest, assertions, test_clock};

    fn env(verifier: MockPaymentVerifier) -> BookingEnvironment {
        BookingEnvironment::new(Arc::new(test_clock()), verifier.shared())
    }

    fn payload(id: &str) -> BookingPayload {
        let totals = PriceCalculator::default()
            .compute_total(Money::from_minor(500_000), 1, Currency::Inr)
            .unwrap();
        BookingPayload {
            booking_id: BookingId::new(id),
            product_id: ProductId::new("kedarkantha"),
            product_name: "Kedarkantha Winter Trek".to_string(),
            category: Category::Domestic,
            slot: SlotSnapshot {
                slot_id: SlotId::new("dec12-am"),
                date: NaiveDate::from_ymd_opt(2025, 12, 12).unwrap(),
                time: "07:00".to_string(),
                max_participants: 12,
                booked_participants: 4,
                remaining: 8,
            },
            organizer: Participant {
                name: "Ravi".to_string(),
                email: "ravi@example.com".to_string(),
                phone: "+91 90000 00000".to_string(),
                emergency_contact: "Asha, +91 90000 00001".to_string(),
                ..Participant::default()
            },
            members: Vec::new(),
            participant_count: 1,
            customer: Customer::default(),
            currency: Currency::Inr,
            totals,
        }
    }

    fn attempt_for(payload: &BookingPayload) -> PaymentAttempt {
        PaymentAttempt {
            gateway: PaymentGateway::Razorpay,
            booking_id: payload.booking_id.clone(),
            order_id: "order_9".to_string(),
            payment_id: "pay_9".to_string(),
            signature: "sig_9".to_string(),
            amount: payload.totals.total,
            currency: payload.currency,
        }
    }

    fn verified() -> VerifiedPayment {
        VerifiedPayment {
            gateway: PaymentGateway::Razorpay,
            method: PaymentMethod::Upi,
            order_id: "order_9".to_string(),
            transaction_id: "txn_9".to_string(),
            amount: Money::from_minor(525_000),
        }
    }

    fn state_with(status: BookingStatus) -> BookingState {
        let payload = payload("BK-1");
        let now = test_clock().now();
        let mut state = BookingState::new();
        state.bookings.insert(
            payload.booking_id.clone(),
            Booking {
                id: payload.booking_id.clone(),
                payload,
                status,
                payment: None,
                created_at: now,
                updated_at: now,
                cancellation_reason: None,
            },
        );
        state
    }

    #[test]
    fn transitions_are_one_way() {
        use BookingStatus::{Cancelled, Confirmed, Pending};

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn submit_records_pending_booking_and_requests_verification() {
        let payload = payload("BK-1");
        let attempt = attempt_for(&payload);

        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(BookingState::new())
            .when_action(BookingAction::SubmitBooking { payload, attempt })
            .then_state(|state| {
                let booking = state.get(&BookingId::new("BK-1")).unwrap();
                assert_eq!(booking.status, BookingStatus::Pending);
                assert_eq!(booking.created_at, test_clock().now());
                assert!(state.last_error.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn submit_rejects_amount_that_differs_from_total() {
        let payload = payload("BK-1");
        let mut attempt = attempt_for(&payload);
        attempt.amount = Money::from_minor(500_000);

        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(BookingState::new())
            .when_action(BookingAction::SubmitBooking { payload, attempt })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert!(state.last_error.as_ref().unwrap().contains("amount"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn submit_rejects_currency_switch_after_quote() {
        let payload = payload("BK-1");
        let mut attempt = attempt_for(&payload);
        attempt.currency = Currency::Usd;

        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(BookingState::new())
            .when_action(BookingAction::SubmitBooking { payload, attempt })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert!(state.last_error.as_ref().unwrap().contains("currency"));
            })
            .run();
    }

    #[test]
    fn submit_rejects_duplicate_booking_id() {
        let payload = payload("BK-1");
        let attempt = attempt_for(&payload);

        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(state_with(BookingStatus::Confirmed))
            .when_action(BookingAction::SubmitBooking { payload, attempt })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert_eq!(
                    state.get(&BookingId::new("BK-1")).unwrap().status,
                    BookingStatus::Confirmed
                );
                assert!(state.last_error.as_ref().unwrap().contains("already submitted"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn approved_payment_confirms_booking() {
        let payload = payload("BK-1");
        let attempt = attempt_for(&payload);

        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(BookingState::new())
            .when_action(BookingAction::SubmitBooking { payload, attempt })
            .then_state(|state| {
                let booking = state.get(&BookingId::new("BK-1")).unwrap();
                assert_eq!(booking.status, BookingStatus::Confirmed);
                assert!(booking.payment.as_ref().unwrap().transaction_id.starts_with("mock_txn_"));
            })
            .then_actions(|actions| {
                assert_eq!(actions.len(), 1);
                assert!(matches!(actions[0], BookingAction::PaymentVerified { .. }));
            })
            .run_dispatched()
            .await;
    }

    #[tokio::test]
    async fn rejected_payment_cancels_booking() {
        let payload = payload("BK-1");
        let attempt = attempt_for(&payload);

        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::rejecting(
                VerificationError::InvalidSignature,
            )))
            .given_state(BookingState::new())
            .when_action(BookingAction::SubmitBooking { payload, attempt })
            .then_state(|state| {
                let booking = state.get(&BookingId::new("BK-1")).unwrap();
                assert_eq!(booking.status, BookingStatus::Cancelled);
                assert_eq!(
                    booking.cancellation_reason.as_deref(),
                    Some("payment signature is invalid")
                );
                assert!(booking.payment.is_none());
            })
            .run_dispatched()
            .await;
    }

    #[test]
    fn duplicate_verification_is_ignored() {
        let mut state = state_with(BookingStatus::Confirmed);
        let mut first = verified();
        first.transaction_id = "txn_first".to_string();
        state.bookings.get_mut(&BookingId::new("BK-1")).unwrap().payment = Some(first);

        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(state)
            .when_action(BookingAction::PaymentVerified {
                booking_id: BookingId::new("BK-1"),
                payment: verified(),
            })
            .then_state(|state| {
                let booking = state.get(&BookingId::new("BK-1")).unwrap();
                assert_eq!(booking.status, BookingStatus::Confirmed);
                assert_eq!(booking.payment.as_ref().unwrap().transaction_id, "txn_first");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn late_rejection_does_not_cancel_confirmed_booking() {
        let mut state = state_with(BookingStatus::Confirmed);
        state.bookings.get_mut(&BookingId::new("BK-1")).unwrap().payment = Some(verified());

        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(state)
            .when_action(BookingAction::PaymentRejected {
                booking_id: BookingId::new("BK-1"),
                reason: "late retry".to_string(),
            })
            .then_state(|state| {
                let booking = state.get(&BookingId::new("BK-1")).unwrap();
                assert_eq!(booking.status, BookingStatus::Confirmed);
                assert_eq!(booking.payment, Some(verified()));
                assert!(booking.cancellation_reason.is_none());
                assert!(state.last_error.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn rejection_retry_after_verification_keeps_booking_confirmed() {
        let payload = payload("BK-1");
        let attempt = attempt_for(&payload);
        let env = env(MockPaymentVerifier::approving());
        let reducer = BookingReducer::new();
        let mut state = BookingState::new();

        dispatch(&reducer, &mut state, BookingAction::SubmitBooking { payload, attempt }, &env)
            .await;
        dispatch(
            &reducer,
            &mut state,
            BookingAction::PaymentRejected {
                booking_id: BookingId::new("BK-1"),
                reason: "late retry".to_string(),
            },
            &env,
        )
        .await;

        let booking = state.get(&BookingId::new("BK-1")).unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert!(booking.payment.is_some());
    }

    #[test]
    fn late_verification_does_not_revive_cancelled_booking() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(state_with(BookingStatus::Cancelled))
            .when_action(BookingAction::PaymentVerified {
                booking_id: BookingId::new("BK-1"),
                payment: verified(),
            })
            .then_state(|state| {
                let booking = state.get(&BookingId::new("BK-1")).unwrap();
                assert_eq!(booking.status, BookingStatus::Cancelled);
                assert!(booking.payment.is_none());
            })
            .run();
    }

    #[test]
    fn confirmed_booking_can_be_cancelled() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(state_with(BookingStatus::Confirmed))
            .when_action(BookingAction::CancelBooking {
                booking_id: BookingId::new("BK-1"),
                reason: "Weather closure".to_string(),
            })
            .then_state(|state| {
                let booking = state.get(&BookingId::new("BK-1")).unwrap();
                assert_eq!(booking.status, BookingStatus::Cancelled);
                assert_eq!(booking.cancellation_reason.as_deref(), Some("Weather closure"));
                assert!(state.last_error.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn cancelling_twice_is_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(state_with(BookingStatus::Cancelled))
            .when_action(BookingAction::CancelBooking {
                booking_id: BookingId::new("BK-1"),
                reason: "Changed plans".to_string(),
            })
            .then_state(|state| {
                assert!(state.last_error.as_ref().unwrap().contains("already cancelled"));
            })
            .run();
    }

    #[test]
    fn cancelling_unknown_booking_is_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(env(MockPaymentVerifier::approving()))
            .given_state(BookingState::new())
            .when_action(BookingAction::CancelBooking {
                booking_id: BookingId::new("BK-404"),
                reason: "Changed plans".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert!(state.last_error.as_ref().unwrap().contains("not found"));
            })
            .run();
    }
}
