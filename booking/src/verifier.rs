//! Payment verification seam.
//!
//! Razorpay and Stripe confirm payments out of band; checking their signatures
//! belongs to the gateway integration, not to this crate. The booking lifecycle
//! only needs a yes/no with transaction references, which [`PaymentVerifier`]
//! provides.

use crate::types::{BookingId, Currency, Money};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Result type returned by verifiers
pub type VerificationResult<T> = Result<T, VerificationError>;

/// Supported payment gateways
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentGateway {
    /// Razorpay (INR checkouts)
    Razorpay,
    /// Stripe (card checkouts)
    Stripe,
}

/// How the customer paid, as reported by the gateway
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit or debit card
    Card,
    /// UPI transfer
    Upi,
    /// Net banking
    NetBanking,
    /// Wallet
    Wallet,
}

/// What the client reports after the gateway's checkout widget closes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAttempt {
    /// Gateway used
    pub gateway: PaymentGateway,
    /// Booking the payment is for
    pub booking_id: BookingId,
    /// Gateway order / session id
    pub order_id: String,
    /// Gateway payment id
    pub payment_id: String,
    /// Signature the gateway returned with the payment
    pub signature: String,
    /// Amount charged, in minor units of `currency`
    pub amount: Money,
    /// Currency charged
    pub currency: Currency,
}

/// A payment the gateway has confirmed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedPayment {
    /// Gateway used
    pub gateway: PaymentGateway,
    /// Payment method reported by the gateway
    pub method: PaymentMethod,
    /// Gateway order / session id
    pub order_id: String,
    /// Gateway transaction id
    pub transaction_id: String,
    /// Amount captured
    pub amount: Money,
}

/// Why a payment could not be verified
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Signature does not match the order and payment ids
    #[error("payment signature is invalid")]
    InvalidSignature,
    /// Gateway reports a different amount than the booking total
    #[error("gateway captured {captured} but booking total is {expected}")]
    AmountMismatch {
        /// Booking total
        expected: Money,
        /// Amount the gateway captured
        captured: Money,
    },
    /// Gateway did not answer in time
    #[error("payment gateway timed out")]
    Timeout,
    /// Any other gateway failure
    #[error("payment gateway error: {0}")]
    Gateway(String),
}

/// Trusted external payment verifier.
///
/// Returns a boxed future instead of being an `async fn` so it stays object-safe
/// and can live behind `Arc<dyn PaymentVerifier>` in a reducer environment.
pub trait PaymentVerifier: Send + Sync {
    /// Verify a payment attempt with its gateway.
    ///
    /// # Errors
    ///
    /// Returns a [`VerificationError`] if the gateway does not confirm the payment.
    fn verify(
        &self,
        attempt: PaymentAttempt,
    ) -> Pin<Box<dyn Future<Output = VerificationResult<VerifiedPayment>> + Send>>;
}

/// In-process verifier for development and tests.
///
/// Approves every attempt unless built with [`MockPaymentVerifier::rejecting`].
#[derive(Clone, Debug, Default)]
pub struct MockPaymentVerifier {
    rejection: Option<VerificationError>,
}

impl MockPaymentVerifier {
    /// A verifier that approves everything
    #[must_use]
    pub const fn approving() -> Self {
        Self { rejection: None }
    }

    /// A verifier that rejects everything with `error`
    #[must_use]
    pub const fn rejecting(error: VerificationError) -> Self {
        Self {
            rejection: Some(error),
        }
    }

    /// Arc-wrapped instance for an environment
    #[must_use]
    pub fn shared(self) -> Arc<dyn PaymentVerifier> {
        Arc::new(self)
    }
}

impl PaymentVerifier for MockPaymentVerifier {
    fn verify(
        &self,
        attempt: PaymentAttempt,
    ) -> Pin<Box<dyn Future<Output = VerificationResult<VerifiedPayment>> + Send>> {
        let rejection = self.rejection.clone();
        Box::pin(async move {
            if let Some(error) = rejection {
                tracing::info!(
                    booking_id = %attempt.booking_id,
                    %error,
                    "Mock payment rejected"
                );
                return Err(error);
            }

            let transaction_id = format!("mock_txn_{}", uuid::Uuid::new_v4());
            let method = match attempt.gateway {
                PaymentGateway::Razorpay => PaymentMethod::Upi,
                PaymentGateway::Stripe => PaymentMethod::Card,
            };

            tracing::info!(
                booking_id = %attempt.booking_id,
                amount = attempt.amount.minor(),
                transaction_id = %transaction_id,
                "Mock payment verified"
            );

            Ok(VerifiedPayment {
                gateway: attempt.gateway,
                method,
                order_id: attempt.order_id,
                transaction_id,
                amount: attempt.amount,
            })
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn attempt(gateway: PaymentGateway) -> PaymentAttempt {
        PaymentAttempt {
            gateway,
            booking_id: BookingId::new("BK-2001"),
            order_id: "order_123".to_string(),
            payment_id: "pay_456".to_string(),
            signature: "sig".to_string(),
            amount: Money::from_minor(1_050_000),
            currency: Currency::Inr,
        }
    }

    #[tokio::test]
    async fn approving_mock_returns_transaction_reference() {
        let verified = MockPaymentVerifier::approving()
            .verify(attempt(PaymentGateway::Razorpay))
            .await
            .unwrap();

        assert_eq!(verified.method, PaymentMethod::Upi);
        assert_eq!(verified.order_id, "order_123");
        assert_eq!(verified.amount, Money::from_minor(1_050_000));
        assert!(verified.transaction_id.starts_with("mock_txn_"));
    }

    #[tokio::test]
    async fn rejecting_mock_returns_configured_error() {
        let result = MockPaymentVerifier::rejecting(VerificationError::InvalidSignature)
            .verify(attempt(PaymentGateway::Stripe))
            .await;

        assert_eq!(result, Err(VerificationError::InvalidSignature));
    }
}
