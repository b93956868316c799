//! Checkout walkthrough.
//!
//! Loads a sample expedition, resolves participant options for one of its
//! slots, quotes it in INR, builds the booking payload and submits it through
//! the lifecycle reducer with the mock payment verifier. Prints the resulting
//! booking as JSON.

use std::sync::Arc;
use summit_booking::{
    BookingAction, BookingConfig, BookingEnvironment, BookingId, BookingReducer, BookingState,
    Currency, Customer, MockPaymentVerifier, Participant, ParticipantGroup, PaymentAttempt,
    PaymentGateway, Product, SlotId, build_booking_payload,
};
use summit_core::{dispatch::dispatch, environment::SystemClock};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

const SAMPLE_PRODUCT: &str = r#"{
    "kind": "mountain",
    "id": "kedarkantha-winter",
    "name": "Kedarkantha Winter Trek",
    "category": "domestic",
    "priceINR": 12500,
    "priceUSD": 175,
    "difficulty": "moderate",
    "altitudeM": 3810,
    "availableDates": [
        {
            "date": "2025-12-12",
            "slots": [
                { "id": "dec12-am", "time": "07:00", "maxParticipants": 12, "bookedParticipants": 9 },
                { "id": "dec12-pm", "time": "13:00", "maxParticipants": 12, "bookedParticipants": 12 }
            ]
        },
        {
            "date": "2025-12-19",
            "slots": [
                { "id": "dec19-am", "time": "07:00", "maxParticipants": 12, "bookedParticipants": 0 }
            ]
        }
    ]
}"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = BookingConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("summit_booking={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate()?;
    info!(
        inr_bps = config.fees.inr_bps,
        usd_bps = config.fees.usd_bps,
        default_cap = config.default_participant_cap,
        "Configuration loaded"
    );

    let product: Product = serde_json::from_str(SAMPLE_PRODUCT)?;
    let slot_id = SlotId::new("dec12-am");

    let options = config
        .resolver()
        .resolve_selectable_counts(&product, Some(&slot_id));
    let Some(choice) = options.iter().take(2).last() else {
        return Err(format!("slot {slot_id} is fully booked").into());
    };
    info!(slot_id = %slot_id, offered = options.len(), chosen = %choice.label, "Participant count selected");

    let mut group = ParticipantGroup::new();
    group.resize_for(choice.count);
    for (index, participant) in std::iter::once(&mut group.organizer)
        .chain(group.members.iter_mut())
        .enumerate()
    {
        *participant = sample_participant(index);
    }

    let quote = config
        .calculator()
        .quote(&product, Currency::Inr, group.participant_count())?;
    info!(
        base = %quote.base_price.display_in(quote.currency),
        fee = %quote.service_fee.display_in(quote.currency),
        total = %quote.total.display_in(quote.currency),
        "Quote ready"
    );

    let booking_id = BookingId::new(format!("BK-{}", Uuid::new_v4()));
    let customer = Customer {
        user_id: Some("demo-user".to_string()),
        name: group.organizer.name.clone(),
        email: group.organizer.email.clone(),
    };
    let payload = build_booking_payload(
        booking_id.clone(),
        &product,
        Some(&slot_id),
        &group,
        &quote,
        &customer,
    )?;

    let attempt = PaymentAttempt {
        gateway: PaymentGateway::Razorpay,
        booking_id: booking_id.clone(),
        order_id: format!("order_{}", Uuid::new_v4().simple()),
        payment_id: format!("pay_{}", Uuid::new_v4().simple()),
        signature: "demo-signature".to_string(),
        amount: quote.total,
        currency: quote.currency,
    };

    let env = BookingEnvironment::new(
        Arc::new(SystemClock),
        MockPaymentVerifier::approving().shared(),
    );
    let mut state = BookingState::new();
    dispatch(
        &BookingReducer::new(),
        &mut state,
        BookingAction::SubmitBooking { payload, attempt },
        &env,
    )
    .await;

    let booking = state
        .get(&booking_id)
        .ok_or("booking was not recorded")?;
    info!(booking_id = %booking.id, status = %booking.status, "Checkout finished");
    println!("{}", serde_json::to_string_pretty(booking)?);

    Ok(())
}

fn sample_participant(index: usize) -> Participant {
    const NAMES: [&str; 4] = ["Ravi Menon", "Meera Iyer", "Arjun Rao", "Kavya Nair"];
    let name = NAMES[index % NAMES.len()];
    let handle = name.split_whitespace().next().unwrap_or(name).to_lowercase();

    Participant {
        name: name.to_string(),
        email: format!("{handle}@example.com"),
        phone: format!("+91 98000 0000{index}"),
        emergency_contact: "Asha Menon, +91 98111 22233".to_string(),
        ..Participant::default()
    }
}
