//! # Summit Testing
//!
//! Test helpers for reducers built on `summit-core`:
//!
//! - [`ReducerTest`]: Given-When-Then harness, synchronous or driven through
//!   the effect dispatcher
//! - [`mocks::FixedClock`]: deterministic time
//! - [`assertions`]: effect assertions
//!
//! ## Example
//!
//! ```ignore
//! use summit_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(BookingReducer::new())
//!     .with_env(BookingEnvironment::new(Arc::new(test_clock()), verifier))
//!     .given_state(BookingState::new())
//!     .when_action(BookingAction::CancelBooking { booking_id, reason })
//!     .then_state(|state| assert!(state.last_error.is_some()))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use summit_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Deterministic stand-ins for environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Clock frozen at a single instant.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a clock that always reports `time`
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Fixed clock at 2025-01-01 00:00:00 UTC, the start of the trekking season used in tests.
    ///
    /// # Panics
    ///
    /// Panics only if the hardcoded timestamp fails to parse.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_never_moves() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }
}
