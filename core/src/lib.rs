//! # Summit Core
//!
//! Functional-core primitives shared by the Summit booking crates.
//!
//! Booking rules are written as reducers: a pure function
//! `(State, Action, Environment) → (State, Effects)`. Anything that touches the
//! outside world (a payment verifier) is returned as an [`Effect`]
//! description and executed by [`dispatch::dispatch`], which feeds the actions
//! produced by effects back into the reducer until the system settles.
//!
//! ## Example
//!
//! ```ignore
//! use summit_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! impl Reducer for BookingReducer {
//!     type State = BookingState;
//!     type Action = BookingAction;
//!     type Environment = BookingEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut BookingState,
//!         action: BookingAction,
//!         env: &BookingEnvironment,
//!     ) -> SmallVec<[Effect<BookingAction>; 4]> {
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub mod dispatch;

/// Reducers hold the business rules.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// Core abstraction for business logic.
    ///
    /// Implementations must be deterministic: given the same state, action and
    /// environment they produce the same state change and the same effect
    /// descriptions. All I/O happens outside, when effects are executed.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Injected dependencies (clock, collaborators)
        type Environment;

        /// Reduce an action into state changes and effects.
        ///
        /// Validates the action, updates `state` in place and returns the
        /// effects the dispatcher should run next.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effects describe side effects; they are values, not execution.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Description of work to perform after a reducer returns.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation.
        ///
        /// If it resolves to `Some(action)`, the action is fed back into the reducer.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns true for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Dependency traits injected through a reducer's environment.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Abstracts the current time so reducers stay deterministic under test.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
