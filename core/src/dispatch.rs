//! In-process effect driver.
//!
//! Runs a reducer, executes the effects it returns and feeds every action those
//! effects produce back into the same reducer, until no effect yields another
//! action. This is the imperative shell around a single reducer instance.

use crate::effect::Effect;
use crate::reducer::Reducer;
use std::collections::VecDeque;

/// Upper bound on reducer invocations for one [`dispatch`] call.
///
/// A reducer whose effects keep producing actions forever would otherwise never settle.
pub const MAX_FEEDBACK_STEPS: usize = 1024;

/// Send `action` through `reducer` and drive the feedback loop to completion.
///
/// Returns every action that effects produced, in the order they were reduced.
/// The initial action is not included.
pub async fn dispatch<R>(
    reducer: &R,
    state: &mut R::State,
    action: R::Action,
    env: &R::Environment,
) -> Vec<R::Action>
where
    R: Reducer,
    R::Action: Clone + Send + 'static,
{
    let mut queue = VecDeque::from([action]);
    let mut produced = Vec::new();
    let mut steps = 0usize;

    while let Some(next) = queue.pop_front() {
        if steps == MAX_FEEDBACK_STEPS {
            tracing::warn!(
                pending = queue.len() + 1,
                "Feedback loop did not settle; dropping remaining actions"
            );
            break;
        }
        steps += 1;

        if steps > 1 {
            produced.push(next.clone());
        }

        let effects = reducer.reduce(state, next, env);
        for effect in effects {
            queue.extend(execute(effect).await);
        }
    }

    tracing::trace!(steps, "Dispatch settled");
    produced
}

/// Execute a single effect, returning the action it produced, if any.
pub async fn execute<A>(effect: Effect<A>) -> Option<A> {
    match effect {
        Effect::None => None,
        Effect::Future(fut) => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SmallVec, smallvec};

    #[derive(Clone, Debug, PartialEq)]
    enum CountdownAction {
        Start(u32),
        Tick(u32),
        Done,
    }

    struct Countdown;

    impl Reducer for Countdown {
        type State = Vec<u32>;
        type Action = CountdownAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                CountdownAction::Start(n) | CountdownAction::Tick(n) => {
                    state.push(n);
                    if n == 0 {
                        smallvec![Effect::Future(Box::pin(async {
                            Some(CountdownAction::Done)
                        }))]
                    } else {
                        smallvec![Effect::Future(Box::pin(async move {
                            Some(CountdownAction::Tick(n - 1))
                        }))]
                    }
                },
                CountdownAction::Done => smallvec![Effect::None],
            }
        }
    }

    #[tokio::test]
    async fn feedback_loop_runs_until_settled() {
        let mut state = Vec::new();
        let produced = dispatch(&Countdown, &mut state, CountdownAction::Start(2), &()).await;

        assert_eq!(state, vec![2, 1, 0]);
        assert_eq!(
            produced,
            vec![
                CountdownAction::Tick(1),
                CountdownAction::Tick(0),
                CountdownAction::Done
            ]
        );
    }

    struct Fanout;

    impl Reducer for Fanout {
        type State = Vec<u8>;
        type Action = u8;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            state.push(action);
            if action != 0 {
                return smallvec![Effect::None];
            }
            smallvec![
                Effect::Future(Box::pin(async { Some(1) })),
                Effect::None,
                Effect::Future(Box::pin(async { None })),
                Effect::Future(Box::pin(async { Some(2) })),
            ]
        }
    }

    #[tokio::test]
    async fn every_effect_of_one_reduce_is_fed_back_in_order() {
        let mut state = Vec::new();
        let produced = dispatch(&Fanout, &mut state, 0, &()).await;

        assert_eq!(produced, vec![1, 2]);
        assert_eq!(state, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn empty_effects_yield_nothing() {
        assert_eq!(execute(Effect::<u8>::None).await, None);
        assert_eq!(execute(Effect::Future(Box::pin(async { Some(7u8) }))).await, Some(7));
    }
}
