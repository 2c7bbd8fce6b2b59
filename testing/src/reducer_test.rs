//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use venue_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use venue_testing::ReducerTest;
///
/// ReducerTest::new(GalleryReducer::new())
///     .with_env(test_environment())
///     .given_state(GalleryState::new(images))
///     .when_action(GalleryAction::Advance)
///     .then_state(|state| {
///         assert_eq!(state.active_index, 1);
///     })
///     .then_effects(|effects| {
///         assert_effects_count(effects, 1);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Apply an action before the one under test (Given)
    ///
    /// Effects of preceding actions are discarded.
    #[must_use]
    pub fn given_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Set the action to test (When)
    ///
    /// Effect assertions only see the effects of this last action.
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "Action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let mut effects = Default::default();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env);
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use venue_core::effect::{Effect, EffectId};

    /// Flatten `Parallel` and `Sequential` wrappers into their leaves
    fn leaves<A>(effects: &[Effect<A>]) -> Vec<&Effect<A>> {
        let mut out = Vec::new();
        for effect in effects {
            match effect {
                Effect::Parallel(children) | Effect::Sequential(children) => {
                    out.extend(leaves(children));
                },
                other => out.push(other),
            }
        }
        out
    }

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            leaves(effects).iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Count the Future effects, including those nested in Parallel/Sequential
    #[must_use]
    pub fn count_future_effects<A>(effects: &[Effect<A>]) -> usize {
        leaves(effects)
            .iter()
            .filter(|e| matches!(e, Effect::Future(_)))
            .count()
    }

    /// Assert that an effect is (re)scheduled under `id`
    ///
    /// # Panics
    ///
    /// Panics if no `Cancellable` effect with this id is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_schedules<A: std::fmt::Debug>(effects: &[Effect<A>], id: &EffectId) {
        assert!(
            leaves(effects)
                .iter()
                .any(|e| e.cancellable_id() == Some(id)),
            "Expected an effect scheduled under {id}, found {effects:?}"
        );
    }

    /// Assert that nothing is scheduled under `id`
    ///
    /// # Panics
    ///
    /// Panics if a `Cancellable` effect with this id is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_not_scheduled<A: std::fmt::Debug>(effects: &[Effect<A>], id: &EffectId) {
        assert!(
            !leaves(effects)
                .iter()
                .any(|e| e.cancellable_id() == Some(id)),
            "Expected nothing scheduled under {id}, found {effects:?}"
        );
    }

    /// Assert that the effect registered under `id` is cancelled
    ///
    /// # Panics
    ///
    /// Panics if no `Cancel` effect for this id is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_cancels<A: std::fmt::Debug>(effects: &[Effect<A>], id: &EffectId) {
        assert!(
            leaves(effects)
                .iter()
                .any(|e| matches!(e, Effect::Cancel(cancelled) if cancelled == id)),
            "Expected {id} to be cancelled, found {effects:?}"
        );
    }

    /// The delay of the effect scheduled under `id`, if it is a delayed action
    #[must_use]
    pub fn scheduled_delay<A>(effects: &[Effect<A>], id: &EffectId) -> Option<std::time::Duration> {
        leaves(effects).into_iter().find_map(|e| match e {
            Effect::Cancellable { id: scheduled, effect } if scheduled == id => match **effect {
                Effect::Delay { duration, .. } => Some(duration),
                _ => None,
            },
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use venue_core::effect::{Effect, EffectId};
    use venue_core::reducer::Reducer;
    use venue_core::timer;

    const TICK: EffectId = EffectId::new("tick");

    #[derive(Clone, Debug)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Schedule,
        Stop,
    }

    struct TestReducer;

    struct TestEnv;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> smallvec::SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    smallvec::smallvec![Effect::None]
                },
                TestAction::Schedule => smallvec::smallvec![Effect::Parallel(vec![timer! {
                    id: TICK,
                    after: Duration::from_millis(5),
                    action: TestAction::Increment
                }])],
                TestAction::Stop => smallvec::smallvec![Effect::Cancel(TICK)],
            }
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_given_actions_are_applied_first() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .given_action(TestAction::Increment)
            .given_action(TestAction::Increment)
            .when_action(TestAction::Schedule)
            .then_state(|state| assert_eq!(state.count, 2))
            .then_effects(|effects| {
                assertions::assert_schedules(effects, &TICK);
                assert_eq!(
                    assertions::scheduled_delay(effects, &TICK),
                    Some(Duration::from_millis(5))
                );
            })
            .run();
    }

    #[test]
    fn test_cancel_assertion() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Stop)
            .then_effects(|effects| {
                assertions::assert_cancels(effects, &TICK);
                assertions::assert_not_scheduled(effects, &TICK);
            })
            .run();
    }

    #[test]
    fn test_assertions_effects_count() {
        assertions::assert_effects_count(&[Effect::<TestAction>::None], 1);
        assertions::assert_effects_count::<TestAction>(&[], 0);
        assertions::assert_no_effects::<TestAction>(&[]);
    }
}
