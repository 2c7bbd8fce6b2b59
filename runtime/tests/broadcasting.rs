//! Integration tests for Store action broadcasting

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::time::Duration;
use tokio_test::assert_ok;
use venue_core::effect::{Effect, EffectId};
use venue_core::reducer::Reducer;
use venue_core::{SmallVec, smallvec, timer};
use venue_runtime::{Store, StoreError};

const CHIME: EffectId = EffectId::new("test.chime");

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Ring,
    Chimed,
    Fetch,
    Fetched { value: u32 },
}

#[derive(Debug, Clone, Default)]
struct State {
    chimes: u32,
    fetched: Option<u32>,
}

#[derive(Clone)]
struct Env;

#[derive(Clone)]
struct ChimeReducer;

impl Reducer for ChimeReducer {
    type State = State;
    type Action = Action;
    type Environment = Env;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            Action::Ring => smallvec![timer! {
                id: CHIME,
                after: Duration::from_millis(50),
                action: Action::Chimed
            }],
            Action::Chimed => {
                state.chimes += 1;
                smallvec![Effect::None]
            },
            Action::Fetch => smallvec![Effect::Future(Box::pin(async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Some(Action::Fetched { value: 42 })
            }))],
            Action::Fetched { value } => {
                state.fetched = Some(value);
                smallvec![Effect::None]
            },
        }
    }
}

fn store() -> Store<State, Action, Env, ChimeReducer> {
    Store::new(State::default(), ChimeReducer, Env)
}

#[tokio::test]
async fn test_effect_actions_are_broadcast() {
    let store = store();
    let mut rx = store.subscribe_actions();

    assert_ok!(store.send(Action::Fetch).await);

    let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(action, Action::Fetched { value: 42 });
}

#[tokio::test]
async fn test_broadcast_follows_state_update() {
    let store = store();

    let action = assert_ok!(
        store
            .send_and_wait_for(
                Action::Fetch,
                |a| matches!(a, Action::Fetched { .. }),
                Duration::from_secs(1),
            )
            .await
    );

    assert_eq!(action, Action::Fetched { value: 42 });
    // Observers never see an action ahead of the state it produced.
    assert_eq!(store.state(|s| s.fetched).await, Some(42));
}

#[tokio::test(start_paused = true)]
async fn test_timer_actions_reach_every_subscriber() {
    let store = store();
    let mut first = store.subscribe_actions();
    let mut second = store.subscribe_actions();

    assert_ok!(store.send(Action::Ring).await);
    tokio::time::sleep(Duration::from_millis(51)).await;

    assert_eq!(first.recv().await.unwrap(), Action::Chimed);
    assert_eq!(second.recv().await.unwrap(), Action::Chimed);
    assert_eq!(store.state(|s| s.chimes).await, 1);
}

#[tokio::test]
async fn test_wait_for_times_out_without_match() {
    let store = store();

    let result = store
        .send_and_wait_for(
            Action::Chimed,
            |a| matches!(a, Action::Fetched { .. }),
            Duration::from_millis(20),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}
