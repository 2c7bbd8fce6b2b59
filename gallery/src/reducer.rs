//! Reducer logic for the rotating gallery.
//!
//! Index changes take the transition lock and schedule its release after the
//! fixed transition duration. While the lock is held every navigation action
//! is a no-op. The auto-advance timer re-arms itself on every tick so it keeps
//! a fixed cadence; ticks that land while paused or mid-transition are skipped.

use crate::preload::Preloader;
use crate::types::{AUTO_ADVANCE, GalleryAction, GalleryConfig, GalleryState, ImageRef, TRANSITION_UNLOCK};
use std::sync::Arc;
use venue_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec, timer};

/// Environment dependencies for the gallery reducer
#[derive(Clone)]
pub struct GalleryEnvironment {
    /// Timings and labels
    pub config: GalleryConfig,
    /// Fetches images ahead of display
    pub preloader: Arc<dyn Preloader>,
}

impl GalleryEnvironment {
    /// Creates a new `GalleryEnvironment`
    #[must_use]
    pub fn new(config: GalleryConfig, preloader: Arc<dyn Preloader>) -> Self {
        Self { config, preloader }
    }
}

impl std::fmt::Debug for GalleryEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryEnvironment")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reducer for the rotating gallery
#[derive(Clone, Debug, Default)]
pub struct GalleryReducer;

impl GalleryReducer {
    /// Creates a new `GalleryReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Move to `target` and hold the transition lock
    fn begin_transition(
        state: &mut GalleryState,
        target: usize,
        env: &GalleryEnvironment,
    ) -> Effect<GalleryAction> {
        tracing::debug!(from = state.active_index, to = target, "Gallery transition");
        state.active_index = target;
        state.transitioning = true;

        timer! {
            id: TRANSITION_UNLOCK,
            after: env.config.transition_duration,
            action: GalleryAction::TransitionFinished
        }
    }

    /// Schedule the next auto-advance tick
    fn arm_auto_advance(env: &GalleryEnvironment) -> Effect<GalleryAction> {
        timer! {
            id: AUTO_ADVANCE,
            after: env.config.rotation_interval,
            action: GalleryAction::Tick
        }
    }

    /// Fire-and-forget preload of every image
    fn preload_all(images: &[ImageRef], env: &GalleryEnvironment) -> Effect<GalleryAction> {
        if images.is_empty() {
            return Effect::None;
        }

        Effect::Parallel(
            images
                .iter()
                .map(|image| {
                    let preload = env.preloader.preload(image);
                    let image = image.clone();
                    async_effect! {
                        if let Err(error) = preload.await {
                            tracing::debug!(%image, %error, "Preload failed, image will load on display");
                        }
                        None
                    }
                })
                .collect(),
        )
    }
}

impl Reducer for GalleryReducer {
    type State = GalleryState;
    type Action = GalleryAction;
    type Environment = GalleryEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if action.is_navigation() && state.transitioning {
            tracing::trace!(?action, "Ignored: transition in flight");
            return smallvec![Effect::None];
        }

        match action {
            GalleryAction::Start => {
                let mut effects = smallvec![Self::preload_all(&state.images, env)];
                if state.is_rotating() && !state.paused {
                    effects.push(Self::arm_auto_advance(env));
                }
                effects
            },

            GalleryAction::Advance => match state.next_index() {
                Some(next) => smallvec![Self::begin_transition(state, next, env)],
                None => smallvec![Effect::None],
            },

            GalleryAction::Retreat => match state.previous_index() {
                Some(previous) => smallvec![Self::begin_transition(state, previous, env)],
                None => smallvec![Effect::None],
            },

            GalleryAction::JumpTo { index } => {
                if index >= state.len() || index == state.active_index {
                    return smallvec![Effect::None];
                }
                smallvec![Self::begin_transition(state, index, env)]
            },

            GalleryAction::TogglePause => {
                state.paused = !state.paused;
                tracing::debug!(paused = state.paused, "Gallery pause toggled");

                if !state.is_rotating() {
                    smallvec![Effect::None]
                } else if state.paused {
                    smallvec![Effect::Cancel(AUTO_ADVANCE)]
                } else {
                    smallvec![Self::arm_auto_advance(env)]
                }
            },

            GalleryAction::Tick => {
                // A tick that raced a pause or a shrink to one image is stale.
                if state.paused || !state.is_rotating() {
                    return smallvec![Effect::None];
                }

                let rearm = Self::arm_auto_advance(env);
                if state.transitioning {
                    tracing::trace!("Auto-advance skipped: transition in flight");
                    return smallvec![rearm];
                }

                match state.next_index() {
                    Some(next) => smallvec![Self::begin_transition(state, next, env), rearm],
                    None => smallvec![rearm],
                }
            },

            GalleryAction::TransitionFinished => {
                state.transitioning = false;
                smallvec![Effect::None]
            },

            GalleryAction::ReplaceImages { images } => {
                tracing::debug!(count = images.len(), "Gallery images replaced");
                state.images = images;
                state.active_index = 0;
                state.transitioning = false;

                let mut effects = smallvec![
                    Effect::Cancel(TRANSITION_UNLOCK),
                    Self::preload_all(&state.images, env),
                ];
                if state.is_rotating() && !state.paused {
                    // Scheduling under the same id replaces the old timer.
                    effects.push(Self::arm_auto_advance(env));
                } else {
                    effects.push(Effect::Cancel(AUTO_ADVANCE));
                }
                effects
            },
        }
    }
}
