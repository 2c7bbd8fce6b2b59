//! The gallery instance embedding code talks to.

use crate::preload::Preloader;
use crate::reducer::{GalleryEnvironment, GalleryReducer};
use crate::types::{AUTO_ADVANCE, GalleryAction, GalleryConfig, GalleryState, ImageRef};
use crate::view::{GalleryView, RenderPlan};
use std::sync::Arc;
use venue_core::effect::EffectId;
use venue_runtime::{Store, StoreError};

type GalleryStore = Store<GalleryState, GalleryAction, GalleryEnvironment, GalleryReducer>;

/// A running gallery
///
/// Owns its store and therefore every timer the gallery schedules. Dropping
/// the gallery tears it down: pending timers are aborted and no callback
/// fires afterwards.
///
/// # Example
///
/// ```ignore
/// let gallery = RotatingGallery::start(images, GalleryConfig::new("Barn"), HttpPreloader::shared()).await?;
/// gallery.advance().await?;
/// assert_eq!(gallery.view().await.active_index, 1);
/// ```
pub struct RotatingGallery {
    store: GalleryStore,
}

impl RotatingGallery {
    /// Creates the gallery and starts preloading and auto-advance
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the start action is rejected.
    #[tracing::instrument(skip_all, fields(images = images.len()))]
    pub async fn start(
        images: Vec<ImageRef>,
        config: GalleryConfig,
        preloader: Arc<dyn Preloader>,
    ) -> Result<Self, StoreError> {
        let store = Store::new(
            GalleryState::new(images),
            GalleryReducer::new(),
            GalleryEnvironment::new(config, preloader),
        );
        store.send(GalleryAction::Start).await?;
        Ok(Self { store })
    }

    /// Show the next image
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown.
    pub async fn advance(&self) -> Result<GalleryView, StoreError> {
        self.dispatch(GalleryAction::Advance).await
    }

    /// Show the previous image
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown.
    pub async fn retreat(&self) -> Result<GalleryView, StoreError> {
        self.dispatch(GalleryAction::Retreat).await
    }

    /// Show the image at `index`; out-of-range indices are ignored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown.
    pub async fn jump_to(&self, index: usize) -> Result<GalleryView, StoreError> {
        self.dispatch(GalleryAction::JumpTo { index }).await
    }

    /// Pause or resume auto-advance
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown.
    pub async fn toggle_pause(&self) -> Result<GalleryView, StoreError> {
        self.dispatch(GalleryAction::TogglePause).await
    }

    /// Swap in a new image sequence, restarting from its first image
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown.
    pub async fn replace_images(&self, images: Vec<ImageRef>) -> Result<GalleryView, StoreError> {
        self.dispatch(GalleryAction::ReplaceImages { images }).await
    }

    /// Current indicator surface
    pub async fn view(&self) -> GalleryView {
        self.store.state(|state| GalleryView::from(state)).await
    }

    /// Current render plan
    pub async fn render(&self) -> RenderPlan {
        let alt = &self.store.environment().config.alt;
        self.store
            .state(|state| RenderPlan::for_state(state, alt))
            .await
    }

    /// Images of the current sequence
    pub async fn images(&self) -> Vec<ImageRef> {
        self.store.state(|state| state.images.clone()).await
    }

    /// The configuration this gallery was started with
    #[must_use]
    pub const fn config(&self) -> &GalleryConfig {
        &self.store.environment().config
    }

    /// Whether auto-advance is currently scheduled
    #[must_use]
    pub fn is_auto_advancing(&self) -> bool {
        self.store.is_effect_active(&AUTO_ADVANCE)
    }

    /// Timers currently pending
    #[must_use]
    pub fn pending_timers(&self) -> Vec<EffectId> {
        self.store.active_effects()
    }

    /// Whether the gallery has been torn down
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.store.is_shut_down()
    }

    /// Cancel every timer and reject further operations
    ///
    /// Returns the number of timers that were cancelled.
    pub fn teardown(&self) -> usize {
        self.store.teardown()
    }

    async fn dispatch(&self, action: GalleryAction) -> Result<GalleryView, StoreError> {
        tracing::trace!(?action, "Gallery action");
        self.store.send(action).await?;
        Ok(self.view().await)
    }
}

impl std::fmt::Debug for RotatingGallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingGallery")
            .field("config", self.config())
            .field("torn_down", &self.is_torn_down())
            .finish_non_exhaustive()
    }
}

impl Drop for RotatingGallery {
    fn drop(&mut self) {
        self.store.teardown();
    }
}
