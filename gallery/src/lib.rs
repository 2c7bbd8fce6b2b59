//! # Venue Gallery
//!
//! Auto-rotating image gallery with manual navigation, pause/resume and a
//! transition lock.
//!
//! The gallery is a reducer running in a [`venue_runtime::Store`]. Its two
//! timers are cancellable effects owned by that store:
//!
//! - [`AUTO_ADVANCE`] ticks every rotation interval and re-arms itself
//! - [`TRANSITION_UNLOCK`] releases the transition lock after the fade
//!
//! [`RotatingGallery`] wraps the store for embedding code and tears it down
//! when dropped.
//!
//! ## Example
//!
//! ```ignore
//! use venue_gallery::{GalleryConfig, HttpPreloader, ImageRef, RotatingGallery};
//!
//! let gallery = RotatingGallery::start(
//!     vec![ImageRef::new("a.jpg"), ImageRef::new("b.jpg")],
//!     GalleryConfig::new("Grand Ballroom"),
//!     HttpPreloader::shared(),
//! )
//! .await?;
//!
//! let view = gallery.toggle_pause().await?;
//! assert!(view.paused);
//! ```

pub mod handle;
pub mod preload;
pub mod reducer;
pub mod types;
pub mod view;

pub use handle::RotatingGallery;
pub use preload::{HttpPreloader, NoopPreloader, PreloadError, Preloader, RecordingPreloader};
pub use reducer::{GalleryEnvironment, GalleryReducer};
pub use types::{
    AUTO_ADVANCE, DEFAULT_ROTATION_INTERVAL, GalleryAction, GalleryConfig, GalleryState, ImageRef,
    TRANSITION_DURATION, TRANSITION_UNLOCK,
};
pub use view::{GalleryView, RenderPlan, Slide};
