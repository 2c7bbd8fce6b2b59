//! Gallery state, actions and configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use venue_core::effect::EffectId;

/// Time between automatic advances unless overridden
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_millis(3000);

/// Length of the cross-fade between two images
pub const TRANSITION_DURATION: Duration = Duration::from_millis(1000);

/// The recurring auto-advance timer
pub const AUTO_ADVANCE: EffectId = EffectId::new("gallery.auto_advance");

/// The pending transition-lock release
pub const TRANSITION_UNLOCK: EffectId = EffectId::new("gallery.transition_unlock");

/// Locator of an image resource (usually a URL)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Creates a new `ImageRef`
    #[must_use]
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Returns the locator
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}

impl From<String> for ImageRef {
    fn from(locator: String) -> Self {
        Self(locator)
    }
}

/// Timing and labelling of a gallery
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use venue_gallery::GalleryConfig;
///
/// let config = GalleryConfig::new("Grand Ballroom")
///     .with_rotation_interval(Duration::from_secs(5));
///
/// assert_eq!(config.rotation_interval, Duration::from_secs(5));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Time between automatic advances
    pub rotation_interval: Duration,
    /// How long an index change holds the transition lock
    pub transition_duration: Duration,
    /// Alt text prefix for the rendered images
    pub alt: String,
}

impl GalleryConfig {
    /// Creates a config with default timings
    #[must_use]
    pub fn new(alt: impl Into<String>) -> Self {
        Self {
            rotation_interval: DEFAULT_ROTATION_INTERVAL,
            transition_duration: TRANSITION_DURATION,
            alt: alt.into(),
        }
    }

    /// Overrides the rotation interval
    ///
    /// A zero interval falls back to the default.
    #[must_use]
    pub const fn with_rotation_interval(mut self, interval: Duration) -> Self {
        self.rotation_interval = if interval.is_zero() {
            DEFAULT_ROTATION_INTERVAL
        } else {
            interval
        };
        self
    }

    /// Applies an optional rotation override in milliseconds
    #[must_use]
    pub const fn with_rotation_override(self, millis: Option<u64>) -> Self {
        match millis {
            Some(millis) => self.with_rotation_interval(Duration::from_millis(millis)),
            None => self,
        }
    }

    /// Overrides the transition duration
    #[must_use]
    pub const fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self::new("Gallery")
    }
}

/// State of one gallery instance
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryState {
    /// Images in display order
    pub images: Vec<ImageRef>,
    /// Index of the displayed image
    pub active_index: usize,
    /// Whether a transition is in flight
    pub transitioning: bool,
    /// Whether auto-advance is paused
    pub paused: bool,
}

impl GalleryState {
    /// Creates a state showing the first image
    #[must_use]
    pub const fn new(images: Vec<ImageRef>) -> Self {
        Self {
            images,
            active_index: 0,
            transitioning: false,
            paused: false,
        }
    }

    /// Number of images
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether there is nothing to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Whether the gallery has enough images to rotate
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.images.len() > 1
    }

    /// The displayed image
    #[must_use]
    pub fn active_image(&self) -> Option<&ImageRef> {
        self.images.get(self.active_index)
    }

    /// Index after the active one, wrapping at the end
    #[must_use]
    pub fn next_index(&self) -> Option<usize> {
        self.is_rotating()
            .then(|| (self.active_index + 1) % self.images.len())
    }

    /// Index before the active one, wrapping at the start
    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.is_rotating()
            .then(|| (self.active_index + self.images.len() - 1) % self.images.len())
    }
}

/// Everything that can happen to a gallery
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalleryAction {
    /// The gallery was mounted: preload and start rotating
    Start,
    /// Show the next image
    Advance,
    /// Show the previous image
    Retreat,
    /// Show the image at `index`
    JumpTo {
        /// Target index
        index: usize,
    },
    /// Pause or resume auto-advance
    TogglePause,
    /// The auto-advance timer fired
    Tick,
    /// The transition window elapsed
    TransitionFinished,
    /// Swap in a new image sequence
    ReplaceImages {
        /// The new images, in display order
        images: Vec<ImageRef>,
    },
}

impl GalleryAction {
    /// Whether this action moves the active index and so needs the transition lock
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(self, Self::Advance | Self::Retreat | Self::JumpTo { .. })
    }
}
