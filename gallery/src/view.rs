//! Read-only projection of a gallery for rendering.

use crate::types::{GalleryState, ImageRef};
use serde::Serialize;

/// Label of the control showing the previous image
pub const PREVIOUS_LABEL: &str = "Previous image";

/// Label of the control showing the next image
pub const NEXT_LABEL: &str = "Next image";

/// Label of the pause toggle while auto-advance runs
pub const PAUSE_LABEL: &str = "Pause slideshow";

/// Label of the pause toggle while paused
pub const PLAY_LABEL: &str = "Play slideshow";

/// Indicator and control surface of a gallery
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    /// Index of the displayed image
    pub active_index: usize,
    /// Whether auto-advance is paused
    pub paused: bool,
    /// Number of images
    pub len: usize,
    /// Whether a transition is in flight
    pub transitioning: bool,
}

impl From<&GalleryState> for GalleryView {
    fn from(state: &GalleryState) -> Self {
        Self {
            active_index: state.active_index,
            paused: state.paused,
            len: state.len(),
            transitioning: state.transitioning,
        }
    }
}

/// One image of a carousel
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Slide {
    /// Image locator
    pub image: ImageRef,
    /// Alt text
    pub alt: String,
    /// Whether this is the displayed slide
    pub active: bool,
}

/// One dot of the indicator row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Indicator {
    /// Index the indicator jumps to
    pub index: usize,
    /// Accessible label
    pub label: String,
    /// Whether this indicator is highlighted
    pub active: bool,
}

/// Labels of the carousel controls
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Controls {
    /// Previous-image button
    pub previous: &'static str,
    /// Next-image button
    pub next: &'static str,
    /// Pause/resume toggle, reflecting the current state
    pub toggle: &'static str,
}

/// What a renderer should draw
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderPlan {
    /// Nothing at all
    Empty,
    /// One image without controls
    Static {
        /// The image
        slide: Slide,
    },
    /// A rotating carousel
    Carousel {
        /// Every image in order
        slides: Vec<Slide>,
        /// One indicator per image
        indicators: Vec<Indicator>,
        /// Control labels
        controls: Controls,
    },
}

impl RenderPlan {
    /// Builds the plan for `state`, labelling images with `alt`
    #[must_use]
    pub fn for_state(state: &GalleryState, alt: &str) -> Self {
        let slides: Vec<Slide> = state
            .images
            .iter()
            .enumerate()
            .map(|(index, image)| Slide {
                image: image.clone(),
                alt: format!("{alt} - image {}", index + 1),
                active: index == state.active_index,
            })
            .collect();

        if !state.is_rotating() {
            return slides
                .into_iter()
                .next()
                .map_or(Self::Empty, |slide| Self::Static { slide });
        }

        let indicators = (0..slides.len())
            .map(|index| Indicator {
                index,
                label: format!("Go to image {}", index + 1),
                active: index == state.active_index,
            })
            .collect();

        Self::Carousel {
            slides,
            indicators,
            controls: Controls {
                previous: PREVIOUS_LABEL,
                next: NEXT_LABEL,
                toggle: if state.paused { PLAY_LABEL } else { PAUSE_LABEL },
            },
        }
    }

    /// The slide on display, if any
    #[must_use]
    pub fn active_slide(&self) -> Option<&Slide> {
        match self {
            Self::Empty => None,
            Self::Static { slide } => Some(slide),
            Self::Carousel { slides, .. } => slides.iter().find(|slide| slide.active),
        }
    }
}
