//! Venue details page: gallery images, availability and the booking flow.
//!
//! Loading fetches the venue, its gallery images, the confirmed booking dates
//! and the service list in one effect. Submitting re-checks availability,
//! then stores a pending booking. When the booking insert is rejected the
//! request is filed as a contact message instead, so no request is lost.

use crate::backend::Backend;
use crate::environment::SiteEnvironment;
use crate::error::SiteError;
use crate::types::{
    BookingDetails, BookingField, BookingStatus, ContactMessage, NewBooking, Service, Venue,
    VenueId,
};
use chrono::{Months, NaiveDate};
use std::collections::BTreeSet;
use std::sync::Arc;
use venue_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use venue_gallery::ImageRef;

/// How far ahead a date can be booked
pub const BOOKING_WINDOW: Months = Months::new(12);

/// Curated images shown for well-known venues without gallery rows
const SAMPLE_IMAGES: &[(&str, &[&str])] = &[
    (
        "Grand Ballroom",
        &[
            "https://images.unsplash.com/photo-1519167758481-83f550bb49b3?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
            "https://images.unsplash.com/photo-1533174072545-7a4b6ad7a6c3?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        ],
    ),
    (
        "Garden Terrace",
        &[
            "https://images.unsplash.com/photo-1464366400600-7168b8af9bc3?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
            "https://images.unsplash.com/photo-1519225421980-715cb0215aed?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        ],
    ),
    (
        "Lakeside Manor",
        &[
            "https://images.unsplash.com/photo-1519225421980-715cb0215aed?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
            "https://images.unsplash.com/photo-1464366400600-7168b8af9bc3?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
        ],
    ),
];

/// Gallery images for a venue
///
/// `rows` are the venue's `venue_images` rows, `None` when they could not be
/// loaded. Without rows the main image is followed by the curated samples for
/// the venue's name. With rows, the main image is put first unless already
/// present. Duplicates are dropped, keeping the first occurrence.
#[must_use]
pub fn gallery_images(venue: &Venue, rows: Option<Vec<String>>) -> Vec<ImageRef> {
    let mut urls: Vec<String> = match rows {
        Some(rows) if !rows.is_empty() => {
            let mut urls = rows;
            if let Some(main) = &venue.image_url {
                if !urls.contains(main) {
                    urls.insert(0, main.clone());
                }
            }
            urls
        },
        _ => {
            tracing::debug!(venue = %venue.name, "Using fallback images");
            venue
                .image_url
                .iter()
                .cloned()
                .chain(
                    SAMPLE_IMAGES
                        .iter()
                        .filter(|(name, _)| *name == venue.name)
                        .flat_map(|(_, urls)| urls.iter().map(|url| (*url).to_string())),
                )
                .collect()
        },
    };

    let mut seen = std::collections::HashSet::new();
    urls.retain(|url| seen.insert(url.clone()));
    urls.into_iter().map(ImageRef::from).collect()
}

/// Where a booking request ended up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingChannel {
    /// Stored as a pending booking
    Booking,
    /// Filed as a contact message after the booking insert was rejected
    ContactFallback,
}

/// Loading phase of the page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetching the venue
    Loading,
    /// Venue loaded
    Ready,
    /// The venue does not exist or could not be loaded
    NotFound,
}

/// State of the venue details page
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VenueDetailsState {
    /// Loading phase
    pub phase: Phase,
    /// Venue being shown or loaded
    pub venue_id: Option<VenueId>,
    /// The loaded venue
    pub venue: Option<Venue>,
    /// Gallery images
    pub images: Vec<ImageRef>,
    /// Services offered in the booking form
    pub services: Vec<Service>,
    /// Days with a confirmed booking
    pub booked_dates: BTreeSet<NaiveDate>,
    /// Day picked for the booking
    pub selected_date: Option<NaiveDate>,
    /// Booking form contents
    pub form: BookingDetails,
    /// Whether the booking form is open
    pub show_form: bool,
    /// Whether a submission is in flight
    pub submitting: bool,
    /// Set after a successful submission
    pub confirmation: Option<BookingChannel>,
    /// Last error shown to the user
    pub error: Option<SiteError>,
}

impl VenueDetailsState {
    /// Whether `date` can be picked, given today's date
    ///
    /// A date is available when it is not booked and lies between today and
    /// the end of the booking window, both inclusive.
    #[must_use]
    pub fn is_available(&self, date: NaiveDate, today: NaiveDate) -> bool {
        let last = today.checked_add_months(BOOKING_WINDOW).unwrap_or(NaiveDate::MAX);
        (today..=last).contains(&date) && !self.booked_dates.contains(&date)
    }
}

/// Everything that can happen on the venue details page
#[derive(Clone, Debug, PartialEq)]
pub enum VenueDetailsAction {
    /// Load a venue
    Load {
        /// Venue to show
        venue_id: VenueId,
    },
    /// The venue and its related rows arrived
    Loaded {
        /// The venue
        venue: Box<Venue>,
        /// Gallery images
        images: Vec<ImageRef>,
        /// Days with a confirmed booking
        booked_dates: Vec<NaiveDate>,
        /// Services for the booking form
        services: Vec<Service>,
    },
    /// The venue could not be loaded
    LoadFailed {
        /// Venue that failed
        venue_id: VenueId,
        /// Why
        error: SiteError,
    },
    /// The user picked a date
    SelectDate {
        /// Picked day
        date: NaiveDate,
    },
    /// The user edited a form field
    UpdateField {
        /// Edited field
        field: BookingField,
        /// New value
        value: String,
    },
    /// The user submitted the booking form
    Submit,
    /// The request was stored
    BookingRecorded {
        /// Where it was stored
        channel: BookingChannel,
    },
    /// The request could not be stored
    BookingFailed {
        /// Why
        error: SiteError,
    },
}

/// Reducer for the venue details page
#[derive(Clone, Debug, Default)]
pub struct VenueDetailsReducer;

impl VenueDetailsReducer {
    /// Creates a new `VenueDetailsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

async fn load(backend: Arc<dyn Backend>, venue_id: VenueId) -> VenueDetailsAction {
    let venue = match backend.venue(&venue_id).await {
        Ok(Some(venue)) => venue,
        Ok(None) => {
            return VenueDetailsAction::LoadFailed {
                error: SiteError::VenueNotFound(venue_id.to_string()),
                venue_id,
            };
        },
        Err(error) => {
            tracing::error!(%venue_id, %error, "Error loading venue");
            return VenueDetailsAction::LoadFailed {
                venue_id,
                error: error.into(),
            };
        },
    };

    // Side queries are independent; any of them may fail without failing the page.
    let (rows, booked_dates, services) = futures::join!(
        backend.venue_images(&venue_id),
        backend.confirmed_booking_dates(&venue_id),
        backend.list_services(),
    );

    let rows = rows
        .inspect_err(|error| tracing::warn!(%venue_id, %error, "Error fetching venue images"))
        .ok();
    let booked_dates = booked_dates.unwrap_or_else(|error| {
        tracing::error!(%venue_id, %error, "Error fetching bookings");
        Vec::new()
    });
    let services = services.unwrap_or_else(|error| {
        tracing::error!(%error, "Error fetching services");
        Vec::new()
    });

    VenueDetailsAction::Loaded {
        images: gallery_images(&venue, rows),
        venue: Box::new(venue),
        booked_dates,
        services,
    }
}

/// Body of the contact message filed when the booking insert is rejected
#[must_use]
pub fn booking_request_message(venue: &Venue, date: NaiveDate, details: &BookingDetails) -> String {
    format!(
        "VENUE BOOKING REQUEST:\n\nVenue: {}\n\nDate: {}\n\nPhone: {}\n\nServices: {}\n\nNotes: {}",
        venue.name,
        date.format("%-m/%-d/%Y"),
        details.phone,
        details.services,
        details.additional_notes,
    )
}

async fn submit(
    backend: Arc<dyn Backend>,
    venue: Venue,
    date: NaiveDate,
    details: BookingDetails,
) -> VenueDetailsAction {
    match backend.has_confirmed_booking(&venue.id, date).await {
        Ok(true) => {
            tracing::info!(venue_id = %venue.id, %date, "Date taken before submission");
            return VenueDetailsAction::BookingFailed {
                error: SiteError::DateUnavailable(date),
            };
        },
        Ok(false) => {},
        Err(error) => {
            tracing::warn!(%error, "Availability check failed, submitting anyway");
        },
    }

    let request = NewBooking {
        venue_id: venue.id.clone(),
        booking_date: date,
        status: BookingStatus::Pending,
        email: details.email.clone(),
        phone: details.phone.clone(),
        services: details.services.clone(),
        additional_notes: details.additional_notes.clone(),
    };

    match backend.insert_booking(request).await {
        Ok(()) => {
            tracing::info!(venue_id = %venue.id, %date, "Booking request stored");
            return VenueDetailsAction::BookingRecorded {
                channel: BookingChannel::Booking,
            };
        },
        Err(error) => {
            tracing::warn!(%error, "Booking insert rejected, filing as contact message");
        },
    }

    let message = ContactMessage {
        name: details.sender_name().to_string(),
        email: details.email.clone(),
        message: booking_request_message(&venue, date, &details),
    };

    match backend.insert_contact_message(message).await {
        Ok(()) => VenueDetailsAction::BookingRecorded {
            channel: BookingChannel::ContactFallback,
        },
        Err(error) => {
            tracing::error!(%error, "Error booking venue");
            VenueDetailsAction::BookingFailed {
                error: error.into(),
            }
        },
    }
}

impl Reducer for VenueDetailsReducer {
    type State = VenueDetailsState;
    type Action = VenueDetailsAction;
    type Environment = SiteEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            VenueDetailsAction::Load { venue_id } => {
                *state = VenueDetailsState {
                    phase: Phase::Loading,
                    venue_id: Some(venue_id.clone()),
                    ..VenueDetailsState::default()
                };

                let backend = Arc::clone(&env.backend);
                smallvec![async_effect! {
                    Some(load(backend, venue_id).await)
                }]
            },

            VenueDetailsAction::Loaded {
                venue,
                images,
                booked_dates,
                services,
            } => {
                // A newer Load superseded this one.
                if state.venue_id.as_ref() != Some(&venue.id) {
                    return smallvec![Effect::None];
                }
                state.phase = Phase::Ready;
                state.images = images;
                state.booked_dates = booked_dates.into_iter().collect();
                state.services = services;
                state.venue = Some(*venue);
                smallvec![Effect::None]
            },

            VenueDetailsAction::LoadFailed { venue_id, error } => {
                if state.venue_id.as_ref() == Some(&venue_id) {
                    state.phase = Phase::NotFound;
                    state.error = Some(error);
                }
                smallvec![Effect::None]
            },

            VenueDetailsAction::SelectDate { date } => {
                if state.phase != Phase::Ready || state.submitting {
                    return smallvec![Effect::None];
                }
                if !state.is_available(date, env.today()) {
                    state.error = Some(SiteError::DateUnavailable(date));
                    return smallvec![Effect::None];
                }
                state.selected_date = Some(date);
                state.show_form = true;
                state.confirmation = None;
                state.error = None;
                smallvec![Effect::None]
            },

            VenueDetailsAction::UpdateField { field, value } => {
                state.form.set(field, value);
                smallvec![Effect::None]
            },

            VenueDetailsAction::Submit => {
                if state.submitting {
                    return smallvec![Effect::None];
                }
                let (Some(venue), Some(date)) = (&state.venue, state.selected_date) else {
                    return smallvec![Effect::None];
                };
                if let Some(field) = state.form.missing_field() {
                    state.error = Some(SiteError::MissingField(field));
                    return smallvec![Effect::None];
                }

                let backend = Arc::clone(&env.backend);
                let venue = venue.clone();
                let details = state.form.clone();
                state.submitting = true;
                state.error = None;

                smallvec![async_effect! {
                    Some(submit(backend, venue, date, details).await)
                }]
            },

            VenueDetailsAction::BookingRecorded { channel } => {
                state.submitting = false;
                state.confirmation = Some(channel);
                state.selected_date = None;
                state.show_form = false;
                state.form = BookingDetails::default();
                smallvec![Effect::None]
            },

            VenueDetailsAction::BookingFailed { error } => {
                state.submitting = false;
                if let SiteError::DateUnavailable(date) = &error {
                    state.booked_dates.insert(*date);
                }
                state.error = Some(error);
                smallvec![Effect::None]
            },
        }
    }
}
