//! In-memory backend for tests and offline demos

use super::{Backend, BackendFuture, BackendResult};
use crate::error::BackendError;
use crate::types::{
    Booking, BookingStatus, ContactMessage, NewBooking, Service, Venue, VenueId,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Backend operations that can be made to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// [`Backend::list_venues`]
    ListVenues,
    /// [`Backend::list_services`]
    ListServices,
    /// [`Backend::venue`]
    Venue,
    /// [`Backend::venue_images`]
    VenueImages,
    /// [`Backend::confirmed_booking_dates`]
    BookedDates,
    /// [`Backend::has_confirmed_booking`]
    BookingCheck,
    /// [`Backend::insert_booking`]
    InsertBooking,
    /// [`Backend::insert_contact_message`]
    InsertContactMessage,
}

#[derive(Debug, Default)]
struct Tables {
    venues: Vec<Venue>,
    services: Vec<Service>,
    venue_images: Vec<(VenueId, String)>,
    bookings: Vec<(Booking, NewBooking)>,
    contact_messages: Vec<ContactMessage>,
    failing: HashSet<Operation>,
}

/// Backend holding every table in memory
///
/// Clones share the same tables.
///
/// # Example
///
/// ```ignore
/// let backend = InMemoryBackend::new()
///     .with_venue(venue)
///     .failing(Operation::InsertBooking);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryBackend {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryBackend {
    /// Creates an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a venue row
    #[must_use]
    pub fn with_venue(self, venue: Venue) -> Self {
        self.tables().venues.push(venue);
        self
    }

    /// Adds a service row
    #[must_use]
    pub fn with_service(self, service: Service) -> Self {
        self.tables().services.push(service);
        self
    }

    /// Adds a gallery image for a venue
    #[must_use]
    pub fn with_image(self, venue_id: &VenueId, image_url: impl Into<String>) -> Self {
        self.tables()
            .venue_images
            .push((venue_id.clone(), image_url.into()));
        self
    }

    /// Adds a booking with the given status
    #[must_use]
    pub fn with_booking(self, venue_id: &VenueId, date: NaiveDate, status: BookingStatus) -> Self {
        self.tables().insert_booking(NewBooking {
            venue_id: venue_id.clone(),
            booking_date: date,
            status,
            email: String::new(),
            phone: String::new(),
            services: String::new(),
            additional_notes: String::new(),
        });
        self
    }

    /// Makes `operation` fail from now on
    #[must_use]
    pub fn failing(self, operation: Operation) -> Self {
        self.tables().failing.insert(operation);
        self
    }

    /// Booking requests stored so far, in insertion order
    #[must_use]
    pub fn bookings(&self) -> Vec<NewBooking> {
        self.tables()
            .bookings
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    /// Contact messages stored so far, in insertion order
    #[must_use]
    pub fn contact_messages(&self) -> Vec<ContactMessage> {
        self.tables().contact_messages.clone()
    }

    /// Run `f` against the tables unless `operation` is set to fail
    fn run<T, F>(&self, operation: Operation, f: F) -> BackendFuture<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Tables) -> T,
    {
        let result: BackendResult<T> = {
            let mut tables = self.tables();
            if tables.failing.contains(&operation) {
                Err(BackendError::ApiError {
                    status: 503,
                    message: format!("{operation:?} unavailable"),
                })
            } else {
                Ok(f(&mut tables))
            }
        };
        Box::pin(async move { result })
    }
}

impl Tables {
    fn insert_booking(&mut self, request: NewBooking) {
        let booking = Booking {
            id: format!("booking-{}", self.bookings.len() + 1),
            venue_id: request.venue_id.clone(),
            booking_date: request.booking_date,
            status: request.status,
        };
        self.bookings.push((booking, request));
    }

    fn confirmed(&self, id: &VenueId) -> impl Iterator<Item = &Booking> {
        let id = id.clone();
        self.bookings
            .iter()
            .map(|(booking, _)| booking)
            .filter(move |booking| booking.venue_id == id && booking.status == BookingStatus::Confirmed)
    }
}

impl Backend for InMemoryBackend {
    fn list_venues(&self) -> BackendFuture<Vec<Venue>> {
        self.run(Operation::ListVenues, |tables| {
            let mut venues = tables.venues.clone();
            venues.sort_by(|a, b| a.name.cmp(&b.name));
            venues
        })
    }

    fn list_services(&self) -> BackendFuture<Vec<Service>> {
        self.run(Operation::ListServices, |tables| {
            let mut services = tables.services.clone();
            services.sort_by(|a, b| a.name.cmp(&b.name));
            services
        })
    }

    fn venue(&self, id: &VenueId) -> BackendFuture<Option<Venue>> {
        self.run(Operation::Venue, |tables| {
            tables.venues.iter().find(|venue| &venue.id == id).cloned()
        })
    }

    fn venue_images(&self, id: &VenueId) -> BackendFuture<Vec<String>> {
        self.run(Operation::VenueImages, |tables| {
            tables
                .venue_images
                .iter()
                .filter(|(venue_id, _)| venue_id == id)
                .map(|(_, url)| url.clone())
                .collect()
        })
    }

    fn confirmed_booking_dates(&self, id: &VenueId) -> BackendFuture<Vec<NaiveDate>> {
        self.run(Operation::BookedDates, |tables| {
            tables.confirmed(id).map(|booking| booking.booking_date).collect()
        })
    }

    fn has_confirmed_booking(&self, id: &VenueId, date: NaiveDate) -> BackendFuture<bool> {
        self.run(Operation::BookingCheck, |tables| {
            tables.confirmed(id).any(|booking| booking.booking_date == date)
        })
    }

    fn insert_booking(&self, booking: NewBooking) -> BackendFuture<()> {
        self.run(Operation::InsertBooking, |tables| tables.insert_booking(booking))
    }

    fn insert_contact_message(&self, message: ContactMessage) -> BackendFuture<()> {
        self.run(Operation::InsertContactMessage, |tables| {
            tables.contact_messages.push(message);
        })
    }
}
