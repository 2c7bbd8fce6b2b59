//! Access to the hosted backend.
//!
//! [`Backend`] is the seam every flow talks through. [`RestBackend`] speaks
//! the hosted service's REST dialect; [`InMemoryBackend`] keeps tables in
//! memory for tests and offline demos.

mod memory;
mod rest;

pub use memory::{InMemoryBackend, Operation};
pub use rest::RestBackend;

use crate::error::BackendError;
use crate::types::{ContactMessage, NewBooking, Service, Venue, VenueId};
use chrono::NaiveDate;
use std::future::Future;
use std::pin::Pin;

/// Backend result
pub type BackendResult<T> = Result<T, BackendError>;

/// Boxed backend future
pub type BackendFuture<T> = Pin<Box<dyn Future<Output = BackendResult<T>> + Send>>;

/// Operations the site needs from the hosted backend
pub trait Backend: Send + Sync {
    /// All venues, ordered by name
    fn list_venues(&self) -> BackendFuture<Vec<Venue>>;

    /// All services, ordered by name
    fn list_services(&self) -> BackendFuture<Vec<Service>>;

    /// One venue, `None` if no row matches
    fn venue(&self, id: &VenueId) -> BackendFuture<Option<Venue>>;

    /// Gallery image locators of a venue
    fn venue_images(&self, id: &VenueId) -> BackendFuture<Vec<String>>;

    /// Days with a confirmed booking at a venue
    fn confirmed_booking_dates(&self, id: &VenueId) -> BackendFuture<Vec<NaiveDate>>;

    /// Whether a confirmed booking exists for the venue on `date`
    fn has_confirmed_booking(&self, id: &VenueId, date: NaiveDate) -> BackendFuture<bool>;

    /// Store a booking request
    fn insert_booking(&self, booking: NewBooking) -> BackendFuture<()>;

    /// Store a message for the staff inbox
    fn insert_contact_message(&self, message: ContactMessage) -> BackendFuture<()>;
}
