//! # Venue Site
//!
//! Catalog, venue details, booking and contact flows for a wedding-venue
//! business. Persistence is delegated to a hosted backend reached through the
//! [`backend::Backend`] trait.
//!
//! Page logic is written as reducers ([`venue_details::VenueDetailsReducer`],
//! [`contact::ContactReducer`]) run by a [`venue_runtime::Store`]; the listing
//! pages are plain async functions in [`catalog`].

pub mod backend;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod environment;
pub mod error;
pub mod fixtures;
pub mod types;
pub mod venue_details;

pub use backend::{Backend, InMemoryBackend, RestBackend};
pub use config::Config;
pub use environment::SiteEnvironment;
pub use error::{BackendError, SiteError};
