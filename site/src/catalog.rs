//! Venue and service listings.
//!
//! Listing pages never fail: a backend error is logged and shows as an empty list.

use crate::backend::Backend;
use crate::types::{Service, Venue};

/// All venues, ordered by name
pub async fn list_venues(backend: &dyn Backend) -> Vec<Venue> {
    match backend.list_venues().await {
        Ok(venues) => {
            tracing::debug!(count = venues.len(), "Loaded venues");
            venues
        },
        Err(error) => {
            tracing::error!(%error, "Error fetching venues");
            Vec::new()
        },
    }
}

/// All services, ordered by name
pub async fn list_services(backend: &dyn Backend) -> Vec<Service> {
    match backend.list_services().await {
        Ok(services) => {
            tracing::debug!(count = services.len(), "Loaded services");
            services
        },
        Err(error) => {
            tracing::error!(%error, "Error fetching services");
            Vec::new()
        },
    }
}
