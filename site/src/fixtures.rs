//! Sample rows for offline demos and tests

use crate::backend::InMemoryBackend;
use crate::types::{Service, Venue, VenueId};
use chrono::{DateTime, Utc};

/// A venue with the given id and name and nothing else filled in
#[must_use]
pub fn venue(id: &str, name: &str) -> Venue {
    Venue {
        id: VenueId::new(id),
        name: name.to_string(),
        address: "123 Wedding Lane, Celebration City".to_string(),
        capacity: 150,
        image_url: None,
        description: None,
        created_at: DateTime::<Utc>::default(),
        updated_at: DateTime::<Utc>::default(),
    }
}

/// A service with the given name and price
#[must_use]
pub fn service(name: &str, price: f64) -> Service {
    Service {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        description: format!("{name} for your special day"),
        price,
        created_at: DateTime::<Utc>::default(),
        updated_at: DateTime::<Utc>::default(),
    }
}

/// A backend seeded with the three showcase venues and a few services
#[must_use]
pub fn sample_backend() -> InMemoryBackend {
    let mut ballroom = venue("grand-ballroom", "Grand Ballroom");
    ballroom.capacity = 300;
    ballroom.description = Some("An elegant ballroom with crystal chandeliers".to_string());

    let mut terrace = venue("garden-terrace", "Garden Terrace");
    terrace.capacity = 120;
    terrace.description = Some("An open-air terrace surrounded by roses".to_string());

    let mut manor = venue("lakeside-manor", "Lakeside Manor");
    manor.capacity = 200;
    manor.description = Some("A historic manor on the water".to_string());

    InMemoryBackend::new()
        .with_venue(ballroom)
        .with_venue(terrace)
        .with_venue(manor)
        .with_service(service("Catering", 2500.0))
        .with_service(service("Floral Design", 800.0))
        .with_service(service("Photography", 1500.0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
