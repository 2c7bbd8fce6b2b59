//! Rows of the hosted backend and the form models built on them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a venue
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(String);

impl VenueId {
    /// Creates a new `VenueId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bookable venue (`venues` table)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Venue id
    pub id: VenueId,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Maximum number of guests
    pub capacity: u32,
    /// Main image
    pub image_url: Option<String>,
    /// Marketing description
    pub description: Option<String>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// An add-on service (`services` table)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Service id
    pub id: String,
    /// Display name
    pub name: String,
    /// Marketing description
    pub description: String,
    /// Price in dollars
    pub price: f64,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// One row of `venue_images`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueImageRow {
    /// Image locator
    pub image_url: String,
}

/// Lifecycle of a booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Requested, not yet confirmed by staff
    Pending,
    /// Confirmed; the date is taken
    Confirmed,
    /// Cancelled; the date is free again
    Cancelled,
}

impl BookingStatus {
    /// Value stored in the `status` column
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A booking row to insert (`bookings` table)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    /// Venue being booked
    pub venue_id: VenueId,
    /// Requested day
    pub booking_date: NaiveDate,
    /// Always `pending` when created from the site
    pub status: BookingStatus,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Requested service, free text
    pub services: String,
    /// Anything else the customer wrote
    pub additional_notes: String,
}

/// A stored booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking id
    pub id: String,
    /// Venue id
    pub venue_id: VenueId,
    /// Booked day
    pub booking_date: NaiveDate,
    /// Booking status
    pub status: BookingStatus,
}

/// A message for the staff inbox (`contact_messages` table)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Message body
    pub message: String,
}

/// Editable fields of the booking form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingField {
    /// Contact email
    Email,
    /// Contact phone
    Phone,
    /// Requested service
    Services,
    /// Free-form notes
    AdditionalNotes,
}

/// Booking form contents
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingDetails {
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Requested service
    pub services: String,
    /// Free-form notes
    pub additional_notes: String,
}

impl BookingDetails {
    /// Sets one field
    pub fn set(&mut self, field: BookingField, value: String) {
        match field {
            BookingField::Email => self.email = value,
            BookingField::Phone => self.phone = value,
            BookingField::Services => self.services = value,
            BookingField::AdditionalNotes => self.additional_notes = value,
        }
    }

    /// First required field left blank
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.email.trim().is_empty() {
            Some("email")
        } else if self.phone.trim().is_empty() {
            Some("phone")
        } else {
            None
        }
    }

    /// The name to file a fallback request under: the local part of the email
    #[must_use]
    pub fn sender_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// Editable fields of the contact form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    /// Sender name
    Name,
    /// Sender email
    Email,
    /// Message body
    Message,
}

impl ContactMessage {
    /// Sets one field
    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    /// First required field left blank
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .find_map(|(field, value)| value.trim().is_empty().then_some(field))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_parses_backend_row() {
        let venue: Venue = serde_json::from_value(serde_json::json!({
            "id": "v-1",
            "name": "Grand Ballroom",
            "address": "1 Main St",
            "capacity": 300,
            "image_url": null,
            "created_at": "2024-03-01T10:00:00.123456+00:00",
            "updated_at": "2024-03-01T10:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(venue.id, VenueId::new("v-1"));
        assert_eq!(venue.image_url, None);
        assert_eq!(venue.description, None);
    }

    #[test]
    fn test_new_booking_wire_format() {
        let booking = NewBooking {
            venue_id: VenueId::new("v-1"),
            booking_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            status: BookingStatus::Pending,
            email: "amy@example.com".to_string(),
            phone: "555".to_string(),
            services: String::new(),
            additional_notes: String::new(),
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["booking_date"], "2025-06-14");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["venue_id"], "v-1");
    }

    #[test]
    fn test_booking_presence_checks() {
        let mut details = BookingDetails::default();
        assert_eq!(details.missing_field(), Some("email"));

        details.set(BookingField::Email, "amy@example.com".to_string());
        assert_eq!(details.missing_field(), Some("phone"));

        details.set(BookingField::Phone, "555-0100".to_string());
        assert_eq!(details.missing_field(), None);
        assert_eq!(details.sender_name(), "amy");
    }

    #[test]
    fn test_contact_presence_checks() {
        let mut message = ContactMessage::default();
        message.set(ContactField::Name, "Amy".to_string());
        message.set(ContactField::Email, "amy@example.com".to_string());
        assert_eq!(message.missing_field(), Some("message"));

        message.set(ContactField::Message, "  ".to_string());
        assert_eq!(message.missing_field(), Some("message"));
    }
}
