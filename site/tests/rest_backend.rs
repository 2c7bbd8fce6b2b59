//! REST backend against a mock HTTP server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::NaiveDate;
use serde_json::json;
use venue_site::backend::Backend;
use venue_site::types::{BookingStatus, ContactMessage, NewBooking, VenueId};
use venue_site::{BackendError, RestBackend};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "anon-key";

fn venue_row(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "address": "1 Main St",
        "capacity": 200,
        "image_url": "https://img.example/main.jpg",
        "description": "Lovely",
        "created_at": "2024-03-01T10:00:00+00:00",
        "updated_at": "2024-03-01T10:00:00+00:00"
    })
}

async fn setup() -> (MockServer, RestBackend) {
    let server = MockServer::start().await;
    let backend = RestBackend::new(server.uri(), KEY);
    (server, backend)
}

#[tokio::test]
async fn test_list_venues_sends_key_and_order() {
    let (server, backend) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/venues"))
        .and(query_param("order", "name"))
        .and(header("apikey", KEY))
        .and(header("Authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            venue_row("v-1", "Garden Terrace"),
            venue_row("v-2", "Lakeside Manor"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let venues = backend.list_venues().await.unwrap();
    assert_eq!(venues.len(), 2);
    assert_eq!(venues[0].name, "Garden Terrace");
    assert_eq!(venues[1].id, VenueId::new("v-2"));
}

#[tokio::test]
async fn test_venue_lookup_filters_by_id() {
    let (server, backend) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/venues"))
        .and(query_param("id", "eq.v-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([venue_row("v-1", "Grand Ballroom")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/venues"))
        .and(query_param("id", "eq.missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let venue = backend.venue(&VenueId::new("v-1")).await.unwrap().unwrap();
    assert_eq!(venue.name, "Grand Ballroom");
    assert!(backend.venue(&VenueId::new("missing")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_confirmed_dates_query() {
    let (server, backend) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("venue_id", "eq.v-1"))
        .and(query_param("status", "eq.confirmed"))
        .and(query_param("select", "booking_date"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "booking_date": "2025-06-14" },
            { "booking_date": "2025-09-01" },
        ])))
        .mount(&server)
        .await;

    let dates = backend
        .confirmed_booking_dates(&VenueId::new("v-1"))
        .await
        .unwrap();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        ]
    );
}

#[tokio::test]
async fn test_booking_check_and_images() {
    let (server, backend) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("booking_date", "eq.2025-06-14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 7 }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/venue_images"))
        .and(query_param("venue_id", "eq.v-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "image_url": "a.jpg" },
            { "image_url": "b.jpg" },
        ])))
        .mount(&server)
        .await;

    let taken = backend
        .has_confirmed_booking(
            &VenueId::new("v-1"),
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
        )
        .await
        .unwrap();
    assert!(taken);

    let images = backend.venue_images(&VenueId::new("v-1")).await.unwrap();
    assert_eq!(images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
}

#[tokio::test]
async fn test_insert_booking_posts_row() {
    let (server, backend) = setup().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .and(header("Prefer", "return=minimal"))
        .and(body_json(json!({
            "venue_id": "v-1",
            "booking_date": "2025-06-15",
            "status": "pending",
            "email": "amy@example.com",
            "phone": "555-0100",
            "services": "",
            "additional_notes": ""
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    backend
        .insert_booking(NewBooking {
            venue_id: VenueId::new("v-1"),
            booking_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            status: BookingStatus::Pending,
            email: "amy@example.com".to_string(),
            phone: "555-0100".to_string(),
            services: String::new(),
            additional_notes: String::new(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_error_statuses() {
    let (server, backend) = setup().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/contact_messages"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = backend
        .insert_contact_message(ContactMessage::default())
        .await;
    assert_eq!(result, Err(BackendError::Unauthorized));

    let result = backend.list_services().await;
    assert_eq!(
        result,
        Err(BackendError::ApiError {
            status: 500,
            message: "boom".to_string()
        })
    );
}

#[tokio::test]
async fn test_malformed_rows_are_parse_errors() {
    let (server, backend) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/venues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "v-1" }])))
        .mount(&server)
        .await;

    let result = backend.list_venues().await;
    assert!(matches!(result, Err(BackendError::ResponseParseFailed(_))));
}
