//! REST client for the hosted backend

use super::{Backend, BackendFuture, BackendResult};
use crate::error::BackendError;
use crate::types::{
    BookingStatus, ContactMessage, NewBooking, Service, Venue, VenueId, VenueImageRow,
};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

type Query = Vec<(&'static str, String)>;

/// Backend client speaking the hosted service's REST API
///
/// Tables live under `{base_url}/rest/v1/{table}`; filters use the
/// `column=eq.value` query syntax. Every request carries the project key both
/// as `apikey` and as a bearer token.
#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    /// Create a new client for the project at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Create a client sharing an existing HTTP client
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Select rows from `table`
    fn select<T>(&self, table: &'static str, query: Query) -> BackendFuture<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self.authorized(self.client.get(self.table_url(table)).query(&query));

        Box::pin(async move {
            tracing::debug!(table, "Selecting rows");
            let response = request
                .send()
                .await
                .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

            let response = check_status(response).await?;
            response
                .json::<Vec<T>>()
                .await
                .map_err(|e| BackendError::ResponseParseFailed(e.to_string()))
        })
    }

    /// Insert one row into `table`
    fn insert<T>(&self, table: &'static str, row: &T) -> BackendFuture<()>
    where
        T: Serialize,
    {
        let request = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .json(row);

        Box::pin(async move {
            tracing::debug!(table, "Inserting row");
            let response = request
                .send()
                .await
                .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

            check_status(response).await.map(|_| ())
        })
    }
}

async fn check_status(response: Response) -> BackendResult<Response> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(BackendError::Unauthorized),
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(BackendError::ApiError {
                status: status.as_u16(),
                message: body,
            })
        },
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

#[derive(Deserialize)]
struct BookingDateRow {
    booking_date: NaiveDate,
}

impl Backend for RestBackend {
    fn list_venues(&self) -> BackendFuture<Vec<Venue>> {
        self.select(
            "venues",
            vec![("select", "*".to_string()), ("order", "name".to_string())],
        )
    }

    fn list_services(&self) -> BackendFuture<Vec<Service>> {
        self.select(
            "services",
            vec![("select", "*".to_string()), ("order", "name".to_string())],
        )
    }

    fn venue(&self, id: &VenueId) -> BackendFuture<Option<Venue>> {
        let rows = self.select::<Venue>(
            "venues",
            vec![("select", "*".to_string()), ("id", eq(id))],
        );
        Box::pin(async move { Ok(rows.await?.into_iter().next()) })
    }

    fn venue_images(&self, id: &VenueId) -> BackendFuture<Vec<String>> {
        let rows = self.select::<VenueImageRow>(
            "venue_images",
            vec![("select", "image_url".to_string()), ("venue_id", eq(id))],
        );
        Box::pin(async move {
            Ok(rows.await?.into_iter().map(|row| row.image_url).collect())
        })
    }

    fn confirmed_booking_dates(&self, id: &VenueId) -> BackendFuture<Vec<NaiveDate>> {
        let rows = self.select::<BookingDateRow>(
            "bookings",
            vec![
                ("select", "booking_date".to_string()),
                ("venue_id", eq(id)),
                ("status", eq(BookingStatus::Confirmed.as_str())),
            ],
        );
        Box::pin(async move {
            Ok(rows.await?.into_iter().map(|row| row.booking_date).collect())
        })
    }

    fn has_confirmed_booking(&self, id: &VenueId, date: NaiveDate) -> BackendFuture<bool> {
        let rows = self.select::<serde_json::Value>(
            "bookings",
            vec![
                ("select", "id".to_string()),
                ("venue_id", eq(id)),
                ("booking_date", eq(date)),
                ("status", eq(BookingStatus::Confirmed.as_str())),
                ("limit", "1".to_string()),
            ],
        );
        Box::pin(async move { Ok(!rows.await?.is_empty()) })
    }

    fn insert_booking(&self, booking: NewBooking) -> BackendFuture<()> {
        self.insert("bookings", &booking)
    }

    fn insert_contact_message(&self, message: ContactMessage) -> BackendFuture<()> {
        self.insert("contact_messages", &message)
    }
}

impl std::fmt::Debug for RestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestBackend")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
