//! Best-effort image preloading.
//!
//! Every image of a new sequence is fetched and decoded ahead of display.
//! Failures are logged and otherwise ignored: the image simply loads on
//! first display instead.

use crate::types::ImageRef;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Boxed preload future
pub type PreloadFuture = Pin<Box<dyn Future<Output = Result<(), PreloadError>> + Send>>;

/// Why an image could not be preloaded
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreloadError {
    /// The request never completed
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("Unexpected status {0}")]
    Status(u16),

    /// The body was not a decodable image
    #[error("Decode failed: {0}")]
    Decode(String),
}

/// Fetches and decodes an image ahead of display
pub trait Preloader: Send + Sync {
    /// Preload one image
    ///
    /// # Errors
    ///
    /// Returns a [`PreloadError`] when the image cannot be fetched or decoded.
    fn preload(&self, image: &ImageRef) -> PreloadFuture;
}

/// Preloader that downloads over HTTP and decodes with the `image` crate
#[derive(Clone, Debug, Default)]
pub struct HttpPreloader {
    client: reqwest::Client,
}

impl HttpPreloader {
    /// Creates a preloader with a fresh HTTP client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a preloader sharing an existing HTTP client
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn Preloader> {
        Arc::new(Self::new())
    }
}

impl Preloader for HttpPreloader {
    fn preload(&self, image: &ImageRef) -> PreloadFuture {
        let client = self.client.clone();
        let url = image.as_str().to_string();

        Box::pin(async move {
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| PreloadError::Request(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(PreloadError::Status(status.as_u16()));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| PreloadError::Request(e.to_string()))?;

            tokio::task::spawn_blocking(move || {
                image::load_from_memory(&bytes)
                    .map(|_| ())
                    .map_err(|e| PreloadError::Decode(e.to_string()))
            })
            .await
            .map_err(|e| PreloadError::Decode(e.to_string()))?
        })
    }
}

/// Preloader that does nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPreloader;

impl Preloader for NoopPreloader {
    fn preload(&self, _image: &ImageRef) -> PreloadFuture {
        Box::pin(async { Ok(()) })
    }
}

/// Preloader that records requests, for tests and demos
///
/// Images marked with [`RecordingPreloader::failing_on`] fail with a status error.
#[derive(Clone, Debug, Default)]
pub struct RecordingPreloader {
    requested: Arc<Mutex<Vec<ImageRef>>>,
    failing: Arc<HashSet<ImageRef>>,
}

impl RecordingPreloader {
    /// Creates a recorder where every preload succeeds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder that fails for the given images
    #[must_use]
    pub fn failing_on(images: impl IntoIterator<Item = ImageRef>) -> Self {
        Self {
            requested: Arc::default(),
            failing: Arc::new(images.into_iter().collect()),
        }
    }

    /// Every image requested so far, in request order
    #[must_use]
    pub fn requested(&self) -> Vec<ImageRef> {
        self.requested
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Preloader for RecordingPreloader {
    fn preload(&self, image: &ImageRef) -> PreloadFuture {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(image.clone());
        }
        let result = if self.failing.contains(image) {
            Err(PreloadError::Status(404))
        } else {
            Ok(())
        };
        Box::pin(async move { result })
    }
}
