//! Configuration management for the venue site.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use venue_gallery::GalleryConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hosted backend configuration
    pub backend: BackendConfig,
    /// Gallery configuration
    pub gallery: GalleryOptions,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

/// Hosted backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL; `None` runs against the in-memory sample data
    pub url: Option<String>,
    /// Project API key
    pub api_key: String,
}

/// Gallery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryOptions {
    /// Rotation interval override in milliseconds
    pub rotation_ms: Option<u64>,
    /// How many rotations the demo watches before tearing the gallery down
    pub demo_rotations: u32,
}

impl GalleryOptions {
    /// Gallery config for a venue named `alt`
    #[must_use]
    pub fn gallery_config(&self, alt: &str) -> GalleryConfig {
        GalleryConfig::new(alt).with_rotation_override(self.rotation_ms)
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            backend: BackendConfig {
                url: env::var("SITE_BACKEND_URL").ok().filter(|url| !url.is_empty()),
                api_key: env::var("SITE_BACKEND_KEY").unwrap_or_default(),
            },
            gallery: GalleryOptions {
                rotation_ms: env::var("GALLERY_ROTATION_MS")
                    .ok()
                    .and_then(|s| s.parse().ok()),
                demo_rotations: env::var("GALLERY_DEMO_ROTATIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3),
            },
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| {
                "venue_site=debug,venue_gallery=debug,venue_runtime=info".to_string()
            }),
        }
    }
}
