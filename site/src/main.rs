//! Venue site demo.
//!
//! Lists venues and services, loads the first venue's details and runs its
//! gallery for a few rotations before tearing it down.
//!
//! # Running
//!
//! ```bash
//! SITE_BACKEND_URL=https://<project>.example.co SITE_BACKEND_KEY=<key> cargo run -p venue-site
//! ```
//!
//! Without `SITE_BACKEND_URL` the demo runs against built-in sample data.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use venue_gallery::{HttpPreloader, RotatingGallery};
use venue_runtime::Store;
use venue_site::venue_details::{
    Phase, VenueDetailsAction, VenueDetailsReducer, VenueDetailsState,
};
use venue_site::{Backend, Config, RestBackend, SiteEnvironment, catalog, fixtures};

const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend: Arc<dyn Backend> = match &config.backend.url {
        Some(url) => {
            info!(backend_url = %url, "Using hosted backend");
            Arc::new(RestBackend::new(url.clone(), config.backend.api_key.clone()))
        },
        None => {
            info!("SITE_BACKEND_URL not set, using sample data");
            Arc::new(fixtures::sample_backend())
        },
    };

    let venues = catalog::list_venues(backend.as_ref()).await;
    for venue in &venues {
        info!(id = %venue.id, name = %venue.name, capacity = venue.capacity, "Venue");
    }
    for service in catalog::list_services(backend.as_ref()).await {
        info!(name = %service.name, price = service.price, "Service");
    }

    let Some(first) = venues.first() else {
        warn!("No venues to show");
        return Ok(());
    };

    let details = Store::new(
        VenueDetailsState::default(),
        VenueDetailsReducer::new(),
        SiteEnvironment::with_system_clock(Arc::clone(&backend)),
    );
    details
        .send_and_wait_for(
            VenueDetailsAction::Load {
                venue_id: first.id.clone(),
            },
            |action| {
                matches!(
                    action,
                    VenueDetailsAction::Loaded { .. } | VenueDetailsAction::LoadFailed { .. }
                )
            },
            LOAD_TIMEOUT,
        )
        .await
        .context("loading venue details")?;

    let (phase, images, booked) = details
        .state(|s| (s.phase, s.images.clone(), s.booked_dates.len()))
        .await;
    if phase != Phase::Ready {
        warn!(venue = %first.name, "Venue could not be loaded");
        return Ok(());
    }
    info!(venue = %first.name, images = images.len(), booked, "Venue loaded");

    let gallery_config = config.gallery.gallery_config(&first.name);
    let interval = gallery_config.rotation_interval;
    let gallery = RotatingGallery::start(images, gallery_config, HttpPreloader::shared())
        .await
        .context("starting gallery")?;

    if let Some(slide) = gallery.render().await.active_slide() {
        info!(image = %slide.image, alt = %slide.alt, "Showing");
    }

    for _ in 0..config.gallery.demo_rotations {
        tokio::time::sleep(interval).await;
        let view = gallery.view().await;
        info!(
            active = view.active_index,
            of = view.len,
            paused = view.paused,
            "Gallery"
        );
    }

    let cancelled = gallery.teardown();
    info!(cancelled, "Gallery torn down");

    details
        .shutdown_default()
        .await
        .context("shutting down venue details")?;
    Ok(())
}
