//! Dependencies injected into the site reducers

use crate::backend::Backend;
use std::sync::Arc;
use venue_core::environment::{Clock, SystemClock};

/// Environment shared by the venue-details and contact reducers
#[derive(Clone)]
pub struct SiteEnvironment {
    /// Hosted backend
    pub backend: Arc<dyn Backend>,
    /// Clock for "today"
    pub clock: Arc<dyn Clock>,
}

impl SiteEnvironment {
    /// Creates a new `SiteEnvironment`
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Environment using the system clock
    #[must_use]
    pub fn with_system_clock(backend: Arc<dyn Backend>) -> Self {
        Self::new(backend, Arc::new(SystemClock))
    }

    /// Today's date according to the clock
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.now().date_naive()
    }
}

impl std::fmt::Debug for SiteEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteEnvironment")
            .field("today", &self.today())
            .finish_non_exhaustive()
    }
}
