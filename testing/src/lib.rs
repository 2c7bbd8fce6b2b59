//! # Venue Testing
//!
//! Testing utilities and helpers for the venue site.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Helpers for driving tokio's paused clock in timer tests
//!
//! ## Example
//!
//! ```ignore
//! use venue_testing::helpers::advance;
//!
//! #[tokio::test(start_paused = true)]
//! async fn test_auto_advance() {
//!     let gallery = RotatingGallery::new(images, GalleryConfig::default(), preloader);
//!     advance(3_001).await;
//!     assert_eq!(gallery.view().await.active_index, 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use venue_core::environment::Clock;

/// Fluent reducer testing
pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use venue_testing::mocks::FixedClock;
    /// use venue_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Helpers for timer-driven tests
///
/// All helpers assume the test runs with tokio's clock paused
/// (`#[tokio::test(start_paused = true)]`), where sleeping auto-advances
/// time once every task is idle.
pub mod helpers {
    use std::time::Duration;

    /// Let virtual time pass, running every timer that falls due on the way
    pub async fn advance(millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    /// Give spawned tasks a chance to run without moving the clock
    pub async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    /// Install a test subscriber that honours `RUST_LOG`
    ///
    /// Safe to call from several tests; only the first call installs it.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
