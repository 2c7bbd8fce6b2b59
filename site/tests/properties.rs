//! Property tests for gallery assembly and date availability

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use std::collections::HashSet;
use venue_site::fixtures::venue;
use venue_site::venue_details::{VenueDetailsState, gallery_images};

fn url() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a.jpg", "b.jpg", "c.jpg", "main.jpg"]).prop_map(str::to_string)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

proptest! {
    #[test]
    fn gallery_images_are_unique_and_keep_every_row(
        rows in prop::collection::vec(url(), 1..8),
        main in prop::option::of(url()),
    ) {
        let mut hall = venue("v-1", "Grand Ballroom");
        hall.image_url = main.clone();

        let images: Vec<String> = gallery_images(&hall, Some(rows.clone()))
            .iter()
            .map(|image| image.as_str().to_string())
            .collect();

        let unique: HashSet<&String> = images.iter().collect();
        prop_assert_eq!(unique.len(), images.len());
        for row in &rows {
            prop_assert!(images.contains(row));
        }
        if let Some(main) = main {
            prop_assert!(images.contains(&main));
            if !rows.contains(&main) {
                prop_assert_eq!(&images[0], &main);
            }
        }
    }

    #[test]
    fn past_and_booked_dates_are_never_available(
        offset in -400i64..400,
        booked in prop::collection::btree_set(0u64..30, 0..10),
    ) {
        let mut state = VenueDetailsState::default();
        state.booked_dates = booked
            .iter()
            .map(|days| today().checked_add_days(Days::new(*days)).unwrap())
            .collect();

        let date = today() + chrono::Duration::days(offset);
        let available = state.is_available(date, today());

        if date < today() || state.booked_dates.contains(&date) {
            prop_assert!(!available);
        }
        if available {
            prop_assert!(date <= today().checked_add_months(chrono::Months::new(12)).unwrap());
        }
    }
}
