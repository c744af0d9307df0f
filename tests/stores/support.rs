use std::sync::Arc;

use atelier::{Artwork, ArtworkStatus, Clock, FixedClock, NewArtwork, Record, RecordStore};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Route store logs to the test harness. Set ATELIER_LOG to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ATELIER_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_test_writer()
        .try_init();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(date(2024, 6, 1)))
}

pub fn artwork(id: &str, status: ArtworkStatus, price: i64, sold_price: Option<i64>) -> Artwork {
    Artwork::from_draft(
        id.to_string(),
        NewArtwork {
            title: format!("Work {}", id),
            medium: "Oil on Canvas".into(),
            price: Decimal::from(price),
            status,
            sold_price: sold_price.map(Decimal::from),
            sold_date: sold_price.map(|_| date(2024, 2, 14)),
            ..Artwork::blank_draft(date(2024, 1, 1))
        },
        date(2024, 1, 1),
    )
}

pub fn artwork_store(seed: Vec<Artwork>) -> RecordStore<Artwork> {
    init_tracing();
    RecordStore::with_clock(seed, clock())
}
