//! Display specifications: what each chart shows, computed from the dataset
//! and the current selections without touching the UI.
//!
//! ```text
//!   Dataset + Metric            ──► scatter::ScatterSpec
//!   Dataset + LocationSelection ──► histogram::HistogramSpec
//!   Dataset                     ──► summary::LocationSummary[]
//! ```

use chrono::{DateTime, NaiveDateTime};

pub mod histogram;
pub mod scatter;
pub mod summary;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Plot x coordinate for a timestamp: fractional days since the Unix epoch.
pub fn date_to_axis(date: NaiveDateTime) -> f64 {
    date.and_utc().timestamp() as f64 / SECONDS_PER_DAY
}

/// Inverse of [`date_to_axis`], to the second.
pub fn axis_to_date(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() {
        return None;
    }
    DateTime::from_timestamp((value * SECONDS_PER_DAY).round() as i64, 0).map(|dt| dt.naive_utc())
}
