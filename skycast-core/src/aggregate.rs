//! Reduction of raw forecast samples into display-ready slices.
//!
//! The upstream forecast feed is a chronological list of 3-hourly samples.
//! `hourly_slice` passes the first few through; `daily_slice` folds them
//! into one entry per calendar day of the *queried location*, which is why
//! both take the feed's UTC offset rather than using the host timezone.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};

use crate::model::{DailyEntry, ForecastSample, HourlyEntry};

/// Number of samples shown on the dashboard's hourly strip.
pub const HOURLY_LEN: usize = 8;

/// Number of days shown on the forecast screen.
pub const DAILY_LEN: usize = 7;

/// Wind speed in km/h as displayed, from the feed's m/s.
pub fn kmh_from_mps(mps: f64) -> i32 {
    (mps * 3.6).round() as i32
}

/// Visibility in km as displayed, from the feed's meters.
pub fn km_from_m(meters: i64) -> i32 {
    (meters as f64 / 1000.0).round() as i32
}

/// Temperature rounded to the nearest whole degree for display.
pub fn round_temp(celsius: f64) -> i32 {
    celsius.round() as i32
}

fn local_time(timestamp: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&offset))
}

/// First `HOURLY_LEN` samples in feed order, labeled with the local hour.
pub fn hourly_slice(samples: &[ForecastSample], offset: FixedOffset) -> Vec<HourlyEntry> {
    samples
        .iter()
        .take(HOURLY_LEN)
        .filter_map(|sample| {
            let local = local_time(sample.timestamp, offset)?;
            Some(HourlyEntry {
                label: format!("{}:00", local.hour()),
                temperature_c: round_temp(sample.temperature_c),
                icon: sample.icon.clone(),
                condition: sample.condition.clone(),
            })
        })
        .collect()
}

/// Fold every sample into one entry per local calendar day.
///
/// The first sample of a day seeds its entry (labels, icon, condition,
/// humidity, wind); later samples of the same day only widen the
/// running high/low. Kept: the first `DAILY_LEN` distinct days in
/// encounter order.
pub fn daily_slice(samples: &[ForecastSample], offset: FixedOffset) -> Vec<DailyEntry> {
    let mut days: Vec<(NaiveDate, DailyEntry)> = Vec::new();

    for sample in samples {
        let Some(local) = local_time(sample.timestamp, offset) else {
            continue;
        };
        let key = local.date_naive();

        if let Some((_, entry)) = days.iter_mut().find(|(day, _)| *day == key) {
            entry.high_c = entry.high_c.max(sample.temp_max_c);
            entry.low_c = entry.low_c.min(sample.temp_min_c);
        } else {
            days.push((
                key,
                DailyEntry {
                    day: local.format("%a").to_string(),
                    date: local.format("%b %-d").to_string(),
                    high_c: sample.temp_max_c,
                    low_c: sample.temp_min_c,
                    icon: sample.icon.clone(),
                    condition: sample.condition.clone(),
                    humidity_pct: sample.humidity_pct,
                    wind_kmh: kmh_from_mps(sample.wind_mps),
                },
            ));
        }
    }

    days.into_iter()
        .take(DAILY_LEN)
        .map(|(_, entry)| entry)
        .collect()
}
