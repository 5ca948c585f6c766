use serde::{Deserialize, Serialize};
use std::fmt;

/// What the weather API gets asked about: a city name or device coordinates,
/// never both in the same request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLocation {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedLocation::City(name) => f.write_str(name),
            ResolvedLocation::Coordinates { latitude, longitude } => {
                write!(f, "{latitude:.4}, {longitude:.4}")
            }
        }
    }
}

/// Snapshot of the current conditions at the dashboard location.
///
/// Replaced wholesale on each successful fetch; all unit conversions to
/// display form (km/h, km, rounded degrees) happen before construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub temperature_c: i32,
    pub condition: String,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_kmh: i32,
    pub visibility_km: i32,
    pub icon: String,
}

/// One raw timestamped forecast reading, consumed only during aggregation.
#[derive(Debug, Clone)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub wind_mps: f64,
    pub icon: String,
    pub condition: String,
}

/// One display-ready entry of the hourly slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Local-hour label, e.g. "9:00" or "15:00".
    pub label: String,
    pub temperature_c: i32,
    pub icon: String,
    pub condition: String,
}

/// One display-ready entry of the daily slice.
///
/// `high_c`/`low_c` are folded across every sample of the calendar day;
/// the remaining fields come from the first sample seen for that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Short weekday label, e.g. "Mon".
    pub day: String,
    /// Month/day label, e.g. "Jul 15".
    pub date: String,
    pub high_c: f64,
    pub low_c: f64,
    pub icon: String,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_kmh: i32,
}

/// Everything one dashboard refresh produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherView {
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
}
