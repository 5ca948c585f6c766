//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Location resolution with permission handling and a fallback city
//! - The upstream weather API client and forecast aggregation
//! - Application state as a pure reducer over named events
//! - Configuration & credentials handling
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod app;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod state;

pub use app::App;
pub use config::{Config, FixedPosition, GeoSettings};
pub use error::{FetchError, GeoError};
pub use location::{
    FixedPositionSource, PermissionState, Position, PositionOptions, PositionSource, Resolution,
    resolve,
};
pub use model::{
    CurrentConditions, DailyEntry, ForecastSample, HourlyEntry, ResolvedLocation, WeatherView,
};
pub use provider::OpenWeatherClient;
pub use state::{AppState, Event, Screen, reduce};
