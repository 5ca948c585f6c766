use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, warn};

use crate::{
    config::GeoSettings,
    error::GeoError,
    model::ResolvedLocation,
};

/// Permission state of the position capability, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    Granted,
    Denied,
    /// The platform has not asked the user yet.
    #[default]
    Prompt,
    /// No position capability exists at all.
    Unavailable,
}

/// Budgets applied to a device position request.
#[derive(Debug, Clone)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Longest the resolver waits before classifying the attempt as a timeout.
    pub timeout: Duration,
    /// Oldest cached position the source may return instead of a fresh read.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

impl From<&GeoSettings> for PositionOptions {
    fn from(settings: &GeoSettings) -> Self {
        Self {
            high_accuracy: settings.high_accuracy,
            timeout: Duration::from_secs(settings.timeout_secs),
            maximum_age: Duration::from_secs(settings.maximum_age_secs),
        }
    }
}

/// A device position report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Access to the platform's position capability.
///
/// `permission_state` models the separate permission-query capability; an
/// implementation without one returns `GeoError::Unsupported`, which the
/// resolver treats as "proceed to the direct request".
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn permission_state(&self) -> Result<PermissionState, GeoError>;

    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeoError>;
}

/// A source pinned to fixed coordinates, e.g. from the config file.
#[derive(Debug, Clone)]
pub struct FixedPositionSource {
    position: Position,
}

impl FixedPositionSource {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Position {
                latitude,
                longitude,
            },
        }
    }
}

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn permission_state(&self) -> Result<PermissionState, GeoError> {
        Ok(PermissionState::Granted)
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeoError> {
        Ok(self.position)
    }
}

/// Outcome of a resolution attempt. Always usable: on any failure the
/// location falls back to the configured city and `notice` explains why.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub location: ResolvedLocation,
    pub permission: PermissionState,
    pub notice: Option<String>,
}

impl Resolution {
    fn fallback(city: &str, permission: PermissionState, notice: impl Into<String>) -> Self {
        Self {
            location: ResolvedLocation::City(city.to_string()),
            permission,
            notice: Some(notice.into()),
        }
    }
}

/// Determine what to query the weather API with.
///
/// Never blocks past the configured timeout and never fails outright;
/// concurrent calls are not deduplicated, the last caller wins.
pub async fn resolve(
    source: Option<&dyn PositionSource>,
    fallback_city: &str,
    options: &PositionOptions,
) -> Resolution {
    let Some(source) = source else {
        return Resolution::fallback(
            fallback_city,
            PermissionState::Unavailable,
            GeoError::Unsupported.to_string(),
        );
    };

    match source.permission_state().await {
        Ok(PermissionState::Denied) => {
            // Known-denied: skip the device prompt entirely.
            debug!("location permission already denied, using fallback city");
            return Resolution::fallback(
                fallback_city,
                PermissionState::Denied,
                GeoError::PermissionDenied.to_string(),
            );
        }
        Ok(state) => {
            debug!(?state, "permission state before position request");
        }
        Err(err) => {
            // A failing permission query must not abort resolution.
            debug!(%err, "permission query unsupported, proceeding to direct request");
        }
    }

    match request_position(source, options).await {
        Ok(position) => Resolution {
            location: ResolvedLocation::Coordinates {
                latitude: position.latitude,
                longitude: position.longitude,
            },
            permission: PermissionState::Granted,
            notice: None,
        },
        Err(err) => {
            warn!(%err, "device position request failed, using fallback city");
            Resolution::fallback(fallback_city, PermissionState::Denied, err.to_string())
        }
    }
}

/// Direct position request with a bounded wait, regardless of whether the
/// source honors its own timeout budget.
async fn request_position(
    source: &dyn PositionSource,
    options: &PositionOptions,
) -> Result<Position, GeoError> {
    match tokio::time::timeout(options.timeout, source.current_position(options)).await {
        Ok(result) => result,
        Err(_) => Err(GeoError::Timeout),
    }
}
