//! Orchestration of resolver, client, and reducer.
//!
//! This is the layer the presentation code talks to. Fetch and parse
//! failures are logged and reduced to no-ops here, so a caller never sees
//! an error and never loses the previous view.

use tracing::warn;

use crate::{
    config::Config,
    location::{self, PositionOptions, PositionSource},
    model::ResolvedLocation,
    provider::OpenWeatherClient,
    state::{AppState, Event, Screen, reduce},
};

pub struct App {
    client: OpenWeatherClient,
    fallback_city: String,
    options: PositionOptions,
    state: AppState,
}

impl App {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: OpenWeatherClient::from_config(config)?,
            fallback_city: config.default_city.clone(),
            options: PositionOptions::from(&config.geo),
            state: AppState::default(),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.apply(Event::Navigate(screen));
    }

    pub fn toggle_menu(&mut self) {
        self.apply(Event::ToggleMenu);
    }

    /// Full dashboard refresh: resolve a location, then fetch and swap in
    /// the new view. On failure the previous view stays.
    pub async fn refresh(&mut self, source: Option<&dyn PositionSource>) -> &AppState {
        let resolution = location::resolve(source, &self.fallback_city, &self.options).await;

        self.apply(Event::Resolved {
            permission: resolution.permission,
            notice: resolution.notice.clone(),
        });

        self.load_view(&resolution.location).await
    }

    /// Refresh for an explicitly chosen location, skipping resolution.
    pub async fn refresh_location(&mut self, location: &ResolvedLocation) -> &AppState {
        self.load_view(location).await
    }

    async fn load_view(&mut self, location: &ResolvedLocation) -> &AppState {
        match self.client.fetch_view(location).await {
            Ok(view) => self.apply(Event::ViewLoaded(view)),
            Err(err) => {
                warn!(%err, %location, "weather refresh failed, keeping previous view");
                self.apply(Event::FetchFailed);
            }
        }
        &self.state
    }

    /// User-driven watch-list add. Appends on success, even for a city
    /// already present; leaves the list untouched on failure.
    pub async fn add_city(&mut self, name: &str) -> &AppState {
        let location = ResolvedLocation::City(name.to_string());

        match self.client.fetch_current(&location).await {
            Ok(conditions) => self.apply(Event::CityLoaded(conditions)),
            Err(err) => {
                warn!(%err, city = name, "city lookup failed, watch list unchanged");
                self.apply(Event::CityFailed);
            }
        }
        &self.state
    }

    /// Preload path: same lookup, but cities already on the list (by name)
    /// are not appended again.
    pub async fn preload_cities(&mut self, names: &[String]) -> &AppState {
        for name in names {
            let location = ResolvedLocation::City(name.clone());

            match self.client.fetch_current(&location).await {
                Ok(conditions) => self.apply(Event::CityPreloaded(conditions)),
                Err(err) => {
                    warn!(%err, city = %name, "city preload failed, skipping");
                    self.apply(Event::CityFailed);
                }
            }
        }
        &self.state
    }

    fn apply(&mut self, event: Event) {
        self.state = reduce(std::mem::take(&mut self.state), event);
    }
}
