//! Application state as a single immutable value advanced by named events.
//!
//! Every transition is pure given the prior state and one event; the I/O
//! layer (`app`) decides which events to emit.

use crate::{
    location::PermissionState,
    model::{CurrentConditions, WeatherView},
};

/// Screens the presentation layer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Welcome,
    Dashboard,
    Forecast,
    About,
}

/// The whole UI-relevant state of a session.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub screen: Screen,
    pub menu_open: bool,
    /// Dashboard view, kept as-is when a refresh fails.
    pub view: Option<WeatherView>,
    /// Watch list of secondary cities, in insertion order.
    pub cities: Vec<CurrentConditions>,
    pub permission: PermissionState,
    /// Resolver message for the user, if the last resolution had one.
    pub notice: Option<String>,
}

/// Named state transitions.
#[derive(Debug, Clone)]
pub enum Event {
    Navigate(Screen),
    ToggleMenu,
    /// Location resolution finished (successfully or via fallback).
    Resolved {
        permission: PermissionState,
        notice: Option<String>,
    },
    /// A refresh produced a complete view; replaces the old one wholesale.
    ViewLoaded(WeatherView),
    /// A refresh failed; the previous view stays on screen.
    FetchFailed,
    /// Secondary-city lookup succeeded on the user-driven path. Appends
    /// without deduplication: the same city can appear twice.
    CityLoaded(CurrentConditions),
    /// Secondary-city lookup succeeded on the preload path, which skips
    /// cities already present by name.
    CityPreloaded(CurrentConditions),
    /// Secondary-city lookup failed; the watch list stays as it was.
    CityFailed,
}

/// Advance the state by one event.
pub fn reduce(state: AppState, event: Event) -> AppState {
    match event {
        Event::Navigate(screen) => AppState {
            screen,
            menu_open: false,
            ..state
        },
        Event::ToggleMenu => AppState {
            menu_open: !state.menu_open,
            ..state
        },
        Event::Resolved { permission, notice } => AppState {
            permission,
            notice,
            ..state
        },
        Event::ViewLoaded(view) => AppState {
            view: Some(view),
            ..state
        },
        Event::FetchFailed | Event::CityFailed => state,
        Event::CityLoaded(city) => {
            let mut cities = state.cities;
            cities.push(city);
            AppState { cities, ..state }
        }
        Event::CityPreloaded(city) => {
            if state.cities.iter().any(|existing| existing.city == city.city) {
                return state;
            }
            let mut cities = state.cities;
            cities.push(city);
            AppState { cities, ..state }
        }
    }
}
