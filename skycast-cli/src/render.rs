//! Plain-text rendering of the core's view models.

use chrono::Local;
use skycast_core::{AppState, CurrentConditions};

fn current_block(current: &CurrentConditions) {
    println!("{}, {}", current.city, current.country);
    println!(
        "  {}°C  {} ({})",
        current.temperature_c, current.condition, current.description
    );
    println!(
        "  humidity {}%  wind {} km/h  visibility {} km",
        current.humidity_pct, current.wind_kmh, current.visibility_km
    );
}

fn notice_block(state: &AppState) {
    if let Some(notice) = &state.notice {
        println!("note: {notice}");
    }
}

pub fn dashboard(state: &AppState) {
    notice_block(state);

    let Some(view) = &state.view else {
        println!("No weather data available.");
        return;
    };

    println!("as of {}", Local::now().format("%a %b %-d, %H:%M"));
    current_block(&view.current);

    if !view.hourly.is_empty() {
        println!();
        for entry in &view.hourly {
            println!(
                "  {:>5}  {:>3}°C  {}",
                entry.label, entry.temperature_c, entry.condition
            );
        }
    }
}

pub fn forecast(state: &AppState) {
    notice_block(state);

    let Some(view) = &state.view else {
        println!("No weather data available.");
        return;
    };

    println!("{}, {}", view.current.city, view.current.country);
    for entry in &view.daily {
        println!(
            "  {} {:>6}  {:>3}° / {:>3}°  {}",
            entry.day,
            entry.date,
            entry.high_c.round(),
            entry.low_c.round(),
            entry.condition
        );
    }
}

pub fn cities(state: &AppState) {
    if state.cities.is_empty() {
        println!("No cities on the watch list.");
        return;
    }

    for current in &state.cities {
        current_block(current);
    }
}
