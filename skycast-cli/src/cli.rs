use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::Text;

use skycast_core::{App, Config, FixedPositionSource, PositionSource, ResolvedLocation, Screen};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and dashboard defaults interactively.
    Configure,

    /// Show current conditions and the coming hours.
    Dashboard {
        /// City to show instead of the resolved location.
        city: Option<String>,
    },

    /// Show the 7-day outlook.
    Forecast {
        /// City to show instead of the resolved location.
        city: Option<String>,
    },

    /// Look up extra cities for the watch list.
    Cities {
        /// City names to look up.
        names: Vec<String>,

        /// Skip names already on the list instead of appending duplicates.
        #[arg(long)]
        preload: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Dashboard { city } => show(Screen::Dashboard, city).await,
            Command::Forecast { city } => show(Screen::Forecast, city).await,
            Command::Cities { names, preload } => cities(&names, preload).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:")
        .with_initial_value(config.api_key.as_deref().unwrap_or(""))
        .prompt()?;

    let default_city = Text::new("Fallback city:")
        .with_initial_value(&config.default_city)
        .prompt()?;

    config.api_key = Some(api_key.trim().to_string());
    config.default_city = default_city.trim().to_string();
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Build the position source the dashboard resolves against: fixed
/// coordinates when configured, otherwise no capability at all.
fn position_source(config: &Config) -> Option<FixedPositionSource> {
    config
        .position
        .map(|p| FixedPositionSource::new(p.latitude, p.longitude))
}

async fn show(screen: Screen, city: Option<String>) -> Result<()> {
    let config = Config::load()?;
    tracing::debug!(?screen, ?city, "showing weather");

    let mut app = App::new(&config)?;
    app.navigate(screen);

    match city {
        Some(name) => {
            app.refresh_location(&ResolvedLocation::City(name)).await;
        }
        None => {
            let source = position_source(&config);
            app.refresh(source.as_ref().map(|s| s as &dyn PositionSource))
                .await;
        }
    }

    match screen {
        Screen::Forecast => render::forecast(app.state()),
        _ => render::dashboard(app.state()),
    }

    Ok(())
}

async fn cities(names: &[String], preload: bool) -> Result<()> {
    let config = Config::load()?;
    let mut app = App::new(&config)?;

    app.preload_cities(&config.preload_cities).await;

    if preload {
        app.preload_cities(names).await;
    } else {
        for name in names {
            app.add_city(name).await;
        }
    }

    render::cities(app.state());
    Ok(())
}
