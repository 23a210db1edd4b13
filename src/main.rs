use anyhow::Result;
use chrono::Utc;
use tempmap::cache::TableCache;
use tempmap::config::AppConfig;
use tempmap::encoder::{self, TemperatureUnit};
use tempmap::fetcher::{self, OpenMeteoClient};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    let locations = config.locations();

    let client = OpenMeteoClient::new(
        &config.weather.base_url,
        std::time::Duration::from_secs(config.weather.timeout_seconds.into()),
    )?;
    let mut cache = TableCache::new(chrono::Duration::seconds(config.cache.ttl_seconds.into()));

    let (table, failures) =
        cache.get_or_fetch(Utc::now(), || fetcher::fetch_all(&client, &locations));

    for failure in &failures {
        warn!("{}", failure.user_message());
    }

    let unit = TemperatureUnit::Celsius;
    println!("City            Temp ({})   Elevation (m)   Fill color", unit.symbol());
    for row in encoder::encode(&table, unit) {
        println!(
            "{:<15} {:>9.1} {:>15.0}   #{:02x}{:02x}{:02x}{:02x}",
            row.location_name,
            row.display_temperature,
            row.elevation_meters,
            row.fill_color[0],
            row.fill_color[1],
            row.fill_color[2],
            row.fill_color[3],
        );
    }

    if let Some(sample) = table.samples.first() {
        println!();
        println!("Hourly series for {}:", sample.location_name);
        for (time, temperature) in encoder::series_for(sample, unit) {
            println!("  {time}  {temperature:>6.1} {}", unit.symbol());
        }
    }

    Ok(())
}
