use anyhow::{anyhow, Context, Error};
use async_trait::async_trait;
use bulletin::{LocationProfile, WeatherSnapshot};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use slog::{debug, info, Logger};
use std::time::Duration;

/// Open-Meteo `current=` variables the bulletin reads.
pub const CURRENT_VARIABLES: [&str; 12] = [
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "precipitation",
    "rain",
    "snowfall",
    "cloud_cover",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "surface_pressure",
    "weather_code",
];

/// Open-Meteo `daily=` variables the bulletin reads.
pub const DAILY_VARIABLES: [&str; 14] = [
    "temperature_2m_max",
    "temperature_2m_min",
    "apparent_temperature_max",
    "apparent_temperature_min",
    "precipitation_sum",
    "precipitation_probability_max",
    "rain_sum",
    "snowfall_sum",
    "wind_speed_10m_max",
    "wind_gusts_10m_max",
    "wind_direction_10m_dominant",
    "sunrise",
    "sunset",
    "uv_index_max",
];

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, location: &LocationProfile) -> Result<WeatherSnapshot, Error>;
}

pub struct OpenMeteoFetcher {
    logger: Logger,
    api_url: String,
    timeout: Duration,
    client: ClientWithMiddleware,
}

impl OpenMeteoFetcher {
    pub fn new(
        logger: Logger,
        api_url: String,
        user_agent: String,
        timeout: Duration,
    ) -> Result<OpenMeteoFetcher, Error> {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let client = ClientBuilder::new(Client::builder().user_agent(user_agent).build()?)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            logger,
            api_url,
            timeout,
            client,
        })
    }

    /// Query string for a one-day forecast in the location's own timezone.
    pub fn query(location: &LocationProfile) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current", CURRENT_VARIABLES.join(",")),
            ("daily", DAILY_VARIABLES.join(",")),
            ("timezone", location.timezone.clone()),
            ("forecast_days", "1".to_string()),
        ]
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoFetcher {
    async fn fetch(&self, location: &LocationProfile) -> Result<WeatherSnapshot, Error> {
        debug!(self.logger, "requesting: {} for {}", self.api_url, location.name);
        let response = self
            .client
            .get(&self.api_url)
            .query(&Self::query(location))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| anyhow!("error sending request: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow!("error response from request: {}", e))?;

        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("error reading body of request: {}", e))?;
        Ok(WeatherSnapshot::from_json(&location.name, &body)?)
    }
}

/// Fetch every location in order. The first failure aborts the run, so a bulletin is
/// never built from a partial set.
pub async fn collect_snapshots<P>(
    provider: &P,
    locations: &[LocationProfile],
    logger: &Logger,
) -> Result<Vec<(LocationProfile, WeatherSnapshot)>, Error>
where
    P: WeatherProvider + ?Sized,
{
    let mut results = Vec::with_capacity(locations.len());
    for location in locations {
        info!(logger, "fetching forecast: {}", location.name);
        let snapshot = provider
            .fetch(location)
            .await
            .with_context(|| format!("fetching forecast for {}", location.name))?;
        results.push((location.clone(), snapshot));
    }
    debug!(logger, "snapshots collected: {}", results.len());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_requests_every_contract_field() {
        let location = crate::default_locations().remove(1);
        let query = OpenMeteoFetcher::query(&location);

        let value = |key: &str| {
            query
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(value("latitude"), "46.2667");
        assert_eq!(value("timezone"), "Europe/Paris");
        assert_eq!(value("forecast_days"), "1");
        assert_eq!(value("current").split(',').count(), 12);
        assert!(value("daily").contains("uv_index_max"));
    }
}
