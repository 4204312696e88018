//! Input data contract: where a bulletin is about, and what the forecast says there.
//!
//! Snapshots are parsed from the Open-Meteo `/v1/forecast` JSON shape. Every field must be
//! present in the payload, but any numeric value may be `null`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use crate::BulletinError;

/// Format of Open-Meteo local timestamps (`timeformat=iso8601`, no seconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationProfile {
    pub name: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Free text, e.g. "~1200m (village)"
    pub altitude: String,
    /// IANA identifier passed to the forecast API so daily values are local.
    pub timezone: String,
}

/// Makes an `Option` field required in the payload while still accepting `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temperature_2m", deserialize_with = "nullable")]
    pub temperature: Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub apparent_temperature: Option<f64>,
    #[serde(rename = "relative_humidity_2m", deserialize_with = "nullable")]
    pub humidity: Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub cloud_cover: Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub precipitation: Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub rain: Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub snowfall: Option<f64>,
    #[serde(rename = "wind_speed_10m", deserialize_with = "nullable")]
    pub wind_speed: Option<f64>,
    #[serde(rename = "wind_direction_10m", deserialize_with = "nullable")]
    pub wind_direction: Option<f64>,
    #[serde(rename = "wind_gusts_10m", deserialize_with = "nullable")]
    pub wind_gusts: Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub surface_pressure: Option<f64>,
    /// WMO code as sent; Open-Meteo may encode it as `61` or `61.0`
    #[serde(deserialize_with = "nullable")]
    pub weather_code: Option<f64>,
}

impl CurrentConditions {
    /// The weather code as an integer, or `None` when it is null or not a whole number.
    pub fn wmo_code(&self) -> Option<i64> {
        self.weather_code
            .filter(|code| code.is_finite() && code.fract() == 0.0)
            .map(|code| code as i64)
    }
}

/// Aggregates for the forecast day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyForecast {
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub apparent_temperature_min: Option<f64>,
    pub apparent_temperature_max: Option<f64>,
    pub precipitation_sum: Option<f64>,
    /// Percent, 0-100
    pub precipitation_probability: Option<f64>,
    /// mm
    pub rain_sum: Option<f64>,
    /// cm
    pub snowfall_sum: Option<f64>,
    pub wind_speed_max: Option<f64>,
    pub wind_gusts_max: Option<f64>,
    /// Degrees
    pub wind_direction_dominant: Option<f64>,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
    pub uv_index_max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub daily: DailyForecast,
}

#[derive(Deserialize)]
struct RawSnapshot {
    current: CurrentConditions,
    daily: RawDaily,
}

/// Open-Meteo returns one array per daily variable; with `forecast_days=1` only index 0 matters.
#[derive(Deserialize)]
struct RawDaily {
    temperature_2m_min: Vec<Option<f64>>,
    temperature_2m_max: Vec<Option<f64>>,
    apparent_temperature_min: Vec<Option<f64>>,
    apparent_temperature_max: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    precipitation_probability_max: Vec<Option<f64>>,
    rain_sum: Vec<Option<f64>>,
    snowfall_sum: Vec<Option<f64>>,
    wind_speed_10m_max: Vec<Option<f64>>,
    wind_gusts_10m_max: Vec<Option<f64>>,
    wind_direction_10m_dominant: Vec<Option<f64>>,
    sunrise: Vec<Option<String>>,
    sunset: Vec<Option<String>>,
    uv_index_max: Vec<Option<f64>>,
}

fn first<T: Clone>(
    location: &str,
    field: &'static str,
    values: &[Option<T>],
) -> Result<Option<T>, BulletinError> {
    values
        .first()
        .cloned()
        .ok_or_else(|| BulletinError::MissingDailyValue {
            location: location.to_string(),
            field,
        })
}

fn timestamp(
    location: &str,
    field: &'static str,
    values: &[Option<String>],
) -> Result<Option<NaiveDateTime>, BulletinError> {
    first(location, field, values)?
        .map(|value| {
            NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT).map_err(|source| {
                BulletinError::InvalidTimestamp {
                    location: location.to_string(),
                    field,
                    value,
                    source,
                }
            })
        })
        .transpose()
}

impl RawDaily {
    fn into_forecast(self, location: &str) -> Result<DailyForecast, BulletinError> {
        Ok(DailyForecast {
            temperature_min: first(location, "temperature_2m_min", &self.temperature_2m_min)?,
            temperature_max: first(location, "temperature_2m_max", &self.temperature_2m_max)?,
            apparent_temperature_min: first(
                location,
                "apparent_temperature_min",
                &self.apparent_temperature_min,
            )?,
            apparent_temperature_max: first(
                location,
                "apparent_temperature_max",
                &self.apparent_temperature_max,
            )?,
            precipitation_sum: first(location, "precipitation_sum", &self.precipitation_sum)?,
            precipitation_probability: first(
                location,
                "precipitation_probability_max",
                &self.precipitation_probability_max,
            )?,
            rain_sum: first(location, "rain_sum", &self.rain_sum)?,
            snowfall_sum: first(location, "snowfall_sum", &self.snowfall_sum)?,
            wind_speed_max: first(location, "wind_speed_10m_max", &self.wind_speed_10m_max)?,
            wind_gusts_max: first(location, "wind_gusts_10m_max", &self.wind_gusts_10m_max)?,
            wind_direction_dominant: first(
                location,
                "wind_direction_10m_dominant",
                &self.wind_direction_10m_dominant,
            )?,
            sunrise: timestamp(location, "sunrise", &self.sunrise)?,
            sunset: timestamp(location, "sunset", &self.sunset)?,
            uv_index_max: first(location, "uv_index_max", &self.uv_index_max)?,
        })
    }
}

impl WeatherSnapshot {
    /// Parse a forecast response body. `location` only labels errors.
    pub fn from_json(location: &str, body: &str) -> Result<Self, BulletinError> {
        let raw: RawSnapshot =
            serde_json::from_str(body).map_err(|source| BulletinError::MalformedSnapshot {
                location: location.to_string(),
                source,
            })?;
        raw.into_snapshot(location)
    }

    pub fn from_value(location: &str, value: serde_json::Value) -> Result<Self, BulletinError> {
        let raw: RawSnapshot =
            serde_json::from_value(value).map_err(|source| BulletinError::MalformedSnapshot {
                location: location.to_string(),
                source,
            })?;
        raw.into_snapshot(location)
    }
}

impl RawSnapshot {
    fn into_snapshot(self, location: &str) -> Result<WeatherSnapshot, BulletinError> {
        Ok(WeatherSnapshot {
            current: self.current,
            daily: self.daily.into_forecast(location)?,
        })
    }
}
