use crate::display::{beaufort, day_length, dew_point, BeaufortForce};
use crate::model::WeatherSnapshot;
use crate::ranking::comfort_score;
use crate::BulletinError;

/// Values computed from a snapshot for display and ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    /// `None` when current temperature or humidity is null
    pub dew_point: Option<f64>,
    /// `None` when sunrise or sunset is null (polar day/night)
    pub day_length: Option<String>,
    pub beaufort: Option<BeaufortForce>,
    pub comfort_score: f64,
}

impl DerivedMetrics {
    pub fn compute(snapshot: &WeatherSnapshot) -> Result<Self, BulletinError> {
        let current = &snapshot.current;
        let daily = &snapshot.daily;

        let dew_point = match (current.temperature, current.humidity) {
            (Some(t), Some(h)) => Some(dew_point(t, h)?),
            _ => None,
        };

        Ok(DerivedMetrics {
            dew_point,
            day_length: daily.sunrise.zip(daily.sunset).map(|(r, s)| day_length(r, s)),
            beaufort: daily.wind_speed_max.map(beaufort),
            comfort_score: comfort_score(
                daily.temperature_max,
                daily.precipitation_probability,
                daily.wind_speed_max,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, DailyForecast};
    use approx::assert_relative_eq;

    #[test]
    fn computes_from_snapshot() {
        let snapshot = WeatherSnapshot {
            current: CurrentConditions {
                temperature: Some(20.0),
                humidity: Some(50.0),
                ..Default::default()
            },
            daily: DailyForecast {
                temperature_max: Some(20.0),
                precipitation_probability: Some(40.0),
                wind_speed_max: Some(30.0),
                ..Default::default()
            },
        };
        let metrics = DerivedMetrics::compute(&snapshot).unwrap();

        assert_relative_eq!(metrics.dew_point.unwrap(), 9.3);
        assert_eq!(metrics.beaufort.unwrap().force, 5);
        assert_relative_eq!(metrics.comfort_score, 13.0);
        assert_eq!(metrics.day_length, None);
    }

    #[test]
    fn all_null_snapshot_is_fine() {
        let metrics = DerivedMetrics::compute(&WeatherSnapshot::default()).unwrap();
        assert_eq!(metrics.dew_point, None);
        assert_eq!(metrics.beaufort, None);
        assert_eq!(metrics.comfort_score, 0.0);
    }

    #[test]
    fn zero_humidity_is_an_error() {
        let snapshot = WeatherSnapshot {
            current: CurrentConditions {
                temperature: Some(20.0),
                humidity: Some(0.0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(DerivedMetrics::compute(&snapshot).is_err());
    }
}
