use thiserror::Error;

#[derive(Debug, Error)]
pub enum BulletinError {
    #[error("malformed weather snapshot for {location}: {source}")]
    MalformedSnapshot {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing daily value `{field}` for {location}")]
    MissingDailyValue {
        location: String,
        field: &'static str,
    },
    #[error("invalid timestamp {value:?} in `{field}` for {location}: {source}")]
    InvalidTimestamp {
        location: String,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// The Magnus approximation takes ln(humidity / 100), undefined at or below 0%.
    #[error("dew point is undefined for relative humidity {humidity}% (must be > 0)")]
    DewPointDomain { humidity: f64 },
    #[error("unknown locale identifier `{0}`")]
    UnknownLocale(String),
    #[error("no locations to compose a bulletin from")]
    NoLocations,
    #[error("{location}: {source}")]
    Location {
        location: String,
        #[source]
        source: Box<BulletinError>,
    },
}

impl BulletinError {
    pub(crate) fn at(self, location: &str) -> Self {
        BulletinError::Location {
            location: location.to_string(),
            source: Box::new(self),
        }
    }
}
