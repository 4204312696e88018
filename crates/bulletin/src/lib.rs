//! Weather bulletin rendering core.
//!
//! Turns `(LocationProfile, WeatherSnapshot)` pairs into one fixed-width text document:
//! ASCII glyphs, gauges, a clothing advisory per location and a comfort ranking across
//! them. Pure and synchronous; fetching and saving belong to the caller.

pub mod advisory;
pub mod composer;
pub mod display;
mod error;
pub mod layout;
pub mod locale;
pub mod metrics;
pub mod model;
pub mod ranking;

pub use advisory::Recommendation;
pub use composer::{compose, BulletinContext, DEFAULT_SOURCE};
pub use error::BulletinError;
pub use locale::parse_locale;
pub use metrics::DerivedMetrics;
pub use model::{CurrentConditions, DailyForecast, LocationProfile, WeatherSnapshot};
pub use ranking::{comfort_score, rank, ComparisonRow};
