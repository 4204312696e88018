//! Cross-location comparison and comfort ranking.

use crate::metrics::DerivedMetrics;
use crate::model::{DailyForecast, LocationProfile};

/// `max_temp - precip_probability / 10 - max_wind / 10`, nulls read as zero.
pub fn comfort_score(
    max_temp: Option<f64>,
    precipitation_probability: Option<f64>,
    max_wind: Option<f64>,
) -> f64 {
    max_temp.unwrap_or_default()
        - precipitation_probability.unwrap_or_default() / 10.0
        - max_wind.unwrap_or_default() / 10.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub name: String,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    /// e.g. "Neige 80%", "Pluie 45%", "Sec 0%"
    pub precipitation: String,
    /// e.g. "22.0 km/h"
    pub wind: String,
    pub comfort_score: f64,
}

impl ComparisonRow {
    /// The score is taken from `metrics` so it is computed in one place.
    pub fn new(
        profile: &LocationProfile,
        daily: &DailyForecast,
        metrics: &DerivedMetrics,
    ) -> Self {
        let kind = if daily.snowfall_sum.unwrap_or_default() > 0.0 {
            "Neige"
        } else if daily.rain_sum.unwrap_or_default() > 0.0 {
            "Pluie"
        } else {
            "Sec"
        };
        let probability = daily.precipitation_probability.unwrap_or_default();

        ComparisonRow {
            name: profile.name.clone(),
            min_temp: daily.temperature_min,
            max_temp: daily.temperature_max,
            precipitation: format!("{} {:.0}%", kind, probability),
            wind: daily
                .wind_speed_max
                .map(|w| format!("{:.1} km/h", w))
                .unwrap_or_else(|| "N/A".to_string()),
            comfort_score: metrics.comfort_score,
        }
    }
}

const MEDALS: [&str; 3] = ["[1er]", "[2e] ", "[3e] "];

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry<'a> {
    /// 1-based
    pub position: usize,
    pub row: &'a ComparisonRow,
}

impl RankedEntry<'_> {
    /// Medal for the podium, plain ordinal below it. Always five columns wide.
    pub fn label(&self) -> String {
        MEDALS
            .get(self.position - 1)
            .map(|medal| medal.to_string())
            .unwrap_or_else(|| format!("{:<5}", format!("[{}e]", self.position)))
    }

    /// `max(1, floor(score))` arrows, capped at `max_len`.
    pub fn bar(&self, max_len: usize) -> String {
        let len = self.row.comfort_score.floor().max(1.0) as usize;
        ">".repeat(len.min(max_len.max(1)))
    }
}

/// Rows by descending comfort score. Equal scores keep their input order.
pub fn rank(rows: &[ComparisonRow]) -> Vec<RankedEntry<'_>> {
    let mut sorted: Vec<&ComparisonRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.comfort_score.total_cmp(&a.comfort_score));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, row)| RankedEntry {
            position: i + 1,
            row,
        })
        .collect()
}
