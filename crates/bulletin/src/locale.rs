//! Locale-aware header dates through chrono's `unstable-locales` tables.

use chrono::{DateTime, FixedOffset, Locale};

use crate::BulletinError;

/// Accepts `fr_FR`, `fr-FR` and `fr_FR.UTF-8` spellings.
pub fn parse_locale(identifier: &str) -> Result<Locale, BulletinError> {
    let base = identifier.split('.').next().unwrap_or_default();
    let normalized = base.replace('-', "_");
    Locale::try_from(normalized.as_str())
        .map_err(|_| BulletinError::UnknownLocale(identifier.to_string()))
}

/// Weekday, day, month and year, capitalized: "Dimanche 18 octobre 2026".
pub fn long_date(at: &DateTime<FixedOffset>, locale: Locale) -> String {
    capitalize(&at.format_localized("%A %d %B %Y", locale).to_string())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
