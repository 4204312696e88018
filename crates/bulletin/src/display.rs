//! Display primitives: map one value to a fixed-size visual token.
//!
//! Every table here is a process-lifetime constant, and every function is total over its
//! input except [`dew_point`], which rejects non-positive humidity.

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDateTime;

use crate::BulletinError;

/// Rows in a weather glyph.
pub const GLYPH_HEIGHT: usize = 5;
/// Visible columns in every glyph row.
pub const GLYPH_WIDTH: usize = 13;

pub type Glyph = [&'static str; GLYPH_HEIGHT];

const CLEAR_GLYPH: Glyph = [
    r"    \   /    ",
    r"     .-.     ",
    r"  ― (   ) ―  ",
    r"     `-'     ",
    r"    /   \    ",
];

const PARTLY_CLOUDY_GLYPH: Glyph = [
    r"   \  /      ",
    r" _ /''.--.   ",
    r"   \_(    ). ",
    r"   /(___(__) ",
    r"             ",
];

const CLOUD_GLYPH: Glyph = [
    r"             ",
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"             ",
];

const FOG_GLYPH: Glyph = [
    r"             ",
    r"  _ - _ - _  ",
    r"   _ - _ -   ",
    r"  _ - _ - _  ",
    r"             ",
];

const DRIZZLE_GLYPH: Glyph = [
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"   ,  ,  ,   ",
    r"  ,  ,  ,    ",
];

const RAIN_GLYPH: Glyph = [
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"  / / / / /  ",
    r" / / / / /   ",
];

const SNOW_GLYPH: Glyph = [
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"  * * * * *  ",
    r" * * * * *   ",
];

const STORM_GLYPH: Glyph = [
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"  /_/ /_/ /  ",
    r"   /_ /_/    ",
];

/// WMO weather interpretation codes, grouped the way they are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Storm,
    Other,
}

impl WeatherCategory {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 | 1 => WeatherCategory::Clear,
            2 => WeatherCategory::PartlyCloudy,
            3 => WeatherCategory::Overcast,
            45 | 48 => WeatherCategory::Fog,
            51 | 53 | 55 | 56 | 57 => WeatherCategory::Drizzle,
            61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => WeatherCategory::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => WeatherCategory::Snow,
            95 | 96 | 99 => WeatherCategory::Storm,
            _ => WeatherCategory::Other,
        }
    }

    pub fn glyph(self) -> &'static Glyph {
        match self {
            WeatherCategory::Clear => &CLEAR_GLYPH,
            WeatherCategory::PartlyCloudy => &PARTLY_CLOUDY_GLYPH,
            WeatherCategory::Overcast | WeatherCategory::Other => &CLOUD_GLYPH,
            WeatherCategory::Fog => &FOG_GLYPH,
            WeatherCategory::Drizzle => &DRIZZLE_GLYPH,
            WeatherCategory::Rain => &RAIN_GLYPH,
            WeatherCategory::Snow => &SNOW_GLYPH,
            WeatherCategory::Storm => &STORM_GLYPH,
        }
    }
}

const WEATHER_DESCRIPTIONS: [(i64, &str); 28] = [
    (0, "Ciel degage"),
    (1, "Principalement degage"),
    (2, "Partiellement nuageux"),
    (3, "Couvert"),
    (45, "Brouillard"),
    (48, "Brouillard givrant"),
    (51, "Bruine legere"),
    (53, "Bruine moderee"),
    (55, "Bruine dense"),
    (56, "Bruine verglacante legere"),
    (57, "Bruine verglacante dense"),
    (61, "Pluie legere"),
    (63, "Pluie moderee"),
    (65, "Pluie forte"),
    (66, "Pluie verglacante legere"),
    (67, "Pluie verglacante forte"),
    (71, "Neige legere"),
    (73, "Neige moderee"),
    (75, "Neige forte"),
    (77, "Grains de neige"),
    (80, "Averses legeres"),
    (81, "Averses moderees"),
    (82, "Averses violentes"),
    (85, "Averses de neige legeres"),
    (86, "Averses de neige fortes"),
    (95, "Orage"),
    (96, "Orage avec grele legere"),
    (99, "Orage avec grele forte"),
];

pub fn weather_glyph(code: i64) -> &'static Glyph {
    WeatherCategory::from_code(code).glyph()
}

pub fn weather_description(code: i64) -> Cow<'static, str> {
    WEATHER_DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| Cow::Borrowed(*text))
        .unwrap_or_else(|| Cow::Owned(format!("Code inconnu ({})", code)))
}

pub const TEMPERATURE_BAR_LEN: usize = 30;
const TEMPERATURE_SCALE_MIN: f64 = -20.0;
const TEMPERATURE_SCALE_MAX: f64 = 40.0;

fn temperature_position(t: f64) -> usize {
    let range = TEMPERATURE_SCALE_MAX - TEMPERATURE_SCALE_MIN;
    let scaled = ((t - TEMPERATURE_SCALE_MIN) / range * TEMPERATURE_BAR_LEN as f64) as i64;
    scaled.clamp(0, TEMPERATURE_BAR_LEN as i64) as usize
}

fn temperature_symbol(position: usize) -> char {
    let range = TEMPERATURE_SCALE_MAX - TEMPERATURE_SCALE_MIN;
    let t = TEMPERATURE_SCALE_MIN + (position as f64 / TEMPERATURE_BAR_LEN as f64) * range;
    if t < 0.0 {
        '#'
    } else if t < 10.0 {
        '='
    } else if t < 25.0 {
        ':'
    } else {
        '!'
    }
}

/// The 30-cell body of the temperature gauge, without scale labels.
///
/// Filled cells are picked by the temperature the cell stands for, so a warm day shows
/// `:` and `!` cells even when the minimum sits far left. At least one cell is always
/// filled: a zero-width or reversed range fills the cell at the minimum, pulled back to
/// the last cell when the minimum is off the top of the scale.
pub fn temperature_bar(t_min: f64, t_max: f64) -> String {
    let mut pos_min = temperature_position(t_min);
    let mut pos_max = temperature_position(t_max);
    if pos_max <= pos_min {
        pos_min = pos_min.min(TEMPERATURE_BAR_LEN - 1);
        pos_max = pos_min + 1;
    }

    (0..TEMPERATURE_BAR_LEN)
        .map(|j| {
            if (pos_min..pos_max).contains(&j) {
                temperature_symbol(j)
            } else {
                '.'
            }
        })
        .collect()
}

pub fn temperature_gauge(t_min: f64, t_max: f64) -> String {
    format!("  -20°C |{}| 40°C", temperature_bar(t_min, t_max))
}

pub const TEMPERATURE_LEGEND: &str = "  [ # = negatif | = = 0-10°C | : = 10-25°C | ! = 25°C+ ]";

pub const PRECIPITATION_BAR_LEN: usize = 20;

pub fn precipitation_bar(probability: f64) -> String {
    let filled = ((probability / 100.0) * PRECIPITATION_BAR_LEN as f64).floor() as i64;
    let filled = filled.clamp(0, PRECIPITATION_BAR_LEN as i64) as usize;
    format!(
        "{}{}",
        "~".repeat(filled),
        ".".repeat(PRECIPITATION_BAR_LEN - filled)
    )
}

pub fn precipitation_gauge(probability: f64) -> String {
    format!("  [{}] {:.0}%", precipitation_bar(probability), probability)
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSO", "SO", "OSO", "O", "ONO", "NO",
    "NNO",
];

/// Sixteen-point compass abbreviation (French: O for ouest). Halfway bearings round to
/// the even sector.
pub fn compass_label(degrees: f64) -> &'static str {
    let sector = (degrees / 22.5).round_ties_even() as i64;
    COMPASS_POINTS[sector.rem_euclid(16) as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaufortForce {
    pub force: u8,
    pub label: &'static str,
}

impl fmt::Display for BeaufortForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.force)
    }
}

/// Exclusive upper bound in km/h for forces 0 through 11.
const BEAUFORT_SCALE: [(f64, &str); 12] = [
    (1.0, "Calme"),
    (6.0, "Tres legere brise"),
    (12.0, "Legere brise"),
    (20.0, "Petite brise"),
    (29.0, "Jolie brise"),
    (39.0, "Bonne brise"),
    (50.0, "Vent frais"),
    (62.0, "Grand frais"),
    (75.0, "Coup de vent"),
    (89.0, "Fort coup de vent"),
    (103.0, "Tempete"),
    (117.0, "Violente tempete"),
];

const HURRICANE: BeaufortForce = BeaufortForce {
    force: 12,
    label: "Ouragan",
};

pub fn beaufort(speed_kmh: f64) -> BeaufortForce {
    BEAUFORT_SCALE
        .iter()
        .zip(0u8..)
        .find(|((upper, _), _)| speed_kmh < *upper)
        .map(|((_, label), force)| BeaufortForce {
            force,
            label: *label,
        })
        .unwrap_or(HURRICANE)
}

/// Magnus-formula dew point in °C, rounded to one decimal.
///
/// Relative humidity must be strictly positive; 0% (or less) has no dew point and is
/// reported as [`BulletinError::DewPointDomain`] instead of a NaN.
pub fn dew_point(temperature: f64, humidity: f64) -> Result<f64, BulletinError> {
    if humidity.is_nan() || humidity <= 0.0 {
        return Err(BulletinError::DewPointDomain { humidity });
    }
    const A: f64 = 17.27;
    const B: f64 = 237.7;
    let alpha = (A * temperature) / (B + temperature) + (humidity / 100.0).ln();
    let dew = (B * alpha) / (A - alpha);
    Ok((dew * 10.0).round() / 10.0)
}

/// `HhMM` between two local timestamps of the same day, truncated to whole minutes.
/// A sunset before sunrise reads as `0h00`.
pub fn day_length(sunrise: NaiveDateTime, sunset: NaiveDateTime) -> String {
    let minutes = (sunset - sunrise).num_minutes().max(0);
    format!("{}h{:02}", minutes / 60, minutes % 60)
}
