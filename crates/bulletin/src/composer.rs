//! Bulletin composition.
//!
//! Every location is first reduced to its derived metrics and recommendation; only when
//! all of them succeed is the document laid out, section by section, in [`Section::ORDER`].

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, Locale, NaiveDateTime};

use crate::advisory::Recommendation;
use crate::display::{
    compass_label, precipitation_gauge, temperature_gauge, weather_description, weather_glyph,
    WeatherCategory, GLYPH_HEIGHT, TEMPERATURE_LEGEND,
};
use crate::layout::{self, DOCUMENT_WIDTH};
use crate::locale::long_date;
use crate::metrics::DerivedMetrics;
use crate::model::{LocationProfile, WeatherSnapshot};
use crate::ranking::{rank, ComparisonRow};
use crate::BulletinError;

pub const DEFAULT_SOURCE: &str = "API Open-Meteo (open-meteo.com)";

const BANNER: [&str; 5] = [
    r"  __  __      _              ____        _ _      _   _        ",
    r" |  \/  | ___| |_ ___  ___  | __ ) _   _| | | ___| |_(_)_ __  ",
    r" | |\/| |/ _ \ __/ _ \/ _ \ |  _ \| | | | | |/ _ \ __| | '_ \ ",
    r" | |  | |  __/ ||  __/ (_) || |_) | |_| | | |  __/ |_| | | | |",
    r" |_|  |_|\___|\__\___|\___/ |____/ \__,_|_|_|\___|\__|_|_| |_|",
];

const NOT_AVAILABLE: &str = "N/A";

/// Ranking lines start with this many columns before the bar.
const RANKING_PREFIX_WIDTH: usize = 6 + 5 + 2 + 12 + 2;

/// When and in which language the bulletin is produced, and where its data came from.
#[derive(Debug, Clone)]
pub struct BulletinContext {
    pub generated_at: DateTime<FixedOffset>,
    pub locale: Locale,
    pub source: String,
}

impl BulletinContext {
    pub fn new(generated_at: DateTime<FixedOffset>, locale: Locale) -> Self {
        BulletinContext {
            generated_at,
            locale,
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

/// Document sections, in the only order they are ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Locations,
    Advisories,
    Comparison,
    Ranking,
    Footer,
}

impl Section {
    pub const ORDER: [Section; 6] = [
        Section::Header,
        Section::Locations,
        Section::Advisories,
        Section::Comparison,
        Section::Ranking,
        Section::Footer,
    ];
}

struct LocationReport<'a> {
    profile: &'a LocationProfile,
    snapshot: &'a WeatherSnapshot,
    metrics: DerivedMetrics,
    recommendation: Recommendation,
}

impl<'a> LocationReport<'a> {
    fn prepare(
        profile: &'a LocationProfile,
        snapshot: &'a WeatherSnapshot,
    ) -> Result<Self, BulletinError> {
        let metrics = DerivedMetrics::compute(snapshot).map_err(|e| e.at(&profile.name))?;
        Ok(LocationReport {
            profile,
            snapshot,
            metrics,
            recommendation: Recommendation::for_day(&snapshot.daily),
        })
    }
}

/// Render the complete bulletin, or nothing at all.
pub fn compose(
    locations: &[(LocationProfile, WeatherSnapshot)],
    context: &BulletinContext,
) -> Result<String, BulletinError> {
    if locations.is_empty() {
        return Err(BulletinError::NoLocations);
    }

    let reports = locations
        .iter()
        .map(|(profile, snapshot)| LocationReport::prepare(profile, snapshot))
        .collect::<Result<Vec<_>, _>>()?;
    let rows: Vec<ComparisonRow> = reports
        .iter()
        .map(|r| ComparisonRow::new(r.profile, &r.snapshot.daily, &r.metrics))
        .collect();

    let mut page = Page::default();
    for section in Section::ORDER {
        match section {
            Section::Header => header(&mut page, &reports, context),
            Section::Locations => {
                for (index, report) in reports.iter().enumerate() {
                    location_block(&mut page, index + 1, report);
                }
            }
            Section::Advisories => advisories(&mut page, &reports),
            Section::Comparison => comparison(&mut page, &rows),
            Section::Ranking => ranking(&mut page, &rows),
            Section::Footer => footer(&mut page, context),
        }
    }
    Ok(page.finish())
}

#[derive(Default)]
struct Page {
    lines: Vec<String>,
}

impl Page {
    fn rule(&mut self, fill: char) {
        self.lines.push(layout::rule(fill));
    }

    fn boxed(&mut self, content: &str) {
        self.lines.push(layout::boxed(content));
    }

    fn centered(&mut self, content: &str) {
        self.lines.push(layout::boxed_center(content));
    }

    fn blank_box(&mut self) {
        self.lines.push(layout::boxed_blank());
    }

    /// Free text outside the borders, still held to the document width.
    fn text(&mut self, line: &str) {
        let line = layout::sanitize(line);
        self.lines
            .push(layout::truncate(&line, DOCUMENT_WIDTH).trim_end().to_string());
    }

    fn gap(&mut self) {
        self.lines.push(String::new());
    }

    fn title(&mut self, title: &str) {
        self.rule('=');
        self.centered(title);
        self.rule('=');
        self.gap();
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Measured values always carry one decimal.
fn show(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{:.1}{}", v, unit))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn time_of_day(at: Option<NaiveDateTime>) -> String {
    at.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn header(page: &mut Page, reports: &[LocationReport], context: &BulletinContext) {
    page.rule('=');
    page.blank_box();
    for line in BANNER {
        page.centered(line);
    }
    page.blank_box();
    page.centered(&format!(
        "  {}",
        long_date(&context.generated_at, context.locale)
    ));
    page.centered(&format!(
        "  Genere a {}",
        context.generated_at.format("%Hh%M")
    ));
    let names: Vec<&str> = reports.iter().map(|r| r.profile.name.as_str()).collect();
    page.centered(&format!("  {}", names.join("  ~  ")));
    page.blank_box();
    page.rule('=');
    page.gap();
}

fn summary_lines(report: &LocationReport) -> [String; GLYPH_HEIGHT] {
    let current = &report.snapshot.current;
    let daily = &report.snapshot.daily;

    let description: Cow<'static, str> = match current.wmo_code() {
        Some(code) => weather_description(code),
        None => Cow::Borrowed("Conditions non disponibles"),
    };
    let direction = current
        .wind_direction
        .map(compass_label)
        .unwrap_or(NOT_AVAILABLE);

    [
        format!("  {}", description),
        format!(
            "  {}  (ressenti {})",
            with_unit(current.temperature, "°C"),
            with_unit(current.apparent_temperature, "°C")
        ),
        format!(
            "  Min {} / Max {}",
            with_unit(daily.temperature_min, "°C"),
            with_unit(daily.temperature_max, "°C")
        ),
        format!(
            "  Vent {} {}  ~  Rafales {}",
            with_unit(current.wind_speed, " km/h"),
            direction,
            with_unit(current.wind_gusts, " km/h")
        ),
        String::new(),
    ]
}

fn detail_lines(report: &LocationReport) -> [String; 12] {
    let current = &report.snapshot.current;
    let daily = &report.snapshot.daily;
    let metrics = &report.metrics;

    let max_wind = match (daily.wind_speed_max, metrics.beaufort) {
        (Some(speed), Some(force)) => format!("{:.1} km/h ({})", speed, force),
        _ => NOT_AVAILABLE.to_string(),
    };
    let dominant = daily
        .wind_direction_dominant
        .map(|deg| format!("{} ({:.0}°)", compass_label(deg), deg))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    [
        format!("  Couverture nuageuse .. {}", with_unit(current.cloud_cover, "%")),
        format!("  Humidite relative .... {}", with_unit(current.humidity, "%")),
        format!("  Point de rosee ....... {}", with_unit(metrics.dew_point, "°C")),
        format!(
            "  Pression atmo ........ {}",
            with_unit(current.surface_pressure, " hPa")
        ),
        format!("  Vent max journee ..... {}", max_wind),
        format!(
            "  Rafales max .......... {}",
            with_unit(daily.wind_gusts_max, " km/h")
        ),
        format!("  Direction dominante .. {}", dominant),
        format!(
            "  Ressenti min/max ..... {} / {}",
            with_unit(daily.apparent_temperature_min, "°C"),
            with_unit(daily.apparent_temperature_max, "°C")
        ),
        format!("  Indice UV max ........ {}", show(daily.uv_index_max)),
        format!("  Lever du soleil ...... {}", time_of_day(daily.sunrise)),
        format!("  Coucher du soleil .... {}", time_of_day(daily.sunset)),
        format!(
            "  Duree du jour ........ {}",
            metrics.day_length.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
    ]
}

fn location_block(page: &mut Page, index: usize, report: &LocationReport) {
    let profile = report.profile;
    let daily = &report.snapshot.daily;

    page.rule('-');
    page.boxed(&format!(
        "  {}. {} ({}) ~ Alt. {}  ",
        index,
        profile.name.to_uppercase(),
        profile.region,
        profile.altitude
    ));
    page.rule('-');

    page.blank_box();
    let glyph = match report.snapshot.current.wmo_code() {
        Some(code) => weather_glyph(code),
        None => WeatherCategory::Other.glyph(),
    };
    for (art, info) in glyph.iter().zip(summary_lines(report)) {
        page.boxed(&format!("    {}  |{}", art, info));
    }
    page.blank_box();

    page.boxed("  Temperature du jour :");
    page.boxed(&temperature_gauge(
        daily.temperature_min.unwrap_or_default(),
        daily.temperature_max.unwrap_or_default(),
    ));
    page.boxed(TEMPERATURE_LEGEND);
    page.blank_box();

    page.boxed("  Precipitation :");
    page.boxed(&precipitation_gauge(
        daily.precipitation_probability.unwrap_or_default(),
    ));
    if let Some(snow) = daily.snowfall_sum.filter(|s| *s > 0.0) {
        page.boxed(&format!("  *** {:.1} cm de neige prevus ***", snow));
    }
    if let Some(rain) = daily.rain_sum.filter(|r| *r > 0.0) {
        page.boxed(&format!("  ~~~ {:.1} mm de pluie prevus ~~~", rain));
    }
    page.blank_box();

    page.boxed("  .--------------------------------------------.");
    page.boxed("  |        DONNEES DETAILLEES (nerds only)     |");
    page.boxed("  '--------------------------------------------'");
    for line in detail_lines(report) {
        page.boxed(&line);
    }
    page.blank_box();
    page.rule('-');
    page.gap();
}

fn advisories(page: &mut Page, reports: &[LocationReport]) {
    page.title("  RECOMMANDATIONS VESTIMENTAIRES");
    for report in reports {
        page.text(&format!(
            "    >>> {} <<<",
            report.profile.name.to_uppercase()
        ));
        page.gap();
        for line in report.recommendation.lines() {
            page.text(&format!("    {}", line));
        }
        page.gap();
    }
}

fn temperature_cell(value: Option<f64>) -> String {
    layout::pad_left(&with_unit(value, "°C"), 9)
}

fn comparison(page: &mut Page, rows: &[ComparisonRow]) {
    page.title("  COMPARATIF RAPIDE");
    page.text(&format!(
        "    {:<12} {:>9}  {:>9}  {:<13} {:<11}",
        "Ville", "Temp Min", "Temp Max", "Precip", "Vent"
    ));
    page.text(&format!(
        "    {} {}  {}  {} {}",
        "~".repeat(12),
        "~".repeat(9),
        "~".repeat(9),
        "~".repeat(13),
        "~".repeat(11)
    ));
    for row in rows {
        page.text(&format!(
            "    {} {}  {}  {} {}",
            layout::pad_right(&row.name, 12),
            temperature_cell(row.min_temp),
            temperature_cell(row.max_temp),
            layout::pad_right(&row.precipitation, 13),
            layout::pad_right(&row.wind, 11)
        ));
    }
    page.gap();
}

fn ranking(page: &mut Page, rows: &[ComparisonRow]) {
    page.text("    Classement confort du jour :");
    page.gap();
    for entry in rank(rows) {
        page.text(&format!(
            "      {}  {}  {}",
            entry.label(),
            layout::pad_right(&entry.row.name, 12),
            entry.bar(DOCUMENT_WIDTH - RANKING_PREFIX_WIDTH)
        ));
    }
    page.gap();
}

fn footer(page: &mut Page, context: &BulletinContext) {
    page.rule('-');
    page.boxed(&format!("  Source : {}", context.source));
    page.boxed(&format!(
        "  Bulletin genere le {}",
        context.generated_at.format("%d/%m/%Y a %Hh%M")
    ));
    page.rule('-');
    page.gap();
    page.text("      Merci d'avoir consulte le bulletin. Bonne journee !");
    page.gap();
}
