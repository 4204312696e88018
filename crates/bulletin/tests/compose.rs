use bulletin::{layout::DOCUMENT_WIDTH, compose, parse_locale, BulletinContext, LocationProfile, WeatherSnapshot};
use chrono::{FixedOffset, TimeZone};
use serde_json::json;
use unicode_width::UnicodeWidthStr;

fn profile(name: &str, region: &str, altitude: &str) -> LocationProfile {
    LocationProfile {
        name: name.to_string(),
        region: region.to_string(),
        latitude: 46.0,
        longitude: 6.0,
        altitude: altitude.to_string(),
        timezone: "Europe/Paris".to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn snapshot(
    name: &str,
    code: i64,
    (t_min, t_max): (f64, f64),
    probability: f64,
    rain: f64,
    snow: f64,
    (wind, gusts): (f64, f64),
    uv: f64,
) -> WeatherSnapshot {
    let body = json!({
        "current": {
            "temperature_2m": (t_min + t_max) / 2.0,
            "apparent_temperature": (t_min + t_max) / 2.0 - 2.0,
            "relative_humidity_2m": 70,
            "cloud_cover": 40,
            "precipitation": 0.0,
            "rain": 0.0,
            "snowfall": 0.0,
            "wind_speed_10m": wind / 2.0,
            "wind_direction_10m": 200,
            "wind_gusts_10m": gusts / 2.0,
            "surface_pressure": 1012.4,
            "weather_code": code
        },
        "daily": {
            "temperature_2m_min": [t_min],
            "temperature_2m_max": [t_max],
            "apparent_temperature_min": [t_min - 3.0],
            "apparent_temperature_max": [t_max - 1.0],
            "precipitation_sum": [rain + snow],
            "precipitation_probability_max": [probability],
            "rain_sum": [rain],
            "snowfall_sum": [snow],
            "wind_speed_10m_max": [wind],
            "wind_gusts_10m_max": [gusts],
            "wind_direction_10m_dominant": [210],
            "sunrise": ["2026-10-18T07:52"],
            "sunset": ["2026-10-18T18:41"],
            "uv_index_max": [uv]
        }
    });
    WeatherSnapshot::from_json(name, &body.to_string()).expect("valid snapshot")
}

fn three_cities() -> Vec<(LocationProfile, WeatherSnapshot)> {
    vec![
        (
            profile("Paris", "Ile-de-France", "~35m"),
            snapshot("Paris", 0, (17.0, 28.0), 10.0, 0.0, 0.0, (12.0, 25.0), 6.5),
        ),
        (
            profile("Chatel", "Haute-Savoie, France", "~1200m (village)"),
            snapshot("Chatel", 73, (-8.0, -2.0), 90.0, 0.0, 14.0, (35.0, 85.0), 1.0),
        ),
        (
            profile("Lausanne", "Suisse, canton de Vaud", "~500m"),
            snapshot("Lausanne", 63, (7.0, 12.0), 80.0, 6.2, 0.0, (20.0, 45.0), 2.0),
        ),
    ]
}

fn context() -> BulletinContext {
    let at = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 18, 7, 30, 0)
        .unwrap();
    BulletinContext::new(at, parse_locale("fr_FR").unwrap())
}

fn position(doc: &str, needle: &str) -> usize {
    doc.find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in bulletin"))
}

#[test]
fn location_blocks_follow_input_order() {
    let doc = compose(&three_cities(), &context()).unwrap();

    let paris = position(&doc, "|  1. PARIS (Ile-de-France) ~ Alt. ~35m");
    let chatel = position(&doc, "|  2. CHATEL (Haute-Savoie, France)");
    let lausanne = position(&doc, "|  3. LAUSANNE (Suisse, canton de Vaud)");
    assert!(paris < chatel && chatel < lausanne);

    assert!(doc.contains("Dimanche 18 octobre 2026"));
    assert!(doc.contains("Paris  ~  Chatel  ~  Lausanne"));
    assert!(doc.contains("*** 14.0 cm de neige prevus ***"));
    assert!(doc.contains("~~~ 6.2 mm de pluie prevus ~~~"));
    assert!(doc.contains("Duree du jour ........ 10h49"));
    assert!(doc.contains("Direction dominante .. SSO (210°)"));
    assert_eq!(doc.matches("DONNEES DETAILLEES").count(), 3);
}

#[test]
fn every_location_gets_advice_and_a_verdict() {
    let doc = compose(&three_cities(), &context()).unwrap();

    let advice = position(&doc, "RECOMMANDATIONS VESTIMENTAIRES");
    let paris = position(&doc, ">>> PARIS <<<");
    let chatel = position(&doc, ">>> CHATEL <<<");
    let lausanne = position(&doc, ">>> LAUSANNE <<<");
    assert!(advice < paris && paris < chatel && chatel < lausanne);

    assert_eq!(doc.matches("  Verdict : ").count(), 3);
    assert!(doc.contains("Verdict : Journee chaude !"));
    assert!(doc.contains("Verdict : Conditions hivernales."));
    assert!(doc.contains("Verdict : Temps mitige."));

    // snowy Chatel hits every rule group
    let chatel_block = &doc[chatel..lausanne];
    assert!(chatel_block.contains("Sous-couche thermique recommandee"));
    assert!(chatel_block.contains("Guetres si vous marchez en exterieur"));
    assert!(chatel_block.contains("VENT FORT"));
    assert!(!chatel_block.contains("UV "));
}

#[test]
fn comparison_table_has_one_row_per_location() {
    let doc = compose(&three_cities(), &context()).unwrap();
    let lines: Vec<&str> = doc.lines().collect();

    let separator = lines
        .iter()
        .position(|l| l.starts_with("    ~~~~~~~~~~~~ "))
        .expect("table separator");
    let rows: Vec<&str> = lines[separator + 1..]
        .iter()
        .take_while(|l| !l.is_empty())
        .copied()
        .collect();

    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("    Paris        "));
    assert!(rows[1].contains("Neige 90%"));
    assert!(rows[2].contains("Pluie 80%"));
}

#[test]
fn ranking_lists_every_location_with_medals() {
    let doc = compose(&three_cities(), &context()).unwrap();
    let ranking: Vec<&str> = doc
        .lines()
        .skip_while(|l| !l.contains("Classement confort du jour"))
        .filter(|l| l.starts_with("      ["))
        .collect();

    // scores: Paris 25.8, Chatel -14.5, Lausanne 2.0
    assert_eq!(ranking.len(), 3);
    assert!(ranking[0].starts_with("      [1er]  Paris"));
    assert!(ranking[0].ends_with(&">".repeat(25)));
    assert!(ranking[1].starts_with("      [2e]   Lausanne"));
    assert!(ranking[1].ends_with("  >>"));
    assert!(ranking[2].starts_with("      [3e]   Chatel"));
    assert!(ranking[2].ends_with("  >"));
}

#[test]
fn wide_and_accented_names_keep_every_line_in_width() {
    let locations = vec![
        (
            profile("東京", "関東地方, 日本", "~40m"),
            snapshot("東京", 1, (18.0, 24.0), 20.0, 0.0, 0.0, (10.0, 20.0), 5.0),
        ),
        (
            profile("Nice ☀️", "Côte d'Azur ☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️☀️", "~10m"),
            snapshot("Nice", 2, (16.0, 23.0), 5.0, 0.0, 0.0, (15.0, 30.0), 6.0),
        ),
        (
            profile("Genève", "Île-de-France et Léman", "~375m"),
            snapshot("Genève", 3, (9.0, 14.0), 40.0, 1.2, 0.0, (25.0, 50.0), 2.0),
        ),
    ];
    let doc = compose(&locations, &context()).unwrap();

    for line in doc.lines() {
        if line.starts_with('|') || line.starts_with('+') {
            assert_eq!(line.width(), DOCUMENT_WIDTH, "{line:?}");
        } else {
            assert!(line.width() <= DOCUMENT_WIDTH, "{line:?}");
        }
    }
    assert!(doc.contains("|  1. 東京 (関東地方, 日本) ~ Alt. ~40m"));
    assert!(doc.contains(">>> GENÈVE <<<"));
    assert!(doc.contains("    Genève       "));
}

#[test]
fn document_is_plain_text_within_width() {
    let doc = compose(&three_cities(), &context()).unwrap();
    assert!(!doc
        .chars()
        .any(|c| c.is_control() && c != '\n'));
    assert!(doc.ends_with("Merci d'avoir consulte le bulletin. Bonne journee !\n"));
}
