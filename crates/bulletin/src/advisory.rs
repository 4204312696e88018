//! Clothing and safety advisory.
//!
//! Four independent rule groups run in a fixed order (thermal, precipitation, wind, UV) and
//! each appends its own lines; a single verdict closes the list. Every group is a priority
//! ladder: the first band whose condition holds wins.

use std::fmt;

use crate::model::DailyForecast;

/// Daily figures the rules look at, with nulls already read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdvisoryInputs {
    pub min_temp: f64,
    pub max_temp: f64,
    pub precipitation_probability: f64,
    pub rain_sum: f64,
    pub snowfall_sum: f64,
    pub max_wind: f64,
    pub max_gusts: f64,
    pub uv_index: f64,
}

impl From<&DailyForecast> for AdvisoryInputs {
    fn from(daily: &DailyForecast) -> Self {
        AdvisoryInputs {
            min_temp: daily.temperature_min.unwrap_or_default(),
            max_temp: daily.temperature_max.unwrap_or_default(),
            precipitation_probability: daily.precipitation_probability.unwrap_or_default(),
            rain_sum: daily.rain_sum.unwrap_or_default(),
            snowfall_sum: daily.snowfall_sum.unwrap_or_default(),
            max_wind: daily.wind_speed_max.unwrap_or_default(),
            max_gusts: daily.wind_gusts_max.unwrap_or_default(),
            uv_index: daily.uv_index_max.unwrap_or_default(),
        }
    }
}

/// Base layers, keyed on the day's minimum temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermalBand {
    Severe,
    Freezing,
    Cold,
    Cool,
    Mild,
    Warm,
}

impl ThermalBand {
    /// Exclusive upper bound in °C; anything above the last bound is `Warm`.
    const LADDER: [(f64, ThermalBand); 5] = [
        (-10.0, ThermalBand::Severe),
        (0.0, ThermalBand::Freezing),
        (5.0, ThermalBand::Cold),
        (12.0, ThermalBand::Cool),
        (20.0, ThermalBand::Mild),
    ];

    pub fn from_min_temp(min_temp: f64) -> Self {
        Self::LADDER
            .iter()
            .find(|(upper, _)| min_temp < *upper)
            .map(|(_, band)| *band)
            .unwrap_or(ThermalBand::Warm)
    }

    pub fn advice(self) -> &'static [&'static str] {
        match self {
            ThermalBand::Severe => &[
                "Sous-vetements thermiques OBLIGATOIRES (haut + bas)",
                "Doudoune epaisse ou manteau grand froid",
                "Bonnet, gants doubles, echarpe/tour de cou",
            ],
            ThermalBand::Freezing => &[
                "Sous-couche thermique recommandee",
                "Manteau chaud / doudoune",
                "Bonnet et gants chauds",
                "Echarpe ou tour de cou",
            ],
            ThermalBand::Cold => &[
                "Pull ou polaire en couche intermediaire",
                "Veste chaude ou manteau mi-saison epais",
                "Echarpe legere pour le matin",
                "Gants legers optionnels",
            ],
            ThermalBand::Cool => &["Pull leger ou sweat", "Veste legere ou blouson"],
            ThermalBand::Mild => &[
                "T-shirt ou chemise legere",
                "Gilet ou veste fine pour le soir",
            ],
            ThermalBand::Warm => &[
                "Vetements legers et respirants",
                "Chapeau / casquette contre le soleil",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationOutlook {
    /// More than 5 cm calls for gaiters as well.
    Snow { heavy: bool },
    Rain,
    PossibleRain,
    Dry,
}

impl PrecipitationOutlook {
    pub fn classify(inputs: &AdvisoryInputs) -> Self {
        if inputs.snowfall_sum > 0.0 {
            PrecipitationOutlook::Snow {
                heavy: inputs.snowfall_sum > 5.0,
            }
        } else if inputs.precipitation_probability >= 70.0 || inputs.rain_sum > 3.0 {
            PrecipitationOutlook::Rain
        } else if inputs.precipitation_probability >= 40.0 {
            PrecipitationOutlook::PossibleRain
        } else {
            PrecipitationOutlook::Dry
        }
    }

    pub fn advice(self) -> Vec<&'static str> {
        match self {
            PrecipitationOutlook::Snow { heavy } => {
                let mut lines = vec![
                    "NEIGE prevue : chaussures impermeables et crantees",
                    "Pantalon impermeable ou surpantalon",
                    "Veste impermeable avec capuche",
                ];
                if heavy {
                    lines.push("Guetres si vous marchez en exterieur");
                }
                lines
            }
            PrecipitationOutlook::Rain => vec![
                "Parapluie INDISPENSABLE",
                "Veste impermeable avec capuche",
                "Chaussures impermeables (pas de baskets en toile !)",
            ],
            PrecipitationOutlook::PossibleRain => vec![
                "Parapluie pliable dans le sac (on ne sait jamais)",
                "Veste deperlante ou coupe-vent",
                "Chaussures fermees de preference",
            ],
            PrecipitationOutlook::Dry => vec!["Pas de pluie significative attendue"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindWarning {
    Strong,
    Sustained,
    Breezy,
}

impl WindWarning {
    pub fn classify(inputs: &AdvisoryInputs) -> Option<Self> {
        if inputs.max_gusts > 80.0 {
            Some(WindWarning::Strong)
        } else if inputs.max_gusts > 50.0 {
            Some(WindWarning::Sustained)
        } else if inputs.max_wind > 25.0 {
            Some(WindWarning::Breezy)
        } else {
            None
        }
    }

    pub fn advice(self) -> &'static [&'static str] {
        match self {
            WindWarning::Strong => &[
                "VENT FORT : coupe-vent solide obligatoire",
                "Evitez les parapluies, preferez une capuche",
            ],
            WindWarning::Sustained => &["Vent soutenu : coupe-vent recommande"],
            WindWarning::Breezy => &["Brise notable : une couche coupe-vent est un plus"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UvExposure {
    High(f64),
    Moderate(f64),
}

impl UvExposure {
    pub fn classify(inputs: &AdvisoryInputs) -> Option<Self> {
        if inputs.uv_index >= 6.0 {
            Some(UvExposure::High(inputs.uv_index))
        } else if inputs.uv_index >= 3.0 {
            Some(UvExposure::Moderate(inputs.uv_index))
        } else {
            None
        }
    }

    pub fn advice(self) -> String {
        match self {
            UvExposure::High(uv) => {
                format!("UV eleve ({:.0}) : creme solaire et lunettes de soleil", uv)
            }
            UvExposure::Moderate(uv) => {
                format!("UV modere ({:.0}) : lunettes de soleil recommandees", uv)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Wintry,
    CoolAndWet,
    CoolAndDry,
    Hot,
    Mixed,
    Pleasant,
}

impl Verdict {
    pub fn classify(inputs: &AdvisoryInputs) -> Self {
        if inputs.min_temp < 0.0 && inputs.snowfall_sum > 0.0 {
            Verdict::Wintry
        } else if inputs.min_temp < 5.0 && inputs.precipitation_probability >= 50.0 {
            Verdict::CoolAndWet
        } else if inputs.min_temp < 5.0 {
            Verdict::CoolAndDry
        } else if inputs.max_temp > 25.0 {
            Verdict::Hot
        } else if inputs.precipitation_probability >= 50.0 {
            Verdict::Mixed
        } else {
            Verdict::Pleasant
        }
    }

    pub fn text(self) -> [&'static str; 2] {
        match self {
            Verdict::Wintry => [
                "Conditions hivernales. Habillez-vous chaudement,",
                "impermeabilisez-vous, et soyez prudent sur les sols glissants.",
            ],
            Verdict::CoolAndWet => [
                "Frais et humide. Le systeme des 3 couches est",
                "votre meilleur ami : thermique + polaire + impermeable.",
            ],
            Verdict::CoolAndDry => [
                "Frais mais sec. Un bon manteau et une echarpe",
                "suffiront pour passer la journee confortablement.",
            ],
            Verdict::Hot => [
                "Journee chaude ! Restez leger, hydratez-vous,",
                "et cherchez l'ombre aux heures les plus chaudes.",
            ],
            Verdict::Mixed => [
                "Temps mitige. Gardez un parapluie a portee",
                "et privilegiez des chaussures qui ne craignent pas l'eau.",
            ],
            Verdict::Pleasant => [
                "Conditions agreables. Habillez-vous normalement",
                "avec une petite couche en plus pour le matin/soir.",
            ],
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = self.text();
        write!(f, "  Verdict : {}\n  {}", first, second)
    }
}

/// Advice lines in rule-group order, then the verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub advice: Vec<String>,
    pub verdict: Verdict,
}

impl Recommendation {
    pub fn for_day(daily: &DailyForecast) -> Self {
        Self::from_inputs(&AdvisoryInputs::from(daily))
    }

    pub fn from_inputs(inputs: &AdvisoryInputs) -> Self {
        let mut advice: Vec<String> = ThermalBand::from_min_temp(inputs.min_temp)
            .advice()
            .iter()
            .map(|line| line.to_string())
            .collect();

        advice.extend(
            PrecipitationOutlook::classify(inputs)
                .advice()
                .into_iter()
                .map(String::from),
        );

        if let Some(warning) = WindWarning::classify(inputs) {
            advice.extend(warning.advice().iter().map(|line| line.to_string()));
        }

        if let Some(exposure) = UvExposure::classify(inputs) {
            advice.push(exposure.advice());
        }

        Recommendation {
            advice,
            verdict: Verdict::classify(inputs),
        }
    }

    /// Bulleted advice, a blank separator, then the two verdict lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .advice
            .iter()
            .map(|line| format!("- {}", line))
            .collect();
        lines.push(String::new());
        lines.extend(self.verdict.to_string().lines().map(String::from));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> AdvisoryInputs {
        AdvisoryInputs {
            min_temp: 14.0,
            max_temp: 22.0,
            ..Default::default()
        }
    }

    #[test]
    fn thermal_ladder_bounds() {
        assert_eq!(ThermalBand::from_min_temp(-30.0), ThermalBand::Severe);
        assert_eq!(ThermalBand::from_min_temp(-10.0), ThermalBand::Freezing);
        assert_eq!(ThermalBand::from_min_temp(0.0), ThermalBand::Cold);
        assert_eq!(ThermalBand::from_min_temp(4.9), ThermalBand::Cold);
        assert_eq!(ThermalBand::from_min_temp(5.0), ThermalBand::Cool);
        assert_eq!(ThermalBand::from_min_temp(12.0), ThermalBand::Mild);
        assert_eq!(ThermalBand::from_min_temp(20.0), ThermalBand::Warm);
        assert_eq!(ThermalBand::from_min_temp(45.0), ThermalBand::Warm);
    }

    #[test]
    fn snow_wins_over_rain() {
        let day = AdvisoryInputs {
            snowfall_sum: 2.0,
            precipitation_probability: 95.0,
            rain_sum: 10.0,
            ..inputs()
        };
        assert_eq!(
            PrecipitationOutlook::classify(&day),
            PrecipitationOutlook::Snow { heavy: false }
        );
        assert_eq!(PrecipitationOutlook::classify(&day).advice().len(), 3);

        let deep = AdvisoryInputs {
            snowfall_sum: 5.5,
            ..day
        };
        assert_eq!(PrecipitationOutlook::classify(&deep).advice().len(), 4);
    }

    #[test]
    fn rain_thresholds() {
        let heavy_rain = AdvisoryInputs {
            rain_sum: 3.1,
            ..inputs()
        };
        assert_eq!(
            PrecipitationOutlook::classify(&heavy_rain),
            PrecipitationOutlook::Rain
        );

        let likely = AdvisoryInputs {
            precipitation_probability: 70.0,
            ..inputs()
        };
        assert_eq!(
            PrecipitationOutlook::classify(&likely),
            PrecipitationOutlook::Rain
        );

        let maybe = AdvisoryInputs {
            precipitation_probability: 40.0,
            rain_sum: 3.0,
            ..inputs()
        };
        assert_eq!(
            PrecipitationOutlook::classify(&maybe),
            PrecipitationOutlook::PossibleRain
        );

        assert_eq!(
            PrecipitationOutlook::classify(&inputs()),
            PrecipitationOutlook::Dry
        );
    }

    #[test]
    fn wind_ladder() {
        let gusty = |max_gusts, max_wind| AdvisoryInputs {
            max_gusts,
            max_wind,
            ..inputs()
        };
        assert_eq!(WindWarning::classify(&gusty(81.0, 0.0)), Some(WindWarning::Strong));
        assert_eq!(
            WindWarning::classify(&gusty(80.0, 0.0)),
            Some(WindWarning::Sustained)
        );
        assert_eq!(WindWarning::classify(&gusty(50.0, 26.0)), Some(WindWarning::Breezy));
        assert_eq!(WindWarning::classify(&gusty(50.0, 25.0)), None);
    }

    #[test]
    fn uv_lines_carry_index() {
        let sunny = AdvisoryInputs {
            uv_index: 6.4,
            ..inputs()
        };
        assert_eq!(
            UvExposure::classify(&sunny).unwrap().advice(),
            "UV eleve (6) : creme solaire et lunettes de soleil"
        );
        let hazy = AdvisoryInputs {
            uv_index: 3.0,
            ..inputs()
        };
        assert_eq!(UvExposure::classify(&hazy), Some(UvExposure::Moderate(3.0)));
        assert_eq!(UvExposure::classify(&inputs()), None);
    }

    #[test]
    fn verdict_priority() {
        let cold_snow = AdvisoryInputs {
            min_temp: -2.0,
            snowfall_sum: 1.0,
            precipitation_probability: 90.0,
            ..inputs()
        };
        assert_eq!(Verdict::classify(&cold_snow), Verdict::Wintry);

        let cold_wet = AdvisoryInputs {
            min_temp: 3.0,
            precipitation_probability: 50.0,
            ..inputs()
        };
        assert_eq!(Verdict::classify(&cold_wet), Verdict::CoolAndWet);

        let cold_dry = AdvisoryInputs {
            min_temp: 3.0,
            max_temp: 30.0,
            ..inputs()
        };
        assert_eq!(Verdict::classify(&cold_dry), Verdict::CoolAndDry);

        let hot_wet = AdvisoryInputs {
            max_temp: 26.0,
            precipitation_probability: 80.0,
            ..inputs()
        };
        assert_eq!(Verdict::classify(&hot_wet), Verdict::Hot);

        let mixed = AdvisoryInputs {
            precipitation_probability: 55.0,
            ..inputs()
        };
        assert_eq!(Verdict::classify(&mixed), Verdict::Mixed);
        assert_eq!(Verdict::classify(&inputs()), Verdict::Pleasant);
    }

    #[test]
    fn all_groups_fire_in_order() {
        let blizzard = AdvisoryInputs {
            min_temp: -15.0,
            max_temp: -6.0,
            snowfall_sum: 6.0,
            max_gusts: 90.0,
            uv_index: 8.0,
            ..Default::default()
        };
        let reco = Recommendation::from_inputs(&blizzard);

        let expected: Vec<&str> = [
            ThermalBand::Severe.advice().to_vec(),
            PrecipitationOutlook::Snow { heavy: true }.advice(),
            WindWarning::Strong.advice().to_vec(),
        ]
        .concat();
        assert_eq!(&reco.advice[..expected.len()], expected.as_slice());
        assert!(reco.advice[expected.len()].starts_with("UV eleve (8)"));
        assert_eq!(reco.advice.len(), expected.len() + 1);
        assert_eq!(reco.verdict, Verdict::Wintry);

        let lines = reco.lines();
        assert_eq!(lines[0], "- Sous-vetements thermiques OBLIGATOIRES (haut + bas)");
        assert_eq!(lines[lines.len() - 3], "");
        assert_eq!(
            lines[lines.len() - 2],
            "  Verdict : Conditions hivernales. Habillez-vous chaudement,"
        );
    }

    #[test]
    fn nulls_read_as_zero() {
        let reco = Recommendation::for_day(&DailyForecast::default());
        // min 0°C -> cold band, no precipitation, no wind, no UV, dry cool verdict
        assert_eq!(reco.advice.len(), 5);
        assert_eq!(reco.advice[4], "Pas de pluie significative attendue");
        assert_eq!(reco.verdict, Verdict::CoolAndDry);
    }
}
