use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which step of the geocoding fallback chain produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeocodeStrategy {
    Exact,
    Detailed,
    AlternateProvider,
    SplitLocation,
    CleanedText,
}

impl GeocodeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeocodeStrategy::Exact => "exact search",
            GeocodeStrategy::Detailed => "detailed search",
            GeocodeStrategy::AlternateProvider => "alternate provider",
            GeocodeStrategy::SplitLocation => "split location",
            GeocodeStrategy::CleanedText => "cleaned text",
        }
    }
}

impl std::fmt::Display for GeocodeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A coordinate candidate returned by a geocoding lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoCandidate {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions from the Open-Meteo forecast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub apparent_temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub condition: WeatherCondition,
    pub observed_at: DateTime<Utc>,
}

/// One day of the daily outlook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyOutlook {
    pub date: NaiveDate,
    pub high_c: f64,
    pub low_c: f64,
    pub precipitation_mm: f64,
    pub precipitation_prob_percent: Option<f64>,
    pub condition: WeatherCondition,
}

/// A complete lookup result: the query, where it resolved, which chain
/// step resolved it, and what Open-Meteo reported there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub query: String,
    pub resolved: GeoCandidate,
    pub strategy: GeocodeStrategy,
    pub current: CurrentConditions,
    pub daily: Vec<DailyOutlook>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    /// Rows appended to weather history are a flattened snapshot of the
    /// report, one per successful lookup.
    pub fn to_observation(&self) -> WeatherObservation {
        WeatherObservation {
            id: None,
            location: self.query.clone(),
            latitude: Some(self.resolved.latitude),
            longitude: Some(self.resolved.longitude),
            temperature_c: Some(self.current.temperature_c),
            humidity_percent: self.current.humidity_percent,
            rainfall_mm: self.current.precipitation_mm,
            wind_speed_kmh: self.current.wind_speed_kmh,
            condition: Some(self.current.condition),
            recorded_at: self.fetched_at,
        }
    }

    pub fn rain_expected_within(&self, days: u32, threshold_mm: f64) -> bool {
        self.daily
            .iter()
            .take(days as usize)
            .map(|d| d.precipitation_mm)
            .sum::<f64>()
            >= threshold_mm
    }
}

/// A stored weather search, mirroring what the lookup screen showed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub id: Option<i64>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub rainfall_mm: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub condition: Option<WeatherCondition>,
    pub recorded_at: DateTime<Utc>,
}

/// Condition categories mapped from Open-Meteo WMO weather codes.
/// Snow-family codes collapse into Other; they do not occur at this
/// latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Thunderstorm,
    Other,
}

impl WeatherCondition {
    /// See https://open-meteo.com/en/docs#weathervariables for the code table.
    pub fn from_wmo_code(code: u32) -> Self {
        match code {
            0 => WeatherCondition::Clear,
            1..=2 => WeatherCondition::PartlyCloudy,
            3 => WeatherCondition::Cloudy,
            45 | 48 => WeatherCondition::Fog,
            51 | 53 | 55 | 56 | 57 => WeatherCondition::Drizzle,
            61 | 63 | 66 | 80 => WeatherCondition::Rain,
            65 | 67 | 81 | 82 => WeatherCondition::HeavyRain,
            95 | 96 | 99 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::HeavyRain => "Heavy Rain",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' '], "").as_str() {
            "clear" => Some(WeatherCondition::Clear),
            "partlycloudy" => Some(WeatherCondition::PartlyCloudy),
            "cloudy" => Some(WeatherCondition::Cloudy),
            "fog" => Some(WeatherCondition::Fog),
            "drizzle" => Some(WeatherCondition::Drizzle),
            "rain" => Some(WeatherCondition::Rain),
            "heavyrain" => Some(WeatherCondition::HeavyRain),
            "thunderstorm" => Some(WeatherCondition::Thunderstorm),
            "other" => Some(WeatherCondition::Other),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀",
            WeatherCondition::PartlyCloudy => "⛅",
            WeatherCondition::Cloudy => "☁",
            WeatherCondition::Fog => "🌫",
            WeatherCondition::Drizzle => "🌦",
            WeatherCondition::Rain => "🌧",
            WeatherCondition::HeavyRain => "🌧",
            WeatherCondition::Thunderstorm => "⛈",
            WeatherCondition::Other => "?",
        }
    }

    pub fn has_precipitation(&self) -> bool {
        matches!(
            self,
            WeatherCondition::Drizzle
                | WeatherCondition::Rain
                | WeatherCondition::HeavyRain
                | WeatherCondition::Thunderstorm
        )
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_from_wmo_code() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
        assert_eq!(
            WeatherCondition::from_wmo_code(2),
            WeatherCondition::PartlyCloudy
        );
        assert_eq!(WeatherCondition::from_wmo_code(3), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::from_wmo_code(45), WeatherCondition::Fog);
        assert_eq!(
            WeatherCondition::from_wmo_code(53),
            WeatherCondition::Drizzle
        );
        assert_eq!(WeatherCondition::from_wmo_code(61), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(80), WeatherCondition::Rain);
        assert_eq!(
            WeatherCondition::from_wmo_code(82),
            WeatherCondition::HeavyRain
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(95),
            WeatherCondition::Thunderstorm
        );
    }

    #[test]
    fn condition_snow_codes_map_to_other() {
        for code in [71, 73, 75, 77, 85, 86] {
            assert_eq!(
                WeatherCondition::from_wmo_code(code),
                WeatherCondition::Other
            );
        }
    }

    #[test]
    fn condition_round_trip() {
        for condition in [
            WeatherCondition::Clear,
            WeatherCondition::PartlyCloudy,
            WeatherCondition::Cloudy,
            WeatherCondition::Fog,
            WeatherCondition::Drizzle,
            WeatherCondition::Rain,
            WeatherCondition::HeavyRain,
            WeatherCondition::Thunderstorm,
            WeatherCondition::Other,
        ] {
            let debug_str = format!("{:?}", condition);
            assert_eq!(
                WeatherCondition::from_str(&debug_str),
                Some(condition),
                "Round-trip failed for {:?}",
                condition
            );
        }
    }

    #[test]
    fn condition_has_precipitation() {
        assert!(WeatherCondition::Rain.has_precipitation());
        assert!(WeatherCondition::Thunderstorm.has_precipitation());
        assert!(!WeatherCondition::Clear.has_precipitation());
        assert!(!WeatherCondition::Fog.has_precipitation());
    }

    fn sample_report() -> WeatherReport {
        WeatherReport {
            query: "Jaffna, Sri Lanka".to_string(),
            resolved: GeoCandidate {
                display_name: "Jaffna, Northern Province, Sri Lanka".to_string(),
                latitude: 9.665,
                longitude: 80.009,
            },
            strategy: GeocodeStrategy::Exact,
            current: CurrentConditions {
                temperature_c: 31.4,
                apparent_temperature_c: Some(35.0),
                humidity_percent: Some(74.0),
                precipitation_mm: Some(0.0),
                wind_speed_kmh: Some(14.2),
                condition: WeatherCondition::PartlyCloudy,
                observed_at: Utc::now(),
            },
            daily: vec![
                DailyOutlook {
                    date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                    high_c: 32.0,
                    low_c: 25.0,
                    precipitation_mm: 6.0,
                    precipitation_prob_percent: Some(60.0),
                    condition: WeatherCondition::Rain,
                },
                DailyOutlook {
                    date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                    high_c: 33.0,
                    low_c: 26.0,
                    precipitation_mm: 7.0,
                    precipitation_prob_percent: Some(70.0),
                    condition: WeatherCondition::Rain,
                },
            ],
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn report_to_observation() {
        let report = sample_report();
        let obs = report.to_observation();

        assert_eq!(obs.location, "Jaffna, Sri Lanka");
        assert_eq!(obs.latitude, Some(9.665));
        assert_eq!(obs.temperature_c, Some(31.4));
        assert_eq!(obs.condition, Some(WeatherCondition::PartlyCloudy));
    }

    #[test]
    fn rain_expected_sums_daily_totals() {
        let report = sample_report();
        assert!(report.rain_expected_within(2, 10.0));
        assert!(!report.rain_expected_within(1, 10.0));
    }
}
