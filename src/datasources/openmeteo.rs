use crate::error::{PaddySenseError, Result};
use crate::models::{
    CurrentConditions, DailyOutlook, GeoCandidate, GeocodeStrategy, WeatherCondition,
    WeatherReport,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::time::Duration;

const API_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const FORECAST_DAYS: u32 = 7;

/// Open-Meteo forecast client. No API key required; coordinates come from
/// the geocoding chain.
pub struct OpenMeteoClient {
    client: reqwest::Client,
}

// Open-Meteo response structures. Field names mirror the requested
// variable names, so the structs follow the query string exactly.
#[derive(Debug, Deserialize)]
struct MeteoResponse {
    current: MeteoCurrent,
    daily: Option<MeteoDaily>,
}

#[derive(Debug, Deserialize)]
struct MeteoCurrent {
    temperature_2m: f64,
    relative_humidity_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    precipitation: Option<f64>,
    weather_code: Option<u32>,
    wind_speed_10m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MeteoDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    precipitation_probability_max: Option<Vec<Option<f64>>>,
    weather_code: Vec<Option<u32>>,
}

impl OpenMeteoClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch current conditions plus the 7-day outlook for a resolved
    /// candidate and assemble the full report.
    pub async fn fetch_report(
        &self,
        query: &str,
        resolved: GeoCandidate,
        strategy: GeocodeStrategy,
    ) -> Result<WeatherReport> {
        let url = format!(
            "{}?latitude={}&longitude={}\
             &current=temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m\
             &daily=temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max,weather_code\
             &timezone=auto&forecast_days={}",
            API_BASE_URL, resolved.latitude, resolved.longitude, FORECAST_DAYS
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PaddySenseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PaddySenseError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let body: MeteoResponse = response.json().await.map_err(|e| {
            PaddySenseError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        Ok(convert_response(query, resolved, strategy, body))
    }

    /// Probe the forecast endpoint with a minimal request.
    pub async fn test_connection(&self) -> Result<bool> {
        // Colombo; any fixed coordinate works for a reachability check
        let url = format!(
            "{}?latitude=6.9271&longitude=79.8612&current=temperature_2m",
            API_BASE_URL
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PaddySenseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn convert_response(
    query: &str,
    resolved: GeoCandidate,
    strategy: GeocodeStrategy,
    body: MeteoResponse,
) -> WeatherReport {
    let condition = body
        .current
        .weather_code
        .map(WeatherCondition::from_wmo_code)
        .unwrap_or_default();

    let current = CurrentConditions {
        temperature_c: body.current.temperature_2m,
        apparent_temperature_c: body.current.apparent_temperature,
        humidity_percent: body.current.relative_humidity_2m,
        precipitation_mm: body.current.precipitation,
        wind_speed_kmh: body.current.wind_speed_10m,
        condition,
        observed_at: Utc::now(),
    };

    let daily = body.daily.map(convert_daily).unwrap_or_default();

    WeatherReport {
        query: query.to_string(),
        resolved,
        strategy,
        current,
        daily,
        fetched_at: Utc::now(),
    }
}

fn convert_daily(daily: MeteoDaily) -> Vec<DailyOutlook> {
    let mut days = Vec::with_capacity(daily.time.len());

    for (i, date_str) in daily.time.iter().enumerate() {
        let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
            continue;
        };
        // Ragged arrays happen when the API omits a trailing value; skip
        // days without both temperature bounds.
        let (Some(Some(high)), Some(Some(low))) = (
            daily.temperature_2m_max.get(i).copied(),
            daily.temperature_2m_min.get(i).copied(),
        ) else {
            continue;
        };

        let precipitation_mm = daily
            .precipitation_sum
            .get(i)
            .copied()
            .flatten()
            .unwrap_or(0.0);
        let precipitation_prob_percent = daily
            .precipitation_probability_max
            .as_ref()
            .and_then(|probs| probs.get(i).copied().flatten());
        let condition = daily
            .weather_code
            .get(i)
            .copied()
            .flatten()
            .map(WeatherCondition::from_wmo_code)
            .unwrap_or_default();

        days.push(DailyOutlook {
            date,
            high_c: high,
            low_c: low,
            precipitation_mm,
            precipitation_prob_percent,
            condition,
        });
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAYLOAD: &str = r#"{
        "latitude": 9.625,
        "longitude": 80.0,
        "current": {
            "time": "2026-03-12T10:15",
            "temperature_2m": 31.4,
            "relative_humidity_2m": 74,
            "apparent_temperature": 36.2,
            "precipitation": 0.0,
            "weather_code": 2,
            "wind_speed_10m": 14.8
        },
        "daily": {
            "time": ["2026-03-12", "2026-03-13"],
            "temperature_2m_max": [32.5, 33.1],
            "temperature_2m_min": [25.2, 25.7],
            "precipitation_sum": [0.4, null],
            "precipitation_probability_max": [35, 60],
            "weather_code": [2, 61]
        }
    }"#;

    fn candidate() -> GeoCandidate {
        GeoCandidate {
            display_name: "Jaffna, Northern Province, Sri Lanka".to_string(),
            latitude: 9.6684,
            longitude: 80.0074,
        }
    }

    #[test]
    fn payload_parses_and_converts() {
        let body: MeteoResponse = serde_json::from_str(SAMPLE_PAYLOAD).unwrap();
        let report = convert_response("Jaffna", candidate(), GeocodeStrategy::Exact, body);

        assert!((report.current.temperature_c - 31.4).abs() < 1e-9);
        assert_eq!(report.current.humidity_percent, Some(74.0));
        assert_eq!(report.current.condition, WeatherCondition::PartlyCloudy);
        assert_eq!(report.strategy, GeocodeStrategy::Exact);

        assert_eq!(report.daily.len(), 2);
        assert_eq!(
            report.daily[0].date,
            NaiveDate::from_ymd_opt(2026, 3, 12).unwrap()
        );
        assert_eq!(report.daily[1].condition, WeatherCondition::Rain);
        // Null precipitation sums read as a dry day
        assert_eq!(report.daily[1].precipitation_mm, 0.0);
    }

    #[test]
    fn payload_without_daily_block() {
        let payload = r#"{
            "current": {"time": "2026-03-12T10:15", "temperature_2m": 29.0}
        }"#;

        let body: MeteoResponse = serde_json::from_str(payload).unwrap();
        let report = convert_response("Galle", candidate(), GeocodeStrategy::SplitLocation, body);

        assert!(report.daily.is_empty());
        assert_eq!(report.current.condition, WeatherCondition::Clear);
        assert!(report.current.humidity_percent.is_none());
    }

    #[test]
    fn ragged_daily_rows_are_skipped() {
        let daily = MeteoDaily {
            time: vec!["2026-03-12".to_string(), "2026-03-13".to_string()],
            temperature_2m_max: vec![Some(32.0)],
            temperature_2m_min: vec![Some(25.0)],
            precipitation_sum: vec![Some(1.0)],
            precipitation_probability_max: None,
            weather_code: vec![Some(3)],
        };

        let days = convert_daily(daily);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].condition, WeatherCondition::Cloudy);
        assert!(days[0].precipitation_prob_percent.is_none());
    }
}
