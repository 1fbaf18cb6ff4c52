use crate::error::{PaddySenseError, Result};
use crate::models::{GeoCandidate, GeocodeStrategy};
use regex_lite::Regex;
use serde::Deserialize;
use std::time::Duration;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const GEO_SEARCH_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Free-text location resolver over Nominatim with the Open-Meteo geocoder
/// as the alternate provider. Strategies run strictly in order and the
/// first non-empty candidate list wins; a failed call counts the same as
/// an empty list and the chain moves on.
pub struct GeocodingClient {
    client: reqwest::Client,
}

/// One planned lookup. The full plan for a location is built up front so
/// the fallback order is inspectable.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GeocodeQuery {
    Nominatim { query: String, detailed: bool },
    GeoSearch { query: String },
}

// Nominatim /search returns a JSON array with stringly-typed coordinates
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

// Open-Meteo geocoder wraps its hits and uses numeric coordinates
#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    results: Option<Vec<GeoSearchHit>>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchHit {
    name: String,
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
    country: Option<String>,
}

impl GeocodingClient {
    /// Nominatim's usage policy wants an identifying user agent, so the
    /// configured contact goes into every request.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(user_agent.to_string())
            .build()?;

        Ok(Self { client })
    }

    /// Resolve a location through the fallback chain. Returns the first
    /// candidate together with the strategy that produced it; later
    /// strategies are never attempted once one yields a result.
    pub async fn resolve(&self, location: &str) -> Result<(GeoCandidate, GeocodeStrategy)> {
        let location = location.trim();
        if location.is_empty() {
            return Err(PaddySenseError::InvalidData(
                "Location must not be empty".into(),
            ));
        }

        for (strategy, query) in build_queries(location) {
            let candidates = match self.run_query(&query).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::warn!(strategy = %strategy, "Geocode attempt failed: {}", e);
                    continue;
                }
            };

            match candidates.into_iter().next() {
                Some(hit) => {
                    tracing::debug!(
                        strategy = %strategy,
                        lat = hit.latitude,
                        lon = hit.longitude,
                        "Geocode resolved"
                    );
                    return Ok((hit, strategy));
                }
                None => {
                    tracing::debug!(strategy = %strategy, "Geocode attempt returned no results");
                }
            }
        }

        Err(PaddySenseError::LocationNotFound(location.to_string()))
    }

    async fn run_query(&self, query: &GeocodeQuery) -> Result<Vec<GeoCandidate>> {
        match query {
            GeocodeQuery::Nominatim { query, detailed } => {
                self.search_nominatim(query, *detailed).await
            }
            GeocodeQuery::GeoSearch { query } => self.search_geo_provider(query).await,
        }
    }

    async fn search_nominatim(&self, query: &str, detailed: bool) -> Result<Vec<GeoCandidate>> {
        let url = format!("{}/search", NOMINATIM_URL);
        let limit = if detailed { "5" } else { "1" };
        let mut params = vec![("q", query), ("format", "json"), ("limit", limit)];
        if detailed {
            params.push(("addressdetails", "1"));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| PaddySenseError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        if !response.status().is_success() {
            return Err(PaddySenseError::DataSourceUnavailable(format!(
                "Nominatim returned {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            PaddySenseError::DataSourceUnavailable(format!(
                "Failed to parse Nominatim response: {}",
                e
            ))
        })?;

        Ok(convert_nominatim(places))
    }

    async fn search_geo_provider(&self, query: &str) -> Result<Vec<GeoCandidate>> {
        let response = self
            .client
            .get(GEO_SEARCH_URL)
            .query(&[("name", query), ("count", "5")])
            .send()
            .await
            .map_err(|e| {
                PaddySenseError::DataSourceUnavailable(format!("Open-Meteo geocoder: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(PaddySenseError::DataSourceUnavailable(format!(
                "Open-Meteo geocoder returned {}",
                response.status()
            )));
        }

        let body: GeoSearchResponse = response.json().await.map_err(|e| {
            PaddySenseError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo geocoder response: {}",
                e
            ))
        })?;

        Ok(convert_geo_search(body))
    }

    /// Probe Nominatim's status endpoint.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/status", NOMINATIM_URL);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PaddySenseError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        Ok(response.status().is_success())
    }
}

/// Build the ordered strategy plan for one location. Split and cleaned
/// variants are skipped when they would repeat an earlier query verbatim,
/// so the chain never wastes an attempt on a duplicate.
fn build_queries(location: &str) -> Vec<(GeocodeStrategy, GeocodeQuery)> {
    let mut plan = vec![
        (
            GeocodeStrategy::Exact,
            GeocodeQuery::Nominatim {
                query: location.to_string(),
                detailed: false,
            },
        ),
        (
            GeocodeStrategy::Detailed,
            GeocodeQuery::Nominatim {
                query: location.to_string(),
                detailed: true,
            },
        ),
        (
            GeocodeStrategy::AlternateProvider,
            GeocodeQuery::GeoSearch {
                query: location.to_string(),
            },
        ),
    ];

    if let Some(prefix) = location.split(',').next() {
        let prefix = prefix.trim();
        if !prefix.is_empty() && prefix != location {
            plan.push((
                GeocodeStrategy::SplitLocation,
                GeocodeQuery::Nominatim {
                    query: prefix.to_string(),
                    detailed: false,
                },
            ));
        }
    }

    let cleaned = clean_location(location);
    if !cleaned.is_empty() && cleaned != location {
        plan.push((
            GeocodeStrategy::CleanedText,
            GeocodeQuery::Nominatim {
                query: cleaned,
                detailed: false,
            },
        ));
    }

    plan
}

/// Strip punctuation and collapse runs of whitespace.
fn clean_location(location: &str) -> String {
    let strip = Regex::new(r"[^A-Za-z0-9 ]+").unwrap();
    let collapse = Regex::new(r"\s+").unwrap();

    let stripped = strip.replace_all(location, " ");
    collapse.replace_all(&stripped, " ").trim().to_string()
}

fn convert_nominatim(places: Vec<NominatimPlace>) -> Vec<GeoCandidate> {
    places
        .into_iter()
        .filter_map(|place| {
            let latitude = place.lat.parse().ok()?;
            let longitude = place.lon.parse().ok()?;
            Some(GeoCandidate {
                display_name: place.display_name,
                latitude,
                longitude,
            })
        })
        .collect()
}

fn convert_geo_search(response: GeoSearchResponse) -> Vec<GeoCandidate> {
    response
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|hit| {
            let mut display_name = hit.name;
            for part in [hit.admin1, hit.country].into_iter().flatten() {
                if !part.is_empty() && part != display_name {
                    display_name.push_str(", ");
                    display_name.push_str(&part);
                }
            }
            GeoCandidate {
                display_name,
                latitude: hit.latitude,
                longitude: hit.longitude,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_plan_orders_exact_first() {
        let plan = build_queries("Jaffna, Sri Lanka");
        let strategies: Vec<GeocodeStrategy> = plan.iter().map(|(s, _)| *s).collect();

        assert_eq!(
            strategies,
            vec![
                GeocodeStrategy::Exact,
                GeocodeStrategy::Detailed,
                GeocodeStrategy::AlternateProvider,
                GeocodeStrategy::SplitLocation,
                GeocodeStrategy::CleanedText,
            ]
        );

        // Split takes the text before the first comma
        assert_eq!(
            plan[3].1,
            GeocodeQuery::Nominatim {
                query: "Jaffna".to_string(),
                detailed: false,
            }
        );
        // Cleaning drops the comma
        assert_eq!(
            plan[4].1,
            GeocodeQuery::Nominatim {
                query: "Jaffna Sri Lanka".to_string(),
                detailed: false,
            }
        );
    }

    #[test]
    fn strategy_plan_skips_degenerate_variants() {
        // No comma and nothing to clean: only the three base strategies
        let plan = build_queries("Kurunegala");
        let strategies: Vec<GeocodeStrategy> = plan.iter().map(|(s, _)| *s).collect();

        assert_eq!(
            strategies,
            vec![
                GeocodeStrategy::Exact,
                GeocodeStrategy::Detailed,
                GeocodeStrategy::AlternateProvider,
            ]
        );
    }

    #[test]
    fn strategy_plan_keeps_cleaned_when_punctuated() {
        let plan = build_queries("Galle!!");
        let strategies: Vec<GeocodeStrategy> = plan.iter().map(|(s, _)| *s).collect();

        assert!(strategies.contains(&GeocodeStrategy::CleanedText));
        assert!(!strategies.contains(&GeocodeStrategy::SplitLocation));
        assert_eq!(
            plan.last().unwrap().1,
            GeocodeQuery::Nominatim {
                query: "Galle".to_string(),
                detailed: false,
            }
        );
    }

    #[test]
    fn clean_location_strips_punctuation() {
        assert_eq!(clean_location("Jaffna, Sri Lanka"), "Jaffna Sri Lanka");
        assert_eq!(clean_location("  Galle !!  Fort "), "Galle Fort");
        assert_eq!(clean_location("Anuradhapura"), "Anuradhapura");
        assert_eq!(clean_location("???"), "");
    }

    #[test]
    fn nominatim_payload_parses_string_coordinates() {
        let payload = r#"[
            {"lat": "9.6684", "lon": "80.0074", "display_name": "Jaffna, Northern Province, Sri Lanka"},
            {"lat": "not-a-number", "lon": "80.0", "display_name": "Broken"}
        ]"#;

        let places: Vec<NominatimPlace> = serde_json::from_str(payload).unwrap();
        let candidates = convert_nominatim(places);

        // The malformed row is dropped, not a hard failure
        assert_eq!(candidates.len(), 1);
        assert!((candidates[0].latitude - 9.6684).abs() < 1e-9);
        assert!(candidates[0].display_name.contains("Jaffna"));
    }

    #[test]
    fn geo_search_payload_parses_numeric_coordinates() {
        let payload = r#"{
            "results": [
                {"name": "Kurunegala", "latitude": 7.4863, "longitude": 80.3623,
                 "admin1": "North Western Province", "country": "Sri Lanka"}
            ]
        }"#;

        let body: GeoSearchResponse = serde_json::from_str(payload).unwrap();
        let candidates = convert_geo_search(body);

        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].display_name,
            "Kurunegala, North Western Province, Sri Lanka"
        );
        assert!((candidates[0].longitude - 80.3623).abs() < 1e-9);
    }

    #[test]
    fn geo_search_payload_without_results_is_empty() {
        let body: GeoSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(convert_geo_search(body).is_empty());
    }
}
