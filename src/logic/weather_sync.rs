use crate::config::Config;
use crate::datasources::{GeocodingClient, OpenMeteoClient};
use crate::db::Database;
use crate::error::{PaddySenseError, Result};
use crate::models::WeatherReport;

/// Resolves free-text locations to coordinates, fetches current
/// conditions, and records each successful lookup in weather history.
pub struct WeatherSyncService {
    config: Config,
    db: Database,
    geocoding_client: Option<GeocodingClient>,
    openmeteo_client: Option<OpenMeteoClient>,
}

impl WeatherSyncService {
    pub fn new(config: Config, db: Database) -> Self {
        let geocoding_client = match GeocodingClient::new(&config.user_agent()) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Failed to build geocoding client: {}", e);
                None
            }
        };

        let openmeteo_client = match OpenMeteoClient::new() {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Failed to build weather client: {}", e);
                None
            }
        };

        if geocoding_client.is_none() || openmeteo_client.is_none() {
            tracing::warn!("Weather lookups will be unavailable this session");
        }

        Self {
            config,
            db,
            geocoding_client,
            openmeteo_client,
        }
    }

    /// Full lookup for a free-text location: geocode, fetch current
    /// conditions, and persist the observation.
    pub async fn lookup(&self, location: &str) -> Result<WeatherReport> {
        let geocoder = self
            .geocoding_client
            .as_ref()
            .ok_or_else(|| PaddySenseError::DataSourceUnavailable("geocoding".into()))?;
        let meteo = self
            .openmeteo_client
            .as_ref()
            .ok_or_else(|| PaddySenseError::DataSourceUnavailable("open-meteo".into()))?;

        let (resolved, strategy) = geocoder.resolve(location).await?;
        tracing::info!(
            location = %location,
            resolved = %resolved.display_name,
            strategy = %strategy.as_str(),
            "Location resolved"
        );

        let report = meteo.fetch_report(location, resolved, strategy).await?;

        // Record the observation; a failed insert should not lose the report
        if let Err(e) = self.db.insert_weather_observation(&report.to_observation()) {
            tracing::warn!("Failed to record weather observation: {}", e);
        }

        Ok(report)
    }

    /// Refresh conditions for the configured farm location.
    pub async fn refresh(&self) -> Result<WeatherReport> {
        let location = self.config.farm.location.clone();
        self.lookup(&location).await
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let mut status = ConnectionStatus::default();

        if let Some(ref client) = self.geocoding_client {
            status.geocoding = client.test_connection().await.unwrap_or(false);
        }

        if let Some(ref client) = self.openmeteo_client {
            status.openmeteo = client.test_connection().await.unwrap_or(false);
        }

        status
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub geocoding: bool,
    pub openmeteo: bool,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.geocoding && self.openmeteo
    }
}
