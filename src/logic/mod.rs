pub mod advisor;
pub mod weather_sync;

pub use advisor::AdvisorEngine;
pub use weather_sync::WeatherSyncService;
