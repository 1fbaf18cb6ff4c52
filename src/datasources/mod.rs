pub mod geocoding;
pub mod openmeteo;

pub use geocoding::GeocodingClient;
pub use openmeteo::OpenMeteoClient;
