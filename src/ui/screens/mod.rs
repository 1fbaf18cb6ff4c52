pub mod advisor;
pub mod dashboard;
pub mod fields;
pub mod history;
pub mod settings;
pub mod weather;

pub use advisor::{AdvisorField, AdvisorScreen};
pub use dashboard::DashboardScreen;
pub use fields::{FieldsScreen, ReadingField};
pub use history::HistoryScreen;
pub use settings::{SettingsField, SettingsScreen};
pub use weather::WeatherScreen;
