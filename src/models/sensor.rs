use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single environmental reading recorded against a field plot.
/// Every measurement is optional; a reading with nothing filled in is
/// still valid (a probe can report a subset of channels).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: Option<i64>,
    pub field_plot_id: i64,
    pub timestamp: DateTime<Utc>,
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub soil_moisture_percent: Option<f64>,
    pub soil_ph: Option<f64>,
    pub light_intensity_lux: Option<f64>,
    pub rainfall_mm: Option<f64>,
}

impl SensorReading {
    pub fn new(field_plot_id: i64) -> Self {
        Self {
            id: None,
            field_plot_id,
            timestamp: Utc::now(),
            temperature_c: None,
            humidity_percent: None,
            soil_moisture_percent: None,
            soil_ph: None,
            light_intensity_lux: None,
            rainfall_mm: None,
        }
    }

    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature_c = Some(celsius);
        self
    }

    pub fn with_humidity(mut self, percent: f64) -> Self {
        self.humidity_percent = Some(percent);
        self
    }

    pub fn with_soil_moisture(mut self, percent: f64) -> Self {
        self.soil_moisture_percent = Some(percent);
        self
    }

    pub fn with_soil_ph(mut self, ph: f64) -> Self {
        self.soil_ph = Some(ph);
        self
    }

    pub fn with_rainfall(mut self, mm: f64) -> Self {
        self.rainfall_mm = Some(mm);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.temperature_c.is_none()
            && self.humidity_percent.is_none()
            && self.soil_moisture_percent.is_none()
            && self.soil_ph.is_none()
            && self.light_intensity_lux.is_none()
            && self.rainfall_mm.is_none()
    }

    /// Paddy soils want to sit slightly acidic. Outside this range nutrient
    /// uptake starts to suffer.
    pub fn ph_in_paddy_range(&self) -> Option<bool> {
        self.soil_ph.map(|ph| (5.5..=6.5).contains(&ph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_builder() {
        let reading = SensorReading::new(3)
            .with_temperature(27.5)
            .with_humidity(81.0)
            .with_soil_moisture(62.0);

        assert_eq!(reading.field_plot_id, 3);
        assert_eq!(reading.temperature_c, Some(27.5));
        assert_eq!(reading.humidity_percent, Some(81.0));
        assert_eq!(reading.soil_moisture_percent, Some(62.0));
        assert!(reading.soil_ph.is_none());
        assert!(!reading.is_empty());
    }

    #[test]
    fn empty_reading() {
        let reading = SensorReading::new(1);
        assert!(reading.is_empty());
    }

    #[test]
    fn ph_range_check() {
        let neutral = SensorReading::new(1).with_soil_ph(6.0);
        assert_eq!(neutral.ph_in_paddy_range(), Some(true));

        let alkaline = SensorReading::new(1).with_soil_ph(7.8);
        assert_eq!(alkaline.ph_in_paddy_range(), Some(false));

        let unknown = SensorReading::new(1);
        assert_eq!(unknown.ph_in_paddy_range(), None);
    }
}
