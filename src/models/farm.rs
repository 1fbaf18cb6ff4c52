use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: Option<i64>,
    pub name: String,
    pub location: String,
    pub area_hectares: Option<f64>,
    pub soil_type: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl Farm {
    pub fn new(name: String, location: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name,
            location,
            area_hectares: None,
            soil_type: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for Farm {
    fn default() -> Self {
        Self::new("My Farm".to_string(), "Kurunegala, Sri Lanka".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Paddy,
    Vegetables,
    Fruits,
    Pulses,
    Other,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Paddy => "Paddy",
            FieldType::Vegetables => "Vegetables",
            FieldType::Fruits => "Fruits",
            FieldType::Pulses => "Pulses",
            FieldType::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paddy" => Some(FieldType::Paddy),
            "vegetables" => Some(FieldType::Vegetables),
            "fruits" => Some(FieldType::Fruits),
            "pulses" => Some(FieldType::Pulses),
            "other" => Some(FieldType::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::Paddy,
            FieldType::Vegetables,
            FieldType::Fruits,
            FieldType::Pulses,
            FieldType::Other,
        ]
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotStatus {
    Active,
    Fallow,
    Maintenance,
}

impl PlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotStatus::Active => "Active",
            PlotStatus::Fallow => "Fallow",
            PlotStatus::Maintenance => "Maintenance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(PlotStatus::Active),
            "fallow" => Some(PlotStatus::Fallow),
            "maintenance" => Some(PlotStatus::Maintenance),
            _ => None,
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            PlotStatus::Active => Color::Green,
            PlotStatus::Fallow => Color::Yellow,
            PlotStatus::Maintenance => Color::Gray,
        }
    }
}

impl std::fmt::Display for PlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cultivated plot inside a farm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldPlot {
    pub id: Option<i64>,
    pub farm_id: i64,
    pub name: String,
    pub area_hectares: Option<f64>,
    pub field_type: FieldType,
    pub status: PlotStatus,
}

impl FieldPlot {
    pub fn new(farm_id: i64, name: String) -> Self {
        Self {
            id: None,
            farm_id,
            name,
            area_hectares: None,
            field_type: FieldType::Paddy,
            status: PlotStatus::Active,
        }
    }

    pub fn with_area(mut self, hectares: f64) -> Self {
        self.area_hectares = Some(hectares);
        self
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthStage {
    Germination,
    Vegetative,
    Flowering,
    Maturity,
    Harvest,
}

impl GrowthStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "Germination",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::Maturity => "Maturity",
            GrowthStage::Harvest => "Harvest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "germination" => Some(GrowthStage::Germination),
            "vegetative" => Some(GrowthStage::Vegetative),
            "flowering" => Some(GrowthStage::Flowering),
            "maturity" => Some(GrowthStage::Maturity),
            "harvest" => Some(GrowthStage::Harvest),
            _ => None,
        }
    }

    pub fn all() -> &'static [GrowthStage] {
        &[
            GrowthStage::Germination,
            GrowthStage::Vegetative,
            GrowthStage::Flowering,
            GrowthStage::Maturity,
            GrowthStage::Harvest,
        ]
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            GrowthStage::Germination => Color::LightYellow,
            GrowthStage::Vegetative => Color::Green,
            GrowthStage::Flowering => Color::Magenta,
            GrowthStage::Maturity => Color::Yellow,
            GrowthStage::Harvest => Color::LightRed,
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub id: Option<i64>,
    pub field_plot_id: i64,
    pub name: String,
    pub variety: String,
    pub planting_date: NaiveDate,
    pub expected_harvest_date: Option<NaiveDate>,
    pub growth_stage: GrowthStage,
    pub health_score: i64,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
}

impl Crop {
    pub fn new(field_plot_id: i64, name: String, variety: String, planting_date: NaiveDate) -> Self {
        Self {
            id: None,
            field_plot_id,
            name,
            variety,
            planting_date,
            expected_harvest_date: None,
            growth_stage: GrowthStage::Germination,
            health_score: 100,
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_harvest_date(mut self, date: NaiveDate) -> Self {
        self.expected_harvest_date = Some(date);
        self
    }

    pub fn with_stage(mut self, stage: GrowthStage) -> Self {
        self.growth_stage = stage;
        self
    }

    /// Days remaining until the expected harvest, clamped at zero.
    pub fn days_to_harvest(&self, today: NaiveDate) -> i64 {
        match self.expected_harvest_date {
            Some(harvest) => (harvest - today).num_days().max(0),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_from_str_valid() {
        assert_eq!(FieldType::from_str("paddy"), Some(FieldType::Paddy));
        assert_eq!(FieldType::from_str("Paddy"), Some(FieldType::Paddy));
        assert_eq!(
            FieldType::from_str("VEGETABLES"),
            Some(FieldType::Vegetables)
        );
        assert_eq!(FieldType::from_str("pulses"), Some(FieldType::Pulses));
    }

    #[test]
    fn field_type_from_str_invalid() {
        assert_eq!(FieldType::from_str("orchard"), None);
        assert_eq!(FieldType::from_str(""), None);
    }

    #[test]
    fn field_type_round_trip() {
        for field_type in FieldType::all() {
            let debug_str = format!("{:?}", field_type);
            assert_eq!(
                FieldType::from_str(&debug_str),
                Some(*field_type),
                "Round-trip failed for {:?}",
                field_type
            );
        }
    }

    #[test]
    fn plot_status_from_str() {
        assert_eq!(PlotStatus::from_str("active"), Some(PlotStatus::Active));
        assert_eq!(PlotStatus::from_str("Fallow"), Some(PlotStatus::Fallow));
        assert_eq!(
            PlotStatus::from_str("maintenance"),
            Some(PlotStatus::Maintenance)
        );
        assert_eq!(PlotStatus::from_str("retired"), None);
    }

    #[test]
    fn growth_stage_round_trip() {
        for stage in GrowthStage::all() {
            let debug_str = format!("{:?}", stage);
            assert_eq!(
                GrowthStage::from_str(&debug_str),
                Some(*stage),
                "Round-trip failed for {:?}",
                stage
            );
        }
    }

    #[test]
    fn crop_days_to_harvest() {
        let planted = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let crop = Crop::new(1, "Rice".to_string(), "BG 352".to_string(), planted)
            .with_harvest_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());

        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(crop.days_to_harvest(today), 10);

        // Past the harvest date the countdown stays at zero
        let late = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(crop.days_to_harvest(late), 0);
    }

    #[test]
    fn crop_days_to_harvest_without_date() {
        let planted = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let crop = Crop::new(1, "Rice".to_string(), "BG 300".to_string(), planted);
        assert_eq!(crop.days_to_harvest(planted), 0);
    }

    #[test]
    fn field_plot_builder() {
        let plot = FieldPlot::new(1, "North Tract".to_string())
            .with_area(2.5)
            .with_type(FieldType::Paddy);

        assert_eq!(plot.farm_id, 1);
        assert_eq!(plot.area_hectares, Some(2.5));
        assert_eq!(plot.field_type, FieldType::Paddy);
        assert_eq!(plot.status, PlotStatus::Active);
    }
}
