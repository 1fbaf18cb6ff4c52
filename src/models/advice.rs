use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilType {
    Clay,
    Sandy,
    Loamy,
    Silt,
    Other,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::Loamy => "Loamy",
            SoilType::Silt => "Silt",
            SoilType::Other => "Other",
        }
    }

    /// Form label shown beside the selector.
    pub fn label(&self) -> &'static str {
        match self {
            SoilType::Clay => "Clay (good water retention)",
            SoilType::Sandy => "Sandy (well drained)",
            SoilType::Loamy => "Loamy (ideal balance)",
            SoilType::Silt => "Silt (fine texture)",
            SoilType::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clay" => Some(SoilType::Clay),
            "sandy" => Some(SoilType::Sandy),
            "loamy" | "loam" => Some(SoilType::Loamy),
            "silt" => Some(SoilType::Silt),
            "other" => Some(SoilType::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [SoilType] {
        &[
            SoilType::Clay,
            SoilType::Sandy,
            SoilType::Loamy,
            SoilType::Silt,
            SoilType::Other,
        ]
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantingSeason {
    Yala,
    Maha,
    Current,
    Other,
}

impl PlantingSeason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantingSeason::Yala => "Yala",
            PlantingSeason::Maha => "Maha",
            PlantingSeason::Current => "Current",
            PlantingSeason::Other => "Other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlantingSeason::Yala => "Yala (Feb-May)",
            PlantingSeason::Maha => "Maha (Sep-Mar)",
            PlantingSeason::Current => "Current season",
            PlantingSeason::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yala" => Some(PlantingSeason::Yala),
            "maha" => Some(PlantingSeason::Maha),
            "current" => Some(PlantingSeason::Current),
            "other" => Some(PlantingSeason::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [PlantingSeason] {
        &[
            PlantingSeason::Yala,
            PlantingSeason::Maha,
            PlantingSeason::Current,
            PlantingSeason::Other,
        ]
    }
}

impl std::fmt::Display for PlantingSeason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which cultivation season the calendar month falls in, independent of
/// the season the user selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonPeriod {
    Yala,
    Maha,
    Transition,
}

impl SeasonPeriod {
    /// Yala runs February through May, Maha September through January.
    /// June-August is the dry gap between them.
    pub fn for_month(month: u32) -> Self {
        match month {
            2..=5 => SeasonPeriod::Yala,
            9..=12 | 1 => SeasonPeriod::Maha,
            _ => SeasonPeriod::Transition,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonPeriod::Yala => "Yala",
            SeasonPeriod::Maha => "Maha",
            SeasonPeriod::Transition => "Transition",
        }
    }

    pub fn months_label(&self) -> &'static str {
        match self {
            SeasonPeriod::Yala => "Feb-May",
            SeasonPeriod::Maha => "Sep-Jan",
            SeasonPeriod::Transition => "Jun-Aug",
        }
    }
}

impl std::fmt::Display for SeasonPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureBand {
    Cold,
    Optimal,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn for_soil_temp(celsius: f64) -> Self {
        if celsius < 20.0 {
            TemperatureBand::Cold
        } else if celsius <= 30.0 {
            TemperatureBand::Optimal
        } else if celsius <= 35.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Hot
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::Cold => "Cold",
            TemperatureBand::Optimal => "Optimal",
            TemperatureBand::Warm => "Warm",
            TemperatureBand::Hot => "Hot",
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            TemperatureBand::Cold => "below 20°C",
            TemperatureBand::Optimal => "20-30°C",
            TemperatureBand::Warm => "30-35°C",
            TemperatureBand::Hot => "above 35°C",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            TemperatureBand::Cold => Color::Blue,
            TemperatureBand::Optimal => Color::Green,
            TemperatureBand::Warm => Color::Yellow,
            TemperatureBand::Hot => Color::Red,
        }
    }
}

impl std::fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated advisor input. The soil temperature is already numeric here;
/// the form rejects anything that does not parse before building a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorRequest {
    pub location: String,
    pub field_name: String,
    pub soil_temp_c: f64,
    pub soil_type: SoilType,
    pub season: PlantingSeason,
    /// Calendar month (1-12) the request was made in.
    pub month: u32,
}

impl AdvisorRequest {
    pub fn band(&self) -> TemperatureBand {
        TemperatureBand::for_soil_temp(self.soil_temp_c)
    }

    pub fn season_period(&self) -> SeasonPeriod {
        SeasonPeriod::for_month(self.month)
    }

    /// The season advice is written against: the selected one, or the
    /// period the request month falls in when "Current" was chosen.
    pub fn effective_season(&self) -> PlantingSeason {
        match self.season {
            PlantingSeason::Current => match self.season_period() {
                SeasonPeriod::Yala => PlantingSeason::Yala,
                SeasonPeriod::Maha => PlantingSeason::Maha,
                SeasonPeriod::Transition => PlantingSeason::Other,
            },
            season => season,
        }
    }
}

/// Full advisor output plus the inputs it was generated from. Stored as a
/// single immutable record per submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddyAdvice {
    pub id: Option<i64>,
    pub location: String,
    pub field_name: String,
    pub soil_temp_c: f64,
    pub soil_type: SoilType,
    pub season: PlantingSeason,
    pub primary_varieties: Vec<String>,
    pub secondary_varieties: Vec<String>,
    pub planting_timing: String,
    pub soil_preparation: String,
    pub water_management: String,
    pub fertilizer_tips: String,
    pub risk_factors: Vec<String>,
    pub optimal_conditions: Vec<String>,
    pub current_time_recommendations: String,
    pub seasonal_varieties: Vec<String>,
    pub immediate_actions: Vec<String>,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
}

impl PaddyAdvice {
    pub fn from_request(request: &AdvisorRequest) -> Self {
        Self {
            id: None,
            location: request.location.clone(),
            field_name: request.field_name.clone(),
            soil_temp_c: request.soil_temp_c,
            soil_type: request.soil_type,
            season: request.season,
            primary_varieties: Vec::new(),
            secondary_varieties: Vec::new(),
            planting_timing: String::new(),
            soil_preparation: String::new(),
            water_management: String::new(),
            fertilizer_tips: String::new(),
            risk_factors: Vec::new(),
            optimal_conditions: Vec::new(),
            current_time_recommendations: String::new(),
            seasonal_varieties: Vec::new(),
            immediate_actions: Vec::new(),
            explanation: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn temperature_band(&self) -> TemperatureBand {
        TemperatureBand::for_soil_temp(self.soil_temp_c)
    }

    pub fn has_risks(&self) -> bool {
        !self.risk_factors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(TemperatureBand::for_soil_temp(19.9), TemperatureBand::Cold);
        assert_eq!(
            TemperatureBand::for_soil_temp(20.0),
            TemperatureBand::Optimal
        );
        assert_eq!(
            TemperatureBand::for_soil_temp(30.0),
            TemperatureBand::Optimal
        );
        assert_eq!(TemperatureBand::for_soil_temp(30.1), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::for_soil_temp(35.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::for_soil_temp(35.1), TemperatureBand::Hot);
    }

    #[test]
    fn season_period_by_month() {
        for month in [2, 3, 4, 5] {
            assert_eq!(SeasonPeriod::for_month(month), SeasonPeriod::Yala);
        }
        for month in [9, 10, 11, 12, 1] {
            assert_eq!(SeasonPeriod::for_month(month), SeasonPeriod::Maha);
        }
        for month in [6, 7, 8] {
            assert_eq!(SeasonPeriod::for_month(month), SeasonPeriod::Transition);
        }
    }

    #[test]
    fn soil_type_from_str() {
        assert_eq!(SoilType::from_str("clay"), Some(SoilType::Clay));
        assert_eq!(SoilType::from_str("Loamy"), Some(SoilType::Loamy));
        assert_eq!(SoilType::from_str("loam"), Some(SoilType::Loamy));
        assert_eq!(SoilType::from_str("SILT"), Some(SoilType::Silt));
        assert_eq!(SoilType::from_str("peat"), None);
    }

    #[test]
    fn soil_type_round_trip() {
        for soil in SoilType::all() {
            let debug_str = format!("{:?}", soil);
            assert_eq!(
                SoilType::from_str(&debug_str),
                Some(*soil),
                "Round-trip failed for {:?}",
                soil
            );
        }
    }

    #[test]
    fn planting_season_round_trip() {
        for season in PlantingSeason::all() {
            let debug_str = format!("{:?}", season);
            assert_eq!(
                PlantingSeason::from_str(&debug_str),
                Some(*season),
                "Round-trip failed for {:?}",
                season
            );
        }
    }

    fn request(season: PlantingSeason, month: u32) -> AdvisorRequest {
        AdvisorRequest {
            location: "Kurunegala".to_string(),
            field_name: "Field A".to_string(),
            soil_temp_c: 26.0,
            soil_type: SoilType::Loamy,
            season,
            month,
        }
    }

    #[test]
    fn effective_season_resolves_current() {
        // Explicit selections pass through untouched
        assert_eq!(
            request(PlantingSeason::Yala, 11).effective_season(),
            PlantingSeason::Yala
        );

        // "Current" follows the month
        assert_eq!(
            request(PlantingSeason::Current, 3).effective_season(),
            PlantingSeason::Yala
        );
        assert_eq!(
            request(PlantingSeason::Current, 10).effective_season(),
            PlantingSeason::Maha
        );
        assert_eq!(
            request(PlantingSeason::Current, 7).effective_season(),
            PlantingSeason::Other
        );
    }

    #[test]
    fn advice_copies_request_inputs() {
        let req = request(PlantingSeason::Maha, 10);
        let advice = PaddyAdvice::from_request(&req);

        assert_eq!(advice.location, "Kurunegala");
        assert_eq!(advice.soil_temp_c, 26.0);
        assert_eq!(advice.soil_type, SoilType::Loamy);
        assert!(advice.primary_varieties.is_empty());
        assert!(!advice.has_risks());
        assert_eq!(advice.temperature_band(), TemperatureBand::Optimal);
    }
}
