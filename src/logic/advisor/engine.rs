use super::{
    region::RegionPass, season::SeasonPass, soil::SoilPass, temperature::TemperaturePass,
    AdvicePass,
};
use crate::models::{AdvisorRequest, PaddyAdvice};

pub struct AdvisorEngine {
    passes: Vec<Box<dyn AdvicePass>>,
}

impl AdvisorEngine {
    pub fn new() -> Self {
        let passes: Vec<Box<dyn AdvicePass>> = vec![
            Box::new(TemperaturePass),
            Box::new(SoilPass),
            Box::new(SeasonPass),
            Box::new(RegionPass),
        ];

        Self { passes }
    }

    /// Run every pass over the request and assemble the advice record.
    /// Pure and deterministic apart from the created_at stamp; the same
    /// request always yields the same advice text.
    pub fn advise(&self, request: &AdvisorRequest) -> PaddyAdvice {
        let mut advice = PaddyAdvice::from_request(request);

        for pass in &self.passes {
            pass.apply(request, &mut advice);
        }

        finalize(request, &mut advice);
        advice
    }

    pub fn list_passes(&self) -> Vec<(&'static str, &'static str)> {
        self.passes.iter().map(|p| (p.id(), p.name())).collect()
    }
}

impl Default for AdvisorEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn finalize(request: &AdvisorRequest, advice: &mut PaddyAdvice) {
    advice.optimal_conditions = vec![
        "Soil temperature 20-30°C".to_string(),
        "Standing water 5-10 cm through tillering".to_string(),
        "Soil pH 5.5-6.5".to_string(),
        "Full sun with high humidity during ripening".to_string(),
    ];

    let band = request.band();
    advice.explanation = format!(
        "Soil temperature {:.1}°C falls in the {} band ({}). {} soil and the {} \
         season shape the preparation, fertilizer and timing advice; {} primary \
         varieties suggested and {} risk factor(s) flagged.",
        request.soil_temp_c,
        band.as_str().to_lowercase(),
        band.range_label(),
        request.soil_type,
        request.effective_season().as_str(),
        advice.primary_varieties.len(),
        advice.risk_factors.len(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlantingSeason, SoilType, TemperatureBand};

    fn request(soil_temp_c: f64, location: &str) -> AdvisorRequest {
        AdvisorRequest {
            location: location.to_string(),
            field_name: "Field A".to_string(),
            soil_temp_c,
            soil_type: SoilType::Loamy,
            season: PlantingSeason::Maha,
            month: 10,
        }
    }

    #[test]
    fn cold_soil_flags_too_cold_risk() {
        let engine = AdvisorEngine::new();
        let advice = engine.advise(&request(15.0, "Kandy, Sri Lanka"));

        assert!(
            advice.risk_factors.iter().any(|r| r.contains("too cold")),
            "expected a 'too cold' risk factor, got {:?}",
            advice.risk_factors
        );
        // Cold band selects the cold-tolerant list
        assert!(advice
            .primary_varieties
            .iter()
            .any(|v| v == "BW 272-6B" || v == "LD 365"));
        assert_eq!(advice.temperature_band(), TemperatureBand::Cold);
    }

    #[test]
    fn optimal_soil_has_no_risks() {
        let engine = AdvisorEngine::new();
        for temp in [20.0, 25.0, 30.0] {
            let advice = engine.advise(&request(temp, "Kurunegala, Sri Lanka"));
            assert!(
                advice.risk_factors.is_empty(),
                "no risk factors expected at {}°C, got {:?}",
                temp,
                advice.risk_factors
            );
            assert!(!advice.primary_varieties.is_empty());
        }
    }

    #[test]
    fn jaffna_location_adds_local_variety() {
        let engine = AdvisorEngine::new();
        for location in ["Jaffna", "jaffna, sri lanka", "Near JAFFNA town"] {
            let advice = engine.advise(&request(26.0, location));
            assert!(
                advice.primary_varieties.iter().any(|v| v == "Jaffna Local"),
                "expected Jaffna Local in primaries for {:?}, got {:?}",
                location,
                advice.primary_varieties
            );
        }
    }

    #[test]
    fn jaffna_wins_over_generic_sri_lanka_match() {
        let engine = AdvisorEngine::new();
        let advice = engine.advise(&request(26.0, "Jaffna, Sri Lanka"));

        assert!(advice.primary_varieties.iter().any(|v| v == "Jaffna Local"));
        // The generic fallback never ran
        assert!(!advice.secondary_varieties.iter().any(|v| v == "Keeri Samba"));
    }

    #[test]
    fn hot_soil_flags_sterility_and_postpones() {
        let engine = AdvisorEngine::new();
        let advice = engine.advise(&request(38.0, "Hambantota, Sri Lanka"));

        assert!(advice
            .risk_factors
            .iter()
            .any(|r| r.contains("sterility") || r.contains("heat")));
        assert!(advice
            .immediate_actions
            .iter()
            .any(|a| a.contains("Postpone")));
    }

    #[test]
    fn every_output_field_is_populated() {
        let engine = AdvisorEngine::new();
        let advice = engine.advise(&request(26.0, "Polonnaruwa, Sri Lanka"));

        assert!(!advice.primary_varieties.is_empty());
        assert!(!advice.secondary_varieties.is_empty());
        assert!(!advice.planting_timing.is_empty());
        assert!(!advice.soil_preparation.is_empty());
        assert!(!advice.water_management.is_empty());
        assert!(!advice.fertilizer_tips.is_empty());
        assert!(!advice.optimal_conditions.is_empty());
        assert!(!advice.current_time_recommendations.is_empty());
        assert!(!advice.seasonal_varieties.is_empty());
        assert!(!advice.immediate_actions.is_empty());
        assert!(!advice.explanation.is_empty());
    }

    #[test]
    fn same_request_same_advice() {
        let engine = AdvisorEngine::new();
        let req = request(23.5, "Matara, Sri Lanka");

        let first = engine.advise(&req);
        let second = engine.advise(&req);

        assert_eq!(first.primary_varieties, second.primary_varieties);
        assert_eq!(first.risk_factors, second.risk_factors);
        assert_eq!(first.explanation, second.explanation);
    }

    #[test]
    fn engine_lists_all_passes() {
        let engine = AdvisorEngine::new();
        let passes = engine.list_passes();

        assert_eq!(passes.len(), 4);
        assert_eq!(passes[0].0, "temperature");
        assert_eq!(passes[3].0, "region");
    }
}
