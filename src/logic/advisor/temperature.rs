use super::{varieties, AdvicePass};
use crate::models::{AdvisorRequest, PaddyAdvice, TemperatureBand};

/// Soil temperature pass
///
/// Paddy germinates reliably between 20°C and 30°C. Below that emergence
/// stalls; above 35°C flowering-stage sterility becomes the limiting
/// factor. The band picks the variety lists and carries all of the
/// temperature-driven risks and actions.
pub struct TemperaturePass;

impl AdvicePass for TemperaturePass {
    fn id(&self) -> &'static str {
        "temperature"
    }

    fn name(&self) -> &'static str {
        "Soil Temperature Band"
    }

    fn apply(&self, request: &AdvisorRequest, advice: &mut PaddyAdvice) {
        let band = request.band();
        let set = varieties::for_band(band);

        advice.primary_varieties = set.primary.iter().map(|v| v.to_string()).collect();
        advice.secondary_varieties = set.secondary.iter().map(|v| v.to_string()).collect();

        match band {
            TemperatureBand::Cold => {
                advice.risk_factors.push(format!(
                    "Soil is too cold for reliable germination ({:.1}°C, below the 20°C minimum)",
                    request.soil_temp_c
                ));
                advice
                    .risk_factors
                    .push("Slow, uneven emergence and weak early seedlings".to_string());
                advice
                    .immediate_actions
                    .push("Delay direct sowing until soil holds above 20°C".to_string());
                advice
                    .immediate_actions
                    .push("Raise seedlings in a protected nursery bed in the meantime".to_string());
            }
            TemperatureBand::Optimal => {
                advice
                    .immediate_actions
                    .push("Proceed with land preparation and sowing on schedule".to_string());
            }
            TemperatureBand::Warm => {
                advice.risk_factors.push(format!(
                    "Heat stress likely at flowering if soil stays at {:.1}°C",
                    request.soil_temp_c
                ));
                advice
                    .risk_factors
                    .push("Faster field water loss through evaporation".to_string());
                advice
                    .immediate_actions
                    .push("Maintain 5-7 cm of standing water to buffer soil temperature".to_string());
                advice
                    .immediate_actions
                    .push("Transplant in early morning or late evening".to_string());
            }
            TemperatureBand::Hot => {
                advice.risk_factors.push(format!(
                    "Severe heat stress at {:.1}°C; germination and root growth suffer",
                    request.soil_temp_c
                ));
                advice
                    .risk_factors
                    .push("Spikelet sterility risk once canopy temperature passes 35°C".to_string());
                advice
                    .risk_factors
                    .push("Rapid evaporation will drain standing water quickly".to_string());
                advice
                    .immediate_actions
                    .push("Postpone transplanting until soil cools below 35°C".to_string());
                advice
                    .immediate_actions
                    .push("Deepen standing water to around 10 cm where supply allows".to_string());
                advice
                    .immediate_actions
                    .push("Shade nursery beds through midday".to_string());
            }
        }
    }
}
