use super::AdvicePass;
use crate::models::{AdvisorRequest, PaddyAdvice, SoilType};

/// Soil type pass
///
/// One preparation string and one fertilizer string per soil type. The
/// branches never overlap; "Other" is the catch-all.
pub struct SoilPass;

impl AdvicePass for SoilPass {
    fn id(&self) -> &'static str {
        "soil"
    }

    fn name(&self) -> &'static str {
        "Soil Preparation & Fertilizer"
    }

    fn apply(&self, request: &AdvisorRequest, advice: &mut PaddyAdvice) {
        let (preparation, fertilizer) = match request.soil_type {
            SoilType::Clay => (
                "Clay holds water well. Plough two to three weeks ahead, then puddle \
                 thoroughly; avoid overworking or the pan will crack when it dries.",
                "Split nitrogen into three doses (basal, tillering, panicle initiation). \
                 Clay retains potassium, so a single K dose at land preparation is enough.",
            ),
            SoilType::Sandy => (
                "Sandy soil drains fast. Work in compost or a green manure crop to build \
                 retention, and compact the bunds well to slow seepage.",
                "Apply nitrogen in four small splits; sandy soil leaches it quickly. \
                 Add extra potassium and organic matter every season.",
            ),
            SoilType::Loamy => (
                "Loam is the ideal paddy soil. Standard ploughing and puddling are \
                 enough; a well-levelled field pays off at water management time.",
                "Balanced NPK at the recommended rate, with nitrogen top-dressed at \
                 tillering and panicle initiation.",
            ),
            SoilType::Silt => (
                "Silt crusts after rain. Incorporate straw or compost, puddle lightly \
                 and keep a thin water layer to stop the surface sealing.",
                "Moderate nitrogen in two or three splits; watch for zinc deficiency, \
                 common in fine-textured paddy soils.",
            ),
            SoilType::Other => (
                "Have the soil tested before the season. Plough, puddle and level on \
                 the standard schedule until the results arrive.",
                "Follow soil-test recommendations; without a test, use the regional \
                 department rates for your district.",
            ),
        };

        advice.soil_preparation = preparation.to_string();
        advice.fertilizer_tips = fertilizer.to_string();
    }
}
