use super::{varieties, AdvicePass};
use crate::models::{AdvisorRequest, PaddyAdvice, PlantingSeason, SeasonPeriod};

/// Season pass
///
/// Planting timing and water management per season, the season-specific
/// variety list, and the what-to-do-this-month text. "Current" resolves
/// through the season period of the request month before any branch runs.
pub struct SeasonPass;

impl AdvicePass for SeasonPass {
    fn id(&self) -> &'static str {
        "season"
    }

    fn name(&self) -> &'static str {
        "Season Timing & Water"
    }

    fn apply(&self, request: &AdvisorRequest, advice: &mut PaddyAdvice) {
        let effective = request.effective_season();

        let (timing, water) = match effective {
            PlantingSeason::Yala => (
                "Yala sowing runs February into April: establish nurseries with the \
                 first inter-monsoon rains and transplant within three to four weeks.",
                "Yala is the drier season, so secure irrigation before sowing. Keep \
                 5 cm of standing water after establishment and top up weekly.",
            ),
            PlantingSeason::Maha => (
                "Maha sowing runs September into November with the northeast monsoon \
                 onset; transplant before December for the main crop.",
                "Maha is largely rain-fed. Keep bunds and drains maintained, and drain \
                 storm water within a day to avoid submergence damage.",
            ),
            PlantingSeason::Current | PlantingSeason::Other => (
                "Outside the two main seasons, sow a short-age variety as soon as the \
                 water supply for the full crop is assured.",
                "Match water to growth stage: saturated soil at establishment, 5 cm \
                 standing through tillering, then drain two weeks before harvest.",
            ),
        };

        advice.planting_timing = timing.to_string();
        advice.water_management = water.to_string();
        advice.seasonal_varieties = varieties::seasonal(effective)
            .iter()
            .map(|v| v.to_string())
            .collect();
        advice.current_time_recommendations = current_time_advice(request.month);
    }
}

fn current_time_advice(month: u32) -> String {
    let name = month_name(month);
    match SeasonPeriod::for_month(month) {
        SeasonPeriod::Yala => format!(
            "{} falls in the Yala season (Feb-May): nurseries should be established \
             now and fields puddled ready for transplanting.",
            name
        ),
        SeasonPeriod::Maha => format!(
            "{} falls in the Maha season (Sep-Jan): sow with the monsoon onset and \
             finish transplanting before the rains peak.",
            name
        ),
        SeasonPeriod::Transition => format!(
            "{} sits between seasons (Jun-Aug): repair bunds and channels, plough in \
             stubble and line up seed and fertilizer for Maha.",
            name
        ),
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "This month",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_time_advice_tracks_period() {
        assert!(current_time_advice(3).contains("Yala"));
        assert!(current_time_advice(10).contains("Maha"));
        assert!(current_time_advice(7).contains("between seasons"));
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "This month");
    }
}
