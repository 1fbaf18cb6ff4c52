use crate::models::{PlantingSeason, TemperatureBand};

/// Released and traditional Sri Lankan rice varieties, grouped by the soil
/// temperature band they handle best. BG = Batalagoda, AT = Ambalantota,
/// BW = Bombuwela, LD = Labuduwa breeding stations; the rest are
/// traditional cultivars.
pub struct VarietySet {
    pub primary: &'static [&'static str],
    pub secondary: &'static [&'static str],
}

pub fn for_band(band: TemperatureBand) -> VarietySet {
    match band {
        TemperatureBand::Cold => VarietySet {
            primary: &["BW 272-6B", "LD 365", "BG 250"],
            secondary: &["H-4", "Pachchaperumal"],
        },
        TemperatureBand::Optimal => VarietySet {
            primary: &["BG 352", "BG 300", "AT 362"],
            secondary: &["BG 360", "BG 94-1", "Suwandel"],
        },
        TemperatureBand::Warm => VarietySet {
            primary: &["BG 94-1", "AT 303", "BG 380"],
            secondary: &["BG 300", "H-4"],
        },
        TemperatureBand::Hot => VarietySet {
            primary: &["AT 303", "BG 94-1"],
            secondary: &["H-4", "Kalu Heenati"],
        },
    }
}

/// Season-specific picks: Yala favors short-age varieties that fit the
/// drier window, Maha can carry the longer-age ones through the monsoon.
/// Callers resolve "Current" to a concrete season before asking.
pub fn seasonal(season: PlantingSeason) -> &'static [&'static str] {
    match season {
        PlantingSeason::Yala => &["BG 250", "BG 300", "AT 307"],
        PlantingSeason::Maha => &["BG 352", "BG 380", "BW 272-6B"],
        PlantingSeason::Current | PlantingSeason::Other => &["BG 300", "BG 250"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_band_has_varieties() {
        for band in [
            TemperatureBand::Cold,
            TemperatureBand::Optimal,
            TemperatureBand::Warm,
            TemperatureBand::Hot,
        ] {
            let set = for_band(band);
            assert!(!set.primary.is_empty(), "no primaries for {:?}", band);
            assert!(!set.secondary.is_empty(), "no secondaries for {:?}", band);
        }
    }

    #[test]
    fn seasonal_lists_differ() {
        assert_ne!(
            seasonal(PlantingSeason::Yala),
            seasonal(PlantingSeason::Maha)
        );
    }
}
