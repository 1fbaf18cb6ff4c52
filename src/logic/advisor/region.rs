use super::AdvicePass;
use crate::models::{AdvisorRequest, PaddyAdvice};

/// Region pass
///
/// Case-insensitive substring match on the location text, most specific
/// name first so a district hit wins over the generic "sri lanka" suffix
/// nearly every location carries. The first match appends its varieties
/// and the pass stops; no match adds nothing.
pub struct RegionPass;

impl AdvicePass for RegionPass {
    fn id(&self) -> &'static str {
        "region"
    }

    fn name(&self) -> &'static str {
        "Regional Varieties"
    }

    fn apply(&self, request: &AdvisorRequest, advice: &mut PaddyAdvice) {
        let location = request.location.to_lowercase();

        if location.contains("jaffna") {
            // The Jaffna peninsula grows its own salt- and drought-hardy
            // local strain; it belongs at the top of the list there.
            push_unique(&mut advice.primary_varieties, "Jaffna Local");
            return;
        }

        const HILL_COUNTRY: &[&str] = &["kandy", "nuwara eliya", "badulla", "matale"];
        if HILL_COUNTRY.iter().any(|d| location.contains(d)) {
            push_unique(&mut advice.secondary_varieties, "LD 365");
            push_unique(&mut advice.secondary_varieties, "BW 272-6B");
            return;
        }

        const WET_ZONE: &[&str] = &["galle", "matara", "kalutara", "ratnapura", "gampaha"];
        if WET_ZONE.iter().any(|d| location.contains(d)) {
            push_unique(&mut advice.secondary_varieties, "BW 272-6B");
            push_unique(&mut advice.secondary_varieties, "BW 367");
            return;
        }

        const DRY_ZONE: &[&str] = &[
            "anuradhapura",
            "polonnaruwa",
            "kurunegala",
            "hambantota",
            "ampara",
            "trincomalee",
            "batticaloa",
            "vavuniya",
            "mannar",
        ];
        if DRY_ZONE.iter().any(|d| location.contains(d)) {
            push_unique(&mut advice.secondary_varieties, "AT 307");
            push_unique(&mut advice.secondary_varieties, "BG 358");
            return;
        }

        if location.contains("sri lanka") {
            push_unique(&mut advice.secondary_varieties, "Keeri Samba");
        }
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|v| v == name) {
        list.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_unique_skips_duplicates() {
        let mut list = vec!["BG 300".to_string()];
        push_unique(&mut list, "BG 300");
        assert_eq!(list.len(), 1);
        push_unique(&mut list, "AT 303");
        assert_eq!(list.len(), 2);
    }
}
