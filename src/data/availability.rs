use crate::data::persistence::Persistable;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Availability classification of a calendar day.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Available,
    Limited,
    Unavailable,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Available => "available",
            Tier::Limited => "limited",
            Tier::Unavailable => "unavailable",
        }
    }
}

/// Anything that can classify a day-of-month. The controller is generic over
/// this so the static model can be swapped for a real data source.
pub trait Availability {
    fn classify(&self, day: u32) -> Tier;
}

impl<F> Availability for F
where
    F: Fn(u32) -> Tier,
{
    fn classify(&self, day: u32) -> Tier {
        self(day)
    }
}

/// Day-of-month keyed tiers. The same mapping applies to every month.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AvailabilityModel {
    #[serde(default)]
    pub available: BTreeSet<u32>,
    #[serde(default)]
    pub limited: BTreeSet<u32>,
    #[serde(default)]
    pub unavailable: BTreeSet<u32>,
}

impl Default for AvailabilityModel {
    fn default() -> Self {
        AvailabilityModel {
            available: [5, 6, 7, 12, 13, 14, 19, 20, 21, 26, 27, 28].into(),
            limited: [8, 15, 22, 29].into(),
            unavailable: [1, 2, 3, 4, 9, 10, 11, 16, 17, 18, 23, 24, 25, 30, 31].into(),
        }
    }
}

impl Persistable for AvailabilityModel {
    fn filename() -> &'static str {
        "availability.yaml"
    }
}

impl Availability for AvailabilityModel {
    fn classify(&self, day: u32) -> Tier {
        if self.available.contains(&day) {
            Tier::Available
        } else if self.limited.contains(&day) {
            Tier::Limited
        } else {
            Tier::Unavailable
        }
    }
}

impl AvailabilityModel {
    /// Loads the model and logs any data problems. Problems are tolerated:
    /// out-of-range days never match and overlaps resolve by precedence.
    pub fn load_checked() -> Result<Self> {
        let model = Self::load()?;
        for issue in model.validate() {
            log::warn!("availability.yaml: {issue}");
        }
        Ok(model)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let sets = [
            (Tier::Available, &self.available),
            (Tier::Limited, &self.limited),
            (Tier::Unavailable, &self.unavailable),
        ];
        for (tier, set) in sets {
            for day in set.iter().filter(|d| !(1..=31).contains(*d)) {
                issues.push(format!("day {day} in '{}' is outside 1-31", tier.label()));
            }
        }
        for (i, (a_tier, a)) in sets.iter().enumerate() {
            for (b_tier, b) in &sets[i + 1..] {
                for day in a.intersection(b) {
                    issues.push(format!(
                        "day {day} is listed as both '{}' and '{}'",
                        a_tier.label(),
                        b_tier.label()
                    ));
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sample_days() {
        let m = AvailabilityModel::default();
        assert_eq!(m.classify(5), Tier::Available);
        assert_eq!(m.classify(12), Tier::Available);
        assert_eq!(m.classify(8), Tier::Limited);
        assert_eq!(m.classify(29), Tier::Limited);
        assert_eq!(m.classify(1), Tier::Unavailable);
        assert_eq!(m.classify(31), Tier::Unavailable);
    }

    #[test]
    fn test_classify_total_and_exclusive() {
        let m = AvailabilityModel::default();
        for day in 1..=31 {
            let tier = m.classify(day);
            assert_eq!(tier, m.classify(day), "classify must be deterministic");
            match tier {
                Tier::Available => assert!(!m.limited.contains(&day)),
                Tier::Limited => assert!(!m.available.contains(&day)),
                Tier::Unavailable => {
                    assert!(!m.available.contains(&day));
                    assert!(!m.limited.contains(&day));
                }
            }
        }
    }

    #[test]
    fn test_unlisted_day_is_unavailable() {
        let m = AvailabilityModel {
            available: [1].into(),
            limited: BTreeSet::new(),
            unavailable: BTreeSet::new(),
        };
        assert_eq!(m.classify(2), Tier::Unavailable);
    }

    #[test]
    fn test_overlap_prefers_available() {
        let m = AvailabilityModel {
            available: [3].into(),
            limited: [3].into(),
            unavailable: BTreeSet::new(),
        };
        assert_eq!(m.classify(3), Tier::Available);
    }

    #[test]
    fn test_default_sets_are_disjoint_and_in_range() {
        assert!(AvailabilityModel::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_out_of_range_and_overlap() {
        let m = AvailabilityModel {
            available: [0, 4].into(),
            limited: [4, 40].into(),
            unavailable: BTreeSet::new(),
        };
        let issues = m.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| i.contains("day 0")));
        assert!(issues.iter().any(|i| i.contains("day 40")));
        assert!(issues.iter().any(|i| i.contains("both 'available' and 'limited'")));
    }

    #[test]
    fn test_out_of_range_day_never_matches() {
        let m = AvailabilityModel {
            available: [42].into(),
            limited: BTreeSet::new(),
            unavailable: BTreeSet::new(),
        };
        for day in 1..=31 {
            assert_eq!(m.classify(day), Tier::Unavailable);
        }
    }

    #[test]
    fn test_closure_is_an_availability_source() {
        let even_only = |day: u32| {
            if day % 2 == 0 {
                Tier::Available
            } else {
                Tier::Unavailable
            }
        };
        assert_eq!(even_only.classify(4), Tier::Available);
        assert_eq!(even_only.classify(5), Tier::Unavailable);
    }

    #[test]
    fn test_yaml_missing_sets_default_to_empty() {
        let m: AvailabilityModel = serde_norway::from_str("available: [1, 2]").unwrap();
        assert_eq!(m.available.len(), 2);
        assert!(m.limited.is_empty());
        assert!(m.unavailable.is_empty());
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Limited).unwrap(), "\"limited\"");
    }
}
