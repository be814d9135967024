//! AQI classification buckets
//!
//! Maps a predicted AQI value onto one of six categories. Ranges are
//! half-open with lower bounds at 50, 100, 200, 300 and 400:
//!
//! | Range            | Category            |
//! |------------------|---------------------|
//! | `x < 50`         | Good                |
//! | `50 <= x < 100`  | Satisfactory        |
//! | `100 <= x < 200` | Moderately Polluted |
//! | `200 <= x < 300` | Poor                |
//! | `300 <= x < 400` | Very Poor           |
//! | `x >= 400`       | Severe              |
//!
//! NaN is not ordered against any bound and lands in Severe.

use serde::Serialize;

/// AQI health category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Satisfactory,
    ModeratelyPolluted,
    Poor,
    VeryPoor,
    Severe,
}

impl AqiCategory {
    /// Bucket a predicted AQI value. Total over all `f64`.
    pub fn classify(value: f64) -> Self {
        if value < 50.0 {
            AqiCategory::Good
        } else if (50.0..100.0).contains(&value) {
            AqiCategory::Satisfactory
        } else if (100.0..200.0).contains(&value) {
            AqiCategory::ModeratelyPolluted
        } else if (200.0..300.0).contains(&value) {
            AqiCategory::Poor
        } else if (300.0..400.0).contains(&value) {
            AqiCategory::VeryPoor
        } else {
            AqiCategory::Severe
        }
    }

    /// Short category name
    pub fn name(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::ModeratelyPolluted => "Moderately Polluted",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
        }
    }

    /// Headline shown on the result page
    pub fn label(self) -> String {
        format!("Air Quality Index is {}", self.name())
    }

    /// Health guidance shown under the headline
    pub fn description(self) -> &'static str {
        match self {
            AqiCategory::Good => {
                "The Air Quality Index is excellent. It poses little or no risk to human health."
            }
            AqiCategory::Satisfactory => {
                "The Air Quality Index is satisfactory, but there may be a risk for sensitive individuals."
            }
            AqiCategory::ModeratelyPolluted => "Moderate health risk for sensitive individuals.",
            AqiCategory::Poor => "Health warnings of emergency conditions.",
            AqiCategory::VeryPoor => {
                "Health alert: everyone may experience more serious health effects."
            }
            AqiCategory::Severe => {
                "Health warnings of emergency conditions. The entire population is more likely to be affected."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_values() {
        assert_eq!(AqiCategory::classify(-10.0), AqiCategory::Good);
        assert_eq!(AqiCategory::classify(49.9), AqiCategory::Good);
        assert_eq!(AqiCategory::classify(75.0), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::classify(150.0), AqiCategory::ModeratelyPolluted);
        assert_eq!(AqiCategory::classify(250.0), AqiCategory::Poor);
        assert_eq!(AqiCategory::classify(350.0), AqiCategory::VeryPoor);
        assert_eq!(AqiCategory::classify(450.0), AqiCategory::Severe);
    }

    /// Lower bounds are inclusive. The legacy chain (`51 <= x < 100`,
    /// `101 <= x < 200`, ...) sent 50, 100.5, 200.5 etc. to Severe; these
    /// assertions pin the contiguous convention instead.
    #[test]
    fn test_boundaries_are_lower_inclusive() {
        assert_eq!(AqiCategory::classify(50.0), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::classify(50.5), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::classify(99.999), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::classify(100.0), AqiCategory::ModeratelyPolluted);
        assert_eq!(AqiCategory::classify(100.5), AqiCategory::ModeratelyPolluted);
        assert_eq!(AqiCategory::classify(200.0), AqiCategory::Poor);
        assert_eq!(AqiCategory::classify(200.5), AqiCategory::Poor);
        assert_eq!(AqiCategory::classify(300.0), AqiCategory::VeryPoor);
        assert_eq!(AqiCategory::classify(400.0), AqiCategory::Severe);
    }

    #[test]
    fn test_total_over_special_values() {
        assert_eq!(AqiCategory::classify(f64::NEG_INFINITY), AqiCategory::Good);
        assert_eq!(AqiCategory::classify(f64::INFINITY), AqiCategory::Severe);
        assert_eq!(AqiCategory::classify(f64::NAN), AqiCategory::Severe);
    }

    #[test]
    fn test_partition_is_monotonic() {
        // Walk the real line in small steps; categories never go backwards.
        let order = [
            AqiCategory::Good,
            AqiCategory::Satisfactory,
            AqiCategory::ModeratelyPolluted,
            AqiCategory::Poor,
            AqiCategory::VeryPoor,
            AqiCategory::Severe,
        ];
        let rank = |c: AqiCategory| order.iter().position(|o| *o == c).unwrap();

        let mut last = 0;
        let mut seen = std::collections::HashSet::new();
        for step in -100..5000 {
            let category = AqiCategory::classify(step as f64 * 0.1);
            assert!(rank(category) >= last);
            last = rank(category);
            seen.insert(rank(category));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_labels_and_descriptions() {
        assert_eq!(AqiCategory::Good.label(), "Air Quality Index is Good");
        assert_eq!(
            AqiCategory::ModeratelyPolluted.label(),
            "Air Quality Index is Moderately Polluted"
        );
        assert!(AqiCategory::Severe.description().contains("entire population"));
    }
}
