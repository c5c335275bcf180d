//! Risk classification
//!
//! Thresholds are lower-bound inclusive and checked in descending order;
//! anything below the last threshold is high risk. Out-of-range input is
//! classified by the same comparisons rather than rejected.

use crate::RiskLevel;

/// Minimum score for each tier, highest threshold first
pub const RISK_THRESHOLDS: [(i32, RiskLevel); 2] = [(70, RiskLevel::Low), (40, RiskLevel::Medium)];

/// Tier for scores below every threshold
pub const FLOOR_RISK: RiskLevel = RiskLevel::High;

/// Classify a score into a risk tier
pub fn classify(score: i32) -> RiskLevel {
    RISK_THRESHOLDS
        .iter()
        .find(|(minimum, _)| score >= *minimum)
        .map(|(_, level)| *level)
        .unwrap_or(FLOOR_RISK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(39), RiskLevel::High);
        assert_eq!(classify(40), RiskLevel::Medium);
        assert_eq!(classify(69), RiskLevel::Medium);
        assert_eq!(classify(70), RiskLevel::Low);
        assert_eq!(classify(0), RiskLevel::High);
        assert_eq!(classify(100), RiskLevel::Low);
    }

    #[test]
    fn test_out_of_range_scores() {
        assert_eq!(classify(-5), RiskLevel::High);
        assert_eq!(classify(i32::MIN), RiskLevel::High);
        assert_eq!(classify(150), RiskLevel::Low);
        assert_eq!(classify(i32::MAX), RiskLevel::Low);
    }

    #[test]
    fn test_thresholds_descending() {
        assert!(RISK_THRESHOLDS.windows(2).all(|w| w[0].0 > w[1].0));
    }

    #[test]
    fn test_monotonic_over_domain() {
        for score in -10..110 {
            assert!(classify(score) >= classify(score + 1), "score {score}");
        }
    }
}
