//! Risk model: RPN computation and risk classification.
//!
//! The Risk Priority Number is the product of the three FMEA ratings
//! (severity, occurrence, detection), each rated 1-10 by the analyst.
//! Both functions are pure and total; range enforcement on the ratings
//! happens at the API boundary, not here.

use serde::{Deserialize, Serialize};

/// Risk tier derived from the RPN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(format!("unknown risk level: {}", s)),
        }
    }
}

/// Compute the Risk Priority Number from the three ratings.
pub fn compute_rpn(severity: i32, occurrence: i32, detection: i32) -> i32 {
    severity * occurrence * detection
}

/// Classify an RPN into a risk tier.
///
/// Thresholds: `rpn > 100` is high, `50 < rpn <= 100` is medium,
/// everything else is low. An RPN of exactly 100 is medium, an RPN of
/// exactly 50 is low.
pub fn classify_risk(rpn: i32) -> RiskLevel {
    if rpn > 100 {
        RiskLevel::High
    } else if rpn > 50 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpn_is_the_product_over_the_whole_rating_domain() {
        for s in 1..=10 {
            for o in 1..=10 {
                for d in 1..=10 {
                    assert_eq!(compute_rpn(s, o, d), s * o * d);
                }
            }
        }
    }

    #[test]
    fn classification_boundaries_are_exact() {
        assert_eq!(classify_risk(50), RiskLevel::Low);
        assert_eq!(classify_risk(51), RiskLevel::Medium);
        assert_eq!(classify_risk(100), RiskLevel::Medium);
        assert_eq!(classify_risk(101), RiskLevel::High);
    }

    #[test]
    fn classification_extremes() {
        assert_eq!(classify_risk(1), RiskLevel::Low);
        assert_eq!(classify_risk(1000), RiskLevel::High);
    }

    #[test]
    fn rating_scenarios() {
        // severity=8, occurrence=3, detection=2
        let rpn = compute_rpn(8, 3, 2);
        assert_eq!(rpn, 48);
        assert_eq!(classify_risk(rpn), RiskLevel::Low);

        // severity=10, occurrence=2, detection=3
        let rpn = compute_rpn(10, 2, 3);
        assert_eq!(rpn, 60);
        assert_eq!(classify_risk(rpn), RiskLevel::Medium);

        // severity=7, occurrence=4, detection=4
        let rpn = compute_rpn(7, 4, 4);
        assert_eq!(rpn, 112);
        assert_eq!(classify_risk(rpn), RiskLevel::High);
    }

    #[test]
    fn risk_level_round_trips_through_strings() {
        assert_eq!("low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert_eq!("medium".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert_eq!("High".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("critical".parse::<RiskLevel>().is_err());

        assert_eq!(RiskLevel::Medium.to_string(), "medium");
    }
}
