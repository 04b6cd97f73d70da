//! Recruitment distribution policy
//!
//! The caller supplies seven percentages (infantry, mechanized infantry,
//! tank, artillery, missiles, aircraft, spies). Distributions that do not sum
//! to 100 are scaled proportionally and short ones are zero-padded; only
//! unparseable, negative, oversized or over-long input is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::campaign::roster::UnitKind;
use crate::core::error::{CampaignError, Result};

/// Reference mix used when none is given or all weights are zero
pub const DEFAULT_DISTRIBUTION: [u32; UnitKind::COUNT] = [40, 20, 10, 10, 10, 5, 5];

/// Largest single weight accepted before normalizing
pub const MAX_WEIGHT: i64 = 1_000_000;

/// Integer percentages per unit kind, in `UnitKind::ALL` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitDistribution([u32; UnitKind::COUNT]);

impl RecruitDistribution {
    /// Parse a slash-separated list such as `"40/20/10/10/10/5/5"`
    pub fn parse(input: &str) -> Result<Self> {
        let values = input
            .trim()
            .split('/')
            .map(|token| {
                token.trim().parse::<i64>().map_err(|_| {
                    CampaignError::invalid(format!(
                        "malformed recruitment distribution {:?}: {:?} is not an integer",
                        input, token
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_percentages(&values)
    }

    /// Build from raw percentages, normalizing when they do not sum to 100
    pub fn from_percentages(values: &[i64]) -> Result<Self> {
        if values.is_empty() || values.len() > UnitKind::COUNT {
            return Err(CampaignError::invalid(format!(
                "malformed recruitment distribution: expected 1 to {} values, got {}",
                UnitKind::COUNT,
                values.len()
            )));
        }
        if let Some(v) = values.iter().find(|v| **v < 0) {
            return Err(CampaignError::invalid(format!(
                "malformed recruitment distribution: negative percentage {}",
                v
            )));
        }
        if let Some(v) = values.iter().find(|v| **v > MAX_WEIGHT) {
            return Err(CampaignError::invalid(format!(
                "malformed recruitment distribution: weight {} exceeds {}",
                v, MAX_WEIGHT
            )));
        }

        let total: i64 = values.iter().sum();
        if total == 0 {
            tracing::warn!("Recruitment distribution is all zeros, using default mix");
            return Ok(Self::default());
        }

        let mut percentages = [0u32; UnitKind::COUNT];
        if total == 100 {
            for (slot, v) in percentages.iter_mut().zip(values) {
                *slot = *v as u32;
            }
        } else {
            tracing::warn!(total, "Recruitment distribution does not sum to 100, normalizing");
            for (slot, v) in percentages.iter_mut().zip(values) {
                *slot = (*v * 100 / total) as u32;
            }
        }

        Ok(Self(percentages))
    }

    pub fn percentages(&self) -> [u32; UnitKind::COUNT] {
        self.0
    }

    pub fn share(&self, kind: UnitKind) -> u32 {
        self.0[kind.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Structural check used before a turn mutates anything
    pub fn is_valid(&self) -> bool {
        let total = self.total();
        total > 0 && total <= 100
    }
}

impl Default for RecruitDistribution {
    fn default() -> Self {
        Self(DEFAULT_DISTRIBUTION)
    }
}

impl FromStr for RecruitDistribution {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RecruitDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_distribution_is_kept() {
        let dist = RecruitDistribution::parse("40/20/10/10/10/5/5").unwrap();
        assert_eq!(dist.percentages(), [40, 20, 10, 10, 10, 5, 5]);
        assert_eq!(dist.total(), 100);
    }

    #[test]
    fn test_short_distribution_is_normalized_and_padded() {
        let dist = RecruitDistribution::parse("10/10/10").unwrap();
        assert_eq!(dist.percentages(), [33, 33, 33, 0, 0, 0, 0]);
        assert!((98..=100).contains(&dist.total()));
    }

    #[test]
    fn test_short_exact_distribution_is_padded() {
        let dist = RecruitDistribution::parse("50/50").unwrap();
        assert_eq!(dist.percentages(), [50, 50, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_oversized_total_is_scaled_down() {
        let dist = RecruitDistribution::from_percentages(&[100, 100]).unwrap();
        assert_eq!(dist.percentages(), [50, 50, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_all_zero_falls_back_to_default() {
        let dist = RecruitDistribution::parse("0/0/0").unwrap();
        assert_eq!(dist, RecruitDistribution::default());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            RecruitDistribution::parse("40/abc/10"),
            Err(CampaignError::InvalidScenario(_))
        ));
        assert!(RecruitDistribution::parse("").is_err());
        assert!(RecruitDistribution::parse("10/-5/95").is_err());
        assert!(RecruitDistribution::parse("10/10/10/10/10/10/10/30").is_err());
        assert!(matches!(
            RecruitDistribution::parse("9223372036854775807/1"),
            Err(CampaignError::InvalidScenario(_))
        ));
        assert!(RecruitDistribution::from_percentages(&[i64::MAX; 7]).is_err());
    }

    #[test]
    fn test_largest_weights_still_normalize() {
        let dist = RecruitDistribution::from_percentages(&[MAX_WEIGHT; 7]).unwrap();
        assert_eq!(dist.percentages(), [14; 7]);
        assert!(dist.is_valid());
    }

    #[test]
    fn test_display_round_trips() {
        let dist = RecruitDistribution::default();
        assert_eq!(dist.to_string(), "40/20/10/10/10/5/5");
        assert_eq!(dist.to_string().parse::<RecruitDistribution>().unwrap(), dist);
    }
}
