//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// A value clamped to the closed interval [0, 1].
///
/// Used for morale, fatigue, supply, leadership, spy effectiveness and
/// probabilities. Every constructor and mutator clamps, so an out-of-range
/// value can never be observed. NaN collapses to 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct UnitInterval(f32);

impl UnitInterval {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn set(&mut self, value: f32) {
        *self = Self::new(value);
    }

    /// Saturating add; negative deltas subtract.
    pub fn add(&mut self, delta: f32) {
        *self = Self::new(self.0 + delta);
    }

    pub fn sub(&mut self, delta: f32) {
        self.add(-delta);
    }

    /// Ratio `numerator / denominator`, 0 when the denominator is 0.
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator <= 0.0 {
            return Self::ZERO;
        }
        Self::new((numerator / denominator) as f32)
    }
}

impl From<f32> for UnitInterval {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<UnitInterval> for f32 {
    fn from(value: UnitInterval) -> Self {
        value.0
    }
}

/// How a campaign ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Enemy force total reached zero
    Victory,
    /// Player force total reached zero
    Defeat,
    /// Turn budget consumed with both sides still standing
    Exhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_clamps() {
        assert_eq!(UnitInterval::new(1.7).get(), 1.0);
        assert_eq!(UnitInterval::new(-0.2).get(), 0.0);
        assert_eq!(UnitInterval::new(f32::NAN).get(), 0.0);
        assert_eq!(UnitInterval::new(0.25).get(), 0.25);
    }

    #[test]
    fn test_unit_interval_add_saturates() {
        let mut v = UnitInterval::new(0.9);
        v.add(0.5);
        assert_eq!(v, UnitInterval::ONE);

        v.sub(3.0);
        assert_eq!(v, UnitInterval::ZERO);
    }

    #[test]
    fn test_unit_interval_ratio() {
        assert_eq!(UnitInterval::ratio(50.0, 150.0).get(), (50.0f64 / 150.0) as f32);
        assert_eq!(UnitInterval::ratio(300.0, 150.0), UnitInterval::ONE);
        assert_eq!(UnitInterval::ratio(10.0, 0.0), UnitInterval::ZERO);
    }

    #[test]
    fn test_unit_interval_deserialize_reclamps() {
        let v: UnitInterval = serde_json::from_str("1.5").unwrap();
        assert_eq!(v, UnitInterval::ONE);
        assert_eq!(serde_json::to_string(&UnitInterval::new(0.5)).unwrap(), "0.5");
    }
}
