//! Morale model
//!
//! Morale is recomputed from scratch every turn from a fixed base, so small
//! per-turn effects cannot drift it over a long campaign.

use crate::campaign::environment::Weather;
use crate::campaign::state::CampaignState;
use crate::core::config::CampaignConfig;
use crate::core::types::UnitInterval;

/// Inputs to the morale formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoraleFactors {
    pub base_morale: f32,
    pub fatigue: UnitInterval,
    pub supply: UnitInterval,
    pub leadership_quality: UnitInterval,
    pub spy_effectiveness: UnitInterval,
    pub weather: Weather,
}

impl MoraleFactors {
    pub fn from_state(state: &CampaignState, config: &CampaignConfig) -> Self {
        Self {
            base_morale: config.base_morale,
            fatigue: state.fatigue,
            supply: state.supply,
            leadership_quality: state.leadership_quality,
            spy_effectiveness: state.spy_effectiveness,
            weather: state.environment.weather,
        }
    }
}

/// `base − fatigue·0.5 + (supply−0.5)·0.4 + leadership + spies + weather`,
/// clamped to [0, 1]
pub fn calculate_morale(factors: &MoraleFactors) -> UnitInterval {
    let leadership_bonus = (factors.leadership_quality.get() - 0.5) * 0.3;
    let spy_bonus = (factors.spy_effectiveness.get() - 0.5) * 0.2;
    let weather_penalty = factors.weather.morale_penalty();

    UnitInterval::new(
        factors.base_morale - factors.fatigue.get() * 0.5
            + (factors.supply.get() - 0.5) * 0.4
            + leadership_bonus
            + spy_bonus
            + weather_penalty,
    )
}
