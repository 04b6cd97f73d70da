//! Campaign configuration with documented constants
//!
//! All magic numbers of the turn pipeline are collected here with
//! explanations of their purpose and how they interact with each other.

/// Longest outcome window the enemy AI may keep
pub const MAX_AI_MEMORY_LEN: usize = 1024;

/// Tuning constants for every sub-model of the turn pipeline
///
/// These values reproduce the reference campaign. Changing them affects
/// pacing: most of them are per-turn rates applied once per turn.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignConfig {
    // === ENEMY AI ===
    /// Number of battle outcomes the enemy remembers (K)
    ///
    /// Personality is only re-evaluated once the window is full.
    pub ai_memory_len: usize,

    /// Win rate above which the enemy turns aggressive
    pub aggressive_win_rate: f32,

    /// Win rate below which the enemy turns defensive
    pub defensive_win_rate: f32,

    /// Independent chance of a feint regardless of personality
    pub feint_chance: f32,

    // === ENVIRONMENT ===
    /// Weather is re-rolled on every turn divisible by this
    pub weather_period: u32,

    /// Day/night flips on every turn divisible by this
    pub day_night_period: u32,

    /// Chance per turn that the terrain changes
    pub terrain_change_chance: f32,

    /// Fatigue added for fighting through the night
    pub night_fatigue: f32,

    /// Player artillery lost to rain each rainy turn
    pub rain_player_artillery_loss: u32,
    /// Player aircraft lost to rain each rainy turn
    pub rain_player_aircraft_loss: u32,
    /// Enemy artillery lost to rain each rainy turn
    pub rain_enemy_artillery_loss: u32,
    /// Enemy aircraft lost to rain each rainy turn
    pub rain_enemy_aircraft_loss: u32,

    // === ESPIONAGE ===
    /// Base chance that the enemy disrupts our supply lines
    pub disruption_base_chance: f32,

    /// Enemy spy count that adds +1.0 to the disruption chance
    ///
    /// At 2000, the default 90 enemy spies add 0.045.
    pub disruption_spy_norm: f32,

    /// Disruption only bites when our supply is below this
    pub disruption_supply_threshold: f32,

    /// Fatigue penalty range for a disrupted supply line
    pub disruption_fatigue_min: f32,
    pub disruption_fatigue_max: f32,

    /// Sabotage chance per `spy_operation_norm` spies
    pub sabotage_chance_per_norm: f32,

    /// Misinformation chance per `spy_operation_norm` spies
    pub misinformation_chance_per_norm: f32,

    /// Spy count used to scale operation chances
    pub spy_operation_norm: f32,

    /// Supply spent running a sabotage mission
    pub sabotage_supply_cost_min: f32,
    pub sabotage_supply_cost_max: f32,

    /// Enemy morale lost to a successful sabotage
    pub sabotage_morale_hit: f32,

    /// Enemy morale lost to successful misinformation
    pub misinformation_morale_hit: f32,

    /// Spy count at which spy effectiveness saturates at 1.0
    pub spy_effectiveness_norm: f32,

    // === RESOURCES ===
    /// Fraction of recruit points converted into recruits each turn
    pub recruit_rate: f32,

    /// Gold per recruited unit
    pub unit_gold_cost: u32,

    /// Gold spent each turn to keep fortifications manned
    pub fortification_upkeep: u32,

    /// Fatigue removed (or added, on failure) by fortification upkeep
    pub fortification_fatigue: f32,

    /// Recruit points never drop below this after a battle
    pub min_recruit_points: u32,

    /// Fatigue above which unrest drains gold
    pub unrest_fatigue_threshold: f32,

    /// Gold lost to unrest
    pub unrest_gold_cost: u32,

    // === MORALE ===
    /// Morale before fatigue, supply, leadership, spies and weather
    pub base_morale: f32,

    // === BATTLE ===
    /// Power multiplier for air-superiority units
    pub air_superiority_bonus: f32,

    /// Fraction of power lost by terrain-bound units on rough terrain
    pub terrain_penalty: f32,

    /// Enemy power multiplier when it avoids confrontation
    pub avoid_multiplier: f32,

    /// Player power multiplier when the enemy feints
    pub feint_multiplier: f32,

    /// Loser's losses as a fraction of the power difference
    pub loser_loss_rate: f32,

    /// Winner's losses as a fraction of the weaker power
    pub winner_loss_rate: f32,

    /// Base fatigue gained from fighting each turn
    pub battle_fatigue: f32,

    /// Player losses that add +1.0 fatigue
    pub fatigue_loss_norm: f32,

    /// Supply consumed by fighting each turn (before fatigue)
    pub battle_supply_cost: f32,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            ai_memory_len: 5,
            aggressive_win_rate: 0.7,
            defensive_win_rate: 0.3,
            feint_chance: 0.1,

            weather_period: 3,
            day_night_period: 2,
            terrain_change_chance: 0.1,
            night_fatigue: 0.05,
            rain_player_artillery_loss: 20,
            rain_player_aircraft_loss: 30,
            rain_enemy_artillery_loss: 15,
            rain_enemy_aircraft_loss: 25,

            disruption_base_chance: 0.1,
            disruption_spy_norm: 2000.0,
            disruption_supply_threshold: 0.6,
            disruption_fatigue_min: 0.1,
            disruption_fatigue_max: 0.2,
            sabotage_chance_per_norm: 0.2,
            misinformation_chance_per_norm: 0.25,
            spy_operation_norm: 100.0,
            sabotage_supply_cost_min: 0.05,
            sabotage_supply_cost_max: 0.15,
            sabotage_morale_hit: 0.05,
            misinformation_morale_hit: 0.07,
            spy_effectiveness_norm: 150.0,

            recruit_rate: 0.1,
            unit_gold_cost: 5,
            fortification_upkeep: 50,
            fortification_fatigue: 0.05,
            min_recruit_points: 50,
            unrest_fatigue_threshold: 0.8,
            unrest_gold_cost: 100,

            base_morale: 0.7,

            air_superiority_bonus: 1.2,
            terrain_penalty: 0.3,
            avoid_multiplier: 0.8,
            feint_multiplier: 0.9,
            loser_loss_rate: 0.1,
            winner_loss_rate: 0.05,
            battle_fatigue: 0.05,
            fatigue_loss_norm: 30000.0,
            battle_supply_cost: 0.1,
        }
    }
}

impl CampaignConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.ai_memory_len == 0 || self.ai_memory_len > MAX_AI_MEMORY_LEN {
            return Err(format!(
                "ai_memory_len must be between 1 and {}",
                MAX_AI_MEMORY_LEN
            ));
        }

        if self.weather_period == 0 || self.day_night_period == 0 {
            return Err("environment periods must be positive".into());
        }

        if self.defensive_win_rate >= self.aggressive_win_rate {
            return Err(format!(
                "defensive_win_rate ({}) should be < aggressive_win_rate ({})",
                self.defensive_win_rate, self.aggressive_win_rate
            ));
        }

        if self.disruption_fatigue_min > self.disruption_fatigue_max
            || self.sabotage_supply_cost_min > self.sabotage_supply_cost_max
        {
            return Err("random ranges must have min <= max".into());
        }

        if self.disruption_spy_norm <= 0.0
            || self.spy_operation_norm <= 0.0
            || self.spy_effectiveness_norm <= 0.0
            || self.fatigue_loss_norm <= 0.0
        {
            return Err("normalisation constants must be positive".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<CampaignConfig> = OnceLock::new();

/// Get the global campaign config (initializes with defaults if not set)
pub fn config() -> &'static CampaignConfig {
    CONFIG.get_or_init(CampaignConfig::default)
}

/// Set the global campaign config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: CampaignConfig) -> Result<(), CampaignConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CampaignConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_win_rates() {
        let config = CampaignConfig {
            aggressive_win_rate: 0.2,
            ..CampaignConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_memory() {
        let config = CampaignConfig {
            ai_memory_len: 0,
            ..CampaignConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CampaignConfig {
            ai_memory_len: MAX_AI_MEMORY_LEN + 1,
            ..CampaignConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
