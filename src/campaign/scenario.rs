//! Scenario parameters and campaign construction
//!
//! Parameters are loaded from TOML (every field optional) or built in code.
//! Validation runs in full before any state is created, so a bad scenario
//! never yields a half-built campaign.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::campaign::enemy_ai::{EnemyAiState, Personality};
use crate::campaign::environment::{Environment, Terrain, TimeOfDay, Weather};
use crate::campaign::recruitment::RecruitDistribution;
use crate::campaign::roster::{Capabilities, Roster, UnitKind, UnitProfile, UnitType};
use crate::campaign::state::{CampaignState, Resources};
use crate::core::config::CampaignConfig;
use crate::core::error::{CampaignError, Result};
use crate::core::types::UnitInterval;

/// Default player army, in `UnitKind::ALL` order
pub const DEFAULT_PLAYER_UNITS: [i64; UnitKind::COUNT] = [3000, 1500, 500, 300, 100, 200, 100];
/// Default enemy army, in `UnitKind::ALL` order
pub const DEFAULT_ENEMY_UNITS: [i64; UnitKind::COUNT] = [2800, 1400, 450, 320, 90, 180, 90];

/// Enemy intelligence units are slightly less capable than ours
const ENEMY_SPY_RATING: u8 = 8;

/// One side's starting army
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceSpec {
    /// Starting count per unit kind; kinds left out start at zero
    pub units: BTreeMap<UnitKind, i64>,
    /// Stat overrides; kinds left out use reference stats
    pub profiles: BTreeMap<UnitKind, UnitProfile>,
}

impl ForceSpec {
    pub fn from_counts(counts: [i64; UnitKind::COUNT]) -> Self {
        Self {
            units: UnitKind::ALL
                .iter()
                .map(|kind| (*kind, counts[kind.index()]))
                .collect(),
            profiles: BTreeMap::new(),
        }
    }

    fn validate(&self, side: &str) -> Result<()> {
        for (kind, count) in &self.units {
            if *count < 0 {
                return Err(CampaignError::invalid(format!(
                    "{} {} count is negative ({})",
                    side,
                    kind.log_name(),
                    count
                )));
            }
            if *count > i64::from(u32::MAX) {
                return Err(CampaignError::invalid(format!(
                    "{} {} count is too large ({})",
                    side,
                    kind.log_name(),
                    count
                )));
            }
        }
        for (kind, profile) in &self.profiles {
            if !profile.is_valid() {
                return Err(CampaignError::invalid(format!(
                    "{} {} has negative or non-finite stats",
                    side,
                    kind.log_name()
                )));
            }
        }
        Ok(())
    }

    /// Build the roster; call only after `validate`
    fn build(&self, default_profile: impl Fn(UnitKind) -> UnitProfile) -> Roster {
        let mut roster = Roster::new();
        for kind in UnitKind::ALL {
            let count = self.units.get(&kind).copied().unwrap_or(0).max(0) as u32;
            let profile = self
                .profiles
                .get(&kind)
                .copied()
                .unwrap_or_else(|| default_profile(kind));
            roster.insert(UnitType::new(kind, count, profile));
        }
        roster
    }
}

impl Default for ForceSpec {
    fn default() -> Self {
        Self::from_counts(DEFAULT_PLAYER_UNITS)
    }
}

/// Starting treasury; signed so that bad input can be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSpec {
    pub gold: i64,
    pub recruit_points: i64,
    pub fortification: i64,
}

impl Default for ResourceSpec {
    fn default() -> Self {
        Self {
            gold: 2000,
            recruit_points: 300,
            fortification: 0,
        }
    }
}

/// Everything needed to start a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParams {
    pub player: ForceSpec,
    pub enemy: ForceSpec,
    pub leadership_quality: f32,
    pub resources: ResourceSpec,
    pub morale: f32,
    pub enemy_morale: f32,
    /// Random if unset
    pub terrain: Option<Terrain>,
    pub weather: Option<Weather>,
    pub time_of_day: Option<TimeOfDay>,
    pub personality: Option<Personality>,
    /// Seed for the campaign runner; random if unset
    pub seed: Option<u64>,
    pub turn_budget: i64,
    /// Slash-separated percentages, e.g. `"40/20/10/10/10/5/5"`
    pub recruit_distribution: Option<String>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            player: ForceSpec::from_counts(DEFAULT_PLAYER_UNITS),
            enemy: ForceSpec::from_counts(DEFAULT_ENEMY_UNITS),
            leadership_quality: 0.85,
            resources: ResourceSpec::default(),
            morale: 0.7,
            enemy_morale: 0.6,
            terrain: None,
            weather: None,
            time_of_day: None,
            personality: None,
            seed: None,
            turn_budget: 10,
            recruit_distribution: None,
        }
    }
}

impl ScenarioParams {
    /// Parse scenario parameters from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| CampaignError::invalid(format!("failed to parse scenario TOML: {}", e)))
    }

    /// Load scenario parameters from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check every parameter and resolve the recruitment distribution
    pub fn validate(&self) -> Result<RecruitDistribution> {
        if self.turn_budget <= 0 {
            return Err(CampaignError::invalid(format!(
                "turn budget must be positive, got {}",
                self.turn_budget
            )));
        }
        if self.turn_budget > i64::from(u32::MAX) {
            return Err(CampaignError::invalid("turn budget is too large"));
        }

        self.player.validate("player")?;
        self.enemy.validate("enemy")?;

        for (name, value) in [
            ("leadership quality", self.leadership_quality),
            ("morale", self.morale),
            ("enemy morale", self.enemy_morale),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CampaignError::invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let resources = self.resources;
        for (name, value) in [
            ("gold", resources.gold),
            ("recruit points", resources.recruit_points),
            ("fortification", resources.fortification),
        ] {
            if !(0..=i64::from(u32::MAX)).contains(&value) {
                return Err(CampaignError::invalid(format!(
                    "{} must be a non-negative amount, got {}",
                    name, value
                )));
            }
        }

        match &self.recruit_distribution {
            Some(dist) => RecruitDistribution::parse(dist),
            None => Ok(RecruitDistribution::default()),
        }
    }
}

/// Build a fresh campaign state from validated parameters
pub fn new_campaign(params: &ScenarioParams, rng: &mut impl Rng) -> Result<CampaignState> {
    new_campaign_with_config(params, &CampaignConfig::default(), rng)
}

/// `new_campaign` with explicit tuning constants
pub fn new_campaign_with_config(
    params: &ScenarioParams,
    config: &CampaignConfig,
    rng: &mut impl Rng,
) -> Result<CampaignState> {
    let recruit_distribution = params.validate()?;
    config.validate().map_err(CampaignError::Config)?;

    let player = params.player.build(|kind| kind.default_profile());
    let enemy = params.enemy.build(|kind| {
        let profile = kind.default_profile();
        match profile.capabilities.espionage {
            Some(_) => UnitProfile {
                capabilities: Capabilities {
                    espionage: Some(ENEMY_SPY_RATING),
                    ..profile.capabilities
                },
                ..profile
            },
            None => profile,
        }
    });

    let random_env = Environment::random(rng);
    let environment = Environment::new(
        params.terrain.unwrap_or(random_env.terrain),
        params.weather.unwrap_or(random_env.weather),
        params.time_of_day.unwrap_or(random_env.time_of_day),
    );
    let personality = params
        .personality
        .unwrap_or_else(|| Personality::random(rng));

    let state = CampaignState {
        player,
        enemy,
        morale: UnitInterval::new(params.morale),
        enemy_morale: UnitInterval::new(params.enemy_morale),
        fatigue: UnitInterval::ZERO,
        supply: UnitInterval::ONE,
        resources: Resources {
            gold: params.resources.gold as u32,
            recruit_points: params.resources.recruit_points as u32,
            fortification: params.resources.fortification as u32,
        },
        environment,
        leadership_quality: UnitInterval::new(params.leadership_quality),
        spy_effectiveness: UnitInterval::ZERO,
        enemy_ai: EnemyAiState::new(personality, config),
        recruit_distribution,
        turn: 0,
        turn_budget: params.turn_budget as u32,
    };

    tracing::info!(
        "New campaign: {} vs {} troops on {} terrain, enemy is {}, {} turns",
        state.player_total(),
        state.enemy_total(),
        state.environment.terrain.name(),
        personality.name(),
        state.turn_budget
    );

    Ok(state)
}
