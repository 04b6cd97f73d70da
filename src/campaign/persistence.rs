//! Save/load record for campaign state
//!
//! `SavedCampaign` is a flat, field-for-field image of `CampaignState`.
//! Reading and writing files is left to callers; this module only maps
//! between the state and the record and offers JSON helpers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::campaign::enemy_ai::{
    EnemyAiState, OutcomeRecord, Personality, DEFAULT_PLAYER_DISTRIBUTION,
};
use crate::campaign::environment::{Environment, Terrain, TimeOfDay, Weather};
use crate::campaign::recruitment::RecruitDistribution;
use crate::campaign::roster::{Roster, UnitKind, UnitProfile, UnitType};
use crate::campaign::state::{CampaignState, Resources};
use crate::core::config::{config, MAX_AI_MEMORY_LEN};
use crate::core::error::{CampaignError, Result};
use crate::core::types::UnitInterval;

/// Flat persisted form of a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCampaign {
    pub resources: Resources,
    pub units: BTreeMap<UnitKind, u32>,
    pub enemy_units: BTreeMap<UnitKind, u32>,
    pub morale: f32,
    pub enemy_morale: f32,
    pub fatigue: f32,
    pub supply: f32,
    pub leadership_quality: f32,
    pub spy_effectiveness: f32,
    pub enemy_ai: Personality,
    pub terrain: Terrain,
    pub weather: Weather,
    pub time: TimeOfDay,

    // Older records carry only the fields above; the rest default.
    #[serde(default)]
    pub unit_profiles: BTreeMap<UnitKind, UnitProfile>,
    #[serde(default)]
    pub enemy_unit_profiles: BTreeMap<UnitKind, UnitProfile>,
    #[serde(default = "default_memory_len")]
    pub ai_memory_len: usize,
    #[serde(default)]
    pub ai_memory: Vec<OutcomeRecord>,
    #[serde(default = "default_last_distribution")]
    pub ai_last_distribution: [f32; UnitKind::COUNT],
    #[serde(default)]
    pub recruit_distribution: RecruitDistribution,
    #[serde(default)]
    pub turn: u32,
    #[serde(default = "default_turn_budget")]
    pub turn_budget: u32,
}

fn default_memory_len() -> usize {
    config().ai_memory_len
}

fn default_last_distribution() -> [f32; UnitKind::COUNT] {
    DEFAULT_PLAYER_DISTRIBUTION
}

fn default_turn_budget() -> u32 {
    10
}

impl SavedCampaign {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Capture the state as a save record
pub fn save_state(state: &CampaignState) -> SavedCampaign {
    SavedCampaign {
        resources: state.resources,
        units: state.player.counts(),
        enemy_units: state.enemy.counts(),
        morale: state.morale.get(),
        enemy_morale: state.enemy_morale.get(),
        fatigue: state.fatigue.get(),
        supply: state.supply.get(),
        leadership_quality: state.leadership_quality.get(),
        spy_effectiveness: state.spy_effectiveness.get(),
        enemy_ai: state.enemy_ai.personality(),
        terrain: state.environment.terrain,
        weather: state.environment.weather,
        time: state.environment.time_of_day,
        unit_profiles: profiles(&state.player),
        enemy_unit_profiles: profiles(&state.enemy),
        ai_memory_len: state.enemy_ai.memory_len(),
        ai_memory: state.enemy_ai.memory().copied().collect(),
        ai_last_distribution: state.enemy_ai.last_distribution(),
        recruit_distribution: state.recruit_distribution,
        turn: state.turn,
        turn_budget: state.turn_budget,
    }
}

/// Rebuild a state from a save record
///
/// Scalars outside [0, 1], invalid stats or a broken recruitment
/// distribution reject the whole record.
pub fn load_state(record: SavedCampaign) -> Result<CampaignState> {
    for (name, value) in [
        ("morale", record.morale),
        ("enemy morale", record.enemy_morale),
        ("fatigue", record.fatigue),
        ("supply", record.supply),
        ("leadership quality", record.leadership_quality),
        ("spy effectiveness", record.spy_effectiveness),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(CampaignError::invalid(format!(
                "saved {} out of range: {}",
                name, value
            )));
        }
    }
    if !record.recruit_distribution.is_valid() {
        return Err(CampaignError::invalid(format!(
            "saved recruitment distribution {} is malformed",
            record.recruit_distribution
        )));
    }
    if record.turn_budget == 0 {
        return Err(CampaignError::invalid("saved turn budget is zero"));
    }
    if record.ai_memory_len == 0 || record.ai_memory_len > MAX_AI_MEMORY_LEN {
        return Err(CampaignError::invalid(format!(
            "saved enemy memory length {} outside 1..={}",
            record.ai_memory_len, MAX_AI_MEMORY_LEN
        )));
    }

    let player = rebuild_roster(&record.units, &record.unit_profiles, "player")?;
    let enemy = rebuild_roster(&record.enemy_units, &record.enemy_unit_profiles, "enemy")?;

    Ok(CampaignState {
        player,
        enemy,
        morale: UnitInterval::new(record.morale),
        enemy_morale: UnitInterval::new(record.enemy_morale),
        fatigue: UnitInterval::new(record.fatigue),
        supply: UnitInterval::new(record.supply),
        resources: record.resources,
        environment: Environment::new(record.terrain, record.weather, record.time),
        leadership_quality: UnitInterval::new(record.leadership_quality),
        spy_effectiveness: UnitInterval::new(record.spy_effectiveness),
        enemy_ai: EnemyAiState::restore(
            record.enemy_ai,
            record.ai_memory_len,
            record.ai_memory,
            record.ai_last_distribution,
        ),
        recruit_distribution: record.recruit_distribution,
        turn: record.turn,
        turn_budget: record.turn_budget,
    })
}

fn profiles(roster: &Roster) -> BTreeMap<UnitKind, UnitProfile> {
    roster.iter().map(|unit| (unit.kind(), *unit.profile())).collect()
}

fn rebuild_roster(
    counts: &BTreeMap<UnitKind, u32>,
    profiles: &BTreeMap<UnitKind, UnitProfile>,
    side: &str,
) -> Result<Roster> {
    let mut roster = Roster::new();
    for (kind, count) in counts {
        let profile = profiles
            .get(kind)
            .copied()
            .unwrap_or_else(|| kind.default_profile());
        if !profile.is_valid() {
            return Err(CampaignError::invalid(format!(
                "saved {} {} has invalid stats",
                side,
                kind.log_name()
            )));
        }
        roster.insert(UnitType::new(*kind, *count, profile));
    }
    Ok(roster)
}
