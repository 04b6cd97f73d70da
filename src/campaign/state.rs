//! Shared campaign state mutated by each sub-model in turn order

use serde::{Deserialize, Serialize};

use crate::campaign::enemy_ai::EnemyAiState;
use crate::campaign::environment::Environment;
use crate::campaign::recruitment::RecruitDistribution;
use crate::campaign::roster::Roster;
use crate::core::error::{CampaignError, Result};
use crate::core::types::UnitInterval;

/// Player treasury and manpower pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resources {
    pub gold: u32,
    pub recruit_points: u32,
    pub fortification: u32,
}

/// Everything a turn reads and writes
///
/// Owned exclusively by whoever drives the turns; sub-models receive it by
/// `&mut` one after another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignState {
    pub player: Roster,
    pub enemy: Roster,
    pub morale: UnitInterval,
    pub enemy_morale: UnitInterval,
    pub fatigue: UnitInterval,
    pub supply: UnitInterval,
    pub resources: Resources,
    pub environment: Environment,
    /// Fixed per scenario
    pub leadership_quality: UnitInterval,
    /// Derived from the spy count every turn, never accumulated
    pub spy_effectiveness: UnitInterval,
    pub enemy_ai: EnemyAiState,
    pub recruit_distribution: RecruitDistribution,
    /// Turns completed so far
    pub turn: u32,
    pub turn_budget: u32,
}

impl CampaignState {
    pub fn player_total(&self) -> u64 {
        self.player.total_strength()
    }

    pub fn enemy_total(&self) -> u64 {
        self.enemy.total_strength()
    }

    /// Allow `turns` more turns past the ones already played
    pub fn extend_budget(&mut self, turns: i64) -> Result<()> {
        let extra = u32::try_from(turns)
            .ok()
            .filter(|t| *t > 0)
            .ok_or_else(|| {
                CampaignError::invalid(format!("turn budget must be positive, got {}", turns))
            })?;
        self.turn_budget = self.turn.saturating_add(extra);
        Ok(())
    }
}
