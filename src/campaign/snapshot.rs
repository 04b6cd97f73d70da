//! Per-turn snapshots and the narrative log
//!
//! A `TurnSnapshot` is the only thing presentation and export collaborators
//! ever see. It is built once at the end of a turn and handed out by value
//! or through shared references only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::campaign::battle::BattleResult;
use crate::campaign::enemy_ai::Personality;
use crate::campaign::environment::Environment;
use crate::campaign::roster::UnitKind;
use crate::campaign::state::{CampaignState, Resources};
use crate::core::types::UnitInterval;

/// Category of a narrative log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogKind {
    Info,
    Victory,
    Defeat,
    Recruitment,
    Sabotage,
    Spy,
    Event,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
}

impl LogEntry {
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Immutable record of one completed turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub turn: u32,
    pub forces_total: u64,
    pub enemy_forces_total: u64,
    pub morale: UnitInterval,
    pub enemy_morale: UnitInterval,
    pub fatigue: UnitInterval,
    pub supply: UnitInterval,
    pub resources: Resources,
    pub environment: Environment,
    /// Maneuvers and spy operations carried out this turn
    pub actions: Vec<String>,
    pub special_actions: usize,
    pub enemy_personality: Personality,
    pub player_units: BTreeMap<UnitKind, u32>,
    pub enemy_units: BTreeMap<UnitKind, u32>,
    pub battle: BattleResult,
    /// Full narrative of the turn, in pipeline order
    pub log: Vec<LogEntry>,
}

impl TurnSnapshot {
    /// Capture the end-of-turn state
    pub fn capture(
        state: &CampaignState,
        actions: Vec<String>,
        battle: BattleResult,
        log: Vec<LogEntry>,
    ) -> Self {
        Self {
            turn: state.turn,
            forces_total: state.player_total(),
            enemy_forces_total: state.enemy_total(),
            morale: state.morale,
            enemy_morale: state.enemy_morale,
            fatigue: state.fatigue,
            supply: state.supply,
            resources: state.resources,
            environment: state.environment,
            special_actions: actions.len(),
            actions,
            enemy_personality: state.enemy_ai.personality(),
            player_units: state.player.counts(),
            enemy_units: state.enemy.counts(),
            battle,
            log,
        }
    }

    /// One-line end-of-turn summary
    pub fn summary(&self) -> String {
        format!(
            "Turn {}: forces {} vs {}, morale {:.2}/{:.2}, fatigue {:.2}, supply {:.2}, enemy {}",
            self.turn,
            self.forces_total,
            self.enemy_forces_total,
            self.morale.get(),
            self.enemy_morale.get(),
            self.fatigue.get(),
            self.supply.get(),
            self.enemy_personality.name(),
        )
    }
}

/// Serialize a snapshot history for export collaborators
pub fn history_to_json(history: &[TurnSnapshot]) -> String {
    serde_json::to_string_pretty(history).unwrap_or_else(|_| "[]".to_string())
}
