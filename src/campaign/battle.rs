//! Battle resolution for campaign layer
//!
//! Each turn the two rosters clash once. Aggregate power is attack × count,
//! worn down by fatigue, boosted by air superiority and cut by rough terrain
//! for heavy units. The enemy's behaviour scales the result, the stronger
//! side wins, and losses are spread across both rosters.

use serde::{Deserialize, Serialize};

use crate::campaign::enemy_ai::EnemyBehavior;
use crate::campaign::environment::Terrain;
use crate::campaign::roster::Roster;
use crate::campaign::snapshot::{LogEntry, LogKind};
use crate::campaign::state::CampaignState;
use crate::core::config::CampaignConfig;
use crate::core::types::UnitInterval;

/// Outcome of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BattleOutcome {
    /// Player fielded more power
    PlayerVictory,
    /// Enemy fielded more power
    EnemyVictory,
    /// Exactly equal power; nobody takes losses
    Stalemate,
}

/// Aggregate power of both sides
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BattlePowers {
    pub player: f64,
    pub enemy: f64,
}

/// Results of a battle resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    /// Powers after behavioural modifiers
    pub powers: BattlePowers,
    pub behavior: EnemyBehavior,
    pub player_losses: u64,
    pub enemy_losses: u64,
    /// Units actually removed (losses are floored per unit kind)
    pub player_removed: u64,
    pub enemy_removed: u64,
}

impl BattleResult {
    /// Player "won" when it lost fewer units than it inflicted
    pub fn player_won(&self) -> bool {
        self.player_losses < self.enemy_losses
    }

    pub fn log_entries(&self) -> Vec<LogEntry> {
        let mut log = Vec::new();
        if self.behavior.avoid {
            log.push(LogEntry::new(
                LogKind::Event,
                "Enemy chooses to avoid direct confrontation.",
            ));
        }
        if self.behavior.feint {
            log.push(LogEntry::new(LogKind::Spy, "Enemy performs feints and misdirection."));
        }
        match self.outcome {
            BattleOutcome::PlayerVictory => {
                log.push(LogEntry::new(
                    LogKind::Victory,
                    format!("Your army inflicted {} losses to the enemy.", self.enemy_losses),
                ));
                log.push(LogEntry::new(
                    LogKind::Defeat,
                    format!("Your army suffered {} losses.", self.player_losses),
                ));
            }
            BattleOutcome::EnemyVictory => {
                log.push(LogEntry::new(
                    LogKind::Defeat,
                    format!("Your army suffered {} losses.", self.player_losses),
                ));
                log.push(LogEntry::new(
                    LogKind::Victory,
                    format!("Enemy suffered {} losses.", self.enemy_losses),
                ));
            }
            BattleOutcome::Stalemate => {
                log.push(LogEntry::new(
                    LogKind::Event,
                    "Forces evenly matched, both armies hold their ground.",
                ));
            }
        }
        log
    }
}

/// Aggregate combat power of a roster
///
/// Σ attack × count × (1 − fatigue × 0.5), ×1.2 for air superiority, minus
/// attack × count × 0.3 for terrain-bound kinds on hampering ground.
/// Floored to a whole number and never negative.
pub fn aggregate_power(
    roster: &Roster,
    fatigue: UnitInterval,
    terrain: Terrain,
    config: &CampaignConfig,
) -> f64 {
    let fatigue_mod = 1.0 - f64::from(fatigue.get()) * 0.5;
    let mut power = 0.0f64;

    for unit in roster.iter() {
        let raw = f64::from(unit.attack()) * f64::from(unit.count());
        let mut unit_power = raw * fatigue_mod;
        if unit.capabilities().air_superiority {
            unit_power *= f64::from(config.air_superiority_bonus);
        }
        power += unit_power;

        if terrain.hampers_heavy_units() && unit.kind().is_terrain_bound() {
            power -= raw * f64::from(config.terrain_penalty);
        }
    }

    power.max(0.0).floor()
}

/// Raw powers of both sides before the enemy picks its behaviour
pub fn battle_powers(state: &CampaignState, config: &CampaignConfig) -> BattlePowers {
    let terrain = state.environment.terrain;
    BattlePowers {
        player: aggregate_power(&state.player, state.fatigue, terrain, config),
        enemy: aggregate_power(&state.enemy, state.fatigue, terrain, config),
    }
}

/// Scale powers by the enemy's behaviour
pub fn apply_behavior(
    powers: BattlePowers,
    behavior: &EnemyBehavior,
    config: &CampaignConfig,
) -> BattlePowers {
    let mut adjusted = powers;
    if behavior.avoid {
        adjusted.enemy *= f64::from(config.avoid_multiplier);
    }
    if behavior.feint {
        adjusted.player *= f64::from(config.feint_multiplier);
    }
    adjusted
}

/// Losses for both sides as `(outcome, player_losses, enemy_losses)`
///
/// The loser takes 10% of the power difference, the winner 5% of the weaker
/// power. Equal powers are a stalemate with no losses.
pub fn compute_losses(powers: BattlePowers, config: &CampaignConfig) -> (BattleOutcome, u64, u64) {
    let loser_rate = f64::from(config.loser_loss_rate);
    let winner_rate = f64::from(config.winner_loss_rate);

    if powers.player > powers.enemy {
        let enemy_losses = ((powers.player - powers.enemy) * loser_rate) as u64;
        let player_losses = (powers.enemy * winner_rate) as u64;
        (BattleOutcome::PlayerVictory, player_losses, enemy_losses)
    } else if powers.enemy > powers.player {
        let player_losses = ((powers.enemy - powers.player) * loser_rate) as u64;
        let enemy_losses = (powers.player * winner_rate) as u64;
        (BattleOutcome::EnemyVictory, player_losses, enemy_losses)
    } else {
        (BattleOutcome::Stalemate, 0, 0)
    }
}

/// Resolve the turn's battle and apply losses to both rosters
pub fn resolve_battle(
    state: &mut CampaignState,
    powers: BattlePowers,
    behavior: EnemyBehavior,
    config: &CampaignConfig,
) -> BattleResult {
    let powers = apply_behavior(powers, &behavior, config);
    let (outcome, player_losses, enemy_losses) = compute_losses(powers, config);

    let player_removed = state.player.apply_losses(player_losses);
    let enemy_removed = state.enemy.apply_losses(enemy_losses);

    BattleResult {
        outcome,
        powers,
        behavior,
        player_losses,
        enemy_losses,
        player_removed,
        enemy_removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::roster::{UnitKind, UnitType};
    use crate::campaign::state::tests::test_state;

    fn roster(kind: UnitKind, count: u32) -> Roster {
        let mut roster = Roster::new();
        roster.insert(UnitType::new(kind, count, kind.default_profile()));
        roster
    }

    #[test]
    fn test_infantry_power() {
        let config = CampaignConfig::default();
        let power = aggregate_power(
            &roster(UnitKind::Infantry, 100),
            UnitInterval::ZERO,
            Terrain::Open,
            &config,
        );
        assert_eq!(power, 600.0);
    }

    #[test]
    fn test_fatigue_halves_at_most() {
        let config = CampaignConfig::default();
        let power = aggregate_power(
            &roster(UnitKind::Infantry, 100),
            UnitInterval::ONE,
            Terrain::Open,
            &config,
        );
        assert_eq!(power, 300.0);
    }

    #[test]
    fn test_air_superiority_bonus() {
        let config = CampaignConfig::default();
        let power = aggregate_power(
            &roster(UnitKind::Aircraft, 100),
            UnitInterval::ZERO,
            Terrain::Open,
            &config,
        );
        // 18 * 100 * 1.2
        assert!((power - 2160.0).abs() <= 1.0);
    }

    #[test]
    fn test_terrain_penalty_hits_heavy_units_only() {
        let config = CampaignConfig::default();
        let tanks = roster(UnitKind::Tank, 100);
        let infantry = roster(UnitKind::Infantry, 100);

        let open = aggregate_power(&tanks, UnitInterval::ZERO, Terrain::Open, &config);
        let rough = aggregate_power(&tanks, UnitInterval::ZERO, Terrain::HemmedIn, &config);
        assert_eq!(open, 1500.0);
        assert!((rough - 1050.0).abs() <= 1.0);

        assert_eq!(
            aggregate_power(&infantry, UnitInterval::ZERO, Terrain::Difficult, &config),
            600.0
        );
    }

    #[test]
    fn test_power_never_negative() {
        let config = CampaignConfig::default();
        // Full fatigue halves power, terrain still removes 30% of raw
        let power = aggregate_power(
            &roster(UnitKind::Artillery, 100),
            UnitInterval::ONE,
            Terrain::Entangling,
            &config,
        );
        assert!((power - 200.0).abs() <= 1.0);

        let harsh = CampaignConfig {
            terrain_penalty: 2.0,
            ..CampaignConfig::default()
        };
        let power = aggregate_power(
            &roster(UnitKind::Artillery, 100),
            UnitInterval::ONE,
            Terrain::Entangling,
            &harsh,
        );
        assert_eq!(power, 0.0);
    }

    #[test]
    fn test_behavior_modifiers() {
        let config = CampaignConfig::default();
        let powers = BattlePowers {
            player: 1000.0,
            enemy: 1000.0,
        };
        let adjusted = apply_behavior(
            powers,
            &EnemyBehavior {
                confidence: false,
                avoid: true,
                feint: true,
            },
            &config,
        );
        assert!((adjusted.enemy - 800.0).abs() < 1e-3);
        assert!((adjusted.player - 900.0).abs() < 1e-3);
    }

    #[test]
    fn test_losses_when_player_stronger() {
        let config = CampaignConfig::default();
        let (outcome, player, enemy) = compute_losses(
            BattlePowers {
                player: 10000.0,
                enemy: 6000.0,
            },
            &config,
        );
        assert_eq!(outcome, BattleOutcome::PlayerVictory);
        assert_eq!(enemy, 400);
        assert_eq!(player, 300);
    }

    #[test]
    fn test_losses_when_enemy_stronger() {
        let config = CampaignConfig::default();
        let (outcome, player, enemy) = compute_losses(
            BattlePowers {
                player: 6000.0,
                enemy: 10000.0,
            },
            &config,
        );
        assert_eq!(outcome, BattleOutcome::EnemyVictory);
        assert_eq!(player, 400);
        assert_eq!(enemy, 300);
    }

    #[test]
    fn test_tie_is_stalemate_without_losses() {
        let config = CampaignConfig::default();
        let (outcome, player, enemy) = compute_losses(
            BattlePowers {
                player: 5000.0,
                enemy: 5000.0,
            },
            &config,
        );
        assert_eq!(outcome, BattleOutcome::Stalemate);
        assert_eq!((player, enemy), (0, 0));
    }

    #[test]
    fn test_resolve_applies_losses() {
        let config = CampaignConfig::default();
        let mut state = test_state();
        let before_player = state.player_total();
        let before_enemy = state.enemy_total();

        let powers = battle_powers(&state, &config);
        let result = resolve_battle(&mut state, powers, EnemyBehavior::default(), &config);

        assert_eq!(result.outcome, BattleOutcome::PlayerVictory);
        assert_eq!(state.player_total(), before_player - result.player_removed);
        assert_eq!(state.enemy_total(), before_enemy - result.enemy_removed);
        assert!(result.player_removed <= result.player_losses);
        assert!(!result.log_entries().is_empty());
    }
}
