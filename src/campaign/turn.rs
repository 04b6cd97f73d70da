//! Turn orchestrator
//!
//! Runs the sub-models in a fixed order against the campaign state and emits
//! one immutable snapshot per turn:
//!
//! 1. Environment cycle and its effects
//! 2. Sun Tzu maneuvers
//! 3. Espionage (enemy disruption, then our spy operations)
//! 4. Recruitment and fortification upkeep
//! 5. Morale
//! 6. Battle, shaped by the enemy's chosen behaviour
//! 7. Post-battle fatigue, supply and political aftermath
//! 8. Enemy AI learns from the outcome
//! 9. Strategic recommendations
//!
//! Every input is checked before step 1, so a turn either commits in full
//! or leaves the state untouched.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::campaign::battle::{battle_powers, resolve_battle};
use crate::campaign::environment::{advance_cycle, apply_environment_effects};
use crate::campaign::espionage::{advanced_spy_operations, supply_line_event};
use crate::campaign::morale::{calculate_morale, MoraleFactors};
use crate::campaign::resources::{battle_aftermath, manage_resources};
use crate::campaign::roster::UnitKind;
use crate::campaign::scenario::{new_campaign_with_config, ScenarioParams};
use crate::campaign::snapshot::{LogEntry, LogKind, TurnSnapshot};
use crate::campaign::state::CampaignState;
use crate::campaign::tactics::{advanced_tactics, enemy_posture_response, recommend, TacticalPicture};
use crate::core::config::{config, CampaignConfig};
use crate::core::error::{CampaignError, Result};
use crate::core::types::Outcome;

/// Number of trailing log lines the advisor checks to avoid repeating itself
const RECENT_LOG_WINDOW: usize = 5;

/// Outcome of the campaign if it has ended
///
/// A destroyed player army takes precedence over a destroyed enemy army.
pub fn is_terminal(state: &CampaignState) -> Option<Outcome> {
    if state.player_total() == 0 {
        Some(Outcome::Defeat)
    } else if state.enemy_total() == 0 {
        Some(Outcome::Victory)
    } else if state.turn >= state.turn_budget {
        Some(Outcome::Exhausted)
    } else {
        None
    }
}

/// Advance the campaign by one turn using the global config
pub fn run_turn(state: &mut CampaignState, rng: &mut impl Rng) -> Result<TurnSnapshot> {
    run_turn_with_config(state, config(), rng)
}

/// Advance the campaign by one turn
pub fn run_turn_with_config(
    state: &mut CampaignState,
    config: &CampaignConfig,
    rng: &mut impl Rng,
) -> Result<TurnSnapshot> {
    check_turn_inputs(state, config)?;

    let turn = state.turn + 1;
    let mut log = Vec::new();
    let mut actions = Vec::new();

    // 1. Environment
    for event in advance_cycle(&mut state.environment, turn, config, rng) {
        log.push(LogEntry::new(LogKind::Event, event.describe()));
    }
    for effect in apply_environment_effects(state, config) {
        log.push(LogEntry::new(LogKind::Event, effect));
    }

    // 2. Maneuvers
    let enemy_before = state.enemy_total();
    let maneuvers = advanced_tactics(
        turn,
        state.enemy_morale,
        enemy_before,
        state.player_total(),
        rng,
    );
    state.enemy_morale = maneuvers.enemy_morale;
    state
        .enemy
        .apply_losses(enemy_before.saturating_sub(maneuvers.enemy_forces));
    for action in maneuvers.actions {
        log.push(LogEntry::new(LogKind::Event, action.clone()));
        actions.push(action);
    }

    // 3. Espionage
    if let Some(event) = supply_line_event(state, config, rng) {
        log.push(LogEntry::new(LogKind::Sabotage, event));
    }
    for action in advanced_spy_operations(state, config, rng) {
        log.push(LogEntry::new(LogKind::Spy, action.clone()));
        actions.push(action);
    }

    // 4. Resources
    log.extend(manage_resources(state, config));

    // 5. Morale
    state.morale = calculate_morale(&MoraleFactors::from_state(state, config));

    // 6. Battle
    let powers = battle_powers(state, config);
    let behavior = state
        .enemy_ai
        .adjust_behavior(powers.player, powers.enemy, config, rng);
    for response in enemy_posture_response(&behavior, powers.enemy > powers.player) {
        log.push(LogEntry::new(LogKind::Event, response));
    }
    let battle = resolve_battle(state, powers, behavior, config);
    log.extend(battle.log_entries());

    // 7. Attrition and aftermath
    let fatigue_gain =
        config.battle_fatigue + battle.player_losses as f32 / config.fatigue_loss_norm;
    state.fatigue.add(fatigue_gain);
    state.supply.sub(config.battle_supply_cost + fatigue_gain * 0.5);
    log.extend(battle_aftermath(
        state,
        battle.player_losses,
        battle.enemy_losses,
        config,
    ));

    // 8. Enemy AI
    state
        .enemy_ai
        .observe_outcome(battle.player_won(), state.player.distribution());
    log.push(LogEntry::new(
        LogKind::Spy,
        format!(
            "Enemy AI shifts to {} strategy based on battle outcomes.",
            state.enemy_ai.personality().name()
        ),
    ));
    log.push(LogEntry::new(
        LogKind::Spy,
        format!(
            "Enemy recruitment favours: {}",
            describe_mix(&state.enemy_ai.suggest_enemy_recruit())
        ),
    ));

    // 9. Recommendations
    let recent: Vec<String> = log
        .iter()
        .rev()
        .take(RECENT_LOG_WINDOW)
        .rev()
        .map(|entry| entry.message.clone())
        .collect();
    let picture = TacticalPicture {
        morale: state.morale,
        player_forces: state.player_total(),
        enemy_forces: state.enemy_total(),
        environment: state.environment,
        recent_log: &recent,
    };
    for recommendation in recommend(&picture, rng) {
        log.push(LogEntry::new(
            LogKind::Event,
            format!("AI Recommendation: {}", recommendation),
        ));
    }

    state.turn = turn;

    match is_terminal(state) {
        Some(Outcome::Defeat) => log.push(LogEntry::new(
            LogKind::Defeat,
            "Your army has been destroyed! Campaign lost.",
        )),
        Some(Outcome::Victory) => log.push(LogEntry::new(
            LogKind::Victory,
            "Enemy army defeated! Campaign won!",
        )),
        Some(Outcome::Exhausted) | None => {}
    }

    let snapshot = TurnSnapshot::capture(state, actions, battle, log);
    tracing::debug!("{}", snapshot.summary());
    Ok(snapshot)
}

fn check_turn_inputs(state: &CampaignState, config: &CampaignConfig) -> Result<()> {
    if let Some(outcome) = is_terminal(state) {
        return Err(CampaignError::CampaignOver(outcome));
    }
    if !state.recruit_distribution.is_valid() {
        return Err(CampaignError::invalid(format!(
            "malformed recruitment distribution {}",
            state.recruit_distribution
        )));
    }
    if let Some(unit) = state
        .player
        .iter()
        .chain(state.enemy.iter())
        .find(|unit| !unit.profile().is_valid())
    {
        return Err(CampaignError::invalid(format!(
            "{} has negative or non-finite stats",
            unit.name()
        )));
    }
    config.validate().map_err(CampaignError::Config)
}

fn describe_mix(mix: &[f32; UnitKind::COUNT]) -> String {
    UnitKind::ALL
        .iter()
        .filter(|kind| mix[kind.index()] > 0.0)
        .map(|kind| format!("{} {:.0}%", kind.log_name(), mix[kind.index()] * 100.0))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Owns a campaign run: state, seeded generator and snapshot history
#[derive(Debug, Clone)]
pub struct Campaign {
    state: CampaignState,
    config: CampaignConfig,
    rng: ChaCha8Rng,
    seed: u64,
    history: Vec<TurnSnapshot>,
}

impl Campaign {
    /// Start a campaign with the global config
    pub fn new(params: &ScenarioParams) -> Result<Self> {
        Self::with_config(params, config().clone())
    }

    /// Start a campaign with explicit tuning constants
    ///
    /// Uses the scenario seed, or a random one that is kept for replay.
    pub fn with_config(params: &ScenarioParams, config: CampaignConfig) -> Result<Self> {
        let seed = params.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = new_campaign_with_config(params, &config, &mut rng)?;
        tracing::info!("Campaign seed: {}", seed);

        Ok(Self {
            state,
            config,
            rng,
            seed,
            history: Vec::new(),
        })
    }

    /// Resume from an existing state with the global config
    pub fn from_state(state: CampaignState, seed: u64) -> Self {
        Self::from_state_with_config(state, seed, config().clone())
    }

    /// Resume from an existing state with a fresh generator and explicit tuning
    pub fn from_state_with_config(state: CampaignState, seed: u64, config: CampaignConfig) -> Self {
        Self {
            state,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &CampaignState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Snapshots of every turn played in this run, oldest first
    pub fn history(&self) -> &[TurnSnapshot] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        is_terminal(&self.state)
    }

    /// Play one turn and record its snapshot
    pub fn run_turn(&mut self) -> Result<&TurnSnapshot> {
        let snapshot = run_turn_with_config(&mut self.state, &self.config, &mut self.rng)?;
        self.history.push(snapshot);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Play until the campaign ends
    pub fn run(&mut self) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.run_until(|_| false)? {
                return Ok(outcome);
            }
        }
    }

    /// Play until the campaign ends or `stop` asks to halt after a turn
    ///
    /// `stop` is consulted only between turns. Returns `None` when stopped
    /// before the campaign ended.
    pub fn run_until(&mut self, mut stop: impl FnMut(&TurnSnapshot) -> bool) -> Result<Option<Outcome>> {
        tracing::info!(
            "Campaign running from turn {} (enemy AI: {})",
            self.state.turn + 1,
            self.state.enemy_ai.personality().name()
        );

        while self.outcome().is_none() {
            let halt = stop(self.run_turn()?);
            if halt {
                tracing::info!("Campaign halted after turn {}", self.state.turn);
                return Ok(self.outcome());
            }
        }

        let outcome = self.outcome();
        if let Some(outcome) = outcome {
            tracing::info!(
                "Campaign ended after {} turns: {:?} ({} vs {})",
                self.state.turn,
                outcome,
                self.state.player_total(),
                self.state.enemy_total()
            );
        }
        Ok(outcome)
    }
}
