//! Adaptive enemy AI
//!
//! The enemy remembers the last K battle outcomes together with the
//! player's unit mix. Once the window is full, the player's win rate picks
//! its personality, and the personality shapes how it fights each battle.
//! The remembered unit mix drives a counter-recruitment suggestion.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::campaign::roster::UnitKind;
use crate::core::config::{CampaignConfig, MAX_AI_MEMORY_LEN};

/// Assumed player mix before any battle has been observed
pub const DEFAULT_PLAYER_DISTRIBUTION: [f32; UnitKind::COUNT] =
    [0.7, 0.15, 0.1, 0.05, 0.0, 0.0, 0.0];

/// Behavioural mode of the enemy commander
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Personality {
    Aggressive,
    Defensive,
    Deceptive,
}

impl Personality {
    pub const ALL: [Personality; 3] = [
        Personality::Aggressive,
        Personality::Defensive,
        Personality::Deceptive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Defensive => "defensive",
            Self::Deceptive => "deceptive",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// One remembered battle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub player_won: bool,
    /// Player's unit shares at the end of that battle
    pub player_distribution: [f32; UnitKind::COUNT],
}

/// How the enemy fights this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnemyBehavior {
    pub confidence: bool,
    /// Shy away from confrontation (reduces enemy power)
    pub avoid: bool,
    /// Feints and misdirection (reduces player power)
    pub feint: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyAiState {
    personality: Personality,
    memory_len: usize,
    memory: VecDeque<OutcomeRecord>,
    last_distribution: [f32; UnitKind::COUNT],
}

impl EnemyAiState {
    pub fn new(personality: Personality, config: &CampaignConfig) -> Self {
        Self::with_memory_len(personality, config.ai_memory_len)
    }

    /// Window length is clamped to `1..=MAX_AI_MEMORY_LEN`
    pub fn with_memory_len(personality: Personality, memory_len: usize) -> Self {
        let memory_len = memory_len.clamp(1, MAX_AI_MEMORY_LEN);
        Self {
            personality,
            memory_len,
            memory: VecDeque::with_capacity(memory_len),
            last_distribution: DEFAULT_PLAYER_DISTRIBUTION,
        }
    }

    /// Rebuild from saved parts, trimming memory to the window
    pub fn restore(
        personality: Personality,
        memory_len: usize,
        memory: Vec<OutcomeRecord>,
        last_distribution: [f32; UnitKind::COUNT],
    ) -> Self {
        let mut state = Self::with_memory_len(personality, memory_len);
        for record in memory {
            state.remember(record);
        }
        state.last_distribution = last_distribution;
        state
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    pub fn memory_len(&self) -> usize {
        self.memory_len
    }

    pub fn memory(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.memory.iter()
    }

    pub fn memory_size(&self) -> usize {
        self.memory.len()
    }

    pub fn last_distribution(&self) -> [f32; UnitKind::COUNT] {
        self.last_distribution
    }

    fn remember(&mut self, record: OutcomeRecord) {
        self.memory.push_back(record);
        while self.memory.len() > self.memory_len {
            self.memory.pop_front();
        }
    }

    /// Record a battle, dropping the oldest entry beyond the window
    pub fn observe_outcome(&mut self, player_won: bool, player_distribution: [f32; UnitKind::COUNT]) {
        self.remember(OutcomeRecord {
            player_won,
            player_distribution,
        });
        self.last_distribution = player_distribution;
    }

    /// Player win rate over the window, once the window is full
    pub fn win_rate(&self) -> Option<f32> {
        if self.memory.len() < self.memory_len {
            return None;
        }
        let wins = self.memory.iter().filter(|m| m.player_won).count();
        Some(wins as f32 / self.memory.len() as f32)
    }

    /// Re-derive the personality from the win rate
    ///
    /// No-op until the memory window is full.
    pub fn decide_personality(&mut self, config: &CampaignConfig) {
        let Some(win_rate) = self.win_rate() else {
            return;
        };

        self.personality = if win_rate > config.aggressive_win_rate {
            Personality::Aggressive
        } else if win_rate < config.defensive_win_rate {
            Personality::Defensive
        } else {
            Personality::Deceptive
        };
    }

    /// Choose this turn's behaviour from the (freshly decided) personality
    pub fn adjust_behavior(
        &mut self,
        player_forces: f64,
        enemy_forces: f64,
        config: &CampaignConfig,
        rng: &mut impl Rng,
    ) -> EnemyBehavior {
        self.decide_personality(config);

        match self.personality {
            Personality::Aggressive => EnemyBehavior {
                confidence: true,
                avoid: false,
                feint: rng.gen::<f32>() < config.feint_chance,
            },
            Personality::Defensive => EnemyBehavior {
                confidence: false,
                avoid: enemy_forces < player_forces,
                feint: rng.gen::<f32>() < config.feint_chance,
            },
            Personality::Deceptive => EnemyBehavior {
                confidence: rng.gen_bool(0.5),
                avoid: rng.gen_bool(0.5),
                feint: true,
            },
        }
    }

    /// Recruitment mix that answers the player's last observed composition
    ///
    /// The player's dominant kind is weighted down by 30% and its counters
    /// are weighted up; the result is normalized and rounded to hundredths.
    pub fn suggest_enemy_recruit(&self) -> [f32; UnitKind::COUNT] {
        let p = self.last_distribution;
        if p.iter().sum::<f32>() <= 0.0 {
            return DEFAULT_PLAYER_DISTRIBUTION;
        }

        let dominant = UnitKind::ALL
            .iter()
            .copied()
            .fold(UnitKind::Infantry, |best, kind| {
                if p[kind.index()] > p[best.index()] {
                    kind
                } else {
                    best
                }
            });

        let mut weights = p;
        weights[dominant.index()] *= 0.7;
        for (counter, bonus) in dominant.counters() {
            weights[counter.index()] += bonus;
        }

        let norm: f32 = weights.iter().sum();
        if norm <= 0.0 {
            return DEFAULT_PLAYER_DISTRIBUTION;
        }
        weights.map(|w| (w / norm * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ai(personality: Personality) -> EnemyAiState {
        EnemyAiState::new(personality, &CampaignConfig::default())
    }

    fn feed(ai: &mut EnemyAiState, wins: &[bool]) {
        for &won in wins {
            ai.observe_outcome(won, DEFAULT_PLAYER_DISTRIBUTION);
        }
    }

    #[test]
    fn test_memory_is_bounded() {
        let mut ai = ai(Personality::Deceptive);
        feed(&mut ai, &[true; 12]);
        assert_eq!(ai.memory_size(), 5);
    }

    #[test]
    fn test_oldest_outcome_dropped_first() {
        let mut ai = ai(Personality::Deceptive);
        feed(&mut ai, &[false, true, true, true, true, true]);
        assert!(ai.memory().all(|m| m.player_won));
    }

    #[test]
    fn test_decide_is_noop_until_window_full() {
        let config = CampaignConfig::default();
        let mut ai = ai(Personality::Defensive);
        feed(&mut ai, &[true, true, true, true]);

        ai.decide_personality(&config);
        assert_eq!(ai.personality(), Personality::Defensive);
        assert_eq!(ai.win_rate(), None);
    }

    #[test]
    fn test_high_win_rate_turns_aggressive() {
        let config = CampaignConfig::default();
        let mut ai = ai(Personality::Defensive);
        feed(&mut ai, &[true, true, false, true, true]);

        assert_eq!(ai.win_rate(), Some(0.8));
        ai.decide_personality(&config);
        assert_eq!(ai.personality(), Personality::Aggressive);
    }

    #[test]
    fn test_low_win_rate_turns_defensive() {
        let config = CampaignConfig::default();
        let mut ai = ai(Personality::Aggressive);
        feed(&mut ai, &[false, false, true, false, false]);

        ai.decide_personality(&config);
        assert_eq!(ai.personality(), Personality::Defensive);
    }

    #[test]
    fn test_middling_win_rate_turns_deceptive() {
        let config = CampaignConfig::default();
        let mut ai = ai(Personality::Aggressive);
        feed(&mut ai, &[true, false, true, false, false]);

        ai.decide_personality(&config);
        assert_eq!(ai.personality(), Personality::Deceptive);
    }

    #[test]
    fn test_aggressive_never_avoids() {
        let config = CampaignConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ai = ai(Personality::Aggressive);
        for _ in 0..50 {
            let behavior = ai.adjust_behavior(100.0, 10.0, &config, &mut rng);
            assert!(behavior.confidence);
            assert!(!behavior.avoid);
        }
    }

    #[test]
    fn test_defensive_avoids_only_when_weaker() {
        let config = CampaignConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ai = ai(Personality::Defensive);

        assert!(ai.adjust_behavior(100.0, 50.0, &config, &mut rng).avoid);
        assert!(!ai.adjust_behavior(50.0, 100.0, &config, &mut rng).avoid);
        assert!(!ai.adjust_behavior(50.0, 100.0, &config, &mut rng).confidence);
    }

    #[test]
    fn test_deceptive_always_feints() {
        let config = CampaignConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ai = ai(Personality::Deceptive);
        for _ in 0..20 {
            assert!(ai.adjust_behavior(1.0, 1.0, &config, &mut rng).feint);
        }
    }

    #[test]
    fn test_counter_recruit_underweights_dominant_kind() {
        let mut ai = ai(Personality::Deceptive);
        ai.observe_outcome(true, [0.6, 0.2, 0.1, 0.1, 0.0, 0.0, 0.0]);

        let suggestion = ai.suggest_enemy_recruit();
        let sum: f32 = suggestion.iter().sum();
        assert!((sum - 1.0).abs() < 0.03);
        assert!(suggestion[UnitKind::Infantry.index()] < 0.6);
        assert!(suggestion[UnitKind::Tank.index()] > 0.1);
    }

    #[test]
    fn test_counter_recruit_underweights_every_dominant_kind() {
        for dominant in UnitKind::ALL {
            let mut mix = [0.1; UnitKind::COUNT];
            mix[dominant.index()] = 0.4;
            let mut ai = ai(Personality::Aggressive);
            ai.observe_outcome(false, mix);

            let suggestion = ai.suggest_enemy_recruit();
            assert!(
                suggestion[dominant.index()] < mix[dominant.index()],
                "{:?} got {:?}",
                dominant,
                suggestion
            );
        }
    }

    #[test]
    fn test_spies_dominant_mix_is_countered() {
        let mut ai = ai(Personality::Deceptive);
        ai.observe_outcome(true, [0.3, 0.0, 0.0, 0.0, 0.0, 0.3, 0.4]);

        let suggestion = ai.suggest_enemy_recruit();
        assert!(suggestion[UnitKind::Spies.index()] < 0.4);
        assert!(suggestion[UnitKind::Aircraft.index()] > 0.3);
    }

    #[test]
    fn test_memory_len_is_clamped() {
        assert_eq!(
            EnemyAiState::with_memory_len(Personality::Aggressive, usize::MAX).memory_len(),
            MAX_AI_MEMORY_LEN
        );
        assert_eq!(
            EnemyAiState::with_memory_len(Personality::Aggressive, 0).memory_len(),
            1
        );
    }

    #[test]
    fn test_counter_recruit_handles_late_kinds() {
        let mut ai = ai(Personality::Deceptive);
        ai.observe_outcome(true, [0.1, 0.0, 0.0, 0.0, 0.0, 0.9, 0.0]);

        let suggestion = ai.suggest_enemy_recruit();
        assert!(suggestion[UnitKind::Aircraft.index()] < 0.9);
        assert!(suggestion[UnitKind::Missiles.index()] > 0.0);
    }

    #[test]
    fn test_counter_recruit_falls_back_on_empty_mix() {
        let mut ai = ai(Personality::Deceptive);
        ai.observe_outcome(false, [0.0; UnitKind::COUNT]);
        assert_eq!(ai.suggest_enemy_recruit(), DEFAULT_PLAYER_DISTRIBUTION);
    }

    #[test]
    fn test_restore_trims_memory() {
        let records = vec![
            OutcomeRecord {
                player_won: true,
                player_distribution: DEFAULT_PLAYER_DISTRIBUTION,
            };
            8
        ];
        let ai = EnemyAiState::restore(Personality::Aggressive, 5, records, DEFAULT_PLAYER_DISTRIBUTION);
        assert_eq!(ai.memory_size(), 5);
    }
}
