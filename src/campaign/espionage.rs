//! Espionage model
//!
//! Enemy spies threaten our supply lines; our own spies sabotage and spread
//! misinformation. Chances scale linearly with spy counts and are capped at
//! certainty.

use rand::Rng;

use crate::campaign::roster::UnitKind;
use crate::campaign::state::CampaignState;
use crate::core::config::CampaignConfig;
use crate::core::types::UnitInterval;

/// Sole report when the player fields no spies
pub const NO_SPIES_AVAILABLE: &str = "no spies available";

/// Enemy attempt to cut our supply lines
///
/// Chance is `base + enemy_spies / norm`; it only bites when our supply is
/// already below the threshold, adding a random fatigue penalty.
pub fn supply_line_event(
    state: &mut CampaignState,
    config: &CampaignConfig,
    rng: &mut impl Rng,
) -> Option<String> {
    let enemy_spies = state.enemy.count(UnitKind::Spies);
    let chance = UnitInterval::new(
        config.disruption_base_chance + enemy_spies as f32 / config.disruption_spy_norm,
    );

    let roll = rng.gen::<f32>();
    if roll < chance.get() && state.supply.get() < config.disruption_supply_threshold {
        let penalty = rng.gen_range(config.disruption_fatigue_min..=config.disruption_fatigue_max);
        state.fatigue.add(penalty);
        return Some(format!(
            "Supply line disrupted! Fatigue increased by {:.2}.",
            penalty
        ));
    }
    None
}

/// Player spy missions against the enemy
///
/// Sabotage and misinformation are rolled independently. Sabotage costs us
/// supply and shakes enemy morale; misinformation shakes it further. Spy
/// effectiveness is re-derived from the spy count afterwards.
pub fn advanced_spy_operations(
    state: &mut CampaignState,
    config: &CampaignConfig,
    rng: &mut impl Rng,
) -> Vec<String> {
    let spies = state.player.count(UnitKind::Spies);
    let mut actions = Vec::new();

    if spies > 0 {
        let scale = spies as f32 / config.spy_operation_norm;

        let sabotage_chance = UnitInterval::new(config.sabotage_chance_per_norm * scale);
        if rng.gen::<f32>() < sabotage_chance.get() {
            let supply_damage =
                rng.gen_range(config.sabotage_supply_cost_min..=config.sabotage_supply_cost_max);
            state.supply.sub(supply_damage);
            state.enemy_morale.sub(config.sabotage_morale_hit);
            actions.push("Spies sabotaged enemy supply lines successfully.".to_string());
        }

        let misinformation_chance = UnitInterval::new(config.misinformation_chance_per_norm * scale);
        if rng.gen::<f32>() < misinformation_chance.get() {
            state.enemy_morale.sub(config.misinformation_morale_hit);
            actions.push("Spies spread misinformation, confusing enemy command.".to_string());
        }
    } else {
        actions.push(NO_SPIES_AVAILABLE.to_string());
    }

    state.spy_effectiveness = spy_effectiveness(spies, config);
    actions
}

/// `min(1, spies / norm)`
pub fn spy_effectiveness(spies: u32, config: &CampaignConfig) -> UnitInterval {
    UnitInterval::ratio(f64::from(spies), f64::from(config.spy_effectiveness_norm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::state::tests::test_state;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_no_spies_reports_single_message() {
        let config = CampaignConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut state = test_state();
        state.player.set_count(UnitKind::Spies, 0);
        let before = state.clone();

        let actions = advanced_spy_operations(&mut state, &config, &mut rng);

        assert_eq!(actions, vec![NO_SPIES_AVAILABLE.to_string()]);
        assert_eq!(state.supply, before.supply);
        assert_eq!(state.enemy_morale, before.enemy_morale);
        assert_eq!(state.spy_effectiveness, UnitInterval::ZERO);
    }

    #[test]
    fn test_saturated_spies_always_succeed() {
        let config = CampaignConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = test_state();
        state.player.set_count(UnitKind::Spies, 1000);

        let actions = advanced_spy_operations(&mut state, &config, &mut rng);

        assert_eq!(actions.len(), 2);
        // 0.6 - 0.05 - 0.07
        assert!((state.enemy_morale.get() - 0.48).abs() < 1e-5);
        assert!(state.supply.get() <= 0.95 && state.supply.get() >= 0.85);
        assert_eq!(state.spy_effectiveness, UnitInterval::ONE);
    }

    #[test]
    fn test_effectiveness_is_derived_not_accumulated() {
        let config = CampaignConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut state = test_state();
        state.player.set_count(UnitKind::Spies, 75);

        for _ in 0..5 {
            advanced_spy_operations(&mut state, &config, &mut rng);
            assert!((state.spy_effectiveness.get() - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_disruption_needs_low_supply() {
        let config = CampaignConfig {
            disruption_base_chance: 1.0,
            ..CampaignConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut state = test_state();

        assert!(supply_line_event(&mut state, &config, &mut rng).is_none());
        assert_eq!(state.fatigue, UnitInterval::ZERO);

        state.supply = UnitInterval::new(0.3);
        let event = supply_line_event(&mut state, &config, &mut rng);
        assert!(event.is_some());
        assert!(state.fatigue.get() >= 0.1 && state.fatigue.get() <= 0.2);
    }

    #[test]
    fn test_disruption_fatigue_is_capped() {
        let config = CampaignConfig {
            disruption_base_chance: 1.0,
            ..CampaignConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        let mut state = test_state();
        state.supply = UnitInterval::ZERO;
        state.fatigue = UnitInterval::new(0.95);

        supply_line_event(&mut state, &config, &mut rng);
        assert_eq!(state.fatigue, UnitInterval::ONE);
    }
}
