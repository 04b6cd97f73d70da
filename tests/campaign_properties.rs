//! Property tests for campaign invariants

use proptest::prelude::*;

use suntzu_campaign::campaign::scenario::{DEFAULT_ENEMY_UNITS, DEFAULT_PLAYER_UNITS};
use suntzu_campaign::campaign::{
    load_state, save_state, Campaign, ForceSpec, Roster, ScenarioParams, UnitKind, UnitType,
};
use suntzu_campaign::core::CampaignConfig;

fn scenario(seed: u64, budget: i64, player: [i64; 7], enemy: [i64; 7]) -> ScenarioParams {
    ScenarioParams {
        player: ForceSpec::from_counts(player),
        enemy: ForceSpec::from_counts(enemy),
        seed: Some(seed),
        turn_budget: budget,
        ..ScenarioParams::default()
    }
}

fn army() -> impl Strategy<Value = [i64; 7]> {
    prop::array::uniform7(0_i64..5_000)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_scalars_stay_in_unit_interval(
        seed in any::<u64>(),
        budget in 1_i64..15,
        player in army(),
        enemy in army(),
    ) {
        let params = scenario(seed, budget, player, enemy);
        let mut campaign = Campaign::with_config(&params, CampaignConfig::default()).unwrap();
        if campaign.outcome().is_none() {
            campaign.run().unwrap();
        }

        for snapshot in campaign.history() {
            for value in [
                snapshot.morale.get(),
                snapshot.enemy_morale.get(),
                snapshot.fatigue.get(),
                snapshot.supply.get(),
            ] {
                prop_assert!((0.0..=1.0).contains(&value));
            }
        }
        prop_assert!(campaign.history().len() as i64 <= budget);
    }

    #[test]
    fn prop_same_seed_replays_identically(seed in any::<u64>(), budget in 1_i64..8) {
        let params = scenario(seed, budget, DEFAULT_PLAYER_UNITS, DEFAULT_ENEMY_UNITS);
        let mut a = Campaign::with_config(&params, CampaignConfig::default()).unwrap();
        let mut b = Campaign::with_config(&params, CampaignConfig::default()).unwrap();

        prop_assert_eq!(a.run().unwrap(), b.run().unwrap());
        prop_assert_eq!(a.history(), b.history());
    }

    #[test]
    fn prop_save_load_round_trip(seed in any::<u64>(), turns in 0_u32..6) {
        let params = scenario(seed, 10, DEFAULT_PLAYER_UNITS, DEFAULT_ENEMY_UNITS);
        let mut campaign = Campaign::with_config(&params, CampaignConfig::default()).unwrap();
        if turns > 0 {
            campaign.run_until(|snapshot| snapshot.turn >= turns).unwrap();
        }

        let state = campaign.state();
        prop_assert_eq!(&load_state(save_state(state)).unwrap(), state);

        let json = save_state(state).to_json().unwrap();
        let from_json = load_state(serde_json::from_str(&json).unwrap()).unwrap();
        prop_assert_eq!(&from_json, state);
    }

    #[test]
    fn prop_losses_never_exceed_roster(
        counts in prop::array::uniform7(0_u32..10_000),
        losses in 0_u64..100_000,
    ) {
        let mut roster = Roster::standard(counts);
        let before = roster.total_strength();

        let removed = roster.apply_losses(losses);

        prop_assert_eq!(roster.total_strength(), before - removed);
        prop_assert!(removed <= before);
        if losses >= before {
            prop_assert_eq!(roster.total_strength(), 0);
        } else {
            prop_assert!(removed <= losses);
        }
    }

    #[test]
    fn prop_equal_kinds_split_losses_evenly(count in 1_u32..50_000, losses in 0_u64..100_000) {
        let mut roster = Roster::new();
        roster.insert(UnitType::new(UnitKind::Infantry, count, UnitKind::Infantry.default_profile()));
        roster.insert(UnitType::new(UnitKind::Tank, count, UnitKind::Tank.default_profile()));

        roster.apply_losses(losses);

        prop_assert_eq!(roster.count(UnitKind::Infantry), roster.count(UnitKind::Tank));
    }
}
