//! Resource manager
//!
//! Converts recruit points into new units, pays fortification upkeep and
//! settles the political aftermath of each battle. Running out of gold is a
//! logged outcome, never an error.

use crate::campaign::roster::UnitKind;
use crate::campaign::snapshot::{LogEntry, LogKind};
use crate::campaign::state::CampaignState;
use crate::core::config::CampaignConfig;

/// Recruit and pay upkeep for this turn
///
/// `recruit_gain = floor(recruit_points × rate)` units cost
/// `recruit_gain × unit_gold_cost` gold and are spread over the unit kinds by
/// the state's recruitment distribution (integer percentages, floored).
pub fn manage_resources(state: &mut CampaignState, config: &CampaignConfig) -> Vec<LogEntry> {
    let mut log = Vec::new();

    let recruit_gain =
        (f64::from(state.resources.recruit_points) * f64::from(config.recruit_rate)).floor() as u64;
    let gold_cost = recruit_gain * u64::from(config.unit_gold_cost);

    if recruit_gain == 0 {
        log.push(LogEntry::new(LogKind::Info, "No recruit points to convert this turn."));
    } else if u64::from(state.resources.gold) >= gold_cost {
        state.resources.gold -= gold_cost as u32;
        for kind in UnitKind::ALL {
            let share = u64::from(state.recruit_distribution.share(kind));
            let recruited = (recruit_gain * share / 100) as u32;
            if recruited > 0 {
                state.player.reinforce(kind, recruited);
                log.push(LogEntry::new(
                    LogKind::Recruitment,
                    format!("Recruited {} {}.", recruited, kind.log_name()),
                ));
            }
        }
    } else {
        log.push(LogEntry::new(LogKind::Defeat, "Not enough gold to recruit new troops."));
    }

    if state.resources.fortification > 0 {
        if state.resources.gold >= config.fortification_upkeep {
            state.resources.gold -= config.fortification_upkeep;
            state.fatigue.sub(config.fortification_fatigue);
            log.push(LogEntry::new(
                LogKind::Event,
                "Fortifications maintained, reducing fatigue.",
            ));
        } else {
            state.fatigue.add(config.fortification_fatigue);
            log.push(LogEntry::new(
                LogKind::Defeat,
                "Failed to maintain fortifications, fatigue increases.",
            ));
        }
    }

    log
}

/// Popular support and unrest after a battle
///
/// Recruit points move by `trunc((enemy_losses − player_losses) / 10000 × 50)`
/// and never fall below the configured floor. Exhausted armies stir unrest
/// that drains gold.
pub fn battle_aftermath(
    state: &mut CampaignState,
    player_losses: u64,
    enemy_losses: u64,
    config: &CampaignConfig,
) -> Vec<LogEntry> {
    let mut log = Vec::new();

    let support_change = (enemy_losses as f64 - player_losses as f64) / 10000.0;
    let delta = (support_change * 50.0) as i64;
    let points = (i64::from(state.resources.recruit_points) + delta)
        .max(i64::from(config.min_recruit_points))
        .min(i64::from(u32::MAX));
    state.resources.recruit_points = points as u32;

    if support_change > 0.0 {
        log.push(LogEntry::new(
            LogKind::Victory,
            "Local population support increased! Recruit points grew.",
        ));
    } else {
        log.push(LogEntry::new(
            LogKind::Defeat,
            "Population fearful of losses, recruit points declined.",
        ));
    }

    if state.fatigue.get() > config.unrest_fatigue_threshold {
        state.resources.gold = state.resources.gold.saturating_sub(config.unrest_gold_cost);
        log.push(LogEntry::new(
            LogKind::Defeat,
            "High fatigue causing political unrest! Reduced resource gains.",
        ));
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::recruitment::RecruitDistribution;
    use crate::campaign::state::tests::test_state;
    use crate::core::types::UnitInterval;

    #[test]
    fn test_recruits_by_distribution() {
        let config = CampaignConfig::default();
        let mut state = test_state();

        let log = manage_resources(&mut state, &config);

        // 300 points -> 30 recruits -> 150 gold
        assert_eq!(state.resources.gold, 1850);
        assert_eq!(state.player.count(UnitKind::Infantry), 3012);
        assert_eq!(state.player.count(UnitKind::MechanizedInfantry), 1506);
        assert_eq!(state.player.count(UnitKind::Tank), 503);
        assert_eq!(state.player.count(UnitKind::Aircraft), 201);
        assert!(log.iter().all(|e| e.kind == LogKind::Recruitment));
    }

    #[test]
    fn test_insufficient_gold_is_a_noop() {
        let config = CampaignConfig::default();
        let mut state = test_state();
        state.resources.gold = 100;
        let before = state.player.clone();

        let log = manage_resources(&mut state, &config);

        assert_eq!(state.resources.gold, 100);
        assert_eq!(state.player, before);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].message, "Not enough gold to recruit new troops.");
    }

    #[test]
    fn test_custom_distribution() {
        let config = CampaignConfig::default();
        let mut state = test_state();
        state.recruit_distribution = RecruitDistribution::parse("0/0/0/0/0/0/100").unwrap();

        manage_resources(&mut state, &config);

        assert_eq!(state.player.count(UnitKind::Spies), 130);
        assert_eq!(state.player.count(UnitKind::Infantry), 3000);
    }

    #[test]
    fn test_fortification_upkeep() {
        let config = CampaignConfig::default();
        let mut state = test_state();
        state.resources.fortification = 1;
        state.resources.recruit_points = 0;
        state.fatigue = UnitInterval::new(0.2);

        manage_resources(&mut state, &config);
        assert_eq!(state.resources.gold, 1950);
        assert!((state.fatigue.get() - 0.15).abs() < 1e-6);

        state.resources.gold = 10;
        let log = manage_resources(&mut state, &config);
        assert_eq!(state.resources.gold, 10);
        assert!((state.fatigue.get() - 0.2).abs() < 1e-6);
        assert!(log.iter().any(|e| e.message.starts_with("Failed to maintain")));
    }

    #[test]
    fn test_aftermath_support_and_floor() {
        let config = CampaignConfig::default();
        let mut state = test_state();

        battle_aftermath(&mut state, 1000, 5000, &config);
        assert_eq!(state.resources.recruit_points, 320);

        battle_aftermath(&mut state, 1_000_000, 0, &config);
        assert_eq!(state.resources.recruit_points, 50);
    }

    #[test]
    fn test_aftermath_unrest() {
        let config = CampaignConfig::default();
        let mut state = test_state();
        state.fatigue = UnitInterval::new(0.9);
        state.resources.gold = 60;

        let log = battle_aftermath(&mut state, 0, 0, &config);

        assert_eq!(state.resources.gold, 0);
        assert_eq!(log.len(), 2);
    }
}
