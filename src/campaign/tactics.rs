//! Tactics advisor
//!
//! Sun Tzu maneuvers that nudge enemy morale and strength without a full
//! battle, plus advisory recommendations for the commander. Nothing here
//! touches the campaign state; callers apply the returned values.

use rand::Rng;

use crate::campaign::enemy_ai::EnemyBehavior;
use crate::campaign::environment::{Environment, Terrain, TimeOfDay, Weather};
use crate::core::types::UnitInterval;

/// What the advisor sees when asked for recommendations
#[derive(Debug, Clone, Copy)]
pub struct TacticalPicture<'a> {
    pub morale: UnitInterval,
    pub player_forces: u64,
    pub enemy_forces: u64,
    pub environment: Environment,
    /// Most recent narrative lines, oldest first
    pub recent_log: &'a [String],
}

/// Maneuvers executed this turn and their effect on the enemy
#[derive(Debug, Clone, PartialEq)]
pub struct ManeuverOutcome {
    pub actions: Vec<String>,
    pub enemy_morale: UnitInterval,
    pub enemy_forces: u64,
}

/// Force-ratio response, terrain doctrine and strategic advice
pub fn recommend(picture: &TacticalPicture<'_>, rng: &mut impl Rng) -> Vec<String> {
    let mut recommendations = vec![
        force_ratio_response(picture.player_forces, picture.enemy_forces).to_string(),
        format!(
            "Terrain '{}': {}",
            picture.environment.terrain.name(),
            picture.environment.terrain.doctrine()
        ),
    ];
    recommendations.extend(strategic_recommendations(picture, rng));
    recommendations
}

/// Threshold and rhythm based maneuvers
///
/// - every 3rd turn, a confident enemy (morale > 0.7) is distracted (−0.1)
/// - a demoralised, outnumbered enemy (< 0.4, player > 1.2×) is given a
///   retreat route (+0.05) so it does not fight to the death
/// - every 4th turn, a stronger enemy loses 5% to raids on its supply lines
/// - every 5th turn, a stronger and steady enemy is lured into an ambush that
///   costs it 10% on a coin flip
pub fn advanced_tactics(
    turn: u32,
    enemy_morale: UnitInterval,
    enemy_forces: u64,
    player_forces: u64,
    rng: &mut impl Rng,
) -> ManeuverOutcome {
    let mut actions = Vec::new();
    let mut morale = enemy_morale;
    let mut forces = enemy_forces;

    if morale.get() > 0.7 && turn % 3 == 0 {
        actions.push("Distract enemy before battle to reduce focus.".to_string());
        morale.sub(0.1);
    }

    if player_forces as f64 > forces as f64 * 1.2 && morale.get() < 0.4 {
        actions.push("Allow enemy a retreat route to avoid desperate combat.".to_string());
        morale.add(0.05);
    }

    if forces > player_forces && turn % 4 == 0 {
        actions.push("Target enemy supply lines to weaken them.".to_string());
        forces -= (forces as f64 * 0.05) as u64;
    }

    if forces > player_forces && morale.get() > 0.5 && turn % 5 == 0 {
        actions.push("Feign a retreat to lure enemy into an ambush.".to_string());
        if rng.gen::<f32>() > 0.5 {
            actions.push("Ambush successful! Enemy suffers heavy losses.".to_string());
            forces -= (forces as f64 * 0.1) as u64;
        } else {
            actions.push("Ambush failed, troops confused.".to_string());
        }
    }

    ManeuverOutcome {
        actions,
        enemy_morale: morale,
        enemy_forces: forces,
    }
}

/// Response to the current force ratio (player / enemy)
pub fn force_ratio_response(player_forces: u64, enemy_forces: u64) -> &'static str {
    if enemy_forces == 0 {
        return "Encircle enemy.";
    }
    let ratio = player_forces as f64 / enemy_forces as f64;

    if ratio >= 10.0 {
        "Encircle enemy."
    } else if ratio >= 5.0 {
        "Attack."
    } else if ratio >= 2.0 {
        "Split army: attack + diversion."
    } else if player_forces == enemy_forces {
        "Offer battle."
    } else if (0.8..1.0).contains(&ratio) {
        "Avoid enemy."
    } else if ratio < 0.8 {
        "Flee."
    } else {
        "Concentrate forces and request reinforcements."
    }
}

/// Chess-style strategic advice
///
/// Advice already present in the recent log is not repeated.
pub fn strategic_recommendations(picture: &TacticalPicture<'_>, rng: &mut impl Rng) -> Vec<String> {
    let env = picture.environment;
    let morale = picture.morale.get();
    let superior = picture.player_forces > picture.enemy_forces;
    let mut recommendations: Vec<&'static str> = Vec::new();

    // Control the center
    if matches!(env.terrain, Terrain::Accessible | Terrain::Open) && superior {
        recommendations.push(
            "Concentrate your forces in central or open areas to dominate the battlefield and control the terrain.",
        );
    }
    // Mobility
    if !env.weather.is_obscuring() && morale > 0.6 {
        recommendations.push(
            "Use mobility to maneuver swiftly and surprise the enemy where they are weakest.",
        );
    }
    // Defend weaknesses
    if morale < 0.4 || picture.player_forces < picture.enemy_forces {
        recommendations.push(
            "Protect vulnerable units, avoid direct confrontation, fortify positions, or prepare a strategic retreat.",
        );
    }
    // Sacrifice for advantage
    if rng.gen::<f32>() < 0.2 || (morale > 0.5 && env.terrain == Terrain::Contentious) {
        recommendations.push(
            "Feign a retreat or sacrifice a small force to lure the enemy into a trap and shift the balance of power.",
        );
    }
    // Coordinated threats
    if superior && rng.gen::<f32>() < 0.5 {
        recommendations.push(
            "Launch coordinated attacks on enemy weaknesses, focusing units for a decisive breakthrough.",
        );
    }
    // King safety
    if env.time_of_day == TimeOfDay::Night || env.weather == Weather::Foggy {
        recommendations.push(
            "Ensure the safety of your headquarters/command, and avoid surprise attacks at night or in poor weather.",
        );
    }
    // Deception
    if rng.gen::<f32>() < 0.3 {
        recommendations
            .push("Employ misinformation, concealment, and varied movement to confuse the opponent.");
    }

    recommendations
        .into_iter()
        .filter(|rec| !picture.recent_log.iter().any(|line| line.contains(rec)))
        .map(str::to_string)
        .collect()
}

/// Counter-posture once the enemy's behaviour is known
pub fn enemy_posture_response(behavior: &EnemyBehavior, enemy_superior: bool) -> Vec<String> {
    let mut actions = Vec::new();
    if behavior.confidence {
        actions.push("Prepare defense (enemy confident).".to_string());
    }
    if enemy_superior {
        actions.push("Avoid frontal combat (enemy stronger).".to_string());
    }
    if actions.is_empty() {
        actions.push("Execute feints and mixed tactics.".to_string());
    }
    actions
}
