//! Environment cycle for the campaign
//!
//! Terrain, weather and time of day change on a fixed rhythm with some
//! randomness. Night tires the army, rain grounds aircraft and bogs down
//! artillery, and rough terrain slows heavy units in battle.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::campaign::roster::UnitKind;
use crate::campaign::state::CampaignState;
use crate::core::config::CampaignConfig;

/// Ground the armies fight over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terrain {
    Accessible,
    Entangling,
    Temporizing,
    Contentious,
    HemmedIn,
    Desperate,
    Difficult,
    Open,
    Urban,
    Mountain,
    Forest,
}

impl Terrain {
    pub const ALL: [Terrain; 11] = [
        Terrain::Accessible,
        Terrain::Entangling,
        Terrain::Temporizing,
        Terrain::Contentious,
        Terrain::HemmedIn,
        Terrain::Desperate,
        Terrain::Difficult,
        Terrain::Open,
        Terrain::Urban,
        Terrain::Mountain,
        Terrain::Forest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Accessible => "accessible",
            Self::Entangling => "entangling",
            Self::Temporizing => "temporizing",
            Self::Contentious => "contentious",
            Self::HemmedIn => "hemmed-in",
            Self::Desperate => "desperate",
            Self::Difficult => "difficult",
            Self::Open => "open",
            Self::Urban => "urban",
            Self::Mountain => "mountain",
            Self::Forest => "forest",
        }
    }

    /// Ground where mechanized, tank and artillery units lose power
    pub fn hampers_heavy_units(&self) -> bool {
        matches!(self, Self::Difficult | Self::Entangling | Self::HemmedIn)
    }

    /// Classical doctrine for fighting on this ground
    pub fn doctrine(&self) -> &'static str {
        match self {
            Self::Accessible => "Occupy heights before enemy, protect supply.",
            Self::Entangling => "Exit if enemy caught off guard.",
            Self::Temporizing => "Do not camp, feign retreat.",
            Self::Contentious => "Attack if first possession, defend actively, use tricks.",
            Self::HemmedIn => "Use stratagems, block exits, force fight to death.",
            Self::Desperate => "Fight without hesitation, show desperation.",
            Self::Difficult => "No camping, rapid movement.",
            Self::Open => "Ally, maintain goodwill of neighbors.",
            Self::Urban => "Clear street by street, secure supply depots.",
            Self::Mountain => "Hold the passes, keep to the high ground.",
            Self::Forest => "Beware ambush, move in close order.",
        }
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::Open
    }
}

/// Current weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weather {
    Clear,
    Rainy,
    Foggy,
    Windy,
    Stormy,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Rainy,
        Weather::Foggy,
        Weather::Windy,
        Weather::Stormy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rainy => "rainy",
            Self::Foggy => "foggy",
            Self::Windy => "windy",
            Self::Stormy => "stormy",
        }
    }

    /// Morale penalty for fighting in this weather
    pub fn morale_penalty(&self) -> f32 {
        match self {
            Self::Stormy | Self::Foggy => -0.1,
            Self::Clear | Self::Rainy | Self::Windy => 0.0,
        }
    }

    /// Weather that hides movement and grounds maneuver
    pub fn is_obscuring(&self) -> bool {
        matches!(self, Self::Stormy | Self::Foggy)
    }
}

impl Default for Weather {
    fn default() -> Self {
        Self::Clear
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::Day
    }
}

/// Terrain, weather and time of day of the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Environment {
    pub terrain: Terrain,
    pub weather: Weather,
    pub time_of_day: TimeOfDay,
}

impl Environment {
    pub fn new(terrain: Terrain, weather: Weather, time_of_day: TimeOfDay) -> Self {
        Self {
            terrain,
            weather,
            time_of_day,
        }
    }

    /// Roll a random starting environment
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            terrain: Terrain::ALL[rng.gen_range(0..Terrain::ALL.len())],
            weather: Weather::ALL[rng.gen_range(0..Weather::ALL.len())],
            time_of_day: if rng.gen_bool(0.5) {
                TimeOfDay::Day
            } else {
                TimeOfDay::Night
            },
        }
    }
}

/// Environment transitions for the campaign log
#[derive(Debug, Clone, PartialEq)]
pub enum EnvironmentEvent {
    WeatherChanged { old: Weather, new: Weather },
    TimeChanged { old: TimeOfDay, new: TimeOfDay },
    TerrainChanged { old: Terrain, new: Terrain },
}

impl EnvironmentEvent {
    pub fn describe(&self) -> String {
        match self {
            Self::WeatherChanged { old, new } => {
                format!("Weather turns from {} to {}.", old.name(), new.name())
            }
            Self::TimeChanged { new, .. } => format!("The armies now fight by {}.", new.name()),
            Self::TerrainChanged { old, new } => {
                format!("Campaign moves from {} to {} terrain.", old.name(), new.name())
            }
        }
    }
}

/// Advance the environment for `turn`
///
/// Weather re-rolls every `weather_period` turns, day and night alternate
/// every `day_night_period` turns, and terrain changes with
/// `terrain_change_chance`. A re-roll may land on the same value, which is
/// not reported.
pub fn advance_cycle(
    env: &mut Environment,
    turn: u32,
    config: &CampaignConfig,
    rng: &mut impl Rng,
) -> Vec<EnvironmentEvent> {
    let mut events = Vec::new();

    if turn % config.weather_period == 0 {
        let new = Weather::ALL[rng.gen_range(0..Weather::ALL.len())];
        if new != env.weather {
            events.push(EnvironmentEvent::WeatherChanged {
                old: env.weather,
                new,
            });
            env.weather = new;
        }
    }

    if turn % config.day_night_period == 0 {
        let new = env.time_of_day.flipped();
        events.push(EnvironmentEvent::TimeChanged {
            old: env.time_of_day,
            new,
        });
        env.time_of_day = new;
    }

    if rng.gen::<f32>() < config.terrain_change_chance {
        let new = Terrain::ALL[rng.gen_range(0..Terrain::ALL.len())];
        if new != env.terrain {
            events.push(EnvironmentEvent::TerrainChanged {
                old: env.terrain,
                new,
            });
            env.terrain = new;
        }
    }

    events
}

/// Apply the current environment to the armies
///
/// Night adds fatigue; rain depletes artillery and aircraft on both sides by
/// fixed amounts (floored at zero); wind is reported only.
pub fn apply_environment_effects(state: &mut CampaignState, config: &CampaignConfig) -> Vec<String> {
    let mut effects = Vec::new();

    if state.environment.time_of_day == TimeOfDay::Night {
        effects.push("Combat effectiveness reduced due to night time.".to_string());
        state.fatigue.add(config.night_fatigue);
    }

    match state.environment.weather {
        Weather::Rainy => {
            effects.push("Rain reduces artillery and aircraft effectiveness.".to_string());
            state
                .player
                .deplete(UnitKind::Artillery, config.rain_player_artillery_loss);
            state
                .enemy
                .deplete(UnitKind::Artillery, config.rain_enemy_artillery_loss);
            state
                .player
                .deplete(UnitKind::Aircraft, config.rain_player_aircraft_loss);
            state
                .enemy
                .deplete(UnitKind::Aircraft, config.rain_enemy_aircraft_loss);
        }
        Weather::Windy => {
            effects.push("Wind affects projectile weapons unpredictably.".to_string());
        }
        Weather::Clear | Weather::Foggy | Weather::Stormy => {}
    }

    effects
}
