//! Campaign layer: the per-turn simulation engine and its sub-models

pub mod battle;
pub mod enemy_ai;
pub mod environment;
pub mod espionage;
pub mod morale;
pub mod persistence;
pub mod recruitment;
pub mod resources;
pub mod roster;
pub mod scenario;
pub mod snapshot;
pub mod state;
pub mod tactics;
pub mod turn;

pub use battle::{BattleOutcome, BattlePowers, BattleResult};
pub use enemy_ai::{EnemyAiState, EnemyBehavior, OutcomeRecord, Personality};
pub use environment::{Environment, Terrain, TimeOfDay, Weather};
pub use persistence::{load_state, save_state, SavedCampaign};
pub use recruitment::RecruitDistribution;
pub use roster::{Capabilities, Roster, UnitKind, UnitProfile, UnitType};
pub use scenario::{new_campaign, new_campaign_with_config, ForceSpec, ScenarioParams};
pub use snapshot::{history_to_json, LogEntry, LogKind, TurnSnapshot};
pub use state::{CampaignState, Resources};
pub use turn::{is_terminal, run_turn, run_turn_with_config, Campaign};
