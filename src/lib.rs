//! Sun Tzu Campaign - Deterministic turn-based military campaign simulator

pub mod campaign;
pub mod core;

pub use crate::campaign::{
    is_terminal, load_state, new_campaign, run_turn, save_state, Campaign, CampaignState,
    ScenarioParams, TurnSnapshot,
};
pub use crate::core::{CampaignError, Outcome, Result};
