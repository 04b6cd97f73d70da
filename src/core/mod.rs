pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, CampaignConfig, MAX_AI_MEMORY_LEN};
pub use error::{CampaignError, Result};
pub use types::{Outcome, UnitInterval};
