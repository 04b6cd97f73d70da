use thiserror::Error;

use crate::core::types::Outcome;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Campaign already ended: {0:?}")]
    CampaignOver(Outcome),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl CampaignError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidScenario(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CampaignError>;
