use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Player not found: {0}")]
    PlayerNotFound(crate::core::types::PlayerId),

    #[error("Unit not found: {0}")]
    UnitNotFound(crate::core::types::UnitId),

    #[error("Territory not found: {0}")]
    TerritoryNotFound(crate::core::types::TerritoryId),

    #[error("Mission not found: {0}")]
    MissionNotFound(crate::core::types::MissionId),

    #[error("Action rejected: {0}")]
    ActionRejected(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
