use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Invalid reward choice {index}: only {available} choices are pending")]
    InvalidRewardChoice { index: usize, available: usize },

    #[error("Reward choice {index} ({kind} {id}) is not recognised by this build")]
    UnrecognizedRewardChoice { index: usize, kind: String, id: String },

    #[error("No reward choice is pending for character {0:?}")]
    NoPendingChoice(crate::core::types::CharacterId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
