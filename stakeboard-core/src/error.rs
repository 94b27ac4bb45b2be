use thiserror::Error;

pub type Result<T> = std::result::Result<T, StakeboardError>;

#[derive(Error, Debug)]
pub enum StakeboardError {
    #[error("Invalid stake: {0}")]
    InvalidStake(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Stacks API error: {0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StakeboardError {
    pub fn invalid_stake(msg: impl Into<String>) -> Self {
        Self::InvalidStake(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
