//! Error types for the quest engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: i64, available: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuestError>;
