//! Error types for cardsync-core

use thiserror::Error;

/// Result type alias using cardsync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cardsync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown card variant
    #[error("Invalid card variant: {0}")]
    InvalidVariant(String),

    /// Unknown pending change action
    #[error("Invalid change action: {0}")]
    InvalidAction(String),

    /// Unknown resolution strategy
    #[error("Invalid resolution strategy: {0}")]
    InvalidStrategy(String),

    /// Two rows with the same card key in one snapshot
    #[error("Duplicate card in snapshot: {card_id} ({variant})")]
    DuplicateCard { card_id: String, variant: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
