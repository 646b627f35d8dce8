use std::io;

use cardsync_core::ResolutionStrategy;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] cardsync_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Card ID cannot be empty")]
    EmptyCardId,
    #[error("Pending change not found: {0}")]
    QueueChangeNotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "No strategy selected. Recommended: {0}. Pass `--strategy {0}` or `--accept-recommended` to resolve."
    )]
    StrategyRequired(ResolutionStrategy),
    #[error("No device id configured. Run `cardsync config init --device-id <ID>`.")]
    DeviceNotConfigured,
}
