//! Error types for the game session.

use thiserror::Error;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors surfaced to the player.
#[derive(Debug, Error)]
pub enum GameError {
    /// Input failed a local rule; the host keeps the input for correction.
    #[error("{0}")]
    Validation(String),

    /// Saving or reading local storage failed.
    #[error("{0}")]
    Storage(#[from] cs_core::CoreError),
}
