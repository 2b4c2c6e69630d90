/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating player state or local storage.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Every inventory slot is already occupied.
    #[error("inventory is full ({0} slots)")]
    InventoryFull(usize),

    /// A language code was not recognised.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// A character class name was not recognised.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// A storage key cannot be mapped to a file name.
    #[error("invalid storage key: \"{0}\"")]
    InvalidKey(String),

    /// Reading or writing the backing store failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
