//! Core types for Celestial Sword: player state, inventory, enemies, and storage.
//!
//! This crate holds the data model shared by the game and the website. It has
//! no notion of screens or timers; those live in `cs-game` and `cs-web`.

/// The fixed pool of enemies that random encounters draw from.
pub mod enemy;
/// Error types used throughout the crate.
pub mod error;
/// The ordered, fixed-capacity item list.
pub mod inventory;
/// Display language preference.
pub mod language;
/// Chat and notification message log.
pub mod message;
/// Player attributes, class, and position.
pub mod player;
/// The persisted snapshot of a game in progress.
pub mod save;
/// Key-value stores standing in for browser local/session storage.
pub mod store;

/// Re-export enemy types.
pub use enemy::{ENEMY_POOL, Enemy};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export inventory types.
pub use inventory::{INVENTORY_CAPACITY, Inventory};
/// Re-export the language preference.
pub use language::Language;
/// Re-export message log types.
pub use message::{Message, MessageKind, MessageLog};
/// Re-export player types.
pub use player::{CharacterClass, Direction, PlayerState, Position};
/// Re-export snapshot types.
pub use save::{SAVE_KEY, Snapshot};
/// Re-export storage types.
pub use store::{FileStore, KeyValueStore, MemoryStore};
