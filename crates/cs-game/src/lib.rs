//! The Celestial Sword RPG as a headless, clock-driven session.
//!
//! [`Game`] owns the player, inventory, combat slot, chat, and a logical
//! scheduler. Hosts translate input into [`Command`]s, call
//! [`Game::dispatch`], advance the clock with [`Game::advance`], and render
//! from the accessors. Nothing here touches a screen or a real timer.

pub mod chat;
pub mod command;
pub mod config;
pub mod creation;
pub mod error;
pub mod game;
pub mod screen;
pub mod world;

pub use command::{Command, Skill};
pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use game::{Game, GameTask};
pub use screen::Screen;
