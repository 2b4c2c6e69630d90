//! Which screen the game is showing.

use std::fmt;

/// The visible screen. Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// Splash shown at start-up.
    #[default]
    Loading,
    /// New game / continue / settings.
    MainMenu,
    /// Name and class selection.
    CharacterCreation,
    /// Free movement and chat.
    World,
    /// An active combat session.
    Combat,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::MainMenu => write!(f, "main menu"),
            Self::CharacterCreation => write!(f, "character creation"),
            Self::World => write!(f, "world"),
            Self::Combat => write!(f, "combat"),
        }
    }
}
