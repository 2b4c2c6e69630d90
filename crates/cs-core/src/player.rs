use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The three playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    /// Melee fighter.
    #[default]
    Warrior,
    /// Spellcaster.
    Mage,
    /// Ranged fighter.
    Archer,
}

impl CharacterClass {
    /// All classes in selection order.
    pub const ALL: [CharacterClass; 3] = [Self::Warrior, Self::Mage, Self::Archer];

    /// The avatar icon shown for this class.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Warrior => "⚔️",
            Self::Mage => "🔮",
            Self::Archer => "🏹",
        }
    }

    /// Items a freshly created character of this class starts with.
    pub fn starting_items(self) -> &'static [&'static str] {
        match self {
            Self::Warrior => &["⚔️", "🛡️", "🍖"],
            Self::Mage => &["🔮", "📜", "🧪"],
            Self::Archer => &["🏹", "🎯", "🍖"],
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warrior => write!(f, "warrior"),
            Self::Mage => write!(f, "mage"),
            Self::Archer => write!(f, "archer"),
        }
    }
}

impl FromStr for CharacterClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warrior" => Ok(Self::Warrior),
            "mage" => Ok(Self::Mage),
            "archer" => Ok(Self::Archer),
            other => Err(CoreError::UnknownClass(other.to_string())),
        }
    }
}

/// One of the four cardinal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Direction {
    /// Unit offset `(dx, dy)` for this direction, screen coordinates.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Integer offset of the player from the world origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset (positive is down).
    pub y: i32,
}

/// The player's attributes.
///
/// Health and mana are kept within `0..=max` by every mutating method; the
/// fields are public for rendering and persistence, so code that writes them
/// directly is responsible for the same bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Character name. Empty until a character has been created.
    pub name: String,
    /// Chosen class.
    pub class: CharacterClass,
    /// Character level, starting at 1.
    pub level: u32,
    /// Current health.
    pub health: u32,
    /// Health ceiling.
    pub max_health: u32,
    /// Current mana.
    pub mana: u32,
    /// Mana ceiling.
    pub max_mana: u32,
    /// Accumulated experience points.
    pub experience: u32,
    /// Offset from the world origin.
    pub position: Position,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            name: String::new(),
            class: CharacterClass::Warrior,
            level: 1,
            health: 100,
            max_health: 100,
            mana: 50,
            max_mana: 50,
            experience: 0,
            position: Position::default(),
        }
    }
}

impl PlayerState {
    /// Create a player with default attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a character has been created (a name is set).
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Pull health and mana back within `0..=max`. Used after loading
    /// attributes from outside the game.
    pub fn clamp_to_bounds(&mut self) {
        self.health = self.health.min(self.max_health);
        self.mana = self.mana.min(self.max_mana);
    }

    /// Subtract damage from health, stopping at zero. Returns the new health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Add health up to the maximum. Returns the new health.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health
    }

    /// Restore health to the maximum.
    pub fn restore_health(&mut self) {
        self.health = self.max_health;
    }

    /// Spend mana if at least `cost` is available. Returns whether it was spent.
    pub fn spend_mana(&mut self, cost: u32) -> bool {
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    /// Whether health has dropped to zero.
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Add experience points.
    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Move `distance` units in `direction`. Returns the new position.
    pub fn step(&mut self, direction: Direction, distance: i32) -> Position {
        let (dx, dy) = direction.offset();
        self.position.x = self.position.x.saturating_add(dx * distance);
        self.position.y = self.position.y.saturating_add(dy * distance);
        self.position
    }
}
