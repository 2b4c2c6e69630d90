//! Host input translated into game commands.

use std::fmt;

use cs_core::{CharacterClass, Direction, Language};
use cs_mechanics::CombatAction;

use crate::screen::Screen;

/// A skill-bar slot usable while exploring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skill {
    /// Slot 1.
    Attack,
    /// Slot 2.
    Defend,
    /// Slot 3.
    Heal,
    /// Slot 4.
    Special,
}

impl Skill {
    /// The skill bound to a digit key (`1`-`4`).
    pub fn from_slot(slot: char) -> Option<Self> {
        match slot {
            '1' => Some(Self::Attack),
            '2' => Some(Self::Defend),
            '3' => Some(Self::Heal),
            '4' => Some(Self::Special),
            _ => None,
        }
    }

    /// Narration posted to chat when the skill is practised.
    pub fn message(self) -> &'static str {
        match self {
            Self::Attack => "You practice your combat stance!",
            Self::Defend => "You strengthen your defenses!",
            Self::Heal => "You meditate to restore energy!",
            Self::Special => "You channel ancient power!",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => write!(f, "attack"),
            Self::Defend => write!(f, "defend"),
            Self::Heal => write!(f, "heal"),
            Self::Special => write!(f, "special"),
        }
    }
}

/// Everything a host can ask the game to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the display language.
    SetLanguage(Language),
    /// Main menu: go to character creation.
    NewGame,
    /// Main menu: resume a restored character.
    Continue,
    /// Main menu: settings (not implemented yet).
    MenuSettings,
    /// Character creation: highlight a class.
    SelectClass(CharacterClass),
    /// Character creation: confirm with a name.
    CreateCharacter {
        /// Name as typed; surrounding whitespace is ignored.
        name: String,
    },
    /// World: take one step.
    Move(Direction),
    /// World: use a skill-bar slot.
    UseSkill(Skill),
    /// World: show or hide the inventory panel.
    ToggleInventory,
    /// World: hide the inventory panel.
    CloseInventory,
    /// World menu: quests.
    OpenQuests,
    /// World menu: map.
    OpenMap,
    /// World menu: settings.
    OpenSettings,
    /// Send a chat line.
    SendChat(String),
    /// Combat: act on the player's turn.
    Combat(CombatAction),
    /// Write the snapshot now.
    Save,
}

impl Command {
    /// Map a keyboard key (as reported by the browser, case-insensitive) to a
    /// command for the given screen.
    ///
    /// Movement keys are `w/a/s/d` and the arrow keys. Digits `1`-`4` use a
    /// skill in the world and pick an action during combat.
    pub fn from_key(key: &str, screen: Screen) -> Option<Self> {
        let key = key.to_lowercase();
        match screen {
            Screen::World => match key.as_str() {
                "w" | "arrowup" => Some(Self::Move(Direction::Up)),
                "s" | "arrowdown" => Some(Self::Move(Direction::Down)),
                "a" | "arrowleft" => Some(Self::Move(Direction::Left)),
                "d" | "arrowright" => Some(Self::Move(Direction::Right)),
                "i" => Some(Self::ToggleInventory),
                "escape" => Some(Self::CloseInventory),
                _ => single_char(&key)
                    .and_then(Skill::from_slot)
                    .map(Self::UseSkill),
            },
            Screen::Combat => match key.as_str() {
                "1" => Some(Self::Combat(CombatAction::Attack)),
                "2" => Some(Self::Combat(CombatAction::Defend)),
                "3" => Some(Self::Combat(CombatAction::Heal)),
                "4" => Some(Self::Combat(CombatAction::Flee)),
                _ => None,
            },
            _ => None,
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}
