//! Character creation: class selection and the starting kit.

use cs_core::{CharacterClass, PlayerState};

use crate::error::{GameError, GameResult};
use crate::game::Game;
use crate::screen::Screen;

impl Game {
    /// The class highlighted on the creation screen.
    pub fn selected_class(&self) -> CharacterClass {
        self.selected_class
    }

    /// Avatar shown in the creation preview.
    pub fn preview_icon(&self) -> &'static str {
        self.selected_class.icon()
    }

    pub(crate) fn select_class(&mut self, class: CharacterClass) {
        if self.screen == Screen::CharacterCreation {
            self.selected_class = class;
        }
    }

    /// Create the character and enter the world. A blank name is rejected
    /// and leaves the creation screen as it was.
    pub(crate) fn create_character(&mut self, name: &str) -> GameResult<()> {
        if self.screen != Screen::CharacterCreation {
            tracing::debug!(screen = %self.screen, "create ignored outside character creation");
            return Ok(());
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::Validation("Please enter a name!".to_string()));
        }

        let class = self.selected_class;
        self.player = PlayerState {
            name: name.to_string(),
            class,
            ..PlayerState::default()
        };
        self.inventory.reset_to(class.starting_items());
        self.inventory_open = false;
        self.screen = Screen::World;
        tracing::info!(player = name, %class, "character created");
        Ok(())
    }
}
