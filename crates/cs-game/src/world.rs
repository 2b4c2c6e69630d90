//! Exploration: movement, the skill bar, and random encounters.
//!
//! Encounters have two independent triggers. Every accepted move rolls
//! [`GameConfig::move_encounter_chance`](crate::GameConfig), and a periodic
//! check rolls [`GameConfig::idle_encounter_chance`](crate::GameConfig)
//! while the player stands in the world outside combat.

use cs_core::{Direction, Position, enemy};
use cs_mechanics::{CombatCommand, dice};

use crate::command::Skill;
use crate::game::Game;
use crate::screen::Screen;

impl Game {
    /// Take one step. Ignored outside the world screen or during combat.
    /// Returns the new position when the move was accepted.
    pub(crate) fn move_player(&mut self, direction: Direction) -> Option<Position> {
        if self.screen != Screen::World || self.combat.is_active() {
            tracing::debug!(%direction, "move ignored");
            return None;
        }
        let position = self.player.step(direction, self.config.move_step);
        if dice::chance(&mut self.rng, self.config.move_encounter_chance) {
            self.trigger_encounter();
        }
        Some(position)
    }

    pub(crate) fn idle_encounter_check(&mut self) {
        if self.screen != Screen::World || self.combat.is_active() {
            return;
        }
        if dice::chance(&mut self.rng, self.config.idle_encounter_chance) {
            self.trigger_encounter();
        }
    }

    /// Start combat against a random enemy from the pool.
    pub(crate) fn trigger_encounter(&mut self) {
        if self.combat.is_active() {
            return;
        }
        let index = dice::pick_index(&mut self.rng, enemy::ENEMY_POOL.len());
        self.run_combat(CombatCommand::Start(enemy::spawn(index)));
    }

    pub(crate) fn use_skill(&mut self, skill: Skill) {
        if self.screen != Screen::World || self.combat.is_active() {
            return;
        }
        self.post_system(skill.message());
    }
}
