//! Game mechanics for Celestial Sword.
//!
//! Provides uniform random draws with fixed bounds, the turn-based combat
//! state machine, and a logical-clock scheduler for deferred effects such as
//! the enemy's reply and the result screen.

pub mod combat;
pub mod dice;
pub mod schedule;

pub use combat::{
    Combat, CombatAction, CombatCommand, CombatEvent, CombatOutcome, CombatPhase, CombatStep,
    Deferred, Stance, reduce,
};
pub use schedule::{Scheduler, TaskId};
