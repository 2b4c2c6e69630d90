//! Uniform random draws.
//!
//! Every roll in the game is a uniform integer over an inclusive range or a
//! single probability check. The bounds live here so they are defined once.

use std::ops::RangeInclusive;

use rand::Rng;

/// Damage dealt by the player's attack.
pub const ATTACK_DAMAGE: RangeInclusive<u32> = 15..=39;
/// Health restored by the heal action.
pub const HEAL_AMOUNT: RangeInclusive<u32> = 10..=29;
/// Damage dealt by the enemy before the stance multiplier.
pub const ENEMY_DAMAGE: RangeInclusive<u32> = 10..=24;
/// Experience granted for a victory.
pub const VICTORY_EXPERIENCE: RangeInclusive<u32> = 25..=74;

/// Probability that fleeing succeeds.
pub const FLEE_CHANCE: f64 = 0.7;

/// Draw a uniform integer from an inclusive range.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, range: RangeInclusive<u32>) -> u32 {
    rng.random_range(range)
}

/// Return `true` with probability `p`. Values outside `0.0..=1.0` are clamped.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random_bool(p.clamp(0.0, 1.0))
}

/// Pick a uniform index below `len`. `len` must be non-zero.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    rng.random_range(0..len)
}
