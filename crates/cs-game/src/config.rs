//! Configuration for a game session.

/// Timings, probabilities, and the RNG seed for a [`crate::Game`].
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible rolls.
    pub seed: u64,
    /// How long the loading screen stays up.
    pub loading_ms: u64,
    /// Interval between automatic saves.
    pub autosave_interval_ms: u64,
    /// Interval between idle encounter checks.
    pub encounter_interval_ms: u64,
    /// Chance of an encounter per accepted move.
    pub move_encounter_chance: f64,
    /// Chance of an encounter per idle check.
    pub idle_encounter_chance: f64,
    /// Distance covered by one move.
    pub move_step: i32,
    /// Delay before a bot answers a chat line.
    pub bot_reply_delay_ms: u64,
    /// Lines kept in the chat and combat logs (0 = unlimited).
    pub max_log_lines: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            loading_ms: 3000,
            autosave_interval_ms: 30_000,
            encounter_interval_ms: 5000,
            move_encounter_chance: 0.05,
            idle_encounter_chance: 0.02,
            move_step: 20,
            bot_reply_delay_ms: 1000,
            max_log_lines: 200,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set both encounter probabilities (each clamped to 0.0-1.0).
    pub fn with_encounter_chances(mut self, per_move: f64, per_check: f64) -> Self {
        self.move_encounter_chance = per_move.clamp(0.0, 1.0);
        self.idle_encounter_chance = per_check.clamp(0.0, 1.0);
        self
    }

    /// Disable random encounters on both paths.
    pub fn without_encounters(self) -> Self {
        self.with_encounter_chances(0.0, 0.0)
    }

    /// Set the autosave interval.
    pub fn with_autosave_interval(mut self, ms: u64) -> Self {
        self.autosave_interval_ms = ms;
        self
    }

    /// Set the idle encounter check interval.
    pub fn with_encounter_interval(mut self, ms: u64) -> Self {
        self.encounter_interval_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.autosave_interval_ms, 30_000);
        assert_eq!(cfg.encounter_interval_ms, 5000);
        assert!((cfg.move_encounter_chance - 0.05).abs() < f64::EPSILON);
        assert!((cfg.idle_encounter_chance - 0.02).abs() < f64::EPSILON);
        assert_eq!(cfg.move_step, 20);
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default()
            .with_seed(7)
            .with_autosave_interval(1000)
            .with_encounter_interval(250);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.autosave_interval_ms, 1000);
        assert_eq!(cfg.encounter_interval_ms, 250);
    }

    #[test]
    fn chances_clamped() {
        let cfg = GameConfig::default().with_encounter_chances(2.0, -1.0);
        assert!((cfg.move_encounter_chance - 1.0).abs() < f64::EPSILON);
        assert!(cfg.idle_encounter_chance.abs() < f64::EPSILON);
        let cfg = GameConfig::default().without_encounters();
        assert!(cfg.move_encounter_chance.abs() < f64::EPSILON);
    }
}
