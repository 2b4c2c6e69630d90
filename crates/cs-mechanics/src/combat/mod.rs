//! Turn-based combat state machine.
//!
//! A session pairs the player with one enemy. The player acts, then the
//! enemy replies after a delay, until one side falls or the player flees.
//! Delays are not handled here: each step reports the follow-up effect and
//! its delay, and the host feeds it back through [`reduce`] when it is due.

pub mod action;

pub use action::{CombatAction, CombatEvent, CombatStep, Deferred, Stance};

use std::fmt;

use rand::Rng;

use cs_core::{Enemy, PlayerState};

use crate::dice::{self, ATTACK_DAMAGE, ENEMY_DAMAGE, FLEE_CHANCE, HEAL_AMOUNT, VICTORY_EXPERIENCE};

/// Mana spent by one heal.
pub const HEAL_MANA_COST: u32 = 10;
/// Delay before the enemy replies.
pub const ENEMY_TURN_DELAY_MS: u64 = 1000;
/// How long the victory or defeat screen stays up.
pub const RESULT_DELAY_MS: u64 = 2000;
/// How long the flee screen stays up.
pub const FLEE_DELAY_MS: u64 = 1000;

/// How a combat session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatOutcome {
    /// The enemy was beaten.
    Victory,
    /// The player was beaten.
    Defeat,
    /// The player escaped.
    Fled,
}

impl fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory => write!(f, "victory"),
            Self::Defeat => write!(f, "defeat"),
            Self::Fled => write!(f, "fled"),
        }
    }
}

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CombatPhase {
    /// No session.
    #[default]
    Idle,
    /// Waiting for the player's action.
    PlayerTurn,
    /// The enemy's reply is pending.
    ResolvingEnemyTurn(Stance),
    /// The session is over; waiting to return to the world.
    Ended(CombatOutcome),
}

/// An input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatCommand {
    /// Begin a session against this enemy.
    Start(Enemy),
    /// The player acts.
    Act(CombatAction),
    /// A previously reported deferred effect is due.
    Resolve(Deferred),
}

/// The single combat session slot.
#[derive(Debug, Clone, Default)]
pub struct Combat {
    phase: CombatPhase,
    enemy: Option<Enemy>,
    round: u32,
}

impl Combat {
    /// Create an idle combat slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    /// The enemy of the active session.
    pub fn enemy(&self) -> Option<&Enemy> {
        self.enemy.as_ref()
    }

    /// Whether a session exists, including one showing its result.
    pub fn is_active(&self) -> bool {
        self.phase != CombatPhase::Idle
    }

    /// Whether the machine is waiting for a player action.
    pub fn is_players_turn(&self) -> bool {
        self.phase == CombatPhase::PlayerTurn
    }

    /// Player turns taken in the current session.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Begin a session. Ignored while another session exists.
    pub fn start(&mut self, enemy: Enemy) -> CombatStep {
        if self.is_active() {
            tracing::debug!(enemy = %enemy.name, "encounter ignored, already in combat");
            return CombatStep::ignored();
        }
        tracing::info!(enemy = %enemy.name, health = enemy.health, "combat started");
        let event = CombatEvent::Appeared {
            enemy: enemy.name.clone(),
        };
        self.enemy = Some(enemy);
        self.phase = CombatPhase::PlayerTurn;
        self.round = 0;
        CombatStep::default().event(event)
    }

    /// Apply a player action, drawing rolls from `rng`.
    pub fn act<R: Rng + ?Sized>(
        &mut self,
        player: &mut PlayerState,
        action: CombatAction,
        rng: &mut R,
    ) -> CombatStep {
        if !self.is_players_turn() {
            tracing::debug!(%action, phase = ?self.phase, "action ignored outside the player's turn");
            return CombatStep::ignored();
        }
        match action {
            CombatAction::Attack => {
                let damage = dice::roll(rng, ATTACK_DAMAGE);
                let step = self.strike(damage);
                if self.phase == CombatPhase::Ended(CombatOutcome::Victory) {
                    let experience = dice::roll(rng, VICTORY_EXPERIENCE);
                    self.win(player, experience, step)
                } else {
                    step
                }
            }
            CombatAction::Defend => {
                self.round += 1;
                self.await_enemy(Stance::Guarded)
                    .event(CombatEvent::Guarded)
                    .then(Deferred::EnemyTurn, ENEMY_TURN_DELAY_MS)
            }
            CombatAction::Heal => {
                if !player.spend_mana(HEAL_MANA_COST) {
                    return CombatStep::default().event(CombatEvent::NotEnoughMana);
                }
                let amount = dice::roll(rng, HEAL_AMOUNT);
                self.mend(player, amount)
            }
            CombatAction::Flee => {
                let escaped = dice::chance(rng, FLEE_CHANCE);
                self.flee(escaped)
            }
        }
    }

    /// Apply a due deferred effect.
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        player: &mut PlayerState,
        deferred: Deferred,
        rng: &mut R,
    ) -> CombatStep {
        match (deferred, self.phase) {
            (Deferred::EnemyTurn, CombatPhase::ResolvingEnemyTurn(stance)) => {
                let raw = dice::roll(rng, ENEMY_DAMAGE);
                self.enemy_strike(player, stance.apply(raw))
            }
            (Deferred::ReturnToWorld, CombatPhase::Ended(outcome)) => {
                self.close(player, outcome)
            }
            _ => {
                tracing::debug!(?deferred, phase = ?self.phase, "stale deferred effect ignored");
                CombatStep::ignored()
            }
        }
    }

    fn await_enemy(&mut self, stance: Stance) -> CombatStep {
        self.phase = CombatPhase::ResolvingEnemyTurn(stance);
        CombatStep::default()
    }

    fn strike(&mut self, damage: u32) -> CombatStep {
        self.round += 1;
        let Some(enemy) = self.enemy.as_mut() else {
            return CombatStep::ignored();
        };
        enemy.take_damage(damage);
        let step = CombatStep::default().event(CombatEvent::PlayerHit { damage });
        if enemy.is_defeated() {
            self.phase = CombatPhase::Ended(CombatOutcome::Victory);
            step
        } else {
            self.phase = CombatPhase::ResolvingEnemyTurn(Stance::Normal);
            step.then(Deferred::EnemyTurn, ENEMY_TURN_DELAY_MS)
        }
    }

    fn win(&mut self, player: &mut PlayerState, experience: u32, step: CombatStep) -> CombatStep {
        player.gain_experience(experience);
        tracing::info!(experience, "combat won");
        step.event(CombatEvent::Victory { experience })
            .then(Deferred::ReturnToWorld, RESULT_DELAY_MS)
    }

    /// Mana has already been paid.
    fn mend(&mut self, player: &mut PlayerState, amount: u32) -> CombatStep {
        player.heal(amount);
        self.round += 1;
        self.await_enemy(Stance::Normal)
            .event(CombatEvent::Healed { amount })
            .then(Deferred::EnemyTurn, ENEMY_TURN_DELAY_MS)
    }

    fn flee(&mut self, escaped: bool) -> CombatStep {
        self.round += 1;
        if escaped {
            tracing::info!("fled from combat");
            self.phase = CombatPhase::Ended(CombatOutcome::Fled);
            CombatStep::default()
                .event(CombatEvent::Fled)
                .then(Deferred::ReturnToWorld, FLEE_DELAY_MS)
        } else {
            self.await_enemy(Stance::Normal)
                .event(CombatEvent::FleeFailed)
                .then(Deferred::EnemyTurn, ENEMY_TURN_DELAY_MS)
        }
    }

    fn enemy_strike(&mut self, player: &mut PlayerState, damage: u32) -> CombatStep {
        let enemy = self
            .enemy
            .as_ref()
            .map(|e| e.name.clone())
            .unwrap_or_default();
        player.take_damage(damage);
        let step = CombatStep::default().event(CombatEvent::EnemyHit { enemy, damage });
        if player.is_defeated() {
            tracing::info!("combat lost");
            self.phase = CombatPhase::Ended(CombatOutcome::Defeat);
            step.event(CombatEvent::Defeated)
                .then(Deferred::ReturnToWorld, RESULT_DELAY_MS)
        } else {
            self.phase = CombatPhase::PlayerTurn;
            step
        }
    }

    fn close(&mut self, player: &mut PlayerState, outcome: CombatOutcome) -> CombatStep {
        if outcome == CombatOutcome::Defeat {
            player.restore_health();
        }
        self.phase = CombatPhase::Idle;
        self.enemy = None;
        self.round = 0;
        tracing::debug!(%outcome, "returned to world");
        CombatStep {
            closed: Some(outcome),
            ..CombatStep::default()
        }
    }
}

/// Apply one command to the combat slot.
///
/// This is the single entry point hosts use: UI events become
/// [`CombatCommand::Act`], encounters become [`CombatCommand::Start`], and
/// due timers become [`CombatCommand::Resolve`].
pub fn reduce<R: Rng + ?Sized>(
    combat: &mut Combat,
    player: &mut PlayerState,
    command: CombatCommand,
    rng: &mut R,
) -> CombatStep {
    match command {
        CombatCommand::Start(enemy) => combat.start(enemy),
        CombatCommand::Act(action) => combat.act(player, action, rng),
        CombatCommand::Resolve(deferred) => combat.resolve(player, deferred, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::enemy;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bandit() -> Enemy {
        Enemy::new("Forest Bandit", "🥷", 80)
    }

    fn started() -> (Combat, PlayerState, StdRng) {
        let mut combat = Combat::new();
        combat.start(bandit());
        (combat, PlayerState::new(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn start_enters_players_turn() {
        let mut combat = Combat::new();
        assert!(!combat.is_active());
        let step = combat.start(bandit());
        assert!(combat.is_players_turn());
        assert_eq!(step.events[0].to_string(), "A wild Forest Bandit appears!");
    }

    #[test]
    fn second_start_is_ignored() {
        let (mut combat, _, _) = started();
        let step = combat.start(enemy::spawn(3));
        assert!(step.ignored);
        assert_eq!(combat.enemy().unwrap().name, "Forest Bandit");
    }

    #[test]
    fn actions_outside_players_turn_are_ignored() {
        let mut combat = Combat::new();
        let mut player = PlayerState::new();
        let mut rng = StdRng::seed_from_u64(1);
        for action in [
            CombatAction::Attack,
            CombatAction::Defend,
            CombatAction::Heal,
            CombatAction::Flee,
        ] {
            assert!(combat.act(&mut player, action, &mut rng).ignored);
        }

        combat.start(bandit());
        combat.act(&mut player, CombatAction::Defend, &mut rng);
        assert!(matches!(
            combat.phase(),
            CombatPhase::ResolvingEnemyTurn(Stance::Guarded)
        ));
        assert!(combat.act(&mut player, CombatAction::Attack, &mut rng).ignored);
    }

    #[test]
    fn attack_damage_in_bounds() {
        for seed in 0..200 {
            let mut combat = Combat::new();
            combat.start(enemy::spawn(3));
            let mut player = PlayerState::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let step = combat.act(&mut player, CombatAction::Attack, &mut rng);
            let CombatEvent::PlayerHit { damage } = step.events[0] else {
                panic!("expected a hit, got {:?}", step.events);
            };
            assert!((15..=39).contains(&damage));
            assert_eq!(combat.enemy().unwrap().health, 120 - damage);
            assert_eq!(step.deferred, Some((Deferred::EnemyTurn, ENEMY_TURN_DELAY_MS)));
        }
    }

    #[test]
    fn max_damage_attacks_beat_eighty_health() {
        let (mut combat, mut player, _) = started();

        let step = combat.strike(39);
        assert!(step.deferred.is_some());
        combat.enemy_strike(&mut player, 10);

        combat.strike(39);
        assert_eq!(combat.enemy().unwrap().health, 2);
        combat.enemy_strike(&mut player, 10);

        combat.strike(39);
        assert_eq!(combat.phase(), CombatPhase::Ended(CombatOutcome::Victory));
    }

    #[test]
    fn victory_grants_experience_then_returns() {
        let (mut combat, mut player, mut rng) = started();
        let mut step = CombatStep::default();
        for _ in 0..20 {
            step = combat.act(&mut player, CombatAction::Attack, &mut rng);
            if combat.phase() == CombatPhase::Ended(CombatOutcome::Victory) {
                break;
            }
            player.restore_health();
            combat.resolve(&mut player, Deferred::EnemyTurn, &mut rng);
        }
        let Some(CombatEvent::Victory { experience }) = step.events.last().cloned() else {
            panic!("expected victory, got {:?}", step.events);
        };
        assert!((25..=74).contains(&experience));
        assert_eq!(player.experience, experience);
        assert_eq!(step.deferred, Some((Deferred::ReturnToWorld, RESULT_DELAY_MS)));
        assert!(combat.is_active());

        let step = combat.resolve(&mut player, Deferred::ReturnToWorld, &mut rng);
        assert_eq!(step.closed, Some(CombatOutcome::Victory));
        assert!(!combat.is_active());
        assert!(combat.enemy().is_none());
    }

    #[test]
    fn heal_spends_mana_and_caps_health() {
        let (mut combat, mut player, mut rng) = started();
        player.take_damage(5);
        let step = combat.act(&mut player, CombatAction::Heal, &mut rng);
        let CombatEvent::Healed { amount } = step.events[0] else {
            panic!("expected heal, got {:?}", step.events);
        };
        assert!((10..=29).contains(&amount));
        assert_eq!(player.health, 100);
        assert_eq!(player.mana, 40);
        assert_eq!(combat.phase(), CombatPhase::ResolvingEnemyTurn(Stance::Normal));
    }

    #[test]
    fn heal_without_mana_keeps_turn() {
        let (mut combat, mut player, mut rng) = started();
        player.mana = 9;
        let step = combat.act(&mut player, CombatAction::Heal, &mut rng);
        assert_eq!(step.events, vec![CombatEvent::NotEnoughMana]);
        assert!(step.deferred.is_none());
        assert!(!step.ignored);
        assert_eq!(player.mana, 9);
        assert!(combat.is_players_turn());
    }

    #[test]
    fn heal_at_exact_cost_empties_mana() {
        let (mut combat, mut player, mut rng) = started();
        player.mana = HEAL_MANA_COST;
        player.take_damage(50);
        let step = combat.act(&mut player, CombatAction::Heal, &mut rng);
        assert!(matches!(step.events[0], CombatEvent::Healed { .. }));
        assert_eq!(player.mana, 0);
        assert!(player.health > 50);

        combat.resolve(&mut player, Deferred::EnemyTurn, &mut rng);
        let step = combat.act(&mut player, CombatAction::Heal, &mut rng);
        assert_eq!(step.events, vec![CombatEvent::NotEnoughMana]);
        assert_eq!(player.mana, 0);
    }

    #[test]
    fn guarded_enemy_turn_halves_damage() {
        let (mut combat, mut player, mut rng) = started();
        combat.act(&mut player, CombatAction::Defend, &mut rng);
        let step = combat.resolve(&mut player, Deferred::EnemyTurn, &mut rng);
        let CombatEvent::EnemyHit { damage, .. } = step.events[0] else {
            panic!("expected enemy hit, got {:?}", step.events);
        };
        assert!((5..=12).contains(&damage));
        assert_eq!(player.health, 100 - damage);
        assert!(combat.is_players_turn());
    }

    #[test]
    fn enemy_turn_damage_in_bounds() {
        for seed in 0..100 {
            let (mut combat, mut player, _) = started();
            let mut rng = StdRng::seed_from_u64(seed);
            combat.phase = CombatPhase::ResolvingEnemyTurn(Stance::Normal);
            let step = combat.resolve(&mut player, Deferred::EnemyTurn, &mut rng);
            let CombatEvent::EnemyHit { damage, .. } = step.events[0] else {
                panic!("expected enemy hit");
            };
            assert!((10..=24).contains(&damage));
        }
    }

    #[test]
    fn defeat_then_full_heal_on_return() {
        let (mut combat, mut player, mut rng) = started();
        player.health = 5;
        combat.phase = CombatPhase::ResolvingEnemyTurn(Stance::Normal);
        let step = combat.resolve(&mut player, Deferred::EnemyTurn, &mut rng);
        assert_eq!(player.health, 0);
        assert_eq!(step.events.last(), Some(&CombatEvent::Defeated));
        assert_eq!(combat.phase(), CombatPhase::Ended(CombatOutcome::Defeat));

        let step = combat.resolve(&mut player, Deferred::ReturnToWorld, &mut rng);
        assert_eq!(step.closed, Some(CombatOutcome::Defeat));
        assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn stale_deferred_effects_are_ignored() {
        let (mut combat, mut player, mut rng) = started();
        assert!(combat.resolve(&mut player, Deferred::EnemyTurn, &mut rng).ignored);
        assert!(combat.resolve(&mut player, Deferred::ReturnToWorld, &mut rng).ignored);
        assert_eq!(player.health, 100);
        assert!(combat.is_players_turn());
    }

    #[test]
    fn flee_outcomes() {
        let (mut combat, _, _) = started();
        let step = combat.flee(true);
        assert_eq!(combat.phase(), CombatPhase::Ended(CombatOutcome::Fled));
        assert_eq!(step.deferred, Some((Deferred::ReturnToWorld, FLEE_DELAY_MS)));

        let (mut combat, _, _) = started();
        let step = combat.flee(false);
        assert_eq!(step.events, vec![CombatEvent::FleeFailed]);
        assert_eq!(step.deferred, Some((Deferred::EnemyTurn, ENEMY_TURN_DELAY_MS)));
    }

    #[test]
    fn flee_succeeds_about_seventy_percent() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 10_000;
        let mut escaped = 0;
        for _ in 0..trials {
            let mut combat = Combat::new();
            let mut player = PlayerState::new();
            combat.start(bandit());
            combat.act(&mut player, CombatAction::Flee, &mut rng);
            if combat.phase() == CombatPhase::Ended(CombatOutcome::Fled) {
                escaped += 1;
            }
        }
        let rate = escaped as f64 / trials as f64;
        assert!((0.67..=0.73).contains(&rate), "flee rate {rate}");
    }

    #[test]
    fn reduce_dispatches_every_command() {
        let mut combat = Combat::new();
        let mut player = PlayerState::new();
        let mut rng = StdRng::seed_from_u64(3);
        let step = reduce(&mut combat, &mut player, CombatCommand::Start(bandit()), &mut rng);
        assert!(!step.ignored);
        let step = reduce(
            &mut combat,
            &mut player,
            CombatCommand::Act(CombatAction::Defend),
            &mut rng,
        );
        assert_eq!(step.deferred, Some((Deferred::EnemyTurn, ENEMY_TURN_DELAY_MS)));
        let step = reduce(
            &mut combat,
            &mut player,
            CombatCommand::Resolve(Deferred::EnemyTurn),
            &mut rng,
        );
        assert!(!step.ignored);
        assert!(combat.is_players_turn());
    }
}
