//! Combat inputs, deferred effects, and the events they produce.

use std::fmt;

use super::CombatOutcome;

/// Something the player can do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatAction {
    /// Strike the enemy.
    Attack,
    /// Brace, halving the enemy's next hit.
    Defend,
    /// Spend mana to restore health.
    Heal,
    /// Try to leave the fight.
    Flee,
}

impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::Defend => write!(f, "Defend"),
            Self::Heal => write!(f, "Heal"),
            Self::Flee => write!(f, "Flee"),
        }
    }
}

/// How the player is braced for the enemy's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stance {
    /// Full damage.
    #[default]
    Normal,
    /// Half damage, rounded down.
    Guarded,
}

impl Stance {
    /// Apply this stance's multiplier to a raw damage roll.
    pub fn apply(self, raw: u32) -> u32 {
        match self {
            Self::Normal => raw,
            Self::Guarded => raw / 2,
        }
    }
}

/// An effect the combat machine asks the host to apply after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// The enemy answers the player's action.
    EnemyTurn,
    /// The result screen is over; hand control back to the world.
    ReturnToWorld,
}

/// A narrated combat occurrence, one per log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    /// A session started.
    Appeared {
        /// Enemy name.
        enemy: String,
    },
    /// The player's attack landed.
    PlayerHit {
        /// Damage dealt.
        damage: u32,
    },
    /// The player took a defensive stance.
    Guarded,
    /// The player healed.
    Healed {
        /// Health restored before the cap.
        amount: u32,
    },
    /// A heal was attempted without enough mana.
    NotEnoughMana,
    /// The flee attempt succeeded.
    Fled,
    /// The flee attempt failed.
    FleeFailed,
    /// The enemy's reply landed.
    EnemyHit {
        /// Enemy name.
        enemy: String,
        /// Damage dealt after the stance multiplier.
        damage: u32,
    },
    /// The enemy was beaten.
    Victory {
        /// Experience granted.
        experience: u32,
    },
    /// The player's health reached zero.
    Defeated,
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Appeared { enemy } => write!(f, "A wild {enemy} appears!"),
            Self::PlayerHit { damage } => write!(f, "You deal {damage} damage!"),
            Self::Guarded => write!(f, "You raise your guard!"),
            Self::Healed { amount } => write!(f, "You heal for {amount} HP!"),
            Self::NotEnoughMana => write!(f, "Not enough mana!"),
            Self::Fled => write!(f, "You successfully fled!"),
            Self::FleeFailed => write!(f, "Cannot escape!"),
            Self::EnemyHit { enemy, damage } => write!(f, "{enemy} deals {damage} damage!"),
            Self::Victory { experience } => {
                write!(f, "Victory! You gained {experience} experience!")
            }
            Self::Defeated => write!(f, "You have been defeated..."),
        }
    }
}

/// Everything one reducer call produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatStep {
    /// Events to narrate, in order.
    pub events: Vec<CombatEvent>,
    /// A follow-up effect and the delay in milliseconds before it applies.
    pub deferred: Option<(Deferred, u64)>,
    /// Set when this step closed the session and returned to the world.
    pub closed: Option<CombatOutcome>,
    /// Whether the input was rejected because the state did not allow it.
    pub ignored: bool,
}

impl CombatStep {
    /// A step for an input that had no effect.
    pub fn ignored() -> Self {
        Self {
            ignored: true,
            ..Self::default()
        }
    }

    pub(crate) fn event(mut self, event: CombatEvent) -> Self {
        self.events.push(event);
        self
    }

    pub(crate) fn then(mut self, deferred: Deferred, delay_ms: u64) -> Self {
        self.deferred = Some((deferred, delay_ms));
        self
    }
}
