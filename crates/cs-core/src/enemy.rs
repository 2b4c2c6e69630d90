use serde::{Deserialize, Serialize};

/// An opponent in a combat session. Created fresh for each encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    /// Display name.
    pub name: String,
    /// Sprite token shown in the combat screen.
    pub sprite: String,
    /// Remaining health.
    pub health: u32,
    /// Starting health.
    pub max_health: u32,
}

impl Enemy {
    /// Create an enemy at full health.
    pub fn new(name: impl Into<String>, sprite: impl Into<String>, health: u32) -> Self {
        Self {
            name: name.into(),
            sprite: sprite.into(),
            health,
            max_health: health,
        }
    }

    /// Subtract damage, stopping at zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Whether the enemy has been beaten.
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Remaining health as a percentage of the maximum.
    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        self.health * 100 / self.max_health
    }
}

/// Name, sprite, and health of every enemy an encounter can spawn.
pub const ENEMY_POOL: [(&str, &str, u32); 4] = [
    ("Forest Bandit", "🥷", 80),
    ("Ancient Spirit", "👻", 60),
    ("Mountain Tiger", "🐅", 100),
    ("Shadow Demon", "👹", 120),
];

/// Instantiate the pool entry at `index`, wrapping around the pool size.
pub fn spawn(index: usize) -> Enemy {
    let (name, sprite, health) = ENEMY_POOL[index % ENEMY_POOL.len()];
    Enemy::new(name, sprite, health)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_is_fresh_and_full_health() {
        let mut tiger = spawn(2);
        assert_eq!(tiger.name, "Mountain Tiger");
        assert_eq!(tiger.health, 100);
        tiger.take_damage(40);
        assert_eq!(spawn(2).health, 100);
    }

    #[test]
    fn spawn_wraps_index() {
        assert_eq!(spawn(4).name, "Forest Bandit");
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut spirit = spawn(1);
        assert_eq!(spirit.take_damage(45), 15);
        assert_eq!(spirit.health_percent(), 25);
        spirit.take_damage(39);
        assert!(spirit.is_defeated());
        assert_eq!(spirit.health_percent(), 0);
    }
}
