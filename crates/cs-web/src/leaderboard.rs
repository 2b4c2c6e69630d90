//! Ranking tables shown on the website.
//!
//! Three fixed datasets, each sorted on its own key. One is visible at a
//! time, chosen by tab.

use std::fmt;
use std::str::FromStr;

use cs_core::CharacterClass;
use serde::Serialize;

use crate::error::WebError;

/// Which table is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardTab {
    /// Characters by level.
    #[default]
    Level,
    /// Players by arena rating.
    Pvp,
    /// Guilds by combined power.
    Guild,
}

impl LeaderboardTab {
    /// All tabs in display order.
    pub const ALL: [LeaderboardTab; 3] = [Self::Level, Self::Pvp, Self::Guild];
}

impl fmt::Display for LeaderboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level => write!(f, "level"),
            Self::Pvp => write!(f, "pvp"),
            Self::Guild => write!(f, "guild"),
        }
    }
}

impl FromStr for LeaderboardTab {
    type Err = WebError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "level" => Ok(Self::Level),
            "pvp" => Ok(Self::Pvp),
            "guild" => Ok(Self::Guild),
            other => Err(WebError::Validation(format!(
                "unknown leaderboard '{other}' (expected level, pvp, or guild)"
            ))),
        }
    }
}

/// A row of the level table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelEntry {
    /// Character name.
    pub player: String,
    /// Character class.
    pub class: CharacterClass,
    /// Character level.
    pub level: u32,
    /// Home server.
    pub server: String,
}

/// A row of the PvP table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PvpEntry {
    /// Character name.
    pub player: String,
    /// Arena rating.
    pub rating: u32,
    /// Arena wins.
    pub wins: u32,
    /// Arena losses.
    pub losses: u32,
}

/// A row of the guild table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuildEntry {
    /// Guild name.
    pub guild: String,
    /// Guild leader.
    pub leader: String,
    /// Member count.
    pub members: u32,
    /// Combined power score.
    pub power: u32,
}

/// The rows of whichever table is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board<'a> {
    /// Level rankings.
    Level(&'a [LevelEntry]),
    /// PvP rankings.
    Pvp(&'a [PvpEntry]),
    /// Guild rankings.
    Guild(&'a [GuildEntry]),
}

impl Board<'_> {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Level(rows) => rows.len(),
            Self::Pvp(rows) => rows.len(),
            Self::Guild(rows) => rows.len(),
        }
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All three tables plus the selected tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboards {
    level: Vec<LevelEntry>,
    pvp: Vec<PvpEntry>,
    guild: Vec<GuildEntry>,
    active: LeaderboardTab,
}

impl Default for Leaderboards {
    fn default() -> Self {
        Self::new()
    }
}

impl Leaderboards {
    /// Load the built-in datasets, sorted, with the level tab selected.
    pub fn new() -> Self {
        let level = [
            ("MysticMage", CharacterClass::Mage, 78, "Mystic"),
            ("DragonSlayer", CharacterClass::Warrior, 85, "Celestial"),
            ("ShadowArcher", CharacterClass::Archer, 71, "Shadow"),
            ("AngkorGuardian", CharacterClass::Warrior, 80, "Celestial"),
            ("ApsaraBlade", CharacterClass::Archer, 67, "Mystic"),
        ]
        .into_iter()
        .map(|(player, class, level, server)| LevelEntry {
            player: player.to_string(),
            class,
            level,
            server: server.to_string(),
        })
        .collect();

        let pvp = [
            ("ShadowArcher", 2310, 412, 98),
            ("DragonSlayer", 2450, 530, 120),
            ("NagaFang", 2105, 301, 140),
            ("MysticMage", 2380, 455, 101),
            ("ApsaraBlade", 1990, 260, 133),
        ]
        .into_iter()
        .map(|(player, rating, wins, losses)| PvpEntry {
            player: player.to_string(),
            rating,
            wins,
            losses,
        })
        .collect();

        let guild = [
            ("Temple Wardens", "AngkorGuardian", 42, 98_500),
            ("Celestial Order", "DragonSlayer", 50, 125_000),
            ("Moonlit Lotus", "MysticMage", 38, 101_200),
            ("Mekong Tigers", "NagaFang", 29, 76_800),
        ]
        .into_iter()
        .map(|(guild, leader, members, power)| GuildEntry {
            guild: guild.to_string(),
            leader: leader.to_string(),
            members,
            power,
        })
        .collect();

        Self::from_rows(level, pvp, guild)
    }

    /// Build from arbitrary rows. Each table is sorted descending on its key.
    pub fn from_rows(
        mut level: Vec<LevelEntry>,
        mut pvp: Vec<PvpEntry>,
        mut guild: Vec<GuildEntry>,
    ) -> Self {
        level.sort_by(|a, b| b.level.cmp(&a.level));
        pvp.sort_by(|a, b| b.rating.cmp(&a.rating));
        guild.sort_by(|a, b| b.power.cmp(&a.power));
        Self {
            level,
            pvp,
            guild,
            active: LeaderboardTab::default(),
        }
    }

    /// The selected tab.
    pub fn active(&self) -> LeaderboardTab {
        self.active
    }

    /// Switch tabs.
    pub fn select(&mut self, tab: LeaderboardTab) {
        self.active = tab;
    }

    /// Rows of the selected tab.
    pub fn board(&self) -> Board<'_> {
        self.board_for(self.active)
    }

    /// Rows of any tab.
    pub fn board_for(&self, tab: LeaderboardTab) -> Board<'_> {
        match tab {
            LeaderboardTab::Level => Board::Level(&self.level),
            LeaderboardTab::Pvp => Board::Pvp(&self.pvp),
            LeaderboardTab::Guild => Board::Guild(&self.guild),
        }
    }
}
