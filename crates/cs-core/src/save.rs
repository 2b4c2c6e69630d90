//! The persisted snapshot of a game in progress.
//!
//! Snapshots are JSON objects `{ player, inventory, language }` stored under
//! [`SAVE_KEY`]. Loading never fails: a missing, unreadable, or malformed
//! snapshot is reported as "no save data" and logged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreResult;
use crate::inventory::Inventory;
use crate::language::Language;
use crate::player::PlayerState;
use crate::store::KeyValueStore;

/// Storage key the snapshot is written under.
pub const SAVE_KEY: &str = "celestialSwordSave";

/// Saved player, inventory, and language preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Player attributes.
    pub player: PlayerState,
    /// Inventory items in slot order.
    pub inventory: Inventory,
    /// Display language.
    pub language: Language,
}

/// Loosely typed view of a stored snapshot, used for field-wise merging.
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    player: Option<Map<String, Value>>,
    #[serde(default)]
    inventory: Option<Vec<String>>,
    #[serde(default)]
    language: Option<String>,
}

impl Snapshot {
    /// Encode as the JSON blob stored under [`SAVE_KEY`].
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the snapshot to `store`.
    pub fn write(&self, store: &mut dyn KeyValueStore) -> CoreResult<()> {
        let json = self.to_json()?;
        store.set(SAVE_KEY, &json)?;
        tracing::info!(player = %self.player.name, "game saved");
        Ok(())
    }

    /// Read the snapshot from `store`, if a usable one exists.
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        let raw = match store.get(SAVE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved game");
                return None;
            }
        };
        Self::parse(&raw)
    }

    /// Parse a stored blob, merging saved player fields over the defaults.
    ///
    /// Saved fields win field by field; fields the blob lacks keep their
    /// default values. A missing inventory is empty. An unknown language is
    /// ignored. Anything that cannot be decoded yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let data: RawSnapshot = match serde_json::from_str(raw) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "could not load saved game");
                return None;
            }
        };

        let player = match data.player {
            Some(saved) => match merge_player(saved) {
                Ok(player) => player,
                Err(e) => {
                    tracing::warn!(error = %e, "saved player does not match the expected shape");
                    return None;
                }
            },
            None => PlayerState::default(),
        };

        let language = data
            .language
            .and_then(|code| code.parse::<Language>().ok())
            .unwrap_or_default();

        Some(Self {
            player,
            inventory: Inventory::from_items(data.inventory.unwrap_or_default()),
            language,
        })
    }
}

fn merge_player(saved: Map<String, Value>) -> serde_json::Result<PlayerState> {
    let mut merged = match serde_json::to_value(PlayerState::default())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(saved);
    let mut player: PlayerState = serde_json::from_value(Value::Object(merged))?;
    player.clamp_to_bounds();
    Ok(player)
}
