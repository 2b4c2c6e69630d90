use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Number of inventory slots (a 4x6 grid).
pub const INVENTORY_CAPACITY: usize = 24;

/// The player's items, in the order they were added.
///
/// Items are opaque icon tokens. There is no removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from saved items, dropping anything past capacity.
    pub fn from_items(items: Vec<String>) -> Self {
        let mut items = items;
        items.truncate(INVENTORY_CAPACITY);
        Self { items }
    }

    /// Append an item to the next free slot.
    pub fn add(&mut self, item: impl Into<String>) -> CoreResult<()> {
        if self.is_full() {
            return Err(CoreError::InventoryFull(INVENTORY_CAPACITY));
        }
        self.items.push(item.into());
        Ok(())
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Every slot, occupied or not, in display order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&str>> {
        (0..INVENTORY_CAPACITY).map(|i| self.items.get(i).map(String::as_str))
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.items.len() >= INVENTORY_CAPACITY
    }

    /// Replace the contents with a class's starting kit.
    pub fn reset_to(&mut self, items: &[&str]) {
        self.items = items.iter().map(|s| (*s).to_string()).collect();
    }
}
