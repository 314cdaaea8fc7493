//! Deterministic item search across hotbar and backpack slots.

use crate::{Inventory, ItemId, SearchPriority};

/// Returns the lowest matching slot index under the configured scan order,
/// or `None` when the item is absent from every scanned slot.
///
/// The hotbar is indices `0..HOTBAR_SLOTS`; the backpack is everything
/// after. Scans are ascending and exhaustive, so identical inventories
/// always produce identical answers. A slot matches only while its stack
/// has charges left.
pub fn locate_item(inventory: &Inventory, priority: SearchPriority, kind: &ItemId) -> Option<usize> {
    let hotbar_end = inventory.hotbar_end();
    let holds = |idx: usize| {
        inventory.slots[idx]
            .as_ref()
            .is_some_and(|stack| stack.matches(kind))
    };
    match priority {
        SearchPriority::HotbarFirst => (0..hotbar_end)
            .find(|&idx| holds(idx))
            .or_else(|| (hotbar_end..inventory.slots.len()).find(|&idx| holds(idx))),
        SearchPriority::InventoryOnly => (hotbar_end..inventory.slots.len()).find(|&idx| holds(idx)),
        SearchPriority::IgnoreInventory => (0..hotbar_end).find(|&idx| holds(idx)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
