//! Reserved-slot exchange.
//!
//! The exchange is a single two-way move: the located stack and the
//! reserved content trade places in one step. Counts ride along untouched
//! and there is no intermediate state to observe.

use ahash::AHashMap;
use std::mem;

use crate::{ItemId, ItemStack, PlayerState};

/// Swaps `source_slot` with the reserved slot and returns what the exchange
/// moved back into the source slot, if anything.
///
/// `source_slot` must come from `locate_item` against the same inventory.
pub(crate) fn execute_swap(player: &mut PlayerState, source_slot: usize) -> Option<ItemStack> {
    mem::swap(&mut player.reserved, &mut player.inventory.slots[source_slot]);
    player.inventory.slots[source_slot].clone()
}

/// Total count per item kind across the whole player: every inventory slot
/// plus the reserved slot. A swap never changes this map.
pub fn kind_totals(player: &PlayerState) -> AHashMap<ItemId, u64> {
    let mut totals: AHashMap<ItemId, u64> = AHashMap::new();
    for stack in player.inventory.slots.iter().flatten() {
        *totals.entry(stack.kind.clone()).or_insert(0) += u64::from(stack.count);
    }
    if let Some(stack) = &player.reserved {
        *totals.entry(stack.kind.clone()).or_insert(0) += u64::from(stack.count);
    }
    totals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{base_player, stack};

    #[test]
    fn swap_into_empty_reserved_empties_the_source_slot() {
        let mut player = base_player();
        player.inventory.slots[20] = Some(stack("ward_totem", 1));

        let displaced = execute_swap(&mut player, 20);

        assert!(displaced.is_none(), "nothing was reserved before the swap");
        assert!(
            player.inventory.slots[20].is_none(),
            "source slot should be empty after the exchange"
        );
        assert_eq!(
            player.reserved,
            Some(stack("ward_totem", 1)),
            "totem should now be reserved"
        );
    }

    #[test]
    fn displaced_item_lands_in_the_exact_source_slot() {
        let mut player = base_player();
        player.inventory.slots[4] = Some(stack("ward_totem", 1));
        player.reserved = Some(stack("iron_sword", 1));

        let displaced = execute_swap(&mut player, 4);

        assert_eq!(displaced, Some(stack("iron_sword", 1)));
        assert_eq!(
            player.inventory.slots[4],
            Some(stack("iron_sword", 1)),
            "previous reserved item should occupy the vacated slot"
        );
        assert_eq!(player.reserved, Some(stack("ward_totem", 1)));
    }

    #[test]
    fn counts_survive_the_exchange() {
        let mut player = base_player();
        player.inventory.slots[11] = Some(stack("ward_totem", 3));
        player.reserved = Some(stack("bandage", 5));

        execute_swap(&mut player, 11);

        assert_eq!(player.reserved.as_ref().map(|s| s.count), Some(3));
        assert_eq!(
            player.inventory.slots[11].as_ref().map(|s| s.count),
            Some(5)
        );
    }

    #[test]
    fn kind_totals_identical_before_and_after_swap() {
        let mut player = base_player();
        player.inventory.slots[0] = Some(stack("torch", 16));
        player.inventory.slots[8] = Some(stack("ward_totem", 1));
        player.inventory.slots[30] = Some(stack("ward_totem", 2));
        player.reserved = Some(stack("iron_sword", 1));

        let before = kind_totals(&player);
        execute_swap(&mut player, 8);
        let after = kind_totals(&player);

        assert_eq!(before, after, "exchange must conserve every kind count");
    }

    #[test]
    fn kind_totals_sums_split_stacks_and_reserved() {
        let mut player = base_player();
        player.inventory.slots[1] = Some(stack("ward_totem", 1));
        player.inventory.slots[2] = Some(stack("ward_totem", 1));
        player.reserved = Some(stack("ward_totem", 1));

        let totals = kind_totals(&player);
        assert_eq!(totals.get(&ItemId("ward_totem".to_string())), Some(&3));
    }
}
