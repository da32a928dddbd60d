//! Pure collection math behind drops.

use crate::items::{Item, ItemId, contains_id};

/// True when inserting the item dragged from `from_index` before position
/// `hover_index` of the same list would leave the order unchanged.
///
/// Index 0 is a real origin; only an absent origin disables the check.
pub fn is_noop_move(from_index: Option<usize>, hover_index: usize) -> bool {
    match from_index {
        Some(from) => hover_index == from || hover_index == from + 1,
        None => false,
    }
}

/// Move the item at `from` so it lands at `to`.
///
/// The item is spliced out first and reinserted at `to` as counted in the
/// original list (clamped to the end). Returns `None` for no-op moves and
/// out-of-range origins.
pub fn reorder(items: &[Item], from: usize, to: usize) -> Option<Vec<Item>> {
    if from >= items.len() || is_noop_move(Some(from), to) {
        return None;
    }
    let mut updated = items.to_vec();
    let moved = updated.remove(from);
    let at = to.min(updated.len());
    updated.insert(at, moved);
    Some(updated)
}

/// Insert `item` at `at` (clamped to the end) unless its id is already present.
pub fn insert_unique(items: &[Item], item: Item, at: usize) -> Option<Vec<Item>> {
    if contains_id(items, &item.id) {
        return None;
    }
    let mut updated = items.to_vec();
    let at = at.min(updated.len());
    updated.insert(at, item);
    Some(updated)
}

/// Drop every item with `id`. Returns `None` when nothing matched.
pub fn remove_id(items: &[Item], id: &ItemId) -> Option<Vec<Item>> {
    if !contains_id(items, id) {
        return None;
    }
    Some(items.iter().filter(|item| &item.id != id).cloned().collect())
}
