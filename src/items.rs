//! Items and identifiers shared by every drag container.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable identifier of an item, unique within one collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Rehydrate an item identifier from a stored string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one rendered list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Rehydrate a container identifier from a stored string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A draggable entry.
///
/// Only `id` and `label` are interpreted; every other field is carried in
/// `extra` and survives moves untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Build an item with no extra fields.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: ItemId::from_string(id),
            label: label.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra field, replacing any previous value under `key`.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// True when `items` holds an item with `id`.
pub fn contains_id(items: &[Item], id: &ItemId) -> bool {
    items.iter().any(|item| &item.id == id)
}

/// Position of the item with `id`, if present.
pub fn position_of(items: &[Item], id: &ItemId) -> Option<usize> {
    items.iter().position(|item| &item.id == id)
}

/// True when no id appears twice in `items`.
pub fn has_unique_ids(items: &[Item]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(items.len());
    items.iter().all(|item| seen.insert(&item.id))
}
