//! Roster data edited through the drag lists: a catalog of items that can be
//! copied from, and one ordered item list per member.

mod error;
mod store;

pub use error::RosterError;
pub use store::{ROSTER_FILE_NAME, load_from_path, load_or_default, roster_path, save, save_to_path};

use crate::items::{ContainerId, Item, contains_id, has_unique_ids};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Container id used for the catalog list.
pub const CATALOG_CONTAINER: &str = "catalog";

/// One roster member and the items assigned to them, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Member {
    /// Container id of this member's list.
    pub fn container_id(&self) -> ContainerId {
        ContainerId::from_string(format!("member-{}", self.id))
    }
}

/// Everything shown in the editor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub catalog: Vec<Item>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Default for Roster {
    fn default() -> Self {
        let catalog = vec![
            Item::new("1", "Caixa"),
            Item::new("2", "Tamborí"),
            Item::new("3", "Surdo"),
            Item::new("4", "Campana"),
            Item::new("5", "Repenique"),
            Item::new("6", "Shequere"),
        ];
        let pick = |indices: [usize; 2]| indices.map(|index| catalog[index].clone()).to_vec();
        let members = vec![
            Member {
                id: 1,
                name: "Lluc".into(),
                items: pick([5, 3]),
            },
            Member {
                id: 2,
                name: "Isaac".into(),
                items: pick([1, 2]),
            },
            Member {
                id: 3,
                name: "Marina".into(),
                items: pick([4, 0]),
            },
        ];
        Self { catalog, members }
    }
}

impl Roster {
    pub fn catalog_container_id() -> ContainerId {
        ContainerId::from_string(CATALOG_CONTAINER)
    }

    pub fn member(&self, id: u32) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Replace a member's items. Returns false for unknown members.
    pub fn set_member_items(&mut self, id: u32, items: &[Item]) -> bool {
        match self.members.iter_mut().find(|member| member.id == id) {
            Some(member) => {
                member.items = items.to_vec();
                true
            }
            None => false,
        }
    }

    /// Catalog items the member does not hold yet.
    pub fn available_for(&self, id: u32) -> Vec<&Item> {
        let held = self.member(id).map(|member| member.items.as_slice()).unwrap_or(&[]);
        self.catalog
            .iter()
            .filter(|item| !contains_id(held, &item.id))
            .collect()
    }

    /// Reject rosters where two members share an id or any list holds the
    /// same item id twice.
    pub fn validate(&self) -> Result<(), RosterError> {
        let mut member_ids = HashSet::new();
        if let Some(member) = self.members.iter().find(|member| !member_ids.insert(member.id)) {
            return Err(RosterError::DuplicateMember { id: member.id });
        }
        if !has_unique_ids(&self.catalog) {
            return Err(RosterError::DuplicateItem {
                list: CATALOG_CONTAINER.to_string(),
            });
        }
        match self.members.iter().find(|member| !has_unique_ids(&member.items)) {
            Some(member) => Err(RosterError::DuplicateItem {
                list: member.container_id().to_string(),
            }),
            None => Ok(()),
        }
    }
}
