//! Named shelves grouping a subset of the library's items.
//!
//! Shelves do not own items. They keep the identifiers of their members,
//! in resolution order, and the library's item map stays the single source
//! of truth; [`crate::Library::shelf_items`] resolves a shelf back to its
//! items.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::item::Item;

/// A named, ordered grouping of item references
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shelf {
    /// Display label of the shelf
    pub name: String,

    /// Identifiers of the member items, in resolution order. Only
    /// identifiers that resolved against the item map at parse time are
    /// present.
    pub members: IndexSet<String>,
}

impl Shelf {
    /// Create an empty shelf with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: IndexSet::new(),
        }
    }

    /// Check if an item is on this shelf, by identifier equality
    pub fn contains(&self, item: &Item) -> bool {
        self.members.contains(item.uuid.as_str())
    }

    /// Check if an identifier is on this shelf
    pub fn contains_id(&self, uuid: &str) -> bool {
        self.members.contains(uuid)
    }

    /// Iterate over member identifiers in resolution order
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the shelf has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
