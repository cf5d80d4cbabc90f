//! Keyword lookup against an external store of PARA items.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An existing PARA item a captured task was linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedItem {
    pub id: String,
    pub title: String,
}

/// Read-only lookup of active PARA items.
///
/// Implementations back onto whatever store the caller owns. An `Err` means
/// the store was unreachable; the extractor logs it and carries on.
pub trait ItemLookup: Send + Sync {
    /// Find an active item owned by `user_id` whose title contains
    /// `keyword`, case-insensitively.
    fn find_item_by_keyword(&self, user_id: &str, keyword: &str) -> Result<Option<LinkedItem>>;
}

/// A PARA item held by [`InMemoryItemStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredItem {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// In-process item store, used by the CLI and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemStore {
    items: Vec<StoredItem>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<StoredItem>) -> Self {
        Self { items }
    }

    pub fn insert(&mut self, item: StoredItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemLookup for InMemoryItemStore {
    fn find_item_by_keyword(&self, user_id: &str, keyword: &str) -> Result<Option<LinkedItem>> {
        let needle = keyword.to_lowercase();
        Ok(self
            .items
            .iter()
            .find(|item| {
                item.active && item.user_id == user_id && item.title.to_lowercase().contains(&needle)
            })
            .map(|item| LinkedItem {
                id: item.id.clone(),
                title: item.title.clone(),
            }))
    }
}
