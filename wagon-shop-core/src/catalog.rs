//! Catalog store: wagons for sale and wagons the player owns.
use crate::decode;
use serde::{Deserialize, Serialize};

/// A wagon offered for purchase. Identity is `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogItem {
    #[serde(default, deserialize_with = "decode::text")]
    pub id: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub label: String,
    /// Asset key, also used to build the preview image path
    #[serde(default, deserialize_with = "decode::text")]
    pub model: String,
    #[serde(default, deserialize_with = "decode::amount")]
    pub price: u64,
    #[serde(default, deserialize_with = "decode::text")]
    pub category: String,
    /// Storage capacity in ounces
    #[serde(default, deserialize_with = "decode::amount")]
    pub storage: u64,
    #[serde(default, deserialize_with = "decode::amount")]
    pub slots: u64,
    #[serde(default, deserialize_with = "decode::text")]
    pub description: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub storage_shop_name: String,
}

/// A wagon owned by the player. Identity is `plate`, a space distinct from catalog ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OwnedItem {
    #[serde(default, deserialize_with = "decode::text")]
    pub plate: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub id: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub label: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub model: String,
    #[serde(default, deserialize_with = "decode::amount")]
    pub price: u64,
    #[serde(default, deserialize_with = "decode::text")]
    pub category: String,
    #[serde(default, deserialize_with = "decode::amount")]
    pub storage: u64,
    #[serde(default, deserialize_with = "decode::amount")]
    pub slots: u64,
    #[serde(default, deserialize_with = "decode::text")]
    pub description: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub storage_shop_name: String,
    /// Parked and retrievable rather than spawned in the world
    #[serde(default, deserialize_with = "decode::flag")]
    pub stored: bool,
    #[serde(default, deserialize_with = "decode::flag")]
    pub is_active: bool,
}

/// Both collections pushed by the host.
///
/// Available items are only ever replaced wholesale. Owned items are replaced wholesale too, but also
/// patched in place for `stored`/`is_active` and removed one by one on deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStore {
    available: Vec<CatalogItem>,
    owned: Vec<OwnedItem>,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn available(&self) -> &[CatalogItem] {
        &self.available
    }

    #[must_use]
    pub fn owned(&self) -> &[OwnedItem] {
        &self.owned
    }

    pub fn replace_available(&mut self, items: Vec<CatalogItem>) {
        self.available = items;
    }

    pub fn replace_owned(&mut self, items: Vec<OwnedItem>) {
        self.owned = items;
    }

    #[must_use]
    pub fn find_available(&self, id: &str) -> Option<&CatalogItem> {
        self.available.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn find_owned(&self, plate: &str) -> Option<&OwnedItem> {
        self.owned.iter().find(|item| item.plate == plate)
    }

    /// Set the `stored` flag of one owned wagon. Returns whether a wagon matched.
    pub fn patch_owned_stored(&mut self, plate: &str, stored: bool) -> bool {
        match self.owned.iter_mut().find(|item| item.plate == plate) {
            Some(item) => {
                item.stored = stored;
                true
            }
            None => false,
        }
    }

    /// Mark `plate` as the single active wagon.
    ///
    /// Leaves every flag untouched when the plate is not owned, so a stale push cannot leave the
    /// player with no active wagon at all.
    pub fn patch_owned_active(&mut self, plate: &str) -> bool {
        if self.find_owned(plate).is_none() {
            return false;
        }
        for item in &mut self.owned {
            item.is_active = item.plate == plate;
        }
        true
    }

    /// Remove an owned wagon by plate. Removing an absent plate is a no-op.
    pub fn remove_owned(&mut self, plate: &str) -> bool {
        let before = self.owned.len();
        self.owned.retain(|item| item.plate != plate);
        self.owned.len() != before
    }

    /// Distinct available categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for item in &self.available {
            if !item.category.is_empty() && !seen.contains(&item.category) {
                seen.push(item.category.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(plate: &str, stored: bool, is_active: bool) -> OwnedItem {
        OwnedItem {
            plate: plate.to_string(),
            label: format!("Wagon {plate}"),
            price: 100,
            stored,
            is_active,
            ..OwnedItem::default()
        }
    }

    fn store_with_owned() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.replace_owned(vec![
            owned("P1", true, false),
            owned("P2", false, true),
            owned("P3", true, false),
        ]);
        store
    }

    #[test]
    fn unstore_patch_touches_only_the_target() {
        let mut store = store_with_owned();
        assert!(store.patch_owned_stored("P1", false));
        assert!(!store.find_owned("P1").unwrap().stored);
        assert!(store.find_owned("P3").unwrap().stored);
        assert!(!store.find_owned("P2").unwrap().stored);
        assert!(!store.patch_owned_stored("missing", false));
    }

    #[test]
    fn active_patch_keeps_exactly_one_active() {
        let mut store = store_with_owned();
        assert!(store.patch_owned_active("P3"));
        let active: Vec<_> = store
            .owned()
            .iter()
            .filter(|w| w.is_active)
            .map(|w| w.plate.as_str())
            .collect();
        assert_eq!(active, vec!["P3"]);
    }

    #[test]
    fn active_patch_with_absent_plate_changes_nothing() {
        let mut store = store_with_owned();
        let before = store.clone();
        assert!(!store.patch_owned_active("nope"));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_owned_is_idempotent() {
        let mut once = store_with_owned();
        assert!(once.remove_owned("P2"));
        let mut twice = once.clone();
        assert!(!twice.remove_owned("P2"));
        assert_eq!(once, twice);
        assert_eq!(once.owned().len(), 2);
    }

    #[test]
    fn replacement_is_wholesale() {
        let mut store = store_with_owned();
        store.replace_owned(vec![owned("P9", false, false)]);
        assert_eq!(store.owned().len(), 1);
        assert!(store.find_owned("P1").is_none());
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let mut store = CatalogStore::new();
        let item = |id: &str, category: &str| CatalogItem {
            id: id.to_string(),
            category: category.to_string(),
            ..CatalogItem::default()
        };
        store.replace_available(vec![
            item("a", "wagon"),
            item("b", "cart"),
            item("c", "wagon"),
            item("d", ""),
        ]);
        assert_eq!(store.categories(), vec!["wagon", "cart"]);
    }

    #[test]
    fn owned_item_decodes_numeric_plate_and_flags() {
        let json = r#"{"plate": 4411, "label": "Hunter", "price": 250.0, "stored": 1, "is_active": 0}"#;
        let item: OwnedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.plate, "4411");
        assert_eq!(item.price, 250);
        assert!(item.stored);
        assert!(!item.is_active);
        assert!(item.storage_shop_name.is_empty());
    }
}
