//! Selection tracking and the derived detail-modal facts.
use crate::catalog::{CatalogItem, CatalogStore, OwnedItem};
use crate::numbers::percent_ceil;
use serde::{Deserialize, Serialize};

/// Reference to a wagon, tagged with the collection it lives in.
///
/// Catalog ids and plates are separate identity spaces; equal strings in both mean different wagons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemRef {
    Available(String),
    Owned(String),
}

impl ItemRef {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Available(id) => id,
            Self::Owned(plate) => plate,
        }
    }

    /// Look the reference up in the current collections.
    #[must_use]
    pub fn resolve<'a>(&self, store: &'a CatalogStore) -> Option<Resolved<'a>> {
        match self {
            Self::Available(id) => store.find_available(id).map(Resolved::Available),
            Self::Owned(plate) => store.find_owned(plate).map(Resolved::Owned),
        }
    }
}

/// A selection reference resolved against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Available(&'a CatalogItem),
    Owned(&'a OwnedItem),
}

impl Resolved<'_> {
    #[must_use]
    pub const fn price(&self) -> u64 {
        match self {
            Self::Available(item) => item.price,
            Self::Owned(item) => item.price,
        }
    }
}

/// How an action button presents itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    #[default]
    Hidden,
    Disabled,
    Enabled,
}

impl ButtonState {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    const fn shown_if(condition: bool) -> Self {
        if condition { Self::Enabled } else { Self::Hidden }
    }
}

/// Button states for the detail modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButtons {
    pub purchase: ButtonState,
    pub set_active: ButtonState,
    pub spawn: ButtonState,
    pub unstore: ButtonState,
    pub transfer: ButtonState,
    pub sell: ButtonState,
}

/// Facts derived from the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionFacts {
    /// `price <= cash`; only meaningful for catalog wagons
    pub affordable: bool,
    /// Buy-back price; only present for owned wagons
    pub sell_price: Option<u64>,
    pub buttons: ActionButtons,
}

/// Buy-back price for an owned wagon, rounded up to the next whole unit.
#[must_use]
pub fn sell_price(price: u64, sell_back_pct: u64) -> u64 {
    percent_ceil(price, sell_back_pct)
}

#[must_use]
pub fn selection_facts(resolved: Resolved<'_>, player_cash: u64, sell_back_pct: u64) -> SelectionFacts {
    match resolved {
        Resolved::Available(item) => {
            let affordable = item.price <= player_cash;
            SelectionFacts {
                affordable,
                sell_price: None,
                buttons: ActionButtons {
                    purchase: if affordable {
                        ButtonState::Enabled
                    } else {
                        ButtonState::Disabled
                    },
                    ..ActionButtons::default()
                },
            }
        }
        Resolved::Owned(item) => SelectionFacts {
            affordable: false,
            sell_price: Some(sell_price(item.price, sell_back_pct)),
            buttons: ActionButtons {
                purchase: ButtonState::Hidden,
                set_active: ButtonState::Enabled,
                spawn: ButtonState::shown_if(!item.stored),
                unstore: ButtonState::shown_if(item.stored),
                transfer: ButtonState::shown_if(item.stored),
                sell: ButtonState::Enabled,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.replace_available(vec![CatalogItem {
            id: "P1".into(),
            price: 300,
            ..CatalogItem::default()
        }]);
        store.replace_owned(vec![
            OwnedItem {
                plate: "P1".into(),
                price: 100,
                stored: true,
                ..OwnedItem::default()
            },
            OwnedItem {
                plate: "P2".into(),
                price: 75,
                stored: false,
                ..OwnedItem::default()
            },
        ]);
        store
    }

    #[test]
    fn same_key_resolves_per_origin() {
        let store = store();
        let available = ItemRef::Available("P1".into()).resolve(&store).unwrap();
        let owned = ItemRef::Owned("P1".into()).resolve(&store).unwrap();
        assert_eq!(available.price(), 300);
        assert_eq!(owned.price(), 100);
        assert!(ItemRef::Owned("P9".into()).resolve(&store).is_none());
    }

    #[test]
    fn owned_sell_price_rounds_up_half() {
        assert_eq!(sell_price(100, 50), 50);
        assert_eq!(sell_price(75, 50), 38);
        assert_eq!(sell_price(1, 50), 1);
    }

    #[test]
    fn stored_wagon_offers_unstore_and_transfer() {
        let store = store();
        let resolved = ItemRef::Owned("P1".into()).resolve(&store).unwrap();
        let facts = selection_facts(resolved, 0, 50);
        assert_eq!(facts.sell_price, Some(50));
        assert_eq!(facts.buttons.spawn, ButtonState::Hidden);
        assert!(facts.buttons.unstore.is_enabled());
        assert!(facts.buttons.transfer.is_enabled());
        assert!(facts.buttons.sell.is_enabled());
        assert!(facts.buttons.set_active.is_enabled());
        assert!(!facts.buttons.purchase.is_visible());
    }

    #[test]
    fn spawned_wagon_offers_spawn_only() {
        let store = store();
        let resolved = ItemRef::Owned("P2".into()).resolve(&store).unwrap();
        let facts = selection_facts(resolved, 0, 50);
        assert!(facts.buttons.spawn.is_enabled());
        assert!(!facts.buttons.unstore.is_visible());
        assert!(!facts.buttons.transfer.is_visible());
    }

    #[test]
    fn catalog_wagon_purchase_tracks_cash() {
        let store = store();
        let resolved = ItemRef::Available("P1".into()).resolve(&store).unwrap();
        let poor = selection_facts(resolved, 299, 50);
        assert!(!poor.affordable);
        assert_eq!(poor.buttons.purchase, ButtonState::Disabled);
        let rich = selection_facts(resolved, 300, 50);
        assert!(rich.affordable);
        assert!(rich.buttons.purchase.is_enabled());
        assert!(rich.sell_price.is_none());
        assert!(!rich.buttons.sell.is_visible());
    }
}
