//! The shop state container.
//!
//! All mutation goes through [`ShopController::handle_message`] (host pushes) and
//! [`ShopController::apply_intent`] (user input). Each call runs to completion and returns the
//! commands the host should receive; nothing here performs I/O.
use crate::catalog::{CatalogItem, CatalogStore, OwnedItem};
use crate::config::ShopConfig;
use crate::filter::{FilterState, PriceRange, SortKey, display_list};
use crate::lifecycle::{LifecyclePhase, ShopLifecycle};
use crate::protocol::{HostCommand, HostMessage, TransferDestination};
use crate::selection::{ActionButtons, ButtonState, ItemRef, Resolved, SelectionFacts, selection_facts};
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Commands produced by a single event.
pub type Effects = SmallVec<[HostCommand; 2]>;

/// Which list the shop is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopTab {
    #[default]
    #[serde(alias = "buy")]
    Available,
    Owned,
}

/// Everything the player can do in the shop window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum UserIntent {
    SwitchView { tab: ShopTab },
    SetCategory { category: String },
    SetSort { sort: SortKey },
    /// Raw text of the min/max inputs
    ApplyPriceInputs {
        #[serde(default)]
        min: String,
        #[serde(default)]
        max: String,
    },
    Select { item: ItemRef },
    CloseDetail,
    CloseTransfer,
    Purchase,
    Spawn,
    Unstore,
    RequestTransfer,
    ConfirmTransfer { shop_index: u64 },
    Sell,
    SetActive,
    /// Cancel key; only honored while the shop is open
    Cancel,
    Close,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TransferState {
    open: bool,
    destinations: Vec<TransferDestination>,
    latest_request: Option<u64>,
    next_request_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopController {
    config: ShopConfig,
    store: CatalogStore,
    filters: FilterState,
    filter_epoch: u32,
    tab: ShopTab,
    selection: Option<ItemRef>,
    detail_open: bool,
    transfer: TransferState,
    lifecycle: ShopLifecycle,
    player_cash: u64,
}

impl Default for ShopController {
    fn default() -> Self {
        Self::new(ShopConfig::default())
    }
}

impl ShopController {
    #[must_use]
    pub fn new(config: ShopConfig) -> Self {
        let lifecycle = ShopLifecycle::new(config.closing_guard_ms);
        Self {
            config,
            store: CatalogStore::new(),
            filters: FilterState::default(),
            filter_epoch: 0,
            tab: ShopTab::Available,
            selection: None,
            detail_open: false,
            transfer: TransferState::default(),
            lifecycle,
            player_cash: 0,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ShopConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Bumped every time the filters are reset to defaults.
    #[must_use]
    pub const fn filter_epoch(&self) -> u32 {
        self.filter_epoch
    }

    #[must_use]
    pub const fn tab(&self) -> ShopTab {
        self.tab
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&ItemRef> {
        self.selection.as_ref()
    }

    #[must_use]
    pub const fn detail_open(&self) -> bool {
        self.detail_open
    }

    #[must_use]
    pub const fn transfer_open(&self) -> bool {
        self.transfer.open
    }

    #[must_use]
    pub fn transfer_destinations(&self) -> &[TransferDestination] {
        &self.transfer.destinations
    }

    #[must_use]
    pub const fn lifecycle(&self) -> &ShopLifecycle {
        &self.lifecycle
    }

    #[must_use]
    pub const fn phase(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    #[must_use]
    pub const fn player_cash(&self) -> u64 {
        self.player_cash
    }

    /// The selection looked up in the current collections.
    #[must_use]
    pub fn resolved_selection(&self) -> Option<Resolved<'_>> {
        self.selection.as_ref()?.resolve(&self.store)
    }

    #[must_use]
    pub fn selection_facts(&self) -> Option<SelectionFacts> {
        self.resolved_selection()
            .map(|resolved| selection_facts(resolved, self.player_cash, self.config.sell_back_pct))
    }

    /// Filtered and sorted catalog for the available view.
    #[must_use]
    pub fn display_list(&self) -> Vec<&CatalogItem> {
        display_list(self.store.available(), &self.filters)
    }

    /// Let a pending close settle without any other event.
    pub fn tick(&mut self, now_ms: u64) {
        self.lifecycle.settle(now_ms);
    }

    /// Apply one host push.
    pub fn handle_message(&mut self, message: HostMessage, now_ms: u64) -> Effects {
        self.lifecycle.settle(now_ms);

        if message.replaces_catalog() && !self.lifecycle.accepts_catalog(now_ms) {
            debug!("suppressed {} while the shop is closing", message.kind());
            return Effects::new();
        }

        match message {
            HostMessage::Open => {
                self.lifecycle.open();
                self.enter_tab(ShopTab::Available);
                Effects::new()
            }
            HostMessage::Close => {
                self.begin_closing(now_ms);
                Effects::new()
            }
            HostMessage::SetAvailable { items } => {
                self.store.replace_available(items);
                self.revalidate_selection();
                Effects::new()
            }
            HostMessage::SetOwned { items } => {
                self.store.replace_owned(items);
                self.revalidate_selection();
                Effects::new()
            }
            HostMessage::SetCash { cash } => {
                self.player_cash = cash;
                Effects::new()
            }
            HostMessage::Spawned { label, plate } => {
                self.begin_closing(now_ms);
                smallvec![HostCommand::notify(format!("{label} spawned! Plate: {plate}"))]
            }
            HostMessage::Deleted { plate } => {
                self.store.remove_owned(&plate);
                self.revalidate_selection();
                smallvec![HostCommand::notify("Wagon deleted permanently")]
            }
            HostMessage::PurchaseSuccess => {
                self.enter_tab(ShopTab::Owned);
                smallvec![
                    HostCommand::RequestShopData,
                    HostCommand::notify("Wagon purchased!")
                ]
            }
            HostMessage::Unstored { plate } => {
                self.store.patch_owned_stored(&plate, false);
                Effects::new()
            }
            HostMessage::TransferOptions {
                destinations,
                request_id,
            } => {
                self.receive_transfer_options(destinations, request_id);
                Effects::new()
            }
            HostMessage::TransferSuccess => {
                self.clear();
                smallvec![HostCommand::notify("Wagon transferred successfully!")]
            }
            HostMessage::ActiveChanged { plate } => {
                self.store.patch_owned_active(&plate);
                smallvec![HostCommand::notify("Active wagon changed successfully!")]
            }
            HostMessage::Unknown => {
                debug!("ignored unknown host message");
                Effects::new()
            }
        }
    }

    /// Apply one user interaction.
    pub fn apply_intent(&mut self, intent: UserIntent, now_ms: u64) -> Effects {
        self.lifecycle.settle(now_ms);

        match intent {
            UserIntent::SwitchView { tab } => {
                self.enter_tab(tab);
                Effects::new()
            }
            UserIntent::SetCategory { category } => {
                self.filters.category = category.into();
                Effects::new()
            }
            UserIntent::SetSort { sort } => {
                self.filters.sort = sort;
                Effects::new()
            }
            UserIntent::ApplyPriceInputs { min, max } => {
                self.filters.price = PriceRange::from_inputs(&min, &max);
                Effects::new()
            }
            UserIntent::Select { item } => {
                self.select(item);
                Effects::new()
            }
            UserIntent::CloseDetail | UserIntent::CloseTransfer => {
                self.clear();
                Effects::new()
            }
            UserIntent::Purchase => self.purchase(),
            UserIntent::Spawn => self.spawn(now_ms),
            UserIntent::Unstore => self.unstore(now_ms),
            UserIntent::RequestTransfer => self.request_transfer(),
            UserIntent::ConfirmTransfer { shop_index } => self.confirm_transfer(shop_index),
            UserIntent::Sell => self.sell(),
            UserIntent::SetActive => self.set_active(),
            UserIntent::Cancel => {
                if !self.lifecycle.is_open() {
                    return Effects::new();
                }
                self.begin_closing(now_ms);
                smallvec![HostCommand::Close]
            }
            UserIntent::Close => {
                self.begin_closing(now_ms);
                smallvec![HostCommand::Close]
            }
        }
    }

    /// Open the detail modal for a wagon. A reference that no longer resolves is ignored.
    pub fn select(&mut self, item: ItemRef) {
        if !self.lifecycle.is_open() {
            debug!("select ignored while the shop is not open");
            return;
        }
        if item.resolve(&self.store).is_none() {
            debug!("select ignored, {} is not in the current catalog", item.key());
            return;
        }
        self.selection = Some(item);
        self.detail_open = true;
        self.close_transfer_modal();
    }

    /// Drop the selection and hide both modals.
    pub fn clear(&mut self) {
        self.selection = None;
        self.detail_open = false;
        self.close_transfer_modal();
    }

    fn purchase(&mut self) -> Effects {
        let Some(Resolved::Available(item)) = self.resolved_selection() else {
            return Effects::new();
        };
        if !self.button(|b| b.purchase).is_enabled() {
            debug!("purchase ignored, {} is not affordable", item.id);
            return Effects::new();
        }
        let command = HostCommand::Purchase {
            id: item.id.clone(),
        };
        self.clear();
        smallvec![command]
    }

    fn spawn(&mut self, now_ms: u64) -> Effects {
        let Some(plate) = self.owned_action(|b| b.spawn).map(|w| w.plate.clone()) else {
            return Effects::new();
        };
        self.begin_closing(now_ms);
        smallvec![HostCommand::Spawn { plate }]
    }

    fn unstore(&mut self, now_ms: u64) -> Effects {
        let Some(plate) = self.owned_action(|b| b.unstore).map(|w| w.plate.clone()) else {
            return Effects::new();
        };
        self.begin_closing(now_ms);
        smallvec![HostCommand::Unstore { plate }]
    }

    fn request_transfer(&mut self) -> Effects {
        let Some(plate) = self.owned_action(|b| b.transfer).map(|w| w.plate.clone()) else {
            return Effects::new();
        };
        let request_id = self.transfer.next_request_id;
        self.transfer.next_request_id = request_id.wrapping_add(1);
        self.transfer.latest_request = Some(request_id);
        // Selection stays so the confirmation can bind to it.
        self.detail_open = false;
        smallvec![HostCommand::RequestTransferData { plate, request_id }]
    }

    fn confirm_transfer(&mut self, shop_index: u64) -> Effects {
        if !self.transfer.open {
            return Effects::new();
        }
        if !self
            .transfer
            .destinations
            .iter()
            .any(|d| d.shop_index == shop_index)
        {
            debug!("transfer ignored, destination {shop_index} was not offered");
            return Effects::new();
        }
        let Some(plate) = self.owned_action(|b| b.transfer).map(|w| w.plate.clone()) else {
            return Effects::new();
        };
        // Hidden optimistically; the host only reports the outcome as a notification.
        self.clear();
        smallvec![HostCommand::Transfer {
            plate,
            destination_index: shop_index,
        }]
    }

    fn sell(&mut self) -> Effects {
        let Some((plate, price)) = self
            .owned_action(|b| b.sell)
            .map(|w| (w.plate.clone(), w.price))
        else {
            return Effects::new();
        };
        self.clear();
        smallvec![HostCommand::SellConfirm { plate, price }]
    }

    fn set_active(&mut self) -> Effects {
        let Some(plate) = self.owned_action(|b| b.set_active).map(|w| w.plate.clone()) else {
            return Effects::new();
        };
        self.clear();
        smallvec![HostCommand::SetActive { plate }]
    }

    fn button(&self, pick: impl FnOnce(&ActionButtons) -> ButtonState) -> ButtonState {
        self.selection_facts()
            .map_or(ButtonState::Hidden, |facts| pick(&facts.buttons))
    }

    /// The selected owned wagon, when the picked action button is enabled for it.
    fn owned_action(
        &self,
        pick: impl FnOnce(&ActionButtons) -> ButtonState,
    ) -> Option<&OwnedItem> {
        let Some(Resolved::Owned(item)) = self.resolved_selection() else {
            return None;
        };
        if self.button(pick).is_enabled() {
            Some(item)
        } else {
            debug!("action ignored for {}, button not enabled", item.plate);
            None
        }
    }

    fn receive_transfer_options(
        &mut self,
        destinations: Vec<TransferDestination>,
        request_id: Option<u64>,
    ) {
        if !self.lifecycle.is_open() {
            debug!("transfer options ignored while the shop is not open");
            return;
        }
        if !matches!(self.resolved_selection(), Some(Resolved::Owned(_))) {
            debug!("transfer options ignored without a selected owned wagon");
            return;
        }
        match (request_id, self.transfer.latest_request) {
            (Some(got), Some(latest)) if got < latest => {
                debug!("discarded stale transfer options {got}, latest is {latest}");
            }
            _ => {
                self.transfer.destinations = destinations;
                self.transfer.open = true;
                self.detail_open = false;
            }
        }
    }

    fn enter_tab(&mut self, tab: ShopTab) {
        self.tab = tab;
        if tab == ShopTab::Available {
            self.filters.reset();
            self.filter_epoch = self.filter_epoch.wrapping_add(1);
        }
    }

    fn begin_closing(&mut self, now_ms: u64) {
        self.lifecycle.begin_closing(now_ms);
        self.clear();
    }

    fn revalidate_selection(&mut self) {
        if self.selection.is_some() && self.resolved_selection().is_none() {
            debug!("selection dropped, its wagon left the catalog");
            self.clear();
        }
    }

    fn close_transfer_modal(&mut self) {
        self.transfer.open = false;
        self.transfer.destinations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_item(id: &str, price: u64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            label: format!("Wagon {id}"),
            price,
            category: "wagon".into(),
            ..CatalogItem::default()
        }
    }

    fn owned_item(plate: &str, stored: bool) -> OwnedItem {
        OwnedItem {
            plate: plate.to_string(),
            label: format!("Owned {plate}"),
            price: 100,
            stored,
            ..OwnedItem::default()
        }
    }

    fn open_shop() -> ShopController {
        let mut shop = ShopController::default();
        shop.handle_message(HostMessage::Open, 0);
        shop.handle_message(
            HostMessage::SetAvailable {
                items: vec![catalog_item("A", 100), catalog_item("B", 500)],
            },
            0,
        );
        shop.handle_message(
            HostMessage::SetOwned {
                items: vec![owned_item("P1", true), owned_item("P2", false)],
            },
            0,
        );
        shop.handle_message(HostMessage::SetCash { cash: 200 }, 0);
        shop
    }

    fn select(shop: &mut ShopController, item: ItemRef) {
        shop.apply_intent(UserIntent::Select { item }, 0);
    }

    #[test]
    fn actions_without_selection_emit_nothing() {
        let mut shop = open_shop();
        for intent in [
            UserIntent::Purchase,
            UserIntent::Spawn,
            UserIntent::Unstore,
            UserIntent::RequestTransfer,
            UserIntent::ConfirmTransfer { shop_index: 0 },
            UserIntent::Sell,
            UserIntent::SetActive,
        ] {
            assert!(shop.apply_intent(intent, 0).is_empty());
        }
    }

    #[test]
    fn purchase_emits_id_and_clears_selection() {
        let mut shop = open_shop();
        select(&mut shop, ItemRef::Available("A".into()));
        assert!(shop.detail_open());
        let effects = shop.apply_intent(UserIntent::Purchase, 0);
        assert_eq!(effects.as_slice(), &[HostCommand::Purchase { id: "A".into() }]);
        assert!(shop.selection().is_none());
        assert!(!shop.detail_open());
    }

    #[test]
    fn unaffordable_purchase_is_ignored() {
        let mut shop = open_shop();
        select(&mut shop, ItemRef::Available("B".into()));
        assert!(shop.apply_intent(UserIntent::Purchase, 0).is_empty());
        assert!(shop.detail_open());
    }

    #[test]
    fn spawn_requires_unstored_wagon_and_closes_shop() {
        let mut shop = open_shop();
        select(&mut shop, ItemRef::Owned("P1".into()));
        assert!(shop.apply_intent(UserIntent::Spawn, 0).is_empty());

        select(&mut shop, ItemRef::Owned("P2".into()));
        let effects = shop.apply_intent(UserIntent::Spawn, 10);
        assert_eq!(effects.as_slice(), &[HostCommand::Spawn { plate: "P2".into() }]);
        assert!(shop.lifecycle().is_closing());
        assert!(shop.selection().is_none());
    }

    #[test]
    fn sell_sends_purchase_price() {
        let mut shop = open_shop();
        select(&mut shop, ItemRef::Owned("P2".into()));
        let effects = shop.apply_intent(UserIntent::Sell, 0);
        assert_eq!(
            effects.as_slice(),
            &[HostCommand::SellConfirm {
                plate: "P2".into(),
                price: 100
            }]
        );
        assert_eq!(shop.selection(), None);
    }

    #[test]
    fn select_missing_wagon_is_a_no_op() {
        let mut shop = open_shop();
        select(&mut shop, ItemRef::Owned("ghost".into()));
        assert!(shop.selection().is_none());
        assert!(!shop.detail_open());
    }

    #[test]
    fn select_is_ignored_while_closed() {
        let mut shop = ShopController::default();
        shop.handle_message(
            HostMessage::SetAvailable {
                items: vec![catalog_item("A", 1)],
            },
            0,
        );
        select(&mut shop, ItemRef::Available("A".into()));
        assert!(shop.selection().is_none());
    }

    #[test]
    fn switching_to_available_resets_filters() {
        let mut shop = open_shop();
        shop.apply_intent(
            UserIntent::SetCategory {
                category: "cart".into(),
            },
            0,
        );
        shop.apply_intent(
            UserIntent::SetSort {
                sort: SortKey::PriceDescending,
            },
            0,
        );
        shop.apply_intent(
            UserIntent::ApplyPriceInputs {
                min: "10".into(),
                max: "20".into(),
            },
            0,
        );
        assert!(!shop.filters().is_default());
        shop.apply_intent(
            UserIntent::SwitchView {
                tab: ShopTab::Owned,
            },
            0,
        );
        assert!(!shop.filters().is_default());
        let epoch = shop.filter_epoch();
        shop.apply_intent(
            UserIntent::SwitchView {
                tab: ShopTab::Available,
            },
            0,
        );
        assert!(shop.filters().is_default());
        assert_eq!(shop.filter_epoch(), epoch + 1);
    }

    #[test]
    fn cancel_only_honored_while_open() {
        let mut shop = ShopController::default();
        assert!(shop.apply_intent(UserIntent::Cancel, 0).is_empty());
        shop.handle_message(HostMessage::Open, 0);
        let effects = shop.apply_intent(UserIntent::Cancel, 5);
        assert_eq!(effects.as_slice(), &[HostCommand::Close]);
        assert!(shop.lifecycle().is_closing());
        assert!(shop.apply_intent(UserIntent::Cancel, 6).is_empty());
    }

    #[test]
    fn replacement_drops_dangling_selection() {
        let mut shop = open_shop();
        select(&mut shop, ItemRef::Available("A".into()));
        shop.handle_message(
            HostMessage::SetAvailable {
                items: vec![catalog_item("B", 500)],
            },
            0,
        );
        assert!(shop.selection().is_none());
        assert!(!shop.detail_open());
    }

    #[test]
    fn replacement_keeps_selection_that_still_exists() {
        let mut shop = open_shop();
        select(&mut shop, ItemRef::Owned("P1".into()));
        shop.handle_message(
            HostMessage::SetOwned {
                items: vec![owned_item("P1", false)],
            },
            0,
        );
        assert_eq!(shop.selection(), Some(&ItemRef::Owned("P1".into())));
        assert!(shop.selection_facts().unwrap().buttons.spawn.is_enabled());
    }

    #[test]
    fn purchase_success_switches_to_owned_and_refreshes() {
        let mut shop = open_shop();
        let effects = shop.handle_message(HostMessage::PurchaseSuccess, 0);
        assert_eq!(shop.tab(), ShopTab::Owned);
        assert_eq!(effects[0], HostCommand::RequestShopData);
        assert_eq!(
            effects[1],
            HostCommand::Notify {
                message: "Wagon purchased!".into()
            }
        );
    }

    #[test]
    fn spawned_push_closes_and_notifies() {
        let mut shop = open_shop();
        let effects = shop.handle_message(
            HostMessage::Spawned {
                label: "Hunter".into(),
                plate: "P2".into(),
            },
            0,
        );
        assert!(shop.lifecycle().is_closing());
        assert_eq!(
            effects.as_slice(),
            &[HostCommand::Notify {
                message: "Hunter spawned! Plate: P2".into()
            }]
        );
    }

    #[test]
    fn cash_updates_are_not_suppressed_while_closing() {
        let mut shop = open_shop();
        shop.handle_message(HostMessage::Close, 100);
        shop.handle_message(HostMessage::SetCash { cash: 999 }, 150);
        assert_eq!(shop.player_cash(), 999);
    }
}
