//! Pure projection of shop state into display fragments.
//!
//! [`project`] reads the controller and nothing else, so it can be called any number of times and
//! always describes the current state. Painting the fragments is the front end's job.
use crate::catalog::{CatalogItem, OwnedItem};
use crate::controller::{ShopController, ShopTab};
use crate::filter::{ALL_CATEGORIES, SortKey};
use crate::numbers::format_currency;
use crate::selection::{ActionButtons, Resolved};
use serde::Serialize;

pub const EMPTY_AVAILABLE: &str = "No wagons available for purchase";
pub const EMPTY_FILTERED: &str = "No wagons match your filters";
pub const EMPTY_OWNED: &str = "You don't own any wagons yet";
pub const EMPTY_DESTINATIONS: &str = "No available destinations";
pub const STATUS_AVAILABLE: &str = "Available";
pub const VIEW_DETAILS: &str = "View Details";
pub const MANAGE: &str = "Manage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopFrame {
    pub visible: bool,
    pub tab: ShopTab,
    pub cash_label: String,
    pub filters: FilterControls,
    /// Only shown on the available tab
    pub result_count: Option<String>,
    pub list: ListFragment,
    pub detail: Option<DetailModal>,
    pub transfer: Option<TransferModal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControls {
    /// `(value, label)` pairs, `all` first
    pub categories: Vec<(String, String)>,
    pub category: String,
    pub sort: SortKey,
    pub min_input: String,
    pub max_input: String,
    /// Changes whenever the filters reset, so uncontrolled inputs can remount
    pub epoch: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListFragment {
    Placeholder { message: String },
    Available { cards: Vec<AvailableCard> },
    Owned { cards: Vec<OwnedCard> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableCard {
    pub id: String,
    pub label: String,
    pub category: String,
    pub price_label: String,
    pub storage_label: String,
    pub slots_label: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnedCard {
    pub plate: String,
    pub label: String,
    pub plate_label: String,
    pub location: String,
    pub storage_label: String,
    pub slots_label: String,
    pub description: String,
    pub image_url: String,
    pub active: bool,
    pub stored: bool,
    pub status_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailModal {
    pub title: String,
    pub model: String,
    pub price_label: String,
    pub storage_label: String,
    pub slots_label: String,
    pub location: String,
    pub description: String,
    pub active_indicator: bool,
    pub sell_price_label: Option<String>,
    pub purchase_label: String,
    pub buttons: ActionButtons,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferModal {
    pub options: Vec<TransferOption>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferOption {
    pub shop_index: u64,
    pub name: String,
    pub distance_label: String,
    pub cost_label: String,
}

/// Project the whole shop.
#[must_use]
pub fn project(shop: &ShopController) -> ShopFrame {
    let symbol = shop.config().currency_symbol.as_str();
    let (list, result_count) = match shop.tab() {
        ShopTab::Available => {
            let (list, count) = available_fragment(shop);
            (list, Some(result_count_label(count)))
        }
        ShopTab::Owned => (owned_fragment(shop), None),
    };

    ShopFrame {
        visible: shop.lifecycle().is_open(),
        tab: shop.tab(),
        cash_label: format_currency(symbol, shop.player_cash()),
        filters: filter_controls(shop),
        result_count,
        list,
        detail: detail_modal(shop),
        transfer: transfer_modal(shop),
    }
}

#[must_use]
pub fn result_count_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Showing {count} wagon{plural}")
}

fn filter_controls(shop: &ShopController) -> FilterControls {
    let filters = shop.filters();
    let mut categories = vec![(ALL_CATEGORIES.to_string(), "All Categories".to_string())];
    categories.extend(
        shop.store()
            .categories()
            .into_iter()
            .map(|c| (c.clone(), title_case(&c))),
    );
    FilterControls {
        categories,
        category: filters.category.as_str().to_string(),
        sort: filters.sort,
        min_input: match filters.price.min {
            0 => String::new(),
            min => min.to_string(),
        },
        max_input: filters.price.max.map(|m| m.to_string()).unwrap_or_default(),
        epoch: shop.filter_epoch(),
    }
}

fn available_fragment(shop: &ShopController) -> (ListFragment, usize) {
    if shop.store().available().is_empty() {
        return (placeholder(EMPTY_AVAILABLE), 0);
    }
    let list = shop.display_list();
    if list.is_empty() {
        return (placeholder(EMPTY_FILTERED), 0);
    }
    let count = list.len();
    let cards = list
        .into_iter()
        .map(|item| available_card(shop, item))
        .collect();
    (ListFragment::Available { cards }, count)
}

fn owned_fragment(shop: &ShopController) -> ListFragment {
    let owned = shop.store().owned();
    if owned.is_empty() {
        return placeholder(EMPTY_OWNED);
    }
    ListFragment::Owned {
        cards: owned.iter().map(|item| owned_card(shop, item)).collect(),
    }
}

fn available_card(shop: &ShopController, item: &CatalogItem) -> AvailableCard {
    AvailableCard {
        id: item.id.clone(),
        label: item.label.clone(),
        category: or_fallback(&item.category, "Other"),
        price_label: format_currency(&shop.config().currency_symbol, item.price),
        storage_label: storage_label(item.storage),
        slots_label: format!("{} slots", item.slots),
        description: item.description.clone(),
        image_url: shop.config().image_url(&item.model),
    }
}

fn owned_card(shop: &ShopController, item: &OwnedItem) -> OwnedCard {
    OwnedCard {
        plate: item.plate.clone(),
        label: item.label.clone(),
        plate_label: format!("Plate: {}", item.plate),
        location: or_fallback(&item.storage_shop_name, "Unknown"),
        storage_label: storage_label(item.storage),
        slots_label: format!("{} slots", item.slots),
        description: item.description.clone(),
        image_url: shop.config().image_url(&item.model),
        active: item.is_active,
        stored: item.stored,
        status_label: if item.stored { "Stored" } else { "Owned" }.to_string(),
    }
}

fn detail_modal(shop: &ShopController) -> Option<DetailModal> {
    if !shop.detail_open() {
        return None;
    }
    let resolved = shop.resolved_selection()?;
    let facts = shop.selection_facts()?;
    let symbol = shop.config().currency_symbol.as_str();

    let (label, model, price, storage, slots, location, description, active) = match resolved {
        Resolved::Available(item) => (
            &item.label,
            &item.model,
            item.price,
            item.storage,
            item.slots,
            &item.storage_shop_name,
            &item.description,
            false,
        ),
        Resolved::Owned(item) => (
            &item.label,
            &item.model,
            item.price,
            item.storage,
            item.slots,
            &item.storage_shop_name,
            &item.description,
            item.is_active,
        ),
    };

    Some(DetailModal {
        title: label.clone(),
        model: model.clone(),
        price_label: format_currency(symbol, price),
        storage_label: storage_label(storage),
        slots_label: slots.to_string(),
        location: or_fallback(location, "Unknown"),
        description: or_fallback(description, "No description"),
        active_indicator: active,
        sell_price_label: facts.sell_price.map(|p| format_currency(symbol, p)),
        purchase_label: if facts.affordable {
            "Purchase Wagon"
        } else {
            "Not Enough Cash"
        }
        .to_string(),
        buttons: facts.buttons,
    })
}

fn transfer_modal(shop: &ShopController) -> Option<TransferModal> {
    if !shop.transfer_open() {
        return None;
    }
    let symbol = shop.config().currency_symbol.as_str();
    let options: Vec<TransferOption> = shop
        .transfer_destinations()
        .iter()
        .map(|d| TransferOption {
            shop_index: d.shop_index,
            name: d.name.clone(),
            distance_label: format!("Distance: {}m", d.distance),
            cost_label: format!("Transfer Cost: {symbol}{}", d.cost),
        })
        .collect();
    let empty_message = options.is_empty().then(|| EMPTY_DESTINATIONS.to_string());
    Some(TransferModal {
        options,
        empty_message,
    })
}

fn placeholder(message: &str) -> ListFragment {
    ListFragment::Placeholder {
        message: message.to_string(),
    }
}

fn storage_label(storage: u64) -> String {
    format!("{storage} oz")
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::UserIntent;
    use crate::protocol::{HostMessage, TransferDestination};
    use crate::selection::ItemRef;

    fn item(id: &str, price: u64, category: &str) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            label: format!("Wagon {id}"),
            model: format!("model_{id}"),
            price,
            category: category.into(),
            storage: 400,
            slots: 12,
            ..CatalogItem::default()
        }
    }

    fn opened() -> ShopController {
        let mut shop = ShopController::default();
        shop.handle_message(HostMessage::Open, 0);
        shop
    }

    #[test]
    fn closed_shop_is_not_visible() {
        let frame = project(&ShopController::default());
        assert!(!frame.visible);
    }

    #[test]
    fn empty_catalog_renders_placeholder() {
        let frame = project(&opened());
        assert_eq!(
            frame.list,
            ListFragment::Placeholder {
                message: EMPTY_AVAILABLE.into()
            }
        );
        assert_eq!(frame.result_count.as_deref(), Some("Showing 0 wagons"));
    }

    #[test]
    fn filtered_out_catalog_renders_filter_placeholder() {
        let mut shop = opened();
        shop.handle_message(
            HostMessage::SetAvailable {
                items: vec![item("A", 10, "wagon")],
            },
            0,
        );
        shop.apply_intent(
            UserIntent::SetCategory {
                category: "cart".into(),
            },
            0,
        );
        let frame = project(&shop);
        assert_eq!(
            frame.list,
            ListFragment::Placeholder {
                message: EMPTY_FILTERED.into()
            }
        );
    }

    #[test]
    fn available_cards_follow_display_order() {
        let mut shop = opened();
        shop.handle_message(
            HostMessage::SetAvailable {
                items: vec![item("A", 1500, "wagon"), item("B", 50, "")],
            },
            0,
        );
        shop.apply_intent(
            UserIntent::SetSort {
                sort: SortKey::PriceAscending,
            },
            0,
        );
        let frame = project(&shop);
        let ListFragment::Available { cards } = frame.list else {
            panic!("expected available cards");
        };
        assert_eq!(cards[0].id, "B");
        assert_eq!(cards[0].category, "Other");
        assert_eq!(cards[1].price_label, "$1,500");
        assert_eq!(cards[1].storage_label, "400 oz");
        assert!(cards[1].image_url.ends_with("/model_A.jpg"));
        assert_eq!(frame.result_count.as_deref(), Some("Showing 2 wagons"));
        assert_eq!(frame.filters.categories.len(), 2);
    }

    #[test]
    fn projection_is_repeatable() {
        let mut shop = opened();
        shop.handle_message(
            HostMessage::SetAvailable {
                items: vec![item("A", 10, "wagon")],
            },
            0,
        );
        assert_eq!(project(&shop), project(&shop));
    }

    #[test]
    fn owned_detail_shows_sell_price_and_status() {
        let mut shop = opened();
        shop.handle_message(
            HostMessage::SetOwned {
                items: vec![OwnedItem {
                    plate: "P1".into(),
                    label: "Hunter".into(),
                    price: 101,
                    stored: true,
                    is_active: true,
                    ..OwnedItem::default()
                }],
            },
            0,
        );
        shop.apply_intent(
            UserIntent::SwitchView {
                tab: ShopTab::Owned,
            },
            0,
        );
        shop.apply_intent(
            UserIntent::Select {
                item: ItemRef::Owned("P1".into()),
            },
            0,
        );
        let frame = project(&shop);
        let ListFragment::Owned { cards } = &frame.list else {
            panic!("expected owned cards");
        };
        assert_eq!(cards[0].status_label, "Stored");
        assert_eq!(cards[0].location, "Unknown");
        assert!(cards[0].active);
        let detail = frame.detail.expect("detail modal");
        assert_eq!(detail.sell_price_label.as_deref(), Some("$51"));
        assert_eq!(detail.description, "No description");
        assert!(detail.active_indicator);
        assert!(frame.result_count.is_none());
    }

    #[test]
    fn transfer_modal_lists_destinations() {
        let mut shop = opened();
        shop.handle_message(
            HostMessage::SetOwned {
                items: vec![OwnedItem {
                    plate: "P1".into(),
                    stored: true,
                    ..OwnedItem::default()
                }],
            },
            0,
        );
        shop.apply_intent(
            UserIntent::Select {
                item: ItemRef::Owned("P1".into()),
            },
            0,
        );
        shop.apply_intent(UserIntent::RequestTransfer, 0);
        shop.handle_message(
            HostMessage::TransferOptions {
                destinations: vec![TransferDestination {
                    name: "Rhodes".into(),
                    distance: 1200,
                    cost: 1500,
                    shop_index: 4,
                }],
                request_id: None,
            },
            0,
        );
        let frame = project(&shop);
        assert!(frame.detail.is_none());
        let transfer = frame.transfer.expect("transfer modal");
        assert_eq!(transfer.options[0].distance_label, "Distance: 1200m");
        assert_eq!(transfer.options[0].cost_label, "Transfer Cost: $1500");
        assert!(transfer.empty_message.is_none());
    }

    #[test]
    fn result_count_singular() {
        assert_eq!(result_count_label(1), "Showing 1 wagon");
    }
}
