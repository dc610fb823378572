use wagon_shop_core::{
    CatalogItem, HostCommand, HostMessage, LifecyclePhase, RecordingSink, ShopConfig,
    ShopController, ShopRuntime, UserIntent,
};

fn wagons(ids: &[&str]) -> HostMessage {
    HostMessage::SetAvailable {
        items: ids
            .iter()
            .map(|id| CatalogItem {
                id: (*id).to_string(),
                price: 10,
                ..CatalogItem::default()
            })
            .collect(),
    }
}

fn available_ids(shop: &ShopController) -> Vec<&str> {
    shop.store()
        .available()
        .iter()
        .map(|item| item.id.as_str())
        .collect()
}

#[test]
fn in_flight_catalog_push_is_dropped_after_close() {
    let mut shop = ShopController::default();
    shop.handle_message(HostMessage::Open, 0);
    shop.handle_message(wagons(&["A"]), 0);
    shop.handle_message(HostMessage::Close, 1_000);

    shop.handle_message(wagons(&["STALE"]), 1_999);
    assert_eq!(available_ids(&shop), vec!["A"]);
    assert!(matches!(
        shop.phase(),
        LifecyclePhase::Closing { since_ms: 1_000 }
    ));

    shop.handle_message(wagons(&["FRESH"]), 2_000);
    assert_eq!(available_ids(&shop), vec!["FRESH"]);
    assert_eq!(shop.phase(), LifecyclePhase::Closed);
}

#[test]
fn owned_replacement_is_also_guarded() {
    let mut shop = ShopController::default();
    shop.handle_message(HostMessage::Open, 0);
    shop.apply_intent(UserIntent::Cancel, 50);
    shop.handle_message(
        HostMessage::SetOwned {
            items: vec![Default::default()],
        },
        60,
    );
    assert!(shop.store().owned().is_empty());
}

#[test]
fn tick_settles_closing_without_other_events() {
    let mut shop = ShopController::default();
    shop.handle_message(HostMessage::Open, 0);
    shop.handle_message(HostMessage::Close, 100);
    shop.tick(500);
    assert!(shop.lifecycle().is_closing());
    shop.tick(1_100);
    assert_eq!(shop.phase(), LifecyclePhase::Closed);
}

#[test]
fn reopen_during_guard_accepts_catalog_immediately() {
    let mut shop = ShopController::default();
    shop.handle_message(HostMessage::Open, 0);
    shop.handle_message(HostMessage::Close, 100);
    shop.handle_message(HostMessage::Open, 200);
    shop.handle_message(wagons(&["B"]), 210);
    assert_eq!(available_ids(&shop), vec!["B"]);
    assert!(shop.lifecycle().is_open());
}

#[test]
fn second_close_restarts_the_guard() {
    let mut shop = ShopController::default();
    shop.handle_message(HostMessage::Open, 0);
    shop.handle_message(HostMessage::Close, 0);
    shop.handle_message(HostMessage::Close, 900);
    shop.handle_message(wagons(&["LATE"]), 1_500);
    assert!(available_ids(&shop).is_empty());
}

#[test]
fn custom_guard_interval_is_respected() {
    let config = ShopConfig {
        closing_guard_ms: 250,
        ..ShopConfig::default()
    };
    let sink = RecordingSink::new();
    let mut runtime = ShopRuntime::new(config, sink.clone());
    runtime.deliver(HostMessage::Open, 0);
    runtime.perform(UserIntent::Close, 0);
    assert_eq!(sink.drain(), vec![HostCommand::Close]);
    runtime.deliver(wagons(&["X"]), 249);
    assert!(runtime.controller().store().available().is_empty());
    runtime.deliver(wagons(&["X"]), 250);
    assert_eq!(runtime.controller().store().available().len(), 1);
}
