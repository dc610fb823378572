//! Built-in replay scenarios.
use crate::script::{Expectations, Script, Step, inbound, intent};
use serde_json::{Value, json};
use thiserror::Error;
use wagon_shop_core::{ItemRef, ShopTab, SortKey, UserIntent};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unknown scenario `{0}` (see --list-scenarios)")]
    Unknown(String),
}

pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    build: fn() -> Script,
}

impl Scenario {
    #[must_use]
    pub fn script(&self) -> Script {
        (self.build)()
    }
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        key: "smoke",
        description: "Open, load, filter and purchase",
        build: smoke,
    },
    Scenario {
        key: "lifecycle-guard",
        description: "Catalog pushes suppressed while closing, accepted after",
        build: lifecycle_guard,
    },
    Scenario {
        key: "transfer",
        description: "Transfer request, stale response discard, confirm",
        build: transfer,
    },
    Scenario {
        key: "active-swap",
        description: "Active wagon changes move the badge",
        build: active_swap,
    },
    Scenario {
        key: "sell",
        description: "Sell request then host deletion",
        build: sell,
    },
    Scenario {
        key: "delete-idempotent",
        description: "Repeated deletion of the same plate",
        build: delete_idempotent,
    },
    Scenario {
        key: "revalidation",
        description: "Selection dropped when its wagon leaves the catalog",
        build: revalidation,
    },
    Scenario {
        key: "unstore",
        description: "Unstore closes the shop and the stored flag follows the host",
        build: unstore,
    },
];

/// Expand a comma separated list of scenario keys; `all` selects every built-in.
///
/// # Errors
///
/// Returns [`ScenarioError::Unknown`] for a key that is not registered.
pub fn resolve(list: &str) -> Result<Vec<&'static Scenario>, ScenarioError> {
    let keys: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .collect();
    if keys.contains(&"all") {
        return Ok(SCENARIOS.iter().collect());
    }
    keys.into_iter()
        .map(|key| {
            SCENARIOS
                .iter()
                .find(|scenario| scenario.key == key)
                .ok_or_else(|| ScenarioError::Unknown(key.to_string()))
        })
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn wagon(id: &str, price: u64, category: &str) -> Value {
    json!({ "id": id, "label": id, "model": id, "price": price, "category": category })
}

fn owned(plate: &str, price: u64, stored: bool, active: bool) -> Value {
    json!({
        "plate": plate,
        "label": plate,
        "model": "cart01",
        "price": price,
        "stored": stored,
        "is_active": active,
    })
}

fn open_with_owned(wagons: Value) -> Vec<Step> {
    vec![
        inbound(0, json!({ "type": "openShop" })),
        inbound(0, json!({ "type": "setOwnedWagons", "wagons": wagons })),
    ]
}

fn select_owned(at_ms: u64, plate: &str) -> Step {
    intent(
        at_ms,
        UserIntent::Select {
            item: ItemRef::Owned(plate.into()),
        },
    )
}

fn smoke() -> Script {
    let wagons = json!([wagon("A", 100, "wagon"), wagon("B", 50, "wagon"), wagon("C", 200, "cart")]);
    Script {
        name: "smoke".into(),
        config: None,
        steps: vec![
            inbound(0, json!({ "type": "openShop" })),
            inbound(0, json!({ "type": "setWagons", "wagons": wagons })),
            inbound(0, json!({ "type": "setPlayerCash", "cash": 150 })),
            intent(10, UserIntent::SetCategory { category: "wagon".into() }),
            intent(20, UserIntent::SetSort { sort: SortKey::PriceAscending }),
            intent(
                30,
                UserIntent::Select {
                    item: ItemRef::Available("A".into()),
                },
            ),
            intent(40, UserIntent::Purchase),
            inbound(50, json!({ "type": "purchaseSuccess" })),
        ],
        expect: Expectations {
            available_ids: Some(strings(&["A", "B", "C"])),
            display_ids: Some(strings(&["B", "A"])),
            tab: Some(ShopTab::Owned),
            detail_open: Some(false),
            commands: Some(strings(&["purchaseWagon", "getShopData", "notifySuccess"])),
            ..Expectations::default()
        },
    }
}

fn lifecycle_guard() -> Script {
    Script {
        name: "lifecycle-guard".into(),
        config: None,
        steps: vec![
            inbound(0, json!({ "type": "openShop" })),
            inbound(0, json!({ "type": "setWagons", "wagons": [wagon("A", 10, "wagon")] })),
            inbound(100, json!({ "type": "closeShop" })),
            inbound(600, json!({ "type": "setWagons", "wagons": [wagon("STALE", 10, "wagon")] })),
            inbound(700, json!({ "type": "setPlayerCash", "cash": 42 })),
            inbound(1200, json!({ "type": "setWagons", "wagons": [wagon("FRESH", 10, "wagon")] })),
        ],
        expect: Expectations {
            available_ids: Some(strings(&["FRESH"])),
            phase: Some("closed".into()),
            cash: Some(42),
            commands: Some(Vec::new()),
            ..Expectations::default()
        },
    }
}

fn transfer() -> Script {
    let mut steps = open_with_owned(json!([owned("P1", 300, true, false)]));
    steps.extend([
        select_owned(10, "P1"),
        intent(20, UserIntent::RequestTransfer),
        intent(30, UserIntent::RequestTransfer),
        inbound(
            40,
            json!({
                "type": "receiveTransferData",
                "requestId": 0,
                "transferData": [{ "name": "Old", "distance": 10, "cost": 1, "shopIndex": 9 }],
            }),
        ),
        inbound(
            50,
            json!({
                "type": "receiveTransferData",
                "requestId": 1,
                "transferData": [{ "name": "Rhodes", "distance": 900, "cost": 25, "shopIndex": 3 }],
            }),
        ),
        intent(60, UserIntent::ConfirmTransfer { shop_index: 9 }),
        intent(70, UserIntent::ConfirmTransfer { shop_index: 3 }),
        inbound(80, json!({ "type": "transferSuccess" })),
    ]);
    Script {
        name: "transfer".into(),
        config: None,
        steps,
        expect: Expectations {
            transfer_open: Some(false),
            detail_open: Some(false),
            commands: Some(strings(&[
                "getTransferData",
                "getTransferData",
                "transferWagon",
                "notifySuccess",
            ])),
            ..Expectations::default()
        },
    }
}

fn active_swap() -> Script {
    let mut steps = open_with_owned(json!([owned("P1", 100, true, true), owned("P2", 100, true, false)]));
    steps.extend([
        select_owned(10, "P2"),
        intent(20, UserIntent::SetActive),
        inbound(30, json!({ "type": "activeWagonUpdated", "wagonId": "P2" })),
    ]);
    Script {
        name: "active-swap".into(),
        config: None,
        steps,
        expect: Expectations {
            active_plate: Some("P2".into()),
            commands: Some(strings(&["setActiveWagon", "notifySuccess"])),
            ..Expectations::default()
        },
    }
}

fn sell() -> Script {
    let mut steps = open_with_owned(json!([owned("P1", 101, false, false)]));
    steps.extend([
        select_owned(10, "P1"),
        intent(20, UserIntent::Sell),
        inbound(30, json!({ "type": "wagonDeleted", "plate": "P1" })),
    ]);
    Script {
        name: "sell".into(),
        config: None,
        steps,
        expect: Expectations {
            owned_plates: Some(Vec::new()),
            detail_open: Some(false),
            commands: Some(strings(&["deleteWagonConfirm", "notifySuccess"])),
            ..Expectations::default()
        },
    }
}

fn delete_idempotent() -> Script {
    let mut steps = open_with_owned(json!([owned("P1", 100, true, false), owned("P2", 100, true, false)]));
    steps.extend([
        inbound(10, json!({ "type": "wagonDeleted", "plate": "P1" })),
        inbound(20, json!({ "type": "wagonDeleted", "plate": "P1" })),
    ]);
    Script {
        name: "delete-idempotent".into(),
        config: None,
        steps,
        expect: Expectations {
            owned_plates: Some(strings(&["P2"])),
            commands: Some(strings(&["notifySuccess", "notifySuccess"])),
            ..Expectations::default()
        },
    }
}

fn revalidation() -> Script {
    Script {
        name: "revalidation".into(),
        config: None,
        steps: vec![
            inbound(0, json!({ "type": "openShop" })),
            inbound(0, json!({ "type": "setWagons", "wagons": [wagon("A", 10, "wagon"), wagon("B", 20, "wagon")] })),
            intent(
                10,
                UserIntent::Select {
                    item: ItemRef::Available("A".into()),
                },
            ),
            inbound(20, json!({ "type": "setWagons", "wagons": [wagon("B", 20, "wagon")] })),
            intent(30, UserIntent::Purchase),
        ],
        expect: Expectations {
            available_ids: Some(strings(&["B"])),
            detail_open: Some(false),
            commands: Some(Vec::new()),
            ..Expectations::default()
        },
    }
}

fn unstore() -> Script {
    let mut steps = open_with_owned(json!([owned("P1", 100, true, false)]));
    steps.extend([
        select_owned(10, "P1"),
        intent(20, UserIntent::Unstore),
        inbound(30, json!({ "type": "wagonUnstoredNotification", "plate": "P1" })),
    ]);
    Script {
        name: "unstore".into(),
        config: None,
        steps,
        expect: Expectations {
            stored: Some([("P1".to_string(), false)].into_iter().collect()),
            phase: Some("closing".into()),
            commands: Some(strings(&["unstoreWagon"])),
            ..Expectations::default()
        },
    }
}
