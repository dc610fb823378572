//! Host wire protocol: inbound push messages and outbound fire-and-forget commands.
use crate::catalog::{CatalogItem, OwnedItem};
use crate::decode;
use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A destination offered by the host for moving a stored wagon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDestination {
    #[serde(default, deserialize_with = "decode::text")]
    pub name: String,
    /// Meters from the player
    #[serde(default, deserialize_with = "decode::amount")]
    pub distance: u64,
    #[serde(default, deserialize_with = "decode::amount")]
    pub cost: u64,
    #[serde(default, deserialize_with = "decode::amount")]
    pub shop_index: u64,
}

/// Unsolicited push from the host, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    #[serde(rename = "openShop", alias = "open")]
    Open,
    #[serde(rename = "closeShop", alias = "close")]
    Close,
    #[serde(rename = "setWagons", alias = "setAvailable")]
    SetAvailable {
        #[serde(default, rename = "wagons", alias = "items", deserialize_with = "decode::list")]
        items: Vec<CatalogItem>,
    },
    #[serde(rename = "setOwnedWagons", alias = "setOwned")]
    SetOwned {
        #[serde(default, rename = "wagons", alias = "items", deserialize_with = "decode::list")]
        items: Vec<OwnedItem>,
    },
    #[serde(rename = "setPlayerCash", alias = "setCash")]
    SetCash {
        #[serde(default, deserialize_with = "decode::amount")]
        cash: u64,
    },
    #[serde(rename = "wagonSpawned", alias = "itemSpawned")]
    Spawned {
        #[serde(default, deserialize_with = "decode::text")]
        label: String,
        #[serde(default, deserialize_with = "decode::text")]
        plate: String,
    },
    #[serde(rename = "wagonDeleted", alias = "itemDeleted")]
    Deleted {
        #[serde(default, deserialize_with = "decode::text")]
        plate: String,
    },
    #[serde(rename = "purchaseSuccess")]
    PurchaseSuccess,
    #[serde(rename = "wagonUnstoredNotification", alias = "itemUnstored")]
    Unstored {
        #[serde(default, deserialize_with = "decode::text")]
        plate: String,
    },
    #[serde(
        rename = "receiveTransferData",
        alias = "showTransferOptions",
        alias = "transferOptions",
        alias = "transferDataResponse"
    )]
    TransferOptions {
        #[serde(
            default,
            rename = "transferData",
            alias = "destinations",
            deserialize_with = "decode::list"
        )]
        destinations: Vec<TransferDestination>,
        #[serde(
            default,
            rename = "requestId",
            skip_serializing_if = "Option::is_none",
            deserialize_with = "decode::sequence"
        )]
        request_id: Option<u64>,
    },
    #[serde(rename = "transferSuccess")]
    TransferSuccess,
    #[serde(rename = "activeWagonUpdated", alias = "activeItemChanged")]
    ActiveChanged {
        #[serde(default, rename = "wagonId", alias = "id", deserialize_with = "decode::text")]
        plate: String,
    },
    /// Any `type` this client does not handle
    #[serde(other)]
    Unknown,
}

impl HostMessage {
    /// Decode a raw JSON push.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Decode`] when the payload is not a tagged JSON object.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(BridgeError::Decode)
    }

    /// Decode an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Decode`] when the value is not a tagged object.
    pub fn from_value(value: Value) -> Result<Self, BridgeError> {
        serde_json::from_value(value).map_err(BridgeError::Decode)
    }

    /// Whether this push wholesale-replaces a catalog collection.
    #[must_use]
    pub const fn replaces_catalog(&self) -> bool {
        matches!(self, Self::SetAvailable { .. } | Self::SetOwned { .. })
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Open => "openShop",
            Self::Close => "closeShop",
            Self::SetAvailable { .. } => "setWagons",
            Self::SetOwned { .. } => "setOwnedWagons",
            Self::SetCash { .. } => "setPlayerCash",
            Self::Spawned { .. } => "wagonSpawned",
            Self::Deleted { .. } => "wagonDeleted",
            Self::PurchaseSuccess => "purchaseSuccess",
            Self::Unstored { .. } => "wagonUnstoredNotification",
            Self::TransferOptions { .. } => "receiveTransferData",
            Self::TransferSuccess => "transferSuccess",
            Self::ActiveChanged { .. } => "activeWagonUpdated",
            Self::Unknown => "unknown",
        }
    }
}

/// Outbound intent for the host. Nothing is ever awaited in reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostCommand {
    Purchase { id: String },
    Spawn { plate: String },
    Unstore { plate: String },
    RequestTransferData { plate: String, request_id: u64 },
    Transfer { plate: String, destination_index: u64 },
    SellConfirm { plate: String, price: u64 },
    SetActive { plate: String },
    Close,
    RequestShopData,
    Notify { message: String },
}

impl HostCommand {
    /// NUI callback name the host registered for this command.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Purchase { .. } => "purchaseWagon",
            Self::Spawn { .. } => "spawnWagon",
            Self::Unstore { .. } => "unstoreWagon",
            Self::RequestTransferData { .. } => "getTransferData",
            Self::Transfer { .. } => "transferWagon",
            Self::SellConfirm { .. } => "deleteWagonConfirm",
            Self::SetActive { .. } => "setActiveWagon",
            Self::Close => "closeShop",
            Self::RequestShopData => "getShopData",
            Self::Notify { .. } => "notifySuccess",
        }
    }

    /// JSON body POSTed to [`Self::endpoint`].
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::Purchase { id } => json!({ "wagonId": id, "playerCoords": null }),
            Self::Spawn { plate } | Self::Unstore { plate } | Self::SetActive { plate } => {
                json!({ "wagonId": plate })
            }
            Self::RequestTransferData { plate, request_id } => {
                json!({ "wagonId": plate, "requestId": request_id })
            }
            Self::Transfer {
                plate,
                destination_index,
            } => json!({ "wagonId": plate, "targetShopIndex": destination_index }),
            Self::SellConfirm { plate, price } => json!({ "wagonId": plate, "price": price }),
            Self::Close | Self::RequestShopData => json!({}),
            Self::Notify { message } => json!({ "message": message }),
        }
    }

    pub(crate) fn notify(message: impl Into<String>) -> Self {
        Self::Notify {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_and_generic_names() {
        let open = HostMessage::from_json(r#"{"type":"openShop"}"#).unwrap();
        assert_eq!(open, HostMessage::Open);
        let alias = HostMessage::from_json(r#"{"type":"setCash","cash":12.75}"#).unwrap();
        assert_eq!(alias, HostMessage::SetCash { cash: 12 });
    }

    #[test]
    fn unknown_types_are_ignored_not_rejected() {
        let msg = HostMessage::from_json(r#"{"type":"somethingNew","x":1}"#).unwrap();
        assert_eq!(msg, HostMessage::Unknown);
        assert!(HostMessage::from_json("{}").is_err());
        assert!(HostMessage::from_json("null").is_err());
    }

    #[test]
    fn transfer_payload_accepts_legacy_shape() {
        let raw = r#"{"type":"showTransferOptions","transferData":[
            {"name":"Valentine","distance":812.4,"cost":15,"shopIndex":2}
        ]}"#;
        let msg = HostMessage::from_json(raw).unwrap();
        assert_eq!(
            msg,
            HostMessage::TransferOptions {
                destinations: vec![TransferDestination {
                    name: "Valentine".into(),
                    distance: 812,
                    cost: 15,
                    shop_index: 2,
                }],
                request_id: None,
            }
        );
    }

    #[test]
    fn null_wagon_list_decodes_as_empty() {
        let msg = HostMessage::from_json(r#"{"type":"setWagons","wagons":null}"#).unwrap();
        assert_eq!(msg, HostMessage::SetAvailable { items: vec![] });
        assert!(msg.replaces_catalog());
    }

    #[test]
    fn active_change_carries_plate_in_wagon_id() {
        let msg = HostMessage::from_json(r#"{"type":"activeWagonUpdated","wagonId":"ABC"}"#).unwrap();
        assert_eq!(
            msg,
            HostMessage::ActiveChanged {
                plate: "ABC".into()
            }
        );
    }

    #[test]
    fn command_bodies_match_host_callbacks() {
        let purchase = HostCommand::Purchase { id: "w1".into() };
        assert_eq!(purchase.endpoint(), "purchaseWagon");
        assert_eq!(purchase.body(), json!({"wagonId": "w1", "playerCoords": null}));

        let transfer = HostCommand::Transfer {
            plate: "P1".into(),
            destination_index: 3,
        };
        assert_eq!(transfer.body(), json!({"wagonId": "P1", "targetShopIndex": 3}));

        let sell = HostCommand::SellConfirm {
            plate: "P1".into(),
            price: 100,
        };
        assert_eq!(sell.endpoint(), "deleteWagonConfirm");
        assert_eq!(HostCommand::RequestShopData.body(), json!({}));
    }
}
