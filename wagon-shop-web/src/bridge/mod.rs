//! NUI host bridge: outbound command POSTs and inbound `message` / `keydown` listeners.
#[cfg(not(target_arch = "wasm32"))]
mod stub;
#[cfg(target_arch = "wasm32")]
mod wasm;

use crate::app::store::ShopState;
use crate::error::WebError;
use std::rc::Rc;
use wagon_shop_core::{CommandSink, HostCommand, ShopConfig};
use yew::prelude::*;

/// Sends commands to `https://<resource>/<endpoint>`, the NUI callback convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuiSink {
    resource: Rc<str>,
}

impl NuiSink {
    #[must_use]
    pub fn new(resource: &str) -> Self {
        Self {
            resource: Rc::from(resource),
        }
    }

    /// Prefer the resource name the game client reports over the configured one.
    #[must_use]
    pub fn from_environment(config: &ShopConfig) -> Self {
        crate::dom::parent_resource_name().map_or_else(
            || Self::new(&config.resource_name),
            |name| Self::new(&name),
        )
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    #[must_use]
    pub fn url_for(&self, command: &HostCommand) -> String {
        format!("https://{}/{}", self.resource, command.endpoint())
    }
}

impl CommandSink for NuiSink {
    type Error = WebError;

    fn send(&self, command: &HostCommand) -> Result<(), Self::Error> {
        let body = serde_json::to_string(&command.body())?;
        let url = self.url_for(command);
        #[cfg(target_arch = "wasm32")]
        wasm::post(url, body);
        #[cfg(not(target_arch = "wasm32"))]
        stub::post(&url, &body);
        Ok(())
    }
}

/// Wire window listeners to the shop store and settle pending closes on time.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_host_bridge(store: &UseReducerHandle<ShopState>) {
    wasm::use_host_bridge(store);
}

/// Wire window listeners to the shop store and settle pending closes on time.
#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_host_bridge(store: &UseReducerHandle<ShopState>) {
    stub::use_host_bridge(store);
}
