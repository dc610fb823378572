//! Shop configuration, loaded from JSON with every field defaulted.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESOURCE_NAME: &str = "rex-wagons";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://cfx-nui-rex-wagons/html/images";
/// Fixed buy-back rate applied to the purchase price of an owned wagon.
pub const DEFAULT_SELL_BACK_PCT: u64 = 50;
/// How long catalog pushes stay suppressed after the shop closes.
pub const DEFAULT_CLOSING_GUARD_MS: u64 = 1000;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Host resource that receives NUI callbacks
    #[serde(default = "default_resource_name")]
    pub resource_name: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_sell_back_pct")]
    pub sell_back_pct: u64,
    #[serde(default = "default_closing_guard_ms")]
    pub closing_guard_ms: u64,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_resource_name() -> String {
    DEFAULT_RESOURCE_NAME.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

const fn default_sell_back_pct() -> u64 {
    DEFAULT_SELL_BACK_PCT
}

const fn default_closing_guard_ms() -> u64 {
    DEFAULT_CLOSING_GUARD_MS
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            resource_name: default_resource_name(),
            image_base_url: default_image_base_url(),
            sell_back_pct: DEFAULT_SELL_BACK_PCT,
            closing_guard_ms: DEFAULT_CLOSING_GUARD_MS,
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl ShopConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range value.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.sell_back_pct > 100 {
            return Err(ConfigError::SellBackOutOfRange(self.sell_back_pct));
        }
        if self.closing_guard_ms == 0 {
            return Err(ConfigError::ZeroClosingGuard);
        }
        Ok(())
    }

    /// Preview image for a wagon model.
    #[must_use]
    pub fn image_url(&self, model: &str) -> String {
        format!("{}/{model}.jpg", self.image_base_url.trim_end_matches('/'))
    }
}
