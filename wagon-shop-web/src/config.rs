//! Shop configuration bundled with the page.
use once_cell::sync::Lazy;
use wagon_shop_core::ShopConfig;

static SHOP_JSON: &str = include_str!("../static/assets/data/shop.json");

/// Parsed once on first use.
pub static SHOP_CONFIG: Lazy<ShopConfig> = Lazy::new(|| load_config(SHOP_JSON));

/// Parse a configuration document, falling back to defaults when it is invalid.
#[must_use]
pub fn load_config(json: &str) -> ShopConfig {
    match ShopConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            let message = format!("Invalid shop config, using defaults: {err}");
            log::error!("{message}");
            #[cfg(target_arch = "wasm32")]
            crate::dom::console_error(&message);
            ShopConfig::default()
        }
    }
}
