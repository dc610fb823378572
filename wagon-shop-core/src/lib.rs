//! Wagon Shop Core
//!
//! Platform-agnostic state for the wagon shop storefront: the catalog, filters, selection and
//! open/close lifecycle, plus the host protocol and a pure render projection.
//! No browser or host dependencies live here.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod decode;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod numbers;
pub mod protocol;
pub mod render;
pub mod runtime;
pub mod selection;

// Re-export commonly used types
pub use catalog::{CatalogItem, CatalogStore, OwnedItem};
pub use config::ShopConfig;
pub use controller::{Effects, ShopController, ShopTab, UserIntent};
pub use error::{BridgeError, ConfigError};
pub use filter::{
    CategoryFilter, FilterState, PriceRange, SortKey, compute_display_list, display_list,
};
pub use lifecycle::{LifecyclePhase, ShopLifecycle};
pub use protocol::{HostCommand, HostMessage, TransferDestination};
pub use render::{ShopFrame, project};
pub use runtime::{CommandSink, RecordingSink, ShopRuntime};
pub use selection::{ActionButtons, ButtonState, ItemRef, Resolved, SelectionFacts};
