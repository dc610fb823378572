use thiserror::Error;

/// Failures at the edge between the shop and its host.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Malformed host message: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Command delivery failed: {0}")]
    Transport(String),
}

/// Invalid shop configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sell_back_pct must be between 0 and 100, got {0}")]
    SellBackOutOfRange(u64),
    #[error("closing_guard_ms must be greater than zero")]
    ZeroClosingGuard,
}
