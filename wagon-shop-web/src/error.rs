use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures on the browser side of the host bridge.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("could not encode command body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not read host message: {0}")]
    Message(String),
}

impl WebError {
    #[must_use]
    pub fn js(value: &JsValue) -> Self {
        Self::Js(crate::dom::js_error_message(value))
    }
}

impl From<serde_wasm_bindgen::Error> for WebError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::Message(err.to_string())
    }
}
