//! Engine errors

use thiserror::Error;

/// Failures that stop a session from starting
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no browser window available")]
    NoWindow,
    #[error("2D canvas context unavailable")]
    ContextUnavailable,
    #[error("invalid game config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("failed to attach {0} listener")]
    Listener(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<EngineError> for wasm_bindgen::JsValue {
    fn from(err: EngineError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
