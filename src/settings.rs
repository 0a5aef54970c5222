//! Session settings supplied by the host
//!
//! Read once per `start`; never persisted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Host configuration for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Free-text difficulty code (case-insensitive)
    #[serde(deserialize_with = "lenient_code")]
    pub code: String,
    /// RNG seed; drawn from the clock when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Silence all cues
    pub muted: bool,
    /// Cue volume (0.0 - 1.0)
    pub volume: f32,

    // === Accessibility ===
    /// Disable flame flicker and smoke sway
    pub reduced_motion: bool,
}

/// Accept any JSON value as a code; scalars keep their text, anything else is empty
fn lenient_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(code) => code,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            code: String::new(),
            seed: None,
            muted: false,
            volume: 0.8,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Settings with only a difficulty code
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Parse settings from JSON; `null` and empty input yield defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Self::default());
        }
        let mut settings: Self = serde_json::from_str(trimmed)?;
        settings.volume = settings.volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Effective cue volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Uppercased code for display
    pub fn mode_label(&self) -> Option<String> {
        let code = self.code.trim();
        (!code.is_empty()).then(|| code.to_uppercase())
    }

    /// Parse settings from a JS config object (`undefined`/`null` mean defaults)
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(config: &wasm_bindgen::JsValue) -> Result<Self, crate::EngineError> {
        if config.is_undefined() || config.is_null() {
            return Ok(Self::default());
        }
        let json = js_sys::JSON::stringify(config)
            .map_err(|_| crate::EngineError::Js("config is not serializable".into()))?;
        let json = String::from(json);
        Ok(Self::from_json(&json)?)
    }
}
