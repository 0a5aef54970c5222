//! Platform abstraction layer
//!
//! Handles browser specifics for:
//! - Input events (keyboard, pointer)
//! - Frame timing (requestAnimationFrame)
//! - Surface sizing and teardown

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputEvent, key_event};

#[cfg(target_arch = "wasm32")]
pub use web::DodgeGame;
