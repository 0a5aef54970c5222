//! Matchstick Dodge - an embeddable side-scrolling dodge mini-game
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, collisions, scoring)
//! - `engine`: Session object that owns the world and latches input
//! - `renderer`: Display list render pass and its canvas 2D backend
//! - `platform`: Browser bindings (listeners, animation frame loop)
//! - `settings`: Host-supplied configuration

pub mod engine;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use engine::{Engine, SessionStatus, Snapshot};
pub use error::EngineError;
pub use settings::Settings;

/// Game configuration constants
///
/// Motion constants are tuned per 16 ms frame; time is measured in milliseconds.
pub mod consts {
    /// Frame length the motion constants are expressed against (ms)
    pub const FRAME_BASELINE_MS: f32 = 16.0;
    /// Largest delta a single frame may integrate (ms)
    pub const MAX_FRAME_DELTA_MS: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 28.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    /// Player x as a fraction of surface width
    pub const PLAYER_X_FRACTION: f32 = 0.12;
    pub const PLAYER_GRAVITY: f32 = 0.45;
    /// Negative is up
    pub const PLAYER_THRUST: f32 = -0.95;
    /// Instant velocity on a rise press, as a multiple of thrust
    pub const RISE_IMPULSE: f32 = 1.5;
    /// Height of the match head drawn on top of the body
    pub const HEAD_HEIGHT: f32 = 14.0;

    /// Obstacles this far past the left edge are discarded
    pub const OFFSCREEN_MARGIN: f32 = 50.0;
    /// New pairs appear this far past the right edge
    pub const SPAWN_OFFSET_X: f32 = 20.0;
    pub const GAP_FRACTION: f32 = 0.24;
    pub const MIN_GAP_HEIGHT: f32 = 110.0;
    /// Clearance kept above and below every gap
    pub const GAP_MARGIN: f32 = 60.0;
    pub const THICKNESS_FRACTION: f32 = 0.06;
    pub const MIN_THICKNESS: f32 = 42.0;
    /// Obstacles no taller than this never collide
    pub const COLLISION_SENTINEL_HEIGHT: f32 = 8.0;

    /// Spawn interval range used after each spawn (ms)
    pub const RESPAWN_INTERVAL_MIN: f32 = 1100.0;
    pub const RESPAWN_INTERVAL_MAX: f32 = 1900.0;
    /// Spawn interval range drawn at reset (ms)
    pub const BASE_INTERVAL_MIN: f32 = 1200.0;
    pub const BASE_INTERVAL_MAX: f32 = 2000.0;

    /// Base speed is one unit per this many pixels of surface width
    pub const SPEED_WIDTH_DIVISOR: f32 = 320.0;
    pub const MIN_BASE_SPEED: f32 = 3.0;
}

/// Installs the panic hook and console logger once the module is instantiated.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // A host may instantiate the module more than once; a second logger init is harmless.
    let _ = console_log::init_with_level(log::Level::Info);
}
