//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Time arrives as a millisecond delta per frame
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or browser dependencies

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_hit, score_passed_pairs};
pub use difficulty::{Difficulty, DifficultyTier};
pub use spawn::{GapLayout, advance_spawn_timer, spawn_pair};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player, Surface};
pub use tick::{TickInput, cap_delta, tick};
