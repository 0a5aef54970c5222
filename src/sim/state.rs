//! World state and core simulation types
//!
//! Everything one session mutates lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Created but never reset
    Ready,
    /// Active gameplay
    Running,
    /// Frozen by the pause toggle
    Paused,
    /// Run ended by a collision
    Ended,
}

/// Something the host or audio layer may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Session (re)started from a reset
    Restarted,
    /// Rise impulse applied
    Rise,
    /// A pair was passed; carries the new score
    Scored(u32),
    /// Run ended; carries the final score
    GameOver(u32),
    Paused,
    Resumed,
}

impl GameEvent {
    /// Stable name handed to host callbacks
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Restarted => "restarted",
            GameEvent::Rise => "rise",
            GameEvent::Scored(_) => "scored",
            GameEvent::GameOver(_) => "game_over",
            GameEvent::Paused => "paused",
            GameEvent::Resumed => "resumed",
        }
    }
}

/// Drawing surface dimensions (logical pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// The matchstick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x stays fixed for a session
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (px per 16 ms frame, negative is up)
    pub vel_y: f32,
    pub gravity: f32,
    pub thrust: f32,
}

impl Player {
    /// Player placed at its starting spot for the given surface
    pub fn spawn(surface: Surface) -> Self {
        Self {
            pos: Vec2::new(
                (surface.width * PLAYER_X_FRACTION).floor(),
                (surface.height * 0.5).floor(),
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            gravity: PLAYER_GRAVITY,
            thrust: PLAYER_THRUST,
        }
    }

    /// Lowest allowed y for a surface of this height
    pub fn max_y(&self, surface: Surface) -> f32 {
        (surface.height - self.size.y).max(0.0)
    }

    /// Clamp y into the surface; velocity is left to keep integrating
    pub fn clamp_to(&mut self, surface: Surface) {
        self.pos.y = self.pos.y.clamp(0.0, self.max_y(surface));
    }

    /// Apply the instantaneous upward kick of a rise press
    pub fn kick(&mut self) {
        self.vel_y = self.thrust * RISE_IMPULSE;
    }
}

/// One member of an obstacle pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Shared by the members above and below one gap
    pub pair_id: u32,
    /// Set once the pair has been scored
    pub counted: bool,
}

impl Obstacle {
    /// Right edge x
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully past the left edge by the discard margin
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < -OFFSCREEN_MARGIN
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Time accumulated toward the next spawn (ms)
    pub spawn_timer: f32,
    /// Current spawn interval (ms)
    pub spawn_interval: f32,
    /// Scroll speed (px per 16 ms frame)
    pub speed: f32,
    pub surface: Surface,
    /// Difficulty code the session was configured with
    pub code: String,
    /// Difficulty resolved at the last reset
    pub difficulty: Difficulty,
    /// Simulated time since the last reset (ms)
    pub elapsed_ms: f64,
    pub rng: Pcg32,
    next_pair_id: u32,
}

impl GameState {
    /// Create an idle session; nothing moves until `reset`
    pub fn new(seed: u64, surface: Surface, code: impl Into<String>) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let code = code.into();
        let difficulty = Difficulty::resolve(&code, surface.width, &mut rng);
        Self {
            phase: GamePhase::Ready,
            score: 0,
            player: Player::spawn(surface),
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            spawn_interval: difficulty.spawn_interval,
            speed: difficulty.speed,
            surface,
            code,
            difficulty,
            elapsed_ms: 0.0,
            rng,
            next_pair_id: 1,
        }
    }

    /// Start a fresh run: clear the world and re-derive difficulty
    pub fn reset(&mut self) {
        self.player = Player::spawn(self.surface);
        self.obstacles.clear();
        self.spawn_timer = 0.0;
        self.difficulty = Difficulty::resolve(&self.code, self.surface.width, &mut self.rng);
        self.speed = self.difficulty.speed;
        self.spawn_interval = self.difficulty.spawn_interval;
        self.score = 0;
        self.elapsed_ms = 0.0;
        self.phase = GamePhase::Running;
        log::info!(
            "Run reset ({:?}: speed {}, first spawn in {} ms)",
            self.difficulty.tier,
            self.speed,
            self.spawn_interval
        );
    }

    /// Adopt new surface dimensions; positions are only clamped, never reflowed
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        self.player.clamp_to(surface);
    }

    /// True while a run is live (including paused)
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Allocate an id for a new obstacle pair
    pub fn next_pair_id(&mut self) -> u32 {
        let id = self.next_pair_id;
        self.next_pair_id = self.next_pair_id.wrapping_add(1);
        id
    }
}
