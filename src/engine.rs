//! Session engine
//!
//! Owns one `GameState` plus the input latch. Listeners call `post`, the frame
//! callback calls `frame`; the two never run at the same time, so the engine
//! needs no locking.

use serde::Serialize;

use crate::platform::InputEvent;
use crate::settings::Settings;
use crate::sim::{DifficultyTier, GameEvent, GamePhase, GameState, Surface, TickInput, tick};

/// Externally visible session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No session attached (web handle only)
    Stopped,
    Ready,
    Running,
    Paused,
    Ended,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Stopped => "stopped",
            SessionStatus::Ready => "ready",
            SessionStatus::Running => "running",
            SessionStatus::Paused => "paused",
            SessionStatus::Ended => "ended",
        }
    }
}

impl From<GamePhase> for SessionStatus {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Ready => SessionStatus::Ready,
            GamePhase::Running => SessionStatus::Running,
            GamePhase::Paused => SessionStatus::Paused,
            GamePhase::Ended => SessionStatus::Ended,
        }
    }
}

/// Read-only view handed to the host
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub status: SessionStatus,
    pub score: u32,
    pub code: String,
    pub tier: DifficultyTier,
    pub speed: f32,
    pub spawn_interval: f32,
    pub obstacles: usize,
    pub width: f32,
    pub height: f32,
}

/// One game session
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    input: TickInput,
    settings: Settings,
    /// Timestamp of the previous frame (ms)
    last_time: Option<f64>,
}

impl Engine {
    /// Build an idle session; `fallback_seed` is used when settings carry none
    pub fn new(settings: Settings, surface: Surface, fallback_seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(fallback_seed);
        log::info!(
            "Session created (seed {}, code {:?}, {}x{})",
            seed,
            settings.code,
            surface.width,
            surface.height
        );
        Self {
            state: GameState::new(seed, surface, settings.code.clone()),
            input: TickInput::default(),
            settings,
            last_time: None,
        }
    }

    /// First reset: `Ready -> Running`
    pub fn start(&mut self) -> GameEvent {
        self.state.reset();
        self.input = TickInput::default();
        self.last_time = None;
        GameEvent::Restarted
    }

    /// Latch an input event for the next frame
    pub fn post(&mut self, event: InputEvent) {
        match event {
            InputEvent::RisePressed => {
                self.input.rise_held = true;
                self.input.rise_pressed = true;
            }
            InputEvent::RiseReleased => self.input.rise_held = false,
            // Two toggles within one frame cancel out
            InputEvent::PauseToggled => self.input.pause = !self.input.pause,
            InputEvent::Restart => self.input.restart = true,
            InputEvent::Click => self.input.click = true,
        }
    }

    /// Run one frame at timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let delta = match self.last_time {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        self.step(delta)
    }

    /// Run one frame with an explicit delta
    pub fn step(&mut self, delta_ms: f32) -> Vec<GameEvent> {
        let events = tick(&mut self.state, &self.input, delta_ms);
        self.input.clear_one_shots();
        events
    }

    /// Adopt new surface dimensions
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(Surface::new(width, height));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn status(&self) -> SessionStatus {
        self.state.phase.into()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status(),
            score: self.state.score,
            code: self.state.code.clone(),
            tier: self.state.difficulty.tier,
            speed: self.state.speed,
            spawn_interval: self.state.spawn_interval,
            obstacles: self.state.obstacles.len(),
            width: self.state.surface.width,
            height: self.state.surface.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(code: &str) -> Engine {
        let mut engine = Engine::new(
            Settings::with_code(code),
            Surface::new(800.0, 600.0),
            77,
        );
        engine.start();
        engine
    }

    #[test]
    fn test_start_runs_session() {
        let mut engine = Engine::new(Settings::default(), Surface::new(800.0, 600.0), 1);
        assert_eq!(engine.status(), SessionStatus::Ready);
        assert_eq!(engine.start(), GameEvent::Restarted);
        assert_eq!(engine.status(), SessionStatus::Running);
    }

    #[test]
    fn test_settings_seed_wins() {
        let mut settings = Settings::with_code("hard");
        settings.seed = Some(5);
        let a = Engine::new(settings.clone(), Surface::new(800.0, 600.0), 1);
        let b = Engine::new(settings, Surface::new(800.0, 600.0), 2);
        assert_eq!(a.state().spawn_interval, b.state().spawn_interval);
    }

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut engine = engine("");
        let y = engine.state().player.pos.y;
        engine.frame(10_000.0);
        assert_eq!(engine.state().player.pos.y, y);
        engine.frame(10_016.0);
        assert!(engine.state().player.pos.y > y);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut engine = engine("");
        engine.frame(0.0);
        engine.frame(5_000.0);
        // One capped 60 ms frame of gravity from rest
        let k = 60.0 / 16.0;
        let expected = 300.0 + 0.45 * k * k;
        assert!((engine.state().player.pos.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_one_shots_cleared_after_frame() {
        let mut engine = engine("");
        engine.post(InputEvent::RisePressed);
        engine.post(InputEvent::Restart);
        engine.step(16.0);
        assert!(engine.input().rise_held);
        assert!(!engine.input().rise_pressed);
        assert!(!engine.input().restart);

        engine.post(InputEvent::RiseReleased);
        assert!(!engine.input().rise_held);
    }

    #[test]
    fn test_double_pause_cancels() {
        let mut engine = engine("");
        engine.post(InputEvent::PauseToggled);
        engine.post(InputEvent::PauseToggled);
        engine.step(16.0);
        assert_eq!(engine.status(), SessionStatus::Running);

        engine.post(InputEvent::PauseToggled);
        engine.step(16.0);
        assert_eq!(engine.status(), SessionStatus::Paused);
    }

    #[test]
    fn test_snapshot_reflects_difficulty() {
        let engine = engine("fire-2025");
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.tier, DifficultyTier::Hard);
        assert_eq!(snapshot.speed, 4.0);
        assert_eq!(snapshot.status, SessionStatus::Running);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], "running");
        assert_eq!(json["tier"], "hard");
    }

    #[test]
    fn test_resize_updates_surface() {
        let mut engine = engine("");
        engine.resize(1024.0, 200.0);
        assert_eq!(engine.state().surface, Surface::new(1024.0, 200.0));
        assert!(engine.state().player.pos.y <= 136.0);
    }
}
