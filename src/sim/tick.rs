//! Per-frame simulation step
//!
//! `tick` is the whole frame body minus rendering: control input, physics,
//! scrolling, scoring, spawning and collision, in that order.

use super::collision::{first_hit, score_passed_pairs};
use super::spawn::advance_spawn_timer;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input consumed by a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Rise key or pointer currently held
    pub rise_held: bool,
    /// Rise pressed since the last frame (one-shot)
    pub rise_pressed: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Explicit restart (one-shot)
    pub restart: bool,
    /// Pointer click (one-shot); resumes a paused run, restarts when no run is live
    pub click: bool,
}

impl TickInput {
    /// Clear the one-shot fields after a frame consumed them
    pub fn clear_one_shots(&mut self) {
        self.rise_pressed = false;
        self.pause = false;
        self.restart = false;
        self.click = false;
    }
}

/// Clamp a raw frame delta into the range the integrator accepts
#[inline]
pub fn cap_delta(delta_ms: f32) -> f32 {
    if delta_ms.is_nan() {
        return 0.0;
    }
    delta_ms.clamp(0.0, MAX_FRAME_DELTA_MS)
}

/// Advance the world by one frame of `delta_ms` milliseconds
///
/// Returns the events the frame produced, in order.
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let delta = cap_delta(delta_ms);

    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                events.push(GameEvent::Resumed);
            }
            GamePhase::Ready | GamePhase::Ended => {}
        }
    }

    if input.click && state.phase == GamePhase::Paused {
        state.phase = GamePhase::Running;
        events.push(GameEvent::Resumed);
    }

    if input.rise_pressed && state.phase == GamePhase::Running {
        state.player.kick();
        events.push(GameEvent::Rise);
    }

    let wants_restart =
        input.restart || (input.click && matches!(state.phase, GamePhase::Ready | GamePhase::Ended));
    if wants_restart {
        state.reset();
        events.push(GameEvent::Restarted);
    }

    if state.phase != GamePhase::Running {
        return events;
    }

    state.elapsed_ms += f64::from(delta);
    let k = delta / FRAME_BASELINE_MS;

    // Player
    let player = &mut state.player;
    if input.rise_held {
        player.vel_y += player.thrust * k;
    }
    player.vel_y += player.gravity * k;
    player.pos.y += player.vel_y * k;
    player.clamp_to(state.surface);

    // Scroll
    let step = state.speed * k;
    for ob in &mut state.obstacles {
        ob.pos.x -= step;
    }
    state.obstacles.retain(|ob| !ob.is_offscreen());

    // Score
    let awarded = score_passed_pairs(&state.player, &mut state.obstacles);
    for _ in 0..awarded {
        state.score += 1;
        log::debug!("Pair passed, score {}", state.score);
        events.push(GameEvent::Scored(state.score));
    }

    advance_spawn_timer(state, delta);

    // Collide
    if first_hit(&state.player, &state.obstacles).is_some() {
        state.phase = GamePhase::Ended;
        log::info!("Game over with score {}", state.score);
        events.push(GameEvent::GameOver(state.score));
    }

    events
}
