//! Spawn scheduler and pair geometry

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, Surface};
use crate::consts::*;

/// Vertical layout of one gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapLayout {
    /// y of the gap's upper edge
    pub top: f32,
    pub height: f32,
    /// Obstacle width
    pub thickness: f32,
}

impl GapLayout {
    /// Gap height for a surface
    pub fn gap_height(surface: Surface) -> f32 {
        (surface.height * GAP_FRACTION).floor().max(MIN_GAP_HEIGHT)
    }

    /// Obstacle thickness for a surface
    pub fn thickness(surface: Surface) -> f32 {
        (surface.width * THICKNESS_FRACTION).floor().max(MIN_THICKNESS)
    }

    /// Place a gap using `roll` in [0, 1)
    pub fn place(surface: Surface, roll: f32) -> Self {
        let height = Self::gap_height(surface);
        let band = (surface.height - height - 2.0 * GAP_MARGIN).max(0.0);
        Self {
            top: (GAP_MARGIN + roll * band).floor(),
            height,
            thickness: Self::thickness(surface),
        }
    }

    /// Obstacles above and below the gap, starting at `x`
    pub fn obstacles(&self, surface: Surface, x: f32, pair_id: u32) -> Vec<Obstacle> {
        let bottom = self.top + self.height;
        [(0.0, self.top), (bottom, surface.height - bottom)]
            .into_iter()
            .filter(|&(_, h)| h > 0.0)
            .map(|(y, h)| Obstacle {
                pos: Vec2::new(x, y),
                size: Vec2::new(self.thickness, h),
                pair_id,
                counted: false,
            })
            .collect()
    }
}

/// Spawn one pair at the right edge; returns its id
pub fn spawn_pair(state: &mut GameState) -> u32 {
    let surface = state.surface;
    let layout = GapLayout::place(surface, state.rng.random::<f32>());
    let pair_id = state.next_pair_id();
    let members = layout.obstacles(surface, surface.width + SPAWN_OFFSET_X, pair_id);
    log::debug!(
        "Spawned pair {} (gap {}..{}, {} members)",
        pair_id,
        layout.top,
        layout.top + layout.height,
        members.len()
    );
    state.obstacles.extend(members);
    pair_id
}

/// Advance the spawn timer; spawns a pair when the interval elapses
///
/// Returns true when a pair was spawned this call.
pub fn advance_spawn_timer(state: &mut GameState, delta_ms: f32) -> bool {
    state.spawn_timer += delta_ms;
    if state.spawn_timer < state.spawn_interval {
        return false;
    }
    state.spawn_timer = 0.0;
    state.spawn_interval = state
        .rng
        .random_range(RESPAWN_INTERVAL_MIN..RESPAWN_INTERVAL_MAX);
    spawn_pair(state);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_800x600() {
        let surface = Surface::new(800.0, 600.0);
        assert_eq!(GapLayout::gap_height(surface), 144.0);
        assert_eq!(GapLayout::thickness(surface), 48.0);

        let low = GapLayout::place(surface, 0.0);
        assert_eq!(low.top, 60.0);
        let high = GapLayout::place(surface, 0.999);
        assert!(high.top + high.height <= 540.0);
    }

    #[test]
    fn test_layout_floors() {
        let surface = Surface::new(300.0, 300.0);
        assert_eq!(GapLayout::gap_height(surface), 110.0);
        assert_eq!(GapLayout::thickness(surface), 42.0);
    }

    #[test]
    fn test_pair_members_bracket_gap() {
        let surface = Surface::new(800.0, 600.0);
        let layout = GapLayout::place(surface, 0.5);
        let members = layout.obstacles(surface, 820.0, 3);
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].pos.y, 0.0);
        assert_eq!(members[0].size.y, layout.top);
        assert_eq!(members[1].pos.y, layout.top + layout.height);
        assert_eq!(members[1].pos.y + members[1].size.y, 600.0);
        assert!(members.iter().all(|m| m.pair_id == 3 && m.pos.x == 820.0));
    }

    #[test]
    fn test_tiny_surface_drops_empty_members() {
        let surface = Surface::new(200.0, 120.0);
        let layout = GapLayout::place(surface, 0.5);
        let members = layout.obstacles(surface, 220.0, 1);
        assert!(members.iter().all(|m| m.size.y > 0.0));
        assert!(members.len() < 2);
    }

    #[test]
    fn test_timer_spawns_and_rerolls_interval() {
        let mut state = GameState::new(3, Surface::new(800.0, 600.0), "");
        state.reset();
        state.spawn_interval = 100.0;

        assert!(!advance_spawn_timer(&mut state, 60.0));
        assert!(state.obstacles.is_empty());

        assert!(advance_spawn_timer(&mut state, 40.0));
        assert_eq!(state.spawn_timer, 0.0);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].pair_id, state.obstacles[1].pair_id);
        assert!((RESPAWN_INTERVAL_MIN..RESPAWN_INTERVAL_MAX).contains(&state.spawn_interval));
    }

    #[test]
    fn test_spawn_after_resize_uses_new_surface() {
        let mut state = GameState::new(9, Surface::new(800.0, 600.0), "");
        state.reset();
        state.resize(Surface::new(1200.0, 900.0));
        spawn_pair(&mut state);

        let bottom = state
            .obstacles
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .unwrap();
        assert_eq!(bottom.pos.y + bottom.size.y, 900.0);
        assert!(state.obstacles.iter().all(|o| o.pos.x == 1220.0));
        assert!(state.obstacles.iter().all(|o| o.size.x == 72.0));
    }

    #[test]
    fn test_pair_ids_unique() {
        let mut state = GameState::new(3, Surface::new(800.0, 600.0), "");
        let a = spawn_pair(&mut state);
        let b = spawn_pair(&mut state);
        assert_ne!(a, b);
    }
}
