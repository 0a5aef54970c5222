//! Collision detection and pair scoring
//!
//! Everything here is axis-aligned: the player and each fire obstacle are
//! boxes. Overlap is strict, so boxes that only share an edge never collide.

use glam::Vec2;

use super::state::{Obstacle, Player};
use crate::consts::COLLISION_SENTINEL_HEIGHT;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// True when the intersection has positive area
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Degenerate entries are kept for bookkeeping but never collide
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.size.y > COLLISION_SENTINEL_HEIGHT
    }
}

/// Index of the first solid obstacle the player overlaps
pub fn first_hit(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let player_box = player.aabb();
    obstacles
        .iter()
        .position(|ob| ob.is_solid() && player_box.overlaps(&ob.aabb()))
}

/// Award one point per pair whose trailing edge has passed the player
///
/// The first member of a pair to cross marks every member sharing its
/// `pair_id`, so a pair scores exactly once however many members it has.
/// Returns the number of points awarded.
pub fn score_passed_pairs(player: &Player, obstacles: &mut [Obstacle]) -> u32 {
    let mut awarded = 0;
    for i in 0..obstacles.len() {
        let ob = &obstacles[i];
        if ob.counted || ob.right() >= player.pos.x {
            continue;
        }
        let pair_id = ob.pair_id;
        for other in obstacles.iter_mut().filter(|o| o.pair_id == pair_id) {
            other.counted = true;
        }
        awarded += 1;
    }
    awarded
}
