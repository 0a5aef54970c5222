//! Difficulty codes
//!
//! The host passes free text; recognized tokens bias scroll speed and
//! spawn cadence. Resolved once per reset.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

const HARD_TOKENS: [&str; 3] = ["FIRE", "HARD", "2025"];
const EASY_TOKENS: [&str; 2] = ["LIGHT", "EASY"];

/// Difficulty bucket selected by a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Hard,
    Easy,
    #[default]
    Normal,
}

impl DifficultyTier {
    /// Classify a code; first match wins, hard before easy
    pub fn from_code(code: &str) -> Self {
        let code = code.to_uppercase();
        if HARD_TOKENS.iter().any(|t| code.contains(t)) {
            DifficultyTier::Hard
        } else if EASY_TOKENS.iter().any(|t| code.contains(t)) {
            DifficultyTier::Easy
        } else {
            DifficultyTier::Normal
        }
    }

    /// Apply this tier's multipliers to base values
    pub fn apply(&self, base_speed: f32, base_interval: f32) -> (f32, f32) {
        match self {
            DifficultyTier::Hard => (
                (base_speed * 1.4).round(),
                (base_interval * 0.7).round().max(700.0),
            ),
            DifficultyTier::Easy => (
                (base_speed * 0.8).round().max(2.0),
                (base_interval * 1.2).round(),
            ),
            DifficultyTier::Normal => (base_speed, base_interval),
        }
    }
}

/// Engine parameters derived from a code at reset time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub tier: DifficultyTier,
    /// Scroll speed (px per 16 ms frame)
    pub speed: f32,
    /// Delay before the first spawn (ms)
    pub spawn_interval: f32,
}

impl Difficulty {
    /// Base speed for a surface width
    pub fn base_speed(surface_width: f32) -> f32 {
        (surface_width / SPEED_WIDTH_DIVISOR)
            .round()
            .max(MIN_BASE_SPEED)
    }

    /// Resolve a code against a surface, drawing the base interval from `rng`
    pub fn resolve<R: Rng + ?Sized>(code: &str, surface_width: f32, rng: &mut R) -> Self {
        let base_interval = rng.random_range(BASE_INTERVAL_MIN..BASE_INTERVAL_MAX);
        Self::from_base(code, surface_width, base_interval)
    }

    /// Resolve with an explicit base interval
    pub fn from_base(code: &str, surface_width: f32, base_interval: f32) -> Self {
        let tier = DifficultyTier::from_code(code);
        let (speed, spawn_interval) = tier.apply(Self::base_speed(surface_width), base_interval);
        Self {
            tier,
            speed,
            spawn_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tier_matching() {
        assert_eq!(DifficultyTier::from_code(""), DifficultyTier::Normal);
        assert_eq!(DifficultyTier::from_code("fire-2025"), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::from_code("Hard"), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::from_code("x2025x"), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::from_code("easy"), DifficultyTier::Easy);
        assert_eq!(DifficultyTier::from_code("lightning"), DifficultyTier::Easy);
        assert_eq!(DifficultyTier::from_code("banana"), DifficultyTier::Normal);
    }

    #[test]
    fn test_hard_wins_over_easy() {
        assert_eq!(DifficultyTier::from_code("easy fire"), DifficultyTier::Hard);
    }

    #[test]
    fn test_base_speed() {
        assert_eq!(Difficulty::base_speed(800.0), 3.0);
        assert_eq!(Difficulty::base_speed(320.0), 3.0);
        assert_eq!(Difficulty::base_speed(1920.0), 6.0);
    }

    #[test]
    fn test_hard_scenario_800x600() {
        let mut rng = Pcg32::seed_from_u64(11);
        let d = Difficulty::resolve("HARD", 800.0, &mut rng);
        assert_eq!(d.tier, DifficultyTier::Hard);
        assert_eq!(d.speed, 4.0);
        assert!(d.spawn_interval >= 700.0);
        assert!(d.spawn_interval <= 1400.0);
    }

    #[test]
    fn test_hard_interval_floor() {
        let d = Difficulty::from_base("fire", 800.0, 900.0);
        assert_eq!(d.spawn_interval, 700.0);
    }

    #[test]
    fn test_tiers_ordered_with_same_seed() {
        for seed in 0..32 {
            let normal = Difficulty::resolve("", 800.0, &mut Pcg32::seed_from_u64(seed));
            let hard = Difficulty::resolve("FIRE-2025", 800.0, &mut Pcg32::seed_from_u64(seed));
            let easy = Difficulty::resolve("EASY", 800.0, &mut Pcg32::seed_from_u64(seed));
            assert!(hard.speed > normal.speed);
            assert!(hard.spawn_interval < normal.spawn_interval);
            assert!(easy.speed < normal.speed);
            assert!(easy.spawn_interval > normal.spawn_interval);
        }
    }

    #[test]
    fn test_easy_speed_floor() {
        let d = Difficulty::from_base("easy", 100.0, 1500.0);
        assert_eq!(d.speed, 2.0);
        assert_eq!(d.spawn_interval, 1800.0);
    }
}
