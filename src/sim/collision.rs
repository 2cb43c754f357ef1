//! Forward-lane collision detection
//!
//! Two lane-following vehicles that come within the proximity threshold
//! collide; one of them, chosen by coin flip, loses control.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::SceneState;

/// Source of the coin flip deciding which vehicle of a colliding pair drifts
pub trait TieBreak {
    /// True to pick the lower-indexed vehicle of the pair
    fn pick_first(&mut self) -> bool;
}

impl TieBreak for Pcg32 {
    fn pick_first(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Tie-break with a fixed outcome
#[derive(Debug, Clone, Copy)]
pub struct FixedTieBreak(pub bool);

impl TieBreak for FixedTieBreak {
    fn pick_first(&mut self) -> bool {
        self.0
    }
}

/// A registered collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub a: usize,
    pub b: usize,
    /// Member of the pair that starts drifting
    pub drifted: usize,
    /// Where the drifting vehicle was when it was hit
    pub z: f32,
}

/// Find the first colliding pair among lane-following forward vehicles.
///
/// `positions` holds the nominal z of every vehicle this frame. Pairs are
/// scanned in index order and only one collision can register per frame,
/// since registering one restarts the cooldown.
pub fn detect_collision(
    state: &SceneState,
    positions: &[f32],
    now: f64,
    tie_break: &mut impl TieBreak,
) -> Option<CollisionResult> {
    if !state.cooldown_elapsed(now) {
        return None;
    }

    let candidates: Vec<usize> = state
        .forward()
        .filter(|v| v.is_lane_following())
        .map(|v| v.index)
        .collect();

    for (n, &a) in candidates.iter().enumerate() {
        for &b in &candidates[n + 1..] {
            if (positions[a] - positions[b]).abs() < state.config.collision_threshold {
                let drifted = if tie_break.pick_first() { a } else { b };
                return Some(CollisionResult {
                    a,
                    b,
                    drifted,
                    z: positions[drifted],
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn positions(zs: [f32; 3]) -> Vec<f32> {
        vec![zs[0], zs[1], zs[2], 10.0, 10.0]
    }

    #[test]
    fn test_close_pair_collides() {
        let state = SceneState::default();
        let hit = detect_collision(&state, &positions([1.0, 1.3, -5.0]), 10.0, &mut FixedTieBreak(true));
        let hit = hit.expect("pair 0/1 should collide");
        assert_eq!((hit.a, hit.b, hit.drifted), (0, 1, 0));
        assert!((hit.z - 1.0).abs() < 1e-6);

        let hit = detect_collision(&state, &positions([1.0, 1.3, -5.0]), 10.0, &mut FixedTieBreak(false)).unwrap();
        assert_eq!(hit.drifted, 1);
        assert!((hit.z - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_is_strict() {
        let state = SceneState::default();
        assert!(detect_collision(&state, &positions([0.0, 0.5, -5.0]), 10.0, &mut FixedTieBreak(true)).is_none());
    }

    #[test]
    fn test_cooldown_blocks() {
        let mut state = SceneState::default();
        state.last_collision = 8.0;
        let zs = positions([0.0, 0.1, -5.0]);
        assert!(detect_collision(&state, &zs, 12.9, &mut FixedTieBreak(true)).is_none());
        assert!(detect_collision(&state, &zs, 13.1, &mut FixedTieBreak(true)).is_some());
    }

    #[test]
    fn test_busy_vehicles_are_skipped() {
        let mut state = SceneState::default();
        state.vehicles[0].drift.start();
        state.vehicles[2].offroad.off_road = true;
        // Everyone overlaps, but only vehicle 1 is lane-following
        let zs = positions([0.0, 0.0, 0.0]);
        assert!(detect_collision(&state, &zs, 10.0, &mut FixedTieBreak(true)).is_none());
    }

    #[test]
    fn test_reverse_lane_ignored() {
        let state = SceneState::default();
        // Reverse vehicles overlap each other and forward vehicle 2
        let zs = vec![-8.0, 4.0, 10.0, 10.0, 10.0];
        assert!(detect_collision(&state, &zs, 10.0, &mut FixedTieBreak(true)).is_none());
    }

    #[test]
    fn test_pcg_tie_break_is_fair() {
        let mut rng = Pcg32::seed_from_u64(7);
        let flips = 4000;
        let firsts = (0..flips).filter(|_| rng.pick_first()).count();
        let share = firsts as f64 / flips as f64;
        // ~4.7 standard deviations for a fair coin
        assert!((share - 0.5).abs() < 0.037, "share of first picks: {}", share);
    }
}
