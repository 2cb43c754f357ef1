//! Tow truck choreography
//!
//! Timeline (seconds since dispatch, default config):
//! - 0.0-1.2 approach: truck drives in from the rest position to the roadside
//! - 1.2-2.2 dwell: truck parked beside the stranded car
//! - 2.2-3.2 depart: car loaded, truck drives back out
//! - 3.2+    off-scene: truck at rest, sequence resolved

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use super::state::{Side, TowState};
use crate::config::SceneConfig;
use crate::consts::TOW_TRUCK_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TowPhase {
    Approach,
    Dwell,
    Depart,
    OffScene,
}

impl TowPhase {
    pub fn at(t: f32, config: &SceneConfig) -> Self {
        if t < config.tow_approach_end {
            TowPhase::Approach
        } else if t < config.tow_load_at {
            TowPhase::Dwell
        } else if t < config.tow_done_at {
            TowPhase::Depart
        } else {
            TowPhase::OffScene
        }
    }
}

/// Lateral position of the truck `t` seconds into the sequence
pub fn truck_x(t: f32, side: Side, config: &SceneConfig) -> f32 {
    let rest = side.sign() * config.tow_rest_x;
    let roadside = side.sign() * config.tow_roadside_x;

    match TowPhase::at(t, config) {
        TowPhase::Approach => rest + (roadside - rest) * (t / config.tow_approach_end),
        TowPhase::Dwell => roadside,
        TowPhase::Depart => {
            let span = config.tow_done_at - config.tow_load_at;
            roadside + (rest - roadside) * ((t - config.tow_load_at) / span)
        }
        TowPhase::OffScene => rest,
    }
}

/// Truck yaw: nose pointing toward the road from whichever side it works
pub fn truck_yaw(side: Side) -> f32 {
    match side {
        Side::Left => FRAC_PI_2,
        Side::Right => -FRAC_PI_2,
    }
}

/// Rendered pose of the truck for an active sequence
pub fn truck_pose(tow: &TowState, config: &SceneConfig) -> (Vec3, f32) {
    let side = tow.side();
    (
        Vec3::new(truck_x(tow.t, side, config), TOW_TRUCK_HEIGHT, tow.z),
        truck_yaw(side),
    )
}

/// Whether the stranded car rides on the truck platform at time `t`
pub fn carrying(t: f32, config: &SceneConfig) -> bool {
    t > config.tow_load_at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let config = SceneConfig::default();
        assert_eq!(TowPhase::at(0.0, &config), TowPhase::Approach);
        assert_eq!(TowPhase::at(1.5, &config), TowPhase::Dwell);
        assert_eq!(TowPhase::at(2.5, &config), TowPhase::Depart);
        assert_eq!(TowPhase::at(3.3, &config), TowPhase::OffScene);
    }

    #[test]
    fn test_left_side_path() {
        let config = SceneConfig::default();
        assert!((truck_x(0.0, Side::Left, &config) + 2.5).abs() < 1e-5);
        assert!((truck_x(0.6, Side::Left, &config) + 1.85).abs() < 1e-5);
        assert!((truck_x(1.2, Side::Left, &config) + 1.2).abs() < 1e-5);
        assert!((truck_x(2.0, Side::Left, &config) + 1.2).abs() < 1e-5);
        assert!((truck_x(2.7, Side::Left, &config) + 1.85).abs() < 1e-4);
        assert!((truck_x(5.0, Side::Left, &config) + 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_right_side_mirrors_left() {
        let config = SceneConfig::default();
        for step in 0..40 {
            let t = step as f32 * 0.1;
            let left = truck_x(t, Side::Left, &config);
            let right = truck_x(t, Side::Right, &config);
            assert!((left + right).abs() < 1e-5);
        }
        assert_eq!(truck_yaw(Side::Left), -truck_yaw(Side::Right));
    }

    #[test]
    fn test_path_is_continuous() {
        let config = SceneConfig::default();
        let mut prev = truck_x(0.0, Side::Left, &config);
        for step in 1..=400 {
            let x = truck_x(step as f32 * 0.01, Side::Left, &config);
            assert!((x - prev).abs() < 0.05, "jump at step {}", step);
            prev = x;
        }
    }

    #[test]
    fn test_truck_pose_uses_frozen_z() {
        let config = SceneConfig::default();
        let tow = TowState { t: 1.5, vehicle: 1, z: 3.25, x: -0.5 };
        let (pos, yaw) = truck_pose(&tow, &config);
        assert_eq!(pos.z, 3.25);
        assert_eq!(pos.y, TOW_TRUCK_HEIGHT);
        assert!((pos.x + 1.2).abs() < 1e-5);
        assert_eq!(yaw, FRAC_PI_2);
        assert!(!carrying(tow.t, &config));
        assert!(carrying(2.3, &config));
    }
}
