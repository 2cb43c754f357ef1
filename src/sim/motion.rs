//! Lane motion and drift poses
//!
//! Positions are closed-form functions of the elapsed clock, so a vehicle
//! that rejoins traffic snaps straight back onto its periodic schedule.

use super::state::{Lane, Side};
use crate::config::SceneConfig;

/// Nominal z of a vehicle at elapsed time `now`.
///
/// Forward vehicles run from -L/2 toward +L/2 and wrap; reverse vehicles run
/// the other way.
pub fn lane_z(lane: Lane, speed: f32, now: f64, track_length: f32) -> f32 {
    let length = track_length as f64;
    let travelled = (now * speed as f64).rem_euclid(length);
    let half = length / 2.0;
    let z = match lane {
        Lane::Forward => travelled - half,
        Lane::Reverse => half - travelled,
    };
    z as f32
}

/// Lateral offset and yaw of a sliding vehicle `t` seconds into its drift.
/// Saturates at the full drift once `t` reaches `drift_duration`.
pub fn drift_pose(side: Side, t: f32, config: &SceneConfig) -> (f32, f32) {
    let progress = (t.min(config.drift_duration) / config.drift_duration).max(0.0);
    (
        side.sign() * config.drift_offset * progress,
        side.sign() * config.drift_rotation() * progress,
    )
}

/// Lateral offset and yaw of a vehicle resting off-road
pub fn offroad_pose(side: Side, config: &SceneConfig) -> (f32, f32) {
    (
        side.sign() * config.drift_offset,
        side.sign() * config.drift_rotation(),
    )
}
