//! Per-frame simulation step
//!
//! Advances the scene by one rendered frame: lane motion, collisions, drift,
//! tow dispatch and tow progression, then refreshes rendered poses.

use glam::Vec3;

use super::collision::{TieBreak, detect_collision};
use super::motion::{drift_pose, lane_z, offroad_pose};
use super::state::{Lane, SceneEvent, SceneState, TowState};
use crate::consts::VEHICLE_HEIGHT;

/// Clock readings for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    /// Elapsed scene time in seconds
    pub now: f64,
    /// Seconds since the previous frame
    pub dt: f32,
}

impl FrameClock {
    pub fn new(now: f64, dt: f32) -> Self {
        Self { now, dt }
    }
}

/// Clamp a host-supplied frame delta to `[0, max_dt]`
fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max_dt)
    } else {
        0.0
    }
}

/// Advance the scene by one frame.
///
/// Returns the transitions that happened this frame, in the order they were
/// applied.
pub fn tick(state: &mut SceneState, clock: FrameClock, tie_break: &mut impl TieBreak) -> Vec<SceneEvent> {
    let now = clock.now;
    let dt = sanitize_dt(clock.dt, state.config.max_frame_dt);
    let mut events = Vec::new();

    state.now = now;
    state.frame += 1;

    // Nominal lane positions for every vehicle
    let positions: Vec<f32> = state
        .vehicles
        .iter()
        .map(|v| {
            lane_z(
                v.lane,
                state.config.vehicle_speed(v.index),
                now,
                state.config.track_length,
            )
        })
        .collect();

    // Collisions between lane-following forward vehicles
    let mut just_hit = None;
    if let Some(hit) = detect_collision(state, &positions, now, tie_break) {
        let vehicle = &mut state.vehicles[hit.drifted];
        vehicle.drift.start();
        vehicle.offroad.off_road_z = hit.z;
        state.last_collision = now;
        just_hit = Some(hit.drifted);

        log::debug!(
            "t={:.2} collision {}/{} at z={:.2}, vehicle {} drifts",
            now,
            hit.a,
            hit.b,
            hit.z,
            hit.drifted
        );
        events.push(SceneEvent::Collision {
            a: hit.a,
            b: hit.b,
            drifted: hit.drifted,
            z: hit.z,
        });
    }

    // Drift progression; a finished drift strands the vehicle off-road
    let drift_duration = state.config.drift_duration;
    let tow_delay = state.config.tow_delay;
    for vehicle in state.vehicles.iter_mut() {
        if !vehicle.drift.drifting || just_hit == Some(vehicle.index) {
            continue;
        }
        vehicle.drift.t += dt;
        if vehicle.drift.t > drift_duration {
            vehicle.drift.clear();
            vehicle.offroad.off_road = true;
            vehicle.pending_tow = Some(now + tow_delay);

            log::debug!("t={:.2} vehicle {} off-road", now, vehicle.index);
            events.push(SceneEvent::OffRoad {
                vehicle: vehicle.index,
                z: vehicle.offroad.off_road_z,
            });
        }
    }

    // Tow dispatch for due deadlines. The guard is re-checked here, so a
    // deadline that outlived its condition is simply dropped.
    let mut tow_started = false;
    for index in 0..state.vehicles.len() {
        let Some(deadline) = state.vehicles[index].pending_tow else {
            continue;
        };
        if now < deadline {
            continue;
        }
        state.vehicles[index].pending_tow = None;

        let vehicle = &state.vehicles[index];
        if state.tow.is_none() && vehicle.visible && vehicle.offroad.off_road {
            state.tow = Some(TowState {
                t: 0.0,
                vehicle: index,
                z: vehicle.offroad.off_road_z,
                x: vehicle.lateral_x,
            });
            tow_started = true;

            log::debug!("t={:.2} tow dispatched for vehicle {}", now, index);
            events.push(SceneEvent::TowStarted { vehicle: index });
        } else {
            log::trace!("t={:.2} dropping tow deadline for vehicle {}", now, index);
        }
    }

    // Tow progression
    let mut finished = None;
    if !tow_started {
        if let Some(tow) = state.tow.as_mut() {
            tow.t += dt;
            let vehicle = &mut state.vehicles[tow.vehicle];
            if tow.t > state.config.tow_load_at && vehicle.visible {
                vehicle.visible = false;
                log::debug!("t={:.2} vehicle {} loaded", now, tow.vehicle);
                events.push(SceneEvent::VehicleLoaded { vehicle: tow.vehicle });
            }
            if tow.t > state.config.tow_done_at {
                finished = Some(tow.vehicle);
            }
        }
    }

    if let Some(index) = finished {
        state.tow = None;
        let vehicle = &mut state.vehicles[index];
        vehicle.visible = true;
        vehicle.offroad.off_road = false;

        log::debug!("t={:.2} tow finished, vehicle {} back on the road", now, index);
        events.push(SceneEvent::TowFinished { vehicle: index });

        // Anyone still stranded gets another chance after the usual delay
        for other in state.vehicles.iter_mut() {
            if other.offroad.off_road && other.pending_tow.is_none() {
                other.pending_tow = Some(now + tow_delay);
            }
        }
    }

    update_poses(state, &positions);

    events
}

/// Refresh rendered position and yaw from the simulation state
fn update_poses(state: &mut SceneState, positions: &[f32]) {
    let config = &state.config;
    for vehicle in state.vehicles.iter_mut() {
        let side = vehicle.side();
        let (dx, yaw, z) = if vehicle.lane == Lane::Reverse {
            (0.0, 0.0, positions[vehicle.index])
        } else if vehicle.drift.drifting {
            let (dx, yaw) = drift_pose(side, vehicle.drift.t, config);
            (dx, yaw, vehicle.offroad.off_road_z)
        } else if vehicle.offroad.off_road {
            let (dx, yaw) = offroad_pose(side, config);
            (dx, yaw, vehicle.offroad.off_road_z)
        } else {
            (0.0, 0.0, positions[vehicle.index])
        };

        vehicle.pos = Vec3::new(vehicle.lateral_x + dx, VEHICLE_HEIGHT, z);
        vehicle.yaw = yaw;
    }
}
