//! Scene state and core simulation types
//!
//! Everything the per-frame step reads or writes lives in `SceneState`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::consts::*;

/// Which way a vehicle travels along the road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    /// Drives toward +z, takes part in collisions
    Forward,
    /// Drives toward -z, never collides
    Reverse,
}

/// Color role of a vehicle's leading lights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightRole {
    /// White headlights
    Front,
    /// Red tail lights
    Rear,
}

/// Side of the road relative to the center line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Side occupied by a lateral offset
    pub fn of(x: f32) -> Self {
        if x < 0.0 { Side::Left } else { Side::Right }
    }

    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Loss-of-control slide after a collision
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftState {
    pub drifting: bool,
    /// Seconds since drift onset; 0 whenever `drifting` is false
    pub t: f32,
}

impl DriftState {
    pub fn start(&mut self) {
        self.drifting = true;
        self.t = 0.0;
    }

    pub fn clear(&mut self) {
        self.drifting = false;
        self.t = 0.0;
    }
}

/// Stranded beside the road awaiting a tow
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OffroadState {
    pub off_road: bool,
    /// Longitudinal position frozen at the collision point
    pub off_road_z: f32,
}

/// A car on the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Identity index (0-4)
    pub index: usize,
    pub lane: Lane,
    /// Starting z before the first frame
    pub base_z: f32,
    /// Lane offset from the center line
    pub lateral_x: f32,
    /// Packed 0xRRGGBB body color
    pub color: u32,
    pub lights: LightRole,
    pub visible: bool,
    pub drift: DriftState,
    pub offroad: OffroadState,
    /// Elapsed-clock time at which a tow may be dispatched for this vehicle
    pub pending_tow: Option<f64>,
    /// Rendered position (updated every frame)
    pub pos: Vec3,
    /// Rendered yaw in radians
    pub yaw: f32,
}

impl Vehicle {
    /// Vehicle `index` from the scene table; `index` must be below `VEHICLE_COUNT`
    pub(crate) fn new(index: usize) -> Self {
        let spec = &VEHICLES[index];
        Self {
            index,
            lane: spec.lane,
            base_z: spec.base_z,
            lateral_x: spec.lateral_x,
            color: spec.color,
            lights: spec.lights,
            visible: true,
            drift: DriftState::default(),
            offroad: OffroadState::default(),
            pending_tow: None,
            pos: Vec3::new(spec.lateral_x, VEHICLE_HEIGHT, spec.base_z),
            yaw: 0.0,
        }
    }

    /// Following its lane normally (neither drifting nor stranded)
    pub fn is_lane_following(&self) -> bool {
        !self.drift.drifting && !self.offroad.off_road
    }

    pub fn side(&self) -> Side {
        Side::of(self.lateral_x)
    }
}

/// The single active tow sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowState {
    /// Seconds since the tow started
    pub t: f32,
    /// Vehicle being recovered
    pub vehicle: usize,
    /// Frozen z of the stranded vehicle
    pub z: f32,
    /// Frozen lateral offset of the stranded vehicle (selects the truck side)
    pub x: f32,
}

impl TowState {
    pub fn side(&self) -> Side {
        Side::of(self.x)
    }
}

/// Transition notices produced by a frame step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Pair (a, b) collided; `drifted` lost control at `z`
    Collision { a: usize, b: usize, drifted: usize, z: f32 },
    /// Drift finished; vehicle now rests off-road
    OffRoad { vehicle: usize, z: f32 },
    /// Tow truck dispatched
    TowStarted { vehicle: usize },
    /// Stranded vehicle loaded onto the truck (hidden)
    VehicleLoaded { vehicle: usize },
    /// Tow done; vehicle back in traffic
    TowFinished { vehicle: usize },
}

/// Complete scene state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneState {
    pub config: SceneConfig,
    /// Vehicles ordered by index: forward lane first, then reverse lane
    pub vehicles: Vec<Vehicle>,
    /// Active tow sequence (at most one)
    pub tow: Option<TowState>,
    /// Elapsed-clock time of the last registered collision
    pub last_collision: f64,
    /// Elapsed-clock time of the most recent frame
    pub now: f64,
    /// Frames stepped so far
    pub frame: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl SceneState {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            vehicles: (0..VEHICLE_COUNT).map(Vehicle::new).collect(),
            tow: None,
            last_collision: 0.0,
            now: 0.0,
            frame: 0,
        }
    }

    /// Forward-lane vehicles (the ones that collide)
    pub fn forward(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| v.lane == Lane::Forward)
    }

    /// Whether the collision cooldown has elapsed at `now`
    pub fn cooldown_elapsed(&self, now: f64) -> bool {
        now - self.last_collision > self.config.collision_cooldown
    }
}
