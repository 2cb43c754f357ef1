//! Road Scene - animated background for the waitlist landing page
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (lane traffic, collisions, drift, tow recovery)
//! - `config`: Data-driven scene constants
//! - `camera`: Viewport breakpoint camera presets
//! - `renderer`: Render boundary (per-object transforms, packed instances)
//! - `waitlist`: Signup record and acknowledgment contract

pub mod camera;
pub mod config;
pub mod renderer;
pub mod sim;
pub mod waitlist;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use camera::CameraPose;
pub use config::{ConfigError, SceneConfig};
pub use renderer::{InstanceRaw, ObjectKind, ObjectTransform, RenderSnapshot};

/// Scene layout constants
pub mod consts {
    use crate::sim::{Lane, LightRole};

    /// Number of vehicles in the scene
    pub const VEHICLE_COUNT: usize = 5;
    /// Vehicles 0..FORWARD_COUNT drive the forward lane
    pub const FORWARD_COUNT: usize = 3;

    /// Height of a car body above the road
    pub const VEHICLE_HEIGHT: f32 = 0.05;
    /// Height of the tow truck above the road
    pub const TOW_TRUCK_HEIGHT: f32 = 0.12;

    /// Tow truck body color
    pub const TOW_TRUCK_COLOR: u32 = 0xe24a4a;

    /// Static vehicle table: lane, lateral offset, color, light role, starting z
    pub struct VehicleSpec {
        pub lane: Lane,
        pub lateral_x: f32,
        pub color: u32,
        pub lights: LightRole,
        pub base_z: f32,
    }

    pub const VEHICLES: [VehicleSpec; VEHICLE_COUNT] = [
        VehicleSpec { lane: Lane::Forward, lateral_x: -0.4, color: 0x888888, lights: LightRole::Front, base_z: -10.0 },
        VehicleSpec { lane: Lane::Forward, lateral_x: -0.5, color: 0xbbbbbb, lights: LightRole::Front, base_z: -13.0 },
        VehicleSpec { lane: Lane::Forward, lateral_x: -0.3, color: 0x666666, lights: LightRole::Front, base_z: -16.0 },
        VehicleSpec { lane: Lane::Reverse, lateral_x: 0.4, color: 0x888888, lights: LightRole::Rear, base_z: 10.0 },
        VehicleSpec { lane: Lane::Reverse, lateral_x: 0.5, color: 0xbbbbbb, lights: LightRole::Rear, base_z: 13.0 },
    ];
}

/// Split a packed 0xRRGGBB color into [r, g, b] channels in 0..1
#[inline]
pub fn unpack_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xff) as f32 / 255.0,
        ((color >> 8) & 0xff) as f32 / 255.0,
        (color & 0xff) as f32 / 255.0,
    ]
}
