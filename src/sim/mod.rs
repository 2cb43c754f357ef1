//! Road scene simulation module
//!
//! All scene logic lives here. This module must stay renderer-free:
//! - Driven only by the supplied frame clock
//! - Randomness only through an injected `TieBreak`
//! - Stable iteration order (by vehicle index)

pub mod collision;
pub mod motion;
pub mod scene;
pub mod state;
pub mod tick;
pub mod tow;

pub use collision::{CollisionResult, FixedTieBreak, TieBreak, detect_collision};
pub use motion::{drift_pose, lane_z, offroad_pose};
pub use scene::RoadScene;
pub use state::{
    DriftState, Lane, LightRole, OffroadState, SceneEvent, SceneState, Side, TowState, Vehicle,
};
pub use tick::{FrameClock, tick};
pub use tow::{TowPhase, truck_pose, truck_x, truck_yaw};
