//! Per-frame view of the scene for the renderer

use glam::Vec3;
use serde::Serialize;

use crate::consts::TOW_TRUCK_COLOR;
use crate::sim::state::{LightRole, SceneState};
use crate::sim::tow::{carrying, truck_pose};

/// What a transform describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectKind {
    Vehicle { index: usize },
    /// Tow truck recovering `vehicle`
    TowTruck { vehicle: usize },
}

/// Renderable pose of one scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObjectTransform {
    pub kind: ObjectKind,
    pub position: Vec3,
    /// Rotation about the vertical axis (radians)
    pub yaw: f32,
    /// Packed 0xRRGGBB
    pub color: u32,
    /// Light color role; `None` for the tow truck
    pub lights: Option<LightRole>,
    pub visible: bool,
    /// Tow truck only: stranded car is on the platform
    pub carrying: bool,
}

/// Everything the renderer draws this frame, vehicles first in index order,
/// then the tow truck when a tow is active
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub objects: Vec<ObjectTransform>,
}

impl RenderSnapshot {
    pub fn capture(state: &SceneState) -> Self {
        let mut objects: Vec<ObjectTransform> = state
            .vehicles
            .iter()
            .map(|v| ObjectTransform {
                kind: ObjectKind::Vehicle { index: v.index },
                position: v.pos,
                yaw: v.yaw,
                color: v.color,
                lights: Some(v.lights),
                visible: v.visible,
                carrying: false,
            })
            .collect();

        if let Some(tow) = &state.tow {
            let (position, yaw) = truck_pose(tow, &state.config);
            objects.push(ObjectTransform {
                kind: ObjectKind::TowTruck { vehicle: tow.vehicle },
                position,
                yaw,
                color: TOW_TRUCK_COLOR,
                lights: None,
                visible: true,
                carrying: carrying(tow.t, &state.config),
            });
        }

        Self { objects }
    }

    pub fn tow_truck(&self) -> Option<&ObjectTransform> {
        self.objects
            .iter()
            .find(|o| matches!(o.kind, ObjectKind::TowTruck { .. }))
    }

    pub fn vehicle(&self, index: usize) -> Option<&ObjectTransform> {
        self.objects
            .iter()
            .find(|o| o.kind == ObjectKind::Vehicle { index })
    }
}
