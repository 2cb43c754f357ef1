//! Packed instance records handed to the JS renderer

use bytemuck::{Pod, Zeroable};

use super::snapshot::{ObjectKind, ObjectTransform, RenderSnapshot};
use crate::sim::state::LightRole;
use crate::unpack_rgb;

/// Instance kind tags (`meta[0]`)
pub const KIND_VEHICLE: u32 = 0;
pub const KIND_TOW_TRUCK: u32 = 1;

/// Light tags (`meta[2]`)
pub const LIGHTS_NONE: u32 = 0;
pub const LIGHTS_FRONT: u32 = 1;
pub const LIGHTS_REAR: u32 = 2;

/// One object: position + yaw, rgb + opacity, and kind/index/lights/carrying tags.
/// For the tow truck the index slot holds the vehicle being recovered.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub transform: [f32; 4],
    pub color: [f32; 4],
    pub meta: [u32; 4],
}

impl InstanceRaw {
    pub fn from_transform(object: &ObjectTransform) -> Self {
        let [r, g, b] = unpack_rgb(object.color);
        let opacity = if object.visible { 1.0 } else { 0.0 };
        let (kind, index) = match object.kind {
            ObjectKind::Vehicle { index } => (KIND_VEHICLE, index as u32),
            ObjectKind::TowTruck { vehicle } => (KIND_TOW_TRUCK, vehicle as u32),
        };
        let lights = match object.lights {
            None => LIGHTS_NONE,
            Some(LightRole::Front) => LIGHTS_FRONT,
            Some(LightRole::Rear) => LIGHTS_REAR,
        };

        Self {
            transform: [object.position.x, object.position.y, object.position.z, object.yaw],
            color: [r, g, b, opacity],
            meta: [kind, index, lights, object.carrying as u32],
        }
    }

    /// Size of one record in bytes
    pub const STRIDE: usize = std::mem::size_of::<InstanceRaw>();
}

impl RenderSnapshot {
    pub fn instances(&self) -> Vec<InstanceRaw> {
        self.objects.iter().map(InstanceRaw::from_transform).collect()
    }

    /// Instances as raw bytes, ready for a GPU buffer upload
    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.instances()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SceneState;

    #[test]
    fn test_stride() {
        assert_eq!(InstanceRaw::STRIDE, 48);
    }

    #[test]
    fn test_hidden_vehicle_is_transparent() {
        let mut state = SceneState::default();
        state.vehicles[1].visible = false;
        let instances = RenderSnapshot::capture(&state).instances();
        assert_eq!(instances[0].color[3], 1.0);
        assert_eq!(instances[1].color[3], 0.0);
        assert_eq!(instances[1].meta, [KIND_VEHICLE, 1, LIGHTS_FRONT, 0]);
        assert_eq!(instances[4].meta[2], LIGHTS_REAR);
    }

    #[test]
    fn test_tow_truck_names_its_vehicle() {
        use crate::sim::state::TowState;

        let mut state = SceneState::default();
        state.vehicles[1].offroad.off_road = true;
        state.vehicles[1].visible = false;
        state.tow = Some(TowState { t: 2.6, vehicle: 1, z: -2.0, x: -0.5 });

        let instances = RenderSnapshot::capture(&state).instances();
        let truck = instances.last().unwrap();
        assert_eq!(truck.meta, [KIND_TOW_TRUCK, 1, LIGHTS_NONE, 1]);
    }

    #[test]
    fn test_bytes_match_records() {
        let snapshot = RenderSnapshot::capture(&SceneState::default());
        let bytes = snapshot.instance_bytes();
        assert_eq!(bytes.len(), snapshot.objects.len() * InstanceRaw::STRIDE);
        let first: InstanceRaw = bytemuck::pod_read_unaligned(&bytes[..InstanceRaw::STRIDE]);
        assert_eq!(first.transform[2], -10.0);
    }
}
