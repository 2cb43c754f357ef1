//! Viewport camera presets
//!
//! Narrow screens pull the camera left and down so the road stays in frame
//! beside the signup card.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Viewport width (CSS px) below which the mobile preset applies
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Vertical field of view in degrees
pub const CAMERA_FOV: f32 = 60.0;

/// Camera placement handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    /// Euler rotation (radians)
    pub rotation: Vec3,
    pub fov: f32,
}

impl CameraPose {
    pub const DESKTOP: Self = Self {
        position: Vec3::new(2.5, 3.0, 7.0),
        rotation: Vec3::new(0.0, -0.2, 0.0),
        fov: CAMERA_FOV,
    };

    pub const MOBILE: Self = Self {
        position: Vec3::new(-2.5, 1.5, 7.0),
        rotation: Vec3::new(0.0, -0.2, 0.0),
        fov: CAMERA_FOV,
    };

    /// Preset for a viewport width; call again on every resize
    pub fn for_viewport(width: f64) -> Self {
        if width < MOBILE_BREAKPOINT {
            Self::MOBILE
        } else {
            Self::DESKTOP
        }
    }

    /// position xyz, rotation xyz, fov
    pub fn to_array(&self) -> [f32; 7] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.fov,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint() {
        assert_eq!(CameraPose::for_viewport(375.0), CameraPose::MOBILE);
        assert_eq!(CameraPose::for_viewport(767.9), CameraPose::MOBILE);
        assert_eq!(CameraPose::for_viewport(768.0), CameraPose::DESKTOP);
        assert_eq!(CameraPose::for_viewport(1920.0), CameraPose::DESKTOP);
    }

    #[test]
    fn test_to_array() {
        let arr = CameraPose::MOBILE.to_array();
        assert_eq!(arr, [-2.5, 1.5, 7.0, 0.0, -0.2, 0.0, 60.0]);
    }
}
