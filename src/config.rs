//! Scene tuning constants
//!
//! Every threshold and duration the simulation uses lives here so the page
//! can override them. Defaults reproduce the shipped animation. Persisted in
//! LocalStorage on web.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a configuration was rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read scene config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scene config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tunable scene parameters (distances in world units, times in seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    // === Track ===
    /// Length of the looping road segment
    pub track_length: f32,
    /// Speed of forward vehicle 0
    pub forward_base_speed: f32,
    /// Extra speed per forward vehicle index
    pub forward_speed_step: f32,
    /// Speed of the first reverse vehicle
    pub reverse_base_speed: f32,
    /// Extra speed per reverse vehicle
    pub reverse_speed_step: f32,

    // === Collisions ===
    /// Longitudinal distance below which two forward vehicles collide
    pub collision_threshold: f32,
    /// Minimum time between two registered collisions
    pub collision_cooldown: f64,

    // === Drift ===
    /// Time a vehicle spends sliding before it rests off-road
    pub drift_duration: f32,
    /// Lateral distance covered by a full drift
    pub drift_offset: f32,
    /// Full turns spun during a drift
    pub drift_turns: f32,

    // === Tow ===
    /// Delay between going off-road and the tow truck being dispatched
    pub tow_delay: f64,
    /// End of the tow truck approach phase
    pub tow_approach_end: f32,
    /// Tow time at which the stranded vehicle is loaded (hidden)
    pub tow_load_at: f32,
    /// Tow time at which the sequence resolves
    pub tow_done_at: f32,
    /// Distance from the road center where the truck waits off-scene
    pub tow_rest_x: f32,
    /// Distance from the road center where the truck parks
    pub tow_roadside_x: f32,

    // === Frame ===
    /// Upper bound on a single frame delta
    pub max_frame_dt: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            track_length: 20.0,
            forward_base_speed: 3.5,
            forward_speed_step: 1.2,
            reverse_base_speed: 2.8,
            reverse_speed_step: 0.6,

            collision_threshold: 0.5,
            collision_cooldown: 5.0,

            drift_duration: 1.5,
            drift_offset: 1.2,
            drift_turns: 1.5,

            tow_delay: 2.0,
            tow_approach_end: 1.2,
            tow_load_at: 2.2,
            tow_done_at: 3.2,
            tow_rest_x: 2.5,
            tow_roadside_x: 1.2,

            max_frame_dt: 0.1,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("track_length", self.track_length as f64)?;
        positive("collision_threshold", self.collision_threshold as f64)?;
        positive("drift_duration", self.drift_duration as f64)?;
        positive("tow_approach_end", self.tow_approach_end as f64)?;
        positive("max_frame_dt", self.max_frame_dt as f64)?;

        fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must not be negative",
                })
            }
        }

        non_negative("drift_offset", self.drift_offset as f64)?;
        non_negative("drift_turns", self.drift_turns as f64)?;
        non_negative("tow_roadside_x", self.tow_roadside_x as f64)?;

        if !(self.collision_cooldown >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "collision_cooldown",
                reason: "must not be negative",
            });
        }
        if !(self.tow_delay >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "tow_delay",
                reason: "must not be negative",
            });
        }
        if !(self.tow_load_at > self.tow_approach_end) {
            return Err(ConfigError::Invalid {
                field: "tow_load_at",
                reason: "must come after tow_approach_end",
            });
        }
        if !(self.tow_done_at > self.tow_load_at) {
            return Err(ConfigError::Invalid {
                field: "tow_done_at",
                reason: "must come after tow_load_at",
            });
        }
        if !(self.tow_rest_x > self.tow_roadside_x) {
            return Err(ConfigError::Invalid {
                field: "tow_rest_x",
                reason: "must be further from the road than tow_roadside_x",
            });
        }
        Ok(())
    }

    /// Speed of the vehicle at `index` along its lane
    pub fn vehicle_speed(&self, index: usize) -> f32 {
        use crate::consts::FORWARD_COUNT;
        if index < FORWARD_COUNT {
            self.forward_base_speed + index as f32 * self.forward_speed_step
        } else {
            self.reverse_base_speed + (index - FORWARD_COUNT) as f32 * self.reverse_speed_step
        }
    }

    /// Total yaw (radians) a vehicle spins through over a full drift
    pub fn drift_rotation(&self) -> f32 {
        self.drift_turns * std::f32::consts::TAU
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "road_scene_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded scene config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored scene config: {}", e),
                }
            }
        }

        log::info!("Using default scene config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Scene config saved");
            }
        }
    }

    /// Load config from an optional JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default scene config");
            return Self::default();
        };

        let loaded = std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(config) => {
                log::info!("Loaded scene config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring scene config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
