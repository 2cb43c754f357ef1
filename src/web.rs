//! Browser bindings
//!
//! The page's render loop owns a `SceneHandle`, calls `frame` once per
//! animation frame and uploads `instances` to its instance buffer.

use wasm_bindgen::prelude::*;

use crate::camera::CameraPose;
use crate::config::SceneConfig;
use crate::sim::RoadScene;
use crate::waitlist;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"road-scene: logger already initialized".into());
    }
    log::info!("Road scene module loaded");
}

#[wasm_bindgen]
pub struct SceneHandle {
    scene: RoadScene,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Build a scene from the stored config, seeded from the wall clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let seed = js_sys::Date::now() as u64;
        log::info!("Road scene seeded with {}", seed);
        Self {
            scene: RoadScene::new(SceneConfig::load(), seed),
        }
    }

    /// Advance using a requestAnimationFrame timestamp (ms).
    /// Returns the number of scene transitions this frame.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let events = self.scene.advance_host(time_ms);
        for event in &events {
            log::debug!("{:?}", event);
        }
        events.len() as u32
    }

    /// Apply a JSON config and persist it for the next visit
    pub fn set_config(&mut self, json: &str) -> Result<(), JsValue> {
        let config = SceneConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        config.save();
        self.scene.set_config(config);
        log::info!("Scene config updated");
        Ok(())
    }

    /// Packed `InstanceRaw` records for the current frame
    pub fn instances(&self) -> Vec<u8> {
        self.scene.snapshot().instance_bytes()
    }

    /// Byte size of one instance record
    pub fn instance_stride(&self) -> u32 {
        crate::renderer::InstanceRaw::STRIDE as u32
    }

    /// Camera preset for a viewport width; call on every resize
    pub fn camera(&self, viewport_width: f64) -> Vec<f32> {
        CameraPose::for_viewport(viewport_width).to_array().to_vec()
    }
}

impl Default for SceneHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate and serialize a signup POST body
#[wasm_bindgen]
pub fn signup_body(prefix: &str, phone: &str, consent: bool) -> Result<String, JsValue> {
    let request = waitlist::SignupRequest::new(prefix, phone, consent);
    request
        .validate()
        .and_then(|_| request.to_json())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check the endpoint reply; resolves to the stored row or throws
#[wasm_bindgen]
pub fn signup_row(reply: &str) -> Result<u32, JsValue> {
    waitlist::check_acknowledgment(reply)
        .map(|row| row as u32)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
