//! Seeded scene driver
//!
//! Bundles the scene state with its coin-flip source so hosts only deal with
//! a clock.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{SceneEvent, SceneState};
use super::tick::{FrameClock, tick};
use crate::config::SceneConfig;
use crate::renderer::RenderSnapshot;

/// The animated road: scene state plus its seeded tie-break source
#[derive(Debug, Clone)]
pub struct RoadScene {
    pub state: SceneState,
    seed: u64,
    rng: Pcg32,
    /// Host timestamp (ms) of the first frame; the scene clock starts there
    start_ms: Option<f64>,
    last_ms: Option<f64>,
}

impl RoadScene {
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        Self {
            state: SceneState::new(config),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            start_ms: None,
            last_ms: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance one rendered frame
    pub fn advance(&mut self, now: f64, dt: f32) -> Vec<SceneEvent> {
        tick(&mut self.state, FrameClock::new(now, dt), &mut self.rng)
    }

    /// Advance from a host timestamp in ms (e.g. requestAnimationFrame).
    ///
    /// The scene clock reads 0 on the first call, whatever the host clock
    /// says, so the collision cooldown always counts from scene start.
    pub fn advance_host(&mut self, time_ms: f64) -> Vec<SceneEvent> {
        let start = *self.start_ms.get_or_insert(time_ms);
        let dt = match self.last_ms {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(time_ms);
        self.advance((time_ms - start) / 1000.0, dt)
    }

    /// Swap in a new config; vehicles keep their current state
    pub fn set_config(&mut self, config: SceneConfig) {
        self.state.config = config;
    }

    /// Transforms for the renderer
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Start over with the same config and a new seed
    pub fn restart(&mut self, seed: u64) {
        let config = self.state.config.clone();
        *self = Self::new(config, seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_updates_clock() {
        let mut scene = RoadScene::new(SceneConfig::default(), 1);
        scene.advance(0.5, 0.016);
        assert_eq!(scene.state.now, 0.5);
        assert_eq!(scene.state.frame, 1);
    }

    #[test]
    fn test_host_clock_starts_at_zero() {
        // Scene mounted 16.26s after page load: the cooldown must still hold
        let mut scene = RoadScene::new(SceneConfig::default(), 1);
        assert!(scene.advance_host(16_260.0).is_empty());
        assert_eq!(scene.state.now, 0.0);

        let mut time_ms = 16_260.0;
        while time_ms < 16_260.0 + 4_900.0 {
            time_ms += 1000.0 / 60.0;
            assert!(scene.advance_host(time_ms).is_empty());
        }
        assert!((scene.state.now - 4.9).abs() < 0.02);
    }

    #[test]
    fn test_host_clock_resets_on_restart() {
        let mut scene = RoadScene::new(SceneConfig::default(), 1);
        scene.advance_host(1_000.0);
        scene.advance_host(3_000.0);
        assert!((scene.state.now - 2.0).abs() < 1e-9);

        scene.restart(2);
        scene.advance_host(9_000.0);
        assert_eq!(scene.state.now, 0.0);
    }

    #[test]
    fn test_set_config_applies() {
        let mut scene = RoadScene::new(SceneConfig::default(), 1);
        let config = SceneConfig {
            collision_cooldown: 0.5,
            ..SceneConfig::default()
        };
        scene.set_config(config.clone());
        assert_eq!(scene.state.config, config);
    }

    #[test]
    fn test_restart_keeps_config() {
        let config = SceneConfig {
            collision_cooldown: 2.0,
            ..SceneConfig::default()
        };
        let mut scene = RoadScene::new(config, 1);
        scene.advance(1.0, 0.016);
        scene.restart(42);
        assert_eq!(scene.seed(), 42);
        assert_eq!(scene.state.frame, 0);
        assert_eq!(scene.state.config.collision_cooldown, 2.0);
    }

    #[test]
    fn test_same_seed_same_story() {
        let mut a = RoadScene::new(SceneConfig::default(), 7);
        let mut b = RoadScene::new(SceneConfig::default(), 7);
        let mut now = 0.0;
        let mut events = 0;
        for _ in 0..12_000 {
            now += 1.0 / 60.0;
            let ea = a.advance(now, 1.0 / 60.0);
            assert_eq!(ea, b.advance(now, 1.0 / 60.0));
            events += ea.len();
        }
        // Over 200s of traffic something has to happen
        assert!(events > 0);
    }
}
