//! Road Scene entry point
//!
//! On the web the library's `start` hook and `SceneHandle` do the work. The
//! native binary runs the scene headless and logs what happens on the road.
//!
//! Usage: road-scene [seconds] [config.json]

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use road_scene::SceneConfig;
    use road_scene::sim::{RoadScene, SceneEvent};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seconds: f64 = match args.next().map(|s| s.parse()) {
        Some(Ok(secs)) => secs,
        Some(Err(e)) => {
            log::error!("Invalid duration: {}", e);
            std::process::exit(2);
        }
        None => 60.0,
    };
    let config_path = args.next().map(std::path::PathBuf::from);
    let config = SceneConfig::load_from(config_path.as_deref());

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Road scene (native) running {}s headless, seed {}", seconds, seed);

    let dt: f32 = 1.0 / 60.0;
    let mut scene = RoadScene::new(config, seed);
    let mut now = 0.0;
    let mut tows = 0;
    while now < seconds {
        now += dt as f64;
        for event in scene.advance(now, dt) {
            if matches!(event, SceneEvent::TowStarted { .. }) {
                tows += 1;
            }
            log::info!("t={:6.2} {:?}", now, event);
        }
    }

    let snapshot = scene.snapshot();
    log::info!(
        "Done after {} frames: {} tows, {} objects on screen",
        scene.state.frame,
        tows,
        snapshot.objects.iter().filter(|o| o.visible).count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `road_scene::web::start`, this is just to satisfy the compiler
}
