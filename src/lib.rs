#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedural voxel terrain split into fixed-size chunk columns, face-culled
//! meshing, and viewer-driven chunk streaming under a hard capacity cap.
//!
//! ## Key Modules
//!
//! * `config` - World and terrain settings, loaded from JSON
//! * `engine_state` - The engine: camera and frustum, meshing, worker tasks, and
//!   the voxel world with its terrain generator and streaming manager
//!
//! ## Architecture
//!
//! The crate produces data; it does not draw. A host drives it like this:
//! * Build an [`engine_state::EngineState`] from a [`config::WorldConfig`]
//! * Call `bootstrap()` once, then `update(&viewer)` whenever the viewer moves
//! * Read each loaded chunk's per-block-type meshes and world position
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_terrain::run();
//! }
//! ```
//!
//! The bundled binary is such a host: it flies a camera across the world and
//! logs what gets streamed. Set `RUST_LOG=debug` to see every plan.

use std::time::{Duration, Instant};

use cgmath::{Deg, Point3};
use log::{error, info};

use config::WorldConfig;
use engine_state::{
    camera_state::{camera::Projection, CameraState},
    EngineState,
};

pub mod config;
pub mod engine_state;

/// Frames simulated by the demo flight.
const DEMO_FRAMES: u32 = 240;
/// Simulated frame time.
const FRAME_TIME: Duration = Duration::from_millis(16);
/// Flight speed in blocks per second.
const FLIGHT_SPEED: f32 = 48.0;

/// Runs the headless demo.
///
/// The first command line argument, if present, is the path of a JSON
/// [`WorldConfig`]. A config that cannot be loaded is reported and replaced by
/// the defaults.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::from_path(&path).unwrap_or_else(|err| {
            error!("Failed to load config from {}: {}; using defaults", path, err);
            WorldConfig::default()
        }),
        None => WorldConfig::default(),
    };

    let start = Instant::now();
    let mut engine_state = EngineState::new(&config);
    engine_state.bootstrap();
    info!(
        "Bootstrap took {:?} ({} faces)",
        start.elapsed(),
        total_faces(&engine_state)
    );

    let dimensions = config.chunk_dimensions;
    let projection = Projection::new(1280, 720, Deg(70.0), 0.1, 1000.0);
    let mut camera_state = CameraState::new(
        Point3::new(0.0, dimensions.height as f32 * 0.5, 0.0),
        projection,
        FLIGHT_SPEED,
    );

    for frame in 0..DEMO_FRAMES {
        camera_state.advance(FRAME_TIME);
        let viewer = camera_state.viewer();

        let update_start = Instant::now();
        let plan = engine_state.update(&viewer);
        if !plan.is_empty() {
            info!(
                "Frame {}: viewer at ({:.1}, {:.1}), +{} -{} chunks in {:?}, {} loaded",
                frame,
                viewer.position.x,
                viewer.position.z,
                plan.to_load.len(),
                plan.to_unload.len(),
                update_start.elapsed(),
                engine_state.world().len()
            );
        }
    }

    info!(
        "Flight finished after {:?}: {} chunks loaded, {} faces",
        start.elapsed(),
        engine_state.world().len(),
        total_faces(&engine_state)
    );
}

fn total_faces(engine_state: &EngineState) -> usize {
    engine_state
        .world()
        .chunks()
        .map(|chunk| chunk.meshes().face_count())
        .sum()
}
