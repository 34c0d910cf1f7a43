//! # Voxel Terrain Demo Entry Point
//!
//! This is the entry point for the headless demo. It simply calls into the
//! library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() {
    voxel_terrain::run();
}
