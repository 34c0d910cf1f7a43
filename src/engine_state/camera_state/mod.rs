//! # Camera State Management
//!
//! This module handles the viewer side of chunk streaming:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - View frustum extraction for chunk visibility
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's projection matrix
//! - `Frustum`: The six planes bounding what the camera can see
//! - `ViewerState`: The position + frustum snapshot handed to the streaming manager
//!
//! Player input is not handled here. The host moves the camera programmatically,
//! either directly through `camera` or with a constant flight speed via `advance`.

use std::time::Duration;

use cgmath::{Deg, Point3};

use frustum::Frustum;

pub mod camera;
pub mod frustum;

/// What the streaming manager needs to know about the viewer for one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    /// World-space position of the viewer.
    pub position: Point3<f32>,
    /// The volume the viewer can currently see.
    pub frustum: Frustum,
}

/// Owns the camera and projection and turns them into `ViewerState` snapshots.
///
/// # Fields
/// - `camera`: The current camera state (position, orientation)
/// - `projection`: The perspective projection used for frustum extraction
/// - `speed`: Forward flight speed in world units per second used by `advance`
#[derive(Debug, Clone)]
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// The perspective projection
    pub projection: camera::Projection,
    /// Forward flight speed, in world units per second
    pub speed: f32,
}

impl CameraState {
    /// Creates a camera state at `position` looking down the positive X axis.
    pub fn new(position: Point3<f32>, projection: camera::Projection, speed: f32) -> Self {
        let camera = camera::Camera::new(position, Deg(0.0), Deg(0.0));
        CameraState {
            camera,
            projection,
            speed,
        }
    }

    /// Moves the camera forward for `dt` at the configured speed.
    pub fn advance(&mut self, dt: Duration) {
        self.camera.move_forward(self.speed * dt.as_secs_f32());
    }

    /// Snapshot of the viewer for the streaming manager.
    pub fn viewer(&self) -> ViewerState {
        ViewerState {
            position: self.camera.position,
            frustum: self.camera.frustum(&self.projection),
        }
    }
}
