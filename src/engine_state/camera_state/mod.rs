//! # Camera State Management
//!
//! This module handles camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - The [`Viewpoint`] interface the world streams and renders against
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's projection matrix
//! - `OrbitController`: Moves the camera around a point over time
//! - `CameraState`: Pairs a camera with its projection

use cgmath::{Matrix4, Point3};

pub mod camera;

use camera::{Camera, Projection};

/// What the world needs from a viewer.
pub trait Viewpoint {
    /// World-space position used for streaming distance tests.
    fn position(&self) -> Point3<f32>;

    /// Combined view-projection matrix for rendering.
    fn view_projection(&self) -> Matrix4<f32>;
}

/// A camera together with the projection it is viewed through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// Perspective settings for the viewport
    pub projection: Projection,
}

impl CameraState {
    /// Creates a new camera state.
    pub fn new(camera: Camera, projection: Projection) -> Self {
        CameraState { camera, projection }
    }

    /// Updates the projection for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }
}

impl Viewpoint for CameraState {
    fn position(&self) -> Point3<f32> {
        self.camera.position
    }

    fn view_projection(&self) -> Matrix4<f32> {
        self.projection.calc_matrix() * self.camera.calc_matrix()
    }
}

/// A bare point sees with an identity projection; handy when only streaming matters.
impl Viewpoint for Point3<f32> {
    fn position(&self) -> Point3<f32> {
        *self
    }

    fn view_projection(&self) -> Matrix4<f32> {
        use cgmath::SquareMatrix;
        Matrix4::identity()
    }
}
