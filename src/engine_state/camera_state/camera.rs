//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and view matrix
//! - Projection matrix handling
//! - An orbit controller that circles a point over time
//!
//! ## Key Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages perspective projection settings
//! - `OrbitController`: Drives a camera around a fixed center

use cgmath::*;
use std::f32::consts::FRAC_PI_2;
use web_time::Duration;

/// Transformation matrix to convert from OpenGL's coordinate system to WGPU's.
///
/// NDC depth in WGPU ranges from 0 to 1 rather than -1 to 1, so this matrix:
/// 1. Scales the Z coordinate from [-1, 1] to [-0.5, 0.5]
/// 2. Translates the Z coordinate from [-0.5, 0.5] to [0, 1]
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,  // Scale Z from [-1,1] to [-0.5,0.5]
    0.0, 0.0, 0.5, 1.0,  // Translate Z from [-0.5,0.5] to [0,1]
);

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// A first-person camera in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// A yaw of zero faces along `+x`; pitch is clamped just short of straight
    /// up or down.
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        };
        camera.clamp_pitch();
        camera
    }

    /// Turns the camera to face `target`. Does nothing if it already sits there.
    pub fn look_at(&mut self, target: Point3<f32>) {
        let direction = target - self.position;
        if direction.magnitude2() == 0.0 {
            return;
        }
        let direction = direction.normalize();
        self.yaw = Rad(direction.z.atan2(direction.x));
        self.pitch = Rad(direction.y.asin());
        self.clamp_pitch();
    }

    /// Gets the camera's forward direction vector.
    pub fn get_view_vec(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Calculates the view matrix for this camera.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.get_view_vec(), Vector3::unit_y())
    }

    fn clamp_pitch(&mut self) {
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }
}

/// A camera's projection matrix and related parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection for a `width`×`height` viewport.
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Combines the perspective projection with the OpenGL to WGPU transform.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Moves a camera on a horizontal circle around `center`, always facing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitController {
    /// Point the camera circles and looks at
    pub center: Point3<f32>,
    /// Horizontal distance from `center`
    pub radius: f32,
    /// Height above `center`
    pub height: f32,
    /// Angular speed in radians per second
    pub speed: f32,
    angle: Rad<f32>,
}

impl OrbitController {
    /// Creates a controller starting at angle zero.
    pub fn new(center: Point3<f32>, radius: f32, height: f32, speed: f32) -> Self {
        Self {
            center,
            radius,
            height,
            speed,
            angle: Rad(0.0),
        }
    }

    /// Current angle around the center.
    pub fn angle(&self) -> Rad<f32> {
        self.angle
    }

    /// Advances the orbit by `dt` and places `camera` accordingly.
    pub fn update_camera(&mut self, camera: &mut Camera, dt: Duration) {
        self.angle = (self.angle + Rad(self.speed * dt.as_secs_f32())).normalize();
        self.place(camera);
    }

    /// Places `camera` at the current orbit position without advancing.
    pub fn place(&self, camera: &mut Camera) {
        let (sin, cos) = self.angle.0.sin_cos();
        camera.position = self.center + Vector3::new(cos * self.radius, self.height, sin * self.radius);
        camera.look_at(self.center);
    }
}
