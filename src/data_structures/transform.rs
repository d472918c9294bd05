//! Poses and transforms of placed objects.
//!
//! A [`Pose`] is what the tracking subsystem reports for a surface hit: a
//! position and an orientation aligned with the surface. A [`Transform`] adds
//! the per-object scale that only the user changes.

use cgmath::{Deg, InnerSpace, One, Quaternion, Rotation3, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Pose {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self { position, rotation }
    }

    /// A pose at `position` with no rotation.
    pub fn at(position: Vector3<f32>) -> Self {
        Self::new(position, Quaternion::one())
    }
}

/// Position, rotation (as quaternion) and non-uniform scale of one object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transform: origin, no rotation, unit scale.
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            // `Quaternion::one()` is the identity quaternion (no rotation)
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    /// Move onto `pose` while keeping the current scale.
    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation;
    }

    /// The scale factor pinch gestures operate on.
    ///
    /// Objects are only ever scaled uniformly by gestures, so the x component
    /// is representative.
    pub fn uniform_scale(&self) -> f32 {
        self.scale.x
    }

    pub fn set_uniform_scale(&mut self, factor: f32) {
        self.scale = Vector3::new(factor, factor, factor);
    }

    /// Turn around the object's own up axis by `angle`.
    pub fn rotate_about_up(&mut self, angle: Deg<f32>) {
        let twist = Quaternion::from_axis_angle(Vector3::unit_y(), angle);
        self.rotation = (self.rotation * twist).normalize();
    }

    /// Component-wise comparison within `tolerance`.
    ///
    /// `q` and `-q` encode the same rotation, so both signs are accepted.
    pub fn approx_eq(&self, other: &Transform, tolerance: f32) -> bool {
        let close = |a: f32, b: f32| (a - b).abs() <= tolerance;
        let vec_close =
            |a: Vector3<f32>, b: Vector3<f32>| close(a.x, b.x) && close(a.y, b.y) && close(a.z, b.z);
        let quat_close = |a: Quaternion<f32>, b: Quaternion<f32>| {
            close(a.s, b.s) && vec_close(a.v, b.v)
        };
        vec_close(self.position, other.position)
            && vec_close(self.scale, other.scale)
            && (quat_close(self.rotation, other.rotation)
                || quat_close(self.rotation, -other.rotation))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Pose> for Transform {
    fn from(pose: Pose) -> Self {
        Transform {
            position: pose.position,
            rotation: pose.rotation,
            ..Default::default()
        }
    }
}
