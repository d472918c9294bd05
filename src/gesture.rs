//! Two-finger pinch and twist.
//!
//! A [`GestureSession`] is captured when the second finger lands. Scale is
//! always computed against that first frame, so a pinch that comes back to its
//! starting distance returns to the starting scale. Rotation is incremental:
//! every frame compares against the previous frame's finger vector, which
//! keeps the twist stable when the fingers cross through 180°.

use cgmath::{Deg, InnerSpace, Rad, Vector2};
use winit::dpi::PhysicalPosition;

use crate::{config::InteractionConfig, error::SceneError};

/// Transient state of one two-finger contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    initial_distance: f32,
    initial_scale: f32,
    prev_touch_vector: Vector2<f32>,
}

impl GestureSession {
    pub fn initial_distance(&self) -> f32 {
        self.initial_distance
    }

    pub fn initial_scale(&self) -> f32 {
        self.initial_scale
    }

    pub fn prev_touch_vector(&self) -> Vector2<f32> {
        self.prev_touch_vector
    }
}

/// What one frame of finger movement asks of the selected object.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureUpdate {
    /// New absolute uniform scale.
    pub scale: Option<f32>,
    /// Rotation to add around the object's up axis.
    pub twist: Option<Deg<f32>>,
}

#[derive(Clone, Copy, Debug)]
pub struct GestureInterpreter {
    min_distance: f32,
    dead_zone: Deg<f32>,
}

impl GestureInterpreter {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            min_distance: config.min_pinch_distance,
            dead_zone: Deg(config.rotation_dead_zone_deg),
        }
    }

    pub fn begin(
        &self,
        a: PhysicalPosition<f64>,
        b: PhysicalPosition<f64>,
        current_scale: f32,
    ) -> GestureSession {
        let vector = touch_vector(a, b);
        GestureSession {
            initial_distance: vector.magnitude(),
            initial_scale: current_scale,
            prev_touch_vector: vector,
        }
    }

    pub fn update(
        &self,
        session: &mut GestureSession,
        a: PhysicalPosition<f64>,
        b: PhysicalPosition<f64>,
    ) -> GestureUpdate {
        let current = touch_vector(a, b);
        let mut update = GestureUpdate::default();

        if session.initial_distance < self.min_distance {
            log::debug!(
                "{}",
                SceneError::DegenerateGesture(session.initial_distance)
            );
        } else {
            let factor = current.magnitude() / session.initial_distance;
            update.scale = Some(session.initial_scale * factor);
        }

        let delta = signed_angle(session.prev_touch_vector, current);
        if delta.0.abs() > self.dead_zone.0 {
            update.twist = Some(-delta);
        }
        session.prev_touch_vector = current;

        update
    }
}

/// Counter-clockwise angle from `from` to `to` in the screen plane, in (-180°, 180°].
pub fn signed_angle(from: Vector2<f32>, to: Vector2<f32>) -> Deg<f32> {
    if from.magnitude2() == 0.0 || to.magnitude2() == 0.0 {
        return Deg(0.0);
    }
    Rad(from.perp_dot(to).atan2(from.dot(to))).into()
}

fn touch_vector(a: PhysicalPosition<f64>, b: PhysicalPosition<f64>) -> Vector2<f32> {
    Vector2::new((b.x - a.x) as f32, (b.y - a.y) as f32)
}
