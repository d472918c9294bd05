//! Hit testing against placed objects and tracked surfaces.
//!
//! The tracking/rendering layer answers two questions for a screen point:
//! which rendered object is under it, and where a ray through it meets a
//! tracked surface. [`HitTester`] is that contract. [`resolve`] combines both
//! answers the way tap handling needs them: a placed entity in front wins over
//! the surface behind it.

use winit::dpi::PhysicalPosition;

use crate::{
    data_structures::{
        scene::{EntityId, Scene},
        surface::SurfaceId,
        transform::Pose,
    },
    planes::PlaneDeduplicator,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub surface: SurfaceId,
    pub pose: Pose,
}

pub trait HitTester {
    /// The rendered object under `screen`, if any.
    fn hit_entity(&self, screen: PhysicalPosition<f64>) -> Option<EntityId>;

    /// The closest tracked surface under `screen`, if any.
    fn hit_surface(&self, screen: PhysicalPosition<f64>) -> Option<SurfaceHit>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
    Entity(EntityId),
    Surface(SurfaceHit),
    Miss,
}

/// Classify a tap at `screen`.
///
/// Entity ids that are not part of `scene` fall through to the surface test.
pub fn resolve(hits: &dyn HitTester, scene: &Scene, screen: PhysicalPosition<f64>) -> Hit {
    if let Some(id) = hits.hit_entity(screen).filter(|id| scene.contains(*id)) {
        return Hit::Entity(id);
    }
    match hits.hit_surface(screen) {
        Some(hit) => Hit::Surface(hit),
        None => Hit::Miss,
    }
}

/// Hides surfaces the deduplicator switched off from another hit tester.
pub struct ActiveSurfaces<'a> {
    inner: &'a dyn HitTester,
    planes: &'a PlaneDeduplicator,
}

impl<'a> ActiveSurfaces<'a> {
    pub fn new(inner: &'a dyn HitTester, planes: &'a PlaneDeduplicator) -> Self {
        Self { inner, planes }
    }
}

impl HitTester for ActiveSurfaces<'_> {
    fn hit_entity(&self, screen: PhysicalPosition<f64>) -> Option<EntityId> {
        self.inner.hit_entity(screen)
    }

    fn hit_surface(&self, screen: PhysicalPosition<f64>) -> Option<SurfaceHit> {
        self.inner
            .hit_surface(screen)
            .filter(|hit| self.planes.is_interactive(hit.surface))
    }
}
