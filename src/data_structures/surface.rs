use cgmath::{MetricSpace, Vector2, Vector3};

/// Tracker-assigned identity of a detected surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// A detected planar region as reported by the tracking subsystem.
///
/// Geometry belongs to the tracker. This crate only decides whether a surface
/// stays active.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub id: SurfaceId,
    pub center: Vector3<f32>,
    pub extents: Vector2<f32>,
    /// Set once the tracker merged this surface into another one.
    pub subsumed_by: Option<SurfaceId>,
}

impl Surface {
    pub fn new(id: SurfaceId, center: Vector3<f32>, extents: Vector2<f32>) -> Self {
        Self {
            id,
            center,
            extents,
            subsumed_by: None,
        }
    }

    pub fn subsumed_into(mut self, other: SurfaceId) -> Self {
        self.subsumed_by = Some(other);
        self
    }

    pub fn center_distance(&self, other: &Surface) -> f32 {
        self.center.distance(other.center)
    }
}

/// One surface-changed notification from the tracker.
#[derive(Clone, Debug, Default)]
pub struct SurfacesChanged {
    pub added: Vec<Surface>,
    pub updated: Vec<Surface>,
    pub removed: Vec<SurfaceId>,
}
