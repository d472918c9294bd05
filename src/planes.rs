//! Surface bookkeeping: duplicate suppression, merged-surface hiding and the
//! visualization toggle.
//!
//! The tracker sometimes reports the same physical surface twice, and later
//! merges surfaces it had tracked separately. [`PlaneDeduplicator`] keeps the
//! first report of an area and switches off everything that would otherwise
//! be drawn, and hit, on top of it.

use std::{collections::BTreeMap, time::Duration};

use log::{debug, info};

use crate::{
    config::InteractionConfig,
    data_structures::surface::{Surface, SurfaceId, SurfacesChanged},
};

#[derive(Clone, Debug)]
struct TrackedSurface {
    surface: Surface,
    active: bool,
}

#[derive(Debug)]
pub struct PlaneDeduplicator {
    threshold: f32,
    surfaces: BTreeMap<SurfaceId, TrackedSurface>,
    visualization: bool,
    fade: SurfaceFade,
}

impl PlaneDeduplicator {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            threshold: config.duplicate_surface_distance,
            surfaces: BTreeMap::new(),
            visualization: true,
            fade: SurfaceFade::new(config.surface_fade_speed),
        }
    }

    /// Apply one tracker notification. Returns the surfaces switched off by it.
    pub fn on_surfaces_changed(&mut self, change: &SurfacesChanged) -> Vec<SurfaceId> {
        let mut deactivated = Vec::new();

        for id in &change.removed {
            self.surfaces.remove(id);
        }

        for added in &change.added {
            let duplicate_of = self
                .surfaces
                .values()
                .filter(|known| known.surface.id != added.id)
                .find(|known| known.surface.center_distance(added) < self.threshold)
                .map(|known| known.surface.id);
            let active = match duplicate_of {
                Some(first) => {
                    info!(
                        "Disabled overlapping surface {:?}, duplicate of {:?}",
                        added.id, first
                    );
                    deactivated.push(added.id);
                    false
                }
                None => true,
            };
            // A re-added surface starts over, even if it was switched off before.
            self.surfaces.insert(
                added.id,
                TrackedSurface {
                    surface: added.clone(),
                    active,
                },
            );
        }

        for updated in &change.updated {
            let tracked = self
                .surfaces
                .entry(updated.id)
                .or_insert_with(|| TrackedSurface {
                    surface: updated.clone(),
                    active: true,
                });
            tracked.surface = updated.clone();
            if let Some(parent) = updated.subsumed_by {
                if tracked.active {
                    info!("Hiding surface {:?}, merged into {:?}", updated.id, parent);
                    deactivated.push(updated.id);
                }
                tracked.active = false;
            }
        }

        deactivated
    }

    pub fn is_active(&self, id: SurfaceId) -> bool {
        self.surfaces.get(&id).is_some_and(|tracked| tracked.active)
    }

    /// Whether hits on `id` may be used. Surfaces never announced by the
    /// tracker are given the benefit of the doubt.
    pub fn is_interactive(&self, id: SurfaceId) -> bool {
        self.surfaces.get(&id).is_none_or(|tracked| tracked.active)
    }

    /// Whether `id` should currently be drawn.
    pub fn is_visible(&self, id: SurfaceId) -> bool {
        self.visualization && self.is_active(id)
    }

    pub fn active_surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces
            .values()
            .filter(|tracked| tracked.active)
            .map(|tracked| &tracked.surface)
    }

    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(&id).map(|tracked| &tracked.surface)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Show or hide every surface. Deduplicated surfaces stay off either way.
    pub fn set_visualization(&mut self, visible: bool) {
        if self.visualization != visible {
            debug!("Surface visualization {}", if visible { "on" } else { "off" });
        }
        self.visualization = visible;
        self.fade.set_visible(visible);
    }

    pub fn visualization(&self) -> bool {
        self.visualization
    }

    /// Advance the surface fade by one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.fade.tick(dt);
    }

    pub fn alpha(&self) -> f32 {
        self.fade.alpha()
    }
}

/// Eases surface opacity toward fully shown or fully hidden.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceFade {
    speed: f32,
    current: f32,
    target: f32,
}

impl SurfaceFade {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            current: 1.0,
            target: 1.0,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.target = if visible { 1.0 } else { 0.0 };
    }

    pub fn tick(&mut self, dt: Duration) {
        let t = (dt.as_secs_f32() * self.speed).clamp(0.0, 1.0);
        self.current += (self.target - self.current) * t;
    }

    pub fn alpha(&self) -> f32 {
        self.current
    }
}
