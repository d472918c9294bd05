//! Tape-measure mode: drop markers on surfaces and read back distances and
//! the enclosed area.
//!
//! Markers form a closed polygon once there are three or more of them. The
//! area is measured on the ground (x/z) plane.

use std::fmt;

use cgmath::{MetricSpace, Vector3};
use log::debug;
use winit::{dpi::PhysicalPosition, event::TouchPhase};

use crate::{
    config::InteractionConfig,
    context::TouchPoint,
    data_structures::{
        scene::{EntityId, SceneGraph},
        transform::{Pose, Transform},
    },
    pick::HitTester,
};

/// Prefab key the renderer uses for measurement markers.
pub const MARKER_PREFAB: &str = "MeasurementPoint";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vector3<f32>,
    pub to: Vector3<f32>,
}

impl Segment {
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Where the distance label for this segment goes.
    pub fn midpoint(&self) -> Vector3<f32> {
        (self.from + self.to) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Readout {
    Prompt,
    Distance(f32),
    Area(f32),
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readout::Prompt => write!(f, "Tap to place points"),
            Readout::Distance(d) => write!(f, "Distance: {:.2} m", d),
            Readout::Area(a) => write!(f, "Area: {:.2} m²", a),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Marker {
    id: EntityId,
    position: Vector3<f32>,
}

#[derive(Debug)]
pub struct MeasurementTool {
    markers: Vec<Marker>,
    selected: Option<usize>,
    highlight_scale: f32,
}

impl MeasurementTool {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            markers: Vec::new(),
            selected: None,
            highlight_scale: config.marker_highlight_scale,
        }
    }

    pub fn on_touches(
        &mut self,
        graph: &mut dyn SceneGraph,
        hits: &dyn HitTester,
        touches: &[TouchPoint],
    ) {
        let mut scene_touches = touches.iter().filter(|t| !t.over_ui);
        let (Some(touch), None) = (scene_touches.next(), scene_touches.next()) else {
            return;
        };
        match touch.phase {
            TouchPhase::Started => self.on_tap(graph, hits, touch.location),
            TouchPhase::Moved => self.on_drag(graph, hits, touch.location),
            // markers stay selected after the finger lifts
            TouchPhase::Ended | TouchPhase::Cancelled => {}
        }
    }

    fn on_tap(
        &mut self,
        graph: &mut dyn SceneGraph,
        hits: &dyn HitTester,
        screen: PhysicalPosition<f64>,
    ) {
        if let Some(id) = hits.hit_entity(screen) {
            if let Some(idx) = self.markers.iter().position(|m| m.id == id) {
                self.select(graph, idx);
                return;
            }
        }
        if let Some(hit) = hits.hit_surface(screen) {
            let position = hit.pose.position;
            let id = graph.instantiate(MARKER_PREFAB, Pose::at(position));
            self.markers.push(Marker { id, position });
            debug!("Marker {:?} placed, {}", id, self.readout());
        }
    }

    fn on_drag(
        &mut self,
        graph: &mut dyn SceneGraph,
        hits: &dyn HitTester,
        screen: PhysicalPosition<f64>,
    ) {
        let Some(idx) = self.selected else {
            return;
        };
        let Some(hit) = hits.hit_surface(screen) else {
            return;
        };
        self.markers[idx].position = hit.pose.position;
        self.push_transform(graph, idx, true);
    }

    fn select(&mut self, graph: &mut dyn SceneGraph, idx: usize) {
        if let Some(previous) = self.selected {
            self.push_transform(graph, previous, false);
        }
        self.selected = Some(idx);
        self.push_transform(graph, idx, true);
    }

    pub fn deselect(&mut self, graph: &mut dyn SceneGraph) {
        if let Some(previous) = self.selected.take() {
            self.push_transform(graph, previous, false);
        }
    }

    fn push_transform(&self, graph: &mut dyn SceneGraph, idx: usize, highlighted: bool) {
        let marker = self.markers[idx];
        let mut transform = Transform::from(Pose::at(marker.position));
        if highlighted {
            transform.set_uniform_scale(self.highlight_scale);
        }
        graph.set_transform(marker.id, &transform);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn delete_affordance_visible(&self) -> bool {
        self.selected.is_some()
    }

    pub fn delete_selected(&mut self, graph: &mut dyn SceneGraph) -> bool {
        let Some(idx) = self.selected.take() else {
            return false;
        };
        let marker = self.markers.remove(idx);
        graph.destroy(marker.id);
        true
    }

    pub fn reset(&mut self, graph: &mut dyn SceneGraph) {
        self.deselect(graph);
        for marker in self.markers.drain(..) {
            graph.destroy(marker.id);
        }
    }

    pub fn points(&self) -> Vec<Vector3<f32>> {
        self.markers.iter().map(|m| m.position).collect()
    }

    /// Polygon edges: a single segment for two markers, a closed loop beyond.
    pub fn segments(&self) -> Vec<Segment> {
        let points = self.points();
        match points.len() {
            0 | 1 => Vec::new(),
            2 => vec![Segment {
                from: points[0],
                to: points[1],
            }],
            n => (0..n)
                .map(|i| Segment {
                    from: points[i],
                    to: points[(i + 1) % n],
                })
                .collect(),
        }
    }

    /// Enclosed ground area, once there are at least three markers.
    pub fn area(&self) -> Option<f32> {
        let points = self.points();
        if points.len() < 3 {
            return None;
        }
        let twice: f32 = (0..points.len())
            .map(|i| {
                let p1 = points[i];
                let p2 = points[(i + 1) % points.len()];
                p1.x * p2.z - p2.x * p1.z
            })
            .sum();
        Some((twice / 2.0).abs())
    }

    pub fn readout(&self) -> Readout {
        if let Some(area) = self.area() {
            return Readout::Area(area);
        }
        match self.segments().first() {
            Some(segment) => Readout::Distance(segment.length()),
            None => Readout::Prompt,
        }
    }
}
