use std::collections::HashMap;

use terrascape::{
    Deg, One, PhysicalPosition, Quaternion, Rotation3, TouchPhase, Vector2, Vector3,
    config::Config,
    context::{Context, TouchPoint},
    data_structures::{
        prefab::{Category, PrefabTemplate},
        scene::{EntityId, SceneGraph},
        surface::{Surface, SurfaceId},
        transform::{Pose, Transform},
    },
    pick::{HitTester, SurfaceHit},
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FakeObject {
    pub key: String,
    pub transform: Transform,
    pub highlighted: bool,
}

/// Stand-in renderer that records every command it receives.
#[derive(Debug, Default)]
pub(crate) struct FakeGraph {
    next_id: u32,
    pub objects: HashMap<EntityId, FakeObject>,
    pub destroyed: Vec<EntityId>,
}

impl FakeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, id: EntityId) -> &FakeObject {
        self.objects
            .get(&id)
            .unwrap_or_else(|| panic!("{:?} is not alive in the fake graph", id))
    }

    pub fn highlighted(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .objects
            .iter()
            .filter(|(_, object)| object.highlighted)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }
}

impl SceneGraph for FakeGraph {
    fn instantiate(&mut self, prefab_key: &str, pose: Pose) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.objects.insert(
            id,
            FakeObject {
                key: prefab_key.to_string(),
                transform: Transform::from(pose),
                highlighted: false,
            },
        );
        id
    }

    fn destroy(&mut self, id: EntityId) {
        assert!(self.objects.remove(&id).is_some(), "double destroy of {:?}", id);
        self.destroyed.push(id);
    }

    fn set_transform(&mut self, id: EntityId, transform: &Transform) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.transform = *transform;
        }
    }

    fn set_highlight(&mut self, id: EntityId, highlighted: bool) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.highlighted = highlighted;
        }
    }
}

fn key(screen: PhysicalPosition<f64>) -> (i64, i64) {
    (screen.x.round() as i64, screen.y.round() as i64)
}

/// Hit tester answering from a fixed table of screen points.
#[derive(Debug, Default)]
pub(crate) struct ScriptedHits {
    entities: HashMap<(i64, i64), EntityId>,
    surfaces: HashMap<(i64, i64), SurfaceHit>,
}

impl ScriptedHits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity_at(&mut self, x: f64, y: f64, id: EntityId) -> &mut Self {
        self.entities.insert(key(PhysicalPosition::new(x, y)), id);
        self
    }

    pub fn surface_at(&mut self, x: f64, y: f64, surface: u64, pose: Pose) -> &mut Self {
        self.surfaces.insert(
            key(PhysicalPosition::new(x, y)),
            SurfaceHit {
                surface: SurfaceId(surface),
                pose,
            },
        );
        self
    }

    pub fn clear_entity_at(&mut self, x: f64, y: f64) -> &mut Self {
        self.entities.remove(&key(PhysicalPosition::new(x, y)));
        self
    }
}

impl HitTester for ScriptedHits {
    fn hit_entity(&self, screen: PhysicalPosition<f64>) -> Option<EntityId> {
        self.entities.get(&key(screen)).copied()
    }

    fn hit_surface(&self, screen: PhysicalPosition<f64>) -> Option<SurfaceHit> {
        self.surfaces.get(&key(screen)).copied()
    }
}

pub(crate) fn catalog_config() -> Config {
    Config {
        prefabs: vec![
            PrefabTemplate::new("Tree_A", Category::Plants).with_name("Oak"),
            PrefabTemplate::new("Rose_Bush", Category::Plants),
            PrefabTemplate::new("Bench_01", Category::Furniture).with_name("Park bench"),
            PrefabTemplate::new("Stone_Path", Category::Pathways),
            PrefabTemplate::new("Gazebo", Category::Structures),
        ],
        ..Default::default()
    }
}

pub(crate) fn test_context() -> Context {
    Context::new(catalog_config())
}

pub(crate) fn pose(x: f32, y: f32, z: f32) -> Pose {
    Pose::new(Vector3::new(x, y, z), Quaternion::one())
}

pub(crate) fn yawed_pose(x: f32, y: f32, z: f32, yaw: f32) -> Pose {
    Pose::new(
        Vector3::new(x, y, z),
        Quaternion::from_axis_angle(Vector3::unit_y(), Deg(yaw)),
    )
}

pub(crate) fn surface(id: u64, x: f32, y: f32, z: f32) -> Surface {
    Surface::new(SurfaceId(id), Vector3::new(x, y, z), Vector2::new(1.0, 1.0))
}

pub(crate) fn touch(id: u64, phase: TouchPhase, x: f64, y: f64) -> TouchPoint {
    TouchPoint::new(id, phase, x, y)
}

pub(crate) fn tap(x: f64, y: f64) -> Vec<TouchPoint> {
    vec![touch(0, TouchPhase::Started, x, y)]
}

pub(crate) fn drag(x: f64, y: f64) -> Vec<TouchPoint> {
    vec![touch(0, TouchPhase::Moved, x, y)]
}

pub(crate) fn lift(x: f64, y: f64) -> Vec<TouchPoint> {
    vec![touch(0, TouchPhase::Ended, x, y)]
}

/// Two fingers at `a` and `b`, both in `phase`.
pub(crate) fn pair(phase: TouchPhase, a: (f64, f64), b: (f64, f64)) -> Vec<TouchPoint> {
    vec![touch(0, phase, a.0, a.1), touch(1, phase, b.0, b.1)]
}
