//! Saving and restoring the placed scene.
//!
//! A snapshot stores only what is needed to rebuild the arrangement: the
//! prefab key and the transform of every placed entity. Entity ids are not
//! stored; the renderer hands out fresh ones on load.
//!
//! On disk the snapshot is pretty-printed JSON:
//!
//! ```json
//! {
//!   "placedObjectsData": [
//!     {
//!       "prefabName": "Bench_01",
//!       "position": { "x": 1.0, "y": 0.0, "z": 2.0 },
//!       "rotation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 },
//!       "scale": { "x": 1.0, "y": 1.0, "z": 1.0 }
//!     }
//!   ]
//! }
//! ```
//!
//! There is no schema version field.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use cgmath::{Quaternion, Vector3};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    data_structures::{
        prefab::PrefabRegistry,
        scene::{PlacedEntity, Scene, SceneGraph},
        transform::Transform,
    },
    error::{Result, SceneError},
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3Record {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vector3<f32>> for Vec3Record {
    fn from(v: Vector3<f32>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3Record> for Vector3<f32> {
    fn from(v: Vec3Record) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuatRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<Quaternion<f32>> for QuatRecord {
    fn from(q: Quaternion<f32>) -> Self {
        Self {
            x: q.v.x,
            y: q.v.y,
            z: q.v.z,
            w: q.s,
        }
    }
}

impl From<QuatRecord> for Quaternion<f32> {
    fn from(q: QuatRecord) -> Self {
        Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    #[serde(rename = "prefabName")]
    pub prefab_key: String,
    pub position: Vec3Record,
    pub rotation: QuatRecord,
    pub scale: Vec3Record,
}

impl SnapshotRecord {
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position.into(),
            rotation: self.rotation.into(),
            scale: self.scale.into(),
        }
    }

    fn is_finite(&self) -> bool {
        let Vec3Record { x, y, z } = self.position;
        let QuatRecord {
            x: qx,
            y: qy,
            z: qz,
            w: qw,
        } = self.rotation;
        let Vec3Record {
            x: sx,
            y: sy,
            z: sz,
        } = self.scale;
        [x, y, z, qx, qy, qz, qw, sx, sy, sz]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl From<&PlacedEntity> for SnapshotRecord {
    fn from(entity: &PlacedEntity) -> Self {
        let transform = entity.transform();
        Self {
            prefab_key: entity.prefab_key().to_string(),
            position: transform.position.into(),
            rotation: transform.rotation.into(),
            scale: transform.scale.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(rename = "placedObjectsData", default)]
    pub records: Vec<SnapshotRecord>,
}

impl SceneSnapshot {
    pub fn capture(scene: &Scene) -> Self {
        Self {
            records: scene.entities().iter().map(SnapshotRecord::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Byte storage for one snapshot.
pub trait SnapshotStore {
    fn write(&mut self, bytes: &[u8]) -> anyhow::Result<()>;

    /// `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> anyhow::Result<Option<Vec<u8>>>;
}

/// Keeps the snapshot in a single file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store for `file_name` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self::new(dir.as_ref().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn write(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating save dir '{}'", parent.display()))?;
        }
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("writing save '{}'", self.path.display()))
    }

    fn read(&self) -> anyhow::Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("reading save '{}'", self.path.display()))?;
        Ok(Some(bytes))
    }
}

/// Keeps the snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn write(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }

    fn read(&self) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Keys of records that were dropped, in snapshot order.
    pub skipped: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SceneSerializer;

impl SceneSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Write every live entity to `store`. Returns how many were saved.
    pub fn save(&self, scene: &Scene, store: &mut dyn SnapshotStore) -> Result<usize> {
        let snapshot = SceneSnapshot::capture(scene);
        let bytes = snapshot.to_json()?;
        store.write(&bytes)?;
        info!("Scene saved with {} objects", snapshot.records.len());
        Ok(snapshot.records.len())
    }

    /// Replace the live scene with the stored snapshot.
    ///
    /// The snapshot is read and parsed before anything is destroyed, so any
    /// error leaves the current scene untouched. Records whose prefab is
    /// unknown are skipped and reported in the returned [`LoadReport`].
    pub fn load(
        &self,
        registry: &PrefabRegistry,
        scene: &mut Scene,
        graph: &mut dyn SceneGraph,
        store: &dyn SnapshotStore,
    ) -> Result<LoadReport> {
        let bytes = store.read()?.ok_or(SceneError::SnapshotMissing)?;
        let snapshot = SceneSnapshot::from_json(&bytes)?;

        scene.deselect(graph);
        let cleared = scene.clear(graph);
        info!("Cleared {} existing objects", cleared);

        let mut report = LoadReport::default();
        for record in &snapshot.records {
            if !record.is_finite() {
                warn!("Record for '{}' has non-finite values, skipping", record.prefab_key);
                report.skipped.push(record.prefab_key.clone());
                continue;
            }
            match registry.get(&record.prefab_key) {
                Ok(template) => {
                    scene.spawn(graph, template, record.transform());
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!("{}. Cannot load this object.", e);
                    report.skipped.push(record.prefab_key.clone());
                }
            }
        }
        info!(
            "Scene loaded: {} of {} objects restored",
            report.loaded,
            snapshot.records.len()
        );
        Ok(report)
    }
}
