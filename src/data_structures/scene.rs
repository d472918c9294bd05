//! The live set of placed objects.
//!
//! [`Scene`] is the authoritative record of what the user has placed. Every
//! mutation is mirrored to the rendering collaborator through [`SceneGraph`],
//! so the two never disagree about which entity exists, where it is and
//! whether it is highlighted.
//!
//! Membership in a `Scene` is what marks an object as a placed model. Hit
//! tests that report an entity id the scene does not know about (a marker,
//! a UI quad, anything else the renderer owns) are treated as empty space.

use log::debug;

use crate::data_structures::{
    prefab::PrefabTemplate,
    transform::{Pose, Transform},
};

/// Renderer-assigned handle of an instantiated object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Commands understood by the rendering/scene-graph layer.
pub trait SceneGraph {
    fn instantiate(&mut self, prefab_key: &str, pose: Pose) -> EntityId;
    fn destroy(&mut self, id: EntityId);
    fn set_transform(&mut self, id: EntityId, transform: &Transform);
    fn set_highlight(&mut self, id: EntityId, highlighted: bool);
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedEntity {
    id: EntityId,
    prefab_key: String,
    transform: Transform,
    is_selected: bool,
}

impl PlacedEntity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn prefab_key(&self) -> &str {
        &self.prefab_key
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }
}

/// Placed entities in creation order plus the single selection.
#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<PlacedEntity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate `template` with `transform` and record it, unselected.
    pub fn spawn(
        &mut self,
        graph: &mut dyn SceneGraph,
        template: &PrefabTemplate,
        transform: Transform,
    ) -> EntityId {
        let id = graph.instantiate(&template.key, transform.pose());
        if transform.scale != Transform::new().scale {
            graph.set_transform(id, &transform);
        }
        graph.set_highlight(id, false);
        self.entities.push(PlacedEntity {
            id,
            prefab_key: template.key.clone(),
            transform,
            is_selected: false,
        });
        debug!("Spawned {} as {:?}", template.key, id);
        id
    }

    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn get(&self, id: EntityId) -> Option<&PlacedEntity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|entity| entity.is_selected)
            .map(|entity| entity.id)
    }

    /// Make `id` the only selected entity.
    ///
    /// Returns `false` if `id` is unknown or already selected; nothing changes
    /// in that case.
    pub fn select(&mut self, graph: &mut dyn SceneGraph, id: EntityId) -> bool {
        if !self.contains(id) || self.selected() == Some(id) {
            return false;
        }
        self.deselect(graph);
        if let Some(entity) = self.entities.iter_mut().find(|entity| entity.id == id) {
            entity.is_selected = true;
            graph.set_highlight(id, true);
        }
        true
    }

    /// Clear the selection, returning the entity that was selected.
    pub fn deselect(&mut self, graph: &mut dyn SceneGraph) -> Option<EntityId> {
        let entity = self.entities.iter_mut().find(|entity| entity.is_selected)?;
        entity.is_selected = false;
        graph.set_highlight(entity.id, false);
        Some(entity.id)
    }

    /// Apply `update` to the transform of `id` and push the result to the graph.
    pub fn update_transform(
        &mut self,
        graph: &mut dyn SceneGraph,
        id: EntityId,
        update: impl FnOnce(&mut Transform),
    ) -> bool {
        match self.entities.iter_mut().find(|entity| entity.id == id) {
            Some(entity) => {
                update(&mut entity.transform);
                graph.set_transform(id, &entity.transform);
                true
            }
            None => false,
        }
    }

    pub fn destroy(&mut self, graph: &mut dyn SceneGraph, id: EntityId) -> bool {
        match self.entities.iter().position(|entity| entity.id == id) {
            Some(idx) => {
                let entity = self.entities.remove(idx);
                graph.destroy(entity.id);
                true
            }
            None => false,
        }
    }

    /// Destroy every placed entity. Returns how many were removed.
    pub fn clear(&mut self, graph: &mut dyn SceneGraph) -> usize {
        let count = self.entities.len();
        for entity in self.entities.drain(..) {
            graph.destroy(entity.id);
        }
        count
    }
}
