//! Touch-driven placement, selection and manipulation.
//!
//! [`PlacementController`] turns the touches of one frame into scene edits:
//!
//! - a single tap selects the entity under the finger, places the armed
//!   prefab on the surface under the finger, or clears whatever is pending
//! - a single moving finger drags the selected entity along surfaces
//! - two fingers pinch-scale and twist the selected entity
//!
//! The selection itself lives in [`Scene`]; the controller only tracks what
//! the fingers are currently doing with it and re-syncs with the scene at the
//! start of every frame, so a scene load or delete from elsewhere never leaves
//! it pointing at a dead entity.

use log::{debug, info, warn};
use winit::{dpi::PhysicalPosition, event::TouchPhase};

use crate::{
    context::{Context, TouchPoint},
    data_structures::{
        scene::{EntityId, Scene, SceneGraph},
        transform::Transform,
    },
    error::SceneError,
    gesture::{GestureInterpreter, GestureSession},
    pick::{self, Hit, HitTester},
};

/// The "next tap places this" intent set from the model picker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArmedPlacement {
    pub prefab_key: Option<String>,
    pub primed_by_ui: bool,
}

impl ArmedPlacement {
    fn primed(key: String) -> Self {
        Self {
            prefab_key: Some(key),
            primed_by_ui: true,
        }
    }

    pub fn is_primed(&self) -> bool {
        self.primed_by_ui && self.prefab_key.is_some()
    }

    pub fn exists(&self) -> bool {
        self.prefab_key.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionState {
    Idle,
    Selected(EntityId),
    Dragging(EntityId),
    PinchActive(EntityId, GestureSession),
}

impl InteractionState {
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Selected(id)
            | InteractionState::Dragging(id)
            | InteractionState::PinchActive(id, _) => Some(*id),
        }
    }
}

/// What a tap resolved to.
#[derive(Clone, Debug, PartialEq)]
pub enum TapOutcome {
    Selected(EntityId),
    Placed(EntityId),
    /// The armed prefab could not be placed because no surface was hit.
    PlacementMissed,
    /// The armed prefab key is not in the registry.
    PlacementFailed(String),
    ClearedArm,
    Deselected(EntityId),
    Nothing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmOutcome {
    Armed,
    Rearmed,
    Cleared,
}

#[derive(Debug)]
pub struct PlacementController {
    state: InteractionState,
    armed: ArmedPlacement,
    gestures: GestureInterpreter,
}

impl PlacementController {
    pub fn new(ctx: &Context) -> Self {
        Self {
            state: InteractionState::Idle,
            armed: ArmedPlacement::default(),
            gestures: GestureInterpreter::new(&ctx.config.interaction),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn armed(&self) -> &ArmedPlacement {
        &self.armed
    }

    /// Whether the UI should offer to delete the current selection.
    ///
    /// Read from `scene` so a load or delete between frames is reflected at once.
    pub fn delete_affordance_visible(&self, scene: &Scene) -> bool {
        scene.selected().is_some()
    }

    /// Set or clear the prefab placed by the next tap on empty space.
    ///
    /// Arming always drops the current selection. Arming the key that is
    /// already armed primes it again, which is how several copies are placed
    /// without reopening the picker.
    pub fn arm(
        &mut self,
        scene: &mut Scene,
        graph: &mut dyn SceneGraph,
        prefab_key: Option<String>,
    ) -> ArmOutcome {
        let Some(key) = prefab_key else {
            self.armed = ArmedPlacement::default();
            debug!("Placement intent cleared");
            return ArmOutcome::Cleared;
        };
        let rearm = self.armed.prefab_key.as_deref() == Some(key.as_str());
        if let Some(id) = scene.deselect(graph) {
            debug!("Deselected {:?} for placement", id);
        }
        self.state = InteractionState::Idle;
        info!("Model selected from UI: {}", key);
        self.armed = ArmedPlacement::primed(key);
        if rearm {
            ArmOutcome::Rearmed
        } else {
            ArmOutcome::Armed
        }
    }

    /// Destroy the selected entity. A no-op without a selection.
    pub fn delete_selected(
        &mut self,
        scene: &mut Scene,
        graph: &mut dyn SceneGraph,
    ) -> Option<EntityId> {
        let id = scene.selected()?;
        scene.destroy(graph, id);
        self.state = InteractionState::Idle;
        info!("Deleted {:?}", id);
        Some(id)
    }

    /// Process every touch of one frame.
    ///
    /// Returns the tap outcome if a single finger went down this frame.
    pub fn on_touches(
        &mut self,
        ctx: &Context,
        scene: &mut Scene,
        graph: &mut dyn SceneGraph,
        hits: &dyn HitTester,
        touches: &[TouchPoint],
    ) -> Option<TapOutcome> {
        self.sync(scene);
        let mut touches: Vec<&TouchPoint> = touches.iter().filter(|t| !t.over_ui).collect();
        touches.sort_by_key(|t| t.id);

        if touches.len() != 2 {
            self.end_pinch();
        }
        match touches.as_slice() {
            [touch] => self.on_single_touch(ctx, scene, graph, hits, touch),
            [a, b] => {
                self.on_two_touches(scene, graph, a, b);
                None
            }
            _ => None,
        }
    }

    fn sync(&mut self, scene: &Scene) {
        match (self.state.entity(), scene.selected()) {
            (Some(current), Some(selected)) if current == selected => {}
            (_, Some(selected)) => self.state = InteractionState::Selected(selected),
            (_, None) => self.state = InteractionState::Idle,
        }
    }

    fn end_pinch(&mut self) {
        if let InteractionState::PinchActive(id, _) = self.state {
            self.state = InteractionState::Selected(id);
        }
    }

    fn on_single_touch(
        &mut self,
        ctx: &Context,
        scene: &mut Scene,
        graph: &mut dyn SceneGraph,
        hits: &dyn HitTester,
        touch: &TouchPoint,
    ) -> Option<TapOutcome> {
        match touch.phase {
            TouchPhase::Started => Some(self.on_tap(ctx, scene, graph, hits, touch.location)),
            TouchPhase::Moved => {
                self.on_drag(scene, graph, hits, touch.location);
                None
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if let InteractionState::Dragging(id) = self.state {
                    self.state = InteractionState::Selected(id);
                }
                None
            }
        }
    }

    fn on_tap(
        &mut self,
        ctx: &Context,
        scene: &mut Scene,
        graph: &mut dyn SceneGraph,
        hits: &dyn HitTester,
        screen: PhysicalPosition<f64>,
    ) -> TapOutcome {
        let surface = match pick::resolve(hits, scene, screen) {
            Hit::Entity(id) => {
                if scene.select(graph, id) {
                    info!("Selected {:?}", id);
                }
                self.state = InteractionState::Selected(id);
                if self.armed.exists() {
                    debug!("Tap on {:?} cancelled pending placement", id);
                    self.armed = ArmedPlacement::default();
                }
                return TapOutcome::Selected(id);
            }
            Hit::Surface(hit) => Some(hit),
            Hit::Miss => None,
        };

        if self.armed.is_primed() {
            self.armed.primed_by_ui = false;
            let Some(key) = self.armed.prefab_key.clone() else {
                return TapOutcome::Nothing;
            };
            let Some(hit) = surface else {
                debug!("Placement of {} skipped: {}", key, SceneError::HitTestMiss);
                return TapOutcome::PlacementMissed;
            };
            return match ctx.registry.get(&key) {
                Ok(template) => {
                    let id = scene.spawn(graph, template, Transform::from(hit.pose));
                    info!("Placed {} on surface {:?}", key, hit.surface);
                    TapOutcome::Placed(id)
                }
                Err(e) => {
                    warn!("{}", e);
                    TapOutcome::PlacementFailed(key)
                }
            };
        }

        if self.armed.exists() {
            self.armed = ArmedPlacement::default();
            debug!("Leftover placement intent cleared");
            return TapOutcome::ClearedArm;
        }

        match scene.deselect(graph) {
            Some(id) => {
                self.state = InteractionState::Idle;
                debug!("Deselected {:?}", id);
                TapOutcome::Deselected(id)
            }
            None => TapOutcome::Nothing,
        }
    }

    fn on_drag(
        &mut self,
        scene: &mut Scene,
        graph: &mut dyn SceneGraph,
        hits: &dyn HitTester,
        screen: PhysicalPosition<f64>,
    ) {
        let id = match self.state {
            InteractionState::Selected(id) | InteractionState::Dragging(id) => id,
            _ => return,
        };
        let Some(hit) = hits.hit_surface(screen) else {
            return;
        };
        scene.update_transform(graph, id, |transform| transform.set_pose(hit.pose));
        self.state = InteractionState::Dragging(id);
    }

    fn on_two_touches(
        &mut self,
        scene: &mut Scene,
        graph: &mut dyn SceneGraph,
        a: &TouchPoint,
        b: &TouchPoint,
    ) {
        let Some(id) = self.state.entity() else {
            return;
        };
        if a.is_lifting() || b.is_lifting() {
            self.end_pinch();
            return;
        }

        let starting = a.phase == TouchPhase::Started || b.phase == TouchPhase::Started;
        let mut session = match self.state {
            InteractionState::PinchActive(_, session) if !starting => session,
            _ => {
                let scale = scene
                    .get(id)
                    .map(|entity| entity.transform().uniform_scale())
                    .unwrap_or(1.0);
                let session = self.gestures.begin(a.location, b.location, scale);
                self.state = InteractionState::PinchActive(id, session);
                return;
            }
        };

        if a.phase != TouchPhase::Moved && b.phase != TouchPhase::Moved {
            return;
        }
        let update = self.gestures.update(&mut session, a.location, b.location);
        self.state = InteractionState::PinchActive(id, session);
        if update.scale.is_none() && update.twist.is_none() {
            return;
        }
        scene.update_transform(graph, id, |transform| {
            if let Some(scale) = update.scale {
                transform.set_uniform_scale(scale);
            }
            if let Some(twist) = update.twist {
                transform.rotate_about_up(twist);
            }
        });
    }
}
