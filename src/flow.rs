//! Session wiring and per-frame event routing.
//!
//! An [`ArSession`] owns everything that lives for as long as the AR view is
//! open: the context built at startup, the live scene, the controllers, and
//! the handles to the renderer and to snapshot storage. The host feeds it
//! three kinds of input:
//!
//! 1. `on_frame` with the touches of the current frame and the frame time
//! 2. `on_surfaces_changed` whenever the tracker reports surface changes
//! 3. `on_ui` for button presses from the menus
//!
//! # Lifecycle
//!
//! Call `subscribe()` once the tracker is running and `unsubscribe()` before
//! tearing it down. Surface events that arrive while unsubscribed are dropped.

use std::time::Duration;

use log::{debug, info};

use crate::{
    context::{Context, TouchPoint},
    data_structures::{
        scene::{EntityId, Scene, SceneGraph},
        surface::{SurfaceId, SurfacesChanged},
    },
    error::Result,
    measure::MeasurementTool,
    persistence::{LoadReport, SceneSerializer, SnapshotStore},
    pick::{ActiveSurfaces, HitTester},
    placement::{ArmOutcome, PlacementController, TapOutcome},
    planes::PlaneDeduplicator,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Place,
    Measure,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiCommand {
    ArmPlacement(Option<String>),
    DeleteSelected,
    Save,
    Load,
    ShowSurfaces(bool),
    SelectTool(Tool),
    ResetMeasurement,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiResponse {
    Armed(ArmOutcome),
    /// The placed entity that was deleted; `None` covers "nothing selected"
    /// and deleted measurement markers.
    Deleted(Option<EntityId>),
    Saved(usize),
    Loaded(LoadReport),
    Done,
}

pub struct ArSession<G: SceneGraph, S: SnapshotStore> {
    ctx: Context,
    scene: Scene,
    graph: G,
    store: S,
    placement: PlacementController,
    planes: PlaneDeduplicator,
    measure: MeasurementTool,
    serializer: SceneSerializer,
    tool: Tool,
    subscribed: bool,
}

impl<G: SceneGraph, S: SnapshotStore> ArSession<G, S> {
    pub fn new(ctx: Context, graph: G, store: S) -> Self {
        let placement = PlacementController::new(&ctx);
        let planes = PlaneDeduplicator::new(&ctx.config.interaction);
        let measure = MeasurementTool::new(&ctx.config.interaction);
        Self {
            ctx,
            scene: Scene::new(),
            graph,
            store,
            placement,
            planes,
            measure,
            serializer: SceneSerializer::new(),
            tool: Tool::Place,
            subscribed: false,
        }
    }

    pub fn subscribe(&mut self) {
        self.subscribed = true;
        debug!("Subscribed to surface changes");
    }

    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        debug!("Unsubscribed from surface changes");
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Route the touches of one frame to the active tool.
    pub fn on_frame(
        &mut self,
        hits: &dyn HitTester,
        touches: &[TouchPoint],
        dt: Duration,
    ) -> Option<TapOutcome> {
        self.planes.tick(dt);
        let hits = ActiveSurfaces::new(hits, &self.planes);
        match self.tool {
            Tool::Place => self.placement.on_touches(
                &self.ctx,
                &mut self.scene,
                &mut self.graph,
                &hits,
                touches,
            ),
            Tool::Measure => {
                self.measure.on_touches(&mut self.graph, &hits, touches);
                None
            }
        }
    }

    /// Feed a tracker notification to the deduplicator.
    ///
    /// Ignored while unsubscribed. Hiding the surface display does not stop
    /// duplicate and merged surfaces from being switched off.
    pub fn on_surfaces_changed(&mut self, change: &SurfacesChanged) -> Vec<SurfaceId> {
        if !self.subscribed {
            return Vec::new();
        }
        self.planes.on_surfaces_changed(change)
    }

    pub fn on_ui(&mut self, command: UiCommand) -> Result<UiResponse> {
        let response = match command {
            UiCommand::ArmPlacement(key) => UiResponse::Armed(self.placement.arm(
                &mut self.scene,
                &mut self.graph,
                key,
            )),
            UiCommand::DeleteSelected => match self.tool {
                Tool::Place => UiResponse::Deleted(
                    self.placement
                        .delete_selected(&mut self.scene, &mut self.graph),
                ),
                Tool::Measure => {
                    self.measure.delete_selected(&mut self.graph);
                    UiResponse::Deleted(None)
                }
            },
            UiCommand::Save => UiResponse::Saved(self.serializer.save(&self.scene, &mut self.store)?),
            UiCommand::Load => UiResponse::Loaded(self.serializer.load(
                &self.ctx.registry,
                &mut self.scene,
                &mut self.graph,
                &self.store,
            )?),
            UiCommand::ShowSurfaces(visible) => {
                self.planes.set_visualization(visible);
                UiResponse::Done
            }
            UiCommand::SelectTool(tool) => {
                if tool != self.tool {
                    self.scene.deselect(&mut self.graph);
                    self.measure.deselect(&mut self.graph);
                    info!("Switched to {:?}", tool);
                }
                self.tool = tool;
                UiResponse::Done
            }
            UiCommand::ResetMeasurement => {
                self.measure.reset(&mut self.graph);
                UiResponse::Done
            }
        };
        Ok(response)
    }

    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn placement(&self) -> &PlacementController {
        &self.placement
    }

    pub fn planes(&self) -> &PlaneDeduplicator {
        &self.planes
    }

    pub fn measure(&self) -> &MeasurementTool {
        &self.measure
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Whether a delete button should be shown for the active tool.
    pub fn delete_affordance_visible(&self) -> bool {
        match self.tool {
            Tool::Place => self.placement.delete_affordance_visible(&self.scene),
            Tool::Measure => self.measure.delete_affordance_visible(),
        }
    }
}
