use winit::{dpi::PhysicalPosition, event::TouchPhase};

use crate::{
    config::Config,
    data_structures::prefab::{Catalog, PrefabRegistry},
};

/// Startup-built state shared by reference with every component that needs
/// it. There is exactly one per session; nothing reaches for it globally.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub catalog: Catalog,
    pub registry: PrefabRegistry,
}

impl Context {
    pub fn new(config: Config) -> Self {
        let catalog = config.catalog();
        let registry = PrefabRegistry::from_catalog(&catalog);
        Self {
            config,
            catalog,
            registry,
        }
    }
}

/// One finger on the screen during the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub phase: TouchPhase,
    pub location: PhysicalPosition<f64>,
    /// The touch landed on a UI element and must not reach the scene.
    pub over_ui: bool,
}

impl TouchPoint {
    pub fn new(id: u64, phase: TouchPhase, x: f64, y: f64) -> Self {
        Self {
            id,
            phase,
            location: PhysicalPosition::new(x, y),
            over_ui: false,
        }
    }

    pub fn over_ui(mut self) -> Self {
        self.over_ui = true;
        self
    }

    pub fn is_lifting(&self) -> bool {
        matches!(self.phase, TouchPhase::Ended | TouchPhase::Cancelled)
    }
}

impl From<&winit::event::Touch> for TouchPoint {
    fn from(touch: &winit::event::Touch) -> Self {
        Self {
            id: touch.id,
            phase: touch.phase,
            location: touch.location,
            over_ui: false,
        }
    }
}

/// Install the platform logger. Failing to do so only loses diagnostics.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            println!("Warning: Could not initialize logger: {}", e);
        }
    }
}
