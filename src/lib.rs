//! terrascape
//!
//! The interaction core of an AR landscaping app: place virtual models on
//! surfaces found by a spatial tracker, pick them up again, move, pinch and
//! twist them, and save or restore the whole arrangement. Rendering, tracking
//! and the menus are collaborators reached through small traits; everything
//! here is plain, synchronous, frame-driven state.
//!
//! High-level modules
//! - `config`: thresholds, storage settings and the prefab catalog, loadable from TOML
//! - `context`: the startup-built context object, touch input and logger setup
//! - `data_structures`: transforms, surfaces, prefab templates and the live scene
//! - `error`: the error taxonomy shared by all components
//! - `flow`: the session that wires components together and routes frame events
//! - `gesture`: two-finger pinch-scale and twist
//! - `measure`: marker-based distance and area measurement
//! - `persistence`: scene snapshots and their storage
//! - `pick`: hit testing against placed entities and tracked surfaces
//! - `placement`: the tap/drag/pinch selection and placement state machine
//! - `planes`: duplicate and merged surface suppression
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod gesture;
pub mod measure;
pub mod persistence;
pub mod pick;
pub mod placement;
pub mod planes;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::TouchPhase;
