//! Data structures shared across the interaction components.
//!
//! - `prefab` holds templates, the category catalog and the key registry
//! - `scene` holds the live placed entities and the renderer command trait
//! - `surface` holds tracked surfaces and the tracker's change notification
//! - `transform` holds poses and per-object transforms

pub mod prefab;
pub mod scene;
pub mod surface;
pub mod transform;
