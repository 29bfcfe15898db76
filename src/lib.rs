//! Interactive spatial selection engine for 3D CAD/BIM viewports.
//!
//! Turns screen-space gestures (clicks, window/crossing drags, lasso strokes, polygon
//! picks) into sets of selected scene entities, disambiguates overlapping candidates by
//! priority tier, and keeps named groups of entities. The host scene supplies ray casts,
//! entity snapshots and the camera projection through [`SceneHost`].

pub mod constants;
pub mod math_utils;
pub mod plugin;
pub mod selection;
pub mod types;

pub use math_utils::{CameraProjection, Viewport};
pub use plugin::SelectionEnginePlugin;
pub use selection::*;
pub use types::*;
