// Selection module - interactive spatial selection for a CAD/BIM viewport
//
// Submodules:
// - state: gesture session, selection methods and engine configuration
// - candidates: point-selection disambiguation (priority tiers, proximity)
// - region: window / crossing / lasso / polygon containment queries
// - selection_set: committed selection with highlight callbacks
// - groups: named groups with a two-way membership index
// - events: selection events and the synchronous listener bus
// - host: traits the host scene implements
// - engine: the SelectionEngine resource tying it all together
// - input: gesture API (click, drag, lasso, polygon, cancel)

mod state;
mod candidates;
mod region;
mod selection_set;
mod groups;
mod events;
pub mod host;
mod engine;
mod input;

// Re-export main types for external use
pub use state::{GestureError, GestureMode, GestureSession, ProximityMode, SelectionConfig, SelectionMethod};
pub use candidates::{effective_priority, rank_candidates, ray_distance, resolve_candidate, Candidate, PriorityOverrides};
pub use region::{query_region, Region};
pub use selection_set::SelectionSet;
pub use groups::GroupRegistry;
pub use events::{ChangeKind, EventBus, ListenerId, SelectionChange, SelectionEvent, SelectionEventKind};
pub use host::{FnHighlighter, HighlightHandler, NoHighlight, SceneHost};
pub use engine::SelectionEngine;
