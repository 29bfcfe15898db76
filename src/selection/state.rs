// Gesture session state and selection configuration
use bevy::prelude::*;
use std::fmt;

use crate::constants::*;
use crate::types::EntityId;

/// Selection method picked by the host (toolbar, modifier keys...)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum SelectionMethod {
    #[default]
    Single,
    Window,
    Crossing,
    Lasso,
    Polygon,
}

/// Multi-point gesture kinds; single clicks never open a session
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GestureMode {
    Window,
    Crossing,
    Lasso,
    Polygon,
}

impl GestureMode {
    pub fn from_method(method: SelectionMethod) -> Option<Self> {
        match method {
            SelectionMethod::Single => None,
            SelectionMethod::Window => Some(GestureMode::Window),
            SelectionMethod::Crossing => Some(GestureMode::Crossing),
            SelectionMethod::Lasso => Some(GestureMode::Lasso),
            SelectionMethod::Polygon => Some(GestureMode::Polygon),
        }
    }

    pub fn is_rectangle(self) -> bool {
        matches!(self, GestureMode::Window | GestureMode::Crossing)
    }
}

impl fmt::Display for GestureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GestureMode::Window => "window",
            GestureMode::Crossing => "crossing",
            GestureMode::Lasso => "lasso",
            GestureMode::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// Gesture API misuse; the engine state is left untouched when one is returned
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum GestureError {
    #[error("a {active} gesture is already in progress")]
    GestureInProgress { active: GestureMode },
    #[error("no gesture is in progress")]
    NoActiveGesture,
    #[error("expected a {expected} gesture, found {active:?}")]
    WrongMode { expected: GestureMode, active: Option<GestureMode> },
    #[error("single selection has no gesture session, use select_at")]
    SingleClickMethod,
}

/// How ties inside the top priority tier are broken for point selection
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ProximityMode {
    /// Distance along the pick ray (approximation, cursor offset is ignored)
    #[default]
    RayDistance,
    /// Pixel distance from the click to the centre of the projected bounds
    ScreenDistance,
}

/// Engine tunables
#[derive(Clone, Debug)]
pub struct SelectionConfig {
    pub drag_threshold: f32,
    pub lasso_min_spacing: f32,
    pub proximity: ProximityMode,
    /// Clicking a grouped entity selects every member of its groups
    pub expand_groups: bool,
    pub parallel_threshold: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            drag_threshold: BOX_SELECT_DRAG_THRESHOLD,
            lasso_min_spacing: LASSO_MIN_POINT_SPACING,
            proximity: ProximityMode::default(),
            expand_groups: false,
            parallel_threshold: PARALLEL_QUERY_THRESHOLD,
        }
    }
}

/// Transient state of one in-flight multi-point gesture
#[derive(Clone, Debug)]
pub struct GestureSession {
    mode: GestureMode,
    start: Vec2,
    current: Vec2,
    path: Vec<Vec2>,        // Lasso: sampled stroke; polygon: confirmed vertices
    anchor_world: Vec3,     // World position under the start point (for host overlays)
    preview: Vec<EntityId>, // Temporary selection, never committed until finish
}

impl GestureSession {
    pub(crate) fn new(mode: GestureMode, start: Vec2, anchor_world: Vec3) -> Self {
        Self {
            mode,
            start,
            current: start,
            path: vec![start],
            anchor_world,
            preview: Vec::new(),
        }
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn anchor_world(&self) -> Vec3 {
        self.anchor_world
    }

    pub fn preview(&self) -> &[EntityId] {
        &self.preview
    }

    /// Drag rectangle spanned by the start point and the cursor
    pub fn drag_rect(&self) -> Rect {
        Rect::from_corners(self.start, self.current)
    }

    /// Diagonal length of the rectangle drag so far
    pub fn drag_distance(&self) -> f32 {
        self.start.distance(self.current)
    }

    /// Track the cursor; lasso strokes also sample it into the path
    pub(crate) fn move_to(&mut self, point: Vec2, lasso_min_spacing: f32) {
        self.current = point;
        if self.mode == GestureMode::Lasso {
            let far_enough = self
                .path
                .last()
                .map_or(true, |last| last.distance(point) >= lasso_min_spacing);
            if far_enough {
                self.path.push(point);
            }
        }
    }

    /// Confirm a polygon vertex; duplicate clicks on the last vertex are ignored
    pub(crate) fn confirm_vertex(&mut self, point: Vec2) -> bool {
        self.current = point;
        if self.path.last() == Some(&point) {
            return false;
        }
        self.path.push(point);
        true
    }

    /// Polygon preview closes through the cursor as a provisional vertex
    pub(crate) fn preview_polygon(&self) -> Vec<Vec2> {
        let mut polygon = self.path.clone();
        if polygon.last() != Some(&self.current) {
            polygon.push(self.current);
        }
        polygon
    }

    pub(crate) fn set_preview(&mut self, preview: Vec<EntityId>) {
        self.preview = preview;
    }
}
