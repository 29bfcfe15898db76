// Host seams - what the engine consumes from the scene/renderer
use bevy::prelude::*;

use crate::types::{EntityId, RayHit, SelectableEntity};

/// Scene and camera primitives supplied by the host application.
/// Entity lists are re-read on every query; nothing returned here is retained.
pub trait SceneHost {
    /// Entities under the screen point, in any order
    fn cast_ray(&self, point: Vec2) -> Vec<RayHit>;

    /// Every entity currently eligible for region queries
    fn selectable_entities(&self) -> Vec<SelectableEntity>;

    /// World to screen pixels
    fn project(&self, world: Vec3) -> Vec2;

    /// Screen pixels to a world point on the near plane
    fn unproject(&self, screen: Vec2) -> Vec3;
}

/// Visual emphasis callbacks; the engine never touches render state itself
pub trait HighlightHandler: Send + Sync {
    fn highlight(&mut self, id: &EntityId);
    fn unhighlight(&mut self, id: &EntityId);
}

/// Handler for hosts that draw selection themselves from events
#[derive(Default)]
pub struct NoHighlight;

impl HighlightHandler for NoHighlight {
    fn highlight(&mut self, _id: &EntityId) {}
    fn unhighlight(&mut self, _id: &EntityId) {}
}

/// Adapts a closure `(id, highlighted)` into a `HighlightHandler`
pub struct FnHighlighter<F>(pub F);

impl<F> HighlightHandler for FnHighlighter<F>
where
    F: FnMut(&EntityId, bool) + Send + Sync,
{
    fn highlight(&mut self, id: &EntityId) {
        (self.0)(id, true)
    }

    fn unhighlight(&mut self, id: &EntityId) {
        (self.0)(id, false)
    }
}
