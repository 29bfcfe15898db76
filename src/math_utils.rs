//! Screen/world projection and 2D containment primitives
//!
//! Screen space is in pixels with the origin at the top-left corner and Y growing downwards.

use bevy::prelude::*;
use crate::constants::PERSPECTIVE_DIVIDE_EPSILON;
use crate::types::BoundingVolume;

/// Viewport size in pixels
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Camera view-projection plus viewport, enough to map between world and screen.
/// Hosts backed by a plain matrix camera can delegate `SceneHost::project`/`unproject` here.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CameraProjection {
    pub view_proj: Mat4,
    pub viewport: Viewport,
}

impl CameraProjection {
    pub fn new(view_proj: Mat4, viewport: Viewport) -> Self {
        Self { view_proj, viewport }
    }

    pub fn project(&self, world: Vec3) -> Vec2 {
        project_to_screen(world, &self.view_proj, self.viewport)
    }

    /// World point under `screen` at normalized depth `ndc_z` (-1 near, 1 far for GL-style matrices)
    pub fn unproject(&self, screen: Vec2, ndc_z: f32) -> Vec3 {
        unproject_from_screen(screen, ndc_z, &self.view_proj, self.viewport)
    }
}

/// Apply the camera projection then scale NDC into the viewport
pub fn project_to_screen(world: Vec3, view_proj: &Mat4, viewport: Viewport) -> Vec2 {
    let clip = *view_proj * world.extend(1.0);
    // Points on the camera plane have w == 0; keep the sign and avoid inf
    let w = if clip.w.abs() < PERSPECTIVE_DIVIDE_EPSILON {
        PERSPECTIVE_DIVIDE_EPSILON.copysign(clip.w)
    } else {
        clip.w
    };
    let ndc = clip.truncate() / w;
    ndc_to_screen(ndc.truncate(), viewport)
}

#[inline]
pub fn ndc_to_screen(ndc: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * viewport.width / 2.0,
        (-ndc.y + 1.0) * viewport.height / 2.0,
    )
}

#[inline]
pub fn screen_to_ndc(screen: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        screen.x / viewport.width * 2.0 - 1.0,
        -(screen.y / viewport.height * 2.0 - 1.0),
    )
}

/// Inverse of `project_to_screen` at a given NDC depth
pub fn unproject_from_screen(screen: Vec2, ndc_z: f32, view_proj: &Mat4, viewport: Viewport) -> Vec3 {
    let ndc = screen_to_ndc(screen, viewport).extend(ndc_z);
    view_proj.inverse().project_point3(ndc)
}

/// Screen-space bounds of all 8 projected box corners.
/// Corners behind the camera are projected as-is (no clipping), so the rect is only
/// good for coarse selection tests.
pub fn project_bounds_to_screen(bounds: &BoundingVolume, project: impl Fn(Vec3) -> Vec2) -> Rect {
    let mut min = Vec2::splat(f32::MAX);
    let mut max = Vec2::splat(f32::MIN);
    for corner in bounds.corners() {
        let p = project(corner);
        min = min.min(p);
        max = max.max(p);
    }
    Rect { min, max }
}

/// Even-odd ray casting over an implicitly closed polygon.
/// Points exactly on an edge get whatever the crossing count says, which is stable per input.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut previous = polygon[polygon.len() - 1];

    for &current in polygon {
        if (current.y > point.y) != (previous.y > point.y) {
            // Edge straddles the horizontal through `point`, so dy is never zero here
            let x_at_y = (previous.x - current.x) * (point.y - current.y) / (previous.y - current.y) + current.x;
            if point.x < x_at_y {
                inside = !inside;
            }
        }
        previous = current;
    }

    inside
}

/// Window test when `strict` (inner fully inside outer), crossing test otherwise (any overlap)
pub fn rect_contains_rect(inner: &Rect, outer: &Rect, strict: bool) -> bool {
    if strict {
        inner.min.x >= outer.min.x
            && inner.max.x <= outer.max.x
            && inner.min.y >= outer.min.y
            && inner.max.y <= outer.max.y
    } else {
        !(inner.max.x < outer.min.x
            || inner.min.x > outer.max.x
            || inner.max.y < outer.min.y
            || inner.min.y > outer.max.y)
    }
}

/// Axis-aligned bounds of a screen path
pub fn path_bounds(path: &[Vec2]) -> Option<Rect> {
    let (first, rest) = path.split_first()?;
    let mut rect = Rect { min: *first, max: *first };
    for p in rest {
        rect.min = rect.min.min(*p);
        rect.max = rect.max.max(*p);
    }
    Some(rect)
}
