// Region queries - window, crossing and lasso/polygon containment over the live entity list
use bevy::prelude::*;
use rayon::prelude::*;

use crate::constants::MIN_POLYGON_POINTS;
use crate::math_utils::{path_bounds, point_in_polygon, project_bounds_to_screen, rect_contains_rect};
use crate::types::{EntityId, SelectableEntity, SelectionFilter};

/// Containment rule for one query
#[derive(Clone, Copy, Debug)]
pub enum Region<'a> {
    /// Projected footprint entirely inside the rect
    Window(Rect),
    /// Projected footprint overlapping the rect
    Crossing(Rect),
    /// Centre of the projected footprint inside the closed path
    Polygon(&'a [Vec2]),
}

/// Entity id with its projected screen footprint, computed once per query
struct Footprint {
    id: EntityId,
    rect: Rect,
}

impl Region<'_> {
    fn matches(&self, footprint: &Rect) -> bool {
        match self {
            Region::Window(drag) => rect_contains_rect(footprint, drag, true),
            Region::Crossing(drag) => rect_contains_rect(footprint, drag, false),
            Region::Polygon(path) => point_in_polygon(footprint.center(), path),
        }
    }

    /// Cheap reject box around the region; footprints missing it can never match
    fn coarse_bounds(&self) -> Option<Rect> {
        match self {
            Region::Window(drag) | Region::Crossing(drag) => Some(*drag),
            Region::Polygon(path) => path_bounds(path),
        }
    }
}

/// Ids of eligible entities satisfying `region`, in host list order.
/// Projection runs on the calling thread; the containment tests go to the rayon pool once
/// there are at least `parallel_threshold` candidates.
pub fn query_region(
    entities: &[SelectableEntity],
    region: Region,
    filter: &SelectionFilter,
    project: impl Fn(Vec3) -> Vec2,
    parallel_threshold: usize,
) -> Vec<EntityId> {
    if let Region::Polygon(path) = region {
        if path.len() < MIN_POLYGON_POINTS {
            return Vec::new();
        }
    }
    let Some(coarse) = region.coarse_bounds() else { return Vec::new() };

    let footprints: Vec<Footprint> = entities
        .iter()
        .filter(|e| e.is_pickable() && filter.allows(e.kind))
        .map(|e| Footprint {
            id: e.id.clone(),
            rect: project_bounds_to_screen(&e.bounds, &project),
        })
        .filter(|f| rect_contains_rect(&f.rect, &coarse, false))
        .collect();

    let keep = |f: &Footprint| region.matches(&f.rect).then(|| f.id.clone());

    if footprints.len() >= parallel_threshold {
        // Indexed parallel collect keeps input order
        footprints.par_iter().filter_map(keep).collect()
    } else {
        footprints.iter().filter_map(keep).collect()
    }
}
