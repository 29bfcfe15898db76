// Point-selection disambiguation - picks one winner out of the ray hits under the cursor
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{EntityId, RayHit, SelectableEntity, SelectionFilter, SelectionPriority};

/// Engine-held priority overrides, checked before the entity's own
pub type PriorityOverrides = HashMap<EntityId, SelectionPriority>;

/// Override from the engine, else the entity's own, else the type default
pub fn effective_priority(entity: &SelectableEntity, overrides: &PriorityOverrides) -> SelectionPriority {
    overrides
        .get(&entity.id)
        .copied()
        .or(entity.priority)
        .unwrap_or_else(|| SelectionPriority::for_kind(entity.kind))
}

/// A hit that survived filtering, with its sort keys
#[derive(Clone, Debug)]
pub struct Candidate<'a> {
    pub hit: &'a RayHit,
    pub priority: SelectionPriority,
    pub proximity: f32,
    order: usize,
}

fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.proximity.total_cmp(&b.proximity))
        .then_with(|| a.order.cmp(&b.order))
}

/// Filter and order hits by (priority desc, proximity asc, input order asc)
pub fn rank_candidates<'a>(
    hits: &'a [RayHit],
    filter: &SelectionFilter,
    overrides: &PriorityOverrides,
    proximity: impl Fn(&RayHit) -> f32,
) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = hits
        .iter()
        .enumerate()
        .filter(|(_, hit)| hit.entity.is_pickable() && filter.allows(hit.entity.kind))
        .map(|(order, hit)| Candidate {
            hit,
            priority: effective_priority(&hit.entity, overrides),
            proximity: proximity(hit),
            order,
        })
        .collect();

    candidates.sort_by(compare);
    candidates
}

/// Winner for a click, or `None` when nothing eligible is under the cursor.
/// Exact ties go to the hit that came first in `hits`.
pub fn resolve_candidate<'a>(
    hits: &'a [RayHit],
    filter: &SelectionFilter,
    overrides: &PriorityOverrides,
    proximity: impl Fn(&RayHit) -> f32,
) -> Option<&'a RayHit> {
    rank_candidates(hits, filter, overrides, proximity)
        .into_iter()
        .next()
        .map(|candidate| candidate.hit)
}

/// Proximity as distance along the pick ray
pub fn ray_distance(hit: &RayHit) -> f32 {
    hit.distance
}
