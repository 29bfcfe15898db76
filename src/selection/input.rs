// Gesture handling - click, window/crossing drags, lasso strokes and polygon picks
use bevy::prelude::*;

use crate::math_utils::project_bounds_to_screen;
use crate::types::{EntityId, RayHit};
use super::candidates::{ray_distance, resolve_candidate};
use super::engine::{live_ids, SelectionEngine};
use super::host::SceneHost;
use super::region::{query_region, Region};
use super::state::{GestureError, GestureMode, GestureSession, ProximityMode};

impl SelectionEngine {
    /// Single click. A hit replaces the selection, or toggles it when `add_to_selection`.
    /// A miss clears the selection unless `add_to_selection`.
    /// Returns the entity the click resolved to.
    pub fn select_at(&mut self, host: &impl SceneHost, point: Vec2, add_to_selection: bool) -> Option<EntityId> {
        let Some(id) = self.resolve_click(host, point) else {
            if !add_to_selection {
                // Background click
                self.clear();
            }
            return None;
        };

        let targets = self.click_targets(host, &id);
        if add_to_selection {
            if self.is_selected(&id) {
                self.remove_many(&targets);
                info!("Deselected {} ({} total)", id, self.selection_count());
            } else {
                self.add_many(&targets);
                info!("Added {} to selection ({} total)", id, self.selection_count());
            }
        } else {
            self.select(&targets);
            info!("Selected {}", id);
        }
        Some(id)
    }

    /// Entity a click at `point` resolves to, without touching the selection
    fn resolve_click(&self, host: &impl SceneHost, point: Vec2) -> Option<EntityId> {
        let hits = host.cast_ray(point);
        let winner = match self.config.proximity {
            ProximityMode::RayDistance => resolve_candidate(&hits, &self.filter, &self.overrides, ray_distance),
            ProximityMode::ScreenDistance => resolve_candidate(&hits, &self.filter, &self.overrides, |hit: &RayHit| {
                project_bounds_to_screen(&hit.entity.bounds, |p| host.project(p))
                    .center()
                    .distance(point)
            }),
        };
        winner.map(|hit| hit.entity.id.clone())
    }

    /// The clicked entity, plus its live group mates when group expansion is on
    fn click_targets(&self, host: &impl SceneHost, id: &EntityId) -> Vec<EntityId> {
        let mut targets = vec![id.clone()];
        if !self.config.expand_groups {
            return targets;
        }
        let groups = self.groups.groups_of(id);
        if groups.is_empty() {
            return targets;
        }
        let live = live_ids(host);
        for group in &groups {
            for member in self.groups.members(group).unwrap_or_default() {
                if live.contains(member) && !targets.contains(member) {
                    targets.push(member.clone());
                }
            }
        }
        targets
    }

    pub fn start_window_selection(&mut self, host: &impl SceneHost, point: Vec2) -> Result<(), GestureError> {
        self.start_gesture(host, GestureMode::Window, point)
    }

    pub fn start_crossing_selection(&mut self, host: &impl SceneHost, point: Vec2) -> Result<(), GestureError> {
        self.start_gesture(host, GestureMode::Crossing, point)
    }

    pub fn start_lasso_selection(&mut self, host: &impl SceneHost, point: Vec2) -> Result<(), GestureError> {
        self.start_gesture(host, GestureMode::Lasso, point)
    }

    pub fn start_polygon_selection(&mut self, host: &impl SceneHost, point: Vec2) -> Result<(), GestureError> {
        self.start_gesture(host, GestureMode::Polygon, point)
    }

    /// Start a gesture in the current selection method
    pub fn begin_selection(&mut self, host: &impl SceneHost, point: Vec2) -> Result<GestureMode, GestureError> {
        let mode = GestureMode::from_method(self.method).ok_or(GestureError::SingleClickMethod)?;
        self.start_gesture(host, mode, point)?;
        Ok(mode)
    }

    /// Open a session. A second gesture while one is active is rejected and the active
    /// one keeps going.
    pub fn start_gesture(&mut self, host: &impl SceneHost, mode: GestureMode, point: Vec2) -> Result<(), GestureError> {
        if let Some(active) = &self.session {
            warn!("Rejected {} gesture: {} gesture already in progress", mode, active.mode());
            return Err(GestureError::GestureInProgress { active: active.mode() });
        }
        self.session = Some(GestureSession::new(mode, point, host.unproject(point)));
        debug!("Started {} gesture at {:?}", mode, point);
        Ok(())
    }

    /// Track the cursor and refresh the preview. Lasso strokes sample the cursor into the
    /// path; polygons only preview it as a provisional closing vertex.
    pub fn update_selection(&mut self, host: &impl SceneHost, point: Vec2) -> Result<&[EntityId], GestureError> {
        let spacing = self.config.lasso_min_spacing;
        let session = self.session.as_mut().ok_or(GestureError::NoActiveGesture)?;
        session.move_to(point, spacing);
        self.refresh_preview(host)
    }

    /// Confirm the cursor position as the next polygon vertex
    pub fn add_polygon_point(&mut self, host: &impl SceneHost, point: Vec2) -> Result<&[EntityId], GestureError> {
        let session = self.session.as_mut().ok_or(GestureError::NoActiveGesture)?;
        if session.mode() != GestureMode::Polygon {
            return Err(GestureError::WrongMode {
                expected: GestureMode::Polygon,
                active: Some(session.mode()),
            });
        }
        session.confirm_vertex(point);
        self.refresh_preview(host)
    }

    fn refresh_preview(&mut self, host: &impl SceneHost) -> Result<&[EntityId], GestureError> {
        let session = self.session.as_ref().ok_or(GestureError::NoActiveGesture)?;
        let preview = match session.mode() {
            _ if self.is_short_drag(session) => self.short_drag_targets(host, session),
            GestureMode::Polygon => {
                let polygon = session.preview_polygon();
                self.query(host, Region::Polygon(&polygon))
            }
            mode => self.query(host, self.final_region_of(session, mode).as_region()),
        };
        debug!("{} preview: {} entities", session.mode(), preview.len());

        let session = self.session.as_mut().ok_or(GestureError::NoActiveGesture)?;
        session.set_preview(preview);
        Ok(session.preview())
    }

    /// Close the gesture and commit its result: union into the selection when
    /// `add_to_selection`, replace it otherwise. A rectangle drag shorter than the drag
    /// threshold takes the click winner at the release point as its result.
    pub fn finish_selection(&mut self, host: &impl SceneHost, add_to_selection: bool) -> Result<Vec<EntityId>, GestureError> {
        let session = self.session.take().ok_or(GestureError::NoActiveGesture)?;
        let mode = session.mode();

        let result = if self.is_short_drag(&session) {
            debug!("{} drag under threshold, treating as click", mode);
            self.short_drag_targets(host, &session)
        } else {
            self.query(host, self.final_region_of(&session, mode).as_region())
        };

        if add_to_selection {
            self.add_many(&result);
        } else {
            self.select(&result);
        }
        info!("{} selection committed {} entities ({} total)", mode, result.len(), self.selection_count());
        Ok(result)
    }

    /// Drop the in-flight gesture without touching the committed selection
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                debug!("Cancelled {} gesture", session.mode());
                true
            }
            None => false,
        }
    }

    fn is_short_drag(&self, session: &GestureSession) -> bool {
        session.mode().is_rectangle() && session.drag_distance() < self.config.drag_threshold
    }

    /// Click result at the cursor of a short rectangle drag (empty on a miss)
    fn short_drag_targets(&self, host: &impl SceneHost, session: &GestureSession) -> Vec<EntityId> {
        self.resolve_click(host, session.current())
            .map(|id| self.click_targets(host, &id))
            .unwrap_or_default()
    }

    fn final_region_of(&self, session: &GestureSession, mode: GestureMode) -> FinalRegion {
        match mode {
            GestureMode::Window => FinalRegion::Window(session.drag_rect()),
            GestureMode::Crossing => FinalRegion::Crossing(session.drag_rect()),
            GestureMode::Lasso => {
                let mut path = session.path().to_vec();
                if path.last() != Some(&session.current()) {
                    path.push(session.current());
                }
                FinalRegion::Path(path)
            }
            GestureMode::Polygon => FinalRegion::Path(session.path().to_vec()),
        }
    }

    fn query(&self, host: &impl SceneHost, region: Region) -> Vec<EntityId> {
        let entities = host.selectable_entities();
        query_region(&entities, region, &self.filter, |p| host.project(p), self.config.parallel_threshold)
    }
}

/// Owned form of a gesture's region, so it can outlive a borrow of the session
enum FinalRegion {
    Window(Rect),
    Crossing(Rect),
    Path(Vec<Vec2>),
}

impl FinalRegion {
    fn as_region(&self) -> Region<'_> {
        match self {
            FinalRegion::Window(rect) => Region::Window(*rect),
            FinalRegion::Crossing(rect) => Region::Crossing(*rect),
            FinalRegion::Path(path) => Region::Polygon(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::events::{ChangeKind, SelectionEvent};
    use crate::selection::host::testing::{boxed, hit, MockScene};
    use crate::selection::state::{SelectionConfig, SelectionMethod};
    use crate::types::{EntityKind, GroupId, SelectionFilter};
    use std::sync::{Arc, Mutex};

    fn ids(names: &[&str]) -> Vec<EntityId> {
        names.iter().map(|n| EntityId::from(*n)).collect()
    }

    fn scenario_a() -> MockScene {
        MockScene::with(vec![boxed("e1", EntityKind::Wall, 10.0, 10.0, 50.0, 50.0)])
    }

    fn drag(engine: &mut SelectionEngine, scene: &MockScene, mode: GestureMode, from: Vec2, to: Vec2) -> Vec<EntityId> {
        engine.start_gesture(scene, mode, from).unwrap();
        engine.update_selection(scene, to).unwrap();
        engine.finish_selection(scene, false).unwrap()
    }

    #[test]
    fn scenario_a_window_and_crossing() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();

        drag(&mut engine, &scene, GestureMode::Window, Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        assert!(engine.is_selected(&EntityId::from("e1")));

        drag(&mut engine, &scene, GestureMode::Window, Vec2::new(30.0, 30.0), Vec2::new(40.0, 40.0));
        assert!(!engine.is_selected(&EntityId::from("e1")));

        drag(&mut engine, &scene, GestureMode::Crossing, Vec2::new(30.0, 30.0), Vec2::new(40.0, 40.0));
        assert!(engine.is_selected(&EntityId::from("e1")));
    }

    #[test]
    fn scenario_c_background_click_clears() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        engine.select(&ids(&["e1"]));

        assert_eq!(engine.select_at(&scene, Vec2::new(500.0, 500.0), true), None);
        assert!(engine.has_selection(), "additive miss leaves the selection alone");

        assert_eq!(engine.select_at(&scene, Vec2::new(500.0, 500.0), false), None);
        assert!(!engine.has_selection());
    }

    #[test]
    fn click_replaces_and_additive_click_toggles() {
        let scene = MockScene::with(vec![
            boxed("a", EntityKind::Wall, 0.0, 0.0, 10.0, 10.0),
            boxed("b", EntityKind::Wall, 20.0, 0.0, 30.0, 10.0),
        ]);
        let mut engine = SelectionEngine::default();

        assert_eq!(engine.select_at(&scene, Vec2::new(5.0, 5.0), false), Some(EntityId::from("a")));
        assert_eq!(engine.select_at(&scene, Vec2::new(25.0, 5.0), true), Some(EntityId::from("b")));
        assert_eq!(engine.selected_objects(), ids(&["a", "b"]).as_slice());

        engine.select_at(&scene, Vec2::new(5.0, 5.0), true);
        assert_eq!(engine.selected_objects(), ids(&["b"]).as_slice());

        engine.select_at(&scene, Vec2::new(5.0, 5.0), false);
        assert_eq!(engine.selected_objects(), ids(&["a"]).as_slice());
    }

    #[test]
    fn click_tie_is_first_seen_every_time() {
        let mut scene = MockScene::default();
        scene.forced_hits = Some(vec![
            hit(boxed("first", EntityKind::Beam, 0.0, 0.0, 1.0, 1.0), 2.0),
            hit(boxed("second", EntityKind::Beam, 0.0, 0.0, 1.0, 1.0), 2.0),
        ]);
        let mut engine = SelectionEngine::default();
        for _ in 0..20 {
            assert_eq!(engine.select_at(&scene, Vec2::ZERO, false), Some(EntityId::from("first")));
        }
    }

    #[test]
    fn screen_distance_mode_prefers_footprint_nearest_the_cursor() {
        let mut scene = MockScene::default();
        scene.forced_hits = Some(vec![
            // Nearer along the ray but its footprint centre is far from the cursor
            hit(boxed("near_ray", EntityKind::Wall, 0.0, 0.0, 100.0, 100.0), 1.0),
            hit(boxed("near_cursor", EntityKind::Wall, 80.0, 80.0, 100.0, 100.0), 5.0),
        ]);
        let cursor = Vec2::new(90.0, 90.0);

        let mut engine = SelectionEngine::default();
        assert_eq!(engine.select_at(&scene, cursor, false), Some(EntityId::from("near_ray")));

        let config = SelectionConfig { proximity: ProximityMode::ScreenDistance, ..Default::default() };
        let mut engine = SelectionEngine::new(config);
        assert_eq!(engine.select_at(&scene, cursor, false), Some(EntityId::from("near_cursor")));
    }

    #[test]
    fn filters_restrict_clicks_and_regions() {
        let scene = MockScene::with(vec![
            boxed("wall", EntityKind::Wall, 0.0, 0.0, 10.0, 10.0),
            boxed("slab", EntityKind::Slab, 0.0, 0.0, 10.0, 10.0),
        ]);
        let mut engine = SelectionEngine::default();
        engine.set_filter(SelectionFilter::only([EntityKind::Slab]));

        assert_eq!(engine.select_at(&scene, Vec2::new(5.0, 5.0), false), Some(EntityId::from("slab")));
        let result = drag(&mut engine, &scene, GestureMode::Crossing, Vec2::new(-5.0, -5.0), Vec2::new(50.0, 50.0));
        assert_eq!(result, ids(&["slab"]));
    }

    #[test]
    fn expand_groups_selects_live_group_mates() {
        let mut scene = MockScene::with(vec![
            boxed("a", EntityKind::Column, 0.0, 0.0, 10.0, 10.0),
            boxed("b", EntityKind::Column, 50.0, 0.0, 60.0, 10.0),
            boxed("c", EntityKind::Column, 90.0, 0.0, 99.0, 10.0),
        ]);
        let config = SelectionConfig { expand_groups: true, ..Default::default() };
        let mut engine = SelectionEngine::new(config);
        engine.create_group("g", &ids(&["a", "b", "c"]));
        scene.remove("c");

        engine.select_at(&scene, Vec2::new(5.0, 5.0), false);
        assert_eq!(engine.selected_objects(), ids(&["a", "b"]).as_slice());

        engine.select_at(&scene, Vec2::new(55.0, 5.0), true);
        assert!(!engine.has_selection(), "toggling a grouped entity drops the whole group");
        assert_eq!(engine.group_objects(&GroupId::from("g")), ids(&["a", "b", "c"]));
    }

    #[test]
    fn preview_is_separate_from_committed_selection() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        engine.on_any(move |e| sink.lock().unwrap().push(e.clone()));

        engine.start_window_selection(&scene, Vec2::ZERO).unwrap();
        let preview = engine.update_selection(&scene, Vec2::new(100.0, 100.0)).unwrap().to_vec();
        assert_eq!(preview, ids(&["e1"]));
        assert!(!engine.has_selection());
        assert!(log.lock().unwrap().is_empty(), "previews do not emit selection events");

        let preview = engine.update_selection(&scene, Vec2::new(20.0, 20.0)).unwrap().to_vec();
        assert!(preview.is_empty());
        assert_eq!(engine.active_gesture().unwrap().drag_rect().max, Vec2::new(20.0, 20.0));

        engine.update_selection(&scene, Vec2::new(60.0, 60.0)).unwrap();
        engine.finish_selection(&scene, false).unwrap();
        assert!(engine.is_selected(&EntityId::from("e1")));
        assert!(engine.preview().is_empty());
        assert!(!engine.is_gesture_active());
    }

    #[test]
    fn update_reruns_against_live_entities() {
        let mut scene = scenario_a();
        let mut engine = SelectionEngine::default();
        engine.start_crossing_selection(&scene, Vec2::ZERO).unwrap();
        assert_eq!(engine.update_selection(&scene, Vec2::new(100.0, 100.0)).unwrap().len(), 1);

        scene.remove("e1");
        assert!(engine.update_selection(&scene, Vec2::new(100.0, 100.0)).unwrap().is_empty());
        assert!(engine.finish_selection(&scene, false).unwrap().is_empty());
    }

    #[test]
    fn lasso_selects_by_centroid() {
        let scene = MockScene::with(vec![
            boxed("in", EntityKind::Furniture, 20.0, 20.0, 30.0, 30.0),
            boxed("out", EntityKind::Furniture, 150.0, 150.0, 160.0, 160.0),
        ]);
        let mut engine = SelectionEngine::default();
        engine.start_lasso_selection(&scene, Vec2::new(0.0, 0.0)).unwrap();
        for p in [Vec2::new(100.0, 0.0), Vec2::new(100.0, 100.0), Vec2::new(0.0, 100.0)] {
            engine.update_selection(&scene, p).unwrap();
        }
        assert_eq!(engine.preview(), ids(&["in"]).as_slice());
        assert_eq!(engine.finish_selection(&scene, false).unwrap(), ids(&["in"]));
        assert_eq!(engine.selected_objects(), ids(&["in"]).as_slice());
    }

    #[test]
    fn polygon_commits_confirmed_vertices_only() {
        let scene = MockScene::with(vec![
            boxed("inside", EntityKind::Door, 70.0, 20.0, 80.0, 30.0),
            boxed("corner", EntityKind::Door, 20.0, 70.0, 30.0, 80.0),
        ]);
        let mut engine = SelectionEngine::default();
        engine.start_polygon_selection(&scene, Vec2::new(0.0, 0.0)).unwrap();
        engine.add_polygon_point(&scene, Vec2::new(100.0, 0.0)).unwrap();
        let preview = engine.add_polygon_point(&scene, Vec2::new(100.0, 100.0)).unwrap().to_vec();
        assert_eq!(preview, ids(&["inside"]));

        // Hovering closes the preview through the cursor
        let preview = engine.update_selection(&scene, Vec2::new(0.0, 100.0)).unwrap().to_vec();
        assert_eq!(preview, ids(&["inside", "corner"]));
        assert_eq!(engine.active_gesture().unwrap().path().len(), 3);

        // The hovered vertex was never confirmed, so the committed triangle misses "corner"
        assert_eq!(engine.finish_selection(&scene, false).unwrap(), ids(&["inside"]));
    }

    #[test]
    fn polygon_with_too_few_points_clears_selection() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        engine.select(&ids(&["e1"]));

        engine.start_polygon_selection(&scene, Vec2::ZERO).unwrap();
        engine.add_polygon_point(&scene, Vec2::new(100.0, 100.0)).unwrap();
        assert!(engine.finish_selection(&scene, false).unwrap().is_empty());
        assert!(!engine.has_selection());
    }

    #[test]
    fn additive_finish_unions() {
        let scene = MockScene::with(vec![
            boxed("left", EntityKind::Wall, 0.0, 0.0, 10.0, 10.0),
            boxed("right", EntityKind::Wall, 100.0, 0.0, 110.0, 10.0),
        ]);
        let mut engine = SelectionEngine::default();
        engine.select(&ids(&["left"]));

        engine.start_window_selection(&scene, Vec2::new(90.0, -5.0)).unwrap();
        engine.update_selection(&scene, Vec2::new(120.0, 20.0)).unwrap();
        engine.finish_selection(&scene, true).unwrap();
        assert_eq!(engine.selected_objects(), ids(&["left", "right"]).as_slice());
    }

    #[test]
    fn tiny_rectangle_drag_is_a_click() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        engine.start_window_selection(&scene, Vec2::new(20.0, 20.0)).unwrap();
        engine.update_selection(&scene, Vec2::new(21.0, 21.0)).unwrap();
        assert_eq!(engine.finish_selection(&scene, false).unwrap(), ids(&["e1"]));
        assert!(engine.is_selected(&EntityId::from("e1")));
    }

    #[test]
    fn tiny_additive_drag_never_deselects() {
        let scene = MockScene::with(vec![
            boxed("e1", EntityKind::Wall, 10.0, 10.0, 50.0, 50.0),
            boxed("e2", EntityKind::Wall, 60.0, 10.0, 90.0, 50.0),
        ]);
        let mut engine = SelectionEngine::default();
        engine.select(&ids(&["e2", "e1"]));

        engine.start_window_selection(&scene, Vec2::new(20.0, 20.0)).unwrap();
        engine.update_selection(&scene, Vec2::new(21.0, 21.0)).unwrap();
        assert_eq!(engine.finish_selection(&scene, true).unwrap(), ids(&["e1"]));
        assert_eq!(engine.selected_objects(), ids(&["e2", "e1"]).as_slice());

        // Miss: additive keeps the selection, replace clears it
        engine.start_crossing_selection(&scene, Vec2::new(200.0, 200.0)).unwrap();
        assert!(engine.finish_selection(&scene, true).unwrap().is_empty());
        assert_eq!(engine.selection_count(), 2);
        engine.start_crossing_selection(&scene, Vec2::new(200.0, 200.0)).unwrap();
        engine.finish_selection(&scene, false).unwrap();
        assert!(!engine.has_selection());
    }

    #[test]
    fn tiny_drag_preview_matches_commit() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        engine.start_window_selection(&scene, Vec2::new(20.0, 20.0)).unwrap();
        let preview = engine.update_selection(&scene, Vec2::new(21.0, 21.0)).unwrap().to_vec();
        assert_eq!(preview, ids(&["e1"]));
        assert_eq!(engine.finish_selection(&scene, false).unwrap(), preview);

        // Past the threshold the preview is the window result again
        engine.start_window_selection(&scene, Vec2::new(20.0, 20.0)).unwrap();
        assert!(engine.update_selection(&scene, Vec2::new(30.0, 30.0)).unwrap().is_empty());
        assert!(engine.finish_selection(&scene, false).unwrap().is_empty());
    }

    #[test]
    fn second_gesture_is_rejected_and_first_survives() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        engine.start_window_selection(&scene, Vec2::ZERO).unwrap();
        engine.update_selection(&scene, Vec2::new(70.0, 70.0)).unwrap();

        assert_eq!(
            engine.start_lasso_selection(&scene, Vec2::new(5.0, 5.0)),
            Err(GestureError::GestureInProgress { active: GestureMode::Window })
        );
        let session = engine.active_gesture().unwrap();
        assert_eq!(session.mode(), GestureMode::Window);
        assert_eq!(session.path(), &[Vec2::ZERO]);

        engine.finish_selection(&scene, false).unwrap();
        assert!(engine.is_selected(&EntityId::from("e1")));
    }

    #[test]
    fn cancel_discards_without_touching_selection() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        engine.select(&ids(&["other"]));

        engine.start_crossing_selection(&scene, Vec2::ZERO).unwrap();
        engine.update_selection(&scene, Vec2::new(100.0, 100.0)).unwrap();
        assert!(engine.cancel());
        assert!(!engine.cancel());

        assert_eq!(engine.selected_objects(), ids(&["other"]).as_slice());
        assert!(engine.preview().is_empty());
        assert_eq!(engine.update_selection(&scene, Vec2::ZERO), Err(GestureError::NoActiveGesture));
        assert_eq!(engine.finish_selection(&scene, false), Err(GestureError::NoActiveGesture));
    }

    #[test]
    fn polygon_points_need_a_polygon_gesture() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        engine.start_lasso_selection(&scene, Vec2::ZERO).unwrap();
        assert_eq!(
            engine.add_polygon_point(&scene, Vec2::ONE),
            Err(GestureError::WrongMode { expected: GestureMode::Polygon, active: Some(GestureMode::Lasso) })
        );
    }

    #[test]
    fn begin_selection_follows_current_method() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        assert_eq!(engine.begin_selection(&scene, Vec2::ZERO), Err(GestureError::SingleClickMethod));

        engine.set_selection_method(SelectionMethod::Crossing);
        assert_eq!(engine.begin_selection(&scene, Vec2::ZERO), Ok(GestureMode::Crossing));
        assert_eq!(engine.active_gesture().unwrap().anchor_world(), Vec3::ZERO);
    }

    #[test]
    fn commit_emits_one_set_event() {
        let scene = scenario_a();
        let mut engine = SelectionEngine::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        engine.on_any(move |e| sink.lock().unwrap().push(e.clone()));

        drag(&mut engine, &scene, GestureMode::Window, Vec2::ZERO, Vec2::new(100.0, 100.0));
        let events = log.lock().unwrap();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SelectionEvent::SelectionChanged(change) => {
                assert_eq!(change.kind, ChangeKind::Set);
                assert_eq!(change.selection, ids(&["e1"]));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
