// Selection engine - owns the committed selection, groups, filters and overrides
use bevy::prelude::*;
use std::collections::HashSet;

use crate::types::{EntityId, GroupId, SelectableEntity, SelectionFilter, SelectionPriority};
use super::candidates::{effective_priority, PriorityOverrides};
use super::events::{EventBus, ListenerId, SelectionChange, SelectionEvent, SelectionEventKind};
use super::groups::GroupRegistry;
use super::host::{HighlightHandler, NoHighlight, SceneHost};
use super::selection_set::SelectionSet;
use super::state::{GestureSession, SelectionConfig, SelectionMethod};

/// Interactive selection engine for one viewport.
///
/// Single-threaded by contract: every call runs to completion and events are delivered
/// before it returns. Hosts sharing it across threads must serialize access themselves
/// (as a Bevy `Resource` that is already the case).
#[derive(Resource)]
pub struct SelectionEngine {
    pub(crate) config: SelectionConfig,
    pub(crate) method: SelectionMethod,
    pub(crate) filter: SelectionFilter,
    pub(crate) overrides: PriorityOverrides,
    pub(crate) selection: SelectionSet,
    pub(crate) groups: GroupRegistry,
    pub(crate) session: Option<GestureSession>,
    pub(crate) highlighter: Box<dyn HighlightHandler>,
    pub(crate) events: EventBus,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl SelectionEngine {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            method: SelectionMethod::default(),
            filter: SelectionFilter::default(),
            overrides: PriorityOverrides::new(),
            selection: SelectionSet::default(),
            groups: GroupRegistry::default(),
            session: None,
            highlighter: Box::new(NoHighlight),
            events: EventBus::default(),
        }
    }

    pub fn with_highlighter(mut self, highlighter: impl HighlightHandler + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    pub fn set_highlighter(&mut self, highlighter: impl HighlightHandler + 'static) {
        self.highlighter = Box::new(highlighter);
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SelectionConfig {
        &mut self.config
    }

    // ---- Events ----

    pub fn on<F>(&mut self, kind: SelectionEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&SelectionEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, callback)
    }

    pub fn on_any<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&SelectionEvent) + Send + Sync + 'static,
    {
        self.events.on_any(callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    pub(crate) fn emit_change(&mut self, change: Option<SelectionChange>) -> bool {
        let Some(change) = change else { return false };
        debug!(
            "Selection {:?}: +{} -{} ({} total)",
            change.kind,
            change.added.len(),
            change.removed.len(),
            change.selection.len()
        );
        self.events.emit(&SelectionEvent::SelectionChanged(change));
        true
    }

    // ---- Method, filters, priorities ----

    pub fn selection_method(&self) -> SelectionMethod {
        self.method
    }

    pub fn set_selection_method(&mut self, method: SelectionMethod) {
        if self.method == method {
            return;
        }
        self.method = method;
        info!("Selection method set to {:?}", method);
        self.events.emit(&SelectionEvent::SelectionMethodChanged { method });
    }

    pub fn filter(&self) -> &SelectionFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: SelectionFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter.clone();
        info!("Selection filter set to {:?}", filter);
        self.events.emit(&SelectionEvent::FiltersChanged { filter });
    }

    pub fn set_priority_override(&mut self, id: impl Into<EntityId>, priority: SelectionPriority) {
        self.overrides.insert(id.into(), priority);
    }

    pub fn clear_priority_override(&mut self, id: &EntityId) -> bool {
        self.overrides.remove(id).is_some()
    }

    pub fn priority_of(&self, entity: &SelectableEntity) -> SelectionPriority {
        effective_priority(entity, &self.overrides)
    }

    // ---- Committed selection ----

    pub fn selected_objects(&self) -> &[EntityId] {
        self.selection.ids()
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selection.contains(id)
    }

    pub fn selection_count(&self) -> usize {
        self.selection.len()
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Replace the committed selection; returns whether anything changed
    pub fn select(&mut self, ids: &[EntityId]) -> bool {
        let change = self.selection.select(ids, self.highlighter.as_mut());
        self.emit_change(change)
    }

    pub fn add(&mut self, id: &EntityId) -> bool {
        let change = self.selection.add(id, self.highlighter.as_mut());
        self.emit_change(change)
    }

    pub fn add_many(&mut self, ids: &[EntityId]) -> bool {
        let change = self.selection.add_many(ids, self.highlighter.as_mut());
        self.emit_change(change)
    }

    pub fn remove(&mut self, id: &EntityId) -> bool {
        let change = self.selection.remove(id, self.highlighter.as_mut());
        self.emit_change(change)
    }

    pub fn remove_many(&mut self, ids: &[EntityId]) -> bool {
        let change = self.selection.remove_many(ids, self.highlighter.as_mut());
        self.emit_change(change)
    }

    pub fn clear(&mut self) -> bool {
        let change = self.selection.clear(self.highlighter.as_mut());
        self.emit_change(change)
    }

    /// Drop committed ids the host no longer lists; returns how many were dropped
    pub fn prune_stale(&mut self, host: &impl SceneHost) -> usize {
        let live = live_ids(host);
        let stale: Vec<EntityId> = self
            .selection
            .ids()
            .iter()
            .filter(|id| !live.contains(*id))
            .cloned()
            .collect();
        if !stale.is_empty() {
            info!("Pruned {} stale ids from selection", stale.len());
            self.remove_many(&stale);
        }
        stale.len()
    }

    // ---- Groups ----

    /// False (and nothing changes) if `id` already exists
    pub fn create_group(&mut self, id: impl Into<GroupId>, members: &[EntityId]) -> bool {
        let id = id.into();
        let Some(members) = self.groups.create(&id, members) else {
            warn!("Group {} already exists", id);
            return false;
        };
        info!("Created group {} with {} members", id, members.len());
        self.events.emit(&SelectionEvent::GroupCreated { id, members });
        true
    }

    /// False for an unknown group. Already-present members are skipped.
    pub fn add_to_group(&mut self, id: &GroupId, members: &[EntityId]) -> bool {
        let Some(added) = self.groups.add(id, members) else { return false };
        self.emit_group_modified(id, added, Vec::new());
        true
    }

    /// False for an unknown group. Absent members are skipped.
    pub fn remove_from_group(&mut self, id: &GroupId, members: &[EntityId]) -> bool {
        let Some(removed) = self.groups.remove(id, members) else { return false };
        self.emit_group_modified(id, Vec::new(), removed);
        true
    }

    pub fn delete_group(&mut self, id: &GroupId) -> bool {
        let Some(members) = self.groups.delete(id) else { return false };
        info!("Deleted group {} ({} members)", id, members.len());
        self.events.emit(&SelectionEvent::GroupDeleted { id: id.clone(), members });
        true
    }

    /// Select the live members of a group, skipping ids the host no longer lists
    pub fn select_group(&mut self, host: &impl SceneHost, id: &GroupId) -> bool {
        let Some(members) = self.groups.members(id) else { return false };
        let live = live_ids(host);
        let members: Vec<EntityId> = members.iter().filter(|m| live.contains(*m)).cloned().collect();
        info!("Selecting group {} ({} live members)", id, members.len());
        self.select(&members);
        true
    }

    /// Drop every trace of an entity (e.g. after it was deleted from the scene):
    /// group memberships, committed selection and priority override
    pub fn forget_entity(&mut self, member: &EntityId) {
        for group in self.groups.purge_entity(member) {
            self.emit_group_modified(&group, Vec::new(), vec![member.clone()]);
        }
        self.overrides.remove(member);
        self.remove(member);
    }

    pub fn object_groups(&self, member: &EntityId) -> Vec<GroupId> {
        self.groups.groups_of(member)
    }

    pub fn group_objects(&self, id: &GroupId) -> Vec<EntityId> {
        self.groups.members(id).map(<[EntityId]>::to_vec).unwrap_or_default()
    }

    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.group_ids()
    }

    fn emit_group_modified(&mut self, id: &GroupId, added: Vec<EntityId>, removed: Vec<EntityId>) {
        if added.is_empty() && removed.is_empty() {
            return;
        }
        debug!("Group {} modified: +{} -{}", id, added.len(), removed.len());
        self.events.emit(&SelectionEvent::GroupModified { id: id.clone(), added, removed });
    }

    // ---- Gesture queries ----

    pub fn active_gesture(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.session.is_some()
    }

    /// Temporary selection of the in-flight gesture (empty when idle)
    pub fn preview(&self) -> &[EntityId] {
        self.session.as_ref().map(GestureSession::preview).unwrap_or_default()
    }
}

pub(crate) fn live_ids(host: &impl SceneHost) -> HashSet<EntityId> {
    host.selectable_entities().into_iter().map(|e| e.id).collect()
}
