// Committed selection - the authoritative set of selected entity ids
use std::collections::HashSet;

use crate::types::EntityId;
use super::events::{ChangeKind, SelectionChange};
use super::host::HighlightHandler;

/// Selected ids in the order they were selected; an id appears at most once
#[derive(Default, Debug)]
pub struct SelectionSet {
    order: Vec<EntityId>,
    members: HashSet<EntityId>,
}

impl SelectionSet {
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Replace the selection with `ids`. Ids kept across the replace are not re-highlighted.
    pub fn select(&mut self, ids: &[EntityId], highlighter: &mut dyn HighlightHandler) -> Option<SelectionChange> {
        let mut next_order = Vec::with_capacity(ids.len());
        let mut next_members = HashSet::with_capacity(ids.len());
        for id in ids {
            if next_members.insert(id.clone()) {
                next_order.push(id.clone());
            }
        }

        let removed: Vec<EntityId> = self.order.iter().filter(|id| !next_members.contains(*id)).cloned().collect();
        let added: Vec<EntityId> = next_order.iter().filter(|id| !self.members.contains(*id)).cloned().collect();
        if added.is_empty() && removed.is_empty() {
            return None;
        }

        for id in &removed {
            highlighter.unhighlight(id);
        }
        for id in &added {
            highlighter.highlight(id);
        }
        self.order = next_order;
        self.members = next_members;

        Some(self.change(ChangeKind::Set, added, removed))
    }

    pub fn add(&mut self, id: &EntityId, highlighter: &mut dyn HighlightHandler) -> Option<SelectionChange> {
        self.add_many(std::slice::from_ref(id), highlighter)
    }

    /// Union `ids` into the selection, reporting only ids that were not already selected
    pub fn add_many(&mut self, ids: &[EntityId], highlighter: &mut dyn HighlightHandler) -> Option<SelectionChange> {
        let mut added = Vec::new();
        for id in ids {
            if self.members.insert(id.clone()) {
                self.order.push(id.clone());
                highlighter.highlight(id);
                added.push(id.clone());
            }
        }
        if added.is_empty() {
            return None;
        }
        Some(self.change(ChangeKind::Add, added, Vec::new()))
    }

    pub fn remove(&mut self, id: &EntityId, highlighter: &mut dyn HighlightHandler) -> Option<SelectionChange> {
        self.remove_many(std::slice::from_ref(id), highlighter)
    }

    pub fn remove_many(&mut self, ids: &[EntityId], highlighter: &mut dyn HighlightHandler) -> Option<SelectionChange> {
        let mut removed = Vec::new();
        for id in ids {
            if self.members.remove(id) {
                highlighter.unhighlight(id);
                removed.push(id.clone());
            }
        }
        if removed.is_empty() {
            return None;
        }
        self.order.retain(|id| self.members.contains(id));
        Some(self.change(ChangeKind::Remove, Vec::new(), removed))
    }

    pub fn clear(&mut self, highlighter: &mut dyn HighlightHandler) -> Option<SelectionChange> {
        if self.order.is_empty() {
            return None;
        }
        let removed = std::mem::take(&mut self.order);
        self.members.clear();
        for id in &removed {
            highlighter.unhighlight(id);
        }
        Some(self.change(ChangeKind::Clear, Vec::new(), removed))
    }

    fn change(&self, kind: ChangeKind, added: Vec<EntityId>, removed: Vec<EntityId>) -> SelectionChange {
        SelectionChange {
            kind,
            selection: self.order.clone(),
            added,
            removed,
        }
    }
}
