// Named entity groups with a two-way membership index
use std::collections::{HashMap, HashSet};

use crate::types::{EntityId, GroupId};

/// Group membership. Both directions of the index live here and are only ever changed
/// together, so `m ∈ members(g)` holds exactly when `g ∈ groups_of(m)`.
#[derive(Default, Debug)]
pub struct GroupRegistry {
    members: HashMap<GroupId, Vec<EntityId>>,        // Insertion order per group
    memberships: HashMap<EntityId, HashSet<GroupId>>, // Reverse index
}

impl GroupRegistry {
    /// Insert a new group; `None` (and no mutation) if the id is taken.
    /// Returns the deduplicated member list on success.
    pub fn create(&mut self, id: &GroupId, members: &[EntityId]) -> Option<Vec<EntityId>> {
        if self.members.contains_key(id) {
            return None;
        }
        self.members.insert(id.clone(), Vec::new());
        Some(self.link_all(id, members))
    }

    /// Add members; returns the ids actually added, `None` for an unknown group
    pub fn add(&mut self, id: &GroupId, members: &[EntityId]) -> Option<Vec<EntityId>> {
        if !self.members.contains_key(id) {
            return None;
        }
        Some(self.link_all(id, members))
    }

    /// Remove members; returns the ids actually removed, `None` for an unknown group
    pub fn remove(&mut self, id: &GroupId, members: &[EntityId]) -> Option<Vec<EntityId>> {
        if !self.members.contains_key(id) {
            return None;
        }
        let mut removed = Vec::new();
        for member in members {
            if self.unlink(id, member) {
                removed.push(member.clone());
            }
        }
        Some(removed)
    }

    /// Drop a group and every reverse edge to it; returns its former members
    pub fn delete(&mut self, id: &GroupId) -> Option<Vec<EntityId>> {
        let members = self.members.remove(id)?;
        for member in &members {
            self.unlink_reverse(id, member);
        }
        Some(members)
    }

    /// Forget an entity everywhere (e.g. it was deleted from the scene).
    /// Returns the groups it was removed from, sorted.
    pub fn purge_entity(&mut self, member: &EntityId) -> Vec<GroupId> {
        let Some(groups) = self.memberships.remove(member) else { return Vec::new() };
        for group in &groups {
            if let Some(list) = self.members.get_mut(group) {
                list.retain(|m| m != member);
            }
        }
        let mut groups: Vec<GroupId> = groups.into_iter().collect();
        groups.sort();
        groups
    }

    pub fn members(&self, id: &GroupId) -> Option<&[EntityId]> {
        self.members.get(id).map(Vec::as_slice)
    }

    /// Groups containing `member`, sorted by id; empty for unknown ids
    pub fn groups_of(&self, member: &EntityId) -> Vec<GroupId> {
        let mut groups: Vec<GroupId> = self
            .memberships
            .get(member)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        groups.sort();
        groups
    }

    /// All group ids, sorted
    pub fn group_ids(&self) -> Vec<GroupId> {
        let mut ids: Vec<GroupId> = self.members.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn link_all(&mut self, id: &GroupId, members: &[EntityId]) -> Vec<EntityId> {
        let mut added = Vec::new();
        for member in members {
            if self.link(id, member) {
                added.push(member.clone());
            }
        }
        added
    }

    /// Insert both edges; false if the edge already existed
    fn link(&mut self, id: &GroupId, member: &EntityId) -> bool {
        let groups = self.memberships.entry(member.clone()).or_default();
        if !groups.insert(id.clone()) {
            return false;
        }
        if let Some(list) = self.members.get_mut(id) {
            list.push(member.clone());
        }
        true
    }

    /// Remove both edges; false if there was no edge
    fn unlink(&mut self, id: &GroupId, member: &EntityId) -> bool {
        if !self.unlink_reverse(id, member) {
            return false;
        }
        if let Some(list) = self.members.get_mut(id) {
            list.retain(|m| m != member);
        }
        true
    }

    fn unlink_reverse(&mut self, id: &GroupId, member: &EntityId) -> bool {
        let Some(groups) = self.memberships.get_mut(member) else { return false };
        let removed = groups.remove(id);
        if groups.is_empty() {
            self.memberships.remove(member);
        }
        removed
    }

    /// Verify both index directions agree
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let forward_ok = self.members.iter().all(|(group, members)| {
            members
                .iter()
                .all(|m| self.memberships.get(m).is_some_and(|groups| groups.contains(group)))
        });
        let reverse_ok = self.memberships.iter().all(|(member, groups)| {
            !groups.is_empty()
                && groups
                    .iter()
                    .all(|g| self.members.get(g).is_some_and(|members| members.contains(member)))
        });
        let no_duplicates = self.members.values().all(|members| {
            members.iter().collect::<HashSet<_>>().len() == members.len()
        });
        forward_ok && reverse_ok && no_duplicates
    }
}
