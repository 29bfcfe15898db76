// Selection events and the synchronous listener bus
use bevy::prelude::*;

use crate::types::{EntityId, GroupId, SelectionFilter};
use super::state::SelectionMethod;

/// What kind of committed-selection mutation produced a change
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ChangeKind {
    Set,
    Add,
    Remove,
    Clear,
}

/// Full committed selection after a mutation, plus the delta that produced it
#[derive(Clone, PartialEq, Debug)]
pub struct SelectionChange {
    pub kind: ChangeKind,
    pub selection: Vec<EntityId>,
    pub added: Vec<EntityId>,
    pub removed: Vec<EntityId>,
}

#[derive(Event, Clone, PartialEq, Debug)]
pub enum SelectionEvent {
    SelectionChanged(SelectionChange),
    SelectionMethodChanged { method: SelectionMethod },
    FiltersChanged { filter: SelectionFilter },
    GroupCreated { id: GroupId, members: Vec<EntityId> },
    GroupModified { id: GroupId, added: Vec<EntityId>, removed: Vec<EntityId> },
    GroupDeleted { id: GroupId, members: Vec<EntityId> },
}

/// Event names listeners subscribe to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SelectionEventKind {
    SelectionChanged,
    SelectionMethodChanged,
    FiltersChanged,
    GroupCreated,
    GroupModified,
    GroupDeleted,
}

impl SelectionEvent {
    pub fn kind(&self) -> SelectionEventKind {
        match self {
            SelectionEvent::SelectionChanged(_) => SelectionEventKind::SelectionChanged,
            SelectionEvent::SelectionMethodChanged { .. } => SelectionEventKind::SelectionMethodChanged,
            SelectionEvent::FiltersChanged { .. } => SelectionEventKind::FiltersChanged,
            SelectionEvent::GroupCreated { .. } => SelectionEventKind::GroupCreated,
            SelectionEvent::GroupModified { .. } => SelectionEventKind::GroupModified,
            SelectionEvent::GroupDeleted { .. } => SelectionEventKind::GroupDeleted,
        }
    }
}

/// Handle returned by `on`, used to unsubscribe
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&SelectionEvent) + Send + Sync>;

struct Subscription {
    id: ListenerId,
    kind: Option<SelectionEventKind>, // None listens to everything
    callback: Listener,
}

/// Delivers every event synchronously, to listeners in subscription order
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn on<F>(&mut self, kind: SelectionEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&SelectionEvent) + Send + Sync + 'static,
    {
        self.subscribe(Some(kind), Box::new(callback))
    }

    pub fn on_any<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&SelectionEvent) + Send + Sync + 'static,
    {
        self.subscribe(None, Box::new(callback))
    }

    fn subscribe(&mut self, kind: Option<SelectionEventKind>, callback: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, callback });
        id
    }

    /// Returns false if the listener was already gone
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn emit(&mut self, event: &SelectionEvent) {
        let kind = event.kind();
        for subscription in &mut self.subscriptions {
            if subscription.kind.map_or(true, |k| k == kind) {
                (subscription.callback)(event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }
}
