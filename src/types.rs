use bevy::prelude::*;
use std::collections::HashSet;
use std::fmt;

/// Host-assigned identifier of a selectable scene entity
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EntityId(pub String);

/// Caller-assigned identifier of a named group
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct GroupId(pub String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(EntityId);
string_id!(GroupId);

/// BIM type tag carried by every selectable entity
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EntityKind {
    Wall,
    Slab,
    Door,
    Window,
    Column,
    Beam,
    Roof,
    Stair,
    Ramp,
    Furniture,
    Space,
    Annotation,
    Other,
}

/// Ranked preference used when several candidates compete for a click.
/// Declared lowest first so the derived `Ord` ranks `Critical` highest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum SelectionPriority {
    Minimal,
    Low,
    Normal,
    High,
    Critical,
}

impl SelectionPriority {
    /// Default tier for a type tag when nothing overrides it
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Annotation => SelectionPriority::Critical,
            // Openings sit inside their host wall and would be unreachable otherwise
            EntityKind::Door | EntityKind::Window => SelectionPriority::High,
            EntityKind::Wall
            | EntityKind::Column
            | EntityKind::Beam
            | EntityKind::Stair
            | EntityKind::Ramp
            | EntityKind::Furniture => SelectionPriority::Normal,
            EntityKind::Slab | EntityKind::Roof => SelectionPriority::Low,
            EntityKind::Space | EntityKind::Other => SelectionPriority::Minimal,
        }
    }
}

/// Which entity kinds are eligible for selection
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SelectionFilter {
    #[default]
    All,
    Kinds(HashSet<EntityKind>),
}

impl SelectionFilter {
    pub fn only(kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        SelectionFilter::Kinds(kinds.into_iter().collect())
    }

    pub fn allows(&self, kind: EntityKind) -> bool {
        match self {
            SelectionFilter::All => true,
            SelectionFilter::Kinds(kinds) => kinds.contains(&kind),
        }
    }
}

/// Axis-aligned world-space bounds of an entity
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BoundingVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingVolume {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min: min.min(max), max: min.max(max) }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// All 8 box corners, min corner first
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}

/// Snapshot of a host entity as seen by the selection engine.
/// The engine never owns the entity; a snapshot is only valid for the query it came from.
#[derive(Clone, PartialEq, Debug)]
pub struct SelectableEntity {
    pub id: EntityId,
    pub bounds: BoundingVolume,
    pub kind: EntityKind,
    pub priority: Option<SelectionPriority>,
    pub visible: bool,
    pub selectable: bool,
}

impl SelectableEntity {
    pub fn new(id: impl Into<EntityId>, kind: EntityKind, bounds: BoundingVolume) -> Self {
        Self {
            id: id.into(),
            bounds,
            kind,
            priority: None,
            visible: true,
            selectable: true,
        }
    }

    pub fn with_priority(mut self, priority: SelectionPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn locked(mut self) -> Self {
        self.selectable = false;
        self
    }

    pub fn is_pickable(&self) -> bool {
        self.visible && self.selectable
    }
}

/// One result of the host's ray cast
#[derive(Clone, PartialEq, Debug)]
pub struct RayHit {
    pub entity: SelectableEntity,
    pub distance: f32,
    pub point: Vec3,
}
