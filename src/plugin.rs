//! Bevy integration
//!
//! Inserts a [`SelectionEngine`] resource and mirrors every engine event into the
//! `Events<SelectionEvent>` queue once per frame, so systems can use `EventReader`.

use bevy::prelude::*;
use std::sync::{Arc, Mutex, PoisonError};

use crate::selection::{SelectionConfig, SelectionEngine, SelectionEvent};

#[derive(Default)]
pub struct SelectionEnginePlugin {
    pub config: SelectionConfig,
}

/// Events emitted by the engine since the last forward
#[derive(Resource, Clone, Default)]
pub struct PendingSelectionEvents(Arc<Mutex<Vec<SelectionEvent>>>);

impl PendingSelectionEvents {
    fn push(&self, event: SelectionEvent) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }

    fn drain(&self) -> Vec<SelectionEvent> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Plugin for SelectionEnginePlugin {
    fn build(&self, app: &mut App) {
        let pending = PendingSelectionEvents::default();
        let sink = pending.clone();

        let mut engine = SelectionEngine::new(self.config.clone());
        engine.on_any(move |event| sink.push(event.clone()));

        app.add_event::<SelectionEvent>()
            .insert_resource(engine)
            .insert_resource(pending)
            .add_systems(Update, forward_selection_events);
    }
}

/// System: Forward queued engine events into Bevy's event queue, in emission order
pub fn forward_selection_events(
    pending: Res<PendingSelectionEvents>,
    mut writer: EventWriter<SelectionEvent>,
) {
    let events = pending.drain();
    if events.is_empty() {
        return;
    }
    debug!("Forwarding {} selection events", events.len());
    for event in events {
        writer.write(event);
    }
}
