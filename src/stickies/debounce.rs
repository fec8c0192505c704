//! Per-note edit coalescing.
//!
//! Rapid successive edits to the same note (per-keystroke input) must not each
//! trigger a whole-collection persist. Each note id owns at most one pending
//! edit; scheduling a new one replaces it and restarts the trailing quiet
//! window. Different ids keep independent windows.

use crate::model::NoteId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEdit {
    text: String,
    deadline_ms: i64,
}

/// The set of uncommitted text edits, keyed per note.
#[derive(Debug, Default)]
pub struct PendingEdits {
    slots: HashMap<NoteId, PendingEdit>,
}

impl PendingEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` as the pending edit for `id`, due `window_ms` after `now_ms`.
    /// Replaces any previous pending edit for the same id.
    pub fn schedule(&mut self, id: NoteId, text: String, now_ms: i64, window_ms: i64) {
        self.slots.insert(
            id,
            PendingEdit {
                text,
                deadline_ms: now_ms + window_ms,
            },
        );
    }

    /// Remove and return every edit whose quiet window has elapsed, oldest
    /// deadline first.
    pub fn take_due(&mut self, now_ms: i64) -> Vec<(NoteId, String)> {
        let due_ids: Vec<NoteId> = self
            .slots
            .iter()
            .filter(|(_, edit)| edit.deadline_ms <= now_ms)
            .map(|(id, _)| *id)
            .collect();

        let mut due: Vec<(NoteId, i64, String)> = due_ids
            .into_iter()
            .filter_map(|id| {
                self.slots
                    .remove(&id)
                    .map(|edit| (id, edit.deadline_ms, edit.text))
            })
            .collect();
        due.sort_by_key(|(id, deadline, _)| (*deadline, *id));
        due.into_iter().map(|(id, _, text)| (id, text)).collect()
    }

    /// Remove and return the pending edit for `id`, due or not.
    pub fn take(&mut self, id: NoteId) -> Option<String> {
        self.slots.remove(&id).map(|edit| edit.text)
    }

    /// Drop the pending edit for `id`, if any.
    pub fn cancel(&mut self, id: NoteId) {
        self.slots.remove(&id);
    }

    /// Remove and return all pending edits regardless of deadline.
    pub fn drain(&mut self) -> Vec<(NoteId, String)> {
        let mut all: Vec<(NoteId, i64, String)> = self
            .slots
            .drain()
            .map(|(id, edit)| (id, edit.deadline_ms, edit.text))
            .collect();
        all.sort_by_key(|(id, deadline, _)| (*deadline, *id));
        all.into_iter().map(|(id, _, text)| (id, text)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Earliest deadline among pending edits. A timer-driven consumer uses
    /// this to know when the next `tick` is worth running.
    pub fn next_deadline(&self) -> Option<i64> {
        self.slots.values().map(|edit| edit.deadline_ms).min()
    }
}
