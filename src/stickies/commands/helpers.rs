use crate::clock::Clock;
use crate::error::{NotesError, Result};
use crate::model::NoteId;
use crate::store::{NoteStore, Storage};

/// Resolve a 1-based list position (newest first) to a note id.
pub fn resolve_position<B: Storage, C: Clock>(
    store: &NoteStore<B, C>,
    position: usize,
) -> Result<NoteId> {
    position
        .checked_sub(1)
        .and_then(|i| store.notes().get(i))
        .map(|n| n.id)
        .ok_or_else(|| NotesError::Api(format!("No note at position {}", position)))
}
