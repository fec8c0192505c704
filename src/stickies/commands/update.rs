use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::store::{NoteStore, Storage};

/// Replace a note's text in one shot. Interactive consumers should call
/// `NoteStore::update_text` directly and let the quiet window coalesce
/// per-keystroke edits; a CLI edit is a single committed change.
pub fn run<B: Storage, C: Clock>(
    store: &mut NoteStore<B, C>,
    id: NoteId,
    text: String,
) -> Result<CmdResult> {
    let known = store.get(id).is_some();
    store.update_text(id, text);
    store.flush(id)?;

    let mut result = CmdResult::default().with_notes(store.notes().to_vec());
    if known {
        result.add_message(CmdMessage::success(format!("Note updated ({})", id)));
    } else {
        result.add_message(CmdMessage::warning(format!("No note with id {}", id)));
    }
    Ok(result)
}
