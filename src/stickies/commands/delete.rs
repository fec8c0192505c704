use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::store::{NoteStore, Storage};

pub fn run<B: Storage, C: Clock>(store: &mut NoteStore<B, C>, id: NoteId) -> Result<CmdResult> {
    let known = store.get(id).is_some();
    store.delete(id)?;

    let mut result = CmdResult::default().with_notes(store.notes().to_vec());
    if known {
        result.add_message(CmdMessage::success(format!("Note deleted ({})", id)));
    } else {
        result.add_message(CmdMessage::warning(format!("No note with id {}", id)));
    }
    Ok(result)
}
