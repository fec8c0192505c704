use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{NoteStore, Storage};

pub fn run<B: Storage, C: Clock>(
    store: &mut NoteStore<B, C>,
    text: Option<String>,
) -> Result<CmdResult> {
    let id = store.create()?.id;

    // A note is born empty; initial text is a regular edit, committed
    // immediately since this is a one-shot command.
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        store.update_text(id, text);
        store.flush(id)?;
    }

    let mut result = CmdResult::default().with_notes(store.notes().to_vec());
    result.add_message(CmdMessage::success(format!("Note created ({})", id)));
    Ok(result)
}
