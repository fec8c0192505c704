use crate::clock::Clock;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{NoteStore, Storage};

pub fn run<B: Storage, C: Clock>(store: &NoteStore<B, C>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_notes(store.notes().to_vec()))
}
