//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer: the single entry
//! point for all stickies operations, regardless of the UI being used.
//!
//! It dispatches to command functions, normalizes inputs (1-based list
//! positions become note ids) and returns structured types
//! (`Result<CmdResult>`). Business logic belongs in `commands/*.rs`; terminal
//! formatting belongs to the binary. Generic over [`Storage`] and [`Clock`] so
//! the whole stack runs against `MemoryStorage` and a manual clock in tests.

use crate::clock::Clock;
use crate::commands;
use crate::error::Result;
use crate::model::{Note, NoteId};
use crate::store::{NoteStore, Storage};
use std::path::PathBuf;

pub struct NotesApi<B: Storage, C: Clock> {
    store: NoteStore<B, C>,
    config_dir: PathBuf,
}

impl<B: Storage, C: Clock> NotesApi<B, C> {
    pub fn new(store: NoteStore<B, C>, config_dir: PathBuf) -> Self {
        Self { store, config_dir }
    }

    pub fn create_note(&mut self, text: Option<String>) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, text)
    }

    pub fn list_notes(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn update_note(&mut self, id: NoteId, text: String) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, text)
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    /// Map a 1-based list position (newest first) to a stable note id.
    pub fn resolve_position(&self, position: usize) -> Result<NoteId> {
        commands::helpers::resolve_position(&self.store, position)
    }

    pub fn get_note(&self, id: NoteId) -> Option<Note> {
        self.store.get(id).cloned()
    }

    /// Schedule a debounced text edit; interactive consumers pair this with
    /// [`tick`](NotesApi::tick) driven off
    /// [`next_commit_at`](NotesApi::next_commit_at).
    pub fn edit_text(&mut self, id: NoteId, text: impl Into<String>) {
        self.store.update_text(id, text);
    }

    /// Commit pending edits whose quiet window has elapsed.
    pub fn tick(&mut self) -> Result<()> {
        self.store.tick().map(|_| ())
    }

    /// Commit all pending edits immediately, e.g. on shutdown.
    pub fn flush_all(&mut self) -> Result<()> {
        self.store.flush_all().map(|_| ())
    }

    pub fn next_commit_at(&self) -> Option<i64> {
        self.store.next_commit_at()
    }

    /// True when a committed change could not be persisted; pair with
    /// [`persist`](NotesApi::persist) to retry.
    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn persist(&mut self) -> Result<()> {
        self.store.persist()
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
