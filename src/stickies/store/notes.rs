use super::Storage;
use crate::clock::Clock;
use crate::debounce::PendingEdits;
use crate::error::Result;
use crate::model::{random_color, Note, NoteId, DEFAULT_PALETTE};

/// The single durable key holding the serialized collection.
pub const NOTES_KEY: &str = "notes";

/// Default trailing quiet window for text edits, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Owns the note collection and mediates every read/write against durable
/// storage.
///
/// The collection is loaded once at [`NoteStore::open`] and persisted
/// wholesale on every committed mutation. Text edits pass through a per-note
/// trailing quiet window: they sit in [`PendingEdits`] until [`tick`]
/// (the timer firing), [`flush`] or [`flush_all`] commits them, at which point
/// the note's `time` is stamped with the commit instant and the collection is
/// written once.
///
/// [`tick`]: NoteStore::tick
/// [`flush`]: NoteStore::flush
/// [`flush_all`]: NoteStore::flush_all
pub struct NoteStore<B: Storage, C: Clock> {
    pub(crate) backend: B,
    clock: C,
    notes: Vec<Note>,
    pending: PendingEdits,
    palette: Vec<String>,
    debounce_ms: i64,
    last_id: i64,
    dirty: bool,
}

impl<B: Storage, C: Clock> NoteStore<B, C> {
    /// Open the store, reading the persisted collection once. A missing,
    /// unreadable or unparseable value degrades silently to an empty
    /// collection; opening never fails.
    pub fn open(backend: B, clock: C) -> Self {
        let notes: Vec<Note> = match backend.read(NOTES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            _ => Vec::new(),
        };
        let last_id = notes.iter().map(|n| n.id.0).max().unwrap_or(0);
        Self {
            backend,
            clock,
            notes,
            pending: PendingEdits::new(),
            palette: DEFAULT_PALETTE.clone(),
            debounce_ms: DEFAULT_DEBOUNCE_MS as i64,
            last_id,
            dirty: false,
        }
    }

    /// Use a custom color palette for new notes. An empty palette is ignored.
    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        if !palette.is_empty() {
            self.palette = palette;
        }
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms as i64;
        self
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// True when a committed change failed to persist and is only in memory.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True while any edit is waiting out its quiet window.
    pub fn has_pending_edits(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Instant (epoch ms) at which the next pending edit becomes due, if any.
    /// Timer-driven consumers schedule their next [`tick`](NoteStore::tick)
    /// call from this.
    pub fn next_commit_at(&self) -> Option<i64> {
        self.pending.next_deadline()
    }

    /// Give the backend back, e.g. to reopen the store over the same data.
    pub fn into_backend(self) -> B {
        self.backend
    }

    // Clock-derived, bumped past the last issued id so a burst of creates
    // within one millisecond still yields unique ids.
    fn next_id(&mut self) -> NoteId {
        let id = self.clock.now_ms().max(self.last_id + 1);
        self.last_id = id;
        NoteId(id)
    }

    /// Create a fresh note (empty text, random palette color, timestamped
    /// now), prepend it and persist. Returns the new note; the full updated
    /// collection is at [`notes`](NoteStore::notes).
    pub fn create(&mut self) -> Result<&Note> {
        let id = self.next_id();
        let color = random_color(&self.palette);
        let note = Note::new(id, color, self.clock.now_ms());
        self.notes.insert(0, note);
        self.persist()?;
        Ok(&self.notes[0])
    }

    /// Schedule a text edit for `id`, to be committed after the quiet window.
    /// Replaces any pending edit for the same note. Unknown ids are a silent
    /// no-op.
    pub fn update_text(&mut self, id: NoteId, text: impl Into<String>) {
        if self.get(id).is_none() {
            return;
        }
        let now = self.clock.now_ms();
        self.pending.schedule(id, text.into(), now, self.debounce_ms);
    }

    /// Commit every pending edit whose quiet window has elapsed. The whole
    /// batch persists as one write.
    pub fn tick(&mut self) -> Result<&[Note]> {
        let now = self.clock.now_ms();
        let due = self.pending.take_due(now);
        self.commit(due)
    }

    /// Commit the pending edit for `id` immediately, skipping the quiet
    /// window. No-op if nothing is pending for it.
    pub fn flush(&mut self, id: NoteId) -> Result<&[Note]> {
        let edits = match self.pending.take(id) {
            Some(text) => vec![(id, text)],
            None => Vec::new(),
        };
        self.commit(edits)
    }

    /// Commit all pending edits immediately.
    pub fn flush_all(&mut self) -> Result<&[Note]> {
        let edits = self.pending.drain();
        self.commit(edits)
    }

    fn commit(&mut self, edits: Vec<(NoteId, String)>) -> Result<&[Note]> {
        let now = self.clock.now_ms();
        let mut changed = false;
        for (id, text) in edits {
            // The note may have been deleted since the edit was scheduled.
            if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
                note.text = text;
                note.time = now;
                changed = true;
            }
        }
        if changed {
            self.persist()?;
        }
        Ok(&self.notes)
    }

    /// Remove the note with `id`, dropping any pending edit for it. Silent
    /// no-op if absent; persists only when something was actually removed.
    pub fn delete(&mut self, id: NoteId) -> Result<&[Note]> {
        self.pending.cancel(id);
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() != before {
            self.persist()?;
        }
        Ok(&self.notes)
    }

    /// Serialize the full collection and replace the durable value wholesale.
    /// On failure the in-memory change is kept and the store stays dirty so
    /// the caller can retry; silent loss of notes is the worst case here.
    pub fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.notes)?;
        match self.backend.write(NOTES_KEY, &raw) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::manual::ManualClock;
    use crate::model::PALETTE;
    use crate::store::memory::MemoryStorage;

    const WINDOW: i64 = DEFAULT_DEBOUNCE_MS as i64;

    fn open_store() -> (NoteStore<MemoryStorage, ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        let store = NoteStore::open(MemoryStorage::new(), clock.clone());
        (store, clock)
    }

    #[test]
    fn open_empty_backend_yields_empty_collection() {
        let (store, _) = open_store();
        assert!(store.notes().is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn open_corrupt_value_degrades_to_empty() {
        let mut backend = MemoryStorage::new();
        backend.seed(NOTES_KEY, "{definitely not an array");
        let store = NoteStore::open(backend, ManualClock::new(0));
        assert!(store.notes().is_empty());
    }

    #[test]
    fn create_prepends_a_fresh_note_and_persists() {
        let (mut store, clock) = open_store();
        store.create().unwrap();
        clock.advance(10);
        let note = store.create().unwrap().clone();

        assert_eq!(store.notes().len(), 2);
        assert_eq!(store.notes()[0], note);
        assert_eq!(note.text, "");
        assert!(PALETTE.contains(&note.color.as_str()));
        assert_eq!(store.backend.write_count(), 2);
    }

    #[test]
    fn ids_are_unique_even_with_a_frozen_clock() {
        let (mut store, _) = open_store();
        for _ in 0..5 {
            store.create().unwrap();
        }
        let mut ids: Vec<i64> = store.notes().iter().map(|n| n.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn ids_stay_unique_across_reopen() {
        let (mut store, clock) = open_store();
        store.create().unwrap();
        let first_id = store.notes()[0].id;

        // Reopen with a clock behind the highest persisted id.
        clock.set(0);
        let mut store = NoteStore::open(store.into_backend(), clock);
        store.create().unwrap();
        assert_ne!(store.notes()[0].id, first_id);
        assert!(store.notes()[0].id > first_id);
    }

    #[test]
    fn round_trip_preserves_content_exactly() {
        let (mut store, clock) = open_store();
        let id_a = store.create().unwrap().id;
        clock.advance(5);
        let id_b = store.create().unwrap().id;
        store.update_text(id_a, "alpha");
        store.flush(id_a).unwrap();
        store.update_text(id_b, "beta");
        store.flush(id_b).unwrap();
        let expected = store.notes().to_vec();

        let reopened = NoteStore::open(store.into_backend(), ManualClock::new(0));
        assert_eq!(reopened.notes(), expected.as_slice());
    }

    #[test]
    fn update_text_unknown_id_is_a_silent_noop() {
        let (mut store, clock) = open_store();
        store.create().unwrap();
        let writes_before = store.backend.write_count();

        store.update_text(NoteId(42), "ghost");
        assert!(!store.has_pending_edits());
        clock.advance(WINDOW + 1);
        store.tick().unwrap();
        assert_eq!(store.backend.write_count(), writes_before);
    }

    #[test]
    fn burst_of_edits_persists_exactly_once_with_last_value() {
        let (mut store, clock) = open_store();
        let id = store.create().unwrap().id;
        let writes_after_create = store.backend.write_count();

        store.update_text(id, "a");
        clock.advance(100);
        store.update_text(id, "ab");

        // Quiet window has not elapsed since the last edit.
        clock.advance(WINDOW - 1);
        store.tick().unwrap();
        assert_eq!(store.backend.write_count(), writes_after_create);
        assert_eq!(store.get(id).unwrap().text, "");

        clock.advance(1);
        store.tick().unwrap();
        assert_eq!(store.backend.write_count(), writes_after_create + 1);
        assert_eq!(store.get(id).unwrap().text, "ab");
    }

    #[test]
    fn commit_stamps_time_with_the_commit_instant() {
        let (mut store, clock) = open_store();
        let id = store.create().unwrap().id;

        store.update_text(id, "hello");
        clock.advance(WINDOW + 250);
        let commit_instant = clock.now_ms();
        store.tick().unwrap();

        assert_eq!(store.get(id).unwrap().time, commit_instant);
    }

    #[test]
    fn two_notes_keep_independent_windows() {
        let (mut store, clock) = open_store();
        let id_b = store.create().unwrap().id;
        let id_a = store.create().unwrap().id;

        store.update_text(id_a, "first");
        clock.advance(300);
        store.update_text(id_b, "second");

        clock.advance(WINDOW - 300);
        store.tick().unwrap();
        assert_eq!(store.get(id_a).unwrap().text, "first");
        assert_eq!(store.get(id_b).unwrap().text, "");

        clock.advance(300);
        store.tick().unwrap();
        assert_eq!(store.get(id_b).unwrap().text, "second");
    }

    #[test]
    fn flush_commits_before_the_window_elapses() {
        let (mut store, _) = open_store();
        let id = store.create().unwrap().id;
        store.update_text(id, "eager");
        store.flush(id).unwrap();
        assert_eq!(store.get(id).unwrap().text, "eager");
        assert!(!store.has_pending_edits());
    }

    #[test]
    fn flush_all_commits_everything_in_one_write() {
        let (mut store, _) = open_store();
        let id_b = store.create().unwrap().id;
        let id_a = store.create().unwrap().id;
        let writes_before = store.backend.write_count();

        store.update_text(id_a, "one");
        store.update_text(id_b, "two");
        store.flush_all().unwrap();

        assert_eq!(store.backend.write_count(), writes_before + 1);
        assert_eq!(store.get(id_a).unwrap().text, "one");
        assert_eq!(store.get(id_b).unwrap().text, "two");
    }

    #[test]
    fn delete_removes_exactly_the_matching_note() {
        let (mut store, clock) = open_store();
        let id_b = store.create().unwrap().id;
        clock.advance(7);
        let id_a = store.create().unwrap().id;
        let kept = store.get(id_b).unwrap().clone();

        store.delete(id_a).unwrap();
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.notes()[0], kept);
    }

    #[test]
    fn delete_absent_id_is_a_noop_without_a_write() {
        let (mut store, _) = open_store();
        store.create().unwrap();
        let writes_before = store.backend.write_count();
        store.delete(NoteId(99)).unwrap();
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.backend.write_count(), writes_before);
    }

    #[test]
    fn delete_cancels_a_pending_edit() {
        let (mut store, clock) = open_store();
        let id = store.create().unwrap().id;
        store.update_text(id, "doomed");
        store.delete(id).unwrap();

        clock.advance(WINDOW + 1);
        let writes_before = store.backend.write_count();
        store.tick().unwrap();
        assert!(store.notes().is_empty());
        assert_eq!(store.backend.write_count(), writes_before);
    }

    #[test]
    fn next_commit_at_tracks_the_earliest_pending_edit() {
        let (mut store, clock) = open_store();
        let id = store.create().unwrap().id;
        assert_eq!(store.next_commit_at(), None);

        store.update_text(id, "x");
        assert_eq!(store.next_commit_at(), Some(clock.now_ms() + WINDOW));
    }

    #[test]
    fn persist_failure_keeps_the_change_and_allows_retry() {
        let clock = ManualClock::new(1_000_000);
        let mut store = NoteStore::open(MemoryStorage::with_quota(0), clock);

        assert!(store.create().is_err());
        // The edit survives in memory; the durability gap is observable.
        assert_eq!(store.notes().len(), 1);
        assert!(store.is_dirty());

        store.backend.set_quota(None);
        store.persist().unwrap();
        assert!(!store.is_dirty());
        assert!(store.backend.raw(NOTES_KEY).is_some());
    }

    #[test]
    fn scenario_empty_store_create_edit_delete() {
        let (mut store, clock) = open_store();
        assert!(store.notes().is_empty());

        let id = store.create().unwrap().id;
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.notes()[0].text, "");

        store.update_text(id, "hello");
        clock.advance(WINDOW);
        store.tick().unwrap();
        assert_eq!(store.get(id).unwrap().text, "hello");

        store.delete(id).unwrap();
        assert!(store.notes().is_empty());
        assert_eq!(store.backend.raw(NOTES_KEY), Some("[]"));
    }
}
