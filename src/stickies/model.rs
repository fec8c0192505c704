use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed color palette new notes draw from.
pub const PALETTE: [&str; 5] = ["#f87171", "#fbbf24", "#34d399", "#60a5fa", "#a78bfa"];

/// [`PALETTE`] as owned strings, for config defaults and the store.
pub static DEFAULT_PALETTE: Lazy<Vec<String>> =
    Lazy::new(|| PALETTE.iter().map(|c| c.to_string()).collect());

/// How many characters of text the list preview shows.
const PREVIEW_LEN: usize = 30;

/// Clock-derived integer id (epoch milliseconds at creation, bumped past the
/// previously issued id on collision). Never reused, immutable for the note's
/// lifetime. Serializes as a bare JSON number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single sticky note. Wire format is the flat JSON object
/// `{"id":number,"text":string,"color":string,"time":number}` with no schema
/// version field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    /// Presentation tag, picked once at creation. Immutable.
    pub color: String,
    /// Last-modified instant in epoch milliseconds. Display-only.
    pub time: i64,
}

impl Note {
    /// A fresh, unwritten note: empty text, timestamped now.
    pub fn new(id: NoteId, color: String, now_ms: i64) -> Self {
        Self {
            id,
            text: String::new(),
            color,
            time: now_ms,
        }
    }

    /// Short single-line preview for list views, matching the sidebar rule:
    /// first 30 characters, newlines flattened, "Empty note" when blank.
    pub fn preview(&self) -> String {
        if self.text.is_empty() {
            return "Empty note".to_string();
        }
        self.text
            .chars()
            .take(PREVIEW_LEN)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect()
    }
}

/// Pick a color uniformly at random from `palette`, falling back to the first
/// built-in color if the configured palette is empty.
pub fn random_color(palette: &[String]) -> String {
    palette
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_else(|| PALETTE[0].to_string())
}

/// Parse a `#rrggbb` color tag into RGB components for terminal swatches.
pub fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
