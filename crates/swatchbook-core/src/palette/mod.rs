//! Palette data model: an ordered sequence of color entries.

pub mod codec;

use crate::color::{HexColor, Ink};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use codec::{decode, encode, share_path, token_from_path, SHARE_PATH_PREFIX};

/// Minimum number of entries in a palette.
pub const MIN_COLORS: usize = 2;
/// Maximum number of entries in a palette.
pub const MAX_COLORS: usize = 8;
/// Number of entries in a freshly generated palette.
pub const DEFAULT_PALETTE_SIZE: usize = 5;

/// Unique identifier for a palette entry.
pub type EntryId = Uuid;

/// One color slot in a palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub(crate) id: EntryId,
    pub hex: HexColor,
    pub locked: bool,
}

impl ColorEntry {
    /// Create an unlocked entry with a fresh ID.
    pub fn new(hex: HexColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            hex,
            locked: false,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Ink to draw labels and icons over this entry.
    pub fn ink(&self) -> Ink {
        Ink::for_background(self.hex)
    }

    pub(crate) fn with_hex(&self, hex: HexColor) -> Self {
        Self {
            hex,
            ..self.clone()
        }
    }
}

/// An ordered sequence of entries. Order maps to left-to-right position.
///
/// Snapshots are cheap to clone and never shared mutably: every engine
/// operation builds a new `Palette` from the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<ColorEntry>,
}

impl Palette {
    /// Build a palette of fresh unlocked entries.
    pub fn from_colors(colors: impl IntoIterator<Item = HexColor>) -> Self {
        Self {
            entries: colors.into_iter().map(ColorEntry::new).collect(),
        }
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&ColorEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn colors(&self) -> impl Iterator<Item = HexColor> + '_ {
        self.entries.iter().map(|e| e.hex)
    }

    /// The URL token for this palette.
    pub fn token(&self) -> String {
        encode(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Copy of this palette with each entry passed through `f`.
    pub(crate) fn map_entries(&self, f: impl FnMut(&ColorEntry) -> ColorEntry) -> Self {
        Self {
            entries: self.entries.iter().map(f).collect(),
        }
    }

    /// Copy of this palette with the entry at `from` moved to `to`.
    pub(crate) fn moved(&self, from: usize, to: usize) -> Self {
        let mut entries = self.entries.clone();
        let entry = entries.remove(from);
        entries.insert(to, entry);
        Self { entries }
    }

    /// Copy of this palette with `entry` inserted at `index`.
    pub(crate) fn inserted(&self, index: usize, entry: ColorEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(index.min(entries.len()), entry);
        Self { entries }
    }

    /// Copy of this palette without the entry at `index`.
    pub(crate) fn removed(&self, index: usize) -> Self {
        let mut entries = self.entries.clone();
        entries.remove(index);
        Self { entries }
    }
}
