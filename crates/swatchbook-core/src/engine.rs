//! Palette state engine.
//!
//! Owns the current [`Palette`] and its undo/redo [`History`]. Every palette
//! change goes through one commit path, which also mirrors the palette into
//! the shareable location.

use crate::color::{average_hex, normalize_hex, HexColor};
use crate::config::EngineConfig;
use crate::generator::{ColorGenerator, RandomColorGenerator};
use crate::history::History;
use crate::input::{resolve_shortcut, Focus, KeyPress, Platform, ShortcutAction};
use crate::palette::codec::decode_bounded;
use crate::palette::{encode, share_path, ColorEntry, EntryId, Palette};
use crate::platform::Host;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Transient "copied" marker for one entry.
#[derive(Debug, Clone, Copy)]
struct CopiedIndicator {
    id: EntryId,
    until: Instant,
}

/// The palette plus its history and collaborators.
#[derive(Debug)]
pub struct PaletteEngine<G = RandomColorGenerator> {
    palette: Palette,
    history: History<Palette>,
    generator: G,
    config: EngineConfig,
    host: Host,
    /// Whether anything has been committed since the last initialization.
    has_committed: bool,
    copied: Option<CopiedIndicator>,
    /// Bumped on every palette change, for front ends that poll.
    revision: u64,
}

impl<G: ColorGenerator> PaletteEngine<G> {
    /// Create an engine, initializing from the host location if it carries
    /// a usable token.
    ///
    /// An inconsistent config is logged and replaced with the defaults.
    pub fn new(config: EngineConfig, generator: G, host: Host) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::error!("Invalid engine config, using defaults: {}", e);
                EngineConfig::default()
            }
        };
        let token = host.location.read_location_param();
        let mut engine = Self {
            palette: Palette::default(),
            history: History::new(config.max_history),
            generator,
            config,
            host,
            has_committed: false,
            copied: None,
            revision: 0,
        };
        engine.load_token(token.as_deref());
        engine
    }

    /// (Re)initialize from a URL token, falling back to a fresh generated
    /// palette when it has too few valid colors. History is reset.
    pub fn load_token(&mut self, token: Option<&str>) {
        let colors = token
            .map(|t| decode_bounded(t, self.config.min_colors, self.config.max_colors))
            .unwrap_or_default();

        self.palette = if colors.is_empty() {
            log::info!(
                "Generating default palette of {} colors",
                self.config.default_palette_size
            );
            let generator = &mut self.generator;
            Palette::from_colors((0..self.config.default_palette_size).map(|_| generator.generate()))
        } else {
            log::info!("Loaded palette of {} colors from URL", colors.len());
            Palette::from_colors(colors)
        };

        self.history.clear();
        self.has_committed = false;
        self.copied = None;
        self.revision += 1;
        self.mirror_location();
    }

    /// Replace the current palette, optionally recording the previous one
    /// as an undo point.
    fn commit(&mut self, next: Palette, record_history: bool) {
        let previous = std::mem::replace(&mut self.palette, next);
        if record_history {
            self.history.record(previous);
        }
        self.has_committed = true;
        self.revision += 1;
        log::debug!(
            "Committed palette {} (history: {} back, {} forward)",
            encode(&self.palette),
            self.history.past_len(),
            self.history.future_len()
        );
        self.mirror_location();
    }

    fn mirror_location(&mut self) {
        let path = share_path(&encode(&self.palette));
        if let Err(e) = self.host.location.replace_location(&path) {
            log::warn!("Failed to update location: {}", e);
        }
    }

    /// Regenerate every unlocked entry. Returns false when nothing changed,
    /// such as when every entry is locked.
    pub fn generate(&mut self) -> bool {
        let generator = &mut self.generator;
        let next = self.palette.map_entries(|entry| {
            if entry.locked {
                entry.clone()
            } else {
                entry.with_hex(generator.generate())
            }
        });

        if next == self.palette {
            log::debug!("Generate produced an identical palette");
            return false;
        }
        self.commit(next, true);
        true
    }

    /// Flip the lock on an entry.
    ///
    /// The first toggle after initialization is not undoable.
    pub fn toggle_lock(&mut self, id: EntryId) -> bool {
        if self.palette.get(id).is_none() {
            return false;
        }
        let next = self.palette.map_entries(|entry| {
            if entry.id == id {
                ColorEntry {
                    locked: !entry.locked,
                    ..entry.clone()
                }
            } else {
                entry.clone()
            }
        });
        let record = self.has_committed;
        self.commit(next, record);
        true
    }

    /// Move `active_id` to the position of `over_id`, shifting the entries
    /// in between.
    pub fn reorder(&mut self, active_id: EntryId, over_id: Option<EntryId>) -> bool {
        let Some(over_id) = over_id else {
            return false;
        };
        if over_id == active_id {
            return false;
        }
        let (Some(from), Some(to)) = (self.palette.position(active_id), self.palette.position(over_id))
        else {
            return false;
        };
        let next = self.palette.moved(from, to);
        self.commit(next, true);
        true
    }

    /// Insert `entry` right after position `after_index`, which must name an
    /// existing entry.
    pub fn insert(&mut self, after_index: usize, entry: ColorEntry) -> bool {
        if after_index >= self.palette.len() {
            log::debug!("Insert rejected: no entry at position {}", after_index);
            return false;
        }
        if self.palette.len() >= self.config.max_colors {
            log::debug!("Insert rejected: palette already has {} colors", self.palette.len());
            return false;
        }
        if self.palette.get(entry.id).is_some() {
            return false;
        }
        let next = self.palette.inserted(after_index + 1, entry);
        self.commit(next, true);
        true
    }

    /// Insert a new entry after `after_index` whose color is the average of
    /// its neighbours (or a copy of the last color at the end).
    pub fn insert_between(&mut self, after_index: usize) -> Option<EntryId> {
        let entries = self.palette.entries();
        let left = entries.get(after_index)?.hex;
        let hex = match entries.get(after_index + 1) {
            Some(right) => average_hex(left, right.hex),
            None => left,
        };
        let entry = ColorEntry::new(hex);
        let id = entry.id();
        self.insert(after_index, entry).then_some(id)
    }

    /// Remove an entry unless that would go below the minimum size.
    pub fn remove(&mut self, id: EntryId) -> bool {
        if self.palette.len() <= self.config.min_colors {
            log::debug!("Remove rejected: palette at minimum size");
            return false;
        }
        let Some(index) = self.palette.position(id) else {
            return false;
        };
        let next = self.palette.removed(index);
        self.commit(next, true);
        true
    }

    /// Set an entry's color from (possibly partial) hex text.
    pub fn update_entry_hex(&mut self, id: EntryId, hex: &str) -> bool {
        self.set_entry_color(id, normalize_hex(hex))
    }

    /// Set an entry's color. Setting the same color is a no-op.
    pub fn set_entry_color(&mut self, id: EntryId, color: HexColor) -> bool {
        match self.palette.get(id) {
            Some(entry) if entry.hex != color => {}
            _ => return false,
        }
        let next = self
            .palette
            .map_entries(|entry| if entry.id == id { entry.with_hex(color) } else { entry.clone() });
        self.commit(next, true);
        true
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = std::mem::take(&mut self.palette);
        match self.history.undo(current) {
            Ok(previous) => {
                self.palette = previous;
                self.revision += 1;
                log::debug!("Undo performed");
                self.mirror_location();
                true
            }
            Err(current) => {
                self.palette = current;
                false
            }
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = std::mem::take(&mut self.palette);
        match self.history.redo(current) {
            Ok(next) => {
                self.palette = next;
                self.revision += 1;
                log::debug!("Redo performed");
                self.mirror_location();
                true
            }
            Err(current) => {
                self.palette = current;
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Copy a hex value (without `#`) to the clipboard and raise the copied
    /// indicator for `id`. Clipboard failures are logged and ignored.
    pub fn copy(&mut self, id: EntryId, hex: &str) {
        let text = hex.trim_start_matches('#');
        if let Err(e) = self.host.clipboard.write_text(text) {
            log::warn!("Failed to copy {} to clipboard: {}", text, e);
        }
        self.copied = Some(CopiedIndicator {
            id,
            until: Instant::now() + self.config.copied_indicator(),
        });
    }

    /// Copy an entry's current color.
    pub fn copy_entry(&mut self, id: EntryId) -> bool {
        let Some(hex) = self.palette.get(id).map(|e| e.hex.to_bare()) else {
            return false;
        };
        self.copy(id, &hex);
        true
    }

    /// Entry whose copied indicator is still showing.
    pub fn copied_id(&self) -> Option<EntryId> {
        self.copied
            .filter(|c| Instant::now() < c.until)
            .map(|c| c.id)
    }

    pub fn is_copied(&self, id: EntryId) -> bool {
        self.copied_id() == Some(id)
    }

    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::Generate => self.generate(),
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
        }
    }

    /// Resolve and run a palette shortcut. Returns the action when the key
    /// was bound, so the host can suppress its default handling.
    pub fn handle_key(&mut self, key: &KeyPress, platform: Platform, focus: Focus) -> Option<ShortcutAction> {
        let action = resolve_shortcut(key, platform, focus)?;
        self.apply_shortcut(action);
        Some(action)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current URL token.
    pub fn token(&self) -> String {
        encode(&self.palette)
    }

    /// Current shareable path.
    pub fn share_path(&self) -> String {
        share_path(&self.token())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryClipboard, MemoryLocation};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Generator yielding distinct grays and counting calls.
    struct Sequence {
        next: u8,
        calls: Rc<Cell<usize>>,
    }

    impl ColorGenerator for Sequence {
        fn generate(&mut self) -> HexColor {
            self.calls.set(self.calls.get() + 1);
            self.next = self.next.wrapping_add(1);
            HexColor::from_rgb(self.next, self.next, self.next)
        }
    }

    struct Fixture {
        engine: PaletteEngine<Sequence>,
        location: MemoryLocation,
        clipboard: MemoryClipboard,
        calls: Rc<Cell<usize>>,
    }

    fn fixture_with(path: &str, config: EngineConfig, clipboard: MemoryClipboard) -> Fixture {
        let location = MemoryLocation::with_path(path);
        let calls = Rc::new(Cell::new(0));
        let generator = Sequence {
            next: 0,
            calls: calls.clone(),
        };
        let engine = PaletteEngine::new(
            config,
            generator,
            Host::new(clipboard.clone(), location.clone()),
        );
        Fixture {
            engine,
            location,
            clipboard,
            calls,
        }
    }

    fn fixture(path: &str) -> Fixture {
        fixture_with(path, EngineConfig::default(), MemoryClipboard::new())
    }

    fn ids(engine: &PaletteEngine<Sequence>) -> Vec<EntryId> {
        engine.palette().entries().iter().map(|e| e.id()).collect()
    }

    fn urls(engine: &PaletteEngine<Sequence>) -> Vec<String> {
        engine.palette().colors().map(|c| c.to_url()).collect()
    }

    #[test]
    fn test_init_from_url_token() {
        let f = fixture("/colorpalettegenerator/778899-889977-fefefe");
        assert_eq!(urls(&f.engine), vec!["778899", "889977", "fefefe"]);
        assert!(f.engine.palette().entries().iter().all(|e| !e.locked));
        assert!(!f.engine.can_undo());
        assert!(!f.engine.can_redo());
        assert_eq!(f.calls.get(), 0);
    }

    #[test]
    fn test_init_falls_back_to_generated() {
        let f = fixture("/colorpalettegenerator/zz0000-112233");
        assert_eq!(f.engine.palette().len(), 5);
        assert_eq!(f.calls.get(), 5);
        assert!(!f.engine.can_undo());
        // Location now mirrors the generated palette
        assert_eq!(f.location.path(), f.engine.share_path());
    }

    #[test]
    fn test_init_without_token() {
        let f = fixture("");
        assert_eq!(f.engine.palette().len(), 5);
    }

    #[test]
    fn test_generate_skips_locked_entries() {
        let mut f = fixture("/colorpalettegenerator/aaaaaa-bbbbbb-cccccc");
        let a = ids(&f.engine)[0];
        f.engine.toggle_lock(a);
        let before = f.engine.palette().clone();

        assert!(f.engine.generate());
        assert_eq!(f.calls.get(), 2);

        let after = f.engine.palette().entries();
        assert_eq!(after[0], before.entries()[0]);
        assert_ne!(after[1].hex, before.entries()[1].hex);
        assert_ne!(after[2].hex, before.entries()[2].hex);
        assert_eq!(after[1].id(), before.entries()[1].id());
        assert!(f.engine.can_undo());

        assert!(f.engine.undo());
        assert_eq!(f.engine.palette(), &before);
    }

    #[test]
    fn test_generate_all_locked_is_noop() {
        let mut f = fixture("/colorpalettegenerator/aaaaaa-bbbbbb");
        for id in ids(&f.engine) {
            f.engine.toggle_lock(id);
        }
        let past = f.engine.history.past_len();
        let revision = f.engine.revision();

        assert!(!f.engine.generate());
        assert_eq!(f.engine.history.past_len(), past);
        assert_eq!(f.engine.revision(), revision);
    }

    #[test]
    fn test_first_lock_toggle_not_undoable() {
        let mut f = fixture("/colorpalettegenerator/aaaaaa-bbbbbb");
        let a = ids(&f.engine)[0];

        assert!(f.engine.toggle_lock(a));
        assert!(f.engine.palette().entries()[0].locked);
        assert!(!f.engine.can_undo());

        assert!(f.engine.toggle_lock(a));
        assert!(f.engine.can_undo());
        assert!(f.engine.undo());
        assert!(f.engine.palette().entries()[0].locked);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut f = fixture("/colorpalettegenerator/aaaaaa-bbbbbb");
        assert!(!f.engine.toggle_lock(uuid::Uuid::new_v4()));
    }

    #[test]
    fn test_reorder() {
        let mut f = fixture("/colorpalettegenerator/111111-222222-333333-444444");
        let before = ids(&f.engine);

        assert!(!f.engine.reorder(before[0], None));
        assert!(!f.engine.reorder(before[0], Some(before[0])));
        assert!(!f.engine.reorder(before[0], Some(uuid::Uuid::new_v4())));
        assert!(!f.engine.can_undo());

        assert!(f.engine.reorder(before[0], Some(before[2])));
        assert_eq!(ids(&f.engine), vec![before[1], before[2], before[0], before[3]]);
        assert_eq!(urls(&f.engine), vec!["222222", "333333", "111111", "444444"]);

        assert!(f.engine.reorder(before[3], Some(before[1])));
        assert_eq!(ids(&f.engine), vec![before[3], before[1], before[2], before[0]]);
    }

    #[test]
    fn test_remove_at_minimum_is_noop() {
        let mut f = fixture("/colorpalettegenerator/aaaaaa-bbbbbb");
        let id = ids(&f.engine)[1];
        assert!(!f.engine.remove(id));
        assert_eq!(f.engine.palette().len(), 2);
        assert!(!f.engine.can_undo());
    }

    #[test]
    fn test_insert_and_remove_stay_in_bounds() {
        let mut f = fixture("/colorpalettegenerator/000000-ffffff");
        for step in 0..12 {
            f.engine.insert_between(0);
            let len = f.engine.palette().len();
            assert!((2..=8).contains(&len), "step {step}: {len}");
        }
        assert_eq!(f.engine.palette().len(), 8);
        assert!(!f.engine.insert(0, ColorEntry::new(HexColor::WHITE)));

        for step in 0..12 {
            let first = ids(&f.engine)[0];
            f.engine.remove(first);
            let len = f.engine.palette().len();
            assert!((2..=8).contains(&len), "step {step}: {len}");
        }
        assert_eq!(f.engine.palette().len(), 2);
    }

    #[test]
    fn test_insert_between_averages_neighbours() {
        let mut f = fixture("/colorpalettegenerator/000000-ffffff");
        let id = f.engine.insert_between(0).unwrap();
        assert_eq!(urls(&f.engine), vec!["000000", "808080", "ffffff"]);
        assert_eq!(f.engine.palette().position(id), Some(1));

        // At the end the last color is duplicated
        f.engine.insert_between(2).unwrap();
        assert_eq!(urls(&f.engine), vec!["000000", "808080", "ffffff", "ffffff"]);

        assert_eq!(f.engine.insert_between(10), None);
    }

    #[test]
    fn test_insert_out_of_range_is_noop() {
        let mut f = fixture("/colorpalettegenerator/000000-ffffff");
        let before = f.engine.palette().clone();

        assert!(!f.engine.insert(2, ColorEntry::new(HexColor::WHITE)));
        assert!(!f.engine.insert(usize::MAX, ColorEntry::new(HexColor::WHITE)));
        assert_eq!(f.engine.palette(), &before);
        assert!(!f.engine.can_undo());

        assert!(f.engine.insert(1, ColorEntry::new(HexColor::BLACK)));
        assert_eq!(urls(&f.engine), vec!["000000", "ffffff", "000000"]);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let config = EngineConfig {
            default_palette_size: 0,
            ..Default::default()
        };
        let mut f = fixture_with("", config, MemoryClipboard::new());
        assert_eq!(f.engine.config(), &EngineConfig::default());
        assert_eq!(f.engine.palette().len(), 5);

        let first = ids(&f.engine)[0];
        assert!(f.engine.remove(first));
        assert!(f.engine.insert_between(0).is_some());
    }

    #[test]
    fn test_structural_undo_redo_restore_exact_snapshots() {
        let mut f = fixture("/colorpalettegenerator/111111-222222-333333");
        let a = ids(&f.engine)[0];
        f.engine.toggle_lock(a);
        f.engine.toggle_lock(ids(&f.engine)[2]);
        let s0 = f.engine.palette().clone();

        assert!(f.engine.insert(0, ColorEntry::new(HexColor::WHITE)));
        let s1 = f.engine.palette().clone();
        assert!(f.engine.reorder(ids(&f.engine)[3], Some(a)));
        let s2 = f.engine.palette().clone();
        assert!(f.engine.remove(a));
        let s3 = f.engine.palette().clone();

        for expected in [&s2, &s1, &s0] {
            assert!(f.engine.undo());
            assert_eq!(f.engine.palette(), expected);
        }
        for expected in [&s1, &s2, &s3] {
            assert!(f.engine.redo());
            assert_eq!(f.engine.palette(), expected);
        }
        assert!(!f.engine.can_redo());
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut f = fixture("/colorpalettegenerator/000000-ffffff");
        let existing = f.engine.palette().entries()[0].clone();
        assert!(!f.engine.insert(0, existing));
    }

    #[test]
    fn test_update_entry_hex_normalizes() {
        let mut f = fixture("/colorpalettegenerator/000000-ffffff");
        let id = ids(&f.engine)[0];

        assert!(f.engine.update_entry_hex(id, "#3f"));
        assert_eq!(f.engine.palette().entries()[0].hex.to_bare(), "3F0000");
        assert!(f.engine.can_undo());

        // Same color again records nothing
        assert!(!f.engine.update_entry_hex(id, "3F0000"));
        assert_eq!(f.engine.history.past_len(), 1);
    }

    #[test]
    fn test_undo_redo_duality() {
        let mut f = fixture("/colorpalettegenerator/111111-222222-333333");
        let s = f.engine.palette().clone();
        let first = ids(&f.engine)[0];

        f.engine.update_entry_hex(first, "abcdef");
        let s_prime = f.engine.palette().clone();

        assert!(f.engine.undo());
        assert_eq!(f.engine.palette(), &s);
        assert!(f.engine.can_redo());

        assert!(f.engine.redo());
        assert_eq!(f.engine.palette(), &s_prime);
        assert!(!f.engine.can_redo());

        assert!(f.engine.undo());
        assert!(f.engine.generate());
        assert!(!f.engine.can_redo());
    }

    #[test]
    fn test_undo_redo_empty() {
        let mut f = fixture("/colorpalettegenerator/111111-222222");
        let before = f.engine.palette().clone();
        assert!(!f.engine.undo());
        assert!(!f.engine.redo());
        assert_eq!(f.engine.palette(), &before);
    }

    #[test]
    fn test_location_mirrors_every_change() {
        let mut f = fixture("/colorpalettegenerator/111111-222222");
        let initial = f.location.replacements();

        let id = ids(&f.engine)[0];
        f.engine.update_entry_hex(id, "abcdef");
        assert_eq!(f.location.path(), "/colorpalettegenerator/abcdef-222222");

        f.engine.undo();
        assert_eq!(f.location.path(), "/colorpalettegenerator/111111-222222");
        assert_eq!(f.location.replacements(), initial + 2);

        // Rejected operations leave the location alone
        f.engine.remove(id);
        assert_eq!(f.location.replacements(), initial + 2);
    }

    #[test]
    fn test_load_token_resets_history() {
        let mut f = fixture("/colorpalettegenerator/111111-222222");
        f.engine.generate();
        assert!(f.engine.can_undo());

        f.engine.load_token(Some("abcdef-fedcba-123456"));
        assert!(!f.engine.can_undo());
        assert!(!f.engine.can_redo());
        assert_eq!(f.engine.token(), "abcdef-fedcba-123456");

        // First toggle after a reset is again not undoable
        let id = ids(&f.engine)[0];
        f.engine.toggle_lock(id);
        assert!(!f.engine.can_undo());
    }

    #[test]
    fn test_copy_writes_bare_hex() {
        let mut f = fixture("/colorpalettegenerator/abcdef-222222");
        let id = ids(&f.engine)[0];

        assert!(f.engine.copy_entry(id));
        assert_eq!(f.clipboard.contents().as_deref(), Some("ABCDEF"));
        assert!(f.engine.is_copied(id));
        assert!(!f.engine.can_undo());

        f.engine.copy(id, "#123456");
        assert_eq!(f.clipboard.contents().as_deref(), Some("123456"));
    }

    #[test]
    fn test_copy_failure_still_shows_indicator() {
        let mut f = fixture_with(
            "/colorpalettegenerator/abcdef-222222",
            EngineConfig::default(),
            MemoryClipboard::failing(),
        );
        let id = ids(&f.engine)[1];
        assert!(f.engine.copy_entry(id));
        assert_eq!(f.clipboard.writes(), 1);
        assert_eq!(f.engine.copied_id(), Some(id));
    }

    #[test]
    fn test_copied_indicator_expires() {
        let config = EngineConfig {
            copied_indicator_ms: 0,
            ..Default::default()
        };
        let mut f = fixture_with("/colorpalettegenerator/abcdef-222222", config, MemoryClipboard::new());
        let id = ids(&f.engine)[0];
        f.engine.copy_entry(id);
        assert_eq!(f.engine.copied_id(), None);
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut f = fixture("/colorpalettegenerator/111111-222222");
        let before = f.engine.palette().clone();

        let space = KeyPress::plain(" ");
        assert_eq!(
            f.engine.handle_key(&space, Platform::Other, Focus::TextInput),
            None
        );
        assert_eq!(f.engine.palette(), &before);

        assert_eq!(
            f.engine.handle_key(&space, Platform::Other, Focus::Page),
            Some(ShortcutAction::Generate)
        );
        assert_ne!(f.engine.palette(), &before);

        let undo = KeyPress::new(
            "z",
            crate::input::Modifiers {
                ctrl: true,
                ..Default::default()
            },
        );
        f.engine.handle_key(&undo, Platform::Other, Focus::Page);
        assert_eq!(f.engine.palette(), &before);
    }

    #[test]
    fn test_history_is_bounded() {
        let config = EngineConfig {
            max_history: 3,
            ..Default::default()
        };
        let mut f = fixture_with("/colorpalettegenerator/111111-222222", config, MemoryClipboard::new());
        for _ in 0..10 {
            f.engine.generate();
        }
        let mut undos = 0;
        while f.engine.undo() {
            undos += 1;
        }
        assert_eq!(undos, 3);
    }
}
