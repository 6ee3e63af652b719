//! WebAssembly entry point and browser capabilities.

use kurbo::{Point, Rect, Size};
use swatchbook_core::input::{Focus, KeyPress, Modifiers, MouseButton, Platform, PointerEvent};
use swatchbook_core::picker::{KeyDisposition, PickerController, PickerLayout};
use swatchbook_core::platform::{Clipboard, Host, Location, PlatformError, PlatformResult};
use swatchbook_core::palette::token_from_path;
use swatchbook_core::{EngineConfig, EntryId, PaletteEngine, RandomColorGenerator};
use wasm_bindgen::prelude::*;

/// Browser clipboard. Writes are fire and forget; failures only reach the log.
pub struct WebClipboard;

impl Clipboard for WebClipboard {
    fn write_text(&mut self, text: &str) -> PlatformResult<()> {
        let window = web_sys::window().ok_or_else(|| PlatformError::Unavailable("window".to_string()))?;
        let promise = window.navigator().clipboard().write_text(text);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                log::warn!("Clipboard write failed: {:?}", e);
            }
        });
        Ok(())
    }
}

/// The page URL. Palette changes replace the current history entry.
pub struct WebLocation;

impl Location for WebLocation {
    fn read_location_param(&self) -> Option<String> {
        let pathname = web_sys::window()?.location().pathname().ok()?;
        token_from_path(&pathname).map(str::to_string)
    }

    fn replace_location(&mut self, path: &str) -> PlatformResult<()> {
        let window = web_sys::window().ok_or_else(|| PlatformError::Unavailable("window".to_string()))?;
        let history = window
            .history()
            .map_err(|e| PlatformError::Location(format!("{:?}", e)))?;
        history
            .replace_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(|e| PlatformError::Location(format!("{:?}", e)))
    }
}

fn detect_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::Other;
    };
    let navigator = window.navigator();
    let agent = navigator
        .platform()
        .ok()
        .filter(|p| !p.is_empty())
        .or_else(|| navigator.user_agent().ok())
        .unwrap_or_default();
    Platform::from_user_agent(&agent)
}

/// Palette engine and picker exposed to JavaScript. Entries are addressed by
/// their current index.
#[wasm_bindgen]
pub struct PaletteHandle {
    engine: PaletteEngine<RandomColorGenerator>,
    picker: PickerController,
    platform: Platform,
}

#[wasm_bindgen]
impl PaletteHandle {
    /// Create the engine from the page URL. `config_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> PaletteHandle {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::debug!("Logger already initialized");
        }
        log::info!("Starting Swatchbook (WASM)");

        let config = if config_json.trim().is_empty() {
            EngineConfig::default()
        } else {
            EngineConfig::from_json(config_json).unwrap_or_else(|e| {
                log::error!("Invalid config, using defaults: {}", e);
                EngineConfig::default()
            })
        };

        let engine = PaletteEngine::new(config, RandomColorGenerator::new(), Host::new(WebClipboard, WebLocation));
        let picker = PickerController::from_config(engine.config());
        PaletteHandle {
            engine,
            picker,
            platform: detect_platform(),
        }
    }

    fn entry_id(&self, index: usize) -> Option<EntryId> {
        self.engine.palette().entries().get(index).map(|e| e.id())
    }

    /// Current colors as `#RRGGBB` strings.
    pub fn colors(&self) -> Vec<String> {
        self.engine.palette().colors().map(|c| c.to_string()).collect()
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.engine.palette().entries().get(index).is_some_and(|e| e.locked)
    }

    /// Whether text on the entry should be drawn light.
    pub fn light_ink(&self, index: usize) -> bool {
        self.engine
            .palette()
            .entries()
            .get(index)
            .is_some_and(|e| e.ink() == swatchbook_core::Ink::Light)
    }

    pub fn is_copied(&self, index: usize) -> bool {
        self.entry_id(index).is_some_and(|id| self.engine.is_copied(id))
    }

    pub fn token(&self) -> String {
        self.engine.token()
    }

    pub fn share_path(&self) -> String {
        self.engine.share_path()
    }

    /// Bumped on every palette change; lets the page skip redundant redraws.
    pub fn revision(&self) -> f64 {
        self.engine.revision() as f64
    }

    pub fn generate(&mut self) -> bool {
        self.engine.generate()
    }

    pub fn toggle_lock(&mut self, index: usize) -> bool {
        self.entry_id(index).is_some_and(|id| self.engine.toggle_lock(id))
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let Some(active) = self.entry_id(from) else {
            return false;
        };
        let over = self.entry_id(to);
        self.engine.reorder(active, over)
    }

    pub fn insert_between(&mut self, after_index: usize) -> bool {
        self.engine.insert_between(after_index).is_some()
    }

    pub fn remove(&mut self, index: usize) -> bool {
        self.entry_id(index).is_some_and(|id| self.engine.remove(id))
    }

    pub fn copy(&mut self, index: usize) -> bool {
        self.entry_id(index).is_some_and(|id| self.engine.copy_entry(id))
    }

    pub fn undo(&mut self) -> bool {
        self.engine.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.engine.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.engine.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.engine.can_redo()
    }

    /// Shortcut label for `"generate"`, `"undo"` or `"redo"`.
    pub fn shortcut_label(&self, action: &str) -> String {
        use swatchbook_core::{ShortcutAction, ShortcutRegistry};
        let action = match action {
            "generate" => ShortcutAction::Generate,
            "undo" => ShortcutAction::Undo,
            "redo" => ShortcutAction::Redo,
            _ => return String::new(),
        };
        ShortcutRegistry::label(self.platform, action)
    }

    /// Route a `keydown`. Returns true when the page should call
    /// `preventDefault`.
    pub fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool, in_text_input: bool) -> bool {
        let key = KeyPress::new(key, Modifiers { shift, ctrl, alt, meta });
        if self.picker.is_open() {
            return match self.picker.handle_key(&key, &mut self.engine) {
                KeyDisposition::Consumed | KeyDisposition::Suppressed => true,
                KeyDisposition::PassThrough => false,
            };
        }
        let focus = if in_text_input { Focus::TextInput } else { Focus::Page };
        self.engine.handle_key(&key, self.platform, focus).is_some()
    }

    /// Open the picker on an entry anchored to its swatch rectangle.
    pub fn open_picker(&mut self, index: usize, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let Some(entry) = self.engine.palette().entries().get(index) else {
            return false;
        };
        let (id, hex) = (entry.id(), entry.hex);
        self.picker.open(id, hex, Rect::new(x0, y0, x1, y1));
        true
    }

    /// Report the popup, field and hue track bounds as flat `x0, y0, x1, y1`
    /// quadruples.
    pub fn set_picker_layout(&mut self, popup: &[f64], field: &[f64], hue_track: &[f64]) {
        let rect = |r: &[f64]| match r {
            [x0, y0, x1, y1] => Rect::new(*x0, *y0, *x1, *y1),
            _ => Rect::ZERO,
        };
        self.picker.set_layout(PickerLayout {
            popup: rect(popup),
            field: rect(field),
            hue_track: rect(hue_track),
        });
    }

    /// Popup top-left as `[left, top]`, kept within the viewport.
    pub fn popup_origin(&self, width: f64, height: f64, viewport_width: f64) -> Option<Vec<f64>> {
        self.picker
            .popup_origin(Size::new(width, height), viewport_width)
            .map(|p| vec![p.x, p.y])
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.picker.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.picker.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(x, y),
        });
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.picker.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    /// Feed the hex text field. Returns the live color, if the picker is open.
    pub fn type_hex(&mut self, text: &str) -> Option<String> {
        self.picker.type_hex(text).map(|c| c.to_string())
    }

    pub fn apply_picker(&mut self) -> bool {
        self.picker.apply(&mut self.engine).is_some()
    }

    pub fn cancel_picker(&mut self) -> bool {
        self.picker.cancel().is_some()
    }

    pub fn picker_open(&self) -> bool {
        self.picker.is_open()
    }

    /// Live preview color of the open picker.
    pub fn picker_color(&self) -> Option<String> {
        self.picker.session().map(|s| s.live_hex().to_string())
    }

    pub fn picker_text(&self) -> Option<String> {
        self.picker.session().map(|s| s.text().to_string())
    }

    /// Pure hue behind the saturation/value field.
    pub fn picker_field_hue(&self) -> Option<String> {
        self.picker.session().map(|s| s.field_hue_hex().to_string())
    }

    /// Cursor positions as `[hue, saturation, value_from_top]` fractions.
    pub fn picker_cursors(&self) -> Option<Vec<f64>> {
        self.picker.session().map(|s| {
            let field = s.field_cursor_fraction();
            vec![s.hue_cursor_fraction(), field.x, field.y]
        })
    }
}
