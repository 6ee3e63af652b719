//! Input events and keyboard shortcut resolution.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event in viewport coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

/// A key press. `key` uses DOM `KeyboardEvent.key` names
/// (`"Enter"`, `"Escape"`, `" "`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// A key with no modifiers held.
    pub fn plain(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::default())
    }

    /// The single character this key would type, if any.
    pub fn character(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
    }
}

/// Host platform, which decides the primary modifier and redo convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Command is primary; redo is Cmd+Shift+Z.
    Mac,
    /// Ctrl is primary; redo is Ctrl+Y (Ctrl+Shift+Z also accepted).
    Other,
}

impl Platform {
    /// Platform of the native build target.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn current() -> Self {
        if cfg!(target_os = "macos") || cfg!(target_os = "ios") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    /// Detect from a browser `navigator.platform` or user agent string.
    pub fn from_user_agent(agent: &str) -> Self {
        let agent = agent.to_ascii_lowercase();
        if ["mac", "iphone", "ipad", "ipod"].iter().any(|p| agent.contains(p)) {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    /// Whether the platform's primary modifier is held.
    pub fn primary_held(self, modifiers: &Modifiers) -> bool {
        match self {
            Platform::Mac => modifiers.meta,
            Platform::Other => modifiers.ctrl,
        }
    }

    fn primary_label(self) -> &'static str {
        match self {
            Platform::Mac => "⌘",
            Platform::Other => "Ctrl",
        }
    }
}

/// Where keyboard focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Page,
    /// A text-editing control; palette shortcuts are disabled.
    TextInput,
}

/// Palette-level actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortcutAction {
    Generate,
    Undo,
    Redo,
}

/// Map a key press to a palette action.
pub fn resolve_shortcut(key: &KeyPress, platform: Platform, focus: Focus) -> Option<ShortcutAction> {
    if focus == Focus::TextInput {
        return None;
    }

    let mods = &key.modifiers;
    if platform.primary_held(mods) {
        return match (key.character().map(|c| c.to_ascii_lowercase()), mods.shift) {
            (Some('z'), false) => Some(ShortcutAction::Undo),
            (Some('z'), true) => Some(ShortcutAction::Redo),
            (Some('y'), false) if platform == Platform::Other => Some(ShortcutAction::Redo),
            _ => None,
        };
    }

    if (key.key == " " || key.is("Space")) && !mods.ctrl && !mods.meta && !mods.alt {
        return Some(ShortcutAction::Generate);
    }

    None
}

/// A keyboard shortcut as shown in tooltips and help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub action: ShortcutAction,
    pub label: String,
    pub description: &'static str,
}

/// Registry of palette shortcuts for a platform.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all(platform: Platform) -> Vec<Shortcut> {
        vec![
            Shortcut {
                action: ShortcutAction::Generate,
                label: "Space".to_string(),
                description: "Generate new colors",
            },
            Shortcut {
                action: ShortcutAction::Undo,
                label: format!("{} Z", platform.primary_label()),
                description: "Undo",
            },
            Shortcut {
                action: ShortcutAction::Redo,
                label: Self::redo_label(platform),
                description: "Redo",
            },
        ]
    }

    /// Label for one action.
    pub fn label(platform: Platform, action: ShortcutAction) -> String {
        Self::all(platform)
            .into_iter()
            .find(|s| s.action == action)
            .map(|s| s.label)
            .unwrap_or_default()
    }

    fn redo_label(platform: Platform) -> String {
        match platform {
            Platform::Mac => "⌘ ⇧ Z".to_string(),
            Platform::Other => "Ctrl Y".to_string(),
        }
    }
}
