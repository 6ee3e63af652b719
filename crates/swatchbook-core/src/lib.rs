//! Swatchbook Core Library
//!
//! Platform-agnostic palette engine: color conversions, the shareable URL
//! codec, undo/redo history and the interactive color picker.

pub mod color;
pub mod config;
pub mod engine;
pub mod generator;
pub mod history;
pub mod input;
pub mod palette;
pub mod picker;
pub mod platform;

pub use color::{HexColor, Hsv, Ink, Rgb};
pub use config::{EngineConfig, PickerPrecision};
pub use engine::PaletteEngine;
pub use generator::{ColorGenerator, RandomColorGenerator};
pub use history::History;
pub use input::{Focus, KeyPress, Modifiers, Platform, ShortcutAction, ShortcutRegistry};
pub use palette::{ColorEntry, EntryId, Palette};
pub use picker::{KeyDisposition, PickerController, PickerLayout, PickerOutcome, PickerSession};
pub use platform::{Clipboard, Host, Location, MemoryClipboard, MemoryLocation, PlatformError};
