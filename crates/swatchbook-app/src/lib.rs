//! Swatchbook Application
//!
//! Front ends over the palette engine: a terminal shell for native builds
//! and a JavaScript handle for the browser.

mod shell;

pub use shell::{Command, ParseError, Shell, ShellStatus, parse_command};

#[cfg(feature = "native")]
mod native;

#[cfg(feature = "native")]
pub use native::{SystemClipboard, TerminalLocation};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{PaletteHandle, WebClipboard, WebLocation};
