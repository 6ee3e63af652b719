//! Host capabilities consumed by the engine: clipboard and location.
//!
//! Front ends supply real implementations (system clipboard, browser
//! history). The in-memory versions here back tests and headless use.

use crate::palette::token_from_path;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Capability errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    #[error("Location error: {0}")]
    Location(String),
    #[error("Capability unavailable: {0}")]
    Unavailable(String),
}

/// Result type for capability calls.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Text clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> PlatformResult<()>;
}

/// The shareable location (a browser URL, or its stand-in).
pub trait Location {
    /// Palette token carried by the current location, read once at startup.
    fn read_location_param(&self) -> Option<String>;

    /// Replace the current location without adding a history entry.
    fn replace_location(&mut self, path: &str) -> PlatformResult<()>;
}

/// Capabilities handed to the engine.
pub struct Host {
    pub clipboard: Box<dyn Clipboard>,
    pub location: Box<dyn Location>,
}

impl Host {
    pub fn new(clipboard: impl Clipboard + 'static, location: impl Location + 'static) -> Self {
        Self {
            clipboard: Box::new(clipboard),
            location: Box::new(location),
        }
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct ClipboardState {
    contents: Option<String>,
    writes: usize,
    fail: bool,
}

/// In-memory clipboard. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Rc<RefCell<ClipboardState>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail.
    pub fn failing() -> Self {
        let clipboard = Self::new();
        clipboard.state.borrow_mut().fail = true;
        clipboard
    }

    pub fn contents(&self) -> Option<String> {
        self.state.borrow().contents.clone()
    }

    /// Number of write attempts, successful or not.
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> PlatformResult<()> {
        let mut state = self.state.borrow_mut();
        state.writes += 1;
        if state.fail {
            return Err(PlatformError::Clipboard("write refused".to_string()));
        }
        state.contents = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct LocationState {
    path: String,
    replacements: usize,
}

/// In-memory location. Clones share the same path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    state: Rc<RefCell<LocationState>>,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: &str) -> Self {
        let location = Self::new();
        location.state.borrow_mut().path = path.to_string();
        location
    }

    pub fn path(&self) -> String {
        self.state.borrow().path.clone()
    }

    /// Number of replace calls so far.
    pub fn replacements(&self) -> usize {
        self.state.borrow().replacements
    }
}

impl Location for MemoryLocation {
    fn read_location_param(&self) -> Option<String> {
        token_from_path(&self.state.borrow().path).map(str::to_string)
    }

    fn replace_location(&mut self, path: &str) -> PlatformResult<()> {
        let mut state = self.state.borrow_mut();
        state.path = path.to_string();
        state.replacements += 1;
        Ok(())
    }
}
