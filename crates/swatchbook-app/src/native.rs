//! Native capabilities: system clipboard and a terminal stand-in for the URL.

use swatchbook_core::palette::{SHARE_PATH_PREFIX, share_path, token_from_path};
use swatchbook_core::platform::{Clipboard, Location, PlatformError, PlatformResult};

/// System clipboard via arboard. The handle is opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> PlatformResult<()> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| PlatformError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(PlatformError::Unavailable("clipboard".to_string()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| PlatformError::Clipboard(e.to_string()))?;
        log::info!("Copied {} to clipboard", text);
        Ok(())
    }
}

/// Location for the terminal: the start path comes from the command line and
/// replacements are kept and logged.
#[derive(Debug, Clone, Default)]
pub struct TerminalLocation {
    path: String,
}

impl TerminalLocation {
    /// Accepts either a share path (`/colorpalettegenerator/<token>`) or a
    /// bare token.
    pub fn from_arg(arg: Option<&str>) -> Self {
        let path = match arg.map(str::trim) {
            Some(arg) if arg.starts_with(SHARE_PATH_PREFIX) => arg.to_string(),
            Some(arg) if !arg.is_empty() => share_path(arg),
            _ => String::new(),
        };
        Self { path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Location for TerminalLocation {
    fn read_location_param(&self) -> Option<String> {
        token_from_path(&self.path).map(str::to_string)
    }

    fn replace_location(&mut self, path: &str) -> PlatformResult<()> {
        if self.path != path {
            log::info!("Share link: {}", path);
            self.path = path.to_string();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_token_arg() {
        let location = TerminalLocation::from_arg(Some("aabbcc-112233"));
        assert_eq!(location.path(), "/colorpalettegenerator/aabbcc-112233");
        assert_eq!(location.read_location_param().as_deref(), Some("aabbcc-112233"));
    }

    #[test]
    fn test_location_from_path_arg() {
        let location = TerminalLocation::from_arg(Some("/colorpalettegenerator/aabbcc-112233"));
        assert_eq!(location.read_location_param().as_deref(), Some("aabbcc-112233"));
    }

    #[test]
    fn test_location_without_arg() {
        let mut location = TerminalLocation::from_arg(None);
        assert_eq!(location.read_location_param(), None);
        location.replace_location("/colorpalettegenerator/000000-ffffff").unwrap();
        assert_eq!(location.path(), "/colorpalettegenerator/000000-ffffff");
    }
}
