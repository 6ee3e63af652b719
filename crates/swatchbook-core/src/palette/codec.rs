//! URL token codec.
//!
//! A token is the palette's colors as lower-case hex digits joined by `-`,
//! for example `778899-889977-fefefe`.

use super::{Palette, MAX_COLORS, MIN_COLORS};
use crate::color::{is_valid_hex, HexColor};

/// Path under which shareable palettes live.
pub const SHARE_PATH_PREFIX: &str = "/colorpalettegenerator";

const SEPARATOR: &str = "-";

/// Encode a palette as a URL token. Order is preserved.
pub fn encode(palette: &Palette) -> String {
    palette
        .colors()
        .map(HexColor::to_url)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Decode a URL token into colors.
///
/// Segments that are not exactly six hex digits are dropped. Fewer than
/// [`MIN_COLORS`] valid segments decodes to an empty list; more than
/// [`MAX_COLORS`] is truncated.
pub fn decode(token: &str) -> Vec<HexColor> {
    decode_bounded(token, MIN_COLORS, MAX_COLORS)
}

pub(crate) fn decode_bounded(token: &str, min: usize, max: usize) -> Vec<HexColor> {
    let colors: Vec<HexColor> = token
        .split(SEPARATOR)
        .filter(|segment| is_valid_hex(segment))
        .filter_map(|segment| HexColor::parse(segment).ok())
        .collect();

    if colors.len() < min {
        log::debug!(
            "Token {:?} has {} valid colors, need at least {}",
            token,
            colors.len(),
            min
        );
        return Vec::new();
    }

    colors.into_iter().take(max).collect()
}

/// Full shareable path for a token.
pub fn share_path(token: &str) -> String {
    format!("{}/{}", SHARE_PATH_PREFIX, token)
}

/// Extract the token from a location path such as
/// `/colorpalettegenerator/778899-fefefe`.
///
/// Returns `None` for the bare generator path.
pub fn token_from_path(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(SHARE_PATH_PREFIX).unwrap_or(path);
    let token = rest.trim_matches('/');
    let token = token.rsplit('/').next().unwrap_or(token);
    if token.is_empty() { None } else { Some(token) }
}
