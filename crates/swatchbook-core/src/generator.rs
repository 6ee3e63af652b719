//! Color generators used to fill unlocked palette slots.

use crate::color::HexColor;
use uuid::Uuid;

/// Produces one valid color per call.
pub trait ColorGenerator {
    fn generate(&mut self) -> HexColor;
}

impl<F> ColorGenerator for F
where
    F: FnMut() -> HexColor,
{
    fn generate(&mut self) -> HexColor {
        self()
    }
}

/// Uniform random colors from a splitmix64 stream.
///
/// Seeded from a v4 UUID so it works the same on native and WASM.
#[derive(Debug, Clone)]
pub struct RandomColorGenerator {
    state: u64,
}

impl Default for RandomColorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomColorGenerator {
    pub fn new() -> Self {
        let (hi, lo) = Uuid::new_v4().as_u64_pair();
        Self::with_seed(hi ^ lo)
    }

    /// Deterministic generator for reproducible palettes.
    pub fn with_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl ColorGenerator for RandomColorGenerator {
    fn generate(&mut self) -> HexColor {
        let bits = self.next_u64();
        HexColor::from_rgb((bits >> 16) as u8, (bits >> 8) as u8, bits as u8)
    }
}
