//! Display colours for spawned objects

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Deserialize};

/// An opaque RGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized `[r, g, b, 1.0]` for presentation layers
    pub fn to_rgba_f32(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// The fixed object palette
pub const PALETTE: [Color; 9] = [
    Color::rgb(255, 0, 0),
    Color::rgb(0, 255, 0),
    Color::rgb(0, 0, 255),
    Color::rgb(255, 255, 0),
    Color::rgb(255, 0, 255),
    Color::rgb(0, 255, 255),
    Color::rgb(128, 0, 0),
    Color::rgb(0, 128, 0),
    Color::rgb(0, 0, 128),
];

/// Pick a colour uniformly from [`PALETTE`]
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    // PALETTE is non-empty
    *PALETTE.choose(rng).unwrap_or(&PALETTE[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_color_is_from_palette() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let color = random_color(&mut rng);
            assert!(PALETTE.contains(&color));
        }
    }

    #[test]
    fn test_rgba_normalized() {
        assert_eq!(Color::rgb(255, 0, 128).to_rgba_f32()[0], 1.0);
        assert_eq!(Color::rgb(255, 0, 128).to_rgba_f32()[1], 0.0);
        assert_eq!(Color::rgb(255, 0, 128).to_rgba_f32()[3], 1.0);
    }
}
