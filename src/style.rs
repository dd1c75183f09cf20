//! # Glyph and color policy
//!
//! Pure mappings from a star's physical properties to how it is drawn. The grid and raster
//! renderers share these functions, so a star looks the same in both outputs.
//!
//! | magnitude   | glyph | dot radius |
//! |-------------|-------|------------|
//! | `< 3.0`     | `*`   | 4 px       |
//! | `< 5.0`     | `·`   | 2 px       |
//! | otherwise   | `.`   | 1 px       |
//!
//! Color index buckets are evaluated in order, first match wins: `NaN` or `0` (no data)
//! → neutral, `< −0.1` → blue, `< 0.3` → blue-white, `< 0.6` → white, `< 1.0` → yellow,
//! `< 1.5` → orange, otherwise red.

use crate::constants::{Magnitude, BRIGHT_MAGNITUDE, MEDIUM_MAGNITUDE};

/// Symbol drawn for a star in the character grid.
///
/// Variants are ordered by drawing priority: `Faint < Medium < Bright`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Glyph {
    Faint,
    Medium,
    Bright,
}

impl Glyph {
    pub fn for_magnitude(magnitude: Magnitude) -> Glyph {
        if magnitude < BRIGHT_MAGNITUDE {
            Glyph::Bright
        } else if magnitude < MEDIUM_MAGNITUDE {
            Glyph::Medium
        } else {
            Glyph::Faint
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Glyph::Bright => '*',
            Glyph::Medium => '·',
            Glyph::Faint => '.',
        }
    }
}

/// Discrete star color derived from the B−V color index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorBucket {
    /// No color data
    Neutral,
    Blue,
    BlueWhite,
    White,
    Yellow,
    Orange,
    Red,
}

impl ColorBucket {
    pub fn for_color_index(ci: f64) -> ColorBucket {
        match ci {
            ci if ci.is_nan() || ci == 0.0 => ColorBucket::Neutral,
            ci if ci < -0.1 => ColorBucket::Blue,
            ci if ci < 0.3 => ColorBucket::BlueWhite,
            ci if ci < 0.6 => ColorBucket::White,
            ci if ci < 1.0 => ColorBucket::Yellow,
            ci if ci < 1.5 => ColorBucket::Orange,
            _ => ColorBucket::Red,
        }
    }

    /// Foreground color in the xterm 256-color palette.
    pub fn ansi256(self) -> u8 {
        match self {
            ColorBucket::Neutral | ColorBucket::White => 255,
            ColorBucket::Blue => 75,
            ColorBucket::BlueWhite => 153,
            ColorBucket::Yellow => 229,
            ColorBucket::Orange => 215,
            ColorBucket::Red => 196,
        }
    }

    /// Dot color for raster snapshots.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            ColorBucket::Neutral | ColorBucket::White => [255, 255, 255],
            ColorBucket::Blue => [130, 180, 255],
            ColorBucket::BlueWhite => [180, 210, 255],
            ColorBucket::Yellow => [255, 240, 180],
            ColorBucket::Orange => [255, 190, 100],
            ColorBucket::Red => [255, 100, 80],
        }
    }
}

/// Radius in pixels of the disc drawn for a star in a raster snapshot.
pub fn dot_radius(magnitude: Magnitude) -> i64 {
    if magnitude < BRIGHT_MAGNITUDE {
        4
    } else if magnitude < MEDIUM_MAGNITUDE {
        2
    } else {
        1
    }
}
