//! Style keys, pitch, and size variants
//!
//! A [`StyleKey`] packs weight, slant and stretch so styles inside a foundry
//! can be kept sorted and binary searched. Equality is looser
//! than ordering: a stretch of `0` means "any stretch" and compares equal to
//! every other stretch.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Common weights on the 0–99 scale
pub mod weight {
    pub const LIGHT: u8 = 25;
    pub const NORMAL: u8 = 50;
    pub const DEMI_BOLD: u8 = 63;
    pub const BOLD: u8 = 75;
    pub const BLACK: u8 = 87;
    pub const MAX: u8 = 99;
}

/// Common stretch values, as a percentage of normal width
pub mod stretch {
    /// Matches every stretch
    pub const ANY: u16 = 0;
    pub const ULTRA_CONDENSED: u16 = 50;
    pub const EXTRA_CONDENSED: u16 = 62;
    pub const CONDENSED: u16 = 75;
    pub const SEMI_CONDENSED: u16 = 87;
    pub const UNSTRETCHED: u16 = 100;
    pub const SEMI_EXPANDED: u16 = 112;
    pub const EXPANDED: u16 = 125;
    pub const EXTRA_EXPANDED: u16 = 150;
    pub const ULTRA_EXPANDED: u16 = 200;
    /// Stretch occupies the low 12 bits of a key's ordinal
    pub const MAX: u16 = 0x0fff;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slant {
    #[default]
    Roman,
    Italic,
    Oblique,
}

impl Slant {
    fn bits(self) -> u32 {
        match self {
            Slant::Roman => 0,
            Slant::Italic => 1,
            Slant::Oblique => 2,
        }
    }

    /// Cost of rendering `self` when `other` was asked for
    pub fn penalty(self, other: Slant) -> u32 {
        match (self, other) {
            (a, b) if a == b => 0,
            (Slant::Italic, Slant::Oblique) | (Slant::Oblique, Slant::Italic) => 0x0001,
            _ => 0x1000,
        }
    }
}

impl FromStr for Slant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roman" | "normal" | "upright" => Ok(Slant::Roman),
            "italic" => Ok(Slant::Italic),
            "oblique" => Ok(Slant::Oblique),
            other => Err(format!("unknown slant '{other}'")),
        }
    }
}

/// Weight, slant and stretch of a style
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StyleKey {
    pub weight: u8,
    pub slant: Slant,
    /// `0` matches any stretch
    pub stretch: u16,
}

impl StyleKey {
    pub fn new(weight: u8, slant: Slant, stretch: u16) -> Self {
        Self {
            weight: weight.min(weight::MAX),
            slant,
            stretch: stretch.min(stretch::MAX),
        }
    }

    /// Sort position: `weight << 14 + slant << 12 + stretch`
    pub fn ordinal(&self) -> u32 {
        ((self.weight as u32) << 14) + (self.slant.bits() << 12) + self.stretch as u32
    }

    /// How far `self` is from `wanted`: weight delta, stretch delta when both
    /// stretches are set, plus the slant penalty
    pub fn distance(&self, wanted: &StyleKey) -> u32 {
        let mut dist = (self.weight as i32 - wanted.weight as i32).unsigned_abs();
        if self.stretch != 0 && wanted.stretch != 0 {
            dist += (self.stretch as i32 - wanted.stretch as i32).unsigned_abs();
        }
        dist + self.slant.penalty(wanted.slant)
    }

    /// Ordering used by the catalog's sorted style lists
    pub fn cmp_ordinal(&self, other: &StyleKey) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl Default for StyleKey {
    fn default() -> Self {
        Self::new(weight::NORMAL, Slant::Roman, stretch::ANY)
    }
}

impl PartialEq for StyleKey {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight
            && self.slant == other.slant
            && (self.stretch == 0 || other.stretch == 0 || self.stretch == other.stretch)
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weight = match self.weight {
            0..=37 => "Light",
            38..=56 => "Normal",
            57..=68 => "Demi Bold",
            69..=80 => "Bold",
            _ => "Black",
        };
        match self.slant {
            Slant::Roman => f.write_str(weight),
            Slant::Italic if weight == "Normal" => f.write_str("Italic"),
            Slant::Oblique if weight == "Normal" => f.write_str("Oblique"),
            Slant::Italic => write!(f, "{weight} Italic"),
            Slant::Oblique => write!(f, "{weight} Oblique"),
        }
    }
}

/// Glyph advance behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pitch {
    Proportional,
    Monospace,
    /// Fixed width on a character-cell grid
    Cellular,
    #[default]
    Any,
}

impl Pitch {
    pub fn is_fixed(self) -> bool {
        matches!(self, Pitch::Monospace | Pitch::Cellular)
    }

    /// Does a face with pitch `actual` satisfy a request for `self`?
    ///
    /// Cellular faces satisfy monospace requests.
    pub fn accepts(self, actual: Pitch) -> bool {
        match (self, actual) {
            (Pitch::Any, _) => true,
            (Pitch::Monospace, Pitch::Cellular) => true,
            (wanted, actual) => wanted == actual,
        }
    }
}

impl FromStr for Pitch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "proportional" => Ok(Pitch::Proportional),
            "m" | "mono" | "monospace" => Ok(Pitch::Monospace),
            "c" | "cell" | "cellular" => Ok(Pitch::Cellular),
            "*" | "any" => Ok(Pitch::Any),
            other => Err(format!("unknown pitch '{other}'")),
        }
    }
}

/// Which pixel size a size variant was rasterized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeKind {
    Fixed(u16),
    /// An outline that renders cleanly at any size
    SmoothScalable,
}

impl SizeKind {
    /// The size-0 master of a scalable bitmap face
    pub const SCALABLE_BITMAP: SizeKind = SizeKind::Fixed(0);

    pub fn pixel_size(self) -> Option<u16> {
        match self {
            SizeKind::Fixed(px) => Some(px),
            SizeKind::SmoothScalable => None,
        }
    }

    pub fn is_scalable_bitmap(self) -> bool {
        self == Self::SCALABLE_BITMAP
    }
}

impl fmt::Display for SizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeKind::Fixed(0) => f.write_str("scalable-bitmap"),
            SizeKind::Fixed(px) => write!(f, "{px}px"),
            SizeKind::SmoothScalable => f.write_str("scalable"),
        }
    }
}
