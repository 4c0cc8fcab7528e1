//! What callers ask for
//!
//! A [`FontRequest`] is the abstract description of a font: family list,
//! style, pixel size, pitch, target script and strategy flags. The resolver
//! turns it into a [`ResolvedDescriptor`](crate::ResolvedDescriptor).

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::encoding::EncodingId;
use crate::script::Script;
use crate::style::{stretch, weight, Pitch, Slant, StyleKey};

/// Generic family class used when no named family matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleHint {
    #[default]
    AnyStyle,
    SansSerif,
    Serif,
    TypeWriter,
    Decorative,
    Cursive,
    Fantasy,
    Monospace,
    System,
}

impl StyleHint {
    pub const ALL: [StyleHint; 9] = [
        StyleHint::AnyStyle,
        StyleHint::SansSerif,
        StyleHint::Serif,
        StyleHint::TypeWriter,
        StyleHint::Decorative,
        StyleHint::Cursive,
        StyleHint::Fantasy,
        StyleHint::Monospace,
        StyleHint::System,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StyleHint::AnyStyle => "any",
            StyleHint::SansSerif => "sans-serif",
            StyleHint::Serif => "serif",
            StyleHint::TypeWriter => "typewriter",
            StyleHint::Decorative => "decorative",
            StyleHint::Cursive => "cursive",
            StyleHint::Fantasy => "fantasy",
            StyleHint::Monospace => "monospace",
            StyleHint::System => "system",
        }
    }
}

impl FromStr for StyleHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StyleHint::ALL
            .into_iter()
            .find(|hint| hint.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown style hint '{s}'"))
    }
}

bitflags! {
    /// How the matcher should trade exactness against quality
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct StyleStrategy: u16 {
        const PREFER_DEFAULT    = 0x0001;
        /// Prefer fixed-size bitmaps over outlines
        const PREFER_BITMAP     = 0x0002;
        const PREFER_DEVICE     = 0x0004;
        const PREFER_OUTLINE    = 0x0008;
        /// Only smooth-scalable styles qualify
        const FORCE_OUTLINE     = 0x0010;
        /// Accept scaled bitmaps to hit the exact pixel size
        const PREFER_MATCH      = 0x0020;
        /// Never scale bitmaps, live with the nearest size
        const PREFER_QUALITY    = 0x0040;
        const PREFER_ANTIALIAS  = 0x0080;
        const NO_ANTIALIAS      = 0x0100;
        /// Native outlines cannot be used
        const OPENGL_COMPATIBLE = 0x0200;
        const NO_FONT_MERGING   = 0x8000;
    }
}

impl StyleStrategy {
    /// Parses one flag name such as `prefer-bitmap` or `FORCE_OUTLINE`
    pub fn parse_flag(name: &str) -> Option<StyleStrategy> {
        let normalized = name.trim().replace('-', "_").to_ascii_uppercase();
        StyleStrategy::from_name(&normalized)
    }
}

/// An abstract font request
#[derive(Debug, Clone, PartialEq)]
pub struct FontRequest {
    /// Comma separated family names in preference order; each may carry a
    /// bracketed foundry: `"Helvetica [Adobe], Arial"`
    pub family: String,
    /// Restrict candidates to this foundry
    pub foundry: Option<String>,
    pub style: StyleKey,
    pub pixel_size: u16,
    pub pitch: Pitch,
    pub script: Script,
    pub style_hint: StyleHint,
    pub strategy: StyleStrategy,
    /// Use exactly this encoding, nothing else
    pub force_encoding: Option<EncodingId>,
    /// Display the result is meant for, when resolution depends on it
    pub display: Option<u32>,
}

impl FontRequest {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Default::default()
        }
    }

    pub fn weight(mut self, weight: u8) -> Self {
        self.style.weight = weight.min(weight::MAX);
        self
    }

    pub fn slant(mut self, slant: Slant) -> Self {
        self.style.slant = slant;
        self
    }

    pub fn stretch(mut self, stretch: u16) -> Self {
        self.style.stretch = stretch.min(stretch::MAX);
        self
    }

    pub fn pixel_size(mut self, pixel_size: u16) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    pub fn pitch(mut self, pitch: Pitch) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn script(mut self, script: Script) -> Self {
        self.script = script;
        self
    }

    pub fn style_hint(mut self, hint: StyleHint) -> Self {
        self.style_hint = hint;
        self
    }

    pub fn strategy(mut self, strategy: StyleStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn foundry(mut self, foundry: impl Into<String>) -> Self {
        self.foundry = Some(foundry.into());
        self
    }

    pub fn force_encoding(mut self, encoding: EncodingId) -> Self {
        self.force_encoding = Some(encoding);
        self
    }

    pub fn display(mut self, display: u32) -> Self {
        self.display = Some(display);
        self
    }

    /// The requested families, split on commas, trimmed and unquoted
    pub fn family_list(&self) -> Vec<FamilyName> {
        split_family_list(&self.family)
    }
}

impl Default for FontRequest {
    fn default() -> Self {
        Self {
            family: String::new(),
            foundry: None,
            style: StyleKey::default(),
            pixel_size: 12,
            pitch: Pitch::Any,
            script: Script::Common,
            style_hint: StyleHint::AnyStyle,
            strategy: StyleStrategy::empty(),
            force_encoding: None,
            display: None,
        }
    }
}

/// One entry of a family list, with its optional bracketed foundry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyName {
    pub family: String,
    pub foundry: Option<String>,
}

impl FamilyName {
    /// Splits `"Helvetica [Adobe]"` into family and foundry
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if let Some(open) = name.find('[') {
            let family = name[..open].trim().to_string();
            let rest = &name[open + 1..];
            let foundry = rest.find(']').map(|close| rest[..close].trim().to_string());
            return Self {
                family,
                foundry: foundry.filter(|f| !f.is_empty()),
            };
        }
        Self {
            family: name.to_string(),
            foundry: None,
        }
    }
}

impl fmt::Display for FamilyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.foundry {
            Some(foundry) => write!(f, "{} [{}]", self.family, foundry),
            None => f.write_str(&self.family),
        }
    }
}

/// Comma split, trim, strip one level of single or double quotes
pub fn split_family_list(families: &str) -> Vec<FamilyName> {
    families
        .split(',')
        .map(|part| {
            let part = part.trim();
            let unquoted = part
                .strip_prefix('"')
                .and_then(|p| p.strip_suffix('"'))
                .or_else(|| part.strip_prefix('\'').and_then(|p| p.strip_suffix('\'')))
                .unwrap_or(part);
            FamilyName::parse(unquoted)
        })
        .filter(|name| !name.family.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_list_split() {
        let request = FontRequest::new(" \"Times New Roman\", Helvetica [Adobe] ,'Arial',, ");
        let names: Vec<String> = request.family_list().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["Times New Roman", "Helvetica [Adobe]", "Arial"]);
    }

    #[test]
    fn test_bracketed_foundry() {
        let parsed = FamilyName::parse("Courier [Bitstream]");
        assert_eq!(parsed.family, "Courier");
        assert_eq!(parsed.foundry.as_deref(), Some("Bitstream"));

        let empty = FamilyName::parse("Courier []");
        assert_eq!(empty.foundry, None);
    }

    #[test]
    fn test_builder_clamps() {
        let request = FontRequest::new("x").weight(250).stretch(9000);
        assert_eq!(request.style.weight, weight::MAX);
        assert_eq!(request.style.stretch, stretch::MAX);
    }

    #[test]
    fn test_strategy_flag_names() {
        assert_eq!(
            StyleStrategy::parse_flag("prefer-bitmap"),
            Some(StyleStrategy::PREFER_BITMAP)
        );
        assert_eq!(
            StyleStrategy::parse_flag("FORCE_OUTLINE"),
            Some(StyleStrategy::FORCE_OUTLINE)
        );
        assert_eq!(StyleStrategy::parse_flag("shiny"), None);
    }
}
