//! Scripts, writing systems, and the fixed table that joins them
//!
//! A script is what a run of text is written in. A writing system is what a
//! font family claims to cover. Several writing systems can share a script
//! (Simplified Chinese, Traditional Chinese and Japanese all use Han), so the
//! resolver asks "does this family cover any writing system of the script?".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unicode scripts the resolver can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Script {
    /// Punctuation, digits and symbols shared by every script
    Common,
    Latin,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Syriac,
    Thaana,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Thai,
    Lao,
    Tibetan,
    Myanmar,
    Georgian,
    Khmer,
    Han,
    Hangul,
    Ogham,
    Runic,
    Nko,
}

impl Script {
    pub const ALL: [Script; 30] = [
        Script::Common,
        Script::Latin,
        Script::Greek,
        Script::Cyrillic,
        Script::Armenian,
        Script::Hebrew,
        Script::Arabic,
        Script::Syriac,
        Script::Thaana,
        Script::Devanagari,
        Script::Bengali,
        Script::Gurmukhi,
        Script::Gujarati,
        Script::Oriya,
        Script::Tamil,
        Script::Telugu,
        Script::Kannada,
        Script::Malayalam,
        Script::Sinhala,
        Script::Thai,
        Script::Lao,
        Script::Tibetan,
        Script::Myanmar,
        Script::Georgian,
        Script::Khmer,
        Script::Han,
        Script::Hangul,
        Script::Ogham,
        Script::Runic,
        Script::Nko,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Script::Common => "Common",
            Script::Latin => "Latin",
            Script::Greek => "Greek",
            Script::Cyrillic => "Cyrillic",
            Script::Armenian => "Armenian",
            Script::Hebrew => "Hebrew",
            Script::Arabic => "Arabic",
            Script::Syriac => "Syriac",
            Script::Thaana => "Thaana",
            Script::Devanagari => "Devanagari",
            Script::Bengali => "Bengali",
            Script::Gurmukhi => "Gurmukhi",
            Script::Gujarati => "Gujarati",
            Script::Oriya => "Oriya",
            Script::Tamil => "Tamil",
            Script::Telugu => "Telugu",
            Script::Kannada => "Kannada",
            Script::Malayalam => "Malayalam",
            Script::Sinhala => "Sinhala",
            Script::Thai => "Thai",
            Script::Lao => "Lao",
            Script::Tibetan => "Tibetan",
            Script::Myanmar => "Myanmar",
            Script::Georgian => "Georgian",
            Script::Khmer => "Khmer",
            Script::Han => "Han",
            Script::Hangul => "Hangul",
            Script::Ogham => "Ogham",
            Script::Runic => "Runic",
            Script::Nko => "Nko",
        }
    }

    /// Writing systems whose text is written in this script
    pub fn writing_systems(self) -> impl Iterator<Item = WritingSystem> {
        WritingSystem::ALL
            .into_iter()
            .filter(move |ws| *ws != WritingSystem::Any && ws.script() == self)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Script {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Script::ALL
            .into_iter()
            .find(|script| script.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown script '{s}'"))
    }
}

/// Coverage groups a font family can claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritingSystem {
    Any,
    Latin,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Syriac,
    Thaana,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Thai,
    Lao,
    Tibetan,
    Myanmar,
    Georgian,
    Khmer,
    SimplifiedChinese,
    TraditionalChinese,
    Japanese,
    Korean,
    Vietnamese,
    Symbol,
    Ogham,
    Runic,
    Nko,
}

impl WritingSystem {
    pub const COUNT: usize = 34;

    pub const ALL: [WritingSystem; WritingSystem::COUNT] = [
        WritingSystem::Any,
        WritingSystem::Latin,
        WritingSystem::Greek,
        WritingSystem::Cyrillic,
        WritingSystem::Armenian,
        WritingSystem::Hebrew,
        WritingSystem::Arabic,
        WritingSystem::Syriac,
        WritingSystem::Thaana,
        WritingSystem::Devanagari,
        WritingSystem::Bengali,
        WritingSystem::Gurmukhi,
        WritingSystem::Gujarati,
        WritingSystem::Oriya,
        WritingSystem::Tamil,
        WritingSystem::Telugu,
        WritingSystem::Kannada,
        WritingSystem::Malayalam,
        WritingSystem::Sinhala,
        WritingSystem::Thai,
        WritingSystem::Lao,
        WritingSystem::Tibetan,
        WritingSystem::Myanmar,
        WritingSystem::Georgian,
        WritingSystem::Khmer,
        WritingSystem::SimplifiedChinese,
        WritingSystem::TraditionalChinese,
        WritingSystem::Japanese,
        WritingSystem::Korean,
        WritingSystem::Vietnamese,
        WritingSystem::Symbol,
        WritingSystem::Ogham,
        WritingSystem::Runic,
        WritingSystem::Nko,
    ];

    /// Position in [`WritingSystem::ALL`], used to index per-family status arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// The script a writing system's text is written in
    ///
    /// This is the read-only table the fallback resolver consults.
    pub fn script(self) -> Script {
        match self {
            WritingSystem::Any | WritingSystem::Symbol => Script::Common,
            WritingSystem::Latin | WritingSystem::Vietnamese => Script::Latin,
            WritingSystem::Greek => Script::Greek,
            WritingSystem::Cyrillic => Script::Cyrillic,
            WritingSystem::Armenian => Script::Armenian,
            WritingSystem::Hebrew => Script::Hebrew,
            WritingSystem::Arabic => Script::Arabic,
            WritingSystem::Syriac => Script::Syriac,
            WritingSystem::Thaana => Script::Thaana,
            WritingSystem::Devanagari => Script::Devanagari,
            WritingSystem::Bengali => Script::Bengali,
            WritingSystem::Gurmukhi => Script::Gurmukhi,
            WritingSystem::Gujarati => Script::Gujarati,
            WritingSystem::Oriya => Script::Oriya,
            WritingSystem::Tamil => Script::Tamil,
            WritingSystem::Telugu => Script::Telugu,
            WritingSystem::Kannada => Script::Kannada,
            WritingSystem::Malayalam => Script::Malayalam,
            WritingSystem::Sinhala => Script::Sinhala,
            WritingSystem::Thai => Script::Thai,
            WritingSystem::Lao => Script::Lao,
            WritingSystem::Tibetan => Script::Tibetan,
            WritingSystem::Myanmar => Script::Myanmar,
            WritingSystem::Georgian => Script::Georgian,
            WritingSystem::Khmer => Script::Khmer,
            WritingSystem::SimplifiedChinese
            | WritingSystem::TraditionalChinese
            | WritingSystem::Japanese => Script::Han,
            WritingSystem::Korean => Script::Hangul,
            WritingSystem::Ogham => Script::Ogham,
            WritingSystem::Runic => Script::Runic,
            WritingSystem::Nko => Script::Nko,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WritingSystem::Any => "Any",
            WritingSystem::SimplifiedChinese => "Simplified Chinese",
            WritingSystem::TraditionalChinese => "Traditional Chinese",
            WritingSystem::Japanese => "Japanese",
            WritingSystem::Korean => "Korean",
            WritingSystem::Vietnamese => "Vietnamese",
            WritingSystem::Symbol => "Symbol",
            other => other.script().name(),
        }
    }
}

impl fmt::Display for WritingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WritingSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        WritingSystem::ALL
            .into_iter()
            .find(|ws| {
                let name: String = ws.name().chars().filter(|c| *c != ' ').collect();
                name.eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| format!("unknown writing system '{s}'"))
    }
}

/// Per-family knowledge about one writing system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WritingSystemStatus {
    /// Nobody has asked the platform yet
    #[default]
    Unprobed,
    Unsupported,
    Supported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_table_position() {
        for (pos, ws) in WritingSystem::ALL.iter().enumerate() {
            assert_eq!(ws.index(), pos);
        }
    }

    #[test]
    fn test_han_writing_systems() {
        let han: Vec<_> = Script::Han.writing_systems().collect();
        assert_eq!(
            han,
            vec![
                WritingSystem::SimplifiedChinese,
                WritingSystem::TraditionalChinese,
                WritingSystem::Japanese,
            ]
        );
    }

    #[test]
    fn test_common_has_only_symbol() {
        let common: Vec<_> = Script::Common.writing_systems().collect();
        assert_eq!(common, vec![WritingSystem::Symbol]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("arabic".parse::<Script>(), Ok(Script::Arabic));
        assert_eq!(
            "simplified-chinese".parse::<WritingSystem>(),
            Ok(WritingSystem::SimplifiedChinese)
        );
        assert_eq!("Latin".parse::<WritingSystem>(), Ok(WritingSystem::Latin));
        assert!("klingon".parse::<Script>().is_err());
    }
}
