//! Character encodings a face can be instantiated with
//!
//! Platform backends describe legacy bitmap faces by a registry/encoding pair
//! (`iso8859-1`, `koi8-r`, ...). Each known encoding covers a fixed set of
//! writing systems. Outline faces loaded through the platform's native
//! rasterizer skip the table entirely: [`Encoding::NativeOutline`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::script::WritingSystem as Ws;
use crate::script::{Script, WritingSystem};

const LATIN: &[WritingSystem] = &[Ws::Latin];
const LATIN_VIET: &[WritingSystem] = &[Ws::Latin, Ws::Vietnamese];

/// Every encoding the resolver knows, with the writing systems it can carry.
///
/// Row position is the [`EncodingId`]; rows are never reordered.
const ENCODING_TABLE: &[(&str, &[WritingSystem])] = &[
    ("iso8859-1", LATIN),
    ("iso8859-2", LATIN),
    ("iso8859-3", LATIN),
    ("iso8859-4", LATIN),
    ("iso8859-9", LATIN),
    ("iso8859-10", LATIN),
    ("iso8859-13", LATIN),
    ("iso8859-14", LATIN),
    ("iso8859-15", LATIN),
    ("hp-roman8", LATIN),
    ("iso8859-5", &[Ws::Cyrillic]),
    ("microsoft-cp1251", &[Ws::Cyrillic]),
    ("koi8-r", &[Ws::Cyrillic]),
    ("koi8-u", &[Ws::Cyrillic]),
    ("iso8859-7", &[Ws::Greek]),
    ("iso8859-8", &[Ws::Hebrew]),
    ("iso8859-6", &[Ws::Arabic]),
    ("gb18030-0", &[Ws::SimplifiedChinese]),
    ("gb2312.1980-0", &[Ws::SimplifiedChinese]),
    ("jisx0208.1983-0", &[Ws::Japanese]),
    ("jisx0201.1976-0", &[Ws::Japanese]),
    ("ksc5601.1987-0", &[Ws::Korean]),
    ("big5-0", &[Ws::TraditionalChinese]),
    ("big5hkscs-0", &[Ws::TraditionalChinese]),
    ("tscii-0", &[Ws::Tamil]),
    ("tis620-0", &[Ws::Thai]),
    ("iso8859-11", &[Ws::Thai]),
    ("mulelao-1", &[Ws::Lao]),
    ("viscii1.1-1", LATIN_VIET),
    ("adobe-fontspecific", &[Ws::Symbol]),
    ("iso10646-1", &WritingSystem::ALL),
];

/// Index of a row in the encoding table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EncodingId(u16);

impl EncodingId {
    /// `iso8859-1`, the usual platform default
    pub const LATIN1: EncodingId = EncodingId(0);

    /// Looks an encoding up by its registry-encoding name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ENCODING_TABLE
            .iter()
            .position(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|pos| EncodingId(pos as u16))
    }

    pub fn name(self) -> &'static str {
        ENCODING_TABLE[self.0 as usize].0
    }

    pub fn writing_systems(self) -> &'static [WritingSystem] {
        ENCODING_TABLE[self.0 as usize].1
    }

    pub fn supports(self, writing_system: WritingSystem) -> bool {
        self.writing_systems().contains(&writing_system)
    }

    /// Does any writing system of `script` appear in this encoding's row?
    ///
    /// Every encoding carries `Common` text.
    pub fn supports_script(self, script: Script) -> bool {
        script == Script::Common || script.writing_systems().any(|ws| self.supports(ws))
    }

    /// Every encoding in table order
    pub fn all() -> impl Iterator<Item = EncodingId> {
        (0..ENCODING_TABLE.len()).map(|pos| EncodingId(pos as u16))
    }
}

impl fmt::Display for EncodingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for EncodingId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for EncodingId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        EncodingId::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown encoding '{name}'")))
    }
}

/// How a face maps characters to glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Loaded through the platform's outline rasterizer; covers whatever
    /// the family covers
    NativeOutline,
    /// A legacy registry/encoding pair
    Id(EncodingId),
}

impl Encoding {
    pub fn is_native(self) -> bool {
        matches!(self, Encoding::NativeOutline)
    }

    pub fn id(self) -> Option<EncodingId> {
        match self {
            Encoding::NativeOutline => None,
            Encoding::Id(id) => Some(id),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::NativeOutline => f.write_str("native"),
            Encoding::Id(id) => f.write_str(id.name()),
        }
    }
}
