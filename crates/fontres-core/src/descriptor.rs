//! Faces going into the catalog and descriptors coming out of it

use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;
use crate::script::WritingSystem;
use crate::style::{Pitch, SizeKind, Slant, StyleKey};

/// One discovered face, as reported by a population adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceInfo {
    pub family: String,
    /// Empty means "any foundry"
    #[serde(default)]
    pub foundry: String,
    pub weight: u8,
    #[serde(default)]
    pub slant: Slant,
    /// `0` means the face does not declare a stretch
    #[serde(default)]
    pub stretch: u16,
    pub size: SizeKind,
    pub encoding: Encoding,
    #[serde(default)]
    pub pitch: Pitch,
    #[serde(default)]
    pub writing_systems: Vec<WritingSystem>,
}

impl FaceInfo {
    /// A smooth-scalable outline face with the platform's native encoding
    pub fn outline(family: impl Into<String>, style: StyleKey, pitch: Pitch) -> Self {
        Self {
            family: family.into(),
            foundry: String::new(),
            weight: style.weight,
            slant: style.slant,
            stretch: style.stretch,
            size: SizeKind::SmoothScalable,
            encoding: Encoding::NativeOutline,
            pitch,
            writing_systems: Vec::new(),
        }
    }

    pub fn with_foundry(mut self, foundry: impl Into<String>) -> Self {
        self.foundry = foundry.into();
        self
    }

    pub fn with_size(mut self, size: SizeKind) -> Self {
        self.size = size;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_writing_systems(
        mut self,
        writing_systems: impl IntoIterator<Item = WritingSystem>,
    ) -> Self {
        self.writing_systems = writing_systems.into_iter().collect();
        self
    }

    pub fn style_key(&self) -> StyleKey {
        StyleKey::new(self.weight, self.slant, self.stretch)
    }
}

/// Positions of the five matched nodes inside one catalog generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodePath {
    pub family: usize,
    pub foundry: usize,
    pub style: usize,
    pub size: usize,
    pub encoding: usize,
}

/// A concrete face chosen for a request
///
/// Carries both the node path (valid only while the catalog generation is
/// unchanged) and copies of the matched keys, so a backend can instantiate
/// the face without touching the catalog again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDescriptor {
    pub generation: u64,
    pub path: NodePath,
    pub family: String,
    pub foundry: String,
    pub style: StyleKey,
    pub smooth_scalable: bool,
    pub bitmap_scalable: bool,
    pub size: SizeKind,
    pub encoding: Encoding,
    pub pitch: Pitch,
    /// Pixel size the backend should instantiate
    pub pixel_size: u16,
    /// Matcher score, lower is better
    pub score: u32,
}

impl ResolvedDescriptor {
    /// True when the size variant will be scaled from a bitmap
    pub fn is_bitmap_scaled(&self) -> bool {
        !self.smooth_scalable && self.size.pixel_size() != Some(self.pixel_size)
    }
}
