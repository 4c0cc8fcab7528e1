// this_file: crates/fontres-db/src/catalog.rs

//! The catalog: every known face, as a five-level tree
//!
//! ```text
//! Family ─┬─ Foundry ─┬─ Style ─┬─ SizeVariant ─┬─ EncodingVariant
//!         │           │         │               └─ ...
//!         │           │         └─ ...
//!         │           └─ ...
//!         └─ ...
//! ```
//!
//! Families and foundries are kept sorted by case-insensitive name, styles by
//! [`StyleKey::ordinal`]. Size and encoding variants keep insertion order and
//! are unique within their parent. Every `*_or_insert` lookup is idempotent:
//! asking twice for the same key yields the same node.
//!
//! Node positions shift when siblings are inserted, so anything that
//! remembers a position (a [`ResolvedDescriptor`]) also remembers the
//! catalog generation it was taken from.

use std::cmp::Ordering;

use fontres_core::{
    Encoding, FaceInfo, FaceSink, NodePath, Pitch, ResolveError, ResolvedDescriptor, Result,
    SizeKind, StyleKey, WritingSystem, WritingSystemStatus,
};

/// Compares two names ignoring case, the order families and foundries sort in
pub fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn caseless_eq(a: &str, b: &str) -> bool {
    caseless_cmp(a, b) == Ordering::Equal
}

/// One encoding a size variant can be instantiated with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingVariant {
    encoding: Encoding,
    pitch: Pitch,
}

impl EncodingVariant {
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }
}

/// One pixel size (or the scalable outline) of a style
#[derive(Debug, Clone)]
pub struct SizeVariant {
    kind: SizeKind,
    encodings: Vec<EncodingVariant>,
}

impl SizeVariant {
    fn new(kind: SizeKind) -> Self {
        Self {
            kind,
            encodings: Vec::new(),
        }
    }

    pub fn kind(&self) -> SizeKind {
        self.kind
    }

    pub fn encodings(&self) -> &[EncodingVariant] {
        &self.encodings
    }

    pub fn encoding_position(&self, encoding: Encoding) -> Option<usize> {
        self.encodings.iter().position(|e| e.encoding == encoding)
    }

    /// Finds the variant for `encoding`, adding it with `pitch` if missing
    pub fn encoding_or_insert(&mut self, encoding: Encoding, pitch: Pitch) -> &mut EncodingVariant {
        let pos = match self.encoding_position(encoding) {
            Some(pos) => pos,
            None => {
                self.encodings.push(EncodingVariant { encoding, pitch });
                self.encodings.len() - 1
            }
        };
        &mut self.encodings[pos]
    }
}

/// One weight/slant/stretch combination within a foundry
#[derive(Debug, Clone)]
pub struct Style {
    key: StyleKey,
    smooth_scalable: bool,
    bitmap_scalable: bool,
    sizes: Vec<SizeVariant>,
}

impl Style {
    fn new(key: StyleKey) -> Self {
        Self {
            key,
            smooth_scalable: false,
            bitmap_scalable: false,
            sizes: Vec::new(),
        }
    }

    pub fn key(&self) -> StyleKey {
        self.key
    }

    pub fn is_smooth_scalable(&self) -> bool {
        self.smooth_scalable
    }

    pub fn is_bitmap_scalable(&self) -> bool {
        self.bitmap_scalable
    }

    pub fn sizes(&self) -> &[SizeVariant] {
        &self.sizes
    }

    pub fn size_position(&self, kind: SizeKind) -> Option<usize> {
        self.sizes.iter().position(|s| s.kind == kind)
    }

    /// Finds the size variant for `kind`, adding it if missing
    pub fn size_or_insert(&mut self, kind: SizeKind) -> &mut SizeVariant {
        match kind {
            SizeKind::SmoothScalable => self.smooth_scalable = true,
            kind if kind.is_scalable_bitmap() => self.bitmap_scalable = true,
            _ => {}
        }
        let pos = match self.size_position(kind) {
            Some(pos) => pos,
            None => {
                self.sizes.push(SizeVariant::new(kind));
                self.sizes.len() - 1
            }
        };
        &mut self.sizes[pos]
    }

    /// Fixed pixel sizes, ascending, without the scalable-bitmap master
    pub fn pixel_sizes(&self) -> Vec<u16> {
        let mut sizes: Vec<u16> = self
            .sizes
            .iter()
            .filter_map(|s| s.kind.pixel_size())
            .filter(|px| *px != 0)
            .collect();
        sizes.sort_unstable();
        sizes
    }
}

/// A type foundry's cut of a family; the empty name stands for "any"
#[derive(Debug, Clone)]
pub struct Foundry {
    name: String,
    styles: Vec<Style>,
}

impl Foundry {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            styles: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Binary search over styles sorted by ordinal, using the wildcard-aware
    /// key equality
    ///
    /// `Err` carries the position that keeps the list sorted.
    pub fn search_style(&self, key: &StyleKey) -> std::result::Result<usize, usize> {
        let (mut low, mut high) = (0, self.styles.len());
        while low < high {
            let mid = (low + high) / 2;
            let probe = &self.styles[mid].key;
            if probe == key {
                return Ok(mid);
            }
            if probe.cmp_ordinal(key) == Ordering::Less {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        Err(low)
    }

    pub fn style(&self, key: &StyleKey) -> Option<&Style> {
        self.search_style(key).ok().map(|pos| &self.styles[pos])
    }

    /// Finds the style equal to `key`, inserting it in sorted position if missing
    pub fn style_or_insert(&mut self, key: StyleKey) -> &mut Style {
        let pos = match self.search_style(&key) {
            Ok(pos) => pos,
            Err(pos) => {
                self.styles.insert(pos, Style::new(key));
                pos
            }
        };
        &mut self.styles[pos]
    }
}

/// All foundries offering one family name
#[derive(Debug, Clone)]
pub struct Family {
    name: String,
    foundries: Vec<Foundry>,
    writing_systems: [WritingSystemStatus; WritingSystem::COUNT],
    has_fixed: bool,
    has_proportional: bool,
}

impl Family {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            foundries: Vec::new(),
            writing_systems: [WritingSystemStatus::Unprobed; WritingSystem::COUNT],
            has_fixed: false,
            has_proportional: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn foundries(&self) -> &[Foundry] {
        &self.foundries
    }

    /// True when every face seen so far has fixed-width advances
    pub fn is_fixed_pitch(&self) -> bool {
        self.has_fixed && !self.has_proportional
    }

    pub fn writing_system_status(&self, writing_system: WritingSystem) -> WritingSystemStatus {
        self.writing_systems[writing_system.index()]
    }

    pub fn set_writing_system_status(
        &mut self,
        writing_system: WritingSystem,
        status: WritingSystemStatus,
    ) {
        self.writing_systems[writing_system.index()] = status;
    }

    /// Writing systems confirmed as supported
    pub fn supported_writing_systems(&self) -> impl Iterator<Item = WritingSystem> + '_ {
        WritingSystem::ALL
            .into_iter()
            .filter(|ws| self.writing_system_status(*ws) == WritingSystemStatus::Supported)
    }

    fn note_pitch(&mut self, pitch: Pitch) {
        match pitch {
            Pitch::Monospace | Pitch::Cellular => self.has_fixed = true,
            Pitch::Proportional => self.has_proportional = true,
            Pitch::Any => {}
        }
    }

    pub fn search_foundry(&self, name: &str) -> std::result::Result<usize, usize> {
        self.foundries
            .binary_search_by(|probe| caseless_cmp(&probe.name, name))
    }

    pub fn foundry(&self, name: &str) -> Option<&Foundry> {
        self.search_foundry(name).ok().map(|pos| &self.foundries[pos])
    }

    /// Finds the foundry named `name` (any case), inserting it sorted if missing
    pub fn foundry_or_insert(&mut self, name: &str) -> &mut Foundry {
        let pos = match self.search_foundry(name) {
            Ok(pos) => pos,
            Err(pos) => {
                self.foundries.insert(pos, Foundry::new(name));
                pos
            }
        };
        &mut self.foundries[pos]
    }
}

/// The five nodes a descriptor points at
#[derive(Debug, Clone, Copy)]
pub struct FaceRef<'a> {
    pub family: &'a Family,
    pub foundry: &'a Foundry,
    pub style: &'a Style,
    pub size: &'a SizeVariant,
    pub encoding: &'a EncodingVariant,
}

/// Root of the tree; exclusively owns every node
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    families: Vec<Family>,
    generation: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped by every structural change
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn search_family(&self, name: &str) -> std::result::Result<usize, usize> {
        self.families
            .binary_search_by(|probe| caseless_cmp(&probe.name, name))
    }

    pub fn family(&self, name: &str) -> Option<&Family> {
        self.search_family(name).ok().map(|pos| &self.families[pos])
    }

    pub fn family_at(&self, index: usize) -> Option<&Family> {
        self.families.get(index)
    }

    pub(crate) fn family_at_mut(&mut self, index: usize) -> Option<&mut Family> {
        self.families.get_mut(index)
    }

    /// Finds the family named `name` (any case), inserting it sorted if missing
    pub fn family_or_insert(&mut self, name: &str) -> &mut Family {
        self.generation += 1;
        let pos = match self.search_family(name) {
            Ok(pos) => pos,
            Err(pos) => {
                self.families.insert(pos, Family::new(name));
                pos
            }
        };
        &mut self.families[pos]
    }

    /// Records one face, creating whatever nodes it needs
    pub fn insert_face(&mut self, face: &FaceInfo) {
        let family = self.family_or_insert(face.family.trim());
        for ws in &face.writing_systems {
            family.set_writing_system_status(*ws, WritingSystemStatus::Supported);
        }
        family.note_pitch(face.pitch);

        family
            .foundry_or_insert(face.foundry.trim())
            .style_or_insert(face.style_key())
            .size_or_insert(face.size)
            .encoding_or_insert(face.encoding, face.pitch);
    }

    /// Drops every family; positions from earlier generations become stale
    pub fn clear(&mut self) {
        self.families.clear();
        self.generation += 1;
    }

    /// Follows a descriptor back into the tree
    ///
    /// Fails with [`ResolveError::StaleDescriptor`] when the catalog changed
    /// since the descriptor was produced.
    pub fn face(&self, descriptor: &ResolvedDescriptor) -> Result<FaceRef<'_>> {
        if descriptor.generation != self.generation {
            return Err(ResolveError::StaleDescriptor {
                descriptor: descriptor.generation,
                catalog: self.generation,
            });
        }
        self.face_at(&descriptor.path).ok_or(ResolveError::StaleDescriptor {
            descriptor: descriptor.generation,
            catalog: self.generation,
        })
    }

    pub fn face_at(&self, path: &NodePath) -> Option<FaceRef<'_>> {
        let family = self.families.get(path.family)?;
        let foundry = family.foundries.get(path.foundry)?;
        let style = foundry.styles.get(path.style)?;
        let size = style.sizes.get(path.size)?;
        let encoding = size.encodings.get(path.encoding)?;
        Some(FaceRef {
            family,
            foundry,
            style,
            size,
            encoding,
        })
    }

    /// Total number of encoding variants, i.e. distinct instantiable faces
    pub fn face_count(&self) -> usize {
        self.families
            .iter()
            .flat_map(|f| &f.foundries)
            .flat_map(|f| &f.styles)
            .flat_map(|s| &s.sizes)
            .map(|s| s.encodings.len())
            .sum()
    }
}

impl FaceSink for Catalog {
    fn insert_face(&mut self, face: FaceInfo) {
        Catalog::insert_face(self, &face);
    }
}

/// Case-insensitive name match shared by the matcher's foundry filter
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    caseless_eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontres_core::{weight, EncodingId, Slant};

    fn face(family: &str, foundry: &str, weight: u8, size: SizeKind) -> FaceInfo {
        FaceInfo::outline(family, StyleKey::new(weight, Slant::Roman, 0), Pitch::Proportional)
            .with_foundry(foundry)
            .with_size(size)
            .with_writing_systems([WritingSystem::Latin])
    }

    #[test]
    fn test_family_lookup_ignores_case() {
        let mut catalog = Catalog::new();
        catalog.insert_face(&face("Helvetica", "", weight::NORMAL, SizeKind::SmoothScalable));
        assert!(catalog.family("helvetica").is_some());
        assert!(catalog.family("HELVETICA").is_some());
        assert!(catalog.family("Helvet").is_none());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut catalog = Catalog::new();
        let f = face("Times", "Adobe", weight::BOLD, SizeKind::Fixed(12));
        catalog.insert_face(&f);
        catalog.insert_face(&f);
        catalog.insert_face(&FaceInfo {
            family: "TIMES".into(),
            foundry: "adobe".into(),
            ..f.clone()
        });
        assert_eq!(catalog.family_count(), 1);
        assert_eq!(catalog.face_count(), 1);
        let family = catalog.family("times").unwrap();
        assert_eq!(family.foundries().len(), 1);
        assert_eq!(family.foundries()[0].styles().len(), 1);
    }

    #[test]
    fn test_lists_stay_sorted() {
        let mut catalog = Catalog::new();
        for name in ["Zapf", "arial", "Courier", "bitstream charter", "Arial Black"] {
            catalog.insert_face(&face(name, "", weight::NORMAL, SizeKind::SmoothScalable));
        }
        let names: Vec<&str> = catalog.families().iter().map(Family::name).collect();
        assert_eq!(names, vec!["arial", "Arial Black", "bitstream charter", "Courier", "Zapf"]);

        for w in [weight::BLACK, weight::LIGHT, weight::BOLD, weight::NORMAL] {
            catalog.insert_face(&face("Zapf", "urw", w, SizeKind::SmoothScalable));
        }
        let foundry = catalog.family("zapf").unwrap().foundry("URW").unwrap();
        let weights: Vec<u8> = foundry.styles().iter().map(|s| s.key().weight).collect();
        assert_eq!(weights, vec![weight::LIGHT, weight::NORMAL, weight::BOLD, weight::BLACK]);
    }

    #[test]
    fn test_wildcard_stretch_reuses_style() {
        let mut foundry = Foundry::new("");
        foundry.style_or_insert(StyleKey::new(50, Slant::Roman, 120));
        foundry.style_or_insert(StyleKey::new(50, Slant::Roman, 0));
        assert_eq!(foundry.styles().len(), 1);
        foundry.style_or_insert(StyleKey::new(50, Slant::Roman, 100));
        assert_eq!(foundry.styles().len(), 2);
    }

    #[test]
    fn test_scalable_flags() {
        let mut catalog = Catalog::new();
        catalog.insert_face(&face("Fixed", "misc", weight::NORMAL, SizeKind::SCALABLE_BITMAP));
        catalog.insert_face(&face("Fixed", "misc", weight::NORMAL, SizeKind::Fixed(13)));
        let style = &catalog.family("fixed").unwrap().foundries()[0].styles()[0];
        assert!(style.is_bitmap_scalable());
        assert!(!style.is_smooth_scalable());
        assert_eq!(style.pixel_sizes(), vec![13]);
    }

    #[test]
    fn test_encodings_unique_per_size() {
        let mut size = SizeVariant::new(SizeKind::Fixed(10));
        let latin1 = Encoding::Id(EncodingId::LATIN1);
        size.encoding_or_insert(latin1, Pitch::Monospace);
        size.encoding_or_insert(latin1, Pitch::Proportional);
        size.encoding_or_insert(Encoding::NativeOutline, Pitch::Monospace);
        assert_eq!(size.encodings().len(), 2);
        assert_eq!(size.encodings()[0].pitch(), Pitch::Monospace);
    }

    #[test]
    fn test_fixed_pitch_flag() {
        let mut catalog = Catalog::new();
        let mono = FaceInfo::outline("Courier", StyleKey::default(), Pitch::Monospace);
        catalog.insert_face(&mono);
        assert!(catalog.family("courier").unwrap().is_fixed_pitch());

        let prop = FaceInfo::outline("Courier", StyleKey::default(), Pitch::Proportional);
        catalog.insert_face(&prop);
        assert!(!catalog.family("courier").unwrap().is_fixed_pitch());
    }

    #[test]
    fn test_clear_bumps_generation() {
        let mut catalog = Catalog::new();
        catalog.insert_face(&face("Helvetica", "", weight::NORMAL, SizeKind::SmoothScalable));
        let before = catalog.generation();
        catalog.clear();
        assert!(catalog.is_empty());
        assert!(catalog.generation() > before);
    }
}
