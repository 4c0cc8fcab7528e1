// this_file: crates/fontres-db/src/query.rs

//! Read-only questions about what the catalog holds
//!
//! These walk the tree directly and never probe: a writing system that was
//! never reported or probed counts as unsupported here.

use fontres_core::{StyleKey, WritingSystem, WritingSystemStatus};

use crate::catalog::{Catalog, Family, Style};

/// Family names supporting `writing_system` (all of them for `Any`), in
/// catalog order
pub fn families(catalog: &Catalog, writing_system: WritingSystem) -> Vec<String> {
    catalog
        .families()
        .iter()
        .filter(|family| {
            writing_system == WritingSystem::Any
                || family.writing_system_status(writing_system) == WritingSystemStatus::Supported
        })
        .map(|family| family.name().to_string())
        .collect()
}

/// Human readable name of a style: `"Normal"`, `"Bold Italic"`, ...
pub fn style_string(key: &StyleKey) -> String {
    key.to_string()
}

/// Style names offered for `family` by any foundry, ascending and unique
pub fn styles(catalog: &Catalog, family: &str) -> Vec<String> {
    let Some(family) = catalog.family(family) else {
        return Vec::new();
    };
    let mut keys: Vec<StyleKey> = family
        .foundries()
        .iter()
        .flat_map(|foundry| foundry.styles())
        .map(Style::key)
        .collect();
    keys.sort_by(|a, b| a.cmp_ordinal(b));
    let mut names: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        let name = style_string(&key);
        if names.last() != Some(&name) {
            names.push(name);
        }
    }
    names
}

pub fn is_fixed_pitch(catalog: &Catalog, family: &str) -> bool {
    catalog.family(family).is_some_and(Family::is_fixed_pitch)
}

/// Styles of `family` matching `style` (any style if `None`)
fn matching_styles<'a>(
    catalog: &'a Catalog,
    family: &str,
    style: Option<&'a StyleKey>,
) -> impl Iterator<Item = &'a Style> + 'a {
    catalog
        .family(family)
        .into_iter()
        .flat_map(|family| family.foundries())
        .flat_map(|foundry| foundry.styles())
        .filter(move |s| style.map_or(true, |wanted| s.key() == *wanted))
}

pub fn is_smoothly_scalable(catalog: &Catalog, family: &str, style: Option<&StyleKey>) -> bool {
    matching_styles(catalog, family, style).any(Style::is_smooth_scalable)
}

pub fn is_bitmap_scalable(catalog: &Catalog, family: &str, style: Option<&StyleKey>) -> bool {
    matching_styles(catalog, family, style).any(Style::is_bitmap_scalable)
}

/// Smoothly or bitmap scalable
pub fn is_scalable(catalog: &Catalog, family: &str, style: Option<&StyleKey>) -> bool {
    matching_styles(catalog, family, style).any(|s| s.is_smooth_scalable() || s.is_bitmap_scalable())
}

/// Fixed pixel sizes available, ascending and unique
pub fn pixel_sizes(catalog: &Catalog, family: &str, style: Option<&StyleKey>) -> Vec<u16> {
    let mut sizes: Vec<u16> = matching_styles(catalog, family, style)
        .flat_map(Style::pixel_sizes)
        .collect();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

/// Writing systems `family` is known to support
pub fn writing_systems(catalog: &Catalog, family: &str) -> Vec<WritingSystem> {
    catalog
        .family(family)
        .map(|family| family.supported_writing_systems().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontres_core::{weight, Encoding, EncodingId, FaceInfo, Pitch, SizeKind, Slant};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_face(
            &FaceInfo::outline("Helvetica", StyleKey::default(), Pitch::Proportional)
                .with_writing_systems([WritingSystem::Latin, WritingSystem::Greek]),
        );
        catalog.insert_face(
            &FaceInfo::outline(
                "Helvetica",
                StyleKey::new(weight::BOLD, Slant::Italic, 0),
                Pitch::Proportional,
            )
            .with_foundry("Adobe"),
        );
        for px in [14, 10, 12, 10] {
            catalog.insert_face(
                &FaceInfo::outline("Fixed", StyleKey::default(), Pitch::Monospace)
                    .with_size(SizeKind::Fixed(px))
                    .with_encoding(Encoding::Id(EncodingId::LATIN1))
                    .with_writing_systems([WritingSystem::Latin]),
            );
        }
        catalog
    }

    #[test]
    fn test_families_by_writing_system() {
        let catalog = catalog();
        assert_eq!(families(&catalog, WritingSystem::Any), ["Fixed", "Helvetica"]);
        assert_eq!(families(&catalog, WritingSystem::Greek), ["Helvetica"]);
        assert!(families(&catalog, WritingSystem::Arabic).is_empty());
    }

    #[test]
    fn test_styles_across_foundries() {
        let catalog = catalog();
        assert_eq!(styles(&catalog, "helvetica"), ["Normal", "Bold Italic"]);
        assert!(styles(&catalog, "nope").is_empty());
    }

    #[test]
    fn test_scalability_and_sizes() {
        let catalog = catalog();
        assert!(is_smoothly_scalable(&catalog, "Helvetica", None));
        assert!(!is_scalable(&catalog, "Fixed", None));
        assert!(!is_bitmap_scalable(&catalog, "Fixed", None));
        assert!(is_fixed_pitch(&catalog, "fixed"));
        assert!(!is_fixed_pitch(&catalog, "helvetica"));
        assert_eq!(pixel_sizes(&catalog, "Fixed", Some(&StyleKey::default())), [10, 12, 14]);
        let bold = StyleKey::new(weight::BOLD, Slant::Roman, 0);
        assert!(pixel_sizes(&catalog, "Fixed", Some(&bold)).is_empty());
    }

    #[test]
    fn test_writing_systems() {
        let catalog = catalog();
        assert_eq!(
            writing_systems(&catalog, "Helvetica"),
            [WritingSystem::Latin, WritingSystem::Greek]
        );
    }
}
