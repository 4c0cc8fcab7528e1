use super::*;
use fontres_core::{weight, FaceInfo, Pitch, SizeKind, Slant, StyleKey, WritingSystem};
use proptest::prelude::*;
use std::cmp::Ordering;

fn slant() -> impl Strategy<Value = Slant> {
    prop_oneof![Just(Slant::Roman), Just(Slant::Italic), Just(Slant::Oblique)]
}

fn face() -> impl Strategy<Value = FaceInfo> {
    (
        "[A-Za-z]{1,6}",
        prop_oneof![Just(String::new()), "[A-Za-z]{1,4}"],
        0..=weight::MAX,
        slant(),
        prop_oneof![Just(0u16), 50..=200u16],
        prop_oneof![Just(SizeKind::SmoothScalable), (0..40u16).prop_map(SizeKind::Fixed)],
    )
        .prop_map(|(family, foundry, w, slant, stretch, size)| {
            FaceInfo::outline(family, StyleKey::new(w, slant, stretch), Pitch::Proportional)
                .with_foundry(foundry)
                .with_size(size)
                .with_writing_systems([WritingSystem::Latin])
        })
}

// Property: every sorted level stays sorted after arbitrary insertions
proptest! {
    #[test]
    fn prop_catalog_levels_stay_sorted(faces in prop::collection::vec(face(), 0..60)) {
        let mut catalog = Catalog::new();
        for face in &faces {
            catalog.insert_face(face);
        }

        for pair in catalog.families().windows(2) {
            prop_assert_eq!(catalog::caseless_cmp(pair[0].name(), pair[1].name()), Ordering::Less);
        }
        for family in catalog.families() {
            for pair in family.foundries().windows(2) {
                prop_assert_eq!(
                    catalog::caseless_cmp(pair[0].name(), pair[1].name()),
                    Ordering::Less
                );
            }
            for foundry in family.foundries() {
                for pair in foundry.styles().windows(2) {
                    prop_assert_ne!(pair[0].key().cmp_ordinal(&pair[1].key()), Ordering::Greater);
                }
            }
        }
    }
}

// Property: inserting the same faces again changes nothing
proptest! {
    #[test]
    fn prop_insertion_is_idempotent(faces in prop::collection::vec(face(), 1..30)) {
        let mut catalog = Catalog::new();
        for face in &faces {
            catalog.insert_face(face);
        }
        let families = catalog.family_count();
        let total = catalog.face_count();

        for face in &faces {
            catalog.insert_face(face);
        }
        prop_assert_eq!(catalog.family_count(), families);
        prop_assert_eq!(catalog.face_count(), total);
    }
}

// Property: every inserted face can be found again by its own keys
proptest! {
    #[test]
    fn prop_inserted_face_is_reachable(faces in prop::collection::vec(face(), 1..30)) {
        let mut catalog = Catalog::new();
        for face in &faces {
            catalog.insert_face(face);
        }
        for face in &faces {
            let family = catalog.family(&face.family);
            prop_assert!(family.is_some());
            let style = family
                .and_then(|f| f.foundry(&face.foundry))
                .and_then(|f| f.style(&face.style_key()));
            prop_assert!(style.is_some());
            prop_assert!(style.and_then(|s| s.size_position(face.size)).is_some());
        }
    }
}
