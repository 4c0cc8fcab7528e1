// this_file: crates/fontres-core/tests/serde_shapes.rs

use fontres_core::config::ResolverConfig;
use fontres_core::{
    Encoding, EncodingId, FaceInfo, NodePath, Pitch, ResolvedDescriptor, SizeKind, Slant,
    StyleHint, StyleKey, WritingSystem,
};

#[test]
fn test_face_info_when_minimal_json_then_defaults_fill_in() {
    let face: FaceInfo = serde_json::from_str(
        r#"{ "family": "Times", "weight": 75, "size": { "fixed": 14 },
             "encoding": { "id": "iso8859-7" } }"#,
    )
    .unwrap();
    assert_eq!(face.foundry, "");
    assert_eq!(face.slant, Slant::Roman);
    assert_eq!(face.stretch, 0);
    assert_eq!(face.pitch, Pitch::Any);
    assert_eq!(face.size, SizeKind::Fixed(14));
    assert_eq!(face.encoding.id().map(EncodingId::name), Some("iso8859-7"));
    assert!(face.writing_systems.is_empty());
}

#[test]
fn test_face_info_when_unknown_encoding_then_rejected() {
    let result: Result<FaceInfo, _> = serde_json::from_str(
        r#"{ "family": "Times", "weight": 50, "size": "smooth-scalable",
             "encoding": { "id": "klingon-1" } }"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_descriptor_when_serialized_then_names_are_kebab_case() {
    let descriptor = ResolvedDescriptor {
        generation: 3,
        path: NodePath {
            family: 0,
            foundry: 0,
            style: 1,
            size: 0,
            encoding: 0,
        },
        family: "Helvetica".into(),
        foundry: String::new(),
        style: StyleKey::new(75, Slant::Italic, 0),
        smooth_scalable: true,
        bitmap_scalable: false,
        size: SizeKind::SmoothScalable,
        encoding: Encoding::NativeOutline,
        pitch: Pitch::Proportional,
        pixel_size: 12,
        score: 0,
    };
    let value = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(value["size"], "smooth-scalable");
    assert_eq!(value["encoding"], "native-outline");
    assert_eq!(value["pitch"], "proportional");
    assert_eq!(value["style"]["slant"], "italic");
    assert_eq!(value["path"]["style"], 1);
}

#[test]
fn test_config_when_hint_family_overridden_then_others_keep_defaults() {
    let config: ResolverConfig = serde_json::from_str(
        r#"{ "fallback": { "style_hint_families": { "serif": "Georgia" },
                           "default_encoding": "iso10646-1" } }"#,
    )
    .unwrap();
    assert_eq!(config.fallback.family_for_hint(StyleHint::Serif), Some("Georgia"));
    // a map given in JSON replaces the whole default map
    assert_eq!(config.fallback.family_for_hint(StyleHint::Monospace), None);
    assert!(config
        .fallback
        .default_encoding
        .supports(WritingSystem::Arabic));
    assert_eq!(config.fallback.last_resort_font, "fixed");
}
