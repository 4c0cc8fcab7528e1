// this_file: crates/fontres-db/tests/common/mod.rs

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fontres_core::{
    Encoding, EncodingId, FaceInfo, FaceSink, Pitch, PopulationAdapter, ProbeError, Result,
    SizeKind, StyleKey, WritingSystem,
};

/// Serves a fixed face list; counts population and probe calls
#[derive(Clone, Default)]
pub struct StaticFonts {
    pub faces: Vec<FaceInfo>,
    pub probe_support: Vec<(String, WritingSystem)>,
    pub populations: Rc<Cell<usize>>,
    pub probes: Rc<RefCell<Vec<String>>>,
}

impl StaticFonts {
    pub fn new(faces: Vec<FaceInfo>) -> Self {
        Self {
            faces,
            ..Self::default()
        }
    }

    pub fn supporting_on_probe(mut self, family: &str, writing_system: WritingSystem) -> Self {
        self.probe_support.push((family.to_string(), writing_system));
        self
    }
}

impl PopulationAdapter for StaticFonts {
    fn name(&self) -> &'static str {
        "static"
    }

    fn populate(&self, sink: &mut dyn FaceSink) -> Result<()> {
        self.populations.set(self.populations.get() + 1);
        for face in &self.faces {
            sink.insert_face(face.clone());
        }
        Ok(())
    }

    fn probe(
        &self,
        family: &str,
        writing_system: WritingSystem,
    ) -> std::result::Result<bool, ProbeError> {
        self.probes
            .borrow_mut()
            .push(format!("{family}/{writing_system}"));
        Ok(self
            .probe_support
            .iter()
            .any(|(f, ws)| f.eq_ignore_ascii_case(family) && *ws == writing_system))
    }
}

pub fn outline(family: &str, style: StyleKey) -> FaceInfo {
    FaceInfo::outline(family, style, Pitch::Proportional)
        .with_writing_systems([WritingSystem::Latin])
}

pub fn bitmap(family: &str, style: StyleKey, px: u16) -> FaceInfo {
    FaceInfo::outline(family, style, Pitch::Proportional)
        .with_size(SizeKind::Fixed(px))
        .with_encoding(Encoding::Id(EncodingId::LATIN1))
        .with_writing_systems([WritingSystem::Latin])
}

/// A small desktop-like font set
pub fn desktop() -> Vec<FaceInfo> {
    use fontres_core::{weight, Slant};

    let mut faces = Vec::new();
    for (w, slant) in [
        (weight::NORMAL, Slant::Roman),
        (weight::BOLD, Slant::Roman),
        (weight::NORMAL, Slant::Italic),
        (weight::BOLD, Slant::Italic),
    ] {
        let key = StyleKey::new(w, slant, 0);
        faces.push(outline("Helvetica", key));
        faces.push(outline("Times", key));
        faces.push(
            FaceInfo::outline("Courier", key, Pitch::Monospace)
                .with_writing_systems([WritingSystem::Latin]),
        );
    }
    for px in [10, 13, 20] {
        faces.push(
            FaceInfo::outline("fixed", StyleKey::default(), Pitch::Cellular)
                .with_foundry("misc")
                .with_size(SizeKind::Fixed(px))
                .with_encoding(Encoding::Id(EncodingId::LATIN1))
                .with_writing_systems([WritingSystem::Latin]),
        );
    }
    faces
}
