//! Face manifests: the CLI's stand-in for a platform font list
//!
//! ```json
//! {
//!   "faces": [
//!     { "family": "Helvetica", "weight": 50, "size": "smooth-scalable",
//!       "encoding": "native-outline", "writing_systems": ["latin"] },
//!     { "family": "fixed", "foundry": "misc", "weight": 50,
//!       "size": { "fixed": 13 }, "encoding": { "id": "iso8859-1" }, "pitch": "cellular" }
//!   ],
//!   "probes": { "Helvetica": ["greek"] },
//!   "substitutions": { "Arial": ["Helvetica"] }
//! }
//! ```
//!
//! `probes` lists writing systems a family turns out to cover only when
//! asked, the way a platform answers a coverage query it could not report
//! up front.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use fontres_core::{
    FaceInfo, FaceSink, PopulationAdapter, ProbeError, ResolveError, WritingSystem,
};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub faces: Vec<FaceInfo>,
    pub probes: BTreeMap<String, Vec<WritingSystem>>,
    pub substitutions: BTreeMap<String, Vec<String>>,
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Population adapter serving a manifest's faces and probe answers
pub struct ManifestAdapter {
    faces: Vec<FaceInfo>,
    probes: BTreeMap<String, Vec<WritingSystem>>,
}

impl ManifestAdapter {
    pub fn new(manifest: &Manifest) -> Self {
        Self {
            faces: manifest.faces.clone(),
            probes: manifest
                .probes
                .iter()
                .map(|(family, systems)| (family.to_lowercase(), systems.clone()))
                .collect(),
        }
    }
}

impl PopulationAdapter for ManifestAdapter {
    fn name(&self) -> &'static str {
        "manifest"
    }

    /// Fails without inserting anything when a face has no family name
    fn populate(&self, sink: &mut dyn FaceSink) -> fontres_core::Result<()> {
        if let Some(position) = self.faces.iter().position(|face| face.family.trim().is_empty()) {
            return Err(ResolveError::Population(format!(
                "manifest face {position} has an empty family name"
            )));
        }
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
        Ok(self
            .probes
            .get(&family.to_lowercase())
            .is_some_and(|systems| systems.contains(&writing_system)))
    }
}
