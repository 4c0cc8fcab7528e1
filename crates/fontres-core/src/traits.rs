//! The contracts between the resolver and its collaborators
//!
//! - [`FaceSink`] - Where discovered faces go (the catalog implements it)
//! - [`PopulationAdapter`] - Whoever knows what the platform has installed
//! - [`ResourceLoader`] - The backend that turns a descriptor into a usable font

use crate::descriptor::{FaceInfo, ResolvedDescriptor};
use crate::error::{LoadError, ProbeError, Result};
use crate::script::WritingSystem;

/// Receives faces during population
pub trait FaceSink {
    fn insert_face(&mut self, face: FaceInfo);
}

/// Discovers platform and application faces
///
/// The resolver never calls a platform font API itself; everything it knows
/// about installed fonts arrives through this trait.
///
/// ```ignore
/// struct StaticFonts(Vec<FaceInfo>);
///
/// impl PopulationAdapter for StaticFonts {
///     fn name(&self) -> &'static str {
///         "static"
///     }
///
///     fn populate(&self, sink: &mut dyn FaceSink) -> Result<()> {
///         for face in &self.0 {
///             sink.insert_face(face.clone());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait PopulationAdapter {
    /// Used in log messages
    fn name(&self) -> &'static str;

    /// Insert every face the platform currently offers
    fn populate(&self, sink: &mut dyn FaceSink) -> Result<()>;

    /// Ask whether `family` covers `writing_system`
    ///
    /// Called once per family and writing system the first time a request
    /// needs it. `Ok(false)` is remembered as unsupported; errors are not
    /// remembered. The default says every coverage fact was already reported
    /// at population time.
    fn probe(
        &self,
        _family: &str,
        _writing_system: WritingSystem,
    ) -> std::result::Result<bool, ProbeError> {
        Ok(false)
    }
}

/// Materializes resolved descriptors into backend resources
pub trait ResourceLoader {
    type Resource;

    fn load(
        &self,
        descriptor: &ResolvedDescriptor,
    ) -> std::result::Result<Self::Resource, LoadError>;
}
