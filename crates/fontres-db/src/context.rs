// this_file: crates/fontres-db/src/context.rs

//! The object that owns a catalog and everything resolved from it
//!
//! A [`FontContext`] is created at startup by whoever owns fonts for the
//! application and passed by reference to everything that resolves. It is
//! single-threaded: the catalog, the substitution table and the result
//! cache are plain fields, and `&mut self` on every operation that may
//! populate, probe or cache keeps traversals and mutations apart.
//!
//! ```
//! use fontres_core::{FaceInfo, FaceSink, PopulationAdapter, Pitch, Result, Script, StyleKey};
//! use fontres_core::{FontRequest, WritingSystem};
//! use fontres_db::FontContext;
//!
//! struct OneFace;
//!
//! impl PopulationAdapter for OneFace {
//!     fn name(&self) -> &'static str {
//!         "one-face"
//!     }
//!
//!     fn populate(&self, sink: &mut dyn FaceSink) -> Result<()> {
//!         sink.insert_face(
//!             FaceInfo::outline("Helvetica", StyleKey::default(), Pitch::Proportional)
//!                 .with_writing_systems([WritingSystem::Latin]),
//!         );
//!         Ok(())
//!     }
//! }
//!
//! let mut context: FontContext = FontContext::new(OneFace);
//! let found = context.resolve(&FontRequest::new("Arial").script(Script::Latin))?;
//! assert_eq!(found.family, "Helvetica");
//! # Ok::<(), fontres_core::ResolveError>(())
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use fontres_core::config::ResolverConfig;
use fontres_core::{
    FaceInfo, FontRequest, PopulationAdapter, ResolveError, ResolvedDescriptor, ResourceLoader,
    Result, WritingSystemStatus,
};

use crate::catalog::{Catalog, FaceRef};
use crate::fallback::FallbackResolver;
use crate::result_cache::{CacheMetrics, FaceKey, RequestKey, ResultCache};
use crate::substitution::SubstitutionTable;

/// Handle for a batch of registered application faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppFontId(u32);

/// A descriptor together with the resource loaded for it
#[derive(Debug)]
pub struct LoadedFont<R> {
    pub descriptor: ResolvedDescriptor,
    pub resource: Arc<R>,
}

type InvalidateListener = Box<dyn FnMut(u64)>;

/// Owns the catalog, the population adapter and the result cache
pub struct FontContext<R = ()> {
    catalog: Catalog,
    adapter: Box<dyn PopulationAdapter>,
    application_faces: BTreeMap<AppFontId, Vec<FaceInfo>>,
    next_app_id: u32,
    substitutions: SubstitutionTable,
    config: ResolverConfig,
    cache: ResultCache<R>,
    populated: bool,
    listeners: Vec<InvalidateListener>,
}

impl<R> FontContext<R> {
    /// A context with the default configuration
    pub fn new(adapter: impl PopulationAdapter + 'static) -> Self {
        Self::build(Box::new(adapter), ResolverConfig::default())
    }

    /// A context with `config`, rejected if it cannot work
    pub fn with_config(
        adapter: impl PopulationAdapter + 'static,
        config: ResolverConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(Box::new(adapter), config))
    }

    fn build(adapter: Box<dyn PopulationAdapter>, config: ResolverConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            adapter,
            application_faces: BTreeMap::new(),
            next_app_id: 1,
            substitutions: SubstitutionTable::new(),
            cache: ResultCache::new(config.cache.clone()),
            config,
            populated: false,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The catalog as last populated; may be empty before the first resolve
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The catalog, populating it first if needed
    pub fn populated_catalog(&mut self) -> Result<&Catalog> {
        self.ensure_populated()?;
        Ok(&self.catalog)
    }

    /// Fills the catalog from the adapter and the application faces, once
    /// per invalidation
    pub fn ensure_populated(&mut self) -> Result<()> {
        if self.populated {
            return Ok(());
        }
        self.catalog.clear();
        self.adapter.populate(&mut self.catalog)?;
        for faces in self.application_faces.values() {
            for face in faces {
                self.catalog.insert_face(face);
            }
        }
        self.populated = true;
        self.cache.sync_generation(self.catalog.generation());
        log::info!(
            "{}: catalog populated with {} families, {} faces",
            self.adapter.name(),
            self.catalog.family_count(),
            self.catalog.face_count()
        );
        Ok(())
    }

    /// Resolves `request` to a face, from the cache when possible
    ///
    /// Always ends in a descriptor or [`ResolveError::NoMatch`]; population
    /// failures are the only other error.
    pub fn resolve(&mut self, request: &FontRequest) -> Result<ResolvedDescriptor> {
        self.ensure_populated()?;
        self.cache.sync_generation(self.catalog.generation());

        let key = RequestKey::new(request);
        if self.cache.is_enabled() {
            if let Some(descriptor) = self.cache.descriptor(&key) {
                log::trace!("'{}': cached", request.family);
                return Ok(descriptor);
            }
        }

        let descriptor = FallbackResolver::new(
            &mut self.catalog,
            self.adapter.as_ref(),
            &self.substitutions,
            &self.config,
        )
        .resolve(request)?;

        self.cache.insert_descriptor(key, descriptor.clone());
        Ok(descriptor)
    }

    /// Resolves `request` and materializes the face through `loader`
    ///
    /// Requests landing on the same face at the same pixel size share one
    /// resource. A failed load is reported for this request only; when the
    /// loader says the face cannot render the script at all, the family is
    /// marked unsupported for it so the next resolve moves on.
    pub fn load<L>(&mut self, request: &FontRequest, loader: &L) -> Result<LoadedFont<R>>
    where
        L: ResourceLoader<Resource = R>,
    {
        let descriptor = self.resolve(request)?;
        let face = FaceKey::from(&descriptor);
        if let Some(resource) = self.cache.resource(&face) {
            return Ok(LoadedFont {
                descriptor,
                resource,
            });
        }

        match loader.load(&descriptor) {
            Ok(resource) => {
                let resource = Arc::new(resource);
                self.cache.insert_resource(face, Arc::clone(&resource));
                Ok(LoadedFont {
                    descriptor,
                    resource,
                })
            }
            Err(err) => {
                if err.is_permanent() {
                    if let Some(family) = self.catalog.family_at_mut(descriptor.path.family) {
                        for ws in request.script.writing_systems() {
                            family.set_writing_system_status(ws, WritingSystemStatus::Unsupported);
                        }
                    }
                    self.cache.clear_descriptors();
                    log::info!(
                        "{} cannot render {}; marked unsupported",
                        descriptor.family,
                        request.script
                    );
                } else {
                    log::warn!("loading {} failed: {}", descriptor.family, err);
                }
                Err(ResolveError::ResourceLoad(err))
            }
        }
    }

    /// Follows a descriptor back into the catalog
    pub fn face(&self, descriptor: &ResolvedDescriptor) -> Result<FaceRef<'_>> {
        self.catalog.face(descriptor)
    }

    /// Throws the catalog and the cache away; the next resolve repopulates
    ///
    /// Listeners registered with [`FontContext::on_invalidate`] hear about it
    /// with the new catalog generation.
    pub fn invalidate(&mut self) {
        self.catalog.clear();
        self.populated = false;
        let generation = self.catalog.generation();
        self.cache.sync_generation(generation);
        log::info!("font catalog invalidated (generation {generation})");
        for listener in &mut self.listeners {
            listener(generation);
        }
    }

    pub fn on_invalidate(&mut self, listener: impl FnMut(u64) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Registers faces the application ships itself
    pub fn add_application_faces(&mut self, faces: Vec<FaceInfo>) -> AppFontId {
        let id = AppFontId(self.next_app_id);
        self.next_app_id += 1;
        log::debug!("registering {} application faces as {:?}", faces.len(), id);
        self.application_faces.insert(id, faces);
        self.invalidate();
        id
    }

    /// Unregisters a batch; false if `id` is unknown
    pub fn remove_application_faces(&mut self, id: AppFontId) -> bool {
        if self.application_faces.remove(&id).is_none() {
            return false;
        }
        self.invalidate();
        true
    }

    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    pub fn insert_substitution(&mut self, family: &str, substitute: &str) {
        self.substitutions.insert(family, substitute);
        self.cache.clear_descriptors();
    }

    pub fn insert_substitutions<I, S>(&mut self, family: &str, substitutes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.substitutions.insert_all(family, substitutes);
        self.cache.clear_descriptors();
    }

    pub fn remove_substitutions(&mut self, family: &str) -> bool {
        let removed = self.substitutions.remove(family);
        if removed {
            self.cache.clear_descriptors();
        }
        removed
    }

    /// Releases cached resources nobody else holds, beyond the configured limit
    pub fn sweep(&mut self) -> usize {
        self.cache.sweep()
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }

    pub fn cache(&self) -> &ResultCache<R> {
        &self.cache
    }
}
