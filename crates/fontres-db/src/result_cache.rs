// this_file: crates/fontres-db/src/result_cache.rs

//! Remember what requests resolved to, and share what they loaded
//!
//! Two maps live here:
//! - Descriptors, keyed by the normalized request, so a repeated request
//!   skips the fallback chain entirely
//! - Resources, keyed by the matched face and pixel size, so different
//!   requests that land on the same face share one loaded resource
//!
//! Both belong to one catalog generation. When the catalog moves on, the
//! whole cache is dropped, since every stored node path may now point
//! somewhere else.

use std::collections::HashMap;
use std::sync::Arc;

use lru::LruCache;

use fontres_core::config::CacheConfig;
use fontres_core::{
    EncodingId, FontRequest, NodePath, Pitch, ResolvedDescriptor, Script, Slant, StyleHint,
};

/// A request with everything that can change its outcome, normalized
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    families: Vec<String>,
    foundry: Option<String>,
    weight: u8,
    slant: Slant,
    stretch: u16,
    pixel_size: u16,
    pitch: Pitch,
    script: Script,
    style_hint: StyleHint,
    strategy: u16,
    force_encoding: Option<EncodingId>,
    display: Option<u32>,
}

impl RequestKey {
    pub fn new(request: &FontRequest) -> Self {
        Self {
            families: request
                .family_list()
                .iter()
                .map(|name| name.to_string().to_lowercase())
                .collect(),
            foundry: request
                .foundry
                .as_deref()
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_lowercase),
            weight: request.style.weight,
            slant: request.style.slant,
            stretch: request.style.stretch,
            pixel_size: request.pixel_size,
            pitch: request.pitch,
            script: request.script,
            style_hint: request.style_hint,
            strategy: request.strategy.bits(),
            force_encoding: request.force_encoding,
            display: request.display,
        }
    }
}

impl From<&FontRequest> for RequestKey {
    fn from(request: &FontRequest) -> Self {
        Self::new(request)
    }
}

/// Identifies one instantiated face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceKey {
    pub path: NodePath,
    pub pixel_size: u16,
}

impl From<&ResolvedDescriptor> for FaceKey {
    fn from(descriptor: &ResolvedDescriptor) -> Self {
        Self {
            path: descriptor.path,
            pixel_size: descriptor.pixel_size,
        }
    }
}

/// Lookup statistics since the cache was created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub total_requests: u64,
    pub hits: u64,
    pub misses: u64,
    /// Loads answered by a resource another request already loaded
    pub shared_resources: u64,
    /// Times the whole cache was dropped
    pub invalidations: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_requests as f64
        }
    }
}

/// Descriptor memo plus shared resources for one catalog generation
pub struct ResultCache<R> {
    descriptors: HashMap<RequestKey, ResolvedDescriptor>,
    resources: LruCache<FaceKey, Arc<R>>,
    generation: u64,
    config: CacheConfig,
    metrics: CacheMetrics,
}

impl<R> ResultCache<R> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            descriptors: HashMap::new(),
            resources: LruCache::unbounded(),
            generation: 0,
            config,
            metrics: CacheMetrics::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops everything if `generation` differs from the one cached under
    pub fn sync_generation(&mut self, generation: u64) {
        if self.generation != generation {
            if !self.is_empty() {
                log::debug!(
                    "catalog generation {} -> {}, dropping {} descriptors and {} resources",
                    self.generation,
                    generation,
                    self.descriptors.len(),
                    self.resources.len()
                );
                self.clear();
            }
            self.generation = generation;
        }
    }

    /// The descriptor memoized for `key`, counted as a hit or a miss
    pub fn descriptor(&mut self, key: &RequestKey) -> Option<ResolvedDescriptor> {
        self.metrics.total_requests += 1;
        match self.descriptors.get(key) {
            Some(descriptor) => {
                self.metrics.hits += 1;
                Some(descriptor.clone())
            }
            None => {
                self.metrics.misses += 1;
                None
            }
        }
    }

    pub fn insert_descriptor(&mut self, key: RequestKey, descriptor: ResolvedDescriptor) {
        if !self.config.enabled {
            return;
        }
        if descriptor.generation != self.generation {
            log::warn!(
                "not caching descriptor from generation {} in cache at generation {}",
                descriptor.generation,
                self.generation
            );
            return;
        }
        self.descriptors.insert(key, descriptor);
    }

    /// Forgets the descriptor for `key`; resources stay shared
    pub fn forget(&mut self, key: &RequestKey) -> Option<ResolvedDescriptor> {
        self.descriptors.remove(key)
    }

    /// Forgets every descriptor, for when the chain changes but the catalog
    /// does not
    pub fn clear_descriptors(&mut self) {
        self.descriptors.clear();
    }

    /// The resource already loaded for `face`, marked as recently used
    pub fn resource(&mut self, face: &FaceKey) -> Option<Arc<R>> {
        let found = self.resources.get(face).cloned();
        if found.is_some() {
            self.metrics.shared_resources += 1;
        }
        found
    }

    pub fn insert_resource(&mut self, face: FaceKey, resource: Arc<R>) {
        if self.config.enabled {
            self.resources.put(face, resource);
        }
    }

    /// Releases cache references to resources nobody else holds, least
    /// recently used first, until at most `max_unreferenced` of them remain
    ///
    /// Returns how many were released.
    pub fn sweep(&mut self) -> usize {
        let limit = self.config.max_unreferenced;
        let unreferenced: Vec<FaceKey> = self
            .resources
            .iter()
            .rev()
            .filter(|(_, resource)| Arc::strong_count(resource) == 1)
            .map(|(face, _)| *face)
            .collect();

        let excess = unreferenced.len().saturating_sub(limit);
        for face in unreferenced.iter().take(excess) {
            self.resources.pop(face);
        }
        if excess > 0 {
            log::debug!("swept {excess} unreferenced resources");
        }
        excess
    }

    /// Drops every descriptor and every cache reference to a resource
    pub fn clear(&mut self) {
        self.descriptors.clear();
        self.resources.clear();
        self.metrics.invalidations += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty() && self.resources.is_empty()
    }

    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.metrics.clone()
    }
}
