//! Resolver configuration
//!
//! Everything the matcher and fallback chain treat as policy lives here:
//! the empirically tuned scoring thresholds, the per-hint default families,
//! the last-resort names, and the result-cache limits.
//!
//! ```
//! use fontres_core::config::ResolverConfig;
//!
//! let config = ResolverConfig::default();
//! assert_eq!(config.tuning.short_circuit_score, 10);
//! assert!(config.cache.enabled);
//! ```
//!
//! # Environment Variables
//!
//! [`ResolverConfig::from_env`] starts from the defaults and applies:
//!
//! - `FONTRES_CACHE=0` (or `false`, `off`, `no`) disables the result cache
//! - `FONTRES_CACHE_LIMIT=<n>` sets how many unreferenced resources survive a sweep

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::encoding::EncodingId;
use crate::error::{ResolveError, Result};
use crate::request::StyleHint;

/// Scoring thresholds used by the matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchTuning {
    /// When the nearest bitmap is off by `distance * 10 / pixel_size >= ratio`,
    /// a scalable bitmap is used instead
    pub bitmap_distance_ratio: u32,
    /// Scores below this end the search early
    pub short_circuit_score: u32,
}

impl Default for MatchTuning {
    fn default() -> Self {
        Self {
            bitmap_distance_ratio: 2,
            short_circuit_score: 10,
        }
    }
}

/// Names the fallback chain appends after the requested families
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Default family for each style hint
    pub style_hint_families: BTreeMap<StyleHint, String>,
    /// The application-wide default family, tried after the hint default
    pub application_default_family: Option<String>,
    /// The platform's last-resort family
    pub last_resort_family: String,
    /// Tried after the wildcard pass; the name of a face that always exists
    pub last_resort_font: String,
    /// Encoding preferred over others when native outlines are unavailable
    pub default_encoding: EncodingId,
}

impl FallbackConfig {
    pub fn family_for_hint(&self, hint: StyleHint) -> Option<&str> {
        self.style_hint_families.get(&hint).map(String::as_str)
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        let style_hint_families = [
            (StyleHint::AnyStyle, "Helvetica"),
            (StyleHint::SansSerif, "Helvetica"),
            (StyleHint::Serif, "Times"),
            (StyleHint::TypeWriter, "Courier"),
            (StyleHint::Monospace, "Courier"),
            (StyleHint::Decorative, "Old English"),
            (StyleHint::Cursive, "Cursive"),
            (StyleHint::Fantasy, "Fantasy"),
            (StyleHint::System, "Helvetica"),
        ]
        .into_iter()
        .map(|(hint, family)| (hint, family.to_string()))
        .collect();

        Self {
            style_hint_families,
            application_default_family: None,
            last_resort_family: "Helvetica".to_string(),
            last_resort_font: "fixed".to_string(),
            default_encoding: EncodingId::LATIN1,
        }
    }
}

/// Result-cache limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// How many resources nobody else holds may stay cached after a sweep
    pub max_unreferenced: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_unreferenced: 256,
        }
    }
}

/// Everything configurable about resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub tuning: MatchTuning,
    pub fallback: FallbackConfig,
    pub cache: CacheConfig,
}

impl ResolverConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Applies overrides read through `lookup`; split out so tests need not
    /// touch the process environment
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("FONTRES_CACHE") {
            let disabled = matches!(
                val.trim().to_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            );
            if disabled {
                self.cache.enabled = false;
                log::info!("fontres result cache disabled via FONTRES_CACHE");
            }
        }

        if let Some(val) = lookup("FONTRES_CACHE_LIMIT") {
            match val.trim().parse::<usize>() {
                Ok(limit) => self.cache.max_unreferenced = limit,
                Err(_) => log::warn!("ignoring FONTRES_CACHE_LIMIT={val:?}: not a number"),
            }
        }
    }

    /// Rejects settings the resolver cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.tuning.bitmap_distance_ratio == 0 {
            return Err(ResolveError::Config(
                "bitmap_distance_ratio must be at least 1".into(),
            ));
        }
        if self.fallback.last_resort_font.trim().is_empty() {
            return Err(ResolveError::Config("last_resort_font must not be empty".into()));
        }
        Ok(())
    }
}
