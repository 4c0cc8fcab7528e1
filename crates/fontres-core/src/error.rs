//! Error types for fontres

use thiserror::Error;

use crate::script::Script;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Main error type for font resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A candidate family exists but does not cover the requested script.
    #[error("No font family supports script {script}")]
    NoFamilyMatch { script: Script },

    /// A family matched, but no style, size or encoding satisfied the request.
    #[error("Family '{family}' has no style, size or encoding matching the request")]
    NoSizeOrEncodingMatch { family: String },

    /// The whole fallback chain was exhausted.
    #[error("No font matches '{family}' for script {script}")]
    NoMatch { family: String, script: Script },

    #[error("Resource load failed: {0}")]
    ResourceLoad(#[from] LoadError),

    #[error("Stale descriptor: built against generation {descriptor}, catalog is at {catalog}")]
    StaleDescriptor { descriptor: u64, catalog: u64 },

    #[error("Population failed: {0}")]
    Population(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResolveError {
    /// True for the "nothing in the chain fits" outcome callers usually
    /// answer with a placeholder glyph.
    pub fn is_no_match(&self) -> bool {
        matches!(self, ResolveError::NoMatch { .. })
    }
}

/// Errors raised by a backend when materializing a resolved descriptor
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The face cannot render this script at all; safe to remember.
    #[error("Face '{family}' cannot render script {script}")]
    UnsupportedScript { family: String, script: Script },

    /// The backend failed this time; may succeed on a later attempt.
    #[error("Transient load failure: {0}")]
    Transient(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl LoadError {
    /// Only confirmed script gaps are memoized as negatives.
    pub fn is_permanent(&self) -> bool {
        matches!(self, LoadError::UnsupportedScript { .. })
    }
}

/// Errors raised while lazily probing a family's writing-system coverage
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Probe of '{0}' failed transiently")]
    Transient(String),

    #[error("Family '{0}' is unknown to the platform")]
    UnknownFamily(String),
}
