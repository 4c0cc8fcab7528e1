//! Where requests meet faces: the font catalog and its resolver
//!
//! Population adapters fill a [`Catalog`]; a [`FontContext`] owns it and
//! answers [`FontRequest`](fontres_core::FontRequest)s by walking a
//! fallback chain of family names, scoring each family with the
//! [`Matcher`], and remembering the outcome in a [`ResultCache`].
//!
//! ## Staleness
//!
//! Descriptors point into the catalog by position. Every structural change
//! bumps the catalog generation, the result cache drops itself when the
//! generation moves, and [`Catalog::face`] refuses descriptors from an
//! older generation.

pub mod catalog;
pub mod context;
pub mod fallback;
pub mod matcher;
pub mod query;
pub mod result_cache;
pub mod substitution;

pub use catalog::{Catalog, EncodingVariant, FaceRef, Family, Foundry, SizeVariant, Style};
pub use context::{AppFontId, FontContext, LoadedFont};
pub use fallback::{fallback_chain, ChainEntry, FallbackResolver};
pub use matcher::{Candidate, MatchQuery, Matcher};
pub use result_cache::{CacheMetrics, FaceKey, RequestKey, ResultCache};
pub use substitution::SubstitutionTable;

#[cfg(test)]
mod proptests;
