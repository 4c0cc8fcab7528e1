//! Fontres Core: the vocabulary of font resolution
//!
//! A request names families, a style and a size. The catalog knows which
//! faces exist. Between them sits a matcher and a fallback chain. This crate
//! holds the types all of those pieces share:
//!
//! - [`FontRequest`] - What the caller wants
//! - [`StyleKey`], [`Pitch`], [`SizeKind`] - How faces are told apart
//! - [`Script`] and [`WritingSystem`] - What text a face can render
//! - [`Encoding`] - How a face maps characters to glyphs
//! - [`FaceInfo`] - One discovered face, on its way into the catalog
//! - [`ResolvedDescriptor`] - The face chosen for a request
//!
//! Collaborators plug in through the traits in [`traits`]: a
//! [`PopulationAdapter`] reports installed faces, a [`ResourceLoader`]
//! turns descriptors into backend fonts.
//!
//! ```
//! use fontres_core::{weight, FontRequest, Script, Slant};
//!
//! let request = FontRequest::new("Helvetica, Arial")
//!     .weight(weight::BOLD)
//!     .slant(Slant::Italic)
//!     .pixel_size(14)
//!     .script(Script::Latin);
//!
//! assert_eq!(request.family_list().len(), 2);
//! ```

pub mod config;
pub mod descriptor;
pub mod encoding;
pub mod error;
pub mod request;
pub mod script;
pub mod style;
pub mod traits;

pub use config::ResolverConfig;
pub use descriptor::{FaceInfo, NodePath, ResolvedDescriptor};
pub use encoding::{Encoding, EncodingId};
pub use error::{LoadError, ProbeError, ResolveError, Result};
pub use request::{split_family_list, FamilyName, FontRequest, StyleHint, StyleStrategy};
pub use script::{Script, WritingSystem, WritingSystemStatus};
pub use style::{stretch, weight, Pitch, SizeKind, Slant, StyleKey};
pub use traits::{FaceSink, PopulationAdapter, ResourceLoader};
