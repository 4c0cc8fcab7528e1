// this_file: crates/fontres-db/src/fallback.rs

//! Fallback resolution across an ordered chain of family names
//!
//! The chain for a request is:
//!
//! 1. the requested families, in order
//! 2. the substitutes of each requested family
//! 3. the default family for the request's style hint
//! 4. the application default family, if configured
//! 5. the last-resort family
//! 6. the wildcard, which scans every family in the catalog
//! 7. the last-resort font
//!
//! Names repeat at most once (compared without case). Each named entry must
//! support the request's script; support is probed lazily through the
//! population adapter and remembered in the family's writing-system matrix.

use fontres_core::config::ResolverConfig;
use fontres_core::{
    FamilyName, FontRequest, NodePath, PopulationAdapter, ResolveError, ResolvedDescriptor,
    Result, Script, WritingSystemStatus,
};

use crate::catalog::Catalog;
use crate::matcher::{Candidate, MatchQuery, Matcher};
use crate::substitution::SubstitutionTable;

/// One step of the fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEntry {
    Named(FamilyName),
    /// Every family in the catalog
    Wildcard,
}

impl std::fmt::Display for ChainEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainEntry::Named(name) => write!(f, "{name}"),
            ChainEntry::Wildcard => f.write_str("*"),
        }
    }
}

/// Builds the ordered candidate chain for `request`
pub fn fallback_chain(
    request: &FontRequest,
    substitutions: &SubstitutionTable,
    config: &ResolverConfig,
) -> Vec<ChainEntry> {
    let mut chain: Vec<ChainEntry> = Vec::new();
    let mut push = |name: FamilyName| {
        let seen = chain.iter().any(|entry| match entry {
            ChainEntry::Named(other) => {
                other.family.eq_ignore_ascii_case(&name.family) && other.foundry == name.foundry
            }
            ChainEntry::Wildcard => false,
        });
        if !seen && !name.family.is_empty() {
            chain.push(ChainEntry::Named(name));
        }
    };

    let requested = request.family_list();
    for name in &requested {
        push(name.clone());
    }
    for name in &requested {
        for substitute in substitutions.substitutes(&name.family) {
            push(FamilyName::parse(substitute));
        }
    }

    let fallback = &config.fallback;
    if let Some(family) = fallback.family_for_hint(request.style_hint) {
        push(FamilyName::parse(family));
    }
    if let Some(family) = &fallback.application_default_family {
        push(FamilyName::parse(family));
    }
    push(FamilyName::parse(&fallback.last_resort_family));

    chain.push(ChainEntry::Wildcard);

    // the last-resort font goes after the wildcard even if named earlier
    let last = FamilyName::parse(&fallback.last_resort_font);
    if !last.family.is_empty() {
        chain.push(ChainEntry::Named(last));
    }
    chain
}

/// Makes sure the writing-system matrix of family `index` answers for
/// `script`, probing the adapter for unprobed entries
///
/// Returns true when at least one writing system of the script is supported.
/// Negative probe answers are remembered; probe errors are not.
///
/// `Common` text is never probed. A family covers it unless a failed load
/// marked the script's writing systems unsupported.
pub fn ensure_supported(
    catalog: &mut Catalog,
    adapter: &dyn PopulationAdapter,
    index: usize,
    script: Script,
) -> bool {
    let Some(family) = catalog.family_at_mut(index) else {
        return false;
    };
    if script == Script::Common {
        return script
            .writing_systems()
            .all(|ws| family.writing_system_status(ws) != WritingSystemStatus::Unsupported);
    }

    let mut supported = false;
    for ws in script.writing_systems() {
        match family.writing_system_status(ws) {
            WritingSystemStatus::Supported => supported = true,
            WritingSystemStatus::Unsupported => {}
            WritingSystemStatus::Unprobed => match adapter.probe(family.name(), ws) {
                Ok(true) => {
                    family.set_writing_system_status(ws, WritingSystemStatus::Supported);
                    supported = true;
                }
                Ok(false) => {
                    family.set_writing_system_status(ws, WritingSystemStatus::Unsupported);
                }
                Err(err) => {
                    log::warn!("{}: probing {} failed: {}", adapter.name(), ws, err);
                }
            },
        }
        if supported {
            break;
        }
    }
    supported
}

/// Walks the fallback chain for one request
pub struct FallbackResolver<'a> {
    catalog: &'a mut Catalog,
    adapter: &'a dyn PopulationAdapter,
    substitutions: &'a SubstitutionTable,
    config: &'a ResolverConfig,
}

impl<'a> FallbackResolver<'a> {
    pub fn new(
        catalog: &'a mut Catalog,
        adapter: &'a dyn PopulationAdapter,
        substitutions: &'a SubstitutionTable,
        config: &'a ResolverConfig,
    ) -> Self {
        Self {
            catalog,
            adapter,
            substitutions,
            config,
        }
    }

    fn matcher(&self) -> Matcher<'a> {
        Matcher::new(&self.config.tuning, self.config.fallback.default_encoding)
    }

    /// Resolves `request` to the first chain entry that yields a complete
    /// descriptor, or [`ResolveError::NoMatch`]
    pub fn resolve(&mut self, request: &FontRequest) -> Result<ResolvedDescriptor> {
        let chain = fallback_chain(request, self.substitutions, self.config);
        log::debug!(
            "resolving '{}' ({}, {}px): chain {}",
            request.family,
            request.script,
            request.pixel_size,
            chain
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        for entry in &chain {
            let found = match entry {
                ChainEntry::Named(name) => self.resolve_family(name, request),
                ChainEntry::Wildcard => self.resolve_wildcard(request),
            };
            match found {
                Ok(descriptor) => {
                    log::debug!(
                        "'{}' resolved to {} [{}] {} via {} (score {:#06x})",
                        request.family,
                        descriptor.family,
                        descriptor.foundry,
                        descriptor.style,
                        entry,
                        descriptor.score
                    );
                    return Ok(descriptor);
                }
                Err(err @ ResolveError::NoFamilyMatch { .. })
                | Err(err @ ResolveError::NoSizeOrEncodingMatch { .. }) => {
                    log::debug!("{entry}: {err}");
                }
                Err(err) => return Err(err),
            }
        }

        Err(ResolveError::NoMatch {
            family: request.family.clone(),
            script: request.script,
        })
    }

    /// Matches one named family
    ///
    /// [`ResolveError::NoFamilyMatch`] when the family is unknown or lacks the
    /// script, [`ResolveError::NoSizeOrEncodingMatch`] when no combination of
    /// its faces satisfies the request.
    pub fn resolve_family(
        &mut self,
        name: &FamilyName,
        request: &FontRequest,
    ) -> Result<ResolvedDescriptor> {
        let script = request.script;
        let Ok(index) = self.catalog.search_family(&name.family) else {
            return Err(ResolveError::NoFamilyMatch { script });
        };
        if !ensure_supported(self.catalog, self.adapter, index, script) {
            return Err(ResolveError::NoFamilyMatch { script });
        }

        let foundry = name.foundry.as_deref().or(request.foundry.as_deref());
        let query = query_for(request, foundry);
        let catalog: &Catalog = self.catalog;
        let candidate = catalog
            .family_at(index)
            .and_then(|family| self.matcher().match_family(family, &query, u32::MAX));

        candidate
            .and_then(|candidate| describe(catalog, index, candidate))
            .ok_or_else(|| ResolveError::NoSizeOrEncodingMatch {
                family: name.family.clone(),
            })
    }

    /// Scans every family supporting the script and keeps the best score
    pub fn resolve_wildcard(&mut self, request: &FontRequest) -> Result<ResolvedDescriptor> {
        let script = request.script;
        let query = query_for(request, request.foundry.as_deref());
        let matcher = self.matcher();
        let short_circuit = self.config.tuning.short_circuit_score;

        let mut best: Option<(usize, Candidate)> = None;
        for index in 0..self.catalog.family_count() {
            if !ensure_supported(self.catalog, self.adapter, index, script) {
                continue;
            }
            let bound = best.map_or(u32::MAX, |(_, c)| c.score);
            let Some(family) = self.catalog.family_at(index) else {
                continue;
            };
            if let Some(candidate) = matcher.match_family(family, &query, bound) {
                best = Some((index, candidate));
                if candidate.score < short_circuit {
                    break;
                }
            }
        }

        match best {
            Some((index, candidate)) => describe(self.catalog, index, candidate).ok_or(
                ResolveError::NoSizeOrEncodingMatch {
                    family: "*".to_string(),
                },
            ),
            None => Err(ResolveError::NoFamilyMatch { script }),
        }
    }
}

fn query_for<'q>(request: &FontRequest, foundry: Option<&'q str>) -> MatchQuery<'q> {
    MatchQuery {
        foundry,
        style: request.style,
        pixel_size: request.pixel_size,
        pitch: request.pitch,
        script: request.script,
        strategy: request.strategy,
        force_encoding: request.force_encoding,
    }
}

/// Turns a candidate into a descriptor stamped with the catalog generation
fn describe(catalog: &Catalog, family: usize, candidate: Candidate) -> Option<ResolvedDescriptor> {
    let path = NodePath {
        family,
        foundry: candidate.foundry,
        style: candidate.style,
        size: candidate.size,
        encoding: candidate.encoding,
    };
    let face = catalog.face_at(&path)?;
    Some(ResolvedDescriptor {
        generation: catalog.generation(),
        path,
        family: face.family.name().to_string(),
        foundry: face.foundry.name().to_string(),
        style: face.style.key(),
        smooth_scalable: face.style.is_smooth_scalable(),
        bitmap_scalable: face.style.is_bitmap_scalable(),
        size: face.size.kind(),
        encoding: face.encoding.encoding(),
        pitch: face.encoding.pitch(),
        pixel_size: candidate.pixel_size,
        score: candidate.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontres_core::{
        FaceInfo, FaceSink, Pitch, ProbeError, StyleHint, StyleKey, WritingSystem,
    };
    use std::cell::{Cell, RefCell};

    struct Probing {
        answers: Vec<(&'static str, WritingSystem, std::result::Result<bool, ProbeError>)>,
        calls: Cell<usize>,
        asked: RefCell<Vec<String>>,
    }

    impl Probing {
        fn new(
            answers: Vec<(&'static str, WritingSystem, std::result::Result<bool, ProbeError>)>,
        ) -> Self {
            Self {
                answers,
                calls: Cell::new(0),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl PopulationAdapter for Probing {
        fn name(&self) -> &'static str {
            "probing"
        }

        fn populate(&self, _sink: &mut dyn FaceSink) -> Result<()> {
            Ok(())
        }

        fn probe(
            &self,
            family: &str,
            writing_system: WritingSystem,
        ) -> std::result::Result<bool, ProbeError> {
            self.calls.set(self.calls.get() + 1);
            self.asked.borrow_mut().push(format!("{family}/{writing_system}"));
            self.answers
                .iter()
                .find(|(f, ws, _)| f.eq_ignore_ascii_case(family) && *ws == writing_system)
                .map_or(Ok(false), |(_, _, answer)| answer.clone())
        }
    }

    fn latin_outline(family: &str) -> FaceInfo {
        FaceInfo::outline(family, StyleKey::default(), Pitch::Proportional)
            .with_writing_systems([WritingSystem::Latin])
    }

    fn names(chain: &[ChainEntry]) -> Vec<String> {
        chain.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_chain_order() {
        let mut substitutions = SubstitutionTable::new();
        substitutions.insert("Arial", "Nimbus Sans");
        let config = ResolverConfig::default();
        let request = FontRequest::new("Arial, 'Times [Adobe]'").style_hint(StyleHint::Serif);
        let chain = fallback_chain(&request, &substitutions, &config);
        assert_eq!(
            names(&chain),
            ["Arial", "Times [Adobe]", "Nimbus Sans", "Times", "Helvetica", "*", "fixed"]
        );
    }

    #[test]
    fn test_chain_drops_repeats() {
        let mut config = ResolverConfig::default();
        config.fallback.application_default_family = Some("helvetica".into());
        let request = FontRequest::new("Helvetica, HELVETICA");
        let chain = fallback_chain(&request, &SubstitutionTable::new(), &config);
        assert_eq!(names(&chain), ["Helvetica", "*", "fixed"]);
    }

    #[test]
    fn test_probe_answer_is_remembered() {
        let mut catalog = Catalog::new();
        catalog.insert_face(&latin_outline("Sans"));
        let adapter = Probing::new(vec![("Sans", WritingSystem::Greek, Ok(true))]);

        assert!(ensure_supported(&mut catalog, &adapter, 0, Script::Greek));
        assert!(ensure_supported(&mut catalog, &adapter, 0, Script::Greek));
        assert_eq!(adapter.calls.get(), 1);

        assert!(!ensure_supported(&mut catalog, &adapter, 0, Script::Arabic));
        let calls = adapter.calls.get();
        assert!(!ensure_supported(&mut catalog, &adapter, 0, Script::Arabic));
        assert_eq!(adapter.calls.get(), calls);
    }

    #[test]
    fn test_probe_errors_are_not_remembered() {
        let mut catalog = Catalog::new();
        catalog.insert_face(&latin_outline("Sans"));
        let adapter = Probing::new(vec![(
            "Sans",
            WritingSystem::Thai,
            Err(ProbeError::Transient("busy".into())),
        )]);

        assert!(!ensure_supported(&mut catalog, &adapter, 0, Script::Thai));
        assert!(!ensure_supported(&mut catalog, &adapter, 0, Script::Thai));
        assert_eq!(adapter.calls.get(), 2);
        let family = catalog.family("sans").unwrap();
        assert_eq!(
            family.writing_system_status(WritingSystem::Thai),
            WritingSystemStatus::Unprobed
        );
    }

    #[test]
    fn test_known_support_skips_probe() {
        let mut catalog = Catalog::new();
        catalog.insert_face(&latin_outline("Sans"));
        let adapter = Probing::new(Vec::new());
        assert!(ensure_supported(&mut catalog, &adapter, 0, Script::Latin));
        assert!(ensure_supported(&mut catalog, &adapter, 0, Script::Common));
        assert_eq!(adapter.calls.get(), 0);
    }

    #[test]
    fn test_resolve_family_errors() {
        let mut catalog = Catalog::new();
        catalog.insert_face(&latin_outline("Sans"));
        let adapter = Probing::new(Vec::new());
        let substitutions = SubstitutionTable::new();
        let config = ResolverConfig::default();
        let mut resolver = FallbackResolver::new(&mut catalog, &adapter, &substitutions, &config);

        let missing = resolver.resolve_family(
            &FamilyName::parse("Serif"),
            &FontRequest::new("Serif").script(Script::Latin),
        );
        assert!(matches!(missing, Err(ResolveError::NoFamilyMatch { .. })));

        let outline_only = FontRequest::new("Sans")
            .script(Script::Latin)
            .force_encoding(fontres_core::EncodingId::LATIN1);
        let err = resolver
            .resolve_family(&FamilyName::parse("Sans"), &outline_only)
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoSizeOrEncodingMatch { .. }));
    }

    #[test]
    fn test_wildcard_picks_best_family() {
        let mut catalog = Catalog::new();
        catalog.insert_face(
            &FaceInfo::outline("Alpha", StyleKey::default(), Pitch::Monospace)
                .with_writing_systems([WritingSystem::Latin]),
        );
        catalog.insert_face(&latin_outline("Beta"));
        let adapter = Probing::new(Vec::new());
        let substitutions = SubstitutionTable::new();
        let config = ResolverConfig::default();
        let mut resolver = FallbackResolver::new(&mut catalog, &adapter, &substitutions, &config);

        let request = FontRequest::new("").pitch(Pitch::Proportional).script(Script::Latin);
        let descriptor = resolver.resolve_wildcard(&request).unwrap();
        assert_eq!(descriptor.family, "Beta");
        assert_eq!(descriptor.score, 0);
    }

    #[test]
    fn test_common_honors_failed_load_mark() {
        let mut catalog = Catalog::new();
        catalog.insert_face(&latin_outline("Sans"));
        let adapter = Probing::new(Vec::new());
        assert!(ensure_supported(&mut catalog, &adapter, 0, Script::Common));

        if let Some(family) = catalog.family_at_mut(0) {
            for ws in Script::Common.writing_systems() {
                family.set_writing_system_status(ws, WritingSystemStatus::Unsupported);
            }
        }
        assert!(!ensure_supported(&mut catalog, &adapter, 0, Script::Common));
        assert_eq!(adapter.calls.get(), 0);
    }

    #[test]
    fn test_wildcard_short_circuits_before_later_families() {
        let alpha = FaceInfo::outline("Alpha", StyleKey::default(), Pitch::Proportional)
            .with_size(fontres_core::SizeKind::Fixed(12))
            .with_encoding(fontres_core::Encoding::Id(fontres_core::EncodingId::LATIN1))
            .with_writing_systems([WritingSystem::Latin]);
        // Beta would score 0 but declares Latin only when asked
        let beta = FaceInfo::outline("Beta", StyleKey::default(), Pitch::Proportional);
        let request = FontRequest::new("").script(Script::Latin);
        let substitutions = SubstitutionTable::new();

        let mut catalog = Catalog::new();
        catalog.insert_face(&alpha);
        catalog.insert_face(&beta);
        let adapter = Probing::new(vec![("Beta", WritingSystem::Latin, Ok(true))]);
        let config = ResolverConfig::default();
        let mut resolver = FallbackResolver::new(&mut catalog, &adapter, &substitutions, &config);
        let descriptor = resolver.resolve_wildcard(&request).unwrap();
        assert_eq!(descriptor.family, "Alpha");
        assert_eq!(descriptor.score, 1);
        assert_eq!(adapter.calls.get(), 0);

        let mut catalog = Catalog::new();
        catalog.insert_face(&alpha);
        catalog.insert_face(&beta);
        let adapter = Probing::new(vec![("Beta", WritingSystem::Latin, Ok(true))]);
        let mut config = ResolverConfig::default();
        config.tuning.short_circuit_score = 0;
        let mut resolver = FallbackResolver::new(&mut catalog, &adapter, &substitutions, &config);
        let descriptor = resolver.resolve_wildcard(&request).unwrap();
        assert_eq!(descriptor.family, "Beta");
        assert_eq!(descriptor.score, 0);
    }

    #[test]
    fn test_exhausted_chain_is_no_match() {
        let mut catalog = Catalog::new();
        catalog.insert_face(&latin_outline("Helvetica"));
        let adapter = Probing::new(Vec::new());
        let substitutions = SubstitutionTable::new();
        let config = ResolverConfig::default();
        let mut resolver = FallbackResolver::new(&mut catalog, &adapter, &substitutions, &config);

        let err = resolver
            .resolve(&FontRequest::new("Helvetica").script(Script::Arabic))
            .unwrap_err();
        assert!(err.is_no_match());
        let asked = adapter.asked.borrow();
        assert!(asked.iter().any(|a| a == "Helvetica/Arabic"));
    }
}
