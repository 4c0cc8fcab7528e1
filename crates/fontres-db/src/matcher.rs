// this_file: crates/fontres-db/src/matcher.rs

//! Scoring candidates inside one family
//!
//! For each foundry the matcher walks down the tree once: nearest style,
//! then the best size variant, then an encoding that can carry the script.
//! The resulting combination gets a composite score (lower is better):
//!
//! | penalty              | value    |
//! |----------------------|----------|
//! | pitch mismatch       | `0x4000` |
//! | style mismatch       | `0x2000` |
//! | bitmap scaled        | `0x1000` |
//! | non-default encoding | `0x0002` |
//! | non-native encoding  | `0x0001` |
//! | pixel distance       | `|px - wanted|` |

use fontres_core::config::MatchTuning;
use fontres_core::{
    Encoding, EncodingId, Pitch, Script, SizeKind, StyleKey, StyleStrategy,
};

use crate::catalog::{same_name, Family, Foundry, SizeVariant, Style};

pub const PITCH_MISMATCH: u32 = 0x4000;
pub const STYLE_MISMATCH: u32 = 0x2000;
pub const BITMAP_SCALED_PENALTY: u32 = 0x1000;
pub const ENCODING_MISMATCH: u32 = 0x0002;
pub const NON_NATIVE_PENALTY: u32 = 0x0001;

/// The parts of a request the matcher looks at
#[derive(Debug, Clone, Copy)]
pub struct MatchQuery<'a> {
    pub foundry: Option<&'a str>,
    pub style: StyleKey,
    pub pixel_size: u16,
    pub pitch: Pitch,
    pub script: Script,
    pub strategy: StyleStrategy,
    pub force_encoding: Option<EncodingId>,
}

impl MatchQuery<'_> {
    /// Same query without the foundry filter
    pub fn any_foundry(&self) -> Self {
        Self {
            foundry: None,
            ..*self
        }
    }
}

/// Best combination found inside one family, as positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub foundry: usize,
    pub style: usize,
    pub size: usize,
    pub encoding: usize,
    /// Pixel size to instantiate
    pub pixel_size: u16,
    pub score: u32,
}

/// Picks the style closest to `wanted`; the first of equally close styles wins
pub fn best_style(foundry: &Foundry, wanted: &StyleKey) -> Option<usize> {
    foundry
        .styles()
        .iter()
        .enumerate()
        .min_by_key(|(pos, style)| (style.key().distance(wanted), *pos))
        .map(|(pos, _)| pos)
}

/// Scores foundries, styles, sizes and encodings of one family
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    tuning: &'a MatchTuning,
    default_encoding: EncodingId,
}

impl<'a> Matcher<'a> {
    pub fn new(tuning: &'a MatchTuning, default_encoding: EncodingId) -> Self {
        Self {
            tuning,
            default_encoding,
        }
    }

    /// Chooses an encoding of `size` able to carry the query's script
    ///
    /// Order: the forced encoding if any; native outline unless the strategy
    /// rules it out; the platform default if its table covers the script;
    /// the first encoding whose table covers the script. `OPENGL_COMPATIBLE`
    /// and `PREFER_BITMAP` both rule native outlines out.
    pub fn find_encoding(&self, size: &SizeVariant, query: &MatchQuery<'_>) -> Option<usize> {
        if let Some(forced) = query.force_encoding {
            return size.encoding_position(Encoding::Id(forced));
        }

        let native_excluded = query
            .strategy
            .intersects(StyleStrategy::OPENGL_COMPATIBLE | StyleStrategy::PREFER_BITMAP);
        if !native_excluded {
            if let Some(pos) = size.encoding_position(Encoding::NativeOutline) {
                return Some(pos);
            }
        }

        if let Some(pos) = size.encoding_position(Encoding::Id(self.default_encoding)) {
            if self.default_encoding.supports_script(query.script) {
                return Some(pos);
            }
        }

        size.encodings().iter().position(|variant| {
            variant
                .encoding()
                .id()
                .is_some_and(|id| id.supports_script(query.script))
        })
    }

    /// Size selection for one style: `(size position, pixel size to use)`
    fn select_size(&self, style: &Style, query: &MatchQuery<'_>) -> Option<(usize, u16)> {
        let wanted = query.pixel_size;
        let strategy = query.strategy;

        // 1. exact pixel size
        if !strategy.contains(StyleStrategy::FORCE_OUTLINE) {
            if let Some(pos) = style.size_position(SizeKind::Fixed(wanted)) {
                return Some((pos, wanted));
            }
        }

        // 2. smooth outline
        if style.is_smooth_scalable() && !strategy.contains(StyleStrategy::PREFER_BITMAP) {
            if let Some(pos) = style.size_position(SizeKind::SmoothScalable) {
                return Some((pos, wanted));
            }
        }

        // 3. scaled bitmap, when matching the size matters more than quality
        if style.is_bitmap_scalable() && strategy.contains(StyleStrategy::PREFER_MATCH) {
            if let Some(pos) = style.size_position(SizeKind::SCALABLE_BITMAP) {
                return Some((pos, wanted));
            }
        }

        // 4. nearest bitmap size that has a usable encoding
        let mut nearest: Option<(usize, u16, u32)> = None;
        for (pos, size) in style.sizes().iter().enumerate() {
            let px = match size.kind() {
                SizeKind::Fixed(px) if px != 0 => px,
                _ => continue,
            };
            if self.find_encoding(size, query).is_none() {
                continue;
            }
            // undersized faces lose a point for float-to-int truncation
            let distance = if px < wanted {
                (wanted - px) as u32 + 1
            } else {
                (px - wanted) as u32
            };
            if nearest.map_or(true, |(_, _, best)| distance < best) {
                nearest = Some((pos, px, distance));
            }
        }

        match nearest {
            Some((pos, px, distance)) => {
                let too_far = distance * 10 / wanted as u32 >= self.tuning.bitmap_distance_ratio;
                if style.is_bitmap_scalable()
                    && !strategy.contains(StyleStrategy::PREFER_QUALITY)
                    && too_far
                {
                    if let Some(master) = style.size_position(SizeKind::SCALABLE_BITMAP) {
                        return Some((master, wanted));
                    }
                }
                Some((pos, px))
            }
            // no fixed size at all; take whatever scales, the encoding check
            // still turns native-only outlines away under PREFER_BITMAP
            None => style
                .size_position(SizeKind::SmoothScalable)
                .or_else(|| style.size_position(SizeKind::SCALABLE_BITMAP))
                .map(|pos| (pos, wanted)),
        }
    }

    /// Best foundry/style/size/encoding of `family` scoring strictly below `bound`
    ///
    /// Returns `None` when no foundry (after name filtering) produced a
    /// combination that beats the bound.
    pub fn best_foundry(
        &self,
        family: &Family,
        query: &MatchQuery<'_>,
        bound: u32,
    ) -> Option<Candidate> {
        let wanted_px = query.pixel_size.max(1);
        let query = &MatchQuery {
            pixel_size: wanted_px,
            ..*query
        };
        let mut best: Option<Candidate> = None;
        let mut best_score = bound;

        for (foundry_pos, foundry) in family.foundries().iter().enumerate() {
            if let Some(wanted) = query.foundry {
                if !same_name(foundry.name(), wanted) {
                    continue;
                }
            }

            let Some(style_pos) = best_style(foundry, &query.style) else {
                continue;
            };
            let style = &foundry.styles()[style_pos];

            if !style.is_smooth_scalable() && query.strategy.contains(StyleStrategy::FORCE_OUTLINE)
            {
                log::trace!(
                    "{} [{}] {}: skipped, not an outline",
                    family.name(),
                    foundry.name(),
                    style.key()
                );
                continue;
            }

            let Some((size_pos, px)) = self.select_size(style, query) else {
                continue;
            };
            let size = &style.sizes()[size_pos];
            let Some(encoding_pos) = self.find_encoding(size, query) else {
                continue;
            };
            let variant = &size.encodings()[encoding_pos];

            let mut score = 0;
            if let Encoding::Id(id) = variant.encoding() {
                score += NON_NATIVE_PENALTY;
                if id != self.default_encoding {
                    score += ENCODING_MISMATCH;
                }
            }
            let actual_pitch = match variant.pitch() {
                Pitch::Any if family.is_fixed_pitch() => Pitch::Monospace,
                Pitch::Any => Pitch::Proportional,
                pitch => pitch,
            };
            if !query.pitch.accepts(actual_pitch) {
                score += PITCH_MISMATCH;
            }
            if style.key() != query.style {
                score += STYLE_MISMATCH;
            }
            if !style.is_smooth_scalable() && size.kind().pixel_size() != Some(px) {
                score += BITMAP_SCALED_PENALTY;
            }
            score += (px as i32 - wanted_px as i32).unsigned_abs();

            log::trace!(
                "{} [{}] {} {} {}: score {:#06x}",
                family.name(),
                foundry.name(),
                style.key(),
                size.kind(),
                variant.encoding(),
                score
            );

            if score < best_score {
                best_score = score;
                best = Some(Candidate {
                    foundry: foundry_pos,
                    style: style_pos,
                    size: size_pos,
                    encoding: encoding_pos,
                    pixel_size: px,
                    score,
                });
                if score < self.tuning.short_circuit_score {
                    break;
                }
            }
        }

        best
    }

    /// Tries the query's foundry first, then any foundry
    pub fn match_family(
        &self,
        family: &Family,
        query: &MatchQuery<'_>,
        bound: u32,
    ) -> Option<Candidate> {
        let found = self.best_foundry(family, query, bound);
        if found.is_none() && query.foundry.is_some() {
            log::debug!(
                "{}: no foundry {:?} matched, trying any foundry",
                family.name(),
                query.foundry
            );
            return self.best_foundry(family, &query.any_foundry(), bound);
        }
        found
    }
}
