//! Glyph buffer shared between the shaper and its caller.
//!
//! The buffer owns one [`GlyphInfo`] record per code point, in logical
//! order. The reordering passes mutate the records in place; glyph
//! substitution (performed by the surrounding shaper between the two
//! reordering passes) may replace `codepoint` values with glyph indices
//! and remove records, but preserves the remaining fields.

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::categorize::{Category, Position};
use crate::script::{Script, SegmentProperties};

/// Per-glyph set of feature-mask bits assigned by the feature map.
pub type Mask = u32;

/// The four kinds of syllable recognized by the segmenter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyllableKind {
    Consonant,
    Vowel,
    Standalone,
    NonIndic,
}

impl SyllableKind {
    fn nibble(self) -> u8 {
        match self {
            SyllableKind::Consonant => 1,
            SyllableKind::Vowel => 2,
            SyllableKind::Standalone => 3,
            SyllableKind::NonIndic => 4,
        }
    }

    fn from_nibble(nibble: u8) -> Option<SyllableKind> {
        match nibble {
            1 => Some(SyllableKind::Consonant),
            2 => Some(SyllableKind::Vowel),
            3 => Some(SyllableKind::Standalone),
            4 => Some(SyllableKind::NonIndic),
            _ => None,
        }
    }
}

/// One slot of the glyph buffer.
#[derive(Copy, Clone, Debug)]
pub struct GlyphInfo {
    /// Unicode code point before substitution; glyph index after.
    pub codepoint: u32,
    /// Unicode general category of the originating character.
    pub general_category: GeneralCategory,
    /// Shaping category, set by the categorizer.
    pub category: Category,
    /// Reorder key and semantic tag, set by the categorizer and refined
    /// by the reordering passes.
    pub position: Position,
    /// Feature-mask bits this glyph participates in.
    pub mask: Mask,
    /// Syllable kind (high nibble) and rolling serial (low nibble).
    pub syllable: u8,
    /// Source cluster id, for cursor movement and selection.
    pub cluster: u32,
}

impl GlyphInfo {
    pub fn new(ch: char, cluster: u32) -> GlyphInfo {
        GlyphInfo {
            codepoint: ch as u32,
            general_category: get_general_category(ch),
            category: Category::Other,
            position: Position::SyllableBase,
            mask: 0,
            syllable: 0,
            cluster,
        }
    }

    pub fn set_syllable(&mut self, kind: SyllableKind, serial: u8) {
        self.syllable = (kind.nibble() << 4) | (serial & 0x0F);
    }

    pub fn syllable_kind(&self) -> Option<SyllableKind> {
        SyllableKind::from_nibble(self.syllable >> 4)
    }

    /// Vowels and placeholders count as consonants: they cannot co-occur
    /// with real consonants in a vowel or standalone syllable, so the
    /// consonant-syllable logic handles all three syllable kinds.
    pub fn is_consonant(&self) -> bool {
        match self.category {
            Category::Consonant
            | Category::Ra
            | Category::VowelIndependent
            | Category::Placeholder
            | Category::DottedCircle => true,
            _ => false,
        }
    }

    pub fn is_joiner(&self) -> bool {
        match self.category {
            Category::Joiner | Category::NonJoiner => true,
            _ => false,
        }
    }

    pub fn is_halant_or_coeng(&self) -> bool {
        match self.category {
            Category::Virama | Category::Coeng => true,
            _ => false,
        }
    }
}

/// A run of logically-ordered glyphs belonging to a single script.
pub struct Buffer {
    pub props: SegmentProperties,
    pub info: Vec<GlyphInfo>,
}

impl Buffer {
    /// Builds a buffer from text, one glyph per `char`, clusters numbered
    /// by character index.
    pub fn new(script: Script, text: &str) -> Buffer {
        let info = text
            .chars()
            .enumerate()
            .map(|(i, ch)| GlyphInfo::new(ch, i as u32))
            .collect();
        Buffer {
            props: SegmentProperties { script },
            info,
        }
    }

    pub fn len(&self) -> usize {
        self.info.len()
    }

    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    /// Replaces every cluster value in `[start, end)` with the minimum
    /// over the range.
    pub fn merge_clusters(&mut self, start: usize, end: usize) {
        if start + 1 >= end {
            return;
        }
        let cluster = self.info[start..end]
            .iter()
            .map(|g| g.cluster)
            .min()
            .unwrap_or(0);
        for glyph in &mut self.info[start..end] {
            glyph.cluster = cluster;
        }
    }

    /// Iterates `[start, end)` ranges of glyphs sharing a syllable value.
    pub fn syllable_ranges(&self) -> SyllableRanges<'_> {
        SyllableRanges {
            info: &self.info,
            start: 0,
        }
    }
}

pub struct SyllableRanges<'a> {
    info: &'a [GlyphInfo],
    start: usize,
}

impl Iterator for SyllableRanges<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        let start = self.start;
        let syllable = self.info.get(start)?.syllable;
        let mut end = start + 1;
        while end < self.info.len() && self.info[end].syllable == syllable {
            end += 1;
        }
        self.start = end;
        Some((start, end))
    }
}
