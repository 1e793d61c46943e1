//! Syllable segmentation.
//!
//! Partitions a categorized buffer into consonant syllables, vowel
//! syllables, standalone clusters, and non-Indic runs, writing each
//! glyph's syllable byte. Matching is longest-wins; on a tie a consonant
//! syllable beats a vowel syllable, which beats a standalone cluster.
//! Glyphs that start no syllable pass through one at a time as
//! `NonIndic` — malformed input is never dropped.

use std::cmp;

use crate::buffer::{Buffer, GlyphInfo, SyllableKind};
use crate::categorize::Category;

fn consonant(c: Category) -> bool {
    c == Category::Consonant || c == Category::Ra
}

fn vowel(c: Category) -> bool {
    c == Category::VowelIndependent
}

fn nukta(c: Category) -> bool {
    c == Category::Nukta
}

fn halant(c: Category) -> bool {
    c == Category::Virama
}

fn halant_or_coeng(c: Category) -> bool {
    c == Category::Virama || c == Category::Coeng
}

fn zwj(c: Category) -> bool {
    c == Category::Joiner
}

fn zwnj(c: Category) -> bool {
    c == Category::NonJoiner
}

fn joiner(c: Category) -> bool {
    zwj(c) || zwnj(c)
}

fn matra(c: Category) -> bool {
    c == Category::VowelDependent
}

fn syllable_modifier(c: Category) -> bool {
    c == Category::SyllableModifier
}

fn vedic_sign(c: Category) -> bool {
    c == Category::VedicSign
}

fn placeholder(c: Category) -> bool {
    c == Category::Placeholder || c == Category::DottedCircle
}

fn repha(c: Category) -> bool {
    c == Category::Repha
}

fn register_shifter(c: Category) -> bool {
    c == Category::RegisterShifter
}

/// Most repetitions any bounded group in the grammar allows.
const REPEAT_MAX: usize = 4;

/// Backtracking cursor over a syllable candidate.
///
/// A pattern is a function that advances the cursor over the glyphs it
/// matches and reports success. On failure a pattern may leave the
/// cursor anywhere: whichever operation invoked it restores the saved
/// position, so only successful patterns commit glyphs. A single
/// optional token needs no bookkeeping — [`one`](Matcher::one) does not
/// advance when the category test fails, so its result can simply be
/// ignored.
struct Matcher<'a> {
    glyphs: &'a [GlyphInfo],
    pos: usize,
}

impl<'a> Matcher<'a> {
    fn new(glyphs: &'a [GlyphInfo]) -> Matcher<'a> {
        Matcher { glyphs, pos: 0 }
    }

    /// Consumes one glyph if its category satisfies `pred`.
    fn one(&mut self, pred: impl FnOnce(Category) -> bool) -> bool {
        match self.glyphs.get(self.pos) {
            Some(glyph) if pred(glyph.category) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Consumes `pattern` if it matches here, nothing otherwise.
    fn optional(&mut self, pattern: impl FnOnce(&mut Self) -> bool) {
        let mark = self.pos;
        if !pattern(self) {
            self.pos = mark;
        }
    }

    /// Tries both branches from the current position and commits the
    /// longer match.
    fn longest(
        &mut self,
        f: impl FnOnce(&mut Self) -> bool,
        g: impl FnOnce(&mut Self) -> bool,
    ) -> bool {
        let mark = self.pos;
        let f_end = if f(self) { Some(self.pos) } else { None };
        self.pos = mark;
        let g_end = if g(self) { Some(self.pos) } else { None };
        match cmp::max(f_end, g_end) {
            Some(end) => {
                self.pos = end;
                true
            }
            None => {
                self.pos = mark;
                false
            }
        }
    }

    /// Matches `pattern` greedily up to `max` times (at most
    /// [`REPEAT_MAX`]), then `rest`, giving repetitions back one at a
    /// time until `rest` matches.
    fn repeat_then(
        &mut self,
        max: usize,
        pattern: impl Fn(&mut Self) -> bool,
        rest: impl Fn(&mut Self) -> bool,
    ) -> bool {
        debug_assert!(max <= REPEAT_MAX);
        let mut marks = [self.pos; REPEAT_MAX + 1];
        let mut reps = 0;
        while reps < max {
            let mark = self.pos;
            if !pattern(self) || self.pos == mark {
                break;
            }
            reps += 1;
            marks[reps] = self.pos;
        }
        loop {
            self.pos = marks[reps];
            if rest(self) {
                return true;
            }
            if reps == 0 {
                self.pos = marks[0];
                return false;
            }
            reps -= 1;
        }
    }
}

// (ZWNJ? RS)? (N N?)?
fn nukta_group(m: &mut Matcher<'_>) -> bool {
    m.optional(|m| {
        m.one(zwnj);
        m.one(register_shifter)
    });
    if m.one(nukta) {
        m.one(nukta);
    }
    true
}

// c n — a consonant with its attached modifiers
fn consonant_group(m: &mut Matcher<'_>) -> bool {
    m.one(consonant) && nukta_group(m)
}

// z? (H|Coeng) (ZWJ N?)?
fn halant_group(m: &mut Matcher<'_>) -> bool {
    m.one(joiner);
    if !m.one(halant_or_coeng) {
        return false;
    }
    m.optional(|m| {
        if !m.one(zwj) {
            return false;
        }
        m.one(nukta);
        true
    });
    true
}

// halant_group | (H|Coeng) ZWNJ
fn final_halant_group(m: &mut Matcher<'_>) -> bool {
    m.longest(halant_group, |m| m.one(halant_or_coeng) && m.one(zwnj))
}

// z{0,3} M n H?
//
// The trailing killer is a plain halant: a coeng after a matra starts a
// Khmer final consonant instead and is left for final_consonant_group.
fn matra_group(m: &mut Matcher<'_>) -> bool {
    m.repeat_then(
        3,
        |m| m.one(joiner),
        |m| {
            if !m.one(matra) {
                return false;
            }
            nukta_group(m);
            m.one(halant);
            true
        },
    )
}

// final_halant_group | matra_group{0,4}
fn halant_or_matra_group(m: &mut Matcher<'_>) -> bool {
    m.longest(final_halant_group, |m| {
        m.repeat_then(REPEAT_MAX, matra_group, |_| true)
    });
    true
}

// (H|Coeng) c n — a final consonant after the matras, as in Khmer
fn final_consonant_group(m: &mut Matcher<'_>) -> bool {
    m.one(halant_or_coeng) && consonant_group(m)
}

// SM? (VD VD?)?
fn syllable_tail(m: &mut Matcher<'_>) -> bool {
    m.one(syllable_modifier);
    if m.one(vedic_sign) {
        m.one(vedic_sign);
    }
    true
}

// (halant_group c n){0,4} halant_or_matra_group final_consonant_group?
// syllable_tail
fn syllable_rest(m: &mut Matcher<'_>) -> bool {
    m.repeat_then(
        REPEAT_MAX,
        |m| halant_group(m) && consonant_group(m),
        |m| {
            halant_or_matra_group(m);
            m.optional(final_consonant_group);
            syllable_tail(m);
            true
        },
    )
}

// Repha? c n syllable_rest
fn consonant_syllable(m: &mut Matcher<'_>) -> bool {
    m.one(repha);
    consonant_group(m) && syllable_rest(m)
}

// Repha? V n (ZWJ | syllable_rest)
fn vowel_syllable(m: &mut Matcher<'_>) -> bool {
    m.one(repha);
    if !m.one(vowel) {
        return false;
    }
    nukta_group(m);
    m.longest(|m| m.one(zwj), syllable_rest);
    true
}

// Repha? (NBSP | DOTTEDCIRCLE) n syllable_rest
fn standalone_cluster(m: &mut Matcher<'_>) -> bool {
    m.one(repha);
    if !m.one(placeholder) {
        return false;
    }
    nukta_group(m);
    syllable_rest(m)
}

fn match_len<'a>(
    glyphs: &'a [GlyphInfo],
    pattern: impl FnOnce(&mut Matcher<'a>) -> bool,
) -> usize {
    let mut matcher = Matcher::new(glyphs);
    if pattern(&mut matcher) {
        matcher.pos
    } else {
        0
    }
}

/// Longest syllable match at the start of `glyphs`, if any.
pub fn match_syllable(glyphs: &[GlyphInfo]) -> Option<(usize, SyllableKind)> {
    let candidates = [
        (match_len(glyphs, consonant_syllable), SyllableKind::Consonant),
        (match_len(glyphs, vowel_syllable), SyllableKind::Vowel),
        (match_len(glyphs, standalone_cluster), SyllableKind::Standalone),
    ];

    // Ties go to the earlier candidate
    let mut best: Option<(usize, SyllableKind)> = None;
    for &(len, kind) in candidates.iter() {
        if len > 0 && best.map_or(true, |(best_len, _)| len > best_len) {
            best = Some((len, kind));
        }
    }
    best
}

/// Writes the syllable byte of every glyph in the buffer. Unmatched
/// glyphs each form a one-glyph `NonIndic` syllable.
pub fn find_syllables(buffer: &mut Buffer) {
    let mut serial: u8 = 0;
    let mut i = 0;
    while i < buffer.info.len() {
        let (len, kind) = match match_syllable(&buffer.info[i..]) {
            Some((len, kind)) => (len, kind),
            None => (1, SyllableKind::NonIndic),
        };
        for glyph in &mut buffer.info[i..i + len] {
            glyph.set_syllable(kind, serial);
        }
        serial = (serial + 1) & 0x0F;
        i += len;
    }
}
