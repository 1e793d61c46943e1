//! Character categorization.
//!
//! Every code point is assigned a shaping [`Category`] and a positional
//! class ([`Position`]) before syllable matching. The per-script tables
//! hold the raw classification; [`categorize`] applies them together
//! with a handful of overrides that reproduce observed Uniscribe
//! behavior, then resolves consonant positions.

use unicode_general_category::GeneralCategory;

use crate::buffer::Buffer;
use crate::{DOTTED_CIRCLE, NBSP};

/// Shaping category of one code point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Category {
    Other,
    Consonant,
    /// Assigned by rule from the per-script Ra set, never by table.
    Ra,
    VowelIndependent,
    Nukta,
    Virama,
    NonJoiner,
    Joiner,
    VowelDependent,
    SyllableModifier,
    VedicSign,
    Anudatta,
    /// No-break space, usable as a mark carrier.
    Placeholder,
    DottedCircle,
    /// Khmer register shifter.
    RegisterShifter,
    /// Khmer invisible stacker, forming subjoined and final consonants.
    Coeng,
    /// Logically-encoded repha, eg. Malayalam dot reph.
    Repha,
}

/// Positional class. Doubles as the reorder key: smaller sorts earlier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Position {
    RaToBecomeReph,
    PrebaseMatra,
    PrebaseConsonant,
    SyllableBase,
    BelowbaseConsonant,
    AbovebaseConsonant,
    PostbaseConsonant,
    AbovebaseMatra,
    BelowbaseMatra,
    PostbaseMatra,
    FinalConsonant,
    Smvd,
}

/// Raw table classification of `u`: category plus the position used if
/// the categorizer does not supersede it. Only matras carry a meaningful
/// table position.
fn indic_character(u: u32) -> (Category, Position) {
    match u {
        0x0900..=0x097F => devanagari_character(u),
        0x0980..=0x09FF => bengali_character(u),
        0x0A00..=0x0A7F => gurmukhi_character(u),
        0x0A80..=0x0AFF => gujarati_character(u),
        0x0B00..=0x0B7F => oriya_character(u),
        0x0B80..=0x0BFF => tamil_character(u),
        0x0C00..=0x0C7F => telugu_character(u),
        0x0C80..=0x0CFF => kannada_character(u),
        0x0D00..=0x0D7F => malayalam_character(u),
        0x1780..=0x17FF => khmer_character(u),
        _ if u == NBSP as u32 => (Category::Placeholder, Position::SyllableBase),
        0x200C => (Category::NonJoiner, Position::SyllableBase),
        0x200D => (Category::Joiner, Position::SyllableBase),
        _ if u == DOTTED_CIRCLE as u32 => (Category::DottedCircle, Position::SyllableBase),
        _ => (Category::Other, Position::SyllableBase),
    }
}

fn devanagari_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x0900..=0x0903 => (SyllableModifier, Smvd), // Candrabindu..Visarga
        0x0904..=0x0914 => (VowelIndependent, SyllableBase),
        0x0915..=0x0939 => (Consonant, SyllableBase), // Ka..Ha
        0x093A => (VowelDependent, AbovebaseMatra),   // Sign Oe
        0x093B => (VowelDependent, PostbaseMatra),    // Sign Ooe
        0x093C => (Nukta, SyllableBase),
        0x093D => (Other, SyllableBase), // Avagraha
        0x093E => (VowelDependent, PostbaseMatra),    // Sign Aa
        0x093F => (VowelDependent, PrebaseMatra),     // Sign I
        0x0940 => (VowelDependent, PostbaseMatra),    // Sign Ii
        0x0941..=0x0944 => (VowelDependent, BelowbaseMatra), // Sign U..Vocalic Rr
        0x0945..=0x0948 => (VowelDependent, AbovebaseMatra), // Sign Candra E..Ai
        0x0949..=0x094C => (VowelDependent, PostbaseMatra), // Sign Candra O..Au
        0x094D => (Virama, SyllableBase),
        0x094E => (VowelDependent, PrebaseMatra), // Sign Prishthamatra E
        0x094F => (VowelDependent, PostbaseMatra), // Sign Aw
        0x0950 => (Other, SyllableBase),          // Om
        0x0951 => (VedicSign, Smvd),              // Udatta
        0x0952 => (Anudatta, Smvd),
        0x0953..=0x0954 => (Other, SyllableBase), // Grave, Acute
        0x0955 => (VowelDependent, AbovebaseMatra), // Sign Candra Long E
        0x0956..=0x0957 => (VowelDependent, BelowbaseMatra), // Sign Ue, Uue
        0x0958..=0x095F => (Consonant, SyllableBase), // Qa..Yya
        0x0960..=0x0961 => (VowelIndependent, SyllableBase),
        0x0962..=0x0963 => (VowelDependent, BelowbaseMatra), // Sign Vocalic L, Ll
        0x0972..=0x0977 => (VowelIndependent, SyllableBase),
        0x0979..=0x097F => (Consonant, SyllableBase), // Zha..Bba
        _ => (Other, SyllableBase),
    }
}

fn bengali_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x0981..=0x0983 => (SyllableModifier, Smvd),
        0x0985..=0x098C => (VowelIndependent, SyllableBase),
        0x098F..=0x0990 => (VowelIndependent, SyllableBase),
        0x0993..=0x0994 => (VowelIndependent, SyllableBase),
        0x0995..=0x09A8 => (Consonant, SyllableBase),
        0x09AA..=0x09B0 => (Consonant, SyllableBase),
        0x09B2 => (Consonant, SyllableBase),
        0x09B6..=0x09B9 => (Consonant, SyllableBase),
        0x09BC => (Nukta, SyllableBase),
        0x09BD => (Other, SyllableBase), // Avagraha
        0x09BE => (VowelDependent, PostbaseMatra), // Sign Aa
        0x09BF => (VowelDependent, PrebaseMatra), // Sign I
        0x09C0 => (VowelDependent, PostbaseMatra), // Sign Ii
        0x09C1..=0x09C4 => (VowelDependent, BelowbaseMatra), // Sign U..Vocalic Rr
        0x09C7..=0x09C8 => (VowelDependent, PrebaseMatra), // Sign E, Ai
        0x09CB..=0x09CC => (VowelDependent, PostbaseMatra), // Sign O, Au (split)
        0x09CD => (Virama, SyllableBase),
        0x09CE => (Consonant, SyllableBase), // Khanda Ta
        0x09D7 => (VowelDependent, PostbaseMatra), // Au Length Mark
        0x09DC..=0x09DD => (Consonant, SyllableBase),
        0x09DF => (Consonant, SyllableBase), // Yya
        0x09E0..=0x09E1 => (VowelIndependent, SyllableBase),
        0x09E2..=0x09E3 => (VowelDependent, BelowbaseMatra),
        0x09F0..=0x09F1 => (Consonant, SyllableBase), // Ra with middle/lower diagonal
        _ => (Other, SyllableBase),
    }
}

fn gurmukhi_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x0A01..=0x0A03 => (SyllableModifier, Smvd),
        0x0A05..=0x0A0A => (VowelIndependent, SyllableBase),
        0x0A0F..=0x0A10 => (VowelIndependent, SyllableBase),
        0x0A13..=0x0A14 => (VowelIndependent, SyllableBase),
        0x0A15..=0x0A28 => (Consonant, SyllableBase),
        0x0A2A..=0x0A30 => (Consonant, SyllableBase),
        0x0A32..=0x0A33 => (Consonant, SyllableBase),
        0x0A35..=0x0A36 => (Consonant, SyllableBase),
        0x0A38..=0x0A39 => (Consonant, SyllableBase),
        0x0A3C => (Nukta, SyllableBase),
        0x0A3E => (VowelDependent, PostbaseMatra), // Sign Aa
        0x0A3F => (VowelDependent, PrebaseMatra),  // Sign I
        0x0A40 => (VowelDependent, PostbaseMatra), // Sign Ii
        0x0A41..=0x0A42 => (VowelDependent, BelowbaseMatra), // Sign U, Uu
        0x0A47..=0x0A48 => (VowelDependent, AbovebaseMatra), // Sign Ee, Ai
        0x0A4B..=0x0A4C => (VowelDependent, AbovebaseMatra), // Sign Oo, Au
        0x0A4D => (Virama, SyllableBase),
        0x0A59..=0x0A5C => (Consonant, SyllableBase),
        0x0A5E => (Consonant, SyllableBase),
        0x0A70..=0x0A71 => (SyllableModifier, Smvd), // Tippi, Addak
        0x0A72..=0x0A73 => (VowelIndependent, SyllableBase), // Iri, Ura
        0x0A75 => (Consonant, SyllableBase), // Yakash
        _ => (Other, SyllableBase),
    }
}

fn gujarati_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x0A81..=0x0A83 => (SyllableModifier, Smvd),
        0x0A85..=0x0A8D => (VowelIndependent, SyllableBase),
        0x0A8F..=0x0A91 => (VowelIndependent, SyllableBase),
        0x0A93..=0x0A94 => (VowelIndependent, SyllableBase),
        0x0A95..=0x0AA8 => (Consonant, SyllableBase),
        0x0AAA..=0x0AB0 => (Consonant, SyllableBase),
        0x0AB2..=0x0AB3 => (Consonant, SyllableBase),
        0x0AB5..=0x0AB9 => (Consonant, SyllableBase),
        0x0ABC => (Nukta, SyllableBase),
        0x0ABD => (Other, SyllableBase), // Avagraha
        0x0ABE => (VowelDependent, PostbaseMatra), // Sign Aa
        0x0ABF => (VowelDependent, PrebaseMatra), // Sign I
        0x0AC0 => (VowelDependent, PostbaseMatra), // Sign Ii
        0x0AC1..=0x0AC4 => (VowelDependent, BelowbaseMatra), // Sign U..Vocalic Rr
        0x0AC5 => (VowelDependent, AbovebaseMatra), // Sign Candra E
        0x0AC7..=0x0AC8 => (VowelDependent, AbovebaseMatra), // Sign E, Ai
        0x0AC9 => (VowelDependent, PostbaseMatra), // Sign Candra O
        0x0ACB..=0x0ACC => (VowelDependent, PostbaseMatra), // Sign O, Au
        0x0ACD => (Virama, SyllableBase),
        0x0AE0..=0x0AE1 => (VowelIndependent, SyllableBase),
        0x0AE2..=0x0AE3 => (VowelDependent, BelowbaseMatra),
        _ => (Other, SyllableBase),
    }
}

fn oriya_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x0B01..=0x0B03 => (SyllableModifier, Smvd),
        0x0B05..=0x0B0C => (VowelIndependent, SyllableBase),
        0x0B0F..=0x0B10 => (VowelIndependent, SyllableBase),
        0x0B13..=0x0B14 => (VowelIndependent, SyllableBase),
        0x0B15..=0x0B28 => (Consonant, SyllableBase),
        0x0B2A..=0x0B30 => (Consonant, SyllableBase),
        0x0B32..=0x0B33 => (Consonant, SyllableBase),
        0x0B35..=0x0B39 => (Consonant, SyllableBase),
        0x0B3C => (Nukta, SyllableBase),
        0x0B3D => (Other, SyllableBase), // Avagraha
        0x0B3E => (VowelDependent, PostbaseMatra), // Sign Aa
        0x0B3F => (VowelDependent, AbovebaseMatra), // Sign I
        0x0B40 => (VowelDependent, PostbaseMatra), // Sign Ii
        0x0B41..=0x0B44 => (VowelDependent, BelowbaseMatra), // Sign U..Vocalic Rr
        0x0B47..=0x0B48 => (VowelDependent, PrebaseMatra), // Sign E, Ai
        0x0B4B..=0x0B4C => (VowelDependent, PostbaseMatra), // Sign O, Au (split)
        0x0B4D => (Virama, SyllableBase),
        0x0B56 => (VowelDependent, AbovebaseMatra), // Ai Length Mark
        0x0B57 => (VowelDependent, PostbaseMatra),  // Au Length Mark
        0x0B5C..=0x0B5D => (Consonant, SyllableBase),
        0x0B5F => (Consonant, SyllableBase), // Yya
        0x0B60..=0x0B61 => (VowelIndependent, SyllableBase),
        0x0B62..=0x0B63 => (VowelDependent, BelowbaseMatra),
        0x0B71 => (Consonant, SyllableBase), // Wa
        _ => (Other, SyllableBase),
    }
}

fn tamil_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x0B82..=0x0B83 => (SyllableModifier, Smvd), // Anusvara, Visarga
        0x0B85..=0x0B8A => (VowelIndependent, SyllableBase),
        0x0B8E..=0x0B90 => (VowelIndependent, SyllableBase),
        0x0B92..=0x0B94 => (VowelIndependent, SyllableBase),
        0x0B95 => (Consonant, SyllableBase),
        0x0B99..=0x0B9A => (Consonant, SyllableBase),
        0x0B9C => (Consonant, SyllableBase),
        0x0B9E..=0x0B9F => (Consonant, SyllableBase),
        0x0BA3..=0x0BA4 => (Consonant, SyllableBase),
        0x0BA8..=0x0BAA => (Consonant, SyllableBase),
        0x0BAE..=0x0BB9 => (Consonant, SyllableBase),
        0x0BBE..=0x0BBF => (VowelDependent, PostbaseMatra), // Sign Aa, I
        0x0BC0 => (VowelDependent, AbovebaseMatra), // Sign Ii
        0x0BC1..=0x0BC2 => (VowelDependent, PostbaseMatra), // Sign U, Uu
        0x0BC6..=0x0BC8 => (VowelDependent, PrebaseMatra), // Sign E, Ee, Ai
        0x0BCA..=0x0BCC => (VowelDependent, PostbaseMatra), // Sign O, Oo, Au (split)
        0x0BCD => (Virama, SyllableBase),
        0x0BD7 => (VowelDependent, PostbaseMatra), // Au Length Mark
        _ => (Other, SyllableBase),
    }
}

fn telugu_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x0C01..=0x0C03 => (SyllableModifier, Smvd),
        0x0C05..=0x0C0C => (VowelIndependent, SyllableBase),
        0x0C0E..=0x0C10 => (VowelIndependent, SyllableBase),
        0x0C12..=0x0C14 => (VowelIndependent, SyllableBase),
        0x0C15..=0x0C28 => (Consonant, SyllableBase),
        0x0C2A..=0x0C33 => (Consonant, SyllableBase),
        0x0C35..=0x0C39 => (Consonant, SyllableBase),
        0x0C3D => (Other, SyllableBase), // Avagraha
        0x0C3E..=0x0C40 => (VowelDependent, AbovebaseMatra), // Sign Aa, I, Ii
        0x0C41..=0x0C44 => (VowelDependent, PostbaseMatra), // Sign U..Vocalic Rr
        0x0C46..=0x0C48 => (VowelDependent, AbovebaseMatra), // Sign E, Ee, Ai
        0x0C4A..=0x0C4C => (VowelDependent, AbovebaseMatra), // Sign O, Oo, Au
        0x0C4D => (Virama, SyllableBase),
        0x0C55 => (VowelDependent, AbovebaseMatra), // Length Mark
        0x0C56 => (VowelDependent, BelowbaseMatra), // Ai Length Mark
        0x0C58..=0x0C59 => (Consonant, SyllableBase),
        0x0C60..=0x0C61 => (VowelIndependent, SyllableBase),
        0x0C62..=0x0C63 => (VowelDependent, BelowbaseMatra),
        _ => (Other, SyllableBase),
    }
}

fn kannada_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x0C82..=0x0C83 => (SyllableModifier, Smvd),
        0x0C85..=0x0C8C => (VowelIndependent, SyllableBase),
        0x0C8E..=0x0C90 => (VowelIndependent, SyllableBase),
        0x0C92..=0x0C94 => (VowelIndependent, SyllableBase),
        0x0C95..=0x0CA8 => (Consonant, SyllableBase),
        0x0CAA..=0x0CB3 => (Consonant, SyllableBase),
        0x0CB5..=0x0CB9 => (Consonant, SyllableBase),
        0x0CBC => (Nukta, SyllableBase),
        0x0CBD => (Other, SyllableBase), // Avagraha
        0x0CBE => (VowelDependent, PostbaseMatra), // Sign Aa
        0x0CBF => (VowelDependent, AbovebaseMatra), // Sign I
        0x0CC0..=0x0CC4 => (VowelDependent, PostbaseMatra), // Sign Ii..Vocalic Rr
        0x0CC6 => (VowelDependent, AbovebaseMatra), // Sign E
        0x0CC7..=0x0CC8 => (VowelDependent, PostbaseMatra), // Sign Ee, Ai (split)
        0x0CCA..=0x0CCB => (VowelDependent, PostbaseMatra), // Sign O, Oo (split)
        0x0CCC => (VowelDependent, BelowbaseMatra), // Sign Au
        0x0CCD => (Virama, SyllableBase),
        0x0CD5..=0x0CD6 => (VowelDependent, PostbaseMatra), // Length Marks
        0x0CDE => (Consonant, SyllableBase), // Fa
        0x0CE0..=0x0CE1 => (VowelIndependent, SyllableBase),
        0x0CE2..=0x0CE3 => (VowelDependent, BelowbaseMatra),
        _ => (Other, SyllableBase),
    }
}

fn malayalam_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x0D02..=0x0D03 => (SyllableModifier, Smvd),
        0x0D05..=0x0D0C => (VowelIndependent, SyllableBase),
        0x0D0E..=0x0D10 => (VowelIndependent, SyllableBase),
        0x0D12..=0x0D14 => (VowelIndependent, SyllableBase),
        0x0D15..=0x0D28 => (Consonant, SyllableBase),
        0x0D2A..=0x0D39 => (Consonant, SyllableBase),
        0x0D3D => (Other, SyllableBase), // Avagraha
        0x0D3E..=0x0D40 => (VowelDependent, PostbaseMatra), // Sign Aa, I, Ii
        0x0D41..=0x0D42 => (VowelDependent, PostbaseMatra), // Sign U, Uu
        0x0D43..=0x0D44 => (VowelDependent, BelowbaseMatra), // Sign Vocalic R, Rr
        0x0D46..=0x0D48 => (VowelDependent, PrebaseMatra), // Sign E, Ee, Ai
        0x0D4A..=0x0D4C => (VowelDependent, PostbaseMatra), // Sign O, Oo, Au (split)
        0x0D4D => (Virama, SyllableBase),
        0x0D4E => (Repha, SyllableBase), // Dot Reph
        0x0D57 => (VowelDependent, PostbaseMatra), // Au Length Mark
        0x0D60..=0x0D61 => (VowelIndependent, SyllableBase),
        0x0D62..=0x0D63 => (VowelDependent, BelowbaseMatra),
        0x0D7A..=0x0D7F => (Consonant, SyllableBase), // Chillus
        _ => (Other, SyllableBase),
    }
}

fn khmer_character(u: u32) -> (Category, Position) {
    use self::Category::*;
    use self::Position::*;

    match u {
        0x1780..=0x17A2 => (Consonant, SyllableBase), // Ka..Qa
        0x17A3..=0x17B3 => (VowelIndependent, SyllableBase), // Qaq..Qau
        0x17B6 => (VowelDependent, PostbaseMatra), // Sign Aa
        0x17B7..=0x17BA => (VowelDependent, AbovebaseMatra), // Sign I..Yy
        0x17BB..=0x17BD => (VowelDependent, BelowbaseMatra), // Sign U..Ua
        0x17BE => (VowelDependent, AbovebaseMatra), // Sign Oe (split)
        0x17BF..=0x17C0 => (VowelDependent, PostbaseMatra), // Sign Ya, Ie (split)
        0x17C1..=0x17C3 => (VowelDependent, PrebaseMatra), // Sign E, Ae, Ai
        0x17C4..=0x17C5 => (VowelDependent, PostbaseMatra), // Sign Oo, Au (split)
        0x17C6 => (Nukta, SyllableBase),            // Nikahit
        0x17C7 => (SyllableModifier, Smvd),         // Reahmuk
        0x17C8 => (VowelDependent, PostbaseMatra),  // Yuukaleapintu
        0x17C9..=0x17CA => (RegisterShifter, SyllableBase), // Muusikatoan, Triisap
        0x17CC => (Repha, SyllableBase),            // Robat
        // The remaining signs (Bantoc, Toandakhiat, ..., Sign Coeng) are
        // classified by the categorizer's override pass.
        _ => (Other, SyllableBase),
    }
}

/// Consonants with below-base or post-base forms, sorted by code point.
/// Every consonant not listed takes its base form.
#[rustfmt::skip]
static CONSONANT_POSITIONS: &[(u32, Position)] = &[
    // Devanagari
    (0x0930, Position::BelowbaseConsonant), // Ra
    // Bengali
    (0x09AC, Position::BelowbaseConsonant), // Ba
    (0x09AF, Position::PostbaseConsonant),  // Ya
    (0x09B0, Position::BelowbaseConsonant), // Ra
    (0x09F0, Position::BelowbaseConsonant), // Ra with middle diagonal
    // Gurmukhi
    (0x0A2F, Position::PostbaseConsonant),  // Ya
    (0x0A30, Position::BelowbaseConsonant), // Ra
    (0x0A35, Position::BelowbaseConsonant), // Va
    (0x0A39, Position::BelowbaseConsonant), // Ha
    // Gujarati
    (0x0AB0, Position::BelowbaseConsonant), // Ra
    // Oriya
    (0x0B24, Position::BelowbaseConsonant), // Ta
    (0x0B28, Position::BelowbaseConsonant), // Na
    (0x0B2C, Position::BelowbaseConsonant), // Ba
    (0x0B2D, Position::BelowbaseConsonant), // Bha
    (0x0B2E, Position::BelowbaseConsonant), // Ma
    (0x0B2F, Position::PostbaseConsonant),  // Ya
    (0x0B30, Position::BelowbaseConsonant), // Ra
    (0x0B32, Position::BelowbaseConsonant), // La
    (0x0B33, Position::BelowbaseConsonant), // Lla
    (0x0B5F, Position::PostbaseConsonant),  // Yya
    (0x0B71, Position::BelowbaseConsonant), // Wa
    // Telugu: every consonant has a subjoined form
    (0x0C15, Position::BelowbaseConsonant),
    (0x0C16, Position::BelowbaseConsonant),
    (0x0C17, Position::BelowbaseConsonant),
    (0x0C18, Position::BelowbaseConsonant),
    (0x0C19, Position::BelowbaseConsonant),
    (0x0C1A, Position::BelowbaseConsonant),
    (0x0C1B, Position::BelowbaseConsonant),
    (0x0C1C, Position::BelowbaseConsonant),
    (0x0C1D, Position::BelowbaseConsonant),
    (0x0C1E, Position::BelowbaseConsonant),
    (0x0C1F, Position::BelowbaseConsonant),
    (0x0C20, Position::BelowbaseConsonant),
    (0x0C21, Position::BelowbaseConsonant),
    (0x0C22, Position::BelowbaseConsonant),
    (0x0C23, Position::BelowbaseConsonant),
    (0x0C24, Position::BelowbaseConsonant),
    (0x0C25, Position::BelowbaseConsonant),
    (0x0C26, Position::BelowbaseConsonant),
    (0x0C27, Position::BelowbaseConsonant),
    (0x0C28, Position::BelowbaseConsonant),
    (0x0C2A, Position::BelowbaseConsonant),
    (0x0C2B, Position::BelowbaseConsonant),
    (0x0C2C, Position::BelowbaseConsonant),
    (0x0C2D, Position::BelowbaseConsonant),
    (0x0C2E, Position::BelowbaseConsonant),
    (0x0C2F, Position::BelowbaseConsonant),
    (0x0C30, Position::BelowbaseConsonant),
    (0x0C31, Position::BelowbaseConsonant),
    (0x0C32, Position::BelowbaseConsonant),
    (0x0C33, Position::BelowbaseConsonant),
    (0x0C35, Position::BelowbaseConsonant),
    (0x0C36, Position::BelowbaseConsonant),
    (0x0C37, Position::BelowbaseConsonant),
    (0x0C38, Position::BelowbaseConsonant),
    (0x0C39, Position::BelowbaseConsonant),
    // Kannada: every consonant has a subjoined form
    (0x0C95, Position::BelowbaseConsonant),
    (0x0C96, Position::BelowbaseConsonant),
    (0x0C97, Position::BelowbaseConsonant),
    (0x0C98, Position::BelowbaseConsonant),
    (0x0C99, Position::BelowbaseConsonant),
    (0x0C9A, Position::BelowbaseConsonant),
    (0x0C9B, Position::BelowbaseConsonant),
    (0x0C9C, Position::BelowbaseConsonant),
    (0x0C9D, Position::BelowbaseConsonant),
    (0x0C9E, Position::BelowbaseConsonant),
    (0x0C9F, Position::BelowbaseConsonant),
    (0x0CA0, Position::BelowbaseConsonant),
    (0x0CA1, Position::BelowbaseConsonant),
    (0x0CA2, Position::BelowbaseConsonant),
    (0x0CA3, Position::BelowbaseConsonant),
    (0x0CA4, Position::BelowbaseConsonant),
    (0x0CA5, Position::BelowbaseConsonant),
    (0x0CA6, Position::BelowbaseConsonant),
    (0x0CA7, Position::BelowbaseConsonant),
    (0x0CA8, Position::BelowbaseConsonant),
    (0x0CAA, Position::BelowbaseConsonant),
    (0x0CAB, Position::BelowbaseConsonant),
    (0x0CAC, Position::BelowbaseConsonant),
    (0x0CAD, Position::BelowbaseConsonant),
    (0x0CAE, Position::BelowbaseConsonant),
    (0x0CAF, Position::BelowbaseConsonant),
    (0x0CB0, Position::BelowbaseConsonant),
    (0x0CB1, Position::BelowbaseConsonant),
    (0x0CB2, Position::BelowbaseConsonant),
    (0x0CB3, Position::BelowbaseConsonant),
    (0x0CB5, Position::BelowbaseConsonant),
    (0x0CB6, Position::BelowbaseConsonant),
    (0x0CB7, Position::BelowbaseConsonant),
    (0x0CB8, Position::BelowbaseConsonant),
    (0x0CB9, Position::BelowbaseConsonant),
    (0x0CDE, Position::BelowbaseConsonant), // Fa
    // Malayalam
    (0x0D2F, Position::PostbaseConsonant), // Ya
    (0x0D30, Position::PostbaseConsonant), // Ra
    (0x0D35, Position::PostbaseConsonant), // Va
];

/// Ra consonants, one per script, sorted by code point.
static RA_CHARS: &[u32] = &[
    0x0930, // Devanagari
    0x09B0, // Bengali
    0x09F0, // Bengali, Assamese
    0x0A30, // Gurmukhi
    0x0AB0, // Gujarati
    0x0B30, // Oriya
    0x0BB0, // Tamil
    0x0C30, // Telugu
    0x0CB0, // Kannada
    0x0D30, // Malayalam
    0x179A, // Khmer
];

fn consonant_position(u: u32) -> Position {
    // Khmer has no pre-base half forms
    if (0x1780..=0x17FF).contains(&u) {
        return Position::BelowbaseConsonant;
    }

    match CONSONANT_POSITIONS.binary_search_by_key(&u, |&(cp, _)| cp) {
        Ok(i) => CONSONANT_POSITIONS[i].1,
        Err(_) => Position::SyllableBase,
    }
}

fn is_ra(u: u32) -> bool {
    RA_CHARS.binary_search(&u).is_ok()
}

/// Assigns `category` and `position` to every glyph in the buffer.
pub fn categorize(buffer: &mut Buffer) {
    for glyph in &mut buffer.info {
        let u = glyph.codepoint;
        let (category, position) = indic_character(u);
        glyph.category = category;
        glyph.position = position;

        // Microsoft's script development spec lists U+0952 as anudatta,
        // but Uniscribe treats all of U+0951..U+0954 as vedic signs.
        // TESTS:
        // U+092E,U+0947,U+0952
        // U+092E,U+0952,U+0947
        // U+092E,U+0947,U+0951
        // U+092E,U+0951,U+0947
        if (0x0951..=0x0954).contains(&u) {
            glyph.category = Category::VedicSign;
        }

        // Khmer various signs
        if glyph.category == Category::Other && (0x17CB..=0x17D2).contains(&u) {
            glyph.category = Category::Nukta;
        }

        // The Khmer virama is different since it can be used to form a
        // final consonant.
        if u == 0x17D2 {
            glyph.category = Category::Coeng;
        }

        if glyph.category == Category::Repha {
            // Two kinds of characters are marked as repha: non-spacing
            // marks are already positioned visually, after the base
            // (eg. Khmer robat) and behave like a nukta attached to the
            // base; the ones with general category Letter are encoded
            // logically at the beginning of the syllable (eg. Malayalam
            // dot reph) and keep the repha category.
            if glyph.general_category == GeneralCategory::NonspacingMark {
                glyph.category = Category::Nukta;
            }
        }

        if glyph.is_consonant() {
            glyph.position = consonant_position(u);
            if is_ra(u) {
                glyph.category = Category::Ra;
            }
        } else if glyph.category == Category::RegisterShifter {
            glyph.position = Position::AbovebaseMatra;
        } else if glyph.category == Category::SyllableModifier
            || glyph.category == Category::VedicSign
        {
            glyph.position = Position::Smvd;
        } else if u == 0x200C {
            glyph.category = Category::NonJoiner;
        } else if u == 0x200D {
            glyph.category = Category::Joiner;
        } else if u == DOTTED_CIRCLE as u32 {
            glyph.category = Category::DottedCircle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;

    fn categorized(script: Script, text: &str) -> Vec<(Category, Position)> {
        let mut buffer = Buffer::new(script, text);
        categorize(&mut buffer);
        buffer.info.iter().map(|g| (g.category, g.position)).collect()
    }

    mod tables {
        use super::*;

        #[test]
        fn test_position_order_is_the_reorder_key() {
            assert!(Position::RaToBecomeReph < Position::PrebaseMatra);
            assert!(Position::PrebaseMatra < Position::PrebaseConsonant);
            assert!(Position::PrebaseConsonant < Position::SyllableBase);
            assert!(Position::SyllableBase < Position::BelowbaseConsonant);
            assert!(Position::BelowbaseConsonant < Position::AbovebaseConsonant);
            assert!(Position::AbovebaseConsonant < Position::PostbaseConsonant);
            assert!(Position::PostbaseConsonant < Position::AbovebaseMatra);
            assert!(Position::AbovebaseMatra < Position::BelowbaseMatra);
            assert!(Position::BelowbaseMatra < Position::PostbaseMatra);
            assert!(Position::PostbaseMatra < Position::FinalConsonant);
            assert!(Position::FinalConsonant < Position::Smvd);
        }

        #[test]
        fn test_consonant_positions_sorted() {
            let mut sorted = CONSONANT_POSITIONS.to_vec();
            sorted.sort_by_key(|&(cp, _)| cp);
            assert!(CONSONANT_POSITIONS.iter().map(|&(cp, _)| cp).eq(sorted.iter().map(|&(cp, _)| cp)));
            let mut ra = RA_CHARS.to_vec();
            ra.sort();
            assert_eq!(RA_CHARS, &ra[..]);
        }

        #[test]
        fn test_devanagari() {
            assert_eq!(
                indic_character(0x0915),
                (Category::Consonant, Position::SyllableBase)
            );
            assert_eq!(
                indic_character(0x093F),
                (Category::VowelDependent, Position::PrebaseMatra)
            );
            assert_eq!(
                indic_character(0x0947),
                (Category::VowelDependent, Position::AbovebaseMatra)
            );
            assert_eq!(indic_character(0x094D).0, Category::Virama);
            assert_eq!(indic_character(0x0905).0, Category::VowelIndependent);
            assert_eq!(indic_character(0x093C).0, Category::Nukta);
        }

        #[test]
        fn test_bengali_pre_base_vowels() {
            assert_eq!(indic_character(0x09C7).1, Position::PrebaseMatra);
            assert_eq!(indic_character(0x09BF).1, Position::PrebaseMatra);
        }

        #[test]
        fn test_khmer() {
            assert_eq!(indic_character(0x1780).0, Category::Consonant);
            assert_eq!(indic_character(0x17C1).1, Position::PrebaseMatra);
            assert_eq!(indic_character(0x17C9).0, Category::RegisterShifter);
        }
    }

    mod overrides {
        use super::*;

        #[test]
        fn test_vedic_range() {
            // U+0952 is anudatta by table, vedic by override
            let glyphs = categorized(Script::Devanagari, "\u{092E}\u{0947}\u{0952}");
            assert_eq!(glyphs[2], (Category::VedicSign, Position::Smvd));
        }

        #[test]
        fn test_khmer_signs_become_nukta() {
            let glyphs = categorized(Script::Khmer, "\u{17CB}\u{17CD}\u{17D1}");
            assert!(glyphs.iter().all(|&(c, _)| c == Category::Nukta));
        }

        #[test]
        fn test_khmer_coeng() {
            let glyphs = categorized(Script::Khmer, "\u{17D2}");
            assert_eq!(glyphs[0].0, Category::Coeng);
        }

        #[test]
        fn test_visual_repha_becomes_nukta() {
            // Robat is a non-spacing mark
            let glyphs = categorized(Script::Khmer, "\u{17CC}");
            assert_eq!(glyphs[0].0, Category::Nukta);
        }

        #[test]
        fn test_logical_repha_kept() {
            // Malayalam dot reph is a letter
            let glyphs = categorized(Script::Malayalam, "\u{0D4E}");
            assert_eq!(glyphs[0].0, Category::Repha);
        }

        #[test]
        fn test_joiners_and_dotted_circle() {
            let glyphs = categorized(Script::Devanagari, "\u{200C}\u{200D}\u{25CC}");
            assert_eq!(glyphs[0].0, Category::NonJoiner);
            assert_eq!(glyphs[1].0, Category::Joiner);
            assert_eq!(glyphs[2].0, Category::DottedCircle);
        }
    }

    mod consonant_positions {
        use super::*;

        #[test]
        fn test_ra_is_recategorized_with_below_form() {
            let glyphs = categorized(Script::Devanagari, "\u{0930}");
            assert_eq!(glyphs[0], (Category::Ra, Position::BelowbaseConsonant));
        }

        #[test]
        fn test_khmer_block_is_below_base() {
            let glyphs = categorized(Script::Khmer, "\u{1780}");
            assert_eq!(glyphs[0], (Category::Consonant, Position::BelowbaseConsonant));
        }

        #[test]
        fn test_bengali_ya_is_post_base() {
            let glyphs = categorized(Script::Bengali, "\u{09AF}");
            assert_eq!(glyphs[0], (Category::Consonant, Position::PostbaseConsonant));
        }

        #[test]
        fn test_plain_consonant_is_base() {
            let glyphs = categorized(Script::Devanagari, "\u{0915}");
            assert_eq!(glyphs[0], (Category::Consonant, Position::SyllableBase));
        }

        #[test]
        fn test_register_shifter_position() {
            let glyphs = categorized(Script::Khmer, "\u{17C9}");
            assert_eq!(
                glyphs[0],
                (Category::RegisterShifter, Position::AbovebaseMatra)
            );
        }
    }
}
