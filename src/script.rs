//! Script identification for the Indic and Khmer shapers.

use crate::tag;

/// Bit set on a script tag to select the old-specification feature scheme.
const OLD_TAG_BIT: u32 = 0x2000_0000;

/// The scripts handled by this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Script {
    Bengali,
    Devanagari,
    Gujarati,
    Gurmukhi,
    Kannada,
    Khmer,
    Malayalam,
    Oriya,
    Tamil,
    Telugu,
}

/// Where the base consonant is searched for within a syllable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BasePos {
    First,
    Last,
}

/// Where a Reph ends up relative to the base and its attachments.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RephPosition {
    AfterMain,
    BeforeSubscript,
    AfterSubscript,
    BeforePostscript,
    AfterPostscript,
}

impl Script {
    /// Maps a script tag (new-spec or old-spec variant) to a `Script`.
    pub fn from_tag(script_tag: u32) -> Option<Script> {
        match script_tag & !OLD_TAG_BIT {
            tag::BENG => Some(Script::Bengali),
            tag::DEVA => Some(Script::Devanagari),
            tag::GUJR => Some(Script::Gujarati),
            tag::GURU => Some(Script::Gurmukhi),
            tag::KNDA => Some(Script::Kannada),
            tag::KHMR => Some(Script::Khmer),
            tag::MLYM => Some(Script::Malayalam),
            tag::ORYA => Some(Script::Oriya),
            tag::TAML => Some(Script::Tamil),
            tag::TELU => Some(Script::Telugu),
            _ => None,
        }
    }

    pub fn tag(self) -> u32 {
        match self {
            Script::Bengali => tag::BENG,
            Script::Devanagari => tag::DEVA,
            Script::Gujarati => tag::GUJR,
            Script::Gurmukhi => tag::GURU,
            Script::Kannada => tag::KNDA,
            Script::Khmer => tag::KHMR,
            Script::Malayalam => tag::MLYM,
            Script::Oriya => tag::ORYA,
            Script::Tamil => tag::TAML,
            Script::Telugu => tag::TELU,
        }
    }

    /// The old-specification variant of this script's tag. Khmer has no
    /// old variant; its plain tag is returned unchanged.
    pub fn old_tag(self) -> u32 {
        match self {
            Script::Khmer => tag::KHMR,
            _ => self.tag() | OLD_TAG_BIT,
        }
    }

    pub fn base_consonant_pos(self) -> BasePos {
        match self {
            Script::Khmer => BasePos::First,
            _ => BasePos::Last,
        }
    }

    pub fn reph_position(self) -> RephPosition {
        match self {
            Script::Malayalam => RephPosition::AfterMain,
            Script::Oriya => RephPosition::AfterMain,
            Script::Gurmukhi => RephPosition::BeforeSubscript,
            Script::Bengali => RephPosition::AfterSubscript,
            Script::Devanagari => RephPosition::BeforePostscript,
            Script::Gujarati => RephPosition::BeforePostscript,
            Script::Khmer => RephPosition::BeforePostscript,
            Script::Kannada => RephPosition::AfterPostscript,
            Script::Tamil => RephPosition::AfterPostscript,
            Script::Telugu => RephPosition::AfterPostscript,
        }
    }
}

/// Returns `true` if `script_tag` selects the old-specification feature
/// scheme for one of the nine Indic scripts. There is no old Khmer tag.
pub fn is_old_indic_tag(script_tag: u32) -> bool {
    match script_tag & !OLD_TAG_BIT {
        tag::BENG | tag::DEVA | tag::GUJR | tag::GURU | tag::KNDA | tag::MLYM | tag::ORYA
        | tag::TAML | tag::TELU => script_tag & OLD_TAG_BIT != 0,
        _ => false,
    }
}

/// Properties of the text segment being shaped.
#[derive(Copy, Clone, Debug)]
pub struct SegmentProperties {
    pub script: Script,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for &script in &[
            Script::Bengali,
            Script::Devanagari,
            Script::Gujarati,
            Script::Gurmukhi,
            Script::Kannada,
            Script::Khmer,
            Script::Malayalam,
            Script::Oriya,
            Script::Tamil,
            Script::Telugu,
        ] {
            assert_eq!(Script::from_tag(script.tag()), Some(script));
            assert_eq!(Script::from_tag(script.old_tag()), Some(script));
        }
    }

    #[test]
    fn test_old_tag_lowercases() {
        // `Deva` with the old bit set reads as `deva`
        assert_eq!(Script::Devanagari.old_tag(), tag!(b"deva"));
    }

    #[test]
    fn test_is_old_indic_tag() {
        assert!(is_old_indic_tag(Script::Devanagari.old_tag()));
        assert!(is_old_indic_tag(Script::Kannada.old_tag()));
        assert!(!is_old_indic_tag(Script::Devanagari.tag()));
        // Khmer has no old variant
        assert!(!is_old_indic_tag(Script::Khmer.old_tag()));
        assert!(!is_old_indic_tag(tag!(b"latn")));
    }
}
