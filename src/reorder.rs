//! Initial and final syllable reordering.
//!
//! Rules from the Microsoft OpenType script development specifications,
//! with the deviations needed to reproduce Uniscribe where the two
//! disagree. The initial pass runs before the basic substitution
//! features and rearranges each syllable into canonical modifier order,
//! assigning per-feature masks; the final pass runs after those features
//! have applied and repositions pre-base matras, the reph, and pre-base
//! reordering consonants.

use std::cmp;

use log::debug;
use unicode_general_category::GeneralCategory;

use crate::buffer::{Buffer, GlyphInfo, Mask, SyllableKind};
use crate::categorize::{Category, Position};
use crate::options::{indic_options, IndicOptions};
use crate::plan::FeatureMap;
use crate::script::{is_old_indic_tag, BasePos, RephPosition, Script};
use crate::segment::find_syllables;
use crate::shaper::BasicFeature;
use crate::tag;

/// Single-bit masks for the basic features, in feature order.
pub(crate) struct BasicMasks {
    masks: [Mask; BasicFeature::ALL.len()],
}

impl BasicMasks {
    pub(crate) fn from_map(map: &FeatureMap) -> BasicMasks {
        let mut masks = [0; BasicFeature::ALL.len()];
        for &feature in BasicFeature::ALL {
            masks[feature as usize] = map.get_1_mask(feature.tag());
        }
        BasicMasks { masks }
    }

    fn get(&self, feature: BasicFeature) -> Mask {
        self.masks[feature as usize]
    }
}

fn is_matra_halant_or_coeng(glyph: &GlyphInfo) -> bool {
    match glyph.category {
        Category::VowelDependent | Category::Virama | Category::Coeng => true,
        _ => false,
    }
}

/////////////////////////////////////////////////////////////////////////////
// Initial reordering
/////////////////////////////////////////////////////////////////////////////

/// Pause callback run before the basic substitution features. Segments
/// the buffer into syllables and reorders each one.
pub fn initial_reordering(map: &FeatureMap, buffer: &mut Buffer) {
    initial_reordering_with_options(map, buffer, indic_options());
}

pub(crate) fn initial_reordering_with_options(
    map: &FeatureMap,
    buffer: &mut Buffer,
    options: IndicOptions,
) {
    if buffer.is_empty() {
        return;
    }

    let masks = BasicMasks::from_map(map);
    find_syllables(buffer);

    let count = buffer.len();
    let mut start = 0;
    while start < count {
        let syllable = buffer.info[start].syllable;
        let mut end = start + 1;
        while end < count && buffer.info[end].syllable == syllable {
            end += 1;
        }
        initial_reorder_syllable(map.chosen_script(), options, &masks, buffer, start, end);
        start = end;
    }
}

fn initial_reorder_syllable(
    chosen_script: u32,
    options: IndicOptions,
    masks: &BasicMasks,
    buffer: &mut Buffer,
    start: usize,
    end: usize,
) {
    let script = buffer.props.script;
    match buffer.info[start].syllable_kind() {
        // Vowels were made to look like consonants, so the consonant
        // logic handles vowel syllables as well.
        Some(SyllableKind::Consonant) | Some(SyllableKind::Vowel) => {
            initial_reorder_consonant_syllable(
                script,
                chosen_script,
                options,
                masks,
                &mut buffer.info,
                start,
                end,
            );
        }
        Some(SyllableKind::Standalone) => {
            // NBSP and dotted-circle are treated as consonants too, so
            // chain to the consonant logic. Except that when the cluster
            // ends in a dotted circle, Uniscribe does nothing at all: in
            // particular it does not form a reph.
            if options.uniscribe_bug_compatible()
                && buffer.info[end - 1].category == Category::DottedCircle
            {
                return;
            }
            initial_reorder_consonant_syllable(
                script,
                chosen_script,
                options,
                masks,
                &mut buffer.info,
                start,
                end,
            );
        }
        Some(SyllableKind::NonIndic) | None => {}
    }
}

fn initial_reorder_consonant_syllable(
    script: Script,
    chosen_script: u32,
    options: IndicOptions,
    masks: &BasicMasks,
    info: &mut [GlyphInfo],
    start: usize,
    end: usize,
) {
    // 1. Find base consonant:
    //
    // Starting from the end of the syllable, move backwards until a
    // consonant is found that does not have a below-base or post-base
    // form (post-base forms have to follow below-base forms), or that is
    // not a pre-base reordering Ra, or arrive at the first consonant.
    // The consonant stopped at will be the base.

    let mut base = end;
    let mut has_reph = false;

    {
        // If the syllable starts with Ra + Halant (in a script that has
        // Reph) and has more than one consonant, Ra is excluded from
        // candidates for base consonants.
        let mut limit = start;
        if masks.get(BasicFeature::Rphf) != 0
            && start + 3 <= end
            && info[start].category == Category::Ra
            && info[start + 1].category == Category::Virama
            && !info[start + 2].is_joiner()
        {
            limit += 2;
            base = start;
            has_reph = true;
        }

        match script.base_consonant_pos() {
            BasePos::Last => {
                let mut i = end;
                loop {
                    i -= 1;
                    if info[i].is_consonant() {
                        if info[i].position != Position::BelowbaseConsonant
                            && info[i].position != Position::PostbaseConsonant
                        {
                            base = i;
                            break;
                        }
                        // Pre-base reordering Ra's carry the below-base
                        // position, so they are skipped here as well.
                        base = i;
                    } else if info[i].is_joiner() {
                        break;
                    }
                    if i <= limit {
                        break;
                    }
                }
            }
            BasePos::First => {
                // In scripts without half forms the first consonant is
                // always the base.
                if !has_reph {
                    base = limit;
                }
            }
        }

        if base < start {
            base = start; // Just in case...
        }

        if has_reph && base == start {
            // No other consonant, so Reph is not formed and Ra becomes base.
            has_reph = false;
        }
    }

    // 2. Decompose and reorder matras: the normalizer has already split
    //    two- and three-part matras.
    // 3. Reorder marks to canonical order (nukta before halant, before
    //    vedic signs): also handled during normalization.

    // Reorder characters

    for i in start..base {
        info[i].position = Position::PrebaseConsonant;
    }

    if base < end {
        info[base].position = Position::SyllableBase;
    }

    // Mark final consonants. A final consonant is one appearing after
    // a matra, as in Khmer.
    for i in (base + 1)..end {
        if info[i].category == Category::VowelDependent {
            for j in (i + 1)..end {
                if info[j].is_consonant() {
                    info[j].position = Position::FinalConsonant;
                    break;
                }
            }
            break;
        }
    }

    // Handle beginning Ra
    if has_reph {
        info[start].position = Position::RaToBecomeReph;
    }

    // For old-style script tags, move the first post-base halant after
    // the last consonant. This ordering is what old-specification fonts
    // expect.
    if is_old_indic_tag(chosen_script) {
        for i in (base + 1)..end {
            if info[i].category == Category::Virama {
                let mut j = end - 1;
                while j > i && !info[j].is_consonant() {
                    j -= 1;
                }
                if j > i {
                    info[i..=j].rotate_left(1);
                }
                break;
            }
        }
    }

    // Attach ZWJ, ZWNJ, nukta, and halant to the previous char so they
    // move with it during sorting.
    fn attaches_to_previous(glyph: &GlyphInfo) -> bool {
        match glyph.category {
            Category::NonJoiner
            | Category::Joiner
            | Category::Nukta
            | Category::RegisterShifter
            | Category::Virama => true,
            _ => false,
        }
    }

    if !options.uniscribe_bug_compatible() {
        // Please update the Uniscribe branch when touching this!
        for i in (start + 1)..end {
            if attaches_to_previous(&info[i]) {
                info[i].position = info[i - 1].position;
            }
        }
    } else {
        // Uniscribe does not move the halant with a left matra.
        // TEST: U+092B,U+093F,U+094D
        // Please update the other branch when touching this!
        for i in (start + 1)..end {
            if attaches_to_previous(&info[i]) {
                info[i].position = info[i - 1].position;
                if info[i].category == Category::Virama
                    && info[i].position == Position::PrebaseMatra
                {
                    for j in (start + 1..=i).rev() {
                        if info[j - 1].position != Position::PrebaseMatra {
                            info[i].position = info[j - 1].position;
                            break;
                        }
                    }
                }
            }
        }
    }

    // Re-attach ZWJ, ZWNJ, and halant to the next char, for after-base
    // consonants.
    {
        let mut last_halant = end;
        for i in (base + 1)..end {
            if info[i].is_halant_or_coeng() {
                last_halant = i;
            } else if info[i].is_consonant() {
                let position = info[i].position;
                for j in last_halant..i {
                    info[j].position = position;
                }
            }
        }
    }

    // Sort to canonical order. The sort must be stable so that glyphs
    // sharing a position keep their relative order; the length cap skips
    // malicious cluster attempts.
    if end - start < 64 {
        for i in (start + 1)..end {
            let mut j = i;
            while j > start && info[j - 1].position > info[j].position {
                info.swap(j - 1, j);
                j -= 1;
            }
        }

        // Find base again
        base = end;
        for i in start..end {
            if info[i].position == Position::SyllableBase {
                base = i;
                break;
            }
        }
    } else {
        debug!("skipping reorder of overlong syllable ({} glyphs)", end - start);
    }

    // Setup masks now

    // Reph
    {
        let rphf = masks.get(BasicFeature::Rphf);
        let mut i = start;
        while i < end && info[i].position == Position::RaToBecomeReph {
            info[i].mask |= rphf;
            i += 1;
        }
    }
    // Pre-base
    let mask =
        masks.get(BasicFeature::Half) | masks.get(BasicFeature::Akhn) | masks.get(BasicFeature::Cjct);
    for i in start..base {
        info[i].mask |= mask;
    }
    // Base
    let mask = masks.get(BasicFeature::Akhn) | masks.get(BasicFeature::Cjct);
    if base < end {
        info[base].mask |= mask;
    }
    // Post-base
    let mask = masks.get(BasicFeature::Blwf)
        | masks.get(BasicFeature::Abvf)
        | masks.get(BasicFeature::Pstf)
        | masks.get(BasicFeature::Cjct);
    for i in (base + 1)..end {
        info[i].mask |= mask;
    }

    // Find a halant,Ra sequence and mark it for pre-base reordering
    // processing. This will not match for old-specification fonts, since
    // the halant-Ra order is reversed already.
    if masks.get(BasicFeature::Pref) != 0 && base + 3 <= end {
        let pref = masks.get(BasicFeature::Pref);
        let cfar = masks.get(BasicFeature::Cfar);
        for i in (base + 1)..(end - 1) {
            if info[i].is_halant_or_coeng() && info[i + 1].category == Category::Ra {
                info[i].mask |= pref;
                info[i + 1].mask |= pref;

                // Mark the rest of the syllable with 'cfar'. This is what
                // distinguishes, in Khmer fonts,
                // U+1784,U+17D2,U+179A,U+17D2,U+1782 from
                // U+1784,U+17D2,U+1782,U+17D2,U+179A.
                for j in (i + 2)..end {
                    info[j].mask |= cfar;
                }
                break;
            }
        }
    }

    // Apply ZWJ/ZWNJ effects
    for i in (start + 1)..end {
        if info[i].is_joiner() {
            let non_joiner = info[i].category == Category::NonJoiner;
            let mut j = i;
            loop {
                j -= 1;

                info[j].mask &= !masks.get(BasicFeature::Cjct);
                if non_joiner {
                    info[j].mask &= !masks.get(BasicFeature::Half);
                }

                if j <= start || info[j].is_consonant() {
                    break;
                }
            }
        }
    }
}

/////////////////////////////////////////////////////////////////////////////
// Final reordering
/////////////////////////////////////////////////////////////////////////////

/// Pause callback run after the basic substitution features have
/// applied.
pub fn final_reordering(map: &FeatureMap, buffer: &mut Buffer) {
    final_reordering_with_options(map, buffer, indic_options());
}

pub(crate) fn final_reordering_with_options(
    map: &FeatureMap,
    buffer: &mut Buffer,
    options: IndicOptions,
) {
    if buffer.is_empty() {
        return;
    }

    let init_mask = map.get_1_mask(tag::INIT);
    let pref_mask = map.get_1_mask(tag::PREF);

    let count = buffer.len();
    let mut start = 0;
    while start < count {
        let syllable = buffer.info[start].syllable;
        let mut end = start + 1;
        while end < count && buffer.info[end].syllable == syllable {
            end += 1;
        }
        final_reorder_syllable(options, init_mask, pref_mask, buffer, start, end);
        start = end;
    }
}

fn final_reorder_syllable(
    options: IndicOptions,
    init_mask: Mask,
    pref_mask: Mask,
    buffer: &mut Buffer,
    start: usize,
    end: usize,
) {
    let script = buffer.props.script;
    let mut start_of_last_cluster = reorder_syllable_glyphs(
        script,
        options,
        init_mask,
        pref_mask,
        &mut buffer.info,
        start,
        end,
    );

    // Finish off the clusters and go home!

    if !options.uniscribe_bug_compatible() {
        // Uniscribe adds cluster boundaries after halant,ZWNJ, which
        // submerges half forms into the main consonant's cluster. This
        // makes cursor positioning harder, but we match it.
        let mut cluster_start = start;
        let mut i = start + 1;
        while i < start_of_last_cluster {
            if buffer.info[i - 1].is_halant_or_coeng()
                && buffer.info[i].category == Category::NonJoiner
            {
                i += 1;
                buffer.merge_clusters(cluster_start, i);
                cluster_start = i;
            }
            i += 1;
        }
        start_of_last_cluster = cluster_start;
    }

    buffer.merge_clusters(start_of_last_cluster, end);
}

/// Reorders the glyphs of one syllable and returns the start of its last
/// cluster.
fn reorder_syllable_glyphs(
    script: Script,
    options: IndicOptions,
    init_mask: Mask,
    pref_mask: Mask,
    info: &mut [GlyphInfo],
    start: usize,
    end: usize,
) -> usize {
    // Find base again
    let mut base = end;
    for i in start..end {
        if info[i].position == Position::SyllableBase {
            base = i;
            break;
        }
    }

    let mut start_of_last_cluster = base;

    // Reorder matras:
    //
    // If a pre-base matra character had been reordered before applying
    // basic features, the glyph can be moved closer to the main
    // consonant based on whether half-forms had been formed. The
    // position for the matra is "after last standalone halant glyph,
    // after initial matra position and before the main consonant". If
    // ZWJ or ZWNJ follow this halant, position is moved after it.

    if start < base {
        // Otherwise there can't be any pre-base matra characters.
        let mut new_pos = base - 1;
        while new_pos > start && !is_matra_halant_or_coeng(&info[new_pos]) {
            new_pos -= 1;
        }
        // If we found no halant we are done. Otherwise only proceed if
        // the halant does not belong to the matra itself.
        if info[new_pos].is_halant_or_coeng() && info[new_pos].position != Position::PrebaseMatra {
            if new_pos + 1 < end && info[new_pos + 1].is_joiner() {
                new_pos += 1;
            }

            // Now go see if there's actually any matras...
            for i in (start + 1..=new_pos).rev() {
                if info[i - 1].position == Position::PrebaseMatra {
                    let old_pos = i - 1;
                    info[old_pos..=new_pos].rotate_left(1);
                    start_of_last_cluster = cmp::min(new_pos, start_of_last_cluster);
                    new_pos -= 1;
                }
            }
        }
    }

    // Reorder reph:
    //
    // Reph's original position is always at the beginning of the
    // syllable (it is not reordered at the character reordering stage),
    // but it is reordered according to the basic-forms shaping results.
    //
    // If anything after the Ra still carries the reph position it ought
    // to be a halant, which means the font failed to ligate the reph; in
    // that case we should not move.
    if start + 1 < end
        && info[start].position == Position::RaToBecomeReph
        && info[start + 1].position != Position::RaToBecomeReph
    {
        let new_reph_pos = resolve_reph_pos(script.reph_position(), options, info, start, end, base);
        info[start..=new_reph_pos].rotate_left(1);
        start_of_last_cluster = start; // Yay, one big cluster!
    }

    // Reorder pre-base reordering consonants:
    //
    // Only reorder a glyph produced by substitution during application
    // of the pref feature: a font may shape a Ra consonant with the
    // feature generally but block it in certain contexts.
    if pref_mask != 0 && base + 1 < end {
        // Otherwise there can't be any pre-base reordering Ra.
        for i in (base + 1)..end {
            if info[i].mask & pref_mask != 0 {
                if i + 1 == end || info[i + 1].mask & pref_mask == 0 {
                    // Try to find a target position the same way as for
                    // pre-base matra; if not found, reorder immediately
                    // before the main consonant.
                    let mut new_pos = base;
                    while new_pos > start + 1 && !is_matra_halant_or_coeng(&info[new_pos - 1]) {
                        new_pos -= 1;
                    }

                    if new_pos > start && info[new_pos - 1].is_halant_or_coeng() {
                        // If ZWJ or ZWNJ follow this halant, position is
                        // moved after it.
                        if new_pos < end && info[new_pos].is_joiner() {
                            new_pos += 1;
                        }
                    }

                    info[new_pos..=i].rotate_right(1);
                    start_of_last_cluster = cmp::min(new_pos, start_of_last_cluster);
                }

                break;
            }
        }
    }

    // Apply 'init' to the left matra when it starts a word.
    if info[start].position == Position::PrebaseMatra
        && (start == 0 || !is_word_joining(info[start - 1].general_category))
    {
        info[start].mask |= init_mask;
    }

    start_of_last_cluster
}

/// Resolves where the reph ends up, trying each placement rule in turn
/// and falling back to the end of the syllable.
fn resolve_reph_pos(
    reph_pos: RephPosition,
    options: IndicOptions,
    info: &[GlyphInfo],
    start: usize,
    end: usize,
    base: usize,
) -> usize {
    // 1. If reph should be positioned after post-base consonant forms,
    //    only the fallback applies.
    if reph_pos != RephPosition::AfterPostscript {
        // 2. Target position is after the first explicit halant glyph
        //    between the first post-reph consonant and last main
        //    consonant. If ZWJ or ZWNJ are following this halant,
        //    position is moved after it.
        //
        //    In old-implementation fonts, where classifications were
        //    fixed in the shaping engine, there was no case where the
        //    reph position would be found on this step.
        {
            let mut new_reph_pos = start + 1;
            while new_reph_pos < base && !info[new_reph_pos].is_halant_or_coeng() {
                new_reph_pos += 1;
            }
            if new_reph_pos < base {
                if new_reph_pos + 1 < base && info[new_reph_pos + 1].is_joiner() {
                    new_reph_pos += 1;
                }
                return new_reph_pos;
            }
        }

        // 3. If reph should be repositioned after the main consonant:
        //    find the first consonant not ligated with main, or the
        //    first consonant that is not a potential pre-base reordering
        //    Ra.
        if reph_pos == RephPosition::AfterMain {
            let mut new_reph_pos = base;
            while new_reph_pos < end
                && !next_position_in(
                    info,
                    new_reph_pos,
                    &[
                        Position::BelowbaseConsonant,
                        Position::PostbaseConsonant,
                        Position::PostbaseMatra,
                        Position::Smvd,
                    ],
                )
            {
                new_reph_pos += 1;
            }
            if new_reph_pos < end {
                return new_reph_pos;
            }
        }

        // 4. If reph should be positioned before post-base consonant,
        //    find first post-base classified consonant not ligated with
        //    main. If no consonant is found, the target position should
        //    be before the first matra, syllable modifier sign or vedic
        //    sign.
        if reph_pos == RephPosition::AfterSubscript {
            let mut new_reph_pos = base;
            while new_reph_pos < end
                && !next_position_in(
                    info,
                    new_reph_pos,
                    &[
                        Position::PostbaseConsonant,
                        Position::PostbaseMatra,
                        Position::Smvd,
                    ],
                )
            {
                new_reph_pos += 1;
            }
            if new_reph_pos < end {
                return new_reph_pos;
            }
        }
    }

    // 5. If no consonant is found in steps 3 or 4, move reph to a
    //    position immediately before the first post-base matra, syllable
    //    modifier sign or vedic sign that has a reordering class after
    //    the intended reph position.
    //
    //    Not resolvable with the information at hand; fall through.

    // 6. Otherwise, reorder reph to the end of the syllable.
    let mut new_reph_pos = end - 1;
    while new_reph_pos > start && info[new_reph_pos].position == Position::Smvd {
        new_reph_pos -= 1;
    }

    // If the reph is to end up after a matra,halant sequence, position
    // it before that halant so it can interact with the matra. However,
    // if it's a plain consonant,halant we should not do that. Uniscribe
    // doesn't do this.
    // TEST: U+0930,U+094D,U+0915,U+094B,U+094D
    if !options.uniscribe_bug_compatible() && info[new_reph_pos].is_halant_or_coeng() {
        let mut i = base + 1;
        while i < new_reph_pos {
            if info[i].category == Category::VowelDependent {
                new_reph_pos -= 1;
            }
            i += 1;
        }
    }

    new_reph_pos
}

/// Reads the position of the glyph after `i`. The walks in reph steps 3
/// and 4 peek one glyph past the cursor; at the end of the buffer there
/// is no glyph, which never matches, so the walk stops on its range
/// guard instead.
fn next_position_in(info: &[GlyphInfo], i: usize, positions: &[Position]) -> bool {
    match info.get(i + 1) {
        Some(glyph) => positions.contains(&glyph.position),
        None => false,
    }
}

fn is_word_joining(gc: GeneralCategory) -> bool {
    match gc {
        GeneralCategory::LowercaseLetter
        | GeneralCategory::ModifierLetter
        | GeneralCategory::OtherLetter
        | GeneralCategory::TitlecaseLetter
        | GeneralCategory::UppercaseLetter
        | GeneralCategory::SpacingMark
        | GeneralCategory::EnclosingMark
        | GeneralCategory::NonspacingMark => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::plan::{FeatureMap, FeaturePlanner};
    use crate::script::SegmentProperties;
    use crate::shaper;

    fn map_for(script: Script) -> FeatureMap {
        let mut planner = FeaturePlanner::new(script.tag());
        shaper::plan_features(&mut planner, &SegmentProperties { script });
        planner.compile()
    }

    fn map_for_old(script: Script) -> FeatureMap {
        let mut planner = FeaturePlanner::new(script.old_tag());
        shaper::plan_features(&mut planner, &SegmentProperties { script });
        planner.compile()
    }

    fn initial(script: Script, text: &str, options: IndicOptions) -> (FeatureMap, Buffer) {
        let map = map_for(script);
        let mut buffer = Buffer::new(script, text);
        shaper::setup_masks(&mut buffer);
        initial_reordering_with_options(&map, &mut buffer, options);
        (map, buffer)
    }

    fn codepoints(buffer: &Buffer) -> Vec<u32> {
        buffer.info.iter().map(|g| g.codepoint).collect()
    }

    fn positions(buffer: &Buffer) -> Vec<Position> {
        buffer.info.iter().map(|g| g.position).collect()
    }

    mod initial {
        use super::*;

        #[test]
        fn test_reph_cluster() {
            let (map, buffer) = initial(
                Script::Devanagari,
                "\u{0930}\u{094D}\u{0915}",
                IndicOptions::empty(),
            );
            assert_eq!(codepoints(&buffer), vec![0x0930, 0x094D, 0x0915]);
            assert_eq!(
                positions(&buffer),
                vec![
                    Position::RaToBecomeReph,
                    Position::RaToBecomeReph,
                    Position::SyllableBase,
                ]
            );
            let rphf = map.get_1_mask(tag::RPHF);
            assert_ne!(buffer.info[0].mask & rphf, 0);
            assert_ne!(buffer.info[1].mask & rphf, 0);
            assert_eq!(buffer.info[2].mask & rphf, 0);
        }

        #[test]
        fn test_pre_base_matra_leads() {
            let (_, buffer) = initial(
                Script::Devanagari,
                "\u{0915}\u{093F}",
                IndicOptions::empty(),
            );
            assert_eq!(codepoints(&buffer), vec![0x093F, 0x0915]);
            assert_eq!(
                positions(&buffer),
                vec![Position::PrebaseMatra, Position::SyllableBase]
            );
        }

        #[test]
        fn test_conjunct_with_matra() {
            let (map, buffer) = initial(
                Script::Devanagari,
                "\u{0915}\u{094D}\u{0937}\u{093F}",
                IndicOptions::empty(),
            );
            assert_eq!(codepoints(&buffer), vec![0x093F, 0x0915, 0x094D, 0x0937]);
            assert_eq!(
                positions(&buffer),
                vec![
                    Position::PrebaseMatra,
                    Position::PrebaseConsonant,
                    Position::PrebaseConsonant,
                    Position::SyllableBase,
                ]
            );
            // The half-form consonant carries half/akhn/cjct
            let half = map.get_1_mask(tag::HALF);
            assert_ne!(buffer.info[1].mask & half, 0);
            assert_ne!(buffer.info[2].mask & half, 0);
            assert_eq!(buffer.info[3].mask & half, 0);
        }

        #[test]
        fn test_khmer_base_is_first() {
            let (_, buffer) = initial(
                Script::Khmer,
                "\u{1780}\u{17D2}\u{1781}",
                IndicOptions::empty(),
            );
            assert_eq!(codepoints(&buffer), vec![0x1780, 0x17D2, 0x1781]);
            assert_eq!(
                positions(&buffer),
                vec![
                    Position::SyllableBase,
                    Position::BelowbaseConsonant,
                    Position::BelowbaseConsonant,
                ]
            );
        }

        #[test]
        fn test_vedic_sign_sorts_last() {
            let (_, buffer) = initial(
                Script::Devanagari,
                "\u{092E}\u{0947}\u{0952}",
                IndicOptions::empty(),
            );
            assert_eq!(codepoints(&buffer), vec![0x092E, 0x0947, 0x0952]);
            assert_eq!(
                positions(&buffer),
                vec![
                    Position::SyllableBase,
                    Position::AbovebaseMatra,
                    Position::Smvd,
                ]
            );
        }

        #[test]
        fn test_lone_ra_halant_keeps_ra_as_base() {
            // Too short to form a reph: Ra itself is the base
            let (map, buffer) = initial(
                Script::Devanagari,
                "\u{0930}\u{094D}",
                IndicOptions::empty(),
            );
            assert_eq!(positions(&buffer)[0], Position::SyllableBase);
            assert_eq!(buffer.info[0].mask & map.get_1_mask(tag::RPHF), 0);
        }

        #[test]
        fn test_joiner_blocks_reph() {
            let (_, buffer) = initial(
                Script::Devanagari,
                "\u{0930}\u{094D}\u{200D}\u{0915}",
                IndicOptions::empty(),
            );
            assert!(!buffer
                .info
                .iter()
                .any(|g| g.position == Position::RaToBecomeReph));
        }

        #[test]
        fn test_old_spec_halant_moves_after_last_consonant() {
            let script = Script::Devanagari;
            let map = map_for_old(script);
            let mut buffer = Buffer::new(script, "\u{0915}\u{094D}\u{0930}");
            shaper::setup_masks(&mut buffer);
            initial_reordering_with_options(&map, &mut buffer, IndicOptions::empty());
            assert_eq!(codepoints(&buffer), vec![0x0915, 0x0930, 0x094D]);

            // New-spec fonts keep the halant before the below-base Ra
            let (_, buffer) = initial(script, "\u{0915}\u{094D}\u{0930}", IndicOptions::empty());
            assert_eq!(codepoints(&buffer), vec![0x0915, 0x094D, 0x0930]);
        }

        #[test]
        fn test_zwnj_clears_half_and_cjct() {
            let (map, buffer) = initial(
                Script::Devanagari,
                "\u{0915}\u{094D}\u{200C}",
                IndicOptions::empty(),
            );
            let half = map.get_1_mask(tag::HALF);
            let cjct = map.get_1_mask(tag::CJCT);
            let akhn = map.get_1_mask(tag::AKHN);
            for glyph in &buffer.info[..2] {
                assert_eq!(glyph.mask & half, 0);
                assert_eq!(glyph.mask & cjct, 0);
            }
            // Other pre-base masks are untouched
            assert_ne!(buffer.info[0].mask & akhn, 0);
        }

        #[test]
        fn test_khmer_pref_and_cfar_masks() {
            let (map, buffer) = initial(
                Script::Khmer,
                "\u{1784}\u{17D2}\u{179A}\u{17D2}\u{1782}",
                IndicOptions::empty(),
            );
            let pref = map.get_1_mask(tag::PREF);
            let cfar = map.get_1_mask(tag::CFAR);
            let flags: Vec<_> = buffer
                .info
                .iter()
                .map(|g| (g.mask & pref != 0, g.mask & cfar != 0))
                .collect();
            assert_eq!(
                flags,
                vec![
                    (false, false),
                    (true, false),
                    (true, false),
                    (false, true),
                    (false, true),
                ]
            );
        }

        #[test]
        fn test_khmer_coeng_order_without_ra_first_gets_no_pref() {
            let (map, buffer) = initial(
                Script::Khmer,
                "\u{1784}\u{17D2}\u{1782}\u{17D2}\u{179A}",
                IndicOptions::empty(),
            );
            let pref = map.get_1_mask(tag::PREF);
            assert_eq!(buffer.info[1].mask & pref, 0);
            assert_ne!(buffer.info[3].mask & pref, 0);
            assert_ne!(buffer.info[4].mask & pref, 0);
        }

        #[test]
        fn test_sort_cap_skips_overlong_syllables() {
            let script = Script::Devanagari;
            let map = map_for(script);
            let masks = BasicMasks::from_map(&map);

            // 62 consonants and a left matra: under the cap, the matra
            // sorts to the front
            let text: String = std::iter::repeat('\u{0915}')
                .take(62)
                .chain(Some('\u{093F}'))
                .collect();
            let mut buffer = Buffer::new(script, &text);
            shaper::setup_masks(&mut buffer);
            let end = buffer.len();
            initial_reorder_consonant_syllable(
                script,
                script.tag(),
                IndicOptions::empty(),
                &masks,
                &mut buffer.info,
                0,
                end,
            );
            assert_eq!(buffer.info[0].codepoint, 0x093F);

            // At the cap the sort is skipped and order is preserved
            let text: String = std::iter::repeat('\u{0915}')
                .take(63)
                .chain(Some('\u{093F}'))
                .collect();
            let mut buffer = Buffer::new(script, &text);
            shaper::setup_masks(&mut buffer);
            let end = buffer.len();
            initial_reorder_consonant_syllable(
                script,
                script.tag(),
                IndicOptions::empty(),
                &masks,
                &mut buffer.info,
                0,
                end,
            );
            assert_eq!(buffer.info[end - 1].codepoint, 0x093F);
        }

        #[test]
        fn test_uniscribe_halant_does_not_follow_left_matra() {
            // Default: the halant inherits the left matra's position and
            // travels with it
            let (_, buffer) = initial(
                Script::Devanagari,
                "\u{092B}\u{093F}\u{094D}",
                IndicOptions::empty(),
            );
            assert_eq!(codepoints(&buffer), vec![0x093F, 0x094D, 0x092B]);

            // Uniscribe keeps it on the consonant
            let (_, buffer) = initial(
                Script::Devanagari,
                "\u{092B}\u{093F}\u{094D}",
                IndicOptions::UNISCRIBE_BUG_COMPATIBLE,
            );
            assert_eq!(codepoints(&buffer), vec![0x093F, 0x092B, 0x094D]);
        }

        #[test]
        fn test_uniscribe_skips_trailing_dotted_circle_cluster() {
            let (map, buffer) = initial(
                Script::Devanagari,
                "\u{25CC}\u{0941}",
                IndicOptions::UNISCRIBE_BUG_COMPATIBLE,
            );
            let blwf = map.get_1_mask(tag::BLWF);
            assert!(buffer.info.iter().all(|g| g.mask & blwf == 0));

            let (map, buffer) = initial(Script::Devanagari, "\u{25CC}\u{0941}", IndicOptions::empty());
            let blwf = map.get_1_mask(tag::BLWF);
            assert_ne!(buffer.info[1].mask & blwf, 0);
        }
    }

    mod finalize {
        use super::*;

        /// Merges `glyphs[i]` and `glyphs[i + 1]` the way a ligature
        /// substitution would: the surviving glyph keeps the first
        /// glyph's fields.
        fn ligate(buffer: &mut Buffer, i: usize, glyph_index: u32) {
            buffer.info[i].codepoint = glyph_index;
            let removed = buffer.info.remove(i + 1);
            buffer.info[i].cluster = buffer.info[i].cluster.min(removed.cluster);
        }

        #[test]
        fn test_reph_moves_before_postscript_form() {
            let script = Script::Devanagari;
            let (map, mut buffer) = initial(
                script,
                "\u{0930}\u{094D}\u{092E}\u{094D}\u{092F}",
                IndicOptions::empty(),
            );
            assert_eq!(codepoints(&buffer), vec![0x0930, 0x094D, 0x092E, 0x094D, 0x092F]);
            // The font ligates the reph and the post-base ya
            ligate(&mut buffer, 0, 0xF001);
            ligate(&mut buffer, 2, 0xF002);
            final_reordering_with_options(&map, &mut buffer, IndicOptions::empty());
            assert_eq!(codepoints(&buffer), vec![0x092E, 0xF002, 0xF001]);
            // One big cluster
            assert!(buffer.info.iter().all(|g| g.cluster == 0));
        }

        #[test]
        fn test_unligated_reph_stays_put() {
            let script = Script::Devanagari;
            let (map, mut buffer) = initial(
                script,
                "\u{0930}\u{094D}\u{0915}",
                IndicOptions::empty(),
            );
            final_reordering_with_options(&map, &mut buffer, IndicOptions::empty());
            assert_eq!(codepoints(&buffer), vec![0x0930, 0x094D, 0x0915]);
        }

        #[test]
        fn test_reph_backs_up_over_matra_halant_pair() {
            let script = Script::Devanagari;
            let text = "\u{0930}\u{094D}\u{0915}\u{094B}\u{094D}";

            let (map, mut buffer) = initial(script, text, IndicOptions::empty());
            ligate(&mut buffer, 0, 0xF001);
            final_reordering_with_options(&map, &mut buffer, IndicOptions::empty());
            assert_eq!(codepoints(&buffer), vec![0x0915, 0x094B, 0xF001, 0x094D]);

            // Uniscribe leaves the reph after the halant
            let (map, mut buffer) = initial(script, text, IndicOptions::UNISCRIBE_BUG_COMPATIBLE);
            ligate(&mut buffer, 0, 0xF001);
            final_reordering_with_options(&map, &mut buffer, IndicOptions::UNISCRIBE_BUG_COMPATIBLE);
            assert_eq!(codepoints(&buffer), vec![0x0915, 0x094B, 0x094D, 0xF001]);
        }

        #[test]
        fn test_pre_base_reordering_ra() {
            let script = Script::Khmer;
            let (map, mut buffer) = initial(
                script,
                "\u{1784}\u{17D2}\u{179A}",
                IndicOptions::empty(),
            );
            // The font substitutes the coeng,ro pair with one pre-base form
            ligate(&mut buffer, 1, 0xF003);
            final_reordering_with_options(&map, &mut buffer, IndicOptions::empty());
            assert_eq!(codepoints(&buffer), vec![0xF003, 0x1784]);
        }

        #[test]
        fn test_multi_glyph_pref_result_is_not_moved() {
            let script = Script::Khmer;
            let (map, mut buffer) = initial(
                script,
                "\u{1784}\u{17D2}\u{179A}",
                IndicOptions::empty(),
            );
            // No substitution happened: both glyphs still carry pref
            final_reordering_with_options(&map, &mut buffer, IndicOptions::empty());
            assert_eq!(codepoints(&buffer), vec![0x1784, 0x17D2, 0x179A]);
        }

        #[test]
        fn test_init_mask_on_word_initial_left_matra() {
            let script = Script::Devanagari;
            let (map, mut buffer) = initial(script, "\u{0915}\u{093F}", IndicOptions::empty());
            final_reordering_with_options(&map, &mut buffer, IndicOptions::empty());
            let init = map.get_1_mask(tag::INIT);
            assert_ne!(buffer.info[0].mask & init, 0);
        }

        #[test]
        fn test_no_init_mask_after_letter() {
            let script = Script::Devanagari;
            let (map, mut buffer) = initial(
                script,
                "\u{092E}\u{0915}\u{093F}",
                IndicOptions::empty(),
            );
            final_reordering_with_options(&map, &mut buffer, IndicOptions::empty());
            let init = map.get_1_mask(tag::INIT);
            // The left matra leads the second syllable, which follows a letter
            let matra_index = buffer
                .info
                .iter()
                .position(|g| g.codepoint == 0x093F)
                .unwrap();
            assert_eq!(buffer.info[matra_index].mask & init, 0);
        }

        #[test]
        fn test_matra_moves_to_halant_after_half_forms() {
            let script = Script::Devanagari;
            let (map, mut buffer) = initial(
                script,
                "\u{0915}\u{094D}\u{0937}\u{093F}",
                IndicOptions::empty(),
            );
            assert_eq!(codepoints(&buffer), vec![0x093F, 0x0915, 0x094D, 0x0937]);
            final_reordering_with_options(&map, &mut buffer, IndicOptions::empty());
            // The matra lands after the last standalone halant, before
            // the base
            assert_eq!(codepoints(&buffer), vec![0x0915, 0x094D, 0x093F, 0x0937]);
            // The moved matra and everything to the base merge clusters
            assert_eq!(buffer.info[2].cluster, buffer.info[3].cluster);
        }
    }
}
