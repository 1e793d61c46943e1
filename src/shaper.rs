//! The operations this crate exposes to the surrounding shaper.
//!
//! A shape call proceeds: [`plan_features`] (and optionally
//! [`override_features`]) build the feature plan; [`setup_masks`]
//! categorizes the buffer; the feature executor then walks the plan's
//! stages, applying each stage's lookups and running its pause callback.
//! The two pauses are [`initial_reordering`] and [`final_reordering`]
//! from the [`reorder`](crate::reorder) module.

use crate::buffer::Buffer;
use crate::categorize::categorize;
use crate::options::indic_options;
use crate::plan::FeaturePlanner;
use crate::reorder::{final_reordering, initial_reordering};
use crate::script::SegmentProperties;
use crate::tag;

/// Normalization the surrounding shaper must perform before shaping.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NormalizationMode {
    Composed,
    Decomposed,
}

/// The twelve basic substitution features, applied one at a time in this
/// order, each in its own lookup stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BasicFeature {
    Nukt,
    Akhn,
    Rphf,
    Rkrf,
    Pref,
    Blwf,
    Half,
    Abvf,
    Pstf,
    Cfar,
    Cjct,
    Vatu,
}

impl BasicFeature {
    pub const ALL: &'static [BasicFeature] = &[
        BasicFeature::Nukt,
        BasicFeature::Akhn,
        BasicFeature::Rphf,
        BasicFeature::Rkrf,
        BasicFeature::Pref,
        BasicFeature::Blwf,
        BasicFeature::Half,
        BasicFeature::Abvf,
        BasicFeature::Pstf,
        BasicFeature::Cfar,
        BasicFeature::Cjct,
        BasicFeature::Vatu,
    ];

    pub fn tag(self) -> u32 {
        match self {
            BasicFeature::Nukt => tag::NUKT,
            BasicFeature::Akhn => tag::AKHN,
            BasicFeature::Rphf => tag::RPHF,
            BasicFeature::Rkrf => tag::RKRF,
            BasicFeature::Pref => tag::PREF,
            BasicFeature::Blwf => tag::BLWF,
            BasicFeature::Half => tag::HALF,
            BasicFeature::Abvf => tag::ABVF,
            BasicFeature::Pstf => tag::PSTF,
            BasicFeature::Cfar => tag::CFAR,
            BasicFeature::Cjct => tag::CJCT,
            BasicFeature::Vatu => tag::VATU,
        }
    }

    /// Returns `true` if the feature applies to the entire buffer rather
    /// than being masked per glyph.
    pub fn is_global(self) -> bool {
        match self {
            BasicFeature::Nukt => true,
            BasicFeature::Akhn => false,
            BasicFeature::Rphf => false,
            BasicFeature::Rkrf => true,
            BasicFeature::Pref => false,
            BasicFeature::Blwf => false,
            BasicFeature::Half => false,
            BasicFeature::Abvf => false,
            BasicFeature::Pstf => false,
            BasicFeature::Cfar => false,
            BasicFeature::Cjct => false,
            BasicFeature::Vatu => true,
        }
    }
}

/// Features applied en bloc after final reordering. `init` is the one
/// feature of these the final reorderer masks per glyph.
pub const OTHER_FEATURES: &[(u32, bool)] = &[
    (tag::INIT, false),
    (tag::PRES, true),
    (tag::ABVS, true),
    (tag::BLWS, true),
    (tag::PSTS, true),
    (tag::HALN, true),
    (tag::DIST, true),
    (tag::ABVM, true),
    (tag::BLWM, true),
];

/// Adds the full Indic feature plan to `planner`.
pub fn plan_features(planner: &mut FeaturePlanner, _props: &SegmentProperties) {
    planner.add_bool_feature(tag::LOCL, true);
    // The Indic specs do not require ccmp, but we apply it here since if
    // there is a use of it, it's typically at the beginning.
    planner.add_bool_feature(tag::CCMP, true);

    planner.add_gsub_pause(Some(initial_reordering));

    for &feature in BasicFeature::ALL {
        planner.add_bool_feature(feature.tag(), feature.is_global());
        planner.add_gsub_pause(None);
    }

    planner.add_gsub_pause(Some(final_reordering));

    for &(feature_tag, global) in OTHER_FEATURES {
        planner.add_bool_feature(feature_tag, global);
    }
}

/// Feature overrides applied after [`plan_features`].
pub fn override_features(planner: &mut FeaturePlanner, _props: &SegmentProperties) {
    // Uniscribe does not apply 'kern'.
    if indic_options().uniscribe_bug_compatible() {
        planner.add_feature(tag::KERN, 0, true);
    }
}

/// Split matras must arrive decomposed.
pub fn normalization_preference() -> NormalizationMode {
    NormalizationMode::Decomposed
}

/// Records each glyph's shaping category and position.
///
/// Masks cannot be set up this early: the per-glyph feature masks depend
/// on syllable structure, so they are assigned by the
/// [`initial_reordering`] pause instead.
pub fn setup_masks(buffer: &mut Buffer) {
    categorize(buffer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::FeaturePlanner;
    use crate::script::Script;

    fn planned() -> crate::plan::FeatureMap {
        let mut planner = FeaturePlanner::new(Script::Devanagari.tag());
        let props = SegmentProperties {
            script: Script::Devanagari,
        };
        plan_features(&mut planner, &props);
        planner.compile()
    }

    #[test]
    fn test_basic_feature_order() {
        let tags: Vec<_> = BasicFeature::ALL.iter().map(|f| f.tag()).collect();
        assert_eq!(
            tags,
            vec![
                tag::NUKT,
                tag::AKHN,
                tag::RPHF,
                tag::RKRF,
                tag::PREF,
                tag::BLWF,
                tag::HALF,
                tag::ABVF,
                tag::PSTF,
                tag::CFAR,
                tag::CJCT,
                tag::VATU,
            ]
        );
    }

    #[test]
    fn test_plan_shape() {
        let map = planned();
        // locl+ccmp, one stage per basic feature, the final-reordering
        // pause, then the other features
        assert_eq!(map.stages().len(), 3 + BasicFeature::ALL.len());
        assert!(map.stages()[0].pause.is_some());
        let final_pause = 1 + BasicFeature::ALL.len();
        assert!(map.stages()[final_pause].pause.is_some());
        assert!(map.stages()[final_pause].features.is_empty());
        assert_eq!(
            map.stages()[final_pause + 1].features.len(),
            OTHER_FEATURES.len()
        );
    }

    #[test]
    fn test_masked_features_have_bits() {
        let map = planned();
        for &feature in BasicFeature::ALL {
            let mask = map.get_1_mask(feature.tag());
            if feature.is_global() {
                assert_eq!(mask, map.global_mask());
            } else {
                assert_ne!(mask, 0);
                assert_eq!(mask & map.global_mask(), 0);
            }
        }
        assert_ne!(map.get_1_mask(tag::INIT), 0);
        assert_ne!(map.get_1_mask(tag::INIT) & !map.global_mask(), 0);
    }
}
