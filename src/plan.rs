//! Feature planning.
//!
//! The shaper declares an ordered list of GSUB features, partitioned into
//! stages by pauses. The surrounding engine applies each stage's lookups
//! and then runs the stage's pause callback, which is how the reordering
//! passes interleave with substitution.
//!
//! Compiling the plan assigns every enabled feature a mask: bit 0 is
//! shared by all global features (they apply to every glyph), and each
//! non-global feature gets one fresh bit which the reordering passes OR
//! into the glyphs that should receive it.

use log::warn;
use rustc_hash::FxHashMap;

use crate::buffer::{Buffer, Mask};
use crate::tag::DisplayTag;

/// Callback run by the feature executor between lookup stages.
pub type PauseFn = fn(&FeatureMap, &mut Buffer);

/// Bit shared by every global feature.
const GLOBAL_BIT: Mask = 1;

struct PlannedFeature {
    tag: u32,
    value: u32,
    global: bool,
    stage: usize,
}

/// Builder for a [`FeatureMap`].
pub struct FeaturePlanner {
    chosen_script: u32,
    features: Vec<PlannedFeature>,
    pauses: Vec<Option<PauseFn>>,
}

impl FeaturePlanner {
    /// `chosen_script` is the script tag the surrounding shaper selected
    /// in the font, possibly an old-specification variant.
    pub fn new(chosen_script: u32) -> FeaturePlanner {
        FeaturePlanner {
            chosen_script,
            features: Vec::new(),
            pauses: Vec::new(),
        }
    }

    pub fn add_bool_feature(&mut self, tag: u32, global: bool) {
        self.add_feature(tag, 1, global);
    }

    /// Registering a feature with value 0 turns it off, overriding any
    /// earlier registration of the same tag.
    pub fn add_feature(&mut self, tag: u32, value: u32, global: bool) {
        self.features.push(PlannedFeature {
            tag,
            value,
            global,
            stage: self.pauses.len(),
        });
    }

    pub fn add_gsub_pause(&mut self, pause: Option<PauseFn>) {
        self.pauses.push(pause);
    }

    pub fn compile(self) -> FeatureMap {
        let mut masks = FxHashMap::default();
        let mut next_bit = 1;

        // A later registration of a tag overrides earlier ones entirely
        let overridden =
            |i: usize, tag: u32| self.features[i + 1..].iter().any(|f| f.tag == tag);

        for (i, feature) in self.features.iter().enumerate() {
            if overridden(i, feature.tag) {
                continue;
            }
            let mask = if feature.value == 0 {
                0
            } else if feature.global {
                GLOBAL_BIT
            } else if next_bit < 8 * std::mem::size_of::<Mask>() {
                let mask = 1 << next_bit;
                next_bit += 1;
                mask
            } else {
                warn!("no mask bits left for feature '{}'", DisplayTag(feature.tag));
                0
            };
            masks.insert(feature.tag, mask);
        }

        let mut stages: Vec<MapStage> = (0..=self.pauses.len())
            .map(|i| MapStage {
                features: Vec::new(),
                pause: self.pauses.get(i).copied().flatten(),
            })
            .collect();
        for (i, feature) in self.features.iter().enumerate() {
            if overridden(i, feature.tag) || feature.value == 0 {
                continue;
            }
            stages[feature.stage]
                .features
                .push((feature.tag, masks[&feature.tag]));
        }

        FeatureMap {
            chosen_script: self.chosen_script,
            masks,
            stages,
        }
    }
}

/// One lookup stage of the compiled plan.
pub struct MapStage {
    /// `(tag, mask)` of each enabled feature in this stage, in plan order.
    pub features: Vec<(u32, Mask)>,
    /// Callback to run after the stage's lookups have applied.
    pub pause: Option<PauseFn>,
}

/// Compiled feature plan.
pub struct FeatureMap {
    chosen_script: u32,
    masks: FxHashMap<u32, Mask>,
    stages: Vec<MapStage>,
}

impl FeatureMap {
    pub fn chosen_script(&self) -> u32 {
        self.chosen_script
    }

    /// The mask assigned to `tag`, or 0 if the feature is absent or
    /// turned off.
    pub fn get_1_mask(&self, tag: u32) -> Mask {
        self.masks.get(&tag).copied().unwrap_or(0)
    }

    pub fn global_mask(&self) -> Mask {
        GLOBAL_BIT
    }

    pub fn stages(&self) -> &[MapStage] {
        &self.stages
    }
}
