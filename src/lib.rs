#![warn(rust_2018_idioms)]

//! # Indic syllable reordering for OpenType shaping
//!
//! Conjunct is the syllable reordering core of a complex-script shaping
//! stage, covering the Indic scripts (Bengali, Devanagari, Gujarati,
//! Gurmukhi, Kannada, Malayalam, Oriya, Tamil, Telugu) and Khmer. Given
//! a buffer of logically-ordered code points it:
//!
//! * assigns every glyph a shaping category and positional class
//!   ([`categorize`]),
//! * partitions the run into syllables ([`segment`]),
//! * reorders each syllable into canonical order and tags glyphs with
//!   per-feature masks for the basic GSUB features, and, once those
//!   features have applied, repositions pre-base matras, the reph, and
//!   pre-base reordering consonants ([`reorder`]).
//!
//! Glyph substitution itself, normalization (split matras must arrive
//! decomposed), and font loading belong to the surrounding shaper. The
//! crate talks to it through the operations in [`shaper`]: the feature
//! plan declares two pauses, and the surrounding feature executor calls
//! back into the reordering passes at those points.
//!
//! Malformed input is never rejected: sequences that form no syllable
//! pass through untouched, and the only failure mode is visually
//! incorrect shaping of text that was typed incorrectly.
//!
//! Setting the `HB_OT_INDIC_OPTIONS` environment variable to
//! `uniscribe-bug-compatible` reproduces Uniscribe's behavior in the
//! handful of places where it deviates from the OpenType script
//! development specifications.

pub mod buffer;
pub mod categorize;
pub mod options;
pub mod plan;
pub mod reorder;
pub mod script;
pub mod segment;
pub mod shaper;
pub mod tag;

pub const DOTTED_CIRCLE: char = '◌';
pub const NBSP: char = '\u{00A0}';
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
