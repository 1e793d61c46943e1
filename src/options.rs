//! Process-wide shaping options.

use bitflags::bitflags;
use lazy_static::lazy_static;
use std::env;

/// Environment variable consulted (once) for shaping options.
pub const OPTIONS_ENV_VAR: &str = "HB_OT_INDIC_OPTIONS";

bitflags! {
    /// Shaping options, read once from [`OPTIONS_ENV_VAR`] on first use.
    pub struct IndicOptions: u32 {
        /// Reproduce Uniscribe's output where it deviates from the
        /// OpenType shaping specification.
        const UNISCRIBE_BUG_COMPATIBLE = 1;
    }
}

impl IndicOptions {
    /// Parses the value of [`OPTIONS_ENV_VAR`]. Matching is by substring
    /// so options can be comma-separated.
    pub fn from_env_value(value: Option<&str>) -> IndicOptions {
        let mut options = IndicOptions::empty();
        if let Some(value) = value {
            if value.contains("uniscribe-bug-compatible") {
                options |= IndicOptions::UNISCRIBE_BUG_COMPATIBLE;
            }
        }
        options
    }

    pub fn uniscribe_bug_compatible(self) -> bool {
        self.contains(IndicOptions::UNISCRIBE_BUG_COMPATIBLE)
    }
}

lazy_static! {
    static ref OPTIONS: IndicOptions =
        IndicOptions::from_env_value(env::var(OPTIONS_ENV_VAR).ok().as_deref());
}

/// The cached process-wide options. The environment is consulted once;
/// concurrent first use is benign because the value is a pure function
/// of the environment.
pub fn indic_options() -> IndicOptions {
    *OPTIONS
}
