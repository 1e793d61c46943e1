//! Utilities and constants for OpenType tags.
//!
//! See also the [`tag!`](../macro.tag.html) macro for creating tags from a byte string.

use std::{fmt, str};

/// Generate a 4-byte OpenType tag from byte string
///
/// Example:
///
/// ```
/// use conjunct::tag;
/// assert_eq!(tag!(b"deva"), 0x64657661);
/// ```
#[macro_export]
macro_rules! tag {
    ($w:expr) => {
        $crate::tag::tag_from_bytes(*$w)
    };
}

/// Wrapper type for a tag that implements `Display`
///
/// Example:
///
/// ```
/// use conjunct::tag::{self, DisplayTag};
///
/// // ASCII tag comes out as a string
/// assert_eq!(&DisplayTag(tag::RPHF).to_string(), "rphf");
/// // Non-ASCII tag comes out as hex
/// assert_eq!(&DisplayTag(0x12345678).to_string(), "0x12345678");
/// ```
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct DisplayTag(pub u32);

#[doc(hidden)]
pub const fn tag_from_bytes(chars: [u8; 4]) -> u32 {
    ((chars[3] as u32) << 0)
        | ((chars[2] as u32) << 8)
        | ((chars[1] as u32) << 16)
        | ((chars[0] as u32) << 24)
}

impl fmt::Display for DisplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.0;
        let bytes = tag.to_be_bytes();
        if bytes.iter().all(|c| c.is_ascii() && !c.is_ascii_control()) {
            let s = str::from_utf8(&bytes).unwrap(); // unwrap safe due to above check
            s.fmt(f)
        } else {
            write!(f, "0x{:08x}", tag)
        }
    }
}

impl fmt::Debug for DisplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_string().fmt(f)
    }
}

/// `abvf`
pub const ABVF: u32 = tag!(b"abvf");
/// `abvm`
pub const ABVM: u32 = tag!(b"abvm");
/// `abvs`
pub const ABVS: u32 = tag!(b"abvs");
/// `akhn`
pub const AKHN: u32 = tag!(b"akhn");
/// `blwf`
pub const BLWF: u32 = tag!(b"blwf");
/// `blwm`
pub const BLWM: u32 = tag!(b"blwm");
/// `blws`
pub const BLWS: u32 = tag!(b"blws");
/// `ccmp`
pub const CCMP: u32 = tag!(b"ccmp");
/// `cfar`
pub const CFAR: u32 = tag!(b"cfar");
/// `cjct`
pub const CJCT: u32 = tag!(b"cjct");
/// `dist`
pub const DIST: u32 = tag!(b"dist");
/// `haln`
pub const HALN: u32 = tag!(b"haln");
/// `half`
pub const HALF: u32 = tag!(b"half");
/// `init`
pub const INIT: u32 = tag!(b"init");
/// `kern`
pub const KERN: u32 = tag!(b"kern");
/// `locl`
pub const LOCL: u32 = tag!(b"locl");
/// `nukt`
pub const NUKT: u32 = tag!(b"nukt");
/// `pref`
pub const PREF: u32 = tag!(b"pref");
/// `pres`
pub const PRES: u32 = tag!(b"pres");
/// `pstf`
pub const PSTF: u32 = tag!(b"pstf");
/// `psts`
pub const PSTS: u32 = tag!(b"psts");
/// `rkrf`
pub const RKRF: u32 = tag!(b"rkrf");
/// `rphf`
pub const RPHF: u32 = tag!(b"rphf");
/// `vatu`
pub const VATU: u32 = tag!(b"vatu");

/// `Beng`
pub const BENG: u32 = tag!(b"Beng");
/// `Deva`
pub const DEVA: u32 = tag!(b"Deva");
/// `Gujr`
pub const GUJR: u32 = tag!(b"Gujr");
/// `Guru`
pub const GURU: u32 = tag!(b"Guru");
/// `Khmr`
pub const KHMR: u32 = tag!(b"Khmr");
/// `Knda`
pub const KNDA: u32 = tag!(b"Knda");
/// `Mlym`
pub const MLYM: u32 = tag!(b"Mlym");
/// `Orya`
pub const ORYA: u32 = tag!(b"Orya");
/// `Taml`
pub const TAML: u32 = tag!(b"Taml");
/// `Telu`
pub const TELU: u32 = tag!(b"Telu");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_from_bytes() {
        assert_eq!(tag!(b"rphf"), 0x72706866);
        assert_eq!(tag!(b"Deva"), 0x44657661);
    }

    #[test]
    fn test_display_tag() {
        assert_eq!(DisplayTag(KHMR).to_string(), "Khmr");
        assert_eq!(DisplayTag(0x00000001).to_string(), "0x00000001");
    }
}
