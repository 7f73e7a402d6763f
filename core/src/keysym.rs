//! Key symbols and their names.
//!
//! Code points up to 0xFF are keysyms as-is. Anything above lives in the
//! extended Unicode range, `0x1000000 | code point`. Names follow the X11
//! convention: Latin-1 symbols have fixed names, extended symbols are
//! spelled `U` plus upper-case hex, and control codes have no name at all.

use phf::phf_map;
use std::borrow::Cow;
use std::fmt;

/// Bit that moves a code point into the extended keysym space.
pub const UNICODE_KEYSYM_BIT: u32 = 0x0100_0000;

/// Highest code point that is its own keysym.
pub const LATIN1_MAX: u32 = 0xFF;

/// A host key symbol value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keysym(pub u32);

impl Keysym {
    /// Map a code point to its keysym. Returns `None` for 0.
    pub fn from_code_point(cp: u32) -> Option<Self> {
        match cp {
            0 => None,
            cp if cp <= LATIN1_MAX => Some(Keysym(cp)),
            cp => Some(Keysym(cp | UNICODE_KEYSYM_BIT)),
        }
    }

    pub fn is_unicode(self) -> bool {
        self.0 & 0xff00_0000 == UNICODE_KEYSYM_BIT
    }

    /// Symbolic name, if the symbol has one.
    pub fn name(self) -> Option<Cow<'static, str>> {
        if let Some(name) = LATIN1_NAMES.get(&self.0) {
            return Some(Cow::Borrowed(name));
        }
        if !self.is_unicode() {
            return None;
        }
        let cp = self.0 & !UNICODE_KEYSYM_BIT;
        if cp <= LATIN1_MAX || char::from_u32(cp).is_none() {
            return None;
        }
        let width = if cp > 0xFFFF { 6 } else { 4 };
        Some(Cow::Owned(format!("U{cp:0width$X}")))
    }
}

impl fmt::Display for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

static LATIN1_NAMES: phf::Map<u32, &'static str> = phf_map! {
    0x20u32 => "space",
    0x21u32 => "exclam",
    0x22u32 => "quotedbl",
    0x23u32 => "numbersign",
    0x24u32 => "dollar",
    0x25u32 => "percent",
    0x26u32 => "ampersand",
    0x27u32 => "apostrophe",
    0x28u32 => "parenleft",
    0x29u32 => "parenright",
    0x2au32 => "asterisk",
    0x2bu32 => "plus",
    0x2cu32 => "comma",
    0x2du32 => "minus",
    0x2eu32 => "period",
    0x2fu32 => "slash",
    0x30u32 => "0",
    0x31u32 => "1",
    0x32u32 => "2",
    0x33u32 => "3",
    0x34u32 => "4",
    0x35u32 => "5",
    0x36u32 => "6",
    0x37u32 => "7",
    0x38u32 => "8",
    0x39u32 => "9",
    0x3au32 => "colon",
    0x3bu32 => "semicolon",
    0x3cu32 => "less",
    0x3du32 => "equal",
    0x3eu32 => "greater",
    0x3fu32 => "question",
    0x40u32 => "at",
    0x41u32 => "A",
    0x42u32 => "B",
    0x43u32 => "C",
    0x44u32 => "D",
    0x45u32 => "E",
    0x46u32 => "F",
    0x47u32 => "G",
    0x48u32 => "H",
    0x49u32 => "I",
    0x4au32 => "J",
    0x4bu32 => "K",
    0x4cu32 => "L",
    0x4du32 => "M",
    0x4eu32 => "N",
    0x4fu32 => "O",
    0x50u32 => "P",
    0x51u32 => "Q",
    0x52u32 => "R",
    0x53u32 => "S",
    0x54u32 => "T",
    0x55u32 => "U",
    0x56u32 => "V",
    0x57u32 => "W",
    0x58u32 => "X",
    0x59u32 => "Y",
    0x5au32 => "Z",
    0x5bu32 => "bracketleft",
    0x5cu32 => "backslash",
    0x5du32 => "bracketright",
    0x5eu32 => "asciicircum",
    0x5fu32 => "underscore",
    0x60u32 => "grave",
    0x61u32 => "a",
    0x62u32 => "b",
    0x63u32 => "c",
    0x64u32 => "d",
    0x65u32 => "e",
    0x66u32 => "f",
    0x67u32 => "g",
    0x68u32 => "h",
    0x69u32 => "i",
    0x6au32 => "j",
    0x6bu32 => "k",
    0x6cu32 => "l",
    0x6du32 => "m",
    0x6eu32 => "n",
    0x6fu32 => "o",
    0x70u32 => "p",
    0x71u32 => "q",
    0x72u32 => "r",
    0x73u32 => "s",
    0x74u32 => "t",
    0x75u32 => "u",
    0x76u32 => "v",
    0x77u32 => "w",
    0x78u32 => "x",
    0x79u32 => "y",
    0x7au32 => "z",
    0x7bu32 => "braceleft",
    0x7cu32 => "bar",
    0x7du32 => "braceright",
    0x7eu32 => "asciitilde",
    0xa0u32 => "nobreakspace",
    0xa1u32 => "exclamdown",
    0xa2u32 => "cent",
    0xa3u32 => "sterling",
    0xa4u32 => "currency",
    0xa5u32 => "yen",
    0xa6u32 => "brokenbar",
    0xa7u32 => "section",
    0xa8u32 => "diaeresis",
    0xa9u32 => "copyright",
    0xaau32 => "ordfeminine",
    0xabu32 => "guillemotleft",
    0xacu32 => "notsign",
    0xadu32 => "hyphen",
    0xaeu32 => "registered",
    0xafu32 => "macron",
    0xb0u32 => "degree",
    0xb1u32 => "plusminus",
    0xb2u32 => "twosuperior",
    0xb3u32 => "threesuperior",
    0xb4u32 => "acute",
    0xb5u32 => "mu",
    0xb6u32 => "paragraph",
    0xb7u32 => "periodcentered",
    0xb8u32 => "cedilla",
    0xb9u32 => "onesuperior",
    0xbau32 => "masculine",
    0xbbu32 => "guillemotright",
    0xbcu32 => "onequarter",
    0xbdu32 => "onehalf",
    0xbeu32 => "threequarters",
    0xbfu32 => "questiondown",
    0xc0u32 => "Agrave",
    0xc1u32 => "Aacute",
    0xc2u32 => "Acircumflex",
    0xc3u32 => "Atilde",
    0xc4u32 => "Adiaeresis",
    0xc5u32 => "Aring",
    0xc6u32 => "AE",
    0xc7u32 => "Ccedilla",
    0xc8u32 => "Egrave",
    0xc9u32 => "Eacute",
    0xcau32 => "Ecircumflex",
    0xcbu32 => "Ediaeresis",
    0xccu32 => "Igrave",
    0xcdu32 => "Iacute",
    0xceu32 => "Icircumflex",
    0xcfu32 => "Idiaeresis",
    0xd0u32 => "ETH",
    0xd1u32 => "Ntilde",
    0xd2u32 => "Ograve",
    0xd3u32 => "Oacute",
    0xd4u32 => "Ocircumflex",
    0xd5u32 => "Otilde",
    0xd6u32 => "Odiaeresis",
    0xd7u32 => "multiply",
    0xd8u32 => "Oslash",
    0xd9u32 => "Ugrave",
    0xdau32 => "Uacute",
    0xdbu32 => "Ucircumflex",
    0xdcu32 => "Udiaeresis",
    0xddu32 => "Yacute",
    0xdeu32 => "THORN",
    0xdfu32 => "ssharp",
    0xe0u32 => "agrave",
    0xe1u32 => "aacute",
    0xe2u32 => "acircumflex",
    0xe3u32 => "atilde",
    0xe4u32 => "adiaeresis",
    0xe5u32 => "aring",
    0xe6u32 => "ae",
    0xe7u32 => "ccedilla",
    0xe8u32 => "egrave",
    0xe9u32 => "eacute",
    0xeau32 => "ecircumflex",
    0xebu32 => "ediaeresis",
    0xecu32 => "igrave",
    0xedu32 => "iacute",
    0xeeu32 => "icircumflex",
    0xefu32 => "idiaeresis",
    0xf0u32 => "eth",
    0xf1u32 => "ntilde",
    0xf2u32 => "ograve",
    0xf3u32 => "oacute",
    0xf4u32 => "ocircumflex",
    0xf5u32 => "otilde",
    0xf6u32 => "odiaeresis",
    0xf7u32 => "division",
    0xf8u32 => "oslash",
    0xf9u32 => "ugrave",
    0xfau32 => "uacute",
    0xfbu32 => "ucircumflex",
    0xfcu32 => "udiaeresis",
    0xfdu32 => "yacute",
    0xfeu32 => "thorn",
    0xffu32 => "ydiaeresis",
};
