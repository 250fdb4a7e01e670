// Script tables: pitch marks, vowel inventories, and script detection.
//
// Everything in this module is a static, read-only table or a pure lookup
// over one. The classifier (`classify.rs`), tokenizer (`tokenize.rs`) and
// duration table (`duration.rs`) all read from here, so adding a new mark
// or vowel spelling is a one-line change in this file.
//
// IAST marks are the Unicode combining acute (udātta), grave (anudātta)
// and circumflex (svarita), U+0300–U+0302. Devanagari uses the stress signs
// U+0951/U+0952 and the Vedic tone svarita U+1CDA; the Devanagari acute and
// grave accents (U+0954/U+0953) are read as alternate spellings but never
// written.

use crate::types::{Accent, Script};
use unicode_normalization::UnicodeNormalization;

/// A pitch mark and the accent it denotes.
#[derive(Debug, Clone, Copy)]
pub struct PitchMark {
    pub mark: char,
    pub accent: Accent,
    pub script: Script,
    /// Whether `apply_accent` writes this mark (false for read-only variants).
    pub canonical: bool,
}

pub const PITCH_MARKS: &[PitchMark] = &[
    PitchMark {
        mark: '\u{0301}',
        accent: Accent::Udatta,
        script: Script::Iast,
        canonical: true,
    },
    PitchMark {
        mark: '\u{0300}',
        accent: Accent::Anudatta,
        script: Script::Iast,
        canonical: true,
    },
    PitchMark {
        mark: '\u{0302}',
        accent: Accent::Svarita,
        script: Script::Iast,
        canonical: true,
    },
    PitchMark {
        mark: '\u{0951}',
        accent: Accent::Udatta,
        script: Script::Devanagari,
        canonical: true,
    },
    PitchMark {
        mark: '\u{0952}',
        accent: Accent::Anudatta,
        script: Script::Devanagari,
        canonical: true,
    },
    PitchMark {
        mark: '\u{1CDA}',
        accent: Accent::Svarita,
        script: Script::Devanagari,
        canonical: true,
    },
    PitchMark {
        mark: '\u{0954}',
        accent: Accent::Udatta,
        script: Script::Devanagari,
        canonical: false,
    },
    PitchMark {
        mark: '\u{0953}',
        accent: Accent::Anudatta,
        script: Script::Devanagari,
        canonical: false,
    },
];

/// Precomposed Latin vowels that carry a pitch mark in a single codepoint.
/// `(precomposed, base, accent)`.
pub const PRECOMPOSED: &[(char, char, Accent)] = &[
    ('á', 'a', Accent::Udatta),
    ('à', 'a', Accent::Anudatta),
    ('â', 'a', Accent::Svarita),
    ('é', 'e', Accent::Udatta),
    ('è', 'e', Accent::Anudatta),
    ('ê', 'e', Accent::Svarita),
    ('í', 'i', Accent::Udatta),
    ('ì', 'i', Accent::Anudatta),
    ('î', 'i', Accent::Svarita),
    ('ó', 'o', Accent::Udatta),
    ('ò', 'o', Accent::Anudatta),
    ('ô', 'o', Accent::Svarita),
    ('ú', 'u', Accent::Udatta),
    ('ù', 'u', Accent::Anudatta),
    ('û', 'u', Accent::Svarita),
    ('Á', 'A', Accent::Udatta),
    ('À', 'A', Accent::Anudatta),
    ('Â', 'A', Accent::Svarita),
    ('É', 'E', Accent::Udatta),
    ('È', 'E', Accent::Anudatta),
    ('Ê', 'E', Accent::Svarita),
    ('Í', 'I', Accent::Udatta),
    ('Ì', 'I', Accent::Anudatta),
    ('Î', 'I', Accent::Svarita),
    ('Ó', 'O', Accent::Udatta),
    ('Ò', 'O', Accent::Anudatta),
    ('Ô', 'O', Accent::Svarita),
    ('Ú', 'U', Accent::Udatta),
    ('Ù', 'U', Accent::Anudatta),
    ('Û', 'U', Accent::Svarita),
];

/// IAST vowels in NFC, lowercase. Short vowels first, then long and
/// diphthong-class.
pub const IAST_VOWELS: &[&str] = &[
    "a", "i", "u", "ṛ", "ḷ", "ā", "ī", "ū", "ṝ", "ḹ", "e", "ai", "o", "au",
];

/// Devanagari independent vowel letters.
pub const DEVANAGARI_VOWELS: &[&str] = &[
    "अ", "इ", "उ", "ऋ", "ऌ", "आ", "ई", "ऊ", "ॠ", "ॡ", "ए", "ऐ", "ओ", "औ",
];

/// Devanagari dependent vowel signs, index-aligned with the independent
/// letters they stand for (the inherent `a` has no sign).
pub const DEVANAGARI_VOWEL_SIGNS: &[(&str, &str)] = &[
    ("ि", "इ"),
    ("ु", "उ"),
    ("ृ", "ऋ"),
    ("ॢ", "ऌ"),
    ("ा", "आ"),
    ("ी", "ई"),
    ("ू", "ऊ"),
    ("ॄ", "ॠ"),
    ("ॣ", "ॡ"),
    ("े", "ए"),
    ("ै", "ऐ"),
    ("ो", "ओ"),
    ("ौ", "औ"),
];

pub const DEVANAGARI_INHERENT_VOWEL: &str = "अ";
pub const VIRAMA: char = '\u{094D}';
pub const NUKTA: char = '\u{093C}';

/// The accent denoted by `c` if it is a recognized pitch mark.
pub fn pitch_mark_accent(c: char) -> Option<Accent> {
    PITCH_MARKS.iter().find(|m| m.mark == c).map(|m| m.accent)
}

/// Whether `c` is any recognized pitch mark, in either script.
pub fn is_pitch_mark(c: char) -> bool {
    pitch_mark_accent(c).is_some()
}

/// The mark written for `accent` in `script`, or `None` for `Unmarked`.
pub fn accent_mark(accent: Accent, script: Script) -> Option<char> {
    PITCH_MARKS
        .iter()
        .find(|m| m.canonical && m.accent == accent && m.script == script)
        .map(|m| m.mark)
}

/// Look up a precomposed accented Latin vowel.
pub fn precomposed(c: char) -> Option<(char, Accent)> {
    PRECOMPOSED
        .iter()
        .find(|(p, _, _)| *p == c)
        .map(|&(_, base, accent)| (base, accent))
}

/// Detect the script of `text`. Any Devanagari or Vedic Extensions
/// codepoint makes the whole text Devanagari.
pub fn detect_script(text: &str) -> Script {
    if text.chars().any(is_devanagari_char) {
        Script::Devanagari
    } else {
        Script::Iast
    }
}

pub fn is_devanagari_char(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{097F}' | '\u{1CD0}'..='\u{1CFF}' | '\u{A8E0}'..='\u{A8FF}')
}

/// Latin combining diacritics (macron, dot below, pitch marks, ...).
pub fn is_latin_combining(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

pub fn is_devanagari_consonant(c: char) -> bool {
    matches!(c, '\u{0915}'..='\u{0939}' | '\u{0958}'..='\u{095F}' | '\u{0978}'..='\u{097F}')
}

pub fn is_devanagari_vowel_sign(c: char) -> bool {
    DEVANAGARI_VOWEL_SIGNS
        .iter()
        .any(|(sign, _)| sign.chars().next() == Some(c))
}

/// Map a dependent vowel sign to its independent letter. Independent
/// letters map to themselves.
pub fn independent_form(vowel: &str) -> &str {
    DEVANAGARI_VOWEL_SIGNS
        .iter()
        .find(|(sign, _)| *sign == vowel)
        .map(|(_, letter)| *letter)
        .unwrap_or(vowel)
}

/// Whether `s` (without pitch marks) is a single vowel in either script.
/// IAST comparison is case-insensitive and normalization-insensitive.
pub fn is_vowel(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if s.chars().any(is_devanagari_char) {
        return DEVANAGARI_VOWELS.contains(&s)
            || DEVANAGARI_VOWEL_SIGNS.iter().any(|(sign, _)| *sign == s);
    }
    let folded: String = s.nfc().collect::<String>().to_lowercase();
    IAST_VOWELS.contains(&folded.as_str())
}
