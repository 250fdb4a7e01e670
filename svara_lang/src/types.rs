// Core phonological types: scripts, pitch accents, and accented vowels.
//
// These types are shared by every layer of the workspace. The prosody crate
// (`svara_prosody`) builds its rules on top of `Accent` and `AccentedVowel`;
// the classifier (`classify.rs`) is the only place that constructs an
// `AccentedVowel` from raw text.
//
// The type hierarchy is:
// - `Script`: the orthography a string is written in (IAST or Devanagari)
// - `Accent`: pitch accent of one vowel (udātta, anudātta, svarita, unmarked)
// - `AccentedVowel`: a classified vowel (bare base text plus its accent)
//
// All types are plain values. Nothing here is ever mutated in place;
// rewrites always produce new strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Orthography of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin transliteration with diacritics (IAST). Pitch marks are the
    /// combining acute, grave and circumflex.
    Iast,
    /// Native Devanagari script. Pitch marks are the Vedic stress signs.
    Devanagari,
}

impl Script {
    /// Parse a script name as typed on a command line.
    pub fn from_name(name: &str) -> Option<Script> {
        match name.to_lowercase().as_str() {
            "iast" | "latin" | "roman" => Some(Script::Iast),
            "devanagari" | "deva" => Some(Script::Devanagari),
            _ => None,
        }
    }
}

/// Pitch accent carried by a single vowel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    /// High tone.
    Udatta,
    /// Low tone.
    Anudatta,
    /// Falling tone: high for the first half-unit, then low.
    Svarita,
    /// No pitch mark present.
    Unmarked,
}

impl Accent {
    /// The three accents that have a written mark.
    pub const MARKED: [Accent; 3] = [Accent::Udatta, Accent::Anudatta, Accent::Svarita];

    /// Whether this accent is written with a pitch mark.
    pub fn is_marked(self) -> bool {
        self != Accent::Unmarked
    }

    /// Stable lowercase identifier, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Accent::Udatta => "udatta",
            Accent::Anudatta => "anudatta",
            Accent::Svarita => "svarita",
            Accent::Unmarked => "unmarked",
        }
    }

    /// Parse an accent name, accepting the transliterated spellings too.
    pub fn from_name(name: &str) -> Option<Accent> {
        match name.to_lowercase().as_str() {
            "udatta" | "udātta" | "high" => Some(Accent::Udatta),
            "anudatta" | "anudātta" | "low" => Some(Accent::Anudatta),
            "svarita" | "circumflex" | "falling" => Some(Accent::Svarita),
            "unmarked" | "none" => Some(Accent::Unmarked),
            _ => None,
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified vowel: its bare base form and the accent it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentedVowel {
    /// The vowel with every pitch mark removed (e.g. "a", "ā", "ai", "इ").
    /// For the Devanagari inherent vowel this is "अ".
    pub base: String,
    /// The accent category.
    pub accent: Accent,
    /// Script the vowel was written in (detected or forced).
    pub script: Script,
    /// Whether a pitch mark was actually present in the input. False when
    /// non-strict classification defaulted an unmarked vowel to svarita.
    pub explicit: bool,
}
