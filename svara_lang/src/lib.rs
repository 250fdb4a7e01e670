// Sanskrit phonology for Vedic accent work.
//
// Provides the leaf layer of the prosody engine: everything needed to read
// and write pitch accents on individual vowels, independent of any rule.
// `svara_prosody` builds the rule pipeline on top of this crate.
//
// Architecture:
// - `types.rs`: Core types: `Script`, `Accent`, `AccentedVowel`
// - `script.rs`: Static tables: pitch marks, vowel inventories, script detection
// - `classify.rs`: Accent classifier plus `apply_accent` / `strip_accents`
// - `tokenize.rs`: Phoneme tokenizer used for multi-vowel scans and rewrites
// - `duration.rs`: Vowel duration (mātrā) table
// - `error.rs`: `AccentError`
// - `lib.rs` (this file): `Lexicon`, an injected word list loaded from JSON
//
// The lexicon is loaded from `data/subrahmanya_lexicon.json` via
// `Lexicon::from_json()`. The `default_lexicon()` convenience function uses
// `include_str!` to embed the default list at compile time; callers that need
// a different list construct their own and hand it to the engine.
//
// Purity constraint: nothing in this crate holds mutable state. All tables
// are `const` and every function is a pure function of its arguments, so the
// crate is safe to call from any number of threads.

pub mod classify;
pub mod duration;
pub mod error;
pub mod script;
pub mod tokenize;
pub mod types;

pub use classify::{ClassifyOptions, apply_accent, classify, count_marks, strip_accents};
pub use duration::{DurationTable, duration_units};
pub use error::AccentError;
pub use script::{detect_script, is_vowel};
pub use tokenize::{Phoneme, PhonemeKind, render, syllable_count, tokenize, vowel_positions};
pub use types::{Accent, AccentedVowel, Script};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use unicode_normalization::UnicodeNormalization;

/// One word of a lexicon file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexEntry {
    /// The word as written. Matching ignores case and pitch marks.
    pub token: String,
    /// English gloss, for reasoning output.
    #[serde(default)]
    pub gloss: String,
}

/// The top-level JSON structure for a lexicon file.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    words: Vec<LexEntry>,
}

/// A read-only word list with normalized membership lookup.
///
/// Preserves entry order from the JSON file for `all()`; membership is
/// answered from a normalized key map.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexEntry>,
    /// Normalized token to the index of its first entry.
    keys: BTreeMap<String, usize>,
}

impl Lexicon {
    /// Parse a lexicon from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: LexiconFile = serde_json::from_str(json)?;
        Ok(Lexicon::from_entries(file.words))
    }

    pub fn from_entries(entries: Vec<LexEntry>) -> Self {
        let mut keys = BTreeMap::new();
        for (i, entry) in entries.iter().enumerate() {
            keys.entry(normalize_token(&entry.token)).or_insert(i);
        }
        Lexicon { entries, keys }
    }

    /// Build a lexicon from bare tokens with empty glosses.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Lexicon::from_entries(
            tokens
                .into_iter()
                .map(|t| LexEntry {
                    token: t.into(),
                    gloss: String::new(),
                })
                .collect(),
        )
    }

    /// All entries, in file order.
    pub fn all(&self) -> &[LexEntry] {
        &self.entries
    }

    /// Whether `token` is in the lexicon after normalization.
    pub fn contains(&self, token: &str) -> bool {
        self.keys.contains_key(&normalize_token(token))
    }

    /// The entry matching `token`, if any.
    pub fn lookup(&self, token: &str) -> Option<&LexEntry> {
        self.keys
            .get(&normalize_token(token))
            .map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lookup key for a token: trimmed, NFC, lowercase, pitch marks removed.
pub fn normalize_token(token: &str) -> String {
    strip_accents(token.trim())
        .nfc()
        .collect::<String>()
        .to_lowercase()
}

/// Load the default Subrahmaṇyā lexicon embedded at compile time.
///
/// Uses `include_str!` to embed `data/subrahmanya_lexicon.json`. Panics if
/// the embedded JSON is malformed (should never happen in a released build).
pub fn default_lexicon() -> Lexicon {
    let json = include_str!("../../data/subrahmanya_lexicon.json");
    Lexicon::from_json(json).expect("embedded subrahmanya_lexicon.json is malformed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_from_json() {
        let json = r#"{"words": [
            {"token": "deva", "gloss": "god"},
            {"token": "brahman"}
        ]}"#;

        let lexicon = Lexicon::from_json(json).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.all()[1].gloss, "");
    }

    #[test]
    fn test_lexicon_rejects_malformed_json() {
        assert!(Lexicon::from_json(r#"{"tokens": []}"#).is_err());
    }

    #[test]
    fn test_lexicon_lookup_is_normalized() {
        let lexicon = Lexicon::from_tokens(["deva"]);
        assert!(lexicon.contains("deva"));
        assert!(lexicon.contains("DEVA"));
        assert!(lexicon.contains(" devá "));
        assert!(lexicon.contains("dêvà"));
        assert!(!lexicon.contains("devam"));
    }

    #[test]
    fn test_lexicon_lookup_entry() {
        let json = r#"{"words": [{"token": "deva", "gloss": "god"}]}"#;
        let lexicon = Lexicon::from_json(json).unwrap();
        assert_eq!(lexicon.lookup("Devá").map(|e| e.gloss.as_str()), Some("god"));
        assert!(lexicon.lookup("agni").is_none());
    }

    #[test]
    fn test_lexicon_duplicate_keys_resolve_to_first_entry() {
        let json = r#"{"words": [
            {"token": "devá", "gloss": "first"},
            {"token": "DEVA", "gloss": "second"}
        ]}"#;
        let lexicon = Lexicon::from_json(json).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.lookup("deva").map(|e| e.gloss.as_str()), Some("first"));
    }

    #[test]
    fn test_default_lexicon_loads() {
        let lexicon = default_lexicon();
        assert!(lexicon.contains("deva"));
        assert!(lexicon.contains("brahman"));
        assert!(lexicon.contains("देव"));
        assert!(!lexicon.contains("agni"));
    }

    #[test]
    fn test_lexicon_preserves_order() {
        let lexicon = Lexicon::from_tokens(["brahman", "deva"]);
        assert_eq!(lexicon.all()[0].token, "brahman");
        assert_eq!(lexicon.all()[1].token, "deva");
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token(" Agní "), "agni");
        assert_eq!(normalize_token("ā\u{0301}"), "ā");
    }
}
