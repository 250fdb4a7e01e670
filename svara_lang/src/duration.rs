// Vowel duration table (mātrā counts).
//
// Short vowels are one unit, long vowels and diphthongs two. The table is
// keyed by mark-free base vowel in NFC; IAST lookups are case-insensitive
// and Devanagari dependent signs are looked up through their independent
// letter. Unknown bases have zero units; callers that divide by the total
// must guard for it.
//
// `DurationTable::default()` is the static table. `with_override` gives a
// modified copy so tests and configuration can pin individual vowels (for
// instance to the half-unit fixed point) without touching the defaults.

use crate::script::independent_form;
use std::collections::BTreeMap;
use unicode_normalization::UnicodeNormalization;

pub const SHORT_UNITS: f64 = 1.0;
pub const LONG_UNITS: f64 = 2.0;

const SHORT_VOWELS: &[&str] = &["a", "i", "u", "ṛ", "ḷ", "अ", "इ", "उ", "ऋ", "ऌ"];
const LONG_VOWELS: &[&str] = &[
    "ā", "ī", "ū", "ṝ", "ḹ", "e", "ai", "o", "au", "आ", "ई", "ऊ", "ॠ", "ॡ", "ए", "ऐ", "ओ", "औ",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DurationTable {
    overrides: BTreeMap<String, f64>,
}

impl DurationTable {
    /// Duration in units of a mark-free base vowel; 0 when unknown.
    pub fn units(&self, base: &str) -> f64 {
        let key = normalize_key(base);
        if let Some(&units) = self.overrides.get(&key) {
            return units;
        }
        if SHORT_VOWELS.contains(&key.as_str()) {
            SHORT_UNITS
        } else if LONG_VOWELS.contains(&key.as_str()) {
            LONG_UNITS
        } else {
            0.0
        }
    }

    /// A copy of this table with `base` pinned to `units`.
    pub fn with_override(&self, base: &str, units: f64) -> DurationTable {
        let mut overrides = self.overrides.clone();
        overrides.insert(normalize_key(base), units);
        DurationTable { overrides }
    }
}

fn normalize_key(base: &str) -> String {
    let nfc: String = base.nfc().collect::<String>().to_lowercase();
    independent_form(&nfc).to_string()
}

/// Duration of `base` in the default table.
pub fn duration_units(base: &str) -> f64 {
    DurationTable::default().units(base)
}
