// Accent classifier: reads the pitch accent off a single vowel.
//
// Classification is two-step. A fixed table of precomposed Latin vowels
// (`á`, `â`, `è`, ...) is checked first; anything else is decomposed (NFD)
// and scanned for the combining pitch marks listed in `script.rs`. The base
// is whatever remains after the marks are removed, recomposed to NFC, and it
// must itself be a vowel.
//
// Unmarked vowels are the one policy choice: strict callers get
// `Accent::Unmarked`, non-strict callers (the svarita decomposer) get
// `Accent::Svarita` with `explicit = false` so they always have a concrete
// accent to work with.
//
// Also provides the two writers used by every rule layer: `apply_accent`
// (put a specific mark on a vowel) and `strip_accents` (remove every pitch
// mark from arbitrary text).

use crate::error::AccentError;
use crate::script::{
    accent_mark, detect_script, is_latin_combining, is_pitch_mark, is_vowel, pitch_mark_accent,
    precomposed,
};
use crate::types::{Accent, AccentedVowel, Script};
use unicode_normalization::UnicodeNormalization;

/// Options for `classify`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyOptions {
    /// Force a script instead of detecting it from the input.
    pub script: Option<Script>,
    /// Report unmarked vowels as `Unmarked` instead of defaulting to svarita.
    pub strict: bool,
}

impl ClassifyOptions {
    pub fn strict() -> Self {
        ClassifyOptions {
            script: None,
            strict: true,
        }
    }
}

/// Classify one vowel, optionally carrying a pitch mark.
pub fn classify(input: &str, options: ClassifyOptions) -> Result<AccentedVowel, AccentError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AccentError::Empty);
    }
    let script = options.script.unwrap_or_else(|| detect_script(input));

    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some((base, accent)) = precomposed(c) {
            return Ok(AccentedVowel {
                base: base.to_string(),
                accent,
                script,
                explicit: true,
            });
        }
    }

    let (base, mark) = split_marks(input)?;
    if !is_vowel(&base) {
        return Err(AccentError::NotAVowel(base));
    }

    let (accent, explicit) = match mark {
        Some(accent) => (accent, true),
        None if options.strict => (Accent::Unmarked, false),
        None => (Accent::Svarita, false),
    };

    Ok(AccentedVowel {
        base,
        accent,
        script,
        explicit,
    })
}

/// Separate `text` into its mark-free NFC base and the single pitch accent
/// it carries. Repeating the same mark is tolerated; two different marks
/// are an error.
pub(crate) fn split_marks(text: &str) -> Result<(String, Option<Accent>), AccentError> {
    let mut found: Option<Accent> = None;
    let mut base = String::with_capacity(text.len());

    for c in text.nfd() {
        match pitch_mark_accent(c) {
            Some(accent) => match found {
                Some(first) if first != accent => {
                    return Err(AccentError::ConflictingMarks {
                        input: text.to_string(),
                        first,
                        second: accent,
                    });
                }
                _ => found = Some(accent),
            },
            None => base.push(c),
        }
    }

    Ok((base.nfc().collect(), found))
}

/// Write `accent` onto `vowel`, replacing any pitch mark it already has.
///
/// `Accent::Unmarked` just strips. Returns `AccentError::NotAVowel` when
/// the argument is not a vowel: putting an accent on a consonant is misuse.
pub fn apply_accent(
    vowel: &str,
    accent: Accent,
    script: Option<Script>,
) -> Result<String, AccentError> {
    let base = strip_accents(vowel.trim());
    if base.is_empty() {
        return Err(AccentError::Empty);
    }
    if !is_vowel(&base) {
        return Err(AccentError::NotAVowel(base));
    }
    let script = script.unwrap_or_else(|| detect_script(&base));
    Ok(mark_vowel(&base, accent, script))
}

/// Put `accent` on an already mark-free vowel base. The base is not
/// validated; an empty Devanagari base yields the bare mark, which is how
/// the inherent vowel after a consonant is written.
pub(crate) fn mark_vowel(base: &str, accent: Accent, script: Script) -> String {
    let Some(mark) = accent_mark(accent, script) else {
        return base.to_string();
    };

    match script {
        Script::Devanagari => {
            let mut out = base.to_string();
            out.push(mark);
            out
        }
        Script::Iast => {
            // The mark goes on the first letter (the `a` of a diphthong),
            // after any diacritics already attached to it.
            let decomposed: Vec<char> = base.nfd().collect();
            let mut split = decomposed.len().min(1);
            while split < decomposed.len() && is_latin_combining(decomposed[split]) {
                split += 1;
            }
            let mut out: Vec<char> = Vec::with_capacity(decomposed.len() + 1);
            out.extend_from_slice(&decomposed[..split]);
            out.push(mark);
            out.extend_from_slice(&decomposed[split..]);
            out.into_iter().nfc().collect()
        }
    }
}

/// Remove every recognized pitch mark, in either script, from `text`.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_pitch_mark(*c)).nfc().collect()
}

/// Number of pitch marks written in `text`.
pub fn count_marks(text: &str) -> usize {
    text.nfd().filter(|c| is_pitch_mark(*c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{DEVANAGARI_VOWELS, IAST_VOWELS};

    #[test]
    fn test_classify_precomposed() {
        let v = classify("â", ClassifyOptions::default()).unwrap();
        assert_eq!(v.base, "a");
        assert_eq!(v.accent, Accent::Svarita);
        assert!(v.explicit);

        let v = classify("È", ClassifyOptions::default()).unwrap();
        assert_eq!(v.base, "E");
        assert_eq!(v.accent, Accent::Anudatta);
    }

    #[test]
    fn test_classify_combining_mark_on_long_vowel() {
        let v = classify("a\u{0304}\u{0301}", ClassifyOptions::default()).unwrap();
        assert_eq!(v.base, "ā");
        assert_eq!(v.accent, Accent::Udatta);
        assert_eq!(v.script, Script::Iast);
    }

    #[test]
    fn test_classify_unmarked_strict_vs_default() {
        let strict = classify("i", ClassifyOptions::strict()).unwrap();
        assert_eq!(strict.accent, Accent::Unmarked);
        assert!(!strict.explicit);

        let lenient = classify("i", ClassifyOptions::default()).unwrap();
        assert_eq!(lenient.accent, Accent::Svarita);
        assert!(!lenient.explicit);
    }

    #[test]
    fn test_classify_devanagari() {
        let v = classify("इ\u{0952}", ClassifyOptions::default()).unwrap();
        assert_eq!(v.base, "इ");
        assert_eq!(v.accent, Accent::Anudatta);
        assert_eq!(v.script, Script::Devanagari);

        let alt = classify("ए\u{0954}", ClassifyOptions::default()).unwrap();
        assert_eq!(alt.accent, Accent::Udatta);
    }

    #[test]
    fn test_classify_rejects_consonant() {
        let err = classify("ḱ", ClassifyOptions::default()).unwrap_err();
        assert_eq!(err, AccentError::NotAVowel("k".to_string()));
        assert!(classify("क", ClassifyOptions::default()).is_err());
    }

    #[test]
    fn test_classify_empty_and_conflicting() {
        assert_eq!(classify("  ", ClassifyOptions::default()), Err(AccentError::Empty));
        let err = classify("a\u{0301}\u{0300}", ClassifyOptions::default()).unwrap_err();
        assert!(matches!(err, AccentError::ConflictingMarks { .. }));
    }

    #[test]
    fn test_classify_forced_script() {
        let v = classify(
            "á",
            ClassifyOptions {
                script: Some(Script::Devanagari),
                strict: true,
            },
        )
        .unwrap();
        assert_eq!(v.script, Script::Devanagari);
    }

    #[test]
    fn test_apply_accent_roundtrip_all_vowels() {
        for v in IAST_VOWELS.iter().chain(DEVANAGARI_VOWELS.iter()) {
            for accent in Accent::MARKED {
                let marked = apply_accent(v, accent, None).unwrap();
                let back = classify(&marked, ClassifyOptions::strict()).unwrap();
                assert_eq!(back.accent, accent, "{v} with {accent} -> {marked}");
                assert_eq!(back.base, *v, "{v} with {accent} -> {marked}");
            }
        }
    }

    #[test]
    fn test_apply_accent_replaces_existing_mark() {
        assert_eq!(apply_accent("â", Accent::Udatta, None).unwrap(), "á");
        assert_eq!(apply_accent("â", Accent::Unmarked, None).unwrap(), "a");
        assert_eq!(apply_accent("ai", Accent::Anudatta, None).unwrap(), "ài");
    }

    #[test]
    fn test_apply_accent_to_consonant_is_misuse() {
        assert_eq!(
            apply_accent("t", Accent::Udatta, None),
            Err(AccentError::NotAVowel("t".to_string()))
        );
    }

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("agním īḷe puróhitam"), "agnim īḷe purohitam");
        assert_eq!(strip_accents("âàà"), "aaa");
        assert_eq!(strip_accents("अ\u{0951}ग्नि\u{0952}"), "अग्नि");
    }

    #[test]
    fn test_count_marks() {
        assert_eq!(count_marks("âàà"), 3);
        assert_eq!(count_marks("deva"), 0);
        assert_eq!(count_marks("ā\u{0301}"), 1);
    }
}
