// Phoneme tokenizer: splits a word into grapheme-sized phonemes.
//
// Rule layers never look at raw characters. They tokenize once, find the
// vowel phonemes, ask each for its accent, and rewrite individual vowels
// with `Phoneme::with_accent`. Concatenating the texts of a phoneme list
// reproduces the NFC input exactly, so a rewrite is always "tokenize, swap
// some phonemes, render".
//
// IAST: a phoneme is a base letter plus its combining diacritics. `a`
// followed by `i`/`u` fuses into the diphthongs `ai`/`au`, with the pitch
// mark on either letter, matching how the classifier reads "âi" and "aî"
// alike. Only when both letters carry a mark ("áì") are they two vowels;
// a diaeresis ("aï") is not a plain `i` and never fuses.
//
// Devanagari: a consonant (plus nukta, plus virama if present) is one
// consonant phoneme. The vowel that follows it is a separate vowel phoneme:
// the dependent sign and its pitch marks, or, for the inherent `a`, just the
// pitch marks (possibly an empty string). Independent vowel letters carry
// their marks with them.

use crate::classify::{count_marks, mark_vowel, split_marks, strip_accents};
use crate::script::{
    DEVANAGARI_INHERENT_VOWEL, DEVANAGARI_VOWELS, NUKTA, VIRAMA, is_devanagari_char,
    is_devanagari_consonant, is_devanagari_vowel_sign, is_latin_combining, is_pitch_mark,
    is_vowel,
};
use crate::types::{Accent, AccentedVowel, Script};
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonemeKind {
    Vowel,
    Consonant,
    /// Whitespace, punctuation, digits, and signs with no phonemic value here.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phoneme {
    /// Exact text of this phoneme in the (NFC) input.
    pub text: String,
    pub kind: PhonemeKind,
    pub script: Script,
    /// The Devanagari inherent `a`, written only through its pitch marks.
    #[serde(skip)]
    inherent: bool,
}

impl Phoneme {
    fn new(text: String, kind: PhonemeKind, script: Script) -> Self {
        Phoneme {
            text,
            kind,
            script,
            inherent: false,
        }
    }

    fn inherent_vowel(marks: String) -> Self {
        Phoneme {
            text: marks,
            kind: PhonemeKind::Vowel,
            script: Script::Devanagari,
            inherent: true,
        }
    }

    pub fn is_vowel(&self) -> bool {
        self.kind == PhonemeKind::Vowel
    }

    /// Mark-free base text. The inherent vowel reports "अ".
    pub fn base(&self) -> String {
        if self.inherent {
            DEVANAGARI_INHERENT_VOWEL.to_string()
        } else {
            strip_accents(&self.text)
        }
    }

    /// Written accent of a vowel phoneme; `Unmarked` for anything else, or
    /// when the marks conflict.
    pub fn accent(&self) -> Accent {
        if !self.is_vowel() {
            return Accent::Unmarked;
        }
        split_marks(&self.text)
            .ok()
            .and_then(|(_, accent)| accent)
            .unwrap_or(Accent::Unmarked)
    }

    /// The phoneme as a classified vowel, if it is one.
    pub fn accented_vowel(&self) -> Option<AccentedVowel> {
        if !self.is_vowel() {
            return None;
        }
        let accent = self.accent();
        Some(AccentedVowel {
            base: self.base(),
            accent,
            script: self.script,
            explicit: accent.is_marked(),
        })
    }

    /// A copy of this phoneme carrying `accent` instead of its current mark.
    /// Non-vowels are returned unchanged.
    pub fn with_accent(&self, accent: Accent) -> Phoneme {
        if !self.is_vowel() {
            return self.clone();
        }
        let bare = strip_accents(&self.text);
        Phoneme {
            text: mark_vowel(&bare, accent, self.script),
            ..self.clone()
        }
    }
}

/// Split `text` into phonemes. The input is normalized to NFC first.
pub fn tokenize(text: &str) -> Vec<Phoneme> {
    let chars: Vec<char> = text.nfc().collect();
    let mut phonemes = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_devanagari_char(c) {
            i = devanagari_phonemes(&chars, i, &mut phonemes);
        } else {
            i = latin_phoneme(&chars, i, &mut phonemes);
        }
    }

    phonemes
}

/// Concatenate phoneme texts back into a string.
pub fn render(phonemes: &[Phoneme]) -> String {
    phonemes.iter().map(|p| p.text.as_str()).collect()
}

/// Indices of the vowel phonemes in `phonemes`.
pub fn vowel_positions(phonemes: &[Phoneme]) -> Vec<usize> {
    phonemes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_vowel())
        .map(|(i, _)| i)
        .collect()
}

/// Number of vowel phonemes, i.e. syllables, in `text`.
pub fn syllable_count(text: &str) -> usize {
    tokenize(text).iter().filter(|p| p.is_vowel()).count()
}

fn latin_phoneme(chars: &[char], start: usize, out: &mut Vec<Phoneme>) -> usize {
    let mut end = latin_grapheme_end(chars, start);
    let mut text: String = chars[start..end].iter().collect();

    if strip_accents(&text).to_lowercase() == "a" && end < chars.len() {
        let next_end = latin_grapheme_end(chars, end);
        let next: String = chars[end..next_end].iter().collect();
        let glide = strip_accents(&next).to_lowercase();
        let at_most_one_mark = count_marks(&text) == 0 || count_marks(&next) == 0;
        if (glide == "i" || glide == "u") && at_most_one_mark {
            text.push_str(&next);
            end = next_end;
        }
    }

    let kind = if is_vowel(&strip_accents(&text)) {
        PhonemeKind::Vowel
    } else if chars[start].is_alphabetic() {
        PhonemeKind::Consonant
    } else {
        PhonemeKind::Other
    };
    out.push(Phoneme::new(text, kind, Script::Iast));
    end
}

/// End of the letter at `start` and its combining diacritics.
fn latin_grapheme_end(chars: &[char], start: usize) -> usize {
    let mut end = start + 1;
    while end < chars.len() && is_latin_combining(chars[end]) {
        end += 1;
    }
    end
}

fn devanagari_phonemes(chars: &[char], start: usize, out: &mut Vec<Phoneme>) -> usize {
    let c = chars[start];
    let mut end = start + 1;

    if is_devanagari_consonant(c) {
        if end < chars.len() && chars[end] == NUKTA {
            end += 1;
        }
        if end < chars.len() && chars[end] == VIRAMA {
            end += 1;
            out.push(Phoneme::new(
                chars[start..end].iter().collect(),
                PhonemeKind::Consonant,
                Script::Devanagari,
            ));
            return end;
        }
        out.push(Phoneme::new(
            chars[start..end].iter().collect(),
            PhonemeKind::Consonant,
            Script::Devanagari,
        ));

        if end < chars.len() && is_devanagari_vowel_sign(chars[end]) {
            let sign_start = end;
            end = take_marks(chars, end + 1);
            out.push(Phoneme::new(
                chars[sign_start..end].iter().collect(),
                PhonemeKind::Vowel,
                Script::Devanagari,
            ));
        } else {
            let marks_start = end;
            end = take_marks(chars, end);
            out.push(Phoneme::inherent_vowel(
                chars[marks_start..end].iter().collect(),
            ));
        }
        return end;
    }

    let letter = c.to_string();
    if DEVANAGARI_VOWELS.contains(&letter.as_str()) {
        end = take_marks(chars, end);
        out.push(Phoneme::new(
            chars[start..end].iter().collect(),
            PhonemeKind::Vowel,
            Script::Devanagari,
        ));
        return end;
    }

    // Candrabindu, anusvara, visarga.
    let kind = if matches!(c, '\u{0901}'..='\u{0903}') {
        PhonemeKind::Consonant
    } else {
        PhonemeKind::Other
    };
    out.push(Phoneme::new(letter, kind, Script::Devanagari));
    end
}

fn take_marks(chars: &[char], mut pos: usize) -> usize {
    while pos < chars.len() && is_pitch_mark(chars[pos]) {
        pos += 1;
    }
    pos
}
