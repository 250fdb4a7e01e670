// Discourse context supplied by the caller.
//
// The engine never infers grammatical case, distance, or recitation setting
// from the text itself; these facts come from the surrounding pipeline (or a
// human) as a `ProsodyContext`. Every field is optional and absence always
// means "this rule does not apply", so `ProsodyContext::default()` is the
// neutral context.
//
// Deserializes from JSON with every field defaulted, for the CLI and the
// request boundary in `aggregate.rs`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammaticalCase {
    Nominative,
    Accusative,
    Instrumental,
    Dative,
    Ablative,
    Genitive,
    Locative,
    #[serde(alias = "sambuddhi")]
    Vocative,
}

impl GrammaticalCase {
    pub fn from_name(name: &str) -> Option<GrammaticalCase> {
        serde_json::from_value(serde_json::Value::String(name.to_lowercase())).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceCategory {
    Near,
    Far,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProsodyContext {
    /// Grammatical case of the word.
    pub case: Option<GrammaticalCase>,
    /// Coarse distance to the addressee.
    pub distance_category: Option<DistanceCategory>,
    /// Measured distance to the addressee.
    pub distance_meters: Option<f64>,
    /// Distance at or beyond which the addressee is far. Falls back to the
    /// engine's configured default.
    pub distance_threshold: Option<f64>,
    /// Ritual (sacrificial) recitation.
    pub ritual: bool,
    /// Muttered repetition (japa).
    pub japa: bool,
    /// Melodic chant (sāman).
    pub saman: bool,
    /// The word is a sacred-syllable (nyūṅkha) form.
    pub sacred_syllable: bool,
    /// The word is stressed and stands first in a compound.
    pub compound_initial_stressed: bool,
    /// Metrical (chandas) verse.
    pub chandas: bool,
    /// Name of the meter, which also implies metrical verse.
    pub meter: Option<String>,
    /// The Subrahmaṇyā hymn domain.
    pub subrahmanya: bool,
}

impl ProsodyContext {
    pub fn is_vocative(&self) -> bool {
        self.case == Some(GrammaticalCase::Vocative)
    }

    /// Far if the category says so, or the measured distance reaches the
    /// threshold (`distance_threshold`, else `default_threshold`).
    pub fn is_far_distance(&self, default_threshold: f64) -> bool {
        if self.distance_category == Some(DistanceCategory::Far) {
            return true;
        }
        let threshold = self.distance_threshold.unwrap_or(default_threshold);
        self.distance_meters.is_some_and(|d| d >= threshold)
    }

    pub fn has_distance_fact(&self) -> bool {
        self.distance_category.is_some() || self.distance_meters.is_some()
    }

    pub fn is_metrical(&self) -> bool {
        self.chandas || self.meter.is_some()
    }

    /// Number of explicit context signals present. Each one makes the
    /// applicable rule set less ambiguous. Only ever counts facts that are
    /// present, so setting another field can never lower it.
    pub fn signal_count(&self) -> usize {
        [
            self.subrahmanya,
            self.ritual,
            self.is_metrical(),
            self.case.is_some() && self.has_distance_fact(),
        ]
        .iter()
        .filter(|&&signal| signal)
        .count()
    }
}
