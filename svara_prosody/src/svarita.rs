// Svarita decomposer: splits a circumflex vowel into its two pitch segments.
//
// A svarita vowel is high for its first half-unit and falls for the rest of
// its length. The first segment is therefore always exactly 0.5 units; the
// second is whatever remains of the vowel's total duration, never negative.
// When the total is itself 0.5 the fall is zero-length, and a total of 0
// (unknown base) yields zero proportions instead of dividing by zero.
//
// Non-svarita input is a normal negative result (`applies: false` plus a
// reason), not an error. Classification is non-strict, so an unmarked vowel
// is treated as svarita.
//
// `SvaritaTimingStage` runs the same split over every written svarita in an
// aggregate input and attaches the timings as annotations.

use crate::pipeline::{ProsodyStage, StageInput};
use crate::types::{AggregateResult, ProsodyAnnotation};
use serde::{Deserialize, Serialize};
use svara_lang::{Accent, ClassifyOptions, DurationTable, classify, tokenize};

/// Length of the high onset of every svarita, in duration units.
pub const UDATTA_ONSET_UNITS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentRole {
    #[serde(rename = "udātta-initial")]
    UdattaInitial,
    #[serde(rename = "anudātta-fall")]
    AnudattaFall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvaritaSegment {
    pub role: SegmentRole,
    pub units: f64,
    pub proportion_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvaritaDecomposition {
    pub applies: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<SvaritaSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_units: Option<f64>,
    pub reasoning: String,
}

impl SvaritaDecomposition {
    fn not_applicable(reasoning: String) -> Self {
        SvaritaDecomposition {
            applies: false,
            segments: Vec::new(),
            duration_units: None,
            reasoning,
        }
    }
}

/// Decompose `vowel` using the default duration table.
pub fn decompose(vowel: &str) -> SvaritaDecomposition {
    decompose_with(vowel, &DurationTable::default())
}

/// Decompose `vowel` using `table` for its total duration.
pub fn decompose_with(vowel: &str, table: &DurationTable) -> SvaritaDecomposition {
    let classified = match classify(vowel, ClassifyOptions::default()) {
        Ok(v) => v,
        Err(e) => return SvaritaDecomposition::not_applicable(e.to_string()),
    };
    if classified.accent != Accent::Svarita {
        return SvaritaDecomposition::not_applicable(format!(
            "'{}' carries {}, not svarita",
            vowel.trim(),
            classified.accent
        ));
    }

    let total = table.units(&classified.base);
    let segments = segments_for(total);
    let reasoning = format!(
        "svarita on '{}' ({} units): {} units high, {} units falling",
        classified.base, total, segments[0].units, segments[1].units
    );

    SvaritaDecomposition {
        applies: true,
        segments,
        duration_units: Some(total),
        reasoning,
    }
}

/// The two segments of a svarita of `total` units.
pub fn segments_for(total: f64) -> Vec<SvaritaSegment> {
    let fall = (total - UDATTA_ONSET_UNITS).max(0.0);
    let proportion = |units: f64| if total > 0.0 { units / total } else { 0.0 };
    vec![
        SvaritaSegment {
            role: SegmentRole::UdattaInitial,
            units: UDATTA_ONSET_UNITS,
            proportion_of_total: proportion(UDATTA_ONSET_UNITS),
        },
        SvaritaSegment {
            role: SegmentRole::AnudattaFall,
            units: fall,
            proportion_of_total: proportion(fall),
        },
    ]
}

/// Annotates every written svarita in the input with its timing. Unmarked
/// vowels are not annotated here: inside running text an unmarked vowel is
/// not a svarita claim.
pub struct SvaritaTimingStage;

impl ProsodyStage for SvaritaTimingStage {
    fn name(&self) -> &'static str {
        "svarita-timing"
    }

    fn run(&self, mut result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
        if input.domain_active() {
            return result;
        }
        for (index, phoneme) in tokenize(input.text).iter().enumerate() {
            if !phoneme.is_vowel() || phoneme.accent() != Accent::Svarita {
                continue;
            }
            let total = input.durations.units(&phoneme.base());
            result.annotations.push(ProsodyAnnotation::SvaritaSegments {
                index,
                vowel: phoneme.text.clone(),
                duration_units: total,
                segments: segments_for(total),
            });
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_short_circumflex() {
        let d = decompose("â");
        assert!(d.applies);
        assert_eq!(d.duration_units, Some(1.0));
        assert_eq!(
            d.segments,
            vec![
                SvaritaSegment {
                    role: SegmentRole::UdattaInitial,
                    units: 0.5,
                    proportion_of_total: 0.5,
                },
                SvaritaSegment {
                    role: SegmentRole::AnudattaFall,
                    units: 0.5,
                    proportion_of_total: 0.5,
                },
            ]
        );
    }

    #[test]
    fn test_decompose_long_vowel() {
        let d = decompose("ā\u{0302}");
        assert!(d.applies);
        assert_eq!(d.duration_units, Some(2.0));
        assert_eq!(d.segments[0].units, 0.5);
        assert_eq!(d.segments[1].units, 1.5);
        assert_eq!(d.segments[1].proportion_of_total, 0.75);
    }

    #[test]
    fn test_decompose_half_unit_fixed_point() {
        let table = DurationTable::default().with_override("a", 0.5);
        let d = decompose_with("â", &table);
        assert!(d.applies);
        assert_eq!(d.segments[1].units, 0.0);
        assert_eq!(d.segments[0].proportion_of_total, 1.0);
        assert_eq!(d.segments[1].proportion_of_total, 0.0);
    }

    #[test]
    fn test_zero_total_has_zero_proportions() {
        let segments = segments_for(0.0);
        assert_eq!(segments[1].units, 0.0);
        assert!(segments.iter().all(|s| s.proportion_of_total == 0.0));
    }

    #[test]
    fn test_non_svarita_does_not_apply() {
        let d = decompose("á");
        assert!(!d.applies);
        assert!(d.segments.is_empty());
        assert!(d.reasoning.contains("udatta"));
    }

    #[test]
    fn test_unmarked_defaults_to_svarita() {
        let d = decompose("e");
        assert!(d.applies);
        assert_eq!(d.duration_units, Some(2.0));
    }

    #[test]
    fn test_invalid_input_does_not_apply() {
        let d = decompose("k");
        assert!(!d.applies);
        assert!(d.reasoning.contains("not a vowel"));
    }

    #[test]
    fn test_devanagari_svarita() {
        let d = decompose("ई\u{1CDA}");
        assert!(d.applies);
        assert_eq!(d.duration_units, Some(2.0));
    }

    #[test]
    fn test_timing_stage_annotates_written_svarita() {
        use crate::config::EngineConfig;
        use crate::context::ProsodyContext;
        use svara_lang::Lexicon;

        let ctx = ProsodyContext::default();
        let config = EngineConfig::default();
        let lexicon = Lexicon::default();
        let durations = DurationTable::default();
        let input = StageInput {
            text: "agni",
            context: &ctx,
            config: &config,
            lexicon: &lexicon,
            durations: &durations,
        };
        let result = SvaritaTimingStage.run(AggregateResult::new("agni"), &input);
        assert!(result.annotations.is_empty());

        let input = StageInput {
            text: "agnī\u{0302}",
            ..input
        };
        let result = SvaritaTimingStage.run(AggregateResult::new("agnī\u{0302}"), &input);
        assert_eq!(result.annotations.len(), 1);
        match &result.annotations[0] {
            ProsodyAnnotation::SvaritaSegments {
                index,
                duration_units,
                segments,
                ..
            } => {
                assert_eq!(*index, 3);
                assert_eq!(*duration_units, 2.0);
                assert_eq!(segments[1].units, 1.5);
            }
            other => panic!("unexpected annotation {other:?}"),
        }
    }

    #[test]
    fn test_segment_roles_serialize_with_diacritics() {
        let json = serde_json::to_string(&SegmentRole::UdattaInitial).unwrap();
        assert_eq!(json, "\"udātta-initial\"");
    }
}
