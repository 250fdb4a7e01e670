// Sannatara (1.2.40): an anudātta immediately before an udātta or svarita
// is pronounced lower still. This describes the input rather than offering
// a new form, so it is reported as annotations. The domain override fixes
// its own accentuation and suppresses these.

use crate::pipeline::{ProsodyStage, StageInput};
use crate::types::{AggregateResult, ProsodyAnnotation};
use svara_lang::{Accent, tokenize, vowel_positions};

/// Phoneme indices of the sannatara vowels in `text`.
pub fn detect_sannatara(text: &str) -> Vec<usize> {
    let phonemes = tokenize(text);
    vowel_positions(&phonemes)
        .windows(2)
        .filter(|pair| {
            phonemes[pair[0]].accent() == Accent::Anudatta
                && matches!(
                    phonemes[pair[1]].accent(),
                    Accent::Udatta | Accent::Svarita
                )
        })
        .map(|pair| pair[0])
        .collect()
}

pub struct SannataraStage;

impl ProsodyStage for SannataraStage {
    fn name(&self) -> &'static str {
        "sannatara"
    }

    fn run(&self, mut result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
        if input.domain_active() {
            return result;
        }
        let phonemes = tokenize(input.text);
        let found = detect_sannatara(input.text);
        for &index in &found {
            result.annotations.push(ProsodyAnnotation::Sannatara {
                index,
                vowel: phonemes[index].text.clone(),
            });
        }
        if !found.is_empty() {
            result.note(format!(
                "1.2.40: {} anudātta vowel(s) before a higher tone are sannatara",
                found.len()
            ));
        }
        result
    }
}
