// Local assimilation after a svarita (1.2.39).
//
// The anudātta vowels that directly follow a svarita lose their low pitch
// and are spoken at the svarita's level. A run is the stretch of such
// vowels: it starts at the first anudātta after the svarita and ends at the
// last consecutive one. Consonants between the vowels do not break a run;
// any other accent (or an unmarked vowel) does. Scanning resumes after a
// run, so one svarita never claims vowels another svarita already took.
//
// Every run is its own `local-monotone` option: flattening one run does not
// imply flattening another.

use crate::pipeline::StageInput;
use crate::types::{AggregateResult, ProsodyMode, RuleId};
use serde::Serialize;
use svara_lang::{Accent, Phoneme, render, tokenize, vowel_positions};

/// Inclusive range of phoneme indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Run {
    pub start: usize,
    pub end: usize,
}

pub fn detect_runs(text: &str) -> Vec<Run> {
    detect_runs_in(&tokenize(text))
}

pub fn detect_runs_in(phonemes: &[Phoneme]) -> Vec<Run> {
    let vowels = vowel_positions(phonemes);
    let mut runs = Vec::new();
    let mut i = 0;

    while i < vowels.len() {
        if phonemes[vowels[i]].accent() == Accent::Svarita {
            let mut j = i + 1;
            while j < vowels.len() && phonemes[vowels[j]].accent() == Accent::Anudatta {
                j += 1;
            }
            if j > i + 1 {
                runs.push(Run {
                    start: vowels[i + 1],
                    end: vowels[j - 1],
                });
                i = j;
                continue;
            }
        }
        i += 1;
    }

    runs
}

/// `text` with the pitch marks of every vowel in `run` removed. Indices
/// past the end are ignored.
pub fn apply_run(text: &str, run: Run) -> String {
    let phonemes: Vec<Phoneme> = tokenize(text)
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            if i >= run.start && i <= run.end {
                p.with_accent(Accent::Unmarked)
            } else {
                p
            }
        })
        .collect();
    render(&phonemes)
}

/// Offer one `local-monotone` option per run.
pub fn merge_assimilation(mut result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
    let runs = detect_runs(input.text);
    if runs.is_empty() {
        return result;
    }
    for run in &runs {
        result.push_option(
            ProsodyMode::LocalMonotone,
            apply_run(input.text, *run),
            RuleId::PostSvarita,
        );
    }
    result.record(
        RuleId::PostSvarita,
        format!(
            "{} anudātta run(s) after a svarita may be spoken at one pitch",
            runs.len()
        ),
    );
    result
}
