// Optional ekashruti in metrical verse (1.2.36).
//
// In chandas, monotone is allowed but never required. The rule always
// offers the text as written alongside its flattened form. Longer words get
// more room: from `extended_min_syllables` up, a mixed variation that keeps
// only the first written accent is offered too. The tier bounds come from
// `EngineConfig::chandas`.

use crate::config::ChandasTiers;
use crate::context::ProsodyContext;
use crate::ekashruti::flatten;
use crate::pipeline::{ProsodyStage, StageInput};
use crate::types::{AggregateResult, ProsodyMode, RuleId};
use serde::Serialize;
use svara_lang::{Accent, render, syllable_count, tokenize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flexibility {
    Limited,
    Standard,
    Extended,
}

impl Flexibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Flexibility::Limited => "limited",
            Flexibility::Standard => "standard",
            Flexibility::Extended => "extended",
        }
    }
}

pub fn flexibility(syllables: usize, tiers: &ChandasTiers) -> Flexibility {
    if syllables <= tiers.limited_max_syllables {
        Flexibility::Limited
    } else if syllables >= tiers.extended_min_syllables {
        Flexibility::Extended
    } else {
        Flexibility::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChandasEvaluation {
    pub applies: bool,
    pub syllables: usize,
    pub flexibility: Flexibility,
    /// Candidate forms in the order they should be offered.
    pub options: Vec<(ProsodyMode, String)>,
    pub reason: String,
}

pub fn evaluate(text: &str, ctx: &ProsodyContext, tiers: &ChandasTiers) -> ChandasEvaluation {
    let text = text.trim();
    let syllables = syllable_count(text);
    let tier = flexibility(syllables, tiers);

    if !ctx.is_metrical() {
        return ChandasEvaluation {
            applies: false,
            syllables,
            flexibility: tier,
            options: Vec::new(),
            reason: "not metrical verse".to_string(),
        };
    }

    let mut options = vec![
        (ProsodyMode::NaturalAccent, text.to_string()),
        (ProsodyMode::MonotoneOptional, flatten(text)),
    ];
    if tier == Flexibility::Extended {
        options.push((ProsodyMode::MixedVariation, mixed_variation(text)));
    }

    let meter = ctx
        .meter
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default();
    ChandasEvaluation {
        applies: true,
        syllables,
        flexibility: tier,
        reason: format!(
            "metrical verse{meter}: monotone optional for '{text}', {syllables} syllables, {} flexibility",
            tier.as_str()
        ),
        options,
    }
}

/// Keep the first explicitly accented vowel; strip every later mark.
pub fn mixed_variation(text: &str) -> String {
    let mut seen_accent = false;
    let phonemes: Vec<_> = tokenize(text)
        .into_iter()
        .map(|p| {
            if !p.is_vowel() || !p.accent().is_marked() {
                return p;
            }
            if seen_accent {
                p.with_accent(Accent::Unmarked)
            } else {
                seen_accent = true;
                p
            }
        })
        .collect();
    render(&phonemes)
}

pub struct ChandasStage;

impl ProsodyStage for ChandasStage {
    fn name(&self) -> &'static str {
        "ekashruti-chandas"
    }

    fn run(&self, mut result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
        let evaluation = evaluate(input.text, input.context, &input.config.chandas);
        if !evaluation.applies {
            return result;
        }
        for (mode, form) in evaluation.options {
            result.push_option(mode, form, RuleId::Chandas);
        }
        result.record(RuleId::Chandas, evaluation.reason);
        result
    }
}
