// Ekashruti for a distant vocative (1.2.33).
//
// Calling out to someone far away flattens the word to a single pitch. The
// rule needs two caller-supplied facts: the word is vocative, and the
// addressee is far (by category, or by a measured distance at or beyond the
// threshold). Either fact missing means the rule does not apply; that is a
// normal negative verdict with a reason, never an error.

use crate::config::EngineConfig;
use crate::context::ProsodyContext;
use crate::pipeline::{ProsodyStage, StageInput};
use crate::types::{AggregateResult, ProsodyMode, RuleId};
use serde::Serialize;
use svara_lang::strip_accents;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleVerdict {
    pub applies: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EkashrutiApplication {
    pub applies: bool,
    /// Flattened text when the rule applies and flattening was requested,
    /// otherwise the input unchanged.
    pub transformed: String,
}

pub fn evaluate(text: &str, ctx: &ProsodyContext, config: &EngineConfig) -> RuleVerdict {
    let text = text.trim();
    if !ctx.is_vocative() {
        return RuleVerdict {
            applies: false,
            reason: format!("'{text}' is not vocative"),
        };
    }
    if !ctx.is_far_distance(config.default_distance_threshold) {
        let reason = match ctx.distance_meters {
            Some(d) => {
                let threshold = ctx
                    .distance_threshold
                    .unwrap_or(config.default_distance_threshold);
                format!("vocative '{text}' addressed at {d} m, within the {threshold} m threshold")
            }
            None => format!("vocative '{text}' has no far addressee"),
        };
        return RuleVerdict {
            applies: false,
            reason,
        };
    }
    RuleVerdict {
        applies: true,
        reason: format!("vocative '{text}' addressed to someone far away is recited monotone"),
    }
}

pub fn apply(
    text: &str,
    ctx: &ProsodyContext,
    config: &EngineConfig,
    flatten_marks: bool,
) -> EkashrutiApplication {
    let applies = evaluate(text, ctx, config).applies;
    let transformed = if applies && flatten_marks {
        flatten(text)
    } else {
        text.to_string()
    };
    EkashrutiApplication {
        applies,
        transformed,
    }
}

/// Remove every pitch mark, leaving the monotone form.
pub fn flatten(text: &str) -> String {
    strip_accents(text)
}

pub struct DistantVocativeStage;

impl ProsodyStage for DistantVocativeStage {
    fn name(&self) -> &'static str {
        "ekashruti-distant-vocative"
    }

    fn run(&self, mut result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
        let verdict = evaluate(input.text, input.context, input.config);
        if verdict.applies {
            result.push_option(
                ProsodyMode::MonotoneForced,
                flatten(input.text),
                RuleId::DistantVocative,
            );
            result.record(RuleId::DistantVocative, verdict.reason);
        } else if input.context.is_vocative() {
            result.note(verdict.reason);
        }
        result
    }
}
