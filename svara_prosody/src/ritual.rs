// Ritual recitation: ekashruti (1.2.34) and the vaṣaṭ exclamation (1.2.35).
//
// In sacrificial recitation a word is spoken monotone unless one of the
// named exceptions holds: muttered repetition (japa), a sacred-syllable
// form, sāman chant, a single-syllable word, or a stressed word standing
// first in a compound. An exception does not make the rule silent. It is a
// blocking decision, recorded under 1.2.34 with the exception named, so the
// audit trail shows the rule was considered.
//
// The ritual exclamation vaṣaṭ may additionally be raised above udātta.
// That is offered as an option alongside whatever 1.2.34 decided.

use crate::context::ProsodyContext;
use crate::ekashruti::{RuleVerdict, flatten};
use crate::pipeline::{ProsodyStage, StageInput};
use crate::types::{AggregateResult, ProsodyMode, RuleId};
use serde::Serialize;
use std::fmt;
use svara_lang::{Accent, normalize_token, render, syllable_count, tokenize};

/// Sacred-syllable (nyūṅkha) forms, as normalized tokens.
const SACRED_SYLLABLES: &[&str] = &["om", "oṃ", "oṁ", "ॐ", "ओम्", "ओं"];

/// Spellings of the ritual exclamation, as normalized tokens.
const VASHAT_FORMS: &[&str] = &["vaṣaṭ", "vauṣaṭ", "वषट्", "वौषट्"];

/// Why ritual monotone was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RitualException {
    Japa,
    SacredSyllable,
    Saman,
    Monosyllable,
    CompoundInitialStress,
}

impl RitualException {
    pub fn as_str(self) -> &'static str {
        match self {
            RitualException::Japa => "japa",
            RitualException::SacredSyllable => "sacred-syllable",
            RitualException::Saman => "saman",
            RitualException::Monosyllable => "monosyllable",
            RitualException::CompoundInitialStress => "compound-initial-stress",
        }
    }
}

impl fmt::Display for RitualException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_sacred_syllable(text: &str) -> bool {
    SACRED_SYLLABLES.contains(&normalize_token(text).as_str())
}

pub fn is_vashat(text: &str) -> bool {
    VASHAT_FORMS.contains(&normalize_token(text).as_str())
}

/// Every exception that blocks ritual monotone for `text`, in a fixed
/// order. Empty means ekashruti is mandatory.
pub fn ritual_exceptions(text: &str, ctx: &ProsodyContext) -> Vec<RitualException> {
    let mut found = Vec::new();
    if ctx.japa {
        found.push(RitualException::Japa);
    }
    if ctx.sacred_syllable || is_sacred_syllable(text) {
        found.push(RitualException::SacredSyllable);
    }
    if ctx.saman {
        found.push(RitualException::Saman);
    }
    if syllable_count(text) <= 1 {
        found.push(RitualException::Monosyllable);
    }
    if ctx.compound_initial_stressed {
        found.push(RitualException::CompoundInitialStress);
    }
    found
}

pub fn evaluate(text: &str, ctx: &ProsodyContext) -> RuleVerdict {
    let text = text.trim();
    if !ctx.ritual {
        return RuleVerdict {
            applies: false,
            reason: "not a ritual recitation".to_string(),
        };
    }
    let exceptions = ritual_exceptions(text, ctx);
    if exceptions.is_empty() {
        return RuleVerdict {
            applies: true,
            reason: format!("'{text}' in ritual recitation is recited monotone"),
        };
    }
    let names: Vec<&str> = exceptions.iter().map(|e| e.as_str()).collect();
    RuleVerdict {
        applies: false,
        reason: format!(
            "ritual monotone for '{text}' blocked by exception: {}",
            names.join(", ")
        ),
    }
}

/// Flattened `text` if ritual monotone applies, `None` otherwise.
pub fn apply(text: &str, ctx: &ProsodyContext) -> Option<String> {
    evaluate(text, ctx).applies.then(|| flatten(text))
}

/// `text` with every vowel rewritten as udātta.
pub fn raise_all(text: &str) -> String {
    let raised: Vec<_> = tokenize(text)
        .iter()
        .map(|p| p.with_accent(Accent::Udatta))
        .collect();
    render(&raised)
}

pub struct RitualStage;

impl ProsodyStage for RitualStage {
    fn name(&self) -> &'static str {
        "ekashruti-ritual"
    }

    fn run(&self, mut result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
        if !input.context.ritual {
            return result;
        }

        let verdict = evaluate(input.text, input.context);
        if verdict.applies {
            result.push_option(ProsodyMode::MonotoneForced, flatten(input.text), RuleId::Ritual);
        }
        result.record(RuleId::Ritual, verdict.reason);

        if is_vashat(input.text) {
            result.push_option(
                ProsodyMode::UccaistaraOptional,
                raise_all(input.text),
                RuleId::Vashat,
            );
            result.record(
                RuleId::Vashat,
                "vaṣaṭ may be pronounced higher than udātta",
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ritual() -> ProsodyContext {
        ProsodyContext {
            ritual: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_ritual_forces_monotone() {
        let verdict = evaluate("agnim", &ritual());
        assert!(verdict.applies);
        assert_eq!(apply("agním", &ritual()), Some("agnim".to_string()));
    }

    #[test]
    fn test_no_ritual_no_rule() {
        let ctx = ProsodyContext::default();
        assert!(!evaluate("agnim", &ctx).applies);
        assert!(ritual_exceptions("agnim", &ctx).is_empty());
    }

    #[test]
    fn test_japa_blocks() {
        let ctx = ProsodyContext {
            japa: true,
            ..ritual()
        };
        let verdict = evaluate("agnim", &ctx);
        assert!(!verdict.applies);
        assert!(verdict.reason.contains("japa"));
    }

    #[test]
    fn test_om_is_sacred_and_monosyllabic() {
        assert!(is_sacred_syllable("Om"));
        assert!(is_sacred_syllable("ओम्"));
        assert_eq!(
            ritual_exceptions("om", &ritual()),
            vec![RitualException::SacredSyllable, RitualException::Monosyllable]
        );
    }

    #[test]
    fn test_every_exception_reported_in_order() {
        let ctx = ProsodyContext {
            japa: true,
            saman: true,
            sacred_syllable: true,
            compound_initial_stressed: true,
            ..ritual()
        };
        assert_eq!(
            ritual_exceptions("agnim", &ctx),
            vec![
                RitualException::Japa,
                RitualException::SacredSyllable,
                RitualException::Saman,
                RitualException::CompoundInitialStress,
            ]
        );
    }

    #[test]
    fn test_vashat_forms() {
        assert!(is_vashat("vaṣaṭ"));
        assert!(is_vashat("váṣaṭ"));
        assert!(is_vashat("वषट्"));
        assert!(!is_vashat("vasat"));
    }

    #[test]
    fn test_raise_all() {
        assert_eq!(raise_all("vaṣaṭ"), "váṣáṭ");
        assert_eq!(raise_all("agnì"), "ágní");
    }

    #[test]
    fn test_exception_serializes_kebab() {
        let json = serde_json::to_string(&RitualException::CompoundInitialStress).unwrap();
        assert_eq!(json, "\"compound-initial-stress\"");
    }
}
