// Subrahmaṇyā domain override (1.2.37, 1.2.38).
//
// Inside the Subrahmaṇyā hymn the general ekashruti rules are suspended:
// any monotone option proposed earlier is moved to the superseded ledger,
// every svarita is pronounced as udātta, and the words deva and brahman
// (looked up in the injected lexicon) are entirely anudātta. The domain
// fixes the accentuation, so the primary decision becomes `accented`.
//
// Outside the domain the same stage runs local assimilation (1.2.39)
// instead. The two branches never both fire for one input.
//
// Flow:
//   domain active? -- yes --> supersede monotone*, udaatta-replaced,
//                  |          lexical-anudatta for lexicon words
//                  '-- no --> assimilation::merge_assimilation

use crate::assimilation::merge_assimilation;
use crate::pipeline::{ProsodyStage, StageInput};
use crate::types::{AggregateResult, PrimaryDecision, ProsodyMode, RuleId};
use svara_lang::{Accent, LexEntry, Lexicon, render, tokenize};

/// `text` with every svarita vowel rewritten as udātta.
pub fn udatta_replaced(text: &str) -> String {
    rewrite_vowels(text, |accent| {
        (accent == Accent::Svarita).then_some(Accent::Udatta)
    })
}

/// `text` with every vowel rewritten as anudātta.
pub fn all_anudatta(text: &str) -> String {
    rewrite_vowels(text, |_| Some(Accent::Anudatta))
}

fn rewrite_vowels(text: &str, f: impl Fn(Accent) -> Option<Accent>) -> String {
    let phonemes: Vec<_> = tokenize(text)
        .into_iter()
        .map(|p| {
            if !p.is_vowel() {
                return p;
            }
            match f(p.accent()) {
                Some(accent) => p.with_accent(accent),
                None => p,
            }
        })
        .collect();
    render(&phonemes)
}

/// Rewrite each whitespace-separated word of `text` found in `lexicon` as
/// all anudātta. Returns the new text and the matched entries, or `None`
/// when no word matched.
pub fn lexical_anudatta<'a>(
    text: &str,
    lexicon: &'a Lexicon,
) -> Option<(String, Vec<&'a LexEntry>)> {
    let mut matched = Vec::new();
    let mut out = String::with_capacity(text.len());

    for piece in text.split_inclusive(char::is_whitespace) {
        let word = piece.trim_end();
        let trailing = &piece[word.len()..];
        match lexicon.lookup(word) {
            Some(entry) if !word.is_empty() => {
                matched.push(entry);
                out.push_str(&all_anudatta(word));
            }
            _ => out.push_str(word),
        }
        out.push_str(trailing);
    }

    (!matched.is_empty()).then_some((out, matched))
}

/// Apply the domain override to `result` if the domain is active, otherwise
/// merge local assimilation options.
pub fn integrate_domain(mut result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
    if !input.domain_active() {
        return merge_assimilation(result, input);
    }

    let removed = result.supersede_where(RuleId::Subrahmanya, |o| o.mode.is_monotone());
    let reason = if input.context.subrahmanya {
        "Subrahmaṇyā recitation: no ekashruti, svarita pronounced as udātta"
    } else {
        "implicit Subrahmaṇyā domain: no ekashruti, svarita pronounced as udātta"
    };
    result.record(RuleId::Subrahmanya, reason);
    if removed > 0 {
        tracing::debug!(removed, "monotone options superseded by domain override");
        result.note(format!("{removed} monotone option(s) superseded by 1.2.37"));
    }

    let raised = udatta_replaced(input.text);
    result.push_option(ProsodyMode::UdaattaReplaced, raised.as_str(), RuleId::Subrahmanya);

    if let Some((lowered, entries)) = lexical_anudatta(&raised, input.lexicon) {
        result.push_option(ProsodyMode::LexicalAnudatta, lowered, RuleId::DevaBrahman);
        for entry in entries {
            let gloss = if entry.gloss.is_empty() {
                String::new()
            } else {
                format!(" ('{}')", entry.gloss)
            };
            result.record(
                RuleId::DevaBrahman,
                format!("'{}'{gloss} is anudātta throughout in Subrahmaṇyā", entry.token),
            );
        }
    }

    result.primary_decision = PrimaryDecision::Accented;
    result
}

pub struct DomainStage;

impl ProsodyStage for DomainStage {
    fn name(&self) -> &'static str {
        "domain-override"
    }

    fn run(&self, result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
        integrate_domain(result, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::context::ProsodyContext;
    use svara_lang::{DurationTable, default_lexicon};

    fn run_domain(text: &str, ctx: &ProsodyContext, seed: AggregateResult) -> AggregateResult {
        let config = EngineConfig::default();
        let lexicon = default_lexicon();
        let durations = DurationTable::default();
        let input = StageInput {
            text,
            context: ctx,
            config: &config,
            lexicon: &lexicon,
            durations: &durations,
        };
        integrate_domain(seed, &input)
    }

    fn subrahmanya() -> ProsodyContext {
        ProsodyContext {
            subrahmanya: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_udatta_replaced() {
        assert_eq!(udatta_replaced("indrâgacha"), "indrágacha");
        assert_eq!(udatta_replaced("àgní"), "àgní");
        assert_eq!(udatta_replaced("ai\u{0302}"), "ái");
        assert_eq!(udatta_replaced("vaû"), "váu");
    }

    #[test]
    fn test_all_anudatta() {
        assert_eq!(all_anudatta("devá"), "dèvà");
    }

    #[test]
    fn test_lexical_anudatta_per_word() {
        let lexicon = default_lexicon();
        let (form, entries) = lexical_anudatta("índra devá", &lexicon).unwrap();
        assert_eq!(form, "índra dèvà");
        assert_eq!(entries.len(), 1);
        assert!(lexical_anudatta("índra", &lexicon).is_none());
    }

    #[test]
    fn test_domain_supersedes_monotone() {
        let mut seed = AggregateResult::new("agnê");
        seed.push_option(ProsodyMode::MonotoneForced, "agne", RuleId::Ritual);
        seed.push_option(ProsodyMode::NaturalAccent, "agnê", RuleId::Chandas);

        let result = run_domain("agnê", &subrahmanya(), seed);
        assert!(result.options.iter().all(|o| !o.mode.is_monotone()));
        assert_eq!(result.superseded.len(), 1);
        assert_eq!(result.superseded[0].superseded_by, RuleId::Subrahmanya);
        assert_eq!(result.option(ProsodyMode::UdaattaReplaced).unwrap().form, "agné");
        assert_eq!(result.primary_decision, PrimaryDecision::Accented);
    }

    #[test]
    fn test_domain_lexicon_word() {
        let result = run_domain("devâ", &subrahmanya(), AggregateResult::new("devâ"));
        assert_eq!(result.option(ProsodyMode::LexicalAnudatta).unwrap().form, "dèvà");
        assert!(result.applied_sutra_ids().contains(&"1.2.38"));
        assert!(result.reasoning.iter().any(|r| r.contains("god")));
    }

    #[test]
    fn test_outside_domain_runs_assimilation() {
        let result = run_domain("âàà", &ProsodyContext::default(), AggregateResult::new("âàà"));
        assert!(result.has_mode(ProsodyMode::LocalMonotone));
        assert!(!result.has_mode(ProsodyMode::UdaattaReplaced));
    }

    #[test]
    fn test_domain_suppresses_assimilation() {
        let result = run_domain("âàà", &subrahmanya(), AggregateResult::new("âàà"));
        assert!(!result.has_mode(ProsodyMode::LocalMonotone));
        assert!(!result.applied_sutras.contains(&RuleId::PostSvarita));
    }
}
