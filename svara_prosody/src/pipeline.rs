// Ordered stage pipeline.
//
// Each rule family is a `ProsodyStage`: a pure `AggregateResult ->
// AggregateResult` transform that reads the shared `StageInput`. The
// aggregator folds the input through the stages in order. A later stage may
// add options or supersede earlier ones (through `AggregateResult`'s
// methods, which keep provenance), but no stage calls another.
//
// `Pipeline::standard()` is the full rule set in textual order:
//
//   1.2.33 distant vocative -> 1.2.34/35 ritual -> 1.2.36 chandas
//   -> 1.2.37/38 domain override, else 1.2.39 local assimilation
//   -> 1.2.40 sannatara annotations -> 1.2.32 svarita timing annotations
//
// A new domain rule is added by appending a stage; existing stages do not
// change.

use crate::chandas::ChandasStage;
use crate::config::EngineConfig;
use crate::context::ProsodyContext;
use crate::domain::DomainStage;
use crate::ekashruti::DistantVocativeStage;
use crate::ritual::RitualStage;
use crate::sannatara::SannataraStage;
use crate::svarita::SvaritaTimingStage;
use crate::types::AggregateResult;
use std::fmt;
use svara_lang::{DurationTable, Lexicon};

/// Read-only data every stage sees.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    /// The input text, trimmed.
    pub text: &'a str,
    pub context: &'a ProsodyContext,
    pub config: &'a EngineConfig,
    pub lexicon: &'a Lexicon,
    pub durations: &'a DurationTable,
}

impl StageInput<'_> {
    /// Whether the Subrahmaṇyā domain rules are in force, either from the
    /// context or from engine configuration.
    pub fn domain_active(&self) -> bool {
        self.context.subrahmanya || self.config.implicit_domain
    }
}

pub trait ProsodyStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn run(&self, result: AggregateResult, input: &StageInput<'_>) -> AggregateResult;
}

#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn ProsodyStage>>,
}

impl Pipeline {
    /// A pipeline with no stages.
    pub fn empty() -> Self {
        Pipeline { stages: Vec::new() }
    }

    /// Every rule this engine implements, in order.
    pub fn standard() -> Self {
        Pipeline::empty()
            .with_stage(DistantVocativeStage)
            .with_stage(RitualStage)
            .with_stage(ChandasStage)
            .with_stage(DomainStage)
            .with_stage(SannataraStage)
            .with_stage(SvaritaTimingStage)
    }

    /// Append a stage after all existing ones.
    pub fn with_stage(mut self, stage: impl ProsodyStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
        self.stages.iter().fold(result, |acc, stage| {
            let before = acc.options.len();
            let after = stage.run(acc, input);
            tracing::debug!(
                stage = stage.name(),
                options_before = before,
                options_after = after.options.len(),
                "stage complete"
            );
            after
        })
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProsodyMode, RuleId};

    struct TagStage;

    impl ProsodyStage for TagStage {
        fn name(&self) -> &'static str {
            "tag"
        }

        fn run(&self, mut result: AggregateResult, input: &StageInput<'_>) -> AggregateResult {
            result.push_option(ProsodyMode::NaturalAccent, input.text, RuleId::Chandas);
            result
        }
    }

    fn with_input<R>(text: &str, ctx: &ProsodyContext, f: impl FnOnce(&StageInput<'_>) -> R) -> R {
        let config = EngineConfig::default();
        let lexicon = Lexicon::default();
        let durations = DurationTable::default();
        let input = StageInput {
            text,
            context: ctx,
            config: &config,
            lexicon: &lexicon,
            durations: &durations,
        };
        f(&input)
    }

    #[test]
    fn test_standard_stage_order() {
        assert_eq!(
            Pipeline::standard().stage_names(),
            vec![
                "ekashruti-distant-vocative",
                "ekashruti-ritual",
                "ekashruti-chandas",
                "domain-override",
                "sannatara",
                "svarita-timing",
            ]
        );
    }

    #[test]
    fn test_appended_stage_runs_last() {
        let pipeline = Pipeline::empty().with_stage(TagStage);
        let result = with_input("agne", &ProsodyContext::default(), |input| {
            pipeline.run(AggregateResult::new("agne"), input)
        });
        assert_eq!(result.options.len(), 1);
        assert_eq!(result.options[0].form, "agne");
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let result = with_input("agne", &ProsodyContext::default(), |input| {
            Pipeline::empty().run(AggregateResult::new("agne"), input)
        });
        assert_eq!(result, AggregateResult::new("agne"));
    }

    #[test]
    fn test_domain_active_from_config() {
        let ctx = ProsodyContext::default();
        let config = EngineConfig {
            implicit_domain: true,
            ..Default::default()
        };
        let lexicon = Lexicon::default();
        let durations = DurationTable::default();
        let input = StageInput {
            text: "deva",
            context: &ctx,
            config: &config,
            lexicon: &lexicon,
            durations: &durations,
        };
        assert!(input.domain_active());
    }
}
