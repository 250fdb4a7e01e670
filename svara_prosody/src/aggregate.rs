// Aggregation: one input in, one `AggregateResult` out.
//
// `Engine` owns everything the rules read (config, lexicon, duration table,
// stage pipeline), all immutable after construction, so one engine can be
// shared across threads. `aggregate` validates the text, folds it through
// the pipeline, then settles the primary decision and the confidence score.
//
// Input problems that are about the text itself (empty after trimming) give
// an invalid result with zero confidence. Problems with the shape of a JSON
// request are `RequestError`s from `resolve_request`.
//
// See also: `pipeline.rs` for stage order, `config.rs` for the weights the
// confidence score uses.

use crate::config::{ConfidenceWeights, EngineConfig};
use crate::context::ProsodyContext;
use crate::error::{ConfigError, RequestError};
use crate::pipeline::{Pipeline, StageInput};
use crate::types::{AggregateResult, PrimaryDecision, ProsodyMode, RuleId};
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;
use svara_lang::{DurationTable, Lexicon, count_marks, default_lexicon};

pub const EMPTY_INPUT_ERROR: &str = "input text is empty";

static DEFAULT_ENGINE: LazyLock<Engine> = LazyLock::new(Engine::default);

#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    lexicon: Lexicon,
    durations: DurationTable,
    pipeline: Pipeline,
}

impl Default for Engine {
    fn default() -> Self {
        Engine {
            config: EngineConfig::default(),
            lexicon: default_lexicon(),
            durations: DurationTable::default(),
            pipeline: Pipeline::standard(),
        }
    }
}

impl Engine {
    /// An engine with the standard pipeline and the embedded lexicon.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.implicit_domain {
            tracing::warn!("implicit Subrahmaṇyā domain enabled: every input is treated as in-domain");
        }
        Ok(Engine {
            config,
            ..Engine::default()
        })
    }

    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        if lexicon.is_empty() {
            tracing::warn!("empty lexicon: 1.2.38 will never apply");
        }
        self.lexicon = lexicon;
        self
    }

    pub fn with_durations(mut self, durations: DurationTable) -> Self {
        self.durations = durations;
        self
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn aggregate(&self, text: &str, ctx: &ProsodyContext) -> AggregateResult {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!("rejecting empty input");
            return AggregateResult::invalid(text, EMPTY_INPUT_ERROR);
        }

        let input = StageInput {
            text: trimmed,
            context: ctx,
            config: &self.config,
            lexicon: &self.lexicon,
            durations: &self.durations,
        };
        let mut result = self.pipeline.run(AggregateResult::new(text), &input);

        result.primary_decision = primary_decision(&result);
        result.confidence = confidence(trimmed, ctx, &self.config.confidence, result.is_valid);
        result.note(format!(
            "primary decision: {} ({} option(s), confidence {:.2})",
            result.primary_decision,
            result.options.len(),
            result.confidence
        ));
        tracing::debug!(
            decision = %result.primary_decision,
            options = result.options.len(),
            confidence = result.confidence,
            "aggregated"
        );
        result
    }

    /// Resolve a JSON request of the form `{"text": "...", "context": {...}}`.
    /// `context` may be omitted.
    pub fn resolve_request(&self, json: &str) -> Result<AggregateResult, RequestError> {
        let value: Value = serde_json::from_str(json)?;
        let text = match value.get("text") {
            None => return Err(RequestError::MissingText),
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(RequestError::TextNotString(json_type_name(other))),
        };
        let ctx = match value.get("context") {
            None | Some(Value::Null) => ProsodyContext::default(),
            Some(c) => ProsodyContext::deserialize(c).map_err(RequestError::Context)?,
        };
        Ok(self.aggregate(text, &ctx))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The process-wide engine with default configuration, built on first use.
pub fn default_engine() -> &'static Engine {
    &DEFAULT_ENGINE
}

/// Aggregate with the default engine.
pub fn aggregate(text: &str, ctx: &ProsodyContext) -> AggregateResult {
    default_engine().aggregate(text, ctx)
}

fn primary_decision(result: &AggregateResult) -> PrimaryDecision {
    if result.applied_sutras.contains(&RuleId::Subrahmanya) {
        return PrimaryDecision::Accented;
    }
    match result.options.as_slice() {
        [] => PrimaryDecision::Natural,
        [only] => match only.mode {
            ProsodyMode::MonotoneForced => PrimaryDecision::Monotone,
            ProsodyMode::NaturalAccent => PrimaryDecision::Natural,
            mode => PrimaryDecision::Mode(mode),
        },
        _ => PrimaryDecision::Options,
    }
}

/// Confidence in a result: a base for valid input, plus capped bonuses for
/// context signals and for pitch marks written in the text. Every term is
/// non-negative, so more context never lowers the score.
pub fn confidence(
    text: &str,
    ctx: &ProsodyContext,
    weights: &ConfidenceWeights,
    valid: bool,
) -> f64 {
    if !valid {
        return 0.0;
    }
    let signals = ctx.signal_count() as f64;
    let marks = count_marks(text) as f64;
    let score = weights.base_valid
        + (signals * weights.per_context_signal).min(weights.max_context_bonus)
        + (marks * weights.per_accent_mark).min(weights.max_mark_bonus);
    score.clamp(0.0, 1.0)
}
