// Vedic Accent Prosody Resolution
//
// Resolves how an accented Vedic word or phrase is actually pronounced.
// Given the written pitch accents (udātta, anudātta, svarita) and the
// discourse context, the engine applies Pāṇini's accent rules 1.2.32–1.2.40
// and reports every candidate pronunciation with the rules that produced
// it, a single primary decision, and a confidence score.
//
// Accent reading, tokenizing and vowel durations live in `svara_lang`. This
// crate holds the rules and the aggregation.
//
// Architecture:
// - types.rs: Rule ids, option modes, `AggregateResult` and its invariants
// - context.rs: Caller-supplied discourse facts (`ProsodyContext`)
// - config.rs: Data-driven `EngineConfig` (thresholds, tiers, weights)
// - svarita.rs: Svarita decomposition into onset + fall (1.2.32)
// - ekashruti.rs: Monotone for a distant vocative (1.2.33)
// - ritual.rs: Ritual monotone with its exceptions, vaṣaṭ (1.2.34, 1.2.35)
// - chandas.rs: Optional monotone in metrical verse (1.2.36)
// - domain.rs: Subrahmaṇyā override (1.2.37, 1.2.38)
// - assimilation.rs: Anudātta runs after a svarita (1.2.39)
// - sannatara.rs: Lowered anudātta annotations (1.2.40)
// - pipeline.rs: `ProsodyStage` trait and the standard stage order
// - aggregate.rs: `Engine`, primary decision, confidence, JSON requests
// - error.rs: Config and request errors
//
// Every operation is a pure function of its inputs; `Engine` is immutable
// after construction.

pub mod aggregate;
pub mod assimilation;
pub mod chandas;
pub mod config;
pub mod context;
pub mod domain;
pub mod ekashruti;
pub mod error;
pub mod pipeline;
pub mod ritual;
pub mod sannatara;
pub mod svarita;
pub mod types;

pub use aggregate::{Engine, aggregate, confidence, default_engine};
pub use config::{ChandasTiers, ConfidenceWeights, EngineConfig};
pub use context::{DistanceCategory, GrammaticalCase, ProsodyContext};
pub use error::{ConfigError, RequestError};
pub use pipeline::{Pipeline, ProsodyStage, StageInput};
pub use svarita::{SvaritaDecomposition, decompose, decompose_with};
pub use types::{
    AggregateResult, PrimaryDecision, ProsodyAnnotation, ProsodyMode, ProsodyOption, RuleId,
    SupersededOption,
};
