// Result types shared by every prosody rule and the aggregator.
//
// Rule identifiers and option modes are closed enums. Their stable string
// forms ("1.2.33", "monotone-forced", ...) exist only at the serialization
// boundary, so a typo in a mode name is a compile error rather than a
// silently unmatched string.
//
// `AggregateResult` is the one value that flows through the stage pipeline
// (`pipeline.rs`). Stages add options with `push_option`, which enforces the
// no-duplicate `(mode, form)` invariant by merging provenance, and remove
// options only through `supersede_where`, which keeps the removed option and
// the rule that removed it.

use crate::svarita::SvaritaSegment;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Sūtra identifiers for the rules this engine implements, in textual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RuleId {
    /// Svarita: first half-unit is udātta.
    #[serde(rename = "1.2.32")]
    SvaritaOnset,
    /// Ekashruti when calling out to someone far away.
    #[serde(rename = "1.2.33")]
    DistantVocative,
    /// Ekashruti in ritual recitation, with its exceptions.
    #[serde(rename = "1.2.34")]
    Ritual,
    /// Vaṣaṭ may be pronounced higher than udātta.
    #[serde(rename = "1.2.35")]
    Vashat,
    /// Ekashruti optional in metrical verse.
    #[serde(rename = "1.2.36")]
    Chandas,
    /// Subrahmaṇyā: no ekashruti, svarita becomes udātta.
    #[serde(rename = "1.2.37")]
    Subrahmanya,
    /// Subrahmaṇyā: deva and brahman are anudātta.
    #[serde(rename = "1.2.38")]
    DevaBrahman,
    /// Anudāttas after a svarita become ekashruti.
    #[serde(rename = "1.2.39")]
    PostSvarita,
    /// Anudātta before udātta/svarita is lowered further.
    #[serde(rename = "1.2.40")]
    Sannatara,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::SvaritaOnset => "1.2.32",
            RuleId::DistantVocative => "1.2.33",
            RuleId::Ritual => "1.2.34",
            RuleId::Vashat => "1.2.35",
            RuleId::Chandas => "1.2.36",
            RuleId::Subrahmanya => "1.2.37",
            RuleId::DevaBrahman => "1.2.38",
            RuleId::PostSvarita => "1.2.39",
            RuleId::Sannatara => "1.2.40",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a candidate form was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProsodyMode {
    /// All pitch flattened, mandatory.
    MonotoneForced,
    /// All pitch flattened, one choice among several.
    MonotoneOptional,
    /// First accent kept, later accents flattened.
    MixedVariation,
    /// Text as written.
    NaturalAccent,
    /// Every vowel raised (vaṣaṭ).
    UccaistaraOptional,
    /// Svarita rewritten as udātta.
    UdaattaReplaced,
    /// Every vowel rewritten as anudātta.
    LexicalAnudatta,
    /// Anudātta run after a svarita flattened.
    LocalMonotone,
}

impl ProsodyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ProsodyMode::MonotoneForced => "monotone-forced",
            ProsodyMode::MonotoneOptional => "monotone-optional",
            ProsodyMode::MixedVariation => "mixed-variation",
            ProsodyMode::NaturalAccent => "natural-accent",
            ProsodyMode::UccaistaraOptional => "uccaistara-optional",
            ProsodyMode::UdaattaReplaced => "udaatta-replaced",
            ProsodyMode::LexicalAnudatta => "lexical-anudatta",
            ProsodyMode::LocalMonotone => "local-monotone",
        }
    }

    /// Modes that the Subrahmaṇyā domain forbids.
    pub fn is_monotone(self) -> bool {
        self.as_str().starts_with("monotone")
    }
}

impl fmt::Display for ProsodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate pronunciation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProsodyOption {
    pub form: String,
    pub mode: ProsodyMode,
    /// Every rule that proposed this exact `(mode, form)`, sorted.
    pub sources: Vec<RuleId>,
}

/// An option a later rule removed, kept for the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupersededOption {
    pub option: ProsodyOption,
    pub superseded_by: RuleId,
}

/// Findings that describe the input without proposing a new form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProsodyAnnotation {
    /// Timing of a svarita vowel at phoneme `index`.
    SvaritaSegments {
        index: usize,
        vowel: String,
        duration_units: f64,
        segments: Vec<SvaritaSegment>,
    },
    /// An anudātta at phoneme `index` that precedes a higher tone.
    Sannatara { index: usize, vowel: String },
}

/// The single decision reported for an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryDecision {
    /// The domain override fixed the accentuation.
    Accented,
    /// Several options survive; the caller must choose.
    Options,
    Monotone,
    Natural,
    /// Exactly one option survives with this mode.
    Mode(ProsodyMode),
}

impl PrimaryDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            PrimaryDecision::Accented => "accented",
            PrimaryDecision::Options => "options",
            PrimaryDecision::Monotone => "monotone",
            PrimaryDecision::Natural => "natural",
            PrimaryDecision::Mode(mode) => mode.as_str(),
        }
    }
}

impl fmt::Display for PrimaryDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PrimaryDecision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Everything the engine concluded about one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub input: String,
    pub options: Vec<ProsodyOption>,
    pub primary_decision: PrimaryDecision,
    /// Rules that contributed an option or a blocking decision, sorted.
    pub applied_sutras: BTreeSet<RuleId>,
    pub reasoning: Vec<String>,
    pub confidence: f64,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub superseded: Vec<SupersededOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<ProsodyAnnotation>,
}

impl AggregateResult {
    /// An empty, valid result for `input`.
    pub fn new(input: &str) -> Self {
        AggregateResult {
            input: input.to_string(),
            options: Vec::new(),
            primary_decision: PrimaryDecision::Natural,
            applied_sutras: BTreeSet::new(),
            reasoning: Vec::new(),
            confidence: 0.0,
            is_valid: true,
            errors: Vec::new(),
            superseded: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// An invalid result with zero confidence.
    pub fn invalid(input: &str, error: impl Into<String>) -> Self {
        AggregateResult {
            is_valid: false,
            errors: vec![error.into()],
            ..AggregateResult::new(input)
        }
    }

    /// Add a candidate. A repeated `(mode, form)` merges `source` into the
    /// existing option instead of adding a second one.
    pub fn push_option(&mut self, mode: ProsodyMode, form: impl Into<String>, source: RuleId) {
        let form = form.into();
        self.applied_sutras.insert(source);

        if let Some(existing) = self
            .options
            .iter_mut()
            .find(|o| o.mode == mode && o.form == form)
        {
            if !existing.sources.contains(&source) {
                existing.sources.push(source);
                existing.sources.sort();
            }
            tracing::trace!(%mode, %form, %source, "merged duplicate option");
            return;
        }

        tracing::trace!(%mode, %form, %source, "new option");
        self.options.push(ProsodyOption {
            form,
            mode,
            sources: vec![source],
        });
    }

    /// Record that `rule` made a decision (including a decision to block).
    pub fn record(&mut self, rule: RuleId, reason: impl Into<String>) {
        self.applied_sutras.insert(rule);
        self.reasoning.push(format!("{rule}: {}", reason.into()));
    }

    /// Add a reasoning line without marking any rule as applied.
    pub fn note(&mut self, reason: impl Into<String>) {
        self.reasoning.push(reason.into());
    }

    /// Move every option matching `pred` to `superseded`. Returns how many
    /// were moved.
    pub fn supersede_where<F>(&mut self, by: RuleId, pred: F) -> usize
    where
        F: Fn(&ProsodyOption) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) = self.options.drain(..).partition(|o| pred(o));
        self.options = kept;
        let count = removed.len();
        self.superseded
            .extend(removed.into_iter().map(|option| SupersededOption {
                option,
                superseded_by: by,
            }));
        count
    }

    pub fn has_mode(&self, mode: ProsodyMode) -> bool {
        self.options.iter().any(|o| o.mode == mode)
    }

    pub fn option(&self, mode: ProsodyMode) -> Option<&ProsodyOption> {
        self.options.iter().find(|o| o.mode == mode)
    }

    /// Applied sūtras as their dotted identifiers, in order.
    pub fn applied_sutra_ids(&self) -> Vec<&'static str> {
        self.applied_sutras.iter().map(|r| r.as_str()).collect()
    }
}
