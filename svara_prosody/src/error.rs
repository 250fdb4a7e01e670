// Error types for the engine's two fallible entry points.
//
// `ConfigError` covers loading and validating an `EngineConfig` from JSON.
// `RequestError` covers the shape of a JSON request handed to
// `Engine::resolve_request`. Problems with the text itself are not errors:
// they come back as an invalid `AggregateResult`.

use std::path::PathBuf;
use thiserror::Error;

/// Problems loading or validating an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("confidence weight `{name}` must be a non-negative finite number, got {value}")]
    NegativeWeight { name: &'static str, value: f64 },
    #[error(
        "chandas tiers overlap: limited_max_syllables ({limited}) must be below extended_min_syllables ({extended})"
    )]
    BadTierBounds { limited: usize, extended: usize },
    #[error("default distance threshold must be positive, got {0}")]
    BadThreshold(f64),
}

/// Problems with a JSON request at the engine boundary. These are caller
/// mistakes, unlike empty or unaccented text which yields an invalid result.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request has no `text` field")]
    MissingText,
    #[error("`text` must be a string, got {0}")]
    TextNotString(&'static str),
    #[error("malformed `context`: {0}")]
    Context(#[source] serde_json::Error),
}
