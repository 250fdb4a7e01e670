// Data-driven engine configuration.
//
// Every tunable number the rules read lives in `EngineConfig`: the default
// far-distance threshold, the chandas flexibility tiers, and the confidence
// weights. Nothing in the rule modules hardcodes these values. Configs are
// loaded from JSON (every field optional, falling back to `Default`) and
// validated before an engine accepts them.
//
// The confidence score is monotone in the context by construction: every
// weight is a non-negative bonus, and `validate()` rejects negative ones.
//
// See also: `aggregate.rs` which owns the `EngineConfig` as part of
// `Engine`, and `svara_lang::Lexicon` for the word list injected alongside
// it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Additive confidence weights. The score is
/// `base_valid + min(signals * per_context_signal, max_context_bonus)
///  + min(marks * per_accent_mark, max_mark_bonus)`, clamped to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceWeights {
    /// Awarded to any structurally valid input.
    pub base_valid: f64,
    /// Per explicit context signal (domain, ritual, meter, vocative+distance).
    pub per_context_signal: f64,
    pub max_context_bonus: f64,
    /// Per pitch mark written in the input.
    pub per_accent_mark: f64,
    pub max_mark_bonus: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        ConfidenceWeights {
            base_valid: 0.5,
            per_context_signal: 0.15,
            max_context_bonus: 0.3,
            per_accent_mark: 0.05,
            max_mark_bonus: 0.2,
        }
    }
}

impl ConfidenceWeights {
    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("base_valid", self.base_valid),
            ("per_context_signal", self.per_context_signal),
            ("max_context_bonus", self.max_context_bonus),
            ("per_accent_mark", self.per_accent_mark),
            ("max_mark_bonus", self.max_mark_bonus),
        ]
    }
}

/// Syllable-count bounds for metrical flexibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChandasTiers {
    /// Words with at most this many syllables have limited flexibility.
    pub limited_max_syllables: usize,
    /// Words with at least this many syllables also get the mixed mode.
    pub extended_min_syllables: usize,
}

impl Default for ChandasTiers {
    fn default() -> Self {
        ChandasTiers {
            limited_max_syllables: 2,
            extended_min_syllables: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Distance (meters) at which an addressee counts as far when the
    /// context gives a distance but no threshold.
    pub default_distance_threshold: f64,
    /// Treat every context as Subrahmaṇyā. Used to run a whole corpus
    /// through the domain rules without tagging each request.
    pub implicit_domain: bool,
    pub chandas: ChandasTiers,
    pub confidence: ConfidenceWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_distance_threshold: 10.0,
            implicit_domain: false,
            chandas: ChandasTiers::default(),
            confidence: ConfidenceWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        EngineConfig::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.confidence.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeWeight { name, value });
            }
        }
        if self.chandas.limited_max_syllables >= self.chandas.extended_min_syllables {
            return Err(ConfigError::BadTierBounds {
                limited: self.chandas.limited_max_syllables,
                extended: self.chandas.extended_min_syllables,
            });
        }
        let threshold = self.default_distance_threshold;
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(ConfigError::BadThreshold(threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_weights_max_out_at_one() {
        let w = ConfidenceWeights::default();
        let max = w.base_valid + w.max_context_bonus + w.max_mark_bonus;
        assert!((max - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{"implicit_domain": true}"#).unwrap();
        assert!(config.implicit_domain);
        assert_eq!(config.default_distance_threshold, 10.0);
        assert_eq!(config.chandas, ChandasTiers::default());

        let config =
            EngineConfig::from_json(r#"{"confidence": {"per_accent_mark": 0.1}}"#).unwrap();
        assert_eq!(config.confidence.per_accent_mark, 0.1);
        assert_eq!(config.confidence.base_valid, 0.5);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = EngineConfig {
            default_distance_threshold: 25.0,
            implicit_domain: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = EngineConfig::from_json(r#"{"confidence": {"per_context_signal": -0.1}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NegativeWeight {
                name: "per_context_signal",
                ..
            }
        ));
    }

    #[test]
    fn test_overlapping_tiers_rejected() {
        let err = EngineConfig::from_json(
            r#"{"chandas": {"limited_max_syllables": 4, "extended_min_syllables": 4}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::BadTierBounds { .. }));
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let err = EngineConfig::from_json(r#"{"default_distance_threshold": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::BadThreshold(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/svara.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
