// Error type for accent classification and marking.
//
// Only malformed single-vowel input reaches an error. Text-level operations
// accept any input and never fail.

use thiserror::Error;

/// Why a string could not be classified or marked as an accented vowel.
///
/// These are ordinary results for malformed input, not panics. Callers that
/// need a yes/no answer can use `Result::is_ok`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccentError {
    #[error("input is empty")]
    Empty,
    #[error("'{0}' is not a vowel")]
    NotAVowel(String),
    #[error("'{input}' carries conflicting pitch marks ({first} and {second})")]
    ConflictingMarks {
        input: String,
        first: crate::Accent,
        second: crate::Accent,
    },
}
