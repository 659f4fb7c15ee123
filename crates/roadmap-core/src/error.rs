//! Configuration error types.
//!
//! The scoring engine itself never fails; these errors only arise while
//! turning external text (assessment files, config, CLI flags, answer files)
//! into the typed values the engine consumes.

use thiserror::Error;

/// Errors raised while reading assessment configuration and answer input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A domain name that is not one of the known competency categories.
    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    /// A strategy name other than `weighted` or `conservative`.
    #[error("unknown strategy: {0} (expected `weighted` or `conservative`)")]
    UnknownStrategy(String),

    /// A question that does not list exactly three response options.
    #[error("question {index} has {found} options, expected 3")]
    OptionCount { index: usize, found: usize },

    /// An inline answer that is not of the form `question=option`.
    #[error("invalid answer `{0}`, expected `<question>=<option>`")]
    InvalidAnswer(String),
}
