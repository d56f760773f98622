// Error type shared by the matcher, the builder and the extraction layer.

use std::collections::TryReserveError;

/// Errors raised while building a template or extracting data with one.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A signed tolerance below zero was supplied.
    #[error("tolerance must be non-negative, got {0}")]
    NegativeTolerance(i64),

    /// The output buffer could not grow to hold the template.
    #[error("template buffer could not grow: {0}")]
    Capacity(#[from] TryReserveError),

    /// The text does not follow the template's structure.
    #[error("text does not match the template")]
    NoMatch,

    /// The extraction pattern derived from the template failed to compile.
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}
