//! Crate-level error type.

use crate::css::parser::ParseError;
use crate::selector::parser::SelectorError;

/// Any failure a transform can surface. Both variants wrap parse errors;
/// past parsing, the pipeline has no failure modes of its own.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The stylesheet source failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A rule selector failed to parse during translation.
    #[error(transparent)]
    Selector(#[from] SelectorError),
}
