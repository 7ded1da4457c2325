//! Selector engine: tokenizer, component model, parser.

pub mod model;
pub mod parser;
pub mod tokenizer;

pub use model::{AttrOp, Combinator, Component, PseudoArg};
pub use parser::{parse, SelectorError};
