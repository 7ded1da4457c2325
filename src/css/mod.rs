//! Stylesheet engine: tokenizer, rule tree, parser, serializer, flattener.

pub mod flatten;
pub mod model;
pub mod parser;
pub mod serialize;
pub mod tokenizer;

pub use flatten::flatten;
pub use model::{Node, NodeId, Stylesheet};
pub use parser::{parse, ParseError};
pub use serialize::serialize;
